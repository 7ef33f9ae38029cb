//! Reading configurations back out of generated documents.
//!
//! A generated PDF carries its configuration as an embedded file in the
//! catalog's `/Names /EmbeddedFiles` name tree. Reading it back yields the
//! raw JSON value, which still has to go through migration before use.

use lopdf::{Dictionary, Object};
use serde_json::Value;

use crate::config::{migrate, Configuration};
use crate::error::{DaybookError, Result};

/// Name of the embedded configuration file.
pub const CONFIG_ATTACHMENT: &str = "config.json";

/// Leading bytes of every PDF file.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Name trees deeper than this are rejected as malformed.
const MAX_NAME_TREE_DEPTH: usize = 32;

/// Extracts the embedded file `name` from PDF `bytes` and parses it as JSON.
///
/// # Errors
///
/// - `DaybookError::AttachmentNotFound` if the document has no such file
/// - `DaybookError::AttachmentMalformed` if the container cannot be read or
///   the attachment is not valid JSON
pub fn extract_json_attachment(bytes: &[u8], name: &str) -> Result<Value> {
    let pdf = lopdf::Document::load_mem(bytes).map_err(DaybookError::attachment_malformed)?;
    let not_found = || DaybookError::AttachmentNotFound {
        name: name.to_string(),
    };

    let catalog = pdf.catalog().map_err(DaybookError::attachment_malformed)?;
    let Some(names) = lookup_dict(&pdf, catalog, b"Names")? else {
        return Err(not_found());
    };
    let Some(tree) = lookup_dict(&pdf, names, b"EmbeddedFiles")? else {
        return Err(not_found());
    };
    let filespec = find_in_name_tree(&pdf, tree, name.as_bytes(), 0)?.ok_or_else(not_found)?;

    let embedded = lookup_dict(&pdf, filespec, b"EF")?
        .ok_or_else(|| DaybookError::attachment_malformed("file specification has no /EF"))?;
    let stream_object = embedded
        .get(b"F")
        .map_err(DaybookError::attachment_malformed)?;
    let stream = resolve(&pdf, stream_object)?
        .as_stream()
        .map_err(DaybookError::attachment_malformed)?;

    // Unfiltered streams have nothing to decompress
    let content = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    serde_json::from_slice(&content).map_err(DaybookError::attachment_malformed)
}

/// Parses configuration file contents, JSON or a generated PDF, and
/// migrates the result to the current schema.
///
/// # Errors
///
/// Attachment errors for PDF input, `DaybookError::Serialization` for
/// invalid JSON, and any migration error.
pub fn read_configuration(bytes: &[u8]) -> Result<Configuration> {
    let value = if bytes.starts_with(PDF_MAGIC) {
        extract_json_attachment(bytes, CONFIG_ATTACHMENT)?
    } else {
        serde_json::from_slice(bytes)?
    };
    migrate(value)
}

fn resolve<'a>(pdf: &'a lopdf::Document, object: &'a Object) -> Result<&'a Object> {
    pdf.dereference(object)
        .map(|(_, object)| object)
        .map_err(DaybookError::attachment_malformed)
}

/// Looks up `key` in `dict` and resolves it to a dictionary. A missing key
/// is `None`; a present key of another type is malformed.
fn lookup_dict<'a>(
    pdf: &'a lopdf::Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Result<Option<&'a Dictionary>> {
    let Ok(object) = dict.get(key) else {
        return Ok(None);
    };
    resolve(pdf, object)?
        .as_dict()
        .map(Some)
        .map_err(DaybookError::attachment_malformed)
}

/// Searches a name tree node and its kids for `key`.
fn find_in_name_tree<'a>(
    pdf: &'a lopdf::Document,
    node: &'a Dictionary,
    key: &[u8],
    depth: usize,
) -> Result<Option<&'a Dictionary>> {
    if depth > MAX_NAME_TREE_DEPTH {
        return Err(DaybookError::attachment_malformed("name tree is too deep"));
    }

    if let Ok(names) = node.get(b"Names") {
        let names = resolve(pdf, names)?
            .as_array()
            .map_err(DaybookError::attachment_malformed)?;
        for pair in names.chunks_exact(2) {
            let entry_key = resolve(pdf, &pair[0])?.as_str().ok();
            if entry_key == Some(key) {
                let value = resolve(pdf, &pair[1])?
                    .as_dict()
                    .map_err(DaybookError::attachment_malformed)?;
                return Ok(Some(value));
            }
        }
    }

    if let Ok(kids) = node.get(b"Kids") {
        let kids = resolve(pdf, kids)?
            .as_array()
            .map_err(DaybookError::attachment_malformed)?;
        for kid in kids {
            let kid = resolve(pdf, kid)?
                .as_dict()
                .map_err(DaybookError::attachment_malformed)?;
            if let Some(found) = find_in_name_tree(pdf, kid, key, depth + 1)? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}
