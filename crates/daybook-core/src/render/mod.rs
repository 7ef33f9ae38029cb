//! Turning page geometry into document bytes.
//!
//! [`DocumentRenderer`] is the seam between layout and output formats;
//! [`PdfRenderer`] is the bundled implementation. The [`attachment`] module
//! reads back the configuration a rendered document carries.

pub mod attachment;
mod canvas;
pub mod pdf;

use crate::config::Configuration;
use crate::document::Document;
use crate::error::Result;
use crate::layout::PageGeometry;

pub use attachment::{extract_json_attachment, read_configuration, CONFIG_ATTACHMENT};
pub use pdf::PdfRenderer;

/// An output format for enumerated documents.
pub trait DocumentRenderer {
    /// Renders `pages`, the derived geometry of `document` in document
    /// order, into the bytes of one output file.
    ///
    /// # Errors
    ///
    /// Implementations report encoding failures of their output format.
    fn render(
        &self,
        document: &Document,
        pages: &[PageGeometry],
        config: &Configuration,
    ) -> Result<Vec<u8>>;
}
