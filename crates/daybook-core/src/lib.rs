//! Core library for the Daybook planner generator.
//!
//! This crate turns a planner [`Configuration`] into the ordered pages of a
//! hyperlinked, printable planner: year, month and week overviews, day
//! pages and week retrospectives, each with a stable id used both as its
//! anchor and as the target of every link into it.
//!
//! # Pipeline
//!
//! 1. **Configuration** ([`config`]): defaults, named templates and
//!    versioned persisted files, resolved by the [`ConfigurationLoader`]
//! 2. **Enumeration** ([`document`]): the deterministic page sequence with
//!    resolved links, ids coming from the [`LinkResolver`]
//! 3. **Layout** ([`layout`]): per-page geometry, chrome and content
//! 4. **Rendering** ([`render`]): PDF output carrying the configuration as
//!    an attachment
//!
//! # Quick Start
//!
//! ```rust
//! use daybook_core::{
//!     config::{Configuration, Template},
//!     derive_document_geometry, enumerate_pages, DocumentRenderer, PdfRenderer,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Template::Advanced.apply(Configuration::new(2025, 1));
//! config.calendar_range.month_count = 1;
//!
//! let document = enumerate_pages(&config)?;
//! let geometry = derive_document_geometry(&document, &config)?;
//! let bytes = PdfRenderer::new().render(&document, &geometry, &config)?;
//! assert!(bytes.starts_with(b"%PDF"));
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod layout;
pub mod links;
pub mod loader;
pub mod params;
pub mod render;

// Re-export commonly used types
pub use config::{migrate, Configuration, ItineraryDirective, SchemaVersion, Template};
pub use display::{ConfigurationSummary, DocumentOutline};
pub use document::{enumerate_pages, Document, PageDescriptor, PageLinks};
pub use error::{DaybookError, Result};
pub use layout::{derive_document_geometry, derive_geometry, PageGeometry};
pub use links::{LinkResolver, PageId, PageKind};
pub use loader::{ConfigurationLoader, ConfigurationSource};
pub use params::ConfigOverrides;
pub use render::{extract_json_attachment, DocumentRenderer, PdfRenderer};
