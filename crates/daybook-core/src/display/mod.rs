//! Markdown formatting of documents and configurations.
//!
//! Domain types implement [`std::fmt::Display`] directly where a single
//! format makes sense; wrapper types cover the context-specific views the
//! command line prints.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Types   │    │ Display Wrapper │    │    Markdown     │
//! │ (Document, ...) │───▶│     Types       │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`models`]: Display implementations for pages and page kinds
//! - [`outline`]: The page tree of an enumerated document
//! - [`summary`]: A short overview of a configuration
//!
//! ```rust
//! use daybook_core::{config::Configuration, display::DocumentOutline, enumerate_pages};
//!
//! let mut config = Configuration::new(2024, 1);
//! config.calendar_range.month_count = 1;
//! let document = enumerate_pages(&config).unwrap();
//!
//! let outline = DocumentOutline::new(&document).with_days(false);
//! assert!(outline.to_string().contains("month-2024-01"));
//! ```

pub mod models;
pub mod outline;
pub mod summary;

pub use outline::DocumentOutline;
pub use summary::ConfigurationSummary;
