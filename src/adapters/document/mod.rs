//! Document adapters - Implementations for proposal export.
//!
//! This module provides adapters for the document-related ports:
//! - `PulldownExportService` - Markdown, HTML (pulldown-cmark) and PDF (WeasyPrint) export
//! - `markdown_writer` - Escaped Markdown serialization of a rendered proposal

pub mod markdown_writer;
mod pulldown_export_service;

pub use pulldown_export_service::{
    PulldownExportService, DEFAULT_PDF_ENGINE, EMPHASIZED_CLAUSE_CLASS,
};
