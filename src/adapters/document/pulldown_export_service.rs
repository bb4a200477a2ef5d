//! Pulldown-cmark based export service adapter.
//!
//! This adapter provides proposal export capabilities:
//! - Markdown written directly from the rendered document tree
//! - HTML conversion of that Markdown using pulldown-cmark (pure Rust)
//! - PDF conversion of that HTML page by a CSS-aware engine (WeasyPrint or
//!   wkhtmltopdf, installed separately)
//!
//! # Architecture
//!
//! This adapter implements the `DocumentExportService` port from the hexagonal
//! architecture. All three formats derive from the same `RenderedDocument`,
//! so an exported file always matches the preview.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use tokio::process::Command;

use super::markdown_writer;
use crate::domain::proposal::{
    BorderEmphasis, Density, RenderedDocument, SectionKind, StylePresentation, Typography,
};
use crate::ports::{DocumentExportService, ExportError};

/// Class applied to emphasized payment clauses in HTML output.
pub const EMPHASIZED_CLAUSE_CLASS: &str = "clause-emphasized";

/// PDF engine used when none is configured.
pub const DEFAULT_PDF_ENGINE: &str = "weasyprint";

/// Export service using pulldown-cmark for HTML and an HTML engine for PDF.
///
/// # PDF Conversion
///
/// The page produced by `to_html` is piped unchanged to the engine, so the
/// style CSS and clause classes reach the PDF. The engine must be installed
/// on the system; if it is not, PDF conversion returns `ServiceUnavailable`.
///
/// # Example
///
/// ```rust,ignore
/// let service = PulldownExportService::new();
/// let doc = session.preview();
///
/// // HTML conversion (always available)
/// let html = service.to_html(&doc);
///
/// // PDF conversion (requires WeasyPrint)
/// let pdf = service.to_pdf(&doc).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PulldownExportService {
    /// PDF engine executable, by name (searched on PATH) or path.
    pdf_engine: String,

    /// Timeout for PDF conversion in seconds.
    pdf_timeout_secs: u64,
}

impl Default for PulldownExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl PulldownExportService {
    /// Create a new export service with default settings.
    pub fn new() -> Self {
        Self {
            pdf_engine: DEFAULT_PDF_ENGINE.to_string(),
            pdf_timeout_secs: 30,
        }
    }

    /// Set the PDF engine (`weasyprint` or `wkhtmltopdf`, name or path).
    pub fn with_pdf_engine(mut self, engine: impl Into<String>) -> Self {
        self.pdf_engine = engine.into();
        self
    }

    /// Set the timeout for PDF conversion.
    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    /// Arguments that make the engine read HTML on stdin and write PDF to stdout.
    fn pdf_engine_args(&self) -> &'static [&'static str] {
        let engine = Path::new(&self.pdf_engine)
            .file_stem()
            .and_then(|stem| stem.to_str());

        match engine {
            Some("wkhtmltopdf") => &[
                "--quiet",
                "--print-media-type",
                "--encoding",
                "utf-8",
                "-",
                "-",
            ],
            _ => &["--encoding", "utf-8", "-", "-"],
        }
    }

    /// Wrap the converted parts in a complete page styled for `presentation`.
    fn wrap_html(&self, body: String, title: &str, presentation: &StylePresentation) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{presentation_css}{base_css}
    </style>
</head>
<body>
    <article class="proposal proposal-{variant}">
{body}
    </article>
</body>
</html>"#,
            title = html_escape(title),
            presentation_css = presentation_css(presentation),
            base_css = BASE_CSS,
            variant = presentation.variant.as_str(),
            body = body
        )
    }

    /// Check if the PDF engine is installed and accessible.
    async fn check_engine(&self) -> bool {
        let output = Command::new(&self.pdf_engine)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        output.map(|o| o.status.success()).unwrap_or(false)
    }
}

#[async_trait]
impl DocumentExportService for PulldownExportService {
    fn to_markdown(&self, document: &RenderedDocument) -> String {
        markdown_writer::write_document(document)
    }

    fn to_html(&self, document: &RenderedDocument) -> String {
        let mut body = String::new();

        push_part(
            &mut body,
            "header",
            "proposal-header",
            &markdown_writer::write_header(document),
            false,
        );
        push_part(
            &mut body,
            "section",
            "proposal-info",
            &markdown_writer::write_info(&document.info),
            false,
        );
        for section in &document.sections {
            push_part(
                &mut body,
                "section",
                &format!("proposal-section section-{}", section.kind.slug()),
                &markdown_writer::write_section(section),
                section.kind == SectionKind::Investment,
            );
        }
        push_part(
            &mut body,
            "footer",
            "proposal-footer",
            &markdown_writer::write_footer(document),
            false,
        );

        self.wrap_html(body, &document.header.title, &document.presentation)
    }

    async fn to_pdf(&self, document: &RenderedDocument) -> Result<Vec<u8>, ExportError> {
        if !self.check_engine().await {
            return Err(ExportError::service_unavailable(format!(
                "PDF engine '{}' is not installed. PDF export requires WeasyPrint \
                 (https://weasyprint.org) or wkhtmltopdf.",
                self.pdf_engine
            )));
        }

        let html = self.to_html(document);

        let mut child = Command::new(&self.pdf_engine)
            .args(self.pdf_engine_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::pdf_failed(format!("Failed to start PDF engine: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            use tokio::io::AsyncWriteExt;
            stdin
                .write_all(html.as_bytes())
                .await
                .map_err(|e| {
                    ExportError::pdf_failed(format!("Failed to write to PDF engine: {}", e))
                })?;
        }

        let output = tokio::time::timeout(
            std::time::Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| ExportError::pdf_failed(format!("PDF engine execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::pdf_failed(format!(
                "PDF engine returned error: {}",
                stderr.trim()
            )));
        }

        tracing::debug!(engine = %self.pdf_engine, bytes = output.stdout.len(), "pdf generated");
        Ok(output.stdout)
    }
}

/// Convert one Markdown part and append it wrapped in `<element class=...>`.
///
/// With `mark_clauses`, bold text inside list items is tagged with
/// [`EMPHASIZED_CLAUSE_CLASS`].
fn push_part(out: &mut String, element: &str, class: &str, markdown: &str, mark_clauses: bool) {
    if markdown.is_empty() {
        return;
    }

    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
    let mut html_part = String::new();

    if mark_clauses {
        let mut item_depth = 0usize;
        let events = parser.map(move |event| match event {
            Event::Start(Tag::Item) => {
                item_depth += 1;
                event
            }
            Event::End(Tag::Item) => {
                item_depth = item_depth.saturating_sub(1);
                event
            }
            Event::Start(Tag::Strong) if item_depth > 0 => Event::Html(CowStr::Borrowed(
                r#"<strong class="clause-emphasized">"#,
            )),
            other => other,
        });
        html::push_html(&mut html_part, events);
    } else {
        html::push_html(&mut html_part, parser);
    }

    out.push_str(&format!(
        "<{element} class=\"{class}\">\n{html_part}</{element}>\n"
    ));
}

/// CSS variables derived from the resolved style.
fn presentation_css(presentation: &StylePresentation) -> String {
    let border = match presentation.border {
        BorderEmphasis::None => "none",
        BorderEmphasis::Thin => "1px solid var(--rule-color)",
        BorderEmphasis::Accent => "4px solid var(--accent-color)",
        BorderEmphasis::ThickAccent => "8px solid var(--accent-color)",
    };
    let font = match presentation.typography {
        Typography::Default => "'Inter', 'Helvetica Neue', Arial, sans-serif",
        Typography::Serif => "Georgia, 'Times New Roman', serif",
    };
    let (line_height, section_gap) = match presentation.density {
        Density::Standard => ("1.6", "1.75rem"),
        Density::Relaxed => ("1.85", "2.5rem"),
    };

    format!(
        ":root {{\n    --page-border: {border};\n    --body-font: {font};\n    \
         --line-height: {line_height};\n    --section-gap: {section_gap};\n}}\n"
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Static CSS shared by every style; style-specific values come from
/// [`presentation_css`].
const BASE_CSS: &str = r#"
:root {
    --accent-color: #fff95b;
    --text-color: #1a1a1a;
    --muted-color: #6b7280;
    --rule-color: #e5e7eb;
    --panel-color: #f9fafb;
}

* {
    box-sizing: border-box;
}

body {
    font-family: var(--body-font);
    font-size: 15px;
    line-height: var(--line-height);
    color: var(--text-color);
    background-color: #ffffff;
    margin: 0 auto;
    max-width: 800px;
    padding: 2rem;
}

.proposal {
    border-top: var(--page-border);
    padding: 2.5rem 2rem;
}

.proposal-header h1 {
    font-size: 2rem;
    letter-spacing: -0.02em;
    text-transform: uppercase;
    margin: 0 0 0.25rem;
}

.proposal-info table {
    width: 100%;
    border-collapse: collapse;
    background-color: var(--panel-color);
    border-left: 8px solid var(--accent-color);
    margin: 1.5rem 0 2.5rem;
}

.proposal-info th {
    font-size: 0.7rem;
    text-transform: uppercase;
    letter-spacing: 0.1em;
    color: var(--muted-color);
    text-align: left;
    padding: 0.75rem 0.75rem 0;
}

.proposal-info td {
    font-weight: 700;
    padding: 0.25rem 0.75rem 0.75rem;
}

.proposal-section {
    margin-bottom: var(--section-gap);
}

.proposal-section h2 {
    font-size: 0.85rem;
    text-transform: uppercase;
    letter-spacing: 0.12em;
    margin: 0 0 0.75rem;
}

.proposal-section ul {
    margin: 0;
    padding-left: 1.5rem;
}

.section-deadline blockquote {
    margin: 0;
    padding: 0.75rem 1rem;
    background-color: var(--panel-color);
    border: 2px solid var(--accent-color);
    border-radius: 0.75rem;
}

.section-investment p strong {
    font-size: 0.8rem;
    text-transform: uppercase;
}

.section-investment ul {
    list-style: none;
    padding-left: 0;
}

strong.clause-emphasized {
    color: #b45309;
    font-weight: 900;
}

.proposal-footer hr {
    border: none;
    border-top: 1px solid var(--text-color);
    width: 16rem;
    margin: 4rem 0 0.5rem;
}

.proposal-footer em {
    display: block;
    margin-top: 2rem;
    font-size: 0.75rem;
    color: var(--muted-color);
}

@page {
    size: A4;
    margin: 15mm;
}

@media print {
    body {
        font-size: 11pt;
        padding: 0;
        max-width: none;
    }

    .proposal {
        padding: 0;
    }

    .proposal-section {
        page-break-inside: avoid;
    }

    h1, h2 {
        page-break-after: avoid;
    }
}
"#;

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
