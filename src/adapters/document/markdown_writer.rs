//! Markdown serialization of a rendered proposal.
//!
//! The document is written part by part (header, info grid, numbered
//! sections, signature footer) so the HTML exporter can wrap each part in
//! its own element. All user-supplied text goes through [`escape_line`];
//! the only markup in the output is the markup written here.

use crate::domain::proposal::{
    ClauseEmphasis, InfoField, RenderedDocument, Section, SectionBody, TermLine,
};

/// Writes the complete document.
pub fn write_document(document: &RenderedDocument) -> String {
    let mut parts = vec![write_header(document), write_info(&document.info)];
    parts.extend(document.sections.iter().map(write_section));
    parts.push(write_footer(document));
    parts.join("\n")
}

/// Title, studio name and tagline.
pub fn write_header(document: &RenderedDocument) -> String {
    let header = &document.header;
    format!(
        "# {}\n\n**{}** · {}\n",
        escape_line(&header.title),
        escape_line(&header.studio),
        escape_line(&header.tagline)
    )
}

/// The info grid as a single-row table.
pub fn write_info(info: &[InfoField]) -> String {
    if info.is_empty() {
        return String::new();
    }

    let labels: Vec<String> = info.iter().map(|f| escape_line(&f.label)).collect();
    let values: Vec<String> = info.iter().map(|f| escape_line(&f.value)).collect();
    let rule: Vec<&str> = info.iter().map(|_| "---").collect();

    format!(
        "| {} |\n| {} |\n| {} |\n",
        labels.join(" | "),
        rule.join(" | "),
        values.join(" | ")
    )
}

/// One numbered section.
pub fn write_section(section: &Section) -> String {
    let mut out = format!("## {}. {}\n\n", section.number(), escape_line(section.title()));

    match &section.body {
        SectionBody::Paragraph { text } => out.push_str(&write_paragraphs(text)),
        SectionBody::Rows { items } => {
            for item in items {
                out.push_str(&list_item(&escape_line(item)));
            }
        }
        SectionBody::Deadline { text } => {
            out.push_str(&format!("> **{}**\n", escape_line(text)));
        }
        SectionBody::Investment {
            total_label,
            total,
            terms,
        } => {
            out.push_str(&format!(
                "**{}:** {}\n\n",
                escape_line(total_label),
                escape_line(total)
            ));
            for term in terms {
                out.push_str(&list_item(&write_term(term)));
            }
        }
    }

    out
}

/// Signature block and validity note.
pub fn write_footer(document: &RenderedDocument) -> String {
    format!(
        "---\n\n**{}**\\\n{}\n\n*{}*\n",
        escape_line(&document.signature.label),
        escape_line(&document.signature.signer),
        escape_line(&document.validity_note)
    )
}

fn write_term(term: &TermLine) -> String {
    let text = escape_line(&term.text);
    match term.emphasis {
        ClauseEmphasis::Emphasized => format!("**{}**", text),
        ClauseEmphasis::Normal => text,
    }
}

fn list_item(content: &str) -> String {
    if content.is_empty() {
        "-\n".to_string()
    } else {
        format!("- {}\n", content)
    }
}

/// Free prose: blank lines separate paragraphs, single newlines are kept
/// as hard breaks.
fn write_paragraphs(text: &str) -> String {
    let mut out = String::new();
    let mut paragraph: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut paragraph, &mut out);
        } else {
            if paragraph.is_empty() && !out.is_empty() {
                out.push('\n');
            }
            paragraph.push(escape_line(line));
        }
    }
    flush(&mut paragraph, &mut out);

    out
}

fn flush(paragraph: &mut Vec<String>, out: &mut String) {
    if !paragraph.is_empty() {
        out.push_str(&paragraph.join("\\\n"));
        out.push('\n');
        paragraph.clear();
    }
}

/// Characters that are escaped wherever they appear.
const INLINE_SPECIALS: &[char] = &[
    '\\', '`', '*', '_', '[', ']', '<', '>', '|', '~', '&', '!', '#',
];

/// Escapes user text so it renders literally on a single line.
///
/// Embedded newlines are folded to spaces, so a row, clause or name can
/// never spill into extra blocks. Leading whitespace is dropped (it would
/// start a code block) and any character that could open a block at the
/// start of the line is escaped.
pub fn escape_line(line: &str) -> String {
    let folded = line.replace(['\n', '\r'], " ");
    let line = folded.trim_start();
    let mut out = String::with_capacity(line.len() + 8);

    for c in line.chars() {
        if INLINE_SPECIALS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }

    escape_block_start(out)
}

fn escape_block_start(line: String) -> String {
    if line.starts_with(['-', '+', '=']) {
        return format!("\\{}", line);
    }

    // "1. " and "1) " open an ordered list.
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && line[digits..].starts_with(['.', ')']) {
        return format!("{}\\{}", &line[..digits], &line[digits..]);
    }

    line
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
