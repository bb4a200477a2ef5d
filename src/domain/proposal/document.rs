//! The rendered document tree.
//!
//! This is the single artifact both preview and export consume. It holds
//! display-ready strings only; every placeholder has already been applied.

use serde::Serialize;

use super::formatting::ClauseEmphasis;
use super::style::StylePresentation;

/// A fully rendered proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub presentation: StylePresentation,
    pub header: DocumentHeader,
    pub info: Vec<InfoField>,
    pub sections: Vec<Section>,
    pub signature: SignatureBlock,
    pub validity_note: String,
}

impl RenderedDocument {
    /// Returns the section of the given kind.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Returns the value of the info field with the given label.
    pub fn info_value(&self, label: &str) -> Option<&str> {
        self.info
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// Title block at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHeader {
    pub title: String,
    pub studio: String,
    pub tagline: String,
}

/// One labelled cell of the info grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoField {
    pub label: String,
    pub value: String,
}

/// The numbered content sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Objective,
    Scope,
    Deliverables,
    Deadline,
    Revisions,
    Investment,
    NotIncluded,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 7] = [
        SectionKind::Objective,
        SectionKind::Scope,
        SectionKind::Deliverables,
        SectionKind::Deadline,
        SectionKind::Revisions,
        SectionKind::Investment,
        SectionKind::NotIncluded,
    ];

    /// Printed section number.
    pub fn number(&self) -> u8 {
        match self {
            SectionKind::Objective => 1,
            SectionKind::Scope => 2,
            SectionKind::Deliverables => 3,
            SectionKind::Deadline => 4,
            SectionKind::Revisions => 5,
            SectionKind::Investment => 6,
            SectionKind::NotIncluded => 7,
        }
    }

    /// Printed section heading.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Objective => "Objetivo do Projeto",
            SectionKind::Scope => "Escopo do Projeto",
            SectionKind::Deliverables => "Entregáveis",
            SectionKind::Deadline => "Prazo Estimado",
            SectionKind::Revisions => "Revisões",
            SectionKind::Investment => "Investimento",
            SectionKind::NotIncluded => "Não Incluso",
        }
    }

    /// Stable identifier, used for CSS classes.
    pub fn slug(&self) -> &'static str {
        match self {
            SectionKind::Objective => "objective",
            SectionKind::Scope => "scope",
            SectionKind::Deliverables => "deliverables",
            SectionKind::Deadline => "deadline",
            SectionKind::Revisions => "revisions",
            SectionKind::Investment => "investment",
            SectionKind::NotIncluded => "not-included",
        }
    }
}

/// A numbered section with its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub body: SectionBody,
}

impl Section {
    pub fn number(&self) -> u8 {
        self.kind.number()
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Rows of a list section, empty for any other body.
    pub fn rows(&self) -> &[String] {
        match &self.body {
            SectionBody::Rows { items } => items,
            _ => &[],
        }
    }
}

/// Content of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SectionBody {
    /// Free prose; may be empty.
    Paragraph { text: String },
    /// One row per list item, in record order.
    Rows { items: Vec<String> },
    /// Highlighted deadline box.
    Deadline { text: String },
    /// Total value card with payment terms.
    Investment {
        total_label: String,
        total: String,
        terms: Vec<TermLine>,
    },
}

/// One payment-terms line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermLine {
    pub text: String,
    pub emphasis: ClauseEmphasis,
}

/// Client signature line at the foot of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureBlock {
    pub label: String,
    pub signer: String,
}
