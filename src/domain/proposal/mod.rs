//! Proposal domain - the record, its text shaping, styles and rendering.
//!
//! Leaves first: [`record`] holds the data, [`formatting`] derives display
//! fragments, [`style`] resolves presentation rules and [`renderer`]
//! composes them into a [`document::RenderedDocument`].

pub mod document;
pub mod formatting;
pub mod record;
pub mod renderer;
pub mod style;
pub mod theme;

pub use document::{
    DocumentHeader, InfoField, RenderedDocument, Section, SectionBody, SectionKind,
    SignatureBlock, TermLine,
};
pub use formatting::{
    classify_clause, format_deadline, format_total_value, split_into_clauses, with_placeholder,
    ClauseEmphasis, BLANK, DEADLINE_TO_BE_DEFINED, TERMS_BLANK, TOTAL_VALUE_BLANK,
};
pub use record::{EditError, ListField, ProposalRecord, TextField, PROJECT_TYPES};
pub use renderer::render;
pub use style::{
    resolve_style, BorderEmphasis, Density, StylePresentation, StyleVariant, Typography,
    UnknownStyle,
};
pub use theme::{Theme, UnknownTheme};
