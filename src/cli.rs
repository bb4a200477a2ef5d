//! Command-line arguments for the proposal editor
//!
//! Each invocation restores the saved draft, applies one command and
//! persists the result.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use motionflow::domain::proposal::{ListField, StyleVariant, TextField};
use motionflow::ports::ExportFormat;

/// Commercial proposals for motion design studios
#[derive(Parser, Debug)]
#[command(name = "motionflow", version, about = "Commercial proposal generator")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the rendered proposal
    Show {
        /// Visual style
        #[arg(long, default_value = "modern")]
        style: StyleVariant,

        /// Print the rendered document tree as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Set a text field (client-name, project-name, objective, payment-terms, ...)
    Set { field: TextField, value: String },

    /// Append an empty row to a list (scope, deliverables, not-included)
    AddItem { list: ListField },

    /// Replace one row of a list (zero-based index)
    SetItem {
        list: ListField,
        index: usize,
        value: String,
    },

    /// Remove one row of a list (zero-based index)
    RemoveItem { list: ListField, index: usize },

    /// Rewrite objective, revisions or payment-terms with the AI provider
    Refine { field: TextField },

    /// Ask the AI provider for scope items for the current project
    SuggestScope {
        /// Keep the existing items and add the suggestions after them
        #[arg(long)]
        append: bool,
    },

    /// Start over from the default template and delete the saved draft
    Reset,

    /// Show or change the light/dark preference
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Write the proposal to a file
    Export {
        /// Visual style
        #[arg(long, default_value = "modern")]
        style: StyleVariant,

        /// Output format (md, html, pdf)
        #[arg(long, default_value = "pdf")]
        format: ExportFormat,

        /// Output path; defaults to a name derived from the project
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// List the suggested project types
    ProjectTypes,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeAction {
    Toggle,
    Light,
    Dark,
}
