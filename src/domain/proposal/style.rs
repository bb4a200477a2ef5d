//! Visual style variants and their presentation rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named visual presentation applied to the same proposal content.
///
/// Transient: selected per render, never stored with the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleVariant {
    #[default]
    Modern,
    Elegant,
    Bold,
    Minimalist,
}

impl StyleVariant {
    /// All variants in selector order.
    pub const ALL: [StyleVariant; 4] = [
        StyleVariant::Modern,
        StyleVariant::Elegant,
        StyleVariant::Bold,
        StyleVariant::Minimalist,
    ];

    /// Returns the lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleVariant::Modern => "modern",
            StyleVariant::Elegant => "elegant",
            StyleVariant::Bold => "bold",
            StyleVariant::Minimalist => "minimalist",
        }
    }
}

impl std::fmt::Display for StyleVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown style name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown style: {0} (expected modern, elegant, bold or minimalist)")]
pub struct UnknownStyle(pub String);

impl std::str::FromStr for StyleVariant {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(StyleVariant::Modern),
            "elegant" => Ok(StyleVariant::Elegant),
            "bold" => Ok(StyleVariant::Bold),
            "minimalist" => Ok(StyleVariant::Minimalist),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}

/// Top border treatment of the document page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderEmphasis {
    None,
    /// Hairline neutral rule.
    Thin,
    /// Medium accent-coloured rule.
    Accent,
    /// Heavy accent-coloured rule.
    ThickAccent,
}

/// Typeface family hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Typography {
    Default,
    Serif,
}

/// Vertical rhythm of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Standard,
    Relaxed,
}

/// Resolved presentation parameters for one style variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StylePresentation {
    pub variant: StyleVariant,
    pub border: BorderEmphasis,
    pub typography: Typography,
    pub density: Density,
}

/// Maps a style variant to its presentation rules.
pub fn resolve_style(variant: StyleVariant) -> StylePresentation {
    let (border, typography, density) = match variant {
        StyleVariant::Modern => (BorderEmphasis::Accent, Typography::Default, Density::Standard),
        StyleVariant::Elegant => (BorderEmphasis::Thin, Typography::Serif, Density::Relaxed),
        StyleVariant::Bold => (
            BorderEmphasis::ThickAccent,
            Typography::Default,
            Density::Standard,
        ),
        StyleVariant::Minimalist => (BorderEmphasis::None, Typography::Default, Density::Relaxed),
    };

    StylePresentation {
        variant,
        border,
        typography,
        density,
    }
}
