//! Text shaping helpers used by the renderer.
//!
//! Everything here is a pure function of its inputs. Placeholders are a
//! render-time concern only: they are never written back into a record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Underscore rule shown in place of an empty name field.
pub const BLANK: &str = "____________________";

/// Rule shown in place of empty payment terms.
pub const TERMS_BLANK: &str = "__________________________";

/// Deadline text used when no number of days was given.
pub const DEADLINE_TO_BE_DEFINED: &str = "____ dias úteis";

/// Total value text used when no amount was given.
pub const TOTAL_VALUE_BLANK: &str = "R$ _____,__";

/// Keyword that marks a payment clause as a discount.
pub const DISCOUNT_KEYWORD: &str = "desconto";

/// A period followed by one or more whitespace characters.
static CLAUSE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\s+").expect("Clause boundary pattern must compile"));

/// Visual weight of a payment-terms clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseEmphasis {
    /// Discount clause, rendered with distinct weight and colour.
    Emphasized,
    /// Any other clause.
    Normal,
}

/// Splits free text into sentence-like clauses.
///
/// Boundaries are a period followed by one or more whitespace characters.
/// Fragments are trimmed, empty ones are dropped, and every kept fragment
/// ends with a period.
///
/// ```
/// use motionflow::domain::proposal::split_into_clauses;
///
/// assert_eq!(split_into_clauses("A. B"), vec!["A.", "B."]);
/// assert!(split_into_clauses("").is_empty());
/// ```
pub fn split_into_clauses(text: &str) -> Vec<String> {
    CLAUSE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            if fragment.ends_with('.') {
                fragment.to_string()
            } else {
                format!("{}.", fragment)
            }
        })
        .collect()
}

/// Classifies a clause by a case-insensitive substring match on
/// [`DISCOUNT_KEYWORD`].
///
/// The match is not word-boundary aware: "descontos" and "sem-desconto"
/// are emphasized too.
pub fn classify_clause(clause: &str) -> ClauseEmphasis {
    if clause.to_lowercase().contains(DISCOUNT_KEYWORD) {
        ClauseEmphasis::Emphasized
    } else {
        ClauseEmphasis::Normal
    }
}

/// Returns `blank` when `value` is empty, `value` otherwise.
pub fn with_placeholder(value: &str, blank: &str) -> String {
    if value.is_empty() {
        blank.to_string()
    } else {
        value.to_string()
    }
}

/// Formats a deadline given in working days. No numeric validation.
pub fn format_deadline(days: &str) -> String {
    if days.is_empty() {
        DEADLINE_TO_BE_DEFINED.to_string()
    } else {
        format!("{} dias úteis", days)
    }
}

/// Prefixes the amount with the currency symbol.
pub fn format_total_value(value: &str) -> String {
    if value.is_empty() {
        TOTAL_VALUE_BLANK.to_string()
    } else {
        format!("R$ {}", value)
    }
}
