//! Document export configuration

use serde::Deserialize;

use super::error::ValidationError;

/// PDF engine settings for export
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// HTML-to-PDF engine (`weasyprint` or `wkhtmltopdf`), by name or path
    #[serde(default = "default_pdf_engine")]
    pub pdf_engine: String,

    /// PDF conversion timeout in seconds
    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,
}

impl ExportConfig {
    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pdf_engine.trim().is_empty() {
            return Err(ValidationError::MissingRequired("EXPORT__PDF_ENGINE"));
        }
        if self.pdf_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pdf_engine: default_pdf_engine(),
            pdf_timeout_secs: default_pdf_timeout(),
        }
    }
}

fn default_pdf_engine() -> String {
    crate::adapters::document::DEFAULT_PDF_ENGINE.to_string()
}

fn default_pdf_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.pdf_engine, "weasyprint");
        assert_eq!(config.pdf_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_engine_is_invalid() {
        let config = ExportConfig {
            pdf_engine: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("EXPORT__PDF_ENGINE"))
        ));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = ExportConfig {
            pdf_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
    }
}
