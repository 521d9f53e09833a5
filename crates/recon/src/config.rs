use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Tuning knobs for a workbook audit. Every field has a default, so an empty
/// TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Rows scanned per sheet when looking for the control header.
    pub control_scan_rows: usize,
    /// Rows scanned per roster sheet when looking for its header row.
    pub roster_scan_rows: usize,
    /// Fixed raw column consulted first for an explicit gender token.
    pub gender_column: usize,
    /// Fall back to name-based gender inference when no explicit token exists.
    /// When off, rows without a token are recorded as MALE.
    pub infer_gender: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            control_scan_rows: 100,
            roster_scan_rows: 40,
            gender_column: 6,
            infer_gender: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AuditConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: AuditConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.control_scan_rows == 0 {
            return Err(ReconError::ConfigValidation(
                "control_scan_rows must be at least 1".into(),
            ));
        }
        if self.roster_scan_rows == 0 {
            return Err(ReconError::ConfigValidation(
                "roster_scan_rows must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = AuditConfig::from_toml("").unwrap();
        assert_eq!(config, AuditConfig::default());
        assert_eq!(config.control_scan_rows, 100);
        assert_eq!(config.roster_scan_rows, 40);
        assert_eq!(config.gender_column, 6);
        assert!(config.infer_gender);
    }

    #[test]
    fn partial_override() {
        let config = AuditConfig::from_toml(
            r#"
roster_scan_rows = 60
infer_gender = false
"#,
        )
        .unwrap();
        assert_eq!(config.roster_scan_rows, 60);
        assert!(!config.infer_gender);
        assert_eq!(config.control_scan_rows, 100);
    }

    #[test]
    fn reject_zero_scan_window() {
        let err = AuditConfig::from_toml("control_scan_rows = 0").unwrap_err();
        assert!(matches!(err, ReconError::ConfigValidation(_)));
    }

    #[test]
    fn reject_wrong_type() {
        let err = AuditConfig::from_toml("gender_column = \"G\"").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }
}
