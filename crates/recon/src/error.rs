use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error (zero scan window, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Period number outside the 13-period calendar.
    #[error("period must be between 1 and {max}, got {value}")]
    InvalidPeriod { value: u32, max: u8 },

    /// The workbook could not be loaded or decoded.
    #[error("cannot load '{file}': {message}")]
    Load { file: String, message: String },
}
