use thiserror::Error;

/// Schema registry errors.
///
/// `UnknownPath` is a configuration/programming error: mapping tables are
/// checked against the registry at load time, so it must never surface as a
/// per-record validation failure.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown canonical path: {path}")]
    UnknownPath { path: String },

    #[error("duplicate section in schema catalog: {name}")]
    DuplicateSection { name: String },

    #[error("duplicate field in schema catalog: {path}")]
    DuplicateField { path: String },

    #[error("enum field {path} has no allowed values")]
    EnumWithoutValues { path: String },

    #[error("invalid pattern for {path}: {message}")]
    InvalidPattern { path: String, message: String },

    #[error("failed to parse schema catalog TOML: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}
