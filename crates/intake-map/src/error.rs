use intake_model::PathError;
use thiserror::Error;

/// Errors from mapping-table construction and validation.
///
/// All of these are load-time configuration errors. The mapper itself never
/// fails: absent external data is expressed as missing canonical fields.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("invalid external path {path:?}: {message}")]
    InvalidExternalPath { path: String, message: String },

    #[error("invalid canonical path: {source}")]
    InvalidCanonicalPath {
        #[from]
        source: PathError,
    },

    #[error("mapping {external:?} -> {canonical:?} references an unknown canonical path")]
    UnknownCanonicalPath { external: String, canonical: String },
}
