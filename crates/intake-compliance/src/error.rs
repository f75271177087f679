use thiserror::Error;

/// Compliance failures. Fatal to the offending record only; the record is
/// rejected and reported, never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplianceError {
    #[error("consent is required but complianceInfo.gdprConsent is not explicitly true")]
    ConsentMissing,
}
