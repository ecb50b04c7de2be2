use crate::domain::{
    catalog::FeatureCatalog,
    entities::{FeatureId, ModuleName},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Entry points for callers that want to check input up front, before any
/// resolution or composition work.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_catalog(catalog: &FeatureCatalog) -> Result<(), DomainError> {
        catalog.validate()
    }

    pub fn validate_module_name(name: &str) -> Result<(), DomainError> {
        ModuleName::new(name).map(|_| ())
    }

    pub fn validate_feature_id(id: &str) -> Result<(), DomainError> {
        FeatureId::new(id).map(|_| ())
    }
}
