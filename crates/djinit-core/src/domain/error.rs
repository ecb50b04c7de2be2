// ============================================================================
// domain/error.rs - RESOLUTION & COMPOSITION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (handed between layers without losing detail)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Nothing here is retryable: resolution and composition are pure functions
/// of their inputs, so the same input reproduces the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Catalog Errors (authoring defects, detected at load time)
    // ========================================================================
    #[error("dependency cycle in feature catalog: {}", .cycle.join(" -> "))]
    CatalogCycle { cycle: Vec<String> },

    #[error("feature '{id}' is declared more than once")]
    DuplicateFeature { id: String },

    #[error("feature '{feature}' depends on undeclared feature '{dependency}'")]
    UnknownDependency { feature: String, dependency: String },

    #[error("feature '{feature}' conflicts with undeclared feature '{conflict}'")]
    UnknownConflict { feature: String, conflict: String },

    #[error("feature '{feature}' cannot conflict with itself")]
    SelfConflict { feature: String },

    #[error("invalid feature id '{id}': {reason}")]
    InvalidFeatureId { id: String, reason: String },

    #[error("feature '{feature}' has an invalid fragment for '{path}': {reason}")]
    InvalidFragment {
        feature: String,
        path: String,
        reason: String,
    },

    // ========================================================================
    // Resolution Errors (user input)
    // ========================================================================
    #[error("unknown feature '{id}'")]
    UnknownFeature { id: String },

    #[error("features '{a}' and '{b}' conflict and cannot be selected together")]
    Conflict { a: String, b: String },

    // ========================================================================
    // Composition Errors
    // ========================================================================
    #[error("more than one contribution claims the whole file '{path}'")]
    ComposerConflict { path: String },

    #[error("anchor '{anchor}' not found in '{path}'")]
    AnchorNotFound { path: String, anchor: String },

    #[error("duplicate path in output tree: {path}")]
    DuplicatePath { path: String },

    // ========================================================================
    // Path & Naming Errors
    // ========================================================================
    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("app name '{name}' must differ from the project name")]
    NameCollision { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownFeature { id } => vec![
                format!("'{}' is not a known feature", id),
                "Try: djinit list to see available features".into(),
            ],
            Self::Conflict { a, b } => vec![
                format!("Select either '{}' or '{}', not both", a, b),
                "Features pulled in as dependencies count too".into(),
                "Try: djinit resolve --features <ids> to preview a selection".into(),
            ],
            Self::CatalogCycle { .. }
            | Self::DuplicateFeature { .. }
            | Self::UnknownDependency { .. }
            | Self::UnknownConflict { .. }
            | Self::SelfConflict { .. }
            | Self::InvalidFeatureId { .. }
            | Self::InvalidFragment { .. } => vec![
                "The feature catalog is misconfigured".into(),
                "If you set catalog.path, check catalog.toml in that directory".into(),
            ],
            Self::ComposerConflict { path } => vec![
                format!("Two features both provide '{}'", path),
                "Fix the catalog so only one feature creates this file".into(),
                "Use an anchor-insert or list-entry fragment to share it".into(),
            ],
            Self::AnchorNotFound { path, anchor } => vec![
                format!(
                    "'{}' needs a '# djinit:begin {}' / '# djinit:end {}' marker pair",
                    path, anchor, anchor
                ),
                "Check that the base template provides the target file".into(),
            ],
            Self::InvalidName { .. } => vec![
                "Names must start with a letter and contain only letters, digits and '_'".into(),
                "Names must be 2-49 characters and not a Python keyword".into(),
            ],
            Self::NameCollision { .. } => {
                vec!["Pass a different app name with --app".into()]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::NameCollision { .. }
            | Self::InvalidPath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::Conflict { .. } => ErrorCategory::Compatibility,
            Self::UnknownFeature { .. } => ErrorCategory::NotFound,
            Self::CatalogCycle { .. }
            | Self::DuplicateFeature { .. }
            | Self::UnknownDependency { .. }
            | Self::UnknownConflict { .. }
            | Self::SelfConflict { .. }
            | Self::InvalidFeatureId { .. }
            | Self::InvalidFragment { .. }
            | Self::ComposerConflict { .. }
            | Self::AnchorNotFound { .. } => ErrorCategory::Catalog,
            Self::DuplicatePath { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Catalog,
    Internal,
}
