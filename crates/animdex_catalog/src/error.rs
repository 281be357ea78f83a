//! Catalog error types

use thiserror::Error;

/// Errors raised while turning a registry into a catalog
///
/// Any of these aborts the whole build; a partially built catalog is never
/// handed out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogBuildError {
    /// Two categories share an id
    #[error("Duplicate category id: {0}")]
    DuplicateCategory(String),

    /// Two groups (or two generated group variants) share an id
    #[error("Duplicate group id: {0}")]
    DuplicateGroup(String),

    /// Two animations share an id
    #[error("Duplicate animation id: {0}")]
    DuplicateAnimation(String),

    /// A required metadata field is empty
    #[error("Missing metadata field `{field}` on {id}")]
    MissingField { id: String, field: &'static str },

    /// Animation id is not of the form `<group>__<slug>` for its owning group
    #[error("Malformed animation id {id}: expected `{group}__<slug>`")]
    MalformedAnimationId { id: String, group: String },

    /// More than two groups resolve to the same base id
    #[error("Base group {base_id} has {count} variants, at most 2 allowed")]
    TooManyVariants { base_id: String, count: usize },

    /// Two groups with the same base id claim the same technology
    #[error("Group {group_id} duplicates the {tech} variant of {base_id}")]
    ConflictingVariant {
        base_id: String,
        group_id: String,
        tech: &'static str,
    },
}

/// Errors surfaced by the catalog service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The registry could not be built
    #[error(transparent)]
    Build(#[from] CatalogBuildError),

    /// A referenced category does not exist
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// A referenced group does not exist in its category
    #[error("Group not found: {0}")]
    GroupNotFound(String),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_offending_id() {
        let err = CatalogBuildError::DuplicateAnimation("modal-base-framer__pop".into());
        assert!(err.to_string().contains("modal-base-framer__pop"));

        let err = CatalogBuildError::MissingField {
            id: "lights".into(),
            field: "title",
        };
        assert_eq!(err.to_string(), "Missing metadata field `title` on lights");
    }

    #[test]
    fn test_build_error_converts_transparently() {
        let err: CatalogError = CatalogBuildError::DuplicateCategory("base".into()).into();
        assert_eq!(err.to_string(), "Duplicate category id: base");
    }
}
