use crate::domain::{
    entities::{LogicalPath, RenderPlan, TreeSnapshot},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// A rendered entry name must be a single, non-special path segment.
    pub fn validate_rendered_name(path: &LogicalPath, name: &str) -> Result<(), DomainError> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0');

        if invalid {
            return Err(DomainError::InvalidRenderedName {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_render_plan(
        plan: &RenderPlan,
        snapshot: &TreeSnapshot,
    ) -> Result<(), DomainError> {
        plan.validate(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_separators_and_dot_names() {
        let path = LogicalPath::new("{{ name }}");
        for bad in ["", ".", "..", "a/b", "a\\b"] {
            assert!(
                DomainValidator::validate_rendered_name(&path, bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
        assert!(DomainValidator::validate_rendered_name(&path, "AB.txt").is_ok());
    }
}
