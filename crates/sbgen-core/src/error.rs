//! Error types for the hard failures of each phase.
//!
//! ## Error Hierarchy
//!
//! ```text
//! TypeParseError  - a native type spelling could not be parsed
//! ClassifyError   - a parsed type has no exportable classification
//! ```
//!
//! Neither aborts generation. The collector turns them into diagnostics
//! attached to the declaration that used the type, and drops that member.
//! Frontend, mapping and output errors live with the crates that raise them.

use thiserror::Error;

use crate::{Direction, TypeCategory};

// ============================================================================
// Type Spelling Errors
// ============================================================================

/// Errors raised while parsing a native type spelling such as
/// `const std::vector<ResourceHandle<Mesh>>&`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("unexpected character '{ch}' in '{spelling}'")]
    UnexpectedChar { ch: char, spelling: String },

    #[error("unexpected '{found}' in '{spelling}', expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        spelling: String,
    },

    #[error("unexpected end of type '{spelling}'")]
    UnexpectedEnd { spelling: String },

    #[error("empty type spelling")]
    Empty,
}

// ============================================================================
// Classification Errors
// ============================================================================

/// Errors raised by the type classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Parse(#[from] TypeParseError),

    /// The type has no exportable category.
    #[error("type '{name}' has an unsupported category")]
    UnsupportedCategory { name: String },

    #[error("nested containers are not supported: '{spelling}'")]
    NestedContainer { spelling: String },

    #[error("pointer-to-pointer is not supported: '{spelling}'")]
    PointerToPointer { spelling: String },

    #[error("'{name}' is a {category} and cannot be held by a shared pointer")]
    SharedPtrToHandle { name: String, category: TypeCategory },

    #[error("'{wrapper}' cannot wrap '{name}' ({category})")]
    InvalidHandleTarget {
        wrapper: &'static str,
        name: String,
        category: TypeCategory,
    },

    /// AsyncOp and MonoObject are output only, GUI elements input only.
    #[error("'{name}' cannot be used as a {direction}")]
    InvalidDirection { name: String, direction: Direction },

    #[error("unsupported template '{name}'")]
    UnknownTemplate { name: String },

    #[error("template '{name}' expects {expected} argument(s)")]
    TemplateArity { name: String, expected: usize },

    #[error("'void' cannot be used as a {direction}")]
    Void { direction: Direction },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_type() {
        let err = ClassifyError::SharedPtrToHandle {
            name: "Mesh".into(),
            category: TypeCategory::Resource,
        };
        assert_eq!(
            err.to_string(),
            "'Mesh' is a resource and cannot be held by a shared pointer"
        );

        let err = ClassifyError::InvalidDirection {
            name: "TAsyncOp".into(),
            direction: Direction::Parameter,
        };
        assert_eq!(err.to_string(), "'TAsyncOp' cannot be used as a parameter");
    }

    #[test]
    fn parse_errors_convert_transparently() {
        let err: ClassifyError = TypeParseError::Empty.into();
        assert_eq!(err.to_string(), "empty type spelling");
    }
}
