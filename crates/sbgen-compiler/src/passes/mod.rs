//! Compiler passes.
//!
//! - [`registration`]: register every exported type in the type map
//! - [`collection`]: build class, struct and enum records
//! - [`comments`]: resolve `@copydoc` references
//! - [`post`]: merge externals and derive the final record shape

pub mod collection;
pub mod comments;
pub mod post;
pub mod registration;

pub use collection::{CONSTRUCTOR_INTEROP_NAME, CollectionOutput, CollectionPass};
pub use comments::{CommentOutput, CommentPass};
pub use post::{PostProcessOutput, PostProcessPass};
pub use registration::{RegistrationOutput, RegistrationPass};

use sbgen_core::ParamInfo;

/// Remove the default of `params[index]` and of every parameter before it.
///
/// Managed optional arguments must trail, so a default can only survive if
/// every later parameter keeps its own.
pub(crate) fn drop_defaults_through(params: &mut [ParamInfo], index: usize) {
    for param in params.iter_mut().take(index + 1) {
        param.default_value = None;
        param.default_value_type = None;
    }
}
