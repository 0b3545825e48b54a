//! Type taxonomy: categories, builtins, flags and classified references.

mod builtin;
mod category;
mod direction;
mod flags;
mod type_ref;
mod visibility;

pub use builtin::BuiltinKind;
pub use category::TypeCategory;
pub use direction::Direction;
pub use flags::{ClassFlags, MethodFlags, TypeFlags};
pub use type_ref::{OwnershipKind, SourceKind, TypeRef};
pub use visibility::Visibility;
