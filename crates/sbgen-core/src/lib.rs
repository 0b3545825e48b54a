//! Core data model for the script binding generator.
//!
//! This crate holds everything the passes and emitters share:
//!
//! - [`TypeRef`] and its [`TypeCategory`] / [`TypeFlags`] classification
//! - [`ExportDirective`] decoded from declaration annotations
//! - records ([`ClassInfo`], [`StructInfo`], [`EnumInfo`]) grouped into
//!   [`FileGroup`]s
//! - [`Diagnostics`] accumulated across every phase
//! - [`GeneratorConfig`]

mod comment;
mod config;
mod diagnostics;
mod directive;
mod error;
mod qualified_name;
mod records;
mod types;

pub use comment::{Comment, CommentParam};
pub use config::{ExportMacros, GeneratorConfig, Namespaces};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use directive::{ExportDirective, ExportFlags, Style, StyleFlags};
pub use error::{ClassifyError, TypeParseError};
pub use qualified_name::QualifiedName;
pub use records::{
    ClassInfo, EnumEntryInfo, EnumInfo, FieldInfo, FileGroup, MethodInfo, ParamInfo,
    PropertyInfo, ReturnInfo, StructCtorInfo, StructInfo, SupportHeaders, native_header_name,
};
pub use types::{
    BuiltinKind, ClassFlags, Direction, MethodFlags, OwnershipKind, SourceKind, TypeCategory,
    TypeFlags, TypeRef, Visibility,
};
