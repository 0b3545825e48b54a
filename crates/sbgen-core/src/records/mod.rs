//! Intermediate records built by the collector and rewritten by the
//! post-processor.
//!
//! - [`ClassInfo`] - exported classes with methods, events and properties
//! - [`StructInfo`] - plain value structs
//! - [`EnumInfo`] - enumerations
//! - [`MethodInfo`] - methods, constructors, events and field accessors
//! - [`FileGroup`] - records sharing a set of output files

mod class;
mod enum_info;
mod file_group;
mod method;
mod structure;

pub use class::{ClassInfo, FieldInfo, PropertyInfo};
pub use enum_info::{EnumEntryInfo, EnumInfo};
pub use file_group::{FileGroup, SupportHeaders, native_header_name};
pub use method::{MethodInfo, ParamInfo, ReturnInfo};
pub use structure::{StructCtorInfo, StructInfo};
