//! Script Binding Emitters
//!
//! Turns a compiled [`Registry`] into text: the native companion shims, the
//! managed wrappers and the name mapping document. Emission only reads the
//! registry, so every emitter can run against the same borrowed value.
//!
//! ## Architecture
//!
//! ```text
//! Registry ──┬─> NativeEmitter  ──> BsScript{G}.generated.h/.cpp, lookup headers
//!            ├─> ManagedEmitter ──> {G}.generated.cs
//!            └─> emit_mapping   ──> info.xml
//! ```
//!
//! ## Modules
//!
//! - [`source`]: indentation-aware text buffer and the `uwrite!` macros
//! - [`names`]: type spellings on both sides of the boundary
//! - [`native`]: companion classes and marshalling blocks
//! - [`managed`]: wrapper classes, structs and enums
//! - [`mapping`]: the XML mapping document

pub mod managed;
pub mod mapping;
pub mod names;
pub mod native;
pub mod source;

pub use managed::ManagedEmitter;
pub use mapping::{MAPPING_FILE_NAME, MappingError, emit_mapping};
pub use native::NativeEmitter;
pub use source::Source;

use sbgen_registry::Registry;

/// Output directory a generated file belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputTarget {
    NativeFramework,
    NativeEditor,
    ManagedFramework,
    ManagedEditor,
}

impl OutputTarget {
    pub fn native(editor: bool) -> Self {
        if editor {
            OutputTarget::NativeEditor
        } else {
            OutputTarget::NativeFramework
        }
    }

    pub fn managed(editor: bool) -> Self {
        if editor {
            OutputTarget::ManagedEditor
        } else {
            OutputTarget::ManagedFramework
        }
    }
}

/// One emitted file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub target: OutputTarget,
    pub name: String,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(target: OutputTarget, name: impl Into<String>, contents: String) -> Self {
        Self {
            target,
            name: name.into(),
            contents,
        }
    }
}

/// Run every emitter over `registry`.
///
/// Files come out grouped by emitter: native files, then managed files,
/// then the mapping document.
pub fn emit_all(registry: &Registry) -> Result<Vec<GeneratedFile>, MappingError> {
    let mut files = NativeEmitter::new(registry).run();
    files.extend(ManagedEmitter::new(registry).run());
    files.push(GeneratedFile::new(
        OutputTarget::ManagedFramework,
        MAPPING_FILE_NAME,
        emit_mapping(registry)?,
    ));
    log::debug!("emitted {} files", files.len());
    Ok(files)
}
