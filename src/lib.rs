//! Script binding generator.
//!
//! Reads annotated native declarations and produces three artifacts per
//! exported file group: a native interop shim, a managed wrapper and an
//! entry in the name mapping document.
//!
//! # Example
//!
//! ```
//! use sbgen::{Generator, GeneratorConfig};
//! use sbgen::decl::{Decl, EnumConstantDecl, EnumDecl, TranslationUnit};
//!
//! let unit = TranslationUnit::new(vec![Decl::Enum(
//!     EnumDecl::new("CullMode")
//!         .with_annotation("se,f:Render")
//!         .with_entry(EnumConstantDecl::new("None", 0))
//!         .with_entry(EnumConstantDecl::new("Back", 1)),
//! )]);
//!
//! let generation = Generator::new(GeneratorConfig::default()).generate(&unit).unwrap();
//! let managed = generation.file("Render.generated.cs").unwrap();
//! assert!(managed.contents.contains("public enum CullMode"));
//! ```
//!
//! ## Phases
//!
//! 1. **Compile** ([`sbgen_compiler`]): register types, collect records and
//!    post-process them into their final form
//! 2. **Emit** ([`sbgen_emit`]): render every file group into text
//! 3. **Write** ([`Generation::write`]): place files in their output directory

mod error;
mod generator;
mod output;

pub use error::GenerateError;
pub use generator::{Generation, Generator};
pub use output::OutputDirs;

pub use sbgen_compiler::CompilationStats;
pub use sbgen_core::{Diagnostic, Diagnostics, ExportMacros, GeneratorConfig, Namespaces, Severity};
pub use sbgen_emit::{GeneratedFile, OutputTarget};
pub use sbgen_registry::Registry;

/// The declaration dump model consumed by [`Generator::generate`].
pub mod decl {
    pub use sbgen_parser::decl::*;
}
