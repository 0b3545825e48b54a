//! Script Binding Compiler
//!
//! Turns a declaration tree into the final records the emitters consume.
//!
//! ## Architecture
//!
//! - **Registration**: register every exported type so signatures can be
//!   classified against a complete type map
//! - **Collection**: build class, struct and enum records, route external
//!   methods to the external buffer and fill the comment index
//! - **Post-processing**: merge externals, resolve comments, derive
//!   properties and compute include sets
//!
//! ## Modules
//!
//! - [`classifier`]: type classification from C++ spellings
//! - [`defaults`]: default-value evaluation
//! - [`passes`]: the compiler passes

pub mod classifier;
pub mod defaults;
pub mod passes;

pub use classifier::{Classified, Classifier};
pub use defaults::{DefaultEvaluator, DefaultValue};
pub use passes::{
    CollectionOutput, CollectionPass, CommentOutput, CommentPass, PostProcessOutput,
    PostProcessPass, RegistrationOutput, RegistrationPass,
};

use sbgen_core::GeneratorConfig;
use sbgen_parser::DeclSource;
use sbgen_registry::Registry;

/// Counts gathered while compiling.
#[derive(Debug, Default)]
pub struct CompilationStats {
    pub types_registered: usize,
    pub collection: CollectionOutput,
    pub post: PostProcessOutput,
}

/// Result of compilation: the final registry, ready for emission.
#[derive(Debug)]
pub struct CompilationOutput {
    pub registry: Registry,
    pub stats: CompilationStats,
}

impl CompilationOutput {
    /// Check whether no error diagnostics were reported.
    pub fn is_success(&self) -> bool {
        !self.registry.diagnostics.has_errors()
    }
}

/// The main compiler entry point.
pub struct Compiler;

impl Compiler {
    /// Run every pass over `source`.
    ///
    /// Problems with individual declarations are reported as diagnostics on
    /// the returned registry; compilation itself never fails.
    pub fn compile(source: &dyn DeclSource, config: GeneratorConfig) -> CompilationOutput {
        let mut registry = Registry::new(config);

        let registration = RegistrationPass::new(source, &mut registry).run();
        let collection = CollectionPass::new(source, &mut registry, &registration.directives).run();
        let post = PostProcessPass::new(&mut registry).run();

        log::debug!(
            "compiled {} types into {} file groups with {} diagnostics",
            registration.types_registered,
            registry.file_groups.len(),
            registry.diagnostics.len()
        );

        CompilationOutput {
            registry,
            stats: CompilationStats {
                types_registered: registration.types_registered,
                collection,
                post,
            },
        }
    }
}
