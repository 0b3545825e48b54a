//! The generator driver.

use std::path::Path;

use log::{debug, info};
use sbgen_compiler::{CompilationStats, Compiler};
use sbgen_core::{Diagnostics, GeneratorConfig};
use sbgen_emit::{GeneratedFile, OutputTarget, emit_all};
use sbgen_parser::{DeclSource, TranslationUnit};
use sbgen_registry::Registry;

use crate::{GenerateError, OutputDirs};

/// Runs the compile and emit phases with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Compile `source` and emit every file.
    ///
    /// Only emission failures are errors; declaration problems are returned
    /// as diagnostics alongside whatever could still be generated.
    pub fn generate(&self, source: &dyn DeclSource) -> Result<Generation, GenerateError> {
        let compiled = Compiler::compile(source, self.config.clone());
        let files = emit_all(&compiled.registry)?;
        let diagnostics = &compiled.registry.diagnostics;
        info!(
            "generated {} files ({} warnings, {} errors)",
            files.len(),
            diagnostics.warning_count(),
            diagnostics.error_count()
        );
        Ok(Generation {
            files,
            registry: compiled.registry,
            stats: compiled.stats,
        })
    }

    /// Load a JSON declaration dump and generate from it.
    pub fn generate_from_json(&self, path: impl AsRef<Path>) -> Result<Generation, GenerateError> {
        let path = path.as_ref();
        debug!("loading declarations from {}", path.display());
        let unit = TranslationUnit::load_json(path)?;
        self.generate(&unit)
    }
}

/// The outcome of one generator run.
#[derive(Debug)]
pub struct Generation {
    pub files: Vec<GeneratedFile>,
    /// The final registry the files were emitted from.
    pub registry: Registry,
    pub stats: CompilationStats,
}

impl Generation {
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.registry.diagnostics
    }

    /// Check whether no error diagnostics were reported.
    pub fn is_success(&self) -> bool {
        !self.registry.diagnostics.has_errors()
    }

    /// The first generated file called `name`.
    pub fn file(&self, name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn files_for(&self, target: OutputTarget) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter(move |f| f.target == target)
    }

    /// Write every file into its output directory, creating directories as
    /// needed. Returns the number of files written.
    pub fn write(&self, dirs: &OutputDirs) -> Result<usize, GenerateError> {
        for file in &self.files {
            let dir = dirs.dir(file.target);
            std::fs::create_dir_all(dir).map_err(|source| GenerateError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = dir.join(&file.name);
            std::fs::write(&path, &file.contents)
                .map_err(|source| GenerateError::Write { path, source })?;
        }
        debug!("wrote {} files", self.files.len());
        Ok(self.files.len())
    }
}
