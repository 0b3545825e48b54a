//! Command-line driver for the script binding generator.
//!
//! ```bash
//! sbgen --input decls.json \
//!     --output-cpp Source/Generated --output-cpp-editor Editor/Generated \
//!     --output-cs Managed/Generated --output-cs-editor ManagedEditor/Generated
//! ```
//!
//! Diagnostics are logged as they are found (`RUST_LOG` overrides the
//! default `warn` filter). The exit status only reflects whether the
//! declaration dump could be read.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sbgen::{ExportMacros, GeneratorConfig, Generator, Namespaces, OutputDirs};

#[derive(Parser)]
#[command(
    name = "sbgen",
    about = "Generate managed wrappers and native interop shims from annotated declarations",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// JSON declaration dump produced by the frontend
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Output directory for native framework files
    #[arg(long = "output-cpp", value_name = "DIR")]
    output_cpp: PathBuf,

    /// Output directory for native editor files
    #[arg(long = "output-cpp-editor", value_name = "DIR")]
    output_cpp_editor: PathBuf,

    /// Output directory for managed framework files and info.xml
    #[arg(long = "output-cs", value_name = "DIR")]
    output_cs: PathBuf,

    /// Output directory for managed editor files
    #[arg(long = "output-cs-editor", value_name = "DIR")]
    output_cs_editor: PathBuf,

    /// Generate editor-only types
    #[arg(long = "gen-editor", default_value_t = true, action = ArgAction::Set)]
    gen_editor: bool,

    #[arg(long = "native-framework-ns", default_value = "bs")]
    native_framework_ns: String,

    #[arg(long = "native-editor-ns", default_value = "bs")]
    native_editor_ns: String,

    #[arg(long = "managed-framework-ns", default_value = "bs")]
    managed_framework_ns: String,

    #[arg(long = "managed-editor-ns", default_value = "bs.Editor")]
    managed_editor_ns: String,

    /// Export macro of framework companions
    #[arg(long = "framework-export-macro", default_value = "BS_SCR_BE_EXPORT")]
    framework_export_macro: String,

    /// Export macro of editor companions
    #[arg(long = "editor-export-macro", default_value = "BS_SCR_BED_EXPORT")]
    editor_export_macro: String,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_editor(self.gen_editor)
            .with_namespaces(Namespaces {
                native_framework: self.native_framework_ns.clone(),
                native_editor: self.native_editor_ns.clone(),
                managed_framework: self.managed_framework_ns.clone(),
                managed_editor: self.managed_editor_ns.clone(),
            })
            .with_export_macros(ExportMacros {
                framework: self.framework_export_macro.clone(),
                editor: self.editor_export_macro.clone(),
            })
    }

    fn output_dirs(&self) -> OutputDirs {
        OutputDirs {
            native_framework: self.output_cpp.clone(),
            native_editor: self.output_cpp_editor.clone(),
            managed_framework: self.output_cs.clone(),
            managed_editor: self.output_cs_editor.clone(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let generation = Generator::new(cli.config())
        .generate_from_json(&cli.input)
        .with_context(|| format!("failed to generate bindings from {}", cli.input.display()))?;
    let written = generation
        .write(&cli.output_dirs())
        .context("failed to write generated files")?;

    let diagnostics = generation.diagnostics();
    eprintln!(
        "sbgen: wrote {written} files ({} warnings, {} errors)",
        diagnostics.warning_count(),
        diagnostics.error_count()
    );
    Ok(())
}
