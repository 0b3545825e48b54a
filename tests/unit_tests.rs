//! Integration tests for the generator using `Generator` as the entry point.
//!
//! These tests run the full pipeline (compile + emit) over in-memory
//! declaration trees and JSON dumps, then check the generated text.

mod scenarios;

use sbgen::decl::{Decl, NamespaceDecl, TranslationUnit};
use sbgen::{Generation, GeneratorConfig, Generator, OutputDirs, OutputTarget};
use std::path::PathBuf;

/// Path of a declaration dump in the fixtures directory.
fn fixture(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

/// Wrap `decls` in the `bs` namespace.
pub fn unit(decls: Vec<Decl>) -> TranslationUnit {
    TranslationUnit::new(vec![Decl::Namespace(NamespaceDecl {
        name: "bs".into(),
        decls,
    })])
}

/// Generate without editor output.
pub fn generate(decls: Vec<Decl>) -> Generation {
    Generator::new(GeneratorConfig::default().with_editor(false))
        .generate(&unit(decls))
        .expect("generation failed")
}

/// Contents of the generated file `name`.
pub fn contents<'a>(generation: &'a Generation, name: &str) -> &'a str {
    generation
        .file(name)
        .map(|f| f.contents.as_str())
        .unwrap_or_else(|| {
            let names: Vec<&str> = generation.files.iter().map(|f| f.name.as_str()).collect();
            panic!("no generated file named {name}; have {names:?}")
        })
}

// =============================================================================
// JSON Declaration Dumps
// =============================================================================

#[test]
fn test_json_dump_generates_every_artifact() {
    let generation = Generator::default()
        .generate_from_json(fixture("render.json"))
        .expect("failed to generate from fixture");
    assert!(generation.is_success(), "{:?}", generation.diagnostics());

    for name in [
        "BsScriptRender.generated.h",
        "BsScriptRender.generated.cpp",
        "Render.generated.cs",
        "info.xml",
    ] {
        assert!(generation.file(name).is_some(), "missing {name}");
    }

    let managed = contents(&generation, "Render.generated.cs");
    assert!(managed.contains("public enum LightType"));
    assert!(managed.contains("public partial struct LightDesc"));
    assert!(managed.contains("value.intensity = 100;"));
    assert!(managed.contains("public partial class Light : ScriptObject"));
    assert!(managed.contains("public float Intensity"));
    assert!(managed.contains("get { return Internal_getIntensity(mCachedPtr); }"));
    assert!(managed.contains("set { Internal_setIntensity(mCachedPtr, value); }"));
}

#[test]
fn test_json_dump_carries_documentation() {
    let generation = Generator::default()
        .generate_from_json(fixture("render.json"))
        .unwrap();
    let managed = contents(&generation, "Render.generated.cs");
    assert!(managed.contains("/// Light source shapes."));

    let mapping = contents(&generation, "info.xml");
    assert!(mapping.contains("Light source shapes."));
}

#[test]
fn test_missing_dump_is_an_error() {
    let result = Generator::default().generate_from_json(fixture("does_not_exist.json"));
    assert!(result.is_err());
}

#[test]
fn test_malformed_dump_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"decls\": [ { \"kind\": \"record\" } ] }").unwrap();
    assert!(Generator::default().generate_from_json(&path).is_err());
}

// =============================================================================
// Writing Output
// =============================================================================

#[test]
fn test_write_places_files_by_target() {
    let generation = Generator::default()
        .generate_from_json(fixture("render.json"))
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dirs = OutputDirs::under(dir.path());

    let written = generation.write(&dirs).unwrap();
    assert_eq!(written, generation.files.len());

    let header = dirs.native_framework.join("BsScriptRender.generated.h");
    assert!(header.is_file());
    let mapping = std::fs::read_to_string(dirs.managed_framework.join("info.xml")).unwrap();
    assert_eq!(mapping, contents(&generation, "info.xml"));

    // Editor lookup headers are still written when editor output is enabled.
    assert!(
        dirs.native_editor
            .join("BsEditorBuiltinComponentLookup.generated.h")
            .is_file()
    );
}

#[test]
fn test_editor_output_can_be_disabled() {
    let generator = Generator::new(GeneratorConfig::default().with_editor(false));
    let generation = generator.generate_from_json(fixture("render.json")).unwrap();
    assert_eq!(generation.files_for(OutputTarget::NativeEditor).count(), 0);
    assert_eq!(generation.files_for(OutputTarget::ManagedEditor).count(), 0);
}
