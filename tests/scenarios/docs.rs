use sbgen::decl::{Decl, MethodDecl, RecordDecl};

use crate::{contents, generate};

fn mesh(methods: Vec<MethodDecl>) -> Decl {
    let mut record = RecordDecl::new("Mesh")
        .with_annotation("se,f:Mesh")
        .with_base("Resource");
    for method in methods {
        record = record.with_method(method);
    }
    Decl::Record(record)
}

fn bounds(name: &str, doc: &str) -> MethodDecl {
    MethodDecl::new(name)
        .with_annotation("se")
        .with_doc(doc)
        .with_return("float")
}

#[test]
fn test_copydoc_chain_resolves_to_the_source_text() {
    let generation = generate(vec![mesh(vec![
        bounds("getBounds", "/** Bounds of the mesh. */"),
        bounds("getBoundsAsync", "/** @copydoc getBounds */"),
        bounds("getBoundsLater", "/** @copydoc getBoundsAsync */"),
    ])]);
    assert!(generation.is_success(), "{:?}", generation.diagnostics());

    let managed = contents(&generation, "Mesh.generated.cs");
    assert_eq!(managed.matches("/// Bounds of the mesh.").count(), 3);
    assert!(!managed.contains("copydoc"));

    let mapping = contents(&generation, "info.xml");
    assert_eq!(mapping.matches("Bounds of the mesh.").count(), 3);
}

#[test]
fn test_unresolved_copydoc_is_reported() {
    let generation = generate(vec![mesh(vec![bounds(
        "getBounds",
        "/** @copydoc Nowhere::toBeFound */",
    )])]);
    assert!(generation.diagnostics().warning_count() > 0);
    let managed = contents(&generation, "Mesh.generated.cs");
    assert!(!managed.contains("copydoc"));
}

#[test]
fn test_native_only_text_is_dropped() {
    let generation = generate(vec![mesh(vec![bounds(
        "getBounds",
        "/** Bounds of the mesh. @native Cached on the core thread. @endnative */",
    )])]);
    let managed = contents(&generation, "Mesh.generated.cs");
    assert!(managed.contains("/// Bounds of the mesh."));
    assert!(!managed.contains("core thread"));
}
