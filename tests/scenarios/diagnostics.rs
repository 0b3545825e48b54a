use sbgen::Severity;
use sbgen::decl::{
    Decl, EnumConstantDecl, EnumDecl, FunctionDecl, MethodDecl, ParamDecl, RecordDecl,
};

use crate::{contents, generate};

#[test]
fn test_free_function_without_target_is_skipped() {
    let generation = generate(vec![Decl::Function(
        FunctionDecl::new("helper")
            .with_annotation("se")
            .with_return("int"),
    )]);
    assert!(generation.diagnostics().mentions("bs::helper", "free functions"));
    assert!(generation.is_success());
}

#[test]
fn test_duplicate_enum_values_keep_the_first_entry() {
    let generation = generate(vec![Decl::Enum(
        EnumDecl::new("Axis")
            .with_annotation("se,f:Math")
            .with_entry(EnumConstantDecl::new("X", 0))
            .with_entry(EnumConstantDecl::new("First", 0)),
    )]);
    assert!(generation.diagnostics().mentions("bs::Axis::First", "already used"));
    let managed = contents(&generation, "Math.generated.cs");
    assert!(managed.contains("X = 0"));
    assert!(!managed.contains("First"));
}

#[test]
fn test_external_constructor_must_return_its_class() {
    let generation = generate(vec![
        Decl::Record(RecordDecl::new("Font").with_annotation("se").with_base("Resource")),
        Decl::Function(
            FunctionDecl::new("createFont")
                .with_annotation("se,ec:Font")
                .with_return("int"),
        ),
    ]);
    assert!(!generation.is_success());
    let error = generation
        .diagnostics()
        .iter()
        .find(|d| d.severity == Severity::Error)
        .expect("expected an error");
    assert!(error.message.contains("must return"));
}

#[test]
fn test_unknown_parameter_type_is_passed_through() {
    let generation = generate(vec![Decl::Record(
        RecordDecl::new("Widget")
            .with_annotation("se,f:UI")
            .with_method(
                MethodDecl::new("attach")
                    .with_annotation("se")
                    .with_param(ParamDecl::new("target", "UnexportedThing*")),
            )
            .with_method(MethodDecl::new("refresh").with_annotation("se")),
    )]);
    let warnings: Vec<_> = generation
        .diagnostics()
        .warnings()
        .filter(|d| d.message.contains("'UnexportedThing' is not exported"))
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(generation.is_success());
    let managed = contents(&generation, "UI.generated.cs");
    assert!(managed.contains("attach("));
    assert!(managed.contains("public void refresh()"));
}
