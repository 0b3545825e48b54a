use sbgen::decl::{ConstructorDecl, Decl, Expr, FieldDecl, ParamDecl, RecordDecl};

use crate::{contents, generate};

fn defaulted_struct() -> Decl {
    Decl::Record(
        RecordDecl::new("S")
            .as_struct()
            .with_annotation("se,pl:true,f:F")
            .with_field(FieldDecl::new("a", "int"))
            .with_field(FieldDecl::new("b", "float"))
            .with_field(FieldDecl::new("c", "float").with_init(Expr::float(10.0))),
    )
}

#[test]
fn test_initialized_fields_get_a_default_factory() {
    let generation = generate(vec![defaulted_struct()]);
    let managed = contents(&generation, "F.generated.cs");
    assert!(managed.contains("public partial struct S"));
    assert!(managed.contains("public static S Default()"));
    assert!(managed.contains("value.c = 10;"));
    assert!(!managed.contains("value.a ="));
}

#[test]
fn test_in_class_initializer_beats_constructor_constant() {
    let generation = generate(vec![Decl::Record(
        RecordDecl::new("S")
            .as_struct()
            .with_annotation("se,pl:true,f:F")
            .with_field(FieldDecl::new("c", "float").with_init(Expr::float(10.0)))
            .with_field(FieldDecl::new("d", "float"))
            .with_constructor(
                ConstructorDecl::new()
                    .with_initializer("c", Expr::float(5.0))
                    .with_initializer("d", Expr::float(2.0)),
            ),
    )]);
    let managed = contents(&generation, "F.generated.cs");
    assert!(managed.contains("value.c = 10;"));
    assert!(managed.contains("value.d = 2;"));
    assert!(!managed.contains("value.c = 5;"));
}

#[test]
fn test_struct_fields_are_mapped() {
    let generation = generate(vec![defaulted_struct()]);
    let mapping = contents(&generation, "info.xml");
    assert!(mapping.contains("<struct native=\"S\" script=\"S\""));
    for field in ["a", "b", "c"] {
        assert!(
            mapping.contains(&format!("<field native=\"{field}\" script=\"{field}\"")),
            "missing field {field}"
        );
    }
}

#[test]
fn test_constructor_assigns_fields_from_parameters() {
    let generation = generate(vec![Decl::Record(
        RecordDecl::new("Range")
            .as_struct()
            .with_annotation("se,pl:true,f:Math")
            .with_field(FieldDecl::new("min", "float"))
            .with_field(FieldDecl::new("max", "float"))
            .with_constructor(
                ConstructorDecl::new()
                    .with_param(ParamDecl::new("min", "float"))
                    .with_param(ParamDecl::new("max", "float"))
                    .with_initializer("min", Expr::param("min"))
                    .with_initializer("max", Expr::param("max")),
            ),
    )]);
    let managed = contents(&generation, "Math.generated.cs");
    assert!(managed.contains("public Range(float min, float max)"));
    assert!(managed.contains("this.min = min;"));
    assert!(managed.contains("this.max = max;"));
}
