use sbgen::decl::{Decl, FieldDecl, MethodDecl, ParamDecl, RecordDecl};

use crate::{contents, generate};

fn complex_struct() -> Decl {
    Decl::Record(
        RecordDecl::new("ComplexStruct")
            .as_struct()
            .with_annotation("se,pl:true")
            .with_field(FieldDecl::new("name", "String")),
    )
}

fn class_with_struct_property() -> Decl {
    Decl::Record(
        RecordDecl::new("C")
            .with_annotation("se")
            .with_method(
                MethodDecl::new("getStruct")
                    .with_annotation("se,pr:getter,n:Struct")
                    .with_return("ComplexStruct"),
            )
            .with_method(
                MethodDecl::new("setStruct")
                    .with_annotation("se,pr:setter,n:Struct")
                    .with_param(ParamDecl::new("value", "const ComplexStruct&")),
            ),
    )
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_struct_property_passes_by_reference() {
    let generation = generate(vec![complex_struct(), class_with_struct_property()]);
    let managed = contents(&generation, "C.generated.cs");
    assert!(managed.contains("public partial class C : ScriptObject"));
    assert!(managed.contains("public ComplexStruct Struct"));
    assert!(managed.contains("ComplexStruct temp;"));
    assert!(managed.contains("Internal_getStruct(mCachedPtr, out temp);"));
    assert!(managed.contains("set { Internal_setStruct(mCachedPtr, ref value); }"));
}

#[test]
fn test_property_hooks_are_registered_natively() {
    let generation = generate(vec![complex_struct(), class_with_struct_property()]);
    let native = contents(&generation, "BsScriptC.generated.cpp");
    for hook in ["Internal_getStruct", "Internal_setStruct"] {
        assert!(
            native.contains(&format!(
                "metaData.scriptClass->addInternalCall(\"{hook}\", (void*)&ScriptC::{hook});"
            )),
            "{hook} is not registered"
        );
    }
    let header = contents(&generation, "BsScriptC.generated.h");
    assert!(header.contains("class BS_SCR_BE_EXPORT ScriptC"));
}

#[test]
fn test_property_is_mapped_once() {
    let generation = generate(vec![complex_struct(), class_with_struct_property()]);
    let mapping = contents(&generation, "info.xml");
    assert_eq!(mapping.matches("<property ").count(), 1);
    assert!(mapping.contains("script=\"Struct\""));
    assert!(!mapping.contains("<method native=\"getStruct\""));
}

// =============================================================================
// Methods
// =============================================================================

#[test]
fn test_static_methods_take_no_instance() {
    let generation = generate(vec![Decl::Record(
        RecordDecl::new("Time")
            .with_annotation("se,f:Utility")
            .with_method(
                MethodDecl::new("getElapsed")
                    .with_annotation("se")
                    .as_static()
                    .with_return("float"),
            ),
    )]);
    let managed = contents(&generation, "Utility.generated.cs");
    assert!(managed.contains("public static float getElapsed()"));
    assert!(managed.contains("private static extern float Internal_getElapsed();"));

    let native = contents(&generation, "BsScriptUtility.generated.cpp");
    assert!(native.contains("Time::getElapsed()"));
}

#[test]
fn test_derived_leaves_dispatch_on_rtti() {
    let generation = generate(vec![
        Decl::Record(RecordDecl::new("Shape").with_annotation("se,f:Scene")),
        Decl::Record(RecordDecl::new("Box").with_annotation("se,f:Scene").with_base("Shape")),
        Decl::Record(RecordDecl::new("Sphere").with_annotation("se,f:Scene").with_base("Shape")),
        Decl::Record(
            RecordDecl::new("World")
                .with_annotation("se,f:Scene")
                .with_method(
                    MethodDecl::new("getShape")
                        .with_annotation("se")
                        .with_return("SPtr<Shape>"),
                ),
        ),
    ]);
    let native = contents(&generation, "BsScriptScene.generated.cpp");
    for leaf in ["Box", "Sphere"] {
        assert!(
            native.contains(&format!("if(rttiId__output == TID_{leaf})")),
            "{leaf} is not dispatched"
        );
    }
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn test_module_events_are_bound_statically() {
    let generation = generate(vec![Decl::Record(
        RecordDecl::new("Physics")
            .with_annotation("se,f:Physics")
            .with_base("Module<Physics>")
            .with_field(FieldDecl::new("onContact", "Event<void(int)>").with_annotation("se")),
    )]);
    let header = contents(&generation, "BsScriptPhysics.generated.h");
    assert!(header.contains("typedef void(BS_THUNKCALL *onContactThunkDef) (INT32, MonoException**);"));
    assert!(header.contains("static void startUp();"));

    let native = contents(&generation, "BsScriptPhysics.generated.cpp");
    assert!(native.contains("void ScriptPhysics::startUp()"));
    assert!(native.contains(
        "onContactConn = Physics::instance().onContact.connect(&ScriptPhysics::onContact);"
    ));
    assert!(native.contains("onContactConn.disconnect();"));

    let managed = contents(&generation, "Physics.generated.cs");
    assert!(managed.contains("public static partial class Physics"));
    assert!(managed.contains("private static void Internal_onContact("));
}
