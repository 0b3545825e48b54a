use sbgen::decl::{Decl, FunctionDecl, MethodDecl, ParamDecl, RecordDecl};

use crate::{contents, generate};

fn font() -> Decl {
    Decl::Record(
        RecordDecl::new("Font")
            .with_annotation("se,f:Fonts")
            .with_base("Resource"),
    )
}

fn create_font() -> Decl {
    Decl::Function(
        FunctionDecl::new("createFont")
            .with_annotation("se,ec:Font")
            .with_file("BsFontEx.h")
            .with_return("ResourceHandle<Font>")
            .with_param(ParamDecl::new("size", "UINT32")),
    )
}

#[test]
fn test_external_constructor_builds_through_the_function() {
    let generation = generate(vec![font(), create_font()]);
    assert!(generation.is_success(), "{:?}", generation.diagnostics());

    let native = contents(&generation, "BsScriptFonts.generated.cpp");
    assert!(native.contains("ResourceHandle<Font> instance = bs::createFont(size);"));
    assert!(native.contains(
        "ScriptResourceManager::instance().createBuiltinScriptResource(instance, managedInstance);"
    ));
    assert!(native.contains("#include \"BsFontEx.h\""));

    let managed = contents(&generation, "Fonts.generated.cs");
    assert!(managed.contains("public partial class Font : Resource"));
    assert!(managed.contains("Internal_create(this, size);"));
}

#[test]
fn test_external_method_receives_the_instance() {
    let generation = generate(vec![
        font(),
        Decl::Record(
            RecordDecl::new("FontEx")
                .with_annotation("se,e:Font")
                .with_method(
                    MethodDecl::new("getLineHeight")
                        .with_annotation("se,e:Font")
                        .as_static()
                        .with_return("float")
                        .with_param(ParamDecl::new("thisPtr", "const ResourceHandle<Font>&")),
                ),
        ),
    ]);
    assert!(generation.is_success(), "{:?}", generation.diagnostics());

    let native = contents(&generation, "BsScriptFonts.generated.cpp");
    assert!(native.contains("bs::FontEx::getLineHeight("));

    let managed = contents(&generation, "Fonts.generated.cs");
    assert!(managed.contains("public float getLineHeight()"));
    assert!(managed.contains("return Internal_getLineHeight(mCachedPtr);"));
}
