use sbgen::decl::{Decl, MethodDecl, ParamDecl, RecordDecl};

use crate::{contents, generate};

fn renderable(param: &str, ret: &str) -> Vec<Decl> {
    vec![
        Decl::Record(
            RecordDecl::new("Mesh")
                .with_annotation("se,f:Render")
                .with_base("Resource"),
        ),
        Decl::Record(
            RecordDecl::new("Renderable")
                .with_annotation("se,f:Render")
                .with_method(
                    MethodDecl::new("setMeshes")
                        .with_annotation("se")
                        .with_param(ParamDecl::new("meshes", param)),
                )
                .with_method(
                    MethodDecl::new("getMeshes")
                        .with_annotation("se")
                        .with_return(ret),
                ),
        ),
    ]
}

#[test]
fn test_resource_array_parameter_converts_each_element() {
    let generation = generate(renderable(
        "const Vector<ResourceHandle<Mesh>>&",
        "Vector<ResourceHandle<Mesh>>",
    ));
    assert!(generation.is_success(), "{:?}", generation.diagnostics());

    let native = contents(&generation, "BsScriptRender.generated.cpp");
    assert!(native.contains("Vector<ResourceHandle<Mesh>> vecmeshes;"));
    assert!(native.contains("ScriptArray arraymeshes(meshes);"));
    assert!(native.contains("for(UINT32 i = 0; i < arraymeshes.size(); i++)"));
    assert!(native.contains("vecmeshes[i] = scriptmeshes_i->getHandle();"));
}

#[test]
fn test_resource_array_return_goes_through_the_resource_manager() {
    let generation = generate(renderable(
        "const Vector<ResourceHandle<Mesh>>&",
        "Vector<ResourceHandle<Mesh>>",
    ));
    let native = contents(&generation, "BsScriptRender.generated.cpp");
    assert!(native.contains("ScriptResourceManager::instance().getScriptResource("));
    assert!(native.contains("ScriptArray::create<ScriptResourceBase>("));
}

#[test]
fn test_handle_typedefs_are_accepted() {
    let generation = generate(renderable("const std::vector<HMesh>&", "Vector<HMesh>"));
    assert!(generation.is_success(), "{:?}", generation.diagnostics());
    let native = contents(&generation, "BsScriptRender.generated.cpp");
    assert!(native.contains("ScriptArray arraymeshes(meshes);"));
}
