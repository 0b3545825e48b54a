//! Native companions of exported structs.
//!
//! Plain structs are blitted across the boundary and only need boxing
//! helpers. Complex structs get an interop copy (`__SInterop`) whose fields
//! hold managed-side values, plus `toInterop`/`fromInterop` converting
//! between the two layouts field by field.

use sbgen_core::{StructInfo, TypeCategory};
use sbgen_registry::Registry;

use super::marshal::Marshaller;
use crate::names::companion_name;
use crate::source::Source;
use crate::uwriteln;

pub struct StructEmitter<'a> {
    registry: &'a Registry,
    marshal: Marshaller<'a>,
    info: &'a StructInfo,
    companion: String,
}

impl<'a> StructEmitter<'a> {
    pub fn new(registry: &'a Registry, info: &'a StructInfo) -> Self {
        Self {
            registry,
            marshal: Marshaller::new(registry),
            info,
            companion: companion_name(&info.script_name),
        }
    }

    /// The boxed representation: the interop copy for complex structs.
    fn boxed_type(&self) -> &str {
        if self.info.requires_interop {
            &self.info.interop_name
        } else {
            &self.info.source_name
        }
    }

    pub fn header(&self, out: &mut Source) {
        let info = self.info;
        if info.requires_interop {
            uwriteln!(out, "struct {}", info.interop_name);
            uwriteln!(out, "{{");
            for field in &info.fields {
                uwriteln!(out, "{} {};", self.marshal.interop_value(&field.ty), field.name);
            }
            uwriteln!(out, "}};");
            out.blank_line();
        }

        let companion = &self.companion;
        let boxed = self.boxed_type();
        let (assembly, ns) = if info.editor {
            ("EDITOR_ASSEMBLY", "EDITOR_NS")
        } else {
            ("ENGINE_ASSEMBLY", "ENGINE_NS")
        };
        uwriteln!(
            out,
            "class {} {companion} : public ScriptObject<{companion}>",
            self.registry.config.export_macro(info.editor)
        );
        uwriteln!(out, "{{");
        out.deindent(1);
        uwriteln!(out, "public:");
        out.indent(1);
        uwriteln!(out, "SCRIPT_OBJ({assembly}, {ns}, \"{}\")", info.script_name);
        out.blank_line();
        uwriteln!(out, "static MonoObject* box(const {boxed}& value);");
        uwriteln!(out, "static {boxed} unbox(MonoObject* value);");
        if info.requires_interop {
            uwriteln!(out, "static {} fromInterop(const {boxed}& value);", info.source_name);
            uwriteln!(out, "static {boxed} toInterop(const {}& value);", info.source_name);
        }
        out.blank_line();
        out.deindent(1);
        uwriteln!(out, "private:");
        out.indent(1);
        uwriteln!(out, "{companion}(MonoObject* managedInstance);");
        out.blank_line();
        uwriteln!(out, "}};");
    }

    pub fn source(&self, out: &mut Source) {
        let info = self.info;
        let companion = &self.companion;
        let boxed = self.boxed_type();

        uwriteln!(out, "{companion}::{companion}(MonoObject* managedInstance)");
        out.indent(1);
        uwriteln!(out, ":ScriptObject(managedInstance)");
        out.deindent(1);
        uwriteln!(out, "{{ }}");
        out.blank_line();

        uwriteln!(out, "void {companion}::initRuntimeData()");
        uwriteln!(out, "{{ }}");
        out.blank_line();

        uwriteln!(out, "MonoObject* {companion}::box(const {boxed}& value)");
        uwriteln!(out, "{{");
        uwriteln!(
            out,
            "return MonoUtil::box(metaData.scriptClass->_getInternalClass(), (void*)&value);"
        );
        uwriteln!(out, "}}");
        out.blank_line();

        uwriteln!(out, "{boxed} {companion}::unbox(MonoObject* value)");
        uwriteln!(out, "{{");
        uwriteln!(out, "return *({boxed}*)MonoUtil::unbox(value);");
        uwriteln!(out, "}}");
        out.blank_line();

        if info.requires_interop {
            self.from_interop(out);
            self.to_interop(out);
        }
    }

    fn from_interop(&self, out: &mut Source) {
        let info = self.info;
        let companion = &self.companion;
        uwriteln!(
            out,
            "{} {companion}::fromInterop(const {}& value)",
            info.source_name,
            info.interop_name
        );
        uwriteln!(out, "{{");
        uwriteln!(out, "{} output;", info.source_name);
        for field in &info.fields {
            let name = &field.name;
            let src = format!("value.{name}");
            let dst = format!("output.{name}");
            let ty = &field.ty;
            if ty.is_array() {
                let local = format!("vec{name}");
                self.marshal.array_to_native(ty, &src, &local, name, out);
                uwriteln!(out, "{dst} = {local};");
            } else if is_blittable(ty.category) {
                uwriteln!(out, "{dst} = {src};");
            } else {
                let local = format!("tmp{name}");
                uwriteln!(out, "{} {local};", self.marshal.names().native_local(ty));
                self.marshal.to_native(ty, &src, &local, name, out);
                uwriteln!(out, "{dst} = {local};");
            }
        }
        out.blank_line();
        uwriteln!(out, "return output;");
        uwriteln!(out, "}}");
        out.blank_line();
    }

    fn to_interop(&self, out: &mut Source) {
        let info = self.info;
        let companion = &self.companion;
        uwriteln!(
            out,
            "{} {companion}::toInterop(const {}& value)",
            info.interop_name,
            info.source_name
        );
        uwriteln!(out, "{{");
        uwriteln!(out, "{} output;", info.interop_name);
        for field in &info.fields {
            let name = &field.name;
            let src = format!("value.{name}");
            let dst = format!("output.{name}");
            let ty = &field.ty;
            if !ty.is_array() && is_blittable(ty.category) {
                uwriteln!(out, "{dst} = {src};");
            } else {
                let local = format!("tmp{name}");
                uwriteln!(out, "{} {local};", self.marshal.interop_value(ty));
                self.marshal.position_to_managed(ty, &src, &local, name, out);
                uwriteln!(out, "{dst} = {local};");
            }
        }
        out.blank_line();
        uwriteln!(out, "return output;");
        uwriteln!(out, "}}");
        out.blank_line();
    }
}

/// Builtin fields share one layout on both sides.
fn is_blittable(category: TypeCategory) -> bool {
    matches!(category, TypeCategory::Builtin)
}

#[cfg(test)]
mod tests {
    use sbgen_core::{BuiltinKind, FieldInfo, GeneratorConfig, TypeFlags, TypeRef};
    use sbgen_registry::UserType;

    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new(GeneratorConfig::default());
        for (name, category) in [
            ("Mesh", TypeCategory::Resource),
            ("SubMesh", TypeCategory::Struct),
            ("MeshData", TypeCategory::Struct),
        ] {
            registry.types.insert(UserType::new(name, category)).unwrap();
        }
        registry
    }

    fn emit(registry: &Registry, info: &StructInfo) -> (String, String) {
        let emitter = StructEmitter::new(registry, info);
        let mut header = Source::new();
        let mut source = Source::new();
        emitter.header(&mut header);
        emitter.source(&mut source);
        (header.into_string(), source.into_string())
    }

    #[test]
    fn plain_structs_only_box() {
        let registry = registry();
        let mut info = StructInfo::new("SubMesh");
        info.fields
            .push(FieldInfo::new("indexOffset", TypeRef::builtin(BuiltinKind::UInt32)));
        let (header, source) = emit(&registry, &info);
        assert!(header.contains("static MonoObject* box(const SubMesh& value);"));
        assert!(!header.contains("Interop"));
        assert!(source.contains("return *(SubMesh*)MonoUtil::unbox(value);"));
    }

    #[test]
    fn complex_structs_convert_field_by_field() {
        let registry = registry();
        let mut info = StructInfo::new("MeshData");
        info.requires_interop = true;
        info.fields
            .push(FieldInfo::new("count", TypeRef::builtin(BuiltinKind::Int32)));
        info.fields.push(FieldInfo::new(
            "mesh",
            TypeRef::new("Mesh", TypeCategory::Resource)
                .with_flags(TypeFlags::SRC_RESOURCE_HANDLE),
        ));
        info.fields.push(FieldInfo::new(
            "name",
            TypeRef::new("String", TypeCategory::String).with_flags(TypeFlags::STRING),
        ));

        let (header, source) = emit(&registry, &info);
        assert!(header.contains("struct __MeshDataInterop"));
        assert!(header.contains("MonoObject* mesh;"));
        assert!(header.contains("MonoString* name;"));
        assert!(header.contains("static MeshData fromInterop(const __MeshDataInterop& value);"));

        assert!(source.contains("output.count = value.count;"));
        assert!(source.contains("scriptmesh = ScriptMesh::toNative(value.mesh);"));
        assert!(source.contains("tmpname = MonoUtil::monoToString(value.name);"));
        assert!(source.contains("tmpname = MonoUtil::stringToMono(value.name);"));
        assert!(source.contains(
            "scriptmesh = ScriptResourceManager::instance().getScriptResource(value.mesh, true);"
        ));
    }
}
