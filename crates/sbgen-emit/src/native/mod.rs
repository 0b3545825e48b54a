//! Native shim emission.
//!
//! One header/source pair per file group. The header declares the interop
//! copies of complex structs and the companions of every struct and class;
//! the source defines them. Lookup headers listing builtin components and
//! reflectable types are emitted once per side.
//!
//! ## Architecture
//!
//! ```text
//! FileGroup ──> NativeEmitter ──┬─> StructEmitter ──┐
//!                               └─> ClassEmitter ───┴─> Marshaller (pre/args/post)
//! ```

pub mod class;
pub mod lookup;
pub mod marshal;
pub mod structs;

use std::collections::BTreeSet;

use log::debug;
use sbgen_core::{FileGroup, SupportHeaders, TypeCategory};
use sbgen_registry::Registry;

use crate::source::Source;
use crate::{GeneratedFile, OutputTarget, uwriteln};

pub use class::ClassEmitter;
pub use lookup::{LookupKind, emit_lookup};
pub use marshal::Marshaller;
pub use structs::StructEmitter;

/// Emits the native half of every file group.
pub struct NativeEmitter<'a> {
    registry: &'a Registry,
}

impl<'a> NativeEmitter<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(self) -> Vec<GeneratedFile> {
        let mut files = Vec::new();
        for group in self.registry.file_groups.values() {
            if group.in_editor && !self.registry.config.generate_editor {
                continue;
            }
            // Enums have no native companion.
            if group.classes.is_empty() && group.structs.is_empty() {
                continue;
            }
            let target = OutputTarget::native(group.in_editor);
            files.push(GeneratedFile::new(
                target,
                group.native_header_name(),
                self.header(group),
            ));
            files.push(GeneratedFile::new(
                target,
                group.native_source_name(),
                self.source(group),
            ));
        }

        let sides: &[bool] = if self.registry.config.generate_editor {
            &[false, true]
        } else {
            &[false]
        };
        for &editor in sides {
            for kind in [LookupKind::Components, LookupKind::ReflectableTypes] {
                files.push(GeneratedFile::new(
                    OutputTarget::native(editor),
                    kind.file_name(editor),
                    emit_lookup(self.registry, kind, editor),
                ));
            }
        }

        debug!("emitted {} native files", files.len());
        files
    }

    pub fn header(&self, group: &FileGroup) -> String {
        let editor = group.in_editor;
        let mut out = Source::new();
        uwriteln!(out, "#pragma once");
        out.blank_line();
        uwriteln!(out, "#include \"{}\"", prerequisites(editor));
        for include in header_support(group) {
            uwriteln!(out, "#include \"{include}\"");
        }
        for include in &group.header_includes {
            uwriteln!(out, "#include \"{include}\"");
        }
        out.blank_line();

        uwriteln!(out, "namespace {}", self.registry.config.native_namespace(editor));
        uwriteln!(out, "{{");
        for declaration in &group.forward_declarations {
            uwriteln!(out, "struct {declaration};");
        }
        if !group.forward_declarations.is_empty() {
            out.blank_line();
        }
        for info in &group.structs {
            StructEmitter::new(self.registry, info).header(&mut out);
            out.blank_line();
        }
        for class in &group.classes {
            ClassEmitter::new(self.registry, class).header(&mut out);
            out.blank_line();
        }
        uwriteln!(out, "}}");
        out.into_string()
    }

    pub fn source(&self, group: &FileGroup) -> String {
        let editor = group.in_editor;
        let mut out = Source::new();
        uwriteln!(out, "#include \"{}\"", group.native_header_name());
        for include in ["BsMonoMethod.h", "BsMonoClass.h", "BsMonoUtil.h", "BsScriptArray.h"] {
            uwriteln!(out, "#include \"{include}\"");
        }
        for include in source_support(group.support) {
            uwriteln!(out, "#include \"{include}\"");
        }
        for include in &group.source_includes {
            uwriteln!(out, "#include \"{include}\"");
        }
        out.blank_line();

        uwriteln!(out, "namespace {}", self.registry.config.native_namespace(editor));
        uwriteln!(out, "{{");
        for info in &group.structs {
            StructEmitter::new(self.registry, info).source(&mut out);
        }
        for class in &group.classes {
            ClassEmitter::new(self.registry, class).source(&mut out);
        }
        uwriteln!(out, "}}");
        out.into_string()
    }
}

fn prerequisites(editor: bool) -> &'static str {
    if editor {
        "BsScriptEditorPrerequisites.h"
    } else {
        "BsScriptEnginePrerequisites.h"
    }
}

/// Companion template headers the group's classes derive from.
fn header_support(group: &FileGroup) -> BTreeSet<&'static str> {
    let mut includes = BTreeSet::new();
    includes.insert("BsScriptObject.h");
    for class in &group.classes {
        let include = match class.category {
            _ if class.is_module() => continue,
            TypeCategory::Resource => "Wrappers/BsScriptResource.h",
            TypeCategory::Component => "Wrappers/BsScriptComponent.h",
            TypeCategory::ReflectableClass => "Wrappers/BsScriptReflectable.h",
            TypeCategory::GuiElement => "Wrappers/GUI/BsScriptGUIElement.h",
            _ => continue,
        };
        includes.insert(include);
    }
    includes
}

fn source_support(support: SupportHeaders) -> Vec<&'static str> {
    let mut includes = Vec::new();
    if support.contains(SupportHeaders::RESOURCE_MANAGER) {
        includes.push("BsScriptResourceManager.h");
    }
    if support.contains(SupportHeaders::GAME_OBJECT_MANAGER) {
        includes.push("BsScriptGameObjectManager.h");
    }
    if support.contains(SupportHeaders::ASYNC_OP) {
        includes.push("Wrappers/BsScriptAsyncOp.h");
    }
    if support.contains(SupportHeaders::RTTI) {
        includes.push("Reflection/BsRTTIType.h");
    }
    includes
}

#[cfg(test)]
mod tests {
    use sbgen_core::{
        BuiltinKind, ClassInfo, EnumInfo, GeneratorConfig, MethodInfo, StructInfo, TypeRef,
    };

    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new(GeneratorConfig::default().with_editor(false));
        let group = registry.file_group_mut("Physics", false);
        let mut class = ClassInfo::new("Rigidbody", TypeCategory::Component);
        class.methods.push(
            MethodInfo::new("getMass").with_return(TypeRef::builtin(BuiltinKind::Float)),
        );
        group.classes.push(class);
        group.structs.push(StructInfo::new("PhysicsQueryHit"));
        group.support |= SupportHeaders::GAME_OBJECT_MANAGER;
        group.source_includes.insert("BsRigidbody.h".into());

        registry.file_group_mut("Layers", false).enums.push(EnumInfo::new("Layer"));
        registry.file_group_mut("Editor", true).structs.push(StructInfo::new("Handle"));
        registry
    }

    #[test]
    fn each_group_gets_a_header_and_source() {
        let registry = registry();
        let files = NativeEmitter::new(&registry).run();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "BsScriptPhysics.generated.h",
                "BsScriptPhysics.generated.cpp",
                "BsBuiltinComponentLookup.generated.h",
                "BsBuiltinReflectableTypesLookup.generated.h",
            ]
        );
        assert!(files.iter().all(|f| f.target == OutputTarget::NativeFramework));
    }

    #[test]
    fn includes_follow_the_group() {
        let registry = registry();
        let emitter = NativeEmitter::new(&registry);
        let group = &registry.file_groups["Physics"];

        let header = emitter.header(group);
        assert!(header.starts_with("#pragma once\n\n#include \"BsScriptEnginePrerequisites.h\""));
        assert!(header.contains("#include \"Wrappers/BsScriptComponent.h\""));
        assert!(header.contains("namespace bs\n{"));

        let source = emitter.source(group);
        assert!(source.starts_with("#include \"BsScriptPhysics.generated.h\""));
        assert!(source.contains("#include \"BsScriptGameObjectManager.h\""));
        assert!(source.contains("#include \"BsRigidbody.h\""));
        assert!(source.contains("ScriptPhysicsQueryHit::ScriptPhysicsQueryHit"));
    }
}
