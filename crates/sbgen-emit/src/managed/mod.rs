//! Managed wrapper emission.
//!
//! Every file group becomes one `{Group}.generated.cs` holding its enums,
//! structs and wrapper classes inside the side's managed namespace.

pub mod class;
pub mod docs;
pub mod enums;
pub mod structs;
pub mod style;

use log::debug;
use sbgen_core::FileGroup;
use sbgen_registry::Registry;

use crate::source::Source;
use crate::{GeneratedFile, OutputTarget, uwriteln};

pub use class::ManagedClassEmitter;
pub use enums::write_enum;
pub use structs::ManagedStructEmitter;

/// Emits the managed half of every file group.
pub struct ManagedEmitter<'a> {
    registry: &'a Registry,
}

impl<'a> ManagedEmitter<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(self) -> Vec<GeneratedFile> {
        let files: Vec<GeneratedFile> = self
            .registry
            .file_groups
            .values()
            .filter(|group| !group.in_editor || self.registry.config.generate_editor)
            .filter(|group| !group.is_empty())
            .map(|group| {
                GeneratedFile::new(
                    OutputTarget::managed(group.in_editor),
                    group.managed_file_name(),
                    self.file(group),
                )
            })
            .collect();
        debug!("emitted {} managed files", files.len());
        files
    }

    pub fn file(&self, group: &FileGroup) -> String {
        let config = &self.registry.config;
        let editor = group.in_editor;
        let mut out = Source::new();
        uwriteln!(out, "using System;");
        uwriteln!(out, "using System.Runtime.CompilerServices;");
        uwriteln!(out, "using System.Runtime.InteropServices;");
        let framework = config.managed_namespace(false);
        let namespace = config.managed_namespace(editor);
        if namespace != framework {
            uwriteln!(out, "using {framework};");
        }
        out.blank_line();
        uwriteln!(out, "namespace {namespace}");
        uwriteln!(out, "{{");

        let mut first = true;
        let mut separate = |out: &mut Source| {
            if !first {
                out.blank_line();
            }
            first = false;
        };
        for info in &group.enums {
            separate(&mut out);
            write_enum(info, &mut out);
        }
        for info in &group.structs {
            separate(&mut out);
            ManagedStructEmitter::new(self.registry, info).write(&mut out);
        }
        for class in &group.classes {
            if class.interop_only {
                continue;
            }
            separate(&mut out);
            ManagedClassEmitter::new(self.registry, class).write(&mut out);
        }
        uwriteln!(out, "}}");
        out.into_string()
    }
}

#[cfg(test)]
mod tests {
    use sbgen_core::{
        ClassInfo, EnumInfo, GeneratorConfig, Namespaces, StructInfo, TypeCategory,
    };

    use super::*;

    #[test]
    fn one_file_per_group() {
        let mut registry = Registry::new(GeneratorConfig::default());
        registry.file_group_mut("Render", false).enums.push(EnumInfo::new("CullMode"));
        registry
            .file_group_mut("Render", false)
            .classes
            .push(ClassInfo::new("Material", TypeCategory::Resource));
        registry
            .file_group_mut("Gizmos", true)
            .structs
            .push(StructInfo::new("GizmoDrawSettings"));

        let files = ManagedEmitter::new(&registry).run();
        let names: Vec<(&str, OutputTarget)> =
            files.iter().map(|f| (f.name.as_str(), f.target)).collect();
        assert_eq!(
            names,
            [
                ("Render.generated.cs", OutputTarget::ManagedFramework),
                ("Gizmos.generated.cs", OutputTarget::ManagedEditor),
            ]
        );
        let render = &files[0].contents;
        assert!(render.starts_with("using System;\n"));
        assert!(render.contains("namespace bs\n{\n\tpublic enum CullMode"));
        assert!(render.contains("\tpublic partial class Material : Resource"));
    }

    #[test]
    fn editor_files_import_the_framework_namespace() {
        let config = GeneratorConfig::default().with_namespaces(Namespaces {
            managed_editor: "bs.Editor".into(),
            ..Namespaces::default()
        });
        let mut registry = Registry::new(config);
        registry
            .file_group_mut("Gizmos", true)
            .structs
            .push(StructInfo::new("GizmoDrawSettings"));
        let emitter = ManagedEmitter::new(&registry);
        let text = emitter.file(&registry.file_groups["Gizmos"]);
        assert!(text.contains("using bs;\n\nnamespace bs.Editor\n{"));
    }

    #[test]
    fn editor_groups_are_skipped_when_disabled() {
        let mut registry = Registry::new(GeneratorConfig::default().with_editor(false));
        registry
            .file_group_mut("Gizmos", true)
            .structs
            .push(StructInfo::new("GizmoDrawSettings"));
        assert!(ManagedEmitter::new(&registry).run().is_empty());
    }
}
