//! Enum default resolution.
//!
//! Integer defaults of enum-typed positions are rewritten to the entry with
//! that value, as `EnumName.EntryName`. A flags enum accepts any
//! combination of bits, so a value with no exact entry becomes a cast. For
//! any other enum a missing entry drops the default with an error.

use rustc_hash::FxHashMap;
use sbgen_core::{Diagnostics, ParamInfo, TypeCategory, TypeRef};
use sbgen_registry::Registry;

use crate::passes::drop_defaults_through;

/// Script names of one enum and its entries.
struct EnumNames {
    script_name: String,
    entries: FxHashMap<i64, String>,
}

enum Rewrite {
    Unchanged,
    Replaced(String),
    Missing(i64),
}

struct Resolver<'a> {
    enums: FxHashMap<String, EnumNames>,
    diagnostics: &'a mut Diagnostics,
    rewritten: usize,
}

/// Resolve enum defaults on every parameter and struct field. Returns the
/// number of defaults rewritten.
pub(super) fn resolve(registry: &mut Registry) -> usize {
    let enums = registry
        .enums()
        .map(|e| {
            let names = EnumNames {
                script_name: e.script_name.clone(),
                entries: e
                    .entries
                    .iter()
                    .map(|(value, entry)| (*value, entry.script_name.clone()))
                    .collect(),
            };
            (e.source_name.clone(), names)
        })
        .collect();

    let Registry {
        file_groups,
        diagnostics,
        ..
    } = registry;
    let mut resolver = Resolver {
        enums,
        diagnostics,
        rewritten: 0,
    };

    for group in file_groups.values_mut() {
        for class in &mut group.classes {
            for method in class.ctors.iter_mut().chain(class.methods.iter_mut()) {
                let subject = format!("{}::{}", class.source_name, method.source_name);
                resolver.params(&mut method.params, &subject);
            }
        }
        for info in &mut group.structs {
            for ctor in &mut info.ctors {
                resolver.params(&mut ctor.params, &info.source_name);
            }
            for field in &mut info.fields {
                let Some(literal) = &field.default_value else {
                    continue;
                };
                match resolver.rewrite(literal, &field.ty) {
                    Rewrite::Unchanged => {}
                    Rewrite::Replaced(text) => {
                        field.default_value = Some(text);
                        resolver.rewritten += 1;
                    }
                    Rewrite::Missing(value) => {
                        let subject = format!("{}::{}", info.source_name, field.name);
                        resolver.missing(&subject, value, &field.ty);
                        field.default_value = None;
                        field.default_value_type = None;
                    }
                }
            }
        }
    }
    resolver.rewritten
}

impl Resolver<'_> {
    fn params(&mut self, params: &mut [ParamInfo], subject: &str) {
        for index in 0..params.len() {
            let Some(literal) = &params[index].default_value else {
                continue;
            };
            match self.rewrite(literal, &params[index].ty) {
                Rewrite::Unchanged => {}
                Rewrite::Replaced(text) => {
                    params[index].default_value = Some(text);
                    self.rewritten += 1;
                }
                Rewrite::Missing(value) => {
                    let subject = format!("{subject}({})", params[index].name);
                    self.missing(&subject, value, &params[index].ty);
                    drop_defaults_through(params, index);
                }
            }
        }
    }

    fn rewrite(&self, literal: &str, ty: &TypeRef) -> Rewrite {
        if ty.category != TypeCategory::Enum || ty.is_array() {
            return Rewrite::Unchanged;
        }
        let Ok(value) = literal.trim().parse::<i64>() else {
            return Rewrite::Unchanged;
        };
        let Some(names) = self.enums.get(&ty.name) else {
            return Rewrite::Unchanged;
        };
        match names.entries.get(&value) {
            Some(entry) => Rewrite::Replaced(format!("{}.{entry}", names.script_name)),
            None if ty.is_flags_enum() => {
                Rewrite::Replaced(format!("({}){value}", names.script_name))
            }
            None => Rewrite::Missing(value),
        }
    }

    fn missing(&mut self, subject: &str, value: i64, ty: &TypeRef) {
        self.diagnostics.error(
            subject,
            format!(
                "default value {value} has no matching entry in enum '{}'; dropped",
                ty.name
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use sbgen_core::{
        ClassInfo, Comment, EnumEntryInfo, EnumInfo, FieldInfo, GeneratorConfig, MethodInfo,
        StructInfo, TypeFlags,
    };

    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new(GeneratorConfig::default());
        let mut info = EnumInfo::new("MeshUsage");
        for (value, name) in [(1, "Static"), (2, "Dynamic")] {
            info.insert_entry(
                value,
                EnumEntryInfo {
                    name: name.into(),
                    script_name: name.into(),
                    value_literal: value.to_string(),
                    documentation: Comment::default(),
                },
            );
        }
        registry.file_group_mut("Mesh", false).enums.push(info);
        registry
    }

    fn usage() -> TypeRef {
        TypeRef::new("MeshUsage", TypeCategory::Enum)
    }

    fn int() -> TypeRef {
        TypeRef::builtin(sbgen_core::BuiltinKind::Int32)
    }

    fn class_with(params: Vec<ParamInfo>) -> ClassInfo {
        let mut class = ClassInfo::new("Mesh", TypeCategory::Resource);
        let mut method = MethodInfo::new("create");
        method.params = params;
        class.methods.push(method);
        class
    }

    #[test]
    fn integer_defaults_become_entries() {
        let mut registry = registry();
        let class = class_with(vec![ParamInfo::new("usage", usage()).with_default("2")]);
        registry.file_group_mut("Mesh", false).classes.push(class);

        assert_eq!(resolve(&mut registry), 1);
        let param = &registry.file_groups["Mesh"].classes[0].methods[0].params[0];
        assert_eq!(param.default_value.as_deref(), Some("MeshUsage.Dynamic"));
    }

    #[test]
    fn missing_entry_drops_defaults_through_position() {
        let mut registry = registry();
        let class = class_with(vec![
            ParamInfo::new("count", int()).with_default("1"),
            ParamInfo::new("usage", usage()).with_default("7"),
            ParamInfo::new("flags", int()).with_default("0"),
        ]);
        registry.file_group_mut("Mesh", false).classes.push(class);

        assert_eq!(resolve(&mut registry), 0);
        let params = &registry.file_groups["Mesh"].classes[0].methods[0].params;
        assert!(!params[0].has_default());
        assert!(!params[1].has_default());
        assert_eq!(params[2].default_value.as_deref(), Some("0"));
        assert!(registry.diagnostics.mentions("Mesh::create(usage)", "no matching entry"));
    }

    #[test]
    fn flags_enums_fall_back_to_a_cast() {
        let mut registry = registry();
        let flags = usage().with_flags(TypeFlags::FLAGS_ENUM);
        let class = class_with(vec![ParamInfo::new("usage", flags).with_default("3")]);
        registry.file_group_mut("Mesh", false).classes.push(class);

        resolve(&mut registry);
        let param = &registry.file_groups["Mesh"].classes[0].methods[0].params[0];
        assert_eq!(param.default_value.as_deref(), Some("(MeshUsage)3"));
        assert!(!registry.diagnostics.has_errors());
    }

    #[test]
    fn struct_field_defaults_are_resolved() {
        let mut registry = registry();
        let mut info = StructInfo::new("MeshDesc");
        info.fields
            .push(FieldInfo::new("usage", usage()).with_default("1"));
        info.fields
            .push(FieldInfo::new("other", usage()).with_default("9"));
        registry.file_group_mut("Mesh", false).structs.push(info);

        resolve(&mut registry);
        let info = &registry.file_groups["Mesh"].structs[0];
        assert_eq!(info.fields[0].default_value.as_deref(), Some("MeshUsage.Static"));
        assert_eq!(info.fields[1].default_value, None);
    }

    #[test]
    fn already_resolved_defaults_are_untouched() {
        let mut registry = registry();
        let class = class_with(vec![
            ParamInfo::new("usage", usage()).with_default("MeshUsage.Static"),
        ]);
        registry.file_group_mut("Mesh", false).classes.push(class);
        assert_eq!(resolve(&mut registry), 0);
    }
}
