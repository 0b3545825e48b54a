//! External merge.
//!
//! External constructors must return their class. External methods must
//! take it as their first parameter, which becomes the implicit `this` of
//! the generated hook.

use sbgen_core::{ClassInfo, MethodInfo};
use sbgen_registry::{PendingExternal, Registry};

/// Move every buffered external method into its target class. Returns the
/// number of methods attached.
pub(super) fn merge(registry: &mut Registry) -> usize {
    let buffer = std::mem::take(&mut registry.externals);
    let mut merged = 0;

    for (target, pending) in buffer {
        let group = registry.types.get(&target).map(|t| t.file_group.clone());
        for PendingExternal {
            method,
            editor,
            header,
            subject,
        } in pending
        {
            let attached = match registry.find_class_mut(&target) {
                Some(class) => attach(class, method, editor),
                None => Err(format!("external target class '{target}' is not exported")),
            };
            if let Err(message) = attached {
                registry.diagnostics.error(&subject, message);
                continue;
            }
            merged += 1;

            if let Some(group) = &group
                && !header.is_empty()
                && let Some(group) = registry.file_groups.get_mut(group)
            {
                group.source_includes.insert(header);
            }
        }
    }
    merged
}

fn attach(class: &mut ClassInfo, mut method: MethodInfo, editor: bool) -> Result<(), String> {
    if editor && !class.is_editor() {
        return Err(format!(
            "editor-only external method targets framework class '{}'",
            class.native_type_name()
        ));
    }

    if method.is_constructor() {
        if !class.is_named(&method.ret.ty.name) {
            return Err(format!(
                "external constructor must return '{}'",
                class.native_type_name()
            ));
        }
        class.ctors.push(method);
        return Ok(());
    }

    let takes_class = method
        .params
        .first()
        .is_some_and(|p| class.is_named(&p.ty.name) && !p.ty.is_array());
    if !takes_class {
        return Err(format!(
            "external method must take '{}' as its first parameter",
            class.native_type_name()
        ));
    }
    let this = method.params.remove(0);
    method.external_this = Some(this.ty);
    class.methods.push(method);
    Ok(())
}

#[cfg(test)]
mod tests {
    use sbgen_core::{
        BuiltinKind, GeneratorConfig, MethodFlags, ParamInfo, TypeCategory, TypeFlags, TypeRef,
    };
    use sbgen_registry::UserType;

    use super::*;

    fn registry_with(class: ClassInfo) -> Registry {
        let mut registry = Registry::new(GeneratorConfig::default());
        let mut ty = UserType::new(class.native_type_name(), class.category);
        ty.file_group = "G".into();
        registry.types.insert(ty).unwrap();
        registry.file_group_mut("G", false).classes.push(class);
        registry
    }

    fn pending(method: MethodInfo) -> PendingExternal {
        PendingExternal {
            method,
            editor: false,
            header: "BsMeshUtility.h".into(),
            subject: "MeshUtility::op".into(),
        }
    }

    fn mesh() -> TypeRef {
        TypeRef::new("Mesh", TypeCategory::Resource).with_flags(TypeFlags::SRC_RESOURCE_HANDLE)
    }

    #[test]
    fn external_method_strips_object_parameter() {
        let mut registry = registry_with(ClassInfo::new("Mesh", TypeCategory::Resource));
        let method = MethodInfo::new("split")
            .with_flags(MethodFlags::EXTERNAL)
            .with_param(ParamInfo::new("thisPtr", mesh()))
            .with_param(ParamInfo::new("count", TypeRef::builtin(BuiltinKind::Int32)));
        registry
            .externals
            .entry("Mesh".into())
            .or_default()
            .push(pending(method));

        assert_eq!(merge(&mut registry), 1);
        let class = registry.find_class("Mesh").unwrap();
        let method = &class.methods[0];
        assert_eq!(method.params.len(), 1);
        assert_eq!(method.external_this.as_ref().unwrap().name, "Mesh");
        assert!(registry.file_groups["G"].source_includes.contains("BsMeshUtility.h"));
        assert!(registry.externals.is_empty());
    }

    #[test]
    fn external_constructor_must_return_class() {
        let mut registry = registry_with(ClassInfo::new("Mesh", TypeCategory::Resource));
        let good = MethodInfo::new("create")
            .with_flags(MethodFlags::EXTERNAL | MethodFlags::CONSTRUCTOR)
            .with_return(mesh());
        let bad = MethodInfo::new("create")
            .with_flags(MethodFlags::EXTERNAL | MethodFlags::CONSTRUCTOR)
            .with_return(TypeRef::new("Texture", TypeCategory::Resource));
        let list = registry.externals.entry("Mesh".into()).or_default();
        list.push(pending(good));
        list.push(pending(bad));

        assert_eq!(merge(&mut registry), 1);
        assert_eq!(registry.find_class("Mesh").unwrap().ctors.len(), 1);
        assert!(
            registry
                .diagnostics
                .mentions("MeshUtility::op", "must return 'Mesh'")
        );
    }

    #[test]
    fn wrong_first_parameter_is_an_error() {
        let mut registry = registry_with(ClassInfo::new("Mesh", TypeCategory::Resource));
        let method = MethodInfo::new("split").with_flags(MethodFlags::EXTERNAL);
        registry
            .externals
            .entry("Mesh".into())
            .or_default()
            .push(pending(method));

        assert_eq!(merge(&mut registry), 0);
        assert!(registry.diagnostics.has_errors());
    }

    #[test]
    fn editor_external_needs_editor_class() {
        let mut registry = registry_with(ClassInfo::new("Mesh", TypeCategory::Resource));
        let method = MethodInfo::new("split")
            .with_flags(MethodFlags::EXTERNAL)
            .with_param(ParamInfo::new("thisPtr", mesh()));
        let mut entry = pending(method);
        entry.editor = true;
        registry.externals.entry("Mesh".into()).or_default().push(entry);

        assert_eq!(merge(&mut registry), 0);
        assert!(registry.diagnostics.mentions("MeshUtility::op", "framework class"));
    }

    #[test]
    fn unknown_target_is_an_error() {
        let mut registry = registry_with(ClassInfo::new("Mesh", TypeCategory::Resource));
        registry
            .externals
            .entry("Missing".into())
            .or_default()
            .push(pending(MethodInfo::new("op")));
        assert_eq!(merge(&mut registry), 0);
        assert!(registry.diagnostics.mentions("MeshUtility::op", "not exported"));
    }
}
