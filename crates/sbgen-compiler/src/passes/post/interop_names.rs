//! Interop-name uniqueness.

use rustc_hash::FxHashSet;
use sbgen_registry::Registry;

use super::unique_name;

/// Give every constructor, method and event of each class an interop name
/// unique within the class. Walks them in that order, so the first hook
/// with a given name keeps it and later ones get `name0`, `name1`, ...
///
/// Returns the number of hooks renamed.
pub(super) fn assign(registry: &mut Registry) -> usize {
    let mut renamed = 0;
    for class in registry
        .file_groups
        .values_mut()
        .flat_map(|g| g.classes.iter_mut())
    {
        let mut taken = FxHashSet::default();
        for method in class
            .ctors
            .iter_mut()
            .chain(class.methods.iter_mut())
            .chain(class.events.iter_mut())
        {
            let unique = unique_name(&mut taken, &method.interop_name);
            if unique != method.interop_name {
                method.interop_name = unique;
                renamed += 1;
            }
        }
    }
    renamed
}

#[cfg(test)]
mod tests {
    use sbgen_core::{ClassInfo, GeneratorConfig, MethodFlags, MethodInfo, TypeCategory};

    use super::*;

    #[test]
    fn collisions_get_zero_based_suffixes() {
        let mut registry = Registry::new(GeneratorConfig::default());
        let mut class = ClassInfo::new("Mesh", TypeCategory::Resource);
        let mut ctor = MethodInfo::new("Mesh").with_flags(MethodFlags::CONSTRUCTOR);
        ctor.interop_name = "create".into();
        class.ctors.push(ctor.clone());
        class.ctors.push(ctor);
        class.methods.push(MethodInfo::new("setData"));
        class.methods.push(MethodInfo::new("setData"));
        class.methods.push(MethodInfo::new("setData"));
        class.events.push(MethodInfo::new("create"));
        registry.file_group_mut("Mesh", false).classes.push(class);

        assert_eq!(assign(&mut registry), 4);
        let class = &registry.file_groups["Mesh"].classes[0];
        let names: Vec<&str> = class
            .ctors
            .iter()
            .chain(&class.methods)
            .chain(&class.events)
            .map(|m| m.interop_name.as_str())
            .collect();
        assert_eq!(
            names,
            ["create", "create0", "setData", "setData0", "setData1", "create1"]
        );
    }

    #[test]
    fn assignment_is_stable() {
        let mut registry = Registry::new(GeneratorConfig::default());
        let mut class = ClassInfo::new("Mesh", TypeCategory::Resource);
        class.methods.push(MethodInfo::new("a"));
        class.methods.push(MethodInfo::new("a"));
        registry.file_group_mut("Mesh", false).classes.push(class);

        assign(&mut registry);
        assert_eq!(assign(&mut registry), 0);
    }
}
