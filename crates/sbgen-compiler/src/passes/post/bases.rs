//! Base-class metadata.

use sbgen_core::ClassFlags;
use sbgen_registry::Registry;

/// Mark every class another class derives from and fill the registry's
/// children index. Returns the number of classes marked.
pub(super) fn mark(registry: &mut Registry) -> usize {
    let links: Vec<(String, String)> = registry
        .classes()
        .filter_map(|c| Some((c.base_class.clone()?, c.native_type_name())))
        .collect();

    let mut marked = 0;
    for (base, child) in links {
        registry.add_child(&base, &child);
        match registry.find_class_mut(&base) {
            Some(class) if !class.is_base() => {
                class.flags |= ClassFlags::IS_BASE;
                marked += 1;
            }
            Some(_) => {}
            None => log::debug!("base '{base}' of '{child}' has no class record"),
        }
    }
    marked
}

#[cfg(test)]
mod tests {
    use sbgen_core::{ClassInfo, GeneratorConfig, TypeCategory};
    use sbgen_registry::UserType;

    use super::*;

    fn add(registry: &mut Registry, name: &str, base: Option<&str>) {
        let mut ty = UserType::new(name, TypeCategory::Class);
        ty.file_group = "G".into();
        registry.types.insert(ty).unwrap();
        let mut class = ClassInfo::new(name, TypeCategory::Class);
        class.base_class = base.map(str::to_string);
        registry.file_group_mut("G", false).classes.push(class);
    }

    #[test]
    fn bases_are_marked_and_indexed() {
        let mut registry = Registry::new(GeneratorConfig::default());
        add(&mut registry, "Collider", None);
        add(&mut registry, "BoxCollider", Some("Collider"));
        add(&mut registry, "SphereCollider", Some("Collider"));
        add(&mut registry, "Leaf", Some("BoxCollider"));

        assert_eq!(mark(&mut registry), 2);
        assert!(registry.find_class("Collider").unwrap().is_base());
        assert!(registry.find_class("BoxCollider").unwrap().is_base());
        assert!(!registry.find_class("Leaf").unwrap().is_base());
        assert_eq!(
            registry.transitive_children("Collider"),
            ["BoxCollider", "Leaf", "SphereCollider"]
        );
    }
}
