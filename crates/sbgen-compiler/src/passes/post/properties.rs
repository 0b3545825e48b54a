//! Property derivation.
//!
//! Methods flagged as property getters or setters are grouped by script
//! name. A getter contributes its return type, a setter the type of its
//! only parameter. When both halves exist they must agree on type and
//! static-ness, otherwise the property is dropped and both methods stay
//! ordinary methods.

use indexmap::IndexMap;
use sbgen_core::{ClassInfo, Diagnostics, MethodFlags, MethodInfo, PropertyInfo, TypeFlags};
use sbgen_registry::Registry;

#[derive(Default)]
struct Halves {
    getter: Option<usize>,
    setter: Option<usize>,
}

/// Derive the property records of every class. Returns how many were
/// derived.
pub(super) fn derive(registry: &mut Registry) -> usize {
    let Registry {
        file_groups,
        diagnostics,
        ..
    } = registry;
    file_groups
        .values_mut()
        .flat_map(|g| g.classes.iter_mut())
        .map(|class| derive_class(class, diagnostics))
        .sum()
}

fn derive_class(class: &mut ClassInfo, diagnostics: &mut Diagnostics) -> usize {
    let class_name = class.source_name.clone();
    let mut halves: IndexMap<String, Halves> = IndexMap::new();

    for (index, method) in class.methods.iter_mut().enumerate() {
        let subject = format!("{class_name}::{}", method.source_name);
        if method.flags.contains(MethodFlags::PROPERTY_GETTER) {
            if !method.params.is_empty() || method.ret.is_void() {
                diagnostics.error(
                    &subject,
                    "property getter must take no parameters and return a value",
                );
                clear_property(method);
                continue;
            }
            let slot = &mut halves.entry(method.script_name.clone()).or_default().getter;
            if slot.is_some() {
                diagnostics.error(
                    &subject,
                    format!("duplicate getter for property '{}'", method.script_name),
                );
                clear_property(method);
                continue;
            }
            *slot = Some(index);
        } else if method.flags.contains(MethodFlags::PROPERTY_SETTER) {
            if method.params.len() != 1 {
                diagnostics.error(&subject, "property setter must take exactly one parameter");
                clear_property(method);
                continue;
            }
            let slot = &mut halves.entry(method.script_name.clone()).or_default().setter;
            if slot.is_some() {
                diagnostics.error(
                    &subject,
                    format!("duplicate setter for property '{}'", method.script_name),
                );
                clear_property(method);
                continue;
            }
            *slot = Some(index);
        }
    }

    class.properties.clear();
    for (name, Halves { getter, setter }) in halves {
        let getter_method = getter.map(|i| &class.methods[i]);
        let setter_method = setter.map(|i| &class.methods[i]);

        let getter_ty = getter_method.map(|m| m.ret.ty.clone());
        let setter_ty = setter_method.map(|m| {
            let mut ty = m.params[0].ty.clone();
            ty.flags.remove(TypeFlags::OUTPUT);
            ty
        });

        if let (Some(g), Some(s)) = (getter_method, setter_method) {
            let types_agree = getter_ty
                .as_ref()
                .zip(setter_ty.as_ref())
                .is_some_and(|(a, b)| a.same_script_type(b));
            if !types_agree || g.is_static() != s.is_static() {
                diagnostics.error(
                    format!("{class_name}::{name}"),
                    format!("mismatched property halves for '{name}'"),
                );
                for index in [getter, setter].into_iter().flatten() {
                    clear_property(&mut class.methods[index]);
                }
                continue;
            }
        }

        let Some(ty) = getter_ty.or(setter_ty) else {
            continue;
        };
        let primary = getter_method.or(setter_method);
        let documentation = match (getter_method, setter_method) {
            (_, Some(s)) if !s.documentation.is_empty() => s.documentation.clone(),
            (Some(g), _) => g.documentation.clone(),
            (None, Some(s)) => s.documentation.clone(),
            (None, None) => continue,
        };
        let style = match (getter_method, setter_method) {
            (Some(g), Some(s)) => g.style.merged(&s.style),
            _ => primary.map(|m| m.style.clone()).unwrap_or_default(),
        };

        class.properties.push(PropertyInfo {
            name,
            ty,
            getter: getter_method.map(|m| m.interop_name.clone()),
            setter: setter_method.map(|m| m.interop_name.clone()),
            is_static: primary.is_some_and(MethodInfo::is_static),
            visibility: primary.map(|m| m.visibility).unwrap_or_default(),
            documentation,
            style,
        });
    }
    class.properties.len()
}

fn clear_property(method: &mut MethodInfo) {
    method
        .flags
        .remove(MethodFlags::PROPERTY_GETTER | MethodFlags::PROPERTY_SETTER);
}

#[cfg(test)]
mod tests {
    use sbgen_core::{BuiltinKind, Comment, GeneratorConfig, ParamInfo, TypeCategory, TypeRef};

    use super::*;

    fn complex_struct() -> TypeRef {
        TypeRef::new("ComplexStruct", TypeCategory::Struct)
    }

    fn getter(name: &str, ty: TypeRef) -> MethodInfo {
        MethodInfo::new(format!("get{name}"))
            .with_script_name(name)
            .with_flags(MethodFlags::PROPERTY_GETTER)
            .with_return(ty)
    }

    fn setter(name: &str, ty: TypeRef) -> MethodInfo {
        MethodInfo::new(format!("set{name}"))
            .with_script_name(name)
            .with_flags(MethodFlags::PROPERTY_SETTER)
            .with_param(ParamInfo::new("value", ty))
    }

    fn run(methods: Vec<MethodInfo>) -> Registry {
        let mut registry = Registry::new(GeneratorConfig::default());
        let mut class = ClassInfo::new("C", TypeCategory::Class);
        class.methods = methods;
        registry.file_group_mut("G", false).classes.push(class);
        derive(&mut registry);
        registry
    }

    #[test]
    fn getter_and_setter_form_one_property() {
        let registry = run(vec![
            getter("Struct", complex_struct()),
            setter("Struct", complex_struct().with_flags(TypeFlags::SRC_REF)),
        ]);
        let class = &registry.file_groups["G"].classes[0];
        assert_eq!(class.properties.len(), 1);
        let property = &class.properties[0];
        assert_eq!(property.name, "Struct");
        assert_eq!(property.ty.name, "ComplexStruct");
        assert_eq!(property.getter.as_deref(), Some("getStruct"));
        assert_eq!(property.setter.as_deref(), Some("setStruct"));
        assert!(registry.diagnostics.is_empty());
    }

    #[test]
    fn mismatched_halves_drop_the_property() {
        let registry = run(vec![
            getter("Size", TypeRef::builtin(BuiltinKind::Int32)),
            setter("Size", TypeRef::builtin(BuiltinKind::Float)),
        ]);
        let class = &registry.file_groups["G"].classes[0];
        assert!(class.properties.is_empty());
        assert!(class.methods.iter().all(|m| !m.is_property()));
        assert!(registry.diagnostics.mentions("C::Size", "mismatched property halves"));
    }

    #[test]
    fn static_mismatch_drops_the_property() {
        let int = TypeRef::builtin(BuiltinKind::Int32);
        let registry = run(vec![
            getter("Count", int.clone()).with_flags(MethodFlags::STATIC),
            setter("Count", int),
        ]);
        assert!(registry.file_groups["G"].classes[0].properties.is_empty());
        assert!(registry.diagnostics.has_errors());
    }

    #[test]
    fn setter_documentation_wins() {
        let int = TypeRef::builtin(BuiltinKind::Int32);
        let mut get = getter("Count", int.clone());
        get.documentation = Comment::brief("From getter.");
        let mut set = setter("Count", int);
        set.documentation = Comment::brief("From setter.");
        let registry = run(vec![get, set]);
        let property = &registry.file_groups["G"].classes[0].properties[0];
        assert_eq!(property.documentation.brief, ["From setter."]);
    }

    #[test]
    fn lone_halves_are_properties() {
        let registry = run(vec![setter("Name", TypeRef::new("String", TypeCategory::String))]);
        let property = &registry.file_groups["G"].classes[0].properties[0];
        assert!(property.getter.is_none());
        assert_eq!(property.setter.as_deref(), Some("setName"));
    }

    #[test]
    fn getter_with_parameters_is_rejected() {
        let bad = getter("Size", TypeRef::builtin(BuiltinKind::Int32))
            .with_param(ParamInfo::new("x", TypeRef::builtin(BuiltinKind::Int32)));
        let registry = run(vec![bad]);
        assert!(registry.file_groups["G"].classes[0].properties.is_empty());
        assert!(registry.diagnostics.mentions("C::getSize", "no parameters"));
    }
}
