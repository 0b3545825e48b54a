//! Default-parameter expansion.
//!
//! Managed optional arguments only accept compile-time constants, so a
//! default such as `new Color(1, 1, 1)` cannot be written on the managed
//! signature. For every such default in the trailing run of defaulted
//! parameters a managed-only overload is added that drops that parameter
//! and every later one, and forwards to the original method with the
//! dropped values filled in. The original keeps only the simple defaults
//! after its last constructed one.

use rustc_hash::FxHashSet;
use sbgen_core::{MethodFlags, MethodInfo, ParamInfo};
use sbgen_registry::Registry;

use super::unique_name;
use crate::passes::drop_defaults_through;

/// Expand constructed defaults of every class method and constructor.
/// Returns the number of overloads added.
pub(super) fn expand(registry: &mut Registry) -> usize {
    let mut added = 0;
    for group in registry.file_groups.values_mut() {
        for class in &mut group.classes {
            let mut taken: FxHashSet<String> = class
                .ctors
                .iter()
                .chain(&class.methods)
                .chain(&class.events)
                .map(|m| m.interop_name.clone())
                .collect();
            added += expand_list(&mut class.ctors, &mut taken);
            added += expand_list(&mut class.methods, &mut taken);
        }
        for info in &mut group.structs {
            for ctor in &mut info.ctors {
                if let Some(last) = last_complex_default(&ctor.params) {
                    drop_defaults_through(&mut ctor.params, last);
                }
            }
        }
    }
    added
}

fn expand_list(methods: &mut Vec<MethodInfo>, taken: &mut FxHashSet<String>) -> usize {
    let original = std::mem::take(methods);
    let mut added = 0;
    for mut method in original {
        let complex = complex_positions(&method);
        let overloads: Vec<MethodInfo> = if method.is_property() || method.is_cs_only() {
            Vec::new()
        } else {
            complex
                .iter()
                .map(|&position| forwarding_overload(&method, position, taken))
                .collect()
        };
        if let Some(last) = last_complex_default(&method.params) {
            drop_defaults_through(&mut method.params, last);
        }
        added += overloads.len();
        methods.push(method);
        methods.extend(overloads);
    }
    added
}

/// A managed-only copy of `method` that stops before `position`.
fn forwarding_overload(
    method: &MethodInfo,
    position: usize,
    taken: &mut FxHashSet<String>,
) -> MethodInfo {
    let mut overload = method.clone();
    overload.implicit_args = overload.params.split_off(position);
    if let Some(last) = last_complex_default(&overload.params) {
        drop_defaults_through(&mut overload.params, last);
    }
    overload.flags |= MethodFlags::CS_ONLY;
    overload.forwards_to = Some(method.interop_name.clone());
    overload.interop_name = unique_name(taken, &method.interop_name);
    overload
}

/// Positions of constructed defaults within the trailing run of defaulted
/// parameters, in ascending order.
fn complex_positions(method: &MethodInfo) -> Vec<usize> {
    let params = &method.params;
    let start = params
        .iter()
        .rposition(|p| !p.has_default())
        .map_or(0, |i| i + 1);
    (start..params.len())
        .filter(|&i| params[i].has_complex_default())
        .collect()
}

fn last_complex_default(params: &[ParamInfo]) -> Option<usize> {
    params.iter().rposition(ParamInfo::has_complex_default)
}

#[cfg(test)]
mod tests {
    use sbgen_core::{BuiltinKind, ClassInfo, GeneratorConfig, TypeCategory, TypeRef};

    use super::*;

    fn color() -> TypeRef {
        TypeRef::new("Color", TypeCategory::Struct)
    }

    fn int() -> TypeRef {
        TypeRef::builtin(BuiltinKind::Int32)
    }

    fn run(method: MethodInfo) -> (usize, Vec<MethodInfo>) {
        let mut registry = Registry::new(GeneratorConfig::default());
        let mut class = ClassInfo::new("Painter", TypeCategory::Class);
        class.methods.push(method);
        registry.file_group_mut("G", false).classes.push(class);
        let added = expand(&mut registry);
        (added, registry.file_groups["G"].classes[0].methods.clone())
    }

    #[test]
    fn mixed_trailing_defaults_expand_to_k_plus_one() {
        let method = MethodInfo::new("paint")
            .with_param(ParamInfo::new("target", int()))
            .with_param(ParamInfo::new("tint", color()).with_constructed_default("Color.White", "Color"))
            .with_param(ParamInfo::new("count", int()).with_default("1"))
            .with_param(
                ParamInfo::new("border", color()).with_constructed_default("new Color(0, 0, 0)", "Color"),
            )
            .with_param(ParamInfo::new("alpha", int()).with_default("255"));

        let (added, methods) = run(method);
        assert_eq!(added, 2);
        assert_eq!(methods.len(), 3);

        let original = &methods[0];
        assert!(!original.is_cs_only());
        let defaults: Vec<Option<&str>> = original
            .params
            .iter()
            .map(|p| p.default_value.as_deref())
            .collect();
        assert_eq!(defaults, [None, None, None, None, Some("255")]);

        let first = &methods[1];
        assert!(first.is_cs_only());
        assert_eq!(first.params.len(), 1);
        assert_eq!(first.implicit_args.len(), 4);
        assert_eq!(first.forwards_to.as_deref(), Some("paint"));
        assert_eq!(first.interop_name, "paint0");

        let second = &methods[2];
        assert_eq!(second.params.len(), 3);
        assert_eq!(second.implicit_args.len(), 2);
        let defaults: Vec<Option<&str>> = second
            .params
            .iter()
            .map(|p| p.default_value.as_deref())
            .collect();
        assert_eq!(defaults, [None, None, Some("1")]);
        assert_eq!(second.interop_name, "paint1");
    }

    #[test]
    fn simple_defaults_do_not_expand() {
        let method = MethodInfo::new("resize")
            .with_param(ParamInfo::new("width", int()).with_default("1"))
            .with_param(ParamInfo::new("height", int()).with_default("1"));
        let (added, methods) = run(method);
        assert_eq!(added, 0);
        assert_eq!(methods.len(), 1);
        assert!(methods[0].params.iter().all(ParamInfo::has_default));
    }

    #[test]
    fn defaults_before_a_required_parameter_do_not_count() {
        let method = MethodInfo::new("paint")
            .with_param(ParamInfo::new("tint", color()).with_constructed_default("Color.White", "Color"))
            .with_param(ParamInfo::new("target", int()));
        let (added, methods) = run(method);
        assert_eq!(added, 0);
        assert!(!methods[0].params[0].has_default());
    }
}
