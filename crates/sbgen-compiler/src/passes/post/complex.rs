//! Complex-struct and base-reference marking.
//!
//! A struct requires an interop copy when one of its fields is an array or
//! has a category other than builtin, enum or plain struct. A struct field
//! makes the outer struct complex only if the field's struct is itself
//! complex, so the decision is iterated until nothing changes.

use rustc_hash::{FxHashMap, FxHashSet};
use sbgen_core::{StructInfo, TypeCategory, TypeFlags, TypeRef};
use sbgen_registry::Registry;

/// Decide `requires_interop` for every struct, then flag every typed
/// position referring to a complex struct or to an exported base class.
/// Returns the number of complex structs.
pub(super) fn mark(registry: &mut Registry) -> usize {
    let complex = complex_structs(registry);
    let bases: FxHashSet<String> = registry
        .classes()
        .filter(|c| c.is_base())
        .map(|c| c.native_type_name())
        .collect();

    for group in registry.file_groups.values_mut() {
        for info in &mut group.structs {
            info.requires_interop = complex.contains(&info.source_name);
        }
        let mut flag = |ty: &mut TypeRef| flag_position(ty, &complex, &bases);
        group.for_each_type_ref_mut(&mut flag);
    }
    complex.len()
}

fn complex_structs(registry: &Registry) -> FxHashSet<String> {
    let structs: FxHashMap<&str, &StructInfo> = registry
        .structs()
        .map(|s| (s.source_name.as_str(), s))
        .collect();

    let mut complex = FxHashSet::default();
    loop {
        let mut changed = false;
        for (name, info) in &structs {
            if complex.contains(*name) {
                continue;
            }
            if info.fields.iter().any(|f| needs_interop(&f.ty, &complex)) {
                complex.insert(name.to_string());
                changed = true;
            }
        }
        if !changed {
            return complex;
        }
    }
}

fn needs_interop(ty: &TypeRef, complex: &FxHashSet<String>) -> bool {
    if ty.is_array() {
        return true;
    }
    match ty.category {
        TypeCategory::Builtin | TypeCategory::Enum => false,
        TypeCategory::Struct => complex.contains(&ty.name),
        _ => true,
    }
}

fn flag_position(ty: &mut TypeRef, complex: &FxHashSet<String>, bases: &FxHashSet<String>) {
    if ty.category == TypeCategory::Struct && complex.contains(&ty.name) {
        ty.flags |= TypeFlags::COMPLEX_STRUCT;
    }
    if ty.category.can_reference_base() && bases.contains(&ty.name) {
        ty.flags |= TypeFlags::REFERENCES_BASE;
    }
}
