//! Include computation.
//!
//! The generated header of a file group declares the companions of its
//! classes and the interop copies of its structs, so it needs the native
//! headers of every value type it embeds and the companion header of every
//! base class it derives from. Everything else a hook touches only matters
//! to the generated source.

use std::collections::BTreeSet;

use sbgen_core::{FileGroup, SupportHeaders, TypeCategory, TypeRef, native_header_name};
use sbgen_registry::{Registry, TypeMap};

/// Compute header includes, source includes, forward declarations and
/// support headers of every file group.
pub(super) fn compute(registry: &mut Registry) {
    let Registry {
        types, file_groups, ..
    } = registry;
    for group in file_groups.values_mut() {
        compute_group(group, types);
    }
}

fn compute_group(group: &mut FileGroup, types: &TypeMap) {
    let own = group.name.clone();

    for info in &group.structs {
        insert_header(&mut group.header_includes, &info.header);
    }
    for info in &group.enums {
        insert_header(&mut group.header_includes, &info.header);
    }
    for class in &group.classes {
        if !class.template_params.is_empty() {
            insert_header(&mut group.header_includes, &class.header);
        }
        insert_header(&mut group.source_includes, &class.header);

        if let Some(base) = class.base_class.as_deref()
            && let Some(user) = types.get(base)
            && user.file_group != own
        {
            group
                .header_includes
                .insert(native_header_name(&user.file_group));
        }
    }

    let mut refs: Vec<TypeRef> = Vec::new();
    group.for_each_type_ref(&mut |ty| refs.push(ty.clone()));

    for ty in &refs {
        group.support |= support_for(ty);

        let Some(user) = types.get(&ty.name) else {
            continue;
        };
        let foreign = user.file_group != own;
        match ty.category {
            TypeCategory::Struct | TypeCategory::Enum => {
                if foreign {
                    insert_header(&mut group.header_includes, &user.header);
                    if ty.is_complex_struct() {
                        group
                            .forward_declarations
                            .insert(format!("__{}Interop", user.source_name));
                        group
                            .source_includes
                            .insert(native_header_name(&user.file_group));
                    }
                }
            }
            category if category.is_object() => {
                insert_header(&mut group.source_includes, &user.header);
                if foreign {
                    group
                        .source_includes
                        .insert(native_header_name(&user.file_group));
                }
            }
            _ => {}
        }
    }
}

fn support_for(ty: &TypeRef) -> SupportHeaders {
    let mut support = SupportHeaders::empty();
    match ty.category {
        TypeCategory::Resource => support |= SupportHeaders::RESOURCE_MANAGER,
        TypeCategory::Component | TypeCategory::SceneObject => {
            support |= SupportHeaders::GAME_OBJECT_MANAGER;
        }
        _ => {}
    }
    if ty.is_async_op() {
        support |= SupportHeaders::ASYNC_OP;
    }
    if ty.references_base() {
        support |= SupportHeaders::RTTI;
    }
    support
}

fn insert_header(set: &mut BTreeSet<String>, header: &str) {
    if !header.is_empty() {
        set.insert(header.to_string());
    }
}
