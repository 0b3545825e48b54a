//! Builtin type lookup headers.
//!
//! The runtime maps RTTI ids of native components and reflectable classes
//! to their companions through `LOOKUP_BEGIN`/`ADD_ENTRY` tables included
//! from a hand-written header.

use std::collections::BTreeSet;

use sbgen_core::{ClassInfo, TypeCategory};
use sbgen_registry::Registry;

use crate::names::{TypeNames, companion_name};
use crate::source::Source;
use crate::uwriteln;

/// Which table a lookup header fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Components,
    ReflectableTypes,
}

impl LookupKind {
    fn category(self) -> TypeCategory {
        match self {
            LookupKind::Components => TypeCategory::Component,
            LookupKind::ReflectableTypes => TypeCategory::ReflectableClass,
        }
    }

    /// File name of the generated header.
    pub fn file_name(self, editor: bool) -> &'static str {
        match (self, editor) {
            (LookupKind::Components, false) => "BsBuiltinComponentLookup.generated.h",
            (LookupKind::Components, true) => "BsEditorBuiltinComponentLookup.generated.h",
            (LookupKind::ReflectableTypes, false) => {
                "BsBuiltinReflectableTypesLookup.generated.h"
            }
            (LookupKind::ReflectableTypes, true) => {
                "BsEditorBuiltinReflectableTypesLookup.generated.h"
            }
        }
    }

    fn table(self, editor: bool) -> &'static str {
        match (self, editor) {
            (LookupKind::Components, false) => "BuiltinComponents",
            (LookupKind::Components, true) => "EditorBuiltinComponents",
            (LookupKind::ReflectableTypes, false) => "BuiltinReflectableTypes",
            (LookupKind::ReflectableTypes, true) => "EditorBuiltinReflectableTypes",
        }
    }

    fn support_header(self) -> &'static str {
        match self {
            LookupKind::Components => "BsBuiltinComponentLookup.h",
            LookupKind::ReflectableTypes => "BsBuiltinReflectableTypesLookup.h",
        }
    }
}

/// Emit one lookup header listing every exported class of `kind` that
/// belongs to the editor or framework side.
pub fn emit_lookup(registry: &Registry, kind: LookupKind, editor: bool) -> String {
    let names = TypeNames::new(&registry.types);
    let entries: Vec<&ClassInfo> = registry
        .classes()
        .filter(|c| c.category == kind.category() && c.is_editor() == editor)
        .filter(|c| !c.is_module())
        .collect();

    let mut includes = BTreeSet::new();
    for class in &entries {
        if !class.header.is_empty() {
            includes.insert(class.header.clone());
        }
        if let Some(user) = registry.types.get(&class.native_type_name()) {
            includes.insert(sbgen_core::native_header_name(&user.file_group));
        }
    }

    let mut out = Source::new();
    uwriteln!(out, "#pragma once");
    out.blank_line();
    uwriteln!(out, "#include \"{}\"", kind.support_header());
    for include in &includes {
        uwriteln!(out, "#include \"{include}\"");
    }
    out.blank_line();
    uwriteln!(out, "namespace {}", registry.config.native_namespace(editor));
    uwriteln!(out, "{{");
    uwriteln!(out, "LOOKUP_BEGIN({})", kind.table(editor));
    out.indent(1);
    for class in &entries {
        let native = class.native_type_name();
        let companion = companion_name(&names.script_name(&native));
        uwriteln!(out, "ADD_ENTRY({native}, {companion}, TID_{})", class.source_name);
    }
    out.deindent(1);
    uwriteln!(out, "LOOKUP_END");
    uwriteln!(out, "}}");
    uwriteln!(out, "#undef LOOKUP_BEGIN");
    uwriteln!(out, "#undef ADD_ENTRY");
    uwriteln!(out, "#undef LOOKUP_END");
    out.into_string()
}
