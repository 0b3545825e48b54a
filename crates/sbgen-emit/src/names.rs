//! Type spellings on both sides of the boundary.

use sbgen_core::{BuiltinKind, SourceKind, TypeCategory, TypeRef};
use sbgen_registry::TypeMap;

/// Name of the native companion of a managed type.
pub fn companion_name(script_name: &str) -> String {
    format!("Script{script_name}")
}

/// Name of the base companion a class hierarchy's companions share.
pub fn base_companion_name(script_name: &str) -> String {
    format!("Script{script_name}Base")
}

/// Name of the native hook registered for `interop_name`.
pub fn hook_name(interop_name: &str) -> String {
    format!("Internal_{interop_name}")
}

/// Resolves names through the registered type map.
#[derive(Clone, Copy)]
pub struct TypeNames<'a> {
    types: &'a TypeMap,
}

impl<'a> TypeNames<'a> {
    pub fn new(types: &'a TypeMap) -> Self {
        Self { types }
    }

    /// Managed name of a registered type, or the source name itself.
    pub fn script_name(&self, source_name: &str) -> String {
        self.types
            .get(source_name)
            .map(|t| t.script_name.clone())
            .unwrap_or_else(|| source_name.to_string())
    }

    /// Companion of the type a position refers to.
    ///
    /// Positions referring to an exported base go through the base
    /// companion so that every derived companion is accepted.
    pub fn companion(&self, ty: &TypeRef) -> String {
        match ty.category {
            TypeCategory::SceneObject => "ScriptSceneObject".into(),
            TypeCategory::ScriptObject => "ScriptObjectBase".into(),
            _ if ty.references_base() => base_companion_name(&self.script_name(&ty.name)),
            _ => companion_name(&self.script_name(&ty.name)),
        }
    }

    // ==========================================================================
    // Managed
    // ==========================================================================

    /// Managed spelling of a whole position, wrappers included.
    pub fn managed(&self, ty: &TypeRef) -> String {
        let element = self.managed_element(ty);
        let element = if ty.is_array() {
            format!("{element}[]")
        } else {
            element
        };
        if ty.is_async_op() {
            format!("AsyncOp<{element}>")
        } else {
            element
        }
    }

    /// Managed spelling of a single element.
    pub fn managed_element(&self, ty: &TypeRef) -> String {
        match ty.category {
            TypeCategory::Builtin => match ty.builtin {
                Some(kind) => kind.managed_name().to_string(),
                None => ty.name.clone(),
            },
            TypeCategory::String | TypeCategory::WString | TypeCategory::Path => "string".into(),
            TypeCategory::MonoObject | TypeCategory::ScriptObject => "object".into(),
            _ => self.script_name(&ty.name),
        }
    }

    // ==========================================================================
    // Native
    // ==========================================================================

    /// Native type of a local holding a whole position's value.
    pub fn native_local(&self, ty: &TypeRef) -> String {
        let element = self.native_element(ty);
        let element = if ty.is_array() {
            format!("Vector<{element}>")
        } else {
            element
        };
        if ty.is_async_op() {
            format!("TAsyncOp<{element}>")
        } else {
            element
        }
    }

    /// Native type of a local holding one element.
    pub fn native_element(&self, ty: &TypeRef) -> String {
        let name = &ty.name;
        match ty.category {
            TypeCategory::Builtin => match ty.builtin {
                Some(kind) => kind.native_name().to_string(),
                None => name.clone(),
            },
            TypeCategory::Enum if ty.is_flags_enum() => format!("Flags<{name}>"),
            TypeCategory::Enum | TypeCategory::Struct => name.clone(),
            TypeCategory::String => "String".into(),
            TypeCategory::WString => "WString".into(),
            TypeCategory::Path => "Path".into(),
            TypeCategory::Resource => format!("ResourceHandle<{name}>"),
            TypeCategory::SceneObject => "HSceneObject".into(),
            TypeCategory::Component => format!("GameObjectHandle<{name}>"),
            TypeCategory::GuiElement => format!("{name}*"),
            TypeCategory::ScriptObject => "ScriptObjectBase*".into(),
            TypeCategory::MonoObject => "MonoObject*".into(),
            TypeCategory::Class | TypeCategory::ReflectableClass => match ty.source_kind() {
                SourceKind::SharedPtr => format!("SPtr<{name}>"),
                SourceKind::Pointer => format!("{name}*"),
                _ => name.clone(),
            },
        }
    }

    /// Underlying integer of an enum position as spelled natively.
    pub fn enum_backing(&self, ty: &TypeRef) -> &'static str {
        ty.builtin.unwrap_or(BuiltinKind::Int32).native_name()
    }
}
