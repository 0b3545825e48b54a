//! Exportable type taxonomy.

use std::fmt;

/// Category of a classified type.
///
/// The category decides which marshalling rule applies on both sides of the
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Component,
    SceneObject,
    Resource,
    Class,
    ReflectableClass,
    Struct,
    Enum,
    Builtin,
    String,
    WString,
    Path,
    ScriptObject,
    GuiElement,
    MonoObject,
}

impl TypeCategory {
    /// Categories that are wrapped by a companion object on the native side
    /// and surface as managed reference types.
    pub const fn is_object(self) -> bool {
        matches!(
            self,
            TypeCategory::Component
                | TypeCategory::SceneObject
                | TypeCategory::Resource
                | TypeCategory::Class
                | TypeCategory::ReflectableClass
                | TypeCategory::GuiElement
        )
    }

    /// Categories whose instances live in the scene graph.
    pub const fn is_game_object(self) -> bool {
        matches!(self, TypeCategory::Component | TypeCategory::SceneObject)
    }

    /// Categories held by a native handle (resource or game object).
    pub const fn is_handle(self) -> bool {
        matches!(
            self,
            TypeCategory::Component | TypeCategory::SceneObject | TypeCategory::Resource
        )
    }

    /// Categories held through a shared pointer.
    pub const fn is_class_like(self) -> bool {
        matches!(self, TypeCategory::Class | TypeCategory::ReflectableClass)
    }

    /// String-like categories marshalled through the string hooks.
    pub const fn is_string_like(self) -> bool {
        matches!(
            self,
            TypeCategory::String | TypeCategory::WString | TypeCategory::Path
        )
    }

    /// Categories that are copied by value across the boundary.
    pub const fn is_value_like(self) -> bool {
        matches!(
            self,
            TypeCategory::Builtin
                | TypeCategory::Enum
                | TypeCategory::Struct
                | TypeCategory::String
                | TypeCategory::WString
                | TypeCategory::Path
        )
    }

    /// Categories that may carry the references-base flag.
    pub const fn can_reference_base(self) -> bool {
        matches!(
            self,
            TypeCategory::Class
                | TypeCategory::ReflectableClass
                | TypeCategory::GuiElement
                | TypeCategory::Resource
                | TypeCategory::Component
        )
    }

    /// Short lowercase name used in diagnostics and the mapping document.
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeCategory::Component => "component",
            TypeCategory::SceneObject => "scene-object",
            TypeCategory::Resource => "resource",
            TypeCategory::Class => "class",
            TypeCategory::ReflectableClass => "reflectable-class",
            TypeCategory::Struct => "struct",
            TypeCategory::Enum => "enum",
            TypeCategory::Builtin => "builtin",
            TypeCategory::String => "string",
            TypeCategory::WString => "wstring",
            TypeCategory::Path => "path",
            TypeCategory::ScriptObject => "script-object",
            TypeCategory::GuiElement => "gui-element",
            TypeCategory::MonoObject => "mono-object",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
