//! Classified type references.

use std::fmt;

use super::{BuiltinKind, TypeCategory, TypeFlags};

/// How a native position holds its value.
///
/// Derived from the source-kind bits of [`TypeFlags`]; `Value` is the
/// absence of every other kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Value,
    Pointer,
    Reference,
    SharedPtr,
    ResourceHandle,
    GameObjectHandle,
}

/// Ownership of a position, combining source kind and mutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnershipKind {
    Value,
    ConstRef,
    MutRef,
    ConstPtr,
    MutPtr,
    Shared,
    ResourceHandle,
    GameObjectHandle,
}

/// A classified type at one typed position (parameter, field, return).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Source name of the (element) type, e.g. `Mesh` for
    /// `std::vector<ResourceHandle<Mesh>>`.
    pub name: String,
    pub category: TypeCategory,
    pub flags: TypeFlags,
    /// Builtin kind, or the underlying builtin of an enum.
    pub builtin: Option<BuiltinKind>,
}

impl TypeRef {
    /// Create a type reference with no flags.
    pub fn new(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
            flags: TypeFlags::empty(),
            builtin: None,
        }
    }

    /// Create a builtin type reference using the canonical native name.
    pub fn builtin(kind: BuiltinKind) -> Self {
        Self {
            name: kind.native_name().to_string(),
            category: TypeCategory::Builtin,
            flags: TypeFlags::BUILTIN,
            builtin: Some(kind),
        }
    }

    /// The `void` return type.
    pub fn void() -> Self {
        Self::builtin(BuiltinKind::Void)
    }

    /// Add flags.
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Set the builtin (or underlying enum) kind.
    pub fn with_builtin(mut self, kind: BuiltinKind) -> Self {
        self.builtin = Some(kind);
        self
    }

    // === Query Methods ===

    /// Check if this is `void`.
    pub fn is_void(&self) -> bool {
        self.category == TypeCategory::Builtin && self.builtin == Some(BuiltinKind::Void)
    }

    pub fn is_array(&self) -> bool {
        self.flags.contains(TypeFlags::ARRAY)
    }

    pub fn is_output(&self) -> bool {
        self.flags.contains(TypeFlags::OUTPUT)
    }

    pub fn is_async_op(&self) -> bool {
        self.flags.contains(TypeFlags::ASYNC_OP)
    }

    pub fn is_complex_struct(&self) -> bool {
        self.flags.contains(TypeFlags::COMPLEX_STRUCT)
    }

    pub fn references_base(&self) -> bool {
        self.flags.contains(TypeFlags::REFERENCES_BASE)
    }

    pub fn is_flags_enum(&self) -> bool {
        self.flags.contains(TypeFlags::FLAGS_ENUM)
    }

    /// The single source kind of this position.
    pub fn source_kind(&self) -> SourceKind {
        let flags = self.flags;
        if flags.contains(TypeFlags::SRC_SHARED_PTR) {
            SourceKind::SharedPtr
        } else if flags.contains(TypeFlags::SRC_RESOURCE_HANDLE) {
            SourceKind::ResourceHandle
        } else if flags.contains(TypeFlags::SRC_GAME_OBJECT_HANDLE) {
            SourceKind::GameObjectHandle
        } else if flags.contains(TypeFlags::SRC_PTR) {
            SourceKind::Pointer
        } else if flags.contains(TypeFlags::SRC_REF) {
            SourceKind::Reference
        } else {
            SourceKind::Value
        }
    }

    /// Ownership tag the emitters dispatch on.
    pub fn ownership(&self) -> OwnershipKind {
        match self.source_kind() {
            SourceKind::Value => OwnershipKind::Value,
            SourceKind::Reference if self.is_output() => OwnershipKind::MutRef,
            SourceKind::Reference => OwnershipKind::ConstRef,
            SourceKind::Pointer if self.is_output() => OwnershipKind::MutPtr,
            SourceKind::Pointer => OwnershipKind::ConstPtr,
            SourceKind::SharedPtr => OwnershipKind::Shared,
            SourceKind::ResourceHandle => OwnershipKind::ResourceHandle,
            SourceKind::GameObjectHandle => OwnershipKind::GameObjectHandle,
        }
    }

    /// Number of source-kind bits set. Always 0 or 1 for well-formed refs.
    pub fn source_kind_count(&self) -> u32 {
        (self.flags & TypeFlags::SOURCE_KIND).bits().count_ones()
    }

    /// Whether two positions present the same type to managed code.
    ///
    /// Ownership and direction bits are ignored, so `T` and `const T&`
    /// agree.
    pub fn same_script_type(&self, other: &TypeRef) -> bool {
        self.name == other.name
            && self.category == other.category
            && (self.flags & TypeFlags::SCRIPT_SHAPE) == (other.flags & TypeFlags::SCRIPT_SHAPE)
    }

    /// A copy of this reference with the array and async-op wrappers
    /// removed, describing a single element.
    pub fn element(&self) -> TypeRef {
        let mut element = self.clone();
        element.flags.remove(TypeFlags::ARRAY | TypeFlags::ASYNC_OP | TypeFlags::OUTPUT);
        element
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_async_op() {
            write!(f, "TAsyncOp<")?;
        }
        if self.is_array() {
            write!(f, "Vector<")?;
        }
        match self.source_kind() {
            SourceKind::SharedPtr => write!(f, "SPtr<{}>", self.name)?,
            SourceKind::ResourceHandle => write!(f, "ResourceHandle<{}>", self.name)?,
            SourceKind::GameObjectHandle => write!(f, "GameObjectHandle<{}>", self.name)?,
            _ => write!(f, "{}", self.name)?,
        }
        if self.is_array() {
            write!(f, ">")?;
        }
        if self.is_async_op() {
            write!(f, ">")?;
        }
        match self.source_kind() {
            SourceKind::Pointer => write!(f, "*"),
            SourceKind::Reference => write!(f, "&"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kind_is_absence_of_source_bits() {
        let ty = TypeRef::new("Vector3", TypeCategory::Struct);
        assert_eq!(ty.source_kind(), SourceKind::Value);
        assert_eq!(ty.source_kind_count(), 0);
        assert_eq!(ty.ownership(), OwnershipKind::Value);
    }

    #[test]
    fn mutable_reference_is_output() {
        let ty = TypeRef::new("Vector3", TypeCategory::Struct)
            .with_flags(TypeFlags::SRC_REF | TypeFlags::OUTPUT);
        assert_eq!(ty.ownership(), OwnershipKind::MutRef);
    }

    #[test]
    fn getter_and_setter_shapes_agree() {
        let getter = TypeRef::new("ComplexStruct", TypeCategory::Struct);
        let setter =
            TypeRef::new("ComplexStruct", TypeCategory::Struct).with_flags(TypeFlags::SRC_REF);
        assert!(getter.same_script_type(&setter));

        let array = getter.clone().with_flags(TypeFlags::ARRAY);
        assert!(!array.same_script_type(&setter));
    }

    #[test]
    fn display_spells_wrappers() {
        let ty = TypeRef::new("Mesh", TypeCategory::Resource)
            .with_flags(TypeFlags::ARRAY | TypeFlags::SRC_RESOURCE_HANDLE);
        assert_eq!(ty.to_string(), "Vector<ResourceHandle<Mesh>>");
        assert_eq!(ty.element().to_string(), "ResourceHandle<Mesh>");
    }
}
