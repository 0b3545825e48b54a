//! Bit sets carried by type references and records.

use bitflags::bitflags;

bitflags! {
    /// Flags attached to a classified type position.
    ///
    /// Exactly one source-kind bit is set per typed position; a value-kind
    /// position has none of [`TypeFlags::SOURCE_KIND`] set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u32 {
        /// Builtin primitive.
        const BUILTIN = 1 << 0;
        /// Written back to the caller (non-const reference parameter).
        const OUTPUT = 1 << 1;
        /// `std::vector<T>`; the remaining bits describe the element.
        const ARRAY = 1 << 2;
        /// Bare pointer.
        const SRC_PTR = 1 << 3;
        /// Lvalue or rvalue reference.
        const SRC_REF = 1 << 4;
        /// `std::shared_ptr<T>`.
        const SRC_SHARED_PTR = 1 << 5;
        /// `ResourceHandle<T>`.
        const SRC_RESOURCE_HANDLE = 1 << 6;
        /// `GameObjectHandle<T>`.
        const SRC_GAME_OBJECT_HANDLE = 1 << 7;
        /// Narrow string.
        const STRING = 1 << 8;
        /// Wide string.
        const WSTRING = 1 << 9;
        /// `ScriptObjectBase*`.
        const SCRIPT_OBJECT = 1 << 10;
        /// Struct requiring an interop companion to cross the boundary.
        const COMPLEX_STRUCT = 1 << 11;
        /// Referent is a base class of other exported classes.
        const REFERENCES_BASE = 1 << 12;
        /// `Flags<E>` wrapper around an enum.
        const FLAGS_ENUM = 1 << 13;
        /// `TAsyncOp<T>`; the remaining bits describe the result.
        const ASYNC_OP = 1 << 14;

        /// All source-kind bits.
        const SOURCE_KIND = Self::SRC_PTR.bits()
            | Self::SRC_REF.bits()
            | Self::SRC_SHARED_PTR.bits()
            | Self::SRC_RESOURCE_HANDLE.bits()
            | Self::SRC_GAME_OBJECT_HANDLE.bits();

        /// Bits that change the managed-side shape of a type.
        const SCRIPT_SHAPE = Self::ARRAY.bits()
            | Self::FLAGS_ENUM.bits()
            | Self::ASYNC_OP.bits()
            | Self::STRING.bits()
            | Self::WSTRING.bits();
    }
}

bitflags! {
    /// Flags attached to a method record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodFlags: u32 {
        const STATIC = 1 << 0;
        /// Declared on a container class, attached to its target class.
        const EXTERNAL = 1 << 1;
        const CONSTRUCTOR = 1 << 2;
        const PROPERTY_GETTER = 1 << 3;
        const PROPERTY_SETTER = 1 << 4;
        /// Native hook only, no managed wrapper.
        const INTEROP_ONLY = 1 << 5;
        /// Event raised through a managed partial method.
        const CALLBACK = 1 << 6;
        /// Synthesized accessor for a public data member.
        const FIELD_WRAPPER = 1 << 7;
        /// Materialized only by the managed emitter.
        const CS_ONLY = 1 << 8;
    }
}

bitflags! {
    /// Flags attached to a class record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u32 {
        const EDITOR = 1 << 0;
        /// Some other exported class derives from this one.
        const IS_BASE = 1 << 1;
        /// Singleton accessed through a static `instance()`.
        const IS_MODULE = 1 << 2;
        const TEMPLATE_INSTANTIATION = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_mask_covers_non_value_kinds() {
        let kinds = [
            TypeFlags::SRC_PTR,
            TypeFlags::SRC_REF,
            TypeFlags::SRC_SHARED_PTR,
            TypeFlags::SRC_RESOURCE_HANDLE,
            TypeFlags::SRC_GAME_OBJECT_HANDLE,
        ];
        for kind in kinds {
            assert!(TypeFlags::SOURCE_KIND.contains(kind));
        }
        assert!(!TypeFlags::SOURCE_KIND.intersects(TypeFlags::OUTPUT | TypeFlags::ARRAY));
    }

    #[test]
    fn script_shape_ignores_ownership() {
        let by_ref = TypeFlags::SRC_REF;
        let by_value = TypeFlags::empty();
        assert_eq!(
            by_ref & TypeFlags::SCRIPT_SHAPE,
            by_value & TypeFlags::SCRIPT_SHAPE
        );
    }
}
