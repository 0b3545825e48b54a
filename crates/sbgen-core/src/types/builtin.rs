//! Builtin (primitive) types shared by both sides of the boundary.

use std::fmt;

/// Builtin type kinds.
///
/// Each kind maps to one managed primitive and one canonical native typedef.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Void,
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    WChar,
}

impl BuiltinKind {
    /// Resolve a native spelling (keyword sequence or fixed-width typedef).
    ///
    /// Multi-word spellings are expected to be joined by single spaces,
    /// e.g. `"unsigned int"`.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        let kind = match spelling {
            "void" => BuiltinKind::Void,
            "bool" => BuiltinKind::Bool,
            "char" | "signed char" | "INT8" | "int8_t" | "std::int8_t" => BuiltinKind::Int8,
            "unsigned char" | "UINT8" | "uint8_t" | "std::uint8_t" => BuiltinKind::UInt8,
            "short" | "short int" | "signed short" | "INT16" | "int16_t" | "std::int16_t" => {
                BuiltinKind::Int16
            }
            "unsigned short" | "unsigned short int" | "UINT16" | "uint16_t" | "std::uint16_t" => {
                BuiltinKind::UInt16
            }
            "int" | "signed" | "signed int" | "long" | "long int" | "INT32" | "int32_t"
            | "std::int32_t" => BuiltinKind::Int32,
            "unsigned" | "unsigned int" | "unsigned long" | "unsigned long int" | "UINT32"
            | "uint32_t" | "std::uint32_t" => BuiltinKind::UInt32,
            "long long" | "long long int" | "signed long long" | "INT64" | "int64_t"
            | "std::int64_t" => BuiltinKind::Int64,
            "unsigned long long" | "unsigned long long int" | "UINT64" | "uint64_t"
            | "std::uint64_t" | "size_t" | "std::size_t" => BuiltinKind::UInt64,
            "float" => BuiltinKind::Float,
            "double" => BuiltinKind::Double,
            "wchar_t" | "char16_t" => BuiltinKind::WChar,
            _ => return None,
        };
        Some(kind)
    }

    /// Managed primitive name.
    pub const fn managed_name(self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Int8 => "sbyte",
            BuiltinKind::UInt8 => "byte",
            BuiltinKind::Int16 => "short",
            BuiltinKind::UInt16 => "ushort",
            BuiltinKind::Int32 => "int",
            BuiltinKind::UInt32 => "uint",
            BuiltinKind::Int64 => "long",
            BuiltinKind::UInt64 => "ulong",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::WChar => "char",
        }
    }

    /// Canonical native typedef name.
    pub const fn native_name(self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Int8 => "INT8",
            BuiltinKind::UInt8 => "UINT8",
            BuiltinKind::Int16 => "INT16",
            BuiltinKind::UInt16 => "UINT16",
            BuiltinKind::Int32 => "INT32",
            BuiltinKind::UInt32 => "UINT32",
            BuiltinKind::Int64 => "INT64",
            BuiltinKind::UInt64 => "UINT64",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::WChar => "wchar_t",
        }
    }

    /// Whether values of this kind are integers.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            BuiltinKind::Int8
                | BuiltinKind::UInt8
                | BuiltinKind::Int16
                | BuiltinKind::UInt16
                | BuiltinKind::Int32
                | BuiltinKind::UInt32
                | BuiltinKind::Int64
                | BuiltinKind::UInt64
        )
    }

    /// Whether values of this kind are floating point.
    pub const fn is_floating(self) -> bool {
        matches!(self, BuiltinKind::Float | BuiltinKind::Double)
    }

    /// Managed enum backing types are only emitted when they differ from `int`.
    pub const fn is_default_enum_backing(self) -> bool {
        matches!(self, BuiltinKind::Int32)
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.native_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_keyword_and_typedef_spellings() {
        assert_eq!(BuiltinKind::from_spelling("int"), Some(BuiltinKind::Int32));
        assert_eq!(BuiltinKind::from_spelling("INT32"), Some(BuiltinKind::Int32));
        assert_eq!(
            BuiltinKind::from_spelling("unsigned int"),
            Some(BuiltinKind::UInt32)
        );
        assert_eq!(
            BuiltinKind::from_spelling("unsigned long long"),
            Some(BuiltinKind::UInt64)
        );
        assert_eq!(BuiltinKind::from_spelling("Vector3"), None);
    }

    #[test]
    fn int32_maps_to_managed_int() {
        let kind = BuiltinKind::Int32;
        assert_eq!(kind.managed_name(), "int");
        assert_eq!(kind.native_name(), "INT32");
        assert!(kind.is_integer());
        assert!(!kind.is_floating());
    }

    #[test]
    fn unsigned_byte_is_managed_byte() {
        assert_eq!(BuiltinKind::UInt8.managed_name(), "byte");
        assert_eq!(BuiltinKind::Int8.managed_name(), "sbyte");
    }
}
