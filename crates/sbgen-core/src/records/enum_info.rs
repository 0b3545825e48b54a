//! Enum records.

use std::collections::BTreeMap;

use crate::{BuiltinKind, Comment, Visibility};

/// A single enumerator.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntryInfo {
    pub name: String,
    pub script_name: String,
    /// Literal text of the value as emitted.
    pub value_literal: String,
    pub documentation: Comment,
}

/// An exported enumeration.
///
/// Entries are keyed by integer value, so iteration is sorted by value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumInfo {
    pub source_name: String,
    pub script_name: String,
    pub visibility: Visibility,
    pub namespaces: Vec<String>,
    pub explicit_backing_type: Option<BuiltinKind>,
    pub entries: BTreeMap<i64, EnumEntryInfo>,
    pub module: Option<String>,
    pub documentation: Comment,
    pub header: String,
    pub editor: bool,
}

impl EnumInfo {
    pub fn new(source_name: impl Into<String>) -> Self {
        let name = source_name.into();
        Self {
            script_name: name.clone(),
            source_name: name,
            visibility: Visibility::Public,
            namespaces: Vec::new(),
            explicit_backing_type: None,
            entries: BTreeMap::new(),
            module: None,
            documentation: Comment::default(),
            header: String::new(),
            editor: false,
        }
    }

    /// Add an entry unless its value is already taken.
    ///
    /// Returns `false` when the value collides with an earlier entry.
    pub fn insert_entry(&mut self, value: i64, entry: EnumEntryInfo) -> bool {
        if self.entries.contains_key(&value) {
            return false;
        }
        self.entries.insert(value, entry);
        true
    }

    /// Managed name of the entry with the given value.
    pub fn script_name_of(&self, value: i64) -> Option<&str> {
        self.entries.get(&value).map(|e| e.script_name.as_str())
    }

    /// Backing type to spell out on the managed side, if not the default.
    pub fn managed_backing_type(&self) -> Option<BuiltinKind> {
        self.explicit_backing_type
            .filter(|kind| !kind.is_default_enum_backing())
    }
}
