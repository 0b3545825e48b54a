//! Registered user types.

use rustc_hash::FxHashMap;

use sbgen_core::{BuiltinKind, TypeCategory};

/// A user type registered before collection so that every signature can be
/// classified regardless of declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct UserType {
    /// Native name, including template arguments for instantiations.
    pub source_name: String,
    pub qualified_name: String,
    pub namespaces: Vec<String>,
    /// Managed-side name.
    pub script_name: String,
    pub category: TypeCategory,
    pub file_group: String,
    pub editor: bool,
    /// Header declaring the type.
    pub header: String,
    /// Underlying builtin of an enum.
    pub underlying: Option<BuiltinKind>,
    /// Closest exported base class.
    pub base_class: Option<String>,
    pub is_module: bool,
}

impl UserType {
    pub fn new(source_name: impl Into<String>, category: TypeCategory) -> Self {
        let source_name = source_name.into();
        Self {
            qualified_name: source_name.clone(),
            script_name: source_name.clone(),
            file_group: source_name.clone(),
            source_name,
            namespaces: Vec::new(),
            category,
            editor: false,
            header: String::new(),
            underlying: None,
            base_class: None,
            is_module: false,
        }
    }
}

/// User types keyed by native name.
///
/// Lookups use the simple name (`Mesh`), or `Name<Args>` for template
/// instantiations. Iteration order is unspecified; nothing emitted depends
/// on it.
#[derive(Debug, Default, Clone)]
pub struct TypeMap {
    types: FxHashMap<String, UserType>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. Returns the earlier registration if the name was
    /// already taken, leaving it in place.
    pub fn insert(&mut self, ty: UserType) -> Result<(), &UserType> {
        if self.types.contains_key(&ty.source_name) {
            return Err(&self.types[&ty.source_name]);
        }
        self.types.insert(ty.source_name.clone(), ty);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&UserType> {
        self.types.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut UserType> {
        self.types.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn category_of(&self, name: &str) -> Option<TypeCategory> {
        self.types.get(name).map(|t| t.category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut map = TypeMap::new();
        let mut first = UserType::new("Mesh", TypeCategory::Resource);
        first.file_group = "Mesh".into();
        map.insert(first).unwrap();

        let mut second = UserType::new("Mesh", TypeCategory::Class);
        second.file_group = "Other".into();
        let existing = map.insert(second).unwrap_err();
        assert_eq!(existing.file_group, "Mesh");
        assert_eq!(map.category_of("Mesh"), Some(TypeCategory::Resource));
        assert_eq!(map.len(), 1);
    }
}
