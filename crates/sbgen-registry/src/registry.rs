//! The single context value threaded through every phase.
//!
//! # Storage Model
//!
//! - **Types**: [`TypeMap`] of every exported user type, filled by the
//!   registration pass before any record is built.
//! - **File groups**: records grouped by output file, in first-seen order.
//!   Emission iterates this map, so it must stay insertion ordered.
//! - **Externals**: methods waiting to be moved into their target class.
//! - **Comments**: the [`CommentIndex`] used for `@copydoc` resolution.
//! - **Base children**: direct children of every exported base class.
//!
//! Records are addressed by name, never by reference, so passes can rewrite
//! one record while reading another through a fresh lookup.

use indexmap::IndexMap;

use sbgen_core::{
    ClassInfo, Diagnostics, EnumInfo, FileGroup, GeneratorConfig, MethodInfo, StructInfo,
};

use crate::{CommentIndex, TypeMap};

/// An external method or constructor waiting for its target class.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingExternal {
    pub method: MethodInfo,
    /// Declared under an editor-only annotation.
    pub editor: bool,
    /// Header declaring the external function.
    pub header: String,
    /// Qualified native name of the function, used in diagnostics.
    pub subject: String,
}

/// Everything collected about one generator run.
#[derive(Debug, Default)]
pub struct Registry {
    pub config: GeneratorConfig,
    pub types: TypeMap,
    pub file_groups: IndexMap<String, FileGroup>,
    /// Target class name -> pending methods, in declaration order.
    pub externals: IndexMap<String, Vec<PendingExternal>>,
    pub comments: CommentIndex,
    /// Base class name -> direct children, in declaration order.
    pub base_children: IndexMap<String, Vec<String>>,
    pub diagnostics: Diagnostics,
}

impl Registry {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ==========================================================================
    // File groups
    // ==========================================================================

    /// The file group called `name`, created on first use.
    pub fn file_group_mut(&mut self, name: &str, editor: bool) -> &mut FileGroup {
        let group = self
            .file_groups
            .entry(name.to_string())
            .or_insert_with(|| {
                let mut group = FileGroup::new(name);
                group.in_editor = editor;
                group
            });
        group
    }

    pub fn file_group(&self, name: &str) -> Option<&FileGroup> {
        self.file_groups.get(name)
    }

    // ==========================================================================
    // Record lookup
    // ==========================================================================

    /// Name of the file group holding the record for `source_name`.
    fn group_of(&self, source_name: &str) -> Option<&str> {
        self.types.get(source_name).map(|t| t.file_group.as_str())
    }

    pub fn find_class(&self, source_name: &str) -> Option<&ClassInfo> {
        let group = self.group_of(source_name)?;
        self.file_groups.get(group)?.find_class(source_name)
    }

    pub fn find_class_mut(&mut self, source_name: &str) -> Option<&mut ClassInfo> {
        let group = self.group_of(source_name)?.to_string();
        self.file_groups.get_mut(&group)?.find_class_mut(source_name)
    }

    pub fn find_struct(&self, source_name: &str) -> Option<&StructInfo> {
        let group = self.group_of(source_name)?;
        self.file_groups.get(group)?.find_struct(source_name)
    }

    pub fn find_enum(&self, source_name: &str) -> Option<&EnumInfo> {
        let group = self.group_of(source_name)?;
        self.file_groups.get(group)?.find_enum(source_name)
    }

    /// Every class, in file-group then declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.file_groups.values().flat_map(|g| g.classes.iter())
    }

    pub fn structs(&self) -> impl Iterator<Item = &StructInfo> {
        self.file_groups.values().flat_map(|g| g.structs.iter())
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumInfo> {
        self.file_groups.values().flat_map(|g| g.enums.iter())
    }

    // ==========================================================================
    // Inheritance
    // ==========================================================================

    pub fn add_child(&mut self, base: &str, child: &str) {
        let children = self.base_children.entry(base.to_string()).or_default();
        if !children.iter().any(|c| c == child) {
            children.push(child.to_string());
        }
    }

    /// Every exported class deriving from `base`, directly or not, in
    /// depth-first declaration order.
    pub fn transitive_children(&self, base: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<&str> = vec![base];
        while let Some(current) = stack.pop() {
            if current != base {
                if out.iter().any(|c| c == current) {
                    continue;
                }
                out.push(current.to_string());
            }
            let Some(children) = self.base_children.get(current) else {
                continue;
            };
            // Reverse so the first child is visited first.
            for child in children.iter().rev() {
                if child != base && !out.contains(child) {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// Check whether `source_name` is registered as an editor-only type.
    pub fn is_editor_type(&self, source_name: &str) -> bool {
        self.types.get(source_name).is_some_and(|t| t.editor)
    }
}

#[cfg(test)]
mod tests {
    use sbgen_core::TypeCategory;

    use super::*;
    use crate::UserType;

    fn register_class(registry: &mut Registry, name: &str, group: &str) {
        let mut ty = UserType::new(name, TypeCategory::Class);
        ty.file_group = group.into();
        registry.types.insert(ty).unwrap();
        registry
            .file_group_mut(group, false)
            .classes
            .push(ClassInfo::new(name, TypeCategory::Class));
    }

    #[test]
    fn file_groups_keep_insertion_order() {
        let mut registry = Registry::default();
        registry.file_group_mut("Zeta", false);
        registry.file_group_mut("Alpha", true);
        registry.file_group_mut("Zeta", true);
        let names: Vec<_> = registry.file_groups.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
        assert!(!registry.file_groups["Zeta"].in_editor);
    }

    #[test]
    fn finds_records_through_type_map() {
        let mut registry = Registry::default();
        register_class(&mut registry, "Light", "Lights");
        assert!(registry.find_class("Light").is_some());
        registry.find_class_mut("Light").unwrap().clean_name = "LightBase".into();
        assert_eq!(registry.find_class("Light").unwrap().clean_name, "LightBase");
        assert!(registry.find_class("Camera").is_none());
    }

    #[test]
    fn transitive_children_are_depth_first() {
        let mut registry = Registry::default();
        registry.add_child("Base", "A");
        registry.add_child("Base", "B");
        registry.add_child("A", "A1");
        registry.add_child("Base", "A");
        assert_eq!(registry.transitive_children("Base"), ["A", "A1", "B"]);
        assert!(registry.transitive_children("B").is_empty());
    }
}
