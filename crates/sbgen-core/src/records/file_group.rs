//! Output file groups.

use std::collections::BTreeSet;

use bitflags::bitflags;

use crate::{ClassInfo, EnumInfo, StructInfo, TypeRef};

bitflags! {
    /// Support headers a file group's native source depends on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SupportHeaders: u32 {
        const RESOURCE_MANAGER = 1 << 0;
        const ASYNC_OP = 1 << 1;
        const RTTI = 1 << 2;
        const GAME_OBJECT_MANAGER = 1 << 3;
    }
}

/// Name of the generated native header of file group `group`.
pub fn native_header_name(group: &str) -> String {
    format!("BsScript{group}.generated.h")
}

/// Records emitted into one set of output files.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileGroup {
    pub name: String,
    pub classes: Vec<ClassInfo>,
    pub structs: Vec<StructInfo>,
    pub enums: Vec<EnumInfo>,
    pub forward_declarations: BTreeSet<String>,
    pub header_includes: BTreeSet<String>,
    pub source_includes: BTreeSet<String>,
    pub support: SupportHeaders,
    pub in_editor: bool,
}

impl FileGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.structs.is_empty() && self.enums.is_empty()
    }

    /// Name of the generated native header, also used as an include path.
    pub fn native_header_name(&self) -> String {
        native_header_name(&self.name)
    }

    pub fn native_source_name(&self) -> String {
        format!("BsScript{}.generated.cpp", self.name)
    }

    pub fn managed_file_name(&self) -> String {
        format!("{}.generated.cs", self.name)
    }

    pub fn find_class(&self, source_name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.is_named(source_name))
    }

    pub fn find_class_mut(&mut self, source_name: &str) -> Option<&mut ClassInfo> {
        self.classes.iter_mut().find(|c| c.is_named(source_name))
    }

    pub fn find_struct(&self, source_name: &str) -> Option<&StructInfo> {
        self.structs.iter().find(|s| s.source_name == source_name)
    }

    pub fn find_enum(&self, source_name: &str) -> Option<&EnumInfo> {
        self.enums.iter().find(|e| e.source_name == source_name)
    }

    /// Visit every typed position of every record mutably.
    pub fn for_each_type_ref_mut(&mut self, f: &mut impl FnMut(&mut TypeRef)) {
        for class in &mut self.classes {
            class.for_each_type_ref_mut(f);
        }
        for info in &mut self.structs {
            info.for_each_type_ref_mut(f);
        }
    }

    /// Visit every typed position of every record.
    pub fn for_each_type_ref(&self, f: &mut impl FnMut(&TypeRef)) {
        for class in &self.classes {
            class.for_each_type_ref(f);
        }
        for info in &self.structs {
            info.for_each_type_ref(f);
        }
    }
}
