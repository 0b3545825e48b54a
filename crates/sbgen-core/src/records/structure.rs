//! Plain struct records.

use crate::{Comment, FieldInfo, ParamInfo, TypeRef, Visibility};

/// A non-copy constructor of a plain struct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructCtorInfo {
    pub params: Vec<ParamInfo>,
    /// `(field, parameter)` pairs assigned by the constructor.
    pub field_assignments: Vec<(String, String)>,
    pub documentation: Comment,
}

impl StructCtorInfo {
    /// The parameter assigned to `field`, if any.
    pub fn param_for_field(&self, field: &str) -> Option<&str> {
        self.field_assignments
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, p)| p.as_str())
    }

    pub fn is_parameterless(&self) -> bool {
        self.params.is_empty()
    }
}

/// An exported plain struct.
#[derive(Debug, Clone, PartialEq)]
pub struct StructInfo {
    pub source_name: String,
    pub script_name: String,
    pub visibility: Visibility,
    pub namespaces: Vec<String>,
    /// Fields in declaration order, inherited fields first.
    pub fields: Vec<FieldInfo>,
    pub ctors: Vec<StructCtorInfo>,
    /// True iff a field cannot be copied verbatim across the boundary.
    pub requires_interop: bool,
    /// Name of the interop companion struct.
    pub interop_name: String,
    /// Exported plain struct this one derives from.
    pub base_struct: Option<String>,
    pub module: Option<String>,
    pub documentation: Comment,
    pub header: String,
    pub editor: bool,
}

impl StructInfo {
    pub fn new(source_name: impl Into<String>) -> Self {
        let name = source_name.into();
        Self {
            interop_name: format!("__{name}Interop"),
            script_name: name.clone(),
            source_name: name,
            visibility: Visibility::Public,
            namespaces: Vec::new(),
            fields: Vec::new(),
            ctors: Vec::new(),
            requires_interop: false,
            base_struct: None,
            module: None,
            documentation: Comment::default(),
            header: String::new(),
            editor: false,
        }
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Constructors with at least one parameter; the parameterless form is
    /// surfaced as a `Default()` factory instead.
    pub fn parameterized_ctors(&self) -> impl Iterator<Item = &StructCtorInfo> {
        self.ctors.iter().filter(|c| !c.is_parameterless())
    }

    pub fn for_each_type_ref_mut(&mut self, f: &mut impl FnMut(&mut TypeRef)) {
        for field in &mut self.fields {
            f(&mut field.ty);
        }
        for ctor in &mut self.ctors {
            for param in &mut ctor.params {
                f(&mut param.ty);
            }
        }
    }

    pub fn for_each_type_ref(&self, f: &mut impl FnMut(&TypeRef)) {
        for field in &self.fields {
            f(&field.ty);
        }
        for ctor in &self.ctors {
            for param in &ctor.params {
                f(&param.ty);
            }
        }
    }
}
