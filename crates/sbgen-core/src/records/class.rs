//! Class records and their derived properties.

use crate::{ClassFlags, Comment, MethodFlags, MethodInfo, Style, TypeCategory, TypeRef, Visibility};

/// A data member of a plain struct, or an exported member of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    pub ty: TypeRef,
    /// Managed literal of the default value.
    pub default_value: Option<String>,
    pub default_value_type: Option<String>,
    pub documentation: Comment,
    pub style: Style,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
            default_value_type: None,
            documentation: Comment::default(),
            style: Style::default(),
        }
    }

    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.default_value = Some(literal.into());
        self
    }
}

/// A property synthesized from a getter/setter pair.
///
/// Getter and setter are referenced by interop name.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    pub name: String,
    pub ty: TypeRef,
    pub getter: Option<String>,
    pub setter: Option<String>,
    pub is_static: bool,
    pub visibility: Visibility,
    pub documentation: Comment,
    pub style: Style,
}

/// An exported class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    pub source_name: String,
    /// Managed-side name.
    pub clean_name: String,
    pub visibility: Visibility,
    pub flags: ClassFlags,
    pub category: TypeCategory,
    pub namespaces: Vec<String>,
    pub template_params: Vec<String>,
    /// Closest exported base class.
    pub base_class: Option<String>,
    pub ctors: Vec<MethodInfo>,
    pub methods: Vec<MethodInfo>,
    pub events: Vec<MethodInfo>,
    pub fields: Vec<FieldInfo>,
    pub properties: Vec<PropertyInfo>,
    pub module: Option<String>,
    pub documentation: Comment,
    /// Header declaring the class.
    pub header: String,
    /// Set by `in:true`: only native hooks and interop declarations.
    pub interop_only: bool,
}

impl ClassInfo {
    pub fn new(source_name: impl Into<String>, category: TypeCategory) -> Self {
        let name = source_name.into();
        Self {
            clean_name: name.clone(),
            source_name: name,
            visibility: Visibility::Public,
            flags: ClassFlags::empty(),
            category,
            namespaces: Vec::new(),
            template_params: Vec::new(),
            base_class: None,
            ctors: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            module: None,
            documentation: Comment::default(),
            header: String::new(),
            interop_only: false,
        }
    }

    // === Query Methods ===

    pub fn is_base(&self) -> bool {
        self.flags.contains(ClassFlags::IS_BASE)
    }

    pub fn is_module(&self) -> bool {
        self.flags.contains(ClassFlags::IS_MODULE)
    }

    pub fn is_editor(&self) -> bool {
        self.flags.contains(ClassFlags::EDITOR)
    }

    /// Native type name, including template arguments.
    pub fn native_type_name(&self) -> String {
        if self.template_params.is_empty() {
            self.source_name.clone()
        } else {
            format!("{}<{}>", self.source_name, self.template_params.join(", "))
        }
    }

    /// Check whether `name` is this class's type map key: the source name,
    /// with template arguments for instantiations.
    pub fn is_named(&self, name: &str) -> bool {
        if self.template_params.is_empty() {
            self.source_name == name
        } else {
            name.starts_with(self.source_name.as_str()) && self.native_type_name() == name
        }
    }

    /// Find a method (or constructor, or event) by interop name.
    pub fn find_by_interop_name(&self, interop_name: &str) -> Option<&MethodInfo> {
        self.ctors
            .iter()
            .chain(self.methods.iter())
            .chain(self.events.iter())
            .find(|m| m.interop_name == interop_name)
    }

    pub fn has_static_events(&self) -> bool {
        self.events
            .iter()
            .any(|e| e.flags.contains(MethodFlags::STATIC))
    }

    /// Arity of the bool-only signature used by the runtime-only managed
    /// constructor: the smallest arity not already taken by a constructor
    /// whose parameters are all `bool`.
    pub fn runtime_ctor_arity(&self) -> usize {
        let mut arity = 1;
        while self.ctors.iter().any(|ctor| {
            ctor.params.len() == arity
                && ctor.params.iter().all(|p| {
                    p.ty.builtin == Some(crate::BuiltinKind::Bool) && !p.ty.is_array()
                })
        }) {
            arity += 1;
        }
        arity
    }

    /// Visit every typed position mutably.
    pub fn for_each_type_ref_mut(&mut self, f: &mut impl FnMut(&mut TypeRef)) {
        for method in self
            .ctors
            .iter_mut()
            .chain(self.methods.iter_mut())
            .chain(self.events.iter_mut())
        {
            method.for_each_type_ref_mut(f);
        }
        for field in &mut self.fields {
            f(&mut field.ty);
        }
        for property in &mut self.properties {
            f(&mut property.ty);
        }
    }

    /// Visit every typed position.
    pub fn for_each_type_ref(&self, f: &mut impl FnMut(&TypeRef)) {
        for method in self
            .ctors
            .iter()
            .chain(self.methods.iter())
            .chain(self.events.iter())
        {
            method.for_each_type_ref(f);
        }
        for field in &self.fields {
            f(&field.ty);
        }
        for property in &self.properties {
            f(&property.ty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuiltinKind, ParamInfo};

    fn bool_ctor(arity: usize) -> MethodInfo {
        let mut ctor = MethodInfo::new("Widget").with_flags(MethodFlags::CONSTRUCTOR);
        for i in 0..arity {
            ctor = ctor.with_param(ParamInfo::new(
                format!("p{i}"),
                TypeRef::builtin(BuiltinKind::Bool),
            ));
        }
        ctor
    }

    #[test]
    fn runtime_ctor_arity_skips_taken_signatures() {
        let mut class = ClassInfo::new("Widget", TypeCategory::Class);
        assert_eq!(class.runtime_ctor_arity(), 1);

        class.ctors.push(bool_ctor(1));
        assert_eq!(class.runtime_ctor_arity(), 2);

        class.ctors.push(bool_ctor(2));
        assert_eq!(class.runtime_ctor_arity(), 3);
    }

    #[test]
    fn native_type_name_includes_template_args() {
        let mut class = ClassInfo::new("TAnimationCurve", TypeCategory::Class);
        class.template_params = vec!["float".into()];
        assert_eq!(class.native_type_name(), "TAnimationCurve<float>");
        assert!(class.is_named("TAnimationCurve<float>"));
        assert!(!class.is_named("TAnimationCurve"));
    }

    #[test]
    fn finds_members_by_interop_name() {
        let mut class = ClassInfo::new("Widget", TypeCategory::Class);
        let mut method = MethodInfo::new("resize");
        method.interop_name = "resize0".into();
        class.methods.push(method);
        assert!(class.find_by_interop_name("resize0").is_some());
        assert!(class.find_by_interop_name("resize").is_none());
    }
}
