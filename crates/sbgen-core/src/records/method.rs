//! Method, parameter and return records.

use crate::{Comment, MethodFlags, Style, TypeRef, Visibility};

/// A parameter of an exported method or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    pub name: String,
    pub ty: TypeRef,
    /// Managed-side literal for the default argument.
    pub default_value: Option<String>,
    /// Set when the default needs a constructor or cast call, naming the
    /// constructed type. Such defaults cannot be expressed as managed
    /// optional arguments.
    pub default_value_type: Option<String>,
}

impl ParamInfo {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
            default_value_type: None,
        }
    }

    /// Attach a simple (literal) default.
    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.default_value = Some(literal.into());
        self
    }

    /// Attach a default that requires constructing `ty`.
    pub fn with_constructed_default(
        mut self,
        literal: impl Into<String>,
        ty: impl Into<String>,
    ) -> Self {
        self.default_value = Some(literal.into());
        self.default_value_type = Some(ty.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// A default that needs a constructor or cast call.
    pub fn has_complex_default(&self) -> bool {
        self.default_value.is_some() && self.default_value_type.is_some()
    }
}

/// The return position of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnInfo {
    pub ty: TypeRef,
}

impl ReturnInfo {
    pub fn void() -> Self {
        Self { ty: TypeRef::void() }
    }

    pub fn is_void(&self) -> bool {
        self.ty.is_void()
    }
}

impl Default for ReturnInfo {
    fn default() -> Self {
        Self::void()
    }
}

/// An exported method, constructor, event or field accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    /// Native name (member name, or the field name for field wrappers).
    pub source_name: String,
    /// Name of the native hook; unique within the owning class once
    /// post-processing has run.
    pub interop_name: String,
    /// Managed-side name.
    pub script_name: String,
    pub visibility: Visibility,
    pub flags: MethodFlags,
    pub ret: ReturnInfo,
    pub params: Vec<ParamInfo>,
    /// Scope an external function is called through: its container class,
    /// or the namespace of a free function.
    pub external_class: Option<String>,
    /// Type of the object parameter stripped from an external method.
    pub external_this: Option<TypeRef>,
    pub documentation: Comment,
    pub style: Style,
    /// Arguments dropped from a managed-only overload, passed through with
    /// their default values.
    pub implicit_args: Vec<ParamInfo>,
    /// Interop name of the method a managed-only overload forwards to.
    pub forwards_to: Option<String>,
}

impl MethodInfo {
    /// Create a method whose interop and script names equal its source name.
    pub fn new(source_name: impl Into<String>) -> Self {
        let name = source_name.into();
        Self {
            interop_name: name.clone(),
            script_name: name.clone(),
            source_name: name,
            visibility: Visibility::Public,
            flags: MethodFlags::empty(),
            ret: ReturnInfo::void(),
            params: Vec::new(),
            external_class: None,
            external_this: None,
            documentation: Comment::default(),
            style: Style::default(),
            implicit_args: Vec::new(),
            forwards_to: None,
        }
    }

    // === Builder Methods ===

    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_return(mut self, ty: TypeRef) -> Self {
        self.ret = ReturnInfo { ty };
        self
    }

    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_script_name(mut self, name: impl Into<String>) -> Self {
        self.script_name = name.into();
        self
    }

    // === Query Methods ===

    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    pub fn is_constructor(&self) -> bool {
        self.flags.contains(MethodFlags::CONSTRUCTOR)
    }

    pub fn is_external(&self) -> bool {
        self.flags.contains(MethodFlags::EXTERNAL)
    }

    pub fn is_property(&self) -> bool {
        self.flags
            .intersects(MethodFlags::PROPERTY_GETTER | MethodFlags::PROPERTY_SETTER)
    }

    pub fn is_cs_only(&self) -> bool {
        self.flags.contains(MethodFlags::CS_ONLY)
    }

    pub fn is_interop_only(&self) -> bool {
        self.flags.contains(MethodFlags::INTEROP_ONLY)
    }

    /// Visit every typed position mutably.
    pub fn for_each_type_ref_mut(&mut self, f: &mut impl FnMut(&mut TypeRef)) {
        f(&mut self.ret.ty);
        for param in self.params.iter_mut().chain(self.implicit_args.iter_mut()) {
            f(&mut param.ty);
        }
        if let Some(ty) = &mut self.external_this {
            f(ty);
        }
    }

    /// Visit every typed position.
    pub fn for_each_type_ref(&self, f: &mut impl FnMut(&TypeRef)) {
        f(&self.ret.ty);
        for param in self.params.iter().chain(self.implicit_args.iter()) {
            f(&param.ty);
        }
        if let Some(ty) = &self.external_this {
            f(ty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuiltinKind, TypeCategory};

    #[test]
    fn new_method_uses_source_name_everywhere() {
        let method = MethodInfo::new("getSize");
        assert_eq!(method.interop_name, "getSize");
        assert_eq!(method.script_name, "getSize");
        assert!(method.ret.is_void());
    }

    #[test]
    fn complex_default_requires_type() {
        let simple = ParamInfo::new("count", TypeRef::builtin(BuiltinKind::Int32)).with_default("1");
        let complex = ParamInfo::new("tint", TypeRef::new("Color", TypeCategory::Struct))
            .with_constructed_default("new Color(1, 1, 1)", "Color");
        assert!(simple.has_default());
        assert!(!simple.has_complex_default());
        assert!(complex.has_complex_default());
    }

    #[test]
    fn visits_return_and_params() {
        let mut method = MethodInfo::new("blend")
            .with_return(TypeRef::builtin(BuiltinKind::Float))
            .with_param(ParamInfo::new("a", TypeRef::builtin(BuiltinKind::Float)))
            .with_param(ParamInfo::new("b", TypeRef::builtin(BuiltinKind::Float)));
        let mut count = 0;
        method.for_each_type_ref_mut(&mut |_| count += 1);
        assert_eq!(count, 3);
    }
}
