//! Declaration tree handed over by the frontend.
//!
//! Every type is spelled as in source (`const Vector<HMesh>&`); expressions
//! carry both their text and, when the frontend could evaluate them, a
//! constant value.

use serde::{Deserialize, Serialize};

/// Member access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

/// A constant the frontend evaluated an expression to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

/// Shape of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprKind {
    /// Numeric or boolean literal; `value` is set.
    Literal,
    /// String literal; `text` holds the contents without quotes.
    String,
    /// `nullptr`.
    Null,
    /// Reference to a constructor parameter named by `text`.
    ParamRef,
    /// `T(args...)`, `T{args...}` or `T()`; `ty` names `T`.
    Construct,
    /// Qualified constant such as `Color::White` or `Vector3::ZERO`.
    Member,
    /// `(T)expr` or `static_cast<T>(expr)`; `ty` names `T`, `args[0]` is the operand.
    Cast,
    #[default]
    Other,
}

/// An expression used as a default argument or member initializer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Expr {
    pub text: String,
    #[serde(default)]
    pub kind: ExprKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConstValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Self {
            text: value.to_string(),
            kind: ExprKind::Literal,
            value: Some(ConstValue::Int(value)),
            ..Self::default()
        }
    }

    pub fn float(value: f64) -> Self {
        Self {
            text: format!("{value:?}f"),
            kind: ExprKind::Literal,
            value: Some(ConstValue::Float(value)),
            ..Self::default()
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            text: value.to_string(),
            kind: ExprKind::Literal,
            value: Some(ConstValue::Bool(value)),
            ..Self::default()
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ExprKind::String,
            ..Self::default()
        }
    }

    pub fn null() -> Self {
        Self {
            text: "nullptr".into(),
            kind: ExprKind::Null,
            ..Self::default()
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self {
            text: name.into(),
            kind: ExprKind::ParamRef,
            ..Self::default()
        }
    }

    pub fn construct(ty: impl Into<String>, args: Vec<Expr>) -> Self {
        let ty = ty.into();
        Self {
            text: format!("{ty}(...)"),
            kind: ExprKind::Construct,
            ty: Some(ty),
            args,
            ..Self::default()
        }
    }

    pub fn member(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ExprKind::Member,
            ..Self::default()
        }
    }

    pub fn cast(ty: impl Into<String>, operand: Expr) -> Self {
        let ty = ty.into();
        Self {
            text: format!("({ty}){}", operand.text),
            kind: ExprKind::Cast,
            value: operand.value,
            ty: Some(ty),
            args: vec![operand],
        }
    }
}

/// A top-level or namespace-scoped declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
    Namespace(NamespaceDecl),
    Record(RecordDecl),
    Enum(EnumDecl),
    Function(FunctionDecl),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

/// A class or struct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordDecl {
    pub name: String,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    /// Header declaring the record.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub is_struct: bool,
    /// Arguments of a template instantiation.
    #[serde(default)]
    pub template_args: Vec<String>,
    /// Direct bases, spelled as in source.
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,
}

impl RecordDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, ctor: ConstructorDecl) -> Self {
        self.constructors.push(ctor);
        self
    }

    pub fn as_struct(mut self) -> Self {
        self.is_struct = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: String,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub is_static: bool,
    /// In-class initializer.
    #[serde(default)]
    pub init: Option<Expr>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Self::default()
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_init(mut self, init: Expr) -> Self {
        self.init = Some(init);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: String,
    #[serde(default)]
    pub default: Option<Expr>,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
        self
    }
}

fn void_type() -> String {
    "void".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default = "void_type")]
    pub return_type: String,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            doc: None,
            access: Access::Public,
            is_static: false,
            is_const: false,
            return_type: void_type(),
            params: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn with_return(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// `field = expr` from a member initializer list or a constructor body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldInit {
    pub field: String,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    /// Member initializer list.
    #[serde(default)]
    pub initializers: Vec<FieldInit>,
    /// Assignments in the constructor body. Only inspected for plain structs.
    #[serde(default)]
    pub assignments: Vec<FieldInit>,
    #[serde(default)]
    pub is_copy: bool,
}

impl ConstructorDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_initializer(mut self, field: impl Into<String>, expr: Expr) -> Self {
        self.initializers.push(FieldInit {
            field: field.into(),
            expr,
        });
        self
    }

    pub fn with_assignment(mut self, field: impl Into<String>, expr: Expr) -> Self {
        self.assignments.push(FieldInit {
            field: field.into(),
            expr,
        });
        self
    }
}

/// A free function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub file: String,
    #[serde(default = "void_type")]
    pub return_type: String,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            doc: None,
            file: String::new(),
            return_type: void_type(),
            params: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_return(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnumConstantDecl {
    pub name: String,
    /// Evaluated value.
    pub value: i64,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
}

impl EnumConstantDecl {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            ..Self::default()
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub file: String,
    /// Explicit underlying type, if any.
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default)]
    pub entries: Vec<EnumConstantDecl>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_underlying(mut self, ty: impl Into<String>) -> Self {
        self.underlying = Some(ty.into());
        self
    }

    pub fn with_entry(mut self, entry: EnumConstantDecl) -> Self {
        self.entries.push(entry);
        self
    }
}
