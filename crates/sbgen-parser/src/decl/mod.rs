//! Declaration dump model and the frontend contract.
//!
//! The generator does not parse C++ itself. A frontend (any AST tool) dumps
//! the declarations it saw into the [`TranslationUnit`] model, either in
//! memory or as JSON, and the passes consume it through [`DeclSource`].

mod error;
mod model;
mod source;

pub use error::FrontendError;
pub use model::{
    Access, ConstValue, ConstructorDecl, Decl, EnumConstantDecl, EnumDecl, Expr, ExprKind,
    FieldDecl, FieldInit, FunctionDecl, MethodDecl, NamespaceDecl, ParamDecl, RecordDecl,
};
pub use source::{DeclSource, DeclVisitor, Scoped, TranslationUnit};
