//! Input-side parsing for the script binding generator.
//!
//! This crate provides:
//! - [`parse_annotation`]: export annotations into [`ExportDirective`]s
//! - [`TypeExpr`]: native type spellings (with its [`lexer`])
//! - [`parse_doc_comment`]: raw doxygen text into [`Comment`]s
//! - [`decl`]: the declaration dump model and the [`DeclSource`] trait
//!
//! # Example
//!
//! ```
//! use sbgen_core::Diagnostics;
//! use sbgen_parser::{TypeExpr, parse_annotation};
//!
//! let mut diagnostics = Diagnostics::new();
//! let directive = parse_annotation("se,f:Mesh", "Mesh", &mut diagnostics).unwrap();
//! assert_eq!(directive.file_group, "Mesh");
//!
//! let ty = TypeExpr::parse("const Vector<HMesh>&").unwrap();
//! assert_eq!(ty.name(), "Vector");
//! ```
//!
//! [`ExportDirective`]: sbgen_core::ExportDirective
//! [`Comment`]: sbgen_core::Comment

pub mod annotation;
pub mod decl;
pub mod doc;
pub mod lexer;
pub mod type_expr;

pub use annotation::{EXPORT_MARKER, parse_annotation};
pub use decl::{DeclSource, DeclVisitor, FrontendError, Scoped, TranslationUnit};
pub use doc::parse_doc_comment;
pub use type_expr::{FunctionSig, TemplateArg, TypeExpr, TypeSuffix};
