//! The frontend contract.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Decl, EnumDecl, FrontendError, FunctionDecl, RecordDecl};

/// A declaration together with its enclosing namespaces.
#[derive(Debug)]
pub struct Scoped<'a, T> {
    pub namespaces: &'a [String],
    pub decl: &'a T,
}

impl<T> Clone for Scoped<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Scoped<'_, T> {}

impl<T> Scoped<'_, T> {
    /// Namespaces joined with `::`, followed by `name`.
    pub fn qualify(&self, name: &str) -> String {
        if self.namespaces.is_empty() {
            name.to_string()
        } else {
            format!("{}::{}", self.namespaces.join("::"), name)
        }
    }
}

/// A visitor over the declarations of one frontend run.
pub trait DeclVisitor {
    fn visit_record(&mut self, _record: Scoped<'_, RecordDecl>) {}
    fn visit_enum(&mut self, _decl: Scoped<'_, EnumDecl>) {}
    fn visit_function(&mut self, _decl: Scoped<'_, FunctionDecl>) {}
}

/// Source of declarations.
///
/// Implementations expose the top-level declaration list; walking and
/// record lookup are provided on top of it.
pub trait DeclSource {
    fn declarations(&self) -> &[Decl];

    /// Visit every record, enum and function, with namespaces entered in
    /// declaration order.
    fn walk(&self, visitor: &mut dyn DeclVisitor) {
        let mut scope = Vec::new();
        walk_decls(self.declarations(), &mut scope, visitor);
    }

    /// Find a record by fully-qualified name. Template arguments and a
    /// leading `::` are ignored.
    fn find_record(&self, qualified_name: &str) -> Option<(Vec<String>, &RecordDecl)> {
        let name = qualified_name.split('<').next().unwrap_or(qualified_name);
        let mut path: Vec<&str> = name
            .split("::")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let target = path.pop()?;
        find_in(self.declarations(), &path, target, Vec::new())
    }
}

fn walk_decls(decls: &[Decl], scope: &mut Vec<String>, visitor: &mut dyn DeclVisitor) {
    for decl in decls {
        match decl {
            Decl::Namespace(ns) => {
                scope.push(ns.name.clone());
                walk_decls(&ns.decls, scope, visitor);
                scope.pop();
            }
            Decl::Record(record) => visitor.visit_record(Scoped {
                namespaces: scope.as_slice(),
                decl: record,
            }),
            Decl::Enum(decl) => visitor.visit_enum(Scoped {
                namespaces: scope.as_slice(),
                decl,
            }),
            Decl::Function(decl) => visitor.visit_function(Scoped {
                namespaces: scope.as_slice(),
                decl,
            }),
        }
    }
}

fn find_in<'a>(
    decls: &'a [Decl],
    path: &[&str],
    target: &str,
    mut scope: Vec<String>,
) -> Option<(Vec<String>, &'a RecordDecl)> {
    match path.split_first() {
        None => decls.iter().find_map(|decl| match decl {
            Decl::Record(record) if record.name == target => Some((scope.clone(), record)),
            _ => None,
        }),
        Some((head, rest)) => {
            scope.push((*head).to_string());
            // Namespaces may be reopened, so every matching block is searched.
            decls.iter().find_map(|decl| match decl {
                Decl::Namespace(ns) if ns.name == *head => {
                    find_in(&ns.decls, rest, target, scope.clone())
                }
                _ => None,
            })
        }
    }
}

/// A declaration dump produced by the frontend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslationUnit {
    #[serde(default)]
    pub decls: Vec<Decl>,
}

impl TranslationUnit {
    pub fn new(decls: Vec<Decl>) -> Self {
        Self { decls }
    }

    /// Parse a JSON declaration dump.
    pub fn from_json(json: &str) -> Result<Self, FrontendError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON declaration dump from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, FrontendError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FrontendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, FrontendError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl DeclSource for TranslationUnit {
    fn declarations(&self) -> &[Decl] {
        &self.decls
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::decl::{ConstValue, ExprKind, NamespaceDecl};

    fn unit() -> TranslationUnit {
        TranslationUnit::new(vec![Decl::Namespace(NamespaceDecl {
            name: "bs".into(),
            decls: vec![
                Decl::Record(RecordDecl::new("Resource")),
                Decl::Record(RecordDecl::new("Mesh").with_base("Resource")),
            ],
        })])
    }

    #[derive(Default)]
    struct Names(Vec<String>);

    impl DeclVisitor for Names {
        fn visit_record(&mut self, record: Scoped<'_, RecordDecl>) {
            self.0.push(record.qualify(&record.decl.name));
        }
    }

    #[test]
    fn walk_reports_qualified_names() {
        let mut names = Names::default();
        unit().walk(&mut names);
        assert_eq!(names.0, ["bs::Resource", "bs::Mesh"]);
    }

    #[test]
    fn find_record_by_qualified_name() {
        let unit = unit();
        let (scope, record) = unit.find_record("::bs::Mesh").unwrap();
        assert_eq!(scope, ["bs"]);
        assert_eq!(record.bases, ["Resource"]);
        assert!(unit.find_record("Mesh").is_none());
        assert!(unit.find_record("bs::Texture").is_none());
    }

    #[test]
    fn parses_json_dump() {
        let json = r#"{
            "decls": [
                { "kind": "enum", "name": "E", "annotation": "se,pl:true,f:F",
                  "entries": [ { "name": "A", "value": 5 } ] },
                { "kind": "record", "name": "S", "is_struct": true,
                  "fields": [ { "name": "c", "ty": "float",
                                "init": { "text": "10.0f", "kind": "literal", "value": 10.0 } } ] }
            ]
        }"#;
        let unit = TranslationUnit::from_json(json).unwrap();
        assert_eq!(unit.decls.len(), 2);
        let Decl::Record(record) = &unit.decls[1] else {
            panic!("expected record");
        };
        let init = record.fields[0].init.as_ref().unwrap();
        assert_eq!(init.kind, ExprKind::Literal);
        assert_eq!(init.value, Some(ConstValue::Float(10.0)));
    }

    #[test]
    fn load_json_reports_missing_files_and_bad_json() {
        let err = TranslationUnit::load_json("/nonexistent/decls.json").unwrap_err();
        assert!(matches!(err, FrontendError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ \"decls\": [ { \"kind\": \"bogus\" } ] }").unwrap();
        let err = TranslationUnit::load_json(file.path()).unwrap_err();
        assert!(matches!(err, FrontendError::Json(_)));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let unit = unit();
        let json = unit.to_json().unwrap();
        assert_eq!(TranslationUnit::from_json(&json).unwrap(), unit);
    }
}
