use std::fmt;

/// A `::`-separated native name split into namespace path and simple name.
///
/// Used as the lookup key of the comment index and for resolving
/// cross-references relative to an enclosing scope.
///
/// # Examples
///
/// ```
/// use sbgen_core::QualifiedName;
///
/// let mesh = QualifiedName::from_qualified_string("bs::Mesh");
/// assert_eq!(mesh.name, "Mesh");
/// assert_eq!(mesh.to_string(), "bs::Mesh");
///
/// let global = QualifiedName::global("Vector3");
/// assert!(global.is_global());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualifiedName {
    /// Simple name (e.g. "Mesh", "getBounds")
    pub name: String,
    /// Enclosing scopes, outermost first. Empty for the global namespace.
    pub namespace: Vec<String>,
}

impl QualifiedName {
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a qualified string (e.g., "bs::Mesh").
    ///
    /// Leading "::" is ignored, so "::bs::Mesh" == "bs::Mesh".
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split("::")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                namespace: parts,
            },
            None => Self::global(""),
        }
    }

    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    pub fn simple_name(&self) -> &str {
        &self.name
    }

    pub fn namespace_string(&self) -> String {
        self.namespace.join("::")
    }

    /// Create a child name within this scope.
    ///
    /// Example: `bs::Mesh` + `getBounds` = `bs::Mesh::getBounds`
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut namespace = self.namespace.clone();
        namespace.push(self.name.clone());
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<Self> {
        let (name, namespace) = self.namespace.split_last()?;
        Some(Self {
            name: name.clone(),
            namespace: namespace.to_vec(),
        })
    }

    /// All full names `target` could refer to when written inside `scope`,
    /// innermost scope first and the global interpretation last.
    ///
    /// ```
    /// use sbgen_core::QualifiedName;
    ///
    /// let scope = ["bs".to_string(), "Mesh".to_string()];
    /// let candidates = QualifiedName::scoped_candidates(&scope, "Bounds");
    /// let names: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
    /// assert_eq!(names, ["bs::Mesh::Bounds", "bs::Bounds", "Bounds"]);
    /// ```
    pub fn scoped_candidates(scope: &[String], target: &str) -> Vec<QualifiedName> {
        let relative = Self::from_qualified_string(target);
        (0..=scope.len())
            .rev()
            .map(|depth| {
                let mut namespace = scope[..depth].to_vec();
                namespace.extend(relative.namespace.iter().cloned());
                Self::new(relative.name.clone(), namespace)
            })
            .collect()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.namespace.join("::"), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
