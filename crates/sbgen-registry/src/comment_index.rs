//! Global documentation lookup.
//!
//! Comments are stored in a flat vector and indexed by fully-qualified name
//! and by simple name. Functions accumulate one overload record per
//! parameter-type signature so `@copydoc f(int)` can pick the right one.

use rustc_hash::FxHashMap;

use sbgen_core::{Comment, QualifiedName};

/// Documentation of one overload of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadComment {
    /// Parameter types as spelled, whitespace-normalized.
    pub param_types: Vec<String>,
    pub comment: Comment,
}

/// Documentation recorded for one name.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentEntry {
    pub name: QualifiedName,
    /// Comment of a non-function declaration, or of the first overload.
    pub comment: Comment,
    pub overloads: Vec<OverloadComment>,
}

impl CommentEntry {
    /// The comment of the overload taking exactly `param_types`.
    pub fn overload(&self, param_types: &[String]) -> Option<&Comment> {
        self.overloads
            .iter()
            .find(|o| o.param_types == param_types)
            .map(|o| &o.comment)
    }
}

/// Name-indexed comment store.
#[derive(Debug, Default, Clone)]
pub struct CommentIndex {
    entries: Vec<CommentEntry>,
    by_full_name: FxHashMap<String, usize>,
    by_simple_name: FxHashMap<String, Vec<usize>>,
}

impl CommentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_index(&mut self, name: QualifiedName) -> usize {
        let full = name.to_string();
        if let Some(&index) = self.by_full_name.get(&full) {
            return index;
        }
        let index = self.entries.len();
        self.by_simple_name
            .entry(name.name.clone())
            .or_default()
            .push(index);
        self.by_full_name.insert(full, index);
        self.entries.push(CommentEntry {
            name,
            comment: Comment::default(),
            overloads: Vec::new(),
        });
        index
    }

    /// Record the comment of a non-function declaration. A later insert for
    /// the same name replaces an empty comment only.
    pub fn insert(&mut self, name: QualifiedName, comment: Comment) -> usize {
        let index = self.entry_index(name);
        let entry = &mut self.entries[index];
        if entry.comment.is_empty() {
            entry.comment = comment;
        }
        index
    }

    /// Record the comment of one function overload.
    pub fn insert_overload(
        &mut self,
        name: QualifiedName,
        param_types: Vec<String>,
        comment: Comment,
    ) -> usize {
        let param_types = param_types.iter().map(|p| normalize_type(p)).collect();
        let index = self.entry_index(name);
        let entry = &mut self.entries[index];
        if entry.comment.is_empty() {
            entry.comment = comment.clone();
        }
        entry.overloads.push(OverloadComment {
            param_types,
            comment,
        });
        index
    }

    pub fn find(&self, full_name: &str) -> Option<usize> {
        self.by_full_name.get(full_name).copied()
    }

    /// Indices of every entry with the given simple name.
    pub fn find_simple(&self, simple_name: &str) -> &[usize] {
        self.by_simple_name
            .get(simple_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<&CommentEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CommentEntry> {
        self.entries.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommentEntry> {
        self.entries.iter()
    }
}

/// Collapse whitespace in a type spelling so `const T &` and `const T&`
/// compare equal.
pub fn normalize_type(spelling: &str) -> String {
    let mut out = String::with_capacity(spelling.len());
    let mut pending_space = false;
    for ch in spelling.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        let punct = matches!(ch, '*' | '&' | '<' | '>' | ',' | ':' | '(' | ')');
        let prev_punct = out
            .chars()
            .last()
            .is_some_and(|c| matches!(c, '*' | '&' | '<' | '>' | ',' | ':' | '(' | ')'));
        if pending_space && !punct && !prev_punct && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_by_full_and_simple_name() {
        let mut index = CommentIndex::new();
        let a = index.insert(QualifiedName::from("bs::Mesh"), Comment::brief("A mesh."));
        let b = index.insert(QualifiedName::from("bs::Editor::Mesh"), Comment::brief("Other."));
        assert_eq!(index.find("bs::Mesh"), Some(a));
        assert_eq!(index.find_simple("Mesh"), &[a, b]);
        assert!(index.find_simple("Texture").is_empty());
    }

    #[test]
    fn overloads_accumulate_per_signature() {
        let mut index = CommentIndex::new();
        let name = QualifiedName::from("bs::Mesh::set");
        index.insert_overload(name.clone(), vec!["int".into()], Comment::brief("int"));
        let i = index.insert_overload(name, vec!["const Vector3 &".into()], Comment::brief("vec"));
        let entry = index.get(i).unwrap();
        assert_eq!(entry.overloads.len(), 2);
        assert_eq!(entry.comment.brief_text(), "int");
        assert_eq!(
            entry.overload(&["const Vector3&".to_string()]).unwrap().brief_text(),
            "vec"
        );
    }

    #[test]
    fn normalizes_type_spacing() {
        assert_eq!(normalize_type(" const  Vector3 & "), "const Vector3&");
        assert_eq!(normalize_type("Vector < int >"), "Vector<int>");
        assert_eq!(normalize_type("unsigned   int"), "unsigned int");
    }
}
