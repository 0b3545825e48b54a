//! Comment Pass - resolve `@copydoc` references.
//!
//! A comment whose brief starts with `@copydoc X` is replaced by a copy of
//! X's comment. X is looked up relative to the referring declaration's
//! scope, innermost first, then as a global name. A parenthesized
//! parameter list (`@copydoc Mesh::create(const MeshDesc&)`) selects one
//! overload.
//!
//! ## Algorithm
//!
//! 1. Resolve the comment index to a fixed point: each round replaces every
//!    reference whose target is itself resolved, so chains resolve in as
//!    many rounds as they are long. References left over after the last
//!    productive round form cycles.
//! 2. Resolve the comments stored on records against the resolved index.
//!
//! Resolved comments carry no reference, so running the pass again changes
//! nothing.

use sbgen_core::{Comment, Diagnostics, QualifiedName};
use sbgen_registry::{CommentIndex, Registry, normalize_type};

/// Output of the comment pass.
#[derive(Debug, Default)]
pub struct CommentOutput {
    /// References replaced by their target's comment.
    pub resolved: usize,
    /// References whose target could not be found or forms a cycle.
    pub unresolved: usize,
}

/// Result of looking a reference up.
enum Lookup {
    Found(Comment),
    /// The target exists but is itself an unresolved reference.
    Pending,
    Missing,
}

/// Resolves `@copydoc` references in the comment index and on records.
pub struct CommentPass<'reg> {
    registry: &'reg mut Registry,
    output: CommentOutput,
}

impl<'reg> CommentPass<'reg> {
    pub fn new(registry: &'reg mut Registry) -> Self {
        Self {
            registry,
            output: CommentOutput::default(),
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self) -> CommentOutput {
        self.resolve_index();
        self.resolve_records();
        log::debug!(
            "resolved {} comment references, {} unresolved",
            self.output.resolved,
            self.output.unresolved
        );
        self.output
    }

    // ==========================================================================
    // Index
    // ==========================================================================

    fn resolve_index(&mut self) {
        let Registry {
            comments,
            diagnostics,
            ..
        } = &mut *self.registry;

        loop {
            let mut progress = false;
            for index in 0..comments.len() {
                let Some(entry) = comments.get(index) else {
                    continue;
                };
                let scope = entry.name.namespace.clone();
                let subject = entry.name.to_string();

                // Slot `None` is the entry's own comment, `Some(k)` its k-th
                // overload.
                let slots = std::iter::once((None, &entry.comment)).chain(
                    entry
                        .overloads
                        .iter()
                        .enumerate()
                        .map(|(k, o)| (Some(k), &o.comment)),
                );
                let mut updates = Vec::new();
                for (slot, comment) in slots {
                    let Some(target) = &comment.copydoc else {
                        continue;
                    };
                    match lookup(comments, &scope, target) {
                        Lookup::Found(found) => updates.push((slot, found)),
                        Lookup::Pending => {}
                        Lookup::Missing => {
                            diagnostics.warn(
                                &subject,
                                format!("@copydoc target '{target}' not found"),
                            );
                            self.output.unresolved += 1;
                            updates.push((slot, Comment::default()));
                        }
                    }
                }

                if updates.is_empty() {
                    continue;
                }
                progress = true;
                let Some(entry) = comments.get_mut(index) else {
                    continue;
                };
                for (slot, comment) in updates {
                    if !comment.is_empty() {
                        self.output.resolved += 1;
                    }
                    match slot {
                        None => entry.comment = comment,
                        Some(k) => entry.overloads[k].comment = comment,
                    }
                }
            }
            if !progress {
                break;
            }
        }

        // Whatever is left refers to itself, directly or not.
        for index in 0..comments.len() {
            let Some(entry) = comments.get_mut(index) else {
                continue;
            };
            let subject = entry.name.to_string();
            let slots = std::iter::once(&mut entry.comment)
                .chain(entry.overloads.iter_mut().map(|o| &mut o.comment));
            for comment in slots {
                if let Some(target) = comment.copydoc.take() {
                    diagnostics.warn(&subject, format!("@copydoc '{target}' forms a cycle"));
                    self.output.unresolved += 1;
                }
            }
        }
    }

    // ==========================================================================
    // Records
    // ==========================================================================

    fn resolve_records(&mut self) {
        let Registry {
            file_groups,
            comments,
            diagnostics,
            ..
        } = &mut *self.registry;
        let mut resolver = RecordResolver {
            index: comments,
            diagnostics,
            output: &mut self.output,
        };

        for group in file_groups.values_mut() {
            for class in &mut group.classes {
                let scope = class.namespaces.clone();
                let subject = qualify(&scope, &class.source_name);
                resolver.resolve(&mut class.documentation, &scope, &subject);

                let mut member_scope = scope;
                member_scope.push(class.source_name.clone());
                for method in class
                    .ctors
                    .iter_mut()
                    .chain(class.methods.iter_mut())
                    .chain(class.events.iter_mut())
                {
                    let subject = format!("{subject}::{}", method.source_name);
                    resolver.resolve(&mut method.documentation, &member_scope, &subject);
                }
                for field in &mut class.fields {
                    let subject = format!("{subject}::{}", field.name);
                    resolver.resolve(&mut field.documentation, &member_scope, &subject);
                }
                for property in &mut class.properties {
                    let subject = format!("{subject}::{}", property.name);
                    resolver.resolve(&mut property.documentation, &member_scope, &subject);
                }
            }

            for info in &mut group.structs {
                let scope = info.namespaces.clone();
                let subject = qualify(&scope, &info.source_name);
                resolver.resolve(&mut info.documentation, &scope, &subject);

                let mut member_scope = scope;
                member_scope.push(info.source_name.clone());
                for field in &mut info.fields {
                    let subject = format!("{subject}::{}", field.name);
                    resolver.resolve(&mut field.documentation, &member_scope, &subject);
                }
                for ctor in &mut info.ctors {
                    resolver.resolve(&mut ctor.documentation, &member_scope, &subject);
                }
            }

            for info in &mut group.enums {
                let scope = info.namespaces.clone();
                let subject = qualify(&scope, &info.source_name);
                resolver.resolve(&mut info.documentation, &scope, &subject);

                let mut member_scope = scope;
                member_scope.push(info.source_name.clone());
                for entry in info.entries.values_mut() {
                    let subject = format!("{subject}::{}", entry.name);
                    resolver.resolve(&mut entry.documentation, &member_scope, &subject);
                }
            }
        }
    }
}

struct RecordResolver<'a> {
    index: &'a CommentIndex,
    diagnostics: &'a mut Diagnostics,
    output: &'a mut CommentOutput,
}

impl RecordResolver<'_> {
    fn resolve(&mut self, comment: &mut Comment, scope: &[String], subject: &str) {
        let Some(target) = comment.copydoc.take() else {
            return;
        };
        match lookup(self.index, scope, &target) {
            Lookup::Found(found) => {
                *comment = found;
                self.output.resolved += 1;
            }
            Lookup::Pending | Lookup::Missing => {
                self.diagnostics
                    .warn(subject, format!("@copydoc target '{target}' not found"));
                self.output.unresolved += 1;
            }
        }
    }
}

/// Split `Name(T1, T2)` into the name and its normalized parameter types.
fn split_target(target: &str) -> (&str, Option<Vec<String>>) {
    let Some((name, rest)) = target.split_once('(') else {
        return (target.trim(), None);
    };
    let inner = rest.rsplit_once(')').map_or(rest, |(inner, _)| inner);
    let params = split_params(inner)
        .into_iter()
        .map(normalize_type)
        .filter(|p| !p.is_empty() && p != "void")
        .collect();
    (name.trim(), Some(params))
}

/// Split on commas outside template brackets.
fn split_params(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&text[start..]);
    out
}

fn lookup(index: &CommentIndex, scope: &[String], target: &str) -> Lookup {
    let (name, params) = split_target(target);
    for candidate in QualifiedName::scoped_candidates(scope, name) {
        let Some(entry) = index.find(&candidate.to_string()).and_then(|i| index.get(i)) else {
            continue;
        };
        let comment = match &params {
            Some(params) => match entry.overload(params) {
                Some(comment) => comment,
                None => continue,
            },
            None => &entry.comment,
        };
        return if comment.copydoc.is_some() {
            Lookup::Pending
        } else {
            Lookup::Found(comment.clone())
        };
    }
    Lookup::Missing
}

fn qualify(scope: &[String], name: &str) -> String {
    QualifiedName::new(name, scope.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use sbgen_core::{ClassInfo, GeneratorConfig, MethodInfo, TypeCategory};

    use super::*;

    fn registry() -> Registry {
        Registry::new(GeneratorConfig::default())
    }

    fn name(s: &str) -> QualifiedName {
        QualifiedName::from_qualified_string(s)
    }

    #[test]
    fn chains_resolve_transitively() {
        let mut registry = registry();
        registry.comments.insert(name("bs::A"), Comment::copydoc("B"));
        registry.comments.insert(name("bs::B"), Comment::copydoc("C"));
        registry.comments.insert(name("bs::C"), Comment::brief("hello"));

        let output = CommentPass::new(&mut registry).run();
        assert_eq!(output.resolved, 2);
        for n in ["bs::A", "bs::B", "bs::C"] {
            let index = registry.comments.find(n).unwrap();
            let entry = registry.comments.get(index).unwrap();
            assert_eq!(entry.comment.brief, ["hello"], "{n}");
        }
    }

    #[test]
    fn record_comments_use_their_scope() {
        let mut registry = registry();
        registry
            .comments
            .insert(name("bs::Mesh::getBounds"), Comment::brief("Bounds of the mesh."));

        let mut class = ClassInfo::new("Mesh", TypeCategory::Resource);
        class.namespaces = vec!["bs".into()];
        let mut method = MethodInfo::new("getBoundsAsync");
        method.documentation = Comment::copydoc("getBounds");
        class.methods.push(method);
        registry.file_group_mut("Mesh", false).classes.push(class);

        CommentPass::new(&mut registry).run();
        let class = &registry.file_groups["Mesh"].classes[0];
        assert_eq!(class.methods[0].documentation.brief, ["Bounds of the mesh."]);
        assert_eq!(class.methods[0].documentation.copydoc, None);
    }

    #[test]
    fn overloads_are_selected_by_parameter_types() {
        let mut registry = registry();
        registry.comments.insert_overload(
            name("bs::Mesh::create"),
            vec!["const MeshDesc&".into()],
            Comment::brief("From a descriptor."),
        );
        registry.comments.insert_overload(
            name("bs::Mesh::create"),
            vec!["UINT32".into(), "UINT32".into()],
            Comment::brief("From counts."),
        );
        registry
            .comments
            .insert(name("bs::Other"), Comment::copydoc("Mesh::create(UINT32, UINT32)"));

        CommentPass::new(&mut registry).run();
        let entry = registry
            .comments
            .get(registry.comments.find("bs::Other").unwrap())
            .unwrap();
        assert_eq!(entry.comment.brief, ["From counts."]);
    }

    #[test]
    fn missing_targets_and_cycles_warn() {
        let mut registry = registry();
        registry.comments.insert(name("A"), Comment::copydoc("Nowhere"));
        registry.comments.insert(name("B"), Comment::copydoc("C"));
        registry.comments.insert(name("C"), Comment::copydoc("B"));

        let output = CommentPass::new(&mut registry).run();
        assert_eq!(output.unresolved, 3);
        assert!(registry.diagnostics.mentions("A", "not found"));
        assert!(registry.diagnostics.mentions("B", "cycle"));
        assert!(registry.comments.iter().all(|e| e.comment.copydoc.is_none()));
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut registry = registry();
        registry.comments.insert(name("A"), Comment::copydoc("B"));
        registry.comments.insert(name("B"), Comment::brief("text"));
        CommentPass::new(&mut registry).run();
        let first: Vec<Comment> = registry.comments.iter().map(|e| e.comment.clone()).collect();

        let output = CommentPass::new(&mut registry).run();
        let second: Vec<Comment> = registry.comments.iter().map(|e| e.comment.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(output.resolved, 0);
    }

    #[test]
    fn target_parsing() {
        let (name, params) = split_target("Mesh::create(const Vector<int>&, UINT32)");
        assert_eq!(name, "Mesh::create");
        assert_eq!(params.unwrap(), ["const Vector<int>&", "UINT32"]);
        assert_eq!(split_target("Mesh::create()").1.unwrap(), Vec::<String>::new());
        assert_eq!(split_target("Mesh").1, None);
    }
}
