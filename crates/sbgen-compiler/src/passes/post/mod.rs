//! Post-Process Pass - rewrite collected records into their final form.
//!
//! Runs once after collection. The steps run in a fixed order because each
//! one relies on the previous ones:
//!
//! 1. [`externals`] moves buffered external methods into their classes
//! 2. [`CommentPass`] resolves `@copydoc` references
//! 3. [`interop_names`] makes hook names unique within each class
//! 4. [`properties`] pairs getters and setters into properties
//! 5. [`bases`] marks base classes and builds the children index
//! 6. [`enum_defaults`] rewrites integer defaults of enum positions
//! 7. [`complex`] decides which structs need interop copies and flags
//!    every position that refers to one or to a base class
//! 8. [`default_expansion`] adds managed-only overloads for constructed
//!    defaults
//! 9. [`includes`] computes the include sets of every file group
//!
//! Records are always addressed by name. A step that needs to read one
//! record while rewriting another takes a snapshot of what it reads first.

mod bases;
mod complex;
mod default_expansion;
mod enum_defaults;
mod externals;
mod includes;
mod interop_names;
mod properties;

use rustc_hash::FxHashSet;
use sbgen_registry::Registry;

use super::comments::{CommentOutput, CommentPass};

/// Counts reported by the post-process pass.
#[derive(Debug, Default)]
pub struct PostProcessOutput {
    /// External methods and constructors attached to their classes.
    pub externals_merged: usize,
    pub comments: CommentOutput,
    /// Hooks renamed to keep interop names unique.
    pub interop_renames: usize,
    pub properties: usize,
    /// Classes marked as exported bases.
    pub bases: usize,
    pub enum_defaults: usize,
    /// Structs that need an interop copy.
    pub complex_structs: usize,
    /// Managed-only overloads synthesized for constructed defaults.
    pub expanded_overloads: usize,
}

pub struct PostProcessPass<'reg> {
    registry: &'reg mut Registry,
}

impl<'reg> PostProcessPass<'reg> {
    pub fn new(registry: &'reg mut Registry) -> Self {
        Self { registry }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(self) -> PostProcessOutput {
        let registry = self.registry;
        let mut output = PostProcessOutput {
            externals_merged: externals::merge(registry),
            ..PostProcessOutput::default()
        };
        output.comments = CommentPass::new(registry).run();
        output.interop_renames = interop_names::assign(registry);
        output.properties = properties::derive(registry);
        output.bases = bases::mark(registry);
        output.enum_defaults = enum_defaults::resolve(registry);
        output.complex_structs = complex::mark(registry);
        output.expanded_overloads = default_expansion::expand(registry);
        includes::compute(registry);

        log::debug!(
            "post-processed: {} externals, {} properties, {} bases, {} complex structs, {} expanded overloads",
            output.externals_merged,
            output.properties,
            output.bases,
            output.complex_structs,
            output.expanded_overloads
        );
        output
    }
}

/// `base` itself if free, else `base0`, `base1`, ... whichever is free
/// first. The returned name is added to `taken`.
pub(crate) fn unique_name(taken: &mut FxHashSet<String>, base: &str) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let mut suffix = 0usize;
    loop {
        let candidate = format!("{base}{suffix}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}
