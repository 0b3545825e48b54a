//! Registration Pass - register every exported type before collection.
//!
//! Signatures may mention types declared later in the input, so every
//! exported record and enum is entered into the type map up front. The
//! pass also decides each class's category by walking its bases.
//!
//! ## Base search
//!
//! Bases are searched depth-first in declaration order:
//!
//! - A sentinel base (`Component`, `SceneObject`, `Resource`, `Module`,
//!   `IReflectable`, `GUIElementBase`) fixes the category. The first one
//!   found wins.
//! - The first annotated, exported base becomes `base_class`.
//! - Unexported bases are looked through.

use rustc_hash::{FxHashMap, FxHashSet};

use sbgen_core::{BuiltinKind, Diagnostics, ExportDirective, QualifiedName, TypeCategory};
use sbgen_parser::decl::{EnumDecl, RecordDecl};
use sbgen_parser::{DeclSource, DeclVisitor, Scoped, TypeExpr, parse_annotation};
use sbgen_registry::{Registry, UserType};

use crate::classifier::instantiation_name;

/// Output of the registration pass.
#[derive(Debug, Default)]
pub struct RegistrationOutput {
    /// Number of types registered.
    pub types_registered: usize,
    /// Directives of every registered declaration, keyed by qualified
    /// source name, so collection does not decode annotations twice.
    pub directives: FxHashMap<String, ExportDirective>,
}

/// Result of walking a class's bases.
#[derive(Debug, Default)]
struct BaseInfo {
    category: Option<TypeCategory>,
    base_class: Option<String>,
    is_module: bool,
}

/// Registers exported records and enums in the type map.
pub struct RegistrationPass<'a> {
    source: &'a dyn DeclSource,
    registry: &'a mut Registry,
    output: RegistrationOutput,
}

impl<'a> RegistrationPass<'a> {
    pub fn new(source: &'a dyn DeclSource, registry: &'a mut Registry) -> Self {
        Self {
            source,
            registry,
            output: RegistrationOutput::default(),
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self) -> RegistrationOutput {
        let source = self.source;
        source.walk(&mut self);
        log::debug!("registered {} types", self.output.types_registered);
        self.output
    }

    /// Decode the annotation of a top-level declaration, applying the
    /// exclusion and editor filters.
    fn directive(&mut self, annotation: Option<&str>, name: &str) -> Option<ExportDirective> {
        let directive = parse_annotation(annotation?, name, &mut self.registry.diagnostics)?;
        if directive.is_excluded() {
            return None;
        }
        if directive.is_editor() && !self.registry.config.generate_editor {
            return None;
        }
        Some(directive)
    }

    fn register(&mut self, qualified: String, ty: UserType, directive: ExportDirective) {
        let subject = ty.qualified_name.clone();
        if let Err(existing) = self.registry.types.insert(ty) {
            let message = format!(
                "type is exported more than once (first as '{}')",
                existing.qualified_name
            );
            self.registry.diagnostics.error(subject, message);
            return;
        }
        self.output.types_registered += 1;
        self.output.directives.insert(qualified, directive);
    }

    // ==========================================================================
    // Base search
    // ==========================================================================

    fn search_bases(&self, namespaces: &[String], record: &RecordDecl) -> BaseInfo {
        let mut info = BaseInfo::default();
        let mut visited = FxHashSet::default();
        self.search_bases_of(namespaces, record, &mut info, &mut visited);
        info
    }

    fn search_bases_of(
        &self,
        namespaces: &[String],
        record: &RecordDecl,
        info: &mut BaseInfo,
        visited: &mut FxHashSet<String>,
    ) {
        for base in &record.bases {
            let Ok(expr) = TypeExpr::parse(base) else {
                continue;
            };

            if let Some(sentinel) = sentinel_category(expr.name()) {
                if expr.name() == MODULE_SENTINEL {
                    info.is_module = true;
                }
                info.category.get_or_insert(sentinel);
                continue;
            }

            let Some((scope, decl)) = self.find_base(namespaces, &expr) else {
                continue;
            };
            let key = format!("{}::{}", scope.join("::"), base);
            if !visited.insert(key) {
                continue;
            }

            if info.base_class.is_none() && is_exported_class(decl) {
                info.base_class = Some(instantiation_name(&expr));
            }
            self.search_bases_of(&scope, decl, info, visited);
        }
    }

    /// Resolve a base spelling from inside `namespaces`, innermost scope
    /// first.
    fn find_base(
        &self,
        namespaces: &[String],
        expr: &TypeExpr,
    ) -> Option<(Vec<String>, &'a RecordDecl)> {
        let source = self.source;
        QualifiedName::scoped_candidates(namespaces, &expr.qualified_name())
            .into_iter()
            .find_map(|candidate| source.find_record(&candidate.to_string()))
    }
}

impl DeclVisitor for RegistrationPass<'_> {
    fn visit_record(&mut self, record: Scoped<'_, RecordDecl>) {
        let decl = record.decl;
        let Some(directive) = self.directive(decl.annotation.as_deref(), &decl.name) else {
            return;
        };
        // Containers of external methods are not types of their own.
        if directive.is_external() {
            return;
        }

        let source_name = record_source_name(decl);
        let mut ty = UserType::new(source_name.clone(), TypeCategory::Class);

        if directive.is_plain() {
            ty.category = TypeCategory::Struct;
        } else {
            let bases = self.search_bases(record.namespaces, decl);
            ty.category = bases.category.unwrap_or(TypeCategory::Class);
            ty.base_class = bases.base_class;
            ty.is_module = bases.is_module;
        }

        let qualified = record.qualify(&source_name);
        ty.qualified_name = qualified.clone();
        ty.namespaces = record.namespaces.to_vec();
        ty.script_name = directive.export_name.clone();
        ty.file_group = directive.file_group.clone();
        ty.editor = directive.is_editor();
        ty.header = decl.file.clone();

        self.register(qualified, ty, directive);
    }

    fn visit_enum(&mut self, decl: Scoped<'_, EnumDecl>) {
        let inner = decl.decl;
        let Some(directive) = self.directive(inner.annotation.as_deref(), &inner.name) else {
            return;
        };

        let qualified = decl.qualify(&inner.name);
        let mut ty = UserType::new(inner.name.clone(), TypeCategory::Enum);
        ty.qualified_name = qualified.clone();
        ty.namespaces = decl.namespaces.to_vec();
        ty.script_name = directive.export_name.clone();
        ty.file_group = directive.file_group.clone();
        ty.editor = directive.is_editor();
        ty.header = inner.file.clone();
        ty.underlying = Some(enum_underlying(inner).unwrap_or(BuiltinKind::Int32));

        self.register(qualified, ty, directive);
    }
}

// ==========================================================================
// Helpers
// ==========================================================================

const MODULE_SENTINEL: &str = "Module";

fn sentinel_category(name: &str) -> Option<TypeCategory> {
    match name {
        "Component" => Some(TypeCategory::Component),
        "SceneObject" => Some(TypeCategory::SceneObject),
        "Resource" => Some(TypeCategory::Resource),
        "IReflectable" => Some(TypeCategory::ReflectableClass),
        "GUIElementBase" => Some(TypeCategory::GuiElement),
        MODULE_SENTINEL => Some(TypeCategory::Class),
        _ => None,
    }
}

/// Check if a record is exported as a class (not a plain struct, not
/// excluded). Problems in the annotation are reported when the record
/// itself is visited, so they are discarded here.
fn is_exported_class(record: &RecordDecl) -> bool {
    let mut scratch = Diagnostics::new();
    record
        .annotation
        .as_deref()
        .and_then(|text| parse_annotation(text, &record.name, &mut scratch))
        .is_some_and(|d| !d.is_excluded() && !d.is_plain())
}

/// Type map key of a record: `Name`, or `Name<Args>` for an explicit
/// template instantiation.
pub fn record_source_name(record: &RecordDecl) -> String {
    if record.template_args.is_empty() {
        record.name.clone()
    } else {
        format!("{}<{}>", record.name, record.template_args.join(", "))
    }
}

/// Builtin kind of an enum's declared underlying type.
pub fn enum_underlying(decl: &EnumDecl) -> Option<BuiltinKind> {
    let spelling = decl.underlying.as_deref()?;
    let expr = TypeExpr::parse(spelling).ok()?;
    BuiltinKind::from_spelling(&expr.qualified_name())
}
