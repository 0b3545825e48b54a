//! Collection Pass - build a record for every exported declaration.
//!
//! Runs after registration, so every signature can be classified against a
//! complete type map. Each exported declaration becomes one record in its
//! file group:
//!
//! - enums become [`EnumInfo`]s, entries sorted by value
//! - `pl:true` records become [`StructInfo`]s, base struct fields first
//! - other records become [`ClassInfo`]s with constructors, methods, events
//!   and field accessors
//!
//! External methods (`e:` / `ec:`) go to the registry's external buffer
//! under their target class instead. Every documented declaration also
//! feeds the comment index.

use rustc_hash::FxHashMap;

use sbgen_core::{
    ClassFlags, ClassInfo, Comment, Diagnostics, Direction, EnumEntryInfo, EnumInfo, ExportDirective,
    ExportFlags, FieldInfo, MethodFlags, MethodInfo, ParamInfo, QualifiedName, ReturnInfo,
    StructCtorInfo, StructInfo, TypeCategory, TypeRef,
};
use sbgen_parser::decl::{
    Access, ConstructorDecl, EnumDecl, Expr, ExprKind, FieldDecl, FunctionDecl, MethodDecl,
    ParamDecl, RecordDecl,
};
use sbgen_parser::{
    DeclSource, DeclVisitor, Scoped, TemplateArg, TypeExpr, parse_annotation, parse_doc_comment,
};
use sbgen_registry::{CommentIndex, PendingExternal, Registry, TypeMap};

use super::drop_defaults_through;
use super::registration::{enum_underlying, record_source_name};
use crate::classifier::{Classifier, instantiation_name, is_event};
use crate::defaults::DefaultEvaluator;

/// Interop base name of every constructor hook.
pub const CONSTRUCTOR_INTEROP_NAME: &str = "create";

/// Output of the collection pass.
#[derive(Debug, Default)]
pub struct CollectionOutput {
    pub classes: usize,
    pub structs: usize,
    pub enums: usize,
    /// Methods, constructors, events and field accessors.
    pub methods: usize,
    /// Methods routed to the external buffer.
    pub externals: usize,
}

/// Builds records from the declarations registered earlier.
pub struct CollectionPass<'a> {
    source: &'a dyn DeclSource,
    registry: &'a mut Registry,
    directives: &'a FxHashMap<String, ExportDirective>,
    output: CollectionOutput,
}

impl<'a> CollectionPass<'a> {
    pub fn new(
        source: &'a dyn DeclSource,
        registry: &'a mut Registry,
        directives: &'a FxHashMap<String, ExportDirective>,
    ) -> Self {
        Self {
            source,
            registry,
            directives,
            output: CollectionOutput::default(),
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self) -> CollectionOutput {
        let source = self.source;
        source.walk(&mut self);
        log::debug!(
            "collected {} classes, {} structs, {} enums, {} methods, {} externals",
            self.output.classes,
            self.output.structs,
            self.output.enums,
            self.output.methods,
            self.output.externals
        );
        self.output
    }

    /// Split the registry into the parts record building needs.
    fn collector(&mut self) -> Collector<'_> {
        let Registry {
            config,
            types,
            comments,
            diagnostics,
            ..
        } = &mut *self.registry;
        Collector {
            source: self.source,
            types,
            generate_editor: config.generate_editor,
            diagnostics,
            comments,
        }
    }

    fn push_external(&mut self, target: String, pending: PendingExternal) {
        self.output.externals += 1;
        self.registry.externals.entry(target).or_default().push(pending);
    }
}

impl DeclVisitor for CollectionPass<'_> {
    fn visit_record(&mut self, record: Scoped<'_, RecordDecl>) {
        let decl = record.decl;
        let source_name = record_source_name(decl);
        let directives = self.directives;
        let directive = directives.get(&record.qualify(&source_name));

        // Container classes and exported classes alike may declare
        // external methods. Annotation problems were reported during
        // registration.
        let container = decl
            .annotation
            .as_deref()
            .and_then(|a| parse_annotation(a, &decl.name, &mut Diagnostics::new()));
        let container_editor = container.as_ref().is_some_and(|d| d.is_editor());
        if container.as_ref().is_some_and(|d| d.is_excluded())
            || (container_editor && !self.registry.config.generate_editor)
        {
            return;
        }
        let externals = self.collector().externals_of(record, container_editor);
        for (target, pending) in externals {
            self.push_external(target, pending);
        }

        let Some(directive) = directive else {
            return;
        };
        let editor = directive.is_editor();
        let group = directive.file_group.clone();

        if directive.is_plain() {
            let info = self.collector().build_struct(record, directive);
            self.output.structs += 1;
            self.registry.file_group_mut(&group, editor).structs.push(info);
        } else {
            let info = self.collector().build_class(record, directive);
            self.output.classes += 1;
            self.output.methods += info.ctors.len() + info.methods.len() + info.events.len();
            self.registry.file_group_mut(&group, editor).classes.push(info);
        }
    }

    fn visit_enum(&mut self, decl: Scoped<'_, EnumDecl>) {
        let directives = self.directives;
        let Some(directive) = directives.get(&decl.qualify(&decl.decl.name)) else {
            return;
        };
        let editor = directive.is_editor();
        let group = directive.file_group.clone();
        let info = self.collector().build_enum(decl, directive);
        self.output.enums += 1;
        self.registry.file_group_mut(&group, editor).enums.push(info);
    }

    fn visit_function(&mut self, decl: Scoped<'_, FunctionDecl>) {
        let function = decl.decl;
        let mut collector = self.collector();
        let Some(directive) = collector.member_directive(function.annotation.as_deref(), &function.name)
        else {
            return;
        };
        let subject = decl.qualify(&function.name);
        collector.index_function(
            QualifiedName::new(function.name.clone(), decl.namespaces.to_vec()),
            &function.params,
            function.doc.as_deref(),
        );

        if !directive.is_external() {
            collector.diagnostics.warn(
                subject,
                "free functions are only exported as external methods (e: or ec:)",
            );
            return;
        }

        let scope = (!decl.namespaces.is_empty()).then(|| decl.namespaces.join("::"));
        let external = collector.external(
            &directive,
            &function.name,
            &function.return_type,
            &function.params,
            function.doc.as_deref(),
            scope,
            &subject,
        );
        if let Some((target, method)) = external {
            let pending = PendingExternal {
                method,
                editor: directive.is_editor(),
                header: function.file.clone(),
                subject,
            };
            self.push_external(target, pending);
        }
    }
}

// ==========================================================================
// Record building
// ==========================================================================

/// Borrowed view of the registry used while building one record.
struct Collector<'r> {
    source: &'r dyn DeclSource,
    types: &'r TypeMap,
    generate_editor: bool,
    diagnostics: &'r mut Diagnostics,
    comments: &'r mut CommentIndex,
}

impl<'r> Collector<'r> {
    /// Decode a member annotation, applying the exclusion and editor
    /// filters.
    fn member_directive(&mut self, annotation: Option<&str>, name: &str) -> Option<ExportDirective> {
        let directive = parse_annotation(annotation?, name, self.diagnostics)?;
        if directive.is_excluded() || (directive.is_editor() && !self.generate_editor) {
            return None;
        }
        Some(directive)
    }

    fn classify(&mut self, spelling: &str, direction: Direction, subject: &str) -> Option<TypeRef> {
        match Classifier::new(self.types).classify(spelling, direction) {
            Ok(classified) => {
                if let Some(name) = classified.unknown {
                    self.diagnostics.warn(
                        subject,
                        format!("type '{name}' is not exported; treating it as a builtin"),
                    );
                }
                Some(classified.ty)
            }
            Err(err) => {
                self.diagnostics
                    .error(subject, format!("cannot export '{spelling}': {err}"));
                None
            }
        }
    }

    fn classify_expr(&mut self, expr: &TypeExpr, direction: Direction, subject: &str) -> Option<TypeRef> {
        self.classify(&expr.to_string(), direction, subject)
    }

    /// Classify a parameter list and evaluate its defaults.
    fn params(&mut self, decls: &[ParamDecl], subject: &str) -> Option<Vec<ParamInfo>> {
        let mut params = Vec::with_capacity(decls.len());
        for decl in decls {
            let ty = self.classify(&decl.ty, Direction::Parameter, subject)?;
            params.push(ParamInfo::new(decl.name.clone(), ty));
        }

        let evaluator = DefaultEvaluator::new(self.types);
        for (index, decl) in decls.iter().enumerate() {
            let Some(expr) = &decl.default else {
                continue;
            };
            match evaluator.evaluate(expr, &params[index].ty) {
                Some(value) => {
                    let param = &mut params[index];
                    param.default_value = Some(value.literal().to_string());
                    param.default_value_type = value.constructed_type().map(str::to_string);
                }
                None => {
                    self.diagnostics.warn(
                        subject,
                        format!(
                            "default value '{}' of parameter '{}' has no managed equivalent; dropped",
                            expr.text, decl.name
                        ),
                    );
                    drop_defaults_through(&mut params, index);
                }
            }
        }
        Some(params)
    }

    fn method(
        &mut self,
        decl: &MethodDecl,
        directive: &ExportDirective,
        subject: &str,
    ) -> Option<MethodInfo> {
        let ret = self.classify(&decl.return_type, Direction::Return, subject)?;
        let params = self.params(&decl.params, subject)?;

        let mut method = MethodInfo::new(decl.name.clone())
            .with_script_name(directive.export_name.clone())
            .with_return(ret);
        method.params = params;
        method.visibility = directive.visibility;
        method.flags |= method_flags(directive);
        if decl.is_static {
            method.flags |= MethodFlags::STATIC;
        }
        method.documentation = parse_doc(decl.doc.as_deref());
        method.style = directive.style.clone();
        Some(method)
    }

    /// Build an external method, returning it with its target class.
    #[allow(clippy::too_many_arguments)]
    fn external(
        &mut self,
        directive: &ExportDirective,
        name: &str,
        return_type: &str,
        params: &[ParamDecl],
        doc: Option<&str>,
        scope: Option<String>,
        subject: &str,
    ) -> Option<(String, MethodInfo)> {
        let target = directive.external_class.as_deref().unwrap_or_default();
        if target.is_empty() {
            self.diagnostics
                .error(subject, "external method does not name its target class");
            return None;
        }
        let target = target_key(target);

        let ret = self.classify(return_type, Direction::Return, subject)?;
        let params = self.params(params, subject)?;

        let mut method = MethodInfo::new(name).with_return(ret);
        method.params = params;
        method.visibility = directive.visibility;
        method.flags |= method_flags(directive) | MethodFlags::EXTERNAL;
        method.external_class = scope;
        method.documentation = parse_doc(doc);
        method.style = directive.style.clone();

        if directive.flags.contains(ExportFlags::EXTERNAL_CONSTRUCTOR) {
            method.flags |= MethodFlags::CONSTRUCTOR;
            method.interop_name = CONSTRUCTOR_INTEROP_NAME.to_string();
            method.script_name = self
                .types
                .get(&target)
                .map(|t| t.script_name.clone())
                .unwrap_or_else(|| target.clone());
        } else {
            method.script_name = directive.export_name.clone();
        }
        Some((target, method))
    }

    /// External methods declared inside a record.
    fn externals_of(
        &mut self,
        record: Scoped<'_, RecordDecl>,
        container_editor: bool,
    ) -> Vec<(String, PendingExternal)> {
        let decl = record.decl;
        let container = record.qualify(&record_source_name(decl));
        let mut out = Vec::new();
        for method in &decl.methods {
            let Some(annotation) = method.annotation.as_deref() else {
                continue;
            };
            // Ordinary members are decoded when the class itself is built.
            if !names_external_target(annotation) {
                continue;
            }
            let Some(directive) = self.member_directive(Some(annotation), &method.name) else {
                continue;
            };
            let subject = format!("{container}::{}", method.name);
            self.index_function(
                QualifiedName::from_qualified_string(&container).child(method.name.clone()),
                &method.params,
                method.doc.as_deref(),
            );
            if !method.is_static {
                self.diagnostics
                    .warn(&subject, "external method is not static");
            }
            let external = self.external(
                &directive,
                &method.name,
                &method.return_type,
                &method.params,
                method.doc.as_deref(),
                Some(container.clone()),
                &subject,
            );
            if let Some((target, method_info)) = external {
                out.push((
                    target,
                    PendingExternal {
                        method: method_info,
                        editor: directive.is_editor() || container_editor,
                        header: decl.file.clone(),
                        subject,
                    },
                ));
            }
        }
        out
    }

    // ==========================================================================
    // Classes
    // ==========================================================================

    fn build_class(&mut self, record: Scoped<'_, RecordDecl>, directive: &ExportDirective) -> ClassInfo {
        let decl = record.decl;
        let source_name = record_source_name(decl);
        let qualified = record.qualify(&source_name);
        let user = self.types.get(&source_name);

        let category = user.map_or(TypeCategory::Class, |u| u.category);
        let mut class = ClassInfo::new(decl.name.clone(), category);
        class.clean_name = directive.export_name.clone();
        class.visibility = directive.visibility;
        class.namespaces = record.namespaces.to_vec();
        class.template_params = decl.template_args.clone();
        class.base_class = user.and_then(|u| u.base_class.clone());
        class.module = directive.module.clone();
        class.documentation = parse_doc(decl.doc.as_deref());
        class.header = decl.file.clone();
        class.interop_only = directive.flags.contains(ExportFlags::INTEROP_ONLY);
        if directive.is_editor() {
            class.flags |= ClassFlags::EDITOR;
        }
        if user.is_some_and(|u| u.is_module) {
            class.flags |= ClassFlags::IS_MODULE;
        }
        if !decl.template_args.is_empty() {
            class.flags |= ClassFlags::TEMPLATE_INSTANTIATION;
        }

        let class_name = QualifiedName::from_qualified_string(&qualified);
        self.comments
            .insert(class_name.clone(), class.documentation.clone());

        if !class.is_module() {
            for ctor in &decl.constructors {
                if let Some(info) = self.class_ctor(&class, &class_name, ctor) {
                    class.ctors.push(info);
                }
            }
        }

        for method in &decl.methods {
            if method.annotation.as_deref().is_some_and(names_external_target) {
                continue;
            }
            let Some(member) = self.member_directive(method.annotation.as_deref(), &method.name)
            else {
                continue;
            };
            let subject = format!("{qualified}::{}", method.name);
            self.index_function(
                class_name.child(method.name.clone()),
                &method.params,
                method.doc.as_deref(),
            );
            if method.access != Access::Public {
                self.diagnostics.warn(
                    &subject,
                    "exported method is not public; the generated shim will not compile",
                );
            }
            if let Some(mut info) = self.method(method, &member, &subject) {
                if class.interop_only {
                    info.flags |= MethodFlags::INTEROP_ONLY;
                }
                class.methods.push(info);
            }
        }

        for field in &decl.fields {
            let Some(member) = self.member_directive(field.annotation.as_deref(), &field.name)
            else {
                continue;
            };
            let subject = format!("{qualified}::{}", field.name);
            let documentation = parse_doc(field.doc.as_deref());
            self.comments
                .insert(class_name.child(field.name.clone()), documentation.clone());

            match TypeExpr::parse(&field.ty) {
                Ok(expr) if is_event(&expr) => {
                    if let Some(event) = self.event(field, &expr, &member, documentation, &subject) {
                        class.events.push(event);
                    }
                }
                Ok(expr) => {
                    if field.access != Access::Public {
                        self.diagnostics.warn(
                            &subject,
                            "exported field is not public; the generated shim will not compile",
                        );
                    }
                    self.field_accessors(&mut class, field, &expr, &member, documentation, &subject);
                }
                Err(err) => self
                    .diagnostics
                    .error(&subject, format!("cannot export '{}': {err}", field.ty)),
            }
        }

        class
    }

    fn class_ctor(
        &mut self,
        class: &ClassInfo,
        class_name: &QualifiedName,
        ctor: &ConstructorDecl,
    ) -> Option<MethodInfo> {
        let directive = self.member_directive(ctor.annotation.as_deref(), &class.source_name)?;
        let subject = format!("{class_name}::{}", class.source_name);
        self.index_function(
            class_name.child(class.source_name.clone()),
            &ctor.params,
            ctor.doc.as_deref(),
        );
        if ctor.access != Access::Public {
            self.diagnostics.warn(
                &subject,
                "exported constructor is not public; the generated shim will not compile",
            );
        }

        let mut info = MethodInfo::new(class.source_name.clone())
            .with_script_name(class.clean_name.clone())
            .with_flags(MethodFlags::CONSTRUCTOR);
        info.interop_name = CONSTRUCTOR_INTEROP_NAME.to_string();
        info.params = self.params(&ctor.params, &subject)?;
        info.visibility = directive.visibility;
        info.documentation = parse_doc(ctor.doc.as_deref());
        if directive.flags.contains(ExportFlags::INTEROP_ONLY) || class.interop_only {
            info.flags |= MethodFlags::INTEROP_ONLY;
        }
        Some(info)
    }

    fn event(
        &mut self,
        field: &FieldDecl,
        expr: &TypeExpr,
        directive: &ExportDirective,
        documentation: Comment,
        subject: &str,
    ) -> Option<MethodInfo> {
        let [TemplateArg::Function(sig)] = expr.template_args.as_slice() else {
            return None;
        };

        let mut event = MethodInfo::new(field.name.clone())
            .with_script_name(directive.export_name.clone());
        event.ret = ReturnInfo {
            ty: self.classify_expr(&sig.ret, Direction::Return, subject)?,
        };
        for (index, param) in sig.params.iter().enumerate() {
            let ty = self.classify_expr(param, Direction::Parameter, subject)?;
            event.params.push(ParamInfo::new(format!("p{index}"), ty));
        }
        event.visibility = directive.visibility;
        if directive.flags.contains(ExportFlags::CALLBACK) {
            event.flags |= MethodFlags::CALLBACK;
        }
        if field.is_static {
            event.flags |= MethodFlags::STATIC;
        }
        event.documentation = documentation;
        Some(event)
    }

    /// Accessor pair for an exported data member. A `const` member only
    /// gets a getter.
    fn field_accessors(
        &mut self,
        class: &mut ClassInfo,
        field: &FieldDecl,
        expr: &TypeExpr,
        directive: &ExportDirective,
        documentation: Comment,
        subject: &str,
    ) {
        let Some(ty) = self.classify(&field.ty, Direction::Return, subject) else {
            return;
        };
        let read_only = expr.is_const && !expr.has_suffix();
        let static_flag = if field.is_static {
            MethodFlags::STATIC
        } else {
            MethodFlags::empty()
        };

        let mut getter = MethodInfo::new(field.name.clone())
            .with_script_name(directive.export_name.clone())
            .with_flags(MethodFlags::FIELD_WRAPPER | MethodFlags::PROPERTY_GETTER | static_flag)
            .with_return(ty.clone());
        getter.interop_name = format!("get_{}", field.name);
        getter.visibility = directive.visibility;
        getter.documentation = documentation.clone();
        getter.style = directive.style.clone();
        class.methods.push(getter);

        if !read_only {
            let Some(param_ty) = self.classify(&field.ty, Direction::Parameter, subject) else {
                return;
            };
            let mut setter = MethodInfo::new(field.name.clone())
                .with_script_name(directive.export_name.clone())
                .with_flags(MethodFlags::FIELD_WRAPPER | MethodFlags::PROPERTY_SETTER | static_flag)
                .with_param(ParamInfo::new("value", param_ty));
            setter.interop_name = format!("set_{}", field.name);
            setter.visibility = directive.visibility;
            setter.documentation = documentation.clone();
            setter.style = directive.style.clone();
            class.methods.push(setter);
        }

        let mut info = FieldInfo::new(field.name.clone(), ty);
        info.documentation = documentation;
        info.style = directive.style.clone();
        class.fields.push(info);
    }

    // ==========================================================================
    // Structs
    // ==========================================================================

    fn build_struct(&mut self, record: Scoped<'_, RecordDecl>, directive: &ExportDirective) -> StructInfo {
        let decl = record.decl;
        let qualified = record.qualify(&decl.name);
        let mut info = StructInfo::new(decl.name.clone());
        info.script_name = directive.export_name.clone();
        info.visibility = directive.visibility;
        info.namespaces = record.namespaces.to_vec();
        info.module = directive.module.clone();
        info.documentation = parse_doc(decl.doc.as_deref());
        info.header = decl.file.clone();
        info.editor = directive.is_editor();

        let struct_name = QualifiedName::from_qualified_string(&qualified);
        self.comments
            .insert(struct_name.clone(), info.documentation.clone());

        // Inherited fields come first, root ancestor first.
        let mut ancestors = Vec::new();
        self.struct_ancestors(record.namespaces, decl, &mut ancestors);
        info.base_struct = ancestors.first().map(|base| base.name.clone());
        for ancestor in ancestors.iter().rev() {
            self.struct_fields(&mut info, ancestor, &qualified);
        }
        self.struct_fields(&mut info, decl, &qualified);

        for ctor in &decl.constructors {
            if ctor.is_copy || ctor.access != Access::Public {
                continue;
            }
            let subject = format!("{qualified}::{}", decl.name);
            self.index_function(
                struct_name.child(decl.name.clone()),
                &ctor.params,
                ctor.doc.as_deref(),
            );
            if let Some(built) = self.struct_ctor(&info, ctor, &subject) {
                info.ctors.push(built);
            }
        }

        info
    }

    /// Exported struct ancestors, closest first.
    fn struct_ancestors(
        &self,
        namespaces: &[String],
        decl: &RecordDecl,
        chain: &mut Vec<&'r RecordDecl>,
    ) {
        let source = self.source;
        for base in &decl.bases {
            let Ok(expr) = TypeExpr::parse(base) else {
                continue;
            };
            if self.types.category_of(&instantiation_name(&expr)) != Some(TypeCategory::Struct) {
                continue;
            }
            let found = QualifiedName::scoped_candidates(namespaces, &expr.qualified_name())
                .into_iter()
                .find_map(|candidate| source.find_record(&candidate.to_string()));
            let Some((scope, record)) = found else {
                continue;
            };
            if chain.iter().any(|seen| std::ptr::eq(*seen, record)) {
                return;
            }
            chain.push(record);
            // Plain structs use single inheritance.
            self.struct_ancestors(&scope, record, chain);
            return;
        }
    }

    fn struct_fields(&mut self, info: &mut StructInfo, decl: &RecordDecl, subject_prefix: &str) {
        for field in &decl.fields {
            if field.is_static {
                continue;
            }
            let subject = format!("{subject_prefix}::{}", field.name);
            let Some(ty) = self.classify(&field.ty, Direction::Field, &subject) else {
                continue;
            };
            if matches!(
                ty.category,
                TypeCategory::ScriptObject | TypeCategory::GuiElement | TypeCategory::MonoObject
            ) || ty.is_async_op()
            {
                self.diagnostics.error(
                    &subject,
                    format!("struct field has unsupported category '{}'", ty.category),
                );
                continue;
            }

            let mut built = FieldInfo::new(field.name.clone(), ty);
            built.documentation = parse_doc(field.doc.as_deref());
            if let Some(annotation) = field.annotation.as_deref()
                && let Some(directive) = parse_annotation(annotation, &field.name, self.diagnostics)
            {
                built.style = directive.style;
            }

            // In-class initializers win over constructor initializers.
            let init = field
                .init
                .as_ref()
                .or_else(|| constant_initializer(decl, &field.name));
            if let Some(expr) = init {
                let evaluator = DefaultEvaluator::new(self.types);
                match evaluator.evaluate(expr, &built.ty) {
                    Some(value) => {
                        built.default_value = Some(value.literal().to_string());
                        built.default_value_type = value.constructed_type().map(str::to_string);
                    }
                    None => self.diagnostics.warn(
                        &subject,
                        format!("initializer '{}' has no managed equivalent; ignored", expr.text),
                    ),
                }
            }

            self.comments.insert(
                QualifiedName::from_qualified_string(&subject),
                built.documentation.clone(),
            );
            info.fields.push(built);
        }
    }

    fn struct_ctor(
        &mut self,
        info: &StructInfo,
        ctor: &ConstructorDecl,
        subject: &str,
    ) -> Option<StructCtorInfo> {
        let params = self.params(&ctor.params, subject)?;
        let mut built = StructCtorInfo {
            params,
            field_assignments: Vec::new(),
            documentation: parse_doc(ctor.doc.as_deref()),
        };

        for init in ctor.initializers.iter().chain(ctor.assignments.iter()) {
            match init.expr.kind {
                ExprKind::ParamRef => {
                    if info.find_field(&init.field).is_none() {
                        continue;
                    }
                    if built.param_for_field(&init.field).is_none() {
                        built
                            .field_assignments
                            .push((init.field.clone(), init.expr.text.clone()));
                    }
                }
                _ if is_constant(&init.expr) => {}
                _ => self.diagnostics.warn(
                    subject,
                    format!(
                        "non-trivial assignment to field '{}' is not reproduced in managed code",
                        init.field
                    ),
                ),
            }
        }
        Some(built)
    }

    // ==========================================================================
    // Enums
    // ==========================================================================

    fn build_enum(&mut self, decl: Scoped<'_, EnumDecl>, directive: &ExportDirective) -> EnumInfo {
        let inner = decl.decl;
        let qualified = decl.qualify(&inner.name);
        let mut info = EnumInfo::new(inner.name.clone());
        info.script_name = directive.export_name.clone();
        info.visibility = directive.visibility;
        info.namespaces = decl.namespaces.to_vec();
        info.explicit_backing_type = enum_underlying(inner);
        info.module = directive.module.clone();
        info.documentation = parse_doc(inner.doc.as_deref());
        info.header = inner.file.clone();
        info.editor = directive.is_editor();

        let enum_name = QualifiedName::from_qualified_string(&qualified);
        self.comments
            .insert(enum_name.clone(), info.documentation.clone());

        for entry in &inner.entries {
            let mut script_name = entry.name.clone();
            if let Some(annotation) = entry.annotation.as_deref()
                && let Some(directive) = parse_annotation(annotation, &entry.name, self.diagnostics)
            {
                if directive.is_excluded() {
                    continue;
                }
                script_name = directive.export_name;
            }

            let documentation = parse_doc(entry.doc.as_deref());
            self.comments
                .insert(enum_name.child(entry.name.clone()), documentation.clone());

            let first = info.script_name_of(entry.value).map(str::to_string);
            let inserted = info.insert_entry(
                entry.value,
                EnumEntryInfo {
                    name: entry.name.clone(),
                    script_name,
                    value_literal: entry.value.to_string(),
                    documentation,
                },
            );
            if !inserted {
                self.diagnostics.warn(
                    format!("{qualified}::{}", entry.name),
                    format!(
                        "value {} is already used by '{}'; entry skipped",
                        entry.value,
                        first.unwrap_or_default()
                    ),
                );
            }
        }
        info
    }

    // ==========================================================================
    // Comments
    // ==========================================================================

    fn index_function(&mut self, name: QualifiedName, params: &[ParamDecl], doc: Option<&str>) {
        let types = params.iter().map(|p| p.ty.clone()).collect();
        self.comments.insert_overload(name, types, parse_doc(doc));
    }
}

// ==========================================================================
// Helpers
// ==========================================================================

fn parse_doc(raw: Option<&str>) -> Comment {
    raw.map(parse_doc_comment).unwrap_or_default()
}

fn method_flags(directive: &ExportDirective) -> MethodFlags {
    let mut flags = MethodFlags::empty();
    if directive.flags.contains(ExportFlags::PROPERTY_GETTER) {
        flags |= MethodFlags::PROPERTY_GETTER;
    }
    if directive.flags.contains(ExportFlags::PROPERTY_SETTER) {
        flags |= MethodFlags::PROPERTY_SETTER;
    }
    if directive.flags.contains(ExportFlags::INTEROP_ONLY) {
        flags |= MethodFlags::INTEROP_ONLY;
    }
    flags
}

/// Cheap check for `e:` / `ec:` entries, done before a full decode so
/// that each annotation is decoded (and warned about) once.
fn names_external_target(annotation: &str) -> bool {
    annotation.split(',').any(|entry| {
        let entry = entry.trim();
        entry.starts_with("e:") || entry.starts_with("ec:")
    })
}

/// Type map key of an external target spelling.
fn target_key(target: &str) -> String {
    match TypeExpr::parse(target) {
        Ok(expr) => instantiation_name(&expr),
        Err(_) => target.to_string(),
    }
}

/// Whether an initializer is a constant the managed side can reproduce.
fn is_constant(expr: &Expr) -> bool {
    match expr.kind {
        ExprKind::Literal | ExprKind::String | ExprKind::Null | ExprKind::Member => true,
        ExprKind::Cast | ExprKind::Other => expr.value.is_some(),
        ExprKind::Construct => expr.args.iter().all(is_constant),
        ExprKind::ParamRef => false,
    }
}

/// The first constant constructor initializer of `field`.
fn constant_initializer<'d>(decl: &'d RecordDecl, field: &str) -> Option<&'d Expr> {
    decl.constructors
        .iter()
        .filter(|c| !c.is_copy)
        .flat_map(|c| c.initializers.iter())
        .find(|init| init.field == field && is_constant(&init.expr))
        .map(|init| &init.expr)
}
