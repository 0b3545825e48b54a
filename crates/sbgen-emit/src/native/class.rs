//! Native companions of exported classes.
//!
//! Each class gets a main companion deriving from the runtime template that
//! matches its category, plus a base companion when other exported classes
//! derive from it. The companion registers one `Internal_*` hook per
//! constructor and method, and binds one thunk per event.

use sbgen_core::{ClassInfo, MethodFlags, MethodInfo, SourceKind, TypeCategory, TypeRef};
use sbgen_registry::Registry;

use super::marshal::{HookParam, HookReturn, Marshaller, Streams, declarations};
use crate::names::{base_companion_name, companion_name, hook_name};
use crate::source::Source;
use crate::{uwriteln, uwriteln_indented};

/// A registered native hook: its signature and finished body.
#[derive(Debug)]
pub struct Hook {
    pub name: String,
    pub params: Vec<HookParam>,
    pub ret: HookReturn,
    pub body: Source,
}

impl Hook {
    pub fn return_type(&self) -> &str {
        self.ret.return_type()
    }
}

/// Emits the companion declarations and definitions of one class.
pub struct ClassEmitter<'a> {
    registry: &'a Registry,
    marshal: Marshaller<'a>,
    class: &'a ClassInfo,
    native_name: String,
    script_name: String,
    companion: String,
}

impl<'a> ClassEmitter<'a> {
    pub fn new(registry: &'a Registry, class: &'a ClassInfo) -> Self {
        let marshal = Marshaller::new(registry);
        let native_name = class.native_type_name();
        let script_name = marshal.names().script_name(&native_name);
        let companion = companion_name(&script_name);
        Self {
            registry,
            marshal,
            class,
            native_name,
            script_name,
            companion,
        }
    }

    pub fn companion(&self) -> &str {
        &self.companion
    }

    fn editor(&self) -> bool {
        self.class.is_editor()
    }

    fn export_macro(&self) -> &str {
        self.registry.config.export_macro(self.editor())
    }

    /// Native type wrapped by the companion, as held in its storage.
    fn held_type(&self) -> String {
        let name = &self.native_name;
        match self.class.category {
            TypeCategory::Resource => format!("ResourceHandle<{name}>"),
            TypeCategory::Component => format!("GameObjectHandle<{name}>"),
            TypeCategory::GuiElement => format!("{name}*"),
            _ => format!("SPtr<{name}>"),
        }
    }

    fn held_param(&self) -> String {
        match self.class.category {
            TypeCategory::GuiElement => self.held_type(),
            _ => format!("const {}&", self.held_type()),
        }
    }

    // ==========================================================================
    // Inheritance
    // ==========================================================================

    /// Script name of the exported base class this one derives from, when
    /// that base has a base companion.
    fn parent_base(&self) -> Option<String> {
        let base = self.class.base_class.as_deref()?;
        let parent = self.registry.find_class(base)?;
        if !parent.is_base() || parent.category == TypeCategory::GuiElement {
            return None;
        }
        Some(self.marshal.names().script_name(&parent.native_type_name()))
    }

    fn has_base_companion(&self) -> bool {
        self.class.is_base() && self.class.category != TypeCategory::GuiElement
    }

    /// Root of the base-companion chain for this category.
    fn root_base(&self) -> &'static str {
        match self.class.category {
            TypeCategory::Resource => "ScriptResourceBase",
            TypeCategory::Component => "ScriptComponentBase",
            TypeCategory::ReflectableClass => "ScriptReflectableBase",
            _ => "ScriptObjectBase",
        }
    }

    /// Base companion the main companion slots into its template, if any.
    fn companion_base(&self) -> Option<String> {
        if self.has_base_companion() {
            Some(base_companion_name(&self.script_name))
        } else {
            self.parent_base().map(|parent| base_companion_name(&parent))
        }
    }

    fn template_parent(&self) -> String {
        let companion = &self.companion;
        let native = &self.native_name;
        let base = self
            .companion_base()
            .map(|base| format!(", {base}"))
            .unwrap_or_default();
        if self.class.is_module() {
            return format!("ScriptObject<{companion}>");
        }
        match self.class.category {
            TypeCategory::Resource => format!("TScriptResource<{companion}, {native}{base}>"),
            TypeCategory::Component => format!("TScriptComponent<{companion}, {native}{base}>"),
            TypeCategory::ReflectableClass => {
                format!("TScriptReflectable<{companion}, {native}{base}>")
            }
            TypeCategory::GuiElement => format!("TScriptGUIElement<{companion}>"),
            _ => match self.companion_base() {
                Some(base) => format!("ScriptObject<{companion}, {base}>"),
                None => format!("ScriptObject<{companion}>"),
            },
        }
    }

    /// Name of the parent used in the constructor initializer list.
    fn initializer_parent(&self) -> String {
        let parent = self.template_parent();
        parent
            .split_once('<')
            .map(|(template, _)| template.to_string())
            .unwrap_or(parent)
    }

    fn stores_internal(&self) -> bool {
        !self.class.is_module()
            && matches!(self.class.category, TypeCategory::Class)
            && self.companion_base().is_none()
    }

    // ==========================================================================
    // Header
    // ==========================================================================

    pub fn header(&self, out: &mut Source) {
        if self.has_base_companion() {
            self.base_companion_header(out);
            out.blank_line();
        }

        let export = self.export_macro();
        let companion = &self.companion;
        uwriteln!(out, "class {export} {companion} : public {}", self.template_parent());
        uwriteln!(out, "{{");
        out.deindent(1);
        uwriteln!(out, "public:");
        out.indent(1);
        let (assembly, ns) = if self.editor() {
            ("EDITOR_ASSEMBLY", "EDITOR_NS")
        } else {
            ("ENGINE_ASSEMBLY", "ENGINE_NS")
        };
        uwriteln!(out, "SCRIPT_OBJ({assembly}, {ns}, \"{}\")", self.script_name);
        out.blank_line();

        if self.class.is_module() {
            uwriteln!(out, "{companion}(MonoObject* managedInstance);");
        } else {
            uwriteln!(
                out,
                "{companion}(MonoObject* managedInstance, {} value);",
                self.held_param()
            );
        }
        if self.has_instance_events() {
            uwriteln!(out, "~{companion}();");
        }
        out.blank_line();

        match self.class.category {
            _ if self.class.is_module() => {}
            TypeCategory::Resource | TypeCategory::Component => {
                uwriteln!(out, "static MonoObject* createInstance();");
            }
            TypeCategory::Class | TypeCategory::ReflectableClass => {
                if self.stores_internal() {
                    uwriteln!(out, "SPtr<{}> getInternal() const {{ return mInternal; }}", self.native_name);
                } else if self.class.category == TypeCategory::Class {
                    uwriteln!(out, "SPtr<{}> getInternal() const;", self.native_name);
                }
                uwriteln!(out, "static MonoObject* create(const SPtr<{}>& value);", self.native_name);
            }
            _ => {}
        }
        if self.has_static_events() {
            out.blank_line();
            uwriteln!(out, "static void startUp();");
            uwriteln!(out, "static void shutDown();");
        }

        out.blank_line();
        out.deindent(1);
        uwriteln!(out, "private:");
        out.indent(1);
        if self.stores_internal() {
            uwriteln!(out, "SPtr<{}> mInternal;", self.native_name);
        }
        self.event_declarations(out);
        for hook in self.hooks() {
            uwriteln!(
                out,
                "static {} {}({});",
                hook.return_type(),
                hook.name,
                declarations(&hook.params)
            );
        }
        uwriteln!(out, "}};");
    }

    fn base_companion_header(&self, out: &mut Source) {
        let base = base_companion_name(&self.script_name);
        let parent = self
            .parent_base()
            .map(|parent| base_companion_name(&parent))
            .unwrap_or_else(|| self.root_base().to_string());
        uwriteln!(out, "class {} {base} : public {parent}", self.export_macro());
        uwriteln!(out, "{{");
        out.deindent(1);
        uwriteln!(out, "public:");
        out.indent(1);
        uwriteln!(out, "{base}(MonoObject* instance);");
        uwriteln!(out, "virtual ~{base}() {{}}");
        if self.class.category == TypeCategory::Class && self.parent_base().is_none() {
            out.blank_line();
            uwriteln!(out, "SPtr<{}> getInternal() const {{ return mInternal; }}", self.native_name);
            out.deindent(1);
            uwriteln!(out, "protected:");
            out.indent(1);
            uwriteln!(out, "SPtr<{}> mInternal;", self.native_name);
        }
        uwriteln!(out, "}};");
    }

    // ==========================================================================
    // Source
    // ==========================================================================

    pub fn source(&self, out: &mut Source) {
        let companion = &self.companion;
        if self.has_base_companion() {
            let base = base_companion_name(&self.script_name);
            let parent = self
                .parent_base()
                .map(|parent| base_companion_name(&parent))
                .unwrap_or_else(|| self.root_base().to_string());
            uwriteln!(out, "{base}::{base}(MonoObject* managedInstance)");
            uwriteln_indented!(out, ":{parent}(managedInstance)");
            uwriteln!(out, "{{ }}");
            out.blank_line();
        }

        self.event_storage(out);
        self.constructor(out);
        self.destructor(out);
        self.init_runtime_data(out);
        self.factory(out);
        self.static_event_lifecycle(out);

        for hook in self.hooks() {
            uwriteln!(
                out,
                "{} {companion}::{}({})",
                hook.return_type(),
                hook.name,
                declarations(&hook.params)
            );
            uwriteln!(out, "{{");
            out.append(&hook.body);
            uwriteln!(out, "}}");
            out.blank_line();
        }
    }

    fn constructor(&self, out: &mut Source) {
        let companion = &self.companion;
        let parent = self.initializer_parent();
        if self.class.is_module() {
            uwriteln!(out, "{companion}::{companion}(MonoObject* managedInstance)");
            uwriteln_indented!(out, ":{parent}(managedInstance)");
            uwriteln!(out, "{{ }}");
            out.blank_line();
            return;
        }

        uwriteln!(
            out,
            "{companion}::{companion}(MonoObject* managedInstance, {} value)",
            self.held_param()
        );
        if self.class.category == TypeCategory::Class {
            if self.stores_internal() {
                uwriteln_indented!(out, ":{parent}(managedInstance), mInternal(value)");
            } else {
                uwriteln_indented!(out, ":{parent}(managedInstance)");
            }
        } else {
            uwriteln_indented!(out, ":{parent}(managedInstance, value)");
        }
        uwriteln!(out, "{{");
        if self.class.category == TypeCategory::Class && !self.stores_internal() {
            uwriteln!(out, "mInternal = value;");
        }
        for event in self.instance_events() {
            let placeholders = placeholders(event.params.len());
            uwriteln!(
                out,
                "{} = value->{}.connect(std::bind(&{companion}::{}, this{placeholders}));",
                self.connection_member(event),
                event.source_name,
                event.interop_name
            );
        }
        uwriteln!(out, "}}");
        out.blank_line();

        if self.class.category == TypeCategory::Class && !self.stores_internal() {
            let native = &self.native_name;
            uwriteln!(out, "SPtr<{native}> {companion}::getInternal() const");
            uwriteln!(out, "{{");
            uwriteln!(out, "return std::static_pointer_cast<{native}>(mInternal);");
            uwriteln!(out, "}}");
            out.blank_line();
        }
    }

    fn destructor(&self, out: &mut Source) {
        if !self.has_instance_events() {
            return;
        }
        let companion = &self.companion;
        uwriteln!(out, "{companion}::~{companion}()");
        uwriteln!(out, "{{");
        for event in self.instance_events() {
            uwriteln!(out, "{}.disconnect();", self.connection_member(event));
        }
        uwriteln!(out, "}}");
        out.blank_line();
    }

    fn init_runtime_data(&self, out: &mut Source) {
        let companion = &self.companion;
        uwriteln!(out, "void {companion}::initRuntimeData()");
        uwriteln!(out, "{{");
        for hook in self.hooks() {
            uwriteln!(
                out,
                "metaData.scriptClass->addInternalCall(\"{0}\", (void*)&{companion}::{0});",
                hook.name
            );
        }
        if !self.class.events.is_empty() {
            out.blank_line();
        }
        for event in &self.class.events {
            let signature: Vec<String> = event
                .params
                .iter()
                .map(|p| self.marshal.names().managed(&p.ty))
                .collect();
            uwriteln!(
                out,
                "{0}Thunk = ({0}ThunkDef)metaData.scriptClass->getMethodExact(\"{1}\", \"{2}\")->getThunk();",
                event.interop_name,
                hook_name(&event.interop_name),
                signature.join(",")
            );
        }
        uwriteln!(out, "}}");
        out.blank_line();
    }

    /// `create` for pointer-held classes, `createInstance` for handles.
    fn factory(&self, out: &mut Source) {
        let companion = &self.companion;
        let arity = self.class.runtime_ctor_arity();
        let signature = vec!["bool"; arity].join(",");
        let dummies = vec!["&dummy"; arity].join(", ");
        match self.class.category {
            _ if self.class.is_module() => {}
            TypeCategory::Resource | TypeCategory::Component => {
                uwriteln!(out, "MonoObject* {companion}::createInstance()");
                uwriteln!(out, "{{");
                uwriteln!(out, "bool dummy = false;");
                uwriteln!(out, "void* ctorParams[{arity}] = {{ {dummies} }};");
                out.blank_line();
                uwriteln!(out, "return metaData.scriptClass->createInstance(\"{signature}\", ctorParams);");
                uwriteln!(out, "}}");
                out.blank_line();
            }
            TypeCategory::Class | TypeCategory::ReflectableClass => {
                uwriteln!(
                    out,
                    "MonoObject* {companion}::create(const SPtr<{}>& value)",
                    self.native_name
                );
                uwriteln!(out, "{{");
                uwriteln!(out, "if(value == nullptr) return nullptr;");
                out.blank_line();
                uwriteln!(out, "bool dummy = false;");
                uwriteln!(out, "void* ctorParams[{arity}] = {{ {dummies} }};");
                out.blank_line();
                uwriteln!(
                    out,
                    "MonoObject* managedInstance = metaData.scriptClass->createInstance(\"{signature}\", ctorParams);"
                );
                uwriteln!(out, "new (bs_alloc<{companion}>()) {companion}(managedInstance, value);");
                uwriteln!(out, "return managedInstance;");
                uwriteln!(out, "}}");
                out.blank_line();
            }
            _ => {}
        }
    }

    // ==========================================================================
    // Events
    // ==========================================================================

    /// Module events have no managed instance to call into, so they are
    /// bound once at startup like static events.
    fn event_is_static(&self, event: &MethodInfo) -> bool {
        event.is_static() || self.class.is_module()
    }

    fn instance_events(&self) -> impl Iterator<Item = &MethodInfo> {
        self.class.events.iter().filter(|e| !self.event_is_static(e))
    }

    fn static_events(&self) -> impl Iterator<Item = &MethodInfo> {
        self.class.events.iter().filter(|e| self.event_is_static(e))
    }

    fn has_instance_events(&self) -> bool {
        self.instance_events().next().is_some()
    }

    fn has_static_events(&self) -> bool {
        self.static_events().next().is_some()
    }

    fn connection_member(&self, event: &MethodInfo) -> String {
        connection_member(event, self.event_is_static(event))
    }

    fn event_declarations(&self, out: &mut Source) {
        for event in &self.class.events {
            let native: Vec<String> = event
                .params
                .iter()
                .map(|p| format!("{} {}", self.event_param_type(&p.ty), p.name))
                .collect();
            let thunk: Vec<String> = event
                .params
                .iter()
                .map(|p| self.thunk_type(&p.ty))
                .collect();
            let is_static = self.event_is_static(event);
            let keyword = if is_static { "static " } else { "" };
            let name = &event.interop_name;
            uwriteln!(out, "{keyword}void {name}({});", native.join(", "));
            out.blank_line();

            let mut thunk_params = Vec::with_capacity(thunk.len() + 2);
            if !is_static {
                thunk_params.push("MonoObject*".to_string());
            }
            thunk_params.extend(thunk);
            thunk_params.push("MonoException**".to_string());
            uwriteln!(
                out,
                "typedef void(BS_THUNKCALL *{name}ThunkDef) ({});",
                thunk_params.join(", ")
            );
            uwriteln!(out, "static {name}ThunkDef {name}Thunk;");
            if is_static {
                uwriteln!(out, "static HEvent {};", self.connection_member(event));
            } else {
                uwriteln!(out, "HEvent {};", self.connection_member(event));
            }
            out.blank_line();
        }
    }

    fn event_storage(&self, out: &mut Source) {
        let companion = &self.companion;
        for event in &self.class.events {
            let name = &event.interop_name;
            uwriteln!(out, "{companion}::{name}ThunkDef {companion}::{name}Thunk;");
            if self.event_is_static(event) {
                uwriteln!(out, "HEvent {companion}::{};", self.connection_member(event));
            }
        }
        if !self.class.events.is_empty() {
            out.blank_line();
        }

        for event in &self.class.events {
            self.event_handler(event, out);
        }
    }

    /// The native handler connected to an event; converts its arguments
    /// and invokes the managed thunk.
    fn event_handler(&self, event: &MethodInfo, out: &mut Source) {
        let companion = &self.companion;
        let name = &event.interop_name;
        let params: Vec<String> = event
            .params
            .iter()
            .map(|p| format!("{} {}", self.event_param_type(&p.ty), p.name))
            .collect();
        uwriteln!(out, "void {companion}::{name}({})", params.join(", "));
        uwriteln!(out, "{{");

        let mut args = vec![format!("{name}Thunk")];
        if !self.event_is_static(event) {
            args.push("getManagedInstance()".to_string());
        }
        for param in &event.params {
            args.push(self.thunk_argument(&param.ty, &param.name, out));
        }
        uwriteln!(out, "MonoUtil::invokeThunk({});", args.join(", "));
        uwriteln!(out, "}}");
        out.blank_line();
    }

    fn static_event_lifecycle(&self, out: &mut Source) {
        if !self.has_static_events() {
            return;
        }
        let companion = &self.companion;
        let source = if self.class.is_module() {
            format!("{}::instance().", self.native_name)
        } else {
            format!("{}::", self.native_name)
        };
        uwriteln!(out, "void {companion}::startUp()");
        uwriteln!(out, "{{");
        for event in self.static_events() {
            uwriteln!(
                out,
                "{} = {source}{}.connect(&{companion}::{});",
                self.connection_member(event),
                event.source_name,
                event.interop_name
            );
        }
        uwriteln!(out, "}}");
        out.blank_line();
        uwriteln!(out, "void {companion}::shutDown()");
        uwriteln!(out, "{{");
        for event in self.static_events() {
            uwriteln!(out, "{}.disconnect();", self.connection_member(event));
        }
        uwriteln!(out, "}}");
        out.blank_line();
    }

    fn event_param_type(&self, ty: &TypeRef) -> String {
        let local = self.marshal.names().native_local(ty);
        match ty.category {
            TypeCategory::Builtin | TypeCategory::Enum if !ty.is_array() => local,
            _ => format!("const {local}&"),
        }
    }

    /// Type of an argument as the managed thunk receives it. Structs are
    /// boxed.
    fn thunk_type(&self, ty: &TypeRef) -> String {
        if ty.category == TypeCategory::Struct && !ty.is_array() {
            "MonoObject*".into()
        } else {
            self.marshal.interop_value(ty)
        }
    }

    fn thunk_argument(&self, ty: &TypeRef, name: &str, out: &mut Source) -> String {
        let local = format!("tmp{name}");
        if ty.category == TypeCategory::Struct && !ty.is_array() {
            let companion = self.marshal.names().companion(ty);
            uwriteln!(out, "MonoObject* {local};");
            if ty.is_complex_struct() {
                uwriteln!(out, "{local} = {companion}::box({companion}::toInterop({name}));");
            } else {
                uwriteln!(out, "{local} = {companion}::box({name});");
            }
            return local;
        }
        uwriteln!(out, "{} {local};", self.marshal.interop_value(ty));
        self.marshal.position_to_managed(ty, name, &local, name, out);
        local
    }

    // ==========================================================================
    // Hooks
    // ==========================================================================

    /// Every native hook of the class, constructors first.
    pub fn hooks(&self) -> Vec<Hook> {
        let mut hooks = Vec::new();
        if !self.class.is_module() && self.class.category != TypeCategory::Component {
            for ctor in self.class.ctors.iter().filter(|c| !c.is_cs_only()) {
                hooks.push(self.constructor_hook(ctor));
            }
        }
        for method in self.class.methods.iter().filter(|m| !m.is_cs_only()) {
            hooks.push(self.method_hook(method));
        }
        hooks
    }

    fn constructor_hook(&self, ctor: &MethodInfo) -> Hook {
        let mut params = vec![HookParam {
            ty: "MonoObject*".into(),
            name: "managedInstance".into(),
        }];
        let mut streams = Streams::new();
        for param in &ctor.params {
            params.push(self.marshal.hook_param(param));
            self.marshal.param(param, &mut streams);
        }

        let native = &self.native_name;
        let companion = &self.companion;
        let args = streams.args();
        let mut body = Source::new();
        body.append(&streams.pre);

        let construct = if ctor.is_external() {
            format!("{}{}({args})", external_scope(ctor), ctor.source_name)
        } else {
            match self.class.category {
                TypeCategory::Resource | TypeCategory::GuiElement => {
                    format!("{native}::create({args})")
                }
                _ => format!("bs_shared_ptr_new<{native}>({args})"),
            }
        };
        uwriteln!(body, "{} instance = {construct};", self.held_type());
        match self.class.category {
            TypeCategory::Resource => uwriteln!(
                body,
                "ScriptResourceManager::instance().createBuiltinScriptResource(instance, managedInstance);"
            ),
            _ => uwriteln!(
                body,
                "new (bs_alloc<{companion}>()){companion}(managedInstance, instance);"
            ),
        }
        body.append(&streams.post);

        Hook {
            name: hook_name(&ctor.interop_name),
            params,
            ret: HookReturn::Direct("void".into()),
            body,
        }
    }

    fn method_hook(&self, method: &MethodInfo) -> Hook {
        let mut params = Vec::new();
        let takes_this = !method.is_static() && !self.class.is_module();
        if takes_this {
            params.push(HookParam {
                ty: format!("{}*", self.companion),
                name: "thisPtr".into(),
            });
        }

        let mut streams = Streams::new();
        for param in &method.params {
            params.push(self.marshal.hook_param(param));
            self.marshal.param(param, &mut streams);
        }
        let ret = self.marshal.hook_return(&method.ret.ty);
        if let HookReturn::Parameter(output) = &ret {
            params.push(output.clone());
        }

        let mut body = Source::new();
        body.append(&streams.pre);
        let call = self.call_expression(method, &streams.args());
        self.marshal
            .call_and_return(&method.ret.ty, &call, &streams.post, &mut body);

        Hook {
            name: hook_name(&method.interop_name),
            params,
            ret,
            body,
        }
    }

    /// Expression invoking the wrapped member with `args`.
    fn call_expression(&self, method: &MethodInfo, args: &str) -> String {
        let native = &self.native_name;
        let name = &method.source_name;

        if method.is_external() {
            let scope = external_scope(method);
            let this = self.external_this(method.external_this.as_ref());
            let args = if args.is_empty() {
                this
            } else {
                format!("{this}, {args}")
            };
            return format!("{scope}{name}({args})");
        }

        let target = if self.class.is_module() {
            format!("{native}::instance().")
        } else if method.is_static() {
            format!("{native}::")
        } else {
            format!("{}->", self.instance_expression())
        };

        if method.flags.contains(MethodFlags::FIELD_WRAPPER) {
            if method.flags.contains(MethodFlags::PROPERTY_SETTER) {
                return format!("{target}{name} = {args}");
            }
            return format!("{target}{name}");
        }
        format!("{target}{name}({args})")
    }

    /// Native object behind `thisPtr`.
    fn instance_expression(&self) -> String {
        match self.class.category {
            TypeCategory::Resource | TypeCategory::Component => "thisPtr->getHandle()".into(),
            TypeCategory::GuiElement => format!(
                "static_cast<{}*>(thisPtr->getGUIElement())",
                self.native_name
            ),
            _ => "thisPtr->getInternal()".into(),
        }
    }

    /// `this` argument of an external method, adapted to the ownership its
    /// first parameter expects.
    fn external_this(&self, this: Option<&TypeRef>) -> String {
        let instance = self.instance_expression();
        let Some(this) = this else {
            return instance;
        };
        match (self.class.category, this.source_kind()) {
            (TypeCategory::GuiElement, SourceKind::Pointer) => instance,
            (TypeCategory::GuiElement, _) => format!("*{instance}"),
            (_, SourceKind::Pointer) => format!("{instance}.get()"),
            (_, SourceKind::Reference | SourceKind::Value) => format!("*{instance}"),
            _ => instance,
        }
    }
}

/// `Scope::` qualifying an external function, empty for global functions.
fn external_scope(method: &MethodInfo) -> String {
    method
        .external_class
        .as_deref()
        .map(|scope| format!("{scope}::"))
        .unwrap_or_default()
}

fn connection_member(event: &MethodInfo, is_static: bool) -> String {
    let name = &event.interop_name;
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    if is_static {
        format!("{name}Conn")
    } else {
        format!("m{capitalized}Conn")
    }
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!(", std::placeholders::_{i}"))
        .collect()
}
