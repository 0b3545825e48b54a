//! Marshalling blocks.
//!
//! Every typed position of a hook is converted by one block. A block writes
//! into three streams: `pre` (statements before the call), `args` (the
//! argument expression handed to the native call) and `post` (statements
//! after the call, writing outputs back to managed memory). A hook body is
//! then `pre`, the call, `post` and an optional `return`.
//!
//! ## Conversions
//!
//! | category | hook side | native side |
//! |---|---|---|
//! | builtin | value, or `T*` when written back | direct |
//! | enum | backing integer | unchecked cast |
//! | plain struct | `S*` | dereference / value copy |
//! | complex struct | `__SInterop*` | `fromInterop` / `toInterop` |
//! | string, wstring, path | `MonoString*` | string marshalling helpers |
//! | objects | `MonoObject*` | companion lookup, managers for handles |
//! | arrays | `MonoArray*` | per-element loop over `ScriptArray` |
//! | async ops | `MonoObject*` | wrapped with a result conversion callback |

use sbgen_core::{BuiltinKind, ParamInfo, SourceKind, TypeCategory, TypeRef};
use sbgen_registry::Registry;

use crate::names::TypeNames;
use crate::source::Source;
use crate::{uwrite, uwriteln, uwriteln_indented};

/// Name of the trailing hook parameter that receives struct returns, and of
/// the local returned otherwise.
pub const OUTPUT_NAME: &str = "__output";

/// The three streams a hook body is stitched from.
#[derive(Debug, Default)]
pub struct Streams {
    pub pre: Source,
    pub args: Vec<String>,
    pub post: Source,
}

impl Streams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn args(&self) -> String {
        self.args.join(", ")
    }
}

/// One parameter of a hook signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookParam {
    pub ty: String,
    pub name: String,
}

impl HookParam {
    fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }

    pub fn declaration(&self) -> String {
        format!("{} {}", self.ty, self.name)
    }
}

/// How a hook hands its result back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookReturn {
    /// The hook returns this type directly (`void` included).
    Direct(String),
    /// The hook returns `void` and writes through a trailing parameter.
    Parameter(HookParam),
}

impl HookReturn {
    pub fn return_type(&self) -> &str {
        match self {
            HookReturn::Direct(ty) => ty,
            HookReturn::Parameter(_) => "void",
        }
    }
}

/// Builds marshalling blocks for one registry.
#[derive(Clone, Copy)]
pub struct Marshaller<'a> {
    names: TypeNames<'a>,
    registry: &'a Registry,
}

impl<'a> Marshaller<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            names: TypeNames::new(&registry.types),
            registry,
        }
    }

    pub fn names(&self) -> TypeNames<'a> {
        self.names
    }

    // ==========================================================================
    // Hook signatures
    // ==========================================================================

    /// Interop type of one element as it crosses the boundary.
    pub fn interop_element(&self, ty: &TypeRef) -> String {
        match ty.category {
            TypeCategory::Builtin => self.names.native_element(ty),
            TypeCategory::Enum => self.names.enum_backing(ty).to_string(),
            TypeCategory::Struct if ty.is_complex_struct() => format!("__{}Interop", ty.name),
            TypeCategory::Struct => ty.name.clone(),
            TypeCategory::String | TypeCategory::WString | TypeCategory::Path => {
                "MonoString*".into()
            }
            _ => "MonoObject*".into(),
        }
    }

    /// Interop type of a whole position.
    pub fn interop_value(&self, ty: &TypeRef) -> String {
        if ty.is_async_op() {
            "MonoObject*".into()
        } else if ty.is_array() {
            "MonoArray*".into()
        } else {
            self.interop_element(ty)
        }
    }

    pub fn hook_param(&self, param: &ParamInfo) -> HookParam {
        let ty = &param.ty;
        let value = self.interop_value(ty);
        let by_pointer = ty.is_output() || (is_struct_value(ty));
        let spelled = if by_pointer { format!("{value}*") } else { value };
        HookParam::new(spelled, param.name.clone())
    }

    pub fn hook_return(&self, ty: &TypeRef) -> HookReturn {
        if ty.is_void() {
            return HookReturn::Direct("void".into());
        }
        if is_struct_value(ty) {
            let value = self.interop_element(ty);
            return HookReturn::Parameter(HookParam::new(format!("{value}*"), OUTPUT_NAME));
        }
        HookReturn::Direct(self.interop_value(ty))
    }

    // ==========================================================================
    // Parameters
    // ==========================================================================

    /// Marshal one parameter into `streams`.
    pub fn param(&self, param: &ParamInfo, streams: &mut Streams) {
        let name = param.name.as_str();
        let ty = &param.ty;
        if ty.is_output() {
            self.output_param(name, ty, streams);
        } else {
            self.input_param(name, ty, streams);
        }
    }

    fn input_param(&self, name: &str, ty: &TypeRef, streams: &mut Streams) {
        let pre = &mut streams.pre;
        if ty.is_array() {
            let vec = format!("vec{name}");
            self.array_to_native(ty, name, &vec, name, pre);
            streams.args.push(vec);
            return;
        }

        let arg = match ty.category {
            TypeCategory::Builtin | TypeCategory::MonoObject => name.to_string(),
            TypeCategory::Enum => format!("({}){name}", self.names.native_element(ty)),
            TypeCategory::Struct if !ty.is_complex_struct() => format!("*{name}"),
            _ => {
                let local = format!("tmp{name}");
                uwriteln!(pre, "{} {local};", self.names.native_element(ty));
                let src = if ty.category == TypeCategory::Struct {
                    format!("*{name}")
                } else {
                    name.to_string()
                };
                self.to_native(ty, &src, &local, name, pre);
                local
            }
        };
        streams.args.push(argument(ty, arg));
    }

    fn output_param(&self, name: &str, ty: &TypeRef, streams: &mut Streams) {
        let local = if ty.is_array() {
            format!("vec{name}")
        } else {
            format!("tmp{name}")
        };
        uwriteln!(streams.pre, "{} {local};", self.names.native_local(ty));
        streams.args.push(argument(ty, local.clone()));

        let post = &mut streams.post;
        match ty.category {
            TypeCategory::Builtin | TypeCategory::Enum | TypeCategory::Struct
                if !ty.is_array() && !ty.is_async_op() =>
            {
                self.write_value_back(ty, &local, name, post);
            }
            _ => {
                let managed = format!("{local}_out");
                uwriteln!(post, "{} {managed};", self.interop_value(ty));
                self.position_to_managed(ty, &local, &managed, name, post);
                uwriteln!(post, "MonoUtil::referenceCopy({name}, (MonoObject*){managed});");
            }
        }
    }

    /// Write a value-like output back through its hook pointer.
    pub fn write_value_back(&self, ty: &TypeRef, local: &str, target: &str, post: &mut Source) {
        match ty.category {
            TypeCategory::Enum => {
                uwriteln!(post, "*{target} = ({}){local};", self.names.enum_backing(ty));
            }
            TypeCategory::Struct if ty.is_complex_struct() => {
                let companion = self.names.companion(ty);
                let interop = format!("interop{target}");
                uwriteln!(post, "{} {interop};", self.interop_element(ty));
                uwriteln!(post, "{interop} = {companion}::toInterop({local});");
                uwriteln!(
                    post,
                    "MonoUtil::valueCopy({target}, &{interop}, {companion}::getMetaData()->scriptClass->_getInternalClass());"
                );
            }
            _ => uwriteln!(post, "*{target} = {local};"),
        }
    }

    // ==========================================================================
    // Returns
    // ==========================================================================

    /// Write the call and the conversion of its result into `body`.
    ///
    /// `pre` has already been written by the caller; the post stream of the
    /// parameters is written between the call and the return.
    pub fn call_and_return(&self, ret: &TypeRef, call: &str, post: &Source, body: &mut Source) {
        if ret.is_void() {
            uwriteln!(body, "{call};");
            body.append(post);
            return;
        }

        let local = if ret.is_array() {
            format!("vec{OUTPUT_NAME}")
        } else {
            format!("tmp{OUTPUT_NAME}")
        };
        uwriteln!(body, "{} {local};", self.names.native_local(ret));
        uwriteln!(body, "{local} = {call};");
        body.append(post);
        body.newline();

        match self.hook_return(ret) {
            HookReturn::Parameter(_) => {
                self.write_value_back(ret, &local, OUTPUT_NAME, body);
            }
            HookReturn::Direct(ty) => {
                uwriteln!(body, "{ty} {OUTPUT_NAME};");
                self.position_to_managed(ret, &local, OUTPUT_NAME, OUTPUT_NAME, body);
                body.newline();
                uwriteln!(body, "return {OUTPUT_NAME};");
            }
        }
    }

    // ==========================================================================
    // Whole positions
    // ==========================================================================

    /// Convert a native position into its (declared) managed counterpart.
    pub fn position_to_managed(&self, ty: &TypeRef, src: &str, dst: &str, tag: &str, out: &mut Source) {
        if ty.is_async_op() {
            self.async_to_managed(ty, src, dst, tag, out);
        } else if ty.is_array() {
            self.array_to_managed(ty, src, dst, tag, out);
        } else {
            self.to_managed(ty, src, dst, tag, out);
        }
    }

    /// Fill the native vector `dst` from the managed array `src`.
    pub fn array_to_native(&self, ty: &TypeRef, src: &str, dst: &str, tag: &str, out: &mut Source) {
        let element = ty.element();
        let array = format!("array{tag}");
        uwriteln!(out, "{} {dst};", self.names.native_local(ty));
        uwriteln!(out, "if({src} != nullptr)");
        uwriteln!(out, "{{");
        uwriteln!(out, "ScriptArray {array}({src});");
        uwriteln!(out, "{dst}.resize({array}.size());");
        uwriteln!(out, "for(UINT32 i = 0; i < {array}.size(); i++)");
        uwriteln!(out, "{{");
        let item = format!("{array}.get<{}>(i)", self.interop_element(&element));
        let slot = format!("{dst}[i]");
        match element.category {
            TypeCategory::Struct if !element.is_complex_struct() => {
                uwriteln!(out, "{slot} = {item};");
            }
            _ => self.to_native(&element, &item, &slot, &format!("{tag}_i"), out),
        }
        uwriteln!(out, "}}");
        uwriteln!(out, "}}");
    }

    /// Build the managed array `dst` from the native vector `src`.
    fn array_to_managed(&self, ty: &TypeRef, src: &str, dst: &str, tag: &str, out: &mut Source) {
        let element = ty.element();
        let size = format!("arraySize{tag}");
        let array = format!("array{tag}");
        let item = format!("arrayElem{tag}");
        uwriteln!(out, "int {size} = (int){src}.size();");
        uwriteln!(
            out,
            "ScriptArray {array} = ScriptArray::create<{}>({size});",
            self.array_class(&element)
        );
        uwriteln!(out, "for(int i = 0; i < {size}; i++)");
        uwriteln!(out, "{{");
        uwriteln!(out, "{} {item};", self.interop_element(&element));
        self.to_managed(&element, &format!("{src}[i]"), &item, &format!("{tag}_i"), out);
        uwriteln!(out, "{array}.set(i, {item});");
        uwriteln!(out, "}}");
        uwriteln!(out, "{dst} = {array}.getInternal();");
    }

    /// Wrap a native async operation, converting its result on completion.
    fn async_to_managed(&self, ty: &TypeRef, src: &str, dst: &str, tag: &str, out: &mut Source) {
        let element = ty.element();
        let native = self.names.native_local(&element);
        let interop = self.interop_value(&element);
        let callback = format!("convertCallback{tag}");
        uwriteln!(out, "auto {callback} = [](const Any& returnVal)");
        uwriteln!(out, "{{");
        uwriteln!(out, "{native} nativeObj = any_cast<{native}>(returnVal);");
        uwriteln!(out, "{interop} monoObj;");
        self.position_to_managed(&element, "nativeObj", "monoObj", "Obj", out);
        match self.box_class(&element) {
            Some(class) => uwriteln!(out, "return MonoUtil::box({class}, &monoObj);"),
            None => uwriteln!(out, "return (MonoObject*)monoObj;"),
        }
        uwriteln!(out, "}};");
        uwriteln!(
            out,
            "{dst} = ScriptAsyncOpBase::create({src}, {callback}, {});",
            self.async_result_class(&element)
        );
    }

    // ==========================================================================
    // Elements
    // ==========================================================================

    /// Assign the native element `dst` (already declared) from the managed
    /// element `src`.
    pub fn to_native(&self, ty: &TypeRef, src: &str, dst: &str, tag: &str, out: &mut Source) {
        let name = &ty.name;
        match ty.category {
            TypeCategory::Builtin | TypeCategory::MonoObject => {
                uwriteln!(out, "{dst} = {src};");
            }
            TypeCategory::Enum => uwriteln!(out, "{dst} = ({name}){src};"),
            TypeCategory::Struct if ty.is_complex_struct() => {
                uwriteln!(out, "{dst} = {}::fromInterop({src});", self.names.companion(ty));
            }
            TypeCategory::Struct => uwriteln!(out, "{dst} = {src};"),
            TypeCategory::String | TypeCategory::Path => {
                uwriteln!(out, "{dst} = MonoUtil::monoToString({src});");
            }
            TypeCategory::WString => uwriteln!(out, "{dst} = MonoUtil::monoToWString({src});"),
            TypeCategory::Class | TypeCategory::ReflectableClass => {
                let companion = self.names.companion(ty);
                let script = format!("script{tag}");
                uwriteln!(out, "{companion}* {script};");
                uwriteln!(out, "{script} = {companion}::toNative({src});");
                uwriteln!(out, "if({script} != nullptr)");
                uwriteln!(out, "{{");
                let internal = if ty.references_base() {
                    format!("std::static_pointer_cast<{name}>({script}->getInternal())")
                } else {
                    format!("{script}->getInternal()")
                };
                match ty.source_kind() {
                    SourceKind::SharedPtr => uwriteln!(out, "{dst} = {internal};"),
                    SourceKind::Pointer => uwriteln!(out, "{dst} = {internal}.get();"),
                    _ => uwriteln!(out, "{dst} = *{internal};"),
                }
                uwriteln!(out, "}}");
            }
            TypeCategory::Resource | TypeCategory::Component => {
                let companion = self.names.companion(ty);
                let script = format!("script{tag}");
                uwriteln!(out, "{companion}* {script};");
                uwriteln!(out, "{script} = {companion}::toNative({src});");
                uwriteln!(out, "if({script} != nullptr)");
                if !ty.references_base() {
                    uwriteln_indented!(out, "{dst} = {script}->getHandle();");
                } else if ty.category == TypeCategory::Resource {
                    uwriteln_indented!(
                        out,
                        "{dst} = static_resource_cast<{name}>({script}->getGenericHandle());"
                    );
                } else {
                    uwriteln_indented!(
                        out,
                        "{dst} = static_object_cast<{name}>({script}->getComponent());"
                    );
                }
            }
            TypeCategory::SceneObject => {
                let script = format!("script{tag}");
                uwriteln!(out, "ScriptSceneObject* {script};");
                uwriteln!(out, "{script} = ScriptSceneObject::toNative({src});");
                uwriteln!(out, "if({script} != nullptr)");
                uwriteln_indented!(out, "{dst} = {script}->getHandle();");
            }
            TypeCategory::GuiElement => {
                let script = format!("script{tag}");
                uwriteln!(out, "ScriptGUIElementBaseTBase* {script};");
                uwriteln!(out, "{script} = ScriptGUIElementBaseTBase::toNative({src});");
                uwriteln!(out, "if({script} != nullptr)");
                uwriteln_indented!(out, "{dst} = ({name}*){script}->getGUIElement();");
            }
            TypeCategory::ScriptObject => {
                uwriteln!(out, "{dst} = ScriptObjectBase::toNative({src});");
            }
        }
    }

    /// Assign the managed element `dst` (already declared) from the native
    /// element `src`.
    pub fn to_managed(&self, ty: &TypeRef, src: &str, dst: &str, tag: &str, out: &mut Source) {
        let name = &ty.name;
        match ty.category {
            TypeCategory::Builtin | TypeCategory::MonoObject => {
                uwriteln!(out, "{dst} = {src};");
            }
            TypeCategory::Enum => {
                uwriteln!(out, "{dst} = ({}){src};", self.names.enum_backing(ty));
            }
            TypeCategory::Struct if ty.is_complex_struct() => {
                uwriteln!(out, "{dst} = {}::toInterop({src});", self.names.companion(ty));
            }
            TypeCategory::Struct => uwriteln!(out, "{dst} = {src};"),
            TypeCategory::String => uwriteln!(out, "{dst} = MonoUtil::stringToMono({src});"),
            TypeCategory::WString => uwriteln!(out, "{dst} = MonoUtil::wstringToMono({src});"),
            TypeCategory::Path => {
                uwriteln!(out, "{dst} = MonoUtil::stringToMono({src}.toString());");
            }
            TypeCategory::Class | TypeCategory::ReflectableClass => {
                let shared = match ty.source_kind() {
                    SourceKind::SharedPtr => src.to_string(),
                    SourceKind::Pointer => format!("bs_shared_ptr_new<{name}>(*{src})"),
                    _ => format!("bs_shared_ptr_new<{name}>({src})"),
                };
                if ty.references_base() {
                    self.dispatch_on_rtti(ty, &shared, dst, tag, out);
                } else {
                    uwriteln!(out, "{dst} = {}::create({shared});", self.names.companion(ty));
                }
            }
            TypeCategory::Resource => {
                let script = format!("script{tag}");
                uwriteln!(out, "ScriptResourceBase* {script};");
                uwriteln!(
                    out,
                    "{script} = ScriptResourceManager::instance().getScriptResource({src}, true);"
                );
                write_managed_instance(&script, dst, out);
            }
            TypeCategory::Component => {
                let script = format!("script{tag}");
                uwriteln!(out, "ScriptComponentBase* {script};");
                uwriteln!(
                    out,
                    "{script} = ScriptGameObjectManager::instance().getBuiltinScriptComponent(static_object_cast<Component>({src}));"
                );
                write_managed_instance(&script, dst, out);
            }
            TypeCategory::SceneObject => {
                let script = format!("script{tag}");
                uwriteln!(out, "ScriptSceneObject* {script};");
                uwriteln!(
                    out,
                    "{script} = ScriptGameObjectManager::instance().getOrCreateScriptSceneObject({src});"
                );
                write_managed_instance(&script, dst, out);
            }
            TypeCategory::ScriptObject => write_managed_instance(src, dst, out),
            // Only accepted as input; never converted back.
            TypeCategory::GuiElement => uwriteln!(out, "{dst} = nullptr;"),
        }
    }

    /// Create the companion of the most derived exported class of `src`.
    fn dispatch_on_rtti(&self, ty: &TypeRef, shared: &str, dst: &str, tag: &str, out: &mut Source) {
        let name = &ty.name;
        let base = self.names.script_name(name);
        let base_companion = crate::names::companion_name(&base);
        let children = self.registry.transitive_children(name);

        let local = format!("sptr{tag}");
        uwriteln!(out, "SPtr<{name}> {local} = {shared};");
        if children.is_empty() {
            uwriteln!(out, "{dst} = {base_companion}::create({local});");
            return;
        }

        let rtti = format!("rttiId{tag}");
        uwriteln!(out, "if({local} != nullptr)");
        uwriteln!(out, "{{");
        uwriteln!(out, "UINT32 {rtti} = {local}->getRTTI()->getRTTIId();");
        for (index, child) in children.iter().enumerate() {
            let keyword = if index == 0 { "if" } else { "else if" };
            let companion = crate::names::companion_name(&self.names.script_name(child));
            uwriteln!(out, "{keyword}({rtti} == TID_{child})");
            uwriteln_indented!(
                out,
                "{dst} = {companion}::create(std::static_pointer_cast<{child}>({local}));"
            );
        }
        uwriteln!(out, "else");
        uwriteln_indented!(out, "{dst} = {base_companion}::create({local});");
        uwriteln!(out, "}}");
        uwriteln!(out, "else");
        uwriteln_indented!(out, "{dst} = {base_companion}::create({local});");
    }

    // ==========================================================================
    // Helpers
    // ==========================================================================

    /// Class argument of `ScriptArray::create` for an element.
    fn array_class(&self, element: &TypeRef) -> String {
        match element.category {
            TypeCategory::Builtin | TypeCategory::Enum => {
                self.interop_element(element)
            }
            TypeCategory::String | TypeCategory::Path => "String".into(),
            TypeCategory::WString => "WString".into(),
            TypeCategory::MonoObject => "MonoObject".into(),
            TypeCategory::Resource => "ScriptResourceBase".into(),
            _ => self.names.companion(element),
        }
    }

    /// Boxing class for value results of an async operation.
    fn box_class(&self, element: &TypeRef) -> Option<String> {
        if element.is_array() {
            return None;
        }
        match element.category {
            TypeCategory::Builtin | TypeCategory::Enum => {
                let kind = element.builtin.unwrap_or(BuiltinKind::Int32);
                Some(format!("MonoUtil::get{}Class()", kind.native_name().to_uppercase()))
            }
            TypeCategory::Struct => Some(format!(
                "{}::getMetaData()->scriptClass->_getInternalClass()",
                self.names.companion(element)
            )),
            _ => None,
        }
    }

    fn async_result_class(&self, element: &TypeRef) -> String {
        match element.category {
            TypeCategory::Builtin
            | TypeCategory::Enum
            | TypeCategory::String
            | TypeCategory::WString
            | TypeCategory::Path
            | TypeCategory::MonoObject => "nullptr".into(),
            _ => format!("{}::getMetaData()->scriptClass", self.names.companion(element)),
        }
    }
}

/// Structs cross the boundary by pointer in both directions.
fn is_struct_value(ty: &TypeRef) -> bool {
    ty.category == TypeCategory::Struct && !ty.is_array() && !ty.is_async_op()
}

/// Adapt a native local to the ownership the callee expects.
fn argument(ty: &TypeRef, local: String) -> String {
    if ty.is_array() || ty.is_async_op() {
        return local;
    }
    match (ty.category, ty.source_kind()) {
        (category, SourceKind::Pointer) if category.is_value_like() => {
            if local.starts_with('*') {
                local.trim_start_matches('*').to_string()
            } else {
                format!("&{local}")
            }
        }
        (category, SourceKind::Pointer) if category.is_handle() => format!("{local}.get()"),
        (category, SourceKind::Reference | SourceKind::Value) if category.is_handle() => {
            format!("*{local}")
        }
        (TypeCategory::GuiElement, SourceKind::Reference | SourceKind::Value) => {
            format!("*{local}")
        }
        _ => local,
    }
}

fn write_managed_instance(script: &str, dst: &str, out: &mut Source) {
    uwriteln!(out, "if({script} != nullptr)");
    uwriteln_indented!(out, "{dst} = {script}->getManagedInstance();");
    uwriteln!(out, "else");
    uwriteln_indented!(out, "{dst} = nullptr;");
}

/// Comma-joined hook parameter declarations.
pub fn declarations(params: &[HookParam]) -> String {
    let mut text = String::new();
    for (index, param) in params.iter().enumerate() {
        if index > 0 {
            text.push_str(", ");
        }
        uwrite!(text, "{}", param.declaration());
    }
    text
}
