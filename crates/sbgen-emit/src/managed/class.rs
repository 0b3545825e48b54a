//! Managed wrapper classes.
//!
//! A wrapper holds no state of its own: every constructor, method and
//! property forwards to an `extern` hook implemented by the native
//! companion, passing `mCachedPtr` as the instance. Events are raised by
//! the native side through `Internal_*` methods the companion binds as
//! thunks.

use sbgen_core::{ClassInfo, MethodInfo, ParamInfo, PropertyInfo, TypeCategory, TypeRef};
use sbgen_registry::Registry;

use super::docs::write_doc;
use super::style::write_attributes;
use crate::names::{TypeNames, hook_name};
use crate::source::Source;
use crate::uwriteln;

/// How a value crosses the managed side of a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Passing {
    Value,
    Ref,
    Out,
}

impl Passing {
    fn of(ty: &TypeRef) -> Self {
        if ty.is_output() {
            Passing::Out
        } else if ty.category == TypeCategory::Struct && !ty.is_array() {
            Passing::Ref
        } else {
            Passing::Value
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Passing::Value => "",
            Passing::Ref => "ref ",
            Passing::Out => "out ",
        }
    }
}

fn returns_through_parameter(ty: &TypeRef) -> bool {
    ty.category == TypeCategory::Struct && !ty.is_array() && !ty.is_async_op()
}

pub struct ManagedClassEmitter<'a> {
    names: TypeNames<'a>,
    registry: &'a Registry,
    class: &'a ClassInfo,
    script_name: String,
}

impl<'a> ManagedClassEmitter<'a> {
    pub fn new(registry: &'a Registry, class: &'a ClassInfo) -> Self {
        let names = TypeNames::new(&registry.types);
        let script_name = names.script_name(&class.native_type_name());
        Self {
            names,
            registry,
            class,
            script_name,
        }
    }

    fn is_module(&self) -> bool {
        self.class.is_module()
    }

    fn base_class(&self) -> Option<String> {
        if self.is_module() {
            return None;
        }
        if let Some(base) = self.class.base_class.as_deref()
            && self.registry.types.contains(base)
        {
            return Some(self.names.script_name(base));
        }
        let root = match self.class.category {
            TypeCategory::Resource => "Resource",
            TypeCategory::Component => "Component",
            TypeCategory::GuiElement => "GUIElement",
            _ => "ScriptObject",
        };
        Some(root.to_string())
    }

    pub fn write(&self, out: &mut Source) {
        let class = self.class;
        write_doc(&class.documentation, &[], out);
        let visibility = class.visibility;
        let name = &self.script_name;
        match self.base_class() {
            Some(base) => uwriteln!(out, "{visibility} partial class {name} : {base}"),
            None => uwriteln!(out, "{visibility} static partial class {name}"),
        }
        uwriteln!(out, "{{");

        let mut sections = Vec::new();
        if !self.is_module() {
            sections.push(self.runtime_constructor());
        }
        if self.has_constructors() {
            for ctor in &class.ctors {
                if !ctor.is_interop_only() {
                    sections.push(self.constructor(ctor));
                }
            }
        }
        for property in &class.properties {
            sections.push(self.property(property));
        }
        for method in &class.methods {
            if !method.is_interop_only() && !self.is_property_half(method) {
                sections.push(self.method(method));
            }
        }
        for event in &class.events {
            sections.push(self.event(event));
        }
        for method in self.hooks() {
            sections.push(self.extern_declaration(method));
        }

        for (index, section) in sections.iter().enumerate() {
            if index > 0 {
                out.blank_line();
            }
            out.append(section);
        }
        uwriteln!(out, "}}");
    }

    fn has_constructors(&self) -> bool {
        !self.is_module() && self.class.category != TypeCategory::Component
    }

    /// Methods with a native hook, in registration order.
    fn hooks(&self) -> Vec<&'a MethodInfo> {
        let class = self.class;
        let ctors = class
            .ctors
            .iter()
            .filter(|_| self.has_constructors());
        ctors
            .chain(class.methods.iter())
            .filter(|m| !m.is_cs_only())
            .collect()
    }

    fn is_property_half(&self, method: &MethodInfo) -> bool {
        method.is_property()
            && self.class.properties.iter().any(|p| {
                p.getter.as_deref() == Some(method.interop_name.as_str())
                    || p.setter.as_deref() == Some(method.interop_name.as_str())
            })
    }

    // ==========================================================================
    // Constructors
    // ==========================================================================

    /// A constructor only the runtime calls, with a bool-only signature no
    /// user constructor takes.
    fn runtime_constructor(&self) -> Source {
        let mut out = Source::new();
        let params: Vec<String> = (0..self.class.runtime_ctor_arity())
            .map(|i| format!("bool __dummy{i}"))
            .collect();
        uwriteln!(out, "private {}({}) {{ }}", self.script_name, params.join(", "));
        if self.class.category == TypeCategory::Component {
            uwriteln!(out, "protected {}() {{ }}", self.script_name);
        }
        out
    }

    fn constructor(&self, ctor: &MethodInfo) -> Source {
        let mut out = Source::new();
        let names: Vec<&str> = ctor.params.iter().map(|p| p.name.as_str()).collect();
        write_doc(&ctor.documentation, &names, &mut out);
        let params = self.wrapper_params(&ctor.params);
        uwriteln!(out, "{} {}({params})", ctor.visibility, self.script_name);

        if ctor.is_cs_only() {
            out.indent(1);
            uwriteln!(out, ": this({})", self.forwarded_args(ctor));
            out.deindent(1);
            uwriteln!(out, "{{ }}");
            return out;
        }

        uwriteln!(out, "{{");
        let mut args = vec!["this".to_string()];
        args.extend(ctor.params.iter().map(call_arg));
        uwriteln!(out, "{}({});", hook_name(&ctor.interop_name), args.join(", "));
        uwriteln!(out, "}}");
        out
    }

    // ==========================================================================
    // Members
    // ==========================================================================

    fn property(&self, property: &PropertyInfo) -> Source {
        let mut out = Source::new();
        write_doc(&property.documentation, &[], &mut out);
        write_attributes(&property.style, &mut out);
        let ty = self.names.managed(&property.ty);
        let keyword = if property.is_static || self.is_module() {
            "static "
        } else {
            ""
        };
        uwriteln!(out, "{} {keyword}{ty} {}", property.visibility, property.name);
        uwriteln!(out, "{{");
        let this = self.this_arg(property.is_static);
        let by_parameter = returns_through_parameter(&property.ty);

        if let Some(getter) = &property.getter {
            let hook = hook_name(getter);
            if by_parameter {
                uwriteln!(out, "get");
                uwriteln!(out, "{{");
                uwriteln!(out, "{ty} temp;");
                uwriteln!(out, "{hook}({}out temp);", this.map(|t| format!("{t}, ")).unwrap_or_default());
                uwriteln!(out, "return temp;");
                uwriteln!(out, "}}");
            } else {
                uwriteln!(out, "get {{ return {hook}({}); }}", this.unwrap_or_default());
            }
        }
        if let Some(setter) = &property.setter {
            let hook = hook_name(setter);
            let value = if by_parameter { "ref value" } else { "value" };
            let args = match this {
                Some(this) => format!("{this}, {value}"),
                None => value.to_string(),
            };
            uwriteln!(out, "set {{ {hook}({args}); }}");
        }
        uwriteln!(out, "}}");
        out
    }

    fn method(&self, method: &MethodInfo) -> Source {
        let mut out = Source::new();
        let names: Vec<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
        write_doc(&method.documentation, &names, &mut out);
        let keyword = if method.is_static() || self.is_module() {
            "static "
        } else {
            ""
        };
        let ret = &method.ret.ty;
        let ret_name = self.managed_return(ret);
        uwriteln!(
            out,
            "{} {keyword}{ret_name} {}({})",
            method.visibility,
            method.script_name,
            self.wrapper_params(&method.params)
        );
        uwriteln!(out, "{{");
        let return_keyword = if ret.is_void() { "" } else { "return " };

        if method.is_cs_only() {
            let target = method
                .forwards_to
                .as_deref()
                .and_then(|name| self.class.find_by_interop_name(name))
                .map(|m| m.script_name.as_str())
                .unwrap_or(method.script_name.as_str());
            uwriteln!(out, "{return_keyword}{target}({});", self.forwarded_args(method));
            uwriteln!(out, "}}");
            return out;
        }

        let mut args: Vec<String> = self
            .this_arg(method.is_static())
            .into_iter()
            .map(String::from)
            .collect();
        args.extend(method.params.iter().map(call_arg));
        let hook = hook_name(&method.interop_name);
        if returns_through_parameter(ret) {
            args.push("out temp".into());
            uwriteln!(out, "{ret_name} temp;");
            uwriteln!(out, "{hook}({});", args.join(", "));
            uwriteln!(out, "return temp;");
        } else {
            uwriteln!(out, "{return_keyword}{hook}({});", args.join(", "));
        }
        uwriteln!(out, "}}");
        out
    }

    fn event(&self, event: &MethodInfo) -> Source {
        let mut out = Source::new();
        let types: Vec<String> = event
            .params
            .iter()
            .map(|p| self.names.managed(&p.ty))
            .collect();
        let params: Vec<String> = event
            .params
            .iter()
            .zip(&types)
            .map(|(p, ty)| format!("{ty} {}", p.name))
            .collect();
        let args: Vec<&str> = event.params.iter().map(|p| p.name.as_str()).collect();
        let keyword = if event.is_static() || self.is_module() {
            "static "
        } else {
            ""
        };
        let name = &event.script_name;
        let handler = hook_name(&event.interop_name);

        write_doc(&event.documentation, &[], &mut out);
        if event.flags.contains(sbgen_core::MethodFlags::CALLBACK) {
            uwriteln!(out, "{keyword}partial void Callback_{name}({});", params.join(", "));
            out.blank_line();
            uwriteln!(out, "private {keyword}void {handler}({})", params.join(", "));
            uwriteln!(out, "{{");
            uwriteln!(out, "Callback_{name}({});", args.join(", "));
            uwriteln!(out, "}}");
            return out;
        }

        let action = if types.is_empty() {
            "Action".to_string()
        } else {
            format!("Action<{}>", types.join(", "))
        };
        uwriteln!(out, "{} {keyword}event {action} {name};", event.visibility);
        out.blank_line();
        uwriteln!(out, "private {keyword}void {handler}({})", params.join(", "));
        uwriteln!(out, "{{");
        uwriteln!(out, "{name}?.Invoke({});", args.join(", "));
        uwriteln!(out, "}}");
        out
    }

    // ==========================================================================
    // Hooks
    // ==========================================================================

    fn extern_declaration(&self, method: &MethodInfo) -> Source {
        let mut out = Source::new();
        let mut params = Vec::new();
        let mut ret = "void".to_string();
        if method.is_constructor() {
            params.push(format!("{} managedInstance", self.script_name));
        } else if !method.is_static() && !self.is_module() {
            params.push("IntPtr thisPtr".into());
        }
        for param in &method.params {
            let passing = Passing::of(&param.ty);
            params.push(format!(
                "{}{} {}",
                passing.keyword(),
                self.names.managed(&param.ty),
                param.name
            ));
        }
        let ret_ty = &method.ret.ty;
        if !method.is_constructor() && !ret_ty.is_void() {
            if returns_through_parameter(ret_ty) {
                params.push(format!("out {} __output", self.names.managed(ret_ty)));
            } else {
                ret = self.names.managed(ret_ty);
            }
        }
        uwriteln!(out, "[MethodImpl(MethodImplOptions.InternalCall)]");
        uwriteln!(
            out,
            "private static extern {ret} {}({});",
            hook_name(&method.interop_name),
            params.join(", ")
        );
        out
    }

    fn managed_return(&self, ty: &TypeRef) -> String {
        if ty.is_void() {
            "void".into()
        } else {
            self.names.managed(ty)
        }
    }

    fn this_arg(&self, is_static: bool) -> Option<&'static str> {
        if is_static || self.is_module() {
            None
        } else {
            Some("mCachedPtr")
        }
    }

    fn wrapper_params(&self, params: &[ParamInfo]) -> String {
        params
            .iter()
            .map(|param| {
                let out = if param.ty.is_output() { "out " } else { "" };
                let ty = self.names.managed(&param.ty);
                match &param.default_value {
                    Some(default) if !param.has_complex_default() && !param.ty.is_output() => {
                        format!("{out}{ty} {} = {default}", param.name)
                    }
                    _ => format!("{out}{ty} {}", param.name),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Arguments of a managed-only overload: its own parameters followed by
    /// the defaults it drops.
    fn forwarded_args(&self, method: &MethodInfo) -> String {
        let mut args: Vec<String> = method
            .params
            .iter()
            .map(|p| {
                if p.ty.is_output() {
                    format!("out {}", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect();
        for implicit in &method.implicit_args {
            args.push(
                implicit
                    .default_value
                    .clone()
                    .unwrap_or_else(|| format!("default({})", self.names.managed(&implicit.ty))),
            );
        }
        args.join(", ")
    }
}

/// Argument passed from a wrapper to its hook.
fn call_arg(param: &ParamInfo) -> String {
    format!("{}{}", Passing::of(&param.ty).keyword(), param.name)
}

#[cfg(test)]
mod tests {
    use sbgen_core::{
        BuiltinKind, ClassFlags, Comment, GeneratorConfig, MethodFlags, TypeFlags,
    };
    use sbgen_registry::UserType;

    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new(GeneratorConfig::default());
        for (name, category) in [
            ("Texture", TypeCategory::Resource),
            ("Color", TypeCategory::Struct),
            ("Light", TypeCategory::Component),
        ] {
            registry.types.insert(UserType::new(name, category)).unwrap();
        }
        registry
    }

    fn emit(registry: &Registry, class: &ClassInfo) -> String {
        let mut out = Source::new();
        ManagedClassEmitter::new(registry, class).write(&mut out);
        out.into_string()
    }

    fn color() -> TypeRef {
        TypeRef::new("Color", TypeCategory::Struct)
    }

    #[test]
    fn resources_wrap_constructors_and_methods() {
        let registry = registry();
        let mut class = ClassInfo::new("Texture", TypeCategory::Resource);
        class.documentation = Comment::brief("A texture.");
        class.ctors.push(
            MethodInfo::new("Texture")
                .with_flags(MethodFlags::CONSTRUCTOR)
                .with_param(ParamInfo::new("width", TypeRef::builtin(BuiltinKind::Int32))),
        );
        class.ctors[0].interop_name = "create".into();
        class.methods.push(
            MethodInfo::new("getWidth")
                .with_script_name("GetWidth")
                .with_return(TypeRef::builtin(BuiltinKind::Int32)),
        );

        let text = emit(&registry, &class);
        assert!(text.starts_with("/// <summary>\n/// A texture.\n/// </summary>\npublic partial class Texture : Resource\n{"));
        assert!(text.contains("\tprivate Texture(bool __dummy0) { }"));
        assert!(text.contains("\tpublic Texture(int width)\n\t{\n\t\tInternal_create(this, width);\n\t}"));
        assert!(text.contains("\tpublic int GetWidth()\n\t{\n\t\treturn Internal_getWidth(mCachedPtr);\n\t}"));
        assert!(text.contains("\t[MethodImpl(MethodImplOptions.InternalCall)]\n\tprivate static extern void Internal_create(Texture managedInstance, int width);"));
        assert!(text.contains("private static extern int Internal_getWidth(IntPtr thisPtr);"));
    }

    #[test]
    fn struct_positions_pass_by_reference() {
        let registry = registry();
        let mut class = ClassInfo::new("Light", TypeCategory::Component);
        class.methods.push(
            MethodInfo::new("setColor")
                .with_script_name("SetColor")
                .with_param(ParamInfo::new("color", color())),
        );
        class.methods.push(
            MethodInfo::new("getColor")
                .with_script_name("GetColor")
                .with_return(color()),
        );

        let text = emit(&registry, &class);
        assert!(text.contains("public partial class Light : Component"));
        assert!(text.contains("protected Light() { }"));
        assert!(text.contains("Internal_setColor(mCachedPtr, ref color);"));
        assert!(text.contains("private static extern void Internal_setColor(IntPtr thisPtr, ref Color color);"));
        assert!(text.contains("\t\tColor temp;\n\t\tInternal_getColor(mCachedPtr, out temp);\n\t\treturn temp;"));
        assert!(text.contains("private static extern void Internal_getColor(IntPtr thisPtr, out Color __output);"));
    }

    #[test]
    fn properties_replace_their_accessor_methods() {
        let registry = registry();
        let mut class = ClassInfo::new("Light", TypeCategory::Component);
        class.methods.push(
            MethodInfo::new("getIntensity")
                .with_flags(MethodFlags::PROPERTY_GETTER)
                .with_return(TypeRef::builtin(BuiltinKind::Float)),
        );
        class.methods.push(
            MethodInfo::new("setIntensity")
                .with_flags(MethodFlags::PROPERTY_SETTER)
                .with_param(ParamInfo::new("value", TypeRef::builtin(BuiltinKind::Float))),
        );
        class.properties.push(PropertyInfo {
            name: "Intensity".into(),
            ty: TypeRef::builtin(BuiltinKind::Float),
            getter: Some("getIntensity".into()),
            setter: Some("setIntensity".into()),
            is_static: false,
            visibility: Default::default(),
            documentation: Comment::default(),
            style: sbgen_core::Style {
                range: Some((0.0, 10.0)),
                ..Default::default()
            },
        });

        let text = emit(&registry, &class);
        assert!(text.contains("\t[Range(0f, 10f, false)]\n\tpublic float Intensity\n\t{"));
        assert!(text.contains("get { return Internal_getIntensity(mCachedPtr); }"));
        assert!(text.contains("set { Internal_setIntensity(mCachedPtr, value); }"));
        assert!(!text.contains("public float getIntensity"));
        assert!(text.contains("private static extern float Internal_getIntensity(IntPtr thisPtr);"));
    }

    #[test]
    fn managed_only_overloads_forward_dropped_defaults() {
        let registry = registry();
        let mut class = ClassInfo::new("Texture", TypeCategory::Resource);
        class.methods.push(
            MethodInfo::new("clear")
                .with_script_name("Clear")
                .with_param(ParamInfo::new("color", color())),
        );
        let mut overload = MethodInfo::new("clear")
            .with_script_name("Clear")
            .with_flags(MethodFlags::CS_ONLY);
        overload.interop_name = "clear0".into();
        overload.forwards_to = Some("clear".into());
        overload.implicit_args.push(
            ParamInfo::new("color", color()).with_constructed_default("Color.Black", "Color"),
        );
        class.methods.push(overload);

        let text = emit(&registry, &class);
        assert!(text.contains("\tpublic void Clear()\n\t{\n\t\tClear(Color.Black);\n\t}"));
        assert!(!text.contains("Internal_clear0"));
    }

    #[test]
    fn events_become_broadcasters_or_callbacks() {
        let registry = registry();
        let mut class = ClassInfo::new("Light", TypeCategory::Component);
        class.events.push(
            MethodInfo::new("onChanged")
                .with_script_name("OnChanged")
                .with_param(ParamInfo::new("p0", TypeRef::builtin(BuiltinKind::Int32))),
        );
        class.events.push(
            MethodInfo::new("onReset")
                .with_script_name("OnReset")
                .with_flags(MethodFlags::CALLBACK | MethodFlags::STATIC),
        );

        let text = emit(&registry, &class);
        assert!(text.contains("public event Action<int> OnChanged;"));
        assert!(text.contains("\tprivate void Internal_onChanged(int p0)\n\t{\n\t\tOnChanged?.Invoke(p0);\n\t}"));
        assert!(text.contains("static partial void Callback_OnReset();"));
        assert!(text.contains("private static void Internal_onReset()\n\t{\n\t\tCallback_OnReset();"));
    }

    #[test]
    fn modules_are_static_classes() {
        let registry = registry();
        let mut class = ClassInfo::new("Time", TypeCategory::Class);
        class.flags |= ClassFlags::IS_MODULE;
        class.methods.push(
            MethodInfo::new("getElapsed")
                .with_script_name("GetElapsed")
                .with_return(TypeRef::builtin(BuiltinKind::Float)),
        );
        class.ctors.push(MethodInfo::new("Time").with_flags(MethodFlags::CONSTRUCTOR));

        let text = emit(&registry, &class);
        assert!(text.starts_with("public static partial class Time\n{"));
        assert!(text.contains("public static float GetElapsed()"));
        assert!(text.contains("return Internal_getElapsed();"));
        assert!(!text.contains("__dummy"));
        assert!(!text.contains("managedInstance"));
    }

    #[test]
    fn outputs_use_out_parameters() {
        let registry = registry();
        let mut class = ClassInfo::new("Texture", TypeCategory::Resource);
        class.methods.push(
            MethodInfo::new("getSize").with_script_name("GetSize").with_param(ParamInfo::new(
                "width",
                TypeRef::builtin(BuiltinKind::Int32)
                    .with_flags(TypeFlags::SRC_REF | TypeFlags::OUTPUT),
            )),
        );
        let text = emit(&registry, &class);
        assert!(text.contains("public void GetSize(out int width)"));
        assert!(text.contains("Internal_getSize(mCachedPtr, out width);"));
        assert!(text.contains("private static extern void Internal_getSize(IntPtr thisPtr, out int width);"));
    }
}
