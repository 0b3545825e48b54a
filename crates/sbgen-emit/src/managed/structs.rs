//! Managed structs.
//!
//! Managed structs cannot declare a parameterless constructor, so the
//! parameterless native constructor (or the implicit one of a struct with
//! no constructors) becomes a static `Default()` factory.

use sbgen_core::{FieldInfo, ParamInfo, StructCtorInfo, StructInfo};
use sbgen_registry::Registry;

use super::docs::write_doc;
use super::style::write_attributes;
use crate::names::TypeNames;
use crate::source::Source;
use crate::uwriteln;

pub struct ManagedStructEmitter<'a> {
    registry: &'a Registry,
    names: TypeNames<'a>,
    info: &'a StructInfo,
}

impl<'a> ManagedStructEmitter<'a> {
    pub fn new(registry: &'a Registry, info: &'a StructInfo) -> Self {
        Self {
            registry,
            names: TypeNames::new(&registry.types),
            info,
        }
    }

    pub fn write(&self, out: &mut Source) {
        let info = self.info;
        write_doc(&info.documentation, &[], out);
        uwriteln!(out, "[StructLayout(LayoutKind.Sequential), SerializeObject]");
        uwriteln!(out, "{} partial struct {}", info.visibility, info.script_name);
        uwriteln!(out, "{{");

        let mut first = true;
        let mut separate = |out: &mut Source| {
            if !first {
                out.blank_line();
            }
            first = false;
        };

        if info.ctors.is_empty() || info.ctors.iter().any(StructCtorInfo::is_parameterless) {
            separate(out);
            self.default_factory(out);
        }
        for ctor in info.parameterized_ctors() {
            separate(out);
            self.constructor(ctor, out);
        }
        if let Some(base) = self.base() {
            separate(out);
            self.base_accessors(base, out);
        }
        for field in &info.fields {
            separate(out);
            self.field(field, out);
        }
        uwriteln!(out, "}}");
    }

    fn base(&self) -> Option<&'a StructInfo> {
        let name = self.info.base_struct.as_deref()?;
        self.registry.find_struct(name)
    }

    fn default_factory(&self, out: &mut Source) {
        let info = self.info;
        let name = &info.script_name;
        if let Some(ctor) = info.ctors.iter().find(|c| c.is_parameterless())
            && !ctor.documentation.is_empty()
        {
            write_doc(&ctor.documentation, &[], out);
        } else {
            uwriteln!(out, "/// <summary>Initializes the struct with default values.</summary>");
        }
        uwriteln!(out, "public static {name} Default()");
        uwriteln!(out, "{{");
        uwriteln!(out, "{name} value = new {name}();");
        for field in &info.fields {
            if let Some(default) = &field.default_value {
                uwriteln!(out, "value.{} = {default};", field.name);
            }
        }
        out.blank_line();
        uwriteln!(out, "return value;");
        uwriteln!(out, "}}");
    }

    fn constructor(&self, ctor: &StructCtorInfo, out: &mut Source) {
        let names: Vec<&str> = ctor.params.iter().map(|p| p.name.as_str()).collect();
        write_doc(&ctor.documentation, &names, out);
        let params: Vec<String> = ctor.params.iter().map(|p| self.param(p)).collect();
        uwriteln!(out, "public {}({})", self.info.script_name, params.join(", "));
        uwriteln!(out, "{{");
        for field in &self.info.fields {
            let value = match ctor.param_for_field(&field.name) {
                Some(param) => param.to_string(),
                None => match &field.default_value {
                    Some(default) => default.clone(),
                    None => format!("default({})", self.names.managed(&field.ty)),
                },
            };
            uwriteln!(out, "this.{} = {value};", field.name);
        }
        uwriteln!(out, "}}");
    }

    fn param(&self, param: &ParamInfo) -> String {
        let ty = self.names.managed(&param.ty);
        match &param.default_value {
            Some(default) if !param.has_complex_default() => {
                format!("{ty} {} = {default}", param.name)
            }
            _ => format!("{ty} {}", param.name),
        }
    }

    /// `GetBase`/`SetBase` copying the fields shared with the base struct.
    fn base_accessors(&self, base: &StructInfo, out: &mut Source) {
        let base_name = &base.script_name;
        uwriteln!(out, "///<summary>");
        uwriteln!(
            out,
            "/// Returns a subset of this struct. This subset usually contains common fields shared with another struct."
        );
        uwriteln!(out, "///</summary>");
        uwriteln!(out, "public {base_name} GetBase()");
        uwriteln!(out, "{{");
        uwriteln!(out, "{base_name} value;");
        for field in &base.fields {
            uwriteln!(out, "value.{0} = {0};", field.name);
        }
        uwriteln!(out, "return value;");
        uwriteln!(out, "}}");
        out.blank_line();
        uwriteln!(out, "///<summary>");
        uwriteln!(
            out,
            "/// Assigns values to a subset of fields of this struct. This subset usually contains common field shared with another struct."
        );
        uwriteln!(out, "///</summary>");
        uwriteln!(out, "public void SetBase({base_name} value)");
        uwriteln!(out, "{{");
        for field in &base.fields {
            uwriteln!(out, "{0} = value.{0};", field.name);
        }
        uwriteln!(out, "}}");
    }

    fn field(&self, field: &FieldInfo, out: &mut Source) {
        write_doc(&field.documentation, &[], out);
        write_attributes(&field.style, out);
        uwriteln!(out, "public {} {};", self.names.managed(&field.ty), field.name);
    }
}
