//! Native to managed name mapping.
//!
//! `info.xml` lists every exported entity with its native and script names
//! so documentation tooling can link the two API surfaces.
//!
//! ```xml
//! <ScriptExport>
//!   <class native="Texture" script="Texture">
//!     <doc>A texture.</doc>
//!     <method native="getWidth" script="GetWidth"/>
//!     <property native="getSize" script="Size" static="false"/>
//!   </class>
//! </ScriptExport>
//! ```

use std::io;
use std::string::FromUtf8Error;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use sbgen_core::{ClassInfo, Comment, EnumInfo, MethodInfo, StructInfo};
use sbgen_registry::Registry;
use thiserror::Error;

use crate::names::TypeNames;

/// File name of the mapping document.
pub const MAPPING_FILE_NAME: &str = "info.xml";

/// Errors raised while writing the mapping document.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("failed to write mapping XML: {0}")]
    Io(#[from] io::Error),

    #[error("mapping XML is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Emit the mapping document for every entity of the enabled sides.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn emit_mapping(registry: &Registry) -> Result<String, MappingError> {
    let mut mapping = MappingWriter {
        writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        names: TypeNames::new(&registry.types),
    };
    mapping.start(BytesStart::new("ScriptExport"))?;
    for group in registry.file_groups.values() {
        if group.in_editor && !registry.config.generate_editor {
            continue;
        }
        for info in &group.enums {
            mapping.enumeration(info)?;
        }
        for info in &group.structs {
            mapping.structure(info)?;
        }
        for class in &group.classes {
            if !class.interop_only {
                mapping.class(class)?;
            }
        }
    }
    mapping.end("ScriptExport")?;
    Ok(String::from_utf8(mapping.writer.into_inner())?)
}

struct MappingWriter<'a> {
    writer: Writer<Vec<u8>>,
    names: TypeNames<'a>,
}

fn element<'e>(tag: &'e str, native: &'e str, script: &'e str) -> BytesStart<'e> {
    let mut start = BytesStart::new(tag);
    start.push_attribute(("native", native));
    start.push_attribute(("script", script));
    start
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

impl MappingWriter<'_> {
    fn start(&mut self, start: BytesStart<'_>) -> io::Result<()> {
        self.writer.write_event(Event::Start(start))
    }

    fn end(&mut self, tag: &str) -> io::Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(tag)))
    }

    /// Write `start` as a leaf, or wrapping a `<doc>` child when documented.
    fn leaf(&mut self, start: BytesStart<'_>, doc: &Comment) -> io::Result<()> {
        let brief = doc.brief_text();
        if brief.is_empty() {
            return self.writer.write_event(Event::Empty(start));
        }
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        self.start(start)?;
        self.doc(&brief)?;
        self.end(&tag)
    }

    fn doc(&mut self, brief: &str) -> io::Result<()> {
        if brief.is_empty() {
            return Ok(());
        }
        self.start(BytesStart::new("doc"))?;
        self.writer.write_event(Event::Text(BytesText::new(brief)))?;
        self.end("doc")
    }

    fn enumeration(&mut self, info: &EnumInfo) -> io::Result<()> {
        self.start(element("enum", &info.source_name, &info.script_name))?;
        self.doc(&info.documentation.brief_text())?;
        for entry in info.entries.values() {
            let mut start = element("enumentry", &entry.name, &entry.script_name);
            start.push_attribute(("value", entry.value_literal.as_str()));
            self.leaf(start, &entry.documentation)?;
        }
        self.end("enum")
    }

    fn structure(&mut self, info: &StructInfo) -> io::Result<()> {
        self.start(element("struct", &info.source_name, &info.script_name))?;
        self.doc(&info.documentation.brief_text())?;
        for ctor in &info.ctors {
            self.leaf(
                element("ctor", &info.source_name, &info.script_name),
                &ctor.documentation,
            )?;
        }
        for field in &info.fields {
            self.leaf(element("field", &field.name, &field.name), &field.documentation)?;
        }
        self.end("struct")
    }

    fn class(&mut self, class: &ClassInfo) -> io::Result<()> {
        let native = class.native_type_name();
        let script = self.names.script_name(&native);
        self.start(element("class", &native, &script))?;
        self.doc(&class.documentation.brief_text())?;

        for ctor in class.ctors.iter().filter(|m| is_listed(m)) {
            self.leaf(element("ctor", &ctor.source_name, &script), &ctor.documentation)?;
        }
        for property in &class.properties {
            let accessor = property
                .getter
                .iter()
                .chain(property.setter.iter())
                .find_map(|name| class.find_by_interop_name(name));
            let native = accessor.map_or(property.name.as_str(), |m| m.source_name.as_str());
            let mut start = element("property", native, &property.name);
            start.push_attribute(("static", bool_attr(property.is_static)));
            self.leaf(start, &property.documentation)?;
        }
        for method in class
            .methods
            .iter()
            .filter(|m| is_listed(m) && !m.is_property())
        {
            self.leaf(
                element("method", &method.source_name, &method.script_name),
                &method.documentation,
            )?;
        }
        for event in &class.events {
            let mut start = element("event", &event.source_name, &event.script_name);
            start.push_attribute(("static", bool_attr(event.is_static())));
            self.leaf(start, &event.documentation)?;
        }
        self.end("class")
    }
}

/// Entries visible in the managed API.
fn is_listed(method: &MethodInfo) -> bool {
    !method.is_interop_only() && !method.is_cs_only()
}

#[cfg(test)]
mod tests {
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use sbgen_core::{
        BuiltinKind, EnumEntryInfo, GeneratorConfig, MethodFlags, PropertyInfo, TypeCategory,
        TypeRef,
    };

    use super::*;

    /// (depth, tag, attributes) for every element in document order.
    fn elements(xml: &str) -> Vec<(usize, String, Vec<(String, String)>)> {
        let mut reader = Reader::from_str(xml);
        let mut depth = 0;
        let mut out = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    let (tag, attrs) = tag_and_attrs(&e);
                    out.push((depth, tag, attrs));
                    depth += 1;
                }
                Event::Empty(e) => {
                    let (tag, attrs) = tag_and_attrs(&e);
                    out.push((depth, tag, attrs));
                }
                Event::End(_) => depth -= 1,
                Event::Eof => break,
                _ => {}
            }
        }
        out
    }

    fn tag_and_attrs(e: &BytesStart<'_>) -> (String, Vec<(String, String)>) {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let attrs = e
            .attributes()
            .map(|a| {
                let a = a.unwrap();
                (
                    String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                    a.unescape_value().unwrap().into_owned(),
                )
            })
            .collect();
        (tag, attrs)
    }

    fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn entry(name: &str, value: i64) -> EnumEntryInfo {
        EnumEntryInfo {
            name: name.into(),
            script_name: name.into(),
            value_literal: value.to_string(),
            documentation: Comment::default(),
        }
    }

    #[test]
    fn enums_list_their_entries() {
        let mut registry = Registry::new(GeneratorConfig::default());
        let mut info = EnumInfo::new("E");
        info.insert_entry(5, entry("A", 5));
        info.insert_entry(8, entry("B", 8));
        info.insert_entry(9, entry("C", 9));
        registry.file_group_mut("F", false).enums.push(info);

        let xml = emit_mapping(&registry).unwrap();
        let elements = elements(&xml);
        assert_eq!(elements[0].1, "ScriptExport");
        assert_eq!(elements[1].1, "enum");
        assert_eq!(attr(&elements[1].2, "native"), Some("E"));
        let entries: Vec<(&str, &str)> = elements
            .iter()
            .filter(|(depth, tag, _)| *depth == 2 && tag == "enumentry")
            .map(|(_, _, attrs)| {
                (
                    attr(attrs, "script").unwrap_or_default(),
                    attr(attrs, "value").unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(entries, [("A", "5"), ("B", "8"), ("C", "9")]);
    }

    #[test]
    fn classes_expose_members_and_docs() {
        let mut registry = Registry::new(GeneratorConfig::default());
        let mut class = ClassInfo::new("Texture", TypeCategory::Resource);
        class.documentation = Comment::brief("Pixels & mips.");
        class.methods.push(
            MethodInfo::new("getWidth")
                .with_script_name("GetWidth")
                .with_return(TypeRef::builtin(BuiltinKind::Int32)),
        );
        class.methods.push(
            MethodInfo::new("getMips")
                .with_flags(MethodFlags::PROPERTY_GETTER)
                .with_return(TypeRef::builtin(BuiltinKind::Int32)),
        );
        class.properties.push(PropertyInfo {
            name: "MipCount".into(),
            ty: TypeRef::builtin(BuiltinKind::Int32),
            getter: Some("getMips".into()),
            setter: None,
            is_static: false,
            visibility: Default::default(),
            documentation: Comment::default(),
            style: Default::default(),
        });
        class.events.push(
            MethodInfo::new("onReloaded")
                .with_script_name("OnReloaded")
                .with_flags(MethodFlags::STATIC),
        );
        registry.file_group_mut("Texture", false).classes.push(class);

        let xml = emit_mapping(&registry).unwrap();
        assert!(xml.contains("<doc>Pixels &amp; mips.</doc>"));
        let elements = elements(&xml);
        let children: Vec<(&str, Option<&str>, Option<&str>)> = elements
            .iter()
            .filter(|(depth, tag, _)| *depth == 2 && tag != "doc")
            .map(|(_, tag, attrs)| (tag.as_str(), attr(attrs, "native"), attr(attrs, "static")))
            .collect();
        assert_eq!(
            children,
            [
                ("property", Some("getMips"), Some("false")),
                ("method", Some("getWidth"), None),
                ("event", Some("onReloaded"), Some("true")),
            ]
        );
    }

    #[test]
    fn editor_entities_follow_the_editor_switch() {
        let mut registry = Registry::new(GeneratorConfig::default().with_editor(false));
        registry
            .file_group_mut("Gizmos", true)
            .structs
            .push(StructInfo::new("GizmoDrawSettings"));
        let xml = emit_mapping(&registry).unwrap();
        assert!(!xml.contains("GizmoDrawSettings"));
    }
}
