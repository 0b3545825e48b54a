use quick_xml::Reader;
use quick_xml::events::Event;
use sbgen::decl::{Decl, EnumConstantDecl, EnumDecl};

use crate::{contents, generate};

/// (script name, value) of every `enumentry` in a mapping document.
fn mapped_entries(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"enumentry" => {
                let attr = |key: &str| {
                    let value = e.try_get_attribute(key).unwrap().unwrap().value;
                    String::from_utf8_lossy(&value).into_owned()
                };
                entries.push((attr("script"), attr("value")));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    entries
}

fn flags_enum() -> Decl {
    Decl::Enum(
        EnumDecl::new("E")
            .with_annotation("se,pl:true,f:F")
            .with_entry(EnumConstantDecl::new("A", 5))
            .with_entry(EnumConstantDecl::new("B", 8))
            .with_entry(EnumConstantDecl::new("C", 9)),
    )
}

#[test]
fn test_enum_is_written_to_its_file_group() {
    let generation = generate(vec![flags_enum()]);
    let managed = contents(&generation, "F.generated.cs");
    assert!(managed.contains("public enum E\n"));
    assert!(managed.contains("A = 5,"));
    assert!(managed.contains("B = 8,"));
    assert!(managed.contains("C = 9\n"));
}

#[test]
fn test_enum_has_no_native_companion() {
    let generation = generate(vec![flags_enum()]);
    assert!(generation.file("BsScriptF.generated.h").is_none());
    assert!(generation.file("BsScriptF.generated.cpp").is_none());
}

#[test]
fn test_enum_entries_are_mapped() {
    let generation = generate(vec![flags_enum()]);
    let entries = mapped_entries(contents(&generation, "info.xml"));
    assert_eq!(
        entries,
        [
            ("A".to_string(), "5".to_string()),
            ("B".to_string(), "8".to_string()),
            ("C".to_string(), "9".to_string()),
        ]
    );
}

#[test]
fn test_enum_entries_can_be_renamed() {
    let generation = generate(vec![Decl::Enum(
        EnumDecl::new("ShadowQuality")
            .with_annotation("se,f:Render")
            .with_entry(EnumConstantDecl::new("SQ_Low", 0).with_annotation("se,n:Low"))
            .with_entry(EnumConstantDecl::new("SQ_High", 1).with_annotation("se,n:High")),
    )]);
    let managed = contents(&generation, "Render.generated.cs");
    assert!(managed.contains("Low = 0,"));
    assert!(managed.contains("High = 1"));
    assert!(!managed.contains("SQ_Low"));
}
