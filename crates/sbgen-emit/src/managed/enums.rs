//! Managed enumerations.

use sbgen_core::EnumInfo;

use super::docs::write_doc;
use crate::source::Source;
use crate::uwriteln;

/// Write `info` as a managed enum, entries sorted by value.
pub fn write_enum(info: &EnumInfo, out: &mut Source) {
    write_doc(&info.documentation, &[], out);
    let backing = info
        .managed_backing_type()
        .map(|kind| format!(" : {}", kind.managed_name()))
        .unwrap_or_default();
    uwriteln!(out, "{} enum {}{backing}", info.visibility, info.script_name);
    uwriteln!(out, "{{");
    let count = info.entries.len();
    for (index, entry) in info.entries.values().enumerate() {
        write_doc(&entry.documentation, &[], out);
        let separator = if index + 1 < count { "," } else { "" };
        uwriteln!(out, "{} = {}{separator}", entry.script_name, entry.value_literal);
    }
    uwriteln!(out, "}}");
}
