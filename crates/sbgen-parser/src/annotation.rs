//! Annotation decoding.
//!
//! Exported declarations carry an annotation string such as
//! `se,n:Mesh,f:Mesh,ed:true`. The first entry must be the export marker
//! `se`; every following entry is a `key:value` pair. Unknown keys and
//! unrecognized values produce one warning each and are otherwise ignored,
//! so decoding never fails.

use sbgen_core::{Diagnostics, ExportDirective, ExportFlags, StyleFlags, Visibility};

/// The export marker every exported declaration's annotation starts with.
pub const EXPORT_MARKER: &str = "se";

/// Decode an annotation into an export directive.
///
/// Returns `None` when the annotation does not start with the export
/// marker. Problems with individual entries are reported to `diagnostics`
/// under `source_name`.
///
/// ```
/// use sbgen_core::{Diagnostics, ExportFlags};
/// use sbgen_parser::parse_annotation;
///
/// let mut diagnostics = Diagnostics::new();
/// let directive = parse_annotation("se,pr:getter,n:Struct", "getStruct", &mut diagnostics).unwrap();
/// assert_eq!(directive.export_name, "Struct");
/// assert!(directive.flags.contains(ExportFlags::PROPERTY_GETTER));
/// assert!(diagnostics.is_empty());
/// ```
pub fn parse_annotation(
    text: &str,
    source_name: &str,
    diagnostics: &mut Diagnostics,
) -> Option<ExportDirective> {
    let mut entries = split_entries(text).into_iter();
    if entries.next()? != EXPORT_MARKER {
        return None;
    }

    let mut directive = ExportDirective::new(source_name);
    let mut file_group = None;

    for entry in entries {
        let (key, value) = match entry.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            // A bare key is shorthand for `key:true`.
            None => (entry, "true"),
        };

        let mut decoder = EntryDecoder {
            key,
            value,
            source_name,
            diagnostics: &mut *diagnostics,
        };

        match key {
            "n" => directive.export_name = value.to_string(),
            "f" => file_group = Some(value.to_string()),
            "v" => match value.parse::<Visibility>() {
                Ok(visibility) => directive.visibility = visibility,
                Err(()) => decoder.unrecognized_value(),
            },
            "pl" => decoder.flag(&mut directive.flags, ExportFlags::PLAIN),
            "pr" => match value {
                "getter" => directive.flags |= ExportFlags::PROPERTY_GETTER,
                "setter" => directive.flags |= ExportFlags::PROPERTY_SETTER,
                _ => decoder.unrecognized_value(),
            },
            "e" => {
                directive.flags |= ExportFlags::EXTERNAL;
                directive.external_class = Some(value.to_string());
            }
            "ec" => {
                directive.flags |= ExportFlags::EXTERNAL_CONSTRUCTOR;
                directive.external_class = Some(value.to_string());
            }
            "ed" => decoder.flag(&mut directive.flags, ExportFlags::EDITOR),
            "ex" => decoder.flag(&mut directive.flags, ExportFlags::EXCLUDE),
            "in" => decoder.flag(&mut directive.flags, ExportFlags::INTEROP_ONLY),
            "cb" => decoder.flag(&mut directive.flags, ExportFlags::CALLBACK),
            "m" => directive.module = Some(value.to_string()),

            // Style hints
            "slider" => decoder.flag(&mut directive.style.flags, StyleFlags::SLIDER),
            "layerMask" => decoder.flag(&mut directive.style.flags, StyleFlags::LAYER_MASK),
            "hide" => decoder.flag(&mut directive.style.flags, StyleFlags::HIDE),
            "show" => decoder.flag(&mut directive.style.flags, StyleFlags::SHOW),
            "inline" => decoder.flag(&mut directive.style.flags, StyleFlags::INLINE),
            "notNull" => decoder.flag(&mut directive.style.flags, StyleFlags::NOT_NULL),
            "passByCopy" => decoder.flag(&mut directive.style.flags, StyleFlags::PASS_BY_COPY),
            "applyOnDirty" => {
                decoder.flag(&mut directive.style.flags, StyleFlags::APPLY_ON_DIRTY)
            }
            "asQuaternion" => {
                decoder.flag(&mut directive.style.flags, StyleFlags::AS_QUATERNION)
            }
            "loadOnAssign" => {
                decoder.flag(&mut directive.style.flags, StyleFlags::LOAD_ON_ASSIGN)
            }
            "hdr" => decoder.flag(&mut directive.style.flags, StyleFlags::HDR),
            "step" => directive.style.step = decoder.number(),
            "order" => directive.style.order = decoder.integer(),
            "range" => directive.style.range = decoder.range(),
            "category" => directive.style.category = Some(value.to_string()),

            _ => diagnostics.warn(source_name, format!("unknown annotation key '{key}'")),
        }
    }

    directive.file_group = file_group.unwrap_or_else(|| directive.export_name.clone());
    Some(directive)
}

/// Split on commas that are not nested inside `[...]`, trimming each entry
/// and skipping empty ones.
fn split_entries(text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&text[start..]);
    entries
        .into_iter()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect()
}

/// Decodes the value of a single `key:value` entry.
struct EntryDecoder<'a> {
    key: &'a str,
    value: &'a str,
    source_name: &'a str,
    diagnostics: &'a mut Diagnostics,
}

impl EntryDecoder<'_> {
    fn unrecognized_value(&mut self) {
        self.diagnostics.warn(
            self.source_name,
            format!(
                "unrecognized value '{}' for annotation key '{}'",
                self.value, self.key
            ),
        );
    }

    fn boolean(&mut self) -> Option<bool> {
        match self.value {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                self.unrecognized_value();
                None
            }
        }
    }

    fn flag<F>(&mut self, flags: &mut F, bit: F)
    where
        F: bitflags::Flags + Copy,
    {
        if let Some(enabled) = self.boolean() {
            flags.set(bit, enabled);
        }
    }

    fn number(&mut self) -> Option<f64> {
        let parsed = self.value.trim_end_matches('f').parse::<f64>().ok();
        if parsed.is_none() {
            self.unrecognized_value();
        }
        parsed
    }

    fn integer(&mut self) -> Option<i32> {
        let parsed = self.value.parse::<i32>().ok();
        if parsed.is_none() {
            self.unrecognized_value();
        }
        parsed
    }

    /// `[min,max]`
    fn range(&mut self) -> Option<(f64, f64)> {
        let parsed = self
            .value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .and_then(|v| v.split_once(','))
            .and_then(|(min, max)| {
                let min = min.trim().trim_end_matches('f').parse::<f64>().ok()?;
                let max = max.trim().trim_end_matches('f').parse::<f64>().ok()?;
                Some((min, max))
            });
        if parsed.is_none() {
            self.unrecognized_value();
        }
        parsed
    }
}
