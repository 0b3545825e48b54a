//! Export directives decoded from declaration annotations.

use bitflags::bitflags;

use crate::Visibility;

bitflags! {
    /// Flags set by annotation keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExportFlags: u32 {
        /// `pl:true` - exported as a plain value struct.
        const PLAIN = 1 << 0;
        /// `pr:getter`
        const PROPERTY_GETTER = 1 << 1;
        /// `pr:setter`
        const PROPERTY_SETTER = 1 << 2;
        /// `e:Target`
        const EXTERNAL = 1 << 3;
        /// `ec:Target`
        const EXTERNAL_CONSTRUCTOR = 1 << 4;
        /// `ed:true`
        const EDITOR = 1 << 5;
        /// `ex:true`
        const EXCLUDE = 1 << 6;
        /// `in:true`
        const INTEROP_ONLY = 1 << 7;
        /// `cb:true`
        const CALLBACK = 1 << 8;
    }
}

bitflags! {
    /// Boolean presentation hints for fields and properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u32 {
        const SLIDER = 1 << 0;
        const LAYER_MASK = 1 << 1;
        const HIDE = 1 << 2;
        const SHOW = 1 << 3;
        const INLINE = 1 << 4;
        const NOT_NULL = 1 << 5;
        const PASS_BY_COPY = 1 << 6;
        const APPLY_ON_DIRTY = 1 << 7;
        const AS_QUATERNION = 1 << 8;
        const LOAD_ON_ASSIGN = 1 << 9;
        const HDR = 1 << 10;
    }
}

/// Presentation hints emitted as managed marker attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub flags: StyleFlags,
    pub range: Option<(f64, f64)>,
    pub step: Option<f64>,
    pub order: Option<i32>,
    pub category: Option<String>,
}

impl Style {
    /// Check if no hint is set.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
            && self.range.is_none()
            && self.step.is_none()
            && self.order.is_none()
            && self.category.is_none()
    }

    /// Combine two styles; values set on `other` win.
    pub fn merged(&self, other: &Style) -> Style {
        Style {
            flags: self.flags | other.flags,
            range: other.range.or(self.range),
            step: other.step.or(self.step),
            order: other.order.or(self.order),
            category: other.category.clone().or_else(|| self.category.clone()),
        }
    }
}

/// Structured export directive for one declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportDirective {
    /// Managed-side name (`n:`), defaults to the source name.
    pub export_name: String,
    /// Output file group (`f:`), defaults to the export name.
    pub file_group: String,
    pub visibility: Visibility,
    pub flags: ExportFlags,
    /// Module grouping (`m:`).
    pub module: Option<String>,
    /// Target class of `e:` / `ec:`.
    pub external_class: Option<String>,
    pub style: Style,
}

impl ExportDirective {
    /// Directive with defaults derived from the declaration's source name.
    pub fn new(source_name: impl Into<String>) -> Self {
        let name = source_name.into();
        Self {
            export_name: name.clone(),
            file_group: name,
            ..Self::default()
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.flags.contains(ExportFlags::EXCLUDE)
    }

    pub fn is_plain(&self) -> bool {
        self.flags.contains(ExportFlags::PLAIN)
    }

    pub fn is_editor(&self) -> bool {
        self.flags.contains(ExportFlags::EDITOR)
    }

    pub fn is_external(&self) -> bool {
        self.flags
            .intersects(ExportFlags::EXTERNAL | ExportFlags::EXTERNAL_CONSTRUCTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_source_name() {
        let directive = ExportDirective::new("Mesh");
        assert_eq!(directive.export_name, "Mesh");
        assert_eq!(directive.file_group, "Mesh");
        assert_eq!(directive.visibility, Visibility::Public);
        assert!(!directive.is_external());
    }

    #[test]
    fn merged_style_prefers_other() {
        let getter = Style {
            flags: StyleFlags::SLIDER,
            order: Some(1),
            ..Style::default()
        };
        let setter = Style {
            order: Some(4),
            category: Some("Lighting".into()),
            ..Style::default()
        };
        let merged = getter.merged(&setter);
        assert!(merged.flags.contains(StyleFlags::SLIDER));
        assert_eq!(merged.order, Some(4));
        assert_eq!(merged.category.as_deref(), Some("Lighting"));
        assert!(!merged.is_empty());
        assert!(Style::default().is_empty());
    }
}
