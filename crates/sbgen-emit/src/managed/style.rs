//! Inspector marker attributes.

use sbgen_core::{Style, StyleFlags};

use crate::source::Source;
use crate::uwriteln;

/// Marker attributes for `style`, in a fixed order.
pub fn attributes(style: &Style) -> Vec<String> {
    let mut attributes = Vec::new();
    let flags = style.flags;

    if let Some((min, max)) = style.range {
        attributes.push(format!(
            "[Range({}, {}, {})]",
            float_literal(min),
            float_literal(max),
            flags.contains(StyleFlags::SLIDER)
        ));
    }
    if let Some(step) = style.step {
        attributes.push(format!("[Step({})]", float_literal(step)));
    }
    if let Some(order) = style.order {
        attributes.push(format!("[Order({order})]"));
    }
    if let Some(category) = &style.category {
        attributes.push(format!("[Category(\"{category}\")]"));
    }

    const MARKERS: [(StyleFlags, &str); 10] = [
        (StyleFlags::LAYER_MASK, "LayerMask"),
        (StyleFlags::HIDE, "HideInInspector"),
        (StyleFlags::SHOW, "ShowInInspector"),
        (StyleFlags::INLINE, "Inline"),
        (StyleFlags::NOT_NULL, "NotNull"),
        (StyleFlags::PASS_BY_COPY, "PassByCopy"),
        (StyleFlags::APPLY_ON_DIRTY, "ApplyOnDirty"),
        (StyleFlags::AS_QUATERNION, "AsQuaternion"),
        (StyleFlags::LOAD_ON_ASSIGN, "LoadOnAssign"),
        (StyleFlags::HDR, "HDR"),
    ];
    for (flag, name) in MARKERS {
        if flags.contains(flag) {
            attributes.push(format!("[{name}]"));
        }
    }
    attributes
}

pub fn write_attributes(style: &Style, out: &mut Source) {
    for attribute in attributes(style) {
        uwriteln!(out, "{attribute}");
    }
}

/// A managed `float` literal.
fn float_literal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}f", value as i64)
    } else {
        format!("{value}f")
    }
}
