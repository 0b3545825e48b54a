//! Default-value evaluation.
//!
//! Turns a default argument or member initializer into managed literal
//! text. Literals, `nullptr`, strings and enum constants become simple
//! defaults that managed optional arguments can carry directly. Constructor
//! calls and other qualified constants need code to run, so they become
//! constructed defaults that force overload expansion later on.

use sbgen_core::{BuiltinKind, TypeCategory, TypeRef};
use sbgen_parser::decl::{ConstValue, Expr, ExprKind};
use sbgen_registry::TypeMap;

/// An evaluated default.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A managed constant expression.
    Simple(String),
    /// Needs a constructor or member access on `ty`.
    Constructed { literal: String, ty: String },
}

impl DefaultValue {
    pub fn literal(&self) -> &str {
        match self {
            DefaultValue::Simple(literal) => literal,
            DefaultValue::Constructed { literal, .. } => literal,
        }
    }

    pub fn constructed_type(&self) -> Option<&str> {
        match self {
            DefaultValue::Simple(_) => None,
            DefaultValue::Constructed { ty, .. } => Some(ty),
        }
    }
}

/// Evaluates default expressions against the registered user types.
pub struct DefaultEvaluator<'a> {
    types: &'a TypeMap,
}

impl<'a> DefaultEvaluator<'a> {
    pub fn new(types: &'a TypeMap) -> Self {
        Self { types }
    }

    /// Evaluate `expr` as the default of a position of type `target`.
    ///
    /// Returns `None` for expressions that have no managed equivalent.
    ///
    /// ```
    /// use sbgen_compiler::defaults::{DefaultEvaluator, DefaultValue};
    /// use sbgen_core::{BuiltinKind, TypeRef};
    /// use sbgen_parser::decl::Expr;
    /// use sbgen_registry::TypeMap;
    ///
    /// let types = TypeMap::new();
    /// let evaluator = DefaultEvaluator::new(&types);
    /// let float = TypeRef::builtin(BuiltinKind::Float);
    /// assert_eq!(
    ///     evaluator.evaluate(&Expr::float(10.0), &float),
    ///     Some(DefaultValue::Simple("10".into()))
    /// );
    /// assert_eq!(
    ///     evaluator.evaluate(&Expr::float(0.5), &float),
    ///     Some(DefaultValue::Simple("0.5f".into()))
    /// );
    /// ```
    pub fn evaluate(&self, expr: &Expr, target: &TypeRef) -> Option<DefaultValue> {
        match expr.kind {
            ExprKind::Null => Some(DefaultValue::Simple("null".into())),
            ExprKind::String => Some(DefaultValue::Simple(quote(&expr.text))),
            ExprKind::Literal => self.constant(expr, target).map(DefaultValue::Simple),
            ExprKind::Cast => match expr.value {
                Some(_) => self.constant(expr, target).map(DefaultValue::Simple),
                None => expr
                    .args
                    .first()
                    .and_then(|operand| self.evaluate(operand, target)),
            },
            ExprKind::Member => Some(self.member(expr, target)),
            ExprKind::Construct => self.construct(expr, target),
            ExprKind::ParamRef | ExprKind::Other => match expr.value {
                Some(_) => self.constant(expr, target).map(DefaultValue::Simple),
                None => None,
            },
        }
    }

    /// Literal text of a constant-valued expression.
    fn constant(&self, expr: &Expr, target: &TypeRef) -> Option<String> {
        let value = expr.value?;
        let text = match value {
            ConstValue::Bool(b) => b.to_string(),
            ConstValue::Int(i) => match target.builtin {
                Some(BuiltinKind::Bool) if target.category == TypeCategory::Builtin => {
                    (i != 0).to_string()
                }
                _ => i.to_string(),
            },
            ConstValue::Float(f) => {
                let double = target.builtin == Some(BuiltinKind::Double)
                    || (target.builtin.is_none() && !expr.text.ends_with(['f', 'F']));
                format_float(f, double)
            }
        };
        Some(text)
    }

    /// `Color::White`, `Vector3::ZERO`, or an enum constant.
    fn member(&self, expr: &Expr, target: &TypeRef) -> DefaultValue {
        let path: Vec<&str> = expr.text.split("::").map(str::trim).collect();
        let literal = match path.as_slice() {
            [.., owner, member] => format!("{}.{member}", self.script_name(owner)),
            _ => expr.text.clone(),
        };
        if target.category == TypeCategory::Enum {
            DefaultValue::Simple(literal)
        } else {
            DefaultValue::Constructed {
                literal,
                ty: target.name.clone(),
            }
        }
    }

    fn construct(&self, expr: &Expr, target: &TypeRef) -> Option<DefaultValue> {
        let native = expr.ty.as_deref().unwrap_or(&target.name);
        let simple = native.rsplit("::").next().unwrap_or(native);

        if target.category.is_string_like() && expr.args.is_empty() {
            return Some(DefaultValue::Simple("\"\"".into()));
        }
        if target.category.is_object() && expr.args.is_empty() {
            return Some(DefaultValue::Simple("null".into()));
        }

        let script = self.script_name(simple);
        if expr.args.is_empty() {
            let literal = if target.category == TypeCategory::Struct {
                format!("{script}.Default()")
            } else {
                format!("new {script}()")
            };
            return Some(DefaultValue::Constructed {
                literal,
                ty: target.name.clone(),
            });
        }

        let mut args = Vec::with_capacity(expr.args.len());
        for arg in &expr.args {
            // Argument types are unknown here; float literals keep the
            // suffix the source spelled them with.
            let hint = TypeRef::new("", TypeCategory::Builtin);
            args.push(self.evaluate(arg, &hint)?.literal().to_string());
        }
        Some(DefaultValue::Constructed {
            literal: format!("new {script}({})", args.join(", ")),
            ty: target.name.clone(),
        })
    }

    fn script_name(&self, native: &str) -> String {
        self.types
            .get(native)
            .map(|t| t.script_name.clone())
            .unwrap_or_else(|| native.to_string())
    }
}

/// Integral values print without a fractional part; others carry the
/// single-precision suffix unless `double` is set.
fn format_float(value: f64, double: bool) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else if double {
        format!("{value}")
    } else {
        format!("{value}f")
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
