//! Parsed native type spellings.
//!
//! The frontend hands over types as spelled in source, e.g.
//! `const std::vector<ResourceHandle<Mesh>>&` or `Event<void(UINT32)>`.
//! [`TypeExpr::parse`] turns such a spelling into a small tree that the
//! classifier walks.
//!
//! Grammar:
//!
//! ```text
//! TYPE     := CV* BASE CV* SUFFIX*
//! BASE     := BUILTIN+ | '::'? IDENT ('::' IDENT)* TARGS?
//! TARGS    := '<' (TARG (',' TARG)*)? '>'
//! TARG     := NUMBER | TYPE ('(' (TYPE IDENT? (',' TYPE IDENT?)*)? ')')?
//! SUFFIX   := '*' CV* | '&' | '&&'
//! ```

use std::fmt;

use sbgen_core::TypeParseError;

use crate::lexer::{Lexer, Token, TokenKind};

/// Keywords that combine into a single multi-word builtin spelling.
const BUILTIN_WORDS: &[&str] = &["unsigned", "signed", "short", "long", "int", "char", "double"];

/// A pointer or reference applied after the base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSuffix {
    /// `*`, with `is_const` set for `* const`.
    Pointer { is_const: bool },
    Reference,
    RValueReference,
}

/// A function signature used as a template argument (`Event<void(int)>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSig {
    pub ret: Box<TypeExpr>,
    pub params: Vec<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateArg {
    Type(TypeExpr),
    Function(FunctionSig),
    /// Non-type argument, kept verbatim.
    Value(String),
}

/// A parsed type spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    /// `const` applied to the base type.
    pub is_const: bool,
    /// Scope path and name, e.g. `["std", "vector"]`. Multi-word builtins
    /// are a single segment (`"unsigned int"`).
    pub path: Vec<String>,
    pub template_args: Vec<TemplateArg>,
    pub suffixes: Vec<TypeSuffix>,
}

impl TypeExpr {
    /// Parse a complete type spelling.
    ///
    /// ```
    /// use sbgen_parser::{TypeExpr, TypeSuffix};
    ///
    /// let ty = TypeExpr::parse("const std::vector<HMesh>&").unwrap();
    /// assert!(ty.is_const);
    /// assert_eq!(ty.qualified_name(), "std::vector");
    /// assert_eq!(ty.suffixes, [TypeSuffix::Reference]);
    /// ```
    pub fn parse(spelling: &str) -> Result<TypeExpr, TypeParseError> {
        if spelling.trim().is_empty() {
            return Err(TypeParseError::Empty);
        }
        let tokens = Lexer::new(spelling).tokenize()?;
        let mut parser = TypeParser {
            tokens,
            position: 0,
            spelling,
        };
        let ty = parser.parse_type()?;
        parser.expect_eof()?;
        Ok(ty)
    }

    /// Simple name, the last path segment.
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Path segments joined with `::`.
    pub fn qualified_name(&self) -> String {
        self.path.join("::")
    }

    /// Type arguments, skipping non-type and function arguments.
    pub fn type_args(&self) -> impl Iterator<Item = &TypeExpr> {
        self.template_args.iter().filter_map(|arg| match arg {
            TemplateArg::Type(ty) => Some(ty),
            _ => None,
        })
    }

    /// The argument of a single-argument template.
    pub fn single_type_arg(&self) -> Option<&TypeExpr> {
        match self.template_args.as_slice() {
            [TemplateArg::Type(ty)] => Some(ty),
            _ => None,
        }
    }

    /// Number of `*` suffixes.
    pub fn pointer_depth(&self) -> usize {
        self.suffixes
            .iter()
            .filter(|s| matches!(s, TypeSuffix::Pointer { .. }))
            .count()
    }

    pub fn has_suffix(&self) -> bool {
        !self.suffixes.is_empty()
    }

    /// The same type with pointer and reference suffixes removed.
    pub fn without_suffixes(&self) -> TypeExpr {
        TypeExpr {
            suffixes: Vec::new(),
            ..self.clone()
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            f.write_str("const ")?;
        }
        f.write_str(&self.qualified_name())?;
        if !self.template_args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.template_args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match arg {
                    TemplateArg::Type(ty) => write!(f, "{ty}")?,
                    TemplateArg::Value(value) => f.write_str(value)?,
                    TemplateArg::Function(sig) => {
                        write!(f, "{}(", sig.ret)?;
                        for (j, param) in sig.params.iter().enumerate() {
                            if j > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{param}")?;
                        }
                        f.write_str(")")?;
                    }
                }
            }
            f.write_str(">")?;
        }
        for suffix in &self.suffixes {
            match suffix {
                TypeSuffix::Pointer { is_const: false } => f.write_str("*")?,
                TypeSuffix::Pointer { is_const: true } => f.write_str("* const")?,
                TypeSuffix::Reference => f.write_str("&")?,
                TypeSuffix::RValueReference => f.write_str("&&")?,
            }
        }
        Ok(())
    }
}

struct TypeParser<'s> {
    tokens: Vec<Token>,
    position: usize,
    spelling: &'s str,
}

impl TypeParser<'_> {
    fn peek(&self) -> &TokenKind {
        self.tokens
            .get(self.position)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    fn bump(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if kind != TokenKind::Eof {
            self.position += 1;
        }
        kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn error(&self, expected: &'static str) -> TypeParseError {
        match self.peek() {
            TokenKind::Eof => TypeParseError::UnexpectedEnd {
                spelling: self.spelling.to_string(),
            },
            found => TypeParseError::UnexpectedToken {
                found: found.to_string(),
                expected,
                spelling: self.spelling.to_string(),
            },
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), TypeParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_eof(&self) -> Result<(), TypeParseError> {
        if *self.peek() == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.error("end of type"))
        }
    }

    /// Consume `const`/`volatile`/elaborated specifiers, reporting whether
    /// `const` was among them.
    fn eat_qualifiers(&mut self) -> bool {
        let mut is_const = false;
        loop {
            match self.peek() {
                TokenKind::Const => is_const = true,
                TokenKind::Volatile | TokenKind::Elaborated => {}
                _ => return is_const,
            }
            self.bump();
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr, TypeParseError> {
        let mut is_const = self.eat_qualifiers();
        let (path, template_args) = self.parse_base()?;
        is_const |= self.eat_qualifiers();
        let suffixes = self.parse_suffixes();
        Ok(TypeExpr {
            is_const,
            path,
            template_args,
            suffixes,
        })
    }

    fn parse_base(&mut self) -> Result<(Vec<String>, Vec<TemplateArg>), TypeParseError> {
        // Multi-word builtins such as `unsigned long long`.
        let mut words = Vec::new();
        while let TokenKind::Ident(word) = self.peek() {
            if !BUILTIN_WORDS.contains(&word.as_str()) {
                break;
            }
            words.push(word.clone());
            self.bump();
            self.eat_qualifiers();
        }
        if !words.is_empty() {
            return Ok((vec![words.join(" ")], Vec::new()));
        }

        self.eat(&TokenKind::ColonColon);
        let mut path = Vec::new();
        loop {
            let TokenKind::Ident(segment) = self.peek() else {
                return Err(self.error("type name"));
            };
            path.push(segment.clone());
            self.bump();
            if !self.eat(&TokenKind::ColonColon) {
                break;
            }
        }

        let template_args = if self.eat(&TokenKind::Less) {
            self.parse_template_args()?
        } else {
            Vec::new()
        };
        Ok((path, template_args))
    }

    fn parse_template_args(&mut self) -> Result<Vec<TemplateArg>, TypeParseError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::Greater) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_template_arg()?);
            if self.eat(&TokenKind::Greater) {
                return Ok(args);
            }
            self.expect(&TokenKind::Comma, "',' or '>'")?;
        }
    }

    fn parse_template_arg(&mut self) -> Result<TemplateArg, TypeParseError> {
        if let TokenKind::Number(value) = self.peek() {
            let value = value.clone();
            self.bump();
            return Ok(TemplateArg::Value(value));
        }

        let ty = self.parse_type()?;
        if !self.eat(&TokenKind::LParen) {
            return Ok(TemplateArg::Type(ty));
        }

        let mut params = Vec::new();
        if !self.eat(&TokenKind::RParen) {
            loop {
                params.push(self.parse_type()?);
                // Parameter names are allowed but ignored.
                if matches!(self.peek(), TokenKind::Ident(_)) {
                    self.bump();
                }
                if self.eat(&TokenKind::RParen) {
                    break;
                }
                self.expect(&TokenKind::Comma, "',' or ')'")?;
            }
        }
        // `void(void)` declares no parameters.
        if params.len() == 1 && params[0].path == ["void"] && !params[0].has_suffix() {
            params.clear();
        }
        Ok(TemplateArg::Function(FunctionSig {
            ret: Box::new(ty),
            params,
        }))
    }

    fn parse_suffixes(&mut self) -> Vec<TypeSuffix> {
        let mut suffixes = Vec::new();
        loop {
            match self.peek() {
                TokenKind::Star => {
                    self.bump();
                    let is_const = self.eat_qualifiers();
                    suffixes.push(TypeSuffix::Pointer { is_const });
                }
                TokenKind::Amp => {
                    self.bump();
                    suffixes.push(TypeSuffix::Reference);
                }
                TokenKind::AmpAmp => {
                    self.bump();
                    suffixes.push(TypeSuffix::RValueReference);
                }
                _ => return suffixes,
            }
        }
    }
}
