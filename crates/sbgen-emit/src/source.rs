//! Indentation-aware text buffer shared by every emitter.
//!
//! Text is pushed line by line. Leading whitespace of each pushed line is
//! discarded and replaced with the current indentation, which opening and
//! closing braces adjust. Templates can therefore be written indented the
//! way they read in Rust source.

use std::fmt;

/// Write formatted text into a [`Source`] (or any `fmt::Write` sink whose
/// writes cannot fail).
#[macro_export]
macro_rules! uwrite {
    ($dst:expr, $($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let _ = write!($dst, $($arg)*);
    }};
}

/// [`uwrite!`] followed by a newline.
#[macro_export]
macro_rules! uwriteln {
    ($dst:expr $(,)?) => {{
        use ::std::fmt::Write as _;
        let _ = writeln!($dst);
    }};
    ($dst:expr, $($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let _ = writeln!($dst, $($arg)*);
    }};
}

/// [`uwriteln!`] one level deeper than the current indentation, for the
/// unbraced bodies of `if` and `else`.
#[macro_export]
macro_rules! uwriteln_indented {
    ($dst:expr, $($arg:tt)*) => {{
        $dst.indent(1);
        $crate::uwriteln!($dst, $($arg)*);
        $dst.deindent(1);
    }};
}

/// A growing text buffer with brace-driven indentation.
#[derive(Debug, Clone)]
pub struct Source {
    text: String,
    indent: usize,
    /// Indentation unit, a tab unless overridden.
    unit: &'static str,
    at_line_start: bool,
}

impl Source {
    pub fn new() -> Self {
        Self::with_unit("\t")
    }

    /// A buffer indenting with `unit` instead of tabs.
    pub fn with_unit(unit: &'static str) -> Self {
        Self {
            text: String::new(),
            indent: 0,
            unit,
            at_line_start: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    /// Increase indentation by `levels`.
    pub fn indent(&mut self, levels: usize) {
        self.indent += levels;
    }

    /// Decrease indentation by `levels`, saturating at zero.
    pub fn deindent(&mut self, levels: usize) {
        self.indent = self.indent.saturating_sub(levels);
    }

    /// Push text, reindenting every line.
    pub fn push_str(&mut self, text: &str) {
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            let has_newline = lines.peek().is_some();
            self.push_line_fragment(line);
            if has_newline {
                self.newline();
            }
        }
    }

    /// Push a chunk verbatim, keeping its own indentation relative to the
    /// current level.
    pub fn push_block(&mut self, block: &str) {
        for line in block.lines() {
            if line.trim().is_empty() {
                self.newline();
                continue;
            }
            self.write_indent();
            self.text.push_str(line.trim_end());
            self.newline();
        }
    }

    /// Append the contents of another buffer at the current indentation.
    pub fn append(&mut self, other: &Source) {
        self.push_block(other.as_str());
    }

    /// Terminate the current line.
    pub fn newline(&mut self) {
        self.text.push('\n');
        self.at_line_start = true;
    }

    /// Ensure the buffer ends with an empty line.
    pub fn blank_line(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
        if !self.text.is_empty() && !self.text.ends_with("\n\n") {
            self.newline();
        }
    }

    fn push_line_fragment(&mut self, fragment: &str) {
        let trimmed = if self.at_line_start {
            fragment.trim_start()
        } else {
            fragment
        };
        if trimmed.is_empty() {
            return;
        }
        if self.at_line_start {
            // A closing brace dedents its own line.
            if trimmed.starts_with('}') {
                self.deindent(1);
            }
            self.write_indent();
            if trimmed.starts_with('}') {
                self.indent += 1;
            }
        }
        self.text.push_str(trimmed);
        for c in trimmed.chars() {
            match c {
                '{' => self.indent += 1,
                '}' => self.deindent(1),
                _ => {}
            }
        }
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            for _ in 0..self.indent {
                self.text.push_str(self.unit);
            }
            self.at_line_start = false;
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for Source {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces_drive_indentation() {
        let mut src = Source::with_unit("    ");
        uwriteln!(src, "namespace bs");
        uwriteln!(src, "{{");
        uwriteln!(src, "class A");
        uwriteln!(src, "{{");
        uwriteln!(src, "int x;");
        uwriteln!(src, "}};");
        uwriteln!(src, "}}");
        assert_eq!(
            src.as_str(),
            "namespace bs\n{\n    class A\n    {\n        int x;\n    };\n}\n"
        );
    }

    #[test]
    fn pushed_templates_lose_their_rust_indentation() {
        let mut src = Source::with_unit("  ");
        src.push_str(
            "if (x)
                {
                    y();
                }
            ",
        );
        assert_eq!(src.as_str(), "if (x)\n{\n  y();\n}\n");
    }

    #[test]
    fn inline_braces_balance() {
        let mut src = Source::new();
        uwriteln!(src, "{{ }}");
        uwriteln!(src, "next;");
        assert_eq!(src.as_str(), "{ }\nnext;\n");
    }

    #[test]
    fn appended_blocks_keep_relative_indentation() {
        let mut inner = Source::with_unit("  ");
        uwriteln!(inner, "a;");
        uwriteln!(inner, "{{");
        uwriteln!(inner, "b;");
        uwriteln!(inner, "}}");

        let mut outer = Source::with_unit("  ");
        uwriteln!(outer, "{{");
        outer.append(&inner);
        uwriteln!(outer, "}}");
        assert_eq!(outer.as_str(), "{\n  a;\n  {\n    b;\n  }\n}\n");
    }

    #[test]
    fn blank_line_is_idempotent() {
        let mut src = Source::new();
        uwriteln!(src, "a;");
        src.blank_line();
        src.blank_line();
        uwriteln!(src, "b;");
        assert_eq!(src.as_str(), "a;\n\nb;\n");
    }
}
