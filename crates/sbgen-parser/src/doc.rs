//! Doc-comment parsing.
//!
//! Doc comments arrive as raw doxygen text. This module strips comment
//! syntax and splits the text into brief, parameter and return paragraphs.
//! A leading `@copydoc X` is kept as an unresolved reference; text between
//! `@native` and `@endnative` only applies to native code and is dropped.

use sbgen_core::{Comment, CommentParam};

enum Section {
    Brief,
    Param(usize),
    Returns,
}

struct DocBuilder {
    comment: Comment,
    section: Section,
    paragraph: String,
}

impl DocBuilder {
    fn new() -> Self {
        Self {
            comment: Comment::default(),
            section: Section::Brief,
            paragraph: String::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        for word in text.split_whitespace() {
            if !self.paragraph.is_empty() {
                self.paragraph.push(' ');
            }
            self.paragraph.push_str(word);
        }
    }

    fn flush(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let paragraph = std::mem::take(&mut self.paragraph);
        match self.section {
            Section::Brief => self.comment.brief.push(paragraph),
            Section::Returns => self.comment.returns.push(paragraph),
            Section::Param(index) => {
                if let Some(param) = self.comment.params.get_mut(index) {
                    param.paragraphs.push(paragraph);
                }
            }
        }
    }

    fn start(&mut self, section: Section) {
        self.flush();
        self.section = section;
    }

    fn start_param(&mut self, name: &str) {
        let index = match self.comment.params.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.comment.params.push(CommentParam {
                    name: name.to_string(),
                    paragraphs: Vec::new(),
                });
                self.comment.params.len() - 1
            }
        };
        self.start(Section::Param(index));
    }

    fn line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            self.flush();
            return;
        }

        let Some((command, rest)) = split_command(line) else {
            self.push_text(line);
            return;
        };

        match command {
            "param" | "tparam" => {
                // `@param[in] name`
                let rest = rest
                    .strip_prefix('[')
                    .and_then(|r| r.split_once(']'))
                    .map(|(_, r)| r)
                    .unwrap_or(rest)
                    .trim_start();
                let (name, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                self.start_param(name);
                self.push_text(text);
            }
            "return" | "returns" => {
                self.start(Section::Returns);
                self.push_text(rest);
            }
            "copydoc" => {
                let has_brief = !self.comment.brief.is_empty() || !self.paragraph.is_empty();
                if self.comment.copydoc.is_none() && !has_brief {
                    self.comment.copydoc = Some(rest.trim().to_string());
                }
            }
            "brief" | "details" => {
                self.start(Section::Brief);
                self.push_text(rest);
            }
            _ => {
                // Other commands (`@note`, `@see`, ...) start a new paragraph
                // of brief text.
                self.start(Section::Brief);
                self.push_text(rest);
            }
        }
    }

    fn finish(mut self) -> Comment {
        self.flush();
        self.comment
    }
}

/// Split a line starting with `@cmd` or `\cmd` into the command name and
/// the remaining text.
fn split_command(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix('@').or_else(|| line.strip_prefix('\\'))?;
    let end = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    if end == 0 {
        return None;
    }
    Some((&body[..end], body[end..].trim_start()))
}

/// Remove comment delimiters and leading `*` from every line.
fn strip_comment_syntax(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            let mut line = line.trim();
            for prefix in ["/**<", "///<", "/**", "/*!", "/*", "///", "//!", "//"] {
                if let Some(rest) = line.strip_prefix(prefix) {
                    line = rest;
                    break;
                }
            }
            line = line.strip_suffix("*/").unwrap_or(line).trim();
            line = line.strip_prefix('*').unwrap_or(line);
            line.to_string()
        })
        .collect()
}

/// Drop every `@native ... @endnative` span, which may cross lines.
fn strip_native_blocks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let Some(start) = rest.find("@native") else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..start]);
        match rest[start..].find("@endnative") {
            Some(end) => {
                rest = &rest[start + end + "@endnative".len()..];
                if out.ends_with('\n') {
                    rest = rest.strip_prefix('\n').unwrap_or(rest);
                }
            }
            None => return out,
        }
    }
}

/// Parse a raw doc comment.
///
/// ```
/// use sbgen_parser::parse_doc_comment;
///
/// let comment = parse_doc_comment(
///     "/**\n * Resizes the texture.\n *\n * @param width New width.\n * @returns True on success.\n */",
/// );
/// assert_eq!(comment.brief, ["Resizes the texture."]);
/// assert_eq!(comment.param("width").unwrap().paragraphs, ["New width."]);
/// assert_eq!(comment.returns, ["True on success."]);
/// ```
pub fn parse_doc_comment(raw: &str) -> Comment {
    let stripped = strip_comment_syntax(raw).join("\n");
    let text = strip_native_blocks(&stripped);

    let mut builder = DocBuilder::new();
    for line in text.lines() {
        builder.line(line);
    }
    builder.finish()
}
