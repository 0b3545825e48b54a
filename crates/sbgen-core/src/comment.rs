//! Normalized documentation comments.

/// Documentation for a single parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentParam {
    pub name: String,
    pub paragraphs: Vec<String>,
}

/// A normalized doc comment.
///
/// `copydoc` holds the unresolved target of a leading `@copydoc`; once the
/// comment resolver has run it is always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    pub brief: Vec<String>,
    pub returns: Vec<String>,
    pub params: Vec<CommentParam>,
    pub copydoc: Option<String>,
}

impl Comment {
    /// A comment consisting of a single brief paragraph.
    pub fn brief(text: impl Into<String>) -> Self {
        Self {
            brief: vec![text.into()],
            ..Self::default()
        }
    }

    /// A comment that copies another declaration's documentation.
    pub fn copydoc(target: impl Into<String>) -> Self {
        Self {
            copydoc: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.brief.is_empty()
            && self.returns.is_empty()
            && self.params.is_empty()
            && self.copydoc.is_none()
    }

    /// Brief paragraphs joined with a single space.
    pub fn brief_text(&self) -> String {
        self.brief.join(" ")
    }

    /// Look up the paragraphs documenting a parameter.
    pub fn param(&self, name: &str) -> Option<&CommentParam> {
        self.params.iter().find(|p| p.name == name)
    }
}
