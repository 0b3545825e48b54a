//! XML documentation comments.

use quick_xml::escape::partial_escape as escape;
use sbgen_core::Comment;

use crate::source::Source;
use crate::uwriteln;

/// Write `comment` as `///` lines. Only parameters named in `params` are
/// documented, in that order.
pub fn write_doc(comment: &Comment, params: &[&str], out: &mut Source) {
    if comment.is_empty() {
        return;
    }
    if !comment.brief.is_empty() {
        uwriteln!(out, "/// <summary>");
        write_paragraphs(&comment.brief, out);
        uwriteln!(out, "/// </summary>");
    }
    for name in params {
        if let Some(param) = comment.param(name)
            && !param.paragraphs.is_empty()
        {
            uwriteln!(
                out,
                "/// <param name=\"{name}\">{}</param>",
                escape(param.paragraphs.join(" ").as_str())
            );
        }
    }
    if !comment.returns.is_empty() {
        uwriteln!(
            out,
            "/// <returns>{}</returns>",
            escape(comment.returns.join(" ").as_str())
        );
    }
}

fn write_paragraphs(paragraphs: &[String], out: &mut Source) {
    for (index, paragraph) in paragraphs.iter().enumerate() {
        if index > 0 {
            uwriteln!(out, "///");
        }
        for line in paragraph.lines() {
            uwriteln!(out, "/// {}", escape(line.trim()));
        }
    }
}

#[cfg(test)]
mod tests {
    use sbgen_core::CommentParam;

    use super::*;

    #[test]
    fn summary_params_and_returns() {
        let comment = Comment {
            brief: vec!["Casts a ray & reports hits.".into(), "Second paragraph.".into()],
            returns: vec!["True if <anything> was hit.".into()],
            params: vec![
                CommentParam {
                    name: "ray".into(),
                    paragraphs: vec!["Ray to cast.".into()],
                },
                CommentParam {
                    name: "unused".into(),
                    paragraphs: vec!["Not a parameter.".into()],
                },
            ],
            copydoc: None,
        };
        let mut out = Source::new();
        write_doc(&comment, &["ray"], &mut out);
        assert_eq!(
            out.as_str(),
            "/// <summary>\n\
             /// Casts a ray &amp; reports hits.\n\
             ///\n\
             /// Second paragraph.\n\
             /// </summary>\n\
             /// <param name=\"ray\">Ray to cast.</param>\n\
             /// <returns>True if &lt;anything&gt; was hit.</returns>\n"
        );
    }

    #[test]
    fn empty_comments_write_nothing() {
        let mut out = Source::new();
        write_doc(&Comment::default(), &[], &mut out);
        assert!(out.is_empty());
    }
}
