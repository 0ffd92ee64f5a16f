//! HTML rendering for analysis results and error fragments.
//!
//! Every untrusted string (filename, label description, error message) goes
//! through [`escape_html`] before it is embedded. The templates themselves
//! are static and contain no user input.

use std::fmt::Write;

use crate::label::Label;

/// Link target for the upload form.
pub const UPLOAD_FORM_PATH: &str = "/";

const STYLE: &str = r#"body{font-family:system-ui, -apple-system, Roboto, "Segoe UI", Arial; margin:28px;}
      .card{max-width:820px;border:1px solid #eee;padding:18px;border-radius:10px;box-shadow:0 6px 20px rgba(0,0,0,0.04)}
      table{width:100%; border-collapse:collapse; margin-top:12px}
      th{text-align:left; padding:10px 8px; border-bottom:2px solid #ddd}
      td{padding:8px; border-bottom:1px solid #eee}
      td.score, th.score{text-align:right}
      .note{color:#666; margin-top:10px}"#;

/// Escape `&`, `<`, `>`, `"` and `'` so `input` is inert inside element
/// content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render the full result document for `filename` and its labels.
///
/// An empty label set renders a "No labels found." paragraph and no table.
pub fn render_label_page(filename: &str, labels: &[Label]) -> String {
    let filename = escape_html(filename);
    let mut html = String::with_capacity(2048 + labels.len() * 128);

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>Labels for {filename}</title>
    <style>
      {STYLE}
    </style>
  </head>
  <body>
    <div class="card">
      <h2>Detected labels for <em>{filename}</em></h2>
"#
    );

    if labels.is_empty() {
        html.push_str("      <p>No labels found.</p>\n");
    } else {
        html.push_str(
            r#"      <table>
        <thead><tr><th>Label</th><th class="score">Confidence</th></tr></thead>
        <tbody>
"#,
        );
        for label in labels {
            let _ = writeln!(
                html,
                r#"          <tr><td>{}</td><td class="score">{}</td></tr>"#,
                escape_html(&label.description),
                label.percentage(),
            );
        }
        html.push_str(
            r#"        </tbody>
      </table>
      <p class="note">Note: confidence is the model's score (0-100%). Lower scores may be noisy.</p>
"#,
        );
    }

    let _ = write!(
        html,
        r#"      <p><a href="{UPLOAD_FORM_PATH}">Analyze another image</a></p>
    </div>
  </body>
</html>
"#
    );

    html
}

/// Render a bare `<h2>` fragment. `message` is escaped.
pub fn render_error_fragment(message: &str) -> String {
    format!("<h2>{}</h2>", escape_html(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<Label> {
        vec![Label::new("Cat", 0.957), Label::new("Pet", 0.5)]
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_treats_entities_as_text() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn escape_leaves_plain_text_untouched() {
        assert_eq!(escape_html("Golden retriever é"), "Golden retriever é");
    }

    #[test]
    fn page_escapes_filename_in_title_and_heading() {
        let html = render_label_page("My <Cat>.png", &labels());
        assert!(html.contains("<title>Labels for My &lt;Cat&gt;.png</title>"));
        assert!(html.contains("<em>My &lt;Cat&gt;.png</em>"));
        assert!(!html.contains("<Cat>"));
    }

    #[test]
    fn page_renders_rows_in_order() {
        let html = render_label_page("cat.png", &labels());
        let cat = html.find("<td>Cat</td><td class=\"score\">95.7%</td>").unwrap();
        let pet = html.find("<td>Pet</td><td class=\"score\">50.0%</td>").unwrap();
        assert!(cat < pet);
        assert!(html.contains("<table>"));
        assert!(!html.contains("No labels found."));
    }

    #[test]
    fn page_escapes_descriptions() {
        let hostile = vec![Label::new(r#"<script>alert("x")</script> & co"#, 0.9)];
        let html = render_label_page("a.png", &hostile);
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; co"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_label_set_renders_message_without_table() {
        let html = render_label_page("blank.png", &[]);
        assert!(html.contains("<p>No labels found.</p>"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn page_always_links_back_to_form() {
        for set in [labels(), Vec::new()] {
            let html = render_label_page("x.png", &set);
            assert!(html.contains(r#"<a href="/">Analyze another image</a>"#));
        }
    }

    #[test]
    fn error_fragment_escapes_message() {
        assert_eq!(
            render_error_fragment("quota <exceeded>"),
            "<h2>quota &lt;exceeded&gt;</h2>"
        );
    }
}
