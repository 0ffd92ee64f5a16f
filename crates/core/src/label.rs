//! Label annotations returned by the detection service.

/// A single concept detected in an image.
///
/// `description` comes from an external service and is untrusted: it must
/// go through [`crate::render::escape_html`] before it reaches markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub description: String,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

/// Labels in the order the detector returned them. May be empty.
pub type LabelSet = Vec<Label>;

impl Label {
    pub fn new(description: impl Into<String>, score: f64) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }

    /// Score as a percentage with exactly one decimal place, e.g. `95.7%`.
    pub fn percentage(&self) -> String {
        format_percentage(self.score)
    }
}

/// Format a `[0, 1]` score as `"{score * 100:.1}%"`.
///
/// Exact ties round half to even: `0.0125` renders as `1.2%`.
pub fn format_percentage(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}
