//! Interactive views: the catalog-code cloud (V1) and the column cloud (V2).
//!
//! A view turns a selection into a [`CloudPanel`]: either a rendered image
//! with its ranked subject list, or a message shown in its place. Views
//! never return errors; every failure becomes a message.

mod columns;
mod subjects;

pub use columns::ColumnCloud;
pub use subjects::SubjectCloud;

use core::fmt;

use serde::Deserialize;
use shelfcloud_types::{RankedSubject, Weight};
use tracing::warn;

use crate::render::{CloudRenderer, RenderError, RenderedCloud};

pub const NO_DATA: &str = "No data available";
pub const NO_DATA_FOR_CODE: &str = "No data available for this classification code";
pub const NO_SUBJECTS_FOR_CODE: &str = "No subject data available for this classification code";
pub const UPLOAD_PROMPT: &str = "Upload a CSV file";

/// Display limits for the ranked subject list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Maximum number of ranked subjects listed.
    pub top_subjects: usize,
    /// Subjects longer than this many characters are cut and suffixed `...`.
    pub subject_chars: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            top_subjects: 10,
            subject_chars: 100,
        }
    }
}

/// One line of the ranked subject list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectLine {
    pub subject: String,
    pub weight: Weight,
}

impl SubjectLine {
    pub fn from_ranked(ranked: &RankedSubject, max_chars: usize) -> Self {
        Self {
            subject: truncate_subject(&ranked.subject, max_chars),
            weight: ranked.weight,
        }
    }
}

impl fmt::Display for SubjectLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} loans)", self.subject, self.weight)
    }
}

/// Output region of a view.
#[derive(Debug, Clone)]
pub enum CloudPanel {
    Rendered {
        image: RenderedCloud,
        top_subjects: Vec<SubjectLine>,
    },
    Message(String),
}

impl CloudPanel {
    pub fn message(text: impl Into<String>) -> Self {
        CloudPanel::Message(text.into())
    }

    /// The message text, if this panel shows one.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            CloudPanel::Message(text) => Some(text),
            CloudPanel::Rendered { .. } => None,
        }
    }

    /// The rendered image, if any.
    pub fn image(&self) -> Option<&RenderedCloud> {
        match self {
            CloudPanel::Rendered { image, .. } => Some(image),
            CloudPanel::Message(_) => None,
        }
    }

    /// Ranked subjects shown beside the image; empty for messages.
    pub fn top_subjects(&self) -> &[SubjectLine] {
        match self {
            CloudPanel::Rendered { top_subjects, .. } => top_subjects,
            CloudPanel::Message(_) => &[],
        }
    }
}

/// Cuts `subject` to `max_chars` characters, appending `...` when cut.
pub fn truncate_subject(subject: &str, max_chars: usize) -> String {
    match subject.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &subject[..end]),
        None => subject.to_string(),
    }
}

fn render_error_message(err: &RenderError) -> String {
    format!("Error generating word cloud: {err}")
}

/// Renders and encodes `text`, returning the image or the panel message.
fn render_cloud<R: CloudRenderer>(renderer: &R, text: &str) -> Result<RenderedCloud, String> {
    renderer
        .render(text)
        .and_then(|img| RenderedCloud::from_image(&img))
        .map_err(|err| {
            warn!(error = %err, "word cloud rendering failed");
            render_error_message(&err)
        })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use image::{Rgb, RgbImage};

    use crate::render::{CloudRenderer, RenderError};

    /// Records calls and optionally fails.
    #[derive(Debug, Default)]
    pub struct StubRenderer {
        pub calls: Cell<usize>,
        pub fail: bool,
    }

    impl StubRenderer {
        pub fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                fail: true,
            }
        }
    }

    impl CloudRenderer for StubRenderer {
        fn render(&self, _text: &str) -> Result<RgbImage, RenderError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(RenderError::CanvasTooSmall {
                    width: 1,
                    height: 1,
                });
            }
            Ok(RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])))
        }
    }
}
