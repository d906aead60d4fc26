//! Classification-code word cloud over the catalog dataset.

use shelfcloud_types::CodeOption;
use tracing::debug;

use super::{
    render_cloud, CloudPanel, SubjectLine, ViewConfig, NO_DATA, NO_DATA_FOR_CODE,
    NO_SUBJECTS_FOR_CODE,
};
use crate::dataset::Dataset;
use crate::render::CloudRenderer;

/// Renders one code's subjects as a cloud plus its top subjects by weight.
#[derive(Debug)]
pub struct SubjectCloud<'d, R> {
    dataset: &'d Dataset,
    renderer: R,
    config: ViewConfig,
}

impl<'d, R: CloudRenderer> SubjectCloud<'d, R> {
    pub fn new(dataset: &'d Dataset, renderer: R) -> Self {
        Self::with_view_config(dataset, renderer, ViewConfig::default())
    }

    pub fn with_view_config(dataset: &'d Dataset, renderer: R, config: ViewConfig) -> Self {
        Self {
            dataset,
            renderer,
            config,
        }
    }

    /// Selector entries, one per distinct code in ascending order.
    pub fn options(&self) -> Vec<CodeOption> {
        self.dataset.code_options()
    }

    /// The first code, pre-selected when the view opens.
    pub fn default_selection(&self) -> Option<&'d str> {
        self.dataset.codes().first().copied()
    }

    /// Builds the panel for `selection`.
    pub fn update(&self, selection: Option<&str>) -> CloudPanel {
        let Some(code) = selection.filter(|c| !c.is_empty()) else {
            return CloudPanel::message(NO_DATA);
        };

        if self.dataset.records_for(code).next().is_none() {
            return CloudPanel::message(NO_DATA_FOR_CODE);
        }

        let text = self.dataset.subject_text(code);
        if text.trim().is_empty() {
            return CloudPanel::message(NO_SUBJECTS_FOR_CODE);
        }

        let image = match render_cloud(&self.renderer, &text) {
            Ok(image) => image,
            Err(message) => return CloudPanel::Message(message),
        };

        let top_subjects = self
            .dataset
            .top_by_weight(code, self.config.top_subjects)
            .iter()
            .map(|ranked| SubjectLine::from_ranked(ranked, self.config.subject_chars))
            .collect::<Vec<_>>();

        debug!(code, subjects = top_subjects.len(), "rendered subject cloud");

        CloudPanel::Rendered {
            image,
            top_subjects,
        }
    }
}
