// Document structure - the ordered sections a page exposes as navigation targets
use serde::{Deserialize, Serialize};

/// Id of an on-page section element. A section id is "valid" iff the
/// outline currently contains a section with that id.
pub type SectionId = String;

/// Geometry of a single content section, in CSS pixels.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Section {
    pub id: SectionId,
    /// Distance from the top of the document to the top of the section.
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Snapshot of the document structure the tracker navigates over: the
/// sections in document order plus the page metrics needed to compute
/// scroll targets and progress. The host refreshes it on layout changes.
#[derive(Clone, Debug, Default)]
pub struct DocumentOutline {
    sections: Vec<Section>,
    /// Height of the fixed navigation bar, subtracted from scroll targets.
    pub nav_bar_height: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl DocumentOutline {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            nav_bar_height: 0.0,
            document_height: 0.0,
            viewport_height: 0.0,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn first(&self) -> Option<&Section> {
        self.sections.first()
    }

    /// Section whose range contains `position`, in `[top, top + height)`.
    /// When ranges overlap, the last section in document order wins.
    pub fn section_at(&self, position: f64) -> Option<&Section> {
        self.sections
            .iter()
            .filter(|s| position >= s.top && position < s.top + s.height)
            .last()
    }

    /// Scroll offset that puts `id` at the top of the viewport, just
    /// below the fixed navigation bar.
    pub fn scroll_target(&self, id: &str) -> Option<f64> {
        self.get(id).map(|s| s.top - self.nav_bar_height)
    }
}
