// Navigation state - active section, bounded history, last-valid fallback
use crate::section::SectionId;
use crate::state::Language;

/// In-memory navigation state, one instance per page load. The tracker
/// mirrors `history` and `last_valid_section` to persistent storage after
/// every mutation; nothing here touches storage itself.
pub struct NavigationState {
    /// Id of the section currently considered active. Starts at the
    /// default sentinel and is re-derived on every reported scroll.
    pub current_section: SectionId,
    /// Most recent section id confirmed to exist in the outline. Survives
    /// page loads via storage; fallback target for missing sections.
    pub last_valid_section: Option<SectionId>,
    /// Chronological record of distinct section activations, oldest first.
    /// No two consecutive entries are equal; length is capped by the
    /// tracker's configured maximum.
    pub history: Vec<SectionId>,
    pub is_menu_open: bool,
    pub language: Language,
}

impl NavigationState {
    pub fn new(default_section: impl Into<SectionId>) -> Self {
        Self {
            current_section: default_section.into(),
            last_valid_section: None,
            history: Vec::new(),
            is_menu_open: false,
            language: Language::default(),
        }
    }

    /// Appends `id` to the history, suppressing consecutive duplicates and
    /// evicting the oldest entries beyond `max`. Returns false when the
    /// entry was suppressed as a duplicate.
    pub fn push_history(&mut self, id: SectionId, max: usize) -> bool {
        if self.history.last() == Some(&id) {
            return false;
        }
        self.history.push(id);
        if self.history.len() > max {
            let excess = self.history.len() - max;
            self.history.drain(..excess);
        }
        true
    }

    /// Second-to-last history entry; the section the user came from.
    pub fn previous_section(&self) -> Option<&SectionId> {
        if self.history.len() > 1 {
            self.history.get(self.history.len() - 2)
        } else {
            None
        }
    }
}
