// Notifications - synchronous observer registry replacing DOM custom events
use crate::error_log::ErrorRecord;
use crate::section::SectionId;
use crate::state::{Direction, Language};

/// How a successful navigation found its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationSource {
    /// The requested section existed.
    Direct,
    /// The requested section was missing; the last valid section was used.
    Fallback,
    /// No last valid section either; the first section in document order.
    FallbackFirst,
}

#[derive(Clone, Debug)]
pub enum NavEvent {
    /// The active section changed, from scrolling or navigation.
    SectionChanged { section: SectionId },
    /// A navigation request succeeded. `target_y` is the scroll offset the
    /// host should smooth-scroll to.
    Navigated {
        section: SectionId,
        source: NavigationSource,
        previous: Option<SectionId>,
        target_y: f64,
    },
    HistoryUpdated {
        history: Vec<SectionId>,
        last_item: SectionId,
    },
    HistoryCleared,
    LastValidSectionUpdated { section: SectionId },
    /// Startup restore finished; carries the restored state.
    Initialized {
        last_valid_section: Option<SectionId>,
        history: Vec<SectionId>,
        section_count: usize,
    },
    RecoverableError { record: ErrorRecord },
    MenuToggled { open: bool },
    LanguageChanged {
        language: Language,
        direction: Direction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    SectionChanged,
    Navigated,
    HistoryUpdated,
    HistoryCleared,
    LastValidSectionUpdated,
    Initialized,
    RecoverableError,
    MenuToggled,
    LanguageChanged,
}

impl NavEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NavEvent::SectionChanged { .. } => EventKind::SectionChanged,
            NavEvent::Navigated { .. } => EventKind::Navigated,
            NavEvent::HistoryUpdated { .. } => EventKind::HistoryUpdated,
            NavEvent::HistoryCleared => EventKind::HistoryCleared,
            NavEvent::LastValidSectionUpdated { .. } => EventKind::LastValidSectionUpdated,
            NavEvent::Initialized { .. } => EventKind::Initialized,
            NavEvent::RecoverableError { .. } => EventKind::RecoverableError,
            NavEvent::MenuToggled { .. } => EventKind::MenuToggled,
            NavEvent::LanguageChanged { .. } => EventKind::LanguageChanged,
        }
    }
}

type Callback = Box<dyn FnMut(&NavEvent)>;

/// Observer registry. Callbacks run synchronously at the point the state
/// mutated, in registration order; per-kind observers run before catch-all
/// ones. The rendering layer subscribes here instead of the DOM event bus.
#[derive(Default)]
pub struct Observers {
    by_kind: Vec<(EventKind, Callback)>,
    any: Vec<Callback>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for one notification kind.
    pub fn on(&mut self, kind: EventKind, callback: impl FnMut(&NavEvent) + 'static) {
        self.by_kind.push((kind, Box::new(callback)));
    }

    /// Registers `callback` for every notification kind.
    pub fn on_any(&mut self, callback: impl FnMut(&NavEvent) + 'static) {
        self.any.push(Box::new(callback));
    }

    pub fn emit(&mut self, event: &NavEvent) {
        let kind = event.kind();
        for (k, callback) in &mut self.by_kind {
            if *k == kind {
                callback(event);
            }
        }
        for callback in &mut self.any {
            callback(event);
        }
    }
}
