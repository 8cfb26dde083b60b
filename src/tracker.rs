// Section tracker - scroll-driven active section, history, fallback navigation
use crate::config::NavConfig;
use crate::debounce::Debouncer;
use crate::error::NavError;
use crate::error_log::{ErrorLog, ErrorRecord};
use crate::events::{EventKind, NavEvent, NavigationSource, Observers};
use crate::section::{DocumentOutline, SectionId};
use crate::state::{Language, NavigationState, ViewportState};
use crate::storage::KeyValueStore;
use chrono::Utc;
use std::time::Instant;

/// Owns the navigation state for one page load: derives the active section
/// from reported scroll positions, keeps the bounded history and last-valid
/// fallback mirrored to storage, and notifies observers at every mutation
/// point. All methods run synchronously on the caller's thread.
pub struct SectionTracker {
    config: NavConfig,
    outline: DocumentOutline,
    state: NavigationState,
    viewport: ViewportState,
    store: Box<dyn KeyValueStore>,
    observers: Observers,
    error_log: ErrorLog,
    scroll_debounce: Debouncer,
    resize_debounce: Debouncer,
    pending_scroll: Option<f64>,
    pending_width: Option<f64>,
}

impl SectionTracker {
    pub fn new(config: NavConfig, outline: DocumentOutline, store: Box<dyn KeyValueStore>) -> Self {
        let state = NavigationState::new(config.tracking.default_section.clone());
        let error_log = ErrorLog::new(config.storage.error_log_max);
        let scroll_debounce = Debouncer::new(config.scroll_quiet());
        let resize_debounce = Debouncer::new(config.resize_quiet());

        Self {
            config,
            outline,
            state,
            viewport: ViewportState::new(),
            store,
            observers: Observers::new(),
            error_log,
            scroll_debounce,
            resize_debounce,
            pending_scroll: None,
            pending_width: None,
        }
    }

    /// Restores persisted state and derives the initial section from the
    /// starting scroll position. Call once, after registering observers
    /// that care about the `Initialized` notification.
    pub fn initialize(&mut self, scroll_y: f64, viewport_width: f64) {
        self.restore_language();
        self.restore_last_valid();
        self.restore_history();
        self.restore_error_log();

        self.report_scroll(scroll_y);
        self.viewport
            .update_width(viewport_width, self.config.viewport.mobile_breakpoint);
        self.persist_last_valid();

        let event = NavEvent::Initialized {
            last_valid_section: self.state.last_valid_section.clone(),
            history: self.state.history.clone(),
            section_count: self.outline.sections().len(),
        };
        log::info!(
            "navigation initialized - {} sections found",
            self.outline.sections().len()
        );
        self.observers.emit(&event);
    }

    // --- Observer registration ---

    pub fn on(&mut self, kind: EventKind, callback: impl FnMut(&NavEvent) + 'static) {
        self.observers.on(kind, callback);
    }

    pub fn on_any(&mut self, callback: impl FnMut(&NavEvent) + 'static) {
        self.observers.on_any(callback);
    }

    // --- Scroll tracking ---

    /// Maps `scroll_y` to the active section and records the transition.
    /// The last section in document order whose range contains the offset
    /// position wins; when none match, the default section id is reported.
    pub fn report_scroll(&mut self, scroll_y: f64) {
        let position = scroll_y + self.config.tracking.section_offset;
        let computed = self
            .outline
            .section_at(position)
            .map(|s| s.id.clone())
            .unwrap_or_else(|| self.config.tracking.default_section.clone());

        self.viewport.update_scroll(
            scroll_y,
            self.config.viewport.navbar_threshold,
            self.outline.document_height,
            self.outline.viewport_height,
        );

        if computed == self.state.current_section {
            return;
        }

        // The default id is a sentinel: passive scrolling never records it.
        if computed != self.config.tracking.default_section {
            self.record_history(computed.clone());
            self.set_last_valid(computed.clone());
        }

        self.state.current_section = computed.clone();
        self.observers
            .emit(&NavEvent::SectionChanged { section: computed });
    }

    // --- Navigation ---

    /// Scrolls to `target` (a section id, with or without a leading `#`).
    /// Missing targets fall back to the last valid section, then to the
    /// first section in document order. Never panics; returns success.
    pub fn navigate_to(&mut self, target: &str, add_to_history: bool) -> bool {
        let clean = target.strip_prefix('#').unwrap_or(target);
        if clean.is_empty() {
            log::warn!("{}", NavError::InvalidTarget);
            return false;
        }

        if !self.outline.contains(clean) {
            self.record_error(
                &NavError::SectionNotFound(clean.to_string()),
                Some(clean.to_string()),
                serde_json::json!({ "action": "fallback_to_last_valid" }),
            );

            return match self.state.last_valid_section.clone() {
                Some(last_valid) => {
                    self.scroll_to_valid(&last_valid, false, NavigationSource::Fallback)
                }
                None => self.navigate_to_first(),
            };
        }

        let clean = clean.to_string();
        self.scroll_to_valid(&clean, add_to_history, NavigationSource::Direct)
    }

    /// Consumes the two most recent history entries and navigates to the
    /// older one. Going back is not itself recorded.
    pub fn go_back(&mut self) -> bool {
        if self.state.history.len() < 2 {
            log::info!("{}", NavError::NoHistoryAvailable);
            return false;
        }

        self.state.history.pop();
        let target = self.state.history.pop();
        self.persist_history();

        match target {
            Some(target) => self.navigate_to(&target, false),
            None => false,
        }
    }

    pub fn go_to_last_valid(&mut self) -> bool {
        match self.state.last_valid_section.clone() {
            Some(last_valid) => self.navigate_to(&last_valid, false),
            None => false,
        }
    }

    pub fn clear_history(&mut self) {
        self.state.history.clear();
        if let Err(e) = self.store.remove(&self.config.storage.history_key) {
            log::warn!("failed to remove persisted history: {e}");
        }
        self.observers.emit(&NavEvent::HistoryCleared);
    }

    fn navigate_to_first(&mut self) -> bool {
        let Some(first) = self.outline.first().map(|s| s.id.clone()) else {
            self.record_error(
                &NavError::NoSectionsPresent,
                None,
                serde_json::json!({ "action": "none" }),
            );
            return false;
        };
        self.scroll_to_valid(&first, true, NavigationSource::FallbackFirst)
    }

    /// The validated scroll step: `id` is known to exist. Updates history
    /// (when requested and actually moving), the last valid section, and
    /// the current section, then emits the navigation notification with
    /// the computed scroll target.
    fn scroll_to_valid(&mut self, id: &str, add_to_history: bool, source: NavigationSource) -> bool {
        let Some(target_y) = self.outline.scroll_target(id) else {
            log::error!("section '{id}' vanished between validation and scroll");
            return false;
        };

        if add_to_history && self.state.current_section != id {
            self.record_history(id.to_string());
        }
        self.set_last_valid(id.to_string());

        // Optimistic: the current section flips before the smooth scroll
        // the host performs has finished.
        self.state.current_section = id.to_string();

        let previous = self.state.previous_section().cloned();
        self.observers.emit(&NavEvent::Navigated {
            section: id.to_string(),
            source,
            previous,
            target_y,
        });
        true
    }

    // --- Menu & language ---

    pub fn toggle_menu(&mut self) {
        self.state.is_menu_open = !self.state.is_menu_open;
        self.observers.emit(&NavEvent::MenuToggled {
            open: self.state.is_menu_open,
        });
    }

    pub fn close_menu(&mut self) {
        if self.state.is_menu_open {
            self.toggle_menu();
        }
    }

    pub fn toggle_language(&mut self) {
        self.state.language = self.state.language.toggled();
        if let Err(e) = self.store.set(
            &self.config.storage.language_key,
            self.state.language.as_str(),
        ) {
            log::warn!("failed to persist language preference: {e}");
        }
        self.observers.emit(&NavEvent::LanguageChanged {
            language: self.state.language,
            direction: self.state.language.direction(),
        });
    }

    /// Applies a viewport width change: refreshes the mobile flag and
    /// closes an open menu when crossing to desktop width.
    pub fn handle_resize(&mut self, width: f64) {
        self.viewport
            .update_width(width, self.config.viewport.mobile_breakpoint);
        if width > self.config.viewport.mobile_breakpoint {
            self.close_menu();
        }
    }

    // --- Debounced event intake ---

    /// Queues a raw scroll event; the newest offset in a burst wins and is
    /// applied by `tick` once the quiet period elapses.
    pub fn queue_scroll(&mut self, scroll_y: f64) {
        self.queue_scroll_at(scroll_y, Instant::now());
    }

    pub fn queue_scroll_at(&mut self, scroll_y: f64, now: Instant) {
        self.pending_scroll = Some(scroll_y);
        self.scroll_debounce.trigger_at(now);
    }

    /// Queues a raw resize event, debounced like scroll.
    pub fn queue_resize(&mut self, width: f64) {
        self.queue_resize_at(width, Instant::now());
    }

    pub fn queue_resize_at(&mut self, width: f64, now: Instant) {
        self.pending_width = Some(width);
        self.resize_debounce.trigger_at(now);
    }

    /// Applies pending debounced events whose quiet period has elapsed.
    /// The host calls this from its frame or timer loop.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if self.scroll_debounce.poll_at(now) {
            if let Some(scroll_y) = self.pending_scroll.take() {
                self.report_scroll(scroll_y);
            }
        }
        if self.resize_debounce.poll_at(now) {
            if let Some(width) = self.pending_width.take() {
                self.handle_resize(width);
            }
        }
    }

    // --- Accessors ---

    pub fn current_section(&self) -> &str {
        &self.state.current_section
    }

    pub fn last_valid_section(&self) -> Option<&str> {
        self.state.last_valid_section.as_deref()
    }

    pub fn history(&self) -> &[SectionId] {
        &self.state.history
    }

    pub fn is_menu_open(&self) -> bool {
        self.state.is_menu_open
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn outline(&self) -> &DocumentOutline {
        &self.outline
    }

    /// Replaces the document outline after a layout change. Section ids
    /// already recorded are not revalidated; stale entries surface through
    /// the normal fallback chain.
    pub fn set_outline(&mut self, outline: DocumentOutline) {
        self.outline = outline;
    }

    pub fn error_log(&self) -> &[ErrorRecord] {
        self.error_log.records()
    }

    pub fn clear_error_log(&mut self) {
        self.error_log.clear();
        if let Err(e) = self.store.remove(&self.config.storage.error_log_key) {
            log::warn!("failed to remove persisted error log: {e}");
        }
    }

    // --- Startup restore ---

    fn restore_language(&mut self) {
        match self.store.get(&self.config.storage.language_key) {
            Ok(Some(saved)) => {
                if let Some(language) = Language::parse(&saved) {
                    self.state.language = language;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("failed to read language preference: {e}"),
        }
    }

    /// Persisted value if it still exists in the document, else the first
    /// section in document order, else none.
    fn restore_last_valid(&mut self) {
        if self.outline.is_empty() {
            self.state.last_valid_section = None;
            return;
        }

        match self.store.get(&self.config.storage.last_valid_section_key) {
            Ok(Some(saved)) if self.outline.contains(&saved) => {
                self.state.last_valid_section = Some(saved);
                return;
            }
            Ok(_) => {}
            Err(e) => log::warn!("failed to read last valid section: {e}"),
        }

        self.state.last_valid_section = self.outline.first().map(|s| s.id.clone());
    }

    /// Drops persisted entries whose sections no longer exist.
    fn restore_history(&mut self) {
        let saved = match self.store.get(&self.config.storage.history_key) {
            Ok(Some(saved)) => saved,
            Ok(None) => return,
            Err(e) => {
                log::warn!("failed to read navigation history: {e}");
                return;
            }
        };

        match serde_json::from_str::<Vec<SectionId>>(&saved) {
            Ok(history) => {
                self.state.history = history
                    .into_iter()
                    .filter(|id| self.outline.contains(id))
                    .collect();
            }
            Err(e) => {
                log::warn!("discarding unreadable navigation history: {e}");
                self.state.history = Vec::new();
            }
        }
    }

    fn restore_error_log(&mut self) {
        match self.store.get(&self.config.storage.error_log_key) {
            Ok(Some(saved)) => {
                self.error_log = ErrorLog::restore(&saved, self.config.storage.error_log_max);
            }
            Ok(None) => {}
            Err(e) => log::warn!("failed to read error log: {e}"),
        }
    }

    // --- Mutation helpers (in-memory update + persist + notify) ---

    fn record_history(&mut self, id: SectionId) {
        if !self
            .state
            .push_history(id.clone(), self.config.tracking.history_max)
        {
            return;
        }
        self.persist_history();
        self.observers.emit(&NavEvent::HistoryUpdated {
            history: self.state.history.clone(),
            last_item: id,
        });
    }

    fn persist_history(&mut self) {
        match serde_json::to_string(&self.state.history) {
            Ok(json) => {
                if let Err(e) = self.store.set(&self.config.storage.history_key, &json) {
                    log::warn!("failed to persist navigation history: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize navigation history: {e}"),
        }
    }

    fn set_last_valid(&mut self, id: SectionId) {
        self.state.last_valid_section = Some(id.clone());
        self.persist_last_valid();
        self.observers
            .emit(&NavEvent::LastValidSectionUpdated { section: id });
    }

    fn persist_last_valid(&mut self) {
        if let Some(last_valid) = self.state.last_valid_section.clone() {
            if let Err(e) = self
                .store
                .set(&self.config.storage.last_valid_section_key, &last_valid)
            {
                log::warn!("failed to persist last valid section: {e}");
            }
        }
    }

    fn record_error(
        &mut self,
        error: &NavError,
        section: Option<SectionId>,
        context: serde_json::Value,
    ) {
        log::warn!("{error}");

        let record = ErrorRecord {
            timestamp: Utc::now(),
            kind: error.kind(),
            section,
            current_section: self.state.current_section.clone(),
            last_valid_section: self.state.last_valid_section.clone(),
            history: self.state.history.clone(),
            context,
        };

        self.error_log.push(record.clone());
        match self.error_log.to_json() {
            Ok(json) => {
                if let Err(e) = self.store.set(&self.config.storage.error_log_key, &json) {
                    log::warn!("failed to persist error log: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize error log: {e}"),
        }

        self.observers.emit(&NavEvent::RecoverableError { record });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavErrorKind;
    use crate::section::Section;
    use crate::storage::{MemoryStore, StorageError};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn outline() -> DocumentOutline {
        let mut outline = DocumentOutline::new(vec![
            Section::new("home", 0.0, 600.0),
            Section::new("about", 600.0, 400.0),
            Section::new("services", 1000.0, 500.0),
            Section::new("projects", 1500.0, 700.0),
        ]);
        outline.nav_bar_height = 80.0;
        outline.document_height = 2200.0;
        outline.viewport_height = 800.0;
        outline
    }

    fn tracker() -> SectionTracker {
        let mut t = SectionTracker::new(
            NavConfig::default(),
            outline(),
            Box::new(MemoryStore::new()),
        );
        t.initialize(0.0, 1200.0);
        t
    }

    fn tracker_with_store(store: MemoryStore) -> SectionTracker {
        let mut t = SectionTracker::new(NavConfig::default(), outline(), Box::new(store));
        t.initialize(0.0, 1200.0);
        t
    }

    /// Store that accepts nothing, for persistence-unavailable paths.
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::NoDataDir)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::NoDataDir)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::NoDataDir)
        }
    }

    fn collect_events(t: &mut SectionTracker) -> Rc<RefCell<Vec<EventKind>>> {
        let kinds = Rc::new(RefCell::new(Vec::new()));
        let kinds_clone = Rc::clone(&kinds);
        t.on_any(move |event| kinds_clone.borrow_mut().push(event.kind()));
        kinds
    }

    #[test]
    fn scroll_derives_active_section() {
        let mut t = tracker();
        t.report_scroll(550.0); // 550 + 100 offset lands in "about"
        assert_eq!(t.current_section(), "about");
        t.report_scroll(1500.0);
        assert_eq!(t.current_section(), "projects");
    }

    #[test]
    fn scroll_past_all_sections_falls_back_to_default() {
        let mut t = tracker();
        t.report_scroll(1500.0);
        assert_eq!(t.current_section(), "projects");
        t.report_scroll(5000.0);
        assert_eq!(t.current_section(), "home");
    }

    #[test]
    fn no_consecutive_duplicates_in_history() {
        // P1
        let mut t = tracker();
        t.report_scroll(550.0);
        t.report_scroll(560.0); // still "about", no transition
        t.report_scroll(1000.0);
        t.report_scroll(550.0);
        t.navigate_to("about", true); // already current, nothing appended
        let history = t.history();
        for pair in history.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(history, ["about", "services", "about"]);
    }

    #[test]
    fn history_is_bounded_with_fifo_eviction() {
        // P2: 11 distinct transitions keep the 10 most recent, in order
        let sections: Vec<Section> = (0..12)
            .map(|i| Section::new(format!("s{i}"), i as f64 * 100.0, 100.0))
            .collect();
        let mut t = SectionTracker::new(
            NavConfig::default(),
            DocumentOutline::new(sections),
            Box::new(MemoryStore::new()),
        );
        for i in 1..=11 {
            t.navigate_to(&format!("s{i}"), true);
        }
        assert_eq!(t.history().len(), 10);
        assert_eq!(t.history().first().unwrap(), "s2");
        assert_eq!(t.history().last().unwrap(), "s11");
    }

    #[test]
    fn missing_target_falls_back_to_last_valid() {
        // P3
        let mut t = tracker();
        t.navigate_to("about", true);
        assert_eq!(t.last_valid_section(), Some("about"));

        let errors = Rc::new(RefCell::new(0));
        let errors_clone = Rc::clone(&errors);
        t.on(EventKind::RecoverableError, move |_| {
            *errors_clone.borrow_mut() += 1
        });

        assert!(t.navigate_to("nonexistent", true));
        assert_eq!(t.current_section(), "about");
        assert_eq!(*errors.borrow(), 1);
        assert!(!t.history().contains(&"nonexistent".to_string()));
        assert_ne!(t.last_valid_section(), Some("nonexistent"));
    }

    #[test]
    fn renavigation_to_current_section_is_idempotent() {
        // P4
        let mut t = tracker();
        t.navigate_to("about", true);
        let before = t.history().to_vec();
        t.navigate_to("about", true);
        assert_eq!(t.history(), before);
    }

    #[test]
    fn go_back_consumes_history() {
        // P5: both the current and the previous entry are popped, and the
        // back navigation itself is not re-recorded
        let mut t = tracker();
        t.navigate_to("about", true);
        t.navigate_to("services", true);
        t.navigate_to("projects", true);
        assert_eq!(t.history(), ["about", "services", "projects"]);

        assert!(t.go_back());
        assert_eq!(t.current_section(), "services");
        assert_eq!(t.history(), ["about"]);
    }

    #[test]
    fn go_back_without_history_is_a_no_op() {
        let mut t = tracker();
        t.navigate_to("about", true);
        assert_eq!(t.history().len(), 1);
        assert!(!t.go_back());
        assert_eq!(t.history(), ["about"]);
        assert_eq!(t.current_section(), "about");
    }

    #[test]
    fn later_section_wins_on_overlap() {
        // P6
        let mut outline = DocumentOutline::new(vec![
            Section::new("tall", 0.0, 2000.0),
            Section::new("inner", 500.0, 400.0),
        ]);
        outline.document_height = 2000.0;
        outline.viewport_height = 800.0;
        let mut t =
            SectionTracker::new(NavConfig::default(), outline, Box::new(MemoryStore::new()));
        t.report_scroll(500.0); // position 600 is inside both ranges
        assert_eq!(t.current_section(), "inner");
    }

    #[test]
    fn startup_filters_ghost_history_entries() {
        // P7
        let mut store = MemoryStore::new();
        store
            .set(
                "navigation-history",
                "[\"about\",\"services\",\"ghost\",\"projects\"]",
            )
            .unwrap();
        let t = tracker_with_store(store);
        assert_eq!(t.history(), ["about", "services", "projects"]);
    }

    #[test]
    fn startup_restores_persisted_last_valid_when_it_exists() {
        let mut store = MemoryStore::new();
        store.set("last-valid-section", "services").unwrap();
        let t = tracker_with_store(store);
        assert_eq!(t.last_valid_section(), Some("services"));
    }

    #[test]
    fn startup_falls_back_to_first_section_for_stale_last_valid() {
        let mut store = MemoryStore::new();
        store.set("last-valid-section", "ghost").unwrap();
        let t = tracker_with_store(store);
        assert_eq!(t.last_valid_section(), Some("home"));
    }

    #[test]
    fn startup_restores_language_preference() {
        let mut store = MemoryStore::new();
        store.set("preferred-language", "en").unwrap();
        let t = tracker_with_store(store);
        assert_eq!(t.language(), Language::English);

        let mut store = MemoryStore::new();
        store.set("preferred-language", "klingon").unwrap();
        let t = tracker_with_store(store);
        assert_eq!(t.language(), Language::Arabic);
    }

    #[test]
    fn empty_document_degrades_everywhere() {
        // Scenario from the testable properties
        let mut t = SectionTracker::new(
            NavConfig::default(),
            DocumentOutline::default(),
            Box::new(MemoryStore::new()),
        );
        t.initialize(0.0, 1200.0);

        t.report_scroll(1234.0);
        assert_eq!(t.current_section(), "home");
        assert!(!t.navigate_to("home", true));
        assert!(!t.go_to_last_valid());
        assert_eq!(t.last_valid_section(), None);
        assert!(t
            .error_log()
            .iter()
            .any(|r| r.kind == NavErrorKind::NoSectionsPresent));
    }

    #[test]
    fn missing_target_without_last_valid_goes_to_first_section() {
        let sections = vec![
            Section::new("intro", 0.0, 500.0),
            Section::new("contact", 500.0, 500.0),
        ];
        let mut t = SectionTracker::new(
            NavConfig::default(),
            DocumentOutline::new(sections),
            Box::new(MemoryStore::new()),
        );
        // No initialize: last_valid_section is still unset
        let sources = Rc::new(RefCell::new(Vec::new()));
        let sources_clone = Rc::clone(&sources);
        t.on(EventKind::Navigated, move |event| {
            if let NavEvent::Navigated { source, .. } = event {
                sources_clone.borrow_mut().push(*source);
            }
        });

        assert!(t.navigate_to("nonexistent", true));
        assert_eq!(t.current_section(), "intro");
        assert_eq!(*sources.borrow(), vec![NavigationSource::FallbackFirst]);
        // Fallback-first navigation is recorded, unlike last-valid fallback
        assert_eq!(t.history(), ["intro"]);
    }

    #[test]
    fn leading_hash_is_stripped_and_empty_target_rejected() {
        let mut t = tracker();
        assert!(t.navigate_to("#services", true));
        assert_eq!(t.current_section(), "services");
        assert!(!t.navigate_to("", true));
        assert!(!t.navigate_to("#", true));
        assert_eq!(t.current_section(), "services");
    }

    #[test]
    fn navigation_emits_target_and_previous_section() {
        let mut t = tracker();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        t.on(EventKind::Navigated, move |event| {
            if let NavEvent::Navigated {
                section,
                previous,
                target_y,
                ..
            } = event
            {
                seen_clone
                    .borrow_mut()
                    .push((section.clone(), previous.clone(), *target_y));
            }
        });

        t.navigate_to("about", true);
        t.navigate_to("services", true);

        let seen = seen.borrow();
        // Section top minus the 80px navbar
        assert_eq!(seen[0], ("about".into(), None, 520.0));
        assert_eq!(
            seen[1],
            ("services".into(), Some("about".into()), 920.0)
        );
    }

    #[test]
    fn go_to_last_valid_navigates_without_recording() {
        let mut t = tracker();
        t.navigate_to("projects", true);
        t.navigate_to("about", true);
        let before = t.history().to_vec();

        t.report_scroll(0.0); // back at the top, current is "home"
        assert!(t.go_to_last_valid());
        assert_eq!(t.current_section(), "about");
        assert_eq!(t.history(), before);
    }

    #[test]
    fn clear_history_leaves_current_and_last_valid_alone() {
        let mut t = tracker();
        t.navigate_to("about", true);
        let kinds = collect_events(&mut t);

        t.clear_history();
        assert!(t.history().is_empty());
        assert_eq!(t.current_section(), "about");
        assert_eq!(t.last_valid_section(), Some("about"));
        assert_eq!(*kinds.borrow(), vec![EventKind::HistoryCleared]);
    }

    #[test]
    fn history_and_last_valid_survive_a_reload() {
        let mut store = MemoryStore::new();
        {
            let mut t = SectionTracker::new(
                NavConfig::default(),
                outline(),
                Box::new(MemoryStore::new()),
            );
            t.initialize(0.0, 1200.0);
            t.navigate_to("about", true);
            t.navigate_to("services", true);
            // Mirror what the first page load persisted
            for key in [
                "navigation-history",
                "last-valid-section",
            ] {
                if let Some(v) = t.store.get(key).unwrap() {
                    store.set(key, &v).unwrap();
                }
            }
        }

        let t = tracker_with_store(store);
        assert_eq!(t.history(), ["about", "services"]);
        assert_eq!(t.last_valid_section(), Some("services"));
    }

    #[test]
    fn failing_store_degrades_to_in_memory_state() {
        let mut t = SectionTracker::new(NavConfig::default(), outline(), Box::new(FailingStore));
        t.initialize(0.0, 1200.0);

        assert!(t.navigate_to("about", true));
        assert_eq!(t.current_section(), "about");
        assert_eq!(t.history(), ["about"]);
        t.toggle_language();
        t.clear_history();
        t.clear_error_log();
    }

    #[test]
    fn scroll_transitions_to_default_are_not_recorded() {
        let mut t = tracker();
        t.report_scroll(550.0);
        t.report_scroll(5000.0); // off the end, back to the sentinel
        assert_eq!(t.current_section(), "home");
        assert_eq!(t.history(), ["about"]);
    }

    #[test]
    fn menu_toggles_and_closes_on_desktop_resize() {
        let mut t = tracker();
        t.handle_resize(600.0);
        assert!(t.viewport().is_mobile);

        t.toggle_menu();
        assert!(t.is_menu_open());

        t.handle_resize(1200.0);
        assert!(!t.viewport().is_mobile);
        assert!(!t.is_menu_open());
    }

    #[test]
    fn language_toggle_persists_and_notifies() {
        let mut t = tracker();
        let kinds = collect_events(&mut t);

        t.toggle_language();
        assert_eq!(t.language(), Language::English);
        assert_eq!(
            t.store.get("preferred-language").unwrap().as_deref(),
            Some("en")
        );
        assert_eq!(*kinds.borrow(), vec![EventKind::LanguageChanged]);
    }

    #[test]
    fn debounced_scroll_applies_newest_value_once() {
        let mut t = tracker();
        let start = Instant::now();

        t.queue_scroll_at(100.0, start);
        t.queue_scroll_at(550.0, start + Duration::from_millis(5));
        // First deadline passed but was re-armed by the second event
        t.tick_at(start + Duration::from_millis(12));
        assert_eq!(t.current_section(), "home");

        t.tick_at(start + Duration::from_millis(15));
        assert_eq!(t.current_section(), "about");

        // Nothing pending; further ticks are inert
        t.tick_at(start + Duration::from_millis(100));
        assert_eq!(t.current_section(), "about");
    }

    #[test]
    fn debounced_resize_applies_after_quiet_period() {
        let mut t = tracker();
        let start = Instant::now();

        t.queue_resize_at(600.0, start);
        t.tick_at(start + Duration::from_millis(50));
        assert!(!t.viewport().is_mobile);

        t.tick_at(start + Duration::from_millis(100));
        assert!(t.viewport().is_mobile);
    }

    #[test]
    fn error_log_is_capped_and_clearable() {
        let mut t = tracker();
        for i in 0..60 {
            t.navigate_to(&format!("ghost{i}"), true);
        }
        assert_eq!(t.error_log().len(), 50);
        assert_eq!(t.error_log()[0].section.as_deref(), Some("ghost10"));

        t.clear_error_log();
        assert!(t.error_log().is_empty());
        assert!(t
            .store
            .get("navigation-error-log")
            .unwrap()
            .is_none());
    }

    #[test]
    fn initialization_emits_restored_state() {
        let mut store = MemoryStore::new();
        store.set("navigation-history", "[\"about\"]").unwrap();
        let mut t = SectionTracker::new(NavConfig::default(), outline(), Box::new(store));

        let seen = Rc::new(RefCell::new(None));
        let seen_clone = Rc::clone(&seen);
        t.on(EventKind::Initialized, move |event| {
            if let NavEvent::Initialized {
                history,
                section_count,
                ..
            } = event
            {
                *seen_clone.borrow_mut() = Some((history.clone(), *section_count));
            }
        });

        t.initialize(0.0, 1200.0);
        assert_eq!(
            seen.borrow().clone().unwrap(),
            (vec!["about".to_string()], 4)
        );
    }
}
