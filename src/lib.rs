//! Section-tracking navigation for single-page sites.
//!
//! The tracker maps scroll positions to the active content section, keeps a
//! bounded history of section transitions with a persisted "last valid"
//! fallback, and notifies observers so a rendering layer can highlight
//! links and perform the actual scrolling. It is headless: the host feeds
//! it the document outline and raw scroll/resize/click events.

pub mod config;
pub mod debounce;
pub mod error;
pub mod error_log;
pub mod events;
pub mod section;
pub mod state;
pub mod storage;
pub mod tracker;

pub use config::NavConfig;
pub use debounce::Debouncer;
pub use error::{NavError, NavErrorKind};
pub use error_log::ErrorRecord;
pub use events::{EventKind, NavEvent, NavigationSource};
pub use section::{DocumentOutline, Section, SectionId};
pub use state::{Direction, Language, NavigationState, ViewportState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use tracker::SectionTracker;
