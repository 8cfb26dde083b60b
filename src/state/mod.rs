pub mod language;
pub mod navigation;
pub mod viewport;

pub use language::{Direction, Language};
pub use navigation::NavigationState;
pub use viewport::ViewportState;
