// Viewport state - navbar scroll flag, mobile breakpoint, scroll progress
pub struct ViewportState {
    /// True once the page is scrolled past the navbar threshold; drives the
    /// collapsed navbar presentation.
    pub scrolled: bool,
    /// True when the viewport width is at or below the mobile breakpoint.
    pub is_mobile: bool,
    /// How far through the scrollable document the viewport is, 0..=100.
    pub scroll_percent: f64,
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            scrolled: false,
            is_mobile: false,
            scroll_percent: 0.0,
        }
    }

    pub fn update_scroll(
        &mut self,
        scroll_y: f64,
        threshold: f64,
        document_height: f64,
        viewport_height: f64,
    ) {
        self.scrolled = scroll_y > threshold;
        let scrollable = document_height - viewport_height;
        self.scroll_percent = if scrollable > 0.0 {
            (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
    }

    pub fn update_width(&mut self, width: f64, breakpoint: f64) {
        self.is_mobile = width <= breakpoint;
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}
