//! Mouse state for picking operations
//!
//! Tracks the cursor in screen space and converts it to Normalized Device
//! Coordinates for ray casting.

/// Mouse state for picking operations
#[derive(Debug, Clone)]
pub struct MouseState {
    /// Current screen-space X position (pixels from the left)
    pub screen_x: f64,
    /// Current screen-space Y position (pixels from the top)
    pub screen_y: f64,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
}

impl MouseState {
    /// Create a new mouse state centered in a window of the given size
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: f64::from(window_width) * 0.5,
            screen_y: f64::from(window_height) * 0.5,
            window_width,
            window_height,
        }
    }

    /// Convert screen coordinates to Normalized Device Coordinates.
    ///
    /// NDC range [-1, 1] with +X right and +Y up: the vertical axis is
    /// flipped relative to pixel coordinates, matching the projection's
    /// Y-up convention.
    pub fn screen_to_ndc(&self) -> (f32, f32) {
        let ndc_x = (self.screen_x / f64::from(self.window_width)) as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - (self.screen_y / f64::from(self.window_height)) as f32 * 2.0;
        (ndc_x, ndc_y)
    }

    /// Update mouse position from window events
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Update window size (for NDC conversion); call on resize
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}
