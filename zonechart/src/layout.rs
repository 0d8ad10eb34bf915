// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport and margin bookkeeping.
//!
//! The control chart lays out in two passes:
//! - **Measure**: the bottom axis measures its tick labels and reports the
//!   bottom margin it needs.
//! - **Arrange**: the plot rectangle is the viewport inset by the margins, and
//!   the scales map into it.
//!
//! Only the bottom margin is computed; the other sides are fixed configuration.

use kurbo::Rect;

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pixel insets between the viewport edge and the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Inset above the plot.
    pub top: f64,
    /// Inset right of the plot.
    pub right: f64,
    /// Inset below the plot; replaced by the measured axis height.
    pub bottom: f64,
    /// Inset left of the plot.
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 25.0,
            bottom: 100.0,
            left: 75.0,
        }
    }
}

impl Margins {
    /// Returns a copy with the bottom inset replaced.
    pub fn with_bottom(mut self, bottom: f64) -> Self {
        self.bottom = bottom.max(0.0);
        self
    }

    /// Horizontal pixel span of the plot, left to right.
    pub fn x_range(&self, width: f64) -> (f64, f64) {
        (self.left, width - self.right)
    }

    /// Vertical pixel span of the plot, bottom to top.
    ///
    /// Pixel y grows downward, so the first element is the larger value.
    pub fn y_range(&self, height: f64) -> (f64, f64) {
        (height - self.bottom, self.top)
    }

    /// The plot rectangle for a viewport.
    ///
    /// Collapses to zero size instead of inverting when the margins exceed
    /// the viewport.
    pub fn plot_rect(&self, view: Size) -> Rect {
        let x0 = self.left.max(0.0);
        let y0 = self.top.max(0.0);
        let x1 = (view.width - self.right).max(x0);
        let y1 = (view.height - self.bottom).max(y0);
        Rect::new(x0, y0, x1, y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rect_insets_viewport() {
        let margins = Margins::default().with_bottom(40.0);
        let plot = margins.plot_rect(Size::new(950.0, 600.0));
        assert_eq!(plot, Rect::new(75.0, 50.0, 925.0, 560.0));
        assert_eq!(margins.x_range(950.0), (75.0, 925.0));
        assert_eq!(margins.y_range(600.0), (560.0, 50.0));
    }

    #[test]
    fn tiny_viewport_collapses_instead_of_inverting() {
        let plot = Margins::default().plot_rect(Size::new(50.0, 80.0));
        assert!(plot.width() >= 0.0);
        assert!(plot.height() >= 0.0);
    }
}
