// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for control chart axis layout.
//!
//! Axis layout in a control chart is driven by measured tick labels: the label
//! rotation and the bottom margin both depend on how wide and tall each label
//! renders. Shaping and glyph layout stay with the drawing backend, so the
//! chart code only depends on the small [`TextMeasurer`] interface defined here.
//!
//! Measurement must be deterministic for a given string and style. Two
//! implementations ship with this crate:
//! - [`HeuristicTextMeasurer`], a fixed average-glyph estimate, and
//! - [`AdvanceTableMeasurer`], a per-glyph advance-width table.
//!
//! Backends with real font metrics (a shaping engine, an offscreen canvas)
//! implement the same trait.

#![no_std]

/// A minimal text measurement interface used by axis layout.
///
/// `text` is treated as a single line.
pub trait TextMeasurer {
    /// Measure a single line of text.
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// Creates a normal-weight `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_weight: FontWeight::NORMAL,
        }
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns the unrotated bounding box as `(width, height)`.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.advance_width, self.line_height())
    }
}

/// A tiny heuristic text measurer.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}

/// Advance widths in thousandths of an em for printable ASCII (`' '..='~'`).
///
/// Values follow the classic Helvetica AFM widths, which most sans-serif UI
/// fonts track closely for digits and punctuation.
const SANS_SERIF_ASCII: [u16; 95] = [
    // ' ' ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667,
    611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

/// A text measurer backed by a per-glyph advance-width table.
///
/// Characters outside printable ASCII use `fallback_em`. The result only
/// depends on the string and font size, so layout stays reproducible across
/// hosts that lack a shaping engine.
#[derive(Clone, Debug)]
pub struct AdvanceTableMeasurer {
    ascii: [u16; 95],
    fallback_em: f64,
    ascent_em: f64,
    descent_em: f64,
    bold_factor: f64,
}

impl AdvanceTableMeasurer {
    /// A sans-serif table suitable for the default axis font.
    #[must_use]
    pub fn sans_serif() -> Self {
        Self {
            ascii: SANS_SERIF_ASCII,
            fallback_em: 0.6,
            ascent_em: 0.8,
            descent_em: 0.2,
            bold_factor: 1.07,
        }
    }

    /// Sets the advance used for characters outside the table, in ems.
    #[must_use]
    pub fn with_fallback_em(mut self, fallback_em: f64) -> Self {
        self.fallback_em = fallback_em.max(0.0);
        self
    }

    fn advance_em(&self, c: char) -> f64 {
        match u32::from(c) {
            code @ 0x20..=0x7e => {
                let idx = (code - 0x20) as usize;
                f64::from(self.ascii[idx]) / 1000.0
            }
            _ => self.fallback_em,
        }
    }
}

impl Default for AdvanceTableMeasurer {
    fn default() -> Self {
        Self::sans_serif()
    }
}

impl TextMeasurer for AdvanceTableMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        let ems: f64 = text.chars().map(|c| self.advance_em(c)).sum();
        let weight = if style.font_weight >= FontWeight::BOLD {
            self.bold_factor
        } else {
            1.0
        };
        TextMetrics {
            advance_width: ems * style.font_size * weight,
            ascent: self.ascent_em * style.font_size,
            descent: self.descent_em * style.font_size,
            leading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_width_scales_with_char_count() {
        let m = HeuristicTextMeasurer;
        let a = m.measure("12", TextStyle::new(10.0));
        let b = m.measure("1234", TextStyle::new(10.0));
        assert!((b.advance_width - 2.0 * a.advance_width).abs() < 1e-9);
        assert!((a.line_height() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn table_measurer_uses_per_glyph_widths() {
        let m = AdvanceTableMeasurer::sans_serif();
        let narrow = m.measure("iii", TextStyle::new(10.0));
        let wide = m.measure("WWW", TextStyle::new(10.0));
        assert!(narrow.advance_width < wide.advance_width);
        // Digits share a width so numeric tick labels of equal length line up.
        let a = m.measure("1111", TextStyle::new(10.0)).advance_width;
        let b = m.measure("8888", TextStyle::new(10.0)).advance_width;
        assert!((a - b).abs() < 1e-9);
        assert!((a - 4.0 * 5.56).abs() < 1e-9);
    }

    #[test]
    fn table_measurer_falls_back_for_non_ascii() {
        let m = AdvanceTableMeasurer::sans_serif().with_fallback_em(1.0);
        let metrics = m.measure("\u{00e9}", TextStyle::new(12.0));
        assert!((metrics.advance_width - 12.0).abs() < 1e-9);
    }

    #[test]
    fn bold_text_measures_wider() {
        let m = AdvanceTableMeasurer::sans_serif();
        let normal = m.measure("Zone", TextStyle::new(11.0));
        let bold = m.measure("Zone", TextStyle::new(11.0).with_weight(FontWeight::BOLD));
        assert!(bold.advance_width > normal.advance_width);
    }
}
