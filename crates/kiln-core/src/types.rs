//! Common types shared by the layout boundary and the renderer

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D point in layout space
pub type Point = Vec2;

/// RGBA color with channels in the `0.0..=255.0` range used by the layout engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA values (0.0 to 255.0)
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB values (0.0 to 255.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 255.0 }
    }

    /// Pack into the 32-bit ABGR layout the handheld GPU consumes
    /// (red in the lowest byte, alpha in the highest).
    ///
    /// Channels are saturated into `0..=255` first, so out-of-range values never wrap.
    pub fn to_abgr32(&self) -> u32 {
        let byte = |c: f32| c.clamp(0.0, 255.0) as u32;
        (byte(self.a) << 24) | (byte(self.b) << 16) | (byte(self.g) << 8) | byte(self.r)
    }

    pub const WHITE: Self = Self::rgb(255.0, 255.0, 255.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(255.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 255.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 255.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Axis-aligned box in layout space (origin top-left, Y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Vec2::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The shorter of the two sides
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Check if the box covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Width and height pair, used for render target sizes and text measurements
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Multiply both sides by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Independent rounding for each corner of a box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: Self = Self::all(0.0);

    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Same radius on every corner
    pub const fn all(radius: f32) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    /// True when no corner is rounded
    pub fn is_square(&self) -> bool {
        self.top_left <= 0.0
            && self.top_right <= 0.0
            && self.bottom_right <= 0.0
            && self.bottom_left <= 0.0
    }

    /// Clamp every radius into `0.0..=min(width, height) / 2` for `bounds`.
    ///
    /// Each corner is clamped independently so differing radii survive.
    pub fn clamped_to(&self, bounds: &BoundingBox) -> Self {
        let limit = (bounds.min_side() / 2.0).max(0.0);
        let clamp = |r: f32| r.max(0.0).min(limit);
        Self {
            top_left: clamp(self.top_left),
            top_right: clamp(self.top_right),
            bottom_right: clamp(self.bottom_right),
            bottom_left: clamp(self.bottom_left),
        }
    }
}

/// One edge of a border
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BorderSide {
    pub width: f32,
    pub color: Color,
}

impl BorderSide {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }

    /// A side with no width draws nothing
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_color_packing() {
        let color = Color::rgba(0x11 as f32, 0x22 as f32, 0x33 as f32, 0x44 as f32);
        assert_eq!(color.to_abgr32(), 0x4433_2211);
        assert_eq!(Color::WHITE.to_abgr32(), 0xFFFF_FFFF);
        assert_eq!(Color::rgba(300.0, -5.0, 0.0, 255.0).to_abgr32(), 0xFF00_00FF);
    }

    #[test]
    fn test_radius_clamped_to_half_short_side() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let clamped = CornerRadius::all(30.0).clamped_to(&bounds);
        assert_eq!(clamped, CornerRadius::all(25.0));
    }

    #[test]
    fn test_radius_clamped_independently() {
        let bounds = BoundingBox::new(10.0, 10.0, 40.0, 60.0);
        let clamped = CornerRadius::new(5.0, 100.0, -3.0, 20.0).clamped_to(&bounds);
        assert_eq!(clamped, CornerRadius::new(5.0, 20.0, 0.0, 20.0));
    }

    #[test]
    fn test_square_detection() {
        assert!(CornerRadius::ZERO.is_square());
        assert!(CornerRadius::all(-1.0).is_square());
        assert!(!CornerRadius::new(0.0, 0.0, 0.1, 0.0).is_square());
    }

    #[test]
    fn test_bounding_box_edges() {
        let bounds = BoundingBox::new(5.0, 7.0, 20.0, 10.0);
        assert_eq!(bounds.right(), 25.0);
        assert_eq!(bounds.bottom(), 17.0);
        assert_eq!(bounds.min_side(), 10.0);
        assert_eq!(bounds.origin(), Vec2::new(5.0, 7.0));
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 10.0).is_empty());
    }
}
