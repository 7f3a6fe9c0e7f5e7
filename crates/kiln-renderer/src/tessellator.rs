//! Rounded-rectangle and border tessellation
//!
//! The backend only draws straight-edged primitives, so curved corners are
//! approximated with a fixed number of angular segments per quarter circle.
//!
//! Angles follow screen space (Y down): 0° points right and 90° points down,
//! so the corner quadrants are top-left 180°–270°, top-right 270°–360°,
//! bottom-right 0°–90° and bottom-left 90°–180°.

use glam::Vec2;
use kiln_core::types::{BoundingBox, Color, CornerRadius, Point};
use kiln_core::{kiln_trace, LogCategory, RendererConfig};

use crate::command::BorderConfig;
use crate::primitive::PrimitiveBatch;

/// A corner's quarter-circle sweep, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrant {
    pub start: f32,
    pub end: f32,
}

impl Quadrant {
    pub const TOP_LEFT: Self = Self::new(180.0, 270.0);
    pub const TOP_RIGHT: Self = Self::new(270.0, 360.0);
    pub const BOTTOM_RIGHT: Self = Self::new(0.0, 90.0);
    pub const BOTTOM_LEFT: Self = Self::new(90.0, 180.0);

    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }
}

fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Point at `radius` from `center` in direction `degrees`
fn polar(center: Point, radius: f32, degrees: f32) -> Point {
    let (sin, cos) = deg_to_rad(degrees).sin_cos();
    center + Vec2::new(cos, sin) * radius
}

/// Turns boxes and corner radii into backend primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tessellator {
    segments: u32,
}

impl Tessellator {
    /// Create a tessellator using `segments` per quarter circle (at least one)
    pub fn new(segments: u32) -> Self {
        Self {
            segments: segments.max(1),
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(config.arc_segments)
    }

    /// Angular segments per corner
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Sample the arc's `segments + 1` angles, start and end included
    fn angles(&self, quadrant: Quadrant) -> impl Iterator<Item = f32> {
        let step = (quadrant.end - quadrant.start) / self.segments as f32;
        (0..=self.segments).map(move |i| quadrant.start + i as f32 * step)
    }

    /// Fill a quarter disk as a triangle fan around `center`
    pub fn fill_arc(
        &self,
        batch: &mut PrimitiveBatch,
        center: Point,
        radius: f32,
        quadrant: Quadrant,
        color: Color,
    ) {
        let mut angles = self.angles(quadrant);
        let Some(first) = angles.next() else {
            return;
        };

        let mut previous = polar(center, radius, first);
        for angle in angles {
            let next = polar(center, radius, angle);
            batch.add_triangle([center, previous, next], color);
            previous = next;
        }
    }

    /// Stroke a quarter ring as a quad strip, one quad per segment.
    ///
    /// `radius` is the stroke's mid-line; the ring spans `radius ± thickness / 2`,
    /// with the inner edge kept at or outside the center.
    pub fn stroke_arc(
        &self,
        batch: &mut PrimitiveBatch,
        center: Point,
        radius: f32,
        thickness: f32,
        quadrant: Quadrant,
        color: Color,
    ) {
        let inner = (radius - thickness / 2.0).max(0.0);
        let outer = radius + thickness / 2.0;

        let mut angles = self.angles(quadrant);
        let Some(first) = angles.next() else {
            return;
        };

        let mut previous = (polar(center, inner, first), polar(center, outer, first));
        for angle in angles {
            let next = (polar(center, inner, angle), polar(center, outer, angle));
            batch.add_quad([previous.0, previous.1, next.1, next.0], color);
            previous = next;
        }
    }

    /// Fill `bounds` with rounded corners.
    ///
    /// Square boxes take a single rectangle. Otherwise the box minus its
    /// corner squares is covered by five quads (center, top, right, bottom,
    /// left) and each corner gets a quarter disk of its own clamped radius.
    pub fn fill_rounded_rect(
        &self,
        batch: &mut PrimitiveBatch,
        bounds: &BoundingBox,
        corner_radius: &CornerRadius,
        color: Color,
    ) {
        let r = corner_radius.clamped_to(bounds);
        if r.is_square() {
            batch.add_rect_solid(*bounds, color);
            return;
        }

        kiln_trace!(
            LogCategory::Geometry,
            "rounded fill {:?} radii={:?} segments={}",
            bounds,
            r,
            self.segments
        );

        let (x0, y0, x1, y1) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());

        // Arc centers, one per corner.
        let tl = Vec2::new(x0 + r.top_left, y0 + r.top_left);
        let tr = Vec2::new(x1 - r.top_right, y0 + r.top_right);
        let br = Vec2::new(x1 - r.bottom_right, y1 - r.bottom_right);
        let bl = Vec2::new(x0 + r.bottom_left, y1 - r.bottom_left);

        batch.add_quad([tl, tr, br, bl], color);
        batch.add_quad([Vec2::new(tl.x, y0), Vec2::new(tr.x, y0), tr, tl], color);
        batch.add_quad([tr, Vec2::new(x1, tr.y), Vec2::new(x1, br.y), br], color);
        batch.add_quad([bl, br, Vec2::new(br.x, y1), Vec2::new(bl.x, y1)], color);
        batch.add_quad([Vec2::new(x0, tl.y), tl, bl, Vec2::new(x0, bl.y)], color);

        self.fill_arc(batch, tl, r.top_left, Quadrant::TOP_LEFT, color);
        self.fill_arc(batch, tr, r.top_right, Quadrant::TOP_RIGHT, color);
        self.fill_arc(batch, br, r.bottom_right, Quadrant::BOTTOM_RIGHT, color);
        self.fill_arc(batch, bl, r.bottom_left, Quadrant::BOTTOM_LEFT, color);
    }

    /// Outline `bounds` with per-edge widths and colors, drawn inside the box.
    ///
    /// Straight edges stop short of the rounded corners. Top corners take the
    /// top edge's width and color, bottom corners the bottom edge's; a corner
    /// whose reference edge has no width gets no arc.
    pub fn stroke_border(&self, batch: &mut PrimitiveBatch, bounds: &BoundingBox, border: &BorderConfig) {
        let r = border.corner_radius.clamped_to(bounds);
        let (x, y, w, h) = (bounds.x, bounds.y, bounds.width, bounds.height);
        let (top, right, bottom, left) = (border.top, border.right, border.bottom, border.left);

        if top.is_visible() {
            batch.add_rect_solid(
                BoundingBox::new(x + r.top_left, y, w - r.top_left - r.top_right, top.width),
                top.color,
            );
        }
        if left.is_visible() {
            batch.add_rect_solid(
                BoundingBox::new(x, y + r.top_left, left.width, h - r.top_left - r.bottom_left),
                left.color,
            );
        }
        if right.is_visible() {
            batch.add_rect_solid(
                BoundingBox::new(
                    x + w - right.width,
                    y + r.top_right,
                    right.width,
                    h - r.top_right - r.bottom_right,
                ),
                right.color,
            );
        }
        if bottom.is_visible() {
            batch.add_rect_solid(
                BoundingBox::new(
                    x + r.bottom_left,
                    y + h - bottom.width,
                    w - r.bottom_left - r.bottom_right,
                    bottom.width,
                ),
                bottom.color,
            );
        }

        let corners = [
            (r.top_left, Vec2::new(x + r.top_left, y + r.top_left), Quadrant::TOP_LEFT, top),
            (r.top_right, Vec2::new(x + w - r.top_right, y + r.top_right), Quadrant::TOP_RIGHT, top),
            (
                r.bottom_left,
                Vec2::new(x + r.bottom_left, y + h - r.bottom_left),
                Quadrant::BOTTOM_LEFT,
                bottom,
            ),
            (
                r.bottom_right,
                Vec2::new(x + w - r.bottom_right, y + h - r.bottom_right),
                Quadrant::BOTTOM_RIGHT,
                bottom,
            ),
        ];

        for (radius, center, quadrant, side) in corners {
            if radius > 0.0 && side.is_visible() {
                // Mid-line sits half a stroke inside the outer edge.
                self.stroke_arc(
                    batch,
                    center,
                    radius - side.width / 2.0,
                    side.width,
                    quadrant,
                    side.color,
                );
            }
        }
    }
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new(RendererConfig::DEFAULT_ARC_SEGMENTS)
    }
}
