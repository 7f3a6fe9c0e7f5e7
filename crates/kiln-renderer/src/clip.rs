//! Translation of layout-space clip boxes into hardware scissor rectangles
//!
//! The handheld GPU's scissor registers use a convention mirrored on both axes
//! relative to layout space, so every rectangle depends on the dimensions of
//! the target it is installed on.

use kiln_core::types::{BoundingBox, Dimensions};
use serde::Serialize;

/// Scissor bounds in the backend's native convention
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScissorRect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl ScissorRect {
    /// Map `bounds` on a target of size `target` into scissor coordinates:
    /// `left = W - w - x`, `bottom = H - h - y`, `right = W - x`, `top = h + y`.
    pub fn from_layout(bounds: &BoundingBox, target: Dimensions) -> Self {
        Self {
            left: target.width - bounds.width - bounds.x,
            bottom: target.height - bounds.height - bounds.y,
            right: target.width - bounds.x,
            top: bounds.height + bounds.y,
        }
    }
}

/// Scissor state installed on the backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Scissor {
    /// Draws cover the whole target
    Disabled,
    Normal(ScissorRect),
}

impl Scissor {
    pub fn rect(&self) -> Option<&ScissorRect> {
        match self {
            Scissor::Disabled => None,
            Scissor::Normal(rect) => Some(rect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mirrored_translation() {
        let target = Dimensions::new(400.0, 240.0);
        let bounds = BoundingBox::new(10.0, 20.0, 100.0, 50.0);

        assert_eq!(
            ScissorRect::from_layout(&bounds, target),
            ScissorRect {
                left: 290.0,
                bottom: 170.0,
                right: 390.0,
                top: 70.0,
            }
        );
    }

    #[test]
    fn test_same_box_differs_per_target() {
        let bounds = BoundingBox::new(0.0, 0.0, 320.0, 240.0);
        let top = ScissorRect::from_layout(&bounds, Dimensions::new(400.0, 240.0));
        let bottom = ScissorRect::from_layout(&bounds, Dimensions::new(320.0, 240.0));

        assert_eq!(top.left, 80.0);
        assert_eq!(bottom.left, 0.0);
        assert_eq!(top.top, bottom.top);
    }

    #[test]
    fn test_disabled_has_no_rect() {
        assert_eq!(Scissor::Disabled.rect(), None);
        let rect = ScissorRect::from_layout(&BoundingBox::default(), Dimensions::new(1.0, 1.0));
        assert_eq!(Scissor::Normal(rect).rect(), Some(&rect));
    }
}
