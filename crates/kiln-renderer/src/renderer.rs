//! Render command dispatcher
//!
//! [`Renderer`] owns the state that outlives a single command: the font
//! registry, the text scratch buffer and shaping layout, the tessellation
//! batch and the active scissor. Everything that mutates it takes `&mut self`,
//! so a measurement can never interleave with a render pass.

use kiln_core::types::{BoundingBox, Dimensions};
use kiln_core::{kiln_debug, kiln_error, kiln_trace, kiln_warn, KilnError, LogCategory, RendererConfig, Result};
use serde::Serialize;

use crate::backend::{Backend, TextShaper};
use crate::clip::{Scissor, ScissorRect};
use crate::command::{RenderCommand, RenderCommandConfig, TextConfig};
use crate::fonts::{FontId, FontRegistry};
use crate::primitive::PrimitiveBatch;
use crate::tessellator::Tessellator;
use crate::text::{TextMeasurement, TextScratch};

/// Counters for one [`Renderer::render`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RenderStats {
    pub commands: usize,
    /// Tessellated primitives issued to the backend
    pub primitives: usize,
    pub text_runs: usize,
    /// Text runs cut at the scratch buffer capacity or an embedded NUL
    pub truncated_text_runs: usize,
    pub images: usize,
    /// Image commands without an image resource or with an empty source
    pub skipped_images: usize,
    pub scissor_changes: usize,
}

impl RenderStats {
    /// Fold another pass into this one, e.g. to total a multi-target frame
    pub fn merge(&mut self, other: &RenderStats) {
        self.commands += other.commands;
        self.primitives += other.primitives;
        self.text_runs += other.text_runs;
        self.truncated_text_runs += other.truncated_text_runs;
        self.images += other.images;
        self.skipped_images += other.skipped_images;
        self.scissor_changes += other.scissor_changes;
    }
}

/// Renderer context for backend `S`
pub struct Renderer<S: TextShaper> {
    config: RendererConfig,
    tessellator: Tessellator,
    fonts: FontRegistry<S::Font>,
    scratch: TextScratch,
    text_layout: S::TextLayout,
    batch: PrimitiveBatch,
    active_scissor: Option<ScissorRect>,
}

impl<S: TextShaper> Renderer<S> {
    /// Create a renderer after validating `config`
    pub fn new(config: RendererConfig) -> Result<Self> {
        config.validate()?;
        kiln_debug!(
            LogCategory::Renderer,
            "creating renderer: segments={} reference_size={} scratch={}B fonts={}",
            config.arc_segments,
            config.text_reference_size,
            config.text_scratch_capacity,
            config.font_capacity
        );

        Ok(Self {
            tessellator: Tessellator::from_config(&config),
            fonts: FontRegistry::new(config.font_capacity),
            scratch: TextScratch::new(config.text_scratch_capacity),
            text_layout: S::TextLayout::default(),
            batch: PrimitiveBatch::new(),
            active_scissor: None,
            config,
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn tessellator(&self) -> &Tessellator {
        &self.tessellator
    }

    /// Register a font for use by text commands.
    ///
    /// Must happen before the first frame. Fails once the registry is full;
    /// use `unwrap_or(FontId::INVALID)` to fall back to the system font.
    pub fn register_font(&mut self, font: S::Font) -> Result<FontId> {
        self.fonts.register(font)
    }

    pub fn fonts(&self) -> &FontRegistry<S::Font> {
        &self.fonts
    }

    /// Scissor installed by the last unmatched ScissorStart, if any
    pub fn active_scissor(&self) -> Option<&ScissorRect> {
        self.active_scissor.as_ref()
    }

    /// Scale from the reference shaping size to `font_size`
    pub fn text_scale(&self, font_size: f32) -> f32 {
        font_size / self.config.text_reference_size
    }

    /// Measure a run at `font_size`, as the layout engine's text callback.
    ///
    /// Same inputs give the same result; the scratch buffer and shaping layout
    /// are overwritten but carry nothing from one call to the next.
    pub fn measure_text(
        &mut self,
        shaper: &mut S,
        text: &[u8],
        font_id: FontId,
        font_size: f32,
    ) -> TextMeasurement {
        let truncated = self.shape_run(shaper, text, font_id);
        let scale = self.text_scale(font_size);

        TextMeasurement {
            dimensions: shaper.layout_size(&self.text_layout).scaled(scale),
            truncated,
        }
    }

    /// Copy `text` into the scratch buffer and shape it. Returns whether the
    /// run was truncated.
    fn shape_run(&mut self, shaper: &mut S, text: &[u8], font_id: FontId) -> bool {
        let max_len = self.scratch.max_text_len();
        let loaded = self.scratch.load(text);
        if loaded.truncated() {
            kiln_debug!(
                LogCategory::Text,
                "text run of {} bytes cut to {} (scratch holds {})",
                text.len(),
                text.len() - loaded.dropped,
                max_len
            );
        }

        shaper.shape(&mut self.text_layout, loaded.text, self.fonts.resolve(font_id));
        loaded.truncated()
    }
}

impl<B: Backend> Renderer<B> {
    /// Draw one frame's commands onto `target`, in order.
    ///
    /// The caller must already have started a frame on `target`.
    /// `dimensions` are the target's pixel size and drive scissor translation.
    ///
    /// # Aborts
    ///
    /// Terminates the whole process on a [`RenderCommandConfig::Unrecognized`]
    /// command: the layout engine and the renderer disagree about the command
    /// set, and the rest of the stream cannot be interpreted.
    pub fn render(
        &mut self,
        backend: &mut B,
        target: &B::Target,
        dimensions: Dimensions,
        commands: &[RenderCommand<'_, B::Image>],
    ) -> RenderStats {
        let mut stats = RenderStats {
            commands: commands.len(),
            ..RenderStats::default()
        };

        for command in commands {
            let bounds = &command.bounding_box;
            kiln_trace!(LogCategory::Renderer, "{} {:?}", command.config.name(), bounds);

            match &command.config {
                RenderCommandConfig::Rectangle(rect) => {
                    self.batch.clear();
                    self.tessellator
                        .fill_rounded_rect(&mut self.batch, bounds, &rect.corner_radius, rect.color);
                    stats.primitives += self.flush_batch(backend);
                }
                RenderCommandConfig::Border(border) => {
                    self.batch.clear();
                    self.tessellator.stroke_border(&mut self.batch, bounds, border);
                    stats.primitives += self.flush_batch(backend);
                }
                RenderCommandConfig::Text(text) => {
                    if self.draw_text(backend, bounds, text) {
                        stats.truncated_text_runs += 1;
                    }
                    stats.text_runs += 1;
                }
                RenderCommandConfig::Image(image) => match (image.image, image.stretch_to(bounds)) {
                    (Some(handle), Some(scale)) => {
                        backend.draw_image(handle, *bounds, scale);
                        stats.images += 1;
                    }
                    (Some(_), None) => {
                        kiln_debug!(
                            LogCategory::Renderer,
                            "skipping image with empty source {:?}",
                            image.source_dimensions
                        );
                        stats.skipped_images += 1;
                    }
                    (None, _) => stats.skipped_images += 1,
                },
                RenderCommandConfig::ScissorStart => {
                    self.start_scissor(backend, target, bounds, dimensions);
                    stats.scissor_changes += 1;
                }
                RenderCommandConfig::ScissorEnd => {
                    backend.set_scissor(Scissor::Disabled);
                    self.active_scissor = None;
                    stats.scissor_changes += 1;
                }
                RenderCommandConfig::Unrecognized(tag) => {
                    kiln_error!(LogCategory::Renderer, "{}", KilnError::UnrecognizedCommand(*tag));
                    std::process::abort();
                }
            }
        }

        if self.active_scissor.is_some() {
            kiln_warn!(LogCategory::Clip, "render pass ended with the scissor still enabled");
        }

        stats
    }

    fn flush_batch(&mut self, backend: &mut B) -> usize {
        for primitive in &self.batch {
            backend.draw_primitive(primitive);
        }
        self.batch.len()
    }

    fn draw_text(&mut self, backend: &mut B, bounds: &BoundingBox, text: &TextConfig<'_>) -> bool {
        let truncated = self.shape_run(backend, text.text, text.font_id);
        let scale = self.text_scale(text.font_size);
        backend.draw_text(&self.text_layout, bounds.origin(), scale, text.color);
        truncated
    }

    fn start_scissor(&mut self, backend: &mut B, target: &B::Target, bounds: &BoundingBox, dimensions: Dimensions) {
        let rect = ScissorRect::from_layout(bounds, dimensions);
        if let Some(previous) = self.active_scissor {
            kiln_debug!(LogCategory::Clip, "replacing active scissor {:?} with {:?}", previous, rect);
        }

        backend.begin_scene(target);
        backend.set_scissor(Scissor::Normal(rect));
        self.active_scissor = Some(rect);
    }
}

impl<S: TextShaper> std::fmt::Debug for Renderer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("fonts", &self.fonts)
            .field("scratch", &self.scratch)
            .field("active_scissor", &self.active_scissor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCall, RecordedFont, RecordedImage, RecordingBackend, RecordingTarget};
    use kiln_core::types::{Color, CornerRadius};

    fn renderer() -> Renderer<RecordingBackend> {
        Renderer::new(RendererConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RendererConfig {
            arc_segments: 0,
            ..RendererConfig::default()
        };
        assert!(Renderer::<RecordingBackend>::new(config).is_err());
    }

    #[test]
    fn test_measure_scales_from_reference_size() {
        let mut renderer = renderer();
        let mut backend = RecordingBackend::new();

        let at_reference = renderer.measure_text(&mut backend, b"abcd", FontId::SYSTEM, 30.0);
        assert_eq!(at_reference.dimensions, Dimensions::new(60.0, 30.0));

        let half = renderer.measure_text(&mut backend, b"abcd", FontId::SYSTEM, 15.0);
        assert_eq!(half.dimensions, Dimensions::new(30.0, 15.0));
        assert!(!half.truncated);
    }

    #[test]
    fn test_measure_is_deterministic() {
        let mut renderer = renderer();
        let mut backend = RecordingBackend::new();
        let font = renderer
            .register_font(RecordedFont::new("comic", 12.0, 28.0))
            .unwrap();

        let first = renderer.measure_text(&mut backend, b"kiln", font, 24.0);
        renderer.measure_text(&mut backend, b"something else entirely", FontId::SYSTEM, 48.0);
        let second = renderer.measure_text(&mut backend, b"kiln", font, 24.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_font_measures_with_system_font() {
        let mut renderer = renderer();
        let mut backend = RecordingBackend::new();

        let system = renderer.measure_text(&mut backend, b"abc", FontId::SYSTEM, 30.0);
        let unknown = renderer.measure_text(&mut backend, b"abc", FontId::from_raw(5), 30.0);
        let invalid = renderer.measure_text(&mut backend, b"abc", FontId::INVALID, 30.0);
        assert_eq!(system, unknown);
        assert_eq!(system, invalid);
    }

    #[test]
    fn test_measure_reports_truncation() {
        let config = RendererConfig {
            text_scratch_capacity: 5,
            ..RendererConfig::default()
        };
        let mut renderer = Renderer::<RecordingBackend>::new(config).unwrap();
        let mut backend = RecordingBackend::new();

        let measured = renderer.measure_text(&mut backend, b"abcdefgh", FontId::SYSTEM, 30.0);
        assert!(measured.truncated);
        assert_eq!(measured.dimensions.width, 4.0 * 15.0);
    }

    #[test]
    fn test_rectangle_fast_path_issues_one_call() {
        let mut renderer = renderer();
        let mut backend = RecordingBackend::new();
        let commands = [RenderCommand::rectangle(
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            Color::RED,
            CornerRadius::ZERO,
        )];

        let stats = renderer.render(
            &mut backend,
            &RecordingTarget::new("bottom"),
            Dimensions::new(320.0, 240.0),
            &commands,
        );
        assert_eq!(stats.primitives, 1);
        assert_eq!(backend.calls().len(), 1);
    }

    #[test]
    fn test_missing_image_is_skipped() {
        let mut renderer = renderer();
        let mut backend = RecordingBackend::new();
        let commands = [RenderCommand::image(
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            None,
            Dimensions::new(10.0, 10.0),
        )];

        let stats = renderer.render(
            &mut backend,
            &RecordingTarget::new("top"),
            Dimensions::new(400.0, 240.0),
            &commands,
        );
        assert_eq!(stats.skipped_images, 1);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_image_stretched_from_source_size() {
        let mut renderer = renderer();
        let mut backend = RecordingBackend::new();
        let sprite = RecordedImage::new("sprite", Dimensions::new(16.0, 16.0));
        let commands = [
            RenderCommand::image(BoundingBox::new(4.0, 4.0, 32.0, 48.0), Some(&sprite), sprite.dimensions),
            RenderCommand::image(BoundingBox::new(4.0, 4.0, 32.0, 48.0), Some(&sprite), Dimensions::zero()),
        ];

        let stats = renderer.render(
            &mut backend,
            &RecordingTarget::new("top"),
            Dimensions::new(400.0, 240.0),
            &commands,
        );
        assert_eq!(stats.images, 1);
        assert_eq!(stats.skipped_images, 1);
        assert_eq!(
            backend.calls(),
            &[DrawCall::Image {
                image: "sprite".to_string(),
                bounds: BoundingBox::new(4.0, 4.0, 32.0, 48.0),
                scale: glam::Vec2::new(2.0, 3.0),
            }]
        );
    }

    #[test]
    fn test_second_scissor_start_replaces_first() {
        let mut renderer = renderer();
        let mut backend = RecordingBackend::new();
        let target = RecordingTarget::new("top");
        let dimensions = Dimensions::new(400.0, 240.0);
        let commands = [
            RenderCommand::scissor_start(BoundingBox::new(0.0, 0.0, 100.0, 100.0)),
            RenderCommand::scissor_start(BoundingBox::new(10.0, 10.0, 20.0, 20.0)),
        ];

        renderer.render(&mut backend, &target, dimensions, &commands);
        let expected = ScissorRect::from_layout(&BoundingBox::new(10.0, 10.0, 20.0, 20.0), dimensions);
        assert_eq!(renderer.active_scissor(), Some(&expected));
        assert_eq!(
            backend.calls().last(),
            Some(&DrawCall::Scissor {
                scissor: Scissor::Normal(expected)
            })
        );

        renderer.render(&mut backend, &target, dimensions, &[RenderCommand::scissor_end()]);
        assert_eq!(renderer.active_scissor(), None);
    }

    #[test]
    fn test_stats_merge() {
        let mut total = RenderStats {
            commands: 2,
            primitives: 10,
            ..RenderStats::default()
        };
        total.merge(&RenderStats {
            commands: 1,
            text_runs: 1,
            ..RenderStats::default()
        });
        assert_eq!(total.commands, 3);
        assert_eq!(total.primitives, 10);
        assert_eq!(total.text_runs, 1);
    }
}
