use anyhow::Context;
use kiln::kiln_core::types::{BoundingBox, Color, CornerRadius, Dimensions};
use kiln::kiln_core::KilnConfig;
use kiln::kiln_renderer::{
    BorderConfig, FontId, RecordedFont, RecordingBackend, RecordingTarget, RenderCommand, RenderStats, Renderer,
};

const TOP_SCREEN: Dimensions = Dimensions {
    width: 400.0,
    height: 240.0,
};
const BOTTOM_SCREEN: Dimensions = Dimensions {
    width: 320.0,
    height: 240.0,
};

type Commands<'a> = Vec<RenderCommand<'a, kiln::kiln_renderer::RecordedImage>>;

/// Geometry row and tagline, centered on the top screen
fn top_layout<'a>(renderer: &mut Renderer<RecordingBackend>, shaper: &mut RecordingBackend) -> Commands<'a> {
    const SQUARE: f32 = 60.0;
    const ROW_GAP: f32 = 20.0;
    const COLUMN_GAP: f32 = 12.0;

    let big = renderer.measure_text(shaper, b"BIG", FontId::SYSTEM, 48.0).dimensions;
    let tagline = renderer
        .measure_text(shaper, b"kiln is not for the weak", FontId::SYSTEM, 20.0)
        .dimensions;

    let row_width = 3.0 * SQUARE + big.width + 3.0 * ROW_GAP;
    let row_height = SQUARE.max(big.height);
    let mut x = (TOP_SCREEN.width - row_width) / 2.0;
    let y = (TOP_SCREEN.height - (row_height + COLUMN_GAP + tagline.height)) / 2.0;
    let mut next_slot = |width: f32, height: f32| {
        let slot = BoundingBox::new(x, y + (row_height - height) / 2.0, width, height);
        x += width + ROW_GAP;
        slot
    };

    let plain = next_slot(SQUARE, SQUARE);
    let rounded = next_slot(SQUARE, SQUARE);
    let outlined = next_slot(SQUARE, SQUARE);
    let big_bounds = next_slot(big.width, big.height);

    vec![
        RenderCommand::rectangle(plain, Color::RED, CornerRadius::ZERO),
        RenderCommand::border(plain, BorderConfig::uniform(4.0, Color::rgb(255.0, 255.0, 0.0))),
        RenderCommand::rectangle(rounded, Color::rgb(255.0, 0.0, 255.0), CornerRadius::all(16.0)),
        RenderCommand::border(
            outlined,
            BorderConfig::uniform(4.0, Color::rgb(0.0, 255.0, 255.0)).with_corner_radius(CornerRadius::all(16.0)),
        ),
        RenderCommand::text(big_bounds, b"BIG", FontId::SYSTEM, 48.0, Color::GREEN),
        RenderCommand::text(
            BoundingBox::new(
                (TOP_SCREEN.width - tagline.width) / 2.0,
                y + row_height + COLUMN_GAP,
                tagline.width,
                tagline.height,
            ),
            b"kiln is not for the weak",
            FontId::SYSTEM,
            20.0,
            Color::WHITE,
        ),
    ]
}

/// A bordered button whose label is clipped to the button's padding box
fn bottom_layout<'a>(
    renderer: &mut Renderer<RecordingBackend>,
    shaper: &mut RecordingBackend,
    font: FontId,
) -> Commands<'a> {
    const LABEL: &[u8] = b"interactivity is preserved\n\npress the big button";
    const WIDTH: f32 = 160.0;
    const PADDING_X: f32 = 12.0;
    const PADDING_Y: f32 = 6.0;

    let label = renderer.measure_text(shaper, LABEL, font, 16.0).dimensions;
    let height = label.height + 2.0 * PADDING_Y;
    let button = BoundingBox::new(
        (BOTTOM_SCREEN.width - WIDTH) / 2.0,
        (BOTTOM_SCREEN.height - height) / 2.0,
        WIDTH,
        height,
    );
    let content = BoundingBox::new(
        button.x + PADDING_X,
        button.y + PADDING_Y,
        WIDTH - 2.0 * PADDING_X,
        label.height,
    );

    vec![
        RenderCommand::rectangle(button, Color::rgb(33.0, 46.0, 69.0), CornerRadius::all(6.0)),
        RenderCommand::border(
            button,
            BorderConfig::uniform(1.0, Color::rgb(152.0, 171.0, 205.0)).with_corner_radius(CornerRadius::all(6.0)),
        ),
        RenderCommand::scissor_start(content),
        RenderCommand::text(
            BoundingBox::new(content.x, content.y, label.width, label.height),
            LABEL,
            font,
            16.0,
            Color::rgb(152.0, 171.0, 205.0),
        ),
        RenderCommand::scissor_end(),
    ]
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => KilnConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => KilnConfig::default(),
    };
    let output = args.next();

    println!("Kiln Dual Screen Demo");
    println!("=====================");

    let mut renderer: Renderer<RecordingBackend> = kiln::init(&config)?;
    let mut backend = RecordingBackend::new();

    // Fonts must be registered before the first frame.
    let comic = renderer
        .register_font(RecordedFont::new("comic", 14.0, 34.0))
        .unwrap_or(FontId::INVALID);
    println!("Registered font id: {}", comic);

    let top_commands = top_layout(&mut renderer, &mut backend);
    let bottom_commands = bottom_layout(&mut renderer, &mut backend, comic);

    let top = renderer.render(&mut backend, &RecordingTarget::new("top"), TOP_SCREEN, &top_commands);
    let top_calls = backend.take_calls();
    let bottom = renderer.render(
        &mut backend,
        &RecordingTarget::new("bottom"),
        BOTTOM_SCREEN,
        &bottom_commands,
    );
    let bottom_calls = backend.take_calls();

    let mut total = RenderStats::default();
    total.merge(&top);
    total.merge(&bottom);

    println!("\nTop screen:    {} commands -> {} draw calls", top.commands, top_calls.len());
    println!("Bottom screen: {} commands -> {} draw calls", bottom.commands, bottom_calls.len());
    println!(
        "Frame total:   {} primitives, {} text runs, {} scissor changes",
        total.primitives, total.text_runs, total.scissor_changes
    );

    if let Some(path) = output {
        let frame = serde_json::json!({
            "top": { "stats": top, "calls": top_calls },
            "bottom": { "stats": bottom, "calls": bottom_calls },
        });
        std::fs::write(&path, serde_json::to_string_pretty(&frame)?)
            .with_context(|| format!("writing frame capture to {}", path))?;
        println!("\nFrame capture written to {}", path);
    }

    Ok(())
}
