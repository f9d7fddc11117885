//! Dial rendering
//!
//! The renderer paints onto anything implementing [`Canvas`]. It only needs
//! the surface size and the time to display; it never touches timer state.

pub mod svg;

pub use svg::SvgCanvas;

/// Gap between the surface edge and the outer dial
pub const DIAL_MARGIN: i32 = 20;
/// Gap between the outer dial and the inner circle
pub const INNER_INSET: i32 = 20;
/// Corner arc diameter of the outer rounded square
pub const OUTER_CORNER_ARC: i32 = 200;
pub const BORDER_WIDTH: f32 = 6.0;
pub const FONT_SIZE: i32 = 32;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Fixed palette of the dial
pub mod palette {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb::WHITE;
    pub const OUTER: Rgb = Rgb(230, 240, 255);
    pub const INNER: Rgb = Rgb(180, 200, 245);
    pub const BORDER: Rgb = Rgb(60, 80, 160);
    pub const TEXT: Rgb = Rgb::WHITE;
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Square of side `size` centred on a `width` x `height` surface
    pub fn centered_square(width: i32, height: i32, size: i32) -> Self {
        Self {
            x: (width - size) / 2,
            y: (height - size) / 2,
            width: size,
            height: size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Drawing operations the dial needs from a backend
pub trait Canvas {
    fn clear(&mut self, color: Rgb);
    fn fill_round_rect(&mut self, rect: Rect, arc: i32, color: Rgb);
    fn fill_oval(&mut self, rect: Rect, color: Rgb);
    fn stroke_oval(&mut self, rect: Rect, stroke_width: f32, color: Rgb);
    /// Bold sans-serif text centred horizontally on `center_x` with its
    /// baseline at `baseline_y`
    fn draw_text(&mut self, text: &str, center_x: i32, baseline_y: i32, font_size: i32, color: Rgb);
}

/// Geometry of one dial frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialLayout {
    pub outer: Rect,
    pub inner: Rect,
    pub text_x: i32,
    pub text_baseline: i32,
}

impl DialLayout {
    /// Lay the dial out on a surface. Sizes smaller than the margins
    /// collapse the shapes to zero instead of going negative.
    pub fn new(width: u32, height: u32) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);

        let size = (width.min(height) - DIAL_MARGIN).max(0);
        let inner = (size - INNER_INSET).max(0);
        let ascent = FONT_SIZE * 3 / 4;

        Self {
            outer: Rect::centered_square(width, height, size),
            inner: Rect::centered_square(width, height, inner),
            text_x: width / 2,
            text_baseline: height / 2 + ascent / 2 - 10,
        }
    }
}

/// Format milliseconds as `MM:SS`. Minutes are not capped at two digits.
pub fn format_time(millis: u64) -> String {
    let total_seconds = millis / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Paint one dial frame showing `display_millis`
pub fn render_dial<C: Canvas + ?Sized>(canvas: &mut C, width: u32, height: u32, display_millis: u64) {
    let layout = DialLayout::new(width, height);

    canvas.clear(palette::BACKGROUND);

    if !layout.outer.is_empty() {
        let arc = OUTER_CORNER_ARC.min(layout.outer.width);
        canvas.fill_round_rect(layout.outer, arc, palette::OUTER);
    }

    if !layout.inner.is_empty() {
        canvas.fill_oval(layout.inner, palette::INNER);
        canvas.stroke_oval(layout.inner, BORDER_WIDTH, palette::BORDER);
    }

    canvas.draw_text(
        &format_time(display_millis),
        layout.text_x,
        layout.text_baseline,
        FONT_SIZE,
        palette::TEXT,
    );
}
