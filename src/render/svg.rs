//! SVG backend for the dial

use std::fmt::Write;

use super::{Canvas, Rect, Rgb};

/// Canvas that accumulates SVG elements for a fixed-size surface
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Close the document and return it
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">{body}</svg>",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }
}

fn css(color: Rgb) -> String {
    format!("rgb({},{},{})", color.0, color.1, color.2)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// Writing to a String cannot fail, so the fmt results are discarded.
impl Canvas for SvgCanvas {
    fn clear(&mut self, color: Rgb) {
        self.body.clear();
        let _ = write!(
            self.body,
            "<rect width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            self.width,
            self.height,
            css(color)
        );
    }

    fn fill_round_rect(&mut self, rect: Rect, arc: i32, color: Rgb) {
        let radius = arc / 2;
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\"/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            css(color),
            r = radius,
        );
    }

    fn fill_oval(&mut self, rect: Rect, color: Rgb) {
        let _ = write!(
            self.body,
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{}\"/>",
            rect.x as f32 + rect.width as f32 / 2.0,
            rect.y as f32 + rect.height as f32 / 2.0,
            rect.width as f32 / 2.0,
            rect.height as f32 / 2.0,
            css(color)
        );
    }

    fn stroke_oval(&mut self, rect: Rect, stroke_width: f32, color: Rgb) {
        let _ = write!(
            self.body,
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            rect.x as f32 + rect.width as f32 / 2.0,
            rect.y as f32 + rect.height as f32 / 2.0,
            rect.width as f32 / 2.0,
            rect.height as f32 / 2.0,
            css(color),
            stroke_width
        );
    }

    fn draw_text(&mut self, text: &str, center_x: i32, baseline_y: i32, font_size: i32, color: Rgb) {
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-weight=\"bold\" font-size=\"{}\" fill=\"{}\">{}</text>",
            center_x,
            baseline_y,
            font_size,
            css(color),
            escape(text)
        );
    }
}
