/// Off-screen frame buffer.
///
/// Pixels are blended in software; text is kept as runs and laid over the
/// pixels when the frame is presented, since the terminal draws glyphs
/// better than any bitmap font at this resolution.

use crate::image_cache::Image;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [0xFF, 0xFF, 0xFF];

/// Glyph metrics for one of the console's fonts, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub name: &'static str,
    pub char_width: u32,
    pub char_height: u32,
    pub bold: bool,
}

pub const BIG_FONT: Font = Font {
    name: "sans-big",
    char_width: 12,
    char_height: 16,
    bold: true,
};

pub const SMALL_FONT: Font = Font {
    name: "sans-small",
    char_width: 8,
    char_height: 10,
    bold: false,
};

impl Font {
    pub fn string_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.char_width
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub font: Font,
    pub color: Rgb,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    texts: Vec<TextRun>,
    font: Font,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; (width * height) as usize],
            texts: Vec::new(),
            font: BIG_FONT,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill every pixel with `color` and drop all text.
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.texts.clear();
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Alpha-blend `image` with its top-left corner at (`x`, `y`), clipped
    /// to the canvas.
    pub fn draw_image(&mut self, image: &Image, x: i32, y: i32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + image.width as i32).min(self.width as i32);
        let y1 = (y + image.height as i32).min(self.height as i32);

        for dy in y0..y1 {
            for dx in x0..x1 {
                let Some([r, g, b, a]) = image.pixel((dx - x) as u32, (dy - y) as u32) else {
                    continue;
                };
                if a == 0 {
                    continue;
                }
                let idx = (dy as u32 * self.width + dx as u32) as usize;
                self.pixels[idx] = blend(self.pixels[idx], [r, g, b], a);
            }
        }
    }

    /// Queue `text` in the current font with its top-left at (`x`, `y`).
    pub fn draw_string(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        self.texts.push(TextRun {
            x,
            y,
            text: text.to_string(),
            font: self.font,
            color,
        });
    }
}

fn blend(dst: Rgb, src: Rgb, alpha: u8) -> Rgb {
    if alpha == 0xFF {
        return src;
    }
    let a = alpha as u32;
    let mix = |d: u8, s: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
    [mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2])]
}
