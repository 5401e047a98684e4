/// Presents a `Canvas` on the terminal.
///
/// Each character cell shows two vertically stacked pixels through the
/// upper half block: foreground is the top pixel, background the bottom.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    QueueableCommand,
};

use super::canvas::{Canvas, Rgb, BLACK};

const HALF_BLOCK: &str = "▀";

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb[0],
        g: rgb[1],
        b: rgb[2],
    }
}

/// Sample the canvas into a `cols` × `rows` cell grid and flush it.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas, cols: u16, rows: u16) -> std::io::Result<()> {
    let (w, h) = (canvas.width() as u64, canvas.height() as u64);
    if cols == 0 || rows == 0 || w == 0 || h == 0 {
        return Ok(());
    }

    let (cols64, rows64) = (cols as u64, rows as u64);
    let mut fg: Option<Rgb> = None;
    let mut bg: Option<Rgb> = None;

    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row))?;
        let top_y = (2 * row as u64 * h / (2 * rows64)) as u32;
        let bottom_y = ((2 * row as u64 + 1) * h / (2 * rows64)) as u32;

        for col in 0..cols {
            let x = (col as u64 * w / cols64) as u32;
            let top = canvas.pixel(x, top_y).unwrap_or(BLACK);
            let bottom = canvas.pixel(x, bottom_y).unwrap_or(BLACK);

            if fg != Some(top) {
                out.queue(style::SetForegroundColor(color(top)))?;
                fg = Some(top);
            }
            if bg != Some(bottom) {
                out.queue(style::SetBackgroundColor(color(bottom)))?;
                bg = Some(bottom);
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }

    // Text goes on top, mapped from screen pixels to cells
    out.queue(style::SetBackgroundColor(color(BLACK)))?;
    for run in canvas.texts() {
        let col = run.x.max(0) as u64 * cols64 / w;
        let row = run.y.max(0) as u64 * rows64 / h;
        if col >= cols64 || row >= rows64 {
            continue;
        }
        let room = (cols64 - col) as usize;
        let text: String = run.text.chars().take(room).collect();

        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(color(run.color)))?;
        if run.font.bold {
            out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        out.queue(Print(text))?;
        if run.font.bold {
            out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
        }
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
