use image::{ImageBuffer, Rgb, RgbImage};
use itertools::{repeat_n, Itertools};
use log::info;
use std::convert::TryFrom;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cells::Cell;
use crate::errors::*;
use crate::sinks::RowSink;
use crate::units::{ColumnsCount, RowIndex, RowsCount};

const TOP_WALL: &str = " ___";
const RIGHT_WALL: &str = "   |";
const BOTTOM_WALL: &str = " ___";
const OPEN: &str = "    ";

/// The text lines for one maze row.
///
/// Row 0 is preceded by the top border. Each row is a line of right walls behind a left border,
/// then a line of bottom walls.
pub fn render_row_text(row: &[Cell], row_index: RowIndex) -> String {
    let mut text = String::with_capacity((row.len() * 4 + 2) * 3);

    if row_index.0 == 0 {
        text.push_str(&repeat_n(TOP_WALL, row.len()).join(""));
        text.push('\n');
    }

    text.push('|');
    for cell in row {
        text.push_str(if cell.right_wall { RIGHT_WALL } else { OPEN });
    }
    text.push('\n');

    for cell in row {
        text.push_str(if cell.bottom_wall { BOTTOM_WALL } else { OPEN });
    }
    text.push('\n');

    text
}

/// Streams each row as text to a writer as soon as it is generated.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> TextRenderer<W> {
        TextRenderer { out: out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowSink for TextRenderer<W> {
    fn emit_row(&mut self, row: &[Cell], row_index: RowIndex, is_final: bool) -> Result<()> {
        self.out.write_all(render_row_text(row, row_index).as_bytes())?;
        if is_final {
            self.out.flush()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ImageRenderOptions {
    cell_side_pixels: u32,
    wall_colour: Rgb<u8>,
    background_colour: Rgb<u8>,
    output_file: Option<PathBuf>,
}

impl Default for ImageRenderOptions {
    fn default() -> ImageRenderOptions {
        ImageRenderOptions {
            cell_side_pixels: 10,
            wall_colour: Rgb { data: [0, 0, 0] },
            background_colour: Rgb { data: [0xff, 0xff, 0xff] },
            output_file: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ImageRenderOptionsBuilder {
    options: ImageRenderOptions,
}

impl ImageRenderOptionsBuilder {
    pub fn new() -> ImageRenderOptionsBuilder {
        ImageRenderOptionsBuilder::default()
    }

    /// Pixel length of one cell side. Clamped to at least 2 so passages stay visible.
    pub fn cell_side_pixels_length(mut self, cell_side_pixels: u8) -> ImageRenderOptionsBuilder {
        self.options.cell_side_pixels = u32::from(cell_side_pixels).max(2);
        self
    }

    pub fn wall_colour(mut self, rgb: [u8; 3]) -> ImageRenderOptionsBuilder {
        self.options.wall_colour = Rgb { data: rgb };
        self
    }

    pub fn background_colour(mut self, rgb: [u8; 3]) -> ImageRenderOptionsBuilder {
        self.options.background_colour = Rgb { data: rgb };
        self
    }

    /// Save a PNG here once the last row has been drawn.
    pub fn output_file(mut self, path: Option<&Path>) -> ImageRenderOptionsBuilder {
        self.options.output_file = path.map(Path::to_path_buf);
        self
    }

    pub fn build(self) -> ImageRenderOptions {
        self.options
    }
}

/// Rasterizes rows into an RGB image as they arrive.
///
/// The image is sized for the whole maze up front, one extra pixel wide and high so the right
/// and bottom borders fit.
#[derive(Debug)]
pub struct ImageRenderer {
    options: ImageRenderOptions,
    rows: RowsCount,
    columns: ColumnsCount,
    image: RgbImage,
}

impl ImageRenderer {
    /// Fails with `ImageTooLarge` unless the side lengths and the pixel count fit a `u32`.
    pub fn new(rows: RowsCount,
               columns: ColumnsCount,
               options: ImageRenderOptions)
               -> Result<ImageRenderer> {
        let side = options.cell_side_pixels;
        let too_large = || ErrorKind::ImageTooLarge(rows.0, columns.0, side);

        let width = pixel_length(columns.0, side).ok_or_else(too_large)?;
        let height = pixel_length(rows.0, side).ok_or_else(too_large)?;
        let buffer_len = width.checked_mul(height)
            .and_then(|pixels| usize::try_from(pixels).ok())
            .and_then(|pixels| pixels.checked_mul(3));
        if buffer_len.is_none() {
            return Err(too_large().into());
        }

        let image = ImageBuffer::from_pixel(width, height, options.background_colour);
        Ok(ImageRenderer {
            options: options,
            rows: rows,
            columns: columns,
            image: image,
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn draw_horizontal(&mut self, x1: u32, x2: u32, y: u32) {
        for x in x1..x2 + 1 {
            self.image.put_pixel(x, y, self.options.wall_colour);
        }
    }

    fn draw_vertical(&mut self, x: u32, y1: u32, y2: u32) {
        for y in y1..y2 + 1 {
            self.image.put_pixel(x, y, self.options.wall_colour);
        }
    }
}

/// Pixels spanned by `cells` cells plus the closing border line.
fn pixel_length(cells: usize, side: u32) -> Option<u32> {
    u32::try_from(cells).ok()
        .and_then(|cells| cells.checked_mul(side))
        .and_then(|pixels| pixels.checked_add(1))
}

impl RowSink for ImageRenderer {
    fn emit_row(&mut self, row: &[Cell], row_index: RowIndex, is_final: bool) -> Result<()> {
        if row_index.0 >= self.rows.0 || row.len() != self.columns.0 {
            return Err(format!("row {} of {} cells does not fit a {} x {} image",
                               row_index.0,
                               row.len(),
                               self.rows.0,
                               self.columns.0)
                .into());
        }

        let side = self.options.cell_side_pixels;
        let y1 = row_index.0 as u32 * side;
        let y2 = y1 + side;

        // The top and left borders are not part of any cell.
        if row_index.0 == 0 {
            let right_edge = self.columns.0 as u32 * side;
            self.draw_horizontal(0, right_edge, 0);
        }
        self.draw_vertical(0, y1, y2);

        for cell in row {
            let x1 = cell.col_index.0 as u32 * side;
            let x2 = x1 + side;
            if cell.right_wall {
                self.draw_vertical(x2, y1, y2);
            }
            if cell.bottom_wall {
                self.draw_horizontal(x1, x2, y2);
            }
        }

        if is_final {
            if let Some(ref path) = self.options.output_file {
                self.image
                    .save(path)
                    .chain_err(|| format!("Failed to write maze image to {}", path.display()))?;
                info!("Maze image written to {}", path.display());
            }
        }

        Ok(())
    }
}
