//! In-memory grayscale raster and PNG output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result, ensure};

use crate::pgm::PgmTile;

/// 8-bit grayscale image accumulating decoded tiles.
pub struct GrayRaster {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl GrayRaster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![0; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sample(&self, x: u32, y: u32) -> u8 {
        self.samples[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Copies a decoded tile into the rectangle at (`left`, `top`).
    pub fn blit(&mut self, left: u32, top: u32, tile: &PgmTile) -> Result<()> {
        // Tile dimensions come from the server; the sums must not wrap.
        let fits = left
            .checked_add(tile.width)
            .is_some_and(|right| right <= self.width)
            && top
                .checked_add(tile.height)
                .is_some_and(|bottom| bottom <= self.height);
        ensure!(
            fits,
            "tile {}x{} at ({}, {}) exceeds raster bounds {}x{}",
            tile.width,
            tile.height,
            left,
            top,
            self.width,
            self.height
        );

        for row in 0..tile.height {
            let src = (row as usize) * (tile.width as usize);
            let dst = ((top + row) as usize) * (self.width as usize) + (left as usize);
            self.samples[dst..dst + tile.width as usize]
                .copy_from_slice(&tile.samples[src..src + tile.width as usize]);
        }
        Ok(())
    }

    /// Encodes the raster as an 8-bit grayscale PNG at `path`.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("creating output file {}", path.display()))?;

        let mut encoder = png::Encoder::new(BufWriter::new(file), self.width, self.height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().context("writing PNG header")?;
        writer
            .write_image_data(&self.samples)
            .context("writing PNG image data")?;
        Ok(())
    }
}
