//! Division of the requested Mandelbrot region into a grid of tiles.
//!
//! Each tile covers an equal sub-rectangle of the complex plane and of the
//! output image. Row 0 sits at the top of the image, which corresponds to
//! the maximum imaginary coordinate.

use url::Url;

/// The full render job: a complex-plane rectangle mapped onto a pixel
/// rectangle, split `divisions × divisions` ways.
#[derive(Debug, Clone)]
pub struct TileGrid {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
    pub max_iterations: u32,
    pub width: u32,
    pub height: u32,
    pub divisions: u32,
}

/// One rectangular sub-region, independently requested and received.
///
/// Carries both the complex-plane bounds sent to the server and the pixel
/// offsets identifying where the decoded result lands in the final raster.
#[derive(Debug, Clone)]
pub struct Tile {
    pub row: u32,
    pub col: u32,
    /// Destination offsets in the output raster
    pub top: u32,
    pub left: u32,
    /// Pixel size requested from the server
    pub width: u32,
    pub height: u32,
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
    pub max_iterations: u32,
}

impl TileGrid {
    /// Produces all tiles in row-major order.
    ///
    /// Pixel sizes truncate: a grid not evenly divisible by `divisions`
    /// leaves the right/bottom remainder pixels unrendered.
    pub fn tiles(&self) -> Vec<Tile> {
        let d = f64::from(self.divisions);
        let re_span = self.re_max - self.re_min;
        let im_span = self.im_max - self.im_min;

        let mut tiles = Vec::with_capacity((self.divisions * self.divisions) as usize);
        for row in 0..self.divisions {
            for col in 0..self.divisions {
                let re_min = self.re_min + f64::from(col) * re_span / d;
                let im_max = self.im_max - f64::from(row) * im_span / d;

                tiles.push(Tile {
                    row,
                    col,
                    top: row * self.height / self.divisions,
                    left: col * self.width / self.divisions,
                    width: self.width / self.divisions,
                    height: self.height / self.divisions,
                    re_min,
                    re_max: re_min + re_span / d,
                    im_min: im_max - im_span / d,
                    im_max,
                    max_iterations: self.max_iterations,
                });
            }
        }
        tiles
    }
}

impl Tile {
    /// Resolves this tile's request URL against the application root.
    pub fn url(&self, app_root: &Url) -> Result<Url, url::ParseError> {
        app_root.join(&format!(
            "mandelbrot/{}/{}/{}/{}/{}/{}/{}",
            self.re_min,
            self.re_max,
            self.im_min,
            self.im_max,
            self.width,
            self.height,
            self.max_iterations
        ))
    }
}
