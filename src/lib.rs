//! mandelfetch - Parallel Mandelbrot tile downloader
//!
//! Core library: a non-blocking HTTP/1.1 client multiplexed over a single
//! readiness-driven event loop, plus the tiling, decoding and raster
//! utilities that turn downloaded tiles back into one image.

pub mod config;
pub mod fetch;
pub mod http;
pub mod pgm;
pub mod raster;
pub mod tile;
