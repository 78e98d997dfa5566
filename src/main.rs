use anyhow::{Context, Result, anyhow};
use tracing::info;

use mandelfetch::config::Config;
use mandelfetch::fetch::FetchLoop;
use mandelfetch::pgm;
use mandelfetch::raster::GrayRaster;
use mandelfetch::tile::{Tile, TileGrid};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::from_args(std::env::args().skip(1))?;

    let grid = TileGrid {
        re_min: cfg.re_min,
        re_max: cfg.re_max,
        im_min: cfg.im_min,
        im_max: cfg.im_max,
        max_iterations: cfg.max_iterations,
        width: cfg.width,
        height: cfg.height,
        divisions: cfg.divisions,
    };

    let mut raster = GrayRaster::new(cfg.width, cfg.height);
    let mut fetch: FetchLoop<Tile> = FetchLoop::new()?;

    for tile in grid.tiles() {
        let url = tile.url(&cfg.app_root).context("building tile URL")?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("tile URL has no host"))?;
        let port = url.port_or_known_default().unwrap_or(80);

        info!(%url, top = tile.top, left = tile.left, "requesting tile");
        fetch.open(host, port, url.path(), tile)?;
    }

    fetch.run(|done| {
        let body = done.body();
        let text = std::str::from_utf8(&body).context("tile body is not ASCII text")?;
        let decoded = pgm::decode(text).map_err(|e| anyhow!("bad tile data: {:?}", e))?;

        let tile = done.context;
        info!(
            row = tile.row,
            col = tile.col,
            width = decoded.width,
            height = decoded.height,
            "tile received"
        );
        raster.blit(tile.left, tile.top, &decoded)
    })?;

    info!(output = %cfg.output.display(), "writing image");
    raster.write_png(&cfg.output)?;

    Ok(())
}
