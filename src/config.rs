use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, ensure};
use url::Url;

pub const USAGE: &str = "Usage: mandelfetch <re_min> <re_max> <im_min> <im_max> \
<max_iterations> <width> <height> <divisions> <app_root_url> <output>";

/// A validated render job taken from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
    pub max_iterations: u32,
    pub width: u32,
    pub height: u32,
    pub divisions: u32,
    pub app_root: Url,
    pub output: PathBuf,
}

impl Config {
    /// Parses the positional arguments (program name already stripped).
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut next = |name: &str| {
            args.next()
                .ok_or_else(|| anyhow!("missing argument <{}>\n{}", name, USAGE))
        };

        let re_min: f64 = next("re_min")?.parse().context("re_min is not a number")?;
        let re_max: f64 = next("re_max")?.parse().context("re_max is not a number")?;
        let im_min: f64 = next("im_min")?.parse().context("im_min is not a number")?;
        let im_max: f64 = next("im_max")?.parse().context("im_max is not a number")?;
        let max_iterations: u32 = next("max_iterations")?
            .parse()
            .context("max_iterations is not a non-negative integer")?;
        let width: u32 = next("width")?
            .parse()
            .context("width is not a non-negative integer")?;
        let height: u32 = next("height")?
            .parse()
            .context("height is not a non-negative integer")?;
        let divisions: u32 = next("divisions")?
            .parse()
            .context("divisions is not a non-negative integer")?;
        let app_root = Url::parse(&next("app_root_url")?).context("invalid app root URL")?;
        let output = PathBuf::from(next("output")?);

        ensure!(re_min < re_max, "re_min must be less than re_max");
        ensure!(im_min < im_max, "im_min must be less than im_max");
        ensure!(width >= 1 && height >= 1, "width and height must be at least 1");
        ensure!(divisions >= 1, "divisions must be at least 1");
        ensure!(
            app_root.scheme() == "http",
            "only http:// application roots are supported"
        );
        ensure!(app_root.host_str().is_some(), "app root URL has no host");

        Ok(Self {
            re_min,
            re_max,
            im_min,
            im_max,
            max_iterations,
            width,
            height,
            divisions,
            app_root,
            output,
        })
    }
}
