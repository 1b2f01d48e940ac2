use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use qwikcard_core::{CodeExporter, Config, ExportRequest, HexColor};

#[derive(Args, Clone)]
pub struct ExportArgs {
    /// QR code SVG to rasterize
    #[arg(long)]
    pub svg: PathBuf,
    /// Profile name used for the file name (default stem when empty)
    #[arg(long, default_value = "")]
    pub name: String,
    /// Background colour painted under the code (#RGB or #RRGGBB)
    #[arg(long)]
    pub bg: Option<HexColor>,
    /// Directory the PNG is written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn execute(config: &Config, args: &ExportArgs) -> Result<()> {
    let svg = fs::read_to_string(&args.svg)
        .with_context(|| format!("read {}", args.svg.display()))?;
    let background = args.bg.unwrap_or(config.export.background);
    let path = save_png(config, &svg, background, &args.name, &args.out_dir)?;
    println!("Saved {}", path.display());
    Ok(())
}

/// Rasterize `svg` and write `<name>.png` into `out_dir`.
pub(crate) fn save_png(
    config: &Config,
    svg: &str,
    background: HexColor,
    name: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let exporter = CodeExporter::new(config.export.default_stem.clone());
    let image = exporter
        .export(&ExportRequest {
            svg,
            background,
            stem: name,
        })
        .context("Download failed")?;
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    image.save_into(out_dir).context("Download failed")
}
