use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use image::{Rgb, RgbImage, RgbaImage};
use log::info;
use msdf_bakery::{
    BakeConfig, BakeOutput, ColoredSegment, EdgeColor, Image, bake_rgba8, quantize_rgba8,
};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "msdf_bake")]
#[command(about = "Bake a multi-channel signed distance field from a PNG alpha mask")]
struct Cli {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// JSON file with baking parameters; flags given on the command line win.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    threshold: Option<f32>,
    #[arg(long)]
    max_distance: Option<f32>,
    #[arg(long)]
    tile_size: Option<usize>,
    #[arg(long)]
    stitch_eps: Option<f32>,
    /// Upscale factor for the segment overlay.
    #[arg(long, default_value_t = 4)]
    overlay_scale: u32,
    #[arg(long, default_value_t = false)]
    no_overlay: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct BakeParams {
    threshold: f32,
    max_distance: f32,
    tile_size: usize,
    stitch_eps: f32,
}

impl Default for BakeParams {
    fn default() -> Self {
        let cfg = BakeConfig::default();
        Self {
            threshold: cfg.threshold,
            max_distance: cfg.max_distance,
            tile_size: cfg.tile_size,
            stitch_eps: cfg.stitch_eps,
        }
    }
}

impl From<&BakeParams> for BakeConfig {
    fn from(p: &BakeParams) -> Self {
        BakeConfig {
            threshold: p.threshold,
            max_distance: p.max_distance,
            tile_size: p.tile_size,
            stitch_eps: p.stitch_eps,
        }
    }
}

#[derive(Serialize)]
struct SegmentDto {
    a: [f32; 2],
    b: [f32; 2],
    channel: &'static str,
}

#[derive(Serialize)]
struct Meta {
    input: String,
    width: usize,
    height: usize,
    params: BakeParams,
    contours: usize,
    segments: usize,
    bake_ms: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = resolve_params(&cli)?;
    let cfg = BakeConfig::from(&params);

    let rgba = load_input_rgba8(&cli.input)?;
    fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output dir {}", cli.out.display()))?;

    let t0 = Instant::now();
    let out = bake_rgba8(&rgba.as_view(), &cfg)
        .with_context(|| format!("baking {}", cli.input.display()))?;
    let bake_ms = t0.elapsed().as_secs_f64() * 1e3;

    let stem = cli
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");

    let msdf_path = cli.out.join(format!("{stem}_msdf.png"));
    save_msdf(&msdf_path, &out)?;
    write_json(
        cli.out.join("segments.json"),
        &out.segments.iter().map(segment_dto).collect::<Vec<_>>(),
    )?;

    if !cli.no_overlay {
        let overlay = render_segment_overlay(&rgba, &out.segments, cli.overlay_scale)?;
        let overlay_path = cli.out.join(format!("{stem}_overlay.png"));
        overlay
            .save(&overlay_path)
            .with_context(|| format!("writing overlay {}", overlay_path.display()))?;
    }

    write_json(
        cli.out.join("meta.json"),
        &Meta {
            input: cli.input.display().to_string(),
            width: rgba.width(),
            height: rgba.height(),
            params,
            contours: out.contours,
            segments: out.segments.len(),
            bake_ms,
        },
    )?;

    info!(
        "wrote {} ({} contours, {} segments, {:.2} ms)",
        msdf_path.display(),
        out.contours,
        out.segments.len(),
        bake_ms
    );
    Ok(())
}

fn resolve_params(cli: &Cli) -> Result<BakeParams> {
    let mut params = match &cli.config {
        Some(path) => read_json::<BakeParams>(path)?,
        None => BakeParams::default(),
    };

    if let Some(v) = cli.threshold {
        params.threshold = v;
    }
    if let Some(v) = cli.max_distance {
        params.max_distance = v;
    }
    if let Some(v) = cli.tile_size {
        params.tile_size = v;
    }
    if let Some(v) = cli.stitch_eps {
        params.stitch_eps = v;
    }

    BakeConfig::from(&params)
        .validate()
        .context("invalid baking parameters")?;
    Ok(params)
}

fn load_input_rgba8(path: &Path) -> Result<Image<[u8; 4]>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let data = rgba.pixels().map(|p| p.0).collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn save_msdf(path: &Path, out: &BakeOutput) -> Result<()> {
    let q = quantize_rgba8(&out.pixels);
    let raw = q.data().iter().flatten().copied().collect();
    let img = RgbaImage::from_raw(q.width() as u32, q.height() as u32, raw)
        .context("constructing RgbaImage from raw bytes")?;
    img.save(path)
        .with_context(|| format!("saving msdf {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn segment_dto(s: &ColoredSegment) -> SegmentDto {
    SegmentDto {
        a: [s.seg.a.x, s.seg.a.y],
        b: [s.seg.b.x, s.seg.b.y],
        channel: channel_name(s.color),
    }
}

fn channel_name(c: EdgeColor) -> &'static str {
    match c {
        EdgeColor::R => "r",
        EdgeColor::G => "g",
        EdgeColor::B => "b",
    }
}

fn channel_rgb(c: EdgeColor) -> Rgb<u8> {
    match c {
        EdgeColor::R => Rgb([255, 48, 48]),
        EdgeColor::G => Rgb([48, 220, 48]),
        EdgeColor::B => Rgb([64, 96, 255]),
    }
}

/// Draws the input alpha as grey, upscaled, with every segment in its
/// channel color. Image rows run along +y, so the picture is flipped
/// relative to a y-up viewer.
fn render_segment_overlay(
    input: &Image<[u8; 4]>,
    segments: &[ColoredSegment],
    scale: u32,
) -> Result<RgbImage> {
    let (w, h) = overlay_size(input.width(), input.height(), scale)?;
    let mut rgb = RgbImage::new(w, h);

    for (x, y, px) in rgb.enumerate_pixels_mut() {
        let a = input
            .get((x / scale) as usize, (y / scale) as usize)
            .map_or(0, |p| p[3] / 2);
        *px = Rgb([a, a, a]);
    }

    let s = scale as f32;
    for cs in segments {
        let (a, b) = (cs.seg.a, cs.seg.b);
        let steps = ((cs.seg.length() * s).ceil() as usize).max(1);
        let color = channel_rgb(cs.color);
        for i in 0..=steps {
            let p = a.lerp(b, i as f32 / steps as f32);
            put_pixel_checked(&mut rgb, p.x * s, p.y * s, color);
        }
    }

    Ok(rgb)
}

fn overlay_size(width: usize, height: usize, scale: u32) -> Result<(u32, u32)> {
    if scale == 0 {
        bail!("--overlay-scale must be at least 1");
    }
    let scaled = |n: usize| {
        u32::try_from(n)
            .ok()
            .and_then(|n| n.checked_mul(scale))
            .with_context(|| format!("overlay side {n} x {scale} does not fit in u32"))
    };
    Ok((scaled(width)?, scaled(height)?))
}

fn put_pixel_checked(img: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    let (xi, yi) = (x.floor() as i64, y.floor() as i64);
    if xi < 0 || yi < 0 || xi >= img.width() as i64 || yi >= img.height() as i64 {
        return;
    }
    img.put_pixel(xi as u32, yi as u32, color);
}
