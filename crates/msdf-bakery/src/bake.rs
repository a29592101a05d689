use log::{debug, info};
use mb_contour::{ExtractConfig, extract_segments, stitch_contours_with_stats};
use mb_core::{Image, ImageView, alpha_from_rgba8};
use mb_field::{
    ChannelField, ColoredSegment, MsdfPixel, TileIndex, apply_sign, color_edges,
    compute_channel_field, encode_rgba,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BakeConfig {
    /// Alpha at or above this value is inside. Must lie in `(0, 1)`.
    pub threshold: f32,
    /// Search radius and normalization range, in pixels.
    pub max_distance: f32,
    /// Side of a spatial index tile in pixels; must be `>= max_distance`.
    pub tile_size: usize,
    /// Quantization step for boundary endpoints.
    pub stitch_eps: f32,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            max_distance: 16.0,
            tile_size: 16,
            stitch_eps: 0.01,
        }
    }
}

impl BakeConfig {
    pub fn validate(&self) -> Result<(), BakeError> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(BakeError::InvalidThreshold(self.threshold));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(BakeError::InvalidMaxDistance(self.max_distance));
        }
        if self.tile_size == 0 {
            return Err(BakeError::ZeroTileSize);
        }
        if (self.tile_size as f32) < self.max_distance {
            return Err(BakeError::TileSmallerThanRadius {
                tile_size: self.tile_size,
                max_distance: self.max_distance,
            });
        }
        if !self.stitch_eps.is_finite() || self.stitch_eps <= 0.0 {
            return Err(BakeError::InvalidStitchEps(self.stitch_eps));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BakeError {
    #[error("image must be non-empty, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },
    #[error("threshold must lie in (0, 1), got {0}")]
    InvalidThreshold(f32),
    #[error("max distance must be finite and positive, got {0}")]
    InvalidMaxDistance(f32),
    #[error("tile size must be positive")]
    ZeroTileSize,
    #[error("tile size {tile_size} is smaller than max distance {max_distance}")]
    TileSmallerThanRadius { tile_size: usize, max_distance: f32 },
    #[error("stitch epsilon must be finite and positive, got {0}")]
    InvalidStitchEps(f32),
    #[error("stitch epsilon {stitch_eps} is too fine to quantize a {extent} pixel extent")]
    StitchEpsTooFine { stitch_eps: f32, extent: usize },
    #[error(transparent)]
    Core(#[from] mb_core::Error),
}

/// Receives the colored edges of a bake, e.g. for a debug overlay.
pub trait SegmentSink {
    fn receive(&mut self, segments: &[ColoredSegment]);
}

impl<F: FnMut(&[ColoredSegment])> SegmentSink for F {
    fn receive(&mut self, segments: &[ColoredSegment]) {
        self(segments)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BakeOutput {
    /// Normalized RGBA, alpha fixed at `1`.
    pub pixels: Image<MsdfPixel>,
    /// Signed distances in pixels, negative inside.
    pub field: ChannelField,
    /// Colored edges in contour order.
    pub segments: Vec<ColoredSegment>,
    pub contours: usize,
}

/// Bakes an MSDF from normalized alpha samples.
///
/// Parameters are validated before any work is done. Broken or degenerate
/// contours are dropped silently apart from `debug` logs.
pub fn bake(alpha: &ImageView<'_, f32>, cfg: &BakeConfig) -> Result<BakeOutput, BakeError> {
    cfg.validate()?;

    let (w, h) = (alpha.width(), alpha.height());
    if w == 0 || h == 0 {
        return Err(BakeError::EmptyImage {
            width: w,
            height: h,
        });
    }
    let extent = w.max(h);
    if (extent as f32 + 1.0) / cfg.stitch_eps >= i64::MAX as f32 {
        return Err(BakeError::StitchEpsTooFine {
            stitch_eps: cfg.stitch_eps,
            extent,
        });
    }

    let extract_cfg = ExtractConfig {
        threshold: cfg.threshold,
        snap_eps: cfg.stitch_eps,
    };
    let raw = extract_segments(alpha, &extract_cfg);
    debug!("marching squares: {} boundary segments", raw.len());

    let (mut contours, stats) = stitch_contours_with_stats(&raw, cfg.stitch_eps);
    let segments = color_edges(&mut contours);
    debug!(
        "{} closed contours, {} colored edges ({} open dropped)",
        contours.len(),
        segments.len(),
        stats.open
    );

    let index = TileIndex::build(w, h, cfg.tile_size, &segments, cfg.max_distance)?;
    let mut field = compute_channel_field(w, h, &segments, &index, cfg.max_distance);
    apply_sign(&mut field, alpha, cfg.threshold)?;
    let pixels = encode_rgba(&field, cfg.max_distance);

    info!(
        "baked {}x{} msdf: {} contours, {} edges, {}x{} tiles",
        w,
        h,
        contours.len(),
        segments.len(),
        index.tiles_x(),
        index.tiles_y()
    );

    Ok(BakeOutput {
        pixels,
        field,
        segments,
        contours: contours.len(),
    })
}

/// Like [`bake`], additionally handing the colored edges to `sink`.
pub fn bake_with_sink(
    alpha: &ImageView<'_, f32>,
    cfg: &BakeConfig,
    sink: &mut impl SegmentSink,
) -> Result<BakeOutput, BakeError> {
    let out = bake(alpha, cfg)?;
    sink.receive(&out.segments);
    Ok(out)
}

/// Bakes from RGBA8 pixels using their alpha byte.
pub fn bake_rgba8(img: &ImageView<'_, [u8; 4]>, cfg: &BakeConfig) -> Result<BakeOutput, BakeError> {
    let alpha = alpha_from_rgba8(img);
    bake(&alpha.as_view(), cfg)
}
