//! Anchor-based reframing of a video clip inside the sequence frame.
//!
//! The clip is scaled up (if needed) until it covers the frame, then panned
//! toward one of nine anchors by at most the amount that keeps the frame
//! covered.

use serde::{Deserialize, Serialize};

use cutline_timeline_model::{
    Anchor9, ClipId, CoordinateSpace, FrameSize, PanBounds, Point2D, PropertyValue, TimelineHost,
    POSITION_PROPERTY, SCALE_PROPERTY,
};

use crate::error::{EditError, EditResult};
use crate::outcome::Summary;
use crate::source_probe::probe_source_size;
use crate::target::resolve_motion_target;
use crate::transform_space::TransformSpace;

/// Reframe request. Bias percentages push the anchor offset further by a
/// fraction of the safe pan range (`100` = one full range).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReframeOptions {
    pub anchor: Anchor9,
    pub x_bias_pct: f64,
    pub y_bias_pct: f64,
    /// Raise the scale to the cover scale when it is below it.
    pub ensure_cover: bool,
    /// Keep the pan within the safe range (and normalized positions in `[0, 1]`).
    pub clamp_to_fill: bool,
}

impl Default for ReframeOptions {
    fn default() -> Self {
        Self {
            anchor: Anchor9::Center,
            x_bias_pct: 0.0,
            y_bias_pct: 0.0,
            ensure_cover: true,
            clamp_to_fill: true,
        }
    }
}

/// Source dimensions used for the computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceSize {
    pub width: u32,
    pub height: u32,
    /// `false` when the sequence size was assumed.
    pub detected: bool,
}

/// Result of `reframe_to_anchor9`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReframeReport {
    pub clip: ClipId,
    pub sequence: FrameSize,
    pub source: SourceSize,
    pub scale_pct: f64,
    pub scale_raised: bool,
    pub position_space: CoordinateSpace,
    pub max_safe_pan_px: PanBounds,
    pub max_safe_pan_norm: PanBounds,
    pub position_before: Point2D,
    pub position_after: Point2D,
    pub anchor: Anchor9,
    pub bias_pct: Point2D,
    pub ensured_cover: bool,
}

impl Summary for ReframeReport {
    fn summary(&self) -> String {
        format!(
            "Reframed to {} at {:.1}% ({} position)",
            self.anchor, self.scale_pct, self.position_space
        )
    }

    fn changed(&self) -> bool {
        true
    }
}

/// Smallest scale (percent) at which `source` covers `frame` on both axes.
pub fn cover_scale_pct(frame: FrameSize, source: FrameSize) -> f64 {
    let sx = frame.width as f64 / source.width as f64;
    let sy = frame.height as f64 / source.height as f64;
    sx.max(sy) * 100.0
}

/// Largest pan per axis that keeps `source` at `scale_pct` covering `frame`.
pub fn max_safe_pan(frame: FrameSize, source: FrameSize, scale_pct: f64) -> PanBounds {
    let disp_w = scale_pct / 100.0 * source.width as f64;
    let disp_h = scale_pct / 100.0 * source.height as f64;
    PanBounds::new(
        ((disp_w - frame.width as f64) / 2.0).max(0.0),
        ((disp_h - frame.height as f64) / 2.0).max(0.0),
    )
}

/// Pixel offset from the frame center for `anchor` plus bias, clamped to
/// `bounds` when `clamp` is set.
pub fn anchor_offset(
    anchor: Anchor9,
    bounds: PanBounds,
    x_bias_pct: f64,
    y_bias_pct: f64,
    clamp: bool,
) -> (f64, f64) {
    let (sx, sy) = anchor.axis_signs();
    let dx = sx * bounds.x + x_bias_pct / 100.0 * bounds.x;
    let dy = sy * bounds.y + y_bias_pct / 100.0 * bounds.y;
    if clamp {
        bounds.clamp(dx, dy)
    } else {
        (dx, dy)
    }
}

/// Reframe video clip `clip_index` on track `track_index` toward `opts.anchor`.
///
/// Scale is written only when raised to the cover scale; Position is always
/// written, in the space the clip already uses.
pub fn reframe_to_anchor9(
    host: &mut dyn TimelineHost,
    track_index: usize,
    clip_index: usize,
    opts: &ReframeOptions,
) -> EditResult<ReframeReport> {
    if !host.has_active_sequence() {
        return Err(EditError::NoActiveSequence);
    }
    let frame = host.frame_size().ok_or(EditError::FrameSizeUnavailable)?;
    let target = resolve_motion_target(&*host, track_index, clip_index)?;
    let id = target.clip.id;

    let before = target
        .position
        .map(|(x, y)| Point2D::new(x, y))
        .unwrap_or_else(|| frame.center());
    let space = TransformSpace::resolve(host.position_space_hint(id), before, frame);

    let detected = probe_source_size(&host.source_descriptor(id)?);
    let source_size = detected.unwrap_or(frame);

    let mut scale = target.scale;
    let mut scale_raised = false;
    if opts.ensure_cover {
        let cover = cover_scale_pct(frame, source_size);
        if scale < cover {
            scale = cover;
            scale_raised = true;
        }
    }

    let bounds = max_safe_pan(frame, source_size, scale);
    let (dx, dy) = anchor_offset(
        opts.anchor,
        bounds,
        opts.x_bias_pct,
        opts.y_bias_pct,
        opts.clamp_to_fill,
    );

    let (ox, oy) = space.offset_from_pixels(dx, dy);
    let mut after = space.center().offset(ox, oy);
    if opts.clamp_to_fill && space.space == CoordinateSpace::Normalized {
        after = Point2D::new(after.x.clamp(0.0, 1.0), after.y.clamp(0.0, 1.0));
    }

    if scale_raised {
        host.write_property(id, SCALE_PROPERTY, PropertyValue::Scalar(scale))?;
    }
    host.write_property(id, POSITION_PROPERTY, PropertyValue::Pair(after.x, after.y))?;

    let norm_bounds = TransformSpace::new(CoordinateSpace::Normalized, frame)
        .offset_from_pixels(bounds.x, bounds.y);

    tracing::info!(
        clip = %id,
        anchor = %opts.anchor,
        scale_pct = scale,
        scale_raised,
        space = %space.space,
        max_pan_x = bounds.x,
        max_pan_y = bounds.y,
        x = after.x,
        y = after.y,
        "Reframed clip"
    );

    Ok(ReframeReport {
        clip: id,
        sequence: frame,
        source: SourceSize {
            width: source_size.width,
            height: source_size.height,
            detected: detected.is_some(),
        },
        scale_pct: scale,
        scale_raised,
        position_space: space.space,
        max_safe_pan_px: bounds,
        max_safe_pan_norm: PanBounds::new(norm_bounds.0, norm_bounds.1),
        position_before: before,
        position_after: after,
        anchor: opts.anchor,
        bias_pct: Point2D::new(opts.x_bias_pct, opts.y_bias_pct),
        ensured_cover: opts.ensure_cover,
    })
}
