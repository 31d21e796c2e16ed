//! Visual crop approximated with Motion zoom and recentring.
//!
//! No crop mask is applied: the clip is scaled until the remaining window
//! fills the frame, then shifted so that window sits in the frame center.

use serde::{Deserialize, Serialize};

use cutline_timeline_model::{
    ClipId, CoordinateSpace, Point2D, PropertyValue, TimelineHost, POSITION_PROPERTY,
    SCALE_PROPERTY,
};

use crate::error::{EditError, EditResult};
use crate::outcome::Summary;
use crate::target::resolve_motion_target;
use crate::transform_space::TransformSpace;

/// Edge crop, in percent of the frame on each side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CropParams {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl CropParams {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Every edge limited to `[0, 100]`; non-finite edges count as `0`.
    pub fn clamped(&self) -> Self {
        let c = |v: f64| if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 };
        Self::new(c(self.left), c(self.right), c(self.top), c(self.bottom))
    }

    /// Fraction of the frame left visible on each axis.
    pub fn visible_fraction(&self) -> (f64, f64) {
        let p = self.clamped();
        (
            1.0 - (p.left + p.right) / 100.0,
            1.0 - (p.top + p.bottom) / 100.0,
        )
    }
}

/// Scale and fractional recentring offset for a crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    pub crop_x: f64,
    pub crop_y: f64,
    pub scale_pct: f64,
    /// Offset as fractions of the frame, positive right/down.
    pub nx: f64,
    pub ny: f64,
}

/// Plan a crop, failing when nothing of the frame would remain.
pub fn plan_crop(params: &CropParams) -> EditResult<CropPlan> {
    let p = params.clamped();
    let (crop_x, crop_y) = p.visible_fraction();
    if crop_x <= 0.0 || crop_y <= 0.0 {
        return Err(EditError::InvalidCropParameters { crop_x, crop_y });
    }
    Ok(CropPlan {
        crop_x,
        crop_y,
        scale_pct: (100.0 / crop_x).max(100.0 / crop_y),
        nx: (p.right - p.left) / (2.0 * 100.0 * crop_x),
        ny: (p.bottom - p.top) / (2.0 * 100.0 * crop_y),
    })
}

/// Result of `crop_clip`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropReport {
    pub clip: ClipId,
    pub applied: CropParams,
    pub crop_x: f64,
    pub crop_y: f64,
    pub scale_before: f64,
    pub scale_pct: f64,
    pub position_space: CoordinateSpace,
    pub position_before: Point2D,
    pub position_after: Point2D,
}

impl Summary for CropReport {
    fn summary(&self) -> String {
        format!(
            "Visual crop applied via Motion: scale {:.1}%, position ({:.3}, {:.3})",
            self.scale_pct, self.position_after.x, self.position_after.y
        )
    }

    fn changed(&self) -> bool {
        true
    }
}

/// Approximate cropping video clip `clip_index` on track `track_index` by
/// zooming in and recentring on the uncropped window.
///
/// The recentring offset is added in the Position's own space: frame
/// fractions for normalized positions, pixels otherwise.
pub fn crop_clip(
    host: &mut dyn TimelineHost,
    track_index: usize,
    clip_index: usize,
    params: &CropParams,
) -> EditResult<CropReport> {
    if !host.has_active_sequence() {
        return Err(EditError::NoActiveSequence);
    }
    let plan = plan_crop(params)?;
    let target = resolve_motion_target(&*host, track_index, clip_index)?;
    let frame = host.frame_size().ok_or(EditError::FrameSizeUnavailable)?;
    let id = target.clip.id;

    let before = target
        .position
        .map(|(x, y)| Point2D::new(x, y))
        .unwrap_or_else(|| frame.center());
    let space = TransformSpace::resolve(host.position_space_hint(id), before, frame);
    let (ox, oy) = space.offset_from_fraction(plan.nx, plan.ny);
    let after = before.offset(ox, oy);

    host.write_property(id, SCALE_PROPERTY, PropertyValue::Scalar(plan.scale_pct))?;
    host.write_property(id, POSITION_PROPERTY, PropertyValue::Pair(after.x, after.y))?;

    tracing::info!(
        clip = %id,
        crop_x = plan.crop_x,
        crop_y = plan.crop_y,
        scale_pct = plan.scale_pct,
        space = %space.space,
        "Cropped clip"
    );

    Ok(CropReport {
        clip: id,
        applied: params.clamped(),
        crop_x: plan.crop_x,
        crop_y: plan.crop_y,
        scale_before: target.scale,
        scale_pct: plan.scale_pct,
        position_space: space.space,
        position_before: before,
        position_after: after,
    })
}
