//! Position coordinate spaces: inference and conversion.
//!
//! A raw Position value can be absolute pixels or a fraction of the frame.
//! Hosts that know which one they store say so through
//! `TimelineHost::position_space_hint`; otherwise the space is guessed from
//! the value itself.

use cutline_timeline_model::{CoordinateSpace, FrameSize, Point2D};

/// Inclusive range on both axes that classifies a raw value as normalized.
pub const NORMALIZED_RANGE: (f64, f64) = (-0.5, 1.5);

/// Guess the space of a raw position value.
///
/// Pixel positions near the origin of very small frames also fall inside
/// `NORMALIZED_RANGE`; prefer a host hint when one exists.
pub fn infer_space(x: f64, y: f64) -> CoordinateSpace {
    let (lo, hi) = NORMALIZED_RANGE;
    let inside = |v: f64| (lo..=hi).contains(&v);
    if inside(x) && inside(y) {
        CoordinateSpace::Normalized
    } else {
        CoordinateSpace::Pixels
    }
}

pub fn pixel_to_normalized(p: Point2D, frame: FrameSize) -> Point2D {
    Point2D::new(p.x / frame.width as f64, p.y / frame.height as f64)
}

pub fn normalized_to_pixel(p: Point2D, frame: FrameSize) -> Point2D {
    Point2D::new(p.x * frame.width as f64, p.y * frame.height as f64)
}

/// A coordinate space bound to the frame it refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSpace {
    pub space: CoordinateSpace,
    pub frame: FrameSize,
}

impl TransformSpace {
    pub fn new(space: CoordinateSpace, frame: FrameSize) -> Self {
        Self { space, frame }
    }

    /// Space of `raw`, with `hint` taking precedence over inference.
    pub fn resolve(hint: Option<CoordinateSpace>, raw: Point2D, frame: FrameSize) -> Self {
        let space = hint.unwrap_or_else(|| infer_space(raw.x, raw.y));
        Self::new(space, frame)
    }

    /// Frame center expressed in this space.
    pub fn center(&self) -> Point2D {
        match self.space {
            CoordinateSpace::Pixels => self.frame.center(),
            CoordinateSpace::Normalized => Point2D::new(0.5, 0.5),
        }
    }

    /// Convert a point in this space to pixels.
    pub fn to_pixels(&self, p: Point2D) -> Point2D {
        match self.space {
            CoordinateSpace::Pixels => p,
            CoordinateSpace::Normalized => normalized_to_pixel(p, self.frame),
        }
    }

    /// Convert a pixel point into this space.
    pub fn from_pixels(&self, p: Point2D) -> Point2D {
        match self.space {
            CoordinateSpace::Pixels => p,
            CoordinateSpace::Normalized => pixel_to_normalized(p, self.frame),
        }
    }

    /// Express a pixel offset in this space.
    pub fn offset_from_pixels(&self, dx: f64, dy: f64) -> (f64, f64) {
        let p = self.from_pixels(Point2D::new(dx, dy));
        (p.x, p.y)
    }

    /// Express an offset given as fractions of the frame in this space.
    pub fn offset_from_fraction(&self, nx: f64, ny: f64) -> (f64, f64) {
        match self.space {
            CoordinateSpace::Pixels => {
                let p = normalized_to_pixel(Point2D::new(nx, ny), self.frame);
                (p.x, p.y)
            }
            CoordinateSpace::Normalized => (nx, ny),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD: FrameSize = FrameSize::new(1920, 1080);

    #[test]
    fn test_infer_space_thresholds() {
        assert_eq!(infer_space(0.5, 0.5), CoordinateSpace::Normalized);
        assert_eq!(infer_space(-0.5, 1.5), CoordinateSpace::Normalized);
        assert_eq!(infer_space(960.0, 540.0), CoordinateSpace::Pixels);
        assert_eq!(infer_space(0.5, 1.6), CoordinateSpace::Pixels);
        // Small-frame pixel coordinates are indistinguishable.
        assert_eq!(infer_space(1.0, 1.0), CoordinateSpace::Normalized);
    }

    #[test]
    fn test_hint_overrides_inference() {
        let ts = TransformSpace::resolve(Some(CoordinateSpace::Pixels), Point2D::new(1.0, 1.0), HD);
        assert_eq!(ts.space, CoordinateSpace::Pixels);
        let ts = TransformSpace::resolve(None, Point2D::new(1.0, 1.0), HD);
        assert_eq!(ts.space, CoordinateSpace::Normalized);
    }

    #[test]
    fn test_centers() {
        assert_eq!(
            TransformSpace::new(CoordinateSpace::Pixels, HD).center(),
            Point2D::new(960.0, 540.0)
        );
        assert_eq!(
            TransformSpace::new(CoordinateSpace::Normalized, HD).center(),
            Point2D::new(0.5, 0.5)
        );
    }

    #[test]
    fn test_conversions() {
        let p = pixel_to_normalized(Point2D::new(480.0, 270.0), HD);
        assert_eq!(p, Point2D::new(0.25, 0.25));
        assert_eq!(normalized_to_pixel(p, HD), Point2D::new(480.0, 270.0));
    }

    #[test]
    fn test_offsets_in_each_space() {
        let px = TransformSpace::new(CoordinateSpace::Pixels, HD);
        let norm = TransformSpace::new(CoordinateSpace::Normalized, HD);

        assert_eq!(px.offset_from_pixels(96.0, -54.0), (96.0, -54.0));
        assert_eq!(norm.offset_from_pixels(96.0, -54.0), (0.05, -0.05));

        assert_eq!(px.offset_from_fraction(0.25, -0.5), (480.0, -540.0));
        assert_eq!(norm.offset_from_fraction(0.25, -0.5), (0.25, -0.5));
    }

    #[test]
    fn test_to_pixels_inverts_from_pixels() {
        let px = TransformSpace::new(CoordinateSpace::Pixels, HD);
        let norm = TransformSpace::new(CoordinateSpace::Normalized, HD);

        assert_eq!(px.to_pixels(Point2D::new(12.0, 34.0)), Point2D::new(12.0, 34.0));
        assert_eq!(norm.to_pixels(Point2D::new(0.25, 0.5)), Point2D::new(480.0, 540.0));

        let p = Point2D::new(1440.0, 270.0);
        assert_eq!(norm.to_pixels(norm.from_pixels(p)), p);
    }
}
