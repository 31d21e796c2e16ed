//! Frame geometry for reframing: sizes, points, anchors, coordinate spaces.
//!
//! Pixel coordinates put `(0, 0)` at the top-left of the output frame with
//! `y` growing downwards; normalized coordinates map the same frame to
//! `[0.0, 1.0]` on both axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width and height of a frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Frame center in pixel space.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A 2D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Point2D {
        Point2D::new(self.x + dx, self.y + dy)
    }
}

/// Largest pan offset per axis that keeps the scaled media covering the frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanBounds {
    pub x: f64,
    pub y: f64,
}

impl PanBounds {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp an offset into `[-x, x] × [-y, y]`.
    pub fn clamp(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx.clamp(-self.x, self.x), dy.clamp(-self.y, self.y))
    }
}

/// How a position value is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// Absolute pixels in the output frame.
    #[serde(alias = "pixel")]
    Pixels,
    /// Fractions of the output frame in `[0, 1]`.
    Normalized,
}

impl fmt::Display for CoordinateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSpace::Pixels => f.write_str("pixels"),
            CoordinateSpace::Normalized => f.write_str("normalized"),
        }
    }
}

/// One of the nine positions of a 3×3 reframe grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor9 {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor9 {
    pub const ALL: [Anchor9; 9] = [
        Anchor9::TopLeft,
        Anchor9::TopCenter,
        Anchor9::TopRight,
        Anchor9::CenterLeft,
        Anchor9::Center,
        Anchor9::CenterRight,
        Anchor9::BottomLeft,
        Anchor9::BottomCenter,
        Anchor9::BottomRight,
    ];

    /// Direction of the anchor on each axis: `-1` left/top, `0` center,
    /// `1` right/bottom.
    pub fn axis_signs(&self) -> (f64, f64) {
        match self {
            Anchor9::TopLeft => (-1.0, -1.0),
            Anchor9::TopCenter => (0.0, -1.0),
            Anchor9::TopRight => (1.0, -1.0),
            Anchor9::CenterLeft => (-1.0, 0.0),
            Anchor9::Center => (0.0, 0.0),
            Anchor9::CenterRight => (1.0, 0.0),
            Anchor9::BottomLeft => (-1.0, 1.0),
            Anchor9::BottomCenter => (0.0, 1.0),
            Anchor9::BottomRight => (1.0, 1.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor9::TopLeft => "top-left",
            Anchor9::TopCenter => "top-center",
            Anchor9::TopRight => "top-right",
            Anchor9::CenterLeft => "center-left",
            Anchor9::Center => "center",
            Anchor9::CenterRight => "center-right",
            Anchor9::BottomLeft => "bottom-left",
            Anchor9::BottomCenter => "bottom-center",
            Anchor9::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor9 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor9 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Anchor9::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| format!("unknown anchor '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_center() {
        let frame = FrameSize::new(1920, 1080);
        assert_eq!(frame.center(), Point2D::new(960.0, 540.0));
        assert!(frame.is_valid());
        assert!(!FrameSize::new(0, 1080).is_valid());
    }

    #[test]
    fn test_anchor_parse_and_display() {
        for anchor in Anchor9::ALL {
            assert_eq!(anchor.to_string().parse::<Anchor9>().unwrap(), anchor);
        }
        assert_eq!("Bottom_Right".parse::<Anchor9>().unwrap(), Anchor9::BottomRight);
        assert!("middle".parse::<Anchor9>().is_err());
    }

    #[test]
    fn test_anchor_serde_is_kebab_case() {
        let json = serde_json::to_string(&Anchor9::CenterLeft).unwrap();
        assert_eq!(json, "\"center-left\"");
    }

    #[test]
    fn test_anchor_grid_covers_every_sign_pair() {
        let mut pairs: Vec<(i32, i32)> = Anchor9::ALL
            .iter()
            .map(|a| {
                let (x, y) = a.axis_signs();
                (x as i32, y as i32)
            })
            .collect();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), 9);
    }

    #[test]
    fn test_pan_bounds_clamp() {
        let bounds = PanBounds::new(10.0, 0.0);
        assert_eq!(bounds.clamp(25.0, 3.0), (10.0, 0.0));
        assert_eq!(bounds.clamp(-4.0, -3.0), (-4.0, 0.0));
    }

    #[test]
    fn test_point2d_offset() {
        let p = Point2D::new(960.0, 540.0).offset(-10.0, 20.0);
        assert_eq!(p, Point2D::new(950.0, 560.0));
    }
}
