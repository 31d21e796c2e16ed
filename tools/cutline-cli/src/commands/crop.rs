//! Approximate an edge crop on a video clip.

use cutline_edit_core::{crop_clip, CropParams};

use super::Target;

pub fn run(
    target: Target,
    track: usize,
    clip: usize,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
) -> anyhow::Result<()> {
    let mut host = target.load_host()?;

    let params = CropParams::new(left, right, top, bottom);
    let result = crop_clip(&mut host, track, clip, &params);
    target.finish(host, result)
}
