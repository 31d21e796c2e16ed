//! Reframe a video clip toward one of nine anchors.

use cutline_edit_core::{reframe_to_anchor9, ReframeOptions};
use cutline_timeline_model::Anchor9;

use super::Target;

/// Reframe options as given on the command line.
pub struct ReframeArgs {
    pub anchor: String,
    pub x_bias: f64,
    pub y_bias: f64,
    pub ensure_cover: bool,
    pub clamp_to_fill: bool,
}

impl ReframeArgs {
    fn to_options(&self) -> anyhow::Result<ReframeOptions> {
        let anchor: Anchor9 = self.anchor.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(ReframeOptions {
            anchor,
            x_bias_pct: self.x_bias,
            y_bias_pct: self.y_bias,
            ensure_cover: self.ensure_cover,
            clamp_to_fill: self.clamp_to_fill,
        })
    }
}

pub fn run(target: Target, track: usize, clip: usize, args: ReframeArgs) -> anyhow::Result<()> {
    let opts = args.to_options()?;
    let mut host = target.load_host()?;

    let result = reframe_to_anchor9(&mut host, track, clip, &opts);
    target.finish(host, result)
}
