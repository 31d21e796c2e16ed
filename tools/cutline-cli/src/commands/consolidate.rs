//! Ripple-remove every gap in a sequence.

use cutline_edit_core::ripple_remove_all_gaps;

use super::Target;

pub fn run(target: Target) -> anyhow::Result<()> {
    let mut host = target.load_host()?;
    tracing::info!(sequence = %target.sequence.display(), "Removing all gaps");

    let result = ripple_remove_all_gaps(&mut host);
    target.finish(host, result)
}
