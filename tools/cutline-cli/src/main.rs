//! Cutline CLI — Command-line interface for timeline gap removal and reframing.
//!
//! Every command works on a sequence snapshot file (`sequence.json`):
//!   cutline info <SEQUENCE>                       Show sequence information
//!   cutline gaps <SEQUENCE>                       List gaps per track
//!   cutline consolidate <SEQUENCE>                Ripple-remove every gap
//!   cutline close-gap <SEQUENCE> <TRACK> <CLIP>   Close the gap after one clip
//!   cutline reframe <SEQUENCE> <TRACK> <CLIP>     Reframe a clip to an anchor
//!   cutline crop <SEQUENCE> <TRACK> <CLIP>        Approximate an edge crop
//!   cutline init-config                           Write the effective config
//!
//! Editing commands print a JSON outcome and write the edited snapshot back
//! unless `--dry-run` is given.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cutline_common::config::AppConfig;
use cutline_timeline_model::TrackKind;

mod commands;

#[derive(Parser)]
#[command(
    name = "cutline",
    about = "Ripple gap removal and anchor reframing for editor sequences",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/cutline/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sequence information
    Info {
        /// Path to the sequence snapshot
        sequence: PathBuf,
    },

    /// List gaps between neighbouring clips, track by track
    Gaps {
        /// Path to the sequence snapshot
        sequence: PathBuf,

        /// Track kind: video|audio
        #[arg(long, default_value = "video")]
        track_kind: TrackKind,

        /// Smallest gap to report (seconds); defaults to the configured value
        #[arg(long)]
        min_gap: Option<f64>,
    },

    /// Remove every gap in the sequence, keeping all tracks in sync
    Consolidate {
        /// Path to the sequence snapshot
        sequence: PathBuf,

        /// Write the edited snapshot here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the outcome without writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// Close the gap after one clip, leaving one frame
    CloseGap {
        /// Path to the sequence snapshot
        sequence: PathBuf,

        /// Zero-based track index
        track: usize,

        /// Zero-based clip index on the track
        clip: usize,

        /// Track kind: video|audio
        #[arg(long, default_value = "video")]
        track_kind: TrackKind,

        /// Write the edited snapshot here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the outcome without writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// Scale a video clip to cover the frame and pan it toward an anchor
    Reframe {
        /// Path to the sequence snapshot
        sequence: PathBuf,

        /// Zero-based video track index
        track: usize,

        /// Zero-based clip index on the track
        clip: usize,

        /// Anchor: top-left|top-center|...|bottom-right; defaults to the configured value
        #[arg(long)]
        anchor: Option<String>,

        /// Horizontal bias in percent of the safe pan range
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x_bias: f64,

        /// Vertical bias in percent of the safe pan range
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y_bias: f64,

        /// Do not raise the scale to cover the frame
        #[arg(long)]
        no_cover: bool,

        /// Allow pans beyond the safe range
        #[arg(long)]
        no_clamp: bool,

        /// Write the edited snapshot here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the outcome without writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// Approximate an edge crop by zooming in and recentring
    Crop {
        /// Path to the sequence snapshot
        sequence: PathBuf,

        /// Zero-based video track index
        track: usize,

        /// Zero-based clip index on the track
        clip: usize,

        /// Percent cropped from the left edge
        #[arg(long, default_value = "0")]
        left: f64,

        /// Percent cropped from the right edge
        #[arg(long, default_value = "0")]
        right: f64,

        /// Percent cropped from the top edge
        #[arg(long, default_value = "0")]
        top: f64,

        /// Percent cropped from the bottom edge
        #[arg(long, default_value = "0")]
        bottom: f64,

        /// Write the edited snapshot here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the outcome without writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the effective configuration as JSON
    InitConfig {
        /// Destination (defaults to $XDG_CONFIG_HOME/cutline/config.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    cutline_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Info { sequence } => commands::info::run(sequence),
        Commands::Gaps {
            sequence,
            track_kind,
            min_gap,
        } => commands::gaps::run(
            sequence,
            track_kind,
            min_gap.unwrap_or(config.editing.min_track_gap_secs),
        ),
        Commands::Consolidate {
            sequence,
            output,
            dry_run,
        } => commands::consolidate::run(commands::Target::new(sequence, output, dry_run)),
        Commands::CloseGap {
            sequence,
            track,
            clip,
            track_kind,
            output,
            dry_run,
        } => commands::close_gap::run(
            commands::Target::new(sequence, output, dry_run),
            track,
            clip,
            track_kind,
        ),
        Commands::Reframe {
            sequence,
            track,
            clip,
            anchor,
            x_bias,
            y_bias,
            no_cover,
            no_clamp,
            output,
            dry_run,
        } => commands::reframe::run(
            commands::Target::new(sequence, output, dry_run),
            track,
            clip,
            commands::reframe::ReframeArgs {
                anchor: anchor.unwrap_or_else(|| config.editing.anchor.clone()),
                x_bias,
                y_bias,
                ensure_cover: config.editing.ensure_cover && !no_cover,
                clamp_to_fill: config.editing.clamp_to_fill && !no_clamp,
            },
        ),
        Commands::Crop {
            sequence,
            track,
            clip,
            left,
            right,
            top,
            bottom,
            output,
            dry_run,
        } => commands::crop::run(
            commands::Target::new(sequence, output, dry_run),
            track,
            clip,
            left,
            right,
            top,
            bottom,
        ),
        Commands::InitConfig { output, force } => {
            commands::init_config::run(&config, output, force)
        }
    }
}
