mod analyze;
mod catalog;
mod frames;
mod locate;
mod render;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rtcm::catalog::MsgType;
use rtcm::ScanOpts;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Caster whose source table lists the mount points of the default correction network.
const DEFAULT_CASTER: &str = "http://ntrip.data.gnss.ga.gov.au:2101";

#[derive(Debug, Clone)]
pub enum Format {
    Json,
    Text,
}

impl clap::ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Text => Some(clap::builder::PossibleValue::new("text")),
        }
    }
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose why an RTK engine fed by a captured RTCM3 stream does not converge.
    ///
    /// Reports which message types the capture contains and whether the reference
    /// station coordinates (1005/1006) and MSM observables required for RTK are
    /// present, followed by recommendations.
    Analyze {
        /// Input capture file.
        ///
        /// If not provided, the most recently modified
        /// <DATA_DIR>/ins401_log_*/rtcm_base_*.bin is used.
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,

        /// Only accept frames with a valid CRC-24Q.
        ///
        /// By default the CRC is not checked, so noise that happens to look like a
        /// frame header is counted as a frame.
        #[arg(long, action)]
        strict_crc: bool,

        /// Directory searched for captures when no input is given.
        #[arg(short, long, default_value = "data", value_name = "path")]
        data_dir: PathBuf,

        /// NTRIP caster to point to when the correction source must change.
        #[arg(long, default_value = DEFAULT_CASTER, value_name = "url")]
        caster: String,

        /// NTRIP mount point the capture was recorded from.
        #[arg(short, long, value_name = "name")]
        mount_point: Option<String>,
    },
    /// List each frame found in a capture.
    Frames {
        /// Input capture file.
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,

        /// Only accept frames with a valid CRC-24Q.
        #[arg(long, action)]
        strict_crc: bool,
    },
    /// View the RTCM3 message catalog.
    Catalog {
        /// Message type to look up.
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(0..=4095))]
        msg_type: Option<MsgType>,
    },
}

const USAGE_HINT: &str = "Usage:
  rtcm analyze [INPUT]

Example:
  rtcm analyze data/ins401_log_20251006_152618/rtcm_base_2025_10_06_15_26_18.bin";

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("RTCM_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Analyze {
            input,
            format,
            strict_crc,
            data_dir,
            caster,
            mount_point,
        } => {
            let input = match input {
                Some(input) => input.clone(),
                None => match locate::latest_capture(data_dir)? {
                    Some(path) => {
                        info!("using latest capture {path:?}");
                        path
                    }
                    None => bail!("no RTCM capture found in {data_dir:?}\n\n{USAGE_HINT}"),
                },
            };
            let source = analyze::Source {
                caster: caster.clone(),
                mount_point: mount_point.clone(),
            };
            analyze::analyze(
                &input,
                format,
                ScanOpts::default().with_crc(*strict_crc),
                &source,
            )
        }
        Commands::Frames {
            input,
            format,
            strict_crc,
        } => frames::frames(input, format, ScanOpts::default().with_crc(*strict_crc)),
        Commands::Catalog { msg_type } => catalog::catalog_info(*msg_type),
    }
}
