//! pbslice CLI: inspect Xilinx `.bit` files and cut partial bitstreams out
//! of them.
//!
//! `pbslice info` prints container metadata and the bound device model,
//! `pbslice extract` copies a coordinate-addressed region, `pbslice pblock`
//! copies one or more placement blocks across clock regions, and
//! `pbslice devices` lists the known device tables.

#![warn(missing_docs)]

mod devices;
mod extract;
mod info;
mod pipeline;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// pbslice, a partial-bitstream extraction tool.
#[derive(Parser, Debug)]
#[command(name = "pbslice", version, about = "Xilinx partial-bitstream extraction")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `pbslice.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show container metadata and the bound device model.
    Info(InfoArgs),
    /// Extract a region addressed by row,column,word,frame coordinates.
    Extract(ExtractArgs),
    /// Extract one or more pblocks (XaYb:XcYd) across clock regions.
    Pblock(PblockArgs),
    /// List registered device tables, or show one in detail.
    Devices {
        /// Device identifier to show.
        id: Option<String>,
    },
}

/// Arguments for the `pbslice info` subcommand.
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Input `.bit` file.
    pub bitstream: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Device identifier to use instead of the one in the container.
    #[arg(short, long)]
    pub device: Option<String>,
}

/// Arguments for the `pbslice extract` subcommand.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Input `.bit` file.
    pub bitstream: String,

    /// Coordinates, e.g. `0,3:5` or `1,,10:20,0`.
    pub coords: String,

    /// Destination file.
    pub dest: String,

    /// Read block-RAM content frames instead of configuration frames.
    #[arg(long)]
    pub ram: bool,

    /// Device identifier to use instead of the one in the container.
    #[arg(short, long)]
    pub device: Option<String>,

    /// Output format (default: from the destination extension, then config).
    #[arg(short, long, value_enum)]
    pub output_format: Option<PartialFormat>,
}

/// Arguments for the `pbslice pblock` subcommand.
#[derive(Parser, Debug)]
pub struct PblockArgs {
    /// Input `.bit` file.
    pub bitstream: String,

    /// Whitespace-separated pblock list, e.g. `"X3Y5:X8Y12 X0Y60:X2Y70"`.
    pub pblocks: String,

    /// Destination file.
    pub dest: String,

    /// Device identifier to use instead of the one in the container.
    #[arg(short, long)]
    pub device: Option<String>,

    /// Output format (default: from the destination extension, then config).
    #[arg(short, long, value_enum)]
    pub output_format: Option<PartialFormat>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Partial-bitstream file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PartialFormat {
    /// Raw extracted bytes.
    Pbs,
    /// Bytes reversed within each word.
    Rpb,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var("TERM").is_ok_and(|t| t != "dumb"),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Info(ref args) => info::run(args, &global),
        Command::Extract(ref args) => extract::run_extract(args, &global),
        Command::Pblock(ref args) => extract::run_pblock(args, &global),
        Command::Devices { ref id } => devices::run(id.as_deref(), &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_info_default() {
        let cli = Cli::parse_from(["pbslice", "info", "design.bit"]);
        match cli.command {
            Command::Info(ref args) => {
                assert_eq!(args.bitstream, "design.bit");
                assert_eq!(args.format, ReportFormat::Text);
                assert!(args.device.is_none());
            }
            _ => panic!("expected Info command"),
        }
    }

    #[test]
    fn parse_info_json_with_device() {
        let cli = Cli::parse_from([
            "pbslice",
            "info",
            "design.bit",
            "--format",
            "json",
            "--device",
            "7z020clg400",
        ]);
        match cli.command {
            Command::Info(ref args) => {
                assert_eq!(args.format, ReportFormat::Json);
                assert_eq!(args.device.as_deref(), Some("7z020clg400"));
            }
            _ => panic!("expected Info command"),
        }
    }

    #[test]
    fn parse_extract() {
        let cli = Cli::parse_from([
            "pbslice",
            "extract",
            "design.bit",
            "0,3:5",
            "out.rpb",
            "--ram",
        ]);
        match cli.command {
            Command::Extract(ref args) => {
                assert_eq!(args.coords, "0,3:5");
                assert_eq!(args.dest, "out.rpb");
                assert!(args.ram);
                assert!(args.output_format.is_none());
            }
            _ => panic!("expected Extract command"),
        }
    }

    #[test]
    fn parse_extract_negative_coords() {
        let cli = Cli::parse_from(["pbslice", "extract", "design.bit", "--", "-1", "out.pbs"]);
        match cli.command {
            Command::Extract(ref args) => assert_eq!(args.coords, "-1"),
            _ => panic!("expected Extract command"),
        }
    }

    #[test]
    fn parse_pblock_list() {
        let cli = Cli::parse_from([
            "pbslice",
            "pblock",
            "design.bit",
            "X0Y0:X3Y10 X5Y60:X9Y70",
            "region.bin",
            "--output-format",
            "rpb",
        ]);
        match cli.command {
            Command::Pblock(ref args) => {
                assert_eq!(args.pblocks, "X0Y0:X3Y10 X5Y60:X9Y70");
                assert_eq!(args.dest, "region.bin");
                assert_eq!(args.output_format, Some(PartialFormat::Rpb));
            }
            _ => panic!("expected Pblock command"),
        }
    }

    #[test]
    fn parse_devices() {
        let cli = Cli::parse_from(["pbslice", "devices"]);
        assert!(matches!(cli.command, Command::Devices { id: None }));
        let cli = Cli::parse_from(["pbslice", "devices", "xc7z020"]);
        match cli.command {
            Command::Devices { id } => assert_eq!(id.as_deref(), Some("xc7z020")),
            _ => panic!("expected Devices command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "pbslice",
            "--quiet",
            "--color",
            "never",
            "--config",
            "/tmp/pbslice.toml",
            "devices",
        ]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config.as_deref(), Some("/tmp/pbslice.toml"));
    }

    #[test]
    fn parse_verbose_flag() {
        let cli = Cli::parse_from(["pbslice", "-v", "info", "a.bit"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Auto);
    }
}
