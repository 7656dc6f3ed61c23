//! `pbslice extract` and `pbslice pblock`: write a partial bitstream.

use std::path::Path;

use pbslice_bitstream::{parse_pblock_list, write_partial, Bitstream, Coords};
use pbslice_config::ToolConfig;
use pbslice_diagnostics::DiagnosticSink;

use crate::pipeline::{choose_format, load_bitstream, load_registry, render_diagnostics};
use crate::{ExtractArgs, GlobalArgs, PartialFormat, PblockArgs};

/// Runs the `pbslice extract` command.
pub fn run_extract(args: &ExtractArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let coords: Coords = args.coords.parse()?;
    let (config, bitstream) = open(&args.bitstream, args.device.as_deref(), global)?;
    if global.verbose {
        eprintln!("   Coords ({coords})");
    }
    let data = if args.ram {
        bitstream.extract_ram(&coords)?
    } else {
        bitstream.extract(&coords)?
    };
    save(&bitstream, &data, &args.dest, args.output_format, &config, global)
}

/// Runs the `pbslice pblock` command.
pub fn run_pblock(args: &PblockArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let pblocks = parse_pblock_list(&args.pblocks)?;
    let (config, bitstream) = open(&args.bitstream, args.device.as_deref(), global)?;
    if global.verbose {
        for pblock in &pblocks {
            eprintln!("   Pblock {pblock}");
        }
    }
    let data = bitstream.extract_multi_region(&pblocks)?;
    save(&bitstream, &data, &args.dest, args.output_format, &config, global)
}

fn open(
    path: &str,
    device: Option<&str>,
    global: &GlobalArgs,
) -> Result<(ToolConfig, Bitstream), Box<dyn std::error::Error>> {
    let (config, registry) = load_registry(global)?;
    let sink = DiagnosticSink::new();
    let result = load_bitstream(path, device, &registry, &sink, global);
    render_diagnostics(&sink, global);
    Ok((config, result?))
}

fn save(
    bitstream: &Bitstream,
    data: &[u8],
    dest: &str,
    flag: Option<PartialFormat>,
    config: &ToolConfig,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let dest = Path::new(dest);
    let format = choose_format(flag, dest, config);
    let sink = DiagnosticSink::new();
    let result = write_partial(dest, data, format, bitstream.device().word_byte_size(), &sink);
    render_diagnostics(&sink, global);
    result?;
    if !global.quiet {
        eprintln!(
            "   Wrote {} byte(s) to {} ({format})",
            data.len(),
            dest.display()
        );
    }
    Ok(0)
}
