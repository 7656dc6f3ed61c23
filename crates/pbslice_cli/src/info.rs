//! `pbslice info`: container metadata and the bound device model.

use pbslice_bitstream::BitstreamInfo;
use pbslice_diagnostics::DiagnosticSink;

use crate::pipeline::{load_bitstream, load_registry, render_diagnostics};
use crate::{GlobalArgs, InfoArgs, ReportFormat};

/// Runs the `pbslice info` command.
pub fn run(args: &InfoArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (_, registry) = load_registry(global)?;
    let sink = DiagnosticSink::new();
    let result = load_bitstream(&args.bitstream, args.device.as_deref(), &registry, &sink, global);
    render_diagnostics(&sink, global);
    let info = result?.info();

    match args.format {
        ReportFormat::Text => print!("{}", format_text(&info)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
    }
    Ok(0)
}

fn format_text(info: &BitstreamInfo) -> String {
    let opt = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
    let mut out = String::new();
    let mut line = |key: &str, value: String| out.push_str(&format!("{key:>15}  {value}\n"));

    line("Design", info.design.clone());
    for extra in info.origin.iter().skip(1) {
        line("", extra.clone());
    }
    line("Device", info.device_id.clone());
    line("Date", format!("{} {}", info.date, info.time));
    line("Content", format!("{} byte(s)", info.content_length));
    line("Model", format!("{} ({})", info.model_name, info.model_id));
    if let Some(ref family) = info.family {
        line("Family", family.clone());
    }
    line("Config offset", opt(info.config_offset));
    line("Config length", opt(info.config_length));
    line("Config section", opt(info.config_section_bytes));
    line("RAM section", opt(info.ram_section_bytes));
    out
}
