//! `pbslice devices`: registered device tables.

use pbslice_device::{DeviceModel, Row};

use crate::pipeline::load_registry;
use crate::GlobalArgs;

/// Runs the `pbslice devices` command.
pub fn run(id: Option<&str>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (_, registry) = load_registry(global)?;
    match id {
        None => {
            for model in registry.iter() {
                println!("{}", summary_line(model));
            }
        }
        Some(id) => {
            let model = registry
                .get(id)
                .ok_or_else(|| format!("unknown device '{id}'"))?;
            print!("{}", describe(&model));
        }
    }
    Ok(0)
}

fn summary_line(model: &DeviceModel) -> String {
    let family = model.family().map_or("-", |f| f.name());
    let rows = if model.has_table() {
        format!("{} row(s)", model.rows().len())
    } else {
        "no table".to_string()
    };
    format!("{:<16} {:<9} {:<10} {}", model.id(), family, rows, model.name())
}

fn describe(model: &DeviceModel) -> String {
    let mut out = format!("{} ({})\n", model.name(), model.id());
    if let Some(family) = model.family() {
        out.push_str(&format!("  family          {}\n", family.name()));
    }
    out.push_str(&format!(
        "  frame           {} word(s) of {} byte(s)\n",
        model.frame_word_count(),
        model.word_byte_size()
    ));
    if let Some(cr) = model.clock_region() {
        out.push_str(&format!(
            "  clock region    {} device row(s), {} word(s) per row, {} clock word(s)\n",
            cr.rows_per_clock_region, cr.words_per_row, cr.clock_words
        ));
    }
    if !model.has_table() {
        out.push_str("  no layout table\n");
        return out;
    }
    let index = model.offset_index();
    out.push_str(&format!(
        "  stream order    {:?}\n  config section  {} byte(s)\n  RAM section     {} byte(s)\n",
        model.bitstream_row_order(),
        index.config_size(),
        index.ram_size()
    ));
    for (i, row) in model.rows().iter().enumerate() {
        out.push_str(&format!(
            "  row {i}: {} column(s), {} frame(s)\n    {}\n",
            row.len(),
            row.frame_count(),
            compress_row(row)
        ));
    }
    out
}

/// Column tags with consecutive repeats folded, e.g. `IOB IOB 4*CLB BRAM`.
fn compress_row(row: &Row) -> String {
    let mut runs: Vec<(&'static str, usize)> = Vec::new();
    for column in row.columns() {
        let tag = column.kind.tag();
        match runs.last_mut() {
            Some((last, n)) if *last == tag => *n += 1,
            _ => runs.push((tag, 1)),
        }
    }
    runs.iter()
        .map(|&(tag, n)| if n == 1 { tag.to_string() } else { format!("{n}*{tag}") })
        .collect::<Vec<_>>()
        .join(" ")
}
