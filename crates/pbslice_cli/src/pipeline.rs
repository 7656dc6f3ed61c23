//! Shared pipeline helpers for CLI commands.
//!
//! Config discovery, registry construction, bitstream loading with an
//! optional device override, diagnostic rendering and output-format
//! selection.

use std::path::{Path, PathBuf};

use pbslice_bitstream::{Bitstream, OutputFormat};
use pbslice_config::{OutputKind, ToolConfig, TOOL_CONFIG_FILE};
use pbslice_device::DeviceRegistry;
use pbslice_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};

use crate::{GlobalArgs, PartialFormat};

/// Finds the configuration file to use.
///
/// An explicit `--config` path must exist; otherwise `pbslice.toml` in
/// `cwd` is used when present.
pub fn resolve_config_path(
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref path) => {
            let p = PathBuf::from(path);
            if !p.is_file() {
                return Err(format!("configuration file {} not found", p.display()).into());
            }
            Ok(Some(p))
        }
        None => {
            let p = cwd.join(TOOL_CONFIG_FILE);
            Ok(p.is_file().then_some(p))
        }
    }
}

/// Loads the tool configuration and builds the device registry from it.
///
/// Without a configuration file the registry holds the built-in tables only.
pub fn load_registry(
    global: &GlobalArgs,
) -> Result<(ToolConfig, DeviceRegistry), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let Some(path) = resolve_config_path(global, &cwd)? else {
        return Ok((ToolConfig::default(), DeviceRegistry::with_builtins()));
    };
    if global.verbose {
        eprintln!("   Config {}", path.display());
    }
    let config = pbslice_config::load_tool_config(&path)?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    let registry = pbslice_config::build_registry(&config, base_dir)?;
    Ok((config, registry))
}

/// Loads a `.bit` file, rebinding it to `device` when one is given.
pub fn load_bitstream(
    path: &str,
    device: Option<&str>,
    registry: &DeviceRegistry,
    sink: &DiagnosticSink,
    global: &GlobalArgs,
) -> Result<Bitstream, Box<dyn std::error::Error>> {
    if global.verbose {
        eprintln!("   Loading {path}");
    }
    let bitstream = match device {
        None => Bitstream::load(path, registry, sink)?,
        Some(id) => {
            let model = registry
                .get(id)
                .ok_or_else(|| format!("unknown device '{id}' (see `pbslice devices`)"))?;
            // parse with a scratch sink so the container's own id doesn't
            // report an unknown device we are about to replace
            let scratch = DiagnosticSink::new();
            let mut bitstream = Bitstream::load(path, registry, &scratch)?;
            for diag in scratch.take_all() {
                if diag.code != pbslice_device::UNKNOWN_DEVICE {
                    sink.emit(diag);
                }
            }
            bitstream.set_device(model, sink);
            bitstream
        }
    };
    if global.verbose {
        eprintln!(
            "   Device {} ({})",
            bitstream.device().id(),
            bitstream.device().name()
        );
    }
    Ok(bitstream)
}

/// Renders collected diagnostics to stderr unless `--quiet` is set.
pub fn render_diagnostics(sink: &DiagnosticSink, global: &GlobalArgs) {
    let diagnostics = sink.take_all();
    if global.quiet {
        return;
    }
    let renderer = TerminalRenderer::new(global.color);
    for diag in &diagnostics {
        eprintln!("{}", renderer.render(diag));
    }
}

/// Picks the partial-bitstream format: the CLI flag wins, then a `.rpb`
/// destination extension, then the configuration default.
pub fn choose_format(flag: Option<PartialFormat>, dest: &Path, config: &ToolConfig) -> OutputFormat {
    match flag {
        Some(PartialFormat::Pbs) => OutputFormat::Pbs,
        Some(PartialFormat::Rpb) => OutputFormat::Rpb,
        None if OutputFormat::from_path(dest) == OutputFormat::Rpb => OutputFormat::Rpb,
        None => match config.output.format {
            OutputKind::Pbs => OutputFormat::Pbs,
            OutputKind::Rpb => OutputFormat::Rpb,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config,
        }
    }

    fn rpb_config() -> ToolConfig {
        pbslice_config::load_tool_config_from_str("[output]\nformat = \"rpb\"\n").unwrap()
    }

    #[test]
    fn config_from_cwd() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_config_path(&global(None), dir.path()).unwrap(), None);
        fs::write(dir.path().join(TOOL_CONFIG_FILE), "").unwrap();
        assert_eq!(
            resolve_config_path(&global(None), dir.path()).unwrap(),
            Some(dir.path().join(TOOL_CONFIG_FILE))
        );
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let g = global(Some(missing.display().to_string()));
        assert!(resolve_config_path(&g, dir.path()).is_err());
    }

    #[test]
    fn flag_beats_extension_and_config() {
        let config = rpb_config();
        assert_eq!(
            choose_format(Some(PartialFormat::Pbs), Path::new("a.rpb"), &config),
            OutputFormat::Pbs
        );
        assert_eq!(
            choose_format(Some(PartialFormat::Rpb), Path::new("a.pbs"), &ToolConfig::default()),
            OutputFormat::Rpb
        );
    }

    #[test]
    fn extension_beats_config() {
        assert_eq!(
            choose_format(None, Path::new("out/a.rpb"), &ToolConfig::default()),
            OutputFormat::Rpb
        );
    }

    #[test]
    fn config_default_applies_last() {
        assert_eq!(
            choose_format(None, Path::new("a.bin"), &rpb_config()),
            OutputFormat::Rpb
        );
        assert_eq!(
            choose_format(None, Path::new("a.bin"), &ToolConfig::default()),
            OutputFormat::Pbs
        );
    }
}
