//! Xilinx `.bit` loading and partial-bitstream extraction.
//!
//! A [`Bitstream`] pairs the decoded container fields with the
//! [`DeviceModel`] of the device it targets and the location of the
//! configuration frames inside the content. Regions are then cut out of the
//! frame data by coordinates ([`Bitstream::extract`],
//! [`Bitstream::extract_ram`]) or by placement rectangles spanning whole
//! clock regions ([`Bitstream::extract_multi_region`]), and written as
//! partial bitstreams with [`output::write_partial`].

#![warn(missing_docs)]

pub mod container;
pub mod coords;
pub mod error;
pub mod extract;
pub mod output;
pub mod pblock;

pub use container::{parse_container, write_container, Container};
pub use coords::{AxisSpec, Coords};
pub use error::{BitstreamError, BitstreamResult, Unavailable};
pub use output::{swap_word_bytes, write_partial, OutputFormat, EMPTY_REGION, PARTIAL_WORD};
pub use pblock::{parse_pblock_list, ClockRegionSpan, Pblock, RegionSlice};

use pbslice_device::{normalize_device_id, ConfigData, DeviceModel, DeviceRegistry};
use pbslice_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// The start-of-configuration marker is unset or absent from the content.
pub const MARKER_NOT_FOUND: DiagnosticCode = DiagnosticCode::new(Category::Device, 2);
/// The content after the marker is shorter than the device's configuration section.
pub const CONTENT_TOO_SHORT: DiagnosticCode = DiagnosticCode::new(Category::Device, 3);
/// The bitstream was rebound to a model other than the one its container names.
pub const DEVICE_OVERRIDDEN: DiagnosticCode = DiagnosticCode::new(Category::Device, 4);

/// A loaded bitstream bound to a device model.
#[derive(Debug, Clone)]
pub struct Bitstream {
    container: Container,
    device: Arc<DeviceModel>,
    config: Option<ConfigData>,
}

impl Bitstream {
    /// Parses a `.bit` container and resolves its device through `registry`.
    pub fn from_bytes(
        data: &[u8],
        registry: &DeviceRegistry,
        sink: &DiagnosticSink,
    ) -> BitstreamResult<Self> {
        let container = parse_container(data, sink)?;
        let device = registry.lookup(&container.device_id, sink);
        Ok(Self::from_parts(container, device, sink))
    }

    /// Reads and parses a `.bit` file.
    pub fn load(
        path: impl AsRef<Path>,
        registry: &DeviceRegistry,
        sink: &DiagnosticSink,
    ) -> BitstreamResult<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data, registry, sink)
    }

    /// Builds a bitstream from explicit fields and a device model.
    pub fn from_parts(
        container: Container,
        device: Arc<DeviceModel>,
        sink: &DiagnosticSink,
    ) -> Self {
        let mut bitstream = Self {
            container,
            device,
            config: None,
        };
        bitstream.locate_config_data(sink);
        bitstream
    }

    /// Rebinds the bitstream to another device model, e.g. when the
    /// container's device identifier is missing or wrong.
    pub fn set_device(&mut self, device: Arc<DeviceModel>, sink: &DiagnosticSink) {
        if normalize_device_id(&self.container.device_id) != normalize_device_id(device.id()) {
            sink.emit(Diagnostic::note(
                DEVICE_OVERRIDDEN,
                format!(
                    "container names device '{}', using model '{}'",
                    self.container.device_id,
                    device.id()
                ),
            ));
        }
        self.device = device;
        self.locate_config_data(sink);
    }

    fn locate_config_data(&mut self, sink: &DiagnosticSink) {
        self.config = self.device.locate_config_data(&self.container.content);
        let Some(config) = self.config else {
            sink.emit(
                Diagnostic::warning(
                    MARKER_NOT_FOUND,
                    format!(
                        "configuration data marker for '{}' not found",
                        self.device.id()
                    ),
                )
                .with_note("region extraction is unavailable for this bitstream"),
            );
            return;
        };
        if self.device.has_table() {
            let needed = self.device.offset_index().config_size();
            let available = self.container.content.len() - config.offset;
            if available < needed {
                sink.emit(
                    Diagnostic::warning(
                        CONTENT_TOO_SHORT,
                        format!(
                            "content holds {available} byte(s) of frame data, device '{}' expects {needed}",
                            self.device.id()
                        ),
                    )
                    .at_offset(config.offset)
                    .with_help("check that the bitstream matches the selected device"),
                );
            }
        }
    }

    /// The decoded container fields.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Origin field items (design name first).
    pub fn origin(&self) -> &[String] {
        &self.container.origin
    }

    /// Design name, the first origin item.
    pub fn design_name(&self) -> &str {
        self.container.origin.first().map_or("", String::as_str)
    }

    /// Device identifier recorded in the container.
    pub fn device_id(&self) -> &str {
        &self.container.device_id
    }

    /// Build date.
    pub fn date(&self) -> &str {
        &self.container.date
    }

    /// Build time.
    pub fn time(&self) -> &str {
        &self.container.time
    }

    /// Raw configuration content.
    pub fn content(&self) -> &[u8] {
        &self.container.content
    }

    /// The bound device model.
    pub fn device(&self) -> &Arc<DeviceModel> {
        &self.device
    }

    /// Offset of the first frame byte within the content.
    pub fn config_offset(&self) -> Option<usize> {
        self.config.map(|c| c.offset)
    }

    /// Frame-data length announced by the size field, in bytes.
    pub fn config_length(&self) -> Option<usize> {
        self.config.map(|c| c.length)
    }

    /// Serializes back into a `.bit` container.
    pub fn to_bit_bytes(&self) -> BitstreamResult<Vec<u8>> {
        write_container(&self.container)
    }

    /// Writes the `.bit` container to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> BitstreamResult<()> {
        std::fs::write(path, self.to_bit_bytes()?)?;
        Ok(())
    }

    /// A serializable summary of the bitstream and its device.
    pub fn info(&self) -> BitstreamInfo {
        let index = self
            .device
            .has_table()
            .then(|| self.device.offset_index());
        BitstreamInfo {
            design: self.design_name().to_string(),
            origin: self.container.origin.clone(),
            device_id: self.container.device_id.clone(),
            date: self.container.date.clone(),
            time: self.container.time.clone(),
            content_length: self.container.content.len(),
            model_id: self.device.id().to_string(),
            model_name: self.device.name().to_string(),
            family: self.device.family().map(|f| f.name().to_string()),
            config_offset: self.config_offset(),
            config_length: self.config_length(),
            config_section_bytes: index.map(|i| i.config_size()),
            ram_section_bytes: index.map(|i| i.ram_size()),
        }
    }
}

/// Summary of a loaded bitstream, as printed by `pbslice info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitstreamInfo {
    /// Design name.
    pub design: String,
    /// All origin items.
    pub origin: Vec<String>,
    /// Device identifier from the container.
    pub device_id: String,
    /// Build date.
    pub date: String,
    /// Build time.
    pub time: String,
    /// Content length in bytes.
    pub content_length: usize,
    /// Identifier of the bound device model.
    pub model_id: String,
    /// Name of the bound device model.
    pub model_name: String,
    /// Family of the bound device model.
    pub family: Option<String>,
    /// Offset of the first frame byte within the content.
    pub config_offset: Option<usize>,
    /// Announced frame-data length in bytes.
    pub config_length: Option<usize>,
    /// Configuration section size from the device table.
    pub config_section_bytes: Option<usize>,
    /// Block-RAM section size from the device table.
    pub ram_section_bytes: Option<usize>,
}
