//! Partial bitstream output formats.

use crate::error::BitstreamResult;
use pbslice_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// The extracted region holds no bytes.
pub const EMPTY_REGION: DiagnosticCode = DiagnosticCode::new(Category::Extraction, 1);
/// An `.rpb` region does not end on a word boundary.
pub const PARTIAL_WORD: DiagnosticCode = DiagnosticCode::new(Category::Output, 1);

/// The on-disk format of an extracted region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Extracted bytes as they appear in the bitstream (`.pbs`).
    #[default]
    Pbs,
    /// Bytes reversed within every configuration word (`.rpb`).
    Rpb,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pbs => "pbs",
            OutputFormat::Rpb => "rpb",
        }
    }

    /// Picks the format from a destination path: `.rpb` selects [`OutputFormat::Rpb`],
    /// anything else [`OutputFormat::Pbs`].
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("rpb") => OutputFormat::Rpb,
            _ => OutputFormat::Pbs,
        }
    }

    /// Encodes extracted bytes for this format.
    pub fn encode<'a>(&self, data: &'a [u8], word_byte_size: usize) -> Cow<'a, [u8]> {
        match self {
            OutputFormat::Pbs => Cow::Borrowed(data),
            OutputFormat::Rpb => Cow::Owned(swap_word_bytes(data, word_byte_size)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Pbs => write!(f, "PBS"),
            OutputFormat::Rpb => write!(f, "RPB"),
        }
    }
}

/// Reverses the byte order within each `word_byte_size`-byte word.
///
/// A trailing partial word is copied unchanged.
pub fn swap_word_bytes(data: &[u8], word_byte_size: usize) -> Vec<u8> {
    if word_byte_size < 2 {
        return data.to_vec();
    }
    let mut out = Vec::with_capacity(data.len());
    let mut words = data.chunks_exact(word_byte_size);
    for word in &mut words {
        out.extend(word.iter().rev());
    }
    out.extend_from_slice(words.remainder());
    out
}

/// Writes an extracted region to `path` in the given format.
///
/// An empty region is still written, with warning [`EMPTY_REGION`]. For
/// [`OutputFormat::Rpb`], a trailing partial word is written unswapped and
/// reported as [`PARTIAL_WORD`].
pub fn write_partial(
    path: &Path,
    data: &[u8],
    format: OutputFormat,
    word_byte_size: usize,
    sink: &DiagnosticSink,
) -> BitstreamResult<()> {
    if data.is_empty() {
        sink.emit(
            Diagnostic::warning(EMPTY_REGION, "the selected region is empty")
                .with_note(format!("{} is written with no data", path.display())),
        );
    }
    if format == OutputFormat::Rpb && word_byte_size >= 2 {
        let tail = data.len() % word_byte_size;
        if tail != 0 {
            sink.emit(
                Diagnostic::warning(
                    PARTIAL_WORD,
                    format!("region ends with {tail} byte(s) of a {word_byte_size}-byte word"),
                )
                .at_offset(data.len() - tail)
                .with_note("the trailing bytes are written unswapped"),
            );
        }
    }
    std::fs::write(path, format.encode(data, word_byte_size))?;
    Ok(())
}
