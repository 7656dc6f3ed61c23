//! The `.bit` container: a fixed magic prefix followed by tagged fields.
//!
//! Fields `a` (origin), `b` (device), `c` (date) and `d` (time) carry a
//! 2-byte big-endian length and a NUL-terminated string. Field `e` carries a
//! 4-byte big-endian length and the raw configuration content.

use crate::error::{BitstreamError, BitstreamResult};
use pbslice_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};

/// Magic bytes opening every `.bit` container.
pub const MAGIC: [u8; 13] = [
    0x00, 0x09, 0x0F, 0xF0, 0x0F, 0xF0, 0x0F, 0xF0, 0x0F, 0xF0, 0x00, 0x00, 0x01,
];

/// A field carried a different tag than its position implies.
pub const UNEXPECTED_TAG: DiagnosticCode = DiagnosticCode::new(Category::Container, 1);
/// Bytes follow the content field.
pub const TRAILING_DATA: DiagnosticCode = DiagnosticCode::new(Category::Container, 2);

const FIELD_ORIGIN: u8 = b'a';
const FIELD_DEVICE: u8 = b'b';
const FIELD_DATE: u8 = b'c';
const FIELD_TIME: u8 = b'd';
const FIELD_CONTENT: u8 = b'e';

/// The decoded fields of a `.bit` container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    /// Field `a`, split on `;` (design name followed by `key=value` items).
    pub origin: Vec<String>,
    /// Field `b`, the device identifier (e.g. `7z020clg400`).
    pub device_id: String,
    /// Field `c`, the build date.
    pub date: String,
    /// Field `d`, the build time.
    pub time: String,
    /// Field `e`, the configuration content.
    pub content: Vec<u8>,
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, what: &str) -> BitstreamResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                BitstreamError::MalformedContainer(format!(
                    "{what} at offset {:#x} needs {n} byte(s), {} available",
                    self.pos,
                    self.data.len() - self.pos
                ))
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn field(&mut self, expected: u8, long: bool, sink: &DiagnosticSink) -> BitstreamResult<&'a [u8]> {
        let tag_offset = self.pos;
        let tag = self.take(1, "field tag")?[0];
        if tag != expected {
            sink.emit(
                Diagnostic::warning(
                    UNEXPECTED_TAG,
                    format!(
                        "expected field '{}', found '{}'",
                        expected as char,
                        tag.escape_ascii()
                    ),
                )
                .at_offset(tag_offset)
                .with_note("the field is read positionally"),
            );
        }
        let len = if long {
            let b = self.take(4, "field length")?;
            u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize
        } else {
            let b = self.take(2, "field length")?;
            u16::from_be_bytes([b[0], b[1]]) as usize
        };
        self.take(len, "field value")
    }
}

fn text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(&[0]).unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses a `.bit` container.
///
/// A wrong magic prefix or a truncated field is fatal. Unexpected field
/// tags and trailing bytes are reported to `sink`.
pub fn parse_container(data: &[u8], sink: &DiagnosticSink) -> BitstreamResult<Container> {
    if data.len() < MAGIC.len() || data[..MAGIC.len()] != MAGIC {
        return Err(BitstreamError::MalformedContainer(
            "missing .bit magic prefix".to_string(),
        ));
    }
    let mut reader = Reader {
        data,
        pos: MAGIC.len(),
    };

    let origin = text(reader.field(FIELD_ORIGIN, false, sink)?);
    let device_id = text(reader.field(FIELD_DEVICE, false, sink)?);
    let date = text(reader.field(FIELD_DATE, false, sink)?);
    let time = text(reader.field(FIELD_TIME, false, sink)?);
    let content = reader.field(FIELD_CONTENT, true, sink)?.to_vec();

    let trailing = data.len() - reader.pos;
    if trailing > 0 {
        sink.emit(
            Diagnostic::warning(
                TRAILING_DATA,
                format!("{trailing} byte(s) of trailing data after the content field"),
            )
            .at_offset(reader.pos)
            .with_note("trailing data is ignored"),
        );
    }

    Ok(Container {
        origin: origin.split(';').map(String::from).collect(),
        device_id,
        date,
        time,
        content,
    })
}

/// Serializes a container with the same framing [`parse_container`] reads.
pub fn write_container(container: &Container) -> BitstreamResult<Vec<u8>> {
    let mut data = Vec::with_capacity(MAGIC.len() + 64 + container.content.len());
    data.extend_from_slice(&MAGIC);
    write_text_field(&mut data, FIELD_ORIGIN, &container.origin.join(";"))?;
    write_text_field(&mut data, FIELD_DEVICE, &container.device_id)?;
    write_text_field(&mut data, FIELD_DATE, &container.date)?;
    write_text_field(&mut data, FIELD_TIME, &container.time)?;

    let len = u32::try_from(container.content.len()).map_err(|_| {
        BitstreamError::MalformedContainer(format!(
            "content of {} bytes exceeds the 4-byte length field",
            container.content.len()
        ))
    })?;
    data.push(FIELD_CONTENT);
    data.extend_from_slice(&len.to_be_bytes());
    data.extend_from_slice(&container.content);
    Ok(data)
}

/// Writes a tag, a 2-byte length and a NUL-terminated value.
fn write_text_field(data: &mut Vec<u8>, tag: u8, value: &str) -> BitstreamResult<()> {
    let len = u16::try_from(value.len() + 1).map_err(|_| {
        BitstreamError::MalformedContainer(format!(
            "field '{}' of {} bytes exceeds the 2-byte length field",
            tag as char,
            value.len()
        ))
    })?;
    data.push(tag);
    data.extend_from_slice(&len.to_be_bytes());
    data.extend_from_slice(value.as_bytes());
    data.push(0);
    Ok(())
}
