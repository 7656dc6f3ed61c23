//! End-to-end extraction over synthetic bitstreams.
//!
//! Frame data is filled with big-endian word indices (word `n` of the frame
//! data holds `n`), so extracted bytes decode back to the positions they were
//! read from.

use pbslice_bitstream::{
    parse_pblock_list, write_container, write_partial, AxisSpec, Bitstream, BitstreamError,
    Container, Coords, OutputFormat, Pblock, Unavailable,
};
use pbslice_device::{
    Column, ColumnKind, DeviceModel, DeviceRegistry, Family, FrameLayout, Row,
};
use pbslice_diagnostics::DiagnosticSink;
use std::ops::Range;
use std::sync::Arc;

const FRAME_WORDS: u32 = 101;
const HEADER: usize = 16;

/// Two clock-region rows stored top row first, each
/// `[logic x2, block RAM, logic, pad]`, with 7-series frame geometry.
fn synthetic_device() -> DeviceModel {
    let row = Row::new(vec![
        Column::new(2, ColumnKind::Logic),
        Column::new(1, ColumnKind::BlockRam),
        Column::new(1, ColumnKind::Logic),
        Column::new(1, ColumnKind::Pad),
    ]);
    DeviceModel::new(
        "synthetic7",
        "Synthetic 7-series",
        Some(Family::Series7),
        FrameLayout::from(Family::Series7.params()),
        vec![row.clone(), row],
        vec![1, 0],
    )
    .unwrap()
}

fn content_for(device: &DeviceModel) -> Vec<u8> {
    let words = (device.offset_index().total_size() / 4) as u32;
    let mut content = vec![0xFF; 8];
    content.extend_from_slice(&[0x30, 0x00, 0x40, 0x00]);
    content.extend_from_slice(&(0x5000_0000 | words).to_be_bytes());
    for w in 0..words {
        content.extend_from_slice(&w.to_be_bytes());
    }
    content
}

fn bit_file(device_id: &str, content: Vec<u8>) -> Vec<u8> {
    write_container(&Container {
        origin: vec!["static".into(), "UserID=0XFFFFFFFF".into()],
        device_id: device_id.into(),
        date: "2018/05/04".into(),
        time: "10:20:30".into(),
        content,
    })
    .unwrap()
}

fn synthetic_bitstream() -> Bitstream {
    let mut registry = DeviceRegistry::with_builtins();
    let device = synthetic_device();
    let data = bit_file("synthetic7", content_for(&device));
    registry.register(device);
    let sink = DiagnosticSink::new();
    let bs = Bitstream::from_bytes(&data, &registry, &sink).unwrap();
    assert_eq!(sink.warning_count(), 0);
    bs
}

fn decode(data: &[u8]) -> Vec<u32> {
    data.chunks_exact(4)
        .map(|w| u32::from_be_bytes([w[0], w[1], w[2], w[3]]))
        .collect()
}

/// Word indices of `ranges` within every frame of the byte window.
fn frame_words(window: (usize, usize), ranges: &[Range<u32>]) -> Vec<u32> {
    let (start, end) = ((window.0 / 4) as u32, (window.1 / 4) as u32);
    let mut out = Vec::new();
    let mut frame = start;
    while frame < end {
        for r in ranges {
            out.extend((r.start..r.end).map(|w| frame + w));
        }
        frame += FRAME_WORDS;
    }
    out
}

fn window(bs: &Bitstream, ram: bool, row: usize, cols: Range<usize>) -> (usize, usize) {
    let index = bs.device().offset_index();
    let b = if ram { &index.ram()[row] } else { &index.config()[row] };
    (b[cols.start], b[cols.end])
}

#[test]
fn config_offset_after_size_word() {
    let bs = synthetic_bitstream();
    assert_eq!(bs.config_offset(), Some(HEADER));
    assert_eq!(
        bs.config_length(),
        Some(bs.device().offset_index().total_size())
    );
}

#[test]
fn coordinate_extraction_reads_logical_rows() {
    let bs = synthetic_bitstream();
    let words = decode(&bs.extract(&Coords::column(0, 0)).unwrap());
    // logical row 0 is stored after row 1 (5 frames)
    assert_eq!(words.len(), 2 * 101);
    assert_eq!(words[0], 5 * 101);
    assert_eq!(*words.last().unwrap(), 7 * 101 - 1);

    let coords: Coords = "1,1,0:2,".parse().unwrap();
    assert_eq!(decode(&bs.extract(&coords).unwrap()), vec![202, 203]);
}

#[test]
fn ram_extraction_follows_config_section() {
    let bs = synthetic_bitstream();
    let ram = decode(&bs.extract_ram(&Coords::column(1, 1).with_frames(AxisSpec::Index(0))).unwrap());
    // stream row 1 holds the first RAM frames, right after 10 config frames
    assert_eq!(ram.len(), 101);
    assert_eq!(ram[0], 10 * 101);
}

#[test]
fn pblock_lower_half() {
    let bs = synthetic_bitstream();
    let out = bs.extract_multi_region(&["X0Y5:X1Y12".parse().unwrap()]).unwrap();
    // 3 config frames + 128 RAM frames, 16 words each
    assert_eq!(out.len(), (3 + 128) * 16 * 4);
    let mut expected = frame_words(window(&bs, false, 0, 0..2), &[10..26]);
    expected.extend(frame_words(window(&bs, true, 0, 0..2), &[10..26]));
    assert_eq!(decode(&out), expected);
}

#[test]
fn pblock_crossing_clock_word() {
    let bs = synthetic_bitstream();
    let out = bs.extract_multi_region(&[Pblock::new(0, 5, 1, 40)]).unwrap();
    // lower 40 words + upper 32 words per frame
    assert_eq!(out.len(), (3 + 128) * 72 * 4);
    let words = decode(&out);
    let first_frame = (window(&bs, false, 0, 0..1).0 / 4) as u32;
    assert_eq!(words[0], first_frame + 10);
    assert_eq!(words[39], first_frame + 49);
    assert_eq!(words[40], first_frame + 51);
    assert_eq!(words[71], first_frame + 82);

    let ranges = [10..50, 51..83];
    let mut expected = Vec::new();
    expected.extend(frame_words(window(&bs, false, 0, 0..1), &ranges));
    expected.extend(frame_words(window(&bs, false, 0, 1..2), &ranges));
    expected.extend(frame_words(window(&bs, true, 0, 1..2), &ranges));
    assert_eq!(words, expected);
}

#[test]
fn pblock_crossing_skips_non_ram_columns_in_ram_pass() {
    let bs = synthetic_bitstream();
    // columns 2..=3: logic and pad, no block RAM
    let out = bs.extract_multi_region(&[Pblock::new(2, 0, 3, 49)]).unwrap();
    assert_eq!(out.len(), 2 * 100 * 4);
}

#[test]
fn pblock_upper_half() {
    let bs = synthetic_bitstream();
    let out = bs.extract_multi_region(&[Pblock::new(0, 26, 1, 49)]).unwrap();
    assert_eq!(out.len(), (3 + 128) * 48 * 4);
    let mut expected = frame_words(window(&bs, false, 0, 0..2), &[53..101]);
    expected.extend(frame_words(window(&bs, true, 0, 0..2), &[53..101]));
    assert_eq!(decode(&out), expected);
}

#[test]
fn pblock_lower_rows_0_to_23() {
    let bs = synthetic_bitstream();
    let out = bs.extract_multi_region(&[Pblock::new(0, 0, 0, 23)]).unwrap();
    // 2 logic frames, words 0..48; no RAM in column 0
    assert_eq!(decode(&out), frame_words(window(&bs, false, 0, 0..1), &[0..48]));
}

#[test]
fn pblock_spanning_two_clock_regions() {
    let bs = synthetic_bitstream();
    let out = bs.extract_multi_region(&[Pblock::new(1, 5, 1, 60)]).unwrap();
    let mut expected = Vec::new();
    // region 0: both halves from row 5 up
    expected.extend(frame_words(window(&bs, false, 0, 1..2), &[10..50, 51..101]));
    expected.extend(frame_words(window(&bs, true, 0, 1..2), &[10..50, 51..101]));
    // region 1: rows 50..=60, lower half
    expected.extend(frame_words(window(&bs, false, 1, 1..2), &[0..22]));
    expected.extend(frame_words(window(&bs, true, 1, 1..2), &[0..22]));
    assert_eq!(decode(&out), expected);
}

#[test]
fn pblocks_are_concatenated_in_list_order() {
    let bs = synthetic_bitstream();
    let a = Pblock::new(0, 0, 0, 10);
    let b = Pblock::new(3, 60, 3, 70);
    let both = bs.extract_multi_region(&[a, b]).unwrap();
    let first = bs.extract_multi_region(&[a]).unwrap();
    let second = bs.extract_multi_region(&[b]).unwrap();
    assert_eq!(both, [first, second].concat());
}

#[test]
fn pblock_outside_table() {
    let bs = synthetic_bitstream();
    for pblock in [Pblock::new(0, 0, 0, 100), Pblock::new(0, 0, 5, 10)] {
        assert!(matches!(
            bs.extract_multi_region(&[pblock]),
            Err(BitstreamError::InvalidCoordinateRange(_))
        ));
    }
}

#[test]
fn pblock_syntax_error() {
    assert!(matches!(
        parse_pblock_list("X3Y5-X8Y12"),
        Err(BitstreamError::InvalidCoordinateRange(_))
    ));
}

#[test]
fn multi_region_needs_clock_geometry() {
    let registry = DeviceRegistry::with_builtins();
    let sink = DiagnosticSink::new();
    let mut content = vec![0xFF; 8];
    content.extend_from_slice(&[0x30, 0x00, 0x40, 0x00, 0x50, 0x00, 0x00, 0x00]);
    content.resize(content.len() + 4096, 0);
    let bs = Bitstream::from_bytes(&bit_file("5vlx110tff1136", content), &registry, &sink).unwrap();
    assert!(matches!(
        bs.extract_multi_region(&[Pblock::new(0, 0, 0, 1)]),
        Err(BitstreamError::ExtractionUnavailable(
            Unavailable::NoClockRegionGeometry(_)
        ))
    ));
}

#[test]
fn corrupted_magic_is_fatal() {
    let device = synthetic_device();
    let mut data = bit_file("synthetic7", content_for(&device));
    data[0] = 0x01;
    let registry = DeviceRegistry::with_builtins();
    let sink = DiagnosticSink::new();
    assert!(matches!(
        Bitstream::from_bytes(&data, &registry, &sink),
        Err(BitstreamError::MalformedContainer(_))
    ));
}

#[test]
fn rpb_output_swaps_words() {
    let bs = synthetic_bitstream();
    let region = bs.extract(&"0,0,0:1,0".parse().unwrap()).unwrap();
    assert_eq!(region, (5u32 * 101).to_be_bytes());

    let dir = tempfile::tempdir().unwrap();
    let rpb = dir.path().join("region.rpb");
    let pbs = dir.path().join("region.pbs");
    let sink = DiagnosticSink::new();
    for path in [&rpb, &pbs] {
        let format = OutputFormat::from_path(path);
        write_partial(path, &region, format, bs.device().word_byte_size(), &sink).unwrap();
    }
    assert_eq!(sink.warning_count(), 0);
    assert_eq!(std::fs::read(&rpb).unwrap(), (5u32 * 101).to_le_bytes());
    assert_eq!(std::fs::read(&pbs).unwrap(), region);
}

#[test]
fn builtin_z020_pblock() {
    let registry = DeviceRegistry::with_builtins();
    let device: Arc<DeviceModel> = registry.get("7z020clg400").unwrap();
    let sink = DiagnosticSink::new();
    let bs = Bitstream::from_bytes(&bit_file("xc7z020clg400-1", content_for(&device)), &registry, &sink)
        .unwrap();
    assert_eq!(sink.warning_count(), 0);

    // column 6 of every row is block RAM (28 frames, 128 RAM frames)
    let out = bs.extract_multi_region(&[Pblock::new(6, 5, 6, 12)]).unwrap();
    assert_eq!(out.len(), (28 + 128) * 16 * 4);
    let words = decode(&out);
    // logical row 0 is the last row in the stream
    let index = device.offset_index();
    let start = (index.config()[0][6] / 4) as u32;
    assert_eq!(words[0], start + 10);
    assert!(index.config()[0][0] > index.config()[1][0]);
}
