use super::*;
use crate::encode::encode_png;
use crate::foundation::core::FrameRGBA;

/// Bitwise CRC-32 (IEEE, reflected), independent of `crc32fast`.
fn reference_crc(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        crc ^= u32::from(b);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn solid_png(color: [u8; 4]) -> Vec<u8> {
    let mut frame = FrameRGBA::transparent(3, 2);
    for px in frame.data.chunks_exact_mut(4) {
        px.copy_from_slice(&color);
    }
    encode_png(&frame).unwrap()
}

fn three_frames() -> Vec<Vec<u8>> {
    vec![
        solid_png([255, 0, 0, 255]),
        solid_png([0, 255, 0, 255]),
        solid_png([0, 0, 255, 128]),
    ]
}

fn be32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn be16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

fn idat_payloads(png: &[u8]) -> Vec<Vec<u8>> {
    chunks(png)
        .unwrap()
        .into_iter()
        .filter(|c| &c.chunk_type == b"IDAT")
        .map(|c| c.data.to_vec())
        .collect()
}

#[test]
fn single_frame_is_returned_unchanged() {
    let png = solid_png([1, 2, 3, 255]);
    let out = encode_frames(std::slice::from_ref(&png), FrameDelay::one_tick()).unwrap();
    assert_eq!(out, png);
}

#[test]
fn no_frames_is_an_error() {
    let err = encode_frames(&[], FrameDelay::one_tick()).unwrap_err();
    assert!(matches!(err, RenderError::Validation(_)));
}

#[test]
fn chunk_layout_follows_apng_order() {
    let frames = three_frames();
    let out = encode_frames(&frames, FrameDelay::one_tick()).unwrap();
    assert!(out.starts_with(&PNG_SIGNATURE));

    let mut expected: Vec<&[u8; 4]> = vec![b"IHDR", b"acTL"];
    for (i, frame) in frames.iter().enumerate() {
        expected.push(b"fcTL");
        let kind: &[u8; 4] = if i == 0 { b"IDAT" } else { b"fdAT" };
        expected.extend(std::iter::repeat_n(kind, idat_payloads(frame).len()));
    }
    expected.push(b"IEND");

    let parsed = chunks(&out).unwrap();
    let types: Vec<&[u8; 4]> = parsed.iter().map(|c| &c.chunk_type).collect();
    assert_eq!(types, expected);
    assert!(out.ends_with(&[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]));
}

#[test]
fn header_is_copied_from_first_frame() {
    let frames = three_frames();
    let out = encode_frames(&frames, FrameDelay::one_tick()).unwrap();
    let first_ihdr = chunks(&frames[0]).unwrap()[0];
    let out_ihdr = chunks(&out).unwrap()[0];
    assert_eq!(&first_ihdr.chunk_type, b"IHDR");
    assert_eq!(out_ihdr.raw, first_ihdr.raw);
}

#[test]
fn animation_control_declares_frames_and_infinite_loop() {
    let out = encode_frames(&three_frames(), FrameDelay::one_tick()).unwrap();
    let actl = chunks(&out)
        .unwrap()
        .into_iter()
        .find(|c| &c.chunk_type == b"acTL")
        .unwrap();
    assert_eq!(actl.data.len(), 8);
    assert_eq!(be32(&actl.data[0..4]), 3);
    assert_eq!(be32(&actl.data[4..8]), 0);
}

#[test]
fn sequence_numbers_run_without_gaps() {
    let frames = three_frames();
    let out = encode_frames(&frames, FrameDelay::one_tick()).unwrap();
    let seqs: Vec<u32> = chunks(&out)
        .unwrap()
        .iter()
        .filter(|c| &c.chunk_type == b"fcTL" || &c.chunk_type == b"fdAT")
        .map(|c| be32(c.data))
        .collect();
    let expected_len = 3 + idat_payloads(&frames[1]).len() + idat_payloads(&frames[2]).len();
    assert_eq!(seqs, (0..expected_len as u32).collect::<Vec<_>>());
    // One IDAT per small frame: 0..=2N-2.
    assert_eq!(seqs.last().copied(), Some(2 * 3 - 2));
}

#[test]
fn every_chunk_crc_matches_reference() {
    let out = encode_frames(&three_frames(), FrameDelay::one_tick()).unwrap();
    for chunk in chunks(&out).unwrap() {
        let typed = &chunk.raw[4..chunk.raw.len() - 4];
        assert_eq!(
            chunk.crc,
            reference_crc(typed),
            "crc of {}",
            String::from_utf8_lossy(&chunk.chunk_type)
        );
    }
}

#[test]
fn frame_control_carries_size_delay_and_defaults() {
    let out = encode_frames(&three_frames(), FrameDelay::new(3, 40).unwrap()).unwrap();
    let fctls: Vec<Chunk<'_>> = chunks(&out)
        .unwrap()
        .into_iter()
        .filter(|c| &c.chunk_type == b"fcTL")
        .collect();
    assert_eq!(fctls.len(), 3);
    for fctl in fctls {
        let d = fctl.data;
        assert_eq!(d.len(), 26);
        assert_eq!(be32(&d[4..8]), 3);
        assert_eq!(be32(&d[8..12]), 2);
        assert_eq!(be32(&d[12..16]), 0);
        assert_eq!(be32(&d[16..20]), 0);
        assert_eq!(be16(&d[20..22]), 3);
        assert_eq!(be16(&d[22..24]), 40);
        assert_eq!(d[24], 0);
        assert_eq!(d[25], 0);
    }
}

#[test]
fn per_frame_delays_come_from_the_callback() {
    let out = encode_animated(&three_frames(), |i| FrameDelay {
        num: i as u16 + 1,
        den: 20,
    })
    .unwrap();
    let nums: Vec<u16> = chunks(&out)
        .unwrap()
        .iter()
        .filter(|c| &c.chunk_type == b"fcTL")
        .map(|c| be16(&c.data[20..22]))
        .collect();
    assert_eq!(nums, vec![1, 2, 3]);
}

#[test]
fn later_frames_keep_their_compressed_payload() {
    let frames = three_frames();
    let out = encode_frames(&frames, FrameDelay::one_tick()).unwrap();
    let fdat: Vec<Vec<u8>> = chunks(&out)
        .unwrap()
        .into_iter()
        .filter(|c| &c.chunk_type == b"fdAT")
        .map(|c| c.data[4..].to_vec())
        .collect();
    let mut originals = idat_payloads(&frames[1]);
    originals.extend(idat_payloads(&frames[2]));
    assert_eq!(fdat, originals);
}

#[test]
fn output_decodes_as_first_frame_without_apng_support() {
    let out = encode_frames(&three_frames(), FrameDelay::one_tick()).unwrap();
    let img = image::load_from_memory(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
}

fn raw_chunk(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    write_chunk(&mut out, kind, payload);
    out
}

#[test]
fn frame_without_header_is_malformed() {
    let mut headless = PNG_SIGNATURE.to_vec();
    headless.extend(raw_chunk(b"IDAT", &[1, 2, 3]));
    headless.extend(raw_chunk(b"IEND", &[]));
    let err = encode_frames(&[solid_png([0; 4]), headless], FrameDelay::one_tick()).unwrap_err();
    assert!(matches!(err, RenderError::MalformedFrame(ref m) if m.contains("frame 1") && m.contains("IHDR")));
}

#[test]
fn frame_without_pixel_data_is_malformed() {
    let first = solid_png([0; 4]);
    let mut empty = PNG_SIGNATURE.to_vec();
    empty.extend_from_slice(chunks(&first).unwrap()[0].raw);
    empty.extend(raw_chunk(b"IEND", &[]));
    let err = encode_frames(&[first, empty], FrameDelay::one_tick()).unwrap_err();
    assert!(matches!(err, RenderError::MalformedFrame(ref m) if m.contains("IDAT")));
}

#[test]
fn garbage_and_truncated_frames_are_malformed() {
    let good = solid_png([0; 4]);
    let truncated = good[..good.len() - 20].to_vec();
    for bad in [b"definitely not a png".to_vec(), truncated] {
        let err = encode_frames(&[good.clone(), bad], FrameDelay::one_tick()).unwrap_err();
        assert!(matches!(err, RenderError::MalformedFrame(_)));
    }
}
