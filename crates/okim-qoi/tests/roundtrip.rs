/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bytestream level tests pinning the codec to the published QOI
//! format, opcode by opcode.

use okim_core::bit_depth::BitDepth;
use okim_core::colorspace::{ColorCharacteristics, ColorSpace};
use okim_core::options::EncoderOptions;
use okim_qoi::{is_qoi, QoiDecoder, QoiEncodeErrors, QoiEncoder, QoiErrors};

const QOI_TRAILER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

fn encode(pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace) -> Vec<u8> {
    let options = EncoderOptions::new(width, height, colorspace, BitDepth::Eight);

    QoiEncoder::new(pixels, options).encode_to_vec().unwrap()
}

// Hand assemble a 14 byte header followed by one run opcode and the
// trailer, the shortest structurally complete stream
fn synthetic_stream(magic: &[u8; 4], width: u32, height: u32, channels: u8, colorspace: u8) -> Vec<u8> {
    let mut out = Vec::new();

    out.extend_from_slice(magic);
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.push(channels);
    out.push(colorspace);
    out.push(0xc0);
    out.extend_from_slice(&QOI_TRAILER);

    out
}

#[test]
fn test_single_black_pixel_rgba() {
    let pixels = [0, 0, 0, 255];
    let encoded = encode(&pixels, 1, 1, ColorSpace::RGBA);

    // header + RUN(1) + trailer
    assert_eq!(encoded.len(), 23);
    assert_eq!(&encoded[..4], b"qoif");
    assert_eq!(&encoded[4..8], &1_u32.to_be_bytes());
    assert_eq!(&encoded[8..12], &1_u32.to_be_bytes());
    assert_eq!(encoded[12], 4);
    assert_eq!(encoded[13], 0);
    assert_eq!(encoded[14], 0xc0);
    assert_eq!(&encoded[15..], &QOI_TRAILER);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
    assert_eq!(decoder.dimensions(), Some((1, 1)));
    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGBA));
}

#[test]
fn test_diff_opcode_selection() {
    // first pixel equals the implicit (0,0,0,255) so it becomes a
    // run, the second moves green by +1
    let pixels = [0, 0, 0, 0, 1, 0];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGB);

    assert_eq!(encoded.len(), 24);
    assert_eq!(&encoded[14..16], &[0xc0, 0x6e]);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_diff_boundary_bytes() {
    // deltas of exactly (-2,-2,-2) and (+1,+1,+1) sit on the edges
    // of the DIFF window
    let pixels = [254, 254, 254, 255, 255, 255];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGB);

    assert_eq!(&encoded[14..16], &[0x40, 0x7f]);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_index_opcode_hits_previous_slot() {
    let pixels = [10, 20, 30, 255, 0, 0, 0, 255, 10, 20, 30, 255];
    let encoded = encode(&pixels, 3, 1, ColorSpace::RGBA);

    // (10,20,30,255) hashes to slot 9, the third pixel must come
    // back as an index opcode naming that slot
    let body_last = encoded.len() - QOI_TRAILER.len() - 1;
    assert_eq!(encoded[body_last], 9);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_luma_opcode_selection() {
    // dg = 10, dr-dg = -7, db-dg = -3, all within the luma windows
    let pixels = [50, 50, 50, 53, 60, 57];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGB);

    // first pixel is a literal, then the two luma bytes
    assert_eq!(&encoded[14..18], &[0xfe, 50, 50, 50]);
    assert_eq!(&encoded[18..20], &[0xaa, 0x15]);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_run_flushes_at_62() {
    // 63 identical pixels cannot fit one run opcode, the payload
    // space above 61 belongs to the RGB/RGBA tags
    let mut pixels = Vec::new();
    for _ in 0..63 {
        pixels.extend_from_slice(&[0, 0, 0, 255]);
    }
    let encoded = encode(&pixels, 63, 1, ColorSpace::RGBA);

    assert_eq!(&encoded[14..16], &[0xfd, 0xc0]);
    assert_eq!(encoded.len(), 14 + 2 + 8);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_run_across_boundary() {
    // 125 = 62 + 62 + 1
    let mut pixels = Vec::new();
    for _ in 0..125 {
        pixels.extend_from_slice(&[0, 0, 0, 255]);
    }
    let encoded = encode(&pixels, 125, 1, ColorSpace::RGBA);

    assert_eq!(&encoded[14..17], &[0xfd, 0xfd, 0xc0]);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_every_stream_ends_with_trailer() {
    let streams = [
        encode(&[0, 0, 0, 255], 1, 1, ColorSpace::RGBA),
        encode(&[1, 2, 3], 1, 1, ColorSpace::RGB),
        encode(&[9, 9, 9, 10, 10, 10, 200, 0, 0], 3, 1, ColorSpace::RGB)
    ];

    for stream in &streams {
        assert_eq!(&stream[stream.len() - 8..], &QOI_TRAILER);
    }
}

#[test]
fn test_alpha_change_forces_rgba_opcode() {
    let pixels = [10, 20, 30, 255, 10, 20, 30, 128];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGBA);

    // second pixel only changes alpha, still needs the full five
    // byte literal
    assert_eq!(&encoded[encoded.len() - 8 - 5..encoded.len() - 8], &[0xff, 10, 20, 30, 128]);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_header_descriptor_roundtrip() {
    let pixels = vec![128_u8; 7 * 5 * 3];
    let options = EncoderOptions::new(7, 5, ColorSpace::RGB, BitDepth::Eight);

    let mut encoder = QoiEncoder::new(&pixels, options);
    encoder.set_color_characteristics(ColorCharacteristics::Linear);
    let encoded = encoder.encode_to_vec().unwrap();

    let mut decoder = QoiDecoder::new(&encoded);
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((7, 5)));
    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGB));
    assert_eq!(
        decoder.color_characteristics(),
        Some(ColorCharacteristics::Linear)
    );
}

#[test]
fn test_rejects_missing_signature() {
    let stream = synthetic_stream(b"qoix", 1, 1, 4, 0);
    let mut decoder = QoiDecoder::new(&stream);

    assert!(matches!(decoder.decode(), Err(QoiErrors::MissingSignature)));
}

#[test]
fn test_rejects_zero_dimension() {
    let stream = synthetic_stream(b"qoif", 0, 1, 4, 0);
    let mut decoder = QoiDecoder::new(&stream);

    assert!(matches!(decoder.decode(), Err(QoiErrors::ZeroDimension)));
}

#[test]
fn test_rejects_invalid_channel() {
    let stream = synthetic_stream(b"qoif", 1, 1, 2, 0);
    let mut decoder = QoiDecoder::new(&stream);

    assert!(matches!(decoder.decode(), Err(QoiErrors::InvalidChannel(2))));
}

#[test]
fn test_rejects_invalid_colorspace() {
    let stream = synthetic_stream(b"qoif", 1, 1, 4, 9);
    let mut decoder = QoiDecoder::new(&stream);

    assert!(matches!(
        decoder.decode(),
        Err(QoiErrors::InvalidColorspace(9))
    ));
}

#[test]
fn test_rejects_short_header() {
    let mut decoder = QoiDecoder::new(b"qoif");

    assert!(matches!(decoder.decode(), Err(QoiErrors::TooSmall(14, 4))));
}

#[test]
fn test_rejects_too_many_pixels_on_decode() {
    // 20000 * 20001 pixels is just above the 400 million sanity cap
    let stream = synthetic_stream(b"qoif", 20000, 20001, 4, 0);
    let mut decoder = QoiDecoder::new(&stream);

    assert!(matches!(
        decoder.decode(),
        Err(QoiErrors::ImageTooLarge(400_020_000, 400_000_000))
    ));
}

#[test]
fn test_rejects_too_many_pixels_on_encode() {
    let options = EncoderOptions::new(20000, 20001, ColorSpace::RGBA, BitDepth::Eight);
    let mut encoder = QoiEncoder::new(&[0, 0, 0, 255], options);

    assert!(matches!(
        encoder.encode_to_vec(),
        Err(QoiEncodeErrors::ImageTooLarge(400_020_000, 400_000_000))
    ));
}

#[test]
fn test_rejects_empty_pixel_buffer() {
    let options = EncoderOptions::new(1, 1, ColorSpace::RGBA, BitDepth::Eight);
    let mut encoder = QoiEncoder::new(&[], options);

    assert!(matches!(
        encoder.encode_to_vec(),
        Err(QoiEncodeErrors::EmptyPixelBuffer)
    ));
}

#[test]
fn test_rejects_zero_pixel_count() {
    let options = EncoderOptions::new(0, 5, ColorSpace::RGBA, BitDepth::Eight);
    let mut encoder = QoiEncoder::new(&[0, 0, 0, 255], options);

    assert!(matches!(
        encoder.encode_to_vec(),
        Err(QoiEncodeErrors::ZeroPixelCount)
    ));
}

#[test]
fn test_rejects_unsupported_colorspace() {
    let options = EncoderOptions::new(2, 1, ColorSpace::Luma, BitDepth::Eight);
    let mut encoder = QoiEncoder::new(&[0, 1], options);

    assert!(matches!(
        encoder.encode_to_vec(),
        Err(QoiEncodeErrors::UnsupportedColorspace(ColorSpace::Luma, _))
    ));
}

#[test]
fn test_rejects_length_mismatch() {
    let options = EncoderOptions::new(2, 2, ColorSpace::RGB, BitDepth::Eight);
    let mut encoder = QoiEncoder::new(&[0, 0, 0], options);

    assert!(matches!(
        encoder.encode_to_vec(),
        Err(QoiEncodeErrors::Generic(_))
    ));
}

#[test]
fn test_decode_into_rejects_small_buffer() {
    let encoded = encode(&[1, 2, 3, 4, 5, 6], 2, 1, ColorSpace::RGB);
    let mut decoder = QoiDecoder::new(&encoded);

    let mut small = [0_u8; 3];
    assert!(matches!(
        decoder.decode_into(&mut small),
        Err(QoiErrors::TooSmallOutput(6, 3))
    ));
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let pixels = [0, 0, 0, 0, 1, 0];
    let mut encoded = encode(&pixels, 2, 1, ColorSpace::RGB);
    encoded.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_truncated_opcode_stream_replicates_previous_pixel() {
    // one literal pixel, then the opcode stream simply ends, the
    // remaining three pixels repeat the last materialized value
    let mut stream = Vec::new();
    stream.extend_from_slice(b"qoif");
    stream.extend_from_slice(&4_u32.to_be_bytes());
    stream.extend_from_slice(&1_u32.to_be_bytes());
    stream.push(3);
    stream.push(0);
    stream.extend_from_slice(&[0xfe, 1, 2, 3]);
    stream.extend_from_slice(&QOI_TRAILER);

    let mut decoder = QoiDecoder::new(&stream);
    assert_eq!(decoder.decode().unwrap(), &[1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
}

#[test]
fn test_transparent_black_hits_virgin_index_slot() {
    // the table starts as 64 copies of (0,0,0,0) while the implicit
    // previous pixel is opaque black, so a leading (0,0,0,0) pixel
    // is not a run but an index hit on the untouched slot 0
    let pixels = [0, 0, 0, 0, 0, 0, 0, 0];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGBA);

    assert_eq!(&encoded[14..16], &[0x00, 0xc0]);

    let mut decoder = QoiDecoder::new(&encoded);
    assert_eq!(decoder.decode().unwrap(), pixels);
}

#[test]
fn test_is_qoi() {
    let encoded = encode(&[0, 0, 0, 255], 1, 1, ColorSpace::RGBA);
    assert!(is_qoi(&encoded));

    // the shortest valid stream is 23 bytes, one byte less fails
    assert!(!is_qoi(&encoded[..22]));
    assert!(!is_qoi(b"\x89PNG\r\n\x1a\n"));
    assert!(!is_qoi(&synthetic_stream(b"qoif", 1, 1, 5, 0)));
    assert!(!is_qoi(&synthetic_stream(b"qoif", 1, 0, 4, 0)));
    assert!(is_qoi(&synthetic_stream(b"qoif", 1, 1, 3, 1)));
}
