/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding and encoding the Quite OK Image format
//!
//! [Format Specification](https://qoiformat.org/qoi-specification.pdf)
//!
//! The format packs pixels into six variable length opcodes driven
//! by a 64 entry running color table, a run length counter and the
//! previously seen pixel. Both directions work on in-memory byte
//! buffers, the encoder can additionally emit into any sink
//! implementing [`ByteWriterTrait`](okim_core::bytestream::ByteWriterTrait).
//!
//! # Decoding
//!
//! ```
//! use okim_qoi::QoiDecoder;
//!
//! # let data = {
//! #     use okim_core::bit_depth::BitDepth;
//! #     use okim_core::colorspace::ColorSpace;
//! #     use okim_core::options::EncoderOptions;
//! #     let options = EncoderOptions::new(1, 1, ColorSpace::RGBA, BitDepth::Eight);
//! #     okim_qoi::QoiEncoder::new(&[0, 0, 0, 255], options).encode_to_vec().unwrap()
//! # };
//! let mut decoder = QoiDecoder::new(&data);
//! let pixels = decoder.decode().unwrap();
//! let (width, height) = decoder.dimensions().unwrap();
//! ```
//!
//! # Encoding
//!
//! ```
//! use okim_core::bit_depth::BitDepth;
//! use okim_core::colorspace::ColorSpace;
//! use okim_core::options::EncoderOptions;
//! use okim_qoi::QoiEncoder;
//!
//! let pixels = [127_u8, 0, 255];
//! let options = EncoderOptions::new(1, 1, ColorSpace::RGB, BitDepth::Eight);
//! let data = QoiEncoder::new(&pixels, options).encode_to_vec().unwrap();
//! assert!(okim_qoi::is_qoi(&data));
//! ```

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use okim_core;

mod constants;
mod decoder;
mod encoder;
mod errors;
