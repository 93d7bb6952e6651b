/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the okim image crates
//!
//! This crate provides the small set of building blocks the
//! decoders and encoders under the `okim` umbrella have in common
//!
//! It currently contains
//!
//! - A bytestream reader over in-memory buffers and a sink-generic
//!   bytestream writer, both with endian aware reads and writes
//! - Colorspace and bit depth information shared by images
//! - Image decoder and encoder options

pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod options;
