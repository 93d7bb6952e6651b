/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader and writer.
//!
//! The reader borrows an in-memory buffer and hands out endian
//! aware integer reads with either zero-on-EOF or error-returning
//! behavior, whichever the caller can afford at that point.
//!
//! The writer is generic over [`ByteWriterTrait`], letting encoders
//! emit into a growable vector, a fixed slice or a buffered file
//! with the same code.

pub use reader::{ByteIoError, ByteReader};
pub use writer::{ByteWriter, ByteWriterTrait};

mod reader;
mod writer;
