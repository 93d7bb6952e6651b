/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use okim_core::bytestream::ByteIoError;
use okim_core::colorspace::ColorSpace;

/// Possible errors that may occur during decoding
pub enum QoiErrors {
    /// The input buffer is smaller than the fixed 14 byte image
    /// header.
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is the number of bytes actually present
    TooSmall(usize, usize),
    /// The image does not start with the QOI magic bytes `qoif`.
    ///
    /// Indicates that the buffer is not a qoi file
    MissingSignature,
    /// The header carries a zero width or height
    ZeroDimension,
    /// The header contains an invalid channel number.
    ///
    /// The only supported values are `3` and `4`
    InvalidChannel(u8),
    /// The header contains an invalid colorspace value.
    ///
    /// The value should be `0` or `1`, but this can be ignored if
    /// strict mode is off
    InvalidColorspace(u8),
    /// The image would carry more pixels than the configured limit.
    ///
    /// # Arguments
    /// - 1st argument is the pixel count the header announces
    /// - 2nd argument is the configured limit
    ImageTooLarge(usize, usize),
    /// A structurally impossible opcode byte.
    ///
    /// The six opcodes cover the whole byte range, so this is not
    /// produced today, it is reserved for format extensions
    InvalidEncoding(u8),
    /// The output buffer could not be allocated.
    ///
    /// Carries the number of bytes the allocation asked for
    OutOfMemory(usize),
    /// The caller provided output buffer is too small.
    ///
    /// # Arguments
    /// - 1st argument is the required size
    /// - 2nd argument is the size actually provided
    TooSmallOutput(usize, usize),
    /// Generic message
    Generic(String),
    /// Generic message that does not need heap allocation
    GenericStatic(&'static str),
    /// An I/O error from the underlying bytestream
    IoErrors(ByteIoError)
}

impl Debug for QoiErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            QoiErrors::TooSmall(expected, found) => {
                writeln!(
                    f,
                    "Input too small, the header needs {expected} bytes but only {found} are present"
                )
            }
            QoiErrors::MissingSignature => {
                writeln!(f, "Wrong magic bytes, expected `qoif` as image start")
            }
            QoiErrors::ZeroDimension => {
                writeln!(f, "Zero width or height, the header must describe at least one pixel")
            }
            QoiErrors::InvalidChannel(channel) => {
                writeln!(f, "Unknown channel number {channel}, expected either 3 or 4")
            }
            QoiErrors::InvalidColorspace(colorspace) => {
                writeln!(f, "Unknown colorspace value {colorspace}, expected either 0 or 1")
            }
            QoiErrors::ImageTooLarge(pixels, limit) => {
                writeln!(
                    f,
                    "Image carries {pixels} pixels which is above the configured limit of {limit}"
                )
            }
            QoiErrors::InvalidEncoding(tag) => {
                writeln!(f, "Cannot decode opcode byte {tag:#04x}")
            }
            QoiErrors::OutOfMemory(size) => {
                writeln!(f, "Could not allocate {size} bytes for the output buffer")
            }
            QoiErrors::TooSmallOutput(expected, found) => {
                writeln!(f, "Too small output size, expected {expected} but found {found}")
            }
            QoiErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
            QoiErrors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
            QoiErrors::IoErrors(err) => {
                writeln!(f, "I/O error {err:?}")
            }
        }
    }
}

impl Display for QoiErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for QoiErrors {}

impl From<&'static str> for QoiErrors {
    fn from(r: &'static str) -> Self {
        Self::GenericStatic(r)
    }
}

impl From<ByteIoError> for QoiErrors {
    fn from(err: ByteIoError) -> Self {
        QoiErrors::IoErrors(err)
    }
}

/// Possible errors that may occur during encoding
pub enum QoiEncodeErrors {
    /// The pixel buffer handed to the encoder is empty
    EmptyPixelBuffer,
    /// The encoder options describe an image with zero pixels
    ZeroPixelCount,
    /// The image carries more pixels than the format sanity limit.
    ///
    /// # Arguments
    /// - 1st argument is the pixel count of the image
    /// - 2nd argument is the limit
    ImageTooLarge(usize, usize),
    /// A dimension cannot be represented in the 32 bit header field
    TooLargeDimensions(usize),
    /// Unsupported colorspace.
    ///
    /// The first argument is the colorspace encountered, the second
    /// argument is the list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// Generic message
    Generic(&'static str),
    /// The sink could not receive encoded output
    WriteFailed(ByteIoError)
}

impl Debug for QoiEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            QoiEncodeErrors::EmptyPixelBuffer => {
                writeln!(f, "Cannot encode an empty pixel buffer")
            }
            QoiEncodeErrors::ZeroPixelCount => {
                writeln!(f, "Cannot encode an image with zero width or height")
            }
            QoiEncodeErrors::ImageTooLarge(pixels, limit) => {
                writeln!(
                    f,
                    "Image carries {pixels} pixels which is above the format limit of {limit}"
                )
            }
            QoiEncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimension {found}, QOI stores dimensions as 32 bit integers"
                )
            }
            QoiEncodeErrors::UnsupportedColorspace(found, supported) => {
                writeln!(
                    f,
                    "Cannot encode image with colorspace {found:?} into QOI, supported ones are {supported:?}"
                )
            }
            QoiEncodeErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
            QoiEncodeErrors::WriteFailed(err) => {
                writeln!(f, "Could not write to the output sink: {err:?}")
            }
        }
    }
}

impl Display for QoiEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for QoiEncodeErrors {}

impl From<ByteIoError> for QoiEncodeErrors {
    fn from(err: ByteIoError) -> Self {
        QoiEncodeErrors::WriteFailed(err)
    }
}
