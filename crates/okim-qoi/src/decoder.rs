/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{error, trace};
use okim_core::bit_depth::BitDepth;
use okim_core::bytestream::ByteReader;
use okim_core::colorspace::{ColorCharacteristics, ColorSpace};
use okim_core::options::DecoderOptions;

use crate::constants::{
    pixel_hash, QOI_HEADER_SIZE, QOI_MASK_2, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_RGB, QOI_OP_RGBA,
    QOI_OP_RUN, QOI_PADDING
};
use crate::errors::QoiErrors;

/// A Quite OK Image decoder
///
/// The decoder is initialized by calling `new` and either of
/// [`decode_headers`] to parse the image descriptor or [`decode`]
/// to return uncompressed pixels.
///
/// Additional details of the compressed image like width, height
/// and colorspace are accessible after decoding headers.
///
/// [`decode_headers`]:QoiDecoder::decode_headers
/// [`decode`]:QoiDecoder::decode
pub struct QoiDecoder<'a> {
    width:                 usize,
    height:                usize,
    colorspace:            ColorSpace,
    color_characteristics: ColorCharacteristics,
    decoded_headers:       bool,
    stream:                ByteReader<'a>,
    options:               DecoderOptions
}

impl<'a> QoiDecoder<'a> {
    /// Create a new QOI format decoder with the default options
    ///
    /// # Arguments
    /// - `data`: The compressed qoi data
    ///
    /// # Example
    ///
    /// ```no_run
    /// let mut decoder = okim_qoi::QoiDecoder::new(&[]);
    /// // additional code
    /// ```
    pub fn new(data: &'a [u8]) -> QoiDecoder<'a> {
        QoiDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new QOI format decoder that obeys specified
    /// restrictions.
    ///
    /// E.g can be used to set width and height limits to prevent
    /// out of memory attacks
    ///
    /// # Arguments
    /// - `data`: The compressed qoi data
    /// - `options`: Decoder options that the decoder should respect
    ///
    /// # Example
    /// ```
    /// use okim_core::options::DecoderOptions;
    /// use okim_qoi::QoiDecoder;
    /// // only decode images less than 10 in both width and height
    ///
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = QoiDecoder::new_with_options(&[], options);
    /// ```
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> QoiDecoder<'a> {
        QoiDecoder {
            width: 0,
            height: 0,
            colorspace: ColorSpace::RGB,
            color_characteristics: ColorCharacteristics::sRGB,
            decoded_headers: false,
            stream: ByteReader::new(data),
            options
        }
    }

    /// Decode the 14 byte QOI descriptor, storing the parsed
    /// information into the decoder instance.
    ///
    /// # Returns
    /// - On success: Nothing
    /// - On error: The error encountered when parsing the header,
    ///   an instance of [QoiErrors]
    ///
    /// [QoiErrors]:crate::errors::QoiErrors
    pub fn decode_headers(&mut self) -> Result<(), QoiErrors> {
        if !self.stream.has(QOI_HEADER_SIZE) {
            return Err(QoiErrors::TooSmall(QOI_HEADER_SIZE, self.stream.remaining()));
        }
        // match magic bytes.
        let magic = self.stream.get_fixed_bytes_or_zero::<4>();

        if &magic != b"qoif" {
            return Err(QoiErrors::MissingSignature);
        }

        // these were confirmed to be in bounds by has, so use the
        // non failing routines
        let width = self.stream.get_u32_be() as usize;
        let height = self.stream.get_u32_be() as usize;
        let channels = self.stream.get_u8();
        let colorspace = self.stream.get_u8();

        if width == 0 || height == 0 {
            return Err(QoiErrors::ZeroDimension);
        }

        self.colorspace = match channels {
            3 => ColorSpace::RGB,
            4 => ColorSpace::RGBA,
            _ => return Err(QoiErrors::InvalidChannel(channels))
        };
        self.color_characteristics = match colorspace {
            0 => ColorCharacteristics::sRGB,
            1 => ColorCharacteristics::Linear,
            _ => {
                if self.options.strict_mode() {
                    return Err(QoiErrors::InvalidColorspace(colorspace));
                }
                error!("Unknown/invalid colorspace value {colorspace}, expected 0 or 1");
                ColorCharacteristics::sRGB
            }
        };

        let pixels = width.checked_mul(height).unwrap_or(usize::MAX);

        if pixels > self.options.max_pixels() {
            return Err(QoiErrors::ImageTooLarge(pixels, self.options.max_pixels()));
        }
        if width > self.options.max_width() {
            let msg = format!(
                "Width {} greater than max configured width {}",
                width,
                self.options.max_width()
            );
            return Err(QoiErrors::Generic(msg));
        }
        if height > self.options.max_height() {
            let msg = format!(
                "Height {} greater than max configured height {}",
                height,
                self.options.max_height()
            );
            return Err(QoiErrors::Generic(msg));
        }

        self.width = width;
        self.height = height;

        trace!("Image width: {:?}", self.width);
        trace!("Image height: {:?}", self.height);
        trace!("Image colorspace: {:?}", self.colorspace);
        self.decoded_headers = true;

        Ok(())
    }

    /// Return the number of bytes required to hold the decoded
    /// image.
    ///
    /// # Returns
    /// - `Some(usize)`: Minimum size for a buffer needed to decode
    ///   the image
    /// - `None`: Indicates the headers were not decoded, or the
    ///   size calculation overflows a usize
    pub fn output_buffer_size(&self) -> Option<usize> {
        if !self.decoded_headers {
            return None;
        }
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.colorspace.num_components())
    }

    /// Decode the bytes of a QOI image, returning the uncompressed
    /// pixels or the error encountered during decoding.
    ///
    /// Pixels are laid out top to bottom, left to right, with 3 or
    /// 4 bytes per pixel depending on the image's channel count.
    ///
    /// Additional details about the encoded image can be accessed
    /// after this call, e.g width and height via [`dimensions`].
    ///
    /// [`dimensions`]:Self::dimensions
    pub fn decode(&mut self) -> Result<Vec<u8>, QoiErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }
        let size = match self.output_buffer_size() {
            Some(size) => size,
            None => return Err(QoiErrors::GenericStatic("Output size overflows usize"))
        };

        let mut pixels = Vec::new();

        if pixels.try_reserve_exact(size).is_err() {
            return Err(QoiErrors::OutOfMemory(size));
        }
        pixels.resize(size, 0);

        self.decode_into(&mut pixels)?;

        Ok(pixels)
    }

    /// Decode a compressed QOI image, storing the pixels into the
    /// provided output buffer.
    ///
    /// On error the buffer may hold a partially decoded prefix of
    /// the image, the error tells the caller the result is not to
    /// be trusted.
    ///
    /// # Arguments
    /// * `pixels`: Output buffer to which we will write decoded
    ///   pixels, must hold at least
    ///   [`output_buffer_size`](Self::output_buffer_size) bytes
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), QoiErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }

        let expected = match self.output_buffer_size() {
            Some(size) => size,
            None => return Err(QoiErrors::GenericStatic("Output size overflows usize"))
        };

        if pixels.len() < expected {
            return Err(QoiErrors::TooSmallOutput(expected, pixels.len()));
        }

        match self.colorspace.num_components() {
            3 => self.decode_inner_generic::<3>(&mut pixels[..expected]),
            4 => self.decode_inner_generic::<4>(&mut pixels[..expected]),
            _ => unreachable!()
        }
    }

    fn decode_inner_generic<const SIZE: usize>(
        &mut self, pixels: &mut [u8]
    ) -> Result<(), QoiErrors> {
        let mut index = [[0_u8; 4]; 64];
        // starting pixel
        let mut px = [0, 0, 0, 255];

        let mut run = 0_usize;

        // opcodes never extend into the 8 byte stream trailer. Once
        // the cursor reaches it the previous pixel is replicated,
        // matching the reference decoder's tolerance for truncated
        // opcode streams
        let last_tag_position = self.stream.len().saturating_sub(QOI_PADDING);

        for pix_chunk in pixels.chunks_exact_mut(SIZE) {
            if run > 0 {
                run -= 1;
            } else if self.stream.position() < last_tag_position {
                let tag = self.stream.get_u8();

                if (tag & QOI_MASK_2) == QOI_OP_RUN && tag < QOI_OP_RGB {
                    // 0xfe and 0xff carry whole pixels, everything
                    // else in the 11 prefixed range is a run length
                    run = usize::from(tag & 0x3f);
                } else {
                    if tag == QOI_OP_RGB {
                        let bytes = self.stream.get_fixed_bytes_or_zero::<3>();

                        px[0] = bytes[0];
                        px[1] = bytes[1];
                        px[2] = bytes[2];
                    } else if tag == QOI_OP_RGBA {
                        px = self.stream.get_fixed_bytes_or_zero::<4>();
                    } else if (tag & QOI_MASK_2) == QOI_OP_INDEX {
                        // the upper two bits are zero, the whole
                        // byte is the table slot
                        px = index[usize::from(tag)];
                    } else if (tag & QOI_MASK_2) == QOI_OP_DIFF {
                        px[0] = px[0].wrapping_add(((tag >> 4) & 0x03).wrapping_sub(2));
                        px[1] = px[1].wrapping_add(((tag >> 2) & 0x03).wrapping_sub(2));
                        px[2] = px[2].wrapping_add((tag & 0x03).wrapping_sub(2));
                    } else {
                        // QOI_OP_LUMA
                        let b2 = self.stream.get_u8();
                        let vg = (tag & 0x3f).wrapping_sub(32);

                        px[0] =
                            px[0].wrapping_add(vg.wrapping_sub(8).wrapping_add((b2 >> 4) & 0x0f));
                        px[1] = px[1].wrapping_add(vg);
                        px[2] = px[2].wrapping_add(vg.wrapping_sub(8).wrapping_add(b2 & 0x0f));
                    }
                    // run opcodes materialize nothing new, every
                    // other opcode refreshes the color table
                    index[pixel_hash(px)] = px;
                }
            }

            pix_chunk.copy_from_slice(&px[0..SIZE]);
        }

        trace!("Finished decoding image");

        Ok(())
    }

    /// Returns the image colorspace, or `None` if the headers have
    /// not been decoded.
    ///
    /// The colorspace returned can either be
    /// [RGB](okim_core::colorspace::ColorSpace::RGB) or
    /// [RGBA](okim_core::colorspace::ColorSpace::RGBA)
    pub const fn colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            Some(self.colorspace)
        } else {
            None
        }
    }

    /// Returns the color characteristics stored in the image
    /// header, or `None` if the headers have not been decoded.
    ///
    /// This is metadata only, it does not influence how pixels were
    /// coded
    pub const fn color_characteristics(&self) -> Option<ColorCharacteristics> {
        if self.decoded_headers {
            Some(self.color_characteristics)
        } else {
            None
        }
    }

    /// Return the QOI bit depth.
    ///
    /// This is always 8
    ///
    /// # Example
    ///
    /// ```
    /// use okim_core::bit_depth::BitDepth;
    /// use okim_qoi::QoiDecoder;
    /// let decoder = QoiDecoder::new(&[]);
    /// assert_eq!(decoder.bit_depth(), BitDepth::Eight)
    /// ```
    pub const fn bit_depth(&self) -> BitDepth {
        BitDepth::Eight
    }

    /// Return the width and height of the image, or `None` if the
    /// headers have not been decoded.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use okim_qoi::QoiDecoder;
    /// let mut decoder = QoiDecoder::new(&[]);
    ///
    /// decoder.decode_headers().unwrap();
    /// // get dimensions now.
    /// let (w, h) = decoder.dimensions().unwrap();
    /// ```
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }
}

/// Check whether a byte buffer plausibly holds a QOI encoded image.
///
/// Returns true if the buffer is long enough for the shortest
/// possible stream, the header plus one opcode plus the trailer,
/// and the 14 byte header passes validation. No opcode decoding is
/// attempted.
///
/// # Example
/// ```
/// assert!(!okim_qoi::is_qoi(b"not an image"));
/// ```
pub fn is_qoi(data: &[u8]) -> bool {
    if data.len() < QOI_HEADER_SIZE + 1 + QOI_PADDING {
        return false;
    }
    let mut stream = ByteReader::new(data);

    let magic = stream.get_fixed_bytes_or_zero::<4>();

    if &magic != b"qoif" {
        return false;
    }
    let width = stream.get_u32_be();
    let height = stream.get_u32_be();
    let channels = stream.get_u8();
    let colorspace = stream.get_u8();

    width != 0 && height != 0 && matches!(channels, 3 | 4) && matches!(colorspace, 0 | 1)
}
