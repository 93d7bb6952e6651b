/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::trace;
use okim_core::bytestream::{ByteWriter, ByteWriterTrait};
use okim_core::colorspace::{ColorCharacteristics, ColorSpace};
use okim_core::options::EncoderOptions;

use crate::constants::{
    pixel_hash, QOI_HEADER_SIZE, QOI_MAGIC, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB,
    QOI_OP_RGBA, QOI_OP_RUN, QOI_PADDING, QOI_PIXELS_MAX
};
use crate::QoiEncodeErrors;

const SUPPORTED_COLORSPACES: [ColorSpace; 2] = [ColorSpace::RGB, ColorSpace::RGBA];

/// A Quite OK Image encoder
///
/// All input validation happens before a single byte is written,
/// the only error a sink can observe after output started flowing
/// is its own write failure.
///
/// # Example
/// - Encode a 100 by 100 RGB image
///
/// ```
/// use okim_core::bit_depth::BitDepth;
/// use okim_core::colorspace::ColorSpace;
/// use okim_core::options::EncoderOptions;
/// use okim_qoi::QoiEncodeErrors;
/// use okim_qoi::QoiEncoder;
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// fn main() -> Result<(), QoiEncodeErrors> {
///     let pixels = std::array::from_fn::<u8, { W * H * 3 }, _>(|i| (i % 256) as u8);
///     let mut encoder =
///         QoiEncoder::new(&pixels, EncoderOptions::new(W, H, ColorSpace::RGB, BitDepth::Eight));
///     let mut sink = vec![];
///     encoder.encode(&mut sink)?;
///     // write the bytes somewhere, or do something else
///     Ok(())
/// }
/// ```
pub struct QoiEncoder<'a> {
    // raw pixels, in RGB or RGBA
    pixel_data:            &'a [u8],
    options:               EncoderOptions,
    color_characteristics: ColorCharacteristics
}

impl<'a> QoiEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - `data`: Pixel data, its length must equal
    ///   `width * height * colorspace channels`
    /// - `options`: Describes the data, carrying width, height and
    ///   the number of color components
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> QoiEncoder<'a> {
        QoiEncoder {
            pixel_data: data,
            options,
            color_characteristics: ColorCharacteristics::sRGB
        }
    }

    /// Set the color characteristics written to the header's
    /// colorspace byte.
    ///
    /// This is metadata only, pixels are coded the same either way
    pub fn set_color_characteristics(&mut self, characteristics: ColorCharacteristics) {
        self.color_characteristics = characteristics;
    }

    /// Return the maximum possible size of the encoded output, the
    /// worst case of every pixel coded as a literal plus header and
    /// trailer.
    ///
    /// An upper bound, not a sizing recommendation
    pub fn max_size(&self) -> usize {
        self.options.width()
            * self.options.height()
            * (self.options.colorspace().num_components() + 1)
            + QOI_HEADER_SIZE
            + QOI_PADDING
    }

    /// Validate the pixel buffer against the options, returning the
    /// channel byte for the header
    fn sanity_check(&self) -> Result<u8, QoiEncodeErrors> {
        let options = &self.options;

        if self.pixel_data.is_empty() {
            return Err(QoiEncodeErrors::EmptyPixelBuffer);
        }
        if options.width() == 0 || options.height() == 0 {
            return Err(QoiEncodeErrors::ZeroPixelCount);
        }
        if (options.width() as u64) > u64::from(u32::MAX) {
            return Err(QoiEncodeErrors::TooLargeDimensions(options.width()));
        }
        if (options.height() as u64) > u64::from(u32::MAX) {
            return Err(QoiEncodeErrors::TooLargeDimensions(options.height()));
        }

        let pixel_count = (options.width() as u64) * (options.height() as u64);

        if pixel_count > QOI_PIXELS_MAX as u64 {
            return Err(QoiEncodeErrors::ImageTooLarge(
                pixel_count as usize,
                QOI_PIXELS_MAX
            ));
        }

        let channels = match options.colorspace() {
            ColorSpace::RGB => 3,
            ColorSpace::RGBA => 4,
            _ => {
                return Err(QoiEncodeErrors::UnsupportedColorspace(
                    options.colorspace(),
                    &SUPPORTED_COLORSPACES
                ))
            }
        };

        let expected_len = (pixel_count as usize) * usize::from(channels);

        if self.pixel_data.len() != expected_len {
            return Err(QoiEncodeErrors::Generic(
                "Expected length doesn't match pixels length"
            ));
        }

        Ok(channels)
    }

    fn encode_headers<T: ByteWriterTrait>(
        &self, channels: u8, writer: &mut ByteWriter<T>
    ) -> Result<(), QoiEncodeErrors> {
        // qoif
        writer.write_all(&QOI_MAGIC.to_be_bytes())?;
        // dimensions were confirmed to fit by the sanity check
        writer.write_u32_be_err(self.options.width() as u32)?;
        writer.write_u32_be_err(self.options.height() as u32)?;
        writer.write_u8_err(channels)?;
        // colorspace
        let xtic = u8::from(self.color_characteristics == ColorCharacteristics::Linear);
        writer.write_u8_err(xtic)?;

        Ok(())
    }

    /// Encode the pixels into `sink`.
    ///
    /// # Arguments
    /// - `sink`: The destination for encoded bytes
    ///
    /// # Returns
    /// - `Ok(size)`: Actual bytes used for encoding
    /// - `Err`: The error encountered during encoding
    pub fn encode<T: ByteWriterTrait>(&mut self, sink: T) -> Result<usize, QoiEncodeErrors> {
        let channels = self.sanity_check()?;

        let mut stream = ByteWriter::new(sink);

        // encoded output for typical graphical content lands around
        // a third of the raw size, reserve that and let growable
        // sinks extend as needed
        let estimate = (self.pixel_data.len().saturating_mul(32) / 100).max(512);
        stream.reserve(estimate.min(self.max_size()))?;

        self.encode_headers(channels, &mut stream)?;

        let mut index = [[0_u8; 4]; 64];
        // starting pixel
        let mut px = [0, 0, 0, 255];
        let mut px_prev = [0, 0, 0, 255];

        let mut run: u8 = 0;

        let channel_count = usize::from(channels);

        for pix_chunk in self.pixel_data.chunks_exact(channel_count) {
            px[0..channel_count].copy_from_slice(pix_chunk);

            if px == px_prev {
                run += 1;

                if run == 62 {
                    stream.write_u8_err(QOI_OP_RUN | (run - 1))?;
                    run = 0;
                }
            } else {
                if run > 0 {
                    stream.write_u8_err(QOI_OP_RUN | (run - 1))?;
                    run = 0;
                }

                let index_pos = pixel_hash(px);

                if index[index_pos] == px {
                    stream.write_u8_err(QOI_OP_INDEX | (index_pos as u8))?;
                } else {
                    index[index_pos] = px;

                    if px[3] == px_prev[3] {
                        // all deltas live in 8 bit wrap-around
                        // space, the range tests below pick out the
                        // unsigned representatives of the small
                        // signed windows
                        let vr = px[0].wrapping_sub(px_prev[0]);
                        let vg = px[1].wrapping_sub(px_prev[1]);
                        let vb = px[2].wrapping_sub(px_prev[2]);

                        let vg_r = vr.wrapping_sub(vg);
                        let vg_b = vb.wrapping_sub(vg);

                        if !(2..=253).contains(&vr)
                            && !(2..=253).contains(&vg)
                            && !(2..=253).contains(&vb)
                        {
                            stream.write_u8_err(
                                QOI_OP_DIFF
                                    | vr.wrapping_add(2) << 4
                                    | vg.wrapping_add(2) << 2
                                    | vb.wrapping_add(2)
                            )?;
                        } else if !(8..=247).contains(&vg_r)
                            && !(32..=223).contains(&vg)
                            && !(8..=247).contains(&vg_b)
                        {
                            stream.write_u8_err(QOI_OP_LUMA | vg.wrapping_add(32))?;
                            stream
                                .write_u8_err(vg_r.wrapping_add(8) << 4 | vg_b.wrapping_add(8))?;
                        } else {
                            stream.write_u8_err(QOI_OP_RGB)?;
                            stream.write_const_bytes(&[px[0], px[1], px[2]])?;
                        }
                    } else {
                        stream.write_u8_err(QOI_OP_RGBA)?;
                        stream.write_u32_be_err(u32::from_be_bytes(px))?;
                    }
                }
            }

            px_prev = px;
        }
        if run > 0 {
            stream.write_u8_err(QOI_OP_RUN | (run - 1))?;
        }
        // write trailing bytes
        stream.write_u64_be_err(0x01)?;
        stream.flush()?;

        let len = stream.bytes_written();

        trace!("Finished encoding image, {len} bytes");

        Ok(len)
    }

    /// Encode the pixels into a freshly allocated byte vector.
    ///
    /// The vector is sized to exactly the encoded length
    pub fn encode_to_vec(&mut self) -> Result<Vec<u8>, QoiEncodeErrors> {
        let mut output = Vec::new();

        self.encode(&mut output)?;

        Ok(output)
    }
}
