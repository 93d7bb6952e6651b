/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global decoder options

/// Decoder options
///
/// Limits in here exist to stop hostile files from turning a small
/// input into an enormous allocation, decoders reject images that
/// exceed them before touching pixel data.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will not try to decode
    /// images larger than the specified width.
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Maximum height for which decoders will not try to decode
    /// images larger than the specified height.
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Maximum number of pixels (width times height) a single image
    /// may carry.
    ///
    /// - Default value: 400 million
    max_pixels:  usize,
    /// Whether to treat recoverable irregularities in the input as
    /// hard errors.
    ///
    /// When set to false, decoders log such irregularities via the
    /// `log` crate and continue where the format allows it.
    ///
    /// - Default value: true
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   1 << 14,
            max_height:  1 << 14,
            max_pixels:  400_000_000,
            strict_mode: true
        }
    }
}

/// Getters
impl DecoderOptions {
    /// Get the maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get the maximum height configured for which the decoder
    /// should not try to decode images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Get the maximum number of pixels a single image may carry
    pub const fn max_pixels(&self) -> usize {
        self.max_pixels
    }

    /// Return true whether the decoder should be in strict mode and
    /// reject questionable input
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }
}

/// Setters
impl DecoderOptions {
    /// Set the maximum width for which the decoder should not try
    /// decoding images greater than that width
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum height for which the decoder should not try
    /// decoding images greater than that height
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the maximum number of pixels a single image may carry
    #[must_use]
    pub fn set_max_pixels(mut self, pixels: usize) -> Self {
        self.max_pixels = pixels;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode.
    ///
    /// Turning this off raises the error tolerance, recoverable
    /// irregularities are logged instead of rejected.
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
