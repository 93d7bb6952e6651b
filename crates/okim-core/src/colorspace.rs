/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image colorspace information shared by the okim codecs.

/// All image colorspaces understood by the library
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Red, Green, Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA,
    /// Grayscale colorspace
    Luma,
    /// Grayscale with alpha colorspace
    LumaA
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R, G and B colors to
    /// make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB => 3,
            Self::RGBA => 4,
            Self::Luma => 1,
            Self::LumaA => 2
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA | Self::LumaA)
    }

    /// Returns the index of the alpha channel in a pixel, or `None`
    /// if the colorspace carries no alpha channel
    pub const fn alpha_position(&self) -> Option<usize> {
        match self {
            Self::RGBA => Some(3),
            Self::LumaA => Some(1),
            _ => None
        }
    }
}

/// Encapsulates all colorspaces supported by the library
pub static ALL_COLORSPACES: [ColorSpace; 4] = [
    ColorSpace::RGB,
    ColorSpace::RGBA,
    ColorSpace::Luma,
    ColorSpace::LumaA
];

/// Color characteristics
///
/// Gives more information about how values in a colorspace are to
/// be interpreted.
///
/// Formats that store this as a header field treat it as metadata
/// only, it does not change how pixels are coded.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorCharacteristics {
    /// sRGB transfer function, with a linear alpha channel where
    /// one is present
    sRGB,
    /// Linear transfer function on all channels
    Linear
}
