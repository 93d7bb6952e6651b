/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::bytestream::ByteIoError;

/// The sink trait implemented for the okim family of encoders.
///
/// Anything that implements this trait can be handed to an encoder
/// as the destination for encoded bytes.
pub trait ByteWriterTrait {
    /// Write some bytes into the sink returning the number of bytes
    /// written or an error if something bad happened.
    ///
    /// An implementation is free to write fewer bytes than are in
    /// `buf`, use [`write_all_bytes`](Self::write_all_bytes) when a
    /// short write is unacceptable.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError>;
    /// Write all bytes in `buf` to the sink or return an error if
    /// that cannot be done
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;
    /// Write a fixed, compile time known number of bytes.
    ///
    /// Provided separately so implementations can turn small writes
    /// into a handful of instructions.
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError>;
    /// Ensure bytes have reached the sink, an in-memory sink has
    /// nothing to do here
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
    /// A hint telling the sink how many additional bytes to expect.
    ///
    /// Growable sinks can use this to avoid repeated reallocation,
    /// everything else is free to ignore it.
    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError>;
}

impl ByteWriterTrait for &mut Vec<u8> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.reserve(size);
        Ok(())
    }
}

impl ByteWriterTrait for &mut [u8] {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        let amt = core::cmp::min(buf.len(), self.len());
        let (a, b) = core::mem::take(self).split_at_mut(amt);
        a.copy_from_slice(&buf[..amt]);
        *self = b;
        Ok(amt)
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        if buf.len() > self.len() {
            return Err(ByteIoError::NotEnoughBuffer(self.len(), buf.len()));
        }
        let (a, b) = core::mem::take(self).split_at_mut(buf.len());
        a.copy_from_slice(buf);
        *self = b;
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        if N > self.len() {
            return Err(ByteIoError::NotEnoughBuffer(self.len(), N));
        }
        let (a, b) = core::mem::take(self).split_at_mut(N);
        a.copy_from_slice(buf);
        *self = b;
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), ByteIoError> {
        // can't really pre-allocate anything here
        Ok(())
    }
}

impl ByteWriterTrait for &mut BufWriter<File> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        self.write(buf).map_err(ByteIoError::StdIoError)
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.write_all(buf).map_err(ByteIoError::StdIoError)
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        self.flush().map_err(ByteIoError::StdIoError)
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), ByteIoError> {
        Ok(())
    }
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

/// Encapsulates a simple byte writer with support for endian aware
/// writes.
///
/// This wraps anything that implements [`ByteWriterTrait`] and
/// keeps count of the bytes that went through it.
pub struct ByteWriter<T: ByteWriterTrait> {
    sink:          T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new bytestream writer.
    ///
    /// Bytes are written from the start to the end and no
    /// assumptions are made of the nature of the underlying sink.
    pub fn new(sink: T) -> ByteWriter<T> {
        ByteWriter { sink, bytes_written: 0 }
    }

    /// Write bytes from `buf` into the sink and return how many
    /// bytes were written.
    ///
    /// If you want to be sure that all bytes were written, see
    /// [`write_all`](Self::write_all).
    #[inline]
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        let bytes_written = self.sink.write_bytes(buf)?;
        self.bytes_written += bytes_written;
        Ok(bytes_written)
    }

    /// Write all bytes from `buf` into the sink, erroring out if the
    /// sink cannot receive all of them
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.sink.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Write a fixed compile time known number of bytes to the sink
    #[inline]
    pub fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.sink.write_const_bytes(buf)?;
        self.bytes_written += N;
        Ok(())
    }

    /// Write a single byte into the sink or error out if there is
    /// no space
    ///
    /// # Example
    /// ```
    /// use okim_core::bytestream::ByteWriter;
    /// let mut buf = [0; 10];
    /// let mut stream = ByteWriter::new(&mut buf[..]);
    /// assert!(stream.write_u8_err(34).is_ok());
    /// ```
    /// No space
    /// ```
    /// use okim_core::bytestream::ByteWriter;
    /// let mut no_space = [];
    /// let mut stream = ByteWriter::new(&mut no_space[..]);
    /// assert!(stream.write_u8_err(32).is_err());
    /// ```
    #[inline]
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_const_bytes(&[byte])
    }

    /// Write a single byte into the sink or don't write anything if
    /// the sink cannot receive it
    #[inline]
    pub fn write_u8(&mut self, byte: u8) {
        let _ = self.write_const_bytes(&[byte]);
    }

    /// Ensure written bytes have reached the sink
    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.sink.flush_bytes()
    }

    /// Return the number of bytes written through this writer so
    /// far
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Hint to the sink that `additional` more bytes are coming.
    ///
    /// Growable sinks such as `Vec<u8>` use this to pre-allocate,
    /// everything else ignores it.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ByteIoError> {
        self.sink.reserve_capacity(additional)
    }

    /// Consume the writer and return the inner sink we were writing
    /// to.
    ///
    /// After this, the writer can no longer be used
    pub fn inner(self) -> T {
        self.sink
    }

    /// Return an immutable reference to the inner sink
    pub fn inner_ref(&self) -> &T {
        &self.sink
    }

    /// Return a mutable reference to the inner sink
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.sink
    }
}

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<T: ByteWriterTrait> ByteWriter<T> {
            #[inline(always)]
            fn $name(&mut self, value: $int_type, mode: Mode) -> Result<(), ByteIoError> {
                let bytes = match mode {
                    Mode::BE => value.to_be_bytes(),
                    Mode::LE => value.to_le_bytes()
                };
                self.write_const_bytes(&bytes)
            }

            #[inline(always)]
            fn $name2(&mut self, value: $int_type, mode: Mode) {
                let bytes = match mode {
                    Mode::BE => value.to_be_bytes(),
                    Mode::LE => value.to_le_bytes()
                };
                let _ = self.write_const_bytes(&bytes);
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer,")]
            #[doc=concat!("returning an error if the sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name3(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                self.$name(value, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer,")]
            #[doc=concat!("returning an error if the sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name4(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                self.$name(value, Mode::LE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer,")]
            #[doc=concat!("or don't write anything if the sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name5(&mut self, value: $int_type) {
                self.$name2(value, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer,")]
            #[doc=concat!("or don't write anything if the sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name6(&mut self, value: $int_type) {
                self.$name2(value, Mode::LE)
            }
        }
    };
}

write_single_type!(
    write_u16_inner_or_die,
    write_u16_inner_or_none,
    write_u16_be_err,
    write_u16_le_err,
    write_u16_be,
    write_u16_le,
    u16
);

write_single_type!(
    write_u32_inner_or_die,
    write_u32_inner_or_none,
    write_u32_be_err,
    write_u32_le_err,
    write_u32_be,
    write_u32_le,
    u32
);

write_single_type!(
    write_u64_inner_or_die,
    write_u64_inner_or_none,
    write_u64_be_err,
    write_u64_le_err,
    write_u64_be,
    write_u64_le,
    u64
);

#[cfg(test)]
mod tests {
    use super::ByteWriter;

    #[test]
    fn test_vec_sink_grows() {
        let mut output = Vec::new();
        let mut stream = ByteWriter::new(&mut output);

        stream.write_u32_be_err(0x716f6966).unwrap();
        stream.write_u8_err(3).unwrap();
        assert_eq!(stream.bytes_written(), 5);
        assert_eq!(output, vec![0x71, 0x6f, 0x69, 0x66, 3]);
    }

    #[test]
    fn test_slice_sink_is_bounded() {
        let mut buf = [0_u8; 2];
        let mut stream = ByteWriter::new(&mut buf[..]);

        assert!(stream.write_u16_be_err(0x0102).is_ok());
        assert!(stream.write_u8_err(3).is_err());
        assert_eq!(stream.bytes_written(), 2);
        assert_eq!(buf, [1, 2]);
    }
}
