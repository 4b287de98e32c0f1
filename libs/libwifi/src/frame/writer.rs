use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Error;
use crate::frame::components::MacAddress;

/// A growable frame buffer with a hard upper bound.
///
/// Every write checks the bound first. Nothing is ever written past `limit`, the
/// write fails with [Error::BufferTooSmall] instead.
/// All multi-byte integers are written in little endian, which is the 802.11 wire order.
#[derive(Debug)]
pub struct FrameWriter {
    buf: Vec<u8>,
    limit: usize,
}

impl FrameWriter {
    pub fn with_limit(limit: usize) -> Self {
        FrameWriter {
            buf: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.buf.len()
    }

    fn reserve(&self, amount: usize) -> Result<(), Error> {
        if amount > self.remaining() {
            return Err(Error::BufferTooSmall {
                needed: self.buf.len() + amount,
                limit: self.limit,
            });
        }
        Ok(())
    }

    pub fn put_u8(&mut self, value: u8) -> Result<(), Error> {
        self.reserve(1)?;
        self.buf.push(value);
        Ok(())
    }

    pub fn put_u16(&mut self, value: u16) -> Result<(), Error> {
        self.reserve(2)?;
        // Writing into a Vec can't fail.
        let _ = self.buf.write_u16::<LittleEndian>(value);
        Ok(())
    }

    pub fn put_u32(&mut self, value: u32) -> Result<(), Error> {
        self.reserve(4)?;
        let _ = self.buf.write_u32::<LittleEndian>(value);
        Ok(())
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.reserve(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn put_mac(&mut self, address: &MacAddress) -> Result<(), Error> {
        self.put_bytes(&address.encode())
    }

    /// Write a one byte length prefix followed by `bytes`.
    /// `id` is only used to describe the offending field on error.
    pub fn put_length_prefixed(&mut self, id: u8, bytes: &[u8]) -> Result<(), Error> {
        let len = u8::try_from(bytes.len()).map_err(|_| Error::ElementTooLong {
            id,
            len: bytes.len(),
        })?;
        self.reserve(1 + bytes.len())?;
        self.buf.push(len);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Write a complete TLV element.
    pub fn put_element(&mut self, id: u8, body: &[u8]) -> Result<(), Error> {
        let len = u8::try_from(body.len()).map_err(|_| Error::ElementTooLong {
            id,
            len: body.len(),
        })?;
        self.reserve(2 + body.len())?;
        self.buf.push(id);
        self.buf.push(len);
        self.buf.extend_from_slice(body);
        Ok(())
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_fields() {
        let mut writer = FrameWriter::with_limit(7);
        writer.put_u8(0x01).unwrap();
        writer.put_u16(0x0203).unwrap();
        writer.put_u32(0x04050607).unwrap();

        assert_eq!(
            writer.into_inner(),
            vec![0x01, 0x03, 0x02, 0x07, 0x06, 0x05, 0x04]
        );
    }

    #[test]
    fn test_limit_is_never_exceeded() {
        let mut writer = FrameWriter::with_limit(3);
        writer.put_u16(0xffff).unwrap();

        let error = writer.put_u16(0xffff).unwrap_err();
        assert!(matches!(
            error,
            Error::BufferTooSmall {
                needed: 4,
                limit: 3
            }
        ));
        // The failed write must not have touched the buffer.
        assert_eq!(writer.len(), 2);

        writer.put_u8(0).unwrap();
        assert_eq!(writer.remaining(), 0);
        assert!(writer.put_bytes(&[1]).is_err());
    }

    #[test]
    fn test_element_too_long() {
        let mut writer = FrameWriter::with_limit(1024);
        let body = vec![0u8; 256];

        let error = writer.put_element(52, &body).unwrap_err();
        assert!(matches!(error, Error::ElementTooLong { id: 52, len: 256 }));
    }

    #[test]
    fn test_element() {
        let mut writer = FrameWriter::with_limit(5);
        writer.put_element(3, &[1, 255]).unwrap();
        assert_eq!(writer.into_inner(), vec![3, 2, 1, 255]);
    }
}
