use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Forward-only reader over any byte stream with a switchable byte order.
///
/// "Motorola" order is big-endian, "Intel" order is little-endian. The
/// position only ever moves forward.
pub struct SequentialReader<'a> {
    inner: &'a mut dyn Read,
    motorola: bool,
    position: u64,
}

impl<'a> SequentialReader<'a> {
    /// Big-endian reader, the usual default for image containers.
    pub fn new(inner: &'a mut dyn Read) -> Self {
        Self::with_byte_order(inner, true)
    }

    pub fn with_byte_order(inner: &'a mut dyn Read, motorola: bool) -> Self {
        Self {
            inner,
            motorola,
            position: 0,
        }
    }

    pub fn set_motorola_byte_order(&mut self, motorola: bool) {
        self.motorola = motorola;
    }

    pub fn is_motorola_byte_order(&self) -> bool {
        self.motorola
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn get_u8(&mut self) -> io::Result<u8> {
        let v = self.inner.read_u8()?;
        self.position += 1;
        Ok(v)
    }

    pub fn get_i8(&mut self) -> io::Result<i8> {
        let v = self.inner.read_i8()?;
        self.position += 1;
        Ok(v)
    }

    pub fn get_u16(&mut self) -> io::Result<u16> {
        let v = if self.motorola {
            self.inner.read_u16::<BigEndian>()?
        } else {
            self.inner.read_u16::<LittleEndian>()?
        };
        self.position += 2;
        Ok(v)
    }

    pub fn get_i16(&mut self) -> io::Result<i16> {
        let v = if self.motorola {
            self.inner.read_i16::<BigEndian>()?
        } else {
            self.inner.read_i16::<LittleEndian>()?
        };
        self.position += 2;
        Ok(v)
    }

    pub fn get_u32(&mut self) -> io::Result<u32> {
        let v = if self.motorola {
            self.inner.read_u32::<BigEndian>()?
        } else {
            self.inner.read_u32::<LittleEndian>()?
        };
        self.position += 4;
        Ok(v)
    }

    pub fn get_i32(&mut self) -> io::Result<i32> {
        let v = if self.motorola {
            self.inner.read_i32::<BigEndian>()?
        } else {
            self.inner.read_i32::<LittleEndian>()?
        };
        self.position += 4;
        Ok(v)
    }

    pub fn get_bytes(&mut self, count: usize) -> io::Result<Vec<u8>> {
        let mut v = vec![0u8; count];
        self.inner.read_exact(&mut v)?;
        self.position += count as u64;
        Ok(v)
    }

    /// Reads `count` bytes and decodes them lossily as UTF-8.
    pub fn get_string(&mut self, count: usize) -> io::Result<String> {
        let bytes = self.get_bytes(count)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Skips exactly `count` bytes, failing with `UnexpectedEof` if the
    /// stream ends first.
    pub fn skip(&mut self, count: u64) -> io::Result<()> {
        if self.try_skip(count)? {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("unable to skip {} bytes", count),
            ))
        }
    }

    /// Skips up to `count` bytes; `false` if the stream ended early.
    pub fn try_skip(&mut self, count: u64) -> io::Result<bool> {
        let mut limited = (&mut *self.inner).take(count);
        let skipped = io::copy(&mut limited, &mut io::sink())?;
        self.position += skipped;
        Ok(skipped == count)
    }
}
