//! Bounds-checked cursor over a datagram.

use crate::WireError;

pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn byte(&mut self) -> Result<u8, WireError> {
        let [b] = self.take::<1>()?;
        Ok(b)
    }

    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        if self.buf.len() - self.pos < N {
            return Err(WireError::InvalidFraming("truncated message"));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Reject datagrams with bytes past the message body.
    pub fn finish(&self) -> Result<(), WireError> {
        if self.pos != self.buf.len() {
            return Err(WireError::InvalidFraming("trailing bytes"));
        }
        Ok(())
    }
}
