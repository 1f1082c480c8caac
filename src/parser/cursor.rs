//! Zero-copy byte cursor for binary parsing

use crate::error::DecodeError;

/// Bounded read position over an immutable byte slice
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, position: 0 }
    }

    /// Cursor starting at `base`; reported offsets stay relative to the
    /// start of `data`
    pub fn with_offset(data: &'a [u8], base: usize) -> Self {
        ByteCursor {
            data,
            position: base.min(data.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// True once every byte has been consumed
    pub fn eos(&self) -> bool {
        self.remaining() == 0
    }

    /// Take exactly `count` bytes as a zero-copy slice
    pub fn take(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        if count > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                at: self.position,
                need: count,
                rem: self.remaining(),
            });
        }

        let start = self.position;
        self.position += count;
        Ok(&self.data[start..self.position])
    }

    /// Take exactly `N` bytes into an array
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}
