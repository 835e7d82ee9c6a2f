//! Cursor over an in-memory file image.

use crate::error::DecodeError;
use crate::validation::{Diagnostic, Diagnostics};

/// Sequential reader that reports truncation as [`DecodeError::UnexpectedEof`].
#[derive(Debug)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Fail unless at least `needed` bytes remain, without consuming them.
    pub fn require(&self, needed: usize, context: impl Into<String>) -> Result<(), DecodeError> {
        if self.remaining() < needed {
            return Err(DecodeError::UnexpectedEof {
                context: context.into(),
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Consume exactly `len` bytes.
    pub fn take(&mut self, len: usize, context: impl Into<String>) -> Result<&'a [u8], DecodeError> {
        self.require(len, context)?;
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Consume a fixed-size array.
    pub fn array<const N: usize>(&mut self, context: impl Into<String>) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, context)?);
        Ok(out)
    }

    pub fn u8(&mut self, context: impl Into<String>) -> Result<u8, DecodeError> {
        Ok(self.take(1, context)?[0])
    }

    pub fn u16_be(&mut self, context: impl Into<String>) -> Result<u16, DecodeError> {
        let bytes = self.array::<2>(context)?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Warn about anything left over after the declared payload.
    pub fn finish(self, what: &str, diagnostics: &mut Diagnostics) {
        let extra = self.remaining();
        if extra > 0 {
            diagnostics.push(
                Diagnostic::warning(
                    "tileforge::decode::trailing-bytes",
                    format!("{} has {} unexpected trailing byte(s); ignored", what, extra),
                )
                .with_help("The file may have been written by another tool or a newer version"),
            );
        }
    }
}
