// SMS TPDU codec primitives - bounds-checked reads and shared error type
//
// Every structural field of a PDU goes through `PduCursor`, which refuses to
// read past the end of the buffer. The field-level codecs in `datatypes` and the
// orchestrator in `pdu` build on top of it.

use bytes::{Buf, BufMut, BytesMut};
use std::io::Cursor;
use thiserror::Error;

/// Maximum length of the TP-User-Data field in octets (TS 23.040 9.2.3.24)
pub const MAX_USER_DATA_OCTETS: usize = 140;

/// Codec errors with enough context to report where a PDU went wrong
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Couldn't convert PDU from hex to binary: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("PDU too short reading {field}: need {needed} bytes, have {have}")]
    InsufficientLength {
        field: &'static str,
        needed: usize,
        have: usize,
    },

    #[error("Unhandled message type: {0:#04x}")]
    UnsupportedMessageType(u8),

    #[error("Malformed concatenation header (IE {id:#04x}): {reason}")]
    MalformedConcatenationHeader { id: u8, reason: String },

    /// A coding scheme the classifier cannot place. Every DCS octet maps to an
    /// alphabet, with unknown groups treated as 8-bit or the default alphabet,
    /// so decoding never returns this; it stays for callers that classify
    /// coding schemes themselves.
    #[error("Unknown data coding scheme: {0:#04x}")]
    UnknownEncoding(u8),

    #[error("UCS-2 user data has odd length {0}")]
    InvalidUcs2Length(usize),

    #[error("Character {0:?} is not in the GSM 7-bit alphabet")]
    UnencodableCharacter(char),

    #[error("Field '{field}' validation failed: {reason}")]
    FieldValidation { field: &'static str, reason: String },
}

impl CodecError {
    /// True for errors that the decoder recovers from locally
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedConcatenationHeader { .. } | CodecError::UnknownEncoding(_)
        )
    }
}

/// Bounds-checked reader over raw PDU bytes.
///
/// Reads either return the requested span and advance, or fail with
/// `CodecError::InsufficientLength` and leave the position untouched.
#[derive(Debug, Clone)]
pub struct PduCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> PduCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Bytes left between the current position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    /// Fail unless at least `needed` bytes are left
    pub fn ensure(&self, field: &'static str, needed: usize) -> Result<(), CodecError> {
        let have = self.remaining();
        if have < needed {
            return Err(CodecError::InsufficientLength {
                field,
                needed,
                have,
            });
        }
        Ok(())
    }

    /// Read the next `n` bytes as a sub-slice of the underlying buffer
    pub fn read(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(field, n)?;

        let data: &'a [u8] = *self.inner.get_ref();
        let start = self.position();
        let span = &data[start..start + n];
        self.inner.advance(n);
        Ok(span)
    }

    /// Read a single octet
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, CodecError> {
        self.ensure(field, 1)?;
        Ok(self.inner.get_u8())
    }

    /// Everything that has not been consumed yet, without advancing
    pub fn rest(&self) -> &'a [u8] {
        let data: &'a [u8] = *self.inner.get_ref();
        &data[self.position()..]
    }
}

/// Encode a single byte
pub fn encode_u8(buf: &mut BytesMut, value: u8) {
    buf.put_u8(value);
}

/// Encode a length octet, rejecting values that do not fit
pub fn encode_length(
    buf: &mut BytesMut,
    value: usize,
    field: &'static str,
) -> Result<(), CodecError> {
    let octet = u8::try_from(value).map_err(|_| CodecError::FieldValidation {
        field,
        reason: format!("length {value} does not fit in one octet"),
    })?;
    buf.put_u8(octet);
    Ok(())
}
