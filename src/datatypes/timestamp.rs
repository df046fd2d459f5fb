// ABOUTME: TP-Service-Centre-Time-Stamp (7 semi-octet fields) with signed quarter-hour timezone
// ABOUTME: Renders as YYMMDDHHMMSS±HH while keeping the full quarter-hour offset available

use crate::codec::{CodecError, PduCursor};
use crate::datatypes::semi_octet;
use bytes::{BufMut, BytesMut};
use std::fmt;
use std::str::FromStr;

/// Encoded length of a TP-SCTS field
pub const TIMESTAMP_LEN: usize = 7;

const TZ_SIGN_NEGATIVE: u8 = 0x08;
/// Largest offset representable in one semi-octet pair with the sign bit taken
const MAX_TZ_QUARTERS: i8 = 79;

/// Service centre timestamp: local date/time digits and the offset from UTC
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /// YYMMDDHHMMSS
    digits: String,
    /// Offset from UTC in quarter hours
    timezone_quarters: i8,
}

impl Timestamp {
    /// Creates a timestamp from twelve YYMMDDHHMMSS digits and a quarter-hour offset
    pub fn new(digits: &str, timezone_quarters: i8) -> Result<Self, CodecError> {
        validate(digits, timezone_quarters)?;
        Ok(Self {
            digits: digits.to_string(),
            timezone_quarters,
        })
    }

    /// Decode the seven TP-SCTS octets.
    ///
    /// Never fails: semi-octets are mapped as found and the offset is kept even
    /// when it is out of range, so a bad clock on the service centre does not
    /// cost the message.
    pub fn decode(octets: &[u8; TIMESTAMP_LEN]) -> Self {
        let digits = semi_octet::decode(&octets[..6]);

        let tz = octets[6];
        let quarters = ((tz & 0x07) * 10 + (tz >> 4)) as i8;
        let timezone_quarters = if tz & TZ_SIGN_NEGATIVE != 0 {
            -quarters
        } else {
            quarters
        };

        Self {
            digits,
            timezone_quarters,
        }
    }

    /// Read a TP-SCTS field from the cursor
    pub fn read(cursor: &mut PduCursor<'_>) -> Result<Self, CodecError> {
        let field = cursor.read("timestamp", TIMESTAMP_LEN)?;
        let mut octets = [0u8; TIMESTAMP_LEN];
        octets.copy_from_slice(field);
        Ok(Self::decode(&octets))
    }

    /// Write the seven TP-SCTS octets. Timestamps decoded from malformed
    /// fields are refused rather than written back wrong.
    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        validate(&self.digits, self.timezone_quarters)?;
        buf.put_slice(&semi_octet::encode(&self.digits, "timestamp")?);

        let quarters = self.timezone_quarters.unsigned_abs();
        let mut tz = ((quarters % 10) << 4) | (quarters / 10);
        if self.timezone_quarters < 0 {
            tz |= TZ_SIGN_NEGATIVE;
        }
        buf.put_u8(tz);
        Ok(())
    }

    /// The YYMMDDHHMMSS digits
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Offset from UTC in quarter hours, as carried on the wire
    pub fn timezone_quarters(&self) -> i8 {
        self.timezone_quarters
    }

    /// Offset from UTC in minutes
    pub fn timezone_minutes(&self) -> i32 {
        i32::from(self.timezone_quarters) * 15
    }

    /// Offset from UTC in whole hours; quarter-hour remainders are dropped
    pub fn timezone_hours(&self) -> i8 {
        self.timezone_quarters / 4
    }
}

fn validate(digits: &str, timezone_quarters: i8) -> Result<(), CodecError> {
    if digits.len() != 12 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::FieldValidation {
            field: "timestamp",
            reason: format!("expected 12 digits YYMMDDHHMMSS, got {digits:?}"),
        });
    }
    if !(-MAX_TZ_QUARTERS..=MAX_TZ_QUARTERS).contains(&timezone_quarters) {
        return Err(CodecError::FieldValidation {
            field: "timestamp",
            reason: format!("timezone offset {timezone_quarters} quarters outside ±{MAX_TZ_QUARTERS}"),
        });
    }
    Ok(())
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.timezone_quarters < 0 { '-' } else { '+' };
        write!(
            f,
            "{}{}{:02}",
            self.digits,
            sign,
            self.timezone_hours().unsigned_abs()
        )
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timestamp(\"{self}\", {} quarters)",
            self.timezone_quarters
        )
    }
}

/// Parses the `YYMMDDHHMMSS±HH` form; the offset is taken as whole hours
impl FromStr for Timestamp {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CodecError::FieldValidation {
            field: "timestamp",
            reason: format!("expected YYMMDDHHMMSS±HH, got {s:?}"),
        };

        if s.len() != 15 || !s.is_ascii() {
            return Err(invalid());
        }
        let (digits, offset) = s.split_at(12);
        let negative = match offset.as_bytes()[0] {
            b'+' => false,
            b'-' => true,
            _ => return Err(invalid()),
        };
        let hours = &offset.as_bytes()[1..];
        if !hours.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let hours = ((hours[0] - b'0') * 10 + (hours[1] - b'0')) as i8;
        if !(0..=19).contains(&hours) {
            return Err(invalid());
        }

        let quarters = hours * 4;
        Self::new(digits, if negative { -quarters } else { quarters })
    }
}
