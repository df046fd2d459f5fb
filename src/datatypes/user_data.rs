// ABOUTME: TP-User-Data text codec: GSM 7-bit septet packing at arbitrary bit offsets and UCS-2
// ABOUTME: 8-bit data is never turned into text; callers keep the raw bytes instead

use crate::charset;
use crate::codec::CodecError;
use crate::datatypes::Encoding;

/// Octets needed to hold `septets` packed septets starting `bit_offset` bits in
pub fn packed_len(septets: usize, bit_offset: u8) -> usize {
    (bit_offset as usize + septets * 7).div_ceil(8)
}

/// Unpack `septets` 7-bit codes from `data`, the first one starting at bit
/// `bit_offset` (0..=6) of the first octet.
pub fn gsm_unpack(data: &[u8], septets: usize, bit_offset: u8) -> Result<Vec<u8>, CodecError> {
    let needed = packed_len(septets, bit_offset);
    if data.len() < needed {
        return Err(CodecError::InsufficientLength {
            field: "user data",
            needed,
            have: data.len(),
        });
    }

    let mut codes = Vec::with_capacity(septets);
    for i in 0..septets {
        let bit = bit_offset as usize + i * 7;
        let (octet, shift) = (bit / 8, bit % 8);

        let mut value = u16::from(data[octet]) >> shift;
        if shift > 1 {
            value |= u16::from(data[octet + 1]) << (8 - shift);
        }
        codes.push((value & 0x7F) as u8);
    }
    Ok(codes)
}

/// Pack 7-bit codes into octets, leaving the first `bit_offset` bits zero and
/// padding the final octet with zero bits.
pub fn gsm_pack(codes: &[u8], bit_offset: u8) -> Vec<u8> {
    let mut packed = vec![0u8; packed_len(codes.len(), bit_offset)];
    for (i, &code) in codes.iter().enumerate() {
        let bit = bit_offset as usize + i * 7;
        let (octet, shift) = (bit / 8, bit % 8);
        let value = u16::from(code & 0x7F) << shift;

        packed[octet] |= (value & 0xFF) as u8;
        if shift > 1 {
            packed[octet + 1] |= (value >> 8) as u8;
        }
    }
    packed
}

/// Decode user data to text.
///
/// `length` is in septets for GSM 7-bit and in octets otherwise. 8-bit data
/// yields an empty string.
pub fn decode_text(
    data: &[u8],
    length: usize,
    encoding: Encoding,
    bit_offset: u8,
) -> Result<String, CodecError> {
    match encoding {
        Encoding::Gsm7 => {
            let codes = gsm_unpack(data, length, bit_offset)?;
            Ok(charset::gsm_unpacked_to_string(&codes))
        }
        Encoding::Ucs2 => {
            let span = data.get(..length).ok_or(CodecError::InsufficientLength {
                field: "user data",
                needed: length,
                have: data.len(),
            })?;
            charset::ucs2_to_string(span)
        }
        Encoding::EightBit => Ok(String::new()),
    }
}

/// Text encoded for the wire together with its TP-UDL contribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub data: Vec<u8>,
    /// Septets for GSM 7-bit, octets otherwise
    pub length: usize,
}

/// Encode text in the given alphabet. GSM 7-bit output starts at `bit_offset`.
pub fn encode_text(
    text: &str,
    encoding: Encoding,
    bit_offset: u8,
) -> Result<EncodedText, CodecError> {
    match encoding {
        Encoding::Gsm7 => {
            let codes = charset::string_to_gsm_unpacked(text)?;
            Ok(EncodedText {
                data: gsm_pack(&codes, bit_offset),
                length: codes.len(),
            })
        }
        Encoding::Ucs2 => {
            let data = charset::string_to_ucs2(text);
            Ok(EncodedText {
                length: data.len(),
                data,
            })
        }
        Encoding::EightBit => Err(CodecError::FieldValidation {
            field: "text",
            reason: "8-bit user data carries raw bytes, not text".to_string(),
        }),
    }
}
