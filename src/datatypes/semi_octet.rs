// ABOUTME: Semi-octet (swapped-nibble BCD) conversion used by addresses and timestamps
// ABOUTME: Digits map through the TS 23.040 table "0123456789*#abc"; nibble 0xF is the filler

use crate::codec::CodecError;

/// Characters for nibble values 0x0..=0xE
const BCD_DIGITS: [char; 15] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '*', '#', 'a', 'b', 'c',
];

/// Filler nibble padding an odd number of digits
pub const FILLER: u8 = 0x0F;

/// Decode semi-octets, low nibble first. The first filler ends the digit string.
pub fn decode(octets: &[u8]) -> String {
    let mut digits = String::with_capacity(octets.len() * 2);
    for nibble in octets.iter().flat_map(|&b| [b & 0x0F, b >> 4]) {
        if nibble == FILLER {
            break;
        }
        digits.push(BCD_DIGITS[nibble as usize]);
    }
    digits
}

/// Map a digit character back to its nibble value
pub fn nibble_for(ch: char) -> Option<u8> {
    BCD_DIGITS
        .iter()
        .position(|&c| c == ch.to_ascii_lowercase())
        .map(|n| n as u8)
}

/// Encode a digit string, padding an odd final nibble with the filler
pub fn encode(digits: &str, field: &'static str) -> Result<Vec<u8>, CodecError> {
    let nibbles = digits
        .chars()
        .map(|c| {
            nibble_for(c).ok_or_else(|| CodecError::FieldValidation {
                field,
                reason: format!("{c:?} has no semi-octet representation"),
            })
        })
        .collect::<Result<Vec<u8>, CodecError>>()?;

    Ok(nibbles
        .chunks(2)
        .map(|pair| {
            let high = pair.get(1).copied().unwrap_or(FILLER);
            (high << 4) | pair[0]
        })
        .collect())
}
