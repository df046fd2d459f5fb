// ABOUTME: GSM 03.38 default alphabet and UCS-2 conversions to and from Rust strings
// ABOUTME: Read-only lookup tables; works on unpacked septet codes, packing lives in user_data

use crate::codec::CodecError;

/// Escape to the single-shift extension table
pub const GSM_ESCAPE: u8 = 0x1B;

/// GSM 7-bit default alphabet, indexed by septet code.
/// Slot 0x1B is the escape code and never maps to a character on its own.
const GSM_DEFAULT_ALPHABET: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{A0}', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

/// Single-shift extension table: (code after ESC, character)
const GSM_EXTENSION_TABLE: [(u8, char); 10] = [
    (0x0A, '\u{0C}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

/// How a character is represented in the GSM alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsmCode {
    /// One septet from the default table
    Single(u8),
    /// ESC followed by a septet from the extension table
    Escaped(u8),
}

impl GsmCode {
    /// Number of septets this character occupies on the wire
    pub fn septets(self) -> usize {
        match self {
            GsmCode::Single(_) => 1,
            GsmCode::Escaped(_) => 2,
        }
    }
}

/// Look up the GSM alphabet code for a character
pub fn gsm_code_for(ch: char) -> Option<GsmCode> {
    if let Some(code) = GSM_DEFAULT_ALPHABET
        .iter()
        .position(|&c| c == ch)
        .filter(|&code| code != GSM_ESCAPE as usize)
    {
        return Some(GsmCode::Single(code as u8));
    }

    GSM_EXTENSION_TABLE
        .iter()
        .find(|&&(_, c)| c == ch)
        .map(|&(code, _)| GsmCode::Escaped(code))
}

/// True if every character of `text` is representable in the GSM alphabet
pub fn is_gsm_encodable(text: &str) -> bool {
    text.chars().all(|c| gsm_code_for(c).is_some())
}

/// Number of septets `text` occupies once converted, or `None` if it is not encodable
pub fn gsm_septet_count(text: &str) -> Option<usize> {
    text.chars()
        .map(|c| gsm_code_for(c).map(GsmCode::septets))
        .sum()
}

/// Convert unpacked septet codes to a string.
///
/// An escape followed by a code missing from the extension table falls back to
/// the default-table character; a dangling escape at the end is dropped.
pub fn gsm_unpacked_to_string(codes: &[u8]) -> String {
    let mut text = String::with_capacity(codes.len());
    let mut codes = codes.iter().map(|&c| c & 0x7F);

    while let Some(code) = codes.next() {
        if code != GSM_ESCAPE {
            text.push(GSM_DEFAULT_ALPHABET[code as usize]);
            continue;
        }

        let Some(next) = codes.next() else {
            break;
        };
        let extended = GSM_EXTENSION_TABLE
            .iter()
            .find(|&&(c, _)| c == next)
            .map(|&(_, ch)| ch);
        match extended {
            Some(ch) => text.push(ch),
            None if next == GSM_ESCAPE => {}
            None => text.push(GSM_DEFAULT_ALPHABET[next as usize]),
        }
    }

    text
}

/// Convert a string to unpacked septet codes, escape-prefixing extension characters
pub fn string_to_gsm_unpacked(text: &str) -> Result<Vec<u8>, CodecError> {
    let mut codes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match gsm_code_for(ch) {
            Some(GsmCode::Single(code)) => codes.push(code),
            Some(GsmCode::Escaped(code)) => {
                codes.push(GSM_ESCAPE);
                codes.push(code);
            }
            None => return Err(CodecError::UnencodableCharacter(ch)),
        }
    }
    Ok(codes)
}

/// Decode big-endian UCS-2 (read as UTF-16BE) to a string.
/// Unpaired surrogates become U+FFFD.
pub fn ucs2_to_string(data: &[u8]) -> Result<String, CodecError> {
    if data.len() % 2 != 0 {
        return Err(CodecError::InvalidUcs2Length(data.len()));
    }

    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    Ok(char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}

/// Encode a string as big-endian 16-bit code units
pub fn string_to_ucs2(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}
