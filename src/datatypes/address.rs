// ABOUTME: TS 23.040 address fields (SMSC, TP-OA, TP-DA) with type-of-number handling
// ABOUTME: International numbers gain a '+' prefix; alphanumeric senders are GSM 7-bit packed text

use crate::charset;
use crate::codec::{CodecError, PduCursor, encode_length, encode_u8};
use crate::datatypes::{semi_octet, user_data};
use bytes::{BufMut, BytesMut};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// Longest address value: 10 octets, 20 semi-octets
pub const MAX_ADDRESS_DIGITS: usize = 20;

/// Type of number, bits 6-4 of the type-of-address octet
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeOfNumber {
    Unknown = 0b000,
    International = 0b001,
    National = 0b010,
    NetworkSpecific = 0b011,
    SubscriberNumber = 0b100,
    Alphanumeric = 0b101,
    Abbreviated = 0b110,
    Reserved = 0b111,
}

/// Numbering plan identification, bits 3-0 of the type-of-address octet
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberingPlan {
    Unknown = 0b0000,
    Telephone = 0b0001,
    Data = 0b0011,
    Telex = 0b0100,
    ServiceCentreSpecific = 0b0101,
    ServiceCentreSpecific2 = 0b0110,
    National = 0b1000,
    Private = 0b1001,
    Ermes = 0b1010,
    Reserved = 0b1111,
}

/// Type-of-address octet, kept raw so undefined plans survive a round trip
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct AddressType(u8);

impl AddressType {
    /// International number, ISDN/telephone plan (0x91)
    pub const INTERNATIONAL: AddressType = AddressType::new(TypeOfNumber::International);
    /// Unknown type, ISDN/telephone plan (0x81)
    pub const UNKNOWN: AddressType = AddressType::new(TypeOfNumber::Unknown);
    /// Alphanumeric, unknown plan (0xD0)
    pub const ALPHANUMERIC: AddressType = AddressType(0x80 | (0b101 << 4));

    const fn new(ton: TypeOfNumber) -> Self {
        AddressType(0x80 | ((ton as u8) << 4) | NumberingPlan::Telephone as u8)
    }

    pub fn from_byte(value: u8) -> Self {
        AddressType(value)
    }

    pub fn to_byte(&self) -> u8 {
        self.0
    }

    pub fn type_of_number(&self) -> TypeOfNumber {
        // Three bits always map to a variant
        TypeOfNumber::try_from((self.0 >> 4) & 0x07).unwrap_or(TypeOfNumber::Reserved)
    }

    /// The numbering plan, or `None` for values TS 23.040 leaves undefined
    pub fn numbering_plan(&self) -> Option<NumberingPlan> {
        NumberingPlan::try_from(self.0 & 0x0F).ok()
    }

    fn is_international_telephone(&self) -> bool {
        self.type_of_number() == TypeOfNumber::International
            && self.numbering_plan() == Some(NumberingPlan::Telephone)
    }
}

impl fmt::Debug for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AddressType({:#04x}, {:?}/{:?})",
            self.0,
            self.type_of_number(),
            self.numbering_plan()
        )
    }
}

/// Decode an address value.
///
/// `digits` is the length in semi-octets; `payload` must hold at least
/// `ceil(digits / 2)` octets.
pub fn decode(
    address_type: AddressType,
    payload: &[u8],
    digits: usize,
) -> Result<String, CodecError> {
    if address_type.type_of_number() == TypeOfNumber::Alphanumeric {
        let codes = user_data::gsm_unpack(payload, digits * 4 / 7, 0)?;
        return Ok(charset::gsm_unpacked_to_string(&codes));
    }

    let number: String = semi_octet::decode(payload).chars().take(digits).collect();
    if address_type.is_international_telephone() {
        Ok(format!("+{number}"))
    } else {
        Ok(number)
    }
}

/// An address ready to be written to the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAddress {
    pub address_type: AddressType,
    pub payload: Vec<u8>,
    /// Length in semi-octets
    pub digits: usize,
}

/// Digits plus the '*' and '#' keypad symbols
fn is_dialable(address: &str) -> bool {
    address
        .chars()
        .all(|c| c.is_ascii_digit() || c == '*' || c == '#')
}

/// Encode an address string, choosing the type of number from its shape
pub fn encode(address: &str, field: &'static str) -> Result<EncodedAddress, CodecError> {
    if address.is_empty() {
        return Err(CodecError::FieldValidation {
            field,
            reason: "address is empty".to_string(),
        });
    }

    let encoded = if let Some(number) = address.strip_prefix('+') {
        EncodedAddress {
            address_type: AddressType::INTERNATIONAL,
            payload: semi_octet::encode(number, field)?,
            digits: number.chars().count(),
        }
    } else if is_dialable(address) {
        EncodedAddress {
            address_type: AddressType::UNKNOWN,
            payload: semi_octet::encode(address, field)?,
            digits: address.chars().count(),
        }
    } else {
        let codes = charset::string_to_gsm_unpacked(address)?;
        EncodedAddress {
            address_type: AddressType::ALPHANUMERIC,
            payload: user_data::gsm_pack(&codes, 0),
            digits: (codes.len() * 7).div_ceil(4),
        }
    };

    if encoded.digits == 0 || encoded.digits > MAX_ADDRESS_DIGITS {
        return Err(CodecError::FieldValidation {
            field,
            reason: format!(
                "address {address:?} needs {} semi-octets (1-{MAX_ADDRESS_DIGITS} allowed)",
                encoded.digits
            ),
        });
    }
    Ok(encoded)
}

/// Read the SMSC field: length in octets (including the type octet), type, digits.
/// A zero length means no SMSC is present.
pub fn read_smsc(cursor: &mut PduCursor<'_>) -> Result<Option<String>, CodecError> {
    let length = cursor.read_u8("smsc length")? as usize;
    if length == 0 {
        return Ok(None);
    }

    let field = cursor.read("smsc", length)?;
    let address_type = AddressType::from_byte(field[0]);
    decode(address_type, &field[1..], 2 * (length - 1)).map(Some)
}

/// Write the SMSC field; `None` emits a single zero octet
pub fn write_smsc(buf: &mut BytesMut, smsc: Option<&str>) -> Result<(), CodecError> {
    let Some(smsc) = smsc.filter(|s| !s.is_empty()) else {
        encode_u8(buf, 0x00);
        return Ok(());
    };

    let encoded = encode(smsc, "smsc")?;
    encode_length(buf, encoded.payload.len() + 1, "smsc")?;
    encode_u8(buf, encoded.address_type.to_byte());
    buf.put_slice(&encoded.payload);
    Ok(())
}

/// Read an originator or destination address: digit count, type, ceil(digits/2) octets
pub fn read_address(cursor: &mut PduCursor<'_>, field: &'static str) -> Result<String, CodecError> {
    let digits = cursor.read_u8(field)? as usize;
    let address_type = AddressType::from_byte(cursor.read_u8(field)?);
    let payload = cursor.read(field, digits.div_ceil(2))?;
    decode(address_type, payload, digits)
}

/// Write an originator or destination address
pub fn write_address(
    buf: &mut BytesMut,
    address: &str,
    field: &'static str,
) -> Result<(), CodecError> {
    let encoded = encode(address, field)?;
    encode_length(buf, encoded.digits, field)?;
    encode_u8(buf, encoded.address_type.to_byte());
    buf.put_slice(&encoded.payload);
    Ok(())
}
