// ABOUTME: TP-Data-Coding-Scheme classification per 3GPP TS 23.038 section 4
// ABOUTME: Maps the raw DCS octet to an alphabet and an optional message class, and back

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

const DCS_CLASS_VALID: u8 = 0x10;
const DCS_CLASS_MASK: u8 = 0x03;
const DCS_ALPHABET_MASK: u8 = 0x0C;

/// Alphabet used by the user data
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Encoding {
    /// GSM 7-bit default alphabet, septets packed into octets
    Gsm7,
    /// 8-bit data; opaque to this codec
    EightBit,
    /// UCS-2, big-endian 16-bit code units
    Ucs2,
}

impl Encoding {
    /// Returns true if user data in this alphabet can be turned into text
    pub fn is_text(&self) -> bool {
        !matches!(self, Encoding::EightBit)
    }

    /// Returns the character set name for this encoding
    pub fn charset_name(&self) -> &'static str {
        match self {
            Encoding::Gsm7 => "GSM 7-bit Default",
            Encoding::EightBit => "8-bit data",
            Encoding::Ucs2 => "UCS-2",
        }
    }

    /// Units (septets, octets or 16-bit code units) that fit in one PDU,
    /// given the length of a user data header including its length octet
    pub fn capacity(&self, udh_octets: usize) -> usize {
        let octets = crate::codec::MAX_USER_DATA_OCTETS.saturating_sub(udh_octets);
        match self {
            Encoding::Gsm7 => octets * 8 / 7,
            Encoding::EightBit => octets,
            Encoding::Ucs2 => octets / 2,
        }
    }
}

/// Message class carried in DCS bits 0-1 when bit 4 is set
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MessageClass {
    /// Class 0: flash SMS (displayed immediately, not stored)
    Flash = 0,
    /// Class 1: mobile equipment specific
    MobileEquipment = 1,
    /// Class 2: SIM specific
    SimSpecific = 2,
    /// Class 3: terminal equipment specific
    TerminalEquipment = 3,
}

impl MessageClass {
    /// Returns a human-readable description of the message class
    pub fn description(&self) -> &'static str {
        match self {
            MessageClass::Flash => "Flash SMS (immediate display)",
            MessageClass::MobileEquipment => "Mobile Equipment specific",
            MessageClass::SimSpecific => "SIM card storage",
            MessageClass::TerminalEquipment => "Terminal Equipment specific",
        }
    }
}

/// Raw DCS octet with typed accessors
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DataCodingScheme(u8);

impl DataCodingScheme {
    pub fn from_byte(value: u8) -> Self {
        DataCodingScheme(value)
    }

    /// Returns the raw u8 value for the wire
    pub fn to_byte(&self) -> u8 {
        self.0
    }

    /// Build a general data coding group octet (00xx xxxx) for an encoding
    pub fn for_encoding(encoding: Encoding, class: Option<MessageClass>) -> Self {
        let alphabet = match encoding {
            Encoding::Gsm7 => 0x00,
            Encoding::EightBit => 0x04,
            Encoding::Ucs2 => 0x08,
        };
        match class {
            Some(class) => Self(alphabet | DCS_CLASS_VALID | u8::from(class)),
            None => Self(alphabet),
        }
    }

    /// Classify the alphabet. Reserved values fall back to the default alphabet.
    pub fn encoding(&self) -> Encoding {
        let dcs = self.0;
        match dcs >> 4 {
            // General data coding group
            0x0..=0x3 => match dcs & DCS_ALPHABET_MASK {
                0x08 => Encoding::Ucs2,
                0x04 => Encoding::EightBit,
                _ => Encoding::Gsm7,
            },
            // Message waiting group, discard/store with default alphabet
            0xC | 0xD => Encoding::Gsm7,
            // Message waiting group, UCS-2
            0xE => Encoding::Ucs2,
            // Data coding/message class group
            0xF => {
                if dcs & 0x04 == 0 {
                    Encoding::Gsm7
                } else {
                    Encoding::EightBit
                }
            }
            _ => Encoding::Gsm7,
        }
    }

    /// Returns the message class if the class-valid bit is set
    pub fn message_class(&self) -> Option<MessageClass> {
        if self.0 & DCS_CLASS_VALID == 0 {
            return None;
        }
        MessageClass::try_from(self.0 & DCS_CLASS_MASK).ok()
    }

    /// Returns true if this coding scheme includes a message class
    pub fn has_message_class(&self) -> bool {
        self.message_class().is_some()
    }

    /// Replace the class bits, keeping the alphabet.
    ///
    /// Returns `None` when asked to set a class on a coding group that has no
    /// class field (the message waiting and reserved groups).
    pub fn with_class(self, class: Option<MessageClass>) -> Option<Self> {
        match (self.0 >> 4, class) {
            (0x0..=0x3, _) => {
                let base = self.0 & !(DCS_CLASS_VALID | DCS_CLASS_MASK);
                Some(match class {
                    Some(class) => Self(base | DCS_CLASS_VALID | u8::from(class)),
                    None => Self(base),
                })
            }
            // The class group always carries a class; dropping it means
            // falling back to the general group
            (0xF, Some(class)) => Some(Self((self.0 & !DCS_CLASS_MASK) | u8::from(class))),
            (0xF, None) => Some(Self::for_encoding(self.encoding(), None)),
            (_, None) => Some(self),
            (_, Some(_)) => None,
        }
    }
}

impl fmt::Display for DataCodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoding().charset_name())?;
        if let Some(class) = self.message_class() {
            write!(f, " ({})", class.description())?;
        }
        Ok(())
    }
}

impl fmt::Debug for DataCodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataCodingScheme({:#04x}, {:?})", self.0, self.encoding())
    }
}

impl From<u8> for DataCodingScheme {
    fn from(value: u8) -> Self {
        Self::from_byte(value)
    }
}

impl From<DataCodingScheme> for u8 {
    fn from(dcs: DataCodingScheme) -> Self {
        dcs.to_byte()
    }
}
