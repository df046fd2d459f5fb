// ABOUTME: First TPDU octet: message type indicator and the flag bits that steer parsing
// ABOUTME: Covers both SMS-DELIVER (MMS, SRI) and SMS-SUBMIT (RD, VPF, SRR) layouts

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

const MTI_MASK: u8 = 0b0000_0011;
const MMS_OR_RD: u8 = 0b0000_0100;
const VPF_MASK: u8 = 0b0001_1000;
const SRI_OR_SRR: u8 = 0b0010_0000;
const UDHI: u8 = 0b0100_0000;
const REPLY_PATH: u8 = 0b1000_0000;

/// TP-Message-Type-Indicator as seen by the mobile station
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Deliver = 0b00,
    Submit = 0b01,
    StatusReport = 0b10,
    Reserved = 0b11,
}

/// TP-Validity-Period-Format (SMS-SUBMIT only)
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValidityPeriodFormat {
    NotPresent = 0b00,
    Enhanced = 0b01,
    Relative = 0b10,
    Absolute = 0b11,
}

impl ValidityPeriodFormat {
    /// Octets the TP-VP field occupies
    pub fn field_len(&self) -> usize {
        match self {
            ValidityPeriodFormat::NotPresent => 0,
            ValidityPeriodFormat::Relative => 1,
            ValidityPeriodFormat::Enhanced | ValidityPeriodFormat::Absolute => 7,
        }
    }
}

/// Decoded first octet of a TPDU
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FirstOctet(u8);

impl FirstOctet {
    pub fn from_byte(value: u8) -> Self {
        FirstOctet(value)
    }

    pub fn to_byte(&self) -> u8 {
        self.0
    }

    /// A SMS-DELIVER first octet. TP-MMS is set, meaning no more messages are waiting.
    pub fn deliver() -> Self {
        FirstOctet(u8::from(MessageType::Deliver) | MMS_OR_RD)
    }

    /// A SMS-SUBMIT first octet with no optional features
    pub fn submit() -> Self {
        FirstOctet(u8::from(MessageType::Submit))
    }

    pub fn message_type(&self) -> MessageType {
        MessageType::try_from(self.0 & MTI_MASK).unwrap_or(MessageType::Reserved)
    }

    pub fn has_udhi(&self) -> bool {
        self.0 & UDHI != 0
    }

    pub fn with_udhi(self, udhi: bool) -> Self {
        self.with_bit(UDHI, udhi)
    }

    /// TP-SRR on SMS-SUBMIT, TP-SRI on SMS-DELIVER
    pub fn has_status_report(&self) -> bool {
        self.0 & SRI_OR_SRR != 0
    }

    pub fn with_status_report(self, requested: bool) -> Self {
        self.with_bit(SRI_OR_SRR, requested)
    }

    pub fn has_reply_path(&self) -> bool {
        self.0 & REPLY_PATH != 0
    }

    pub fn validity_period_format(&self) -> ValidityPeriodFormat {
        ValidityPeriodFormat::try_from((self.0 & VPF_MASK) >> 3)
            .unwrap_or(ValidityPeriodFormat::NotPresent)
    }

    pub fn with_validity_period_format(self, format: ValidityPeriodFormat) -> Self {
        FirstOctet((self.0 & !VPF_MASK) | (u8::from(format) << 3))
    }

    fn with_bit(self, bit: u8, set: bool) -> Self {
        if set {
            FirstOctet(self.0 | bit)
        } else {
            FirstOctet(self.0 & !bit)
        }
    }
}

impl fmt::Debug for FirstOctet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirstOctet")
            .field("raw", &format_args!("{:#04x}", self.0))
            .field("message_type", &self.message_type())
            .field("udhi", &self.has_udhi())
            .field("status_report", &self.has_status_report())
            .finish()
    }
}
