// ABOUTME: One SMS fragment, either decoded from a modem or waiting to be encoded
// ABOUTME: Setters validate so a Part never holds a concatenation or class the wire cannot carry

use crate::codec::CodecError;
use crate::datatypes::{Concatenation, DataCodingScheme, Encoding, MessageClass, Timestamp};
use bytes::Bytes;

/// A single SMS fragment.
///
/// Parts that belong to a longer message share a concatenation reference and are
/// put back together by whoever collects them; a `Part` knows nothing about its
/// siblings beyond the concatenation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    index: u32,
    smsc: Option<String>,
    number: String,
    timestamp: Option<Timestamp>,
    text: String,
    data: Bytes,
    data_coding_scheme: DataCodingScheme,
    protocol_identifier: u8,
    validity: Option<u32>,
    concat: Option<Concatenation>,
}

impl Part {
    /// Create an empty GSM 7-bit part at the given storage index
    pub fn new(index: u32) -> Self {
        Self {
            index,
            smsc: None,
            number: String::new(),
            timestamp: None,
            text: String::new(),
            data: Bytes::new(),
            data_coding_scheme: DataCodingScheme::default(),
            protocol_identifier: 0,
            validity: None,
            concat: None,
        }
    }

    /// Storage slot this part was read from, or its position in an outgoing batch
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Service centre address; `None` means the SIM default
    pub fn smsc(&self) -> Option<&str> {
        self.smsc.as_deref()
    }

    pub fn set_smsc(&mut self, smsc: Option<String>) {
        self.smsc = smsc.filter(|s| !s.is_empty());
    }

    /// Originator when decoded, destination when encoding
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number = number.into();
    }

    pub fn timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref()
    }

    pub fn set_timestamp(&mut self, timestamp: Option<Timestamp>) {
        self.timestamp = timestamp;
    }

    /// Decoded text; always empty for 8-bit data
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the message text. Fails if the coding scheme marks the user data as 8-bit.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), CodecError> {
        let text = text.into();
        if !text.is_empty() && !self.encoding().is_text() {
            return Err(CodecError::FieldValidation {
                field: "text",
                reason: format!("{} carries no text", self.data_coding_scheme),
            });
        }
        self.text = text;
        Ok(())
    }

    /// User data following the header, exactly as carried on the wire
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn set_data(&mut self, data: impl Into<Bytes>) {
        self.data = data.into();
    }

    pub fn data_coding_scheme(&self) -> DataCodingScheme {
        self.data_coding_scheme
    }

    /// Replace the coding scheme. Switching to 8-bit is refused while text is set.
    pub fn set_data_coding_scheme(&mut self, dcs: DataCodingScheme) -> Result<(), CodecError> {
        if !dcs.encoding().is_text() && !self.text.is_empty() {
            return Err(CodecError::FieldValidation {
                field: "data coding scheme",
                reason: format!("{dcs} cannot carry the existing text"),
            });
        }
        self.data_coding_scheme = dcs;
        Ok(())
    }

    /// Alphabet of the user data, from the coding scheme
    pub fn encoding(&self) -> Encoding {
        self.data_coding_scheme.encoding()
    }

    /// Message class, present only when the coding scheme says it is valid
    pub fn class(&self) -> Option<MessageClass> {
        self.data_coding_scheme.message_class()
    }

    /// Set or clear the message class, rewriting the coding scheme's class bits
    pub fn set_class(&mut self, class: Option<MessageClass>) -> Result<(), CodecError> {
        self.data_coding_scheme = self.data_coding_scheme.with_class(class).ok_or_else(|| {
            CodecError::FieldValidation {
                field: "class",
                reason: format!("{:?} has no message class field", self.data_coding_scheme),
            }
        })?;
        Ok(())
    }

    /// TP-PID, kept opaque
    pub fn protocol_identifier(&self) -> u8 {
        self.protocol_identifier
    }

    pub fn set_protocol_identifier(&mut self, pid: u8) {
        self.protocol_identifier = pid;
    }

    /// Relative validity period in minutes
    pub fn validity(&self) -> Option<u32> {
        self.validity
    }

    pub fn set_validity(&mut self, minutes: Option<u32>) {
        self.validity = minutes;
    }

    pub fn concat(&self) -> Option<Concatenation> {
        self.concat
    }

    /// Mark this part as `sequence` of `max`. Requires `0 < sequence <= max`.
    pub fn set_concat(&mut self, reference: u16, max: u8, sequence: u8) -> Result<(), CodecError> {
        self.concat = Some(Concatenation::new(reference, max, sequence)?);
        Ok(())
    }

    pub(crate) fn set_concatenation(&mut self, concat: Option<Concatenation>) {
        self.concat = concat;
    }

    pub fn clear_concat(&mut self) {
        self.concat = None;
    }

    /// True if this part is one piece of a concatenated message
    pub fn should_concat(&self) -> bool {
        self.concat.is_some()
    }

    pub fn concat_reference(&self) -> Option<u16> {
        self.concat.map(|c| c.reference())
    }

    pub fn concat_max(&self) -> Option<u8> {
        self.concat.map(|c| c.max())
    }

    pub fn concat_sequence(&self) -> Option<u8> {
        self.concat.map(|c| c.sequence())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_part_is_empty_gsm7() {
        let part = Part::new(3);
        assert_eq!(part.index(), 3);
        assert_eq!(part.smsc(), None);
        assert_eq!(part.encoding(), Encoding::Gsm7);
        assert_eq!(part.class(), None);
        assert!(!part.should_concat());
        assert_eq!(part.concat_reference(), None);
    }

    #[test]
    fn concat_setter_validates() {
        let mut part = Part::new(0);
        assert!(matches!(
            part.set_concat(7, 0, 0),
            Err(CodecError::FieldValidation {
                field: "concatenation",
                ..
            })
        ));
        assert!(part.set_concat(7, 2, 3).is_err());
        assert!(!part.should_concat());

        part.set_concat(7, 3, 2).unwrap();
        assert!(part.should_concat());
        assert_eq!(part.concat_reference(), Some(7));
        assert_eq!(part.concat_max(), Some(3));
        assert_eq!(part.concat_sequence(), Some(2));

        part.clear_concat();
        assert!(!part.should_concat());
    }

    #[test]
    fn class_follows_coding_scheme() {
        let mut part = Part::new(0);
        part.set_data_coding_scheme(DataCodingScheme::from_byte(0x08))
            .unwrap();
        part.set_class(Some(MessageClass::Flash)).unwrap();
        assert_eq!(part.data_coding_scheme().to_byte(), 0x18);
        assert_eq!(part.class(), Some(MessageClass::Flash));

        part.set_class(None).unwrap();
        assert_eq!(part.data_coding_scheme().to_byte(), 0x08);
        assert_eq!(part.class(), None);
    }

    #[test]
    fn class_on_message_waiting_group_is_refused() {
        let mut part = Part::new(0);
        part.set_data_coding_scheme(DataCodingScheme::from_byte(0xD0))
            .unwrap();
        assert!(matches!(
            part.set_class(Some(MessageClass::SimSpecific)),
            Err(CodecError::FieldValidation { field: "class", .. })
        ));
        assert_eq!(part.data_coding_scheme().to_byte(), 0xD0);
    }

    #[test]
    fn text_and_eight_bit_are_exclusive() {
        let mut part = Part::new(0);
        part.set_text("hello").unwrap();
        assert!(
            part.set_data_coding_scheme(DataCodingScheme::from_byte(0x04))
                .is_err()
        );

        let mut part = Part::new(0);
        part.set_data_coding_scheme(DataCodingScheme::from_byte(0x04))
            .unwrap();
        assert!(part.set_text("hello").is_err());
        part.set_text("").unwrap();
        part.set_data(vec![0x01, 0x02]);
        assert_eq!(part.data().as_ref(), &[0x01, 0x02]);
    }

    #[test]
    fn empty_smsc_means_default() {
        let mut part = Part::new(0);
        part.set_smsc(Some(String::new()));
        assert_eq!(part.smsc(), None);
        part.set_smsc(Some("+12085958996".to_string()));
        assert_eq!(part.smsc(), Some("+12085958996"));
    }
}
