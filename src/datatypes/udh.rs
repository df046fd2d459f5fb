// ABOUTME: TP-User-Data-Header walking and building (TS 23.040 9.2.3.24)
// ABOUTME: Recognises 8-bit and 16-bit concatenation references; other elements pass through opaque

use crate::codec::{CodecError, PduCursor};
use tracing::warn;

/// Concatenated short message, 8-bit reference
pub const IEI_CONCAT_8BIT: u8 = 0x00;
/// Concatenated short message, 16-bit reference
pub const IEI_CONCAT_16BIT: u8 = 0x08;

/// Concatenation metadata shared by every part of a long message
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Concatenation {
    reference: u16,
    max: u8,
    sequence: u8,
}

impl Concatenation {
    /// Accepts only `0 < sequence <= max`
    pub fn new(reference: u16, max: u8, sequence: u8) -> Result<Self, CodecError> {
        if max == 0 || sequence == 0 || sequence > max {
            return Err(CodecError::FieldValidation {
                field: "concatenation",
                reason: format!("part {sequence} of {max}"),
            });
        }
        Ok(Self {
            reference,
            max,
            sequence,
        })
    }

    pub fn reference(&self) -> u16 {
        self.reference
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    /// Interpret an information element.
    ///
    /// Returns `Ok(None)` for elements that are not concatenation headers and
    /// `MalformedConcatenationHeader` for concatenation headers that make no sense.
    pub fn from_element(element: &InformationElement) -> Result<Option<Self>, CodecError> {
        let malformed = |reason: String| CodecError::MalformedConcatenationHeader {
            id: element.id,
            reason,
        };

        let (reference, max, sequence) = match (element.id, element.data.as_slice()) {
            (IEI_CONCAT_8BIT, &[reference, max, sequence]) => (u16::from(reference), max, sequence),
            (IEI_CONCAT_16BIT, &[hi, lo, max, sequence]) => {
                (u16::from_be_bytes([hi, lo]), max, sequence)
            }
            (IEI_CONCAT_8BIT | IEI_CONCAT_16BIT, data) => {
                return Err(malformed(format!("unexpected length {}", data.len())));
            }
            _ => return Ok(None),
        };

        Self::new(reference, max, sequence)
            .map(Some)
            .map_err(|_| malformed(format!("part {sequence} of {max}")))
    }

    /// The information element announcing this part. References that fit in
    /// one octet use the shorter 8-bit form.
    pub fn to_element(&self) -> InformationElement {
        match u8::try_from(self.reference) {
            Ok(reference) => InformationElement {
                id: IEI_CONCAT_8BIT,
                data: vec![reference, self.max, self.sequence],
            },
            Err(_) => {
                let [hi, lo] = self.reference.to_be_bytes();
                InformationElement {
                    id: IEI_CONCAT_16BIT,
                    data: vec![hi, lo, self.max, self.sequence],
                }
            }
        }
    }
}

/// One tag-length-value record of a user data header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InformationElement {
    pub id: u8,
    pub data: Vec<u8>,
}

/// A parsed user data header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDataHeader {
    pub elements: Vec<InformationElement>,
}

impl UserDataHeader {
    /// Read a header from the start of the user data. Returns the header and the
    /// number of octets it occupies, length octet included.
    pub fn read(user_data: &[u8]) -> Result<(Self, usize), CodecError> {
        let mut cursor = PduCursor::new(user_data);
        let length = cursor.read_u8("udh length")? as usize;
        let body = cursor.read("udh", length)?;
        Ok((Self::parse(body)?, length + 1))
    }

    /// Walk the information elements of a header body (without the length octet).
    /// Each element's payload is consumed exactly, whether recognised or not.
    pub fn parse(body: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = PduCursor::new(body);
        let mut elements = Vec::new();

        while cursor.remaining() > 0 {
            let id = cursor.read_u8("udh element id")?;
            let length = cursor.read_u8("udh element length")? as usize;
            let data = cursor.read("udh element", length)?.to_vec();
            elements.push(InformationElement { id, data });
        }

        Ok(Self { elements })
    }

    /// Header carrying only a concatenation element
    pub fn for_concatenation(concat: &Concatenation) -> Self {
        Self {
            elements: vec![concat.to_element()],
        }
    }

    /// The concatenation claim of this header.
    ///
    /// Malformed concatenation elements are logged and skipped; later elements
    /// are still considered, and the last valid one wins.
    pub fn concatenation(&self) -> Option<Concatenation> {
        let mut found = None;
        for element in &self.elements {
            match Concatenation::from_element(element) {
                Ok(Some(concat)) => found = Some(concat),
                Ok(None) => {}
                Err(e) => warn!("Ignoring concatenation element: {}", e),
            }
        }
        found
    }

    /// Octets on the wire, length octet included
    pub fn encoded_len(&self) -> usize {
        1 + self
            .elements
            .iter()
            .map(|e| 2 + e.data.len())
            .sum::<usize>()
    }

    /// Serialise with the leading UDHL octet
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.push(0);
        for element in &self.elements {
            let length = u8::try_from(element.data.len()).map_err(|_| {
                CodecError::FieldValidation {
                    field: "udh element",
                    reason: format!("element {:#04x} payload too long", element.id),
                }
            })?;
            bytes.push(element.id);
            bytes.push(length);
            bytes.extend_from_slice(&element.data);
        }

        bytes[0] = u8::try_from(bytes.len() - 1).map_err(|_| CodecError::FieldValidation {
            field: "udh",
            reason: "header longer than 255 octets".to_string(),
        })?;
        Ok(bytes)
    }
}

/// Fill bits between a header of `header_octets` (length octet included) and
/// the first septet, so that septets start on a 7-bit boundary
pub fn gsm7_padding_bits(header_octets: usize) -> u8 {
    ((7 - (header_octets * 8) % 7) % 7) as u8
}

/// Septets the header and its fill bits take out of TP-UDL
pub fn gsm7_header_septets(header_octets: usize) -> usize {
    (header_octets * 8 + gsm7_padding_bits(header_octets) as usize) / 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_concat_8bit() {
        let (udh, consumed) = UserDataHeader::read(&[0x05, 0x00, 0x03, 0x2A, 0x02, 0x01, 0x90]).unwrap();
        assert_eq!(consumed, 6);
        let concat = udh.concatenation().unwrap();
        assert_eq!(concat.reference(), 0x2A);
        assert_eq!(concat.max(), 2);
        assert_eq!(concat.sequence(), 1);
    }

    #[test]
    fn parse_concat_16bit() {
        let (udh, consumed) =
            UserDataHeader::read(&[0x06, 0x08, 0x04, 0x12, 0x34, 0x03, 0x03]).unwrap();
        assert_eq!(consumed, 7);
        let concat = udh.concatenation().unwrap();
        assert_eq!(concat.reference(), 0x1234);
        assert_eq!(concat.max(), 3);
        assert_eq!(concat.sequence(), 3);
    }

    #[test]
    fn unknown_elements_are_skipped() {
        // Application port (0x05) then an 8-bit concatenation element
        let body = [0x05, 0x04, 0x0B, 0x84, 0x23, 0xF0, 0x00, 0x03, 0x07, 0x02, 0x02];
        let udh = UserDataHeader::parse(&body).unwrap();
        assert_eq!(udh.elements.len(), 2);
        assert_eq!(udh.elements[0].id, 0x05);
        assert_eq!(udh.concatenation().unwrap().reference(), 7);
    }

    #[test]
    fn zero_max_is_ignored_but_parsing_continues() {
        let body = [0x00, 0x03, 0x01, 0x00, 0x01, 0x00, 0x03, 0x09, 0x04, 0x02];
        let udh = UserDataHeader::parse(&body).unwrap();
        assert_eq!(udh.elements.len(), 2);
        let concat = udh.concatenation().unwrap();
        assert_eq!(concat.reference(), 9);
        assert_eq!(concat.sequence(), 2);
    }

    #[test]
    fn sequence_beyond_max_is_ignored() {
        let udh = UserDataHeader::parse(&[0x00, 0x03, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(udh.concatenation(), None);

        let udh = UserDataHeader::parse(&[0x00, 0x03, 0x01, 0x02, 0x00]).unwrap();
        assert_eq!(udh.concatenation(), None);
    }

    #[test]
    fn wrong_concat_length_is_malformed() {
        let element = InformationElement {
            id: IEI_CONCAT_8BIT,
            data: vec![0x01, 0x02],
        };
        assert!(matches!(
            Concatenation::from_element(&element),
            Err(CodecError::MalformedConcatenationHeader { id: 0x00, .. })
        ));
    }

    #[test]
    fn truncated_element_is_fatal() {
        let err = UserDataHeader::parse(&[0x00, 0x03, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InsufficientLength {
                field: "udh element",
                needed: 3,
                have: 1
            }
        ));
    }

    #[test]
    fn header_longer_than_user_data() {
        assert!(matches!(
            UserDataHeader::read(&[0x05, 0x00, 0x03]),
            Err(CodecError::InsufficientLength { field: "udh", .. })
        ));
    }

    #[test]
    fn build_picks_reference_width() {
        let short = Concatenation::new(0x2A, 2, 1).unwrap();
        let udh = UserDataHeader::for_concatenation(&short);
        assert_eq!(udh.encoded_len(), 6);
        assert_eq!(
            udh.to_bytes().unwrap(),
            vec![0x05, 0x00, 0x03, 0x2A, 0x02, 0x01]
        );

        let long = Concatenation::new(0x1234, 3, 2).unwrap();
        let udh = UserDataHeader::for_concatenation(&long);
        assert_eq!(udh.encoded_len(), 7);
        assert_eq!(
            udh.to_bytes().unwrap(),
            vec![0x06, 0x08, 0x04, 0x12, 0x34, 0x03, 0x02]
        );
    }

    #[test]
    fn concatenation_validation() {
        assert!(Concatenation::new(1, 2, 0).is_err());
        assert!(Concatenation::new(1, 2, 3).is_err());
        assert!(Concatenation::new(1, 2, 2).is_ok());
        assert!(matches!(
            Concatenation::new(1, 0, 0),
            Err(CodecError::FieldValidation {
                field: "concatenation",
                ..
            })
        ));
    }

    #[test]
    fn malformed_element_reports_its_own_id() {
        let short = InformationElement {
            id: IEI_CONCAT_8BIT,
            data: vec![0x01, 0x02, 0x03],
        };
        assert!(matches!(
            Concatenation::from_element(&short),
            Err(CodecError::MalformedConcatenationHeader { id: 0x00, .. })
        ));

        let long = InformationElement {
            id: IEI_CONCAT_16BIT,
            data: vec![0x01, 0x02, 0x00, 0x01],
        };
        assert!(matches!(
            Concatenation::from_element(&long),
            Err(CodecError::MalformedConcatenationHeader { id: 0x08, .. })
        ));
    }

    #[test]
    fn gsm7_alignment() {
        assert_eq!(gsm7_padding_bits(6), 1);
        assert_eq!(gsm7_header_septets(6), 7);
        assert_eq!(gsm7_padding_bits(7), 0);
        assert_eq!(gsm7_header_septets(7), 8);
        assert_eq!(gsm7_padding_bits(12), 2);
        assert_eq!(gsm7_header_septets(12), 14);
    }
}
