// SMS PDU structural codec
//
// Decoding walks the TPDU field by field through a `PduCursor`: SMSC, first octet,
// address, PID, DCS, timestamp or validity period, then the user data with its
// optional header. Each step either consumes exactly the bytes it declares or
// fails, so a malformed PDU never yields a partially filled `Part`.
//
// Encoding runs the same field codecs in the other direction and returns the
// bytes together with the offset of the TPDU, which is what AT+CMGS wants as its
// length argument.

use crate::charset::{self, GsmCode};
use crate::codec::{CodecError, MAX_USER_DATA_OCTETS, PduCursor, encode_length, encode_u8};
use crate::datatypes::udh::{gsm7_header_septets, gsm7_padding_bits};
use crate::datatypes::{
    Concatenation, DataCodingScheme, Encoding, FirstOctet, MessageClass, MessageType, Timestamp,
    UserDataHeader, ValidityPeriodFormat, address, user_data, validity,
};
use crate::part::Part;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::{debug, trace};

/// Header octets, length octet included, of a concatenation header with an
/// 8-bit reference
const CONCAT_HEADER_8BIT: usize = 6;
/// Same with a 16-bit reference
const CONCAT_HEADER_16BIT: usize = 7;

/// Most parts a concatenated message can announce
pub const MAX_PARTS: usize = u8::MAX as usize;

/// A PDU ready to hand to the modem
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPdu {
    data: Bytes,
    tpdu_offset: usize,
}

impl EncodedPdu {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Offset of the first TPDU octet, i.e. the length of the SMSC field
    pub fn tpdu_offset(&self) -> usize {
        self.tpdu_offset
    }

    /// Octets after the SMSC field; the length argument of AT+CMGS
    pub fn tpdu_len(&self) -> usize {
        self.data.len() - self.tpdu_offset
    }

    /// Upper-case hex, as modems expect it
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.data)
    }
}

impl fmt::Display for EncodedPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for EncodedPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedPdu")
            .field("hex", &self.to_hex())
            .field("tpdu_offset", &self.tpdu_offset)
            .finish()
    }
}

/// Per-message settings for SMS-SUBMIT encoding
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// TP-MR; 0 lets the modem assign one
    pub message_reference: u8,
    /// Ask the network for a status report
    pub status_report_request: bool,
}

/// Settings shared by every part produced by [`split_text`] and [`split_data`]
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Concatenation reference; values above 255 use the 16-bit header
    pub reference: u16,
    /// Service centre; `None` uses the SIM default
    pub smsc: Option<String>,
    pub class: Option<MessageClass>,
    /// Relative validity period in minutes
    pub validity: Option<u32>,
    /// Force an alphabet instead of picking GSM 7-bit whenever it fits
    pub encoding: Option<Encoding>,
}

/// Decode an SMS-DELIVER PDU, SMSC field first, from hex text as read back
/// with AT+CMGR or AT+CMGL.
pub fn decode(index: u32, pdu: &str) -> Result<Part, CodecError> {
    let bytes = hex::decode(pdu.trim())?;
    let mut cursor = PduCursor::new(&bytes);

    let smsc = address::read_smsc(&mut cursor)?;
    let first = read_first_octet(&mut cursor, MessageType::Deliver)?;
    let number = address::read_address(&mut cursor, "originator")?;
    let pid = cursor.read_u8("protocol identifier")?;
    let dcs = DataCodingScheme::from_byte(cursor.read_u8("data coding scheme")?);
    let timestamp = Timestamp::read(&mut cursor)?;
    let body = read_user_data(&mut cursor, first.has_udhi(), dcs)?;

    let mut part = Part::new(index);
    part.set_smsc(smsc);
    part.set_number(number);
    part.set_protocol_identifier(pid);
    part.set_timestamp(Some(timestamp));
    body.apply(&mut part, dcs)?;

    debug!(
        "Decoded SMS-DELIVER #{} from {} ({:?}, {} octets of user data)",
        index,
        part.number(),
        dcs,
        part.data().len()
    );
    Ok(part)
}

/// Decode an SMS-SUBMIT PDU, as stored in the outbox or produced by
/// [`encode_submit`]. A relative validity period is converted back to minutes.
pub fn decode_submit(index: u32, pdu: &str) -> Result<Part, CodecError> {
    let bytes = hex::decode(pdu.trim())?;
    let mut cursor = PduCursor::new(&bytes);

    let smsc = address::read_smsc(&mut cursor)?;
    let first = read_first_octet(&mut cursor, MessageType::Submit)?;
    let _message_reference = cursor.read_u8("message reference")?;
    let number = address::read_address(&mut cursor, "destination")?;
    let pid = cursor.read_u8("protocol identifier")?;
    let dcs = DataCodingScheme::from_byte(cursor.read_u8("data coding scheme")?);

    let format = first.validity_period_format();
    let vp = cursor.read("validity period", format.field_len())?;
    let validity = match (format, vp) {
        (ValidityPeriodFormat::Relative, &[value]) => Some(validity::from_relative(value)),
        (ValidityPeriodFormat::NotPresent, _) => None,
        _ => {
            debug!("Skipping {:?} validity period", format);
            None
        }
    };

    let body = read_user_data(&mut cursor, first.has_udhi(), dcs)?;

    let mut part = Part::new(index);
    part.set_smsc(smsc);
    part.set_number(number);
    part.set_protocol_identifier(pid);
    part.set_validity(validity);
    body.apply(&mut part, dcs)?;

    debug!("Decoded SMS-SUBMIT #{} to {}", index, part.number());
    Ok(part)
}

/// Encode a part as SMS-SUBMIT
pub fn encode_submit(part: &Part, options: &SubmitOptions) -> Result<EncodedPdu, CodecError> {
    let mut buf = BytesMut::with_capacity(12 + 12 + 4 + MAX_USER_DATA_OCTETS);

    address::write_smsc(&mut buf, part.smsc())?;
    let tpdu_offset = buf.len();

    let mut first = FirstOctet::submit()
        .with_status_report(options.status_report_request)
        .with_udhi(part.should_concat());
    if part.validity().is_some() {
        first = first.with_validity_period_format(ValidityPeriodFormat::Relative);
    }

    encode_u8(&mut buf, first.to_byte());
    encode_u8(&mut buf, options.message_reference);
    address::write_address(&mut buf, part.number(), "destination")?;
    encode_u8(&mut buf, part.protocol_identifier());
    encode_u8(&mut buf, part.data_coding_scheme().to_byte());
    if let Some(minutes) = part.validity() {
        encode_u8(&mut buf, validity::to_relative(minutes));
    }
    write_user_data(&mut buf, part)?;

    trace!("Encoded SMS-SUBMIT to {}: {} octets", part.number(), buf.len());
    Ok(EncodedPdu {
        data: buf.freeze(),
        tpdu_offset,
    })
}

/// Encode a part as SMS-DELIVER, the way a service centre would hand it to a
/// handset. The part must carry a timestamp.
pub fn encode_deliver(part: &Part) -> Result<EncodedPdu, CodecError> {
    let timestamp = part.timestamp().ok_or_else(|| CodecError::FieldValidation {
        field: "timestamp",
        reason: "SMS-DELIVER requires a service centre timestamp".to_string(),
    })?;

    let mut buf = BytesMut::with_capacity(12 + 12 + 10 + MAX_USER_DATA_OCTETS);

    address::write_smsc(&mut buf, part.smsc())?;
    let tpdu_offset = buf.len();

    let first = FirstOctet::deliver().with_udhi(part.should_concat());
    encode_u8(&mut buf, first.to_byte());
    address::write_address(&mut buf, part.number(), "originator")?;
    encode_u8(&mut buf, part.protocol_identifier());
    encode_u8(&mut buf, part.data_coding_scheme().to_byte());
    timestamp.encode(&mut buf)?;
    write_user_data(&mut buf, part)?;

    trace!("Encoded SMS-DELIVER from {}: {} octets", part.number(), buf.len());
    Ok(EncodedPdu {
        data: buf.freeze(),
        tpdu_offset,
    })
}

/// Split outgoing text into as many parts as it needs.
///
/// GSM 7-bit is used when every character is in the default alphabet or its
/// extension table, UCS-2 otherwise. Escape sequences and surrogate pairs are
/// never cut in half.
pub fn split_text(number: &str, text: &str, options: &SplitOptions) -> Result<Vec<Part>, CodecError> {
    let encoding = match options.encoding {
        Some(Encoding::EightBit) => {
            return Err(CodecError::FieldValidation {
                field: "encoding",
                reason: "8-bit payloads are split with split_data".to_string(),
            });
        }
        Some(encoding) => encoding,
        None if charset::is_gsm_encodable(text) => Encoding::Gsm7,
        None => Encoding::Ucs2,
    };

    let units = |ch: char| match encoding {
        Encoding::Gsm7 => charset::gsm_code_for(ch)
            .map(GsmCode::septets)
            .ok_or(CodecError::UnencodableCharacter(ch)),
        _ => Ok(ch.len_utf16()),
    };

    let mut total = 0;
    for ch in text.chars() {
        total += units(ch)?;
    }
    let capacity = if total <= encoding.capacity(0) {
        encoding.capacity(0)
    } else {
        encoding.capacity(concat_header_len(options.reference))
    };

    let mut chunks = Vec::new();
    let (mut start, mut used) = (0, 0);
    for (pos, ch) in text.char_indices() {
        let n = units(ch)?;
        if used + n > capacity && pos > start {
            chunks.push(&text[start..pos]);
            start = pos;
            used = 0;
        }
        used += n;
    }
    chunks.push(&text[start..]);

    let dcs = DataCodingScheme::for_encoding(encoding, options.class);
    let max = part_count(chunks.len())?;
    debug!(
        "Splitting {} units of {:?} text into {} part(s)",
        total,
        encoding,
        chunks.len()
    );

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut part = outgoing_part(i, number, options, dcs, max)?;
            part.set_text(chunk)?;
            Ok(part)
        })
        .collect()
}

/// Split an 8-bit payload into as many parts as it needs
pub fn split_data(number: &str, data: &[u8], options: &SplitOptions) -> Result<Vec<Part>, CodecError> {
    let capacity = if data.len() <= Encoding::EightBit.capacity(0) {
        Encoding::EightBit.capacity(0)
    } else {
        Encoding::EightBit.capacity(concat_header_len(options.reference))
    };

    let chunks: Vec<&[u8]> = if data.is_empty() {
        vec![data]
    } else {
        data.chunks(capacity).collect()
    };

    let dcs = DataCodingScheme::for_encoding(Encoding::EightBit, options.class);
    let max = part_count(chunks.len())?;
    debug!("Splitting {} octets into {} part(s)", data.len(), chunks.len());

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut part = outgoing_part(i, number, options, dcs, max)?;
            part.set_data(Bytes::copy_from_slice(chunk));
            Ok(part)
        })
        .collect()
}

fn concat_header_len(reference: u16) -> usize {
    if reference > u16::from(u8::MAX) {
        CONCAT_HEADER_16BIT
    } else {
        CONCAT_HEADER_8BIT
    }
}

fn part_count(chunks: usize) -> Result<u8, CodecError> {
    u8::try_from(chunks).map_err(|_| CodecError::FieldValidation {
        field: "message",
        reason: format!("needs {chunks} parts, at most {MAX_PARTS} allowed"),
    })
}

fn outgoing_part(
    i: usize,
    number: &str,
    options: &SplitOptions,
    dcs: DataCodingScheme,
    max: u8,
) -> Result<Part, CodecError> {
    let mut part = Part::new(i as u32);
    part.set_number(number);
    part.set_smsc(options.smsc.clone());
    part.set_data_coding_scheme(dcs)?;
    part.set_validity(options.validity);
    if max > 1 {
        part.set_concat(options.reference, max, (i + 1) as u8)?;
    }
    Ok(part)
}

fn read_first_octet(
    cursor: &mut PduCursor<'_>,
    expected: MessageType,
) -> Result<FirstOctet, CodecError> {
    let first = FirstOctet::from_byte(cursor.read_u8("first octet")?);
    if first.message_type() != expected {
        return Err(CodecError::UnsupportedMessageType(first.to_byte()));
    }
    Ok(first)
}

/// What the user data field of a PDU decoded to
struct DecodedUserData {
    text: String,
    data: Bytes,
    concat: Option<Concatenation>,
}

impl DecodedUserData {
    fn apply(self, part: &mut Part, dcs: DataCodingScheme) -> Result<(), CodecError> {
        part.set_data_coding_scheme(dcs)?;
        part.set_text(self.text)?;
        part.set_data(self.data);
        part.set_concatenation(self.concat);
        Ok(())
    }
}

/// Read TP-UDL and TP-UD, strip the header if there is one and decode the text
fn read_user_data(
    cursor: &mut PduCursor<'_>,
    udhi: bool,
    dcs: DataCodingScheme,
) -> Result<DecodedUserData, CodecError> {
    let encoding = dcs.encoding();
    let udl = cursor.read_u8("user data length")? as usize;

    // TP-UDL counts septets for GSM 7-bit, octets otherwise
    let octets = match encoding {
        Encoding::Gsm7 => user_data::packed_len(udl, 0),
        _ => udl,
    };
    let ud = cursor.read("user data", octets)?;
    if cursor.remaining() > 0 {
        trace!("Ignoring {} octets after user data", cursor.remaining());
    }

    let (concat, header_len) = if udhi {
        let (header, header_len) = UserDataHeader::read(ud)?;
        (header.concatenation(), header_len)
    } else {
        (None, 0)
    };
    let body = &ud[header_len..];

    let text = match encoding {
        Encoding::Gsm7 => {
            let header_septets = gsm7_header_septets(header_len);
            let septets =
                udl.checked_sub(header_septets)
                    .ok_or(CodecError::InsufficientLength {
                        field: "user data",
                        needed: header_septets,
                        have: udl,
                    })?;
            user_data::decode_text(body, septets, encoding, gsm7_padding_bits(header_len))?
        }
        Encoding::Ucs2 => user_data::decode_text(body, body.len(), encoding, 0)?,
        Encoding::EightBit => String::new(),
    };

    Ok(DecodedUserData {
        text,
        data: Bytes::copy_from_slice(body),
        concat,
    })
}

/// Write TP-UDL and TP-UD for a part, header first when it is concatenated
fn write_user_data(buf: &mut BytesMut, part: &Part) -> Result<(), CodecError> {
    let header = match part.concat() {
        Some(concat) => UserDataHeader::for_concatenation(&concat).to_bytes()?,
        None => Vec::new(),
    };

    let encoding = part.encoding();
    let (payload, udl) = match encoding {
        Encoding::Gsm7 => {
            let encoded =
                user_data::encode_text(part.text(), encoding, gsm7_padding_bits(header.len()))?;
            let udl = gsm7_header_septets(header.len()) + encoded.length;
            (encoded.data, udl)
        }
        Encoding::Ucs2 => {
            let encoded = user_data::encode_text(part.text(), encoding, 0)?;
            let udl = header.len() + encoded.length;
            (encoded.data, udl)
        }
        Encoding::EightBit => (part.data().to_vec(), header.len() + part.data().len()),
    };

    let octets = header.len() + payload.len();
    if octets > MAX_USER_DATA_OCTETS {
        return Err(CodecError::FieldValidation {
            field: "user data",
            reason: format!("{octets} octets exceed the {MAX_USER_DATA_OCTETS} octet limit"),
        });
    }

    encode_length(buf, udl, "user data length")?;
    buf.put_slice(&header);
    buf.put_slice(&payload);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIVER_GSM7: &str =
        "07912180958599F6040B916104129660F70000112161255340000AE8329BFD4697D9EC37";
    const DELIVER_CONCAT: &str = "00440B916104129660F7000011216125534000090500032A02019069";
    const DELIVER_UCS2: &str = "00040B916104129660F70008112161255340000400480069";

    fn outgoing(number: &str, text: &str) -> Part {
        let mut part = Part::new(0);
        part.set_number(number);
        part.set_text(text).unwrap();
        part
    }

    #[test]
    fn decode_gsm7_deliver() {
        let part = decode(4, DELIVER_GSM7).unwrap();
        assert_eq!(part.index(), 4);
        assert_eq!(part.smsc(), Some("+12085958996"));
        assert_eq!(part.number(), "+16402169067");
        assert_eq!(part.timestamp().unwrap().to_string(), "111216523504+00");
        assert_eq!(part.text(), "hellohello");
        assert_eq!(part.encoding(), Encoding::Gsm7);
        assert_eq!(part.class(), None);
        assert!(!part.should_concat());
        assert_eq!(part.data().len(), 9);
    }

    #[test]
    fn decode_concatenated_gsm7() {
        let part = decode(0, DELIVER_CONCAT).unwrap();
        assert_eq!(part.smsc(), None);
        assert_eq!(part.text(), "Hi");
        assert!(part.should_concat());
        assert_eq!(part.concat_reference(), Some(0x2A));
        assert_eq!(part.concat_max(), Some(2));
        assert_eq!(part.concat_sequence(), Some(1));
        // Raw data starts after the header, fill bit included
        assert_eq!(part.data().as_ref(), &[0x90, 0x69]);
    }

    #[test]
    fn decode_ucs2() {
        let part = decode(0, DELIVER_UCS2).unwrap();
        assert_eq!(part.encoding(), Encoding::Ucs2);
        assert_eq!(part.text(), "Hi");
    }

    #[test]
    fn decode_accepts_lower_case_and_whitespace() {
        let pdu = format!("{}\r\n", DELIVER_GSM7.to_lowercase());
        assert_eq!(decode(0, &pdu).unwrap().text(), "hellohello");
    }

    #[test]
    fn decode_rejects_submit() {
        let pdu = encode_submit(&outgoing("+16402169067", "hi"), &SubmitOptions::default())
            .unwrap()
            .to_hex();
        assert!(matches!(
            decode(0, &pdu),
            Err(CodecError::UnsupportedMessageType(0x01))
        ));
        assert!(matches!(
            decode_submit(0, DELIVER_GSM7),
            Err(CodecError::UnsupportedMessageType(0x04))
        ));
    }

    #[test]
    fn encode_submit_gsm7() {
        let pdu = encode_submit(
            &outgoing("+16402169067", "hellohello"),
            &SubmitOptions::default(),
        )
        .unwrap();
        assert_eq!(
            pdu.to_hex(),
            "0001000B916104129660F700000AE8329BFD4697D9EC37"
        );
        assert_eq!(pdu.tpdu_offset(), 1);
        assert_eq!(pdu.tpdu_len(), 22);
    }

    #[test]
    fn encode_submit_with_validity_and_report() {
        let mut part = outgoing("+16402169067", "hellohello");
        part.set_validity(Some(4320));
        let pdu = encode_submit(&part, &SubmitOptions::default()).unwrap();
        assert_eq!(
            pdu.to_hex(),
            "0011000B916104129660F70000A90AE8329BFD4697D9EC37"
        );

        let options = SubmitOptions {
            message_reference: 0x42,
            status_report_request: true,
        };
        let pdu = encode_submit(&part, &options).unwrap();
        assert_eq!(&pdu.as_bytes()[1..3], &[0x31, 0x42]);
    }

    #[test]
    fn encode_submit_with_smsc() {
        let mut part = outgoing("+16402169067", "hellohello");
        part.set_smsc(Some("+12085958996".to_string()));
        let pdu = encode_submit(&part, &SubmitOptions::default()).unwrap();
        assert_eq!(pdu.tpdu_offset(), 8);
        assert!(pdu.to_hex().starts_with("07912180958599F601"));
    }

    #[test]
    fn encode_deliver_reproduces_wire_bytes() {
        for pdu in [DELIVER_GSM7, DELIVER_CONCAT, DELIVER_UCS2] {
            let part = decode(0, pdu).unwrap();
            assert_eq!(encode_deliver(&part).unwrap().to_hex(), pdu);
        }
    }

    #[test]
    fn encode_deliver_needs_timestamp() {
        assert!(matches!(
            encode_deliver(&outgoing("+16402169067", "hi")),
            Err(CodecError::FieldValidation {
                field: "timestamp",
                ..
            })
        ));
    }

    #[test]
    fn decode_submit_recovers_validity() {
        let part = decode_submit(0, "0011000B916104129660F70000A90AE8329BFD4697D9EC37").unwrap();
        assert_eq!(part.number(), "+16402169067");
        assert_eq!(part.validity(), Some(4320));
        assert_eq!(part.text(), "hellohello");
        assert_eq!(part.timestamp(), None);
    }

    #[test]
    fn user_data_too_long_is_rejected() {
        let part = outgoing("+16402169067", &"a".repeat(161));
        assert!(matches!(
            encode_submit(&part, &SubmitOptions::default()),
            Err(CodecError::FieldValidation {
                field: "user data",
                ..
            })
        ));
    }

    #[test]
    fn split_single_part() {
        let parts = split_text("+16402169067", &"a".repeat(160), &SplitOptions::default()).unwrap();
        assert_eq!(parts.len(), 1);
        assert!(!parts[0].should_concat());
        assert_eq!(parts[0].encoding(), Encoding::Gsm7);
    }

    #[test]
    fn split_gsm7_at_153() {
        let options = SplitOptions {
            reference: 9,
            ..Default::default()
        };
        let parts = split_text("+16402169067", &"a".repeat(161), &options).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text().len(), 153);
        assert_eq!(parts[1].text().len(), 8);
        for (i, part) in parts.iter().enumerate() {
            assert_eq!(part.index(), i as u32);
            assert_eq!(part.concat_reference(), Some(9));
            assert_eq!(part.concat_max(), Some(2));
            assert_eq!(part.concat_sequence(), Some(i as u8 + 1));
        }

        let pdu = encode_submit(&parts[0], &SubmitOptions::default()).unwrap();
        // First octet 0x41, UDL 160 septets, 140 octets of user data
        assert_eq!(pdu.as_bytes()[1], 0x41);
        assert_eq!(pdu.tpdu_len(), 1 + 1 + 8 + 1 + 1 + 1 + 140);
    }

    #[test]
    fn split_never_breaks_escape_sequences() {
        let text = format!("{}€{}", "a".repeat(152), "b".repeat(10));
        let parts = split_text("+16402169067", &text, &SplitOptions::default()).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text(), "a".repeat(152));
        assert!(parts[1].text().starts_with('€'));
    }

    #[test]
    fn split_ucs2_keeps_surrogate_pairs() {
        let text = format!("{}😀{}", "中".repeat(66), "中".repeat(5));
        let parts = split_text("+16402169067", &text, &SplitOptions::default()).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].encoding(), Encoding::Ucs2);
        assert_eq!(parts[0].text().chars().count(), 66);
        assert!(parts[1].text().starts_with('😀'));
    }

    #[test]
    fn split_with_16bit_reference() {
        let options = SplitOptions {
            reference: 0x1234,
            ..Default::default()
        };
        let parts = split_text("+16402169067", &"a".repeat(200), &options).unwrap();
        assert_eq!(parts[0].text().len(), 152);
        assert_eq!(parts[1].text().len(), 48);

        let pdu = encode_submit(&parts[0], &SubmitOptions::default()).unwrap();
        let decoded = decode_submit(0, &pdu.to_hex()).unwrap();
        assert_eq!(decoded.concat_reference(), Some(0x1234));
        assert_eq!(decoded.text(), parts[0].text());
    }

    #[test]
    fn split_applies_class_and_validity() {
        let options = SplitOptions {
            class: Some(MessageClass::Flash),
            validity: Some(60),
            ..Default::default()
        };
        let parts = split_text("5551234", "hello", &options).unwrap();
        assert_eq!(parts[0].data_coding_scheme().to_byte(), 0x10);
        assert_eq!(parts[0].validity(), Some(60));
    }

    #[test]
    fn split_rejects_unencodable_forced_gsm7() {
        let options = SplitOptions {
            encoding: Some(Encoding::Gsm7),
            ..Default::default()
        };
        assert!(matches!(
            split_text("5551234", "snow ☃", &options),
            Err(CodecError::UnencodableCharacter('☃'))
        ));
    }

    #[test]
    fn split_refuses_too_many_parts() {
        let text = "a".repeat(153 * MAX_PARTS + 1);
        assert!(matches!(
            split_text("5551234", &text, &SplitOptions::default()),
            Err(CodecError::FieldValidation {
                field: "message",
                ..
            })
        ));
    }

    #[test]
    fn split_binary_payload() {
        let data: Vec<u8> = (0..=255u8).chain(0..44).collect();
        let parts = split_data("5551234", &data, &SplitOptions::default()).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].data().len(), 134);
        assert_eq!(parts[2].data().len(), 32);
        assert_eq!(parts[0].encoding(), Encoding::EightBit);

        let pdu = encode_submit(&parts[2], &SubmitOptions::default()).unwrap();
        let decoded = decode_submit(0, &pdu.to_hex()).unwrap();
        assert_eq!(decoded.data(), parts[2].data());
        assert_eq!(decoded.text(), "");
        assert_eq!(decoded.concat_sequence(), Some(3));
    }
}
