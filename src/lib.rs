pub mod charset;
pub mod codec;
pub mod datatypes;
pub mod part;
pub mod pdu;


// Re-export codec types for direct access
pub use codec::{CodecError, PduCursor};

// Re-export the main encode/decode API for easy access
pub use datatypes::{DataCodingScheme, Encoding, MessageClass, Timestamp};
pub use part::Part;
pub use pdu::{
    EncodedPdu, SplitOptions, SubmitOptions, decode, decode_submit, encode_deliver,
    encode_submit, split_data, split_text,
};

/// A specialized `Result` type for PDU operations.
///
/// Every failure is a [`CodecError`]; a decode either produces a complete
/// [`Part`] or nothing.
///
/// # Examples
///
/// ## Decoding a received message
///
/// Hex text as returned by `AT+CMGR` in PDU mode:
///
/// ```rust
/// use modem_sms::decode;
///
/// fn main() -> modem_sms::Result<()> {
///     let part = decode(
///         1,
///         "07912180958599F6040B916104129660F70000112161255340000AE8329BFD4697D9EC37",
///     )?;
///
///     assert_eq!(part.smsc(), Some("+12085958996"));
///     assert_eq!(part.number(), "+16402169067");
///     assert_eq!(part.text(), "hellohello");
///     assert_eq!(part.timestamp().unwrap().to_string(), "111216523504+00");
///     Ok(())
/// }
/// ```
///
/// ## Sending a long message
///
/// Split the text, then encode each part for `AT+CMGS=<tpdu_len>`:
///
/// ```rust
/// use modem_sms::{SplitOptions, SubmitOptions, encode_submit, split_text};
///
/// fn main() -> modem_sms::Result<()> {
///     let options = SplitOptions {
///         reference: 42,
///         ..Default::default()
///     };
///     let parts = split_text("+16402169067", &"x".repeat(200), &options)?;
///     assert_eq!(parts.len(), 2);
///
///     for part in &parts {
///         let pdu = encode_submit(part, &SubmitOptions::default())?;
///         println!("AT+CMGS={}\r{}\x1a", pdu.tpdu_len(), pdu.to_hex());
///     }
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CodecError>;
