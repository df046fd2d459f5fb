pub mod address;
mod data_coding;
mod first_octet;
pub mod semi_octet;
mod timestamp;
pub mod udh;
pub mod user_data;
pub mod validity;

pub use address::{AddressType, NumberingPlan, TypeOfNumber};
pub use data_coding::{DataCodingScheme, Encoding, MessageClass};
pub use first_octet::{FirstOctet, MessageType, ValidityPeriodFormat};
pub use timestamp::{TIMESTAMP_LEN, Timestamp};
pub use udh::{Concatenation, InformationElement, UserDataHeader};
