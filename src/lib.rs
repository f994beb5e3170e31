pub mod buffer;
pub mod error;
pub mod ffi;
pub mod header;
pub mod logging;
pub mod ndef_type;
pub mod parser;
pub mod payload;
pub mod record;

pub use error::{NdefError, RecordField, Result};
pub use header::{HeaderFlags, NdefHeader};
pub use ndef_type::NdefType;
pub use payload::{TextPayload, TextPayloadFormat};
pub use record::{DecodedRecord, NdefRecord};

uniffi::setup_scaffolding!();

/// Largest payload that still fits the one byte length of a short record
pub const SHORT_RECORD_MAX_PAYLOAD: usize = 0xFF;

/// Largest `type` or `id` field, both have a one byte length on the wire
pub const MAX_SHORT_FIELD_LENGTH: usize = 0xFF;

/// Largest payload the four byte long record length can describe
pub const MAX_PAYLOAD_LENGTH: usize = u32::MAX as usize;

/// Language code length is stored in the low 6 bits of the text status byte
pub const MAX_TEXT_LANGUAGE_LENGTH: usize = 0x3F;
