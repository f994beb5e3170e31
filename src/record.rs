use std::fmt;

use ndef_macros::{impl_default_for, short_field_accessors};

use crate::{
    MAX_PAYLOAD_LENGTH, MAX_TEXT_LANGUAGE_LENGTH, SHORT_RECORD_MAX_PAYLOAD,
    buffer::OwnedBytes,
    error::{NdefError, RecordField, Result},
    header::{HeaderFlags, NdefHeader},
    ndef_type::NdefType,
    parser::{
        self,
        stream::{self, StreamExt as _},
    },
    payload::{self, RTD_TEXT, RTD_URI, TextPayload},
};

impl_default_for!(NdefRecord);

/// A single NDEF record, owns copies of all of its bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NdefRecord {
    tnf: NdefType,
    type_: OwnedBytes,
    payload: OwnedBytes,
    id: OwnedBytes,
}

/// Result of decoding one record from the front of a byte slice
///
/// A record whose id-present flag is set with an id length of 0 decodes to a
/// record without id. Re-encoding it omits the id length byte, so
/// `record.encoded_size()` is one less than `consumed` in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    /// Header as found on the wire, including the message begin / end flags
    pub header: NdefHeader,
    pub record: NdefRecord,
    /// Number of bytes the record used
    pub consumed: usize,
}

impl NdefRecord {
    /// Empty record, TNF `Empty` and no type, payload or id
    pub const fn new() -> Self {
        Self {
            tnf: NdefType::Empty,
            type_: OwnedBytes::new(),
            payload: OwnedBytes::new(),
            id: OwnedBytes::new(),
        }
    }

    /// Well known URI record, the longest matching prefix is stored as its code
    pub fn uri(uri: &str) -> Result<Self> {
        let (code, rest) = payload::longest_uri_prefix(uri);

        let mut record = Self::new();
        record.set_tnf(NdefType::WellKnown);
        record.set_type(&[RTD_URI])?;
        record.set_payload_with_header(&[code], rest.as_bytes())?;
        Ok(record)
    }

    /// Well known UTF-8 Text record
    pub fn text(language: &str, text: &str) -> Result<Self> {
        if language.len() > MAX_TEXT_LANGUAGE_LENGTH {
            return Err(NdefError::FieldTooLong {
                field: RecordField::Language,
                length: language.len() as u64,
                max: MAX_TEXT_LANGUAGE_LENGTH as u64,
            });
        }

        let status = payload::text_status_byte(language);

        let mut record = Self::new();
        record.set_tnf(NdefType::WellKnown);
        record.set_type(&[RTD_TEXT])?;
        record.payload = OwnedBytes::try_concat(
            &[&[status], language.as_bytes(), text.as_bytes()],
            RecordField::Payload,
        )?;

        record.check_payload_length()?;
        Ok(record)
    }

    /// Mime media record, `media_type` is stored as the record type
    pub fn mime(media_type: &str, data: &[u8]) -> Result<Self> {
        let mut record = Self::new();
        record.set_tnf(NdefType::MimeMedia);
        record.set_type(media_type.as_bytes())?;
        record.set_payload(data)?;
        Ok(record)
    }

    pub fn tnf(&self) -> NdefType {
        self.tnf
    }

    pub fn set_tnf(&mut self, tnf: NdefType) {
        self.tnf = tnf;
    }

    short_field_accessors!(type_, set_type, type_length, RecordField::Type);
    short_field_accessors!(id, set_id, id_length, RecordField::Id);

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn payload(&self) -> &[u8] {
        self.payload.as_slice()
    }

    pub fn payload_length(&self) -> u32 {
        // setters guarantee the length fits
        self.payload.len() as u32
    }

    /// Replace the payload with a private copy of `bytes`
    ///
    /// # Errors
    /// `FieldTooLong` past `u32::MAX` bytes, `AllocationFailure` if the copy
    /// cannot be allocated. The previous payload is kept on error.
    pub fn set_payload(&mut self, bytes: &[u8]) -> Result<()> {
        self.set_payload_with_header(&[], bytes)
    }

    /// Replace the payload with `header` followed by `body`
    pub fn set_payload_with_header(&mut self, header: &[u8], body: &[u8]) -> Result<()> {
        let length = header.len() as u64 + body.len() as u64;
        if length > MAX_PAYLOAD_LENGTH as u64 {
            return Err(NdefError::FieldTooLong {
                field: RecordField::Payload,
                length,
                max: MAX_PAYLOAD_LENGTH as u64,
            });
        }

        let replacement = OwnedBytes::try_concat(&[header, body], RecordField::Payload)?;
        self.payload = replacement;
        Ok(())
    }

    /// Deep copy that reports allocation failure instead of aborting
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            tnf: self.tnf,
            type_: self.type_.try_clone(RecordField::Type)?,
            payload: self.payload.try_clone(RecordField::Payload)?,
            id: self.id.try_clone(RecordField::Id)?,
        })
    }

    /// Replace every field with a copy of `other`'s
    ///
    /// All copies are made before anything is replaced, so on error `self`
    /// is unchanged.
    pub fn try_assign_from(&mut self, other: &Self) -> Result<()> {
        *self = other.try_clone()?;
        Ok(())
    }

    /// Exact number of bytes `encode` writes
    pub fn encoded_size(&self) -> usize {
        let payload_length_size = if self.is_short_record() { 1 } else { 4 };
        let id_length_size = if self.has_id() { 1 } else { 0 };

        2 + payload_length_size
            + id_length_size
            + self.type_.len()
            + self.payload.len()
            + self.id.len()
    }

    /// Flags and TNF byte, first / last place the record inside its message
    pub fn tnf_byte(&self, first_record: bool, last_record: bool) -> u8 {
        let mut flags = HeaderFlags::empty();
        flags.set(HeaderFlags::MESSAGE_BEGIN, first_record);
        flags.set(HeaderFlags::MESSAGE_END, last_record);
        flags.set(HeaderFlags::SHORT_RECORD, self.is_short_record());
        flags.set(HeaderFlags::ID_LENGTH, self.has_id());

        flags.to_header_byte(self.tnf)
    }

    /// Write the record into the front of `data`, returns the bytes written
    ///
    /// # Errors
    /// `BufferTooSmall` if `data` is shorter than `encoded_size`, nothing is
    /// written in that case
    pub fn encode(&self, data: &mut [u8], first_record: bool, last_record: bool) -> Result<usize> {
        let needed = self.encoded_size();
        if data.len() < needed {
            return Err(NdefError::BufferTooSmall {
                needed: needed as u64,
                actual: data.len() as u64,
            });
        }

        let mut writer = Writer { data: &mut data[..needed], offset: 0 };

        writer.put(&[self.tnf_byte(first_record, last_record), self.type_length()]);

        if self.is_short_record() {
            writer.put(&[self.payload.len() as u8]);
        } else {
            writer.put(&self.payload_length().to_be_bytes());
        }

        if self.has_id() {
            writer.put(&[self.id_length()]);
        }

        writer.put(self.type_.as_slice());
        writer.put(self.id.as_slice());
        writer.put(self.payload.as_slice());

        debug_assert_eq!(writer.offset, needed);
        Ok(writer.offset)
    }

    /// Encode into a newly allocated buffer of exactly `encoded_size` bytes
    pub fn to_bytes(&self, first_record: bool, last_record: bool) -> Result<Vec<u8>> {
        let size = self.encoded_size();

        let mut data = Vec::new();
        data.try_reserve_exact(size).map_err(|_| NdefError::AllocationFailure {
            field: RecordField::Payload,
            requested: size as u64,
        })?;

        data.resize(size, 0);
        self.encode(&mut data, first_record, last_record)?;
        Ok(data)
    }

    /// Decode the record at the front of `bytes`, trailing bytes are left alone
    pub fn decode(bytes: &[u8]) -> Result<DecodedRecord> {
        let mut input = stream::new(bytes);

        let raw = parser::parse_ndef_record(&mut input)?;
        if raw.header.chunked {
            tracing::warn!("refusing to decode a chunked record");
            return Err(NdefError::ChunkedUnsupported);
        }

        let consumed = bytes.len() - input.len();
        tracing::trace!("decoded {} record, {consumed} bytes", raw.header.type_name_format);

        let mut record = Self::new();
        record.set_tnf(raw.header.type_name_format);
        record.set_type(raw.type_)?;
        record.set_id(raw.id.unwrap_or_default())?;
        record.set_payload(raw.payload)?;

        Ok(DecodedRecord { header: raw.header, record, consumed })
    }

    /// The URI of a well known URI or Smart Poster record
    ///
    /// Smart Poster support covers a payload that starts with a single short
    /// URI record without an id, its prefix code is not applied.
    pub fn as_uri(&self) -> Option<String> {
        payload::uri_from_parts(self.tnf, self.type_(), self.payload())
    }

    /// The text of a well known Text record
    pub fn as_text(&self) -> Option<TextPayload> {
        payload::text_from_parts(self.tnf, self.type_(), self.payload())
    }

    fn is_short_record(&self) -> bool {
        self.payload.len() <= SHORT_RECORD_MAX_PAYLOAD
    }

    fn check_payload_length(&self) -> Result<()> {
        if self.payload.len() > MAX_PAYLOAD_LENGTH {
            return Err(NdefError::FieldTooLong {
                field: RecordField::Payload,
                length: self.payload.len() as u64,
                max: MAX_PAYLOAD_LENGTH as u64,
            });
        }

        Ok(())
    }
}

struct Writer<'a> {
    data: &'a mut [u8],
    offset: usize,
}

impl Writer<'_> {
    fn put(&mut self, bytes: &[u8]) {
        let end = self.offset + bytes.len();
        self.data[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
    }
}

impl fmt::Display for NdefRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tnf = u8::from(self.tnf);
        writeln!(f, "NDEF Record")?;
        writeln!(f, "  TNF {tnf:#04x} {}", self.tnf)?;
        writeln!(f, "  Type Length {}", self.type_length())?;
        writeln!(f, "  Payload Length {}", self.payload_length())?;
        if self.has_id() {
            writeln!(f, "  Id Length {}", self.id_length())?;
        }

        writeln!(f, "  Type {}", hex::encode(self.type_()))?;
        writeln!(f, "  Payload {}", hex::encode(self.payload()))?;
        if self.has_id() {
            writeln!(f, "  Id {}", hex::encode(self.id()))?;
        }

        write!(f, "  Record is {} bytes", self.encoded_size())
    }
}
