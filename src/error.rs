/// Which byte field of a record an error refers to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, uniffi::Enum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RecordField {
    Type,
    Payload,
    Id,
    Language,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum NdefError {
    #[error("unable to allocate {requested} bytes for the record {field}")]
    AllocationFailure { field: RecordField, requested: u64 },

    #[error("record {field} is {length} bytes, the maximum is {max}")]
    FieldTooLong { field: RecordField, length: u64, max: u64 },

    /// Destination passed to encode is smaller than `NdefRecord::encoded_size`
    #[error("buffer too small to encode record, need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: u64, actual: u64 },

    /// Input ended before the record did, `needed` is the missing byte count when known
    #[error("not enough data to decode the record, need {needed:?} more bytes")]
    Incomplete { needed: Option<u64> },

    #[error("chunked records are not supported")]
    ChunkedUnsupported,

    #[error("error decoding the record: {0}")]
    Parse(String),
}

pub type Error = NdefError;
pub type Result<T, E = Error> = std::result::Result<T, E>;
