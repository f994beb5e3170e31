use std::sync::Arc;

use ndef_macros::impl_default_for;
use parking_lot::Mutex;

use crate::{
    error::NdefError,
    header::NdefHeader,
    ndef_type::NdefType,
    payload::TextPayload,
    record::{DecodedRecord, NdefRecord},
};

impl_default_for!(FfiNdefRecord);

/// Shared handle to a record for Swift / Kotlin callers
#[derive(Debug, Clone, uniffi::Object)]
pub struct FfiNdefRecord(Arc<Mutex<NdefRecord>>);

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDecodedRecord {
    pub header: NdefHeader,
    pub record: Arc<FfiNdefRecord>,
    pub consumed: u64,
}

impl From<NdefRecord> for FfiNdefRecord {
    fn from(record: NdefRecord) -> Self {
        Self(Arc::new(Mutex::new(record)))
    }
}

impl From<DecodedRecord> for FfiDecodedRecord {
    fn from(decoded: DecodedRecord) -> Self {
        Self {
            header: decoded.header,
            record: Arc::new(decoded.record.into()),
            consumed: decoded.consumed as u64,
        }
    }
}

#[uniffi::export]
impl FfiNdefRecord {
    #[uniffi::constructor]
    pub fn new() -> Self {
        NdefRecord::new().into()
    }

    #[uniffi::constructor]
    pub fn uri(uri: String) -> Result<Self, NdefError> {
        NdefRecord::uri(&uri).map(Into::into)
    }

    #[uniffi::constructor]
    pub fn text(language: String, text: String) -> Result<Self, NdefError> {
        NdefRecord::text(&language, &text).map(Into::into)
    }

    #[uniffi::constructor]
    pub fn mime(media_type: String, data: Vec<u8>) -> Result<Self, NdefError> {
        NdefRecord::mime(&media_type, &data).map(Into::into)
    }

    /// Independent copy, later changes to either record do not affect the other
    #[uniffi::method]
    pub fn copy(&self) -> Result<Arc<Self>, NdefError> {
        let record = self.0.lock().try_clone()?;
        Ok(Arc::new(record.into()))
    }

    #[uniffi::method]
    pub fn tnf(&self) -> NdefType {
        self.0.lock().tnf()
    }

    #[uniffi::method]
    pub fn set_tnf(&self, tnf: NdefType) {
        self.0.lock().set_tnf(tnf)
    }

    #[uniffi::method]
    pub fn type_(&self) -> Vec<u8> {
        self.0.lock().type_().to_vec()
    }

    #[uniffi::method]
    pub fn set_type(&self, type_: Vec<u8>) -> Result<(), NdefError> {
        self.0.lock().set_type(&type_)
    }

    #[uniffi::method]
    pub fn payload(&self) -> Vec<u8> {
        self.0.lock().payload().to_vec()
    }

    #[uniffi::method]
    pub fn set_payload(&self, payload: Vec<u8>) -> Result<(), NdefError> {
        self.0.lock().set_payload(&payload)
    }

    #[uniffi::method]
    pub fn set_payload_with_header(&self, header: Vec<u8>, body: Vec<u8>) -> Result<(), NdefError> {
        self.0.lock().set_payload_with_header(&header, &body)
    }

    #[uniffi::method]
    pub fn id(&self) -> Option<Vec<u8>> {
        let record = self.0.lock();
        record.has_id().then(|| record.id().to_vec())
    }

    #[uniffi::method]
    pub fn set_id(&self, id: Option<Vec<u8>>) -> Result<(), NdefError> {
        self.0.lock().set_id(id.as_deref().unwrap_or_default())
    }

    #[uniffi::method]
    pub fn encoded_size(&self) -> u64 {
        self.0.lock().encoded_size() as u64
    }

    #[uniffi::method]
    pub fn encode(&self, first_record: bool, last_record: bool) -> Result<Vec<u8>, NdefError> {
        self.0.lock().to_bytes(first_record, last_record)
    }

    #[uniffi::method]
    pub fn as_uri(&self) -> Option<String> {
        self.0.lock().as_uri()
    }

    #[uniffi::method]
    pub fn as_text(&self) -> Option<TextPayload> {
        self.0.lock().as_text()
    }

    #[uniffi::method]
    pub fn is_equal(&self, rhs: Arc<Self>) -> bool {
        if Arc::ptr_eq(&self.0, &rhs.0) {
            return true;
        }

        // never hold both locks, callers may compare in either order from different threads
        let lhs = self.0.lock().clone();
        lhs == *rhs.0.lock()
    }
}

#[uniffi::export]
fn decode_ndef_record(bytes: Vec<u8>) -> Result<FfiDecodedRecord, NdefError> {
    NdefRecord::decode(&bytes).map(Into::into)
}
