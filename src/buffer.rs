use crate::error::{NdefError, RecordField, Result};

/// Exclusively owned byte storage for one record field
///
/// An empty buffer never holds an allocation. Every constructor copies, so
/// two buffers never share storage.
#[derive(Debug, Default, PartialEq, Eq, Hash)]
pub struct OwnedBytes(Vec<u8>);

impl OwnedBytes {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Copy `bytes` into a freshly allocated buffer of exactly that size
    pub fn try_from_slice(bytes: &[u8], field: RecordField) -> Result<Self> {
        Self::try_concat(&[bytes], field)
    }

    /// Copy every part, in order, into one freshly allocated buffer
    pub fn try_concat(parts: &[&[u8]], field: RecordField) -> Result<Self> {
        let requested = parts
            .iter()
            .try_fold(0_usize, |total, part| total.checked_add(part.len()))
            .ok_or(NdefError::AllocationFailure { field, requested: u64::MAX })?;

        if requested == 0 {
            return Ok(Self::new());
        }

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(requested).map_err(|error| {
            tracing::warn!("allocation of {requested} bytes for {field} failed: {error}");
            NdefError::AllocationFailure { field, requested: requested as u64 }
        })?;

        for part in parts {
            bytes.extend_from_slice(part);
        }

        Ok(Self(bytes))
    }

    /// Deep copy that reports allocation failure instead of aborting
    pub fn try_clone(&self, field: RecordField) -> Result<Self> {
        Self::try_from_slice(&self.0, field)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }
}

impl Clone for OwnedBytes {
    fn clone(&self) -> Self {
        if self.0.is_empty() {
            return Self::new();
        }

        Self(self.0.as_slice().to_vec())
    }
}
