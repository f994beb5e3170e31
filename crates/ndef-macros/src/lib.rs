#[macro_export]
macro_rules! impl_default_for {
    ($name:ident) => {
        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Generates the getter, length and fallible setter for a byte field whose
/// wire length is a single byte (`type` and `id`)
///
/// Expects the calling crate to provide `crate::buffer::OwnedBytes`,
/// `crate::NdefError`, `crate::Result` and `crate::MAX_SHORT_FIELD_LENGTH`
#[macro_export]
#[allow(clippy::crate_in_macro_def)]
macro_rules! short_field_accessors {
    ($field:ident, $setter:ident, $length:ident, $kind:expr) => {
        #[doc = concat!("Borrow the `", stringify!($field), "` bytes, empty when absent")]
        pub fn $field(&self) -> &[u8] {
            self.$field.as_slice()
        }

        #[doc = concat!("Length of the `", stringify!($field), "` field as written on the wire")]
        pub fn $length(&self) -> u8 {
            // setter guarantees the length fits
            self.$field.len() as u8
        }

        #[doc = concat!("Replace the `", stringify!($field), "` bytes with a private copy of `bytes`")]
        ///
        /// # Errors
        /// `FieldTooLong` if `bytes` is longer than 255, `AllocationFailure` if the
        /// copy cannot be allocated. The previous value is kept on error.
        pub fn $setter(&mut self, bytes: &[u8]) -> crate::Result<()> {
            if bytes.len() > crate::MAX_SHORT_FIELD_LENGTH {
                return Err(crate::NdefError::FieldTooLong {
                    field: $kind,
                    length: bytes.len() as u64,
                    max: crate::MAX_SHORT_FIELD_LENGTH as u64,
                });
            }

            let replacement = crate::buffer::OwnedBytes::try_from_slice(bytes, $kind)?;
            self.$field = replacement;
            Ok(())
        }
    };
}
