use crate::ndef_type::{NdefType, TNF_MASK};

bitflags::bitflags! {
    /// Flag bits of the first byte of a record, the low 3 bits hold the TNF
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u8 {
        /// First record of a message
        const MESSAGE_BEGIN = 0b1000_0000;
        /// Last record of a message
        const MESSAGE_END = 0b0100_0000;
        /// Payload continues in the next record, never written by this crate
        const CHUNKED = 0b0010_0000;
        /// Payload length is a single byte
        const SHORT_RECORD = 0b0001_0000;
        /// An id length byte follows the payload length
        const ID_LENGTH = 0b0000_1000;
    }
}

impl HeaderFlags {
    /// Combine with a TNF into the header byte
    pub fn to_header_byte(self, tnf: NdefType) -> u8 {
        self.bits() | u8::from(tnf)
    }

    /// Split a header byte into its flags and TNF
    pub fn from_header_byte(byte: u8) -> (Self, NdefType) {
        let flags = Self::from_bits_truncate(byte & !TNF_MASK);
        (flags, NdefType::from_header_byte(byte))
    }
}

/// Header of a decoded record, as it was found on the wire
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefHeader {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunked: bool,
    pub short_record: bool,
    pub has_id_length: bool,
    pub type_name_format: NdefType,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_byte_layout() {
        let flags = HeaderFlags::MESSAGE_BEGIN | HeaderFlags::SHORT_RECORD;
        assert_eq!(flags.to_header_byte(NdefType::WellKnown), 0b1001_0001);

        let all = HeaderFlags::all();
        assert_eq!(all.to_header_byte(NdefType::Reserved), 0xFF);
        assert_eq!(HeaderFlags::empty().to_header_byte(NdefType::Empty), 0x00);
    }

    #[test]
    fn split_header_byte() {
        let (flags, tnf) = HeaderFlags::from_header_byte(0xD1);
        assert_eq!(tnf, NdefType::WellKnown);
        assert!(flags.contains(HeaderFlags::MESSAGE_BEGIN | HeaderFlags::MESSAGE_END));
        assert!(flags.contains(HeaderFlags::SHORT_RECORD));
        assert!(!flags.contains(HeaderFlags::CHUNKED));
        assert!(!flags.contains(HeaderFlags::ID_LENGTH));
    }
}
