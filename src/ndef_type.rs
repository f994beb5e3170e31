use strum::IntoEnumIterator;

/// Type Name Format, the 3 bit classification of a record's `type` field
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Hash,
    PartialEq,
    Eq,
    uniffi::Enum,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum NdefType {
    #[default]
    #[strum(serialize = "Empty")]
    Empty,
    #[strum(serialize = "Well Known")]
    WellKnown,
    #[strum(serialize = "Mime Media")]
    MimeMedia,
    #[strum(serialize = "Absolute URI")]
    AbsoluteUri,
    #[strum(serialize = "External")]
    ExternalType,
    #[strum(serialize = "Unknown")]
    Unknown,
    #[strum(serialize = "Unchanged")]
    Unchanged,
    #[strum(serialize = "Reserved")]
    Reserved,
}

/// Mask of the TNF bits inside the header byte
pub const TNF_MASK: u8 = 0b0000_0111;

impl NdefType {
    /// Human readable name
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Decode the low 3 bits of a header byte, higher bits are ignored
    pub fn from_header_byte(byte: u8) -> Self {
        match byte & TNF_MASK {
            0 => NdefType::Empty,
            1 => NdefType::WellKnown,
            2 => NdefType::MimeMedia,
            3 => NdefType::AbsoluteUri,
            4 => NdefType::ExternalType,
            5 => NdefType::Unknown,
            6 => NdefType::Unchanged,
            _ => NdefType::Reserved,
        }
    }
}

impl From<NdefType> for u8 {
    fn from(tnf: NdefType) -> Self {
        match tnf {
            NdefType::Empty => 0,
            NdefType::WellKnown => 1,
            NdefType::MimeMedia => 2,
            NdefType::AbsoluteUri => 3,
            NdefType::ExternalType => 4,
            NdefType::Unknown => 5,
            NdefType::Unchanged => 6,
            NdefType::Reserved => 7,
        }
    }
}

#[uniffi::export]
fn ndef_type_label(ndef_type: NdefType) -> String {
    ndef_type.label().to_string()
}

#[uniffi::export]
fn all_ndef_types() -> Vec<NdefType> {
    NdefType::iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip_through_header_byte() {
        for (expected, tnf) in NdefType::iter().enumerate() {
            let value = u8::from(tnf);
            assert_eq!(value as usize, expected);
            assert_eq!(NdefType::from_header_byte(value), tnf);
        }
    }

    #[test]
    fn header_flags_do_not_leak_into_tnf() {
        assert_eq!(NdefType::from_header_byte(0xD1), NdefType::WellKnown);
        assert_eq!(NdefType::from_header_byte(0x1A), NdefType::MimeMedia);
        assert_eq!(NdefType::from_header_byte(0x0F), NdefType::Reserved);
    }

    #[test]
    fn labels() {
        assert_eq!(NdefType::default(), NdefType::Empty);
        assert_eq!(NdefType::WellKnown.label(), "Well Known");
        assert_eq!(NdefType::AbsoluteUri.to_string(), "Absolute URI");
        assert_eq!(NdefType::ExternalType.label(), "External");
        assert_eq!(all_ndef_types().len(), 8);
    }
}
