pub mod stream;

use stream::Stream;
use winnow::{
    ModalResult, Parser,
    binary::{be_u8, be_u32},
    error::{ContextError, ErrMode, Needed},
    token::take,
};

use crate::{
    error::NdefError,
    header::{HeaderFlags, NdefHeader},
};

/// A record that still borrows its bytes from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'i> {
    pub header: NdefHeader,
    pub type_: &'i [u8],
    pub id: Option<&'i [u8]>,
    pub payload: &'i [u8],
}

pub fn parse_ndef_record<'i>(input: &mut Stream<'i>) -> ModalResult<RawRecord<'i>> {
    let header = parse_header.parse_next(input)?;
    let type_ = parse_bytes(input, header.type_length as usize)?;
    let id = parse_id(input, header.id_length)?;
    let payload = parse_bytes(input, header.payload_length as usize)?;

    Ok(RawRecord { header, type_, id, payload })
}

pub fn parse_header(input: &mut Stream<'_>) -> ModalResult<NdefHeader> {
    let (flags, type_name_format) = HeaderFlags::from_header_byte(parse_u8(input)?);
    let type_length = parse_u8(input)?;

    let short_record = flags.contains(HeaderFlags::SHORT_RECORD);
    let payload_length =
        if short_record { u32::from(parse_u8(input)?) } else { parse_u32(input)? };

    let has_id_length = flags.contains(HeaderFlags::ID_LENGTH);
    let id_length = if has_id_length { Some(parse_u8(input)?) } else { None };

    Ok(NdefHeader {
        message_begin: flags.contains(HeaderFlags::MESSAGE_BEGIN),
        message_end: flags.contains(HeaderFlags::MESSAGE_END),
        chunked: flags.contains(HeaderFlags::CHUNKED),
        short_record,
        has_id_length,
        type_name_format,
        type_length,
        payload_length,
        id_length,
    })
}

// private
fn parse_u8(input: &mut Stream<'_>) -> ModalResult<u8> {
    be_u8.parse_next(input)
}

fn parse_u32(input: &mut Stream<'_>) -> ModalResult<u32> {
    be_u32.parse_next(input)
}

fn parse_bytes<'i>(input: &mut Stream<'i>, length: usize) -> ModalResult<&'i [u8]> {
    take(length).parse_next(input)
}

fn parse_id<'i>(input: &mut Stream<'i>, id_length: Option<u8>) -> ModalResult<Option<&'i [u8]>> {
    match id_length {
        Some(id_length) => parse_bytes(input, id_length as usize).map(Some),
        None => Ok(None),
    }
}

impl From<ErrMode<ContextError>> for NdefError {
    fn from(error: ErrMode<ContextError>) -> Self {
        match error {
            ErrMode::Incomplete(Needed::Size(needed)) => {
                NdefError::Incomplete { needed: Some(needed.get() as u64) }
            }
            ErrMode::Incomplete(Needed::Unknown) => NdefError::Incomplete { needed: None },
            ErrMode::Backtrack(error) | ErrMode::Cut(error) => NdefError::Parse(error.to_string()),
        }
    }
}
