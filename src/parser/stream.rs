use winnow::{Bytes, Partial};

/// Input for the record parser, partial so truncated data reports how much is missing
pub type Stream<'i> = Partial<&'i Bytes>;

pub fn new(b: &[u8]) -> Stream<'_> {
    Partial::new(Bytes::new(b))
}

pub trait StreamExt {
    /// Bytes not consumed yet
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StreamExt for Stream<'_> {
    fn len(&self) -> usize {
        winnow::stream::Stream::eof_offset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_length() {
        let stream = new(&[1, 2, 3]);
        assert_eq!(stream.len(), 3);
        assert!(!stream.is_empty());
        assert!(new(&[]).is_empty());
    }
}
