//! Transaction tags.

use crate::hash::fixed_trytes;
use crate::trytes::IntoTrytes;

fixed_trytes!(
    /// A 27-tryte transaction tag.
    Tag,
    crate::TAG_TRYTES
);

impl Tag {
    /// Builds a tag from up to 27 trytes, padding with null trytes.
    pub fn from_short(input: impl IntoTrytes) -> Result<Self, crate::TrytesError> {
        let trytes = input.into_trytes()?;
        if trytes.len() > Self::LEN {
            return Err(crate::TrytesError::WrongLength {
                kind: "Tag",
                expected: Self::LEN,
                actual: trytes.len(),
            });
        }
        Self::from_trytes(trytes.pad_to(Self::LEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tags_are_padded() {
        let tag = Tag::from_short("COFFEE").unwrap();
        assert_eq!(tag.as_str(), "COFFEE999999999999999999999");
    }

    #[test]
    fn overlong_tags_are_rejected() {
        assert!(Tag::from_short("9".repeat(28)).is_err());
        assert!(Tag::from_short("9".repeat(27)).is_ok());
    }
}
