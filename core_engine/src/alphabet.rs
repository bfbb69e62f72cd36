use crate::error::TrieError;

/// Number of letters a node can branch on.
pub(crate) const SIZE: usize = 26;

/// Checks that every character of `text` is a lowercase ASCII letter and returns its bytes.
pub(crate) fn validate(text: &str) -> Result<&[u8], TrieError> {
    match text.char_indices().find(|(_, ch)| !ch.is_ascii_lowercase()) {
        Some((position, ch)) => Err(TrieError::InvalidCharacter { ch, position }),
        None => Ok(text.as_bytes()),
    }
}

/// Child slot for a letter. Callers only pass bytes that went through [`validate`].
pub(crate) fn slot(letter: u8) -> usize {
    debug_assert!(letter.is_ascii_lowercase());
    (letter - b'a') as usize
}

/// Inverse of [`slot`].
#[cfg(test)]
pub(crate) fn letter(slot: usize) -> u8 {
    debug_assert!(slot < SIZE);
    b'a' + slot as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_and_empty() {
        assert_eq!(validate("hello").unwrap(), b"hello");
        assert_eq!(validate("").unwrap(), b"");
    }

    #[test]
    fn reports_first_offending_character() {
        assert_eq!(
            validate("caT"),
            Err(TrieError::InvalidCharacter { ch: 'T', position: 2 })
        );
        assert_eq!(
            validate("ab1c"),
            Err(TrieError::InvalidCharacter { ch: '1', position: 2 })
        );
    }

    #[test]
    fn position_is_a_byte_offset() {
        assert_eq!(
            validate("éa"),
            Err(TrieError::InvalidCharacter { ch: 'é', position: 0 })
        );
        assert_eq!(
            validate("aé"),
            Err(TrieError::InvalidCharacter { ch: 'é', position: 1 })
        );
    }

    #[test]
    fn slot_and_letter_are_inverse() {
        for s in 0..SIZE {
            assert_eq!(slot(letter(s)), s);
        }
        assert_eq!(slot(b'a'), 0);
        assert_eq!(slot(b'z'), 25);
    }
}
