//! UTF-16 code unit helpers.
//!
//! Native text widgets report lengths and selection offsets in UTF-16 code
//! units while Rust strings are UTF-8. These helpers translate between the two
//! without ever splitting a character.

/// Number of UTF-16 code units needed to encode `s`.
#[must_use]
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Byte offset of the first `units` UTF-16 code units of `s`.
///
/// Clamps to `s.len()`. An offset landing inside a surrogate pair snaps down
/// to the start of that character.
#[must_use]
pub fn utf16_to_byte_offset(s: &str, units: usize) -> usize {
    let mut seen = 0;
    for (idx, c) in s.char_indices() {
        if seen >= units {
            return idx;
        }
        seen += c.len_utf16();
        if seen > units {
            return idx;
        }
    }
    s.len()
}

/// Longest prefix of `s` that is at most `max` UTF-16 code units long.
#[must_use]
pub fn utf16_head(s: &str, max: usize) -> &str {
    &s[..utf16_to_byte_offset(s, max)]
}

/// Longest suffix of `s` that is at most `max` UTF-16 code units long.
#[must_use]
pub fn utf16_tail(s: &str, max: usize) -> &str {
    let mut seen = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        seen += c.len_utf16();
        if seen > max {
            break;
        }
        start = idx;
    }
    &s[start..]
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_len_counts_surrogate_pairs_twice() {
        assert_eq!(utf16_len(""), 0);
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("せ"), 1);
        assert_eq!(utf16_len("a📅b"), 4);
    }

    #[test]
    fn byte_offset_for_ascii() {
        assert_eq!(utf16_to_byte_offset("hello", 0), 0);
        assert_eq!(utf16_to_byte_offset("hello", 3), 3);
        assert_eq!(utf16_to_byte_offset("hello", 5), 5);
        assert_eq!(utf16_to_byte_offset("hello", 99), 5);
    }

    #[test]
    fn byte_offset_for_multibyte() {
        // "ö" is 2 bytes, 1 unit; "📅" is 4 bytes, 2 units
        let s = "ö📅x";
        assert_eq!(utf16_to_byte_offset(s, 1), 2);
        assert_eq!(utf16_to_byte_offset(s, 3), 6);
        assert_eq!(utf16_to_byte_offset(s, 4), 7);
    }

    #[test]
    fn byte_offset_inside_surrogate_pair_snaps_down() {
        assert_eq!(utf16_to_byte_offset("a📅b", 2), 1);
    }

    #[test]
    fn head_and_tail_respect_limits() {
        assert_eq!(utf16_head("hello", 2), "he");
        assert_eq!(utf16_tail("hello", 2), "lo");
        assert_eq!(utf16_head("hello", 10), "hello");
        assert_eq!(utf16_tail("hello", 10), "hello");
        assert_eq!(utf16_tail("hello", 0), "");
    }

    #[test]
    fn head_and_tail_never_split_a_pair() {
        assert_eq!(utf16_head("a📅", 2), "a");
        assert_eq!(utf16_tail("📅a", 2), "a");
        assert_eq!(utf16_tail("📅a", 3), "📅a");
    }

    #[test]
    fn surrogate_classification() {
        let units: Vec<u16> = "📅".encode_utf16().collect();
        assert!(is_high_surrogate(units[0]));
        assert!(is_low_surrogate(units[1]));
        assert!(!is_high_surrogate(u16::from(b'a')));
        assert!(!is_low_surrogate(u16::from(b'a')));
    }
}
