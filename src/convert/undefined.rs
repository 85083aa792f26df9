//! Text form of EXIF `Undefined` values: space-separated decimal bytes.

/// `"48 50 50 49"` → `"0221"`.
///
/// Trailing whitespace is ignored; anything else that is not a single space
/// between decimal byte values is rejected.
pub fn undefined_to_string(text: &str) -> Option<String> {
    let text = text.trim_end();
    if text.is_empty() {
        return Some(String::new());
    }
    text.split(' ')
        .map(|byte| {
            if byte.is_empty() || !byte.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            byte.parse::<u8>().ok().map(char::from)
        })
        .collect()
}

/// `"0221"` → `"48 50 50 49"`. Characters above U+00FF have no byte form.
pub fn string_to_undefined(text: &str) -> Option<String> {
    let bytes: Option<Vec<String>> = text
        .chars()
        .map(|c| u8::try_from(c).ok().map(|b| b.to_string()))
        .collect();
    bytes.map(|bytes| bytes.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_bytes() -> (String, String) {
        let numbers: Vec<String> = (0..=255u8).map(|b| b.to_string()).collect();
        let chars: String = (0..=255u8).map(char::from).collect();
        (numbers.join(" "), chars)
    }

    #[test]
    fn invertible() {
        let (numbers, chars) = all_bytes();
        for (u, s) in [("", ""), ("48 50 50 49", "0221"), (numbers.as_str(), chars.as_str())] {
            assert_eq!(undefined_to_string(u).as_deref(), Some(s));
            assert_eq!(string_to_undefined(s).as_deref(), Some(u));
        }
    }

    #[test]
    fn trailing_whitespace_is_one_way() {
        assert_eq!(undefined_to_string("48 50 50 49 ").as_deref(), Some("0221"));
        assert_eq!(
            undefined_to_string("48 50 50 49\t").as_deref(),
            Some("0221")
        );
    }

    #[test]
    fn invalid() {
        assert_eq!(undefined_to_string("foo"), None);
        assert_eq!(undefined_to_string("48 50  50 49"), None);
        assert_eq!(undefined_to_string("256"), None);
        assert_eq!(undefined_to_string("2 0 0 foo"), None);
        assert_eq!(string_to_undefined("ʐ"), None);
    }
}
