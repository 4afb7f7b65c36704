//! ISO 7064 MOD 97-10 arithmetic for IBAN check digits.
//!
//! Two building blocks live here:
//!
//! - [`encode_letters_to_digits`] turns an alphanumeric IBAN body into the
//!   all-digit string the checksum is computed over.
//! - [`mod97_10`] reduces an arbitrarily long decimal string modulo 97 using
//!   only fixed-width integer arithmetic.
//!
//! Neither function allocates a big integer; the only heap use is the
//! working string of the current reduction step.

/// Maximum number of digits parsed into an integer in one reduction step.
///
/// Nine decimal digits stay below `10^9`, which leaves ample headroom in a
/// `u64` for the subsequent `% 97`.
const WINDOW: usize = 9;

/// Computes `digits mod 97` for a decimal string of any length.
///
/// Returns `None` ("no valid remainder") when `digits` is empty or contains
/// anything other than ASCII `0`–`9`.
///
/// # Algorithm
///
/// The string is reduced in a fixed-point loop:
///
/// 1. Take the leading window of at most 9 digits and parse it.
/// 2. If the window spans the whole remaining string, return it modulo 97.
///    A value already below 97 is returned unchanged.
/// 3. Otherwise replace the window by `window % 97` (written without
///    padding) in front of the unconsumed tail and repeat.
///
/// Each step shrinks the string by at least seven characters, so the loop
/// terminates after roughly `len / 7` iterations. Leading zeros only move
/// window boundaries; they never change the result.
///
/// # Examples
///
/// ```
/// use iban_core::check_digits::mod97_10;
///
/// assert_eq!(mod97_10("182316110001234567232100"), Some(78));
/// assert_eq!(mod97_10("0000123"), Some(26));
/// assert_eq!(mod97_10("5"), Some(5));
/// assert_eq!(mod97_10(""), None);
/// assert_eq!(mod97_10("12a4"), None);
/// ```
pub fn mod97_10(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut remaining = digits.to_owned();
    loop {
        let width = remaining.len().min(WINDOW);
        let window: u64 = remaining[..width].parse().ok()?;

        if width == remaining.len() {
            return u32::try_from(window % 97).ok();
        }

        let remainder = window % 97;
        remaining = format!("{remainder}{}", &remaining[width..]);
    }
}

/// Encodes an IBAN body as the all-digit string used for MOD 97-10.
///
/// Digits `0`–`9` map to themselves and uppercase letters `A`–`Z` map to
/// `10`–`35`, concatenated without separators. Any other character
/// (including lowercase letters and whitespace) makes the whole input
/// unencodable and the function returns `None`; it never returns a partial
/// encoding. The empty string encodes to the empty string.
///
/// # Examples
///
/// ```
/// use iban_core::check_digits::encode_letters_to_digits;
///
/// assert_eq!(
///     encode_letters_to_digits("GB82WEST12345698765432").as_deref(),
///     Some("1611823214282912345698765432"),
/// );
/// assert_eq!(encode_letters_to_digits("gb82"), None);
/// ```
pub fn encode_letters_to_digits(input: &str) -> Option<String> {
    let mut encoded = String::with_capacity(input.len() * 2);
    for byte in input.bytes() {
        match byte {
            b'0'..=b'9' => encoded.push(char::from(byte)),
            b'A'..=b'Z' => {
                let value = byte - b'A' + 10;
                encoded.push(char::from(b'0' + value / 10));
                encoded.push(char::from(b'0' + value % 10));
            }
            _ => return None,
        }
    }
    Some(encoded)
}
