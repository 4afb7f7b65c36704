//! BBAN field format codes and the matcher that checks a segment against one.
//!
//! A country's BBAN layout is a sequence of 3-character codes such as `U04`
//! or `F10`: one [`CharacterClass`] letter followed by a two-digit,
//! zero-padded length. [`FieldSpec`] is the parsed form of one code.
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Errors produced when parsing a 3-character field format code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldSpecError {
    /// The code is not exactly three ASCII characters.
    #[error("field format code must be 3 ASCII characters, got {code:?}")]
    Malformed {
        /// The rejected code.
        code: String,
    },

    /// The leading letter is not one of `A B C F L U W`.
    #[error("unknown character class {letter:?} in field format code")]
    UnknownClass {
        /// The unrecognised class letter.
        letter: char,
    },

    /// The two trailing characters are not a positive decimal length.
    #[error("invalid field length {digits:?} in field format code")]
    InvalidLength {
        /// The two characters that should have been the length.
        digits: String,
    },
}

/// The set of characters a BBAN field may contain.
///
/// Membership is ASCII only: non-ASCII letters and digits never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// `A`: digits and letters of either case.
    AlphaNumeric,
    /// `B`: digits and uppercase letters.
    DigitsAndUpper,
    /// `C`: letters of either case.
    Letters,
    /// `F`: digits.
    Digits,
    /// `L`: lowercase letters.
    LowercaseLetters,
    /// `U`: uppercase letters.
    UppercaseLetters,
    /// `W`: digits and lowercase letters.
    DigitsAndLower,
}

impl CharacterClass {
    /// All classes, in code-letter order.
    pub const ALL: [Self; 7] = [
        Self::AlphaNumeric,
        Self::DigitsAndUpper,
        Self::Letters,
        Self::Digits,
        Self::LowercaseLetters,
        Self::UppercaseLetters,
        Self::DigitsAndLower,
    ];

    /// Looks up the class for a format code letter.
    pub fn from_code(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Self::AlphaNumeric),
            'B' => Some(Self::DigitsAndUpper),
            'C' => Some(Self::Letters),
            'F' => Some(Self::Digits),
            'L' => Some(Self::LowercaseLetters),
            'U' => Some(Self::UppercaseLetters),
            'W' => Some(Self::DigitsAndLower),
            _ => None,
        }
    }

    /// The format code letter for this class.
    pub fn code(self) -> char {
        match self {
            Self::AlphaNumeric => 'A',
            Self::DigitsAndUpper => 'B',
            Self::Letters => 'C',
            Self::Digits => 'F',
            Self::LowercaseLetters => 'L',
            Self::UppercaseLetters => 'U',
            Self::DigitsAndLower => 'W',
        }
    }

    /// Returns `true` if `byte` belongs to this class.
    pub fn allows(self, byte: u8) -> bool {
        match self {
            Self::AlphaNumeric => byte.is_ascii_alphanumeric(),
            Self::DigitsAndUpper => byte.is_ascii_digit() || byte.is_ascii_uppercase(),
            Self::Letters => byte.is_ascii_alphabetic(),
            Self::Digits => byte.is_ascii_digit(),
            Self::LowercaseLetters => byte.is_ascii_lowercase(),
            Self::UppercaseLetters => byte.is_ascii_uppercase(),
            Self::DigitsAndLower => byte.is_ascii_digit() || byte.is_ascii_lowercase(),
        }
    }
}

/// One BBAN segment: a character class and an exact width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Characters permitted in the segment.
    pub class: CharacterClass,
    /// Exact number of characters in the segment.
    pub length: usize,
}

impl FieldSpec {
    /// Returns `true` if `input` has exactly `self.length` characters, all of
    /// them in `self.class`. The empty string never matches.
    pub fn matches(&self, input: &str) -> bool {
        !input.is_empty()
            && input.len() == self.length
            && input.bytes().all(|b| self.class.allows(b))
    }

    /// Parses a concatenation of 3-character codes, e.g. `"U04F10"`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldSpecError::Malformed`] if the length of `structure` is
    /// not a multiple of three, or the first error of any individual code.
    pub fn parse_structure(structure: &str) -> Result<Vec<Self>, FieldSpecError> {
        if !structure.is_ascii() || structure.len() % 3 != 0 {
            return Err(FieldSpecError::Malformed {
                code: structure.to_owned(),
            });
        }
        (0..structure.len())
            .step_by(3)
            .map(|i| {
                structure
                    .get(i..i + 3)
                    .ok_or_else(|| FieldSpecError::Malformed {
                        code: structure.to_owned(),
                    })?
                    .parse()
            })
            .collect()
    }
}

impl FromStr for FieldSpec {
    type Err = FieldSpecError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !code.is_ascii() {
            return Err(FieldSpecError::Malformed {
                code: code.to_owned(),
            });
        }

        let letter = char::from(bytes[0]);
        let class =
            CharacterClass::from_code(letter).ok_or(FieldSpecError::UnknownClass { letter })?;

        let digits = &code[1..];
        let length = if digits.bytes().all(|b| b.is_ascii_digit()) {
            digits.parse::<usize>().ok().filter(|&n| n > 0)
        } else {
            None
        };
        let Some(length) = length else {
            return Err(FieldSpecError::InvalidLength {
                digits: digits.to_owned(),
            });
        };

        Ok(Self { class, length })
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.class.code(), self.length)
    }
}

impl Serialize for FieldSpec {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Checks `input` against a single 3-character format code such as `F10`.
///
/// Returns `false` if either argument is empty, the code is malformed or
/// names an unknown class, the declared length differs from `input.len()`,
/// or any character falls outside the class.
///
/// # Examples
///
/// ```
/// use iban_core::format::matches_format;
///
/// assert!(matches_format("1234567890", "F10"));
/// assert!(!matches_format("123", "F05"));
/// assert!(!matches_format("0123456789", "X10"));
/// ```
pub fn matches_format(input: &str, format_code: &str) -> bool {
    if input.is_empty() || format_code.is_empty() {
        return false;
    }
    format_code
        .parse::<FieldSpec>()
        .is_ok_and(|spec| spec.matches(input))
}
