//! Character codec
//!
//! Maps small integers to their display form. The domain is split into
//! four contiguous bands:
//!
//! | Values  | Characters                      |
//! |---------|---------------------------------|
//! | 1       | space                           |
//! | 2–27    | `a`–`z`                         |
//! | 28–53   | `A`–`Z`                         |
//! | 54–63   | `0`–`9`, 64 is the literal `10` |
//! | 65–74   | `. , ? ! ( ) " - + *`           |
//!
//! Anything outside 1–74 renders as its decimal digits.

/// Lowest value with a character mapping
pub const MIN_CODE: i64 = 1;

/// Highest value with a character mapping
pub const MAX_CODE: i64 = 74;

const PUNCTUATION: [char; 10] = ['.', ',', '?', '!', '(', ')', '"', '-', '+', '*'];

/// Encode a value into its display form
pub fn encode(value: i64) -> String {
    match value {
        1 => " ".to_string(),
        2..=27 => offset_char(b'a', value - 2),
        28..=53 => offset_char(b'A', value - 28),
        54..=63 => offset_char(b'0', value - 54),
        64 => "10".to_string(),
        65..=74 => PUNCTUATION[(value - 65) as usize].to_string(),
        _ => value.to_string(),
    }
}

/// Whether a value falls inside one of the character bands
pub fn in_range(value: i64) -> bool {
    (MIN_CODE..=MAX_CODE).contains(&value)
}

fn offset_char(base: u8, offset: i64) -> String {
    char::from(base + offset as u8).to_string()
}
