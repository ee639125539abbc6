//! Spreadsheet-style cell addressing.
//!
//! Columns use bijective base-26 letters: 0 → `A`, 25 → `Z`, 26 → `AA`,
//! 701 → `ZZ`, 702 → `AAA`. Rows are 1-based in rendered addresses.

/// Converts a 0-based column index into its letter address.
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = index;
    loop {
        letters.push(b'A' + (remaining % 26) as u8);
        if remaining < 26 {
            break;
        }
        remaining = remaining / 26 - 1;
    }
    letters.iter().rev().map(|&byte| char::from(byte)).collect()
}

/// Signed entry point for callers holding arithmetic results.
///
/// # Panics
/// Panics when `index` is negative.
pub fn column_letters_checked(index: i64) -> String {
    assert!(index >= 0, "column index must be non-negative, got {index}");
    column_letters(index as usize)
}

/// Converts a letter address back into a 0-based column index.
///
/// Returns `None` for empty input or anything other than ASCII letters.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut value: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }
    Some(value - 1)
}

/// Formats a 0-based `(row, col)` pair as an `A1` style cell name.
pub fn cell_address(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

/// Formats an inclusive cell range such as `A1:D1`.
pub fn range_address(first: (usize, usize), last: (usize, usize)) -> String {
    format!(
        "{}:{}",
        cell_address(first.0, first.1),
        cell_address(last.0, last.1)
    )
}
