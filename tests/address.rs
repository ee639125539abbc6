use std::collections::HashSet;

use assembly_bom::address::{
    cell_address, column_index, column_letters, column_letters_checked, range_address,
};

#[test]
fn column_letters_follow_spreadsheet_sequence() {
    assert_eq!(column_letters(0), "A");
    assert_eq!(column_letters(1), "B");
    assert_eq!(column_letters(25), "Z");
    assert_eq!(column_letters(26), "AA");
    assert_eq!(column_letters(27), "AB");
    assert_eq!(column_letters(51), "AZ");
    assert_eq!(column_letters(52), "BA");
    assert_eq!(column_letters(701), "ZZ");
    assert_eq!(column_letters(702), "AAA");
    assert_eq!(column_letters(18_277), "ZZZ");
}

#[test]
fn column_letters_are_injective_and_invertible() {
    let mut seen = HashSet::new();
    for index in 0..20_000 {
        let letters = column_letters(index);
        assert!(seen.insert(letters.clone()), "duplicate address {letters}");
        assert_eq!(column_index(&letters), Some(index));
    }
}

#[test]
fn column_index_rejects_non_letters() {
    assert_eq!(column_index(""), None);
    assert_eq!(column_index("A1"), None);
    assert_eq!(column_index("aa"), Some(26));
}

#[test]
fn cell_and_range_addresses_are_one_based_rows() {
    assert_eq!(cell_address(0, 0), "A1");
    assert_eq!(cell_address(1, 27), "AB2");
    assert_eq!(range_address((0, 0), (0, 3)), "A1:D1");
}

#[test]
#[should_panic(expected = "column index must be non-negative")]
fn negative_column_index_is_a_contract_violation() {
    column_letters_checked(-1);
}

#[test]
fn checked_column_letters_accept_non_negative_input() {
    assert_eq!(column_letters_checked(26), "AA");
}

#[test]
fn column_letters_extend_past_three_letters() {
    assert_eq!(column_letters(18_278), "AAAA");
    assert_eq!(column_letters(475_253), "ZZZZ");
    assert_eq!(column_index("ZZZZ"), Some(475_253));
}
