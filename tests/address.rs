use account_normalizer::ToolError;
use account_normalizer::model::{CellReference, column_index_to_name, column_name_to_index};

#[test]
fn column_names_match_spreadsheet_letters() {
    assert_eq!(column_index_to_name(0), "A");
    assert_eq!(column_index_to_name(25), "Z");
    assert_eq!(column_index_to_name(26), "AA");
    assert_eq!(column_index_to_name(27), "AB");
    assert_eq!(column_index_to_name(701), "ZZ");
    assert_eq!(column_index_to_name(702), "AAA");
    assert_eq!(column_index_to_name(16_383), "XFD");
}

#[test]
fn column_names_parse_back_to_indices() {
    assert_eq!(column_name_to_index("A").unwrap(), 0);
    assert_eq!(column_name_to_index("Z").unwrap(), 25);
    assert_eq!(column_name_to_index("AA").unwrap(), 26);
    assert_eq!(column_name_to_index("zz").unwrap(), 701);
    assert_eq!(column_name_to_index("XFD").unwrap(), 16_383);
}

#[test]
fn column_names_round_trip() {
    for index in 0..1000 {
        let name = column_index_to_name(index);
        let parsed = column_name_to_index(&name).expect("generated name parses");
        assert_eq!(parsed, index);
        assert_eq!(column_index_to_name(parsed), name);
    }
}

#[test]
fn invalid_column_names_are_rejected() {
    for name in ["", "A1", "-", "Ä"] {
        let error = column_name_to_index(name).expect_err("invalid name");
        assert!(matches!(error, ToolError::InvalidCellReference(_)));
    }
}

#[test]
fn cell_references_use_one_based_rows() {
    assert_eq!(CellReference::new(0, 0).to_string(), "A1");
    assert_eq!(CellReference::new(3, 2).to_string(), "C4");
    assert_eq!(CellReference::new(9, 27).to_string(), "AB10");

    let parsed: CellReference = "AB10".parse().expect("reference parses");
    assert_eq!(parsed, CellReference::new(9, 27));
}

#[test]
fn malformed_cell_references_are_rejected() {
    for reference in ["", "A", "10", "A0", "1A", "A1B"] {
        assert!(
            reference.parse::<CellReference>().is_err(),
            "{reference} should not parse"
        );
    }
}
