use account_normalizer::normalize::{
    ColumnFormatting, FormatPolicy, format_cell_value, split_managers,
};
use proptest::prelude::*;

#[test]
fn leading_columns_are_upper_cased_and_trimmed() {
    assert_eq!(format_cell_value(0, "  acme corp "), "ACME CORP");
    assert_eq!(format_cell_value(8, "x "), "X");
}

#[test]
fn column_one_and_trailing_columns_are_untouched() {
    assert_eq!(format_cell_value(1, " Mixed "), " Mixed ");
    assert_eq!(format_cell_value(9, " Mixed "), " Mixed ");
    assert_eq!(format_cell_value(40, "lower"), "lower");
}

#[test]
fn default_formatting_matches_positional_rule() {
    let formatting = ColumnFormatting::default();
    for column in 0..20 {
        for value in ["", " a ", "Straße", "already UP"] {
            assert_eq!(
                formatting.format(column, None, value),
                format_cell_value(column, value),
                "column {column}, value {value:?}"
            );
        }
    }
}

#[test]
fn header_policy_wins_over_column_policy() {
    let formatting = ColumnFormatting::default().with_header("note", FormatPolicy::Verbatim);

    assert_eq!(formatting.policy_for(3, Some("note")), FormatPolicy::Verbatim);
    assert_eq!(formatting.policy_for(3, Some("other")), FormatPolicy::UpperTrim);
    assert_eq!(formatting.policy_for(12, None), FormatPolicy::Verbatim);
}

#[test]
fn formatting_loads_from_json() {
    let formatting: ColumnFormatting = serde_json::from_str(
        r#"{
            "default": "upper_trim",
            "columns": { "1": "verbatim" },
            "headers": { "comment": "verbatim" }
        }"#,
    )
    .expect("formatting parsed");

    assert_eq!(formatting.format(1, Some("name"), " a "), " a ");
    assert_eq!(formatting.format(20, Some("name"), " a "), "A");
    assert_eq!(formatting.format(4, Some("comment"), " a "), " a ");
}

#[test]
fn partial_formatting_document_keeps_defaults() {
    let formatting: ColumnFormatting =
        serde_json::from_str(r#"{ "headers": { "city": "verbatim" } }"#).expect("parsed");

    assert_eq!(formatting.format(0, Some("id"), " a "), "A");
    assert_eq!(formatting.format(2, Some("city"), " a "), " a ");
}

#[test]
fn manager_lists_drop_empty_segments_only() {
    let managers: Vec<&str> = split_managers("|ANN||BOB | CARL|").collect();
    assert_eq!(managers, vec!["ANN", "BOB ", " CARL"]);
    assert_eq!(split_managers("").count(), 0);
    assert_eq!(split_managers("|||").count(), 0);
}

proptest! {
    #[test]
    fn formatting_is_idempotent(column in 0usize..32, value in ".*") {
        let once = format_cell_value(column, &value);
        let twice = format_cell_value(column, &once);
        prop_assert_eq!(once, twice);
    }
}
