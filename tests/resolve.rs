use std::collections::HashMap;

use csv_sqlgen::{
    dictionary::{COMMON_SECTION, ColumnDef, ColumnDictionary, Section},
    infer::{self, ColumnType, SamplingStrategy},
    resolve::{self, Source},
    sql,
    tabular::RawTable,
};
use proptest::prelude::*;

fn dictionary_for(labels: &[String], common_every: usize) -> ColumnDictionary {
    let mut table = Section::new();
    let mut common = Section::new();
    for (idx, label) in labels.iter().enumerate() {
        let def = ColumnDef::new(format!("col_{idx}"), None);
        if common_every > 0 && idx % common_every == 0 {
            common.insert(label.clone(), def);
        } else {
            table.insert(label.clone(), def);
        }
    }
    ColumnDictionary::from_sections(HashMap::from([
        ("t".to_string(), table),
        (COMMON_SECTION.to_string(), common),
    ]))
}

proptest! {
    #[test]
    fn resolved_order_follows_header_order(
        labels in prop::collection::hash_set("[a-z]{1,8}", 1..20),
        common_every in 0usize..4,
    ) {
        let header = labels.into_iter().collect::<Vec<_>>();
        let dictionary = dictionary_for(&header, common_every);
        let resolution = resolve::resolve_columns(&header, &dictionary, "t");
        prop_assert!(resolution.is_complete());
        let resolved_labels = resolution
            .columns
            .iter()
            .map(|c| c.label.clone())
            .collect::<Vec<_>>();
        prop_assert_eq!(&resolved_labels, &header);

        let table = RawTable { header: header.clone(), rows: Vec::new() };
        let typed = infer::apply_inference(&resolution.columns, &table, SamplingStrategy::FirstRow);
        let create = sql::create_table_sql("t", &typed);
        let column_lines = create.lines().filter(|line| line.starts_with("  \"")).count();
        prop_assert_eq!(column_lines, header.len() + 1);
    }
}

#[test]
fn common_only_label_resolves_like_table_label() {
    let mut common = Section::new();
    common.insert("date".to_string(), ColumnDef::new("event_date", Some(ColumnType::Date)));
    let mut table = Section::new();
    table.insert("date".to_string(), ColumnDef::new("event_date", Some(ColumnType::Date)));

    let header = vec!["date".to_string()];
    let via_common = resolve::resolve_columns(
        &header,
        &ColumnDictionary::from_sections([(COMMON_SECTION.to_string(), common)]),
        "t",
    );
    let via_table = resolve::resolve_columns(
        &header,
        &ColumnDictionary::from_sections([("t".to_string(), table)]),
        "t",
    );
    assert_eq!(via_common.columns[0].physical_name, via_table.columns[0].physical_name);
    assert_eq!(via_common.columns[0].type_hint, via_table.columns[0].type_hint);
    assert_eq!(via_common.columns[0].source, Source::Common);
    assert_eq!(via_table.columns[0].source, Source::Table);
}
