//! Volume rollups over fetched log records.
//!
//! Every function here is a pure function of its input records. Groups are
//! keyed by month name only, so records from the same month of different
//! years land in the same bucket. Output is ordered by calendar month, then
//! schema, then table.

use api_types::{ConnectorSummary, MonthlyVolumeRow, SchemaVolumeRow, TableVolumeRow};
use std::collections::{BTreeMap, BTreeSet};
use warehouse::{LogRecord, month_index};

/// Drop records written into the log schema itself. Applied to every
/// fetched volume set before it is cached.
pub fn retain_reportable(records: Vec<LogRecord>, log_schema: &str) -> Vec<LogRecord> {
    records.into_iter().filter(|r| r.schema_name != log_schema).collect()
}

fn for_connector<'a>(
    records: &'a [LogRecord],
    connector_id: &'a str,
) -> impl Iterator<Item = &'a LogRecord> + 'a {
    records.iter().filter(move |r| r.connector_id == connector_id)
}

fn sum_by<'a, K, F>(records: impl Iterator<Item = &'a LogRecord>, key: F) -> BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&'a LogRecord) -> K,
{
    let mut groups = BTreeMap::new();
    for r in records {
        let total = groups.entry(key(r)).or_insert(0u64);
        *total = total.saturating_add(r.row_volume);
    }
    groups
}

fn monthly_rows<'a>(records: impl Iterator<Item = &'a LogRecord>) -> Vec<MonthlyVolumeRow> {
    sum_by(records, |r| (month_index(r.month), r.month))
        .into_iter()
        .map(|((_, month), row_volume)| MonthlyVolumeRow { month: month.to_owned(), row_volume })
        .collect()
}

/// Whether any record belongs to `connector_id`.
pub fn has_connector(records: &[LogRecord], connector_id: &str) -> bool {
    for_connector(records, connector_id).next().is_some()
}

/// Row volume per month across all connectors.
pub fn monthly_volume(records: &[LogRecord]) -> Vec<MonthlyVolumeRow> {
    monthly_rows(records.iter())
}

/// Total row volume of one connector.
pub fn connector_volume(records: &[LogRecord], connector_id: &str) -> u64 {
    for_connector(records, connector_id)
        .fold(0u64, |total, r| total.saturating_add(r.row_volume))
}

/// Row volume of one connector per (month, schema).
pub fn schema_volume(records: &[LogRecord], connector_id: &str) -> Vec<SchemaVolumeRow> {
    sum_by(for_connector(records, connector_id), |r| {
        (month_index(r.month), r.month, r.schema_name.as_str())
    })
    .into_iter()
    .map(|((_, month, schema_name), row_volume)| SchemaVolumeRow {
        month: month.to_owned(),
        schema_name: schema_name.to_owned(),
        row_volume,
    })
    .collect()
}

/// Row volume of one connector's schema per (month, schema, table).
pub fn table_volume(
    records: &[LogRecord],
    connector_id: &str,
    schema_name: &str,
) -> Vec<TableVolumeRow> {
    let scoped = for_connector(records, connector_id).filter(|r| r.schema_name == schema_name);
    sum_by(scoped, |r| {
        (month_index(r.month), r.month, r.schema_name.as_str(), r.table_name.as_str())
    })
    .into_iter()
    .map(|((_, month, schema_name, table_name), row_volume)| TableVolumeRow {
        month: month.to_owned(),
        schema_name: schema_name.to_owned(),
        table_name: table_name.to_owned(),
        row_volume,
    })
    .collect()
}

/// Row volume of one table per month.
///
/// With `schema_name` unset every table of that name under the connector is
/// counted, whichever schema it lives in.
pub fn single_table_volume(
    records: &[LogRecord],
    connector_id: &str,
    schema_name: Option<&str>,
    table_name: &str,
) -> Vec<MonthlyVolumeRow> {
    monthly_rows(for_connector(records, connector_id).filter(|r| {
        r.table_name == table_name && schema_name.is_none_or(|s| r.schema_name == s)
    }))
}

/// Distinct connectors, ordered by ID. The first record seen for a
/// connector provides its names.
pub fn connector_summaries(records: &[LogRecord]) -> Vec<ConnectorSummary> {
    let mut seen: BTreeMap<&str, ConnectorSummary> = BTreeMap::new();
    for r in records {
        seen.entry(r.connector_id.as_str()).or_insert_with(|| ConnectorSummary {
            connector_id: r.connector_id.clone(),
            connector_type_id: r.connector_type_id.clone(),
            official_connector_name: r.official_connector_name.clone(),
            connector_name: r.connector_name.clone(),
        });
    }
    seen.into_values().collect()
}

/// Distinct schemas written by a connector, sorted.
pub fn connector_schemas(records: &[LogRecord], connector_id: &str) -> Vec<String> {
    for_connector(records, connector_id)
        .map(|r| r.schema_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Distinct tables of a connector's schema, sorted.
pub fn schema_tables(records: &[LogRecord], connector_id: &str, schema_name: &str) -> Vec<String> {
    for_connector(records, connector_id)
        .filter(|r| r.schema_name == schema_name)
        .map(|r| r.table_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use warehouse::month_name;

    fn record(connector: &str, date: (i32, u32, u32), schema: &str, table: &str, volume: u64) -> LogRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        LogRecord {
            connector_id: connector.to_owned(),
            connector_type_id: format!("{connector}_type"),
            connector_name: format!("{connector} name"),
            official_connector_name: "PostgreSQL".to_owned(),
            date,
            time_stamp: Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap()),
            schema_name: schema.to_owned(),
            table_name: table.to_owned(),
            row_volume: volume,
            month: month_name(date),
        }
    }

    fn fixture() -> Vec<LogRecord> {
        vec![
            record("alpha", (2024, 1, 3), "public", "orders", 10),
            record("alpha", (2024, 1, 9), "public", "users", 5),
            record("alpha", (2024, 2, 1), "sales", "orders", 7),
            record("alpha", (2024, 2, 2), "public", "orders", 1),
            record("beta", (2024, 2, 5), "crm", "accounts", 3),
            record("beta", (2024, 3, 5), "crm", "contacts", 20),
        ]
    }

    fn monthly(rows: &[(&str, u64)]) -> Vec<MonthlyVolumeRow> {
        rows.iter()
            .map(|(m, v)| MonthlyVolumeRow { month: (*m).to_owned(), row_volume: *v })
            .collect()
    }

    #[test]
    fn monthly_rollup_sums_by_month_name() {
        let records = vec![
            record("alpha", (2024, 1, 3), "public", "orders", 10),
            record("alpha", (2024, 1, 20), "public", "orders", 5),
            record("alpha", (2024, 2, 1), "public", "orders", 3),
        ];
        assert_eq!(monthly_volume(&records), monthly(&[("January", 15), ("February", 3)]));
    }

    #[test]
    fn monthly_rollup_orders_by_calendar() {
        let records = vec![
            record("alpha", (2024, 12, 3), "public", "orders", 1),
            record("alpha", (2024, 4, 3), "public", "orders", 2),
            record("alpha", (2024, 8, 3), "public", "orders", 3),
        ];
        let months: Vec<_> = monthly_volume(&records).into_iter().map(|r| r.month).collect();
        assert_eq!(months, vec!["April", "August", "December"]);
    }

    #[test]
    fn monthly_rollup_merges_years() {
        let records = vec![
            record("alpha", (2023, 1, 3), "public", "orders", 4),
            record("alpha", (2024, 1, 3), "public", "orders", 6),
        ];
        assert_eq!(monthly_volume(&records), monthly(&[("January", 10)]));
    }

    #[test]
    fn empty_input_yields_empty_rollups() {
        assert!(monthly_volume(&[]).is_empty());
        assert!(schema_volume(&[], "alpha").is_empty());
        assert_eq!(connector_volume(&[], "alpha"), 0);
        assert!(connector_summaries(&[]).is_empty());
    }

    #[test]
    fn connector_total_equals_schema_rollups() {
        let records = fixture();
        for connector in ["alpha", "beta", "gamma"] {
            let total = connector_volume(&records, connector);
            let by_schema: u64 =
                schema_volume(&records, connector).iter().map(|r| r.row_volume).sum();
            assert_eq!(total, by_schema, "{connector}");
        }
        assert_eq!(connector_volume(&records, "alpha"), 23);
    }

    #[test]
    fn monthly_totals_agree_across_granularities() {
        let records = fixture();
        let monthly = monthly_volume(&records);

        let mut from_tables: BTreeMap<String, u64> = BTreeMap::new();
        for summary in connector_summaries(&records) {
            for schema in connector_schemas(&records, &summary.connector_id) {
                for row in table_volume(&records, &summary.connector_id, &schema) {
                    *from_tables.entry(row.month).or_default() += row.row_volume;
                }
            }
        }

        assert_eq!(monthly.len(), from_tables.len());
        for row in monthly {
            assert_eq!(from_tables[&row.month], row.row_volume, "{}", row.month);
        }
    }

    #[test]
    fn schema_rollup_groups_month_and_schema() {
        let rows = schema_volume(&fixture(), "alpha");
        let expected = vec![
            SchemaVolumeRow {
                month: "January".to_owned(),
                schema_name: "public".to_owned(),
                row_volume: 15,
            },
            SchemaVolumeRow {
                month: "February".to_owned(),
                schema_name: "public".to_owned(),
                row_volume: 1,
            },
            SchemaVolumeRow {
                month: "February".to_owned(),
                schema_name: "sales".to_owned(),
                row_volume: 7,
            },
        ];
        assert_eq!(rows, expected);
    }

    #[test]
    fn table_rollup_is_scoped_to_schema() {
        let rows = table_volume(&fixture(), "alpha", "public");
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.schema_name == "public"));
        assert_eq!(rows.iter().map(|r| r.row_volume).sum::<u64>(), 16);
        assert_eq!(rows[0].table_name, "orders");
        assert_eq!(rows[1].table_name, "users");
    }

    #[test]
    fn single_table_rollup_optionally_scopes_schema() {
        let records = fixture();
        assert_eq!(
            single_table_volume(&records, "alpha", None, "orders"),
            monthly(&[("January", 10), ("February", 8)])
        );
        assert_eq!(
            single_table_volume(&records, "alpha", Some("public"), "orders"),
            monthly(&[("January", 10), ("February", 1)])
        );
        assert!(single_table_volume(&records, "beta", None, "orders").is_empty());
    }

    #[test]
    fn log_schema_records_are_excluded_everywhere() {
        let mut records = fixture();
        records.push(record("alpha", (2024, 1, 4), "fivetran_log", "log", 1_000));
        let records = retain_reportable(records, "fivetran_log");

        assert_eq!(connector_volume(&records, "alpha"), 23);
        assert!(!connector_schemas(&records, "alpha").contains(&"fivetran_log".to_owned()));
        assert!(schema_volume(&records, "alpha").iter().all(|r| r.schema_name != "fivetran_log"));
        assert!(table_volume(&records, "alpha", "fivetran_log").is_empty());
        assert_eq!(monthly_volume(&records)[0], MonthlyVolumeRow {
            month: "January".to_owned(),
            row_volume: 15,
        });
    }

    #[test]
    fn connector_listing_is_distinct_and_sorted() {
        let summaries = connector_summaries(&fixture());
        let ids: Vec<_> = summaries.iter().map(|s| s.connector_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
        assert_eq!(summaries[1].connector_type_id, "beta_type");
        assert!(has_connector(&fixture(), "beta"));
        assert!(!has_connector(&fixture(), "gamma"));
    }

    #[test]
    fn selection_listings() {
        let records = fixture();
        assert_eq!(connector_schemas(&records, "alpha"), vec!["public", "sales"]);
        assert_eq!(schema_tables(&records, "alpha", "public"), vec!["orders", "users"]);
        assert!(schema_tables(&records, "alpha", "crm").is_empty());
    }

    #[test]
    fn volume_sums_saturate_instead_of_overflowing() {
        let records = vec![
            record("alpha", (2024, 1, 3), "public", "orders", u64::MAX),
            record("alpha", (2024, 1, 9), "public", "orders", u64::MAX),
        ];

        assert_eq!(monthly_volume(&records), monthly(&[("January", u64::MAX)]));
        assert_eq!(connector_volume(&records, "alpha"), u64::MAX);
        assert_eq!(schema_volume(&records, "alpha")[0].row_volume, u64::MAX);
    }
}
