//! Column type normalization.
//!
//! Normalization coerces the untyped columns produced by [`super::csv`] to
//! their declared types, one column at a time. The source datasets are
//! community-maintained and have known irregular cells, so a column that
//! fails to coerce is reported and left in its prior representation; the
//! load as a whole never fails on a bad cell.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::{DataType, Table, Value};

/// A non-fatal, per-column coercion failure.
///
/// `row` is 1-based and counts the header, matching what a user sees in the
/// CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionFailure {
    /// Column that was left uncoerced.
    pub column: String,
    /// 1-based file row of the offending cell.
    pub row: usize,
    /// Raw cell content.
    pub raw: String,
    /// Parse error message.
    pub message: String,
}

/// Coerce each listed column of `table` to its target type.
///
/// A column in which any cell fails to parse is left unchanged and reported
/// through `report` (first offending cell); all other columns still proceed.
/// Null cells always pass. `Utf8` targets and columns missing from the table
/// are skipped.
pub fn normalize_columns<F>(table: &mut Table, column_types: &[(&str, DataType)], mut report: F)
where
    F: FnMut(&CoercionFailure),
{
    for (name, target) in column_types {
        if *target == DataType::Utf8 {
            continue;
        }
        let Some(idx) = table.schema.index_of(name) else {
            continue;
        };
        if table.schema.fields[idx].data_type == *target {
            continue;
        }

        match coerce_column(&table.rows, name, idx, *target) {
            Ok(cells) => {
                for (row, cell) in table.rows.iter_mut().zip(cells) {
                    row[idx] = cell;
                }
                table.schema.fields[idx].data_type = *target;
            }
            Err(failure) => report(&failure),
        }
    }
}

fn coerce_column(
    rows: &[Vec<Value>],
    column: &str,
    idx: usize,
    target: DataType,
) -> Result<Vec<Value>, CoercionFailure> {
    let mut out = Vec::with_capacity(rows.len());
    for (row_idx0, row) in rows.iter().enumerate() {
        let cell = match &row[idx] {
            Value::Utf8(raw) => coerce_cell(raw, target).map_err(|message| CoercionFailure {
                column: column.to_owned(),
                // Report 1-based row number; +1 again because header is row 1.
                row: row_idx0 + 2,
                raw: raw.clone(),
                message,
            })?,
            other => other.clone(),
        };
        out.push(cell);
    }
    Ok(out)
}

fn coerce_cell(raw: &str, target: DataType) -> Result<Value, String> {
    match target {
        DataType::Utf8 => Ok(Value::Utf8(raw.to_owned())),
        DataType::Int64 => raw
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| e.to_string()),
        DataType::Float64 => raw
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| e.to_string()),
        DataType::Bool => parse_bool(raw).map(Value::Bool),
        DataType::Timestamp => parse_timestamp(raw).map(Value::Timestamp),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return Ok(NaiveDate::default().and_time(time));
    }
    Err("expected timestamp (YYYY-MM-DD HH:MM:SS, date, or time)".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{normalize_columns, CoercionFailure};
    use crate::types::{DataType, Field, Schema, Table, Value};

    fn utf8_table(columns: &[(&str, &[&str])]) -> Table {
        let schema = Schema::new(
            columns
                .iter()
                .map(|(name, _)| Field::new(*name, DataType::Utf8))
                .collect(),
        );
        let n = columns.first().map(|(_, cells)| cells.len()).unwrap_or(0);
        let rows = (0..n)
            .map(|i| {
                columns
                    .iter()
                    .map(|(_, cells)| match cells[i] {
                        "" => Value::Null,
                        s => Value::Utf8(s.to_string()),
                    })
                    .collect()
            })
            .collect();
        Table::new(schema, rows)
    }

    #[test]
    fn normalize_coerces_types_and_keeps_nulls() {
        let mut t = utf8_table(&[
            ("id", &["1", "2"]),
            ("points", &["25.0", ""]),
            ("wet", &["True", "False"]),
            ("date", &["2021-03-28", "15:00:00"]),
        ]);

        let mut failures = Vec::new();
        normalize_columns(
            &mut t,
            &[
                ("id", DataType::Int64),
                ("points", DataType::Float64),
                ("wet", DataType::Bool),
                ("date", DataType::Timestamp),
            ],
            |f| failures.push(f.clone()),
        );

        assert!(failures.is_empty());
        assert_eq!(t.rows[0][0], Value::Int64(1));
        assert_eq!(t.rows[1][1], Value::Null);
        assert_eq!(t.rows[0][2], Value::Bool(true));
        assert_eq!(
            t.rows[0][3],
            Value::Timestamp(
                NaiveDate::from_ymd_opt(2021, 3, 28)
                    .unwrap()
                    .and_time(NaiveTime::MIN)
            )
        );
        assert_eq!(
            t.rows[1][3],
            Value::Timestamp(
                NaiveDate::default().and_time(NaiveTime::from_hms_opt(15, 0, 0).unwrap())
            )
        );
        assert_eq!(t.schema.fields[0].data_type, DataType::Int64);
    }

    #[test]
    fn failed_column_is_left_unchanged_and_reported() {
        let mut t = utf8_table(&[("id", &["1", "2"]), ("speed", &["212.7", "212,74"])]);

        let mut failures: Vec<CoercionFailure> = Vec::new();
        normalize_columns(
            &mut t,
            &[("id", DataType::Int64), ("speed", DataType::Float64)],
            |f| failures.push(f.clone()),
        );

        // `id` still coerces; `speed` stays Utf8 with its raw cells.
        assert_eq!(t.schema.fields[0].data_type, DataType::Int64);
        assert_eq!(t.schema.fields[1].data_type, DataType::Utf8);
        assert_eq!(t.rows[1][1], Value::Utf8("212,74".to_string()));

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].column, "speed");
        assert_eq!(failures[0].row, 3);
        assert_eq!(failures[0].raw, "212,74");
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut t = utf8_table(&[("id", &["1", "2"])]);
        normalize_columns(&mut t, &[("id", DataType::Int64)], |_| {});
        let snapshot = t.clone();
        normalize_columns(&mut t, &[("id", DataType::Int64)], |_| {
            panic!("no failure expected")
        });
        assert_eq!(t, snapshot);
    }
}
