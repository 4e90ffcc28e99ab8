//! Group-by aggregation.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::DashboardResult;
use crate::types::{DataSet, Field, Schema, Value};

use super::reduce::{Accumulator, Reducer};

/// One output column of [`aggregate`]: `reducer` applied to `column`, named `alias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Measure {
    pub column: String,
    pub reducer: Reducer,
    pub alias: String,
}

impl Measure {
    /// Measure whose output column keeps the source column name.
    pub fn new(column: impl Into<String>, reducer: Reducer) -> Self {
        let column = column.into();
        Self {
            alias: column.clone(),
            column,
            reducer,
        }
    }

    pub fn sum(column: impl Into<String>) -> Self {
        Self::new(column, Reducer::Sum)
    }

    pub fn mean(column: impl Into<String>) -> Self {
        Self::new(column, Reducer::Mean)
    }

    pub fn count_distinct(column: impl Into<String>) -> Self {
        Self::new(column, Reducer::CountDistinct)
    }

    pub fn count(column: impl Into<String>) -> Self {
        Self::new(column, Reducer::Count)
    }

    /// Rename the output column.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }
}

/// Group `dataset` by `keys` and reduce each group with `measures`.
///
/// The output has one column per key (same type as the input) followed by one column per
/// measure. Groups appear in the order their first row appears in the input; callers that need
/// a particular order sort explicitly. A null key cell forms its own group.
///
/// With no keys the whole table is a single group, so the output has exactly one row even when
/// the input is empty.
pub fn aggregate(dataset: &DataSet, keys: &[&str], measures: &[Measure]) -> DashboardResult<DataSet> {
    let key_idx = keys
        .iter()
        .map(|k| dataset.schema.require(k))
        .collect::<DashboardResult<Vec<_>>>()?;
    let measure_idx = measures
        .iter()
        .map(|m| dataset.schema.require(&m.column))
        .collect::<DashboardResult<Vec<_>>>()?;

    let mut fields: Vec<Field> = key_idx
        .iter()
        .map(|&i| dataset.schema.fields[i].clone())
        .collect();
    fields.extend(measures.iter().zip(&measure_idx).map(|(m, &i)| {
        Field::new(
            m.alias.clone(),
            m.reducer.output_type(dataset.schema.fields[i].data_type),
        )
    }));

    let fresh = || -> Vec<Accumulator> {
        measures
            .iter()
            .zip(&measure_idx)
            .map(|(m, &i)| Accumulator::new(m.reducer, dataset.schema.fields[i].data_type))
            .collect()
    };

    let mut slots: HashMap<Vec<Value>, usize> = HashMap::new();
    let mut groups: Vec<(Vec<Value>, Vec<Accumulator>)> = Vec::new();
    if keys.is_empty() {
        slots.insert(Vec::new(), 0);
        groups.push((Vec::new(), fresh()));
    }

    for row in &dataset.rows {
        let key: Vec<Value> = key_idx.iter().map(|&i| row[i].clone()).collect();
        let slot = match slots.get(&key) {
            Some(&slot) => slot,
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push((key, fresh()));
                groups.len() - 1
            }
        };
        for (acc, &i) in groups[slot].1.iter_mut().zip(&measure_idx) {
            acc.push(&row[i]);
        }
    }

    let rows = groups
        .into_iter()
        .map(|(mut key, accs)| {
            key.extend(accs.into_iter().map(Accumulator::finish));
            key
        })
        .collect();

    Ok(DataSet::new(Schema::new(fields), rows))
}

#[cfg(test)]
mod tests {
    use super::{aggregate, Measure};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn orders() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("region", DataType::Utf8),
            Field::new("segment", DataType::Utf8),
            Field::new("order", DataType::Utf8),
            Field::new("sales", DataType::Float64),
        ]);
        let row = |r: Value, s: &str, o: &str, v: f64| {
            vec![r, Value::text(s), Value::text(o), Value::Float64(v)]
        };
        DataSet::new(
            schema,
            vec![
                row(Value::text("West"), "Consumer", "1", 10.0),
                row(Value::text("East"), "Consumer", "2", 5.0),
                row(Value::text("West"), "Corporate", "1", 2.5),
                row(Value::Null, "Consumer", "3", 1.0),
                row(Value::text("West"), "Consumer", "4", 4.0),
            ],
        )
    }

    #[test]
    fn groups_in_first_appearance_order_with_null_bucket() {
        let out = aggregate(
            &orders(),
            &["region"],
            &[Measure::sum("sales"), Measure::count_distinct("order").alias("orders")],
        )
        .unwrap();

        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["region", "sales", "orders"]
        );
        assert_eq!(out.schema.fields[2].data_type, DataType::Int64);
        assert_eq!(
            out.rows,
            vec![
                vec![Value::text("West"), Value::Float64(16.5), Value::Int64(2)],
                vec![Value::text("East"), Value::Float64(5.0), Value::Int64(1)],
                vec![Value::Null, Value::Float64(1.0), Value::Int64(1)],
            ]
        );
    }

    #[test]
    fn two_level_keys() {
        let out = aggregate(&orders(), &["region", "segment"], &[Measure::sum("sales")]).unwrap();
        assert_eq!(out.row_count(), 4);
        assert_eq!(
            out.rows[0],
            vec![Value::text("West"), Value::text("Consumer"), Value::Float64(14.0)]
        );
    }

    #[test]
    fn no_keys_yields_single_row_even_when_empty() {
        let empty = orders().filter_rows(|_| false);
        let out = aggregate(
            &empty,
            &[],
            &[Measure::sum("sales"), Measure::mean("sales"), Measure::count("order")],
        )
        .unwrap();
        assert_eq!(
            out.rows,
            vec![vec![Value::Float64(0.0), Value::Null, Value::Int64(0)]]
        );
    }

    #[test]
    fn grouped_empty_input_has_no_rows() {
        let empty = orders().filter_rows(|_| false);
        let out = aggregate(&empty, &["region"], &[Measure::sum("sales")]).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.schema.fields.len(), 2);
    }

    #[test]
    fn unknown_key_is_an_error() {
        assert!(aggregate(&orders(), &["nope"], &[Measure::sum("sales")]).is_err());
    }
}
