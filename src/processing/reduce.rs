//! Column reductions for [`crate::types::DataSet`].

use std::collections::HashSet;

use serde::Serialize;

use crate::error::DashboardResult;
use crate::types::{DataSet, DataType, Value};

/// Built-in reductions over a single column.
///
/// Every reducer ignores nulls and is defined on an empty input:
///
/// - [`Reducer::Sum`] of nothing is zero (typed like the column: `Int64` for integer and boolean
///   columns, `Float64` otherwise). Booleans sum as 0/1, so summing `is_late` counts late rows.
/// - [`Reducer::Mean`] of nothing is [`Value::Null`].
/// - [`Reducer::Count`] counts non-null values; [`Reducer::CountDistinct`] counts distinct
///   non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    Sum,
    Mean,
    CountDistinct,
    Count,
}

impl Reducer {
    /// Output type of this reducer applied to a column of type `input`.
    pub fn output_type(self, input: DataType) -> DataType {
        match (self, input) {
            (Reducer::Sum, DataType::Int64 | DataType::Bool) => DataType::Int64,
            (Reducer::Sum, _) | (Reducer::Mean, _) => DataType::Float64,
            (Reducer::Count | Reducer::CountDistinct, _) => DataType::Int64,
        }
    }
}

/// Running state of one reducer over one column.
#[derive(Debug, Clone)]
pub(crate) struct Accumulator {
    reducer: Reducer,
    output: DataType,
    int_sum: i64,
    float_sum: f64,
    count: usize,
    distinct: HashSet<Value>,
}

impl Accumulator {
    pub(crate) fn new(reducer: Reducer, input: DataType) -> Self {
        Self {
            reducer,
            output: reducer.output_type(input),
            int_sum: 0,
            float_sum: 0.0,
            count: 0,
            distinct: HashSet::new(),
        }
    }

    pub(crate) fn push(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        match self.reducer {
            Reducer::Sum | Reducer::Mean => {
                let Some(v) = value.as_f64() else { return };
                if let Value::Int64(i) = value {
                    self.int_sum = self.int_sum.saturating_add(*i);
                } else if let Value::Bool(b) = value {
                    self.int_sum += i64::from(*b);
                }
                self.float_sum += v;
                self.count += 1;
            }
            Reducer::Count => self.count += 1,
            Reducer::CountDistinct => {
                self.distinct.insert(value.clone());
            }
        }
    }

    pub(crate) fn finish(self) -> Value {
        match self.reducer {
            Reducer::Sum if self.output == DataType::Int64 => Value::Int64(self.int_sum),
            Reducer::Sum => Value::Float64(self.float_sum),
            Reducer::Mean if self.count == 0 => Value::Null,
            Reducer::Mean => Value::Float64(self.float_sum / self.count as f64),
            Reducer::Count => Value::Int64(self.count as i64),
            Reducer::CountDistinct => Value::Int64(self.distinct.len() as i64),
        }
    }
}

/// Reduce one column of the whole table.
///
/// Fails only when `column` is not in the schema.
pub fn reduce(dataset: &DataSet, column: &str, reducer: Reducer) -> DashboardResult<Value> {
    let idx = dataset.schema.require(column)?;
    let input = dataset.schema.fields[idx].data_type;
    let acc = dataset.reduce_rows(Accumulator::new(reducer, input), |mut acc, row| {
        acc.push(&row[idx]);
        acc
    });
    Ok(acc.finish())
}
