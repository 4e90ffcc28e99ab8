//! Top-N / bottom-N selection over aggregated tables.
//!
//! Ties keep their current relative order (the sort is stable). Applied to the output of
//! [`super::aggregate`], that is the order in which each group first appears in the filtered
//! table. Null measures rank last in both directions.

use crate::error::DashboardResult;
use crate::types::{DataSet, SortOrder, Value};

/// The `n` rows with the largest `column`, largest first.
pub fn top_n(dataset: &DataSet, column: &str, n: usize) -> DashboardResult<DataSet> {
    Ok(dataset.sort_by(column, SortOrder::Descending)?.head(n))
}

/// The `n` rows with the smallest `column`, smallest first.
pub fn bottom_n(dataset: &DataSet, column: &str, n: usize) -> DashboardResult<DataSet> {
    Ok(dataset.sort_by(column, SortOrder::Ascending)?.head(n))
}

/// The single top row by `column`, if any.
pub fn top_one(dataset: &DataSet, column: &str) -> DashboardResult<Option<Vec<Value>>> {
    Ok(top_n(dataset, column, 1)?.rows.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    fn products() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("product", DataType::Utf8),
            Field::new("sales", DataType::Float64),
        ]);
        let rows = [("p1", Some(5.0)), ("p2", Some(9.0)), ("p3", None), ("p4", Some(9.0)), ("p5", Some(1.0))]
            .into_iter()
            .map(|(p, s)| vec![Value::text(p), s.map_or(Value::Null, Value::Float64)])
            .collect();
        DataSet::new(schema, rows)
    }

    fn names(ds: &DataSet) -> Vec<String> {
        ds.column("product")
            .unwrap()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect()
    }

    #[test]
    fn top_n_breaks_ties_by_input_order() {
        assert_eq!(names(&top_n(&products(), "sales", 2).unwrap()), vec!["p2", "p4"]);
        assert_eq!(
            top_one(&products(), "sales").unwrap().unwrap()[0],
            Value::text("p2")
        );
    }

    #[test]
    fn bottom_n_puts_nulls_last() {
        assert_eq!(
            names(&bottom_n(&products(), "sales", 10).unwrap()),
            vec!["p5", "p1", "p2", "p4", "p3"]
        );
    }

    #[test]
    fn top_one_of_empty_is_none() {
        let empty = products().filter_rows(|_| false);
        assert_eq!(top_one(&empty, "sales").unwrap(), None);
    }
}
