//! Row filtering for the enriched order table.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::DashboardResult;
use crate::schema::{ORDER_DATE, REGION, SHIP_MODE};
use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// User-selected narrowing of the enriched table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    /// Inclusive first order date.
    pub start: NaiveDate,
    /// Inclusive last order date.
    pub end: NaiveDate,
    /// Selected regions. Empty selects nothing.
    pub regions: BTreeSet<String>,
    /// Selected ship modes. Empty selects nothing.
    pub ship_modes: BTreeSet<String>,
}

impl FilterSpec {
    pub fn new<R, M>(start: NaiveDate, end: NaiveDate, regions: R, ship_modes: M) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            start,
            end,
            regions: regions.into_iter().map(Into::into).collect(),
            ship_modes: ship_modes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a row with these cell values passes the filter.
    pub fn matches(&self, order_date: &Value, region: &Value, ship_mode: &Value) -> bool {
        // Rows without an order date cannot be range-tested and are always excluded.
        let Some(date) = order_date.as_date() else {
            return false;
        };
        if date < self.start || date > self.end {
            return false;
        }
        let in_set = |set: &BTreeSet<String>, v: &Value| v.as_str().is_some_and(|s| set.contains(s));
        in_set(&self.regions, region) && in_set(&self.ship_modes, ship_mode)
    }
}

/// Choices the filter controls offer for a table, and their initial selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Observed `(min, max)` order date; `None` when no order date parsed.
    pub date_span: Option<(NaiveDate, NaiveDate)>,
    /// Sorted distinct non-null regions.
    pub regions: Vec<String>,
    /// Sorted distinct non-null ship modes.
    pub ship_modes: Vec<String>,
}

impl FilterOptions {
    /// Collect the filter choices from an enriched table.
    pub fn from_table(enriched: &DataSet) -> DashboardResult<Self> {
        let dates = enriched.column(ORDER_DATE)?.filter_map(Value::as_date);
        let date_span = dates.fold(None, |span: Option<(NaiveDate, NaiveDate)>, d| match span {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        });

        Ok(Self {
            date_span,
            regions: distinct_text(enriched, REGION)?,
            ship_modes: distinct_text(enriched, SHIP_MODE)?,
        })
    }

    /// Full date span, every region and every ship mode.
    ///
    /// Without a date span the range is inverted and matches nothing; rows without order dates
    /// are excluded by any range anyway.
    pub fn default_spec(&self) -> FilterSpec {
        let (start, end) = self.date_span.unwrap_or((NaiveDate::MAX, NaiveDate::MIN));
        FilterSpec::new(
            start,
            end,
            self.regions.iter().cloned(),
            self.ship_modes.iter().cloned(),
        )
    }
}

fn distinct_text(dataset: &DataSet, column: &str) -> DashboardResult<Vec<String>> {
    Ok(dataset
        .distinct_values(column)?
        .into_iter()
        .filter_map(|v| match v {
            Value::Utf8(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Apply `spec` to an enriched table. Row order is preserved.
pub fn apply(enriched: &DataSet, spec: &FilterSpec) -> DashboardResult<DataSet> {
    let date_idx = enriched.schema.require(ORDER_DATE)?;
    let region_idx = enriched.schema.require(REGION)?;
    let mode_idx = enriched.schema.require(SHIP_MODE)?;

    Ok(filter(enriched, |row| {
        spec.matches(&row[date_idx], &row[region_idx], &row[mode_idx])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("Order ID", DataType::Utf8),
            Field::new(ORDER_DATE, DataType::Date),
            Field::new(REGION, DataType::Utf8),
            Field::new(SHIP_MODE, DataType::Utf8),
        ]);
        let row = |id: &str, date: Option<NaiveDate>, region: &str, mode: &str| {
            vec![
                Value::text(id),
                date.map_or(Value::Null, Value::Date),
                Value::text(region),
                Value::text(mode),
            ]
        };
        DataSet::new(
            schema,
            vec![
                row("A", Some(ymd(2024, 1, 1)), "West", "First Class"),
                row("B", Some(ymd(2024, 1, 31)), "East", "Same Day"),
                row("C", None, "West", "First Class"),
                row("D", Some(ymd(2024, 2, 1)), "West", "Standard Class"),
            ],
        )
    }

    fn ids(ds: &DataSet) -> Vec<String> {
        ds.column("Order ID")
            .unwrap()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect()
    }

    #[test]
    fn date_range_is_inclusive_and_excludes_null_dates() {
        let ds = sample_dataset();
        let opts = FilterOptions::from_table(&ds).unwrap();
        let mut spec = opts.default_spec();
        spec.end = ymd(2024, 1, 31);

        let out = apply(&ds, &spec).unwrap();
        assert_eq!(ids(&out), vec!["A", "B"]);
    }

    #[test]
    fn default_spec_keeps_every_dated_row_in_order() {
        let ds = sample_dataset();
        let opts = FilterOptions::from_table(&ds).unwrap();
        assert_eq!(opts.date_span, Some((ymd(2024, 1, 1), ymd(2024, 2, 1))));
        assert_eq!(opts.regions, vec!["East", "West"]);

        let out = apply(&ds, &opts.default_spec()).unwrap();
        assert_eq!(ids(&out), vec!["A", "B", "D"]);
        assert_eq!(out.schema, ds.schema);
    }

    #[test]
    fn empty_selection_sets_match_nothing() {
        let ds = sample_dataset();
        let opts = FilterOptions::from_table(&ds).unwrap();

        let mut no_regions = opts.default_spec();
        no_regions.regions.clear();
        assert!(apply(&ds, &no_regions).unwrap().is_empty());

        let mut no_modes = opts.default_spec();
        no_modes.ship_modes.clear();
        assert!(apply(&ds, &no_modes).unwrap().is_empty());
    }

    #[test]
    fn region_and_mode_sets_narrow_rows() {
        let ds = sample_dataset();
        let spec = FilterSpec::new(
            ymd(2000, 1, 1),
            ymd(2100, 1, 1),
            ["West"],
            ["First Class", "Standard Class"],
        );
        assert_eq!(ids(&apply(&ds, &spec).unwrap()), vec!["A", "D"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let ds = DataSet::new(Schema::new(vec![Field::new(ORDER_DATE, DataType::Date)]), vec![]);
        let spec = FilterSpec::new(ymd(2024, 1, 1), ymd(2024, 12, 31), ["West"], ["Same Day"]);
        let err = apply(&ds, &spec).unwrap_err();
        assert_eq!(err.to_string(), "unknown column 'Region'");
    }
}
