//! Derived-column computation: raw order table → enriched order table.

use chrono::{Datelike, NaiveDate};
use log::{debug, warn};

use crate::error::DashboardResult;
use crate::schema::{derived_fields, ORDER_DATE, PROFIT, SALES, SHIP_DATE, SHIP_MODE};
use crate::types::{DataSet, DataType, Schema, Value};

/// SLA assigned to ship modes missing from [`SLA_DAYS`]. Large enough that such orders are
/// never late.
pub const NO_SLA_DAYS: i64 = 999;

/// Target processing days per ship mode.
pub const SLA_DAYS: &[(&str, i64)] = &[
    ("Same Day", 1),
    ("First Class", 2),
    ("Second Class", 4),
    ("Standard Class", 5),
];

/// Counters describing per-value problems absorbed during enrichment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub rows: usize,
    /// Non-blank order dates that could not be parsed (now null).
    pub unparsed_order_dates: usize,
    /// Non-blank ship dates that could not be parsed (now null).
    pub unparsed_ship_dates: usize,
    /// Rows whose processing time is null (either date null).
    pub missing_processing_time: usize,
    /// Rows whose ship mode has no SLA entry (assigned [`NO_SLA_DAYS`]).
    pub unmapped_ship_modes: usize,
    /// Rows with sales of exactly zero (profit margin null).
    pub zero_sales_rows: usize,
}

/// Enrich a raw order table. See [`enrich_with_report`].
pub fn enrich(raw: &DataSet) -> DashboardResult<DataSet> {
    enrich_with_report(raw).map(|(ds, _)| ds)
}

/// Parse the date columns and derive processing time, SLA, lateness, profit margin and order
/// month.
///
/// Rows are neither dropped nor reordered. Date cells may be text (parsed day-first) or already
/// dates; derived columns that already exist are recomputed in place, so enriching an enriched
/// table reproduces it.
pub fn enrich_with_report(raw: &DataSet) -> DashboardResult<(DataSet, EnrichReport)> {
    let order_idx = raw.schema.require(ORDER_DATE)?;
    let ship_idx = raw.schema.require(SHIP_DATE)?;
    let mode_idx = raw.schema.require(SHIP_MODE)?;
    let sales_idx = raw.schema.require(SALES)?;
    let profit_idx = raw.schema.require(PROFIT)?;

    let (schema, derived_idx) = enriched_schema(&raw.schema);
    let [processing_idx, sla_idx, late_idx, margin_idx, month_idx] = derived_idx;
    let width = schema.fields.len();

    let mut report = EnrichReport {
        rows: raw.row_count(),
        ..Default::default()
    };

    let enriched = raw.map_rows(schema, |row| {
        let mut out = row.to_vec();
        out.resize(width, Value::Null);

        let order_date = coerce_date(&row[order_idx], &mut report.unparsed_order_dates);
        let ship_date = coerce_date(&row[ship_idx], &mut report.unparsed_ship_dates);

        let processing = match (order_date, ship_date) {
            (Some(o), Some(s)) => Some((s - o).num_days()),
            _ => None,
        };
        if processing.is_none() {
            report.missing_processing_time += 1;
        }

        let sla = match sla_days(row[mode_idx].as_str()) {
            Some(days) => days,
            None => {
                report.unmapped_ship_modes += 1;
                NO_SLA_DAYS
            }
        };

        let margin = profit_margin(&row[sales_idx], &row[profit_idx]);
        if matches!(row[sales_idx], Value::Float64(s) if s == 0.0) {
            report.zero_sales_rows += 1;
        }

        out[order_idx] = order_date.map_or(Value::Null, Value::Date);
        out[ship_idx] = ship_date.map_or(Value::Null, Value::Date);
        out[processing_idx] = processing.map_or(Value::Null, Value::Int64);
        out[sla_idx] = Value::Int64(sla);
        out[late_idx] = Value::Bool(is_late(processing, sla));
        out[margin_idx] = margin.map_or(Value::Null, Value::Float64);
        out[month_idx] = order_date
            .and_then(month_start)
            .map_or(Value::Null, Value::Date);
        out
    });

    if report.unparsed_order_dates > 0 || report.unparsed_ship_dates > 0 {
        warn!(
            "{} order dates and {} ship dates could not be parsed; treated as null",
            report.unparsed_order_dates, report.unparsed_ship_dates
        );
    }
    debug!("enriched {} rows: {report:?}", report.rows);

    Ok((enriched, report))
}

/// Output schema plus the indices of the derived columns, in [`derived_fields`] order.
fn enriched_schema(raw: &Schema) -> (Schema, [usize; 5]) {
    let mut schema = raw.clone();
    for field in &mut schema.fields {
        if field.name == ORDER_DATE || field.name == SHIP_DATE {
            field.data_type = DataType::Date;
        }
    }

    let mut idx = [0usize; 5];
    for (slot, field) in idx.iter_mut().zip(derived_fields()) {
        *slot = match schema.index_of(&field.name) {
            Some(existing) => {
                schema.fields[existing].data_type = field.data_type;
                existing
            }
            None => {
                schema.fields.push(field);
                schema.fields.len() - 1
            }
        };
    }
    (schema, idx)
}

fn coerce_date(value: &Value, unparsed: &mut usize) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Utf8(s) if s.trim().is_empty() => None,
        Value::Utf8(s) => {
            let parsed = parse_day_first_date(s);
            if parsed.is_none() {
                *unparsed += 1;
            }
            parsed
        }
        _ => None,
    }
}

/// Parse a textual date, day-first. A trailing time-of-day is ignored.
///
/// `05/03/2024` is 5 March 2024. ISO `2024-03-05` is also accepted. Returns `None` when no
/// supported layout matches.
pub fn parse_day_first_date(raw: &str) -> Option<NaiveDate> {
    const FOUR_DIGIT_YEAR: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d"];
    const TWO_DIGIT_YEAR: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];

    let date_part = raw
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or("");
    if date_part.is_empty() {
        return None;
    }

    FOUR_DIGIT_YEAR
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        // "05/03/24" must not become year 24.
        .find(|d| d.year() >= 1000)
        .or_else(|| {
            TWO_DIGIT_YEAR
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        })
}

/// SLA days for a ship mode, or `None` when the mode has no entry.
pub fn sla_days(ship_mode: Option<&str>) -> Option<i64> {
    let mode = ship_mode?;
    SLA_DAYS
        .iter()
        .find(|(name, _)| *name == mode)
        .map(|(_, days)| *days)
}

/// Late iff the processing time is known and strictly exceeds the SLA.
pub fn is_late(processing_days: Option<i64>, sla_days: i64) -> bool {
    processing_days.is_some_and(|days| days > sla_days)
}

/// `profit / sales`; null when either side is missing or sales is exactly zero.
pub fn profit_margin(sales: &Value, profit: &Value) -> Option<f64> {
    let sales = sales.as_f64()?;
    let profit = profit.as_f64()?;
    if sales == 0.0 {
        return None;
    }
    let margin = profit / sales;
    margin.is_finite().then_some(margin)
}

fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}
