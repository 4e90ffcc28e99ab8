//! Structured dashboard output for the presentation layer.
//!
//! The core never renders. [`Dashboard::build`] runs filter → aggregate over an enriched table
//! and returns, per view, labelled headline [`Metric`]s and [`Chart`]s: an aggregated table
//! tagged with its chart kind, title and the fields that go on each axis. Everything is
//! `Serialize`, so a front end can consume it as JSON.

pub mod format;
mod views;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::DashboardResult;
use crate::processing::{apply, FilterSpec, SummaryMetrics};
use crate::schema::{ORDER_MONTH, PROCESSING_TIME_DAYS};
use crate::types::DataSet;

pub use views::{customer_view, financial_view, fulfillment_view, product_view};

/// The four dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Fulfillment,
    Financial,
    Product,
    Customer,
}

impl ViewKind {
    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Fulfillment => "Supply Chain & Fulfillment",
            ViewKind::Financial => "Financial Performance",
            ViewKind::Product => "Product & Inventory",
            ViewKind::Customer => "Customer & Regional",
        }
    }
}

/// Chart a table feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    HorizontalBar,
    Treemap,
    Scatter,
    Donut,
    StackedBar,
}

/// Raw value behind a metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Missing,
}

/// One labelled headline number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    /// Pre-formatted text for display.
    pub display: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: MetricValue, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            display: display.into(),
        }
    }
}

/// An aggregated table plus what a renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    /// Category/x-axis field. For treemaps, the outermost level.
    pub x: String,
    /// Value fields. Several for multi-series line charts.
    pub y: Vec<String>,
    /// Field mapped to colour, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Field mapped to marker size, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Field naming each point on hover, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    /// Hierarchy for treemaps, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    /// Human axis labels for fields whose names are not display-ready.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub table: DataSet,
}

impl Chart {
    pub fn new(kind: ChartKind, title: impl Into<String>, table: DataSet) -> Self {
        Self {
            kind,
            title: title.into(),
            x: String::new(),
            y: Vec::new(),
            color: None,
            size: None,
            hover: None,
            path: Vec::new(),
            labels: BTreeMap::new(),
            table,
        }
    }

    pub fn x(mut self, field: &str) -> Self {
        self.x = field.to_owned();
        self.label(field)
    }

    pub fn y(mut self, field: &str) -> Self {
        self.y.push(field.to_owned());
        self.label(field)
    }

    pub fn color(mut self, field: &str) -> Self {
        self.color = Some(field.to_owned());
        self.label(field)
    }

    pub fn size(mut self, field: &str) -> Self {
        self.size = Some(field.to_owned());
        self
    }

    pub fn hover(mut self, field: &str) -> Self {
        self.hover = Some(field.to_owned());
        self
    }

    pub fn path(mut self, fields: &[&str]) -> Self {
        self.path = fields.iter().map(|f| (*f).to_owned()).collect();
        if let Some(first) = fields.first() {
            self.x = (*first).to_owned();
        }
        self
    }

    fn label(mut self, field: &str) -> Self {
        if let Some(label) = axis_label(field) {
            self.labels.insert(field.to_owned(), label.to_owned());
        }
        self
    }
}

/// Display label for derived columns; source columns are already display-ready.
fn axis_label(field: &str) -> Option<&'static str> {
    match field {
        PROCESSING_TIME_DAYS => Some("Order Processing Time"),
        ORDER_MONTH => Some("Order Month"),
        _ => None,
    }
}

/// One tab: headline metrics and charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub kind: ViewKind,
    pub title: String,
    pub metrics: Vec<Metric>,
    pub charts: Vec<Chart>,
}

/// Every view computed for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub filter: FilterSpec,
    pub summary: SummaryMetrics,
    pub views: Vec<View>,
}

impl Dashboard {
    /// Filter `enriched` with `spec` and compute every view.
    pub fn build(enriched: &DataSet, spec: &FilterSpec) -> DashboardResult<Self> {
        let filtered = apply(enriched, spec)?;
        let summary = SummaryMetrics::compute(&filtered)?;
        log::debug!(
            "dashboard over {} of {} rows",
            filtered.row_count(),
            enriched.row_count()
        );

        let views = vec![
            fulfillment_view(&filtered, &summary)?,
            financial_view(&filtered, &summary)?,
            product_view(&filtered)?,
            customer_view(&filtered, &summary)?,
        ];

        Ok(Self {
            filter: spec.clone(),
            summary,
            views,
        })
    }

    pub fn view(&self, kind: ViewKind) -> Option<&View> {
        self.views.iter().find(|v| v.kind == kind)
    }
}
