// Series builder - Turns per-variant series into date-aligned chart rows
use crate::application::aggregator::aggregate_week;
use crate::domain::chart::{Row, VariantCell, YDomain};
use crate::domain::experiment::{Dataset, Mode, Point, Series};
use std::collections::{BTreeSet, HashMap};

const DOMAIN_PAD_RATIO: f64 = 0.12;

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRows {
    pub rows: Vec<Row>,
    pub domain: YDomain,
}

/// Applies the grouping mode to each series.
pub fn group_series(series: &[Series], mode: Mode) -> Vec<Series> {
    series
        .iter()
        .map(|s| match mode {
            Mode::Day => s.clone(),
            Mode::Week => Series::new(s.name.clone(), aggregate_week(&s.data)),
        })
        .collect()
}

/// Merges grouped series into one row per distinct date, ascending.
pub fn align_rows(series: &[Series]) -> Vec<Row> {
    let dates: BTreeSet<&str> = series
        .iter()
        .flat_map(|s| s.data.iter().map(|p| p.date.as_str()))
        .collect();

    let lookups: Vec<(&str, HashMap<&str, &Point>)> = series
        .iter()
        .map(|s| {
            let by_date = s.data.iter().map(|p| (p.date.as_str(), p)).collect();
            (s.name.as_str(), by_date)
        })
        .collect();

    dates
        .into_iter()
        .map(|date| {
            let mut row = Row::new(date.to_string());
            for (name, by_date) in &lookups {
                let cell = match by_date.get(date) {
                    Some(point) => VariantCell {
                        visits: point.visits,
                        conversions: point.conversions,
                        cr: Some(point.conversion_rate()),
                    },
                    None => VariantCell::default(),
                };
                row.cells.insert(name.to_string(), cell);
            }
            row
        })
        .collect()
}

/// Padded CR range over the visible variants; `[0, 100]` when nothing is plotted.
pub fn y_domain<F>(rows: &[Row], is_visible: F) -> YDomain
where
    F: Fn(&str) -> bool,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for row in rows {
        for (name, cell) in &row.cells {
            if !is_visible(name.as_str()) {
                continue;
            }
            if let Some(cr) = cell.cr {
                min = min.min(cr);
                max = max.max(cr);
            }
        }
    }

    if min == f64::INFINITY {
        return YDomain::DEFAULT;
    }

    let mut pad = (max - min) * DOMAIN_PAD_RATIO;
    if pad == 0.0 {
        pad = max * DOMAIN_PAD_RATIO;
    }
    if pad == 0.0 {
        pad = 1.0;
    }

    YDomain::new((min - pad).max(0.0), max + pad)
}

/// Full pipeline: projection, grouping, alignment and domain.
pub fn build_rows<F>(dataset: &Dataset, mode: Mode, is_visible: F) -> BuiltRows
where
    F: Fn(&str) -> bool,
{
    let grouped = group_series(&dataset.series(), mode);
    let rows = align_rows(&grouped);
    let domain = y_domain(&rows, is_visible);
    BuiltRows { rows, domain }
}
