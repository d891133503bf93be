// Chart-ready view models
use super::experiment::Mode;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub const PALETTE: [&str; 6] = [
    "#2563eb", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4",
];

/// Line colour for the variant at `index` in the dataset's variant list.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Column name the charting library reads a variant's CR series from.
pub fn cr_data_key(name: &str) -> String {
    format!("{}_cr", name)
}

/// One variant's values on one row. `cr` is `None` when the variant has no
/// point for the row's date, which renders as a gap rather than a zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VariantCell {
    pub visits: u64,
    pub conversions: u64,
    pub cr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: String,
    /// Keyed by variant name, in dataset variant order.
    pub cells: IndexMap<String, VariantCell>,
}

impl Row {
    pub fn new(date: String) -> Self {
        Self {
            date,
            cells: IndexMap::new(),
        }
    }

    pub fn cell(&self, name: &str) -> Option<&VariantCell> {
        self.cells.get(name)
    }

    pub fn cr(&self, name: &str) -> Option<f64> {
        self.cell(name).and_then(|c| c.cr)
    }
}

// Flattened into `<name>_visits` / `<name>_conversions` / `<name>_cr` columns.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.cells.len() * 3))?;
        map.serialize_entry("date", &self.date)?;
        for (name, cell) in &self.cells {
            map.serialize_entry(&format!("{}_visits", name), &cell.visits)?;
            map.serialize_entry(&format!("{}_conversions", name), &cell.conversions)?;
            map.serialize_entry(&cr_data_key(name), &cell.cr)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct YDomain {
    pub lower: f64,
    pub upper: f64,
}

impl YDomain {
    pub const DEFAULT: YDomain = YDomain {
        lower: 0.0,
        upper: 100.0,
    };

    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `count` evenly spaced tick values from `lower` to `upper` inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.lower],
            _ => {
                let step = (self.upper - self.lower) / (count - 1) as f64;
                (0..count).map(|i| self.lower + step * i as f64).collect()
            }
        }
    }
}

/// Inclusive row-index window selected by the brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BrushRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl BrushRange {
    /// The whole row table, or `None` when there are no rows to select.
    pub fn full(len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            start_index: 0,
            end_index: len - 1,
        })
    }

    /// Orders the bounds and clamps them into `0..len`.
    pub fn clamped(start_index: usize, end_index: usize, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        let (lo, hi) = if start_index <= end_index {
            (start_index, end_index)
        } else {
            (end_index, start_index)
        };
        Some(Self {
            start_index: lo.min(len - 1),
            end_index: hi.min(len - 1),
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: &'static str,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartLine {
    pub name: String,
    pub color: &'static str,
    pub data_key: String,
    pub connect_nulls: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TooltipEntry {
    pub name: String,
    pub color: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Tooltip {
    pub label: String,
    pub entries: Vec<TooltipEntry>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartView {
    pub mode: Mode,
    pub rows: Vec<Row>,
    pub domain: YDomain,
    pub lines: Vec<ChartLine>,
    pub legend: Vec<LegendEntry>,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub brush: Option<BrushRange>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_wraps_palette() {
        assert_eq!(color_for(0), "#2563eb");
        assert_eq!(color_for(6), "#2563eb");
        assert_eq!(color_for(7), "#ef4444");
    }

    #[test]
    fn test_row_serializes_flat_columns() {
        let mut row = Row::new("2024-01-01".to_string());
        row.cells.insert(
            "A".to_string(),
            VariantCell {
                visits: 100,
                conversions: 10,
                cr: Some(10.0),
            },
        );
        row.cells.insert("B".to_string(), VariantCell::default());

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "2024-01-01",
                "A_visits": 100,
                "A_conversions": 10,
                "A_cr": 10.0,
                "B_visits": 0,
                "B_conversions": 0,
                "B_cr": null
            })
        );
    }

    #[test]
    fn test_domain_ticks() {
        assert_eq!(YDomain::DEFAULT.ticks(5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(YDomain::new(2.0, 4.0).ticks(1), vec![2.0]);
        assert!(YDomain::DEFAULT.ticks(0).is_empty());
    }

    #[test]
    fn test_brush_full_extent() {
        assert_eq!(BrushRange::full(0), None);
        assert_eq!(
            BrushRange::full(5),
            Some(BrushRange {
                start_index: 0,
                end_index: 4
            })
        );
    }

    #[test]
    fn test_brush_clamped() {
        assert_eq!(
            BrushRange::clamped(8, 2, 5),
            Some(BrushRange {
                start_index: 2,
                end_index: 4
            })
        );
        assert_eq!(BrushRange::clamped(0, 3, 0), None);
    }
}
