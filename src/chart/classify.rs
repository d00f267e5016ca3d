use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap, HashSet},
};

use chrono::NaiveDate;
use tracing::debug;

use super::{
    dates::parse_date,
    series::{BarSeries, ChartSeries, Point, Series},
};
use crate::value::{Number, Row, Value};

/// Label used for bar groups whose label column is missing or null
const UNKNOWN_LABEL: &str = "Unknown";

/// Thresholds for the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Smallest distinct-value count a pie column may have
    pub pie_min_distinct: usize,
    /// Largest distinct-value count a pie column may have
    pub pie_max_distinct: usize,
    /// Number of bar groups kept after sorting
    pub bar_limit: usize,
    /// Number of leading rows plotted by a numeric line
    pub line_sample: usize,
    /// A numeric column needs strictly more distinct values than this to plot as a line
    pub line_min_distinct: usize,
    /// When set, a column that already holds one role is not considered for another
    pub distinct_roles: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            pie_min_distinct: 2,
            pie_max_distinct: 8,
            bar_limit: 10,
            line_sample: 20,
            line_min_distinct: 5,
            distinct_roles: false,
        }
    }
}

/// Structural summary of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    pub key: String,
    /// Non-null cells in the column
    pub present: usize,
    pub distinct: usize,
    pub is_numeric: bool,
    pub is_date: bool,
}

impl ColumnProfile {
    /// Profile `key` across `rows`. Returns `None` when the column has no
    /// non-null values.
    pub fn scan(rows: &[Row], key: &str) -> Option<Self> {
        let mut present = 0;
        let mut distinct = HashSet::new();
        let mut is_numeric = true;
        let mut is_date = true;

        for value in column_values(rows, key) {
            present += 1;
            distinct.insert(value.distinct_key());
            is_numeric = is_numeric && value.as_number().is_some();
            is_date = is_date && parse_date(value).is_some();
        }

        if present == 0 {
            return None;
        }

        Some(ColumnProfile {
            key: key.to_string(),
            present,
            distinct: distinct.len(),
            is_numeric,
            is_date,
        })
    }

    fn fits_pie(&self, options: &ChartOptions) -> bool {
        !self.is_numeric
            && (options.pie_min_distinct..=options.pie_max_distinct).contains(&self.distinct)
    }

    fn fits_bar(&self) -> bool {
        self.is_numeric && self.distinct > 1
    }

    fn fits_line(&self, options: &ChartOptions) -> bool {
        self.is_date || (self.is_numeric && self.distinct > options.line_min_distinct)
    }
}

/// Classify columns with the default thresholds.
pub fn analyze(rows: &[Row], keys: &[String]) -> ChartSeries {
    analyze_with(rows, keys, &ChartOptions::default())
}

/// Classify columns into pie, bar and line series.
///
/// Keys are visited in order and each role goes to the first column that
/// qualifies for it. The first key doubles as the label column for bar
/// groups and line points.
pub fn analyze_with(rows: &[Row], keys: &[String], options: &ChartOptions) -> ChartSeries {
    let mut series = ChartSeries::default();
    let label_key = keys.first().map(String::as_str);

    for key in keys {
        let Some(profile) = ColumnProfile::scan(rows, key) else {
            debug!(key = %key, "column has no values, skipping");
            continue;
        };
        debug!(
            key = %key,
            distinct = profile.distinct,
            numeric = profile.is_numeric,
            date = profile.is_date,
            "profiled column"
        );

        let mut claimed = false;

        if series.pie.is_none() && profile.fits_pie(options) {
            series.pie = Some(pie_series(rows, key));
            claimed = true;
        }

        if series.bar.is_none() && !(options.distinct_roles && claimed) && profile.fits_bar() {
            series.bar = Some(bar_series(rows, key, label_key, options.bar_limit));
            claimed = true;
        }

        if series.line.is_none() && !(options.distinct_roles && claimed) && profile.fits_line(options) {
            let line = if profile.is_date {
                date_line_series(rows, key)
            } else {
                numeric_line_series(rows, key, label_key, options.line_sample)
            };
            if line.data.len() > 1 {
                series.line = Some(line);
            } else {
                debug!(key = %key, "line candidate has fewer than two points, dropped");
            }
        }

        if series.pie.is_some() && series.bar.is_some() && series.line.is_some() {
            break;
        }
    }

    series
}

fn column_values<'a>(rows: &'a [Row], key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
    rows.iter()
        .filter_map(move |row| row.get(key))
        .filter(|v| !v.is_null())
}

fn row_label(row: &Row, label_key: Option<&str>) -> Option<String> {
    label_key
        .and_then(|k| row.get(k))
        .filter(|v| !v.is_null())
        .map(Value::label)
}

/// Insertion-ordered accumulator; ties keep first appearance after a stable sort.
#[derive(Default)]
struct Buckets {
    index: HashMap<String, usize>,
    entries: Vec<(String, Number)>,
}

impl Buckets {
    fn add(&mut self, name: String, amount: Number) {
        match self.index.get(&name).copied() {
            Some(i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, amount));
            }
        }
    }

    fn into_points_descending(mut self) -> Vec<Point> {
        self.entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        self.entries
            .into_iter()
            .map(|(name, value)| Point { name, value })
            .collect()
    }
}

fn pie_series(rows: &[Row], key: &str) -> Series {
    let mut buckets = Buckets::default();
    for value in column_values(rows, key) {
        buckets.add(value.label(), Number::ONE);
    }
    Series {
        key: key.to_string(),
        data: buckets.into_points_descending(),
    }
}

fn bar_series(rows: &[Row], key: &str, label_key: Option<&str>, limit: usize) -> BarSeries {
    let mut buckets = Buckets::default();
    for row in rows {
        let Some(amount) = row.get(key).and_then(Value::as_number) else {
            continue;
        };
        let name = row_label(row, label_key).unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        buckets.add(name, amount);
    }
    let mut data = buckets.into_points_descending();
    data.truncate(limit);
    BarSeries {
        key: key.to_string(),
        data,
    }
}

fn date_line_series(rows: &[Row], key: &str) -> Series {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for date in column_values(rows, key).filter_map(parse_date) {
        *per_day.entry(date).or_default() += 1;
    }
    Series {
        key: key.to_string(),
        data: per_day
            .into_iter()
            .map(|(day, count)| Point::new(day.format("%Y-%m-%d").to_string(), count))
            .collect(),
    }
}

fn numeric_line_series(rows: &[Row], key: &str, label_key: Option<&str>, sample: usize) -> Series {
    let data = rows
        .iter()
        .take(sample)
        .enumerate()
        .filter_map(|(i, row)| {
            let value = row.get(key).and_then(Value::as_number)?;
            let name = row_label(row, label_key).unwrap_or_else(|| format!("Item {}", i + 1));
            Some(Point { name, value })
        })
        .collect();
    Series {
        key: key.to_string(),
        data,
    }
}
