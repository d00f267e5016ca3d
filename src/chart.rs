//! # Chart classification
//!
//! Turns a materialized query result into at most three chart series:
//!
//! - **pie** - the first low-cardinality, non-numeric column, as a value histogram
//! - **bar** - the first numeric column with more than one distinct value,
//!   summed per label of the first column
//! - **line** - the first date column (counts per day) or numeric column with
//!   enough distinct values (first rows in order)
//!
//! Each role is claimed by the first qualifying column in key order. The result
//! is a pure function of the rows and options.
//!
//! ```
//! use querylens::chart::analyze;
//! use querylens::response::ResultSet;
//! use serde_json::json;
//!
//! let set = ResultSet::from_json_rows(
//!     vec![
//!         json!({"category": "Electronics", "sales": 150}),
//!         json!({"category": "Clothing", "sales": 200}),
//!         json!({"category": "Electronics", "sales": 75}),
//!     ],
//!     None,
//! )
//! .unwrap();
//!
//! let series = analyze(&set.rows, &set.keys);
//! assert_eq!(series.pie.unwrap().key, "category");
//! assert_eq!(series.bar.unwrap().data[0].name, "Electronics");
//! ```

pub mod classify;
pub mod dates;
pub mod palette;
pub mod series;

pub use classify::{ChartOptions, ColumnProfile, analyze, analyze_with};
pub use palette::Palette;
pub use series::{BarSeries, ChartSeries, Point, Series};
