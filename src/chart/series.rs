use serde::{Serialize, Serializer, ser::SerializeMap, ser::SerializeStruct};

use crate::{
    convert::{number_to_json, serialize_number},
    value::Number,
};

/// A named data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub name: String,
    #[serde(serialize_with = "serialize_number")]
    pub value: Number,
}

impl Point {
    pub fn new(name: impl Into<String>, value: impl Into<Number>) -> Self {
        Point {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Series for pie and line charts: `{key, data: [{name, value}]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Column the series was built from
    pub key: String,
    pub data: Vec<Point>,
}

/// Series for bar charts.
///
/// Serialized the way chart components expect it: each point carries its
/// value under the column name, `{name, <key>: value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub key: String,
    pub data: Vec<Point>,
}

struct BarEntry<'a> {
    key: &'a str,
    point: &'a Point,
}

impl Serialize for BarEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("name", &self.point.name)?;
        map.serialize_entry(self.key, &number_to_json(&self.point.value))?;
        map.end()
    }
}

impl Serialize for BarSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<BarEntry<'_>> = self
            .data
            .iter()
            .map(|point| BarEntry {
                key: &self.key,
                point,
            })
            .collect();
        let mut s = serializer.serialize_struct("BarSeries", 2)?;
        s.serialize_field("key", &self.key)?;
        s.serialize_field("data", &entries)?;
        s.end()
    }
}

/// Output of the classifier. Any role may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pie: Option<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<BarSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Series>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.pie.is_none() && self.bar.is_none() && self.line.is_none()
    }
}
