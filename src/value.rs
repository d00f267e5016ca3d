use std::{
    cmp::Ordering,
    collections::HashMap,
    ops::{Add, AddAssign},
    str::FromStr,
    sync::LazyLock,
};

use regex::Regex;
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};

/// A single cell of a query result row.
///
/// Rows coming back from the execution backend are flat: every column holds a
/// scalar. Integers and floats are kept apart so labels print the way the
/// backend sent them.
///
/// # Examples
///
/// ```
/// use querylens::Value;
///
/// assert!(Value::Integer(42).as_number().is_some());
/// assert!(Value::String(" 3.5 ".to_string()).as_number().is_some());
/// assert!(Value::Boolean(true).as_number().is_none());
/// assert_eq!(Value::Float(2.5).label(), "2.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),
}

/// One record of a query result, keyed by column name.
pub type Row = HashMap<String, Value>;

/// Numeric reading of a cell.
///
/// Values stay exact while they fit a `Decimal`; anything larger (or a sum
/// that overflows) continues as a float.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Exact(Decimal),
    Approx(f64),
}

impl Number {
    pub const ONE: Number = Number::Exact(Decimal::ONE);

    /// Finite floats only; NaN and infinities are not numbers here.
    pub fn from_f64(n: f64) -> Option<Number> {
        if !n.is_finite() {
            return None;
        }
        Some(Decimal::from_f64(n).map_or(Number::Approx(n), Number::Exact))
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::Exact(d) => d.to_f64().unwrap_or(f64::NAN),
            Number::Approx(n) => n,
        }
    }
}

/// Never panics: exact while the sum fits a `Decimal`, float after that.
impl Add for Number {
    type Output = Number;

    fn add(self, other: Number) -> Number {
        if let (Number::Exact(a), Number::Exact(b)) = (self, other)
            && let Some(sum) = a.checked_add(b)
        {
            return Number::Exact(sum);
        }
        Number::Approx(self.to_f64() + other.to_f64())
    }
}

impl AddAssign for Number {
    fn add_assign(&mut self, other: Number) {
        *self = *self + other;
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Number::Exact(d)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Exact(Decimal::from(n))
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Exact(Decimal::from(n))
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::Exact(Decimal::from(n))
    }
}

static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("numeric literal pattern")
});

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric reading of the cell.
    ///
    /// Booleans never count as numbers, and neither do empty strings or
    /// strings that merely look like booleans.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Integer(n) => Some(Number::from(*n)),
            Value::Float(n) => Number::from_f64(*n),
            Value::String(s) => parse_numeric(s),
            Value::Null | Value::Boolean(_) => None,
        }
    }

    /// Display string used for series names and histogram buckets
    pub fn label(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(n) => n.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Null => "null".to_string(),
        }
    }

    /// Canonical key for counting distinct values.
    ///
    /// `1` and `1.0` collapse to the same key; `1` and `"1"` do not.
    pub fn distinct_key(&self) -> String {
        match self {
            Value::Integer(_) | Value::Float(_) => match self.as_number() {
                Some(Number::Exact(d)) => format!("n:{}", d.normalize()),
                Some(Number::Approx(n)) => format!("n:{n:e}"),
                None => format!("f:{}", self.label()),
            },
            Value::String(s) => format!("s:{s}"),
            Value::Boolean(b) => format!("b:{b}"),
            Value::Null => "null".to_string(),
        }
    }
}

fn parse_numeric(raw: &str) -> Option<Number> {
    let s = raw.trim();
    if !NUMERIC_LITERAL.is_match(s) {
        return None;
    }
    let exact = if s.contains(['e', 'E']) {
        Decimal::from_scientific(s).ok()
    } else {
        Decimal::from_str(s).ok()
    };
    match exact {
        Some(d) => Some(Number::Exact(d)),
        None => s.parse::<f64>().ok().and_then(Number::from_f64),
    }
}
