//! Outline coordinates stored as semi-structured JSON
//!
//! The column is plain JSONB: any JSON value is stored and returned unchanged.
//! `points()` is the typed view used by callers that expect the
//! `[{"x": 10, "y": 10}]` shape.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use siteplan_common::{Error, Result};

/// A single vertex of an outline.
///
/// Positions are not rounded; both axes are floating point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Whole values are written as JSON integers, matching the column default
fn axis(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

/// Coordinate list of a playground or building outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Coordinates(Value);

impl Coordinates {
    /// A single point at the origin, the default for new records
    pub fn origin() -> Self {
        Coordinates(json!([{"x": 0, "y": 0}]))
    }

    /// Wrap an arbitrary JSON value without inspecting its shape
    pub fn from_json(value: Value) -> Self {
        Coordinates(value)
    }

    pub fn from_points(points: &[Point]) -> Self {
        Coordinates(Value::Array(
            points
                .iter()
                .map(|p| json!({"x": axis(p.x), "y": axis(p.y)}))
                .collect(),
        ))
    }

    /// Interpret the stored JSON as a list of points.
    pub fn points(&self) -> Result<Vec<Point>> {
        serde_json::from_value(self.0.clone()).map_err(|e| {
            Error::Validation(format!(
                "Coordinates must be a list of {{x, y}} points: {}",
                e
            ))
        })
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::origin()
    }
}

impl From<Vec<Point>> for Coordinates {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(&points)
    }
}
