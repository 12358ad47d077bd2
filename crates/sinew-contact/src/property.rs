//! Textual property values, as stored in persisted documents.
//!
//! Vectors are whitespace-separated numbers (`"0 0.1 0"`). Floats are written
//! with Rust's shortest round-trip formatting, so writing then parsing a value
//! reproduces it exactly.

use crate::{ContactGeometryError, Result};
use sinew_math::Vec3;

/// Ordered `(property name, text)` pairs.
pub type PropertyList = Vec<(&'static str, String)>;

pub const LOCATION: &str = "location";
pub const ORIENTATION: &str = "orientation";
pub const DISPLAY_PREFERENCE: &str = "display_preference";
pub const COLOR: &str = "color";
pub const SOCKET_FRAME: &str = "socket_frame";

fn invalid(property: &str, raw: &str, reason: impl Into<String>) -> ContactGeometryError {
    ContactGeometryError::InvalidProperty {
        property: property.to_string(),
        value: raw.to_string(),
        reason: reason.into(),
    }
}

/// Parse a list of floats.
pub fn parse_f64_list(property: &str, raw: &str) -> Result<Vec<f64>> {
    raw.split_whitespace()
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| invalid(property, raw, e.to_string()))
        })
        .collect()
}

/// Parse exactly `N` floats.
pub fn parse_f64_array<const N: usize>(property: &str, raw: &str) -> Result<[f64; N]> {
    let parts = parse_f64_list(property, raw)?;
    parts
        .try_into()
        .map_err(|v: Vec<f64>| invalid(property, raw, format!("expected {} values, got {}", N, v.len())))
}

/// Parse a single float.
pub fn parse_f64(property: &str, raw: &str) -> Result<f64> {
    let [v] = parse_f64_array::<1>(property, raw)?;
    Ok(v)
}

/// Parse a 3-vector.
pub fn parse_vec3(property: &str, raw: &str) -> Result<Vec3> {
    let [x, y, z] = parse_f64_array::<3>(property, raw)?;
    Ok(Vec3::new(x, y, z))
}

/// Parse an integer.
pub fn parse_i32(property: &str, raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|e| invalid(property, raw, e.to_string()))
}

/// Format floats separated by single spaces.
pub fn format_f64_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a 3-vector.
pub fn format_vec3(v: &Vec3) -> String {
    format_f64_list(&[v.x, v.y, v.z])
}
