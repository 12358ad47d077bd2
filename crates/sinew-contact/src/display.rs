//! Presentation-only fields: display preference and color.
//!
//! Neither field reaches [`NativeGeometry`](crate::NativeGeometry).

use crate::{ContactGeometryError, Result};

/// How a viewer should draw the geometry. Persisted as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayPreference {
    #[default]
    Hide = 0,
    Wire = 1,
    Flat = 3,
    Shaded = 4,
}

impl DisplayPreference {
    /// Persisted integer value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for DisplayPreference {
    type Error = ContactGeometryError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Hide),
            1 => Ok(Self::Wire),
            3 => Ok(Self::Flat),
            4 => Ok(Self::Shaded),
            other => Err(ContactGeometryError::InvalidEnumValue {
                property: "display_preference",
                value: i64::from(other),
                expected: "0 (hide), 1 (wire), 3 (flat), 4 (shaded)",
            }),
        }
    }
}

impl From<DisplayPreference> for i32 {
    fn from(pref: DisplayPreference) -> Self {
        pref.as_i32()
    }
}

/// RGB display color, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f64; 3]);

impl Color {
    /// Default contact geometry color (cyan).
    pub const DEFAULT: Color = Color([0.0, 1.0, 1.0]);

    /// Create from channels.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self([r, g, b])
    }

    /// Channels as an array.
    pub fn channels(&self) -> [f64; 3] {
        self.0
    }

    /// Whether every channel lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        self.0.iter().all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}
