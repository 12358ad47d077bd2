//! Component paths: `/bodyset/pelvis`, `../../bodyset/calcn_r`, `ground`.

use crate::{FrameError, Result};
use std::fmt;

/// A parsed component path, absolute (leading `/`) or relative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentPath {
    absolute: bool,
    elements: Vec<String>,
}

impl ComponentPath {
    /// The model root, `/`.
    pub fn root() -> Self {
        Self {
            absolute: true,
            elements: Vec::new(),
        }
    }

    /// Parse a path string. Empty segments (`a//b`, trailing `/`) are skipped.
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(invalid(path, "path is empty"));
        }
        let absolute = trimmed.starts_with('/');
        let mut elements = Vec::new();
        for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
            if segment.chars().any(char::is_whitespace) {
                return Err(invalid(path, "path elements cannot contain whitespace"));
            }
            elements.push(segment.to_string());
        }
        Ok(Self { absolute, elements })
    }

    /// Absolute path built from plain element names.
    pub fn from_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            absolute: true,
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the path starts at the model root.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Path elements, without separators.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Last element, i.e. the component name.
    pub fn name(&self) -> Option<&str> {
        self.elements.last().map(String::as_str)
    }

    /// Append one element.
    pub fn child(&self, name: &str) -> Self {
        let mut elements = self.elements.clone();
        elements.push(name.to_string());
        Self {
            absolute: self.absolute,
            elements,
        }
    }

    /// Path of the containing component. The root is its own parent.
    pub fn parent(&self) -> Self {
        let mut elements = self.elements.clone();
        elements.pop();
        Self {
            absolute: self.absolute,
            elements,
        }
    }

    /// Append `other` to this path. An absolute `other` replaces this path.
    pub fn join(&self, other: &ComponentPath) -> Self {
        if other.absolute {
            return other.clone();
        }
        let mut elements = self.elements.clone();
        elements.extend(other.elements.iter().cloned());
        Self {
            absolute: self.absolute,
            elements,
        }
    }

    /// Collapse `.` and `..` elements.
    ///
    /// Leading `..` elements of a relative path are kept; climbing above the
    /// root of an absolute path is an error.
    pub fn normalize(&self) -> Result<Self> {
        let mut out: Vec<String> = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            match element.as_str() {
                "." => {}
                ".." => match out.last().map(String::as_str) {
                    Some(last) if last != ".." => {
                        out.pop();
                    }
                    _ if self.absolute => {
                        return Err(invalid(&self.to_string(), "path climbs above the root"));
                    }
                    _ => out.push(element.clone()),
                },
                _ => out.push(element.clone()),
            }
        }
        Ok(Self {
            absolute: self.absolute,
            elements: out,
        })
    }

    /// Resolve `target` as seen from the component at `self`.
    ///
    /// Relative paths are interpreted relative to the component itself, so
    /// `..` refers to its owner.
    pub fn resolve(&self, target: &ComponentPath) -> Result<Self> {
        self.join(target).normalize()
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "/")?;
        }
        write!(f, "{}", self.elements.join("/"))
    }
}

impl std::str::FromStr for ComponentPath {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn invalid(path: &str, reason: &str) -> FrameError {
    FrameError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let p = ComponentPath::parse("/bodyset/pelvis").unwrap();
        assert!(p.is_absolute());
        assert_eq!(p.elements(), ["bodyset", "pelvis"]);
        assert_eq!(p.name(), Some("pelvis"));
        assert_eq!(p.to_string(), "/bodyset/pelvis");
    }

    #[test]
    fn test_parse_relative_skips_empty_segments() {
        let p = ComponentPath::parse("../bodyset//femur_r/").unwrap();
        assert!(!p.is_absolute());
        assert_eq!(p.to_string(), "../bodyset/femur_r");
    }

    #[test]
    fn test_parse_rejects_empty_and_whitespace() {
        assert!(matches!(
            ComponentPath::parse("   "),
            Err(FrameError::InvalidPath { .. })
        ));
        assert!(matches!(
            ComponentPath::parse("/body set"),
            Err(FrameError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_resolve_relative_from_component() {
        let owner = ComponentPath::parse("/contactgeometryset/heel").unwrap();
        let target = ComponentPath::parse("../../bodyset/calcn_r").unwrap();
        let resolved = owner.resolve(&target).unwrap();
        assert_eq!(resolved.to_string(), "/bodyset/calcn_r");
    }

    #[test]
    fn test_resolve_absolute_ignores_owner() {
        let owner = ComponentPath::parse("/contactgeometryset/heel").unwrap();
        let target = ComponentPath::parse("/ground").unwrap();
        assert_eq!(owner.resolve(&target).unwrap().to_string(), "/ground");
    }

    #[test]
    fn test_normalize_dots() {
        let p = ComponentPath::parse("/a/./b/../c").unwrap();
        assert_eq!(p.normalize().unwrap().to_string(), "/a/c");

        let rel = ComponentPath::parse("../../x").unwrap();
        assert_eq!(rel.normalize().unwrap().to_string(), "../../x");
    }

    #[test]
    fn test_normalize_above_root_fails() {
        let p = ComponentPath::parse("/a/../..").unwrap();
        assert!(p.normalize().is_err());
    }

    #[test]
    fn test_root_display_and_parent() {
        assert_eq!(ComponentPath::root().to_string(), "/");
        let p = ComponentPath::from_elements(["bodyset", "tibia_l"]);
        assert_eq!(p.parent().to_string(), "/bodyset");
        assert_eq!(p.parent().parent(), ComponentPath::root());
    }
}
