//! Validated keys and values of the scroll store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// An application route such as `/problems/283`. Always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePath(String);

impl RoutePath {
    pub fn new(path: impl Into<String>) -> Result<Self, StorageError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(StorageError::InvalidRoute { path });
        }
        Ok(RoutePath(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoutePath {
    type Error = StorageError;

    fn try_from(path: String) -> Result<Self, StorageError> {
        RoutePath::new(path)
    }
}

impl From<RoutePath> for String {
    fn from(route: RoutePath) -> String {
        route.0
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vertical scroll position in pixels. Finite and not negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScrollOffset(f64);

impl ScrollOffset {
    pub const TOP: ScrollOffset = ScrollOffset(0.0);

    pub fn new(offset: f64) -> Result<Self, StorageError> {
        if !offset.is_finite() || offset < 0.0 {
            return Err(StorageError::InvalidOffset { offset });
        }
        Ok(ScrollOffset(offset))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ScrollOffset {
    type Error = StorageError;

    fn try_from(offset: f64) -> Result<Self, StorageError> {
        ScrollOffset::new(offset)
    }
}

impl From<ScrollOffset> for f64 {
    fn from(offset: ScrollOffset) -> f64 {
        offset.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_must_be_absolute() {
        assert!(RoutePath::new("/problems/283").is_ok());
        assert!(RoutePath::new("/").is_ok());
        assert!(matches!(
            RoutePath::new("problems"),
            Err(StorageError::InvalidRoute { .. })
        ));
        assert!(RoutePath::new("").is_err());
    }

    #[test]
    fn offset_must_be_finite_and_non_negative() {
        assert_eq!(ScrollOffset::new(0.0).unwrap(), ScrollOffset::TOP);
        assert_eq!(ScrollOffset::new(120.5).unwrap().get(), 120.5);
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ScrollOffset::new(bad),
                Err(StorageError::InvalidOffset { .. })
            ));
        }
    }

    #[test]
    fn deserialization_validates() {
        let route: Result<RoutePath, _> = serde_json::from_str("\"relative\"");
        assert!(route.is_err());
        let offset: Result<ScrollOffset, _> = serde_json::from_str("-3.0");
        assert!(offset.is_err());
        let ok: RoutePath = serde_json::from_str("\"/a\"").unwrap();
        assert_eq!(ok.as_str(), "/a");
    }
}
