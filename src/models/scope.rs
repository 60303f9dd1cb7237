//! Containers keyed by match format.

use serde::{Deserialize, Serialize};

use super::MatchType;

/// A value computed for all matches and for each format separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoped<T> {
    #[serde(rename = "ALL")]
    pub all: T,
    #[serde(rename = "SHORT")]
    pub short: T,
    #[serde(rename = "LONG")]
    pub long: T,
}

impl<T> Scoped<T> {
    /// Run `f` once per scope; `None` means no format restriction.
    pub fn compute<F>(mut f: F) -> Self
    where
        F: FnMut(Option<MatchType>) -> T,
    {
        Self {
            all: f(None),
            short: f(Some(MatchType::Short)),
            long: f(Some(MatchType::Long)),
        }
    }
}

/// A value computed for each format separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ByType<T> {
    #[serde(rename = "SHORT")]
    pub short: T,
    #[serde(rename = "LONG")]
    pub long: T,
}

impl<T> ByType<T> {
    pub fn compute<F>(mut f: F) -> Self
    where
        F: FnMut(MatchType) -> T,
    {
        Self {
            short: f(MatchType::Short),
            long: f(MatchType::Long),
        }
    }

    pub fn get(&self, match_type: MatchType) -> &T {
        match match_type {
            MatchType::Short => &self.short,
            MatchType::Long => &self.long,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_compute_order() {
        let scoped = Scoped::compute(|t| t.map(|t| t.point_cap()).unwrap_or(0));
        assert_eq!(scoped.all, 0);
        assert_eq!(scoped.short, 11);
        assert_eq!(scoped.long, 21);
    }

    #[test]
    fn test_scoped_serialization_keys() {
        let scoped = Scoped {
            all: 1,
            short: 2,
            long: 3,
        };
        let json = serde_json::to_string(&scoped).unwrap();
        assert_eq!(json, r#"{"ALL":1,"SHORT":2,"LONG":3}"#);
    }

    #[test]
    fn test_by_type_get() {
        let by_type = ByType::compute(|t| t.point_cap());
        assert_eq!(*by_type.get(MatchType::Short), 11);
        assert_eq!(*by_type.get(MatchType::Long), 21);
    }
}
