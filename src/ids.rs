// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

/// Error returned when a string can't be used as a [PointId] or [RouteId].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} identifier {raw:?}: expected {sigil:?} followed by at least one character")]
pub struct IdError {
    pub kind: &'static str,
    pub sigil: char,
    pub raw: String,
}

macro_rules! impl_identifier {
    ($(#[$meta:meta])* $name:ident, $sigil:literal, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from a string, failing if it is malformed.
            pub fn parse(raw: impl Into<String>) -> Result<Self, IdError> {
                let raw = raw.into();
                if Self::is_well_formed(&raw) {
                    Ok(Self(raw))
                } else {
                    Err(IdError {
                        kind: $kind,
                        sigil: $sigil,
                        raw,
                    })
                }
            }

            /// Replaces the stored string. Malformed input leaves the identifier
            /// empty (and thus invalid).
            pub fn set(&mut self, raw: impl Into<String>) {
                self.0 = raw.into();
                if !self.is_valid() {
                    self.0.clear();
                }
            }

            pub fn is_valid(&self) -> bool {
                Self::is_well_formed(&self.0)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            fn is_well_formed(raw: &str) -> bool {
                raw.starts_with($sigil) && raw.chars().count() >= 2
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::parse(s)
            }
        }
    };
}

impl_identifier!(
    /// Identifier of a [Point](crate::Point), e.g. `#SP`.
    PointId,
    '#',
    "point"
);

impl_identifier!(
    /// Identifier of a [Route](crate::Route), e.g. `&BR-116`.
    RouteId,
    '&',
    "route"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parse_accepts_sigil_and_body() {
        assert_eq!(PointId::parse("#A").unwrap().as_str(), "#A");
        assert_eq!(RouteId::parse("&R1").unwrap().as_str(), "&R1");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(PointId::parse("").is_err());
        assert!(PointId::parse("#").is_err());
        assert!(PointId::parse("A").is_err());
        assert!(PointId::parse("&A").is_err());
        assert!(RouteId::parse("#R").is_err());

        let err = RouteId::parse("R1").unwrap_err();
        assert_eq!(err.kind, "route");
        assert_eq!(err.sigil, '&');
        assert_eq!(err.raw, "R1");
    }

    #[test]
    fn set_clears_invalid() {
        let mut id = PointId::default();
        assert!(!id.is_valid());

        id.set("#B");
        assert!(id.is_valid());
        assert_eq!(id.as_str(), "#B");

        id.set("B");
        assert!(!id.is_valid());
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn multibyte_body() {
        assert!(PointId::parse("#é").is_ok());
    }

    #[test]
    fn equality_and_hash() {
        let a1: PointId = "#A".parse().unwrap();
        let a2 = PointId::try_from("#A").unwrap();
        let b: PointId = "#B".parse().unwrap();
        assert_eq!(a1, a2);
        assert_ne!(a1, b);

        let set: HashSet<PointId> = [a1, a2, b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display() {
        let id: RouteId = "&R1".parse().unwrap();
        assert_eq!(id.to_string(), "&R1");
    }
}
