//! Type-safe identifiers for transit entities.
//!
//! Route numbers and pattern names use Arc<str> for cheap cloning, since they
//! are copied into every link set and arrival. Stop numbers are plain integers.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        // Hashes as the underlying str, so maps can be queried by &str
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(RouteNumber);
impl_identifier!(PatternName);

/// Agency-assigned stop number (e.g. 50586)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopNumber(u32);

impl StopNumber {
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StopNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StopNumber {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = RouteNumber::new("099");
        let id2 = RouteNumber::new("099");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0)); // Clone shares Arc
        assert_ne!(id1, RouteNumber::new("99"));
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(RouteNumber::new("R4"), 42);

        assert_eq!(map.get(&RouteNumber::new("R4")), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(format!("{}", PatternName::new("EB1")), "EB1");
        assert_eq!(format!("{}", StopNumber::new(50586)), "50586");
    }

    #[test]
    fn test_identifier_conversions() {
        let _id1: RouteNumber = "14".into();
        let _id2: PatternName = String::from("WB2").into();
        let stop: StopNumber = 51479.into();
        assert_eq!(stop.get(), 51479);
    }
}
