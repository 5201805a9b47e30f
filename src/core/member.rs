use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a group member.
///
/// Members are the vertices of the balance graph. The engine only compares
/// and orders them; what the number means is up to the caller.
///
/// # Examples
///
/// ```
/// use settlement_engine::core::member::MemberId;
///
/// let alice = MemberId::new(1);
/// let bob = MemberId::new(2);
/// assert!(alice < bob);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier of the expense group a balance belongs to.
///
/// Carried through the engine untouched and copied onto result rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_equality() {
        assert_eq!(MemberId::new(7), MemberId::from(7));
        assert_ne!(MemberId::new(7), MemberId::new(8));
    }

    #[test]
    fn test_member_display() {
        assert_eq!(format!("{}", MemberId::new(42)), "42");
        assert_eq!(MemberId::new(42).get(), 42);
    }

    #[test]
    fn test_group_display() {
        assert_eq!(GroupId::new("trip-2026").to_string(), "trip-2026");
    }
}
