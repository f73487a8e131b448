use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Strongly typed dispatch correlation identifier backed by ULID.
///
/// One id is generated per public dispatch operation and attached to the
/// `dispatch` tracing span, so every middleware and handler log line
/// belonging to a single navigation can be correlated.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct DispatchId(pub ulid::Ulid);

impl DispatchId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DispatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DispatchId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DispatchId(ulid::Ulid::from_string(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_id_parses_back_to_the_same_id() {
        let id = DispatchId::new();
        let parsed: DispatchId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-ulid".parse::<DispatchId>().is_err());
    }
}
