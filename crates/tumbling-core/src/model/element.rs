use core::fmt;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Stable catalog identifier for an element, independent of its display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn is_forward(self) -> bool {
        matches!(self, Direction::Forward)
    }

    pub const fn is_backward(self) -> bool {
        matches!(self, Direction::Backward)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub display_name: String,
    pub symbol: String,
    pub difficulty: f64,
    pub direction: Direction,
}

impl Element {
    pub fn new(
        id: &str,
        display_name: &str,
        symbol: &str,
        difficulty: f64,
        direction: Direction,
    ) -> Self {
        Self {
            id: ElementId::from(id),
            display_name: display_name.to_string(),
            symbol: symbol.to_string(),
            difficulty,
            direction,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Element, ElementId};

    #[test]
    fn element_id_serializes_as_plain_string() {
        let id = ElementId::from("back-full");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"back-full\"");
        assert_eq!(id.to_string(), "back-full");
    }

    #[test]
    fn direction_predicates() {
        assert!(Direction::Forward.is_forward());
        assert!(!Direction::Forward.is_backward());
        assert!(Direction::Backward.is_backward());
    }

    #[test]
    fn display_uses_name_and_symbol() {
        let element = Element::new("back-tuck", "Back tuck salto", "o", 0.5, Direction::Backward);
        assert_eq!(element.to_string(), "Back tuck salto (o)");
    }
}
