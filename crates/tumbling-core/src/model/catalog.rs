use crate::model::element::{Direction, Element, ElementId};
use std::collections::BTreeMap;
use std::fmt;

/// Read-only lookup of catalogued elements.
pub trait ElementCatalog {
    fn element(&self, id: &str) -> Option<&Element>;

    /// `None` means the id is unknown; direction-based rules skip it.
    fn direction(&self, id: &str) -> Option<Direction> {
        self.element(id).map(|element| element.direction)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    elements: BTreeMap<ElementId, Element>,
}

#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    DuplicateId(ElementId),
    InvalidDifficulty { id: ElementId, value: f64 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(err) => write!(f, "catalog is not valid JSON: {err}"),
            CatalogError::DuplicateId(id) => write!(f, "element id '{id}' defined more than once"),
            CatalogError::InvalidDifficulty { id, value } => {
                write!(f, "element '{id}' has invalid difficulty {value}")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

// id, display name, symbol, difficulty, direction
const STANDARD: [(&str, &str, &str, f64, Direction); 22] = [
    ("round-off", "Round-off", "(", 0.1, Direction::Backward),
    ("flic-flac", "Flic-flac", "f", 0.1, Direction::Backward),
    ("whip", "Whip", "^", 0.2, Direction::Backward),
    ("back-tuck", "Back tuck salto", "o", 0.5, Direction::Backward),
    ("back-pike", "Back pike salto", "<", 0.6, Direction::Backward),
    ("back-straight", "Back straight salto", "/", 0.6, Direction::Backward),
    ("back-full", "Back full", "1", 0.9, Direction::Backward),
    ("double-full", "Double full", "2", 1.7, Direction::Backward),
    ("triple-full", "Triple full", "3", 2.5, Direction::Backward),
    ("double-back-tuck", "Double back tuck", "--o", 2.0, Direction::Backward),
    ("double-back-pike", "Double back pike", "--<", 2.2, Direction::Backward),
    ("double-back-straight", "Double back straight", "--/", 2.4, Direction::Backward),
    ("full-in-back-tuck", "Full-in back tuck", "2-o", 2.6, Direction::Backward),
    ("triple-back-tuck", "Triple back tuck", "---o", 4.5, Direction::Backward),
    ("triple-back-pike", "Triple back pike", "---<", 5.0, Direction::Backward),
    ("front-handspring", "Front handspring", "h", 0.1, Direction::Forward),
    ("front-tuck", "Front tuck salto", ".o", 0.5, Direction::Forward),
    ("front-pike", "Front pike salto", ".<", 0.6, Direction::Forward),
    ("barani", "Barani", "b", 0.6, Direction::Forward),
    ("rudi", "Rudi", "rudi", 1.1, Direction::Forward),
    ("randy", "Randy", "randy", 1.5, Direction::Forward),
    ("double-front-tuck", "Double front tuck", ".-o", 2.0, Direction::Forward),
];

impl Catalog {
    /// The built-in tumbling element table.
    pub fn standard() -> Self {
        let elements = STANDARD
            .iter()
            .map(|&(id, name, symbol, difficulty, direction)| {
                let element = Element::new(id, name, symbol, difficulty, direction);
                (element.id.clone(), element)
            })
            .collect();
        Self { elements }
    }

    pub fn from_elements(elements: Vec<Element>) -> Result<Self, CatalogError> {
        let mut table = BTreeMap::new();
        for element in elements {
            if !element.difficulty.is_finite() || element.difficulty < 0.0 {
                return Err(CatalogError::InvalidDifficulty {
                    id: element.id,
                    value: element.difficulty,
                });
            }
            if table.contains_key(&element.id) {
                return Err(CatalogError::DuplicateId(element.id));
            }
            table.insert(element.id.clone(), element);
        }
        Ok(Self { elements: table })
    }

    /// Parse a JSON array of elements.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let elements: Vec<Element> = serde_json::from_str(json).map_err(CatalogError::Parse)?;
        Self::from_elements(elements)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn difficulty(&self, id: &str) -> Option<f64> {
        self.elements.get(id).map(|element| element.difficulty)
    }
}

impl ElementCatalog for Catalog {
    fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError, ElementCatalog};
    use crate::model::element::Direction;

    #[test]
    fn standard_catalog_resolves_directions() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 22);
        assert_eq!(catalog.direction("barani"), Some(Direction::Forward));
        assert_eq!(catalog.direction("flic-flac"), Some(Direction::Backward));
        assert_eq!(catalog.direction("cartwheel"), None);
    }

    #[test]
    fn standard_catalog_exposes_difficulty() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.difficulty("triple-back-tuck"), Some(4.5));
        assert_eq!(catalog.difficulty("missing"), None);
    }

    #[test]
    fn from_json_loads_custom_table() {
        let json = r#"[
            {"id": "whip", "display_name": "Tempo", "symbol": "^", "difficulty": 0.2, "direction": "backward"},
            {"id": "barani", "display_name": "Barani", "symbol": "b", "difficulty": 0.6, "direction": "forward"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("whip"));
        assert_eq!(catalog.element("whip").unwrap().display_name, "Tempo");
    }

    #[test]
    fn from_json_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "whip", "display_name": "Whip", "symbol": "^", "difficulty": 0.2, "direction": "backward"},
            {"id": "whip", "display_name": "Tempo", "symbol": "^", "difficulty": 0.2, "direction": "backward"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateId(id)) if id.as_str() == "whip"
        ));
    }

    #[test]
    fn from_json_rejects_negative_difficulty() {
        let json = r#"[
            {"id": "whip", "display_name": "Whip", "symbol": "^", "difficulty": -1.0, "direction": "backward"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::InvalidDifficulty { .. })
        ));
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let err = Catalog::from_json("not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().starts_with("catalog is not valid JSON"));
    }
}
