use crate::model::element::ElementId;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of bonus positions tracked per pass, whatever the track.
pub const MAX_SLOTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub element_id: ElementId,
    pub value: f64,
}

impl Slot {
    pub fn new(element_id: impl Into<ElementId>, value: f64) -> Self {
        Self {
            element_id: element_id.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PassId {
    First,
    Second,
}

impl PassId {
    pub const BOTH: [PassId; 2] = [PassId::First, PassId::Second];

    pub const fn index(self) -> usize {
        match self {
            PassId::First => 0,
            PassId::Second => 1,
        }
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PassId::First => "Pass 1",
            PassId::Second => "Pass 2",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassError {
    TooManyElements { capacity: usize, actual: usize },
}

impl fmt::Display for PassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassError::TooManyElements { capacity, actual } => {
                write!(f, "pass holds at most {capacity} elements but got {actual}")
            }
        }
    }
}

impl std::error::Error for PassError {}

/// A fixed-capacity ordered run of slots. Gaps are allowed anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    slots: Vec<Option<Slot>>,
}

impl Pass {
    pub fn empty(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn with_slots(capacity: usize, mut slots: Vec<Option<Slot>>) -> Result<Self, PassError> {
        if slots.len() > capacity {
            return Err(PassError::TooManyElements {
                capacity,
                actual: slots.len(),
            });
        }
        slots.resize(capacity, None);
        Ok(Self { slots })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Slot>] {
        &self.slots
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    /// Difficulty values padded or cut to [`MAX_SLOTS`] positions.
    pub fn values(&self) -> [Option<f64>; MAX_SLOTS] {
        let mut values = [None; MAX_SLOTS];
        for (target, slot) in values.iter_mut().zip(self.slots.iter()) {
            *target = slot.as_ref().map(|slot| slot.value);
        }
        values
    }

    pub fn difficulty_total(&self) -> f64 {
        self.slots
            .iter()
            .flatten()
            .map(|slot| sanitize(slot.value))
            .sum()
    }
}

/// Non-finite values count as zero.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// A difficulty value as it arrives from loosely typed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientValue {
    Number(f64),
    Text(String),
}

impl LenientValue {
    /// Text that does not parse as a number is worth zero.
    pub fn to_f64(&self) -> f64 {
        match self {
            LenientValue::Number(value) => sanitize(*value),
            LenientValue::Text(raw) => raw
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .map(sanitize)
                .unwrap_or(0.0),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, LenientValue::Text(raw) if raw.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{LenientValue, MAX_SLOTS, Pass, PassError, PassId, Slot};

    #[test]
    fn with_slots_pads_to_capacity() {
        let pass = Pass::with_slots(5, vec![Some(Slot::new("round-off", 0.1)), None]).unwrap();
        assert_eq!(pass.capacity(), 5);
        assert_eq!(pass.occupied(), 1);
        assert!(pass.slots()[4].is_none());
    }

    #[test]
    fn with_slots_rejects_overflow() {
        let slots = vec![Some(Slot::new("whip", 0.2)); 6];
        assert_eq!(
            Pass::with_slots(5, slots),
            Err(PassError::TooManyElements {
                capacity: 5,
                actual: 6
            })
        );
    }

    #[test]
    fn values_view_is_always_eight_wide() {
        let pass = Pass::with_slots(5, vec![Some(Slot::new("whip", 0.2))]).unwrap();
        let values = pass.values();
        assert_eq!(values.len(), MAX_SLOTS);
        assert_eq!(values[0], Some(0.2));
        assert!(values[1..].iter().all(Option::is_none));
    }

    #[test]
    fn difficulty_total_skips_gaps_and_non_finite_values() {
        let pass = Pass::with_slots(
            8,
            vec![
                Some(Slot::new("back-tuck", 0.5)),
                None,
                Some(Slot::new("mystery", f64::NAN)),
                Some(Slot::new("double-back-tuck", 2.0)),
            ],
        )
        .unwrap();
        assert!((pass.difficulty_total() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn lenient_value_parses_numbers_and_degrades_text() {
        assert_eq!(LenientValue::Number(1.5).to_f64(), 1.5);
        assert_eq!(LenientValue::Text(" 2.2 ".into()).to_f64(), 2.2);
        assert_eq!(LenientValue::Text("4,4".into()).to_f64(), 4.4);
        assert_eq!(LenientValue::Text("abc".into()).to_f64(), 0.0);
        assert!(LenientValue::Text("  ".into()).is_blank());
        assert!(!LenientValue::Number(0.0).is_blank());
    }

    #[test]
    fn lenient_value_deserializes_untagged() {
        let values: Vec<LenientValue> = serde_json::from_str(r#"[0.6, "1.1"]"#).unwrap();
        assert_eq!(values[0], LenientValue::Number(0.6));
        assert_eq!(values[1], LenientValue::Text("1.1".into()));
    }

    #[test]
    fn pass_ids_index_in_order() {
        assert_eq!(PassId::First.index(), 0);
        assert_eq!(PassId::Second.index(), 1);
        assert_eq!(PassId::Second.to_string(), "Pass 2");
    }
}
