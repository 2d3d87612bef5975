use crate::model::element::ElementId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatScope {
    IntraPass,
    CrossPass,
}

/// Fixed element relationships the legality rules depend on.
///
/// Everything here is keyed by stable catalog ids and resolved once, then
/// handed to the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBook {
    /// Tempo-type connector (whip).
    pub tempo: ElementId,
    /// Back-handspring-type connector (flic-flac).
    pub flic_flac: ElementId,
    /// Connector with a per-pass occurrence cap (back full).
    pub capped: ElementId,
    pub max_capped_repeats: usize,
    pub intra_exempt: BTreeSet<ElementId>,
    pub cross_exempt: BTreeSet<ElementId>,
}

const INTRA_EXEMPT: [&str; 4] = ["round-off", "flic-flac", "whip", "back-full"];
const CROSS_EXEMPT_EXTRA: [&str; 6] = [
    "back-tuck",
    "back-pike",
    "back-straight",
    "front-handspring",
    "front-tuck",
    "barani",
];

impl RuleBook {
    pub const DEFAULT_MAX_CAPPED_REPEATS: usize = 3;

    pub fn standard() -> Self {
        let intra_exempt: BTreeSet<ElementId> =
            INTRA_EXEMPT.iter().copied().map(ElementId::from).collect();
        let cross_exempt = intra_exempt
            .iter()
            .cloned()
            .chain(CROSS_EXEMPT_EXTRA.iter().copied().map(ElementId::from))
            .collect();
        Self {
            tempo: ElementId::from("whip"),
            flic_flac: ElementId::from("flic-flac"),
            capped: ElementId::from("back-full"),
            max_capped_repeats: Self::DEFAULT_MAX_CAPPED_REPEATS,
            intra_exempt,
            cross_exempt,
        }
    }

    pub fn is_repeat_exempt(&self, id: &str, scope: RepeatScope) -> bool {
        match scope {
            RepeatScope::IntraPass => self.intra_exempt.contains(id),
            RepeatScope::CrossPass => self.cross_exempt.contains(id),
        }
    }

    pub fn is_capped(&self, id: &str) -> bool {
        self.capped.as_str() == id
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}
