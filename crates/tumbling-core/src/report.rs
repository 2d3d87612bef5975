use crate::bonus::{BonusResult, Points, compute_pass_bonuses};
use crate::legality::{RoutineLegalityResult, Validator};
use crate::model::catalog::ElementCatalog;
use crate::model::pass::PassId;
use crate::model::routine::{Routine, RoutineMeta};
use crate::rules::{Language, RuleBook};
use serde::{Deserialize, Serialize};

/// Everything a score sheet or export overlay needs for one routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineReport {
    pub meta: RoutineMeta,
    pub language: Language,
    pub is_legal: bool,
    pub legality: RoutineLegalityResult,
    pub bonuses: [BonusResult; 2],
    pub difficulty: [f64; 2],
}

impl RoutineReport {
    /// Run legality and bonus evaluation independently and combine the results.
    pub fn evaluate<C>(
        routine: &Routine,
        catalog: &C,
        rules: &RuleBook,
        language: Language,
    ) -> Self
    where
        C: ElementCatalog + ?Sized,
    {
        let legality = Validator::new(catalog, rules).validate_routine(routine, language);
        let bonuses = PassId::BOTH.map(|id| compute_pass_bonuses(routine.pass(id), &routine.meta));
        let difficulty = PassId::BOTH.map(|id| routine.pass(id).difficulty_total());

        Self {
            meta: routine.meta,
            language,
            is_legal: legality.is_legal(),
            legality,
            bonuses,
            difficulty,
        }
    }

    pub fn bonus(&self, id: PassId) -> &BonusResult {
        &self.bonuses[id.index()]
    }

    pub fn total_bonus(&self) -> Points {
        self.bonuses.iter().map(|bonus| bonus.sum).sum()
    }

    pub fn total_difficulty(&self) -> f64 {
        self.difficulty.iter().sum()
    }

    /// Difficulty plus bonus for one pass.
    pub fn pass_score(&self, id: PassId) -> f64 {
        self.difficulty[id.index()] + self.bonus(id).sum.as_f64()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
