pub mod rules;

pub use rules::Finding;

use crate::model::catalog::ElementCatalog;
use crate::model::pass::{PassId, Slot};
use crate::model::routine::Routine;
use crate::rules::{Language, RuleBook, ViolationScope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Slots implicated in at least one violation, plus deduplicated messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalityResult {
    pub bad_indices: BTreeSet<usize>,
    pub messages: BTreeSet<String>,
}

impl LegalityResult {
    pub fn is_clean(&self) -> bool {
        self.bad_indices.is_empty()
    }

    pub fn is_bad(&self, index: usize) -> bool {
        self.bad_indices.contains(&index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineLegalityResult {
    pub passes: [LegalityResult; 2],
    pub cross_messages: BTreeSet<String>,
}

impl RoutineLegalityResult {
    /// Union every finding into its pass; cross-scoped messages go to `cross_messages`.
    pub fn from_findings(findings: &[Finding], language: Language) -> Self {
        let mut result = Self::default();
        for finding in findings {
            let message = finding.violation.message(language).to_string();
            let pass = &mut result.passes[finding.pass.index()];
            pass.bad_indices.insert(finding.index);
            match finding.violation.scope() {
                ViolationScope::Pass => {
                    pass.messages.insert(message);
                }
                ViolationScope::Cross => {
                    result.cross_messages.insert(message);
                }
            }
        }
        result
    }

    pub fn pass(&self, id: PassId) -> &LegalityResult {
        &self.passes[id.index()]
    }

    pub fn is_legal(&self) -> bool {
        self.passes.iter().all(LegalityResult::is_clean) && self.cross_messages.is_empty()
    }
}

/// Applies every legality rule to a pair of passes.
pub struct Validator<'a, C: ElementCatalog + ?Sized> {
    catalog: &'a C,
    rules: &'a RuleBook,
}

impl<'a, C: ElementCatalog + ?Sized> Validator<'a, C> {
    pub fn new(catalog: &'a C, rules: &'a RuleBook) -> Self {
        Self { catalog, rules }
    }

    /// Raw findings from all rules, in rule order. Overlaps are kept.
    pub fn findings(&self, first: &[Option<Slot>], second: &[Option<Slot>]) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (pass, slots) in [(PassId::First, first), (PassId::Second, second)] {
            findings.extend(rules::intra_pass_repeats(pass, slots, self.rules));
            findings.extend(rules::repeat_cap(pass, slots, self.rules));
            findings.extend(rules::connector_into_forward(
                pass,
                slots,
                self.catalog,
                self.rules,
            ));
            findings.extend(rules::direction_change_mid_pass(pass, slots, self.catalog));
        }
        findings.extend(rules::cross_pass_repeats(first, second, self.rules));
        findings.extend(rules::double_capped_ending(first, second, self.rules));
        findings
    }

    pub fn validate(
        &self,
        first: &[Option<Slot>],
        second: &[Option<Slot>],
        language: Language,
    ) -> RoutineLegalityResult {
        let findings = self.findings(first, second);
        let result = RoutineLegalityResult::from_findings(&findings, language);
        tracing::debug!(
            target: "tumbling_core::legality",
            findings = findings.len(),
            first_bad = ?result.passes[0].bad_indices,
            second_bad = ?result.passes[1].bad_indices,
            cross = result.cross_messages.len(),
            legal = result.is_legal(),
            "routine validated"
        );
        result
    }

    pub fn validate_routine(&self, routine: &Routine, language: Language) -> RoutineLegalityResult {
        self.validate(
            routine.pass(PassId::First).slots(),
            routine.pass(PassId::Second).slots(),
            language,
        )
    }
}
