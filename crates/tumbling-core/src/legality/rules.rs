//! Individual legality rules.
//!
//! Each rule only reports what it sees; folding into per-pass results
//! happens in [`super::Validator`].

use crate::model::catalog::ElementCatalog;
use crate::model::element::Direction;
use crate::model::pass::{PassId, Slot};
use crate::rules::{RepeatScope, RuleBook, Violation};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Finding {
    pub pass: PassId,
    pub index: usize,
    pub violation: Violation,
}

impl Finding {
    pub const fn new(pass: PassId, index: usize, violation: Violation) -> Self {
        Self {
            pass,
            index,
            violation,
        }
    }
}

/// Occupied slot indices grouped by element id.
fn occurrences(slots: &[Option<Slot>]) -> BTreeMap<&str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, slot) in slots.iter().enumerate() {
        if let Some(slot) = slot {
            groups
                .entry(slot.element_id.as_str())
                .or_default()
                .push(index);
        }
    }
    groups
}

pub(crate) fn last_occupied(slots: &[Option<Slot>]) -> Option<usize> {
    slots.iter().rposition(Option::is_some)
}

/// `(i, slot i, slot i + 1)` for every pair where both slots are filled.
fn adjacent_pairs(slots: &[Option<Slot>]) -> impl Iterator<Item = (usize, &Slot, &Slot)> {
    slots
        .windows(2)
        .enumerate()
        .filter_map(|(index, pair)| match (&pair[0], &pair[1]) {
            (Some(current), Some(next)) => Some((index, current, next)),
            _ => None,
        })
}

pub fn intra_pass_repeats(pass: PassId, slots: &[Option<Slot>], rules: &RuleBook) -> Vec<Finding> {
    occurrences(slots)
        .into_iter()
        .filter(|(id, indices)| {
            indices.len() > 1 && !rules.is_repeat_exempt(id, RepeatScope::IntraPass)
        })
        .flat_map(|(_, indices)| {
            indices
                .into_iter()
                .map(move |index| Finding::new(pass, index, Violation::IntraPassRepeat))
        })
        .collect()
}

/// Occurrences of the capped element past the allowed count.
pub fn repeat_cap(pass: PassId, slots: &[Option<Slot>], rules: &RuleBook) -> Vec<Finding> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| matches!(slot, Some(slot) if rules.is_capped(slot.element_id.as_str())))
        .skip(rules.max_capped_repeats)
        .map(|(index, _)| Finding::new(pass, index, Violation::RepeatCapExceeded))
        .collect()
}

pub fn cross_pass_repeats(
    first: &[Option<Slot>],
    second: &[Option<Slot>],
    rules: &RuleBook,
) -> Vec<Finding> {
    let first_groups = occurrences(first);
    let second_groups = occurrences(second);
    let mut findings = Vec::new();

    for (id, first_indices) in &first_groups {
        let Some(second_indices) = second_groups.get(id) else {
            continue;
        };
        if rules.is_repeat_exempt(id, RepeatScope::CrossPass) {
            continue;
        }
        findings.extend(
            first_indices
                .iter()
                .map(|&index| Finding::new(PassId::First, index, Violation::CrossPassRepeat)),
        );
        findings.extend(
            second_indices
                .iter()
                .map(|&index| Finding::new(PassId::Second, index, Violation::CrossPassRepeat)),
        );
    }

    findings
}

/// Both passes finishing on the capped element.
pub fn double_capped_ending(
    first: &[Option<Slot>],
    second: &[Option<Slot>],
    rules: &RuleBook,
) -> Vec<Finding> {
    let (Some(first_last), Some(second_last)) = (last_occupied(first), last_occupied(second))
    else {
        return Vec::new();
    };

    let ends_capped = |slots: &[Option<Slot>], index: usize| {
        slots[index]
            .as_ref()
            .is_some_and(|slot| rules.is_capped(slot.element_id.as_str()))
    };

    if ends_capped(first, first_last) && ends_capped(second, second_last) {
        vec![
            Finding::new(PassId::First, first_last, Violation::DoubleBackFullEnding),
            Finding::new(PassId::Second, second_last, Violation::DoubleBackFullEnding),
        ]
    } else {
        Vec::new()
    }
}

/// Whip or flic-flac immediately followed by a forward element.
pub fn connector_into_forward<C>(
    pass: PassId,
    slots: &[Option<Slot>],
    catalog: &C,
    rules: &RuleBook,
) -> Vec<Finding>
where
    C: ElementCatalog + ?Sized,
{
    let mut findings = Vec::new();
    for (index, current, next) in adjacent_pairs(slots) {
        if !catalog
            .direction(next.element_id.as_str())
            .is_some_and(Direction::is_forward)
        {
            continue;
        }
        let violation = if current.element_id == rules.tempo {
            Violation::TempoIntoForward
        } else if current.element_id == rules.flic_flac {
            Violation::FlicFlacIntoForward
        } else {
            continue;
        };
        findings.push(Finding::new(pass, index, violation));
        findings.push(Finding::new(pass, index + 1, violation));
    }
    findings
}

/// Backward element followed by a forward one anywhere but at the pass end.
pub fn direction_change_mid_pass<C>(
    pass: PassId,
    slots: &[Option<Slot>],
    catalog: &C,
) -> Vec<Finding>
where
    C: ElementCatalog + ?Sized,
{
    let Some(last) = last_occupied(slots) else {
        return Vec::new();
    };

    let mut findings = Vec::new();
    for (index, current, next) in adjacent_pairs(slots) {
        if index + 1 == last {
            continue;
        }
        let reverses = catalog
            .direction(current.element_id.as_str())
            .is_some_and(Direction::is_backward)
            && catalog
                .direction(next.element_id.as_str())
                .is_some_and(Direction::is_forward);
        if reverses {
            findings.push(Finding::new(pass, index, Violation::DirectionChangeMidPass));
            findings.push(Finding::new(pass, index + 1, Violation::DirectionChangeMidPass));
        }
    }
    findings
}
