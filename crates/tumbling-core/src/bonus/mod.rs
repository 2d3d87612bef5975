mod points;

pub use points::Points;

use crate::model::pass::{MAX_SLOTS, Pass, sanitize};
use crate::model::routine::{Gender, LeagueTier, RoutineMeta, Track};
use serde::{Deserialize, Serialize};

const LEAGUE_BONUS: Points = Points::from_tenths(3);
const NATIONAL_STEPS: [(usize, Points); 3] = [
    (5, Points::from_tenths(3)),
    (6, Points::from_tenths(3)),
    (7, Points::from_tenths(4)),
];
const INTERNATIONAL_BONUS: Points = Points::from_tenths(10);
const FEMALE_THRESHOLD: f64 = 2.0;
const MALE_THRESHOLD: f64 = 4.4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusResult {
    pub per_slot: [Points; MAX_SLOTS],
    pub sum: Points,
}

impl BonusResult {
    fn from_slots(per_slot: [Points; MAX_SLOTS]) -> Self {
        Self {
            per_slot,
            sum: per_slot.iter().sum(),
        }
    }
}

impl LeagueTier {
    /// Highest slot index that earns nothing; `None` means no slot qualifies.
    pub const fn bonus_threshold(self) -> Option<usize> {
        match self {
            LeagueTier::A => Some(1),
            LeagueTier::B => Some(2),
            LeagueTier::C => Some(3),
            LeagueTier::D => None,
        }
    }
}

/// Qualifying difficulty for international bonus; unknown gender uses the male value.
pub const fn international_threshold(gender: Option<Gender>) -> f64 {
    match gender {
        Some(Gender::Female) => FEMALE_THRESHOLD,
        Some(Gender::Male) | None => MALE_THRESHOLD,
    }
}

/// Length of the filled prefix.
fn leading_occupied(values: &[Option<f64>]) -> usize {
    values
        .iter()
        .take(MAX_SLOTS)
        .take_while(|value| value.is_some())
        .count()
}

fn league(per_slot: &mut [Points; MAX_SLOTS], occupied: usize, level: Option<LeagueTier>) {
    let Some(threshold) = level.unwrap_or(LeagueTier::LOWEST).bonus_threshold() else {
        return;
    };
    for bonus in per_slot.iter_mut().take(occupied).skip(threshold + 1) {
        *bonus = LEAGUE_BONUS;
    }
}

fn national(per_slot: &mut [Points; MAX_SLOTS], occupied: usize) {
    for (index, bonus) in NATIONAL_STEPS {
        if occupied > index {
            per_slot[index] = bonus;
        }
    }
}

/// The first slot at or above the threshold only unlocks; later ones score.
fn international(
    per_slot: &mut [Points; MAX_SLOTS],
    values: &[Option<f64>],
    gender: Option<Gender>,
) {
    let threshold = international_threshold(gender);
    let mut qualifiers = 0usize;
    for (index, value) in values.iter().take(MAX_SLOTS).enumerate() {
        let Some(value) = value else {
            continue;
        };
        if sanitize(*value) >= threshold {
            qualifiers += 1;
            if qualifiers > 1 {
                per_slot[index] = INTERNATIONAL_BONUS;
            }
        }
    }
}

/// Per-slot bonus for one pass. Values past [`MAX_SLOTS`] are ignored.
pub fn compute_bonuses(values: &[Option<f64>], meta: &RoutineMeta) -> BonusResult {
    let mut per_slot = [Points::ZERO; MAX_SLOTS];
    let occupied = leading_occupied(values);

    match meta.track {
        Track::None => {}
        Track::League => league(&mut per_slot, occupied, meta.level),
        Track::National => national(&mut per_slot, occupied),
        Track::International => international(&mut per_slot, values, meta.gender),
    }

    let result = BonusResult::from_slots(per_slot);
    tracing::debug!(
        target: "tumbling_core::bonus",
        track = %meta.track,
        occupied,
        sum = %result.sum,
        "bonus computed"
    );
    result
}

pub fn compute_pass_bonuses(pass: &Pass, meta: &RoutineMeta) -> BonusResult {
    compute_bonuses(&pass.values(), meta)
}

#[cfg(test)]
mod tests {
    use super::{BonusResult, Points, compute_bonuses};
    use crate::model::routine::{Gender, LeagueTier, RoutineMeta, Track};

    fn tenths(result: &BonusResult) -> Vec<u32> {
        result.per_slot.iter().map(|p| p.tenths()).collect()
    }

    fn filled(count: usize) -> Vec<Option<f64>> {
        (0..8).map(|i| (i < count).then_some(1.0)).collect()
    }

    #[test]
    fn no_track_awards_nothing() {
        let meta = RoutineMeta::new(Track::None, Some(LeagueTier::A), Some(Gender::Male));
        let result = compute_bonuses(&filled(8), &meta);
        assert_eq!(result, BonusResult::default());
    }

    #[test]
    fn empty_values_award_nothing_on_every_track() {
        for track in [Track::League, Track::National, Track::International] {
            let meta = RoutineMeta::new(track, Some(LeagueTier::A), Some(Gender::Female));
            assert_eq!(compute_bonuses(&[None; 8], &meta).sum, Points::ZERO);
        }
    }

    #[test]
    fn league_top_tier_rewards_from_third_slot() {
        let meta = RoutineMeta::new(Track::League, Some(LeagueTier::A), None);
        let result = compute_bonuses(&filled(5), &meta);
        assert_eq!(tenths(&result), vec![0, 0, 3, 3, 3, 0, 0, 0]);
        assert_eq!(result.sum, Points::from_tenths(9));
    }

    #[test]
    fn league_lowest_or_missing_tier_rewards_nothing() {
        let lowest = RoutineMeta::new(Track::League, Some(LeagueTier::D), None);
        assert_eq!(compute_bonuses(&filled(5), &lowest).sum, Points::ZERO);
        let missing = RoutineMeta::new(Track::League, None, None);
        assert_eq!(compute_bonuses(&filled(5), &missing).sum, Points::ZERO);
    }

    #[test]
    fn league_only_counts_the_filled_prefix() {
        let meta = RoutineMeta::new(Track::League, Some(LeagueTier::A), None);
        let values = [Some(0.5), Some(0.5), Some(0.5), None, Some(0.5)];
        let result = compute_bonuses(&values, &meta);
        assert_eq!(tenths(&result), vec![0, 0, 3, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn league_bonus_never_decreases_with_tier() {
        let mut previous = Points::ZERO;
        for tier in LeagueTier::ORDERED {
            let meta = RoutineMeta::new(Track::League, Some(tier), None);
            let sum = compute_bonuses(&filled(5), &meta).sum;
            assert!(sum >= previous, "{tier:?} lowered the bonus");
            previous = sum;
        }
        assert_eq!(previous, Points::from_tenths(9));
    }

    #[test]
    fn national_bonus_is_a_step_function_of_count() {
        let meta = RoutineMeta::new(Track::National, None, None);
        let sums: Vec<u32> = [5, 6, 7, 8]
            .into_iter()
            .map(|count| compute_bonuses(&filled(count), &meta).sum.tenths())
            .collect();
        assert_eq!(sums, vec![0, 3, 6, 10]);
        assert_eq!(
            tenths(&compute_bonuses(&filled(8), &meta)),
            vec![0, 0, 0, 0, 0, 3, 3, 4]
        );
    }

    #[test]
    fn national_ignores_values() {
        let meta = RoutineMeta::new(Track::National, None, None);
        let zeros: Vec<Option<f64>> = vec![Some(0.0); 6];
        assert_eq!(compute_bonuses(&zeros, &meta).sum, Points::from_tenths(3));
    }

    #[test]
    fn international_rewards_second_qualifier_onward() {
        let meta = RoutineMeta::new(Track::International, None, Some(Gender::Male));
        let values = [Some(4.5), Some(4.5), Some(3.0), Some(5.0)];
        let result = compute_bonuses(&values, &meta);
        assert_eq!(tenths(&result), vec![0, 10, 0, 10, 0, 0, 0, 0]);
        assert_eq!(result.sum, Points::from_tenths(20));
    }

    #[test]
    fn international_threshold_depends_on_gender() {
        let values = [Some(2.0), Some(2.2), Some(4.4)];
        let female = RoutineMeta::new(Track::International, None, Some(Gender::Female));
        assert_eq!(tenths(&compute_bonuses(&values, &female))[..3], [0, 10, 10]);
        let unknown = RoutineMeta::new(Track::International, None, None);
        assert_eq!(compute_bonuses(&values, &unknown).sum, Points::ZERO);
    }

    #[test]
    fn international_scans_past_gaps_and_degrades_bad_numbers() {
        let meta = RoutineMeta::new(Track::International, None, Some(Gender::Female));
        let values = [Some(2.5), None, Some(f64::NAN), Some(3.0)];
        let result = compute_bonuses(&values, &meta);
        assert_eq!(tenths(&result)[..4], [0, 0, 0, 10]);
    }

    #[test]
    fn values_beyond_eight_are_ignored() {
        let meta = RoutineMeta::new(Track::International, None, Some(Gender::Female));
        let values = vec![Some(3.0); 12];
        let result = compute_bonuses(&values, &meta);
        assert_eq!(result.sum, Points::from_tenths(70));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let meta = RoutineMeta::new(Track::League, Some(LeagueTier::B), None);
        let values = filled(5);
        assert_eq!(compute_bonuses(&values, &meta), compute_bonuses(&values, &meta));
    }
}
