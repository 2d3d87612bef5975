use crate::model::pass::{MAX_SLOTS, Pass, PassId};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Competitive track. `None` disables every bonus rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    League,
    National,
    International,
    #[default]
    None,
}

impl Track {
    pub const LEAGUE_CAPACITY: usize = 5;

    /// Matches on word fragments so localized labels ("Ligue", "Nationale") resolve too.
    pub fn parse(value: &str) -> Self {
        let lowered = value.trim().to_lowercase();
        if lowered.contains("leag") || lowered.contains("ligue") {
            Track::League
        } else if lowered.contains("inter") {
            Track::International
        } else if lowered.contains("nation") {
            Track::National
        } else {
            Track::None
        }
    }

    pub const fn pass_capacity(self) -> usize {
        match self {
            Track::League => Self::LEAGUE_CAPACITY,
            _ => MAX_SLOTS,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Track::League => "League",
            Track::National => "National",
            Track::International => "International",
            Track::None => "None",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "f" | "w" | "female" | "women" | "woman" | "girl" | "girls" | "femme" | "fille"
            | "filles" => Some(Gender::Female),
            "m" | "male" | "men" | "man" | "boy" | "boys" | "homme" | "garçon" | "garçons" => {
                Some(Gender::Male)
            }
            _ => None,
        }
    }
}

/// League level, `A` being the top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeagueTier {
    A,
    B,
    C,
    D,
}

impl LeagueTier {
    pub const LOWEST: LeagueTier = LeagueTier::D;
    pub const ORDERED: [LeagueTier; 4] = [
        LeagueTier::D,
        LeagueTier::C,
        LeagueTier::B,
        LeagueTier::A,
    ];

    /// Accepts "A", "level b", "Niveau C", "Niveau 2" or 1..=4. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let token = value.split_whitespace().last()?;
        if let Ok(number) = token.parse::<u32>() {
            return Self::from_number(number);
        }
        let mut chars = token.chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match letter.to_ascii_uppercase() {
            'A' => Some(LeagueTier::A),
            'B' => Some(LeagueTier::B),
            'C' => Some(LeagueTier::C),
            'D' => Some(LeagueTier::D),
            _ => None,
        }
    }

    pub const fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(LeagueTier::A),
            2 => Some(LeagueTier::B),
            3 => Some(LeagueTier::C),
            4 => Some(LeagueTier::D),
            _ => None,
        }
    }

    /// Parse, falling back to the lowest tier for anything unrecognized.
    pub fn parse_or_lowest(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            tracing::warn!(
                target: "tumbling_core::routine",
                raw_level = value,
                fallback = ?Self::LOWEST,
                "unrecognized league level"
            );
            Self::LOWEST
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutineMeta {
    pub track: Track,
    pub level: Option<LeagueTier>,
    pub gender: Option<Gender>,
}

impl RoutineMeta {
    pub const fn new(track: Track, level: Option<LeagueTier>, gender: Option<Gender>) -> Self {
        Self {
            track,
            level,
            gender,
        }
    }

    /// Resolve free-text labels once; rule code only ever sees the enums.
    pub fn from_labels(track: Option<&str>, level: Option<&str>, gender: Option<&str>) -> Self {
        let track = track.map(Track::parse).unwrap_or_default();
        let level = match (track, level) {
            (Track::League, Some(raw)) => Some(LeagueTier::parse_or_lowest(raw)),
            (_, Some(raw)) => LeagueTier::parse(raw),
            (_, None) => None,
        };
        Self {
            track,
            level,
            gender: gender.and_then(Gender::parse),
        }
    }
}

/// Two passes plus the metadata that selects bonus rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub meta: RoutineMeta,
    passes: [Pass; 2],
}

impl Routine {
    pub fn new(meta: RoutineMeta, first: Pass, second: Pass) -> Self {
        Self {
            meta,
            passes: [first, second],
        }
    }

    pub fn empty(meta: RoutineMeta) -> Self {
        let capacity = meta.track.pass_capacity();
        Self::new(meta, Pass::empty(capacity), Pass::empty(capacity))
    }

    pub fn pass(&self, id: PassId) -> &Pass {
        &self.passes[id.index()]
    }

    pub fn passes(&self) -> &[Pass; 2] {
        &self.passes
    }
}
