use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" | "anglais" => Some(Language::English),
            "fr" | "fra" | "french" | "français" | "francais" => Some(Language::French),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a violation's message is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationScope {
    Pass,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    IntraPassRepeat,
    RepeatCapExceeded,
    CrossPassRepeat,
    DoubleBackFullEnding,
    TempoIntoForward,
    FlicFlacIntoForward,
    DirectionChangeMidPass,
}

impl Violation {
    pub const ALL: [Violation; 7] = [
        Violation::IntraPassRepeat,
        Violation::RepeatCapExceeded,
        Violation::CrossPassRepeat,
        Violation::DoubleBackFullEnding,
        Violation::TempoIntoForward,
        Violation::FlicFlacIntoForward,
        Violation::DirectionChangeMidPass,
    ];

    pub const fn scope(self) -> ViolationScope {
        match self {
            Violation::CrossPassRepeat | Violation::DoubleBackFullEnding => ViolationScope::Cross,
            _ => ViolationScope::Pass,
        }
    }

    pub const fn message(self, language: Language) -> &'static str {
        match (self, language) {
            (Violation::IntraPassRepeat, Language::English) => "Element repeated within the pass",
            (Violation::IntraPassRepeat, Language::French) => {
                "Élément répété dans la même passe"
            }
            (Violation::RepeatCapExceeded, Language::English) => {
                "Back full performed more than 3 times in the pass"
            }
            (Violation::RepeatCapExceeded, Language::French) => {
                "Salto arrière vrillé exécuté plus de 3 fois dans la passe"
            }
            (Violation::CrossPassRepeat, Language::English) => {
                "Element repeated across both passes"
            }
            (Violation::CrossPassRepeat, Language::French) => {
                "Élément répété dans les deux passes"
            }
            (Violation::DoubleBackFullEnding, Language::English) => {
                "Only one pass may end with a back full"
            }
            (Violation::DoubleBackFullEnding, Language::French) => {
                "Une seule passe peut se terminer par un salto arrière vrillé"
            }
            (Violation::TempoIntoForward, Language::English) => {
                "A whip cannot be followed by a forward element"
            }
            (Violation::TempoIntoForward, Language::French) => {
                "Un tempo ne peut pas être suivi d'un élément avant"
            }
            (Violation::FlicFlacIntoForward, Language::English) => {
                "A flic-flac cannot be followed by a forward element"
            }
            (Violation::FlicFlacIntoForward, Language::French) => {
                "Un flic-flac ne peut pas être suivi d'un élément avant"
            }
            (Violation::DirectionChangeMidPass, Language::English) => {
                "Direction changed in the middle of the pass"
            }
            (Violation::DirectionChangeMidPass, Language::French) => {
                "Changement de sens au milieu de la passe"
            }
        }
    }
}
