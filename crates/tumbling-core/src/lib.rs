//! Legality checking and bonus scoring for two-pass tumbling routines.
//!
//! Both evaluators are pure: they take a routine (or raw slot slices) and
//! return fresh result values every call.

pub mod bonus;
pub mod legality;
pub mod model;
pub mod report;
pub mod rules;

pub use bonus::{BonusResult, Points, compute_bonuses, compute_pass_bonuses};
pub use legality::{LegalityResult, RoutineLegalityResult, Validator};
pub use model::catalog::{Catalog, CatalogError, ElementCatalog};
pub use model::element::{Direction, Element, ElementId};
pub use model::pass::{LenientValue, MAX_SLOTS, Pass, PassError, PassId, Slot};
pub use model::routine::{Gender, LeagueTier, Routine, RoutineMeta, Track};
pub use report::RoutineReport;
pub use rules::{Language, RepeatScope, RuleBook, Violation};
