mod book;
mod violation;

pub use book::{RepeatScope, RuleBook};
pub use violation::{Language, Violation, ViolationScope};
