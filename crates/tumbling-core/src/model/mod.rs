pub mod catalog;
pub mod element;
pub mod pass;
pub mod routine;
