pub mod dimensions;
pub mod error;
pub mod event;
pub mod format;
pub mod naming;
pub mod outcome;
