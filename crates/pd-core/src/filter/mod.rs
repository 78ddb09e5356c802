//! Operator selection by kind.
//!
//! A filter expression uses the canonical kind form (`"leader,admin"`) and is
//! tested against the kind every operator carries.
mod config;
pub use config::FilterConfig;

mod kind_filter;
pub use kind_filter::{KindFilter, Kinded};

mod mode;
pub use mode::MatchMode;
