pub mod error;
pub mod filter;

pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::filter::{FilterConfig, KindFilter, Kinded, MatchMode};
}
