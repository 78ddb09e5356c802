//! Well-known values of the operator kind text format.
//!
//! The text format may appear in logs, dashboards and saved configuration,
//! so these values must stay stable.

/// Rendered for a kind that carries no defined flag.
///
/// This covers both the empty kind and kinds made only of undefined bits.
pub const UNKNOWN_KIND: &str = "unknown";

/// Separator between flag names in the canonical form.
pub const FLAG_SEPARATOR: char = ',';

/// One bit beyond the last defined flag.
///
/// Bounds iteration over defined flags; never a flag itself.
pub const OP_MAX: u32 = 1 << 9;
