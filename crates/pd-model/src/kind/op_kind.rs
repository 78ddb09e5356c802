use std::{fmt, iter, str::FromStr};

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{FLAG_SEPARATOR, OP_MAX, UNKNOWN_KIND};
use crate::error::{ModelError, ModelResult};

bitflags! {
    /// Bit field describing the origin and effect of a scheduling operator.
    ///
    /// Flags combine freely with `|`. The canonical text form lists the names
    /// of the defined flags in ascending bit order, joined by `,`
    /// (e.g. `"leader,region,admin"`).
    ///
    /// Bits above the defined set are retained when converting from `u32`,
    /// but they have no name and are never produced by [`OpKind::parse`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct OpKind: u32 {
        /// Includes leader transfer.
        const LEADER = 1 << 0;
        /// Includes peer movement.
        const REGION = 1 << 1;
        /// Includes region split.
        const SPLIT = 1 << 2;
        /// Initiated by admin.
        const ADMIN = 1 << 3;
        /// Initiated by the hot region scheduler.
        const HOT_REGION = 1 << 4;
        /// Initiated by the adjacent region scheduler.
        const ADJACENT = 1 << 5;
        /// Initiated by replica checkers.
        const REPLICA = 1 << 6;
        /// Initiated by merge checkers or merge schedulers.
        const MERGE = 1 << 7;
        /// Initiated by the range scheduler.
        const RANGE = 1 << 8;
    }
}

/// Flag names indexed by bit position.
///
/// Both directions of the bit/name mapping are derived from this table.
const FLAG_NAMES: [&str; 9] = [
    "leader",
    "region",
    "split",
    "admin",
    "hot-region",
    "adjacent",
    "replica",
    "merge",
    "range",
];

const _: () = assert!(1u32 << FLAG_NAMES.len() == OP_MAX);

impl OpKind {
    /// Returns `true` if any bit of `flag` is set in this kind.
    #[inline]
    pub const fn has_flag(self, flag: OpKind) -> bool {
        self.bits() & flag.bits() != 0
    }

    /// Returns `true` if at least one defined flag is set.
    ///
    /// Kinds for which this is `false` render as [`UNKNOWN_KIND`].
    #[inline]
    pub const fn is_known(self) -> bool {
        self.bits() & (OP_MAX - 1) != 0
    }

    /// Drops every bit outside the defined flag set.
    #[inline]
    pub const fn without_undefined(self) -> Self {
        Self::from_bits_truncate(self.bits())
    }

    /// Looks up a single flag by its exact name.
    ///
    /// # Examples
    /// ```
    /// use pd_model::OpKind;
    ///
    /// assert_eq!(OpKind::from_flag_name("hot-region"), Some(OpKind::HOT_REGION));
    /// assert_eq!(OpKind::from_flag_name("Leader"), None);
    /// ```
    pub fn from_flag_name(name: &str) -> Option<Self> {
        FLAG_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|pos| Self::from_bits_retain(1u32 << pos))
    }

    /// Returns the name of a single defined flag.
    ///
    /// `None` for the empty kind, combined kinds and undefined bits.
    pub fn flag_name(self) -> Option<&'static str> {
        let bits = self.bits();
        if bits.count_ones() != 1 || bits >= OP_MAX {
            return None;
        }
        Some(FLAG_NAMES[bits.trailing_zeros() as usize])
    }

    /// Iterates over the defined flags set in this kind, lowest bit first.
    pub fn defined_flags(self) -> impl Iterator<Item = OpKind> {
        iter::successors(Some(1u32), |bit| Some(bit << 1))
            .take_while(|bit| *bit < OP_MAX)
            .map(Self::from_bits_retain)
            .filter(move |flag| self.has_flag(*flag))
    }

    /// Iterates over the names of the defined flags set in this kind, lowest bit first.
    pub fn flag_names(self) -> impl Iterator<Item = &'static str> {
        self.defined_flags().filter_map(Self::flag_name)
    }

    /// Parses a comma separated list of flag names.
    ///
    /// Tokens are matched exactly, without trimming. The first unknown token
    /// fails the whole parse; no partially accumulated kind is returned.
    /// An empty string is a single empty token and therefore fails.
    ///
    /// # Examples
    /// ```
    /// use pd_model::OpKind;
    ///
    /// let kind = OpKind::parse("admin,leader,region").unwrap();
    /// assert_eq!(kind, OpKind::LEADER | OpKind::REGION | OpKind::ADMIN);
    /// assert_eq!(kind.to_string(), "leader,region,admin");
    ///
    /// let err = OpKind::parse("leader,bogus").unwrap_err();
    /// assert_eq!(err.token(), "bogus");
    /// ```
    pub fn parse(text: &str) -> ModelResult<Self> {
        text.split(FLAG_SEPARATOR)
            .try_fold(Self::empty(), |kind, token| {
                Self::from_flag_name(token)
                    .map(|flag| kind | flag)
                    .ok_or_else(|| ModelError::UnknownFlag(token.to_string()))
            })
    }
}

impl Default for OpKind {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<u32> for OpKind {
    fn from(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl From<OpKind> for u32 {
    fn from(kind: OpKind) -> Self {
        kind.bits()
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.flag_names();
        let Some(first) = names.next() else {
            return f.write_str(UNKNOWN_KIND);
        };

        f.write_str(first)?;
        for name in names {
            write!(f, "{FLAG_SEPARATOR}{name}")?;
        }
        Ok(())
    }
}

impl FromStr for OpKind {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        Self::parse(s)
    }
}

impl Serialize for OpKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OpKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == UNKNOWN_KIND {
            return Ok(Self::empty());
        }
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVERY_FLAG: [OpKind; 9] = [
        OpKind::LEADER,
        OpKind::REGION,
        OpKind::SPLIT,
        OpKind::ADMIN,
        OpKind::HOT_REGION,
        OpKind::ADJACENT,
        OpKind::REPLICA,
        OpKind::MERGE,
        OpKind::RANGE,
    ];

    #[test]
    fn name_table_is_a_bijection() {
        for (pos, flag) in EVERY_FLAG.iter().enumerate() {
            assert_eq!(flag.bits(), 1u32 << pos);

            let name = flag.flag_name().expect("every defined flag has a name");
            assert_eq!(OpKind::from_flag_name(name), Some(*flag));
        }

        let mut names: Vec<_> = FLAG_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FLAG_NAMES.len(), "flag names must be unique");
    }

    #[test]
    fn sentinel_bounds_defined_flags() {
        assert_eq!(OpKind::all().bits(), OP_MAX - 1);
        assert_eq!(OpKind::from(OP_MAX).flag_name(), None);
        assert_eq!(OpKind::from(OP_MAX).defined_flags().count(), 0);
        assert_eq!(OpKind::all().defined_flags().count(), FLAG_NAMES.len());
    }

    #[test]
    fn has_flag_checks_single_bits() {
        let kind = OpKind::LEADER | OpKind::ADMIN;

        assert!(kind.has_flag(OpKind::LEADER));
        assert!(kind.has_flag(OpKind::ADMIN));
        assert!(!kind.has_flag(OpKind::REGION));
        assert!(!kind.has_flag(OpKind::empty()));
        assert!(!OpKind::empty().has_flag(OpKind::LEADER));
    }

    #[test]
    fn format_uses_ascending_bit_order() {
        let kind = OpKind::ADMIN | OpKind::REGION | OpKind::LEADER;
        assert_eq!(kind.to_string(), "leader,region,admin");

        let kind = OpKind::RANGE | OpKind::HOT_REGION | OpKind::SPLIT;
        assert_eq!(kind.to_string(), "split,hot-region,range");
    }

    #[test]
    fn format_single_flags_by_name() {
        for flag in EVERY_FLAG {
            assert_eq!(flag.to_string(), flag.flag_name().unwrap());
        }
    }

    #[test]
    fn format_without_defined_flags_is_unknown() {
        assert_eq!(OpKind::empty().to_string(), "unknown");
        assert_eq!(OpKind::default().to_string(), "unknown");
        assert_eq!(OpKind::from(OP_MAX).to_string(), "unknown");
        assert_eq!(OpKind::from(1 << 31).to_string(), "unknown");
    }

    #[test]
    fn format_ignores_undefined_bits_next_to_defined_ones() {
        let kind = OpKind::from(OP_MAX | OpKind::MERGE.bits());
        assert_eq!(kind.to_string(), "merge");
        assert!(kind.is_known());
        assert_eq!(kind.without_undefined(), OpKind::MERGE);
    }

    #[test]
    fn is_known_matches_unknown_rendering() {
        assert!(!OpKind::empty().is_known());
        assert!(!OpKind::from(OP_MAX << 3).is_known());
        assert!(OpKind::REPLICA.is_known());
    }

    #[test]
    fn parse_is_order_insensitive() {
        let a = OpKind::parse("leader,region").unwrap();
        let b = OpKind::parse("region,leader").unwrap();

        assert_eq!(a, b);
        assert_eq!(a, OpKind::LEADER | OpKind::REGION);
    }

    #[test]
    fn parse_tolerates_duplicates() {
        assert_eq!(
            OpKind::parse("leader,leader").unwrap(),
            OpKind::parse("leader").unwrap()
        );
    }

    #[test]
    fn parse_rejects_unknown_token() {
        let err = OpKind::parse("bogus").unwrap_err();
        assert_eq!(err, ModelError::UnknownFlag("bogus".to_string()));
        assert_eq!(err.to_string(), "unknown flag name: bogus");
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = OpKind::parse("").unwrap_err();
        assert_eq!(err.token(), "");
    }

    #[test]
    fn parse_is_all_or_nothing() {
        let err = OpKind::parse("leader,bogus").unwrap_err();
        assert_eq!(err.token(), "bogus");

        let err = OpKind::parse("leader,,region").unwrap_err();
        assert_eq!(err.token(), "");
    }

    #[test]
    fn parse_does_not_trim_or_fold_case() {
        let bad = [" leader", "leader ", "leader, region", "LEADER", "hot_region", "unknown"];

        for input in bad {
            assert!(
                OpKind::parse(input).is_err(),
                "expected error for {input:?}, but got Ok"
            );
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let a: OpKind = "split,merge".parse().unwrap();
        assert_eq!(a, OpKind::parse("split,merge").unwrap());
        assert!("nope".parse::<OpKind>().is_err());
    }

    #[test]
    fn end_to_end_leader_region_admin() {
        let kind = OpKind::LEADER | OpKind::REGION | OpKind::ADMIN;

        assert_eq!(kind.to_string(), "leader,region,admin");
        assert_eq!(OpKind::parse("leader,region,admin").unwrap(), kind);
        assert_eq!(OpKind::parse("admin,leader,region").unwrap(), kind);
    }

    #[test]
    fn u32_conversions_keep_all_bits() {
        let raw = OP_MAX | OpKind::LEADER.bits();
        let kind = OpKind::from(raw);
        assert_eq!(u32::from(kind), raw);
    }

    #[test]
    fn serde_uses_canonical_string() {
        let kind = OpKind::MERGE | OpKind::ADJACENT;
        let json = serde_json::to_string(&kind).unwrap();

        assert_eq!(json, r#""adjacent,merge""#);
        let back: OpKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn serde_empty_kind_roundtrips() {
        let json = serde_json::to_string(&OpKind::default()).unwrap();
        assert_eq!(json, r#""unknown""#);

        let back: OpKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OpKind::empty());
        assert!(OpKind::parse("unknown").is_err());
    }

    #[test]
    fn serde_rejects_unknown_names() {
        let err = serde_json::from_str::<OpKind>(r#""leader,bogus""#).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }
}
