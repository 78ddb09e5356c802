use std::fmt;

use pd_model::OpKind;

use crate::{error::CoreResult, filter::MatchMode};

/// Anything that carries an operator kind.
///
/// Operators set their kind once at construction; filters only read it.
pub trait Kinded {
    fn op_kind(&self) -> OpKind;
}

impl Kinded for OpKind {
    fn op_kind(&self) -> OpKind {
        *self
    }
}

impl<T: Kinded + ?Sized> Kinded for &T {
    fn op_kind(&self) -> OpKind {
        (**self).op_kind()
    }
}

/// Selects operators by the flags of their kind.
///
/// A filter either matches every operator, or requests a set of flags that are
/// tested against the operator kind according to its [`MatchMode`].
/// With an empty requested set, `Any` matches nothing and `All` matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindFilter {
    kinds: Option<OpKind>,
    mode: MatchMode,
}

impl KindFilter {
    /// A filter that matches every operator, including those of unknown kind.
    #[inline]
    pub const fn all() -> Self {
        Self {
            kinds: None,
            mode: MatchMode::Any,
        }
    }

    /// A filter over an already built kind.
    #[inline]
    pub const fn new(kinds: OpKind, mode: MatchMode) -> Self {
        Self {
            kinds: Some(kinds),
            mode,
        }
    }

    /// Builds a filter from a comma separated list of flag names.
    ///
    /// # Examples
    /// ```
    /// use pd_core::filter::{KindFilter, MatchMode};
    /// use pd_model::OpKind;
    ///
    /// let filter = KindFilter::parse("admin", MatchMode::Any).unwrap();
    /// assert!(filter.matches(OpKind::ADMIN | OpKind::LEADER));
    /// assert!(!filter.matches(OpKind::REPLICA));
    ///
    /// assert!(KindFilter::parse("admn", MatchMode::Any).is_err());
    /// ```
    pub fn parse(expr: &str, mode: MatchMode) -> CoreResult<Self> {
        let kinds = OpKind::parse(expr)?;
        Ok(Self::new(kinds, mode))
    }

    /// Requested flags, or `None` for a match-all filter.
    #[inline]
    pub fn kinds(&self) -> Option<OpKind> {
        self.kinds
    }

    #[inline]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    #[inline]
    pub fn is_match_all(&self) -> bool {
        self.kinds.is_none()
    }

    /// Tests an operator kind against this filter.
    pub fn matches(&self, kind: OpKind) -> bool {
        let Some(requested) = self.kinds else {
            return true;
        };

        let mut flags = requested.defined_flags();
        match self.mode {
            MatchMode::Any => flags.any(|flag| kind.has_flag(flag)),
            MatchMode::All => flags.all(|flag| kind.has_flag(flag)),
        }
    }

    /// Keeps the items whose kind passes this filter, preserving their order.
    pub fn apply<I>(self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
        I::Item: Kinded,
    {
        items
            .into_iter()
            .filter(move |item| self.matches(item.op_kind()))
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kinds {
            None => f.write_str("*"),
            Some(kinds) => write!(f, "{}:{}", self.mode, kinds),
        }
    }
}
