use std::fmt::{Debug, Formatter};

use derive_more::{Display, From, FromStr};
use serde::{Deserialize, Serialize};

/// Whole percentage, used for the battery state of charge and everything measured against it.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Display,
    From,
    FromStr,
    Serialize,
    Deserialize,
)]
#[display("{_0}%")]
pub struct Percent(pub u16);

impl Percent {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl Debug for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
