use anyhow::bail;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

/// Represents a non-negative sales amount.
///
/// Amounts are whole numbers. Parsing accepts ASCII digits only (surrounding
/// whitespace is ignored), so signs, decimal points and thousands separators
/// are all rejected.
///
/// A single amount fits in a `u64`; sums are held in a `u128`, so adding up
/// any realistic number of amounts cannot overflow.
#[derive(
    Clone, Copy, Default, DeserializeFromStr, SerializeDisplay, Eq, PartialEq, Ord, PartialOrd,
)]
pub struct Sales(u128);

impl Sales {
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount as u128)
    }

    #[must_use]
    pub const fn get(self) -> u128 {
        self.0
    }
}

impl Debug for Sales {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Sales {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for Sales {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            bail!("sales must be a non-negative whole number, got {s:?}");
        }
        Ok(Self::new(digits.parse()?))
    }
}

impl From<u64> for Sales {
    fn from(amount: u64) -> Self {
        Self::new(amount)
    }
}

impl Add for Sales {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Sales {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Sales {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
