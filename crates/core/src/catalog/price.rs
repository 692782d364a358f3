//! Course Prices

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, USD},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency every catalog price is expressed in.
pub const CATALOG_CURRENCY: &Currency = USD;

/// Label used for courses that cost nothing.
pub const FREE_LABEL: &str = "Free";

/// Errors parsing or combining prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Neither "Free" nor a `$` prefixed amount.
    #[error("Expected \"Free\" or a \"$\" prefixed amount, got: {0}")]
    InvalidFormat(String),

    /// Amount after the `$` is not a decimal number.
    #[error("Invalid price amount: {0}")]
    InvalidAmount(String),

    /// Amount is below zero.
    #[error("Price cannot be negative: {0}")]
    Negative(String),

    /// Price arithmetic overflowed.
    #[error("Price arithmetic overflowed")]
    Overflow,
}

/// Price of a course as shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CoursePrice {
    /// No charge.
    Free,

    /// Paid course, in [`CATALOG_CURRENCY`].
    Paid(Money<'static, Currency>),
}

impl CoursePrice {
    /// Paid price from minor units (cents).
    pub fn from_minor(minor_units: i64) -> Self {
        Self::Paid(Money::from_minor(minor_units, CATALOG_CURRENCY))
    }

    /// Price in minor units; free courses are zero.
    pub fn minor_units(&self) -> i64 {
        match self {
            Self::Free => 0,
            Self::Paid(money) => money.to_minor_units(),
        }
    }

    /// Whether this course costs nothing.
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Price of `quantity` units, in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the multiplication overflows.
    pub fn times(&self, quantity: u32) -> Result<i64, PriceError> {
        self.minor_units()
            .checked_mul(i64::from(quantity))
            .ok_or(PriceError::Overflow)
    }
}

impl FromStr for CoursePrice {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed == FREE_LABEL {
            return Ok(Self::Free);
        }

        let amount = trimmed
            .strip_prefix('$')
            .ok_or_else(|| PriceError::InvalidFormat(s.to_string()))?
            .parse::<Decimal>()
            .map_err(|_err| PriceError::InvalidAmount(s.to_string()))?;

        if amount.is_sign_negative() {
            return Err(PriceError::Negative(s.to_string()));
        }

        let minor_units = amount
            .checked_mul(Decimal::new(100, 0))
            .and_then(|value| value.round_dp(0).to_i64())
            .ok_or_else(|| PriceError::InvalidAmount(s.to_string()))?;

        Ok(Self::from_minor(minor_units))
    }
}

impl TryFrom<String> for CoursePrice {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CoursePrice> for String {
    fn from(value: CoursePrice) -> Self {
        value.to_string()
    }
}

impl Display for CoursePrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Free => f.write_str(FREE_LABEL),
            Self::Paid(money) => f.write_str(&format_price(
                money.to_minor_units(),
                money.currency().iso_alpha_code,
            )),
        }
    }
}

/// Format a minor-unit amount into a currency string.
pub fn format_price(minor_units: i64, currency_code: &str) -> String {
    let abs_minor = minor_units.unsigned_abs();
    let major_units = abs_minor / 100;
    let fractional = abs_minor % 100;
    let sign = if minor_units < 0 { "-" } else { "" };
    let symbol = match currency_code {
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };

    if symbol.is_empty() {
        format!("{sign}{major_units}.{fractional:02} {currency_code}")
    } else {
        format!("{sign}{symbol}{major_units}.{fractional:02}")
    }
}
