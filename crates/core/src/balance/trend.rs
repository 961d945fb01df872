//! Balance trend classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::saturating_sum;

/// Months compared on each side of the trend.
const TREND_SPAN: usize = 3;

/// Direction of recent monthly balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Recent mean more than 10% above the prior mean.
    Up,
    /// Recent mean more than 10% below the prior mean.
    Down,
    /// Anything else, including windows with no prior months.
    Stable,
}

impl Trend {
    /// Compares the mean of the last 3 balances with the mean of the 3 before.
    ///
    /// `balances` are oldest first. Shorter windows use what is available;
    /// with no prior months the trend is [`Trend::Stable`].
    #[must_use]
    pub fn classify(balances: &[Decimal]) -> Self {
        let split = balances.len().saturating_sub(TREND_SPAN);
        let (before, recent) = balances.split_at(split);
        let prior = &before[before.len().saturating_sub(TREND_SPAN)..];

        let (Some(recent_mean), Some(prior_mean)) = (mean(recent), mean(prior)) else {
            return Self::Stable;
        };

        if recent_mean > prior_mean.saturating_mul(Decimal::new(11, 1)) {
            Self::Up
        } else if recent_mean < prior_mean.saturating_mul(Decimal::new(9, 1)) {
            Self::Down
        } else {
            Self::Stable
        }
    }

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    Some(saturating_sum(values.iter().copied()) / Decimal::from(values.len()))
}
