//! Trip expense aggregation
//!
//! Amounts are kept per category and summed on demand. Input is forgiving:
//! anything that doesn't start with a number counts as zero, so a total can
//! always be shown. The currency is only a display symbol; no conversion
//! ever happens.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Result, WanderLensError};

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// Fixed set of expense categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Accommodation,
    Food,
    Transport,
    Activities,
    Shopping,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Accommodation,
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Activities,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ExpenseCategory::Accommodation => "accommodation",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Activities => "activities",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Other => "other",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Accommodation => "Accommodation",
            ExpenseCategory::Food => "Food & Dining",
            ExpenseCategory::Transport => "Transportation",
            ExpenseCategory::Activities => "Activities & Tours",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = WanderLensError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| WanderLensError::validation(format!("Unknown expense category: {s}")))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
    Aud,
    Cad,
}

impl Currency {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Inr => "INR",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Inr => "₹",
            Currency::Aud => "A$",
            Currency::Cad => "C$",
        }
    }

    /// Symbol-prefixed amount; yen has no minor unit
    #[must_use]
    pub fn format(self, amount: f64) -> String {
        match self {
            Currency::Jpy => format!("{}{:.0}", self.symbol(), amount),
            _ => format!("{}{:.2}", self.symbol(), amount),
        }
    }
}

impl FromStr for Currency {
    type Err = WanderLensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            "INR" => Ok(Currency::Inr),
            "AUD" => Ok(Currency::Aud),
            "CAD" => Ok(Currency::Cad),
            other => Err(WanderLensError::validation(format!(
                "Unsupported currency: {other}"
            ))),
        }
    }
}

/// Parse the leading number of `raw`; anything unusable is 0
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    LEADING_NUMBER
        .find(raw)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Running per-category amounts for one trip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseTracker {
    currency: Currency,
    amounts: BTreeMap<ExpenseCategory, f64>,
}

impl ExpenseTracker {
    #[must_use]
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            amounts: BTreeMap::new(),
        }
    }

    /// Build a tracker from raw form fields keyed by category id
    pub fn from_raw_entries(currency: Currency, entries: &HashMap<String, String>) -> Result<Self> {
        let mut tracker = Self::new(currency);
        for (id, raw) in entries {
            let category: ExpenseCategory = id.parse()?;
            tracker.set_amount(category, raw);
        }
        Ok(tracker)
    }

    /// Replace the amount for a category; returns the value stored
    pub fn set_amount(&mut self, category: ExpenseCategory, raw: &str) -> f64 {
        let amount = parse_amount(raw);
        self.amounts.insert(category, amount);
        amount
    }

    /// Amount for a category; untouched categories are 0
    #[must_use]
    pub fn amount(&self, category: ExpenseCategory) -> f64 {
        self.amounts.get(&category).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Only the symbol changes
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    #[must_use]
    pub fn summary(&self) -> ExpenseSummary {
        let lines = self
            .amounts
            .iter()
            .map(|(&category, &amount)| ExpenseLine {
                category,
                label: category.label().to_string(),
                amount,
                formatted: self.currency.format(amount),
            })
            .collect();
        let total = self.total();

        ExpenseSummary {
            currency: self.currency,
            symbol: self.currency.symbol().to_string(),
            lines,
            total,
            formatted_total: self.currency.format(total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLine {
    pub category: ExpenseCategory,
    pub label: String,
    pub amount: f64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub currency: Currency,
    pub symbol: String,
    pub lines: Vec<ExpenseLine>,
    pub total: f64,
    pub formatted_total: String,
}
