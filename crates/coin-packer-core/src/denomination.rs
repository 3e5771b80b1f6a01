use crate::error::CoinPackerError;
use crate::model::Shape;
use crate::pipeline::LayoutItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width-to-height ratio of the banknote.
pub const BILL_ASPECT: f64 = 2.5;

/// Coins and the banknote used by the game, keyed by value in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Denomination {
    Cent,
    Nickel,
    Dime,
    Quarter,
    HalfDollar,
    Dollar,
}

impl Denomination {
    pub const ALL: [Denomination; 6] = [
        Denomination::Cent,
        Denomination::Nickel,
        Denomination::Dime,
        Denomination::Quarter,
        Denomination::HalfDollar,
        Denomination::Dollar,
    ];

    pub fn cents(self) -> u32 {
        match self {
            Denomination::Cent => 1,
            Denomination::Nickel => 5,
            Denomination::Dime => 10,
            Denomination::Quarter => 25,
            Denomination::HalfDollar => 50,
            Denomination::Dollar => 100,
        }
    }

    pub fn from_cents(cents: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.cents() == cents)
    }

    /// Base diameter in layout units. For the bill this is its height.
    pub fn base_diameter(self) -> f64 {
        match self {
            Denomination::Cent => 30.0,
            Denomination::Nickel => 40.0,
            Denomination::Dime => 45.0,
            Denomination::Quarter => 55.0,
            Denomination::HalfDollar => 65.0,
            Denomination::Dollar => 70.0,
        }
    }

    pub fn is_bill(self) -> bool {
        matches!(self, Denomination::Dollar)
    }

    pub fn name(self) -> &'static str {
        match self {
            Denomination::Cent => "cent",
            Denomination::Nickel => "nickel",
            Denomination::Dime => "dime",
            Denomination::Quarter => "quarter",
            Denomination::HalfDollar => "half_dollar",
            Denomination::Dollar => "dollar",
        }
    }

    /// Shape at base size: a circle for coins, a 2.5:1 rectangle for the bill.
    pub fn shape(self) -> Shape {
        let d = self.base_diameter();
        if self.is_bill() {
            Shape::rectangle(d * BILL_ASPECT, d)
        } else {
            Shape::circle(d / 2.0)
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.cents()))
    }
}

impl From<Denomination> for u32 {
    fn from(d: Denomination) -> u32 {
        d.cents()
    }
}

impl TryFrom<u32> for Denomination {
    type Error = CoinPackerError;
    fn try_from(cents: u32) -> Result<Self, Self::Error> {
        Denomination::from_cents(cents)
            .ok_or_else(|| CoinPackerError::UnknownDenomination(cents.to_string()))
    }
}

impl FromStr for Denomination {
    type Err = CoinPackerError;
    /// Accepts cents (`25`, `25c`, `25¢`), dollars (`$1`, `$0.50`) or names (`quarter`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        let unknown = || CoinPackerError::UnknownDenomination(s.trim().to_string());

        match t.as_str() {
            "penny" => return Ok(Denomination::Cent),
            "half" => return Ok(Denomination::HalfDollar),
            "bill" => return Ok(Denomination::Dollar),
            _ => {}
        }
        if let Some(d) = Denomination::ALL.into_iter().find(|d| d.name() == t) {
            return Ok(d);
        }
        if let Some(dollars) = t.strip_prefix('$') {
            let value: f64 = dollars.parse().map_err(|_| unknown())?;
            let cents = (value * 100.0).round();
            if !(0.0..=u32::MAX as f64).contains(&cents) {
                return Err(unknown());
            }
            return Denomination::from_cents(cents as u32).ok_or_else(unknown);
        }
        let digits = t.trim_end_matches('c').trim_end_matches('¢');
        let cents: u32 = digits.parse().map_err(|_| unknown())?;
        Denomination::from_cents(cents).ok_or_else(unknown)
    }
}

/// Formats cents the way pile labels show them: `$1.05`, `45¢`.
pub fn format_amount(cents: u32) -> String {
    let dollars = cents / 100;
    let rest = cents % 100;
    if dollars > 0 {
        format!("${}.{:02}", dollars, rest)
    } else {
        format!("{}¢", rest)
    }
}

/// Sum of a pile's values in cents.
pub fn total_cents(values: &[Denomination]) -> u32 {
    values.iter().map(|d| d.cents()).sum()
}

/// Keyed layout items for a pile of coins and bills, keys like `quarter_0`.
pub fn coin_items(values: &[Denomination]) -> Vec<LayoutItem<String>> {
    values
        .iter()
        .enumerate()
        .map(|(i, d)| LayoutItem {
            key: format!("{}_{}", d.name(), i),
            shape: d.shape(),
        })
        .collect()
}
