// Core structs: BankPromo and the per-source tags.
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Which bank adapter produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Bdo,
    Bpi,
    EastWest,
    ChinaBank,
}

impl Bank {
    pub fn as_str(self) -> &'static str {
        match self {
            Bank::Bdo => "bdo",
            Bank::Bpi => "bpi",
            Bank::EastWest => "eastwest",
            Bank::ChinaBank => "chinabank",
        }
    }

    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "bdo" => Some(Bank::Bdo),
            "bpi" => Some(Bank::Bpi),
            "eastwest" => Some(Bank::EastWest),
            "chinabank" => Some(Bank::ChinaBank),
            _ => None,
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified promo record. One scrape session shares a single `scrape_id`;
/// `promo_content` is the blank-line join of the non-empty text fragments of
/// the source record, in fixed field order.
#[derive(Debug, Clone, Serialize)]
pub struct BankPromo {
    pub scrape_id: String,
    pub bank_name: Bank,
    pub promo_url: Url,
    pub promo_content: String,
    pub scrape_date: NaiveDate,
}

/// Raw record shape discovered during catalog pagination. The two kinds need
/// different detail endpoints and different flattening logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Campaign,
    Reward,
}

impl ItemKind {
    /// Maps the API's `item_type` string; unrecognized types yield `None`
    /// and are dropped by the caller.
    pub fn from_item_type(s: &str) -> Option<Self> {
        match s {
            "Campaign" => Some(ItemKind::Campaign),
            "Reward::Campaign" => Some(ItemKind::Reward),
            _ => None,
        }
    }
}
