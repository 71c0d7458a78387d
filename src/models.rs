use crate::engine::is_valid_code;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_USERNAME: &str = "demo_user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub id: u32,
    pub title: String,
    pub cost: u64,
    #[serde(default)]
    pub redeemed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Benefit {
    pub fn new(id: u32, title: impl Into<String>, cost: u64) -> Self {
        Self {
            id,
            title: title.into(),
            cost,
            redeemed: false,
            code: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default = "default_username")]
    pub username: String,
    pub total_points: u64,
    pub day_streak: u32,
    #[serde(default)]
    pub last_checkin_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_clicker_date: Option<NaiveDate>,
    #[serde(default = "default_catalog")]
    pub benefits: Vec<Benefit>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_username(DEFAULT_USERNAME)
    }
}

impl Ledger {
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            total_points: 0,
            day_streak: 0,
            last_checkin_date: None,
            last_clicker_date: None,
            benefits: default_catalog(),
        }
    }

    pub fn benefit(&self, id: u32) -> Option<&Benefit> {
        self.benefits.iter().find(|benefit| benefit.id == id)
    }

    /// Checks the structural invariants a persisted ledger must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = BTreeSet::new();
        for benefit in &self.benefits {
            if !seen.insert(benefit.id) {
                return Err(format!("duplicate benefit id {}", benefit.id));
            }
            if benefit.cost == 0 {
                return Err(format!("benefit {} has zero cost", benefit.id));
            }
            if benefit.redeemed != benefit.code.is_some() {
                return Err(format!(
                    "benefit {} redemption flag does not match its code",
                    benefit.id
                ));
            }
            if let Some(code) = &benefit.code {
                if !is_valid_code(code) {
                    return Err(format!("benefit {} has a malformed code", benefit.id));
                }
            }
        }
        Ok(())
    }
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

pub fn default_catalog() -> Vec<Benefit> {
    vec![
        Benefit::new(1, "Free Coffee or Tea at a Local Cafe", 300),
        Benefit::new(2, "Fresh Pastry or Doughnut", 300),
        Benefit::new(3, "10-20% Discount at a Restaurant or Salad Bar", 350),
        Benefit::new(4, "Voucher for Smoothie or Freshly Squeezed Juice", 350),
        Benefit::new(5, "Cinema Ticket for a Selected Movie", 700),
        Benefit::new(6, "Lunch Voucher at a Nearby Restaurant", 700),
        Benefit::new(7, "One-day Gym/Fitness Class Entry", 1000),
        Benefit::new(8, "Shopping Gift Card", 1000),
        Benefit::new(9, "Voucher for Audiobook or Ebook", 700),
        Benefit::new(10, "Monthly Gym/Fitness Club Membership", 3000),
        Benefit::new(11, "Language Course or Development Workshop", 4000),
        Benefit::new(12, "Dinner Voucher for Two at a Restaurant", 4500),
        Benefit::new(13, "Concert or Cultural Event Tickets", 4500),
    ]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsQuery {
    pub action: Option<String>,
    pub item_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub username: String,
    pub total_points: u64,
    pub day_streak: u32,
    pub last_checkin_date: Option<NaiveDate>,
    pub last_clicker_date: Option<NaiveDate>,
    pub checked_in_today: bool,
    pub clicker_available: bool,
    pub seconds_until_midnight: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub base: u64,
    pub streak_bonus: u64,
    pub daily_drop: u64,
    pub friday_bonus: u64,
}

impl Breakdown {
    pub fn total(&self) -> u64 {
        self.base
            .saturating_add(self.streak_bonus)
            .saturating_add(self.daily_drop)
            .saturating_add(self.friday_bonus)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsResponse {
    pub success: bool,
    pub message: String,
    pub user_data: UserSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_items: Option<Vec<Benefit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awarded: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit: Option<Benefit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_remaining: Option<i64>,
}

impl PointsResponse {
    pub fn new(success: bool, message: impl Into<String>, user_data: UserSnapshot) -> Self {
        Self {
            success,
            message: message.into(),
            user_data,
            shop_items: None,
            awarded: None,
            breakdown: None,
            bonus: None,
            code: None,
            benefit: None,
            reason: None,
            seconds_remaining: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RedeemedResponse {
    pub items: Vec<Benefit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ledger_is_valid_and_empty() {
        let ledger = Ledger::default();
        assert_eq!(ledger.total_points, 0);
        assert_eq!(ledger.day_streak, 0);
        assert!(ledger.last_checkin_date.is_none());
        assert_eq!(ledger.benefits.len(), 13);
        assert!(ledger.validate().is_ok());
    }

    #[test]
    fn validate_rejects_code_without_redemption() {
        let mut ledger = Ledger::default();
        ledger.benefits[0].code = Some("ABCD1234".into());
        assert!(ledger.validate().is_err());

        let mut ledger = Ledger::default();
        ledger.benefits[1].redeemed = true;
        assert!(ledger.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_codes() {
        for bad in ["x", "abcd1234", "ABCD123", "ABCD12345", "ABCD-234"] {
            let mut ledger = Ledger::default();
            ledger.benefits[0].redeemed = true;
            ledger.benefits[0].code = Some(bad.into());
            assert!(ledger.validate().is_err(), "accepted {bad:?}");
        }

        let mut ledger = Ledger::default();
        ledger.benefits[0].redeemed = true;
        ledger.benefits[0].code = Some("AB12CD34".into());
        assert!(ledger.validate().is_ok());
    }

    #[test]
    fn breakdown_total_saturates() {
        let breakdown = Breakdown {
            base: u64::MAX,
            streak_bonus: 5,
            daily_drop: 12,
            friday_bonus: 10,
        };
        assert_eq!(breakdown.total(), u64::MAX);
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut ledger = Ledger::default();
        ledger.benefits.push(Benefit::new(1, "Copy", 10));
        assert!(ledger.validate().is_err());
    }

    #[test]
    fn persisted_keys_are_camel_case() {
        let mut ledger = Ledger::default();
        ledger.last_checkin_date = NaiveDate::from_ymd_opt(2026, 1, 5);
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["totalPoints"], 0);
        assert_eq!(json["dayStreak"], 0);
        assert_eq!(json["lastCheckinDate"], "2026-01-05");
        assert!(json["benefits"][0].get("code").is_none());
    }

    #[test]
    fn minimal_record_fills_defaults() {
        let ledger: Ledger =
            serde_json::from_str(r#"{"totalPoints": 40, "dayStreak": 2}"#).unwrap();
        assert_eq!(ledger.total_points, 40);
        assert_eq!(ledger.username, DEFAULT_USERNAME);
        assert_eq!(ledger.benefits, default_catalog());
    }
}
