//! Check-in, daily bonus, redemption and reset rules applied to a [`Ledger`].
//!
//! Every operation validates first and mutates last, so a rejected call
//! leaves the ledger exactly as it was.

use crate::clock;
use crate::dice::Dice;
use crate::models::{Benefit, Breakdown, Ledger, UserSnapshot};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::{debug, info};

const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const CODE_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub base_points: u64,
    pub streak_multiplier: u64,
    pub daily_drop: RangeInclusive<u32>,
    pub friday_bonus: u64,
    pub clicker_bonus: RangeInclusive<u32>,
    pub clicker_requires_checkin: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            base_points: 10,
            streak_multiplier: 5,
            daily_drop: 5..=20,
            friday_bonus: 10,
            clicker_bonus: 5..=15,
            clicker_requires_checkin: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("You have already checked in today!")]
    AlreadyCheckedIn { date: NaiveDate },
    #[error("Check in first to unlock today's bonus.")]
    CheckInRequired,
    #[error("You have already used the clicker today. Next bonus in {}.", format_remaining(.remaining))]
    AlreadyClaimed { remaining: Duration },
    #[error("Invalid item {id}.")]
    NotFound { id: u32 },
    #[error("Item {id} was already redeemed with code {code}.")]
    AlreadyRedeemed { id: u32, code: String },
    #[error("Not enough points: {required} needed, {available} available.")]
    InsufficientPoints { required: u64, available: u64 },
}

impl Rejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::AlreadyCheckedIn { .. } => "already_checked_in",
            Rejection::CheckInRequired => "check_in_required",
            Rejection::AlreadyClaimed { .. } => "already_claimed",
            Rejection::NotFound { .. } => "not_found",
            Rejection::AlreadyRedeemed { .. } => "already_redeemed",
            Rejection::InsufficientPoints { .. } => "insufficient_points",
        }
    }
}

/// Renders a countdown as `HH:MM:SS`.
pub fn format_remaining(remaining: &Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub awarded: u64,
    pub breakdown: Breakdown,
    pub day_streak: u32,
    pub total_points: u64,
}

impl CheckIn {
    pub fn message(&self) -> String {
        let b = &self.breakdown;
        let friday = if b.friday_bonus > 0 {
            format!(", Friday Bonus: {}", b.friday_bonus)
        } else {
            String::new()
        };
        format!(
            "Checked in! +{} points (Base: {}, Streak: {}, Daily Drop: {}{friday}).",
            self.awarded, b.base, b.streak_bonus, b.daily_drop
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBonus {
    pub bonus: u64,
    pub total_points: u64,
}

impl DailyBonus {
    pub fn message(&self) -> String {
        format!("Clicker used! You earned {} bonus points.", self.bonus)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    pub code: String,
    pub benefit: Benefit,
    pub total_points: u64,
}

impl Redemption {
    pub fn message(&self) -> String {
        format!(
            "You redeemed {} for {} points. Your code: {}",
            self.benefit.title, self.benefit.cost, self.code
        )
    }
}

impl Ledger {
    pub fn check_in<D: Dice + ?Sized>(
        &mut self,
        rules: &Rules,
        now: NaiveDateTime,
        dice: &mut D,
    ) -> Result<CheckIn, Rejection> {
        let today = clock::today(now);
        if self.last_checkin_date == Some(today) {
            debug!(%today, "check-in rejected, already credited");
            return Err(Rejection::AlreadyCheckedIn { date: today });
        }

        let streak = if self.last_checkin_date == Some(clock::yesterday(now)) {
            self.day_streak.saturating_add(1)
        } else {
            1
        };

        let breakdown = Breakdown {
            base: rules.base_points,
            streak_bonus: u64::from(streak) * rules.streak_multiplier,
            daily_drop: u64::from(dice.roll(rules.daily_drop.clone())),
            friday_bonus: if clock::is_friday(now) {
                rules.friday_bonus
            } else {
                0
            },
        };
        let awarded = breakdown.total();

        self.total_points = self.total_points.saturating_add(awarded);
        self.day_streak = streak;
        self.last_checkin_date = Some(today);

        info!(awarded, streak, total = self.total_points, "check-in credited");
        Ok(CheckIn {
            awarded,
            breakdown,
            day_streak: streak,
            total_points: self.total_points,
        })
    }

    pub fn claim_daily_bonus<D: Dice + ?Sized>(
        &mut self,
        rules: &Rules,
        now: NaiveDateTime,
        dice: &mut D,
    ) -> Result<DailyBonus, Rejection> {
        let today = clock::today(now);
        if rules.clicker_requires_checkin && self.last_checkin_date != Some(today) {
            debug!(%today, "daily bonus rejected, no check-in today");
            return Err(Rejection::CheckInRequired);
        }
        if self.last_clicker_date == Some(today) {
            debug!(%today, "daily bonus rejected, already claimed");
            return Err(Rejection::AlreadyClaimed {
                remaining: clock::until_midnight(now),
            });
        }

        let bonus = u64::from(dice.roll(rules.clicker_bonus.clone()));
        self.total_points = self.total_points.saturating_add(bonus);
        self.last_clicker_date = Some(today);

        info!(bonus, total = self.total_points, "daily bonus credited");
        Ok(DailyBonus {
            bonus,
            total_points: self.total_points,
        })
    }

    pub fn redeem<D: Dice + ?Sized>(
        &mut self,
        benefit_id: u32,
        dice: &mut D,
    ) -> Result<Redemption, Rejection> {
        let available = self.total_points;
        let benefit = self
            .benefits
            .iter_mut()
            .find(|benefit| benefit.id == benefit_id)
            .ok_or(Rejection::NotFound { id: benefit_id })?;

        if benefit.redeemed {
            return Err(Rejection::AlreadyRedeemed {
                id: benefit.id,
                code: benefit.code.clone().unwrap_or_default(),
            });
        }
        if available < benefit.cost {
            return Err(Rejection::InsufficientPoints {
                required: benefit.cost,
                available,
            });
        }

        let code = generate_code(dice);
        benefit.redeemed = true;
        benefit.code = Some(code.clone());
        let benefit = benefit.clone();
        self.total_points = available - benefit.cost;

        info!(benefit_id, cost = benefit.cost, total = self.total_points, "benefit redeemed");
        Ok(Redemption {
            code,
            benefit,
            total_points: self.total_points,
        })
    }

    /// Restores points, streak, dates and redemption state to their defaults.
    /// The catalog itself and the username are kept.
    pub fn reset(&mut self) {
        self.total_points = 0;
        self.day_streak = 0;
        self.last_checkin_date = None;
        self.last_clicker_date = None;
        for benefit in &mut self.benefits {
            benefit.redeemed = false;
            benefit.code = None;
        }
        info!("ledger reset");
    }

    pub fn snapshot(&self, rules: &Rules, now: NaiveDateTime) -> UserSnapshot {
        let today = clock::today(now);
        let checked_in_today = self.last_checkin_date == Some(today);
        let clicker_available = self.last_clicker_date != Some(today)
            && (checked_in_today || !rules.clicker_requires_checkin);

        UserSnapshot {
            username: self.username.clone(),
            total_points: self.total_points,
            day_streak: self.day_streak,
            last_checkin_date: self.last_checkin_date,
            last_clicker_date: self.last_clicker_date,
            checked_in_today,
            clicker_available,
            seconds_until_midnight: clock::until_midnight(now).num_seconds(),
        }
    }

    pub fn redeemed(&self) -> Vec<Benefit> {
        self.benefits
            .iter()
            .filter(|benefit| benefit.redeemed)
            .cloned()
            .collect()
    }
}

/// True for codes of the shape `generate_code` produces.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

fn generate_code<D: Dice + ?Sized>(dice: &mut D) -> String {
    let last = (CODE_ALPHABET.len() - 1) as u32;
    (0..CODE_LENGTH)
        .map(|_| char::from(CODE_ALPHABET[dice.roll(0..=last) as usize]))
        .collect()
}
