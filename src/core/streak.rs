//! Consecutive-day activity streak, measured in calendar days of one
//! reference timezone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    config::EngineConfig,
    errors::LedgerError,
    ledger::{calendar_day, UserActivityState},
};

/// Bonus settings applied after each qualifying day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakRules {
    /// The streak must be strictly longer than this to earn the bonus.
    pub bonus_threshold: u32,
    pub bonus_points: u64,
}

impl Default for StreakRules {
    fn default() -> Self {
        Self {
            bonus_threshold: 10,
            bonus_points: 10,
        }
    }
}

/// What a call to [`StreakTracker::record_activity`] did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Activity was already recorded for today.
    Unchanged,
    /// First activity ever.
    Started,
    /// Activity on the day after the last active day.
    Extended,
    /// Activity after a gap; the streak is back to 1.
    Reset,
}

#[derive(Debug, Clone)]
pub struct StreakTracker {
    tz: Tz,
    rules: StreakRules,
}

impl StreakTracker {
    pub fn new(tz: Tz, rules: StreakRules) -> Self {
        Self { tz, rules }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, LedgerError> {
        Ok(Self::new(
            config.timezone()?,
            StreakRules {
                bonus_threshold: config.streak_bonus_threshold,
                bonus_points: config.streak_bonus_points,
            },
        ))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Calendar day of `now` in the reference timezone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        calendar_day(now, self.tz)
    }

    /// Records one qualifying event at `now`.
    ///
    /// Repeated calls on the same calendar day are no-ops. A day that directly
    /// follows the last active day extends the streak; any other difference
    /// restarts it at 1.
    pub fn record_activity(
        &self,
        user: &mut UserActivityState,
        now: DateTime<Utc>,
    ) -> StreakChange {
        let today = self.today(now);
        if user.last_active_date == Some(today) {
            return StreakChange::Unchanged;
        }

        let change = match user.last_active_date {
            None => {
                user.streak = 1;
                StreakChange::Started
            }
            Some(last) => {
                let gap = (today - last).num_days();
                if gap < 0 {
                    tracing::warn!(
                        %last,
                        %today,
                        "last active day is later than today; restarting streak"
                    );
                }
                if gap == 1 {
                    user.streak += 1;
                    StreakChange::Extended
                } else {
                    user.streak = 1;
                    StreakChange::Reset
                }
            }
        };

        user.last_active_date = Some(today);
        user.active_dates.insert(today);

        if user.streak > self.rules.bonus_threshold {
            user.points += self.rules.bonus_points;
        }

        tracing::debug!(streak = user.streak, points = user.points, ?change, "activity recorded");
        change
    }
}

/// Streak counters and active days for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreakState {
    pub streak: u32,
    pub points: u64,
    pub last_active_date: Option<NaiveDate>,
    pub active_dates: Vec<NaiveDate>,
}

impl From<&UserActivityState> for StreakState {
    fn from(user: &UserActivityState) -> Self {
        Self {
            streak: user.streak,
            points: user.points,
            last_active_date: user.last_active_date,
            active_dates: user.active_dates.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub active: bool,
    pub today: bool,
}

/// One month of days, laid out for a Sunday-first grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreakCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st (Sunday = 0).
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Builds the calendar for `year`/`month`, or `None` for an invalid month.
pub fn month_calendar(
    user: &UserActivityState,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<StreakCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| CalendarDay {
            day: date.day(),
            date,
            active: user.was_active_on(date),
            today: date == today,
        })
        .collect();

    Some(StreakCalendar {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
