//! Daily engagement streak arithmetic.
//!
//! A streak grows by exactly one per calendar day of activity, breaks after
//! a missed day, and pays a fixed bonus every seventh consecutive day. All
//! day arithmetic is UTC; callers truncate `Utc::now()` to a `NaiveDate`.

use chrono::NaiveDate;

/// Points paid when a streak reaches a multiple of seven days.
pub const WEEKLY_BONUS_POINTS: i32 = 50;

/// Streak length interval at which the bonus fires.
pub const BONUS_INTERVAL_DAYS: i32 = 7;

/// Result of advancing a user's streak to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakOutcome {
    pub current_streak: i32,
    pub longest_streak: i32,
    /// True when this advance crossed a bonus boundary. The bonus fires only
    /// on the day the streak increments into a multiple of
    /// [`BONUS_INTERVAL_DAYS`], so repeat evaluations on the same day never
    /// double-pay.
    pub bonus_awarded: bool,
}

/// Advance a streak from its stored state to `today`.
///
/// - No prior activity: the streak starts at 1.
/// - Same day (`days_since == 0`): no change, idempotent.
/// - Next day (`days_since == 1`): the streak grows by one.
/// - Gap (`days_since > 1`): the streak resets to 1.
///
/// A `last_activity_day` in the future (clock skew between evaluations) is
/// treated like a same-day call: nothing changes.
pub fn advance(
    last_activity_day: Option<NaiveDate>,
    today: NaiveDate,
    current_streak: i32,
    longest_streak: i32,
) -> StreakOutcome {
    let (current, incremented) = match last_activity_day {
        None => (1, true),
        Some(last) => {
            let days_since = (today - last).num_days();
            if days_since == 1 {
                (current_streak + 1, true)
            } else if days_since > 1 {
                (1, true)
            } else {
                (current_streak, false)
            }
        }
    };

    StreakOutcome {
        current_streak: current,
        longest_streak: longest_streak.max(current),
        bonus_awarded: incremented && current > 1 && current % BONUS_INTERVAL_DAYS == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    // -- first activity --

    #[test]
    fn first_activity_starts_streak_at_one() {
        let out = advance(None, day("2026-08-07"), 0, 0);
        assert_eq!(out.current_streak, 1);
        assert_eq!(out.longest_streak, 1);
        assert!(!out.bonus_awarded);
    }

    // -- same-day idempotence --

    #[test]
    fn same_day_evaluation_is_idempotent() {
        let today = day("2026-08-07");
        let first = advance(Some(day("2026-08-06")), today, 4, 9);
        let second = advance(Some(today), today, first.current_streak, first.longest_streak);
        assert_eq!(second.current_streak, first.current_streak);
        assert_eq!(second.longest_streak, first.longest_streak);
        assert!(!second.bonus_awarded);
    }

    #[test]
    fn same_day_does_not_repay_bonus_at_seven() {
        let today = day("2026-08-07");
        // Streak already sits at 7 from an earlier call today.
        let out = advance(Some(today), today, 7, 7);
        assert_eq!(out.current_streak, 7);
        assert!(!out.bonus_awarded);
    }

    // -- consecutive days --

    #[test]
    fn consecutive_day_increments() {
        let out = advance(Some(day("2026-08-06")), day("2026-08-07"), 3, 5);
        assert_eq!(out.current_streak, 4);
        assert_eq!(out.longest_streak, 5);
    }

    #[test]
    fn longest_streak_tracks_new_record() {
        let out = advance(Some(day("2026-08-06")), day("2026-08-07"), 5, 5);
        assert_eq!(out.current_streak, 6);
        assert_eq!(out.longest_streak, 6);
    }

    // -- broken streaks --

    #[test]
    fn gap_resets_streak_to_one() {
        // Last activity three days ago with a 5-day streak.
        let out = advance(Some(day("2026-08-04")), day("2026-08-07"), 5, 5);
        assert_eq!(out.current_streak, 1);
        assert_eq!(out.longest_streak, 5);
        assert!(!out.bonus_awarded);
    }

    #[test]
    fn longest_streak_never_decreases() {
        let mut current = 0;
        let mut longest = 0;
        let days = [
            "2026-08-01",
            "2026-08-02",
            "2026-08-03",
            "2026-08-06", // gap
            "2026-08-07",
        ];
        let mut last: Option<NaiveDate> = None;
        let mut prev_longest = 0;
        for d in days {
            let today = day(d);
            let out = advance(last, today, current, longest);
            assert!(out.longest_streak >= prev_longest);
            assert!(out.longest_streak >= out.current_streak);
            prev_longest = out.longest_streak;
            current = out.current_streak;
            longest = out.longest_streak;
            last = Some(today);
        }
        assert_eq!(current, 2);
        assert_eq!(longest, 3);
    }

    // -- weekly bonus --

    #[test]
    fn bonus_fires_when_streak_reaches_seven() {
        let out = advance(Some(day("2026-08-06")), day("2026-08-07"), 6, 6);
        assert_eq!(out.current_streak, 7);
        assert!(out.bonus_awarded);
    }

    #[test]
    fn bonus_does_not_fire_at_eight() {
        let out = advance(Some(day("2026-08-06")), day("2026-08-07"), 7, 7);
        assert_eq!(out.current_streak, 8);
        assert!(!out.bonus_awarded);
    }

    #[test]
    fn bonus_fires_again_at_fourteen() {
        let out = advance(Some(day("2026-08-06")), day("2026-08-07"), 13, 13);
        assert_eq!(out.current_streak, 14);
        assert!(out.bonus_awarded);
    }

    #[test]
    fn reset_to_one_never_pays_bonus() {
        // A fresh start is a length-1 streak, below the bonus floor.
        let out = advance(Some(day("2026-07-01")), day("2026-08-07"), 21, 21);
        assert_eq!(out.current_streak, 1);
        assert!(!out.bonus_awarded);
    }

    // -- clock skew --

    #[test]
    fn future_last_activity_changes_nothing() {
        let out = advance(Some(day("2026-08-08")), day("2026-08-07"), 3, 4);
        assert_eq!(out.current_streak, 3);
        assert_eq!(out.longest_streak, 4);
        assert!(!out.bonus_awarded);
    }
}
