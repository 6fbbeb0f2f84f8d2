pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /streak/evaluate                 advance the daily streak (POST)
///
/// /points/award                    append a ledger event (POST)
/// /points/history                  recent ledger events (GET)
///
/// /achievements/check              unlock newly satisfied achievements (POST)
/// /achievements                    list unlocks (GET)
///
/// /alerts/dispatch                 run one dispatch pass (POST)
/// /alerts                          list a user's active watches (GET)
///
/// /rewards/catalog                 active redeemable rewards (GET)
/// /rewards/redeem                  redeem a reward (POST)
///
/// /referrals/generate-code         create or rotate a referral code (POST)
/// /referrals/apply                 apply someone's code (POST)
/// /referrals/stats                 code + referral counts (GET)
///
/// /notifications                   list (GET)
/// /notifications/{id}/read         mark one read (POST)
/// /notifications/read-all          mark all read (POST)
/// /notifications/unread-count      unread count (GET)
///
/// /users/{user_id}/stats           stats row (GET)
/// /leaderboard                     top users by points (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // -- Engagement --
        .route("/streak/evaluate", post(handlers::streak::evaluate))
        .route("/points/award", post(handlers::points::award))
        .route("/points/history", get(handlers::points::history))
        .route("/achievements/check", post(handlers::achievements::check))
        .route("/achievements", get(handlers::achievements::list))
        // -- Alerts --
        .route("/alerts/dispatch", post(handlers::alerts::dispatch))
        .route("/alerts", get(handlers::alerts::list))
        // -- Rewards --
        .route("/rewards/catalog", get(handlers::rewards::catalog))
        .route("/rewards/redeem", post(handlers::rewards::redeem))
        // -- Referrals --
        .route(
            "/referrals/generate-code",
            post(handlers::referrals::generate_code),
        )
        .route("/referrals/apply", post(handlers::referrals::apply))
        .route("/referrals/stats", get(handlers::referrals::stats))
        // -- Notifications --
        .route("/notifications", get(handlers::notifications::list))
        .route(
            "/notifications/{id}/read",
            post(handlers::notifications::mark_read),
        )
        .route(
            "/notifications/read-all",
            post(handlers::notifications::mark_all_read),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notifications::unread_count),
        )
        // -- Stats --
        .route("/users/{user_id}/stats", get(handlers::stats::get_stats))
        .route("/leaderboard", get(handlers::stats::leaderboard))
}
