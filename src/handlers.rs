use crate::engine::Rejection;
use crate::errors::AppError;
use crate::models::{Ledger, PointsQuery, PointsResponse, RedeemedResponse};
use crate::state::{AppState, Store};
use crate::storage::persist_ledger;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::{Local, NaiveDateTime};
use tracing::{debug, error};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(&store.ledger.snapshot(&state.rules, now())))
}

pub async fn redeemed(State(state): State<AppState>) -> Json<RedeemedResponse> {
    let store = state.store.lock().await;
    Json(RedeemedResponse {
        items: store.ledger.redeemed(),
    })
}

/// Single query-style endpoint: `?action=checkin|clicker|redeem|reset`,
/// with `itemId` for `redeem`. Without an action it returns the current
/// snapshot and the catalog.
pub async fn points(
    State(state): State<AppState>,
    Query(query): Query<PointsQuery>,
) -> Result<Json<PointsResponse>, AppError> {
    let action = query
        .action
        .as_deref()
        .map(str::trim)
        .filter(|action| !action.is_empty());
    let now = now();
    let mut store = state.store.lock().await;
    let Store { ledger, dice } = &mut *store;
    let rules = state.rules.as_ref();

    let Some(action) = action else {
        let snapshot = ledger.snapshot(rules, now);
        let mut response = PointsResponse::new(true, "Current points and rewards.", snapshot);
        response.shop_items = Some(ledger.benefits.clone());
        return Ok(Json(response));
    };

    // Mutations run on a copy that only replaces the live ledger once it is
    // on disk, so a failed write leaves memory and file in agreement.
    let mut next = ledger.clone();
    let response = match action {
        "checkin" => match next.check_in(rules, now, &mut **dice) {
            Ok(result) => {
                let mut response =
                    PointsResponse::new(true, result.message(), next.snapshot(rules, now));
                response.awarded = Some(result.awarded);
                response.breakdown = Some(result.breakdown);
                response
            }
            Err(rejection) => return Ok(Json(rejected(rejection, ledger, &state, now))),
        },
        "clicker" => match next.claim_daily_bonus(rules, now, &mut **dice) {
            Ok(result) => {
                let mut response =
                    PointsResponse::new(true, result.message(), next.snapshot(rules, now));
                response.bonus = Some(result.bonus);
                response
            }
            Err(rejection) => return Ok(Json(rejected(rejection, ledger, &state, now))),
        },
        "redeem" => match parse_item_id(query.item_id.as_deref()) {
            Err(message) => {
                let response = PointsResponse::new(false, message, ledger.snapshot(rules, now));
                return Ok(Json(response));
            }
            Ok(item_id) => match next.redeem(item_id, &mut **dice) {
                Ok(result) => {
                    let mut response =
                        PointsResponse::new(true, result.message(), next.snapshot(rules, now));
                    response.code = Some(result.code);
                    response.benefit = Some(result.benefit);
                    response
                }
                Err(rejection) => return Ok(Json(rejected(rejection, ledger, &state, now))),
            },
        },
        "reset" => {
            next.reset();
            PointsResponse::new(
                true,
                "Points and streak have been reset.",
                next.snapshot(rules, now),
            )
        }
        other => {
            return Err(AppError::bad_request(format!(
                "action must be one of checkin, clicker, redeem, reset (got '{other}')"
            )));
        }
    };

    if let Err(err) = persist_ledger(&state.data_path, &next).await {
        error!("failed to save ledger, change discarded: {}", err.message);
        return Err(err);
    }
    *ledger = next;

    Ok(Json(response))
}

fn rejected(
    rejection: Rejection,
    ledger: &Ledger,
    state: &AppState,
    now: NaiveDateTime,
) -> PointsResponse {
    debug!(reason = rejection.reason(), "request rejected");
    let mut response = PointsResponse::new(
        false,
        rejection.to_string(),
        ledger.snapshot(&state.rules, now),
    );
    response.reason = Some(rejection.reason());
    if let Rejection::AlreadyClaimed { remaining } = &rejection {
        response.seconds_remaining = Some(remaining.num_seconds());
    }
    response
}

fn parse_item_id(raw: Option<&str>) -> Result<u32, &'static str> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty());
    match raw {
        None => Err("Missing itemId"),
        Some(raw) => raw.parse::<u32>().map_err(|_| "Invalid itemId"),
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
