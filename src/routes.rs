use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    contact::{ContactRecord, is_automated, validate_contact},
    database::{CONTACT_COLLECTION, FEEDBACK_COLLECTION, get_database},
    error::AppError,
    feedback::{FeedbackRecord, validate_message},
    geo::{UNKNOWN_COUNTRY, lookup_country},
    search::find_leads,
    state::AppState,
};

pub async fn feedback_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    // Validation strictly precedes any external call.
    let message = validate_message(&body)?;

    let origin = client_address(&headers, peer);
    let country = match &origin {
        Some(address) => lookup_country(&state.http, &state.config.geo_endpoint, address).await,
        None => UNKNOWN_COUNTRY.to_string(),
    };

    let record = FeedbackRecord::new(message, origin, country);
    let db = get_database(&state.config).await?;
    let result = db
        .collection::<FeedbackRecord>(FEEDBACK_COLLECTION)
        .insert_one(&record)
        .await
        .map_err(AppError::internal)?;

    let id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_else(|| result.inserted_id.to_string());
    info!("Stored feedback {id}");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Feedback sent successfully", "id": id })),
    ))
}

pub async fn search_handler(Json(body): Json<Value>) -> Result<impl IntoResponse, AppError> {
    let query = match body.get("query").and_then(Value::as_str) {
        Some(query) if !query.is_empty() => query,
        _ => return Err(AppError::Validation("Query parameter is required".to_string())),
    };

    info!("Search request: {query:?}");
    let results = find_leads(query).await;

    Ok((StatusCode::OK, Json(json!({ "results": results }))))
}

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let sent = (
        StatusCode::OK,
        Json(json!({ "message": "Message sent successfully" })),
    );

    // Bots that filled the honeypot get a success response and no record.
    if is_automated(&body) {
        info!("Dropping automated contact submission");
        return Ok(sent);
    }

    let record = validate_contact(&body)?;
    let db = get_database(&state.config).await?;
    db.collection::<ContactRecord>(CONTACT_COLLECTION)
        .insert_one(&record)
        .await
        .map_err(AppError::internal)?;

    Ok(sent)
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Best guess at the caller's network origin: the first hop of
/// `x-forwarded-for` when a proxy supplied one, otherwise the peer address.
/// Loopback peers carry no useful origin.
fn client_address(headers: &HeaderMap, peer: SocketAddr) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }

    if peer.ip().is_loopback() {
        return None;
    }
    Some(peer.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer(addr: &str) -> SocketAddr {
        addr.parse().unwrap()
    }

    #[test]
    fn forwarded_header_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        let address = client_address(&headers, peer("127.0.0.1:443"));
        assert_eq!(address.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn peer_address_is_used_without_a_proxy() {
        let address = client_address(&HeaderMap::new(), peer("198.51.100.4:55100"));
        assert_eq!(address.as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn loopback_peer_yields_no_origin() {
        assert!(client_address(&HeaderMap::new(), peer("127.0.0.1:55100")).is_none());
    }
}
