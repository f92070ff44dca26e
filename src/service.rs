//! Read-only HTTP query service over a [`SnapshotStore`].
//!
//! Routes:
//!
//! - `GET /`, `GET /health`: readiness and number of records held
//! - `GET /predict`: the most recent record (last row of the last file in discovery order)
//! - `GET /records`: the full collection, in the export format

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};
use warp::{Filter, Rejection, Reply};

use crate::store::SnapshotStore;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    ready: bool,
    rows_loaded: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// All service routes.
pub fn routes(
    store: Arc<SnapshotStore>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path::end()
        .or(warp::path!("health"))
        .unify()
        .and(warp::get())
        .and(with_store(store.clone()))
        .map(health_reply);

    let predict = warp::path!("predict")
        .and(warp::get())
        .and(with_store(store.clone()))
        .map(predict_reply);

    let records = warp::path!("records")
        .and(warp::get())
        .and(with_store(store))
        .map(records_reply);

    health.or(predict).or(records)
}

/// Serve `routes` on `addr` until `shutdown` resolves.
pub async fn serve(
    store: Arc<SnapshotStore>,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) {
    let (bound, server) = warp::serve(routes(store)).bind_with_graceful_shutdown(addr, shutdown);
    tracing::info!(addr = %bound, "query service listening");
    server.await;
    tracing::info!("query service stopped");
}

fn with_store(
    store: Arc<SnapshotStore>,
) -> impl Filter<Extract = (Arc<SnapshotStore>,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn health_reply(store: Arc<SnapshotStore>) -> Json {
    let health = store.health();
    warp::reply::json(&HealthResponse {
        status: "API running",
        ready: health.ready,
        rows_loaded: health.rows_loaded,
    })
}

fn predict_reply(store: Arc<SnapshotStore>) -> WithStatus<Json> {
    let Some(collection) = store.snapshot() else {
        return not_ready();
    };
    match collection.latest() {
        Some(latest) => warp::reply::with_status(warp::reply::json(&latest), StatusCode::OK),
        None => warp::reply::with_status(
            warp::reply::json(&ErrorResponse {
                error: "No valid data found",
            }),
            StatusCode::NOT_FOUND,
        ),
    }
}

fn records_reply(store: Arc<SnapshotStore>) -> WithStatus<Json> {
    match store.snapshot() {
        Some(collection) => {
            warp::reply::with_status(warp::reply::json(collection.as_ref()), StatusCode::OK)
        }
        None => not_ready(),
    }
}

fn not_ready() -> WithStatus<Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: "Data not loaded",
        }),
        StatusCode::SERVICE_UNAVAILABLE,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warp::http::StatusCode;

    use super::routes;
    use crate::processing::classify_row;
    use crate::store::SnapshotStore;
    use crate::types::{MarkerSet, RecordCollection};

    fn loaded_store() -> Arc<SnapshotStore> {
        Arc::new(SnapshotStore::with_collection(RecordCollection::new(
            MarkerSet::default(),
            vec![
                classify_row([Some(0.0), Some(15.0), Some(30.0)]),
                classify_row([Some(5.0), None, None]),
            ],
        )))
    }

    async fn get(store: Arc<SnapshotStore>, path: &str) -> (StatusCode, serde_json::Value) {
        let res = warp::test::request()
            .method("GET")
            .path(path)
            .reply(&routes(store))
            .await;
        let body = serde_json::from_slice(res.body()).unwrap();
        (res.status(), body)
    }

    #[tokio::test]
    async fn health_reports_rows_loaded() {
        let (status, body) = get(loaded_store(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"status": "API running", "ready": true, "rows_loaded": 2})
        );

        let (status, _) = get(loaded_store(), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn predict_returns_last_record() {
        let (status, body) = get(loaded_store(), "/predict").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "UL1": 5.0, "UL2": null, "UL3": null,
                "UL1_status": "InUse", "UL2_status": null, "UL3_status": null
            })
        );
    }

    #[tokio::test]
    async fn predict_on_empty_collection_is_not_found() {
        let store = Arc::new(SnapshotStore::with_collection(RecordCollection::empty(
            MarkerSet::default(),
        )));
        let (status, body) = get(store, "/predict").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "No valid data found"}));
    }

    #[tokio::test]
    async fn unpopulated_store_is_unavailable() {
        let store = Arc::new(SnapshotStore::new());
        let (status, body) = get(store.clone(), "/predict").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, serde_json::json!({"error": "Data not loaded"}));

        let (status, body) = get(store, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn records_returns_full_collection() {
        let (status, body) = get(loaded_store(), "/records").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["UL3_status"], serde_json::json!("Occupied"));
    }
}
