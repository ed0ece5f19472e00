//! Health endpoints: liveness and readiness probes for orchestrators.
//!
//! Probes sit outside the authentication gate and are never cached.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::warn;

use crate::domain::ports::StoreHealth;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    store: Arc<dyn StoreHealth>,
}

impl HealthState {
    /// Create a state that is live but not yet ready, probing `store` once
    /// ready.
    #[must_use]
    pub fn new(store: Arc<dyn StoreHealth>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            store,
        }
    }

    /// Mark start-up as complete.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks from now on, e.g. while draining for shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Ready and the store answers a ping.
    pub async fn check_ready(&self) -> bool {
        if !self.is_ready() {
            return false;
        }
        match self.store.ping().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "readiness probe failed to reach the store");
                false
            }
        }
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. 200 once started and the store is reachable, 503
/// otherwise.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.check_ready().await)
}

/// Liveness probe. 200 while the process is marked alive, 503 once draining.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{EntityPersistenceError, MockStoreHealth};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    fn reachable_store() -> MockStoreHealth {
        let mut store = MockStoreHealth::new();
        store.expect_ping().returning(|| Ok(()));
        store
    }

    fn unreachable_store() -> MockStoreHealth {
        let mut store = MockStoreHealth::new();
        store
            .expect_ping()
            .returning(|| Err(EntityPersistenceError::connection("no route to host")));
        store
    }

    async fn probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>) {
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(ready)
                .service(live),
        )
        .await;
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        let cache_control = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (res.status(), cache_control)
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_once_marked_and_store_reachable() {
        let state = web::Data::new(HealthState::new(Arc::new(reachable_store())));
        state.mark_ready();
        let (status, cache_control) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
    }

    #[rstest]
    #[actix_web::test]
    async fn not_ready_before_start_up_completes() {
        let mut store = MockStoreHealth::new();
        store.expect_ping().never();
        let state = web::Data::new(HealthState::new(Arc::new(store)));
        let (status, _) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[rstest]
    #[actix_web::test]
    async fn not_ready_when_store_unreachable() {
        let state = web::Data::new(HealthState::new(Arc::new(unreachable_store())));
        state.mark_ready();
        let (status, cache_control) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
    }

    #[rstest]
    #[case(true, StatusCode::OK)]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn liveness_follows_drain_flag(#[case] alive: bool, #[case] expected: StatusCode) {
        let state = web::Data::new(HealthState::new(Arc::new(unreachable_store())));
        if !alive {
            state.mark_unhealthy();
        }
        let (status, _) = probe(state, "/health/live").await;
        assert_eq!(status, expected);
    }
}
