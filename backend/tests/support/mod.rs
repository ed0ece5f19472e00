//! Shared helpers for the resource endpoint integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module builds the application over in-memory repositories so every test
//! starts from an empty store.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use marketplace::domain::ports::{RequestAuthenticator, StoreHealth};
use marketplace::domain::{AllowAllAuthenticator, Client};
use marketplace::inbound::http::health::HealthState;
use marketplace::inbound::http::state::{HttpState, HttpStatePorts};
use marketplace::outbound::memory::InMemoryEntityRepository;
use marketplace::server::{AppDependencies, build_app};
use marketplace::test_support::{MutableClock, UnavailableStore};

/// Instant the fixture clock starts at.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Fully wired application under test.
pub struct TestApp {
    pub clock: Arc<MutableClock>,
    deps: AppDependencies,
}

impl TestApp {
    /// Empty in-memory store, every request let through.
    pub fn in_memory() -> Self {
        Self::in_memory_with(Arc::new(AllowAllAuthenticator))
    }

    /// Empty in-memory store behind `authenticator`.
    pub fn in_memory_with(authenticator: Arc<dyn RequestAuthenticator>) -> Self {
        let clock = Arc::new(MutableClock::new(fixture_now()));
        let ports = HttpStatePorts {
            users: Arc::new(InMemoryEntityRepository::default()),
            freelancers: Arc::new(InMemoryEntityRepository::default()),
            clients: Arc::new(InMemoryEntityRepository::default()),
            projects: Arc::new(InMemoryEntityRepository::default()),
            invoices: Arc::new(InMemoryEntityRepository::default()),
            authenticator,
            clock: clock.clone(),
        };
        let store: Arc<dyn StoreHealth> = Arc::new(InMemoryEntityRepository::<Client>::default());
        Self::assemble(clock, ports, store)
    }

    /// Every store call fails as if the server were unreachable.
    pub fn unavailable() -> Self {
        let clock = Arc::new(MutableClock::new(fixture_now()));
        let ports = HttpStatePorts {
            users: Arc::new(UnavailableStore),
            freelancers: Arc::new(UnavailableStore),
            clients: Arc::new(UnavailableStore),
            projects: Arc::new(UnavailableStore),
            invoices: Arc::new(UnavailableStore),
            authenticator: Arc::new(AllowAllAuthenticator),
            clock: clock.clone(),
        };
        Self::assemble(clock, ports, Arc::new(UnavailableStore))
    }

    fn assemble(
        clock: Arc<MutableClock>,
        ports: HttpStatePorts,
        store: Arc<dyn StoreHealth>,
    ) -> Self {
        let health_state = web::Data::new(HealthState::new(store));
        health_state.mark_ready();
        Self {
            clock,
            deps: AppDependencies {
                health_state,
                http_state: HttpState::new(ports),
            },
        }
    }

    /// Build the Actix application for `actix_web::test::init_service`.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        build_app(self.deps.clone())
    }
}

/// Drop the fields the server owns so bodies can be compared with input.
pub fn without_server_fields(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        for key in ["id", "createdAt", "updatedAt"] {
            object.remove(key);
        }
    }
    body
}
