//! Shared HTTP adapter state.
//!
//! Bundles one [`ResourceService`] per entity plus the authentication gate, so
//! the HTTP surface depends only on domain ports and stays testable without a
//! running store.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;

use super::auth::AuthGate;
use super::resources::configure_resource;
use crate::domain::ports::{EntityRepository, RequestAuthenticator};
use crate::domain::{Client, Freelancer, Invoice, Project, ResourceService, User};

/// Parameter object bundling the port implementations behind the HTTP
/// surface.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn EntityRepository<User>>,
    pub freelancers: Arc<dyn EntityRepository<Freelancer>>,
    pub clients: Arc<dyn EntityRepository<Client>>,
    pub projects: Arc<dyn EntityRepository<Project>>,
    pub invoices: Arc<dyn EntityRepository<Invoice>>,
    pub authenticator: Arc<dyn RequestAuthenticator>,
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: ResourceService<User>,
    pub freelancers: ResourceService<Freelancer>,
    pub clients: ResourceService<Client>,
    pub projects: ResourceService<Project>,
    pub invoices: ResourceService<Invoice>,
    pub authenticator: Arc<dyn RequestAuthenticator>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use marketplace::domain::AllowAllAuthenticator;
    /// use marketplace::inbound::http::state::{HttpState, HttpStatePorts};
    /// use marketplace::outbound::memory::InMemoryEntityRepository;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     users: Arc::new(InMemoryEntityRepository::default()),
    ///     freelancers: Arc::new(InMemoryEntityRepository::default()),
    ///     clients: Arc::new(InMemoryEntityRepository::default()),
    ///     projects: Arc::new(InMemoryEntityRepository::default()),
    ///     invoices: Arc::new(InMemoryEntityRepository::default()),
    ///     authenticator: Arc::new(AllowAllAuthenticator),
    ///     clock: Arc::new(DefaultClock),
    /// });
    /// let _clients = state.clients.clone();
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            freelancers,
            clients,
            projects,
            invoices,
            authenticator,
            clock,
        } = ports;
        Self {
            users: ResourceService::new(users, Arc::clone(&clock)),
            freelancers: ResourceService::new(freelancers, Arc::clone(&clock)),
            clients: ResourceService::new(clients, Arc::clone(&clock)),
            projects: ResourceService::new(projects, Arc::clone(&clock)),
            invoices: ResourceService::new(invoices, clock),
            authenticator,
        }
    }

    /// Register every resource scope, each behind the authentication gate.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let gate = AuthGate::new(Arc::clone(&self.authenticator));
        configure_resource(cfg, self.users.clone(), gate.clone());
        configure_resource(cfg, self.freelancers.clone(), gate.clone());
        configure_resource(cfg, self.clients.clone(), gate.clone());
        configure_resource(cfg, self.projects.clone(), gate.clone());
        configure_resource(cfg, self.invoices.clone(), gate);
    }
}
