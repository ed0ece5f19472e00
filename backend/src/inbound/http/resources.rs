//! Generic resource handlers shared by every entity.
//!
//! ```text
//! GET    /{collection}       list every record
//! POST   /{collection}       create, 201 {"id": "<new id>"}
//! GET    /{collection}/{id}  fetch one record
//! PUT    /{collection}/{id}  replace client-writable fields, 200 empty
//! DELETE /{collection}/{id}  delete, 200 empty
//! ```
//!
//! Handlers are instantiated once per entity via [`configure_resource`].

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

use super::ApiResult;
use super::auth::AuthGate;
use crate::domain::{Entity, Error, RecordId, ResourceService};

/// Response body for a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: RecordId,
}

/// Parse a path segment into a [`RecordId`], rejecting malformed input as a
/// bad request.
pub fn parse_record_id(raw: &str) -> ApiResult<RecordId> {
    RecordId::parse(raw).map_err(|err| Error::invalid_request(format!("invalid id: {err}")))
}

/// JSON extractor configuration turning decode failures into 400 responses.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(err.to_string()).into()
    })
}

/// List every record of `E`.
pub async fn list<E: Entity>(
    service: web::Data<ResourceService<E>>,
) -> ApiResult<web::Json<Vec<E>>> {
    let records = service.list().await?;
    Ok(web::Json(records))
}

/// Fetch the record addressed by the path.
pub async fn get<E: Entity>(
    service: web::Data<ResourceService<E>>,
    path: web::Path<String>,
) -> ApiResult<web::Json<E>> {
    let id = parse_record_id(&path)?;
    let record = service.get(&id).await?;
    Ok(web::Json(record))
}

/// Create a record from the request body.
pub async fn create<E: Entity>(
    service: web::Data<ResourceService<E>>,
    payload: web::Json<E>,
) -> ApiResult<HttpResponse> {
    let id = service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// Replace the client-writable fields of the record addressed by the path.
pub async fn update<E: Entity>(
    service: web::Data<ResourceService<E>>,
    path: web::Path<String>,
    payload: web::Json<E>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    service.update(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Delete the record addressed by the path.
pub async fn delete<E: Entity>(
    service: web::Data<ResourceService<E>>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    service.delete(&id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Mount the five routes for `E` under `/{E::COLLECTION}` behind `gate`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use marketplace::domain::{AllowAllAuthenticator, Client, ResourceService};
/// use marketplace::inbound::http::auth::AuthGate;
/// use marketplace::inbound::http::resources::configure_resource;
/// use marketplace::outbound::memory::InMemoryEntityRepository;
/// use mockable::DefaultClock;
///
/// let service: ResourceService<Client> = ResourceService::new(
///     Arc::new(InMemoryEntityRepository::default()),
///     Arc::new(DefaultClock),
/// );
/// let gate = AuthGate::new(Arc::new(AllowAllAuthenticator));
/// let _app = App::new().configure(|cfg| configure_resource(cfg, service, gate));
/// ```
pub fn configure_resource<E: Entity>(
    cfg: &mut web::ServiceConfig,
    service: ResourceService<E>,
    gate: AuthGate,
) {
    cfg.service(
        web::scope(&format!("/{}", E::COLLECTION))
            .app_data(web::Data::new(service))
            .app_data(json_config())
            .wrap(gate)
            .route("", web::get().to(list::<E>))
            .route("", web::post().to(create::<E>))
            .route("/{id}", web::get().to(get::<E>))
            .route("/{id}", web::put().to(update::<E>))
            .route("/{id}", web::delete().to(delete::<E>)),
    );
}
