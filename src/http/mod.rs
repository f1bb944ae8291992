use actix_web::{web, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use crate::App;

pub mod actor;
pub mod controllers;
pub mod extract;
pub mod jwt;

pub use actor::Actor;
pub use jwt::Jwt;

#[derive(Debug, Error)]
#[error("Failed to run the HTTP server")]
pub struct ServeError;

/// Registers the app state, extractor configurations
/// and every route.
pub fn configure(app: App) -> impl FnOnce(&mut web::ServiceConfig) {
  move |cfg| {
    cfg
      .app_data(web::Data::new(app))
      .app_data(extract::json_config())
      .app_data(extract::path_config())
      .app_data(extract::query_config())
      .configure(controllers::configure);
  }
}

#[tracing::instrument(skip_all)]
pub async fn serve(app: App) -> Result<(), ServeError> {
  let http = &app.config.http;
  let address = (http.ip, http.port);
  let workers = http.workers;

  tracing::info!("listening on {}:{}", address.0, address.1);

  let factory = move || {
    actix_web::App::new()
      .wrap(TracingLogger::default())
      .configure(configure(app.clone()))
  };

  HttpServer::new(factory)
    .workers(workers)
    .bind(address)
    .change_context(ServeError)
    .attach_printable_lazy(|| format!("could not bind to {}:{}", address.0, address.1))?
    .run()
    .await
    .change_context(ServeError)
}
