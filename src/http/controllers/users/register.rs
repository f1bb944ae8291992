use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use validator::Validate;

use crate::{
  schema::{AbstractUsers, InsertUser},
  types::form::users::register,
  util::password,
  App, Error,
};

#[tracing::instrument(skip(app))]
pub async fn register(
  app: web::Data<App>,
  form: Json<register::Request>,
) -> Result<HttpResponse, Error> {
  form.validate()?;

  let password_hash = password::hash(&form.password);
  let user = app
    .db
    .insert_user(InsertUser {
      name: &form.username,
      display_name: form.display_name.as_deref(),
      password_hash: &password_hash,
    })
    .await?;

  tracing::info!(user.id = %user.id, "registered a new user");
  Ok(HttpResponse::Created().json(register::Response {
    id: user.id,
    name: user.name,
  }))
}
