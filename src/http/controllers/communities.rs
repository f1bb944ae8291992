use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::Actor,
  schema::{AbstractCommunities, InsertCommunity},
  types::form::communities::{AddModerator, CreateCommunity},
  App, Error,
};

#[tracing::instrument(skip(app))]
pub async fn create(
  app: web::Data<App>,
  actor: Actor,
  form: Json<CreateCommunity>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let community = InsertCommunity {
    name: &form.name,
    title: form.title.trim(),
  };
  let community = app.db.insert_community(&user, community).await?;
  Ok(HttpResponse::Created().json(community))
}

#[tracing::instrument(skip(app))]
pub async fn add_moderator(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<String>,
  form: Json<AddModerator>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let moderator = app
    .db
    .add_community_moderator(&user, &path, &form.username)
    .await?;

  Ok(HttpResponse::Created().json(moderator))
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};
  use serde_json::{json, Value};

  use crate::test_utils;

  #[actix_web::test]
  async fn should_manage_moderators() {
    let app = test_utils::app();
    let alice = test_utils::session(&app, "alice").await;
    let bob = test_utils::session(&app, "bob").await;
    test_utils::user(&*app.db, "carol").await;
    let service = test_utils::init_service!(app);

    let req = test::TestRequest::put()
      .uri("/communities")
      .insert_header(alice.bearer())
      .set_json(json!({ "name": "rust", "title": "Rust" }))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let community: Value = test::read_body_json(res).await;
    assert_eq!(community["creator_id"], alice.user.id.to_string());

    let req = test::TestRequest::put()
      .uri("/communities")
      .insert_header(bob.bearer())
      .set_json(json!({ "name": "rust", "title": "Rust again" }))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
      .uri("/communities/rust/moderators")
      .insert_header(bob.bearer())
      .set_json(json!({ "username": "carol" }))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
      .uri("/communities/rust/moderators")
      .insert_header(alice.bearer())
      .set_json(json!({ "username": "carol" }))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let moderator: Value = test::read_body_json(res).await;
    assert_eq!(moderator["is_administrator"], false);

    let req = test::TestRequest::put()
      .uri("/communities/rust/moderators")
      .insert_header(alice.bearer())
      .set_json(json!({ "username": "carol" }))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
  }
}
