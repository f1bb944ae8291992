use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
  http::Actor,
  schema::{AbstractPosts, InsertPost},
  types::form::{posts::CreatePost, Done},
  App, Error,
};

#[tracing::instrument(skip(app))]
pub async fn create(
  app: web::Data<App>,
  actor: Actor,
  form: Json<CreatePost>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let post = InsertPost {
    text: &form.text,
    community_name: form.community_name.as_deref(),
    comments_enabled: form.comments_enabled,
  };
  let post = app.db.insert_post(&user, post).await?;
  Ok(HttpResponse::Created().json(post))
}

#[tracing::instrument(skip(app))]
pub async fn get(app: web::Data<App>, path: web::Path<Uuid>) -> Result<HttpResponse, Error> {
  let post = app
    .db
    .fetch_post_by_uuid(*path)
    .await?
    .ok_or_else(|| Error::not_found("Unknown post"))?;

  Ok(HttpResponse::Ok().json(post))
}

#[tracing::instrument(skip(app))]
pub async fn delete(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  app.db.delete_post(&user, *path).await?;
  Ok(HttpResponse::Ok().json(Done::default()))
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};
  use serde_json::{json, Value};

  use crate::test_utils;

  #[actix_web::test]
  async fn should_create_and_delete_posts() {
    let app = test_utils::app();
    let alice = test_utils::session(&app, "alice").await;
    let bob = test_utils::session(&app, "bob").await;
    let service = test_utils::init_service!(app);

    let req = test::TestRequest::put()
      .uri("/posts")
      .insert_header(alice.bearer())
      .set_json(json!({ "text": "Hello, World!" }))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let post: Value = test::read_body_json(res).await;
    assert_eq!(post["comments_enabled"], true);
    let uri = format!("/posts/{}", post["uuid"].as_str().unwrap());

    let req = test::TestRequest::get().uri(&uri).to_request();
    let fetched: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(fetched, post);

    let req = test::TestRequest::delete()
      .uri(&uri)
      .insert_header(bob.bearer())
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
      .uri(&uri)
      .insert_header(alice.bearer())
      .to_request();
    let response: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(response, json!({ "message": "Done!" }));

    let req = test::TestRequest::get().uri(&uri).to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
  }

  #[actix_web::test]
  async fn should_reject_malformed_requests() {
    let app = test_utils::app();
    let alice = test_utils::session(&app, "alice").await;
    let service = test_utils::init_service!(app);

    let req = test::TestRequest::get().uri("/posts/not-a-uuid").to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let response: Value = test::read_body_json(res).await;
    assert_eq!(response["code"], "invalid_request");

    let req = test::TestRequest::put()
      .uri("/posts")
      .insert_header(alice.bearer())
      .set_json(json!({ "text": 42 }))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
      .uri("/posts")
      .set_json(json!({ "text": "Hello" }))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
  }
}
