use actix_web::{web, HttpResponse};

use crate::{
  http::Actor,
  schema::AbstractUsers,
  types::form::users::Profile,
  App, Error,
};

#[tracing::instrument(skip(app))]
pub async fn profile(
  app: web::Data<App>,
  path: web::Path<String>,
  actor: Actor,
) -> Result<HttpResponse, Error> {
  let user = if path.as_str() == "me" {
    actor.get_user()?
  } else {
    app
      .db
      .fetch_user_by_name(path.as_str())
      .await?
      .ok_or_else(|| Error::not_found("Unknown user"))?
  };

  Ok(HttpResponse::Ok().json(Profile::from(user)))
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};
  use serde_json::Value;

  use crate::test_utils;

  #[actix_web::test]
  async fn should_show_profiles() {
    let app = test_utils::app();
    let alice = test_utils::session(&app, "alice").await;
    test_utils::user(&*app.db, "bob").await;
    let service = test_utils::init_service!(app);

    let req = test::TestRequest::get()
      .uri("/users/@me")
      .insert_header(alice.bearer())
      .to_request();
    let response: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(response["name"], "alice");
    assert!(response.get("password_hash").is_none());

    let req = test::TestRequest::get().uri("/users/@bob").to_request();
    let response: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(response["name"], "bob");

    let req = test::TestRequest::get().uri("/users/@carol").to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/users/@me").to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
  }

  #[actix_web::test]
  async fn should_reject_invalid_tokens() {
    let app = test_utils::app();
    let service = test_utils::init_service!(app);

    let req = test::TestRequest::get()
      .uri("/users/@me")
      .insert_header(("Authorization", "Bearer not.a.token"))
      .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
  }
}
