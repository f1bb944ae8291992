use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::Jwt,
  schema::AbstractUsers,
  types::{self, form::users::login},
  util::password,
  App, Error,
};

fn invalid_credentials() -> Error {
  Error::new(types::Error::invalid_field(
    "username",
    "invalid_credentials",
    "Invalid credentials",
  ))
}

#[tracing::instrument(skip(app))]
pub async fn login(app: web::Data<App>, form: Json<login::Request>) -> Result<HttpResponse, Error> {
  form.validate()?;

  let user = app
    .db
    .fetch_user_by_name(&form.username)
    .await?
    .ok_or_else(invalid_credentials)?;

  if !password::verify(&form.password, &user.password_hash) {
    return Err(invalid_credentials());
  }

  let token = Jwt::encode(user.id, &app)?;
  Ok(HttpResponse::Ok().json(login::Response {
    id: user.id,
    token: token.into(),
  }))
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};
  use serde_json::{json, Value};

  use crate::{http::Jwt, test_utils};

  #[actix_web::test]
  async fn should_issue_tokens() {
    let app = test_utils::app();
    let alice = test_utils::user(&*app.db, "alice").await;
    let service = test_utils::init_service!(app);

    let req = test::TestRequest::post()
      .uri("/users/login")
      .set_json(json!({ "username": "alice", "password": test_utils::PASSWORD }))
      .to_request();

    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let response: Value = test::read_body_json(res).await;
    assert_eq!(response["id"], alice.id.to_string());

    let token = response["token"].as_str().unwrap();
    assert_eq!(Jwt::decode(token, &app).unwrap().user_id, alice.id);
  }

  #[actix_web::test]
  async fn should_reject_wrong_credentials() {
    let app = test_utils::app();
    test_utils::user(&*app.db, "alice").await;
    let service = test_utils::init_service!(app);

    for (username, password) in [("alice", "not_the_password"), ("bob", test_utils::PASSWORD)] {
      let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();

      let res = test::call_service(&service, req).await;
      assert_eq!(res.status(), StatusCode::BAD_REQUEST);

      let response: Value = test::read_body_json(res).await;
      assert_eq!(response["data"]["username"][0]["code"], "invalid_credentials");
    }
  }
}
