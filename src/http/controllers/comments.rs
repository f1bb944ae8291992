use actix_web::{
  web::{self, Either, Form, Json, Query},
  HttpResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
  http::Actor,
  schema::AbstractComments,
  types::{
    form::{
      comments::{CommentPost, GetPostComments},
      Done,
    },
    id::{
      marker::{CommentMarker, PostMarker},
      Id,
    },
  },
  App, Error,
};

#[derive(Debug, Deserialize)]
pub struct PostPath {
  post_id: Id<PostMarker>,
}

#[derive(Debug, Deserialize)]
pub struct CommentPath {
  post_id: Id<PostMarker>,
  post_comment_id: Id<CommentMarker>,
}

#[tracing::instrument(skip(app))]
pub async fn list(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<PostPath>,
  query: Query<GetPostComments>,
) -> Result<HttpResponse, Error> {
  actor.get_user()?;
  query.validate()?;

  let comments = app
    .db
    .fetch_comments_for_post(path.post_id, query.max_id, query.limit())
    .await?;

  Ok(HttpResponse::Ok().json(comments))
}

#[tracing::instrument(skip(app))]
pub async fn create(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<PostPath>,
  form: Either<Json<CommentPost>, Form<CommentPost>>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let form = match form {
    Either::Left(Json(form)) | Either::Right(Form(form)) => form,
  };
  form.validate()?;

  let comment = app.db.comment_post(&user, path.post_id, &form.text).await?;
  Ok(HttpResponse::Ok().json(comment))
}

#[tracing::instrument(skip(app))]
pub async fn delete(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<CommentPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  app
    .db
    .delete_comment_for_post(&user, path.post_id, path.post_comment_id)
    .await?;

  Ok(HttpResponse::Ok().json(Done::default()))
}
