use actix_web::{
  web::{self, Json},
  HttpResponse, Scope,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
  http::Actor,
  schema::{AbstractPosts, AbstractReports},
  types::{
    form::reports::CreateReport,
    id::{
      marker::{CommentMarker, CommentReportMarker, PostReportMarker},
      Id,
    },
  },
  App, Error,
};

pub fn scope() -> Scope {
  web::scope("/reports")
    .route("/categories", web::get().to(categories))
    .route("/posts", web::get().to(reported_posts))
    .route("/me", web::get().to(my_reports))
    .service(
      web::resource("/posts/{post_uuid}")
        .route(web::put().to(report_post))
        .route(web::get().to(post_reports)),
    )
    .route(
      "/posts/{post_uuid}/{report_id}/confirm",
      web::post().to(confirm_post_report),
    )
    .route(
      "/posts/{post_uuid}/{report_id}/reject",
      web::post().to(reject_post_report),
    )
    .service(
      web::resource("/posts/{post_uuid}/comments/{post_comment_id}")
        .route(web::put().to(report_comment))
        .route(web::get().to(comment_reports)),
    )
    .route(
      "/posts/{post_uuid}/comments/{post_comment_id}/{report_id}/confirm",
      web::post().to(confirm_comment_report),
    )
    .route(
      "/posts/{post_uuid}/comments/{post_comment_id}/{report_id}/reject",
      web::post().to(reject_comment_report),
    )
    .route(
      "/communities/{community_name}/posts",
      web::get().to(community_reported_posts),
    )
    .route(
      "/communities/{community_name}/comments",
      web::get().to(community_reported_comments),
    )
}

#[derive(Debug, Deserialize)]
pub struct PostPath {
  post_uuid: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct PostReportPath {
  post_uuid: Uuid,
  report_id: Id<PostReportMarker>,
}

#[derive(Debug, Deserialize)]
pub struct CommentPath {
  post_uuid: Uuid,
  post_comment_id: Id<CommentMarker>,
}

#[derive(Debug, Deserialize)]
pub struct CommentReportPath {
  post_uuid: Uuid,
  post_comment_id: Id<CommentMarker>,
  report_id: Id<CommentReportMarker>,
}

#[derive(Debug, Deserialize)]
pub struct CommunityPath {
  community_name: String,
}

#[tracing::instrument(skip(app))]
pub async fn categories(app: web::Data<App>, actor: Actor) -> Result<HttpResponse, Error> {
  actor.get_user()?;
  let categories = app.db.fetch_report_categories().await?;
  Ok(HttpResponse::Ok().json(categories))
}

#[tracing::instrument(skip(app))]
pub async fn reported_posts(app: web::Data<App>, actor: Actor) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let posts = app.db.fetch_reported_posts(&user).await?;
  Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(skip(app))]
pub async fn my_reports(app: web::Data<App>, actor: Actor) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let reports = app.db.fetch_reports_by_user(&user).await?;
  Ok(HttpResponse::Ok().json(reports))
}

#[tracing::instrument(skip(app))]
pub async fn report_post(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<PostPath>,
  form: Json<CreateReport>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let post_id = app.db.fetch_post_id_by_uuid(path.post_uuid).await?;
  let report = app
    .db
    .report_post(&user, post_id, &form.category_name, form.comment.as_deref())
    .await?;

  Ok(HttpResponse::Created().json(report))
}

#[tracing::instrument(skip(app))]
pub async fn post_reports(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<PostPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let post_id = app.db.fetch_post_id_by_uuid(path.post_uuid).await?;
  let reports = app.db.fetch_reports_for_post(&user, post_id).await?;
  Ok(HttpResponse::Ok().json(reports))
}

#[tracing::instrument(skip(app))]
pub async fn confirm_post_report(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<PostReportPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let post_id = app.db.fetch_post_id_by_uuid(path.post_uuid).await?;
  let report = app
    .db
    .confirm_post_report(&user, post_id, path.report_id)
    .await?;

  Ok(HttpResponse::Ok().json(report))
}

#[tracing::instrument(skip(app))]
pub async fn reject_post_report(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<PostReportPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let post_id = app.db.fetch_post_id_by_uuid(path.post_uuid).await?;
  let report = app
    .db
    .reject_post_report(&user, post_id, path.report_id)
    .await?;

  Ok(HttpResponse::Ok().json(report))
}

#[tracing::instrument(skip(app))]
pub async fn report_comment(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<CommentPath>,
  form: Json<CreateReport>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let post_id = app.db.fetch_post_id_by_uuid(path.post_uuid).await?;
  let report = app
    .db
    .report_comment(
      &user,
      post_id,
      path.post_comment_id,
      &form.category_name,
      form.comment.as_deref(),
    )
    .await?;

  Ok(HttpResponse::Created().json(report))
}

#[tracing::instrument(skip(app))]
pub async fn comment_reports(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<CommentPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let post_id = app.db.fetch_post_id_by_uuid(path.post_uuid).await?;
  let reports = app
    .db
    .fetch_reports_for_comment(&user, post_id, path.post_comment_id)
    .await?;

  Ok(HttpResponse::Ok().json(reports))
}

#[tracing::instrument(skip(app))]
pub async fn confirm_comment_report(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<CommentReportPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let post_id = app.db.fetch_post_id_by_uuid(path.post_uuid).await?;
  let report = app
    .db
    .confirm_comment_report(&user, post_id, path.post_comment_id, path.report_id)
    .await?;

  Ok(HttpResponse::Ok().json(report))
}

#[tracing::instrument(skip(app))]
pub async fn reject_comment_report(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<CommentReportPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let post_id = app.db.fetch_post_id_by_uuid(path.post_uuid).await?;
  let report = app
    .db
    .reject_comment_report(&user, post_id, path.post_comment_id, path.report_id)
    .await?;

  Ok(HttpResponse::Ok().json(report))
}

#[tracing::instrument(skip(app))]
pub async fn community_reported_posts(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<CommunityPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let posts = app
    .db
    .fetch_reported_posts_for_community(&user, &path.community_name)
    .await?;

  Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(skip(app))]
pub async fn community_reported_comments(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<CommunityPath>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let comments = app
    .db
    .fetch_reported_comments_for_community(&user, &path.community_name)
    .await?;

  Ok(HttpResponse::Ok().json(comments))
}
