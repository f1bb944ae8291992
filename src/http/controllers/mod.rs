use actix_web::web;

pub mod comments;
pub mod communities;
pub mod posts;
pub mod reports;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::scope("/users")
        .service(web::resource("/@{name}").route(web::get().to(users::profile)))
        .route("/login", web::post().to(users::login))
        .route("/register", web::post().to(users::register)),
    )
    .service(
      web::scope("/communities")
        .route("", web::put().to(communities::create))
        .route("/{name}/moderators", web::put().to(communities::add_moderator)),
    )
    .service(
      web::scope("/posts")
        .route("", web::put().to(posts::create))
        .service(
          web::resource("/{post_id}/comments")
            .route(web::get().to(comments::list))
            .route(web::put().to(comments::create)),
        )
        .route(
          "/{post_id}/comments/{post_comment_id}",
          web::delete().to(comments::delete),
        )
        .service(
          web::resource("/{post_uuid}")
            .route(web::get().to(posts::get))
            .route(web::delete().to(posts::delete)),
        ),
    )
    .service(reports::scope());
}
