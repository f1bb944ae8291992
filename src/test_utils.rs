use std::num::NonZeroU64;

use crate::{
  config,
  database::{Database, ReferenceDb},
  http::Jwt,
  schema::{
    AbstractCommunities, AbstractDatabase, AbstractPosts, AbstractUsers, Community,
    InsertCommunity, InsertPost, InsertUser, Post, User,
  },
  util::password,
  App,
};

/// Password of every user made by [`user`].
pub const PASSWORD: &str = "correct_horse_battery";

/// Builds an [`actix_web`] test service with every route of `$app`.
macro_rules! init_service {
  ($app:expr) => {
    actix_web::test::init_service(
      actix_web::App::new().configure($crate::http::configure($app.clone())),
    )
    .await
  };
}
pub(crate) use init_service;

pub fn config() -> config::Server {
  config::Server {
    db: None,
    jwt_secret: "this_is_a_test_secret".into(),
    token_ttl_secs: NonZeroU64::new(3600).unwrap(),
    http: config::Http::default(),
    logging: config::Logging::default(),
  }
}

/// App backed by an empty in-memory database.
pub fn app() -> App {
  App::with_database(config(), Database::Reference(ReferenceDb::default()))
}

pub async fn user(db: &dyn AbstractDatabase, name: &str) -> User {
  let password_hash = password::hash(PASSWORD);
  let user = InsertUser {
    name,
    display_name: None,
    password_hash: &password_hash,
  };
  db.insert_user(user).await.unwrap()
}

pub async fn staff(db: &dyn AbstractDatabase, name: &str) -> User {
  user(db, name).await;
  db.set_user_staff(name, true).await.unwrap()
}

pub async fn community(db: &dyn AbstractDatabase, creator: &User, name: &str) -> Community {
  let community = InsertCommunity { name, title: name };
  db.insert_community(creator, community).await.unwrap()
}

pub async fn post(db: &dyn AbstractDatabase, creator: &User, community: Option<&str>) -> Post {
  post_with(db, creator, community, true).await
}

pub async fn post_with(
  db: &dyn AbstractDatabase,
  creator: &User,
  community: Option<&str>,
  comments_enabled: bool,
) -> Post {
  let post = InsertPost {
    text: "Hello, World!",
    community_name: community,
    comments_enabled,
  };
  db.insert_post(creator, post).await.unwrap()
}

/// A registered user with a valid session token.
pub struct Session {
  pub user: User,
  pub token: String,
}

impl Session {
  pub fn bearer(&self) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", self.token))
  }
}

pub async fn session(app: &App, name: &str) -> Session {
  let user = user(&*app.db, name).await;
  let token = Jwt::encode(user.id, app).unwrap();
  Session { user, token }
}

pub async fn staff_session(app: &App, name: &str) -> Session {
  let user = staff(&*app.db, name).await;
  let token = Jwt::encode(user.id, app).unwrap();
  Session { user, token }
}
