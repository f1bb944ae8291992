//! Entities of the application and the operations that can be
//! performed on them.
//!
//! Every entity has an `Abstract*` trait listing its operations which
//! are implemented by both [`PgDb`] and [`ReferenceDb`]. Permission
//! checks shared by both drivers live in [`rules`].
pub(crate) mod comment;
pub(crate) mod community;
pub(crate) mod post;
mod report;
mod user;

pub mod rules;

pub use comment::*;
pub use community::*;
pub use post::*;
pub use report::*;
pub use user::*;

use crate::database::{Database, PgDb, ReferenceDb};

pub trait AbstractDatabase:
  Sync
  + Send
  + comment::AbstractComments
  + community::AbstractCommunities
  + post::AbstractPosts
  + report::AbstractReports
  + user::AbstractUsers
{
}

impl AbstractDatabase for ReferenceDb {}
impl AbstractDatabase for PgDb {}

impl std::ops::Deref for Database {
  type Target = dyn AbstractDatabase;

  fn deref(&self) -> &Self::Target {
    match &self {
      Database::Reference(dummy) => dummy,
      Database::Postgres(pg) => pg,
    }
  }
}
