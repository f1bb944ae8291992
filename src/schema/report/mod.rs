use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::types::id::{
  marker::{CategoryMarker, CommentMarker, CommentReportMarker, PostMarker, PostReportMarker, UserMarker},
  Id,
};

mod ops;
pub use ops::AbstractReports;

/// Resolution state of a report. A report starts as pending and
/// can be resolved only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
pub enum ReportStatus {
  Pending,
  Confirmed,
  Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
  Confirm,
  Reject,
}

impl Resolution {
  #[must_use]
  pub const fn status(self) -> ReportStatus {
    match self {
      Self::Confirm => ReportStatus::Confirmed,
      Self::Reject => ReportStatus::Rejected,
    }
  }
}

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct ReportCategory {
  pub id: Id<CategoryMarker>,
  pub name: String,
  pub title: String,
  pub description: String,
}

impl ReportCategory {
  /// Categories every instance starts with. Postgres databases get
  /// the same rows from the migrations.
  #[must_use]
  pub fn defaults() -> Vec<Self> {
    const DEFAULTS: &[(&str, &str, &str)] = &[
      ("spam", "Spam", "Unsolicited advertising or repetitive content"),
      ("abuse", "Abuse", "Harassment, bullying or threats against someone"),
      ("hate_speech", "Hate speech", "Attacks against people based on who they are"),
      ("misinformation", "Misinformation", "False or misleading information"),
      ("violence", "Violence", "Graphic violence or incitement to violence"),
      ("pornography", "Pornography", "Sexually explicit content"),
      ("other", "Other", "Something else that breaks the rules"),
    ];

    DEFAULTS
      .iter()
      .zip(1..)
      .map(|((name, title, description), id)| Self {
        id: Id::new(id),
        name: (*name).to_string(),
        title: (*title).to_string(),
        description: (*description).to_string(),
      })
      .collect()
  }
}

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct PostReport {
  pub id: Id<PostReportMarker>,
  pub created_at: NaiveDateTime,
  pub post_id: Id<PostMarker>,
  pub reporter_id: Id<UserMarker>,
  pub category_name: String,
  pub comment: Option<String>,
  pub status: ReportStatus,
  pub resolver_id: Option<Id<UserMarker>>,
  pub resolved_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct PostCommentReport {
  pub id: Id<CommentReportMarker>,
  pub created_at: NaiveDateTime,
  pub post_comment_id: Id<CommentMarker>,
  pub reporter_id: Id<UserMarker>,
  pub category_name: String,
  pub comment: Option<String>,
  pub status: ReportStatus,
  pub resolver_id: Option<Id<UserMarker>>,
  pub resolved_at: Option<NaiveDateTime>,
}
