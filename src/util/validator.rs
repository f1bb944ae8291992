use error_stack::Report;
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

/// Flattens [`ValidationErrors`] into printable attachments
/// of a report so that every failing field shows up in the
/// logs as `path.to.field: message`.
pub trait IntoValidatorReport<T> {
  fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidationErrors> {
  fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
    self.map_err(|v| {
      let mut queue = Vec::new();
      let report = Report::new(Wrapper);
      read_errors(&v, &mut queue, report)
    })
  }
}

fn read_errors<'a>(
  errors: &'a ValidationErrors,
  fields_queue: &mut Vec<Cow<'a, str>>,
  mut report: Report<Wrapper>,
) -> Report<Wrapper> {
  for (field, kind) in errors.errors() {
    fields_queue.push(Cow::Borrowed(field));
    match kind {
      ValidationErrorsKind::Struct(inner) => {
        report = read_errors(inner, fields_queue, report);
      }
      ValidationErrorsKind::List(list) => {
        for (index, inner) in list {
          fields_queue.push(Cow::Owned(index.to_string()));
          report = read_errors(inner, fields_queue, report);
          fields_queue.pop();
        }
      }
      ValidationErrorsKind::Field(messages) => {
        let field_str = fields_queue.join(".");
        for error in messages {
          let message = error.message.as_deref().unwrap_or(error.code.as_ref());
          report = report.attach_printable(format!("{field_str}: {message}"));
        }
      }
    }
    fields_queue.pop();
  }
  report
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::ValidationError;

  #[test]
  fn test_attaches_every_field() {
    let mut errors = ValidationErrors::new();
    errors.add("jwt_secret", ValidationError::new("length"));

    let report = Err::<(), _>(errors).into_validator_report().unwrap_err();
    let output = format!("{report:?}");
    assert!(output.contains("jwt_secret: length"), "{output}");
  }
}
