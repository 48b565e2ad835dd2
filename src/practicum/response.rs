//! Validation of API responses and formatting of status messages.

use serde_json::Value;

use super::PracticumError;

/// Human-readable verdict for a known review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Looks up the verdict for a status code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Status code as sent by the API.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Sentence shown to the user.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            Self::Reviewing => "The work has been taken for review.",
            Self::Rejected => "The work has been reviewed: the reviewer has remarks.",
        }
    }
}

/// A validated homework record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub verdict: Verdict,
}

impl Homework {
    /// Extracts a homework record from one element of the `homeworks` list.
    ///
    /// # Errors
    ///
    /// Returns [`PracticumError::HomeworkNotAnObject`] when the record is not
    /// a JSON object, [`PracticumError::MissingKey`] when `homework_name` or
    /// `status` is absent, and [`PracticumError::UnknownStatus`] for a status
    /// outside the verdict table.
    pub fn from_value(value: &Value) -> Result<Self, PracticumError> {
        let record = value.as_object().ok_or(PracticumError::HomeworkNotAnObject)?;

        let name = record
            .get("homework_name")
            .ok_or(PracticumError::MissingKey("homework_name"))?;
        let status = record
            .get("status")
            .ok_or(PracticumError::MissingKey("status"))?;

        let verdict = status
            .as_str()
            .and_then(Verdict::from_code)
            .ok_or_else(|| PracticumError::UnknownStatus(display_value(status)))?;

        Ok(Self {
            name: display_value(name),
            verdict,
        })
    }

    /// Formats the notification text for this record.
    #[must_use]
    pub fn status_message(&self) -> String {
        format!(
            "Homework review status changed for \"{}\". {}",
            self.name,
            self.verdict.text()
        )
    }
}

/// Renders a JSON value without quotes when it is a plain string.
fn display_value(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_owned)
}

/// Checks that the response has the expected shape and returns its homeworks.
///
/// An empty list is valid and means there is nothing new.
///
/// # Errors
///
/// Returns a distinct error when the body is not an object, lacks
/// `homeworks`, or `homeworks` is not a list.
pub fn check_response(response: &Value) -> Result<&[Value], PracticumError> {
    let body = response.as_object().ok_or(PracticumError::NotAnObject)?;
    let homeworks = body
        .get("homeworks")
        .ok_or(PracticumError::MissingHomeworks)?;

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(PracticumError::HomeworksNotAList)
}

/// Builds the status message for a single homework record.
///
/// # Errors
///
/// See [`Homework::from_value`].
pub fn parse_status(homework: &Value) -> Result<String, PracticumError> {
    Homework::from_value(homework).map(|hw| hw.status_message())
}

/// Server timestamp to use as the next `from_date`, if present.
#[must_use]
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_check_response_returns_list() {
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1_700_000_000
        });
        let homeworks = check_response(&response).unwrap();
        assert_eq!(homeworks.len(), 1);
    }

    #[test]
    fn test_check_response_empty_list_is_valid() {
        let response = json!({"homeworks": [], "current_date": 1});
        assert!(check_response(&response).unwrap().is_empty());
    }

    #[test]
    fn test_check_response_not_an_object() {
        let response = json!([{"homeworks": []}]);
        assert!(matches!(
            check_response(&response),
            Err(PracticumError::NotAnObject)
        ));
    }

    #[test]
    fn test_check_response_missing_homeworks() {
        let response = json!({"current_date": 1});
        assert!(matches!(
            check_response(&response),
            Err(PracticumError::MissingHomeworks)
        ));
    }

    #[test]
    fn test_check_response_homeworks_not_a_list() {
        let response = json!({"homeworks": {"homework_name": "hw1"}});
        assert!(matches!(
            check_response(&response),
            Err(PracticumError::HomeworksNotAList)
        ));
    }

    #[test]
    fn test_parse_status_approved() {
        let homework = json!({"homework_name": "X", "status": "approved"});
        assert_eq!(
            parse_status(&homework).unwrap(),
            "Homework review status changed for \"X\". \
             The work has been reviewed: the reviewer liked everything. Hooray!"
        );
    }

    #[test]
    fn test_parse_status_every_known_code() {
        for verdict in [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected] {
            let homework = json!({"homework_name": "hw", "status": verdict.code()});
            let message = parse_status(&homework).unwrap();
            assert!(message.ends_with(verdict.text()), "{message}");
        }
    }

    #[test]
    fn test_parse_status_missing_name() {
        let homework = json!({"status": "approved"});
        assert!(matches!(
            parse_status(&homework),
            Err(PracticumError::MissingKey("homework_name"))
        ));
    }

    #[test]
    fn test_parse_status_missing_status() {
        let homework = json!({"homework_name": "hw1"});
        assert!(matches!(
            parse_status(&homework),
            Err(PracticumError::MissingKey("status"))
        ));
    }

    #[test]
    fn test_parse_status_unknown_status() {
        let homework = json!({"homework_name": "hw1", "status": "lost"});
        match parse_status(&homework) {
            Err(PracticumError::UnknownStatus(status)) => assert_eq!(status, "lost"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_non_string_status_is_unknown() {
        let homework = json!({"homework_name": "hw1", "status": 3});
        assert!(matches!(
            parse_status(&homework),
            Err(PracticumError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_parse_status_record_not_an_object() {
        assert!(matches!(
            parse_status(&json!("hw1")),
            Err(PracticumError::HomeworkNotAnObject)
        ));
    }

    #[test]
    fn test_current_date() {
        assert_eq!(current_date(&json!({"current_date": 42})), Some(42));
        assert_eq!(current_date(&json!({"current_date": "42"})), None);
        assert_eq!(current_date(&json!({"homeworks": []})), None);
    }
}
