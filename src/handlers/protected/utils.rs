use chrono::NaiveDate;

use crate::database::models::EditStamp;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::types::Role;
use crate::AppState;

/// Present and non-blank, trimmed
pub fn required_text<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::missing_field(field))
}

/// ISO-8601 calendar date (`YYYY-MM-DD`)
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    value
        .trim()
        .parse::<NaiveDate>()
        .map_err(|_| ApiError::invalid_field(field, "expected a YYYY-MM-DD date"))
}

pub fn optional_date(value: &Option<String>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(v, field).map(Some),
    }
}

/// Editor plus the supervisor the edit is reported to. Employees report to
/// their supervisor, supervisors to themselves.
pub async fn edit_stamp(state: &AppState, user: &AuthUser) -> Result<EditStamp, ApiError> {
    user.require_staff()?;
    let supervisor_email = match user.role {
        Role::Employee => state
            .accounts
            .employee_info(&user.email)
            .await?
            .map(|info| info.supervisor_email)
            .ok_or_else(|| ApiError::forbidden("Employee record not found"))?,
        _ => user.email.clone(),
    };
    Ok(EditStamp {
        editor_email: user.email.clone(),
        supervisor_email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_counts_as_missing() {
        assert_eq!(required_text(&Some("  x ".into()), "name").unwrap(), "x");
        assert_eq!(required_text(&Some("   ".into()), "name").unwrap_err().status_code(), 400);
        assert!(required_text(&None, "name").is_err());
    }

    #[test]
    fn dates_are_iso() {
        assert_eq!(
            parse_date("2025-05-01", "startDate").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
        );
        assert!(parse_date("05/01/2025", "startDate").is_err());
        assert_eq!(optional_date(&Some(String::new()), "dateOfBirth").unwrap(), None);
    }
}
