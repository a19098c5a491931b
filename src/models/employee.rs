//! Employee and acting-user models.
//!
//! Employees come from the directory and are read-only to this crate. The
//! acting user is whoever issued the current request; it may or may not be
//! linked to an employee record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employment status as recorded in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed.
    Active,
    /// No longer employed.
    Inactive,
}

/// Represents an employee whose time is being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee (e.g. "E1").
    pub identifier: String,
    /// Work email address.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Job title, used to classify night-shift roles.
    pub job_title: String,
    /// Email of the supervisor of record.
    #[serde(default)]
    pub supervisor_email: Option<String>,
    /// Employment status.
    pub status: EmploymentStatus,
    /// Remaining annual leave on the current contract, if known.
    #[serde(default)]
    pub leave_balance: Option<Decimal>,
}

impl Employee {
    /// Returns true while the employee may open new timesheets.
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    /// Returns true if the employee works a night-shift role.
    ///
    /// A role is night-shift when its job title contains "night",
    /// case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::{Employee, EmploymentStatus};
    ///
    /// let guard = Employee {
    ///     identifier: "E7".to_string(),
    ///     email: "guard@example.org".to_string(),
    ///     first_name: "Kabo".to_string(),
    ///     last_name: "Moeng".to_string(),
    ///     job_title: "Night Watchman".to_string(),
    ///     supervisor_email: None,
    ///     status: EmploymentStatus::Active,
    ///     leave_balance: None,
    /// };
    /// assert!(guard.is_night_shift());
    /// ```
    pub fn is_night_shift(&self) -> bool {
        self.job_title.to_lowercase().contains("night")
    }

    /// Returns true if `email` is this employee's supervisor of record.
    pub fn is_supervised_by(&self, email: &str) -> bool {
        self.supervisor_email
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(email))
    }
}

/// Permission group an acting user may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserGroup {
    /// Supervisors review the timesheets of their supervisees.
    Supervisor,
    /// HR verifies and retracts any timesheet.
    #[serde(rename = "HR")]
    Hr,
}

/// The authenticated user issuing a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActingUser {
    /// Login email; links the user to an employee record.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Groups the user belongs to.
    #[serde(default)]
    pub groups: Vec<UserGroup>,
}

impl ActingUser {
    /// Returns true if the user belongs to `group`.
    pub fn in_group(&self, group: UserGroup) -> bool {
        self.groups.contains(&group)
    }

    /// The identity recorded on reviewed timesheets.
    ///
    /// `"F. Lastname"` when both names are known, otherwise the email.
    pub fn credentials(&self) -> String {
        match (self.first_name.chars().next(), self.last_name.is_empty()) {
            (Some(initial), false) => format!("{}. {}", initial, self.last_name),
            _ => self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(job_title: &str) -> Employee {
        Employee {
            identifier: "E1".to_string(),
            email: "e1@example.org".to_string(),
            first_name: "Neo".to_string(),
            last_name: "Dube".to_string(),
            job_title: job_title.to_string(),
            supervisor_email: Some("Boss@Example.org".to_string()),
            status: EmploymentStatus::Active,
            leave_balance: None,
        }
    }

    #[test]
    fn test_night_shift_is_case_insensitive() {
        assert!(employee("NIGHT guard").is_night_shift());
        assert!(employee("Security (nightwatch)").is_night_shift());
        assert!(!employee("Data Manager").is_night_shift());
    }

    #[test]
    fn test_supervised_by_ignores_case() {
        let e = employee("Clerk");
        assert!(e.is_supervised_by("boss@example.org"));
        assert!(!e.is_supervised_by("other@example.org"));
    }

    #[test]
    fn test_credentials_use_initial_and_last_name() {
        let user = ActingUser {
            email: "t.sello@example.org".to_string(),
            first_name: "Tumelo".to_string(),
            last_name: "Sello".to_string(),
            groups: vec![UserGroup::Supervisor],
        };
        assert_eq!(user.credentials(), "T. Sello");
    }

    #[test]
    fn test_credentials_fall_back_to_email() {
        let user = ActingUser {
            email: "hr@example.org".to_string(),
            first_name: String::new(),
            last_name: "Only".to_string(),
            groups: vec![UserGroup::Hr],
        };
        assert_eq!(user.credentials(), "hr@example.org");
    }

    #[test]
    fn test_deserialize_employee_from_yaml() {
        let yaml = r#"
identifier: E1
email: e1@example.org
job_title: Night Watchman
supervisor_email: boss@example.org
status: active
leave_balance: "12.5"
"#;
        let e: Employee = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(e.identifier, "E1");
        assert_eq!(e.status, EmploymentStatus::Active);
        assert_eq!(e.leave_balance, Some(Decimal::new(125, 1)));
        assert!(e.first_name.is_empty());
    }

    #[test]
    fn test_group_serialization() {
        assert_eq!(serde_json::to_string(&UserGroup::Hr).unwrap(), "\"HR\"");
        assert_eq!(
            serde_json::to_string(&UserGroup::Supervisor).unwrap(),
            "\"Supervisor\""
        );
    }
}
