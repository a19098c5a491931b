//! Role and ownership resolution.
//!
//! The resolver decides how the acting user relates to the employee whose
//! timesheet is being handled, and derives the permission flags presentation
//! code uses to decide what to offer.

use serde::{Deserialize, Serialize};

use crate::models::{ActingUser, Employee, TimesheetStatus, UserGroup};

/// How the acting user relates to a target employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleResolution {
    /// The actor is the employee the timesheet belongs to.
    pub is_owner: bool,
    /// The actor is a supervisor and the target's supervisor of record.
    pub is_supervisor_of_record: bool,
    /// The actor is in the HR group.
    pub is_hr: bool,
    /// The actor may review: not the owner, and supervisor of record or HR.
    pub is_reviewer: bool,
}

impl RoleResolution {
    /// The actor may take supervisor review actions.
    pub fn acts_as_supervisor(&self) -> bool {
        self.is_reviewer && self.is_supervisor_of_record
    }

    /// The actor may take HR review actions.
    pub fn acts_as_hr(&self) -> bool {
        self.is_reviewer && self.is_hr
    }
}

/// Resolves the role of `actor` against `target`.
///
/// `actor_employee` is the actor's own employee record, if the actor has one.
/// HR membership is global; supervision is tied to the target's recorded
/// supervisor email.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{ActingUser, Employee, EmploymentStatus, UserGroup};
/// use timesheet_engine::workflow::resolve_role;
///
/// let target = Employee {
///     identifier: "E1".to_string(),
///     email: "e1@example.org".to_string(),
///     first_name: String::new(),
///     last_name: String::new(),
///     job_title: "Clerk".to_string(),
///     supervisor_email: Some("boss@example.org".to_string()),
///     status: EmploymentStatus::Active,
///     leave_balance: None,
/// };
/// let boss = ActingUser {
///     email: "boss@example.org".to_string(),
///     first_name: String::new(),
///     last_name: String::new(),
///     groups: vec![UserGroup::Supervisor],
/// };
///
/// let role = resolve_role(&boss, None, &target);
/// assert!(role.is_reviewer);
/// assert!(!role.is_owner);
/// ```
pub fn resolve_role(
    actor: &ActingUser,
    actor_employee: Option<&Employee>,
    target: &Employee,
) -> RoleResolution {
    let is_owner = actor_employee.is_some_and(|e| e.identifier == target.identifier);
    let is_supervisor_of_record =
        actor.in_group(UserGroup::Supervisor) && target.is_supervised_by(&actor.email);
    let is_hr = actor.in_group(UserGroup::Hr);

    RoleResolution {
        is_owner,
        is_supervisor_of_record,
        is_hr,
        is_reviewer: !is_owner && (is_supervisor_of_record || is_hr),
    }
}

/// What the acting user may do with a timesheet right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionFlags {
    /// May create the timesheet.
    pub allow_start: bool,
    /// May edit daily entries.
    pub allow_edit: bool,
    /// May submit for review.
    pub allow_submit: bool,
    /// May approve.
    pub allow_supervisor_review: bool,
    /// May verify.
    pub allow_hr_review: bool,
    /// May reject.
    pub allow_reject: bool,
    /// May retract a verification.
    pub allow_retract: bool,
    /// Entries are shown read-only.
    pub readonly: bool,
}

impl PermissionFlags {
    /// Derives the flags from the role, the current status (`None` when no
    /// timesheet exists) and whether the month is open for creation.
    pub fn derive(
        role: &RoleResolution,
        status: Option<TimesheetStatus>,
        can_create_for_month: bool,
    ) -> Self {
        use TimesheetStatus::*;

        let allow_edit = role.is_owner && status.is_some_and(|s| s.is_editable());
        let reviewer = role.acts_as_supervisor() || role.acts_as_hr();

        Self {
            allow_start: role.is_owner && status.is_none() && can_create_for_month,
            allow_edit,
            allow_submit: allow_edit && can_create_for_month,
            allow_supervisor_review: role.acts_as_supervisor() && status == Some(Submitted),
            allow_hr_review: role.acts_as_hr() && status == Some(Approved),
            allow_reject: reviewer && matches!(status, Some(Submitted | Approved)),
            allow_retract: role.acts_as_hr() && status == Some(Verified),
            readonly: !allow_edit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmploymentStatus;

    fn employee(id: &str, email: &str, supervisor: Option<&str>) -> Employee {
        Employee {
            identifier: id.to_string(),
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            job_title: "Clerk".to_string(),
            supervisor_email: supervisor.map(str::to_string),
            status: EmploymentStatus::Active,
            leave_balance: None,
        }
    }

    fn user(email: &str, groups: Vec<UserGroup>) -> ActingUser {
        ActingUser {
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            groups,
        }
    }

    fn target() -> Employee {
        employee("E1", "e1@example.org", Some("boss@example.org"))
    }

    #[test]
    fn test_owner_is_never_reviewer() {
        let me = employee("E1", "e1@example.org", Some("boss@example.org"));
        let actor = user("e1@example.org", vec![UserGroup::Hr]);

        let role = resolve_role(&actor, Some(&me), &target());

        assert!(role.is_owner);
        assert!(role.is_hr);
        assert!(!role.is_reviewer);
        assert!(!role.acts_as_hr());
    }

    #[test]
    fn test_supervisor_of_record_is_reviewer() {
        let boss = employee("E2", "boss@example.org", None);
        let actor = user("boss@example.org", vec![UserGroup::Supervisor]);

        let role = resolve_role(&actor, Some(&boss), &target());

        assert!(!role.is_owner);
        assert!(role.is_supervisor_of_record);
        assert!(role.acts_as_supervisor());
    }

    #[test]
    fn test_other_supervisor_is_not_reviewer() {
        let actor = user("someone@example.org", vec![UserGroup::Supervisor]);
        let role = resolve_role(&actor, None, &target());

        assert!(!role.is_supervisor_of_record);
        assert!(!role.is_reviewer);
    }

    #[test]
    fn test_supervisor_email_without_group_is_not_reviewer() {
        let actor = user("boss@example.org", vec![]);
        let role = resolve_role(&actor, None, &target());
        assert!(!role.is_reviewer);
    }

    #[test]
    fn test_hr_is_global_reviewer() {
        let actor = user("hr@example.org", vec![UserGroup::Hr]);
        let role = resolve_role(&actor, None, &target());

        assert!(role.is_reviewer);
        assert!(role.acts_as_hr());
        assert!(!role.acts_as_supervisor());
    }

    fn owner() -> RoleResolution {
        RoleResolution {
            is_owner: true,
            ..RoleResolution::default()
        }
    }

    fn supervisor() -> RoleResolution {
        RoleResolution {
            is_supervisor_of_record: true,
            is_reviewer: true,
            ..RoleResolution::default()
        }
    }

    fn hr() -> RoleResolution {
        RoleResolution {
            is_hr: true,
            is_reviewer: true,
            ..RoleResolution::default()
        }
    }

    #[test]
    fn test_owner_flags_by_status() {
        let none = PermissionFlags::derive(&owner(), None, true);
        assert!(none.allow_start);
        assert!(!none.allow_edit);
        assert!(none.readonly);

        let future = PermissionFlags::derive(&owner(), None, false);
        assert!(!future.allow_start);

        for status in [TimesheetStatus::Draft, TimesheetStatus::Rejected] {
            let flags = PermissionFlags::derive(&owner(), Some(status), true);
            assert!(flags.allow_edit);
            assert!(flags.allow_submit);
            assert!(!flags.readonly);
            assert!(!flags.allow_reject);
        }

        for status in [
            TimesheetStatus::Submitted,
            TimesheetStatus::Approved,
            TimesheetStatus::Verified,
        ] {
            let flags = PermissionFlags::derive(&owner(), Some(status), true);
            assert!(!flags.allow_edit);
            assert!(flags.readonly);
            assert!(!flags.allow_supervisor_review);
            assert!(!flags.allow_hr_review);
            assert!(!flags.allow_retract);
        }
    }

    #[test]
    fn test_supervisor_flags_by_status() {
        let submitted = PermissionFlags::derive(&supervisor(), Some(TimesheetStatus::Submitted), true);
        assert!(submitted.allow_supervisor_review);
        assert!(submitted.allow_reject);
        assert!(!submitted.allow_hr_review);
        assert!(submitted.readonly);

        let approved = PermissionFlags::derive(&supervisor(), Some(TimesheetStatus::Approved), true);
        assert!(!approved.allow_supervisor_review);
        assert!(approved.allow_reject);

        let verified = PermissionFlags::derive(&supervisor(), Some(TimesheetStatus::Verified), true);
        assert!(!verified.allow_retract);
        assert!(!verified.allow_reject);
    }

    #[test]
    fn test_hr_flags_by_status() {
        let approved = PermissionFlags::derive(&hr(), Some(TimesheetStatus::Approved), true);
        assert!(approved.allow_hr_review);
        assert!(approved.allow_reject);
        assert!(!approved.allow_supervisor_review);

        let verified = PermissionFlags::derive(&hr(), Some(TimesheetStatus::Verified), true);
        assert!(verified.allow_retract);
        assert!(!verified.allow_hr_review);

        let draft = PermissionFlags::derive(&hr(), Some(TimesheetStatus::Draft), true);
        assert_eq!(
            draft,
            PermissionFlags {
                readonly: true,
                ..PermissionFlags::default()
            }
        );
    }
}
