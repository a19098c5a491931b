//! Monthly timesheet status transitions.
//!
//! | From | Action | Actor | To |
//! |---|---|---|---|
//! | draft, rejected | submit | owner | submitted |
//! | submitted | approve | supervisor of record | approved |
//! | approved | verify | HR | verified |
//! | verified | retract | HR | approved |
//! | submitted, approved | reject | supervisor of record or HR | rejected |
//!
//! Creating the timesheet (`start`) and saving entries (`save`) are not
//! status transitions; see [`guard_start`] and [`guard_edit`].
//!
//! Guards check the actor's role before the current status, so a wrong
//! actor always gets [`TimesheetError::PermissionDenied`].

use chrono::{DateTime, Utc};

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{ActingUser, MonthlyTimesheet, ReviewAction, TimesheetStatus, YearMonth};

use super::roles::RoleResolution;

/// A status change that has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The action that caused it.
    pub action: ReviewAction,
    /// Status before.
    pub from: TimesheetStatus,
    /// Status after.
    pub to: TimesheetStatus,
}

/// Fails with [`TimesheetError::FutureMonthDisallowed`] when `month` is after
/// `current` and future months are not allowed.
pub fn guard_future_month(
    month: YearMonth,
    current: YearMonth,
    allow_future_months: bool,
) -> TimesheetResult<()> {
    if month.is_after(current) && !allow_future_months {
        return Err(TimesheetError::FutureMonthDisallowed {
            requested: month,
            current,
        });
    }
    Ok(())
}

/// Only the owner may start their own timesheet.
pub fn guard_start(role: &RoleResolution) -> TimesheetResult<()> {
    if !role.is_owner {
        return Err(TimesheetError::permission_denied(
            ReviewAction::Start,
            "only the employee can start their own timesheet",
        ));
    }
    Ok(())
}

/// Entries may be edited only by the owner and only in draft or rejected.
///
/// The status is checked first: outside draft/rejected nobody may edit.
pub fn guard_edit(status: TimesheetStatus, role: &RoleResolution) -> TimesheetResult<()> {
    if !status.is_editable() {
        return Err(TimesheetError::ReadOnlyViolation { status });
    }
    if !role.is_owner {
        return Err(TimesheetError::permission_denied(
            ReviewAction::Save,
            "only the employee can edit their own timesheet",
        ));
    }
    Ok(())
}

/// Validates `action` for the actor and the current status and returns the
/// target status.
///
/// `from` is `None` when no timesheet exists for the month.
pub fn check_transition(
    action: ReviewAction,
    from: Option<TimesheetStatus>,
    role: &RoleResolution,
) -> TimesheetResult<TimesheetStatus> {
    use TimesheetStatus::*;

    let (allowed_actor, reason) = match action {
        ReviewAction::Submit => (role.is_owner, "only the employee can submit"),
        ReviewAction::Approve => (
            role.acts_as_supervisor(),
            "only the supervisor of record can approve",
        ),
        ReviewAction::Verify => (role.acts_as_hr(), "only HR can verify"),
        ReviewAction::Retract => (role.acts_as_hr(), "only HR can retract a verification"),
        ReviewAction::Reject => (
            role.acts_as_supervisor() || role.acts_as_hr(),
            "only the supervisor of record or HR can reject",
        ),
        ReviewAction::Start | ReviewAction::Save => {
            return Err(TimesheetError::InvalidTransition { action, from });
        }
    };
    if !allowed_actor {
        return Err(TimesheetError::permission_denied(action, reason));
    }

    let to = match (action, from) {
        (ReviewAction::Submit, Some(Draft | Rejected)) => Submitted,
        (ReviewAction::Approve, Some(Submitted)) => Approved,
        (ReviewAction::Verify, Some(Approved)) => Verified,
        (ReviewAction::Retract, Some(Verified)) => Approved,
        (ReviewAction::Reject, Some(Submitted | Approved)) => Rejected,
        _ => return Err(TimesheetError::InvalidTransition { action, from }),
    };
    Ok(to)
}

/// Checks and applies `action` to `timesheet`.
///
/// On success the status, the actor/date fields belonging to the action and
/// the comment are updated. The comment replaces the previous one.
pub fn apply_transition(
    timesheet: &mut MonthlyTimesheet,
    action: ReviewAction,
    role: &RoleResolution,
    actor: &ActingUser,
    now: DateTime<Utc>,
    comment: &str,
) -> TimesheetResult<Transition> {
    let from = timesheet.status;
    let to = check_transition(action, Some(from), role)?;
    let today = now.date_naive();

    match action {
        ReviewAction::Submit => {
            timesheet.submitted_at = Some(now);
        }
        ReviewAction::Approve => {
            timesheet.approved_by = Some(actor.credentials());
            timesheet.approved_on = Some(today);
        }
        ReviewAction::Verify => {
            timesheet.verified_by = Some(actor.credentials());
            timesheet.verified_on = Some(today);
        }
        ReviewAction::Retract => {
            timesheet.verified_by = None;
            timesheet.verified_on = None;
        }
        ReviewAction::Reject => {
            timesheet.rejected_by = Some(actor.credentials());
            timesheet.rejected_on = Some(today);
        }
        ReviewAction::Start | ReviewAction::Save => {
            return Err(TimesheetError::InvalidTransition {
                action,
                from: Some(from),
            });
        }
    }

    timesheet.status = to;
    timesheet.comment = comment.trim().to_string();

    Ok(Transition { action, from, to })
}
