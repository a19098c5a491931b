//! Timesheet workflow: roles, transitions, entry reconciliation and the
//! service tying them to storage.
//!
//! Presentation code talks to [`TimesheetService`] and renders the
//! [`TimesheetView`] it returns. The lower-level pieces are public so they
//! can be reused and tested on their own.

mod context;
mod reconcile;
mod roles;
mod service;
mod state_machine;
mod view;

pub use context::RequestContext;
pub use reconcile::{EntryEdit, ReconcileOutcome, reconcile};
pub use roles::{PermissionFlags, RoleResolution, resolve_role};
pub use service::{SaveResult, TimesheetService};
pub use state_machine::{
    Transition, apply_transition, check_transition, guard_edit, guard_future_month, guard_start,
};
pub use view::{CalendarDay, EmployeeSummary, EntryTypeChoice, TimesheetView, ViewParts};
