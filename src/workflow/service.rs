//! The timesheet workflow service.
//!
//! Every operation follows the same shape: resolve the target employee and
//! the actor's role, load the aggregate, run the guards, mutate a private
//! copy, then commit it against the version that was loaded.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::calculation::{OvertimeCalculator, ensure_placeholders, recompute_totals};
use crate::config::{ConfigLoader, Settings};
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{Employee, MonthlyTimesheet, ReviewAction, TimesheetKey, YearMonth};
use crate::store::{
    EmployeeDirectory, HolidayCalendar, InMemoryDirectory, StaticHolidayCalendar, TimesheetStore,
};

use super::context::RequestContext;
use super::reconcile::{EntryEdit, ReconcileOutcome, reconcile};
use super::roles::{RoleResolution, resolve_role};
use super::state_machine::{
    apply_transition, check_transition, guard_edit, guard_future_month, guard_start,
};
use super::view::{TimesheetView, ViewParts};

/// Result of saving entry edits.
#[derive(Debug, Clone, Serialize)]
pub struct SaveResult {
    /// The timesheet as stored after the save.
    pub timesheet: MonthlyTimesheet,
    /// Which rows were written.
    pub outcome: ReconcileOutcome,
}

/// Starts, edits, submits, reviews and renders monthly timesheets.
pub struct TimesheetService {
    settings: Settings,
    calculator: OvertimeCalculator,
    directory: Arc<dyn EmployeeDirectory>,
    holidays: Arc<dyn HolidayCalendar>,
    store: Arc<dyn TimesheetStore>,
}

impl TimesheetService {
    /// Creates a service.
    ///
    /// Fails with [`TimesheetError::Configuration`] if the overtime settings
    /// are incomplete.
    pub fn new(
        settings: Settings,
        directory: Arc<dyn EmployeeDirectory>,
        holidays: Arc<dyn HolidayCalendar>,
        store: Arc<dyn TimesheetStore>,
    ) -> TimesheetResult<Self> {
        let calculator = OvertimeCalculator::new(&settings.overtime)?;
        Ok(Self {
            settings,
            calculator,
            directory,
            holidays,
            store,
        })
    }

    /// Creates a service whose directory and holiday calendar are seeded from
    /// the loaded configuration.
    pub fn from_config(config: &ConfigLoader, store: Arc<dyn TimesheetStore>) -> TimesheetResult<Self> {
        Self::new(
            config.settings().clone(),
            Arc::new(InMemoryDirectory::from_config(config)),
            Arc::new(StaticHolidayCalendar::from_config(config)),
            store,
        )
    }

    /// The settings in effect.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn employee(&self, employee_id: &str) -> TimesheetResult<Employee> {
        self.directory
            .lookup_by_identifier(employee_id)
            .ok_or_else(|| TimesheetError::EmployeeNotFound {
                identifier: employee_id.to_string(),
            })
    }

    fn role(&self, ctx: &RequestContext, target: &Employee) -> RoleResolution {
        let actor_employee = self.directory.lookup_by_email(&ctx.actor.email);
        resolve_role(&ctx.actor, actor_employee.as_ref(), target)
    }

    fn load_existing(
        &self,
        key: &TimesheetKey,
        action: ReviewAction,
    ) -> TimesheetResult<MonthlyTimesheet> {
        self.store
            .load(key)?
            .ok_or(TimesheetError::InvalidTransition { action, from: None })
    }

    fn recompute(&self, timesheet: &mut MonthlyTimesheet, target: &Employee) {
        recompute_totals(timesheet, &self.calculator, target.is_night_shift());
    }

    /// Creates the owner's timesheet for `month`, or returns the existing one.
    ///
    /// The new timesheet is a draft with a placeholder for every day. An
    /// existing timesheet only gets missing placeholders topped up.
    pub fn start(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        month: YearMonth,
    ) -> TimesheetResult<MonthlyTimesheet> {
        let target = self.employee(employee_id)?;
        let role = self.role(ctx, &target);
        guard_start(&role)?;
        if !target.is_active() {
            return Err(TimesheetError::permission_denied(
                ReviewAction::Start,
                "inactive employees cannot start a timesheet",
            ));
        }
        guard_future_month(month, ctx.current_month(), self.settings.allow_future_months)?;

        let key = TimesheetKey::new(employee_id, month);
        if let Some(existing) = self.store.load(&key)? {
            let mut timesheet = existing.clone();
            if ensure_placeholders(&mut timesheet) == 0 {
                return Ok(existing);
            }
            self.recompute(&mut timesheet, &target);
            return self.store.commit(timesheet, existing.version);
        }

        let mut timesheet = MonthlyTimesheet::new_draft(&target, month);
        let placeholders = ensure_placeholders(&mut timesheet);
        self.recompute(&mut timesheet, &target);

        match self.store.create(timesheet) {
            Ok(created) => {
                info!(
                    key = %key,
                    placeholders,
                    status = %created.status,
                    "Started timesheet"
                );
                Ok(created)
            }
            // Another request created it first.
            Err(TimesheetError::ConcurrentModification { .. }) => self
                .store
                .load(&key)?
                .ok_or_else(|| TimesheetError::TimesheetNotFound {
                    employee_id: key.employee_id.clone(),
                    month,
                }),
            Err(e) => Err(e),
        }
    }

    /// Persists entry edits without changing the status.
    pub fn save(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        month: YearMonth,
        edits: &[EntryEdit],
    ) -> TimesheetResult<SaveResult> {
        let target = self.employee(employee_id)?;
        let role = self.role(ctx, &target);
        let key = TimesheetKey::new(employee_id, month);
        let existing = self.load_existing(&key, ReviewAction::Save)?;
        guard_edit(existing.status, &role)?;

        let mut timesheet = existing.clone();
        let outcome = reconcile(&mut timesheet, edits, &self.settings.entry_types)?;
        if !outcome.has_changes() {
            return Ok(SaveResult {
                timesheet: existing,
                outcome,
            });
        }

        self.recompute(&mut timesheet, &target);
        let timesheet = self.store.commit(timesheet, existing.version)?;
        info!(
            key = %key,
            updated = outcome.updated.len(),
            overtime = %timesheet.monthly_overtime,
            "Saved timesheet entries"
        );
        Ok(SaveResult { timesheet, outcome })
    }

    /// Reconciles `edits` and submits the timesheet for review in one commit.
    pub fn submit(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        month: YearMonth,
        edits: &[EntryEdit],
        comment: &str,
    ) -> TimesheetResult<MonthlyTimesheet> {
        let target = self.employee(employee_id)?;
        let role = self.role(ctx, &target);
        let key = TimesheetKey::new(employee_id, month);
        let existing = self.store.load(&key)?;
        check_transition(
            ReviewAction::Submit,
            existing.as_ref().map(|t| t.status),
            &role,
        )?;
        guard_future_month(month, ctx.current_month(), self.settings.allow_future_months)?;

        let existing = existing.ok_or(TimesheetError::InvalidTransition {
            action: ReviewAction::Submit,
            from: None,
        })?;
        let mut timesheet = existing.clone();
        reconcile(&mut timesheet, edits, &self.settings.entry_types)?;
        let transition = apply_transition(
            &mut timesheet,
            ReviewAction::Submit,
            &role,
            &ctx.actor,
            ctx.now,
            comment,
        )?;
        self.recompute(&mut timesheet, &target);

        let timesheet = self.store.commit(timesheet, existing.version)?;
        info!(
            key = %key,
            from = %transition.from,
            to = %transition.to,
            overtime = %timesheet.monthly_overtime,
            "Submitted timesheet"
        );
        Ok(timesheet)
    }

    /// Applies a review action: approve, verify, reject or retract.
    pub fn review(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        month: YearMonth,
        action: ReviewAction,
        comment: &str,
    ) -> TimesheetResult<MonthlyTimesheet> {
        let target = self.employee(employee_id)?;
        let role = self.role(ctx, &target);
        let key = TimesheetKey::new(employee_id, month);
        let existing = self.load_existing(&key, action)?;

        if matches!(
            action,
            ReviewAction::Start | ReviewAction::Save | ReviewAction::Submit
        ) {
            return Err(TimesheetError::InvalidTransition {
                action,
                from: Some(existing.status),
            });
        }

        let mut timesheet = existing.clone();
        let transition =
            apply_transition(&mut timesheet, action, &role, &ctx.actor, ctx.now, comment)?;
        let timesheet = self.store.commit(timesheet, existing.version)?;
        info!(
            key = %key,
            action = %action,
            actor = %ctx.actor.email,
            from = %transition.from,
            to = %transition.to,
            "Reviewed timesheet"
        );
        Ok(timesheet)
    }

    /// Builds the view of `employee_id`'s `month` for the actor.
    ///
    /// The owner, reviewers and any member of a staff group may look.
    pub fn view(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        month: YearMonth,
    ) -> TimesheetResult<TimesheetView> {
        let target = self.employee(employee_id)?;
        let role = self.role(ctx, &target);
        if !role.is_owner && !role.is_reviewer && ctx.actor.groups.is_empty() {
            return Err(TimesheetError::permission_denied(
                "view",
                "not the owner, a reviewer or staff",
            ));
        }
        let current = ctx.current_month();
        guard_future_month(month, current, self.settings.allow_future_months)?;

        let timesheet = self.store.load(&TimesheetKey::new(employee_id, month))?;
        Ok(TimesheetView::build(ViewParts {
            employee: &target,
            role,
            month,
            timesheet,
            can_create_for_month: !month.is_after(current) || self.settings.allow_future_months,
            holidays: self.holidays.holidays_in_month(month),
            entry_types: &self.settings.entry_types,
        }))
    }

    /// Like [`view`](Self::view), but a disallowed future month falls back to
    /// the current month with a notice.
    pub fn view_or_current(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        month: YearMonth,
    ) -> TimesheetResult<TimesheetView> {
        match self.view(ctx, employee_id, month) {
            Err(TimesheetError::FutureMonthDisallowed { requested, current }) => {
                warn!(
                    employee_id,
                    requested = %requested,
                    current = %current,
                    "Future month requested, showing current month"
                );
                let view = self.view(ctx, employee_id, current)?;
                Ok(view.with_notice(format!(
                    "Timesheets for {} {} are not open yet",
                    requested.month_name(),
                    requested.year()
                )))
            }
            other => other,
        }
    }
}
