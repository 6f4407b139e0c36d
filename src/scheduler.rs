/// Scheduling service: validation and mutation for booking, cancelling,
/// and rescheduling appointments.
///
/// Every mutating operation validates fully before touching the schedule,
/// so a rejected command leaves no partial state behind. The order of the
/// checks is part of the contract: callers see the message for the first
/// rule that fails.
use thiserror::Error;
use tracing::info;

use crate::date::CalendarDate;
use crate::directory::Provider;
use crate::models::{Appointment, Profile, Timeslot};
use crate::records::MedicalRecord;
use crate::schedule::{BillingStatement, Schedule};

/// Everything that can go wrong with a scheduling command.
///
/// All variants are recoverable: the service reports one and moves on to
/// the next command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("{0} is not a valid time slot.")]
    InvalidSlot(i32),
    #[error("{0} - provider doesn't exist.")]
    UnknownProvider(String),
    #[error("Appointment date: {0} is not a valid calendar date.")]
    InvalidDate(CalendarDate),
    #[error("Appointment date: {0} is today or a date before today.")]
    DateNotInFuture(CalendarDate),
    #[error("Appointment date: {0} is Saturday or Sunday.")]
    DateOnWeekend(CalendarDate),
    #[error("Appointment date: {0} is not within six months.")]
    DateOutsideWindow(CalendarDate),
    #[error("Patient dob: {0} is today or a date after today.")]
    DobNotInPast(CalendarDate),
    #[error("Patient dob: {0} is not a valid calendar date.")]
    DobInvalid(CalendarDate),
    #[error("{patient} has an existing appointment at the same time slot.")]
    DuplicateAppointment { patient: Profile },
    #[error("{patient} has an existing appointment at the new time slot.")]
    DuplicateAtNewSlot { patient: Profile },
    #[error("[{provider}] is not available at slot {slot}.")]
    ProviderUnavailable { provider: Provider, slot: u8 },
    #[error("{date} {slot} {patient} does not exist.")]
    NotFound {
        date: CalendarDate,
        slot: Timeslot,
        patient: Profile,
    },
}

/// Owns the live schedule and the medical record, and applies the
/// scheduling rules against an injected current date.
pub struct Scheduler {
    schedule: Schedule,
    record: MedicalRecord,
    today: CalendarDate,
}

impl Scheduler {
    /// A scheduler running against the local system date.
    pub fn new() -> Self {
        Scheduler::with_today(CalendarDate::today())
    }

    /// A scheduler with a fixed current date, for deterministic date rules.
    pub fn with_today(today: CalendarDate) -> Self {
        Scheduler {
            schedule: Schedule::new(),
            record: MedicalRecord::new(),
            today,
        }
    }

    #[cfg(test)]
    fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// Books a new appointment.
    pub fn book(
        &mut self,
        date: CalendarDate,
        slot_number: i32,
        patient: Profile,
        provider_name: &str,
    ) -> Result<Appointment, ScheduleError> {
        let slot =
            Timeslot::from_number(slot_number).ok_or(ScheduleError::InvalidSlot(slot_number))?;
        let provider = Provider::from_name(provider_name)
            .ok_or_else(|| ScheduleError::UnknownProvider(provider_name.to_string()))?;
        self.check_appointment_date(date)?;
        self.check_date_of_birth(patient.dob)?;
        if self.has_booking(date, slot, &patient, provider) {
            return Err(ScheduleError::DuplicateAppointment { patient });
        }
        if self.provider_is_booked(date, slot, provider) {
            return Err(ScheduleError::ProviderUnavailable {
                provider,
                slot: slot.number(),
            });
        }

        let appointment = Appointment::new(date, slot, patient, provider);
        info!(
            booking_id = %appointment.booking_id(),
            provider = provider.last_name(),
            slot = slot.number(),
            "appointment booked"
        );
        self.schedule.add(appointment.clone());
        Ok(appointment)
    }

    /// Cancels an appointment matching the given tuple exactly.
    ///
    /// No date or DOB revalidation happens here: whatever matches
    /// structurally is removable, even if the date could no longer be
    /// booked today.
    pub fn cancel(
        &mut self,
        date: CalendarDate,
        slot_number: i32,
        patient: Profile,
        provider_name: &str,
    ) -> Result<Appointment, ScheduleError> {
        let provider = Provider::from_name(provider_name)
            .ok_or_else(|| ScheduleError::UnknownProvider(provider_name.to_string()))?;
        let slot =
            Timeslot::from_number(slot_number).ok_or(ScheduleError::InvalidSlot(slot_number))?;

        let probe = Appointment::new(date, slot, patient.clone(), provider);
        match self.schedule.remove(&probe) {
            Some(removed) => {
                info!(booking_id = %removed.booking_id(), "appointment canceled");
                Ok(removed)
            }
            None => Err(ScheduleError::NotFound {
                date,
                slot,
                patient,
            }),
        }
    }

    /// Moves an existing appointment to a new timeslot on the same date.
    ///
    /// The appointment is located by (date, old slot, patient) alone; the
    /// provider is recovered from the stored appointment rather than
    /// supplied by the caller.
    pub fn reschedule(
        &mut self,
        date: CalendarDate,
        old_slot_number: i32,
        patient: Profile,
        new_slot_number: i32,
    ) -> Result<Appointment, ScheduleError> {
        let old_slot = Timeslot::from_number(old_slot_number)
            .ok_or(ScheduleError::InvalidSlot(old_slot_number))?;
        let existing = self
            .schedule
            .iter()
            .find(|a| a.date == date && a.slot == old_slot && a.patient == patient)
            .cloned()
            .ok_or_else(|| ScheduleError::NotFound {
                date,
                slot: old_slot,
                patient: patient.clone(),
            })?;
        let provider = existing.provider;

        let new_slot = Timeslot::from_number(new_slot_number)
            .ok_or(ScheduleError::InvalidSlot(new_slot_number))?;
        // Neither the date nor the DOB can have changed, but the full
        // chain re-runs on every reschedule; its rejections fire here too.
        self.check_appointment_date(date)?;
        self.check_date_of_birth(patient.dob)?;
        if self.has_booking(date, new_slot, &patient, provider) {
            return Err(ScheduleError::DuplicateAtNewSlot { patient });
        }
        if self.provider_is_booked(date, new_slot, provider) {
            return Err(ScheduleError::ProviderUnavailable {
                provider,
                slot: new_slot.number(),
            });
        }

        self.schedule.remove(&existing);
        let moved = Appointment::new(date, new_slot, patient, provider);
        info!(
            booking_id = %moved.booking_id(),
            from_slot = old_slot.number(),
            to_slot = new_slot.number(),
            "appointment rescheduled"
        );
        self.schedule.add(moved.clone());
        Ok(moved)
    }

    fn check_appointment_date(&self, date: CalendarDate) -> Result<(), ScheduleError> {
        if !date.is_valid() {
            return Err(ScheduleError::InvalidDate(date));
        }
        if date <= self.today {
            return Err(ScheduleError::DateNotInFuture(date));
        }
        if date.is_weekend() {
            return Err(ScheduleError::DateOnWeekend(date));
        }
        if !date.is_within_six_months(self.today) {
            return Err(ScheduleError::DateOutsideWindow(date));
        }
        Ok(())
    }

    fn check_date_of_birth(&self, dob: CalendarDate) -> Result<(), ScheduleError> {
        if dob >= self.today {
            return Err(ScheduleError::DobNotInPast(dob));
        }
        if !dob.is_valid() {
            return Err(ScheduleError::DobInvalid(dob));
        }
        Ok(())
    }

    fn has_booking(
        &self,
        date: CalendarDate,
        slot: Timeslot,
        patient: &Profile,
        provider: Provider,
    ) -> bool {
        self.schedule
            .iter()
            .any(|a| a.date == date && a.slot == slot && a.patient == *patient && a.provider == provider)
    }

    fn provider_is_booked(&self, date: CalendarDate, slot: Timeslot, provider: Provider) -> bool {
        self.schedule
            .iter()
            .any(|a| a.date == date && a.slot == slot && a.provider == provider)
    }

    pub fn appointment_count(&self) -> usize {
        self.schedule.len()
    }

    pub fn has_appointments(&self) -> bool {
        !self.schedule.is_empty()
    }

    /// Appointments sorted by date, slot, then provider. The sort is
    /// applied to the live schedule and persists.
    pub fn appointments_by_date(&mut self) -> &[Appointment] {
        self.schedule.sort_by_appointment();
        self.schedule.as_slice()
    }

    /// Appointments sorted by patient, then date and slot.
    pub fn appointments_by_patient(&mut self) -> &[Appointment] {
        self.schedule.sort_by_patient();
        self.schedule.as_slice()
    }

    /// Appointments sorted by provider county, then date and slot.
    pub fn appointments_by_county(&mut self) -> &[Appointment] {
        self.schedule.sort_by_county();
        self.schedule.as_slice()
    }

    /// Closes the billing cycle: computes per-patient statements, archives
    /// every billed appointment into the medical record as a completed
    /// visit, and leaves the schedule empty.
    pub fn close_billing_cycle(&mut self) -> Vec<BillingStatement> {
        let statements = self.schedule.billing_statements();
        let billed = self.schedule.take_all();
        info!(
            appointments = billed.len(),
            patients = statements.len(),
            "billing cycle closed"
        );
        for visit in billed {
            self.record.record_visit(visit);
        }
        statements
    }

    pub fn medical_record(&self) -> &MedicalRecord {
        &self.record
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> Scheduler {
        // 10/1/2024 is a Tuesday.
        Scheduler::with_today(CalendarDate::new(2024, 10, 1))
    }

    fn amy() -> Profile {
        Profile::new("Amy", "Smith", CalendarDate::new(2000, 1, 1))
    }

    fn bob() -> Profile {
        Profile::new("Bob", "Jones", CalendarDate::new(1995, 5, 20))
    }

    fn oct(day: u32) -> CalendarDate {
        CalendarDate::new(2024, 10, day)
    }

    #[test]
    fn booking_grows_the_schedule_by_one() {
        let mut s = scheduler();
        let booked = s.book(oct(15), 1, amy(), "PATEL").unwrap();
        assert_eq!(s.appointment_count(), 1);
        assert_eq!(booked.provider, Provider::Patel);
        assert_eq!(booked.slot, Timeslot::Slot1);
        assert_eq!(booked.patient, amy());
    }

    #[test]
    fn duplicate_booking_is_rejected() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();
        let err = s.book(oct(15), 1, amy(), "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateAppointment { patient: amy() });
        assert_eq!(s.appointment_count(), 1);
    }

    #[test]
    fn provider_cannot_double_book_a_slot() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();
        let err = s.book(oct(15), 1, bob(), "PATEL").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::ProviderUnavailable {
                provider: Provider::Patel,
                slot: 1
            }
        );
        assert_eq!(s.appointment_count(), 1);
    }

    #[test]
    fn same_patient_may_see_two_providers_at_one_time() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();
        s.book(oct(15), 1, amy(), "LIM").unwrap();
        assert_eq!(s.appointment_count(), 2);
    }

    #[test]
    fn invalid_slot_is_reported_before_unknown_provider() {
        let mut s = scheduler();
        let err = s.book(oct(15), 9, amy(), "NOBODY").unwrap_err();
        assert_eq!(err, ScheduleError::InvalidSlot(9));
    }

    #[test]
    fn unknown_provider_is_reported_before_date_checks() {
        let mut s = scheduler();
        let err = s
            .book(CalendarDate::new(2023, 2, 30), 1, amy(), "NOBODY")
            .unwrap_err();
        assert_eq!(err, ScheduleError::UnknownProvider("NOBODY".to_string()));
    }

    #[test]
    fn invalid_date_is_reported_before_weekend_and_window() {
        let mut s = scheduler();
        let bad = CalendarDate::new(2024, 9, 31);
        let err = s.book(bad, 1, amy(), "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::InvalidDate(bad));
    }

    #[test]
    fn past_date_is_reported_before_weekend() {
        let mut s = scheduler();
        // 9/29/2024 is a Sunday, but it is also in the past.
        let past_sunday = CalendarDate::new(2024, 9, 29);
        let err = s.book(past_sunday, 1, amy(), "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::DateNotInFuture(past_sunday));
    }

    #[test]
    fn booking_today_is_rejected() {
        let mut s = scheduler();
        let err = s.book(oct(1), 1, amy(), "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::DateNotInFuture(oct(1)));
    }

    #[test]
    fn weekend_is_reported_before_window() {
        let mut s = scheduler();
        // 10/19/2024 is a Saturday inside the six-month window.
        let err = s.book(oct(19), 1, amy(), "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::DateOnWeekend(oct(19)));
    }

    #[test]
    fn far_future_weekday_is_outside_the_window() {
        let mut s = scheduler();
        // 12/25/2099 is a Friday: valid and not a weekend, but far past
        // six months from 10/1/2024.
        let xmas = CalendarDate::new(2099, 12, 25);
        let err = s.book(xmas, 1, amy(), "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::DateOutsideWindow(xmas));
    }

    #[test]
    fn window_upper_bound_is_inclusive() {
        let mut s = scheduler();
        // 4/1/2025 is exactly six months out, and a Tuesday.
        s.book(CalendarDate::new(2025, 4, 1), 1, amy(), "PATEL")
            .unwrap();
        let beyond = CalendarDate::new(2025, 4, 2);
        let err = s.book(beyond, 1, bob(), "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::DateOutsideWindow(beyond));
    }

    #[test]
    fn future_dob_is_rejected_before_dob_validity() {
        let mut s = scheduler();
        // Future and not a real date: the in-the-future rule wins.
        let dob = CalendarDate::new(2025, 2, 30);
        let patient = Profile::new("New", "Born", dob);
        let err = s.book(oct(15), 1, patient, "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::DobNotInPast(dob));
    }

    #[test]
    fn invalid_past_dob_is_rejected() {
        let mut s = scheduler();
        let dob = CalendarDate::new(2000, 2, 30);
        let patient = Profile::new("No", "Body", dob);
        let err = s.book(oct(15), 1, patient, "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::DobInvalid(dob));
    }

    #[test]
    fn cancel_removes_exactly_one_matching_appointment() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();
        s.book(oct(15), 2, amy(), "PATEL").unwrap();

        let removed = s.cancel(oct(15), 1, amy(), "PATEL").unwrap();
        assert_eq!(removed.slot, Timeslot::Slot1);
        assert_eq!(s.appointment_count(), 1);

        let err = s.cancel(oct(15), 1, amy(), "PATEL").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NotFound {
                date: oct(15),
                slot: Timeslot::Slot1,
                patient: amy()
            }
        );
        assert_eq!(s.appointment_count(), 1);
    }

    #[test]
    fn cancel_checks_provider_before_slot() {
        let mut s = scheduler();
        let err = s.cancel(oct(15), 0, amy(), "NOBODY").unwrap_err();
        assert_eq!(err, ScheduleError::UnknownProvider("NOBODY".to_string()));
        let err = s.cancel(oct(15), 0, amy(), "PATEL").unwrap_err();
        assert_eq!(err, ScheduleError::InvalidSlot(0));
    }

    #[test]
    fn cancel_skips_date_revalidation() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();
        // Day moves past the appointment; cancellation still works.
        s.set_today(oct(20));
        assert!(s.cancel(oct(15), 1, amy(), "PATEL").is_ok());
        assert_eq!(s.appointment_count(), 0);
    }

    #[test]
    fn reschedule_moves_the_slot_and_keeps_the_provider() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();

        let moved = s.reschedule(oct(15), 1, amy(), 3).unwrap();
        assert_eq!(moved.slot, Timeslot::Slot3);
        assert_eq!(moved.provider, Provider::Patel);
        assert_eq!(s.appointment_count(), 1);

        // The old slot no longer matches anything.
        let err = s.cancel(oct(15), 1, amy(), "PATEL").unwrap_err();
        assert!(matches!(err, ScheduleError::NotFound { .. }));
        assert!(s.cancel(oct(15), 3, amy(), "PATEL").is_ok());
    }

    #[test]
    fn reschedule_of_missing_appointment_reports_not_found() {
        let mut s = scheduler();
        let err = s.reschedule(oct(15), 1, amy(), 3).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NotFound {
                date: oct(15),
                slot: Timeslot::Slot1,
                patient: amy()
            }
        );
    }

    #[test]
    fn reschedule_onto_own_existing_slot_is_a_duplicate() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();
        s.book(oct(15), 3, amy(), "PATEL").unwrap();
        let err = s.reschedule(oct(15), 1, amy(), 3).unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateAtNewSlot { patient: amy() });
        assert_eq!(s.appointment_count(), 2);
    }

    #[test]
    fn reschedule_respects_provider_availability() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();
        s.book(oct(15), 3, bob(), "PATEL").unwrap();
        let err = s.reschedule(oct(15), 1, amy(), 3).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::ProviderUnavailable {
                provider: Provider::Patel,
                slot: 3
            }
        );
    }

    #[test]
    fn reschedule_reruns_the_date_chain() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap();
        // Once the appointment date is no longer in the future, even an
        // unchanged date fails the re-run validation.
        s.set_today(oct(20));
        let err = s.reschedule(oct(15), 1, amy(), 2).unwrap_err();
        assert_eq!(err, ScheduleError::DateNotInFuture(oct(15)));
        // And nothing moved.
        assert!(s.cancel(oct(15), 1, amy(), "PATEL").is_ok());
    }

    #[test]
    fn report_orderings_sort_the_live_schedule() {
        let mut s = scheduler();
        s.book(oct(16), 1, bob(), "LIM").unwrap();
        s.book(oct(15), 2, amy(), "PATEL").unwrap();

        let by_date: Vec<CalendarDate> =
            s.appointments_by_date().iter().map(|a| a.date).collect();
        assert_eq!(by_date, vec![oct(15), oct(16)]);

        let by_patient: Vec<String> = s
            .appointments_by_patient()
            .iter()
            .map(|a| a.patient.last_name.clone())
            .collect();
        assert_eq!(by_patient, vec!["Jones".to_string(), "Smith".to_string()]);
    }

    #[test]
    fn billing_archives_visits_and_clears_the_schedule() {
        let mut s = scheduler();
        s.book(oct(15), 1, amy(), "PATEL").unwrap(); // FAMILY 250
        s.book(oct(16), 2, amy(), "KAUR").unwrap(); // ALLERGIST 350
        s.book(oct(15), 3, bob(), "LIM").unwrap(); // PEDIATRICIAN 300

        let statements = s.close_billing_cycle();

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].patient, bob());
        assert_eq!(statements[0].total_due, 300);
        assert_eq!(statements[1].patient, amy());
        assert_eq!(statements[1].total_due, 600);

        assert!(!s.has_appointments());
        assert_eq!(s.appointment_count(), 0);

        let record = s.medical_record();
        assert_eq!(record.find(&amy()).unwrap().total_charges(), 600);
        assert_eq!(record.find(&bob()).unwrap().total_charges(), 300);
    }

    #[test]
    fn billing_an_empty_schedule_yields_no_statements() {
        let mut s = scheduler();
        assert!(s.close_billing_cycle().is_empty());
        assert!(s.medical_record().is_empty());
    }

    #[test]
    fn error_messages_match_the_report_wording() {
        assert_eq!(
            ScheduleError::InvalidSlot(9).to_string(),
            "9 is not a valid time slot."
        );
        assert_eq!(
            ScheduleError::UnknownProvider("HOUSE".to_string()).to_string(),
            "HOUSE - provider doesn't exist."
        );
        assert_eq!(
            ScheduleError::DateOutsideWindow(CalendarDate::new(2099, 12, 25)).to_string(),
            "Appointment date: 12/25/2099 is not within six months."
        );
        assert_eq!(
            ScheduleError::DuplicateAppointment { patient: amy() }.to_string(),
            "Amy Smith 1/1/2000 has an existing appointment at the same time slot."
        );
        assert_eq!(
            ScheduleError::ProviderUnavailable {
                provider: Provider::Patel,
                slot: 4
            }
            .to_string(),
            "[PATEL, BRIDGEWATER, Somerset 08807, FAMILY] is not available at slot 4."
        );
        assert_eq!(
            ScheduleError::NotFound {
                date: CalendarDate::new(2024, 10, 15),
                slot: Timeslot::Slot1,
                patient: amy()
            }
            .to_string(),
            "10/15/2024 9:00 AM Amy Smith 1/1/2000 does not exist."
        );
    }
}
