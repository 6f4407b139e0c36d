/// Completed-visit history, kept per patient.
///
/// When a billing cycle closes, the billed appointments move here so
/// lifetime charge totals stay queryable after the live schedule is
/// cleared. Histories are append-only.
use crate::models::{Appointment, Profile};

/// One patient's completed visits, in the order they were billed.
#[derive(Debug)]
pub struct PatientRecord {
    profile: Profile,
    visits: Vec<Appointment>,
}

impl PatientRecord {
    fn new(profile: Profile) -> Self {
        PatientRecord {
            profile,
            visits: Vec::new(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn visits(&self) -> &[Appointment] {
        &self.visits
    }

    /// Total charged across all completed visits, at the visiting
    /// provider's per-visit specialty rate.
    pub fn total_charges(&self) -> u32 {
        self.visits
            .iter()
            .map(|visit| visit.provider.specialty().charge_per_visit())
            .sum()
    }
}

/// The medical record: every patient seen so far, keyed by profile.
#[derive(Debug, Default)]
pub struct MedicalRecord {
    patients: Vec<PatientRecord>,
}

impl MedicalRecord {
    pub fn new() -> Self {
        MedicalRecord {
            patients: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn find(&self, profile: &Profile) -> Option<&PatientRecord> {
        self.patients.iter().find(|p| p.profile == *profile)
    }

    /// Appends a completed appointment to its patient's history, creating
    /// the patient entry on first visit.
    pub fn record_visit(&mut self, appointment: Appointment) {
        let index = match self
            .patients
            .iter()
            .position(|p| p.profile == appointment.patient)
        {
            Some(index) => index,
            None => {
                self.patients
                    .push(PatientRecord::new(appointment.patient.clone()));
                self.patients.len() - 1
            }
        };
        self.patients[index].visits.push(appointment);
    }
}
