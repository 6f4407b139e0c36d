/// The live appointment collection.
///
/// This module provides the Schedule container which holds every booked
/// appointment in insertion order until one of the report projections
/// re-sorts it in place. The re-sort is permanent: each report call
/// reorders the live collection rather than a copy, and the billing pass
/// additionally drains it.
use std::cmp::Ordering;

use crate::models::{Appointment, Profile};

/// An order-preserving, growable collection of appointments.
///
/// Uniqueness is the callers' contract: the collection itself accepts
/// whatever is added, and callers check `contains` before inserting.
#[derive(Debug, Default)]
pub struct Schedule {
    appointments: Vec<Appointment>,
}

impl Schedule {
    pub fn new() -> Self {
        Schedule {
            appointments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Appointment> {
        self.appointments.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter()
    }

    pub fn as_slice(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Checks membership under structural appointment equality.
    pub fn contains(&self, appointment: &Appointment) -> bool {
        self.appointments.contains(appointment)
    }

    pub fn add(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    /// Removes the first structurally-equal appointment, shifting later
    /// entries left so relative order is preserved. No-op when absent.
    pub fn remove(&mut self, appointment: &Appointment) -> Option<Appointment> {
        let index = self.appointments.iter().position(|a| a == appointment)?;
        Some(self.appointments.remove(index))
    }

    /// Sorts in place by patient (last, first, dob), then date and slot.
    pub fn sort_by_patient(&mut self) {
        self.appointments
            .sort_by(|a, b| a.patient.cmp(&b.patient).then_with(|| a.cmp(b)));
    }

    /// Sorts in place by the provider's county (case-insensitive), then
    /// date and slot.
    pub fn sort_by_county(&mut self) {
        self.appointments.sort_by(|a, b| {
            compare_counties(a, b).then_with(|| a.cmp(b))
        });
    }

    /// Sorts in place by date and slot, then provider last name.
    pub fn sort_by_appointment(&mut self) {
        self.appointments.sort_by(|a, b| {
            a.cmp(b)
                .then_with(|| a.provider.last_name().cmp(b.provider.last_name()))
        });
    }

    /// Computes one billing statement per distinct patient.
    ///
    /// Sorts the collection by patient first (permanently, like the other
    /// projections), then accumulates the visiting provider's per-visit
    /// charge across each contiguous run of equal patient identity. Ranks
    /// are 1-based in patient order. The collection itself is left intact;
    /// the caller decides when to drain it with `take_all`.
    pub fn billing_statements(&mut self) -> Vec<BillingStatement> {
        self.sort_by_patient();
        let mut statements: Vec<BillingStatement> = Vec::new();
        for appointment in &self.appointments {
            let charge = appointment.provider.specialty().charge_per_visit();
            match statements.last_mut() {
                Some(last) if last.patient == appointment.patient => {
                    last.total_due += charge;
                }
                _ => statements.push(BillingStatement {
                    rank: statements.len() + 1,
                    patient: appointment.patient.clone(),
                    total_due: charge,
                }),
            }
        }
        statements
    }

    /// Empties the collection, handing back every appointment it held.
    pub fn take_all(&mut self) -> Vec<Appointment> {
        std::mem::take(&mut self.appointments)
    }
}

fn compare_counties(a: &Appointment, b: &Appointment) -> Ordering {
    let a_county = a.provider.location().county();
    let b_county = b.provider.location().county();
    a_county
        .to_ascii_lowercase()
        .cmp(&b_county.to_ascii_lowercase())
}

/// One patient's aggregated charges for the current billing cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingStatement {
    pub rank: usize,
    pub patient: Profile,
    pub total_due: u32,
}

impl BillingStatement {
    /// The amount due as currency with thousands separators, e.g. `$1,050.00`.
    pub fn amount_due(&self) -> String {
        let digits = self.total_due.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("${grouped}.00")
    }
}
