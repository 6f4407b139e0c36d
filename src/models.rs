/// Data models for the appointment scheduling system.
///
/// This module defines the core records used throughout the system:
/// - Timeslot: the fixed set of bookable times of day
/// - Profile: the (first name, last name, date of birth) patient identity
/// - Appointment: a booked visit binding date, slot, patient, and provider
use std::cmp::Ordering;
use std::fmt;

use uuid::Uuid;

use crate::date::CalendarDate;
use crate::directory::Provider;

/// The six bookable times of day, ordered by position in the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timeslot {
    Slot1,
    Slot2,
    Slot3,
    Slot4,
    Slot5,
    Slot6,
}

impl Timeslot {
    /// Converts a 1-based slot number into a timeslot.
    pub fn from_number(number: i32) -> Option<Timeslot> {
        match number {
            1 => Some(Timeslot::Slot1),
            2 => Some(Timeslot::Slot2),
            3 => Some(Timeslot::Slot3),
            4 => Some(Timeslot::Slot4),
            5 => Some(Timeslot::Slot5),
            6 => Some(Timeslot::Slot6),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Timeslot::Slot1 => 1,
            Timeslot::Slot2 => 2,
            Timeslot::Slot3 => 3,
            Timeslot::Slot4 => 4,
            Timeslot::Slot5 => 5,
            Timeslot::Slot6 => 6,
        }
    }

    /// Wall-clock start of the slot as (hour, minute), 24-hour.
    pub fn start_time(&self) -> (u32, u32) {
        match self {
            Timeslot::Slot1 => (9, 0),
            Timeslot::Slot2 => (10, 45),
            Timeslot::Slot3 => (11, 15),
            Timeslot::Slot4 => (13, 30),
            Timeslot::Slot5 => (15, 0),
            Timeslot::Slot6 => (16, 15),
        }
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute) = self.start_time();
        let (clock_hour, meridiem) = if hour < 12 {
            (hour, "AM")
        } else if hour == 12 {
            (12, "PM")
        } else {
            (hour - 12, "PM")
        };
        write!(f, "{}:{:02} {}", clock_hour, minute, meridiem)
    }
}

/// A patient's identity: first name, last name, and date of birth.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub dob: CalendarDate,
}

impl Profile {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        dob: CalendarDate,
    ) -> Self {
        Profile {
            first_name: first_name.into(),
            last_name: last_name.into(),
            dob,
        }
    }
}

impl PartialOrd for Profile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Profile {
    /// Orders by last name, then first name, then date of birth.
    fn cmp(&self, other: &Self) -> Ordering {
        self.last_name
            .cmp(&other.last_name)
            .then_with(|| self.first_name.cmp(&other.first_name))
            .then_with(|| self.dob.cmp(&other.dob))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.first_name, self.last_name, self.dob)
    }
}

/// A booked appointment.
///
/// The four domain fields are fixed at creation; equality is structural
/// over all four, and ordering considers date then slot only. Each booking
/// also gets a UUID for log correlation, which takes no part in equality.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub date: CalendarDate,
    pub slot: Timeslot,
    pub patient: Profile,
    pub provider: Provider,
    booking_id: Uuid,
}

impl Appointment {
    pub fn new(date: CalendarDate, slot: Timeslot, patient: Profile, provider: Provider) -> Self {
        Appointment {
            date,
            slot,
            patient,
            provider,
            booking_id: Uuid::new_v4(),
        }
    }

    pub fn booking_id(&self) -> Uuid {
        self.booking_id
    }
}

impl PartialEq for Appointment {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.slot == other.slot
            && self.patient == other.patient
            && self.provider == other.provider
    }
}

impl Eq for Appointment {}

impl PartialOrd for Appointment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Appointment {
    /// Orders by date, then timeslot. Patient and provider take no part
    /// in the ordering; reports that need them apply their own tie-breaks.
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.slot.cmp(&other.slot))
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date, self.slot, self.patient, self.provider
        )
    }
}
