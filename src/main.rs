#![allow(dead_code)]
/// Command-line interface for the appointment scheduling system.
///
/// This module provides the line-oriented command loop: it tokenizes
/// comma-separated commands from stdin, hands the parsed fields to the
/// scheduling service, and formats results and reports on stdout.
/// Tracing output goes to stderr so report output stays clean.
mod date;
mod directory;
mod models;
mod records;
mod schedule;
mod scheduler;

use std::io::{self, BufRead};

use date::CalendarDate;
use models::Profile;
use scheduler::Scheduler;

struct SchedulerCli {
    scheduler: Scheduler,
}

impl SchedulerCli {
    fn new() -> Self {
        SchedulerCli {
            scheduler: Scheduler::new(),
        }
    }

    /// Reads commands until `Q` or end of input.
    fn run(&mut self) {
        println!("Scheduler is running.");

        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
            match tokens[0] {
                "S" => self.cmd_schedule(&tokens),
                "C" => self.cmd_cancel(&tokens),
                "R" => self.cmd_reschedule(&tokens),
                "PA" => self.print_by_appointment(),
                "PP" => self.print_by_patient(),
                "PL" => self.print_by_county(),
                "PS" => self.print_billing(),
                "Q" => {
                    println!("Scheduler is terminated.");
                    return;
                }
                _ => println!("Invalid command!"),
            }
        }
    }

    fn cmd_schedule(&mut self, tokens: &[&str]) {
        let &[_, date_str, slot_str, first, last, dob_str, provider_name] = tokens else {
            println!("Invalid command!");
            return;
        };

        let Ok(slot_number) = slot_str.parse::<i32>() else {
            println!("{slot_str} is not a valid time slot.");
            return;
        };
        let Some(date) = parse_date(date_str) else {
            return;
        };
        let Some(dob) = parse_date(dob_str) else {
            return;
        };

        let patient = Profile::new(first, last, dob);
        match self.scheduler.book(date, slot_number, patient, provider_name) {
            Ok(appointment) => println!("{appointment} booked."),
            Err(error) => println!("{error}"),
        }
    }

    fn cmd_cancel(&mut self, tokens: &[&str]) {
        let &[_, date_str, slot_str, first, last, dob_str, provider_name] = tokens else {
            println!("Invalid command!");
            return;
        };

        let Ok(slot_number) = slot_str.parse::<i32>() else {
            println!("{slot_str} is not a valid time slot.");
            return;
        };
        let Some(date) = parse_date(date_str) else {
            return;
        };
        let Some(dob) = parse_date(dob_str) else {
            return;
        };

        let patient = Profile::new(first, last, dob);
        match self.scheduler.cancel(date, slot_number, patient, provider_name) {
            Ok(removed) => println!(
                "{} {} {} has been canceled.",
                removed.date, removed.slot, removed.patient
            ),
            Err(error) => println!("{error}"),
        }
    }

    fn cmd_reschedule(&mut self, tokens: &[&str]) {
        let &[_, date_str, old_slot_str, first, last, dob_str, new_slot_str] = tokens else {
            println!("Invalid command!");
            return;
        };

        let Ok(old_slot_number) = old_slot_str.parse::<i32>() else {
            println!("{old_slot_str} is not a valid time slot.");
            return;
        };
        let Ok(new_slot_number) = new_slot_str.parse::<i32>() else {
            println!("{new_slot_str} is not a valid time slot.");
            return;
        };
        let Some(date) = parse_date(date_str) else {
            return;
        };
        let Some(dob) = parse_date(dob_str) else {
            return;
        };

        let patient = Profile::new(first, last, dob);
        match self
            .scheduler
            .reschedule(date, old_slot_number, patient, new_slot_number)
        {
            Ok(moved) => println!(
                "Rescheduled to {} {} {} [{}]",
                moved.date, moved.slot, moved.patient, moved.provider
            ),
            Err(error) => println!("{error}"),
        }
    }

    fn print_by_appointment(&mut self) {
        let appointments = self.scheduler.appointments_by_date();
        if appointments.is_empty() {
            println!("The schedule calendar is empty.");
            return;
        }
        println!("\n** Appointments ordered by date/time/provider **");
        for appointment in appointments {
            println!("{appointment}");
        }
        println!("** end of list **");
    }

    fn print_by_patient(&mut self) {
        let appointments = self.scheduler.appointments_by_patient();
        if appointments.is_empty() {
            println!("The schedule calendar is empty.");
            return;
        }
        println!("\n** Appointments ordered by patient/date/time **");
        for appointment in appointments {
            println!("{appointment}");
        }
        println!("** end of list **");
    }

    fn print_by_county(&mut self) {
        let appointments = self.scheduler.appointments_by_county();
        if appointments.is_empty() {
            println!("The schedule calendar is empty.");
            return;
        }
        println!("\n** Appointments ordered by county/date/time **");
        for appointment in appointments {
            println!("{appointment}");
        }
        println!("** end of list **");
    }

    fn print_billing(&mut self) {
        if !self.scheduler.has_appointments() {
            println!("No appointments to generate billing statements.");
            return;
        }
        println!("** Billing statement ordered by patient **");
        for statement in self.scheduler.close_billing_cycle() {
            println!(
                "({}) {} [amount due: {}]",
                statement.rank,
                statement.patient,
                statement.amount_due()
            );
        }
        println!("** end of list **");
    }
}

/// Parses a month/day/year token, reporting the malformed-token message
/// itself so command handlers can simply bail out.
fn parse_date(token: &str) -> Option<CalendarDate> {
    match token.parse::<CalendarDate>() {
        Ok(date) => Some(date),
        Err(message) => {
            println!("{message}");
            None
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut cli = SchedulerCli::new();
    cli.run();
}
