// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Interactive text menu.  Reads one field per line; end of input exits.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use hashforge_core::types::PersonalRecordInput;
use hashforge_registry::Registry;

use crate::commands;

pub fn run(registry: &Registry) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\nMenu:");
        println!("1. Add entry manually");
        println!("2. Import entries from CSV");
        println!("3. Verify customer manually");
        println!("4. Verify customers from CSV");
        println!("5. View database");
        println!("6. Exit");

        let Some(choice) = prompt(&mut lines, "Choose an option: ") else { break };
        let result = match choice.trim() {
            "1" => match read_person(&mut lines) {
                Some(input) => commands::register_one(registry, &input),
                None => break,
            },
            "2" => match prompt(&mut lines, "Enter CSV file path: ") {
                Some(path) => commands::import_csv(registry, &PathBuf::from(path.trim())),
                None => break,
            },
            "3" => match read_person(&mut lines) {
                Some(input) => commands::verify_one(registry, &input),
                None => break,
            },
            "4" => match prompt(&mut lines, "Enter CSV file path: ") {
                Some(path) => commands::check_csv(registry, &PathBuf::from(path.trim())),
                None => break,
            },
            "5" => commands::list_records(registry),
            "6" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };

        if let Err(e) = result {
            commands::report_error(operation_name(choice.trim()), &e);
        }
    }
}

fn operation_name(choice: &str) -> &'static str {
    match choice {
        "1" => "Registration",
        "2" => "CSV import",
        "3" => "Verification",
        "4" => "CSV verification",
        _ => "Database listing",
    }
}

fn read_person<B: BufRead>(lines: &mut io::Lines<B>) -> Option<PersonalRecordInput> {
    println!("Enter customer data:");
    let first_name = prompt(lines, "First Name: ")?;
    let middle = prompt(lines, "Middle Initial: ")?;
    let last_name = prompt(lines, "Last Name: ")?;
    let dob = prompt(lines, "Date of Birth (MM-DD-YYYY): ")?;
    let address = prompt(lines, "Address: ")?;

    Some(PersonalRecordInput {
        first_name,
        middle_initial: (!middle.trim().is_empty()).then_some(middle),
        last_name,
        dob,
        address,
    })
}

/// Print `label` and read one line.  `None` at end of input.
fn prompt<B: BufRead>(lines: &mut io::Lines<B>, label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    lines.next().and_then(|line| line.ok())
}
