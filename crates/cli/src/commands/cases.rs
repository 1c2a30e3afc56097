use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use eqbench_core::cases::discover_cases;
use eqbench_core::model::ExpectedLabel;

/// One entry of the case listing.
#[derive(Debug, Serialize)]
pub struct CaseListing {
    pub benchmark: String,
    pub program: String,
    pub expected: String,
    pub case_type: String,
    pub function: Option<String>,
}

/// List the benchmark cases that a run would evaluate, without building or
/// comparing anything.
pub fn list_cases_command(source: &str, json: bool) -> Result<()> {
    let root = Path::new(source);

    let mut listings = Vec::new();
    for label in [ExpectedLabel::Eq, ExpectedLabel::Neq] {
        for case in discover_cases(root, label)? {
            listings.push(CaseListing {
                benchmark: case.benchmark.clone(),
                program: case.program.clone(),
                expected: label.to_string(),
                case_type: case.case_type().to_string(),
                function: case.descriptor.as_ref().map(|descriptor| descriptor.function.clone()),
            });
        }
    }

    if json {
        let serialized = serde_json::to_string_pretty(&listings)
            .context("Failed to serialize case listing to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Cases ({}):", listings.len());
    if listings.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for listing in listings {
        match &listing.function {
            Some(function) => println!(
                "  - {}/{} [{}] {} (function: {})",
                listing.benchmark, listing.program, listing.expected, listing.case_type, function
            ),
            None => println!(
                "  - {}/{} [{}] {}",
                listing.benchmark, listing.program, listing.expected, listing.case_type
            ),
        }
    }

    Ok(())
}
