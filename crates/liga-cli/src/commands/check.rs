use anyhow::Result;
use std::path::Path;

use liga_auth::{GrantTable, Role, Subject};

/// Prints `allowed` or `denied`. Unknown roles and capability names are
/// denied rather than reported as errors.
pub fn run(role: &str, capabilities: &[String], all: bool, base_dir: &Path) -> Result<bool> {
    let table = super::load_grants(base_dir)?;
    let subject = parse_subject(role);
    let allowed = evaluate(&table, subject, capabilities, all);
    println!("{}", if allowed { "allowed" } else { "denied" });
    Ok(allowed)
}

fn parse_subject(role: &str) -> Subject {
    match role.parse::<Role>() {
        Ok(role) => Subject::Authenticated(role),
        Err(e) => {
            tracing::warn!(error = %e, "treating as anonymous");
            Subject::Anonymous
        }
    }
}

fn evaluate(table: &GrantTable, subject: Subject, capabilities: &[String], all: bool) -> bool {
    if all {
        capabilities.iter().all(|c| table.allows_named(subject, c))
    } else {
        capabilities.iter().any(|c| table.allows_named(subject, c))
    }
}
