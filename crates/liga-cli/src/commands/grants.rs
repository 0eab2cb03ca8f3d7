use anyhow::Result;
use std::path::Path;

use liga_auth::Role;

pub fn run(role: &str, base_dir: &Path) -> Result<()> {
    let role: Role = role.parse()?;
    let table = super::load_grants(base_dir)?;
    let caps = table.sorted_capabilities(role);

    println!("{} ({}, id {}):", role.label(), role.name(), role.id());
    if caps.is_empty() {
        println!("  no capabilities granted");
    }
    for cap in caps {
        println!("  - {:<22} {}", cap.as_str(), cap.description());
    }
    Ok(())
}
