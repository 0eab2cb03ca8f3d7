use anyhow::Result;

use liga_auth::Role;

pub fn run() -> Result<()> {
    println!("{:<4} {:<15} {}", "ID", "NAME", "LABEL");
    println!("{}", "-".repeat(36));
    for role in Role::ALL {
        println!("{:<4} {:<15} {}", role.id(), role.name(), role.label());
    }
    Ok(())
}
