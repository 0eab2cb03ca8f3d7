use anyhow::Result;

use liga_auth::CAPABILITIES;

pub fn run() -> Result<()> {
    println!("{:<22} {}", "CAPABILITY", "DESCRIPTION");
    println!("{}", "-".repeat(70));
    for (cap, desc) in CAPABILITIES {
        println!("{:<22} {}", cap.as_str(), desc);
    }
    Ok(())
}
