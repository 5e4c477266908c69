//! Print an argon2 hash for seeding `employees.password_hash`.
//!
//! Usage: `gen_hash <password>`

use anyhow::{anyhow, bail};
use hotelier_core::credentials::hash_password;

fn main() -> anyhow::Result<()> {
    let Some(password) = std::env::args().nth(1) else {
        bail!("usage: gen_hash <password>");
    };

    let hash = hash_password(&password).map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    println!("{hash}");
    Ok(())
}
