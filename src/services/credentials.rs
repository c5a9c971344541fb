//! Password hashing and token generation.
//!
//! Argon2id with parameters from [`SecurityConfig`]. Hashing runs on the
//! blocking pool so a burst of registrations cannot starve the runtime.

use anyhow::{anyhow, Context, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::Rng;

use crate::config::SecurityConfig;

fn hasher(security: &SecurityConfig) -> Result<Argon2<'static>> {
    let params = Params::new(
        security.argon2_memory_cost_kib,
        security.argon2_time_cost,
        security.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow!("Invalid Argon2 parameters: {e}"))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

pub async fn hash_password(password: &str, security: &SecurityConfig) -> Result<String> {
    let password = password.to_string();
    let security = security.clone();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        let hash = hasher(&security)?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("Failed to hash password: {e}"))?;
        Ok(hash.to_string())
    })
    .await
    .context("Password hashing task failed")?
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || {
        let parsed =
            PasswordHash::new(&hash).map_err(|e| anyhow!("Malformed password hash: {e}"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .context("Password verification task failed")?
}

/// Random hex token for activation and password-reset links.
#[must_use]
pub fn generate_token(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| format!("{:x}", rng.random_range(0..16)))
        .collect()
}
