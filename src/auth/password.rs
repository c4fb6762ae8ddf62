use anyhow::Context;
use lazy_static::lazy_static;
use tracing::error;

/// bcrypt work factor; existing digests in `usuarios` were produced at this cost.
pub const HASH_COST: u32 = 10;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    bcrypt::hash(plain, HASH_COST).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        anyhow::anyhow!(e.to_string())
    })
}

/// `Ok(false)` on mismatch; `Err` only when `hash` is not a bcrypt digest.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    bcrypt::verify(plain, hash).map_err(|e| {
        error!(error = %e, "bcrypt verify error");
        anyhow::anyhow!(e.to_string())
    })
}

pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("hash task failed")?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .context("verify task failed")?
}

lazy_static! {
    // Digest of a throwaway value, computed on first use.
    static ref DUMMY_DIGEST: String = hash_password("usuarios-api-dummy").unwrap_or_default();
}

/// Spends one bcrypt verification on a fixed digest; the outcome is discarded.
pub async fn verify_against_dummy_blocking(plain: String) {
    let result = tokio::task::spawn_blocking(move || verify_password(&plain, &DUMMY_DIGEST)).await;
    if let Err(e) = result {
        error!(error = %e, "dummy verify task failed");
    }
}
