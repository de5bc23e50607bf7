use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, an initial `config.json` pointing at the finance server, and the
/// snapshot database.
///
/// # Arguments
/// - `home` - The directory that will be the root of the data directory, e.g. `$HOME/pocketbook`
/// - `args` - Holds the address of the finance server, e.g. `http://localhost:4000`
///
/// # Errors
/// - Returns an error if the address is invalid or any file operations fail.
pub async fn init(home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let config = Config::create(home, &args.base_url)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the pocketbook directory at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn init_twice_fails() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("pb");
        let args = InitArgs {
            base_url: "http://localhost:4000".to_string(),
        };
        let out = init(&home, &args).await.unwrap();
        assert!(out.message().contains("Successfully"));
        assert!(init(&home, &args).await.is_err());
    }
}
