use anyhow::{Context, Result};
use ssdi_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, port: Option<u16>) -> Result<()> {
    let config = Config::load(root).context("failed to load .ssdi/config.yaml")?;
    let port = port.unwrap_or(config.server.port);

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        tokio::select! {
            res = ssdi_server::serve(&root_buf, port) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
