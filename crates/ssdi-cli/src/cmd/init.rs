use anyhow::Context;
use ssdi_core::{config::Config, io, paths, seed, Database};
use std::path::Path;

pub fn run(root: &Path, with_seed: bool) -> anyhow::Result<()> {
    println!("Initializing SSDI tracker in: {}", root.display());

    let dir = paths::ssdi_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_path = paths::config_path(root);
    let config = if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        Config::load(root).context("failed to read config.yaml")?
    } else {
        let cfg = Config::default();
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
        cfg
    };

    let db_path = config.database_path(root);
    let existed = db_path.exists();
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open case store at {}", db_path.display()))?;
    if existed {
        println!("  exists:  {}", db_path.display());
    } else {
        println!("  created: {}", db_path.display());
    }

    if with_seed {
        let seeded = seed::seed_sample_data(&db, chrono::Utc::now())
            .context("failed to seed sample data")?;
        match seeded {
            Some(user) => println!(
                "  seeded:  sample claimant '{}' (user {})",
                user.username, user.id
            ),
            None => println!("  skipped: sample data (user 1 already exists)"),
        }
    }

    Ok(())
}
