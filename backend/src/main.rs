use anyhow::Result;
use log::info;

use kidtask::config;
use kidtask::Backend;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load_config()?;
    let backend = Backend::new(&config)?;

    let snapshot = backend.snapshot();
    info!(
        "{} users, {} tasks, {} wishes",
        snapshot.users.len(),
        snapshot.tasks.len(),
        snapshot.wishes.len()
    );
    for progress in &snapshot.progress {
        info!("{}", progress);
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
