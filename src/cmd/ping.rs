use jobboard::{JobStore, conf::Settings, prelude::Result};

pub async fn check(settings: &Settings) -> Result<()> {
    let store = JobStore::connect(settings.store_config()).await?;
    let total = store.count_jobs().await?;
    tracing::debug!("connected to {}", &settings.database_url);
    println!("job store is reachable, {} listings stored", total);
    Ok(())
}
