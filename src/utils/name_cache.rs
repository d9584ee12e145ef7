use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::model::profile::Profile;
use crate::store::mysql::ProfileRow;

/// employee id => display name
#[derive(Clone)]
pub struct NameCache {
    names: Cache<String, String>,
}

impl NameCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            names: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get(&self, employee_id: &str) -> Option<String> {
        self.names.get(employee_id).await
    }

    pub async fn insert(&self, employee_id: &str, name: &str) {
        self.names
            .insert(employee_id.to_string(), name.to_string())
            .await;
    }

    /// Batch insert display names for the given profiles
    pub async fn remember(&self, profiles: &[Profile]) {
        let futures: Vec<_> = profiles
            .iter()
            .map(|p| {
                self.names
                    .insert(p.user_id.clone(), p.display_name().to_string())
            })
            .collect();

        // Await all insertions concurrently
        futures::future::join_all(futures).await;
    }
}

/// Load every profile's display name into the cache (batched)
pub async fn warmup_name_cache(pool: &MySqlPool, cache: &NameCache, batch_size: usize) -> Result<()> {
    let mut stream =
        sqlx::query_as::<_, ProfileRow>("SELECT user_id, full_name, role FROM profiles")
            .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        batch.push(Profile::from(row?));
        total_count += 1;

        if batch.len() >= batch_size {
            cache.remember(&batch).await;
            batch.clear();
        }
    }

    // Insert any remaining profiles
    if !batch.is_empty() {
        cache.remember(&batch).await;
    }

    log::info!("Name cache warmup complete: {} profiles", total_count);

    Ok(())
}
