//! Shared configuration snapshot with lock-free reads.

use crate::loader::ConfigLoader;
use crate::schema::Config;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Holds the active configuration; readers get an `Arc` snapshot.
pub struct ConfigCache {
    config: ArcSwap<Config>,
}

impl ConfigCache {
    /// Creates a cache holding `config`.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Current configuration snapshot.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Replaces the configuration atomically.
    pub fn update(&self, config: Config) {
        self.config.store(Arc::new(config));
    }

    /// Re-reads `path` and swaps it in. The old snapshot stays on failure.
    pub fn reload_from<P: AsRef<Path>>(&self, path: P) -> agrimon_common::Result<Arc<Config>> {
        let config = ConfigLoader::load_from_file(path.as_ref())?;
        self.update(config);
        info!(path = %path.as_ref().display(), "Configuration reloaded");
        Ok(self.get())
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_failed_reload_keeps_snapshot() {
        let cache = ConfigCache::default();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[preview]\nmax_rows = 0\n").unwrap();

        assert!(cache.reload_from(file.path()).is_err());
        assert_eq!(cache.get().preview.max_rows, 10);
    }
}
