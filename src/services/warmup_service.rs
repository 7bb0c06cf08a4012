//! Background thumbnail warm-up.
//!
//! Runs on the rayon pool and talks to the foreground only through the cache.
//! A pass stops as soon as the cache generation moves on.

use crate::file_utils::PathExt;
use crate::image_cache::ThumbnailCache;
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Schedules warm-up passes against a shared cache.
#[derive(Clone)]
pub struct WarmupService {
    cache: Arc<ThumbnailCache>,
}

impl WarmupService {
    pub fn new(cache: Arc<ThumbnailCache>) -> Self {
        Self { cache }
    }

    /// Spawns a pass over `paths` tagged with `generation`. Errors end up as
    /// failure entries in the cache and are never reported.
    pub fn schedule(&self, paths: Vec<PathBuf>, generation: u64) {
        if paths.is_empty() {
            return;
        }
        let cache = self.cache.clone();
        rayon::spawn(move || {
            run_pass(&cache, &paths, generation);
        });
    }
}

/// Warms each path in order and returns how many were added.
pub fn run_pass(cache: &ThumbnailCache, paths: &[PathBuf], generation: u64) -> usize {
    let mut warmed = 0;
    for path in paths {
        if cache.generation() != generation {
            debug!(
                "Warm-up for generation {} abandoned before {}",
                generation,
                path.format_for_log()
            );
            break;
        }
        if cache.warm(path, generation) {
            warmed += 1;
        }
    }
    debug!(
        "Warm-up pass (generation {}) added {} of {} previews",
        generation,
        warmed,
        paths.len()
    );
    warmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_cache::tests::CountingSource;
    use crate::image_loader::PreviewSize;
    use std::path::Path;
    use std::time::{Duration, Instant};

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| Path::new("/f").join(n)).collect()
    }

    #[test]
    fn pass_fills_missing_entries_only() {
        let source = Arc::new(CountingSource::default());
        let cache = ThumbnailCache::new(source.clone(), PreviewSize::new(2, 2));
        cache.get_or_create(Path::new("/f/a.jpg"));

        let warmed = run_pass(&cache, &paths(&["a.jpg", "b.jpg", "broken.jpg"]), 0);

        assert_eq!(warmed, 2);
        assert_eq!(source.calls(), 3);
        assert!(cache.get_or_create(Path::new("/f/broken.jpg")).is_failed());
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn stale_pass_writes_nothing() {
        let source = Arc::new(CountingSource::default());
        let cache = ThumbnailCache::new(source.clone(), PreviewSize::new(2, 2));
        let old = cache.generation();
        cache.clear();

        assert_eq!(run_pass(&cache, &paths(&["a.jpg", "b.jpg"]), old), 0);
        assert_eq!(source.calls(), 0);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn scheduled_pass_runs_in_background() {
        let source = Arc::new(CountingSource::default());
        let cache = Arc::new(ThumbnailCache::new(source, PreviewSize::new(2, 2)));
        let service = WarmupService::new(cache.clone());

        service.schedule(paths(&["a.jpg", "b.jpg"]), cache.generation());

        let deadline = Instant::now() + Duration::from_secs(10);
        while cache.len() < 2 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(cache.len(), 2);
    }
}
