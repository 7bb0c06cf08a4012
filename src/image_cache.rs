//! Thumbnail cache for fast navigation.
//!
//! Maps image paths to rendered previews. Failed decodes are cached as well so a
//! broken file is decoded at most once per folder. Every `clear()` starts a new
//! generation; background work tagged with an older generation is dropped instead
//! of being written into the fresh cache.

use crate::file_utils::PathExt;
use crate::image_loader::{Preview, PreviewSize, ThumbnailSource};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// A cached lookup result.
#[derive(Debug, Clone)]
pub enum CachedThumbnail {
    Ready(Arc<Preview>),
    /// The image could not be decoded; show a placeholder.
    Failed,
}

impl CachedThumbnail {
    pub fn preview(&self) -> Option<&Preview> {
        match self {
            CachedThumbnail::Ready(preview) => Some(preview.as_ref()),
            CachedThumbnail::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CachedThumbnail::Failed)
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<PathBuf, CachedThumbnail>,
    generation: u64,
}

/// Shared, generation-tagged preview cache.
pub struct ThumbnailCache {
    state: Mutex<CacheState>,
    source: Arc<dyn ThumbnailSource>,
    size: PreviewSize,
}

impl ThumbnailCache {
    pub fn new(source: Arc<dyn ThumbnailSource>, size: PreviewSize) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            source,
            size,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render(&self, path: &Path) -> CachedThumbnail {
        match self.source.render(path, self.size) {
            Ok(preview) => CachedThumbnail::Ready(Arc::new(preview)),
            Err(e) => {
                warn!("{}", e);
                CachedThumbnail::Failed
            }
        }
    }

    /// Current generation number.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Returns the cached preview for `path`, rendering it on a miss.
    ///
    /// Decoding happens outside the lock so background warm-up never blocks a
    /// foreground lookup for longer than a map access.
    pub fn get_or_create(&self, path: &Path) -> CachedThumbnail {
        let generation = {
            let state = self.lock();
            if let Some(hit) = state.entries.get(path) {
                debug!("Cache HIT: {}", path.format_for_log());
                return hit.clone();
            }
            state.generation
        };

        debug!("Cache MISS: {}", path.format_for_log());
        let rendered = self.render(path);

        let mut state = self.lock();
        if state.generation != generation {
            return rendered;
        }
        state
            .entries
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                info!("Cache PUT: {}", path.format_for_log());
                rendered
            })
            .clone()
    }

    /// Renders `path` on behalf of the warm-up pass for `generation`.
    ///
    /// Returns false when the generation is stale or the path was already cached.
    pub fn warm(&self, path: &Path, generation: u64) -> bool {
        {
            let state = self.lock();
            if state.generation != generation || state.entries.contains_key(path) {
                return false;
            }
        }

        let rendered = self.render(path);

        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                "Discarding stale warm-up result for {} (generation {} != {})",
                path.format_for_log(),
                generation,
                state.generation
            );
            return false;
        }
        if state.entries.contains_key(path) {
            return false;
        }
        debug!("Cache WARM: {}", path.format_for_log());
        state.entries.insert(path.to_path_buf(), rendered);
        true
    }

    /// Checks if a preview (or failure) is cached for `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.lock().entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Drops every entry and starts a new generation, which is returned.
    pub fn clear(&self) -> u64 {
        let mut state = self.lock();
        state.entries.clear();
        state.generation += 1;
        info!("Cache cleared, generation {}", state.generation);
        state.generation
    }
}
