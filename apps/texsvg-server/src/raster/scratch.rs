//! Scratch files
//!
//! Each request gets its own uniquely named PDF/SVG pair in the scratch
//! directory. Names come from random UUIDs, so concurrent requests never
//! share a file and no locking is needed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Source of unique file stems
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Allocates scratch file pairs under one directory
#[derive(Clone)]
pub struct ScratchSpace {
    dir: PathBuf,
    ids: Arc<dyn IdGenerator>,
}

impl ScratchSpace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_ids(dir, Arc::new(UuidGenerator))
    }

    pub fn with_ids(dir: impl Into<PathBuf>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            dir: dir.into(),
            ids,
        }
    }

    /// Allocate fresh PDF and SVG paths. Nothing is created on disk.
    pub fn allocate(&self) -> ScratchPair {
        let pdf = self.dir.join(format!("{}.pdf", self.ids.next_id()));
        let svg = self.dir.join(format!("{}.svg", self.ids.next_id()));
        ScratchPair {
            pdf,
            svg,
            released: false,
        }
    }
}

/// PDF/SVG paths owned by a single request.
///
/// Removal is scheduled by [`ScratchPair::release`], or on drop if the pair
/// was never released.
#[derive(Debug)]
pub struct ScratchPair {
    pdf: PathBuf,
    svg: PathBuf,
    released: bool,
}

impl ScratchPair {
    pub fn pdf_path(&self) -> &Path {
        &self.pdf
    }

    pub fn svg_path(&self) -> &Path {
        &self.svg
    }

    fn take_paths(&mut self) -> [PathBuf; 2] {
        self.released = true;
        [std::mem::take(&mut self.pdf), std::mem::take(&mut self.svg)]
    }

    /// Schedule removal of both files without waiting for it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn release(mut self) -> JoinHandle<()> {
        tokio::spawn(remove_all(self.take_paths()))
    }
}

impl Drop for ScratchPair {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let paths = self.take_paths();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(remove_all(paths));
            }
            Err(_) => {
                for path in &paths {
                    log_removal(path, std::fs::remove_file(path));
                }
            }
        }
    }
}

async fn remove_all(paths: [PathBuf; 2]) {
    let results = join_all(paths.iter().map(tokio::fs::remove_file)).await;
    for (path, result) in paths.iter().zip(results) {
        log_removal(path, result);
    }
}

fn log_removal(path: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => tracing::trace!("Removed scratch file {}", path.display()),
        // The SVG is never written when pdf2svg fails
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Scratch file {} already gone", path.display())
        }
        Err(e) => tracing::warn!("Failed to remove scratch file {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct CountingIds(AtomicUsize);

    impl IdGenerator for CountingIds {
        fn next_id(&self) -> String {
            format!("scratch-{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    #[test]
    fn test_allocate_uses_generator() {
        let space = ScratchSpace::with_ids("/scratch", Arc::new(CountingIds(AtomicUsize::new(0))));
        let pair = space.allocate();

        assert_eq!(pair.pdf_path(), Path::new("/scratch/scratch-0.pdf"));
        assert_eq!(pair.svg_path(), Path::new("/scratch/scratch-1.svg"));

        // Nothing was written, and dropping outside a runtime must not panic
        drop(pair);
    }

    #[tokio::test]
    async fn test_concurrent_allocations_are_unique() {
        let space = ScratchSpace::new(std::env::temp_dir());

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let space = space.clone();
                tokio::spawn(async move {
                    let pair = space.allocate();
                    (pair.pdf_path().to_path_buf(), pair.svg_path().to_path_buf())
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let (pdf, svg) = handle.await.unwrap();
            assert!(seen.insert(pdf));
            assert!(seen.insert(svg));
        }
        assert_eq!(seen.len(), 128);
    }

    #[tokio::test]
    async fn test_release_removes_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let space = ScratchSpace::new(temp_dir.path());
        let pair = space.allocate();

        tokio::fs::write(pair.pdf_path(), b"%PDF").await.unwrap();
        tokio::fs::write(pair.svg_path(), b"<svg/>").await.unwrap();
        let (pdf, svg) = (pair.pdf_path().to_path_buf(), pair.svg_path().to_path_buf());

        pair.release().await.unwrap();

        assert!(!pdf.exists());
        assert!(!svg.exists());
    }

    #[tokio::test]
    async fn test_release_tolerates_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        let space = ScratchSpace::new(temp_dir.path());
        let pair = space.allocate();

        tokio::fs::write(pair.pdf_path(), b"%PDF").await.unwrap();

        // SVG was never written; removal must still complete quietly
        pair.release().await.unwrap();
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_drop_without_runtime_removes_synchronously() {
        let temp_dir = TempDir::new().unwrap();
        let space = ScratchSpace::new(temp_dir.path());
        let pair = space.allocate();

        std::fs::write(pair.pdf_path(), b"%PDF").unwrap();
        let pdf = pair.pdf_path().to_path_buf();
        drop(pair);

        assert!(!pdf.exists());
    }
}
