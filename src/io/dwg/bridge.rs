//! Pluggable DWG decoding bridge and its process-wide slot

use super::DwgFileSignature;
use crate::document::Document;
use crate::error::{DxfError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Decodes DWG bytes into a [`Document`]
pub trait DwgBridge: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Decode a complete DWG file
    fn decode(&self, bytes: &[u8]) -> Result<Document>;
}

/// Acquires a bridge from a module location
#[async_trait]
pub trait BridgeLoader: Send + Sync {
    /// Load the bridge module found at `path`
    async fn load(&self, path: &Path) -> Result<Arc<dyn DwgBridge>>;
}

/// Bridge backed by a module file that can only read the file header.
///
/// It recognises the drawing version but cannot decode the drawing
/// itself, so [`DwgBridge::decode`] always fails with a description of
/// what was found.
#[derive(Debug, Clone)]
pub struct HeaderOnlyBridge {
    module_path: PathBuf,
}

impl HeaderOnlyBridge {
    pub fn new(module_path: impl Into<PathBuf>) -> Self {
        Self {
            module_path: module_path.into(),
        }
    }

    /// Location of the module this bridge was loaded from
    pub fn module_path(&self) -> &Path {
        &self.module_path
    }
}

impl DwgBridge for HeaderOnlyBridge {
    fn name(&self) -> &str {
        "header-only"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let release = DwgFileSignature::read(bytes)
            .map(|sig| sig.release_name())
            .unwrap_or_else(|_| "unrecognised release".to_string());
        Err(DxfError::UnsupportedFormat(format!(
            "full DWG parsing unavailable ({release})"
        )))
    }
}

/// Default loader: succeeds when a module file exists at the path
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleFileLoader;

#[async_trait]
impl BridgeLoader for ModuleFileLoader {
    async fn load(&self, path: &Path) -> Result<Arc<dyn DwgBridge>> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(Arc::new(HeaderOnlyBridge::new(path))),
            _ => Err(DxfError::BridgeAcquisition(format!(
                "DWG decoding module not available at {}",
                path.display()
            ))),
        }
    }
}

type SlotOutcome = std::result::Result<Arc<dyn DwgBridge>, String>;

/// Memoized bridge acquisition.
///
/// The first caller runs the loader; callers arriving while that attempt
/// is in flight wait for it. The outcome, success or failure, is kept for
/// the lifetime of the slot and never retried.
pub struct BridgeSlot {
    cell: OnceCell<SlotOutcome>,
    attempts: AtomicUsize,
}

static GLOBAL_SLOT: Lazy<Arc<BridgeSlot>> = Lazy::new(|| Arc::new(BridgeSlot::new()));

impl BridgeSlot {
    /// Create an unattempted slot
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            attempts: AtomicUsize::new(0),
        }
    }

    /// The process-wide slot
    pub fn global() -> Arc<BridgeSlot> {
        Arc::clone(&GLOBAL_SLOT)
    }

    /// Get the bridge, running `loader` only if no attempt has been made
    pub async fn acquire(&self, loader: &dyn BridgeLoader, path: &Path) -> Result<Arc<dyn DwgBridge>> {
        let outcome = self
            .cell
            .get_or_init(|| async {
                self.attempts.fetch_add(1, Ordering::SeqCst);
                match loader.load(path).await {
                    Ok(bridge) => {
                        tracing::debug!(bridge = bridge.name(), path = %path.display(), "DWG bridge acquired");
                        Ok(bridge)
                    }
                    Err(err) => {
                        let message = match err {
                            DxfError::BridgeAcquisition(message) => message,
                            other => other.to_string(),
                        };
                        tracing::warn!(path = %path.display(), error = %message, "DWG bridge unavailable");
                        Err(message)
                    }
                }
            })
            .await;

        outcome.clone().map_err(DxfError::BridgeAcquisition)
    }

    /// True once an acquisition attempt has finished
    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    /// Number of times the loader has been run
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for BridgeSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct SlowLoader {
        calls: AtomicUsize,
        succeed: bool,
    }

    #[async_trait]
    impl BridgeLoader for SlowLoader {
        async fn load(&self, path: &Path) -> Result<Arc<dyn DwgBridge>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.succeed {
                Ok(Arc::new(HeaderOnlyBridge::new(path)))
            } else {
                Err(DxfError::BridgeAcquisition("no module".into()))
            }
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_attempt() {
        let slot = Arc::new(BridgeSlot::new());
        let loader = Arc::new(SlowLoader {
            calls: AtomicUsize::new(0),
            succeed: true,
        });

        let mut handles = Vec::new();
        for _ in 0..8 {
            let slot = slot.clone();
            let loader = loader.clone();
            handles.push(tokio::spawn(async move {
                slot.acquire(loader.as_ref(), Path::new("bridge.wasm")).await.is_ok()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(slot.attempts(), 1);
        assert!(slot.is_resolved());
    }

    #[tokio::test]
    async fn test_failure_is_cached() {
        let slot = BridgeSlot::new();
        let loader = SlowLoader {
            calls: AtomicUsize::new(0),
            succeed: false,
        };

        let first = slot.acquire(&loader, Path::new("missing.wasm")).await;
        let second = slot.acquire(&loader, Path::new("missing.wasm")).await;

        assert!(matches!(first, Err(DxfError::BridgeAcquisition(ref m)) if m == "no module"));
        assert!(second.is_err());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_module_file_loader_missing_path() {
        let result = ModuleFileLoader.load(Path::new("/nonexistent/libredwg.wasm")).await;
        assert!(matches!(result, Err(DxfError::BridgeAcquisition(_))));
    }

    #[test]
    fn test_global_slot_is_shared() {
        assert!(Arc::ptr_eq(&BridgeSlot::global(), &BridgeSlot::global()));
    }

    #[test]
    fn test_header_only_bridge_reports_release() {
        let mut bytes = vec![0u8; 0x20];
        bytes[..6].copy_from_slice(b"AC1032");
        let err = HeaderOnlyBridge::new("x.wasm").decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("AutoCAD 2018"));
    }
}
