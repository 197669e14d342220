//! Camera permission and scan gating for the barcode screen.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Answer from the platform permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraPermission {
    #[default]
    Unknown,
    Denied,
    Granted,
}

impl From<PermissionStatus> for CameraPermission {
    fn from(status: PermissionStatus) -> Self {
        match status {
            PermissionStatus::Granted => CameraPermission::Granted,
            PermissionStatus::Denied | PermissionStatus::Undetermined => CameraPermission::Denied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedCode {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
}

#[async_trait]
pub trait PermissionProvider: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerView {
    RequestingPermission,
    NoAccess,
    Scanning {
        last_scan: Option<ScannedCode>,
        can_rearm: bool,
    },
}

#[derive(Debug, Default)]
struct ScannerState {
    permission: CameraPermission,
    mounted: bool,
    scanned: bool,
    last_scan: Option<ScannedCode>,
}

pub struct BarcodeScanner {
    permissions: Arc<dyn PermissionProvider>,
    state: Mutex<ScannerState>,
}

impl BarcodeScanner {
    pub fn new(permissions: Arc<dyn PermissionProvider>) -> Self {
        Self {
            permissions,
            state: Mutex::new(ScannerState::default()),
        }
    }

    /// Asks for camera access the first time the screen shows up.
    pub async fn mount(&self) -> CameraPermission {
        {
            let mut state = self.state.lock().await;
            if state.mounted {
                return state.permission;
            }
            state.mounted = true;
        }
        self.request().await
    }

    /// Manual "Allow Camera" action; only meaningful after a denial.
    pub async fn retry_permission(&self) -> CameraPermission {
        {
            let state = self.state.lock().await;
            if state.permission != CameraPermission::Denied {
                return state.permission;
            }
        }
        self.request().await
    }

    async fn request(&self) -> CameraPermission {
        let status = self.permissions.request_permission().await;
        let permission = CameraPermission::from(status);
        info!(?status, "camera permission resolved");
        self.state.lock().await.permission = permission;
        permission
    }

    /// Returns whether the code was accepted. Codes are dropped until [`rearm`](Self::rearm).
    pub async fn on_scanned(&self, code: ScannedCode) -> bool {
        let mut state = self.state.lock().await;
        if state.permission != CameraPermission::Granted || state.scanned {
            debug!(kind = %code.kind, "discarding scan while scanner is not armed");
            return false;
        }
        info!(kind = %code.kind, data = %code.data, "barcode scanned");
        state.scanned = true;
        state.last_scan = Some(code);
        true
    }

    pub async fn rearm(&self) {
        self.state.lock().await.scanned = false;
    }

    pub async fn view(&self) -> ScannerView {
        let state = self.state.lock().await;
        match state.permission {
            CameraPermission::Unknown => ScannerView::RequestingPermission,
            CameraPermission::Denied => ScannerView::NoAccess,
            CameraPermission::Granted => ScannerView::Scanning {
                last_scan: state.last_scan.clone(),
                can_rearm: state.scanned,
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
