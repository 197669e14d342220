use super::*;
use std::collections::VecDeque;

struct ScriptedPermissions {
    answers: Mutex<VecDeque<PermissionStatus>>,
    requests: Mutex<u32>,
}

impl ScriptedPermissions {
    fn new(answers: impl IntoIterator<Item = PermissionStatus>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into_iter().collect()),
            requests: Mutex::new(0),
        })
    }

    async fn requests(&self) -> u32 {
        *self.requests.lock().await
    }
}

#[async_trait]
impl PermissionProvider for ScriptedPermissions {
    async fn request_permission(&self) -> PermissionStatus {
        *self.requests.lock().await += 1;
        self.answers
            .lock()
            .await
            .pop_front()
            .unwrap_or(PermissionStatus::Denied)
    }
}

fn code(data: &str) -> ScannedCode {
    ScannedCode {
        kind: "org.iso.QRCode".to_string(),
        data: data.to_string(),
    }
}

#[tokio::test]
async fn shows_requesting_until_mounted() {
    let scanner = BarcodeScanner::new(ScriptedPermissions::new([PermissionStatus::Granted]));
    assert_eq!(scanner.view().await, ScannerView::RequestingPermission);
    assert!(!scanner.on_scanned(code("early")).await);
}

#[tokio::test]
async fn permission_is_requested_once_on_mount() {
    let permissions = ScriptedPermissions::new([PermissionStatus::Granted]);
    let scanner = BarcodeScanner::new(permissions.clone());

    assert_eq!(scanner.mount().await, CameraPermission::Granted);
    assert_eq!(scanner.mount().await, CameraPermission::Granted);
    assert_eq!(permissions.requests().await, 1);
    assert_eq!(
        scanner.view().await,
        ScannerView::Scanning {
            last_scan: None,
            can_rearm: false
        }
    );
}

#[tokio::test]
async fn denied_permission_can_be_requested_again() {
    let permissions =
        ScriptedPermissions::new([PermissionStatus::Undetermined, PermissionStatus::Granted]);
    let scanner = BarcodeScanner::new(permissions.clone());

    assert_eq!(scanner.mount().await, CameraPermission::Denied);
    assert_eq!(scanner.view().await, ScannerView::NoAccess);
    assert!(!scanner.on_scanned(code("denied")).await);

    assert_eq!(scanner.retry_permission().await, CameraPermission::Granted);
    assert_eq!(scanner.retry_permission().await, CameraPermission::Granted);
    assert_eq!(permissions.requests().await, 2);
}

#[tokio::test]
async fn scans_are_dropped_until_rearmed() {
    let scanner = BarcodeScanner::new(ScriptedPermissions::new([PermissionStatus::Granted]));
    scanner.mount().await;

    assert!(scanner.on_scanned(code("first")).await);
    assert!(!scanner.on_scanned(code("second")).await);
    assert_eq!(
        scanner.view().await,
        ScannerView::Scanning {
            last_scan: Some(code("first")),
            can_rearm: true
        }
    );

    scanner.rearm().await;
    assert!(scanner.on_scanned(code("third")).await);
    assert_eq!(
        scanner.view().await,
        ScannerView::Scanning {
            last_scan: Some(code("third")),
            can_rearm: true
        }
    );
}

#[test]
fn scanned_code_uses_platform_field_names() {
    let parsed: ScannedCode =
        serde_json::from_str(r#"{"type":"ean13","data":"4006381333931"}"#).expect("parse");
    assert_eq!(parsed.kind, "ean13");
    assert_eq!(parsed.data, "4006381333931");
}
