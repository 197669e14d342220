//! Client side of the sign-up flow: form validation, the create-account /
//! sign-in handshake, the shared session store, and the barcode screen's
//! permission gate.

pub mod api;
pub mod error;
pub mod reducer;
pub mod registration;
pub mod scanner;
pub mod session;
pub mod validation;

pub use api::{AuthApi, HttpAuthApi};
pub use error::{ApiError, RegistrationError, StepFailure};
pub use reducer::{reduce, FormEvent, FormState, SubmissionPhase, Transition};
pub use registration::{FormView, RegistrationController, RegistrationWorkflow, SubmitOutcome};
pub use scanner::{
    BarcodeScanner, CameraPermission, PermissionProvider, PermissionStatus, ScannedCode,
    ScannerView,
};
pub use session::{Session, SessionEvent, SessionStore};
pub use validation::{field_errors, validate, FieldErrors, ValidationResult};
