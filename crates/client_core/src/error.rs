use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status} without a readable body")]
    Status { endpoint: &'static str, status: u16 },
    #[error("{endpoint} returned a malformed body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid endpoint url for {endpoint}: {source}")]
    Url {
        endpoint: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Why one step of the handshake did not succeed. The server's reason is not inspected.
#[derive(Debug, Error)]
pub enum StepFailure {
    #[error("rejected by server")]
    Rejected { message: Option<String> },
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("account creation failed: {0}")]
    CreateAccount(StepFailure),
    /// The account now exists remotely but no local session was established.
    #[error("sign-in after account creation failed: {0}")]
    SignIn(StepFailure),
}

impl RegistrationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            RegistrationError::CreateAccount(_) => "Could not create your account. Please try again.",
            RegistrationError::SignIn(_) => {
                "Your account was created but signing in failed. Please sign in."
            }
        }
    }

    pub fn account_created(&self) -> bool {
        matches!(self, RegistrationError::SignIn(_))
    }
}
