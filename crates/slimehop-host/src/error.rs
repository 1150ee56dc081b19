use slimehop_core::error::SetupError;

#[derive(Debug)]
pub enum HostError {
    /// The scene refused to start.
    Setup(SetupError),
    /// The tick loop task panicked or was cancelled.
    Session(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup(e) => write!(f, "scene setup failed: {e}"),
            Self::Session(m) => write!(f, "session failed: {m}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Setup(e) => Some(e),
            Self::Session(_) => None,
        }
    }
}

impl From<SetupError> for HostError {
    fn from(e: SetupError) -> Self {
        Self::Setup(e)
    }
}
