/// Errors that prevent a scene from starting. Nothing inside a tick can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    InvalidConfig { field: &'static str, reason: String },
    InvalidBounds { width: f32, height: f32 },
    TextureUnavailable(String),
    ConfigParse(String),
}

impl SetupError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
            Self::InvalidBounds { width, height } => {
                write!(f, "invalid world bounds {width}x{height}")
            },
            Self::TextureUnavailable(asset) => write!(f, "texture unavailable: {asset}"),
            Self::ConfigParse(m) => write!(f, "config parse error: {m}"),
        }
    }
}

impl std::error::Error for SetupError {}
