use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status. `body` is the raw response text.
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Element not found: {id}")]
    MissingElement { id: String },

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },
}

/// How a failed calculation is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with a non-success status.
    Server,
    /// The exchange failed, or its answer could not be decoded or displayed.
    TransportOrParse,
}

impl ErrorKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Server => "Erreur : ",
            Self::TransportOrParse => "Erreur réseau ou serveur : ",
        }
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Server { .. } => ErrorKind::Server,
            _ => ErrorKind::TransportOrParse,
        }
    }

    /// The text shown to the user for this failure.
    ///
    /// Server errors surface the body verbatim; everything else uses the
    /// error's own description.
    pub fn user_message(&self) -> String {
        let detail = match self {
            Self::Server { body, .. } => body.clone(),
            other => other.to_string(),
        };
        format!("{}{}", self.kind().prefix(), detail)
    }
}
