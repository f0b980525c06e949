/// Application-level errors
///
/// Every variant maps to one bucket of the user-facing failure taxonomy:
/// bad input is reported inline, transport and provider failures surface as
/// a transient notice, parse failures log the raw payload at debug level,
/// and storage failures degrade the app to a non-persistent session.
#[derive(thiserror::Error, Debug)]
pub enum DenError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Proxy unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Proxy returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Could not parse model output: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Nothing to export")]
    NothingToExport,
}

impl DenError {
    /// Short user-facing line for the notice area of the UI.
    ///
    /// Raw payloads and transport internals stay in the logs; the user only
    /// ever sees one of these.
    pub fn notice(&self) -> String {
        match self {
            DenError::Input(msg) => msg.clone(),
            DenError::Transport(_) => "Could not reach the Den server. Is it running?".to_string(),
            DenError::Provider { status, .. } => {
                format!("The Den server refused the request (status {}).", status)
            }
            DenError::Parse(_) => "The model gave a confusing answer. Try again!".to_string(),
            DenError::Storage(_) => {
                "Saving is unavailable right now; your picks won't persist.".to_string()
            }
            DenError::NothingToExport => "No favorites to export yet.".to_string(),
        }
    }
}

pub type DenResult<T> = Result<T, DenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_hides_parse_details() {
        let err = DenError::Parse("raw model garbage {{{".to_string());
        assert!(!err.notice().contains("garbage"));
    }

    #[test]
    fn test_notice_mentions_provider_status() {
        let err = DenError::Provider {
            status: 502,
            message: "upstream down".to_string(),
        };
        assert!(err.notice().contains("502"));
    }
}
