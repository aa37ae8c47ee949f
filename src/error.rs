use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Missing parameter <{parameter}>.")]
    MissingParameter { parameter: String },

    #[error("{message}")]
    UnsupportedCombination { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractorError {
    pub(crate) fn missing(parameter: &str) -> Self {
        ExtractorError::MissingParameter {
            parameter: parameter.to_string(),
        }
    }

    pub(crate) fn unsupported(message: &str) -> Self {
        ExtractorError::UnsupportedCombination {
            message: message.to_string(),
        }
    }

    /// Process exit code reported by the command-line tool.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExtractorError::MissingParameter { .. } => 2,
            ExtractorError::UnsupportedCombination { .. } => 3,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractorError {
    fn user_message(&self) -> String {
        match self {
            ExtractorError::MissingParameter { parameter } => {
                format!("Missing required parameter: {}", parameter)
            }
            ExtractorError::UnsupportedCombination { message } => {
                format!("Unsupported option combination: {}", message)
            }
            ExtractorError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ExtractorError::Io(e) => format!("IO operation failed: {}", e),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractorError::MissingParameter { parameter } => Some(format!(
                "Set <{}> in the configuration file or pass it on the command line.",
                parameter
            )),
            ExtractorError::UnsupportedCombination { .. } => Some(
                "Pick one selection mode: apiName, mutipleAPIs, apiVersionSetName or splitAPIs.".to_string()
            ),
            ExtractorError::Config { .. } => Some(
                "Check your configuration file syntax. Generate a template with --generate-config.".to_string()
            ),
            ExtractorError::Io(_) => Some(
                "Ensure the configuration file path exists and is readable/writable.".to_string()
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;
