use thiserror::Error;

/// Errors surfaced while driving menus and git invocations
#[derive(Error, Debug)]
pub enum AppError {
    #[error("`{command}` exited with status {}", exit_code_label(.code))]
    ExternalCommand {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("input closed")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Text shown to the user underneath a generic failure message.
    pub fn detail(&self) -> String {
        match self {
            AppError::ExternalCommand { stderr, .. } if !stderr.trim().is_empty() => {
                stderr.trim_end().to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether the error should abort the whole program instead of the
    /// current handler.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Interrupted | AppError::Io(_))
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

pub type Result<T> = std::result::Result<T, AppError>;
