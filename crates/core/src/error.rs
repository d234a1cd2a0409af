use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Select only a .java file or a repository containing .java files. Got `{}`.", .path)]
    InvalidSelection { path: String },

    #[error("Error accessing path `{}`: {}", .path, .original)]
    Access {
        path: String,
        original: std::io::Error,
    },

    #[error("Failed to start `{}`: {}", .program, .reason)]
    SpawnFailed { program: String, reason: String },

    #[error("{}", .0)]
    Subprocess(String),

    #[error("The destination directory `{}` could not be found. It may not exist yet or may have been moved. Please run the tool to proceed.", .path)]
    NotFound { path: String },

    #[error("Could not open `{}`: {}", .path, .reason)]
    OpenFailed { path: String, reason: String },

    #[error("A mutation run is already in progress. Stop it before starting another.")]
    RunInProgress,

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_selection(path: String) -> Self {
        Self::InvalidSelection { path }
    }

    pub fn access(path: String, original: std::io::Error) -> Self {
        Self::Access { path, original }
    }

    pub fn spawn_failed(program: String, reason: String) -> Self {
        Self::SpawnFailed { program, reason }
    }

    pub fn not_found(path: String) -> Self {
        Self::NotFound { path }
    }

    pub fn open_failed(path: String, reason: String) -> Self {
        Self::OpenFailed { path, reason }
    }

    /// Title used when the error is shown in a message dialog.
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidSelection { .. } => "Invalid Selection",
            Self::NotFound { .. } => "Not Found",
            Self::OpenFailed { .. } => "Error Opening Folder",
            Self::RunInProgress => "Run In Progress",
            Self::Access { .. }
            | Self::SpawnFailed { .. }
            | Self::Subprocess(_)
            | Self::Stdio(_) => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_match_dialog_kinds() {
        assert_eq!(
            Error::invalid_selection("a.txt".to_string()).title(),
            "Invalid Selection"
        );
        assert_eq!(Error::not_found("/x".to_string()).title(), "Not Found");
        assert_eq!(
            Error::open_failed("/x".to_string(), "boom".to_string()).title(),
            "Error Opening Folder"
        );
        assert_eq!(Error::Subprocess("trace".to_string()).title(), "Error");
    }

    #[test]
    fn test_subprocess_message_is_opaque() {
        let block = "Exception in thread \"main\"\n\tat Main.main(Main.java:3)\n";
        assert_eq!(Error::Subprocess(block.to_string()).to_string(), block);
    }
}
