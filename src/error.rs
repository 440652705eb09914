use thiserror::Error;

/// Main error type for the seating planner
#[derive(Error, Debug)]
pub enum SeatingError {
    #[error("Group source directory not found: {path}")]
    GroupsDirMissing { path: String },

    #[error("No group source files (grp*.csv) found in {path}")]
    NoGroupSources { path: String },

    #[error("No valid guest records found in any group source")]
    NoValidGuests,

    #[error("Group id {group_id} collides with the reserve group id")]
    ReserveIdConflict { group_id: u32 },

    #[error("Table numbers overflow while seating group {group_id}")]
    TableNumberOverflow { group_id: u32 },

    #[error("File I/O error: {path}")]
    FileIO {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("System resource error: {resource}")]
    SystemResource {
        resource: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("General error: {0}")]
    General(#[from] anyhow::Error),
}

impl SeatingError {
    /// Create a file I/O error
    pub fn file_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileIO {
            path: path.into(),
            source,
        }
    }

    /// Create a CSV error for the given file
    pub fn csv(path: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the run can continue past this error.
    ///
    /// Only the structural absence of all input aborts a run; a single bad
    /// source file degrades to "skip and warn".
    pub fn is_recoverable(&self) -> bool {
        match self {
            SeatingError::GroupsDirMissing { .. } => false,
            SeatingError::NoGroupSources { .. } => false,
            SeatingError::NoValidGuests => false,
            SeatingError::ReserveIdConflict { .. } => false,
            SeatingError::TableNumberOverflow { .. } => false,
            SeatingError::Configuration { .. } => false,
            SeatingError::FileIO { .. } => true,
            SeatingError::Csv { .. } => true,
            _ => true,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            SeatingError::GroupsDirMissing { path } => {
                format!("📁 Folder '{}' not found. Create it and place the grp*.csv files inside.", path)
            }
            SeatingError::NoGroupSources { path } => {
                format!("📄 No grp*.csv booking files in '{}'. Nothing to seat.", path)
            }
            SeatingError::NoValidGuests => {
                "🪑 Every booking file was empty after cleaning. No seating table written.".to_string()
            }
            SeatingError::ReserveIdConflict { group_id } => {
                format!(
                    "🔢 Booking group {} uses the reserve group id. Rename the file or set labels.reserve_group_id to an unused id.",
                    group_id
                )
            }
            SeatingError::TableNumberOverflow { group_id } => {
                format!("🔢 Group id {} is too large to number its tables. Use a smaller grp<id>.", group_id)
            }
            SeatingError::FileIO { path, .. } => {
                format!("📁 Could not access {}. Check file permissions and disk space.", path)
            }
            SeatingError::Csv { path, .. } => {
                format!("📊 {} is not a readable CSV file.", path)
            }
            SeatingError::Configuration { message } => {
                format!("⚙️  Bad configuration: {}", message)
            }
            _ => "❌ Seating assignment failed. Check the logs for details.".to_string(),
        }
    }
}

/// Result type alias for convenience
pub type SeatingResult<T> = Result<T, SeatingError>;

/// Error context for adding additional information
pub trait ErrorContext<T> {
    fn with_context(self, context: &str) -> SeatingResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context(self, context: &str) -> SeatingResult<T> {
        self.map_err(|e| SeatingError::SystemResource {
            resource: context.to_string(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_errors_are_fatal() {
        assert!(!SeatingError::NoValidGuests.is_recoverable());
        assert!(!SeatingError::GroupsDirMissing { path: "tempahan".into() }.is_recoverable());
        assert!(!SeatingError::NoGroupSources { path: "tempahan".into() }.is_recoverable());
        assert!(!SeatingError::ReserveIdConflict { group_id: 999 }.is_recoverable());
        assert!(!SeatingError::TableNumberOverflow { group_id: u32::MAX }.is_recoverable());
    }

    #[test]
    fn test_io_errors_are_recoverable() {
        let err = SeatingError::file_io(
            "grp1-a.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_recoverable());
        assert!(err.user_message().contains("grp1-a.csv"));
    }

    #[test]
    fn test_with_context_wraps_source() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let err = result.with_context("output rename").unwrap_err();
        assert!(matches!(err, SeatingError::SystemResource { ref resource, .. } if resource == "output rename"));
    }
}
