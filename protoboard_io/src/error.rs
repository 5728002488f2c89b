use protoboard::LayoutError;

/// The error type for reading and writing card tables and layout documents.
#[derive(Debug)]
pub enum DataError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Layout(LayoutError),
    /// The card table's header lacks these columns.
    MissingColumns(Vec<String>),
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(err) => Some(err),
            DataError::Csv(err) => Some(err),
            DataError::Json(err) => Some(err),
            DataError::Layout(err) => Some(err),
            DataError::MissingColumns(_) => None,
        }
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Io(_) => write!(f, "Could not read or write the data"),
            DataError::Csv(_) => write!(f, "The card table is not valid CSV"),
            DataError::Json(_) => write!(f, "The layout is not a valid layout document"),
            DataError::Layout(_) => write!(f, "The layout cannot be turned into a board"),
            DataError::MissingColumns(columns) => write!(
                f,
                "The card table has no column(s) {}",
                columns.join(", ")
            ),
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err)
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Json(err)
    }
}

impl From<LayoutError> for DataError {
    fn from(err: LayoutError) -> Self {
        DataError::Layout(err)
    }
}

/// Where a diagnostic came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Cards,
    Layout,
}

/// A problem found while importing, that did not stop the import as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: DataSource,
    /// Line in the input, if known.
    pub line: Option<u64>,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match self.source {
            DataSource::Cards => "cards",
            DataSource::Layout => "layout",
        };
        match self.line {
            Some(line) => write!(f, "{} line {}: {}", source, line, self.message),
            None => write!(f, "{}: {}", source, self.message),
        }
    }
}

/// Formats an error with all of its sources, outermost first.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(err) = source {
        message += ": ";
        message += &err.to_string();
        source = err.source();
    }
    message
}
