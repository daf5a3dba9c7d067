//! Error types shared by the appdetect crates

use std::path::PathBuf;

use crate::domain::ArtifactCoordinates;

/// Descriptor parsing errors. Fatal for the module being parsed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML parse error at byte {position}: {message}")]
    Xml { message: String, position: u64 },

    #[error("Expected <project> root element, found <{found}>")]
    UnexpectedRoot { found: String },

    #[error("Unexpected end of document inside <{element}>")]
    UnexpectedEof { element: String },

    #[error("Document contains no <project> element")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Remote descriptor repository errors
///
/// These never abort a resolution: the resolver logs them and continues with
/// whatever it has absorbed so far. `Clone` so that a memoized failure can be
/// shared by every waiter on the same cache entry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("host '{host}' is not an allowed descriptor repository")]
    HostNotAllowed { host: String },

    #[error("invalid artifact coordinates '{coordinates}': {reason}")]
    InvalidCoordinates {
        coordinates: ArtifactCoordinates,
        reason: String,
    },

    #[error("invalid repository URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("descriptor not found: {coordinates}")]
    NotFound { coordinates: ArtifactCoordinates },

    #[error("repository HTTP error: {message}, status={status:?}")]
    Http {
        message: String,
        status: Option<u16>,
    },

    #[error("remote repository disabled (offline mode)")]
    Offline,
}

/// Errors that abort the resolution of a descriptor tree
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("failed to parse descriptor {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to read descriptor {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("descriptor inheritance cycle: {}", render_chain(chain))]
    Cycle { chain: Vec<ArtifactCoordinates> },
}

fn render_chain(chain: &[ArtifactCoordinates]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Runtime configuration file errors
///
/// A file that fails to parse is skipped with a warning; the remaining files
/// still contribute to the module's configuration.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("malformed properties file at line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("malformed YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-module analysis errors
///
/// Returned for one module only; the analysis of other modules proceeds.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no descriptor found in module {}", path.display())]
    MissingDescriptor { path: PathBuf },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_error_renders_chain() {
        let error = ResolutionError::Cycle {
            chain: vec![
                ArtifactCoordinates::new("g", "a", "1"),
                ArtifactCoordinates::new("g", "b", "1"),
                ArtifactCoordinates::new("g", "a", "1"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "descriptor inheritance cycle: g:a:1 -> g:b:1 -> g:a:1"
        );
    }
}
