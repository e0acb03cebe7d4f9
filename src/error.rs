use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of the persistence layer. Everything here aborts the
/// run and bubbles up as the terminal error; non-fatal source noise is
/// handled with warnings instead.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not encode {target} as JSON")]
    EncodeJson {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode {target} as YAML")]
    EncodeYaml {
        target: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
