use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum TokenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),
}

#[derive(Error, Debug, Diagnostic)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}")]
    #[diagnostic(
        code(snapshot::read),
        help("The file exists but could not be read. Missing snapshot files are skipped, unreadable ones are not.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot")]
    #[diagnostic(
        code(snapshot::malformed),
        help("Layer snapshots must follow the variables export shape: {{ meta: {{ variableCollections, variables }} }}.")
    )]
    Malformed {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}")]
    #[diagnostic(code(config::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration syntax")]
    #[diagnostic(code(config::malformed), help("Configuration files are TOML."))]
    Malformed {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(config::invalid),
        help("Known sections are [layers] (primitive, semantic, component) and [output] (css, docs, w3c_dir).")
    )]
    Invalid { message: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum EmitError {
    #[error("Failed to write artifact {path}")]
    #[diagnostic(code(emit::write))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize artifact as JSON")]
    #[diagnostic(code(emit::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize artifact as YAML")]
    #[diagnostic(code(emit::yaml))]
    Yaml(#[from] serde_yaml::Error),
}
