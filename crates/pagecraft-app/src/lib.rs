//! Pagecraft headless host.
//!
//! Loads a gesture script and an optional engine config from disk, plays the
//! script through the core [`Editor`](pagecraft_core::Editor) and reports the
//! final element records, guides and selection.

pub mod script;

use pagecraft_core::EditorConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use script::{Output, Script, Step, run};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_script(path: &Path) -> Result<Script, AppError> {
    let script: Script = read_json(path)?;
    log::info!(
        "Loaded script {} ({} elements, {} steps)",
        path.display(),
        script.elements.len(),
        script.steps.len()
    );
    Ok(script)
}

/// Read an engine config. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<EditorConfig, AppError> {
    read_json(path)
}

/// Serialize the run output.
pub fn render_output(output: &Output, pretty: bool) -> Result<String, AppError> {
    let text = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::SnapPolicy;
    use std::io::Write;

    #[test]
    fn test_load_script_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"canvas": {{"width": 800, "height": 600}}, "steps": [{{"op": "zoom_in"}}]}}"#
        )
        .unwrap();

        let script = load_script(file.path()).unwrap();
        assert_eq!(script.canvas.width, 800.0);
        assert_eq!(script.steps.len(), 1);

        let output = run(&script, EditorConfig::default());
        assert_eq!(output.zoom, 110);
        assert!(output.elements.is_empty());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"snap_threshold": 8, "snap_policy": "last_match"}}"#).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.snap_threshold, 8.0);
        assert_eq!(config.snap_policy, SnapPolicy::LastMatch);
        assert_eq!(config.min_width, 50.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_script(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(AppError::Io { .. })));
    }

    #[test]
    fn test_bad_json_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(load_script(file.path()), Err(AppError::Json { .. })));
    }

    #[test]
    fn test_render_output() {
        let output = run(&Script::default(), EditorConfig::default());
        let compact = render_output(&output, false).unwrap();
        assert!(compact.starts_with(r#"{"zoom":100"#));
        let pretty = render_output(&output, true).unwrap();
        assert!(pretty.contains('\n'));
    }
}
