use std::env;
use std::str::FromStr;

use arthra_export::styles::DocumentStyles;
use arthra_export::ExportFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    S3,
}

impl FromStr for StorageBackend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "s3" => Ok(StorageBackend::S3),
            other => Err(eyre::eyre!("unknown storage backend: {other}")),
        }
    }
}

/// Runtime configuration, read once from the environment at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `ARTHRA_STORAGE`: `memory` (default) or `s3`.
    pub storage: StorageBackend,
    /// `ARTHRA_BUCKET`: bucket for the S3 store.
    pub bucket: String,
    /// `ARTHRA_REPORT_FORMAT`: `pdf` (default) or `docx`.
    pub report_format: ExportFormat,
    /// `ARTHRA_LISTEN`: socket address to serve on instead of the Lambda runtime.
    pub listen: Option<String>,
    /// `ARTHRA_REPORT_STYLES`: optional path to a JSON [`DocumentStyles`] file.
    pub styles: DocumentStyles,
}

impl AppConfig {
    pub fn from_env() -> eyre::Result<Self> {
        let storage = match env::var("ARTHRA_STORAGE") {
            Ok(v) => v.parse::<StorageBackend>()?,
            Err(_) => StorageBackend::Memory,
        };
        let bucket = env::var("ARTHRA_BUCKET").unwrap_or_else(|_| "arthra".to_string());
        let report_format = match env::var("ARTHRA_REPORT_FORMAT") {
            Ok(v) => v.parse::<ExportFormat>()?,
            Err(_) => ExportFormat::default(),
        };
        let listen = env::var("ARTHRA_LISTEN").ok().filter(|v| !v.is_empty());
        let styles = match env::var("ARTHRA_REPORT_STYLES") {
            Ok(path) => load_styles(&path)?,
            Err(_) => DocumentStyles::default(),
        };

        Ok(Self {
            storage,
            bucket,
            report_format,
            listen,
            styles,
        })
    }
}

fn load_styles(path: &str) -> eyre::Result<DocumentStyles> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read report styles at {path}: {e}"))?;
    let styles: DocumentStyles = serde_json::from_str(&contents)?;
    tracing::info!(path, "loaded report styles");
    Ok(styles)
}
