//! Test helpers for writing snapshot records and stubbing providers.

use std::sync::Arc;

use afterglow_core::WeatherProvider;
use afterglow_core::test_support::{sample_astronomy, sample_weather};
use afterglow_data::SnapshotRecord;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use super::*;
use crate::quality::{QualityConfig, QualityProviderBuilder};

/// Temporary directory exposed as a UTF-8 path.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write the sample snapshot record to `<root>/<name>` and return its path.
    pub(super) fn write_sample_record(&self, name: &str) -> Utf8PathBuf {
        let record = SnapshotRecord {
            weather: sample_weather(),
            astronomy: sample_astronomy(),
        };
        let payload = serde_json::to_string_pretty(&record).expect("serialise record");
        self.write(name, payload.as_bytes())
    }

    pub(super) fn write(&self, name: &str, contents: &[u8]) -> Utf8PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }
}

/// Builder handing out a shared provider so tests can inspect its calls.
#[derive(Debug)]
pub(super) struct SharedProviderBuilder<P> {
    pub(super) provider: Arc<P>,
}

impl<P: WeatherProvider + 'static> QualityProviderBuilder for SharedProviderBuilder<P> {
    fn build(&self, _config: &QualityConfig) -> Result<Box<dyn WeatherProvider>, CliError> {
        Ok(Box::new(Arc::clone(&self.provider)))
    }
}

/// Decode every pretty-printed JSON document written to `stdout`.
pub(super) fn decode_documents<T: serde::de::DeserializeOwned>(stdout: &[u8]) -> Vec<T> {
    serde_json::Deserializer::from_slice(stdout)
        .into_iter::<T>()
        .collect::<Result<Vec<_>, _>>()
        .expect("output should be a stream of JSON documents")
}
