//! `WeatherProvider` replaying recorded snapshots from a directory.
//!
//! Each location is stored as `<location>.json` holding a
//! [`SnapshotRecord`]. The provider opens the directory once through a
//! `cap-std` handle, so lookups cannot escape it regardless of the key.

use std::io;

use afterglow_core::{LocationKey, SnapshotPair, WeatherProvider, WeatherProviderError};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

use crate::SnapshotRecord;

/// Extension appended to every location key.
const SNAPSHOT_EXTENSION: &str = "json";

/// Reads `<dir>/<location>.json` snapshot records.
///
/// A missing file is reported as
/// [`WeatherProviderError::Unavailable`]; undecodable or invalid records are
/// [`WeatherProviderError::Malformed`].
#[derive(Debug)]
pub struct FileWeatherProvider {
    root: Utf8PathBuf,
    dir: fs_utf8::Dir,
}

impl FileWeatherProvider {
    /// Open `root` as the snapshot directory.
    ///
    /// # Errors
    /// Returns an [`io::Error`] when the directory cannot be opened.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        let dir = fs_utf8::Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory the provider reads from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// File name holding the record for `location`.
    #[must_use]
    pub fn file_name(location: &LocationKey) -> String {
        format!("{location}.{SNAPSHOT_EXTENSION}")
    }
}

impl WeatherProvider for FileWeatherProvider {
    fn fetch_snapshot(&self, location: &LocationKey) -> Result<SnapshotPair, WeatherProviderError> {
        let file_name = Self::file_name(location);
        log::debug!("reading snapshot {file_name} from {}", self.root);
        let text = self.dir.read_to_string(&file_name).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                WeatherProviderError::unavailable(location, "no snapshot recorded")
            } else {
                let message = format!("failed to read {file_name}: {err}");
                WeatherProviderError::unavailable(location, message)
            }
        })?;
        SnapshotRecord::from_json(&text)
            .map(SnapshotRecord::into_pair)
            .map_err(|err| WeatherProviderError::malformed(location, err.to_string()))
    }
}
