use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::ManifestError;

/// One line of the manifest: the absolute path of a written series file, its
/// actual start time and sample interval, and two reserved fields that the
/// downstream consumer expects to be zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestRecord {
    pub path: PathBuf,
    pub t0: f64,
    pub dt: f64,
}

impl ManifestRecord {
    pub fn new(path: PathBuf, t0: f64, dt: f64) -> Self {
        Self { path, t0, dt }
    }
}

impl std::fmt::Display for ManifestRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} 0 0", self.path.display(), self.t0, self.dt)
    }
}

/// Append-only writer for the manifest log.
///
/// The manifest is the authoritative record of what a batch produced, so it is
/// opened once for the whole run, each record is written as a single call and
/// flushed immediately, and any write failure is fatal to the run. Records are
/// never deduplicated; re-running a batch appends a fresh line per pair.
#[derive(Debug)]
pub struct ManifestWriter {
    file: File,
    path: PathBuf,
}

impl ManifestWriter {
    /// Open the manifest at `path` in append mode, creating it if absent.
    pub fn open_append(path: &Path) -> Result<Self, ManifestError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Append one record as a single complete line and flush it, so partial
    /// progress survives a crash mid-batch.
    pub fn append(&mut self, record: &ManifestRecord) -> Result<(), ManifestError> {
        let line = format!("{record}\n");
        self.file.write_all(line.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_line_format() {
        let record = ManifestRecord::new(
            PathBuf::from("/data/aux/H1_X/1238166018_1238170549/H1_X_1238166018_1238170549.gwd"),
            1238166018.0,
            0.0625,
        );
        assert_eq!(
            record.to_string(),
            "/data/aux/H1_X/1238166018_1238170549/H1_X_1238166018_1238170549.gwd 1238166018 0.0625 0 0"
        );
    }

    #[test]
    fn test_append_accumulates_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fin.txt");

        let mut writer = ManifestWriter::open_append(&path).unwrap();
        writer
            .append(&ManifestRecord::new(PathBuf::from("/a.gwd"), 1.0, 0.5))
            .unwrap();
        drop(writer);

        // Re-opening appends rather than truncating
        let mut writer = ManifestWriter::open_append(&path).unwrap();
        writer
            .append(&ManifestRecord::new(PathBuf::from("/a.gwd"), 1.0, 0.5))
            .unwrap();
        drop(writer);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "/a.gwd 1 0.5 0 0\n/a.gwd 1 0.5 0 0\n");
    }
}
