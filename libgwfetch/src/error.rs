use std::path::PathBuf;
use thiserror::Error;

use super::batch_status::BatchStatus;
use super::segment::TimeSegment;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ChannelListError {
    #[error("Could not load channel list because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("ChannelList failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Channel list row {0} has the wrong number of columns; expected 2 (channel, sampling rate)")]
    BadRowFormat(usize),
    #[error("Channel list row {0} has an unparseable sampling rate: {1}")]
    BadSamplingRate(usize, std::num::ParseIntError),
    #[error("Channel list row {0} has an empty channel name")]
    EmptyChannelName(usize),
}

#[derive(Debug, Error)]
pub enum SegmentListError {
    #[error("Could not load segment list because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("SegmentList failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Segment list row {0} has the wrong number of columns; expected 2 (start, end)")]
    BadRowFormat(usize),
    #[error("Segment list row {0} has an unparseable GPS time: {1}")]
    BadGpsTime(usize, std::num::ParseIntError),
    #[error("Invalid segment: start {0} is not before end {1}")]
    InvertedSegment(i64, i64),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Fetch failed due to transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Remote archive returned status {0} for channel {1}")]
    BadStatus(u16, String),
    #[error("Remote archive returned no samples for channel {0} in [{1}, {2})")]
    NoData(String, i64, i64),
}

#[derive(Debug, Error)]
pub enum SeriesFileError {
    #[error("Could not open series file because {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Series file failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Incorrect magic number {0:#010x} found in series file; not a gwd file")]
    BadMagic(u32),
    #[error("Unsupported series file version {0}; expected {1}")]
    BadVersion(u16, u16),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Discovery failed due to transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Discovery host returned status {0} for {1}")]
    BadStatus(u16, String),
    #[error("Discovery failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Discovery URL {0} has no usable file name")]
    BadUrl(String),
}

/// Per-pair failure in the batch loop. Fetch and filesystem problems are kept
/// distinct so a failed segment can be diagnosed and re-run from the logs alone.
#[derive(Debug, Error)]
pub enum PairError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("filesystem operation failed: {0}")]
    Filesystem(#[from] std::io::Error),
    #[error("series encode failed: {0}")]
    Encode(#[from] SeriesFileError),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Batch failed due to configuration error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Batch failed due to channel list error: {0}")]
    ChannelError(#[from] ChannelListError),
    #[error("Batch failed due to segment list error: {0}")]
    SegmentError(#[from] SegmentListError),
    #[error("Batch failed due to manifest error: {0}")]
    ManifestError(#[from] ManifestError),
    #[error("Batch failed due to discovery error: {0}")]
    DiscoveryError(#[from] DiscoveryError),
    #[error("Batch failed due to Send error: {0}")]
    SendError(#[from] std::sync::mpsc::SendError<BatchStatus>),
}

/// Context attached to every reported pair failure.
#[derive(Debug)]
pub struct PairFailure {
    pub channel: String,
    pub segment: TimeSegment,
    pub cause: PairError,
}
