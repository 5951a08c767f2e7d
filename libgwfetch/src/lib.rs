//! # gwfetch
//!
//! gwfetch is a batch downloader for gravitational-wave detector time-series
//! data. Given a list of channels and a list of GPS time segments, it fetches
//! every (channel, segment) pair from a remote archive, writes each series to
//! a binary file under a deterministic directory layout, and appends one
//! record per saved file to a manifest log for downstream processing.
//!
//! ## Installation
//!
//! If you have not used Rust before, you will most likely need to install the
//! Rust tool chain. See the [Rust docs](https://www.rust-lang.org/tools/install)
//! for installation instructions.
//!
//! To build and install the CLI use `cargo install --path ./gwfetch_cli` from
//! the top level gwfetch repository. The binary will be installed to your
//! cargo install location (typically something like `~/.cargo/bin/`), so you
//! can invoke it from the command line directly.
//!
//! ## Configuration
//!
//! The CLI is driven by a YAML configuration file. A template can be produced
//! with `gwfetch_cli -p config.yaml new`. The format is as follows:
//!
//! ```yml
//! channels_path: None
//! segments_path: None
//! host: https://nds.gwosc.org
//! manifest_path: fin.txt
//! output_root: None
//! fetch_delay_secs: 2
//! ```
//!
//! - `channels_path`: headerless CSV, one `channel,sampling_rate` row per
//!   channel to fetch. The sampling rate is informational only.
//! - `segments_path`: headerless CSV, one `start,end` row per GPS segment.
//! - `host`: base URL of the remote archive.
//! - `manifest_path`: the manifest log to append to.
//! - `output_root`: directory under which all series files are written.
//! - `fetch_delay_secs`: seconds to sleep between successive fetches, as a
//!   rate courtesy to the archive. Set to 0 to disable.
//!
//! ## Output
//!
//! Every (channel, segment) pair produces one file at
//!
//! ```text
//! <output_root>/<channel with : replaced by _>/<start>_<end>/<channel>_<start>_<end>.gwd
//! ```
//!
//! and one line in the manifest:
//!
//! ```text
//! <absolute file path> <t0> <dt> 0 0
//! ```
//!
//! where `t0` and `dt` are the actual start time and sample interval reported
//! by the archive, and the trailing zeros are reserved fields expected by the
//! downstream consumer. The manifest is append-only and never deduplicated;
//! re-running a batch overwrites the series files in place and appends a fresh
//! line per pair.
//!
//! A failed fetch for one pair does not abort the batch: the failure is
//! logged with its channel, segment, and cause, recorded in the returned
//! [`batch::BatchReport`], and the remaining pairs are processed. Only
//! manifest write failures abort the run.
//!
//! There is also a discovery mode (`gwfetch_cli discover`) which resolves each
//! segment to a list of frame file URLs via a datafind-style host and
//! downloads them verbatim, reporting a typed outcome per URL.
pub mod batch;
pub mod batch_status;
pub mod channel;
pub mod config;
pub mod discovery;
pub mod error;
pub mod manifest;
pub mod segment;
pub mod series;
pub mod series_file;
