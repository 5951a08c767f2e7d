use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;

use super::batch_status::BatchStatus;
use super::channel::{Channel, ChannelList};
use super::config::Config;
use super::error::{BatchError, PairError, PairFailure};
use super::manifest::{ManifestRecord, ManifestWriter};
use super::segment::{SegmentList, TimeSegment};
use super::series::SeriesSource;
use super::series_file;

/// What happened to one (channel, segment) pair.
#[derive(Debug)]
pub enum PairOutcome {
    Saved {
        channel: String,
        segment: TimeSegment,
        path: PathBuf,
    },
    Failed(PairFailure),
}

/// Typed summary of a whole batch run, one outcome per attempted pair, in
/// attempt order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<PairOutcome>,
}

impl BatchReport {
    pub fn n_saved(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PairOutcome::Saved { .. }))
            .count()
    }

    pub fn n_failed(&self) -> usize {
        self.outcomes.len() - self.n_saved()
    }

    pub fn failures(&self) -> impl Iterator<Item = &PairFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            PairOutcome::Failed(failure) => Some(failure),
            PairOutcome::Saved { .. } => None,
        })
    }
}

/// The main loop of gwfetch.
///
/// Walks the full cross product of channels and segments in row-major order
/// (channels outer, segments inner, both in input-file order). For each pair:
/// create the output directory, fetch the series, write it to disk, and append
/// one record to the manifest.
///
/// A fetch or filesystem failure for one pair is logged and recorded in the
/// report, and the batch moves on to the next pair. A manifest write failure
/// aborts the whole run, since the manifest is the authoritative record of
/// what was produced.
pub fn run_batch(
    config: &Config,
    source: &dyn SeriesSource,
    tx: &Sender<BatchStatus>,
) -> Result<BatchReport, BatchError> {
    let channels = ChannelList::from_csv(&config.channels_path)?;
    let segments = SegmentList::from_csv(&config.segments_path)?;
    let mut manifest = ManifestWriter::open_append(&config.manifest_path)?;

    let total_pairs = channels.len() * segments.len();
    log::info!(
        "Fetching {} channels x {} segments = {} series from {}...",
        channels.len(),
        segments.len(),
        total_pairs,
        config.host
    );

    let mut report = BatchReport::default();
    let mut pair_index: usize = 0;
    for channel in &channels.channels {
        for segment in &segments.segments {
            pair_index += 1;
            // Rate courtesy to the archive; no sleep before the first fetch
            if pair_index > 1 && config.fetch_delay_secs > 0 {
                std::thread::sleep(Duration::from_secs(config.fetch_delay_secs));
            }

            match fetch_pair(config, source, channel, segment) {
                Ok(record) => {
                    manifest.append(&record)?;
                    log::info!(
                        "Saved {} {} to {}",
                        channel.name,
                        segment,
                        record.path.display()
                    );
                    report.outcomes.push(PairOutcome::Saved {
                        channel: channel.name.clone(),
                        segment: *segment,
                        path: record.path,
                    });
                }
                Err(cause) => {
                    match &cause {
                        PairError::Fetch(e) => {
                            log::warn!("Fetch failed for {} {}: {e}", channel.name, segment)
                        }
                        e => log::warn!(
                            "Could not write output for {} {}: {e}",
                            channel.name,
                            segment
                        ),
                    }
                    log::warn!("Skipping {} {}.", channel.name, segment);
                    report.outcomes.push(PairOutcome::Failed(PairFailure {
                        channel: channel.name.clone(),
                        segment: *segment,
                        cause,
                    }));
                }
            }

            tx.send(BatchStatus::new(
                pair_index as f32 / total_pairs as f32,
                pair_index,
                total_pairs,
                &channel.name,
            ))?;
        }
    }

    log::info!(
        "Batch finished: {} saved, {} failed.",
        report.n_saved(),
        report.n_failed()
    );
    Ok(report)
}

/// Fetch, persist, and describe a single pair. Directory creation is
/// idempotent, and an existing output file is overwritten.
fn fetch_pair(
    config: &Config,
    source: &dyn SeriesSource,
    channel: &Channel,
    segment: &TimeSegment,
) -> Result<ManifestRecord, PairError> {
    let out_dir = config.output_directory(channel, segment);
    std::fs::create_dir_all(&out_dir)?;

    let series = source.fetch(&channel.name, segment.start, segment.end)?;

    let out_path = config.output_file_path(channel, segment);
    series_file::write_series(&series, &out_path)?;

    // The manifest wants the absolute path
    let abs_path = out_path.canonicalize()?;
    Ok(ManifestRecord::new(abs_path, series.t0, series.dt))
}
