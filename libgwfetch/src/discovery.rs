use std::path::{Path, PathBuf};
use std::time::Duration;

use super::config::Config;
use super::error::{BatchError, DiscoveryError};
use super::segment::{SegmentList, TimeSegment};

/// What happened to one discovered URL.
#[derive(Debug)]
pub enum DownloadOutcome {
    Saved {
        url: String,
        path: PathBuf,
        bytes: u64,
    },
    Failed {
        url: String,
        cause: DiscoveryError,
    },
}

/// Client for a datafind-style discovery host.
///
/// Discovery resolves (detector prefix, dataset, GPS range) to a list of frame
/// file URLs, which are then downloaded as-is. Unlike the series fetch path,
/// the downloaded payloads are opaque; no manifest records are produced.
pub struct DiscoveryClient {
    host: String,
    client: reqwest::blocking::Client,
}

impl DiscoveryClient {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Ask the discovery host for every frame file URL covering `segment`.
    /// An empty list is a valid answer (no data for that range).
    pub fn find_urls(
        &self,
        ifo: &str,
        dataset: &str,
        segment: &TimeSegment,
        urltype: &str,
    ) -> Result<Vec<String>, DiscoveryError> {
        let url = format!(
            "{}/api/v1/gwf/{}/{}/{},{}.json",
            self.host, ifo, dataset, segment.start, segment.end
        );
        let response = self.client.get(&url).query(&[("urltype", urltype)]).send()?;
        if !response.status().is_success() {
            return Err(DiscoveryError::BadStatus(response.status().as_u16(), url));
        }
        Ok(response.json::<Vec<String>>()?)
    }

    /// Download every URL into `out_dir`, sleeping `delay_secs` between
    /// successive downloads. Each URL gets its own typed outcome; one bad URL
    /// does not stop the rest.
    pub fn download_urls(
        &self,
        urls: &[String],
        out_dir: &Path,
        delay_secs: u64,
    ) -> Vec<DownloadOutcome> {
        let mut outcomes = Vec::with_capacity(urls.len());
        for (idx, url) in urls.iter().enumerate() {
            if idx > 0 && delay_secs > 0 {
                std::thread::sleep(Duration::from_secs(delay_secs));
            }
            log::info!("Downloading {url}...");
            match self.download_one(url, out_dir) {
                Ok((path, bytes)) => {
                    log::info!(
                        "Saved {} ({})",
                        path.display(),
                        human_bytes::human_bytes(bytes as f64)
                    );
                    outcomes.push(DownloadOutcome::Saved {
                        url: url.clone(),
                        path,
                        bytes,
                    });
                }
                Err(cause) => {
                    log::warn!("Failed to download {url}: {cause}");
                    outcomes.push(DownloadOutcome::Failed {
                        url: url.clone(),
                        cause,
                    });
                }
            }
        }
        outcomes
    }

    fn download_one(&self, url: &str, out_dir: &Path) -> Result<(PathBuf, u64), DiscoveryError> {
        let file_name = file_name_from_url(url)?;
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(DiscoveryError::BadStatus(
                response.status().as_u16(),
                url.to_string(),
            ));
        }
        std::fs::create_dir_all(out_dir)?;
        let path = out_dir.join(file_name);
        let bytes = response.bytes()?;
        std::fs::write(&path, &bytes)?;
        Ok((path, bytes.len() as u64))
    }
}

/// The local file name for a downloaded URL is its final path component, so
/// every file of a multi-file segment keeps a distinct name.
fn file_name_from_url(url: &str) -> Result<String, DiscoveryError> {
    let name = url
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .rsplit('/')
        .next()
        .unwrap_or("");
    if name.is_empty() || name.contains(':') {
        return Err(DiscoveryError::BadUrl(url.to_string()));
    }
    Ok(name.to_string())
}

/// Discovery-mode batch: for every segment in the configured segment list,
/// find its URLs and download them under
/// `<output_root>/<dataset>/<start>_<end>/`.
///
/// An unreachable discovery host aborts the run; an empty URL list for a
/// segment is logged and skipped.
pub fn download_all(
    config: &Config,
    client: &DiscoveryClient,
    ifo: &str,
    dataset: &str,
    urltype: &str,
) -> Result<Vec<DownloadOutcome>, BatchError> {
    let segments = SegmentList::from_csv(&config.segments_path)?;
    let mut outcomes = Vec::new();
    for segment in &segments.segments {
        let urls = client.find_urls(ifo, dataset, segment, urltype)?;
        if urls.is_empty() {
            log::warn!("No files found for {segment}");
            continue;
        }
        // The delay also spans segment boundaries, so every pair of
        // successive downloads in the run is separated by it
        if !outcomes.is_empty() && config.fetch_delay_secs > 0 {
            std::thread::sleep(Duration::from_secs(config.fetch_delay_secs));
        }
        let out_dir = config.output_root.join(dataset).join(segment.dir_name());
        outcomes.extend(client.download_urls(&urls, &out_dir, config.fetch_delay_secs));
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url(
                "osdf:///gwdata/O3a/strain.4k/frame.v1/H1/12381/H-H1_GWOSC_O3a_4KHZ_R1-1238163456-4096.gwf"
            )
            .unwrap(),
            "H-H1_GWOSC_O3a_4KHZ_R1-1238163456-4096.gwf"
        );
        assert_eq!(
            file_name_from_url("https://host.example/data/file.gwf?token=abc").unwrap(),
            "file.gwf"
        );
    }

    #[test]
    fn test_file_name_from_bare_url_rejected() {
        match file_name_from_url("https://host.example/data/") {
            Err(DiscoveryError::BadUrl(_)) => (),
            _ => panic!("expected BadUrl"),
        }
    }
}
