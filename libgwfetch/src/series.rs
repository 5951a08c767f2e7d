use ndarray::Array1;
use serde::Deserialize;

use super::error::FetchError;

/// A time series returned by a fetch.
///
/// This is the entire interface the rest of the crate needs from a fetch
/// collaborator: the actual start time and sample interval as plain numbers,
/// plus the samples themselves. `t0` is the archive's actual start time for
/// the returned data, which is not necessarily the requested start.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSeries {
    pub t0: f64,
    pub dt: f64,
    pub samples: Array1<f64>,
}

impl FetchedSeries {
    pub fn new(t0: f64, dt: f64, samples: Array1<f64>) -> Self {
        Self { t0, dt, samples }
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }
}

/// Anything that can produce a [`FetchedSeries`] for a channel and GPS range.
///
/// The batch driver only ever talks to this trait, so archives with different
/// transports (or test doubles) can be swapped in without touching the loop.
pub trait SeriesSource {
    fn fetch(&self, channel: &str, start: i64, end: i64) -> Result<FetchedSeries, FetchError>;
}

/// Wire format of the archive's time-series endpoint.
#[derive(Debug, Deserialize)]
struct SeriesPayload {
    t0: f64,
    dt: f64,
    data: Vec<f64>,
}

/// A [`SeriesSource`] backed by a remote archive's JSON time-series endpoint.
///
/// Issues a blocking GET to `<host>/timeseries` with the channel name and GPS
/// range as query parameters and expects a `{t0, dt, data}` JSON body.
pub struct RemoteSource {
    host: String,
    client: reqwest::blocking::Client,
}

impl RemoteSource {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl SeriesSource for RemoteSource {
    fn fetch(&self, channel: &str, start: i64, end: i64) -> Result<FetchedSeries, FetchError> {
        let url = format!("{}/timeseries", self.host);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("channel", channel.to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus(
                response.status().as_u16(),
                channel.to_string(),
            ));
        }

        let payload: SeriesPayload = response.json()?;
        if payload.data.is_empty() {
            return Err(FetchError::NoData(channel.to_string(), start, end));
        }

        Ok(FetchedSeries::new(
            payload.t0,
            payload.dt,
            Array1::from_vec(payload.data),
        ))
    }
}
