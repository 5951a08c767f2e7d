use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::channel::Channel;
use super::error::ConfigError;
use super::segment::TimeSegment;

/// Structure representing the application configuration. Contains the input
/// list paths, the remote archive host, and the output locations.
/// Configs are serializable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub channels_path: PathBuf,
    pub segments_path: PathBuf,
    pub host: String,
    pub manifest_path: PathBuf,
    pub output_root: PathBuf,
    pub fetch_delay_secs: u64,
}

impl Default for Config {
    /// Generate a new Config object. All fields will be empty/invalid
    fn default() -> Self {
        Self {
            channels_path: PathBuf::from("None"),
            segments_path: PathBuf::from("None"),
            host: String::from("https://nds.gwosc.org"),
            manifest_path: PathBuf::from("fin.txt"),
            output_root: PathBuf::from("None"),
            fetch_delay_secs: 2,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Directory that holds every output file for this (channel, segment)
    /// pair: `<output_root>/<sanitized channel>/<start>_<end>/`
    pub fn output_directory(&self, channel: &Channel, segment: &TimeSegment) -> PathBuf {
        self.output_root
            .join(channel.sanitized_name())
            .join(segment.dir_name())
    }

    /// Full path of the series file for this (channel, segment) pair:
    /// `<output directory>/<sanitized channel>_<start>_<end>.gwd`
    pub fn output_file_path(&self, channel: &Channel, segment: &TimeSegment) -> PathBuf {
        self.output_directory(channel, segment).join(format!(
            "{}_{}.gwd",
            channel.sanitized_name(),
            segment.dir_name()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths() {
        let config = Config {
            output_root: PathBuf::from("/data/aux"),
            ..Default::default()
        };
        let channel = Channel::new("H1:PEM-VAULT_MAG_1030X195Y_COIL_Y_DQ", 1024);
        let segment = TimeSegment::new(1238166018, 1238170549).unwrap();

        assert_eq!(
            config.output_directory(&channel, &segment),
            PathBuf::from("/data/aux/H1_PEM-VAULT_MAG_1030X195Y_COIL_Y_DQ/1238166018_1238170549")
        );
        assert_eq!(
            config.output_file_path(&channel, &segment),
            PathBuf::from(
                "/data/aux/H1_PEM-VAULT_MAG_1030X195Y_COIL_Y_DQ/1238166018_1238170549/H1_PEM-VAULT_MAG_1030X195Y_COIL_Y_DQ_1238166018_1238170549.gwd"
            )
        );
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = Config::default();
        let yaml_str = serde_yaml::to_string(&config).unwrap();
        let back = serde_yaml::from_str::<Config>(&yaml_str).unwrap();
        assert_eq!(back.host, config.host);
        assert_eq!(back.fetch_delay_secs, config.fetch_delay_secs);
    }
}
