use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::ChannelListError;

const ENTRIES_PER_LINE: usize = 2; // channel, sampling rate

/// A named detector data channel.
///
/// The name follows the `detector:channel` convention (e.g.
/// `H1:PEM-VAULT_MAG_1030X195Y_COIL_Y_DQ`). The sampling rate is the nominal
/// rate from the channel list; it is informational only and is never checked
/// against what the archive actually returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub sampling_rate: u32,
}

impl Channel {
    pub fn new(name: &str, sampling_rate: u32) -> Self {
        Self {
            name: name.to_string(),
            sampling_rate,
        }
    }

    /// The channel name made safe for use as a path component. Colons are
    /// replaced with underscores; every other character passes through, so
    /// distinct channel names stay distinct on disk.
    pub fn sanitized_name(&self) -> String {
        self.name.replace(':', "_")
    }
}

/// The ordered set of channels to fetch, read from a headerless two-column
/// CSV file where each row is `channel,sampling_rate`.
#[derive(Debug, Clone, Default)]
pub struct ChannelList {
    pub channels: Vec<Channel>,
}

impl ChannelList {
    pub fn from_csv(path: &Path) -> Result<Self, ChannelListError> {
        if !path.exists() {
            return Err(ChannelListError::BadFilePath(path.to_path_buf()));
        }
        let mut contents = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;

        let mut list = ChannelList::default();
        for (row, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entries: Vec<&str> = line.split_terminator(",").collect();
            if entries.len() != ENTRIES_PER_LINE {
                return Err(ChannelListError::BadRowFormat(row));
            }
            let name = entries[0].trim();
            if name.is_empty() {
                return Err(ChannelListError::EmptyChannelName(row));
            }
            let rate: u32 = entries[1]
                .trim()
                .parse()
                .map_err(|e| ChannelListError::BadSamplingRate(row, e))?;
            list.channels.push(Channel::new(name, rate));
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
