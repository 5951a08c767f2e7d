/// Progress message sent from the batch worker to the UI thread after each
/// (channel, segment) pair, successful or not.
#[derive(Debug, Clone, Default)]
pub struct BatchStatus {
    pub progress: f32,
    pub pair_index: usize,
    pub total_pairs: usize,
    pub channel: String,
}

impl BatchStatus {
    pub fn new(progress: f32, pair_index: usize, total_pairs: usize, channel: &str) -> Self {
        Self {
            progress,
            pair_index,
            total_pairs,
            channel: channel.to_string(),
        }
    }
}
