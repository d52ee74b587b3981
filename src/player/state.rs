#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current: usize,
    pub is_playing: bool,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub volume: f32,
    pub loop_enabled: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: 0,
            is_playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: 0.9,
            loop_enabled: false,
        }
    }
}
