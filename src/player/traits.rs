use crate::player::error::PlayerError;
use async_trait::async_trait;

/// The underlying audio primitive. The engine is its only caller; nothing
/// else may issue load/play/pause/seek against it.
///
/// Implementations report asynchronous progress by sending
/// `Event::MetadataLoaded`, `Event::Progress` and `Event::Ended` on the
/// channel they were constructed with, carrying the `tag` the request was
/// issued for.
#[async_trait(?Send)]
pub trait PlaybackHandle {
    fn load(&mut self, tag: usize, url: &str);
    async fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);
    fn set_loop(&mut self, enabled: bool);
}
