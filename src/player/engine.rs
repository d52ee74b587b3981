use tracing::{debug, warn};

use crate::{
    catalog::Track,
    player::{error::PlayerError, state::PlaybackState, traits::PlaybackHandle},
};

/// Single source of truth for which track is active and how far along it is.
/// Owns the playback handle exclusively; every mutation of `PlaybackState`
/// goes through here.
pub struct PlayerEngine {
    catalog: Vec<Track>,
    handle: Box<dyn PlaybackHandle>,
    state: PlaybackState,
}

impl PlayerEngine {
    pub fn new(catalog: Vec<Track>, handle: Box<dyn PlaybackHandle>) -> Self {
        Self {
            catalog,
            handle,
            state: PlaybackState::default(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    pub fn current_track(&self) -> &Track {
        &self.catalog[self.state.current]
    }

    /// Switches to `index` and re-issues playback if a track was playing.
    /// Progress is zeroed before the handle is touched, so late events from
    /// the previous track can never be observed against the new one.
    pub async fn load_track(&mut self, index: usize) -> Result<(), PlayerError> {
        if index >= self.catalog.len() {
            return Err(PlayerError::TrackOutOfRange(index));
        }

        self.state.current = index;
        self.state.position_secs = 0.0;
        self.state.duration_secs = 0.0;

        let url = self.catalog[index].audio_url.clone();
        self.handle.load(index, &url);
        self.handle.set_loop(self.state.loop_enabled);
        self.handle.set_volume(self.state.volume);

        if self.state.is_playing {
            // Better to show "paused" than to lie about playing.
            if let Err(err) = self.handle.play().await {
                warn!("resume after track switch failed: {err}");
                self.state.is_playing = false;
            }
        }

        Ok(())
    }

    pub async fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.handle.pause();
            self.state.is_playing = false;
            return;
        }

        match self.handle.play().await {
            Ok(()) => self.state.is_playing = true,
            Err(err) => {
                warn!("play request rejected: {err}");
                self.state.is_playing = false;
            }
        }
    }

    pub fn seek(&mut self, target_secs: f64) {
        let target = if self.state.duration_secs > 0.0 {
            target_secs.clamp(0.0, self.state.duration_secs)
        } else {
            target_secs.max(0.0)
        };

        self.handle.set_current_time(target);
        self.state.position_secs = target;
    }

    pub async fn next(&mut self) -> Result<(), PlayerError> {
        if self.catalog.is_empty() {
            return Ok(());
        }
        let index = (self.state.current + 1) % self.catalog.len();
        self.load_track(index).await
    }

    pub async fn prev(&mut self) -> Result<(), PlayerError> {
        if self.catalog.is_empty() {
            return Ok(());
        }
        let index = (self.state.current + self.catalog.len() - 1) % self.catalog.len();
        self.load_track(index).await
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.state.volume = volume.clamp(0.0, 1.0);
        self.handle.set_volume(self.state.volume);
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.state.loop_enabled = enabled;
        self.handle.set_loop(enabled);
    }

    pub fn on_metadata_loaded(&mut self, tag: usize, duration_secs: f64) {
        if tag != self.state.current {
            debug!("dropping stale metadata for track {tag}");
            return;
        }
        self.state.duration_secs = duration_secs.max(0.0);
        self.state.position_secs = self.state.position_secs.min(self.state.duration_secs);
    }

    pub fn on_progress_tick(&mut self, tag: usize, position_secs: f64) {
        if tag != self.state.current {
            debug!("dropping stale progress for track {tag}");
            return;
        }
        self.state.position_secs = if self.state.duration_secs > 0.0 {
            position_secs.clamp(0.0, self.state.duration_secs)
        } else {
            position_secs.max(0.0)
        };
    }

    /// Looping is a property of the handle: it restarts the source itself,
    /// so a tagged end for a looping track changes nothing here.
    pub async fn on_playback_ended(&mut self, tag: usize) -> Result<(), PlayerError> {
        if tag != self.state.current {
            return Ok(());
        }
        if self.state.loop_enabled {
            return Ok(());
        }
        self.next().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_tracks;
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    #[derive(Default)]
    struct MockState {
        calls: RefCell<Vec<String>>,
        play_ok: Cell<bool>,
    }

    struct MockHandle(Rc<MockState>);

    #[async_trait::async_trait(?Send)]
    impl PlaybackHandle for MockHandle {
        fn load(&mut self, tag: usize, url: &str) {
            self.0.calls.borrow_mut().push(format!("load:{tag}:{url}"));
        }

        async fn play(&mut self) -> Result<(), PlayerError> {
            self.0.calls.borrow_mut().push("play".into());
            if self.0.play_ok.get() {
                Ok(())
            } else {
                Err(PlayerError::PlaybackRejected("not allowed".into()))
            }
        }

        fn pause(&mut self) {
            self.0.calls.borrow_mut().push("pause".into());
        }

        fn set_current_time(&mut self, seconds: f64) {
            self.0.calls.borrow_mut().push(format!("seek:{seconds}"));
        }

        fn set_volume(&mut self, volume: f32) {
            self.0.calls.borrow_mut().push(format!("vol:{volume}"));
        }

        fn set_loop(&mut self, enabled: bool) {
            self.0.calls.borrow_mut().push(format!("loop:{enabled}"));
        }
    }

    fn engine() -> (PlayerEngine, Rc<MockState>) {
        let mock = Rc::new(MockState {
            calls: RefCell::new(Vec::new()),
            play_ok: Cell::new(true),
        });
        let engine = PlayerEngine::new(builtin_tracks(), Box::new(MockHandle(mock.clone())));
        (engine, mock)
    }

    #[tokio::test]
    async fn next_wraps_around_the_catalog() {
        let (mut engine, _) = engine();
        engine.next().await.unwrap();
        engine.next().await.unwrap();
        assert_eq!(engine.state().current, 2);
        assert_eq!(engine.current_track().title, "Neon Pulse");

        engine.next().await.unwrap();
        assert_eq!(engine.state().current, 0);
    }

    #[tokio::test]
    async fn prev_is_the_inverse_of_next() {
        let (mut engine, _) = engine();
        for start in 0..3 {
            engine.load_track(start).await.unwrap();
            engine.next().await.unwrap();
            engine.prev().await.unwrap();
            assert_eq!(engine.state().current, start);
        }

        engine.load_track(0).await.unwrap();
        engine.prev().await.unwrap();
        assert_eq!(engine.state().current, 2);
    }

    #[tokio::test]
    async fn full_cycle_returns_to_start() {
        let (mut engine, _) = engine();
        engine.load_track(1).await.unwrap();
        for _ in 0..3 {
            engine.next().await.unwrap();
        }
        assert_eq!(engine.state().current, 1);
    }

    #[tokio::test]
    async fn load_resets_progress() {
        let (mut engine, _) = engine();
        engine.on_metadata_loaded(0, 180.0);
        engine.on_progress_tick(0, 42.0);
        assert_eq!(engine.state().position_secs, 42.0);

        engine.load_track(1).await.unwrap();
        assert_eq!(engine.state().position_secs, 0.0);
        assert_eq!(engine.state().duration_secs, 0.0);
    }

    #[tokio::test]
    async fn load_rejects_out_of_range_index() {
        let (mut engine, _) = engine();
        assert!(matches!(
            engine.load_track(3).await,
            Err(PlayerError::TrackOutOfRange(3))
        ));
        assert_eq!(engine.state().current, 0);
    }

    #[tokio::test]
    async fn stale_events_never_mutate_state() {
        let (mut engine, _) = engine();
        engine.load_track(1).await.unwrap();

        engine.on_metadata_loaded(0, 200.0);
        engine.on_progress_tick(0, 15.0);
        assert_eq!(engine.state().duration_secs, 0.0);
        assert_eq!(engine.state().position_secs, 0.0);

        engine.on_metadata_loaded(1, 90.0);
        engine.on_progress_tick(1, 15.0);
        assert_eq!(engine.state().duration_secs, 90.0);
        assert_eq!(engine.state().position_secs, 15.0);
    }

    #[tokio::test]
    async fn rejected_play_leaves_paused_state() {
        let (mut engine, mock) = engine();
        mock.play_ok.set(false);
        engine.toggle_play().await;
        assert!(!engine.state().is_playing);
    }

    #[tokio::test]
    async fn pause_is_synchronous() {
        let (mut engine, mock) = engine();
        engine.toggle_play().await;
        assert!(engine.state().is_playing);

        engine.toggle_play().await;
        assert!(!engine.state().is_playing);
        assert!(mock.calls.borrow().contains(&"pause".to_string()));
    }

    #[tokio::test]
    async fn failed_resume_after_switch_reverts_playing_flag() {
        let (mut engine, mock) = engine();
        engine.toggle_play().await;
        assert!(engine.state().is_playing);

        mock.play_ok.set(false);
        engine.next().await.unwrap();
        assert!(!engine.state().is_playing);
        assert_eq!(engine.state().current, 1);
    }

    #[tokio::test]
    async fn successful_resume_keeps_playing_across_switch() {
        let (mut engine, _) = engine();
        engine.toggle_play().await;
        engine.next().await.unwrap();
        assert!(engine.state().is_playing);
    }

    #[tokio::test]
    async fn seek_clamps_to_known_duration() {
        let (mut engine, mock) = engine();
        engine.on_metadata_loaded(0, 60.0);
        engine.seek(90.0);
        assert_eq!(engine.state().position_secs, 60.0);

        engine.seek(-5.0);
        assert_eq!(engine.state().position_secs, 0.0);
        assert!(mock.calls.borrow().contains(&"seek:60".to_string()));
    }

    #[tokio::test]
    async fn progress_is_capped_once_duration_is_known() {
        let (mut engine, _) = engine();
        engine.on_metadata_loaded(0, 30.0);
        engine.on_progress_tick(0, 31.5);
        assert_eq!(engine.state().position_secs, 30.0);
    }

    #[tokio::test]
    async fn ended_advances_to_the_next_track() {
        let (mut engine, _) = engine();
        engine.on_playback_ended(0).await.unwrap();
        assert_eq!(engine.state().current, 1);
    }

    #[tokio::test]
    async fn ended_with_loop_keeps_the_track() {
        let (mut engine, _) = engine();
        engine.set_loop(true);
        engine.on_playback_ended(0).await.unwrap();
        assert_eq!(engine.state().current, 0);
    }

    #[tokio::test]
    async fn stale_ended_is_a_no_op() {
        let (mut engine, _) = engine();
        engine.load_track(2).await.unwrap();
        engine.on_playback_ended(0).await.unwrap();
        assert_eq!(engine.state().current, 2);
    }

    #[tokio::test]
    async fn volume_is_clamped_and_propagated() {
        let (mut engine, mock) = engine();
        engine.set_volume(1.5);
        assert_eq!(engine.state().volume, 1.0);
        engine.set_volume(-0.5);
        assert_eq!(engine.state().volume, 0.0);
        assert!(mock.calls.borrow().contains(&"vol:1".to_string()));
    }
}
