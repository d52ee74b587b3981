use std::{
    io::Cursor,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use async_trait::async_trait;
use flume::Sender;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::warn;

use crate::{
    event::events::Event,
    player::{error::PlayerError, traits::PlaybackHandle},
};

const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 8);

#[derive(Default)]
struct Shared {
    tag: AtomicUsize,
    generation: AtomicU64,
    ready: AtomicBool,
    load_failed: AtomicBool,
    loop_enabled: AtomicBool,
    // Raw bytes of the current source, kept so a looping track can be
    // re-decoded and restarted without another fetch.
    source: Mutex<Option<Vec<u8>>>,
}

/// Rodio-backed playback handle. Fetches the source over HTTP, decodes on a
/// blocking task and reports progress ticks from a dedicated thread, the
/// usual sink-polling arrangement.
pub struct RodioHandle {
    _stream: OutputStream,
    sink: Arc<Sink>,
    client: reqwest::Client,
    event_tx: Sender<Event>,
    shared: Arc<Shared>,
    load_task: Option<tokio::task::JoinHandle<()>>,
    loaded_once: bool,
}

impl RodioHandle {
    pub fn new(event_tx: Sender<Event>) -> Result<Self, PlayerError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| PlayerError::OutputError(e.to_string()))?;
        let sink =
            Sink::try_new(&stream_handle).map_err(|e| PlayerError::OutputError(e.to_string()))?;
        sink.pause();

        let handle = Self {
            _stream: stream,
            sink: Arc::new(sink),
            client: reqwest::Client::new(),
            event_tx,
            shared: Arc::new(Shared::default()),
            load_task: None,
            loaded_once: false,
        };

        handle.spawn_progress_thread();
        Ok(handle)
    }

    fn spawn_progress_thread(&self) {
        let sink = self.sink.clone();
        let shared = self.shared.clone();
        let event_tx = self.event_tx.clone();

        thread::spawn(move || {
            loop {
                if shared.ready.load(Ordering::Relaxed) {
                    let tag = shared.tag.load(Ordering::Relaxed);
                    let _ = event_tx.send(Event::Progress {
                        tag,
                        position_secs: sink.get_pos().as_secs_f64(),
                    });

                    if sink.empty() {
                        if shared.loop_enabled.load(Ordering::Relaxed) {
                            restart_source(&sink, &shared);
                        } else {
                            shared.ready.store(false, Ordering::Relaxed);
                            let _ = event_tx.send(Event::Ended { tag });
                        }
                    }
                }

                thread::sleep(TICK_INTERVAL);
            }
        });
    }
}

fn restart_source(sink: &Sink, shared: &Shared) {
    let data = shared.source.lock().ok().and_then(|guard| guard.clone());
    match data {
        Some(data) => match Decoder::new(Cursor::new(data)) {
            Ok(decoder) => sink.append(decoder),
            Err(err) => {
                warn!("loop restart failed to decode: {err}");
                shared.ready.store(false, Ordering::Relaxed);
            }
        },
        None => shared.ready.store(false, Ordering::Relaxed),
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[async_trait(?Send)]
impl PlaybackHandle for RodioHandle {
    fn load(&mut self, tag: usize, url: &str) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.ready.store(false, Ordering::Relaxed);
        self.shared.load_failed.store(false, Ordering::Relaxed);
        self.shared.tag.store(tag, Ordering::Relaxed);
        if let Ok(mut guard) = self.shared.source.lock() {
            *guard = None;
        }
        self.sink.stop();
        self.sink.pause();
        self.loaded_once = true;

        let client = self.client.clone();
        let sink = self.sink.clone();
        let shared = self.shared.clone();
        let event_tx = self.event_tx.clone();
        let url = url.to_string();

        self.load_task = Some(tokio::spawn(async move {
            let data = match fetch(&client, &url).await {
                Ok(data) => data,
                Err(err) => {
                    warn!("fetching {url} failed: {err}");
                    shared.load_failed.store(true, Ordering::Relaxed);
                    return;
                }
            };

            let _ = tokio::task::spawn_blocking(move || {
                // A newer load superseded this one while the bytes were in
                // flight.
                if shared.generation.load(Ordering::SeqCst) != generation {
                    return;
                }

                let decoder = match Decoder::new(Cursor::new(data.clone())) {
                    Ok(decoder) => decoder,
                    Err(err) => {
                        warn!("decoding failed: {err}");
                        shared.load_failed.store(true, Ordering::Relaxed);
                        return;
                    }
                };

                if let Some(total) = decoder.total_duration() {
                    let _ = event_tx.send(Event::MetadataLoaded {
                        tag,
                        duration_secs: total.as_secs_f64(),
                    });
                }

                if let Ok(mut guard) = shared.source.lock() {
                    *guard = Some(data);
                }
                sink.append(decoder);
                shared.ready.store(true, Ordering::Relaxed);
            })
            .await;
        }));
    }

    async fn play(&mut self) -> Result<(), PlayerError> {
        if !self.loaded_once {
            return Err(PlayerError::NothingLoaded);
        }
        if self.shared.load_failed.load(Ordering::Relaxed) {
            return Err(PlayerError::PlaybackRejected(
                "source failed to load".into(),
            ));
        }

        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn set_current_time(&mut self, seconds: f64) {
        let _ = self.sink.try_seek(Duration::from_secs_f64(seconds.max(0.0)));
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn set_loop(&mut self, enabled: bool) {
        self.shared.loop_enabled.store(enabled, Ordering::Relaxed);
    }
}
