use std::{
    io::BufRead,
    sync::Arc,
    thread,
};

use flume::{Receiver, Sender};
use tracing::error;

use crate::{
    api::{self, ApiContext},
    catalog::{License, builtin_licenses, builtin_tracks, find_license},
    config::Config,
    event::events::Event,
    host::{HostAdapter, apply_host_chrome},
    player::{engine::PlayerEngine, playback::RodioHandle},
    purchase::flow::{PaymentOutcome, PurchaseFlow, Stage},
    util::time::format_time,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub engine: PlayerEngine,
    pub purchase: PurchaseFlow,
    pub licenses: Vec<License>,
    pub host: Box<dyn HostAdapter>,
    pub config: Config,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, host: Box<dyn HostAdapter>) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let handle = RodioHandle::new(event_tx.clone())?;
        let engine = PlayerEngine::new(builtin_tracks(), Box::new(handle));

        apply_host_chrome(host.as_ref());

        Ok(Self {
            event_rx,
            event_tx,
            engine,
            purchase: PurchaseFlow::new(),
            licenses: builtin_licenses(),
            host,
            config,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let ctx = Arc::new(ApiContext::new(self.config.clone()));
        tokio::spawn(async move {
            if let Err(err) = api::serve(ctx).await {
                error!("api server exited: {err}");
            }
        });

        self.spawn_input_reader();
        self.engine.load_track(0).await?;
        self.print_now_playing();
        println!("commands: play next prev seek <s> vol <0-1> loop list buy pick <id> close pay status quit");

        while !self.should_quit {
            let event = self.event_rx.recv_async().await?;
            self.handle_event(event).await;
        }

        Ok(())
    }

    fn spawn_input_reader(&self) {
        let event_tx = self.event_tx.clone();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let Some(event) = parse_command(&line) else {
                    println!("unknown command: {line}");
                    continue;
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });
    }

    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::MetadataLoaded { tag, duration_secs } => {
                self.engine.on_metadata_loaded(tag, duration_secs);
            }
            Event::Progress { tag, position_secs } => {
                self.engine.on_progress_tick(tag, position_secs);
            }
            Event::Ended { tag } => {
                let before = self.engine.state().current;
                if self.engine.on_playback_ended(tag).await.is_ok()
                    && self.engine.state().current != before
                {
                    self.print_now_playing();
                }
            }
            Event::TogglePlay => {
                self.engine.toggle_play().await;
                self.print_status();
            }
            Event::Next => {
                if self.engine.next().await.is_ok() {
                    self.print_now_playing();
                }
            }
            Event::Previous => {
                if self.engine.prev().await.is_ok() {
                    self.print_now_playing();
                }
            }
            Event::SelectTrack(index) => match self.engine.load_track(index).await {
                Ok(()) => self.print_now_playing(),
                Err(err) => println!("{err}"),
            },
            Event::Seek(secs) => self.engine.seek(secs),
            Event::Volume(volume) => self.engine.set_volume(volume),
            Event::ToggleLoop => {
                let enabled = !self.engine.state().loop_enabled;
                self.engine.set_loop(enabled);
                println!("loop {}", if enabled { "on" } else { "off" });
            }
            Event::ListTracks => self.print_track_list(),
            Event::ShowStatus => self.print_status(),
            Event::OpenPicker => {
                self.purchase.open_picker();
                if self.purchase.stage() == Stage::PickingLicense {
                    self.print_license_list();
                }
            }
            Event::PickLicense(id) => match find_license(&self.licenses, &id) {
                Some(license) => {
                    let license = license.clone();
                    match self.purchase.select_license(license) {
                        Ok(()) => self.print_checkout(),
                        Err(err) => println!("{err}"),
                    }
                }
                None => println!("unknown license: {id}"),
            },
            Event::CloseModal => self.purchase.close(),
            Event::Pay => match self.purchase.initiate_payment(self.host.as_ref()) {
                Ok(PaymentOutcome::Acknowledged) => println!("Stars payment - coming next"),
                Ok(PaymentOutcome::HostRequired) => {
                    println!("Open inside Telegram to pay with Stars.")
                }
                Err(err) => println!("{err}"),
            },
            Event::Quit => self.should_quit = true,
        }
    }

    fn print_now_playing(&self) {
        let track = self.engine.current_track();
        println!("now: {} ({})", track.title, track.subtitle());
    }

    fn print_status(&self) {
        let state = self.engine.state();
        let track = self.engine.current_track();
        println!(
            "{} {} {}/{} vol {:.0}% loop {}",
            if state.is_playing { "playing" } else { "paused" },
            track.title,
            format_time(state.position_secs),
            format_time(state.duration_secs),
            state.volume * 100.0,
            if state.loop_enabled { "on" } else { "off" },
        );
    }

    fn print_track_list(&self) {
        let current = self.engine.state().current;
        for (i, track) in self.engine.catalog().iter().enumerate() {
            let marker = if i == current { ">" } else { " " };
            println!("{marker} {}. {} ({})", i + 1, track.title, track.subtitle());
        }
    }

    fn print_license_list(&self) {
        for license in &self.licenses {
            println!(
                "  {} - {} ${} ({})",
                license.id,
                license.name,
                license.price,
                license.perks.join(" / ")
            );
        }
        println!("pick <id> to continue");
    }

    fn print_checkout(&self) {
        let track = self.engine.current_track();
        if let Some(license) = self.purchase.selected_license() {
            println!(
                "checkout: {} / {} license, total ${}",
                track.title, license.name, license.price
            );
            println!("pay to continue, close to dismiss");
        }
    }
}

pub fn parse_command(line: &str) -> Option<Event> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let arg = parts.next();

    match (command, arg) {
        ("p" | "play" | "pause", _) => Some(Event::TogglePlay),
        ("n" | "next", _) => Some(Event::Next),
        ("b" | "prev", _) => Some(Event::Previous),
        ("t" | "track", Some(n)) => n
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| Event::SelectTrack(n - 1)),
        ("seek", Some(s)) => s.parse().ok().map(Event::Seek),
        ("vol" | "volume", Some(v)) => v.parse().ok().map(Event::Volume),
        ("loop", _) => Some(Event::ToggleLoop),
        ("ls" | "list", _) => Some(Event::ListTracks),
        ("s" | "status", _) => Some(Event::ShowStatus),
        ("buy", _) => Some(Event::OpenPicker),
        ("pick", Some(id)) => Some(Event::PickLicense(id.to_string())),
        ("close", _) => Some(Event::CloseModal),
        ("pay", _) => Some(Event::Pay),
        ("q" | "quit" | "exit", _) => Some(Event::Quit),
        _ => None,
    }
}
