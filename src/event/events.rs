#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Playback callbacks, tagged with the track index the request was issued
    // for. Ticks for a track that is no longer current get dropped.
    MetadataLoaded { tag: usize, duration_secs: f64 },
    Progress { tag: usize, position_secs: f64 },
    Ended { tag: usize },

    // Commands
    TogglePlay,
    Next,
    Previous,
    SelectTrack(usize),
    Seek(f64),
    Volume(f32),
    ToggleLoop,
    ListTracks,
    ShowStatus,

    // Purchase flow
    OpenPicker,
    PickLicense(String),
    CloseModal,
    Pay,

    Quit,
}
