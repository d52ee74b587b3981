#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub bpm: Option<u16>,
    pub key: Option<String>,
    pub cover_url: String,
    pub audio_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct License {
    pub id: String,
    pub name: String,
    pub price: u32,
    pub perks: Vec<String>,
}

impl Track {
    pub fn subtitle(&self) -> String {
        match (self.bpm, self.key.as_deref()) {
            (Some(bpm), Some(key)) => format!("{bpm} BPM · {key}"),
            (Some(bpm), None) => format!("{bpm} BPM"),
            (None, Some(key)) => key.to_string(),
            (None, None) => String::new(),
        }
    }
}

fn track(
    id: &str,
    title: &str,
    bpm: u16,
    key: &str,
    cover_url: &str,
    audio_url: &str,
) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        bpm: Some(bpm),
        key: Some(key.to_string()),
        cover_url: cover_url.to_string(),
        audio_url: audio_url.to_string(),
    }
}

fn license(id: &str, name: &str, price: u32, perks: &[&str]) -> License {
    License {
        id: id.to_string(),
        name: name.to_string(),
        price,
        perks: perks.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn builtin_tracks() -> Vec<Track> {
    vec![
        track(
            "beat-1",
            "Night Drive",
            140,
            "Am",
            "https://images.unsplash.com/photo-1506157786151-b8491531f063?q=80&w=1080&auto=format&fit=crop",
            "https://file-examples.com/storage/fe1a9f0f3b7d8c7e0e65b20/2017/11/file_example_MP3_1MG.mp3",
        ),
        track(
            "beat-2",
            "City Lights",
            150,
            "Cm",
            "https://images.unsplash.com/photo-1546435770-a3e426bf472b?q=80&w=1080&auto=format&fit=crop",
            "https://file-examples.com/storage/fe1a9f0f3b7d8c7e0e65b20/2017/11/file_example_MP3_2MG.mp3",
        ),
        track(
            "beat-3",
            "Neon Pulse",
            132,
            "Dm",
            "https://images.unsplash.com/photo-1517711423161-3a9c7f6e74b4?q=80&w=1080&auto=format&fit=crop",
            "https://file-examples.com/storage/fe1a9f0f3b7d8c7e0e65b20/2017/11/file_example_MP3_5MG.mp3",
        ),
    ]
}

pub fn builtin_licenses() -> Vec<License> {
    vec![
        license("basic", "Basic", 20, &["MP3", "Non-exclusive", "1 video"]),
        license("premium", "Premium", 49, &["WAV", "Non-exclusive", "3 videos"]),
        license(
            "unlimited",
            "Unlimited",
            99,
            &["WAV + Stems", "Unlimited streams & videos"],
        ),
    ]
}

pub fn find_license<'a>(licenses: &'a [License], id: &str) -> Option<&'a License> {
    licenses.iter().find(|l| l.id.eq_ignore_ascii_case(id))
}
