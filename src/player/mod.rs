pub mod engine;
pub mod error;
pub mod playback;
pub mod state;
pub mod traits;
