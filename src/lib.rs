// Library exports for the listening trainer.
//
// The shortcut engine itself lives in `listening-trainer-keybindings`; the
// persisted records and their stores in `listening-trainer-config`. This
// crate adds the logging bridge and wires the engine's actions onto the
// media element.

pub mod app;
pub mod logging;
pub mod playback;

pub use app::App;
pub use playback::{MediaTransport, PlaybackController};

pub use listening_trainer_config as config;
pub use listening_trainer_keybindings as keybindings;
