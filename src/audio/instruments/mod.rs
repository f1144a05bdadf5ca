mod ping;

pub use ping::{PingGenerator, PingStatus};
