mod client;
mod sink;
mod template;

pub use client::AnkiConnectClient;
pub use sink::{AnkiSink, CardSink, JsonLinesSink};
pub use template::CardTemplate;
