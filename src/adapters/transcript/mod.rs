//! Transcript export adapters.

mod file_sink;

pub use file_sink::FileTranscriptSink;
