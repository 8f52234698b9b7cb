pub mod submitted_streams;

pub use submitted_streams::SubmittedStreamsAdapter;
