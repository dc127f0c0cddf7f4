pub mod analysis;
pub mod credential;
pub mod jobs;
