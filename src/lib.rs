pub use client::{StreamedClient, DEFAULT_BASE_URL};
pub use error::{Result, StreamedError};
pub use model::*;
pub use pipeline::{fetch_matches, fetch_matches_at, MatchApi};
pub use view::MatchListView;

mod api;
mod client;
mod error;
mod model;
pub mod pipeline;
pub mod render;
pub mod view;
