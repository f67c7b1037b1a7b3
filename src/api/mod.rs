pub mod client;
pub mod energy;
pub mod generation;

pub use client::{ApiClient, ApiError};
pub use generation::{FetchGeneration, FetchToken};
