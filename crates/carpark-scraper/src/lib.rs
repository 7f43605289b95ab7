pub mod client;
pub mod error;
pub mod extract;

pub use client::{AvailabilityClient, FetchedResponse};
pub use error::ScraperError;
pub use extract::{extract, extract_with_source, Extraction, ExtractionSource};
