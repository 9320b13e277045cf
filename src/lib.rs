//! lagless: jet lag advice and local-LLM recovery plans
//!
//! The library holds the trip form, the derived advisory values and the
//! day-by-day schedule generator. Text generation goes through the
//! [`TextGenerator`] trait; [`OllamaClient`] binds it to a local Ollama server.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lagless::{OllamaClient, ScheduleGenerator, TripForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut form = TripForm::new();
//!     form.set_destination("Asia/Tokyo");
//!     form.set_trip_length(4)?;
//!
//!     let generator = ScheduleGenerator::new(OllamaClient::from_env()?);
//!     let plan = generator.generate(form.params()).await?;
//!     println!("{}", plan.render());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub mod services;
pub mod types;

pub use crate::core::{
    available_zones, Advisory, ChronoTzDatabase, Direction, ScheduleGenerator, TextGenerator,
    TripForm, ZoneDatabase,
};
pub use error::{LagError, Result};
pub use services::OllamaClient;
pub use types::{AgeGroup, BlockSource, DayBlock, FlightClass, SchedulePlan, TripParameters};

#[cfg(feature = "cli")]
pub mod cli;
