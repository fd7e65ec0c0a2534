//! Startup wiring for example data seeding.

mod config;
mod startup;

pub use config::ExampleDataSettings;
pub use startup::{
    BUNDLED_STUDENTS, ExampleDataSeedOutcome, SeedingResult, StartupSeedingError,
    seed_example_data_on_startup,
};
