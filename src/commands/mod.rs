pub mod profile;
pub mod stats;
pub mod wizard;
pub mod workout;
