pub mod classifier;
pub mod error;
pub mod gate;
pub mod progress;
pub mod record;
pub mod roster;
pub mod service;
pub mod soql;
pub mod starred;
pub mod store;
pub mod tree;
pub mod types;

pub use error::{PodtrackError, Result};
