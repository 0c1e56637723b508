pub mod domains;
pub mod engine;
pub mod search;
pub mod table;
pub mod targets;

pub use crate::domain::model::{SearchJob, SearchOutcome, TargetRecord};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
