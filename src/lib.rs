pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::LocalStorage;
pub use crate::config::settings::SearchSettings;
pub use crate::config::{Cli, Command, DomainsArgs, SearchArgs, TargetsArgs};
pub use crate::core::domains::DomainExtractPipeline;
pub use crate::core::engine::Engine;
pub use crate::core::search::SearchPipeline;
pub use crate::core::targets::TargetListPipeline;
pub use crate::utils::error::{Result, ScoutError};
