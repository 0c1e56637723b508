pub mod settings;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "payer-scout")]
#[command(about = "Build Medicare Advantage payer search targets and collect SERP results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract unique email domains from a contact-directory CSV
    Domains(DomainsArgs),
    /// Merge plan CSVs into a unique parent-organization target list
    Targets(TargetsArgs),
    /// Search the SERP API for each subject and save the raw JSON results
    Search(SearchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DomainsArgs {
    #[arg(long, default_value = "source_data/MA_Contract_directory_2025_06.csv")]
    pub input: String,

    #[arg(long, default_value = "plan_domain_names.csv")]
    pub output: String,

    #[arg(long, default_value = "Directory Contact Email")]
    pub email_column: String,
}

#[derive(Debug, Clone, Args)]
pub struct TargetsArgs {
    #[arg(long, default_value = "source_data/2025_partc_star_ratings.csv")]
    pub star_ratings: String,

    #[arg(long, default_value = "source_data/MA_Contract_directory_2025_06.csv")]
    pub directory: String,

    #[arg(long, default_value = "search_these.csv")]
    pub output: String,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[arg(long, default_value = "plan_domain_names.csv")]
    pub subjects: String,

    #[arg(long, default_value = "domain")]
    pub subject_column: String,

    #[arg(long, help = "Skip a leading title line before the CSV header")]
    pub skip_title_row: bool,

    #[arg(long, default_value = "email_scrape_results")]
    pub out_dir: String,

    #[arg(long, help = "TOML file with [search] settings")]
    pub config: Option<String>,

    #[arg(long, help = "Query template with a {subject} placeholder")]
    pub query_template: Option<String>,

    #[arg(long, help = "SERP API key (falls back to SERP_API_KEY)")]
    pub api_key: Option<String>,
}

impl Validate for DomainsArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output", &self.output)?;
        validation::validate_non_empty_string("email_column", &self.email_column)?;
        Ok(())
    }
}

impl Validate for TargetsArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("star_ratings", &self.star_ratings)?;
        validation::validate_path("directory", &self.directory)?;
        validation::validate_path("output", &self.output)?;
        Ok(())
    }
}

impl Validate for SearchArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("subjects", &self.subjects)?;
        validation::validate_path("out_dir", &self.out_dir)?;
        validation::validate_non_empty_string("subject_column", &self.subject_column)?;
        if let Some(config) = &self.config {
            validation::validate_path("config", config)?;
        }
        if let Some(template) = &self.query_template {
            validation::validate_query_template("query_template", template)?;
        }
        Ok(())
    }
}
