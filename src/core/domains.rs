use crate::config::DomainsArgs;
use crate::core::table;
use crate::domain::normalize;
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::{Result, ScoutError};
use std::collections::BTreeSet;

/// Pulls every email out of a contact-directory CSV and writes the distinct
/// domains as a single-column CSV (`domain` header, sorted rows).
pub struct DomainExtractPipeline<S: Storage> {
    storage: S,
    args: DomainsArgs,
}

impl<S: Storage> DomainExtractPipeline<S> {
    pub fn new(storage: S, args: DomainsArgs) -> Self {
        Self { storage, args }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for DomainExtractPipeline<S> {
    type Raw = Vec<String>;
    type Prepared = BTreeSet<String>;

    async fn extract(&self) -> Result<Vec<String>> {
        let data = self.storage.read_file(&self.args.input).await?;
        let (headers, rows) = table::parse_rows(&data, false)?;
        let email_idx = table::column_index(&headers, &self.args.email_column, &self.args.input)?;

        let mut emails = Vec::new();
        for row in rows {
            if let Some(value) = row.get(email_idx) {
                let value = value.trim();
                if !value.is_empty() {
                    emails.push(value.to_string());
                }
            }
        }

        tracing::debug!(
            "Collected {} email values from {}",
            emails.len(),
            self.args.input
        );
        Ok(emails)
    }

    async fn transform(&self, emails: Vec<String>) -> Result<BTreeSet<String>> {
        let domains: BTreeSet<String> = emails
            .iter()
            .filter_map(|email| normalize::extract_email_domain(email))
            .collect();

        tracing::info!(
            "Found {} unique email domains in {} addresses",
            domains.len(),
            emails.len()
        );
        Ok(domains)
    }

    async fn load(&self, domains: BTreeSet<String>) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["domain"])?;
        for domain in &domains {
            writer.write_record([domain.as_str()])?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| ScoutError::ProcessingError {
                message: format!("CSV buffer flush failed: {}", e),
            })?;
        self.storage.write_file(&self.args.output, &data).await?;

        Ok(self.args.output.clone())
    }
}
