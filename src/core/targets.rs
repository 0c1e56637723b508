use crate::config::TargetsArgs;
use crate::core::table;
use crate::domain::model::TargetRecord;
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::{Result, ScoutError};
use std::collections::BTreeMap;

const PARENT_ORG_COLUMN: &str = "Parent Organization";
const CONTRACT_NAME_COLUMN: &str = "Contract Name";
const MARKETING_NAME_COLUMN: &str = "Organization Marketing Name";

/// Merges the star-ratings and contract-directory CSVs into one list with a
/// single row per parent organization (`search_these.csv`).
pub struct TargetListPipeline<S: Storage> {
    storage: S,
    args: TargetsArgs,
}

impl<S: Storage> TargetListPipeline<S> {
    pub fn new(storage: S, args: TargetsArgs) -> Self {
        Self { storage, args }
    }

    async fn read_records(&self, path: &str, skip_title_row: bool) -> Result<Vec<TargetRecord>> {
        let data = self.storage.read_file(path).await?;
        let (headers, rows) = table::parse_rows(&data, skip_title_row)?;

        let parent_idx = table::column_index(&headers, PARENT_ORG_COLUMN, path)?;
        // These two are absent from some CMS extracts; blank cells are fine.
        let contract_idx = table::column_index(&headers, CONTRACT_NAME_COLUMN, path).ok();
        let marketing_idx = table::column_index(&headers, MARKETING_NAME_COLUMN, path).ok();

        let cell = |row: &csv::StringRecord, idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let mut records = Vec::new();
        for row in rows {
            let parent = row.get(parent_idx).map(str::trim).unwrap_or_default();
            if parent.is_empty() {
                continue;
            }
            records.push(TargetRecord {
                parent_organization: parent.to_string(),
                contract_name: cell(&row, contract_idx),
                organization_marketing_name: cell(&row, marketing_idx),
            });
        }

        tracing::debug!("Read {} rows with a parent organization from {}", records.len(), path);
        Ok(records)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for TargetListPipeline<S> {
    type Raw = Vec<TargetRecord>;
    type Prepared = Vec<TargetRecord>;

    async fn extract(&self) -> Result<Vec<TargetRecord>> {
        // The star-ratings extract carries a title line above its header.
        let mut records = self.read_records(&self.args.star_ratings, true).await?;
        records.extend(self.read_records(&self.args.directory, false).await?);
        Ok(records)
    }

    async fn transform(&self, records: Vec<TargetRecord>) -> Result<Vec<TargetRecord>> {
        let total = records.len();
        let mut by_parent: BTreeMap<String, TargetRecord> = BTreeMap::new();
        for record in records {
            // Later rows win, so directory data overrides star-ratings data.
            by_parent.insert(record.parent_organization.clone(), record);
        }

        tracing::info!(
            "Found {} unique parent organizations in {} rows",
            by_parent.len(),
            total
        );
        Ok(by_parent.into_values().collect())
    }

    async fn load(&self, records: Vec<TargetRecord>) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            PARENT_ORG_COLUMN,
            CONTRACT_NAME_COLUMN,
            MARKETING_NAME_COLUMN,
        ])?;
        for record in &records {
            writer.write_record([
                record.parent_organization.as_str(),
                record.contract_name.as_str(),
                record.organization_marketing_name.as_str(),
            ])?;
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
