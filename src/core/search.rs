use crate::config::settings::SearchSettings;
use crate::config::SearchArgs;
use crate::core::table;
use crate::domain::model::{SearchJob, SearchOutcome};
use crate::domain::normalize;
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::Result;
use reqwest::Client;
use std::collections::BTreeSet;

/// Runs one SERP lookup per subject and saves each raw JSON response under
/// the results directory. Subjects whose result file already exists are
/// skipped, so an interrupted run can be resumed by running it again.
pub struct SearchPipeline<S: Storage> {
    storage: S,
    args: SearchArgs,
    settings: SearchSettings,
    client: Client,
}

impl<S: Storage> SearchPipeline<S> {
    pub fn new(storage: S, args: SearchArgs, settings: SearchSettings) -> Self {
        Self {
            storage,
            args,
            settings,
            client: Client::new(),
        }
    }

    async fn fetch(&self, query: &str) -> Result<serde_json::Value> {
        let num = self.settings.num.to_string();
        let params = [
            ("engine", self.settings.engine.as_str()),
            ("q", query),
            ("location", self.settings.location.as_str()),
            ("hl", self.settings.hl.as_str()),
            ("gl", self.settings.gl.as_str()),
            ("google_domain", self.settings.google_domain.as_str()),
            ("num", num.as_str()),
            ("safe", self.settings.safe.as_str()),
            ("api_key", self.settings.api_key.as_str()),
        ];

        tracing::debug!("Making API request to: {}", self.settings.endpoint);
        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&params)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        let body = response.error_for_status()?.json().await?;
        Ok(body)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for SearchPipeline<S> {
    type Raw = BTreeSet<String>;
    type Prepared = Vec<SearchJob>;

    async fn extract(&self) -> Result<BTreeSet<String>> {
        let data = self.storage.read_file(&self.args.subjects).await?;
        let (headers, rows) = table::parse_rows(&data, self.args.skip_title_row)?;
        let subject_idx =
            table::column_index(&headers, &self.args.subject_column, &self.args.subjects)?;

        let mut subjects = BTreeSet::new();
        for row in rows {
            if let Some(value) = row.get(subject_idx) {
                let value = value.trim();
                if !value.is_empty() {
                    subjects.insert(value.to_string());
                }
            }
        }

        tracing::info!(
            "Read {} unique subjects from {}",
            subjects.len(),
            self.args.subjects
        );
        Ok(subjects)
    }

    async fn transform(&self, subjects: BTreeSet<String>) -> Result<Vec<SearchJob>> {
        let jobs = subjects
            .into_iter()
            .map(|subject| {
                let query = normalize::build_query(&self.settings.query_template, &subject);
                let file_name = format!(
                    "{}.search_results.json",
                    normalize::sanitize_file_name(&subject)
                );
                SearchJob {
                    subject,
                    query,
                    file_name,
                }
            })
            .collect();
        Ok(jobs)
    }

    async fn load(&self, jobs: Vec<SearchJob>) -> Result<String> {
        let total = jobs.len();
        let mut outcome = SearchOutcome::default();

        for (i, job) in jobs.iter().enumerate() {
            tracing::info!("Processing {}/{}: {}", i + 1, total, job.subject);
            let result_path = format!("{}/{}", self.args.out_dir, job.file_name);

            if self.storage.file_exists(&result_path).await? {
                tracing::info!("Results already exist for {}, skipping", job.subject);
                outcome.skipped += 1;
                continue;
            }

            // One blocking call per subject; a failed lookup is logged and
            // the loop moves on to the next subject.
            match self.fetch(&job.query).await {
                Ok(body) => {
                    let data = serde_json::to_vec_pretty(&body)?;
                    self.storage.write_file(&result_path, &data).await?;

                    let organic = body
                        .get("organic_results")
                        .and_then(|v| v.as_array())
                        .map(|a| a.len())
                        .unwrap_or(0);
                    if organic > 0 {
                        tracing::info!("Found {} organic results for {}", organic, job.subject);
                    } else {
                        tracing::info!("No organic results found for {}", job.subject);
                    }
                    outcome.written += 1;
                }
                Err(e) => {
                    tracing::warn!("Search for '{}' failed: {}", job.subject, e);
                    outcome.failed += 1;
                }
            }
        }

        tracing::info!(
            "Search run complete: {} written, {} skipped, {} failed",
            outcome.written,
            outcome.skipped,
            outcome.failed
        );
        Ok(self.args.out_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::MemoryStorage;
    use httpmock::prelude::*;

    fn args() -> SearchArgs {
        SearchArgs {
            subjects: "plan_domain_names.csv".to_string(),
            subject_column: "domain".to_string(),
            skip_title_row: false,
            out_dir: "email_scrape_results".to_string(),
            config: None,
            query_template: None,
            api_key: None,
        }
    }

    fn settings(endpoint: String) -> SearchSettings {
        SearchSettings {
            endpoint,
            api_key: "test-key".to_string(),
            ..SearchSettings::default()
        }
    }

    #[tokio::test]
    async fn test_extract_dedups_subjects() {
        let storage = MemoryStorage::new();
        storage
            .put(
                "plan_domain_names.csv",
                b"domain\naetna.com\ncigna.com\naetna.com\n\n",
            )
            .await;

        let pipeline =
            SearchPipeline::new(storage, args(), settings("http://localhost/".to_string()));
        let subjects = pipeline.extract().await.unwrap();

        assert_eq!(
            subjects.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["aetna.com", "cigna.com"]
        );
    }

    #[tokio::test]
    async fn test_transform_builds_query_and_file_name() {
        let storage = MemoryStorage::new();
        let pipeline =
            SearchPipeline::new(storage, args(), settings("http://localhost/".to_string()));

        let subjects: BTreeSet<String> = ["aetna.com".to_string()].into_iter().collect();
        let jobs = pipeline.transform(subjects).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].file_name, "aetna_com.search_results.json");
        assert!(jobs[0].query.starts_with("site:aetna.com"));
        assert!(jobs[0].query.contains("FHIR"));
    }

    #[tokio::test]
    async fn test_load_writes_response_and_skips_existing() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search.json")
                .query_param("engine", "google")
                .query_param("api_key", "test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"organic_results": [{"title": "FHIR API"}]}));
        });

        let storage = MemoryStorage::new();
        storage
            .put(
                "email_scrape_results/cigna_com.search_results.json",
                b"{}",
            )
            .await;

        let pipeline = SearchPipeline::new(
            storage.clone(),
            args(),
            settings(server.url("/search.json")),
        );
        let jobs = vec![
            SearchJob {
                subject: "aetna.com".to_string(),
                query: "site:aetna.com \"FHIR\"".to_string(),
                file_name: "aetna_com.search_results.json".to_string(),
            },
            SearchJob {
                subject: "cigna.com".to_string(),
                query: "site:cigna.com \"FHIR\"".to_string(),
                file_name: "cigna_com.search_results.json".to_string(),
            },
        ];

        let out_dir = pipeline.load(jobs).await.unwrap();
        assert_eq!(out_dir, "email_scrape_results");

        // only the subject without existing results hits the API
        api_mock.assert_hits(1);

        let written = storage
            .get("email_scrape_results/aetna_com.search_results.json")
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(body["organic_results"][0]["title"], "FHIR API");

        // pre-existing file untouched
        let existing = storage
            .get("email_scrape_results/cigna_com.search_results.json")
            .await
            .unwrap();
        assert_eq!(existing, b"{}");
    }

    #[tokio::test]
    async fn test_load_continues_after_api_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search.json");
            then.status(500);
        });

        let storage = MemoryStorage::new();
        let pipeline = SearchPipeline::new(
            storage.clone(),
            args(),
            settings(server.url("/search.json")),
        );
        let jobs = vec![SearchJob {
            subject: "aetna.com".to_string(),
            query: "site:aetna.com".to_string(),
            file_name: "aetna_com.search_results.json".to_string(),
        }];

        // the run itself succeeds; the failure is only logged
        let out_dir = pipeline.load(jobs).await.unwrap();
        assert_eq!(out_dir, "email_scrape_results");
        assert!(storage
            .get("email_scrape_results/aetna_com.search_results.json")
            .await
            .is_none());
    }
}
