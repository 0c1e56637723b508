use httpmock::prelude::*;
use payer_scout::{Engine, LocalStorage, SearchArgs, SearchPipeline, SearchSettings};
use tempfile::TempDir;

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
async fn test_end_to_end_search_with_real_http() {
    let temp_dir = TempDir::new().unwrap();
    let base_path = temp_dir.path().to_str().unwrap().to_string();

    std::fs::write(
        temp_dir.path().join("plan_domain_names.csv"),
        "domain\naetna.com\ncigna.com\n",
    )
    .unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search.json")
            .query_param("engine", "google")
            .query_param("gl", "us")
            .query_param("num", "10")
            .query_param("api_key", "test-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "organic_results": [
                    {"title": "Provider Directory FHIR API", "link": "https://example.com/fhir"}
                ]
            }));
    });

    let storage = LocalStorage::new(base_path);
    let pipeline = SearchPipeline::new(storage, args(), settings(server.url("/search.json")));
    let engine = Engine::new(pipeline);

    let out_dir = engine.run().await.unwrap();
    assert_eq!(out_dir, "email_scrape_results");
    api_mock.assert_hits(2);

    let results_dir = temp_dir.path().join("email_scrape_results");
    for name in [
        "aetna_com.search_results.json",
        "cigna_com.search_results.json",
    ] {
        let path = results_dir.join(name);
        assert!(path.exists(), "missing result file {}", name);

        let body: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            body["organic_results"][0]["title"],
            "Provider Directory FHIR API"
        );
    }
}

#[tokio::test]
async fn test_rerun_skips_existing_results() {
    let temp_dir = TempDir::new().unwrap();
    let base_path = temp_dir.path().to_str().unwrap().to_string();

    std::fs::write(
        temp_dir.path().join("plan_domain_names.csv"),
        "domain\naetna.com\n",
    )
    .unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/search.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"organic_results": []}));
    });

    let storage = LocalStorage::new(base_path);
    let pipeline = SearchPipeline::new(storage, args(), settings(server.url("/search.json")));
    let engine = Engine::new(pipeline);

    engine.run().await.unwrap();
    engine.run().await.unwrap();

    // the second run finds the result file on disk and never calls out
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_search_sends_templated_query() {
    let temp_dir = TempDir::new().unwrap();
    let base_path = temp_dir.path().to_str().unwrap().to_string();

    std::fs::write(
        temp_dir.path().join("search_these.csv"),
        "2025 Part C Star Ratings Data\n\
         Parent Organization,Contract Name,Organization Marketing Name\n\
         Aetna Inc.,Aetna Medicare,Aetna Medicare Plans\n",
    )
    .unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/search.json").query_param(
            "q",
            "Aetna Medicare Plans Medicare Advantage \"PROVIDER DIRECTORY\" API \"FHIR\"",
        );
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"organic_results": []}));
    });

    let search_args = SearchArgs {
        subjects: "search_these.csv".to_string(),
        subject_column: "Organization Marketing Name".to_string(),
        skip_title_row: true,
        out_dir: "scrape_results".to_string(),
        config: None,
        query_template: Some(
            "{subject} Medicare Advantage \"PROVIDER DIRECTORY\" API \"FHIR\"".to_string(),
        ),
        api_key: None,
    };
    let mut settings = settings(server.url("/search.json"));
    settings.query_template = search_args.query_template.clone().unwrap();

    let storage = LocalStorage::new(base_path);
    let engine = Engine::new(SearchPipeline::new(storage, search_args, settings));
    engine.run().await.unwrap();

    api_mock.assert();
    assert!(temp_dir
        .path()
        .join("scrape_results/Aetna_Medicare_Plans.search_results.json")
        .exists());
}
