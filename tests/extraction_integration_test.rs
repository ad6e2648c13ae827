use anyhow::Result;
use city_iata_etl::core::ConfigProvider;
use city_iata_etl::domain::ports::PageSource;
use city_iata_etl::utils::validation::Validate;
use city_iata_etl::{EtlEngine, LocalStorage, OpenAiClient, PdfExtractionPipeline, TomlConfig};
use httpmock::prelude::*;
use tempfile::TempDir;

/// Stands in for the PDF library: the "PDF" is UTF-8 text with form feeds between pages.
struct FormFeedPages;

impl PageSource for FormFeedPages {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> city_iata_etl::Result<Vec<String>> {
        Ok(String::from_utf8_lossy(pdf_bytes)
            .split('\x0C')
            .map(str::to_string)
            .collect())
    }
}

const PAGE_TEXT: &str = "IATA CITY CODES\n\
NYC New York NY United States\n\
BUH Bucharest    NAP Napoli\n\
\x0C\
PAR Paris\tLYS Lyon\n";

fn config_for(server: &MockServer, chunk_size: usize) -> Result<TomlConfig> {
    let toml_content = format!(
        r#"
[input]
pdf_path = "data/iata-city-codes.pdf"

[output]
path = "data/city_to_iata.json"

[llm]
base_url = "{}"
api_key = "sk-test"
model = "gpt-4o-mini"
chunk_size = {}
"#,
        server.base_url(),
        chunk_size
    );
    Ok(TomlConfig::from_toml_str(&toml_content)?)
}

fn write_input(dir: &TempDir) -> Result<()> {
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir)?;
    std::fs::write(data_dir.join("iata-city-codes.pdf"), PAGE_TEXT)?;
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_extraction_with_mocked_llm() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_input(&temp_dir)?;

    let server = MockServer::start();
    let completion_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "New York, United States: JFK\n\
                                    Napoli, Italy: NAP\n\
                                    Paris, France: PAR\n\
                                    LYS, France: Lyon"
                    }
                }]
            }));
    });

    let config = config_for(&server, 5000)?;
    config.validate()?;

    let client = OpenAiClient::from_config(&config)?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = PdfExtractionPipeline::new(storage, FormFeedPages, config)
        .with_completion_client(Box::new(client));

    let output_path = EtlEngine::new(pipeline).run().await?;

    // one request per page
    completion_mock.assert_hits(2);
    assert_eq!(output_path, "data/city_to_iata.json");

    let written = std::fs::read_to_string(temp_dir.path().join(&output_path))?;
    let value: serde_json::Value = serde_json::from_str(&written)?;

    assert_eq!(
        value,
        serde_json::json!({
            "Bucharest": {"code": "BUH"},
            "Lyon": {"code": "LYS", "country": "France"},
            "Napoli": {"code": "NAP", "country": "Italy"},
            "New York": {"code": "NYC", "country": "United States"},
            "Paris": {"code": "PAR", "country": "France"}
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_llm_outage_keeps_regex_results() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_input(&temp_dir)?;

    let server = MockServer::start();
    let completion_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(503).body("service unavailable");
    });

    let config = config_for(&server, 5000)?;
    let client = OpenAiClient::from_config(&config)?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = PdfExtractionPipeline::new(storage, FormFeedPages, config)
        .with_completion_client(Box::new(client));

    let output_path = EtlEngine::new(pipeline).run().await?;

    completion_mock.assert_hits(2);
    let written = std::fs::read_to_string(temp_dir.path().join(&output_path))?;
    let value: serde_json::Value = serde_json::from_str(&written)?;

    assert_eq!(
        value,
        serde_json::json!({
            "Bucharest": {"code": "BUH"},
            "Lyon": {"code": "LYS"},
            "Napoli": {"code": "NAP"},
            "New York": {"code": "NYC", "country": "United States"},
            "Paris": {"code": "PAR"}
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_chunk_size_controls_request_count() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_input(&temp_dir)?;

    let server = MockServer::start();
    let completion_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content": "no cities here"}}]
        }));
    });

    let first_page_chars = PAGE_TEXT.split('\x0C').next().unwrap().chars().count();
    let second_page_chars = PAGE_TEXT.split('\x0C').nth(1).unwrap().chars().count();
    let chunk_size = 10;
    let expected_requests =
        first_page_chars.div_ceil(chunk_size) + second_page_chars.div_ceil(chunk_size);

    let config = config_for(&server, chunk_size)?;
    assert_eq!(config.chunk_size(), chunk_size);

    let client = OpenAiClient::from_config(&config)?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = PdfExtractionPipeline::new(storage, FormFeedPages, config)
        .with_completion_client(Box::new(client));

    EtlEngine::new(pipeline).run().await?;

    completion_mock.assert_hits(expected_requests);
    Ok(())
}

#[tokio::test]
async fn test_missing_pdf_fails_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let config = config_for(&server, 100)?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = PdfExtractionPipeline::new(storage, FormFeedPages, config);

    let result = EtlEngine::new(pipeline).run().await;
    assert!(matches!(result, Err(city_iata_etl::EtlError::IoError(_))));
    Ok(())
}
