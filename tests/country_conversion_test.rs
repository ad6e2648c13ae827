use anyhow::Result;
use city_iata_etl::{
    CelesCountryLookup, CountryConversionPipeline, CountryNormalizer, EtlEngine, LocalStorage,
    TomlConfig,
};
use tempfile::TempDir;

async fn convert(
    dir: &TempDir,
    input: &str,
    normalizer: CountryNormalizer<CelesCountryLookup>,
) -> Result<serde_json::Value> {
    std::fs::write(dir.path().join("city_to_iata2.json"), input)?;

    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let pipeline = CountryConversionPipeline::new(
        storage,
        normalizer,
        "city_to_iata2.json",
        "data/city_to_iata_full_countries.json",
    );

    let output_path = EtlEngine::new(pipeline).run().await?;
    let written = std::fs::read_to_string(dir.path().join(output_path))?;
    Ok(serde_json::from_str(&written)?)
}

#[tokio::test]
async fn test_converts_iso_codes_and_overrides() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = r#"{
  "Bucharest": {"code": "BUH", "country": "RO"},
  "Lisbon": {"code": "LIS", "country": "PRT"},
  "Abu Dhabi": {"code": "AUH", "country": "UAE"},
  "Paris": {"code": "PAR", "country": "France"},
  "New York": {"code": "NYC", "country": "US"},
  "London": {"code": "LON", "country": "GBR"},
  "Atlantis": {"code": "ATL", "country": "QQ"},
  "Nowhere": {"code": "NOW"}
}"#;

    let normalizer = CountryNormalizer::new(CelesCountryLookup::new());
    let value = convert(&temp_dir, input, normalizer).await?;

    assert_eq!(value["Bucharest"]["country"], "Romania");
    assert_eq!(value["Lisbon"]["country"], "Portugal");
    assert_eq!(value["Abu Dhabi"]["country"], "United Arab Emirates");
    assert_eq!(value["Paris"]["country"], "France");
    assert_eq!(value["New York"]["country"], "United States");
    assert_eq!(value["London"]["country"], "United Kingdom");
    assert_eq!(value["Atlantis"]["country"], "QQ");
    assert_eq!(value["Nowhere"], serde_json::json!({"code": "NOW"}));
    assert_eq!(value["Bucharest"]["code"], "BUH");
    Ok(())
}

#[tokio::test]
async fn test_overrides_from_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = TomlConfig::from_toml_str(
        r#"
[countries.overrides]
EN = "England"
"#,
    )?;
    config.validate_countries()?;

    let normalizer = CountryNormalizer::new(CelesCountryLookup::new())
        .with_overrides(config.country_overrides());
    let value = convert(&temp_dir, r#"{"London": {"country": "EN"}}"#, normalizer).await?;

    assert_eq!(value, serde_json::json!({"London": {"country": "England"}}));
    Ok(())
}

#[tokio::test]
async fn test_invalid_json_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let normalizer = CountryNormalizer::new(CelesCountryLookup::new());
    let result = convert(&temp_dir, "{not json", normalizer).await;
    assert!(result.is_err());
    Ok(())
}
