use crate::domain::model::{
    CityEntry, ExtractionReport, ExtractionResult, ExtractionSource, PassStats, ResultSet,
};
use crate::domain::ports::{CompletionClient, ConfigProvider, PageSource, Pipeline, Storage};
use crate::extract::{chunk_text, DirectPatternExtractor, LlmExtractor, LoosePatternExtractor};
use crate::utils::error::Result;

/// PDF → city/IATA table. Passes run in a fixed order (direct, LLM, loose)
/// and the first pass to produce a city owns it.
pub struct PdfExtractionPipeline<S: Storage, P: PageSource, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) pages: P,
    pub(crate) config: C,
    direct: DirectPatternExtractor,
    loose: LoosePatternExtractor,
    llm: Option<LlmExtractor>,
}

impl<S: Storage, P: PageSource, C: ConfigProvider> PdfExtractionPipeline<S, P, C> {
    pub fn new(storage: S, pages: P, config: C) -> Self {
        Self {
            storage,
            pages,
            config,
            direct: DirectPatternExtractor::new(),
            loose: LoosePatternExtractor::new(),
            llm: None,
        }
    }

    /// Enables the LLM pass with the given completion client.
    pub fn with_completion_client(mut self, client: Box<dyn CompletionClient>) -> Self {
        self.llm = Some(LlmExtractor::new(client));
        self
    }

    async fn run_llm_pass(
        &self,
        llm: &LlmExtractor,
        pages: &[String],
        results: &mut ResultSet,
        stats: &mut PassStats,
    ) {
        let chunk_size = self.config.chunk_size();

        for (page_index, page) in pages.iter().enumerate() {
            let chunks = chunk_text(page, chunk_size);
            tracing::debug!(page = page_index + 1, chunks = chunks.len(), "Sending page to LLM");

            for (chunk_index, chunk) in chunks.iter().enumerate() {
                match llm.extract_chunk(chunk).await {
                    Ok(entries) => merge_entries(results, stats, ExtractionSource::Llm, entries),
                    Err(e) => {
                        // 單一區塊失敗不影響其他區塊
                        tracing::warn!(
                            page = page_index + 1,
                            chunk = chunk_index + 1,
                            error = %e,
                            "LLM extraction failed, skipping chunk"
                        );
                        stats.failed_units += 1;
                    }
                }
            }
        }
    }
}

/// First writer wins: entries for cities already in `results` are counted and dropped.
pub fn merge_entries(
    results: &mut ResultSet,
    stats: &mut PassStats,
    source: ExtractionSource,
    entries: Vec<CityEntry>,
) {
    for entry in entries {
        match results.get(&entry.city) {
            Some(existing) => {
                if existing != &entry.record {
                    tracing::debug!(
                        city = %entry.city,
                        kept = %existing.code,
                        rejected = %entry.record.code,
                        pass = %source,
                        "Conflicting duplicate ignored"
                    );
                }
                stats.duplicates += 1;
            }
            None => {
                results.insert_if_absent(entry);
                stats.accepted += 1;
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, P: PageSource, C: ConfigProvider> Pipeline for PdfExtractionPipeline<S, P, C> {
    type Extracted = Vec<String>;
    type Transformed = ExtractionResult;

    async fn extract(&self) -> Result<Vec<String>> {
        tracing::debug!("Reading PDF from: {}", self.config.input_path());
        let pdf_bytes = self.storage.read_file(self.config.input_path()).await?;

        let pages = self.pages.extract_pages(&pdf_bytes)?;
        tracing::info!("Loaded {} pages ({} bytes)", pages.len(), pdf_bytes.len());
        Ok(pages)
    }

    async fn transform(&self, pages: Vec<String>) -> Result<ExtractionResult> {
        let mut results = ResultSet::new();
        let mut report = ExtractionReport {
            pages: pages.len(),
            ..Default::default()
        };

        // 1. 固定欄位格式
        for page in &pages {
            let entries = self.direct.extract(page);
            merge_entries(
                &mut results,
                report.pass_mut(ExtractionSource::Direct),
                ExtractionSource::Direct,
                entries,
            );
        }
        tracing::info!(
            accepted = report.direct.accepted,
            duplicates = report.direct.duplicates,
            "Direct pattern pass finished"
        );

        // 2. LLM
        match &self.llm {
            Some(llm) => {
                self.run_llm_pass(llm, &pages, &mut results, &mut report.llm).await;
                tracing::info!(
                    accepted = report.llm.accepted,
                    duplicates = report.llm.duplicates,
                    failed_chunks = report.llm.failed_units,
                    "LLM pass finished"
                );
            }
            None => tracing::info!("LLM pass disabled"),
        }

        // 3. 寬鬆格式，只補上前面沒抓到的城市
        for page in &pages {
            let entries = self.loose.extract(page);
            merge_entries(
                &mut results,
                report.pass_mut(ExtractionSource::Loose),
                ExtractionSource::Loose,
                entries,
            );
        }
        tracing::info!(
            accepted = report.loose.accepted,
            duplicates = report.loose.duplicates,
            "Loose pattern pass finished"
        );

        debug_assert_eq!(results.len(), report.total_accepted());
        tracing::info!(
            "Extracted {} cities from {} pages",
            report.total_accepted(),
            report.pages
        );

        Ok(ExtractionResult { results, report })
    }

    async fn load(&self, result: ExtractionResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        let json = serde_json::to_string_pretty(&result.results)?;

        tracing::debug!("Writing {} cities ({} bytes)", result.results.len(), json.len());
        self.storage.write_file(&output_path, json.as_bytes()).await?;

        Ok(output_path)
    }
}
