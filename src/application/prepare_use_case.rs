// ============================================================
// PrepareUseCase
// ============================================================
// Runs the full preparation pipeline in order:
//
//   Step 1: Validate config
//   Step 2: Open <data_dir>/<prefix>.csv          (data)
//   Step 3: Load or build the tokenizer, check    (infra)
//           its [PAD]/[SEP] ids against config
//   Step 4: Save config next to the tokenizer     (infra)
//   Step 5: For every sample:
//             split abstract/title into lines     (data)
//             encode_for_summarization            (data)
//             fit_to_block_size on both outputs   (data)
//   Step 6: Wrap the items in a PreparedDataset   (data)
//
// Callers with their own tokenizer skip steps 3-4 through
// `execute_with`.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};

use crate::data::{
    dataset::{PreparedDataset, SummarizationDataset, SummarizationItem},
    encoding::{encode_for_summarization, fit_to_block_size},
    preprocessor::Preprocessor,
};
use crate::domain::{
    sample::Sample,
    traits::{Persistable, TokenEncoder},
};
use crate::infra::{
    config::PrepareConfig,
    tokenizer_store::{HfEncoder, TokenizerStore},
};

/// File name of the config written next to tokenizer.json
pub const CONFIG_FILE: &str = "prepare_config.json";

pub struct PrepareUseCase {
    config:       PrepareConfig,
    preprocessor: Preprocessor,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config, preprocessor: Preprocessor::new() }
    }

    pub fn config(&self) -> &PrepareConfig {
        &self.config
    }

    /// Prepare every sample using the tokenizer in `tokenizer_dir`,
    /// building one from the corpus if none exists yet.
    pub fn execute(&self) -> Result<PreparedDataset> {
        let cfg    = &self.config;
        let source = self.open_source()?;

        // ── Tokenizer ─────────────────────────────────────────────────────────
        let corpus = || -> Vec<String> {
            source
                .iter()
                .flat_map(|s| std::iter::once(s.abstract_text).chain(s.title))
                .collect()
        };

        let store     = TokenizerStore::new(&cfg.tokenizer_dir);
        let tokenizer = store
            .load_or_build(corpus, cfg.vocab_size)
            .with_context(|| format!("Cannot prepare tokenizer in '{}'", cfg.tokenizer_dir.display()))?;

        let encoder = HfEncoder::new(tokenizer, cfg.add_special_tokens);
        encoder
            .ensure_token_id("[PAD]", cfg.pad_token_id)
            .and_then(|_| encoder.ensure_token_id("[SEP]", cfg.separator_token_id))
            .with_context(|| format!("Tokenizer in '{}' does not match config", store.path().display()))?;

        let config_path = cfg.tokenizer_dir.join(CONFIG_FILE);
        cfg.save(&config_path)
            .with_context(|| format!("Cannot save config to '{}'", config_path.display()))?;

        self.encode_all(&source, &encoder)
    }

    /// Prepare every sample with a caller-supplied encoder.
    pub fn execute_with<E: TokenEncoder + ?Sized>(&self, encoder: &E) -> Result<PreparedDataset> {
        let source = self.open_source()?;
        self.encode_all(&source, encoder)
    }

    /// Encode a single sample. A sample without a title gets an
    /// all-padding target.
    pub fn prepare_sample<E: TokenEncoder + ?Sized>(
        &self,
        sample:  &Sample,
        encoder: &E,
    ) -> Result<SummarizationItem> {
        let cfg = &self.config;

        let abs_lines     = self.preprocessor.split_lines(&sample.abstract_text);
        let summary_lines = sample
            .title
            .as_deref()
            .map(|t| self.preprocessor.split_lines(t))
            .unwrap_or_default();

        let (src, tgt) = encode_for_summarization(&abs_lines, &summary_lines, encoder)
            .with_context(|| format!("Cannot encode sample {}", sample.id))?;

        if src.len() > cfg.block_size {
            tracing::debug!(
                "Sample {}: source truncated from {} to {} ids",
                sample.id,
                src.len(),
                cfg.block_size
            );
        }

        Ok(SummarizationItem {
            id:      sample.id.clone(),
            src_ids: fit_to_block_size(&src, cfg.block_size, cfg.pad_token_id),
            tgt_ids: fit_to_block_size(&tgt, cfg.block_size, cfg.pad_token_id),
        })
    }

    fn open_source(&self) -> Result<SummarizationDataset> {
        let cfg = &self.config;
        cfg.validate().context("Invalid preparation config")?;

        tracing::info!(
            "Loading '{}.csv' from '{}'",
            cfg.prefix,
            cfg.data_dir.display()
        );
        SummarizationDataset::new(&cfg.data_dir, cfg.prefix.clone())
            .with_context(|| format!("Cannot open sample source in '{}'", cfg.data_dir.display()))
    }

    fn encode_all<E: TokenEncoder + ?Sized>(
        &self,
        source:  &SummarizationDataset,
        encoder: &E,
    ) -> Result<PreparedDataset> {
        let mut items = Vec::with_capacity(source.count());
        for index in 0..source.count() {
            let sample = source.get(index)?;
            items.push(self.prepare_sample(&sample, encoder)?);
        }

        tracing::info!(
            "Prepared {} items (block_size={})",
            items.len(),
            self.config.block_size
        );
        Ok(PreparedDataset::new(items))
    }
}
