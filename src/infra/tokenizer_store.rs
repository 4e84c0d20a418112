// ============================================================
// Tokenizer Store
// ============================================================
// Loads a HuggingFace tokenizer.json from a directory, or builds
// a word-level one from a corpus and saves it there first.
//
// The built tokenizer uses BERT's special ids and a BertProcessing
// post-processor, so with special tokens enabled every encoded
// line comes out as  [CLS] words... [SEP] . Those per-line [SEP]
// ids are what `compute_token_type_ids` later keys on.
//
//   [PAD] = 0   [UNK] = 1   [CLS] = 101   [SEP] = 102   [MASK] = 103
//
// Corpus words are counted with the same BertNormalizer and
// Whitespace pre-tokenizer that go into the JSON, so every
// counted token is one the tokenizer can actually produce.
// Word ids fill the free slots 2..=100, then 104.., and all ids
// stay below `vocab_size`.
//
// Reference: HuggingFace tokenizers JSON format

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{
    Normalizer, OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer, Tokenizer,
};

use crate::domain::traits::TokenEncoder;
use crate::error::{PrepError, Result};

pub const PAD_TOKEN_ID:  u32 = 0;
pub const UNK_TOKEN_ID:  u32 = 1;
pub const CLS_TOKEN_ID:  u32 = 101;
pub const SEP_TOKEN_ID:  u32 = 102;
pub const MASK_TOKEN_ID: u32 = 103;

const SPECIAL_TOKENS: [(u32, &str); 5] = [
    (PAD_TOKEN_ID,  "[PAD]"),
    (UNK_TOKEN_ID,  "[UNK]"),
    (CLS_TOKEN_ID,  "[CLS]"),
    (SEP_TOKEN_ID,  "[SEP]"),
    (MASK_TOKEN_ID, "[MASK]"),
];

/// Smallest vocabulary that still fits every special id
pub const MIN_VOCAB_SIZE: usize = MASK_TOKEN_ID as usize + 1;

const TOKENIZER_FILE: &str = "tokenizer.json";

// ─── HfEncoder ────────────────────────────────────────────────────────────────
/// `TokenEncoder` over a HuggingFace tokenizer.
pub struct HfEncoder {
    tokenizer:          Tokenizer,
    add_special_tokens: bool,
}

impl HfEncoder {
    pub fn new(tokenizer: Tokenizer, add_special_tokens: bool) -> Self {
        Self { tokenizer, add_special_tokens }
    }

    /// Look up the id of a token such as "[SEP]"
    pub fn token_id(&self, token: &str) -> Option<u32> {
        self.tokenizer.token_to_id(token)
    }

    /// Fail when `token` exists in the vocabulary under an id
    /// other than `expected`. Tokens the vocabulary lacks pass.
    pub fn ensure_token_id(&self, token: &str, expected: u32) -> Result<()> {
        match self.token_id(token) {
            Some(actual) if actual != expected => Err(PrepError::Config(format!(
                "tokenizer maps {token} to {actual}, config expects {expected}"
            ))),
            Some(_) => Ok(()),
            None => {
                tracing::warn!("Tokenizer has no {} token; cannot check id {}", token, expected);
                Ok(())
            }
        }
    }
}

impl TokenEncoder for HfEncoder {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let enc = self
            .tokenizer
            .encode(text, self.add_special_tokens)
            .map_err(|e| PrepError::Tokenizer(e.to_string()))?;
        Ok(enc.get_ids().to_vec())
    }
}

// ─── TokenizerStore ───────────────────────────────────────────────────────────
pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load an existing tokenizer, or build a new one from the texts
    /// `corpus` returns. `corpus` is only called when building.
    pub fn load_or_build<F>(&self, corpus: F, vocab_size: usize) -> Result<Tokenizer>
    where
        F: FnOnce() -> Vec<String>,
    {
        if self.path().exists() {
            tracing::info!("Loading existing tokenizer from '{}'", self.path().display());
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(&corpus(), vocab_size)
        }
    }

    /// Load a previously saved tokenizer.json
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        Tokenizer::from_file(&path).map_err(|e| {
            PrepError::Tokenizer(format!("Cannot load tokenizer from '{}': {e}", path.display()))
        })
    }

    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        if vocab_size < MIN_VOCAB_SIZE {
            return Err(PrepError::Config(format!(
                "vocab_size {vocab_size} cannot hold the special ids (need at least {MIN_VOCAB_SIZE})"
            )));
        }

        std::fs::create_dir_all(&self.dir).map_err(|source| PrepError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let normalizer    = bert_normalizer();
        let pre_tokenizer = Whitespace::default();

        let free_slots = vocab_size - SPECIAL_TOKENS.len();
        let words      = rank_tokens(texts, &normalizer, &pre_tokenizer, free_slots)?;

        let mut vocab = serde_json::Map::new();
        for (id, content) in SPECIAL_TOKENS {
            vocab.insert(content.to_string(), serde_json::json!(id));
        }
        let word_ids = (0..vocab_size as u32).filter(|id| !is_special_id(*id));
        for (word, id) in words.iter().zip(word_ids) {
            vocab.entry(word.clone()).or_insert_with(|| serde_json::json!(id));
        }

        let added_tokens: Vec<serde_json::Value> = SPECIAL_TOKENS
            .iter()
            .map(|&(id, content)| special_token(id, content))
            .collect();

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": added_tokens,
            "normalizer": serde_json::to_value(&normalizer)?,
            "pre_tokenizer": serde_json::to_value(&pre_tokenizer)?,
            "post_processor": {
                "type": "BertProcessing",
                "sep": ["[SEP]", SEP_TOKEN_ID],
                "cls": ["[CLS]", CLS_TOKEN_ID]
            },
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let tok_path = self.path();
        std::fs::write(&tok_path, serde_json::to_string_pretty(&tokenizer_json)?)
            .map_err(|source| PrepError::Io { path: tok_path.clone(), source })?;

        tracing::info!(
            "Tokenizer built with {} words, saved to '{}'",
            words.len(),
            tok_path.display()
        );

        self.load()
    }
}

fn bert_normalizer() -> BertNormalizer {
    BertNormalizer::new(true, true, None, true)
}

fn is_special_id(id: u32) -> bool {
    SPECIAL_TOKENS.iter().any(|&(special, _)| special == id)
}

fn special_token(id: u32, content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "content": content,
        "single_word": false,
        "lstrip": false,
        "rstrip": false,
        "normalized": false,
        "special": true
    })
}

/// Split `text` exactly the way the built tokenizer will.
fn pre_tokenize<N, P>(text: &str, normalizer: &N, pre_tokenizer: &P) -> Result<Vec<String>>
where
    N: Normalizer,
    P: PreTokenizer,
{
    let to_err = |e: tokenizers::Error| PrepError::Tokenizer(e.to_string());

    let mut pretokenized = PreTokenizedString::from(text);
    pretokenized
        .normalize(|n| normalizer.normalize(n))
        .map_err(to_err)?;
    pre_tokenizer.pre_tokenize(&mut pretokenized).map_err(to_err)?;

    Ok(pretokenized
        .get_splits(OffsetReferential::Normalized, OffsetType::Byte)
        .into_iter()
        .map(|(piece, _, _)| piece.to_string())
        .collect())
}

/// Tokens by descending frequency, ties broken alphabetically so
/// the vocabulary is reproducible. Special token strings are skipped.
fn rank_tokens<N, P>(
    texts:         &[String],
    normalizer:    &N,
    pre_tokenizer: &P,
    max_words:     usize,
) -> Result<Vec<String>>
where
    N: Normalizer,
    P: PreTokenizer,
{
    let mut freq: HashMap<String, usize> = HashMap::new();

    for text in texts {
        for token in pre_tokenize(text, normalizer, pre_tokenizer)? {
            if !token.is_empty() && !SPECIAL_TOKENS.iter().any(|&(_, s)| s == token) {
                *freq.entry(token).or_insert(0) += 1;
            }
        }
    }

    let mut words: Vec<(String, usize)> = freq.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(max_words);
    Ok(words.into_iter().map(|(w, _)| w).collect())
}
