// ============================================================
// Sample Domain Type
// ============================================================
// One document from the corpus, as handed out by the
// row-indexed sample source.
//
//   id             — the row index, stringified
//   abstract_text  — the document body (CSV column `abstract`)
//   title          — the reference summary (CSV column `title`),
//                    present only when the source was opened in
//                    "train" mode
//
// `abstract` is a reserved word in Rust, hence `abstract_text`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub abstract_text: String,
    pub title: Option<String>,
}

impl Sample {
    pub fn new(
        id:            impl Into<String>,
        abstract_text: impl Into<String>,
        title:         Option<String>,
    ) -> Self {
        Self {
            id:            id.into(),
            abstract_text: abstract_text.into(),
            title,
        }
    }
}
