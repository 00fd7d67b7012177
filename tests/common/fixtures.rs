// Test fixtures for integration testing

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Taxonomy used across integration tests
#[allow(dead_code)] // Used in integration tests
pub const MEDICAL_TAXONOMY: &str = r#"{
    "description": "clinical indicators",
    "symptoms": {
        "indicators": ["fever", "cough", "shortness of breath"]
    },
    "conditions": {
        "respiratory": {
            "indicators": ["copd", "asthma"],
            "refinements": {
                "severe": {"indicators": ["respiratory failure"]}
            }
        },
        "cardiac": {"indicators": ["heart failure", "c.diff"]}
    }
}"#;

/// Synthetic corpus on disk: taxonomy, JSON articles and an ID list
#[allow(dead_code)] // Used in integration tests
pub struct TestCorpus {
    pub dir: TempDir,
    pub ids: Vec<String>,
}

impl TestCorpus {
    /// Five clinical articles; `a5` mentions nothing
    #[allow(dead_code)] // Used in integration tests
    pub fn clinical() -> Self {
        Self::with_articles(&[
            ("a1", "Patient had fever. No other symptoms were noted."),
            (
                "a2",
                "COPD was diagnosed in 2010. A cough and fever followed. \
                 Dr. Smith noted shortness of breath.",
            ),
            (
                "a3",
                "Asthma is common.<ref>Smith 2001</ref> It can progress to \
                 respiratory failure.\n* list item mentioning copd\n",
            ),
            (
                "a4",
                "Heart failure and c.diff were ruled out. The recopductive organ is fine.",
            ),
            ("a5", "Nothing relevant here."),
        ])
    }

    /// Corpus with arbitrary `(id, text)` articles
    #[allow(dead_code)] // Used in integration tests
    pub fn with_articles(articles: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("articles")).unwrap();
        fs::write(root.join("schema.json"), MEDICAL_TAXONOMY).unwrap();

        let mut ids = Vec::new();
        for (id, text) in articles {
            let article = serde_json::json!({ "title": id, "text": text });
            fs::write(
                root.join("articles").join(format!("{id}.json")),
                article.to_string(),
            )
            .unwrap();
            ids.push(id.to_string());
        }
        fs::write(root.join("ids.txt"), ids.join("\n")).unwrap();

        Self { dir, ids }
    }

    /// Add an ID to the list file without writing its article
    #[allow(dead_code)] // Used in integration tests
    pub fn with_missing(mut self, id: &str) -> Self {
        self.ids.push(id.to_string());
        fs::write(self.ids_file(), self.ids.join("\n")).unwrap();
        self
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn taxonomy(&self) -> PathBuf {
        self.path().join("schema.json")
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn documents_dir(&self) -> PathBuf {
        self.path().join("articles")
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn ids_file(&self) -> PathBuf {
        self.path().join("ids.txt")
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn output(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

/// UTF-8 text for matcher safety checks
#[allow(dead_code)] // Used in integration tests
pub struct Utf8TestData {
    pub emoji: Vec<&'static str>,
    pub multibyte: Vec<&'static str>,
    pub edge_cases: Vec<&'static str>,
}

impl Utf8TestData {
    #[allow(dead_code)] // Used in integration tests
    pub fn new() -> Self {
        Self {
            emoji: vec![
                "Fever 🤒 since Monday.",
                "🚀 Cough got worse! Then better.",
                "Done ✅ no asthma.",
                "Celebrate 🎉🎊🥳 copd-free",
            ],
            multibyte: vec![
                "发烧 fever 三天。咳嗽 cough.",   // Chinese
                "Лихорадка fever. Кашель.",      // Russian
                "حمى fever وسعال cough.",        // Arabic
                "Ελληνικά: asthma… και copd.",   // Greek
            ],
            edge_cases: vec![
                "",            // Empty string
                " ",           // Single space
                ".",           // Lone terminator
                "fever",       // Phrase only
                "\n\n\n",      // Multiple newlines
                "   \t  \n  ", // Whitespace mix
                "...!?",       // Terminators only
            ],
        }
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn all(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.emoji
            .iter()
            .chain(&self.multibyte)
            .chain(&self.edge_cases)
            .copied()
    }
}

impl Default for Utf8TestData {
    fn default() -> Self {
        Self::new()
    }
}
