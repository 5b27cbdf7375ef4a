//! JSON-backed translations.
//!
//! Each `<category>.json` holds `{ "<language>": { "<key>": string | [string] } }`.
//! Built-in tables for `zh-CN` and `en-US` are compiled in; files found in the
//! translation directory are layered on top, category by category.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::locale::{echo_key, fill_template, Localize};

const BUILTIN: [(&str, &str); 2] = [
    ("time", include_str!("../translation/time.json")),
    ("ui", include_str!("../translation/ui.json")),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Entry {
    Text(String),
    List(Vec<String>),
}

type Category = HashMap<String, HashMap<String, Entry>>;

#[derive(Debug, Clone, Default)]
pub struct Translator {
    language: String,
    categories: HashMap<String, Category>,
}

impl Translator {
    /// Built-in tables only.
    pub fn builtin(language: impl Into<String>) -> Self {
        let mut t = Self {
            language: language.into(),
            categories: HashMap::new(),
        };
        for (name, text) in BUILTIN {
            match serde_json::from_str::<Category>(text) {
                Ok(cat) => t.merge(name, cat),
                Err(err) => tracing::error!(category = name, error = %err, "bad built-in translation"),
            }
        }
        t
    }

    /// Built-in tables overlaid with every `*.json` file in `dir`.
    ///
    /// A missing directory or unparseable file is logged and skipped.
    pub fn load(dir: impl AsRef<Path>, language: impl Into<String>) -> Self {
        let dir = dir.as_ref();
        let mut t = Self::builtin(language);

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "translation directory unavailable");
                return t;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|text| serde_json::from_str::<Category>(&text).map_err(|e| e.to_string()));
            match parsed {
                Ok(cat) => {
                    tracing::debug!(category = %name, "loaded translation");
                    t.merge(&name, cat);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping translation file");
                }
            }
        }
        t
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn merge(&mut self, name: &str, cat: Category) {
        let target = self.categories.entry(name.to_string()).or_default();
        for (lang, keys) in cat {
            target.entry(lang).or_default().extend(keys);
        }
    }

    fn entry(&self, category: &str, key: &str) -> Option<&Entry> {
        self.categories.get(category)?.get(&self.language)?.get(key)
    }
}

impl Localize for Translator {
    fn get_list(&self, category: &str, key: &str) -> Vec<String> {
        match self.entry(category, key) {
            Some(Entry::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    fn format(&self, category: &str, key: &str, vars: &[(&str, &str)]) -> String {
        match self.entry(category, key) {
            Some(Entry::Text(template)) if !template.is_empty() => fill_template(template, vars),
            _ => echo_key(key, vars),
        }
    }
}
