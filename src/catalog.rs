//! 固定回复目录
//!
//! 标签 -> 回复文本；缺失的标签回退到 `unknown`。

use std::collections::HashMap;

use crate::intent::UNKNOWN_LABEL;

const DEFAULT_RESPONSES: &[(&str, &str)] = &[
    ("greeting", "Hello! How can I help you?"),
    ("farewell", "Goodbye! Have a nice day! 👋"),
    ("identity", "I'm your friendly chatbot. 😘"),
    ("help", "I can help you with various tasks. Just ask!"),
    (
        "joke/help",
        "My purpose is world domination! 😈 Just kidding. Ask me anything!",
    ),
    ("secret", "I like ChatGPT! 🤫 Don't tell anyone."),
    (UNKNOWN_LABEL, "Sorry, I didn't understand that."),
];

#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    responses: HashMap<String, String>,
    fallback: String,
}

impl ResponseCatalog {
    /// 从 (label, text) 对构建；未提供 `unknown` 时使用默认兜底文本
    pub fn new<L, T>(entries: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        let responses: HashMap<String, String> = entries
            .into_iter()
            .map(|(label, text)| (label.into(), text.into()))
            .collect();
        let fallback = responses
            .get(UNKNOWN_LABEL)
            .cloned()
            .unwrap_or_else(|| "Sorry, I didn't understand that.".to_string());

        Self {
            responses,
            fallback,
        }
    }

    pub fn lookup(&self, label: &str) -> &str {
        self.responses
            .get(label)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.responses.contains_key(label)
    }

    /// 返回目录中缺失的标签
    pub fn missing<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        labels
            .into_iter()
            .filter(|label| !self.contains(label))
            .collect()
    }
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentModel;

    #[test]
    fn test_lookup_known_label() {
        let catalog = ResponseCatalog::default();
        assert_eq!(catalog.lookup("greeting"), "Hello! How can I help you?");
    }

    #[test]
    fn test_missing_label_falls_back_to_unknown() {
        let catalog = ResponseCatalog::default();
        assert_eq!(catalog.lookup("weather"), "Sorry, I didn't understand that.");
        assert_eq!(catalog.lookup(UNKNOWN_LABEL), catalog.lookup("weather"));
    }

    #[test]
    fn test_every_trained_label_has_a_response() {
        let catalog = ResponseCatalog::default();
        let model = IntentModel::train();
        assert!(catalog.missing(model.labels()).is_empty());
    }

    #[test]
    fn test_custom_catalog_without_unknown_entry() {
        let catalog = ResponseCatalog::new([("greeting", "hey")]);
        assert_eq!(catalog.lookup("greeting"), "hey");
        assert_eq!(catalog.lookup("farewell"), "Sorry, I didn't understand that.");
        assert_eq!(catalog.missing(["greeting", "farewell"]), vec!["farewell"]);
    }
}
