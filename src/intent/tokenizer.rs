//! 分词器
//!
//! 小写化后按 `\b\w\w+\b` 抽取词元：连续两个及以上的单词字符构成一个词元，
//! 标点与单字符被丢弃。

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// 将文本切分为小写词元序列（保留重复，保持出现顺序）
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
