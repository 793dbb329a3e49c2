//! 意图识别模块
//!
//! 启动时用固定语料训练一次词袋向量化器和多项式朴素贝叶斯分类器，
//! 之后只读，可通过 `Arc` 在任意数量的并发请求间共享。

pub mod corpus;
pub mod naive_bayes;
pub mod tokenizer;
pub mod vectorizer;

use std::fmt;

pub use corpus::{TRAINING_SET, TrainingExample};
pub use naive_bayes::MultinomialNb;
pub use vectorizer::{BagOfWords, FeatureVector};

/// `Unknown` 对应的标签名
pub const UNKNOWN_LABEL: &str = "unknown";

/// 分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// 分类器预测出的训练标签
    Label(String),
    /// 输入与训练词表没有交集
    Unknown,
}

impl Intent {
    pub fn label_str(&self) -> &str {
        match self {
            Intent::Label(label) => label,
            Intent::Unknown => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_str())
    }
}

/// 已训练的意图模型
#[derive(Debug, Clone)]
pub struct IntentModel {
    vectorizer: BagOfWords,
    classifier: MultinomialNb,
}

impl IntentModel {
    /// 用内置语料训练
    pub fn train() -> Self {
        Self::from_examples(TRAINING_SET)
    }

    pub fn from_examples(examples: &[TrainingExample]) -> Self {
        let vectorizer = BagOfWords::fit(examples.iter().map(|e| e.utterance));
        let vectors: Vec<FeatureVector> = examples
            .iter()
            .map(|e| vectorizer.transform(e.utterance))
            .collect();
        let classifier = MultinomialNb::fit(
            vectors.iter().zip(examples.iter().map(|e| e.label)),
            vectorizer.vocabulary_size(),
        );

        Self {
            vectorizer,
            classifier,
        }
    }

    /// 按冻结词表向量化
    pub fn vectorize(&self, text: &str) -> FeatureVector {
        self.vectorizer.transform(text)
    }

    /// 识别意图；零特征向量直接返回 `Unknown`，不会进入分类器
    pub fn classify(&self, text: &str) -> Intent {
        let features = self.vectorize(text);
        if features.is_empty() {
            return Intent::Unknown;
        }

        match self.classifier.predict(&features) {
            Some(label) => Intent::Label(label.to_string()),
            None => Intent::Unknown,
        }
    }

    /// 模型认识的全部标签
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classifier.labels()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}
