//! 词袋向量化

use std::collections::{BTreeMap, BTreeSet};

use super::tokenizer::tokenize;

/// 稀疏词频向量：特征下标 -> 出现次数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureVector {
    counts: BTreeMap<usize, u32>,
}

impl FeatureVector {
    /// 非零特征个数
    pub fn nnz(&self) -> usize {
        self.counts.len()
    }

    /// 与训练词表没有任何交集
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, feature: usize) -> u32 {
        self.counts.get(&feature).copied().unwrap_or(0)
    }

    /// 按特征下标升序遍历 (feature, count)
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts.iter().map(|(&feature, &count)| (feature, count))
    }
}

/// 词袋向量化器
///
/// 词表在 `fit` 时冻结：按字典序排列的全部训练词元，之后不再变化。
#[derive(Debug, Clone)]
pub struct BagOfWords {
    vocabulary: BTreeMap<String, usize>,
}

impl BagOfWords {
    pub fn fit<'a>(corpus: impl IntoIterator<Item = &'a str>) -> Self {
        let tokens: BTreeSet<String> = corpus.into_iter().flat_map(tokenize).collect();
        let vocabulary = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| (token, index))
            .collect();

        Self { vocabulary }
    }

    /// 按冻结词表计数，词表外词元不贡献任何特征
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&feature) = self.vocabulary.get(&token) {
                *counts.entry(feature).or_insert(0) += 1;
            }
        }
        FeatureVector { counts }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn feature_index(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> BagOfWords {
        BagOfWords::fit(["how are you", "who are you", "bye"])
    }

    #[test]
    fn test_vocabulary_is_sorted_and_deduplicated() {
        let bow = fitted();
        assert_eq!(bow.vocabulary_size(), 5);
        assert_eq!(bow.feature_index("are"), Some(0));
        assert_eq!(bow.feature_index("bye"), Some(1));
        assert_eq!(bow.feature_index("you"), Some(4));
    }

    #[test]
    fn test_transform_counts_in_vocabulary_tokens() {
        let bow = fitted();
        let vector = bow.transform("You, you and WHO?");
        assert_eq!(vector.nnz(), 2);
        assert_eq!(vector.get(bow.feature_index("you").unwrap()), 2);
        assert_eq!(vector.get(bow.feature_index("who").unwrap()), 1);
    }

    #[test]
    fn test_out_of_vocabulary_input_is_empty() {
        let bow = fitted();
        assert!(bow.transform("xyzzyqux123").is_empty());
        assert!(bow.transform("").is_empty());
    }
}
