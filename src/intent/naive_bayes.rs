//! 多项式朴素贝叶斯分类器
//!
//! 拉普拉斯平滑（alpha = 1.0），类先验取训练标签频率，所有概率以对数形式累加。

use std::collections::BTreeMap;

use super::vectorizer::FeatureVector;

const ALPHA: f64 = 1.0;

#[derive(Debug, Clone)]
struct ClassParams {
    label: String,
    log_prior: f64,
    /// 每个特征的对数条件概率 log P(feature | label)
    log_likelihood: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct MultinomialNb {
    /// 按标签字典序排列
    classes: Vec<ClassParams>,
}

impl MultinomialNb {
    /// 用 (向量, 标签) 样本训练；`n_features` 为词表大小
    pub fn fit<'a>(
        samples: impl IntoIterator<Item = (&'a FeatureVector, &'a str)>,
        n_features: usize,
    ) -> Self {
        let mut per_label: BTreeMap<&str, (u64, Vec<u64>)> = BTreeMap::new();
        let mut total_samples = 0u64;

        for (vector, label) in samples {
            let (doc_count, feature_counts) = per_label
                .entry(label)
                .or_insert_with(|| (0, vec![0; n_features]));
            *doc_count += 1;
            for (feature, count) in vector.iter() {
                feature_counts[feature] += u64::from(count);
            }
            total_samples += 1;
        }

        let classes = per_label
            .into_iter()
            .map(|(label, (doc_count, feature_counts))| {
                let total: u64 = feature_counts.iter().sum();
                let denominator = total as f64 + ALPHA * n_features as f64;
                let log_likelihood = feature_counts
                    .iter()
                    .map(|&count| ((count as f64 + ALPHA) / denominator).ln())
                    .collect();

                ClassParams {
                    label: label.to_string(),
                    log_prior: (doc_count as f64 / total_samples as f64).ln(),
                    log_likelihood,
                }
            })
            .collect();

        Self { classes }
    }

    /// 返回后验概率最大的标签
    ///
    /// 空向量返回 None：此时结果只由先验决定，没有意义。
    /// 分数完全相同时取字典序靠前的标签（本语料不会出现这种情况）。
    pub fn predict(&self, vector: &FeatureVector) -> Option<&str> {
        if vector.is_empty() {
            return None;
        }

        let mut best: Option<(&ClassParams, f64)> = None;
        for class in &self.classes {
            let score = class.log_prior
                + vector
                    .iter()
                    .map(|(feature, count)| f64::from(count) * class.log_likelihood[feature])
                    .sum::<f64>();

            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((class, score)),
            }
        }

        best.map(|(class, _)| class.label.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|class| class.label.as_str())
    }
}
