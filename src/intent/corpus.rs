//! 固定训练语料

/// 训练样本 (utterance, label)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingExample {
    pub utterance: &'static str,
    pub label: &'static str,
}

const fn example(utterance: &'static str, label: &'static str) -> TrainingExample {
    TrainingExample { utterance, label }
}

pub const TRAINING_SET: &[TrainingExample] = &[
    example("hello", "greeting"),
    example("hi", "greeting"),
    example("how are you", "greeting"),
    example("bye", "farewell"),
    example("goodbye", "farewell"),
    example("what is your name", "identity"),
    example("who are you", "identity"),
    example("what can you do", "help"),
    example("what is your purpose", "joke/help"),
    example("tell me a secret", "secret"),
];
