// Integration tests for message routing
//
// Tests cover:
// - Rule precedence (link > question > intent)
// - Corpus self-consistency and unknown-vocabulary handling
// - End-to-end examples with a recording search oracle
// - History ids under concurrent requests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use parlance::catalog::ResponseCatalog;
use parlance::error::Result;
use parlance::intent::{IntentModel, TRAINING_SET};
use parlance::models::HistoryQuery;
use parlance::oracle::{SearchLink, SearchOracle};
use parlance::router::{ChatRouter, NO_ANSWER_MESSAGE, NO_LINK_MESSAGE, RoutingDecision};
use parlance::storage::{ChatHistoryRepository, MemoryHistoryRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Answer(String),
    Link(String),
}

/// 记录每次调用的搜索桩
#[derive(Default)]
struct RecordingOracle {
    calls: Mutex<Vec<Call>>,
    answer: Option<String>,
    link: Option<SearchLink>,
}

impl RecordingOracle {
    fn empty() -> Self {
        Self::default()
    }

    fn answering(answer: &str, link: SearchLink) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            answer: Some(answer.to_string()),
            link: Some(link),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchOracle for RecordingOracle {
    async fn answer(&self, query: &str) -> Result<Option<String>> {
        self.calls.lock().unwrap().push(Call::Answer(query.to_string()));
        Ok(self.answer.clone())
    }

    async fn link(&self, query: &str) -> Result<Option<SearchLink>> {
        self.calls.lock().unwrap().push(Call::Link(query.to_string()));
        Ok(self.link.clone())
    }
}

fn build(oracle: Arc<RecordingOracle>) -> (ChatRouter, Arc<MemoryHistoryRepository>) {
    let history = Arc::new(MemoryHistoryRepository::new());
    let router = ChatRouter::new(
        Arc::new(IntentModel::train()),
        ResponseCatalog::default(),
        oracle,
        history.clone(),
    )
    .unwrap();
    (router, history)
}

#[tokio::test]
async fn link_rule_beats_question_rule() {
    let oracle = Arc::new(RecordingOracle::empty());
    let (router, _) = build(oracle.clone());

    for input in [
        "LINK?",
        "Which Website is best?",
        "send me a link to python docs",
        "   the WEBSITE   ",
    ] {
        let resolution = router.respond(input).await.unwrap();
        assert_eq!(resolution.decision, RoutingDecision::LinkLookup, "{:?}", input);
        assert_eq!(resolution.response, NO_LINK_MESSAGE);
    }

    assert!(oracle.calls().iter().all(|call| matches!(call, Call::Link(_))));
    assert_eq!(oracle.calls().len(), 4);
}

#[tokio::test]
async fn question_rule_passes_normalized_text() {
    let oracle = Arc::new(RecordingOracle::answering(
        "A region of spacetime where gravity is so strong nothing escapes.",
        SearchLink::new("unused", "#"),
    ));
    let (router, history) = build(oracle.clone());

    let response = router.resolve("what is a black hole?").await.unwrap();
    assert_eq!(
        response,
        "A region of spacetime where gravity is so strong nothing escapes."
    );
    assert_eq!(
        oracle.calls(),
        vec![Call::Answer("what is a black hole?".to_string())]
    );

    let records = history.query(&HistoryQuery::all()).await.unwrap();
    assert_eq!(records[0].user_message, "what is a black hole?");
    assert_eq!(records[0].bot_response, response);
}

#[tokio::test]
async fn question_without_answer_gets_sentinel() {
    let (router, _) = build(Arc::new(RecordingOracle::empty()));
    assert_eq!(router.resolve("why is the sky blue?").await.unwrap(), NO_ANSWER_MESSAGE);
}

#[tokio::test]
async fn link_results_are_rendered_as_anchor() {
    let oracle = Arc::new(RecordingOracle::answering(
        "unused",
        SearchLink::new("Python Documentation", "https://docs.python.org/3/"),
    ));
    let (router, _) = build(oracle.clone());

    let response = router.resolve("send me a link to python docs").await.unwrap();
    assert_eq!(
        response,
        r#"<a href="https://docs.python.org/3/" target="_blank" style="color:blue;">🔗 Python Documentation</a>"#
    );
    assert_eq!(
        oracle.calls(),
        vec![Call::Link("send me a link to python docs".to_string())]
    );
}

#[tokio::test]
async fn plain_messages_never_touch_the_oracle() {
    let oracle = Arc::new(RecordingOracle::empty());
    let (router, _) = build(oracle.clone());

    for example in TRAINING_SET {
        let resolution = router.respond(example.utterance).await.unwrap();
        assert_eq!(resolution.decision, RoutingDecision::IntentReply);
    }
    router.resolve("xyzzyqux123").await.unwrap();

    assert!(oracle.calls().is_empty());
}

#[tokio::test]
async fn training_utterances_get_their_catalog_reply() {
    let (router, _) = build(Arc::new(RecordingOracle::empty()));
    let catalog = ResponseCatalog::default();

    for example in TRAINING_SET {
        let response = router.resolve(example.utterance).await.unwrap();
        assert_eq!(response, catalog.lookup(example.label), "{:?}", example.utterance);
    }
}

#[tokio::test]
async fn greeting_example_end_to_end() {
    let (router, history) = build(Arc::new(RecordingOracle::empty()));

    let response = router.resolve("Hi").await.unwrap();
    assert_eq!(response, "Hello! How can I help you?");

    let records = history.query(&HistoryQuery::all()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_message, "hi");
    assert_eq!(records[0].bot_response, "Hello! How can I help you?");
}

#[tokio::test]
async fn unknown_vocabulary_routes_to_unknown_reply() {
    let model = IntentModel::train();
    assert!(model.vectorize("xyzzyqux123").is_empty());

    let (router, _) = build(Arc::new(RecordingOracle::empty()));
    assert_eq!(
        router.resolve("xyzzyqux123").await.unwrap(),
        "Sorry, I didn't understand that."
    );
}

#[tokio::test]
async fn filtered_history_returns_matching_newest_first() {
    let (router, history) = build(Arc::new(RecordingOracle::empty()));
    for input in ["hello", "bye", "tell me a secret", "HELLO again", "who are you"] {
        router.resolve(input).await.unwrap();
    }

    let records = history
        .query(&HistoryQuery::filtered("hello", 100))
        .await
        .unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.matches("hello")));
    assert!(records.windows(2).all(|pair| pair[0].id > pair[1].id));

    let messages: Vec<&str> = records.iter().map(|r| r.user_message.as_str()).collect();
    assert_eq!(messages, vec!["hello again", "hello"]);
}

#[tokio::test]
async fn concurrent_requests_get_distinct_increasing_ids() {
    let (router, history) = build(Arc::new(RecordingOracle::empty()));
    let router = Arc::new(router);

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let router = router.clone();
            tokio::spawn(async move {
                let input = if i % 2 == 0 { "hello" } else { "goodbye" };
                router.respond(input).await.unwrap().record_id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
    assert_eq!(history.count().await.unwrap(), 50);

    let records = history.query(&HistoryQuery::all()).await.unwrap();
    assert!(records.windows(2).all(|pair| pair[0].id > pair[1].id));
    assert!(records.windows(2).all(|pair| pair[0].timestamp >= pair[1].timestamp));
}
