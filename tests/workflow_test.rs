// tests/workflow_test.rs — Integration test: interview workflow with mock provider

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use interview_coach::infra::config::InterviewConfig;
use interview_coach::infra::errors::CoachError;
use interview_coach::interview::{
    InterviewClient, InterviewQuestion, InterviewWorkflow, ScoreLabel, WorkflowSettings,
};
use interview_coach::memory::in_memory_store;
use interview_coach::memory::store_server::spawn_store_server;
use interview_coach::provider::*;

/// Replays canned replies in order and records every request it sees.
struct MockProvider {
    replies: Mutex<Vec<Result<String, CoachError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    fn new(replies: Vec<Result<String, CoachError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Provider"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, CoachError> {
        self.requests.lock().unwrap().push(request);
        let next = {
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Err(CoachError::EmptyResponse {
                    provider: "mock".into(),
                })
            } else {
                replies.remove(0)
            }
        };
        next.map(|content| ChatResponse {
            content,
            usage: TokenUsage::default(),
            stop_reason: StopReason::EndTurn,
        })
    }
}

const SCORE_REPLY: &str = "SCORE: 8\n\
LABEL: Strong\n\
STRENGTHS:\n\
- Correct use of remember\n\
- Clear structure\n\
IMPROVEMENTS:\n\
- Mention rememberSaveable\n\
SUMMARY: Solid grasp of state in Compose.";

fn workflow_with(provider: Arc<MockProvider>) -> InterviewWorkflow {
    let (store, _task) = spawn_store_server(in_memory_store().unwrap());
    let client = InterviewClient::new(provider).with_temperature(0.7);
    let settings = WorkflowSettings::new("mock-model", &InterviewConfig::default());
    InterviewWorkflow::new(client, store, settings)
}

fn question() -> InterviewQuestion {
    InterviewQuestion {
        text: "What does remember do?".into(),
        topic: "Jetpack Compose".into(),
    }
}

#[tokio::test]
async fn test_get_question_parses_prefix() {
    let provider = MockProvider::new(vec![Ok(
        "QUESTION: What is a sealed interface?\nExtra line".into()
    )]);
    let workflow = workflow_with(provider.clone());

    let q = workflow.get_question("Kotlin").await.unwrap();
    assert_eq!(q.text, "What is a sealed interface?");
    assert_eq!(q.topic, "Kotlin");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "mock-model");
    assert_eq!(requests[0].max_tokens, Some(300));
    assert_eq!(requests[0].temperature, Some(0.7));
    assert_eq!(requests[0].messages[0].role, Role::System);
    assert_eq!(requests[0].messages[1].role, Role::User);
    assert!(requests[0].messages[1].content.contains("Kotlin"));
}

#[tokio::test]
async fn test_blank_topic_uses_default() {
    let provider = MockProvider::new(vec![Ok("QUESTION: Why recompose?".into())]);
    let workflow = workflow_with(provider.clone());

    let q = workflow.get_question("   ").await.unwrap();
    assert_eq!(q.topic, "Kotlin & Jetpack Compose");
    assert!(provider.requests()[0].messages[1]
        .content
        .contains("Kotlin & Jetpack Compose"));
}

#[tokio::test]
async fn test_question_without_prefix_is_whole_reply() {
    let provider = MockProvider::new(vec![Ok("  Explain coroutines scopes.  ".into())]);
    let workflow = workflow_with(provider);
    let q = workflow.get_question("Kotlin").await.unwrap();
    assert_eq!(q.text, "Explain coroutines scopes.");
}

#[tokio::test]
async fn test_score_answer_parses_reply() {
    let provider = MockProvider::new(vec![Ok(SCORE_REPLY.into())]);
    let workflow = workflow_with(provider.clone());

    let score = workflow
        .score_answer(&question(), "It keeps state across recompositions.")
        .await
        .unwrap();
    assert_eq!(score.score, 8);
    assert_eq!(score.tier(), Some(ScoreLabel::Strong));
    assert_eq!(
        score.strengths,
        vec!["Correct use of remember", "Clear structure"]
    );
    assert_eq!(score.improvements, vec!["Mention rememberSaveable"]);
    assert_eq!(score.summary, "Solid grasp of state in Compose.");

    let request = &provider.requests()[0];
    assert_eq!(request.max_tokens, Some(600));
    assert!(request.messages[1].content.contains("What does remember do?"));
    assert!(request.messages[1]
        .content
        .contains("It keeps state across recompositions."));
}

#[tokio::test]
async fn test_blank_answer_never_reaches_provider() {
    let provider = MockProvider::new(vec![Ok(SCORE_REPLY.into())]);
    let workflow = workflow_with(provider.clone());

    let err = workflow.score_answer(&question(), "  \n\t ").await.unwrap_err();
    assert!(matches!(err, CoachError::EmptyAnswer));
    assert_eq!(err.to_string(), "Answer must not be empty");
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_malformed_score_reply_uses_defaults() {
    let provider = MockProvider::new(vec![Ok("I think this was fine.".into())]);
    let workflow = workflow_with(provider);

    let score = workflow.score_answer(&question(), "answer").await.unwrap();
    assert_eq!(score.score, 5);
    assert_eq!(score.label, "Developing");
    assert_eq!(score.strengths, vec!["Answered the question"]);
    assert_eq!(score.improvements, vec!["Provide more technical depth"]);
    assert_eq!(score.summary, "I think this was fine.");
}

#[tokio::test]
async fn test_provider_error_propagates() {
    let provider = MockProvider::new(vec![Err(CoachError::Http {
        provider: "mock".into(),
        status: 429,
        body: "slow down".into(),
    })]);
    let workflow = workflow_with(provider);

    let err = workflow.get_question("Kotlin").await.unwrap_err();
    assert!(matches!(err, CoachError::Http { status: 429, .. }));
}

#[tokio::test]
async fn test_save_and_list_round_trip() {
    let provider = MockProvider::new(vec![Ok(SCORE_REPLY.into())]);
    let workflow = workflow_with(provider);
    let q = question();

    let score = workflow.score_answer(&q, "answer").await.unwrap();
    let id = workflow
        .save_session(&q.topic, &q.text, "answer", &score)
        .await
        .unwrap();

    let sessions = workflow.list_sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);
    let saved = &sessions[0];
    assert_eq!(saved.id, id);
    assert_eq!(saved.score, score.score);
    assert_eq!(saved.label, score.label);
    assert_eq!(saved.summary, score.summary);
    assert_eq!(saved.question, "What does remember do?");
    assert_eq!(saved.topic, "Jetpack Compose");
}

#[tokio::test]
async fn test_watch_sessions_sees_writes() {
    let workflow = workflow_with(MockProvider::new(vec![]));
    let mut feed = workflow.watch_sessions();
    assert!(feed.latest().is_empty());

    let score = interview_coach::interview::parser::parse_score(SCORE_REPLY);
    let id = workflow
        .save_session("Kotlin", "q1", "a1", &score)
        .await
        .unwrap();
    assert!(feed.changed().await);
    let list = feed.latest();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, id);

    assert!(workflow.delete_session(id).await.unwrap());
    assert!(feed.changed().await);
    assert!(feed.latest().is_empty());
    assert!(!workflow.delete_session(id).await.unwrap());
}

#[tokio::test]
async fn test_counts_and_average() {
    let workflow = workflow_with(MockProvider::new(vec![]));
    assert_eq!(workflow.session_count().await.unwrap(), 0);
    assert_eq!(workflow.average_score().await.unwrap(), 0.0);

    let mut score = interview_coach::interview::parser::parse_score(SCORE_REPLY);
    for s in [6, 8, 10] {
        score.score = s;
        workflow.save_session("t", "q", "a", &score).await.unwrap();
    }

    assert_eq!(workflow.session_count().await.unwrap(), 3);
    assert!((workflow.average_score().await.unwrap() - 8.0).abs() < f64::EPSILON);
    assert_eq!(workflow.recent_sessions(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_client_send_is_single_attempt() {
    let provider = MockProvider::new(vec![
        Err(CoachError::Http {
            provider: "mock".into(),
            status: 503,
            body: String::new(),
        }),
        Ok("unused".into()),
    ]);
    let client = InterviewClient::new(provider.clone());

    let err = client
        .send("system text", "user text", "mock-model", 42)
        .await
        .unwrap_err();
    assert!(err.is_retriable());

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].messages,
        vec![Message::system("system text"), Message::user("user text")]
    );
    assert_eq!(requests[0].max_tokens, Some(42));
    assert_eq!(requests[0].temperature, None);
}
