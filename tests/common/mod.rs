#![allow(dead_code)]

use careerpath::bank::{Polarity, Question, QuestionBank};
use careerpath::error::{CareerError, CpResult};
use careerpath::narrative::NarrativeClient;
use careerpath::scorer::TraitWeights;
use careerpath::session::answer::AnswerSource;
use careerpath::session::AskContext;
use careerpath::taxonomy::{CandidateNode, Taxonomy};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Builder for Question to keep fixtures short
pub struct QuestionBuilder {
    q: Question,
}

impl QuestionBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            q: Question {
                id: id.to_string(),
                text: format!("Question {}", id),
                section: "TEST".to_string(),
                traits: TraitWeights::new(),
                options: None,
                correct: None,
                polarity: Polarity::Positive,
            },
        }
    }

    pub fn weight(mut self, code: &str, w: f64) -> Self {
        self.q.traits = self.q.traits.with(code, w);
        self
    }

    pub fn options(mut self, labels: &[&str]) -> Self {
        self.q.options = Some(labels.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn correct(mut self, key: &str) -> Self {
        self.q.correct = Some(key.to_string());
        self
    }

    pub fn negative(mut self) -> Self {
        self.q.polarity = Polarity::Negative;
        self
    }

    pub fn build(self) -> Question {
        self.q
    }
}

pub fn node(name: &str, weights: &[(&str, f64)]) -> CandidateNode {
    CandidateNode::new(name, format!("{} description", name))
        .with_weights(weights.iter().map(|(k, w)| (*k, *w)).collect())
}

pub fn node_with_children(
    name: &str,
    weights: &[(&str, f64)],
    children: Vec<CandidateNode>,
) -> CandidateNode {
    let mut n = node(name, weights);
    n.children = children;
    n
}

pub fn pool(prefix: &str, count: usize, code: &str) -> Vec<Question> {
    (0..count)
        .map(|i| {
            QuestionBuilder::new(&format!("{}-{:02}", prefix, i))
                .weight(code, 1.0)
                .build()
        })
        .collect()
}

/// Two fields; "Tech" has sub-fields, "Arts" has none. Only "Software" has
/// specializations.
pub fn small_taxonomy() -> Taxonomy {
    Taxonomy {
        fields: vec![
            node_with_children(
                "Tech",
                &[("I", 0.6), ("apt", 0.4)],
                vec![
                    node_with_children(
                        "Software",
                        &[("I", 0.5), ("C", 0.5)],
                        vec![node("Backend", &[("C", 1.0)]), node("Frontend", &[("Art", 1.0)])],
                    ),
                    node("Hardware", &[("R", 1.0)]),
                ],
            ),
            node("Arts", &[("Art", 0.7), ("O", 0.3)]),
        ],
        default_specializations: vec![node("Core Track", &[("C", 0.5), ("O", 0.5)])],
        career_clusters: vec![
            node("STEM", &[("I", 0.5), ("apt", 0.5)]),
            node("Creative", &[("Art", 1.0)]),
        ],
    }
}

pub fn small_bank() -> QuestionBank {
    let mut stage2 = BTreeMap::new();
    stage2.insert("Tech".to_string(), pool("S2-T", 6, "C"));
    stage2.insert("_default_".to_string(), pool("S2-D", 6, "O"));
    let mut stage3 = BTreeMap::new();
    stage3.insert("Software".to_string(), pool("S3-S", 5, "C"));
    stage3.insert("_default_".to_string(), pool("S3-D", 5, "Art"));
    QuestionBank {
        stage1: pool("S1", 8, "I"),
        stage2,
        stage3,
    }
}

/// Always gives the same answer and remembers what it was asked.
pub struct FixedSource {
    pub answer: String,
    pub asked: Vec<String>,
}

impl FixedSource {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            asked: Vec::new(),
        }
    }
}

impl AnswerSource for FixedSource {
    fn next_answer(&mut self, question: &Question, _ctx: &AskContext<'_>) -> CpResult<String> {
        self.asked.push(question.id.clone());
        Ok(self.answer.clone())
    }
}

/// Answers `limit` questions, then behaves like a closed input.
pub struct AbortingSource {
    pub limit: usize,
    pub seen: usize,
}

impl AnswerSource for AbortingSource {
    fn next_answer(&mut self, _question: &Question, _ctx: &AskContext<'_>) -> CpResult<String> {
        if self.seen >= self.limit {
            return Err(CareerError::Aborted);
        }
        self.seen += 1;
        Ok("A".to_string())
    }
}

/// Replays canned completions per model and records the calls it got.
pub struct MockClient {
    pub replies: BTreeMap<String, CpResult<String>>,
    pub calls: Rc<RefCell<Vec<(String, String)>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            replies: BTreeMap::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn reply(mut self, model: &str, text: &str) -> Self {
        self.replies.insert(model.to_string(), Ok(text.to_string()));
        self
    }

    /// Shared view of the call log that survives boxing the client.
    pub fn call_log(&self) -> Rc<RefCell<Vec<(String, String)>>> {
        Rc::clone(&self.calls)
    }

    pub fn fail(mut self, model: &str) -> Self {
        self.replies.insert(
            model.to_string(),
            Err(CareerError::Validation("connection refused".into())),
        );
        self
    }
}

impl NarrativeClient for MockClient {
    fn complete(&self, endpoint: &str, model: &str, _prompt: &str) -> CpResult<String> {
        self.calls
            .borrow_mut()
            .push((endpoint.to_string(), model.to_string()));
        match self.replies.get(model) {
            Some(Ok(text)) => Ok(text.clone()),
            _ => Err(CareerError::Validation(format!("{} unavailable", model))),
        }
    }
}
