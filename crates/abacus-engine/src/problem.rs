//! Problem value types produced by the generators.
//!
//! A `Problem` is plain data: the web layer renders it and feeds the
//! student's reply to the answer validator. Nothing here touches storage.

use serde::{Deserialize, Serialize};

/// How a problem is presented to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Free-text answer box
    FillIn,
    /// Pick one of `options`
    MultipleChoice,
    /// True / false
    TrueFalse,
}

/// A single generated problem with its verified answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub kind: ProblemKind,

    /// Question text shown to the student
    pub question: String,

    /// Canonical answer, as a string the validator understands
    pub answer: String,

    /// Choices for multiple-choice problems
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Index into `options` for multiple-choice problems
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<usize>,

    /// Hint shown on request
    pub hint: String,

    /// Machine-readable ASCII form of the computation, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl Problem {
    /// Build a fill-in problem.
    pub fn fill_in(
        question: impl Into<String>,
        answer: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            kind: ProblemKind::FillIn,
            question: question.into(),
            answer: answer.into(),
            options: None,
            correct_index: None,
            hint: hint.into(),
            operation: None,
        }
    }

    /// Attach the machine-readable operation string.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }
}
