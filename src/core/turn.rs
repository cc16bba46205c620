//! # Turns and the Transcript
//!
//! A `Turn` is one message in the conversation. Turns are never edited once
//! pushed: `Transcript` only hands out shared references and has no removal
//! API. Starting a new conversation replaces the whole `Transcript`.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Severity of an annotation chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Ok,
    Warn,
    Bad,
}

/// A small badge summarizing guard or refusal status on a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub label: String,
    pub kind: AnnotationKind,
    /// Guard confidence in `[0, 1]`, only set on the guard summary chip.
    pub confidence: Option<f64>,
}

impl Annotation {
    pub fn new(label: impl Into<String>, kind: AnnotationKind) -> Self {
        Self {
            label: label.into(),
            kind,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Local>,
    pub annotations: Vec<Annotation>,
    pub refused: bool,
}

impl Turn {
    pub fn user(text: String) -> Self {
        Self {
            role: Role::User,
            text,
            created_at: Local::now(),
            annotations: Vec::new(),
            refused: false,
        }
    }

    pub fn assistant(text: String, annotations: Vec<Annotation>, refused: bool) -> Self {
        Self {
            role: Role::Assistant,
            text,
            created_at: Local::now(),
            annotations,
            refused,
        }
    }

    /// Local wall-clock time of creation, `HH:MM`.
    pub fn clock(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}

/// Append-only, insertion-ordered history of the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn get(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}
