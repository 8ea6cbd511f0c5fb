//! Green-knowledge quiz: an intro card, ten multiple-choice questions, a
//! score.
//!
//! Question text lives in the locale tables under `quiz.questions.<id>`; this
//! module only knows ids, choice counts and the right answers.

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub choices: usize,
    pub answer: usize,
}

impl Question {
    pub fn prompt_key(&self) -> String {
        format!("quiz.questions.{}.prompt", self.id)
    }

    pub fn choice_key(
        &self,
        choice: usize,
    ) -> String {
        format!("quiz.questions.{}.choices.{choice}", self.id)
    }

    pub fn explanation_key(&self) -> String {
        format!("quiz.questions.{}.explain", self.id)
    }
}

pub const QUESTIONS: [Question; 10] = [
    Question { id: "q1", choices: 4, answer: 1 },
    Question { id: "q2", choices: 4, answer: 1 },
    Question { id: "q3", choices: 4, answer: 0 },
    Question { id: "q4", choices: 4, answer: 0 },
    Question { id: "q5", choices: 4, answer: 2 },
    Question { id: "q6", choices: 4, answer: 1 },
    Question { id: "q7", choices: 4, answer: 2 },
    Question { id: "q8", choices: 4, answer: 0 },
    Question { id: "q9", choices: 4, answer: 2 },
    Question { id: "q10", choices: 4, answer: 0 },
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("the quiz has not started")]
    NotStarted,

    #[error("the quiz is already under way")]
    AlreadyStarted,

    #[error("the quiz is over; restart to play again")]
    Finished,

    #[error("this question was already answered")]
    AlreadyAnswered,

    #[error("answer the current question first")]
    NotAnswered,

    #[error("choice {choice} is out of range (0..{choices})")]
    InvalidChoice { choice: usize, choices: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizPhase {
    #[default]
    Intro,
    /// Showing question `i` (0-based).
    Question(usize),
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct Quiz {
    phase: QuizPhase,
    score: usize,
    picked: Option<usize>,
}

impl Quiz {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        QUESTIONS.len()
    }

    pub fn current(&self) -> Option<&'static Question> {
        match self.phase {
            QuizPhase::Question(i) => QUESTIONS.get(i),
            _ => None,
        }
    }

    /// The choice made on the current question, if any.
    pub fn picked(&self) -> Option<usize> {
        self.picked
    }

    pub fn start(&mut self) -> Result<&'static Question, QuizError> {
        match self.phase {
            QuizPhase::Intro => {
                self.phase = QuizPhase::Question(0);
                debug!("quiz started");
                Ok(&QUESTIONS[0])
            }
            QuizPhase::Question(_) => Err(QuizError::AlreadyStarted),
            QuizPhase::Finished => Err(QuizError::Finished),
        }
    }

    /// Records `choice` for the current question and returns whether it was
    /// right. Each question takes exactly one answer.
    pub fn answer(
        &mut self,
        choice: usize,
    ) -> Result<bool, QuizError> {
        let question = match self.phase {
            QuizPhase::Intro => return Err(QuizError::NotStarted),
            QuizPhase::Finished => return Err(QuizError::Finished),
            QuizPhase::Question(i) => &QUESTIONS[i],
        };
        if self.picked.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        if choice >= question.choices {
            return Err(QuizError::InvalidChoice {
                choice,
                choices: question.choices,
            });
        }

        self.picked = Some(choice);
        let correct = choice == question.answer;
        if correct {
            self.score += 1;
        }
        debug!(question = question.id, choice, correct, "answered");
        Ok(correct)
    }

    /// Moves past an answered question. Returns the next question, or `None`
    /// once the quiz is finished.
    pub fn next(&mut self) -> Result<Option<&'static Question>, QuizError> {
        let i = match self.phase {
            QuizPhase::Intro => return Err(QuizError::NotStarted),
            QuizPhase::Finished => return Err(QuizError::Finished),
            QuizPhase::Question(i) => i,
        };
        if self.picked.is_none() {
            return Err(QuizError::NotAnswered);
        }

        self.picked = None;
        match QUESTIONS.get(i + 1) {
            Some(question) => {
                self.phase = QuizPhase::Question(i + 1);
                Ok(Some(question))
            }
            None => {
                self.phase = QuizPhase::Finished;
                info!(score = self.score, total = QUESTIONS.len(), "quiz finished");
                Ok(None)
            }
        }
    }

    /// Back to the first question with a clean score.
    pub fn restart(&mut self) -> &'static Question {
        *self = Self {
            phase: QuizPhase::Question(0),
            ..Self::default()
        };
        &QUESTIONS[0]
    }
}
