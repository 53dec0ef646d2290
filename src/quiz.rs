use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::countries::EmojiCountryPair;
use crate::error::{Error, Result};
use crate::pool::{self, QuestionSequence};

/// The externally visible state of a session.
/// `Revealed` is the sub-state of playing where the current question is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Playing,
    Revealed,
    GameOver,
}

/// Guarded controller operations, used to report rejected calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Tick,
    SetAnswer,
    Submit,
    Next,
}

/// How the current question was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Correct,
    Incorrect,
    TimedOut,
}

impl Resolution {
    pub fn is_correct(&self) -> bool {
        matches!(self, Resolution::Correct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Seconds left on the current question
    Counting(u32),
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Index of the question that just became current
    Question(usize),
    Finished,
}

/// Mutable part of a session. Only [`Quiz`] writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_index: usize,
    pub user_answer: String,
    pub score: usize,
    pub answer_revealed: bool,
    pub time_remaining: u32,
    pub game_over: bool,
    pub resolution: Option<Resolution>,
}

impl SessionState {
    pub fn new(timer_seconds: u32) -> Self {
        Self {
            current_index: 0,
            user_answer: String::new(),
            score: 0,
            answer_revealed: false,
            time_remaining: timer_seconds,
            game_over: false,
            resolution: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.answer_revealed {
            Phase::Revealed
        } else {
            Phase::Playing
        }
    }
}

/// Read-only view of a session handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub emoji: &'a str,
    pub country: &'a str,
    pub user_answer: &'a str,
    pub round: usize,
    pub total_rounds: usize,
    pub question_in_round: usize,
    pub questions_per_round: usize,
    pub question_number: usize,
    pub total_questions: usize,
    pub score: usize,
    pub time_remaining: u32,
    pub timer_seconds: u32,
    pub answer_revealed: bool,
    pub resolution: Option<Resolution>,
    pub game_over: bool,
    pub is_last_question: bool,
    pub phase: Phase,
}

/// Trimmed, lower-cased comparison of an answer against a country name
pub fn answers_match(answer: &str, country: &str) -> bool {
    answer.trim().to_lowercase() == country.trim().to_lowercase()
}

/// A single game session: the drawn questions plus the state that walks them.
pub struct Quiz<R: Rng = StdRng> {
    config: GameConfig,
    table: Vec<EmojiCountryPair>,
    questions: QuestionSequence,
    state: SessionState,
    rng: R,
}

impl<R: Rng> std::fmt::Debug for Quiz<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quiz")
            .field("config", &self.config)
            .field("questions", &self.questions)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<R: Rng> Quiz<R> {
    /// Draw a question sequence from `table` and begin at the first question.
    ///
    /// `config.timer_seconds` should be at least one. With zero the question
    /// opens with no time left and times out on the first tick.
    pub fn start(config: GameConfig, table: &[EmojiCountryPair], mut rng: R) -> Result<Self> {
        let questions = pool::build(table, config.rounds, config.questions_per_round, &mut rng)?;
        info!(
            questions = questions.len(),
            timer_seconds = config.timer_seconds,
            "session started"
        );

        Ok(Self {
            config,
            table: table.to_vec(),
            questions,
            state: SessionState::new(config.timer_seconds),
            rng,
        })
    }

    /// Throw the session away and start over with a fresh draw.
    /// Allowed from any phase.
    pub fn restart(&mut self) -> Result<()> {
        let questions = pool::build(
            &self.table,
            self.config.rounds,
            self.config.questions_per_round,
            &mut self.rng,
        )?;
        self.questions = questions;
        self.state = SessionState::new(self.config.timer_seconds);
        info!(questions = self.questions.len(), "session restarted");
        Ok(())
    }

    /// One second of countdown on the unresolved current question.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.require(Operation::Tick, Phase::Playing)?;

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining > 0 {
            return Ok(TickOutcome::Counting(self.state.time_remaining));
        }

        self.reveal(Resolution::TimedOut);
        debug!(index = self.state.current_index, "question timed out");
        Ok(TickOutcome::TimedOut)
    }

    /// Replace the answer text. Stored verbatim.
    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<()> {
        self.require(Operation::SetAnswer, Phase::Playing)?;
        self.state.user_answer = text.into();
        Ok(())
    }

    pub fn push_char(&mut self, c: char) -> Result<()> {
        self.require(Operation::SetAnswer, Phase::Playing)?;
        self.state.user_answer.push(c);
        Ok(())
    }

    pub fn pop_char(&mut self) -> Result<Option<char>> {
        self.require(Operation::SetAnswer, Phase::Playing)?;
        Ok(self.state.user_answer.pop())
    }

    /// Settle the current question against the typed answer.
    pub fn submit(&mut self) -> Result<Verdict> {
        self.require(Operation::Submit, Phase::Playing)?;

        let country = self.questions[self.state.current_index].country;
        let verdict = if answers_match(&self.state.user_answer, country) {
            self.state.score += 1;
            self.reveal(Resolution::Correct);
            Verdict::Correct
        } else {
            self.reveal(Resolution::Incorrect);
            Verdict::Incorrect
        };

        debug!(
            index = self.state.current_index,
            ?verdict,
            score = self.state.score,
            "answer submitted"
        );
        Ok(verdict)
    }

    /// Move past a settled question, ending the session after the last one.
    pub fn next(&mut self) -> Result<Advance> {
        self.require(Operation::Next, Phase::Revealed)?;

        if self.is_last_question() {
            self.state.game_over = true;
            info!(
                score = self.state.score,
                total = self.questions.len(),
                "session finished"
            );
            return Ok(Advance::Finished);
        }

        self.state.current_index += 1;
        self.state.user_answer.clear();
        self.state.answer_revealed = false;
        self.state.resolution = None;
        self.state.time_remaining = self.config.timer_seconds;
        Ok(Advance::Question(self.state.current_index))
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn questions(&self) -> &QuestionSequence {
        &self.questions
    }

    pub fn current_question(&self) -> &EmojiCountryPair {
        &self.questions[self.state.current_index]
    }

    pub fn round(&self) -> usize {
        self.state.current_index / self.config.questions_per_round + 1
    }

    pub fn question_in_round(&self) -> usize {
        self.state.current_index % self.config.questions_per_round + 1
    }

    pub fn is_last_question(&self) -> bool {
        self.state.current_index + 1 == self.questions.len()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let question = self.current_question();
        Snapshot {
            emoji: question.emoji,
            country: question.country,
            user_answer: &self.state.user_answer,
            round: self.round(),
            total_rounds: self.config.rounds,
            question_in_round: self.question_in_round(),
            questions_per_round: self.config.questions_per_round,
            question_number: self.state.current_index + 1,
            total_questions: self.questions.len(),
            score: self.state.score,
            time_remaining: self.state.time_remaining,
            timer_seconds: self.config.timer_seconds,
            answer_revealed: self.state.answer_revealed,
            resolution: self.state.resolution,
            game_over: self.state.game_over,
            is_last_question: self.is_last_question(),
            phase: self.phase(),
        }
    }

    fn require(&self, op: Operation, expected: Phase) -> Result<()> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            debug!(%op, %phase, "rejected operation");
            Err(Error::InvalidStateTransition { op, phase })
        }
    }

    fn reveal(&mut self, resolution: Resolution) {
        self.state.answer_revealed = true;
        self.state.resolution = Some(resolution);
    }
}
