use crate::engine::gapper::{self, GapRecord, GeneratedTest, GenerateError, Token};
use crate::engine::grading::{self, AnswerStatus, Score};
use crate::store::schema::Preferences;

/// One gap plus everything the user has done to it. The record's
/// prefix/missing mirror the Gap token with the same id; `value` is what the
/// user has typed so far and `status` its current classification.
#[derive(Clone, Debug)]
pub struct GapSlot {
    pub record: GapRecord,
    pub value: String,
    pub status: AnswerStatus,
}

/// An owned exercise session: the token sequence and the per-gap state.
/// Created on generate, replaced wholesale on regeneration, dropped on
/// navigation. All grading and hint operations go through this object.
#[derive(Clone, Debug)]
pub struct Exercise {
    pub tokens: Vec<Token>,
    pub slots: Vec<GapSlot>,
    pub focused: usize,
}

impl Exercise {
    pub fn new(test: GeneratedTest) -> Self {
        let slots = test
            .gaps
            .into_iter()
            .map(|record| GapSlot {
                record,
                value: String::new(),
                status: AnswerStatus::Empty,
            })
            .collect();
        Self {
            tokens: test.tokens,
            slots,
            focused: 0,
        }
    }

    pub fn from_text(text: &str, prefs: &Preferences) -> Result<Self, GenerateError> {
        gapper::generate(text, prefs).map(Self::new)
    }

    pub fn gap_count(&self) -> usize {
        self.slots.len()
    }

    pub fn filled_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| !s.value.trim().is_empty())
            .count()
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn slot_by_id(&self, id: &str) -> Option<&GapSlot> {
        self.slots.iter().find(|s| s.record.id == id)
    }

    pub fn focus_next(&mut self) {
        if !self.slots.is_empty() {
            self.focused = (self.focused + 1) % self.slots.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.slots.is_empty() {
            self.focused = self
                .focused
                .checked_sub(1)
                .unwrap_or(self.slots.len() - 1);
        }
    }

    /// Reveal one more character of the focused gap's answer and write the
    /// revealed prefix into its input, re-checking as the UI would.
    pub fn hint_focused(&mut self) {
        let Some(slot) = self.slots.get_mut(self.focused) else {
            return;
        };
        slot.value = grading::hint(&mut slot.record);
        slot.status = grading::check_answer(&slot.record, &slot.value);
    }

    pub fn score(&self) -> Score {
        grading::score(self.slots.iter().map(|s| (&s.record, s.value.as_str())))
    }

    /// Fill every gap with its expected answer and mark it correct.
    pub fn reveal_all(&mut self) {
        for slot in &mut self.slots {
            slot.value = slot.record.missing.clone();
            slot.status = AnswerStatus::Correct;
        }
    }
}
