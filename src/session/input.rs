use crate::engine::grading;
use crate::session::exercise::Exercise;

/// Append a typed character to the focused gap, bounded by the answer
/// length, and re-check. Mirrors a text input with `maxlength` that grades
/// on every change.
pub fn process_char(exercise: &mut Exercise, ch: char) {
    if ch.is_control() {
        return;
    }
    let focused = exercise.focused;
    let Some(slot) = exercise.slots.get_mut(focused) else {
        return;
    };
    if slot.value.chars().count() >= slot.record.missing_len() {
        return;
    }
    slot.value.push(ch);
    slot.status = grading::check_answer(&slot.record, &slot.value);
}

/// Delete the last typed character of the focused gap and re-check.
pub fn process_backspace(exercise: &mut Exercise) {
    let focused = exercise.focused;
    let Some(slot) = exercise.slots.get_mut(focused) else {
        return;
    };
    slot.value.pop();
    slot.status = grading::check_answer(&slot.record, &slot.value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grading::AnswerStatus;
    use crate::store::schema::Preferences;

    fn exercise() -> Exercise {
        Exercise::from_text(
            "Learning a new language requires exposure.",
            &Preferences::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_typing_rechecks_every_change() {
        let mut ex = exercise();
        process_char(&mut ex, 'n');
        assert_eq!(ex.slots[0].status, AnswerStatus::Incorrect);
        for ch in "ing".chars() {
            process_char(&mut ex, ch);
        }
        assert_eq!(ex.slots[0].value, "ning");
        assert_eq!(ex.slots[0].status, AnswerStatus::Correct);
    }

    #[test]
    fn test_input_bounded_by_answer_length() {
        let mut ex = exercise();
        for ch in "ningX".chars() {
            process_char(&mut ex, ch);
        }
        assert_eq!(ex.slots[0].value, "ning");
    }

    #[test]
    fn test_backspace_clears_status() {
        let mut ex = exercise();
        process_char(&mut ex, 'z');
        assert_eq!(ex.slots[0].status, AnswerStatus::Incorrect);
        process_backspace(&mut ex);
        assert_eq!(ex.slots[0].status, AnswerStatus::Empty);
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut ex = exercise();
        process_char(&mut ex, '\n');
        process_char(&mut ex, '\t');
        assert!(ex.slots[0].value.is_empty());
    }
}
