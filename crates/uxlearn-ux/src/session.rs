//! Per-view lesson state: which step is showing, what the learner answered,
//! and whether feedback is visible.
//!
//! A session borrows its lesson from the catalog and never mutates it. All
//! per-step state is dropped when the learner advances.

use serde::Serialize;
use thiserror::Error;
use uxlearn_kernel::{Catalog, Choice, Example, ExampleKind, Lesson, LessonError, Placement};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error("answer the current step before moving on")]
    FeedbackPending,
    #[error("{0} steps have no bad/good choice")]
    NoChoice(ExampleKind),
    #[error("{0} steps have no items to place")]
    NoPlacement(ExampleKind),
    #[error("{0} steps are answered, not acknowledged")]
    NotAcknowledgeable(ExampleKind),
    #[error("lesson has no steps")]
    EmptyLesson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advance {
    Next { index: usize },
    Completed,
}

#[derive(Debug, Clone)]
pub struct LessonSession<'a> {
    lesson: &'a Lesson,
    category_key: &'a str,
    index: usize,
    placement: Option<Placement>,
    choice: Option<Choice>,
    feedback_shown: bool,
    last_correct: Option<bool>,
    completed: bool,
}

/// Serializable picture of a session, for renderers and `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub lesson_id: String,
    pub lesson_title: String,
    pub category: String,
    pub index: usize,
    pub len: usize,
    pub kind: Option<ExampleKind>,
    pub choice: Option<Choice>,
    pub feedback_shown: bool,
    pub last_correct: Option<bool>,
    pub feedback: Option<String>,
    pub placement: Option<Placement>,
    pub completed: bool,
}

impl<'a> LessonSession<'a> {
    pub fn open(catalog: &'a Catalog, lesson_id: &str) -> Result<Self, SessionError> {
        let resolved = catalog.resolve(lesson_id)?;
        let mut session = Self {
            lesson: resolved.lesson,
            category_key: resolved.category.key.as_str(),
            index: 0,
            placement: None,
            choice: None,
            feedback_shown: false,
            last_correct: None,
            completed: false,
        };
        session.reset_step();
        tracing::debug!(lesson_id, steps = session.len(), "lesson session opened");
        Ok(session)
    }

    pub fn lesson(&self) -> &'a Lesson {
        self.lesson
    }

    pub fn current_example(&self) -> Option<&'a Example> {
        self.lesson.example(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.lesson.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lesson.examples.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn feedback_shown(&self) -> bool {
        self.feedback_shown
    }

    pub fn last_correct(&self) -> Option<bool> {
        self.last_correct
    }

    fn example(&self) -> Result<&'a Example, SessionError> {
        self.current_example().ok_or(SessionError::EmptyLesson)
    }

    fn reset_step(&mut self) {
        self.placement = self
            .current_example()
            .and_then(Example::as_interactive)
            .map(Placement::for_exercise);
        self.choice = None;
        self.feedback_shown = false;
        self.last_correct = None;
    }

    /// Pick one side of a bad-vs-good step and reveal its feedback.
    pub fn choose(&mut self, choice: Choice) -> Result<Option<&'a str>, SessionError> {
        let example = self.example()?;
        if !example.has_binary_choice() {
            return Err(SessionError::NoChoice(example.kind()));
        }
        self.choice = Some(choice);
        self.feedback_shown = true;
        self.last_correct = Some(choice == Choice::Good);
        Ok(example.choice_feedback(choice))
    }

    /// Mark an analysis or visual walkthrough step as read.
    pub fn acknowledge(&mut self) -> Result<(), SessionError> {
        let example = self.example()?;
        match example {
            Example::Analysis(_) | Example::UxVisual(_) => {
                self.feedback_shown = true;
                Ok(())
            }
            other => Err(SessionError::NotAcknowledgeable(other.kind())),
        }
    }

    fn placement_mut(&mut self) -> Result<&mut Placement, SessionError> {
        let kind = self.example()?.kind();
        self.placement
            .as_mut()
            .ok_or(SessionError::NoPlacement(kind))
    }

    /// Move an item. Any verdict from an earlier check is withdrawn.
    pub fn place(&mut self, item: &str, category: &str) -> Result<(), SessionError> {
        self.placement_mut()?.place(item, category)?;
        self.clear_verdict();
        Ok(())
    }

    /// Return an item to the pool. Any verdict from an earlier check is withdrawn.
    pub fn unplace(&mut self, item: &str) -> Result<(), SessionError> {
        self.placement_mut()?.unplace(item)?;
        self.clear_verdict();
        Ok(())
    }

    fn clear_verdict(&mut self) {
        self.feedback_shown = false;
        self.last_correct = None;
    }

    /// Validate the current placement.
    ///
    /// While items remain unplaced this returns
    /// [`LessonError::IncompleteAssignment`] and leaves the feedback flags
    /// as they were.
    pub fn check(&mut self) -> Result<bool, SessionError> {
        let example = self.example()?;
        let exercise = example
            .as_interactive()
            .ok_or(SessionError::NoPlacement(example.kind()))?;
        let placement = self
            .placement
            .as_ref()
            .ok_or(SessionError::NoPlacement(example.kind()))?;

        let correct = placement.check(&exercise.solution)?;
        self.last_correct = Some(correct);
        self.feedback_shown = true;
        tracing::debug!(
            lesson_id = %self.lesson.id,
            index = self.index,
            correct,
            "exercise checked"
        );
        Ok(correct)
    }

    /// Feedback text currently on screen, if any.
    pub fn feedback(&self) -> Option<&'a str> {
        if !self.feedback_shown {
            return None;
        }
        match self.current_example()? {
            Example::Interactive(exercise) => match self.last_correct? {
                true => Some(exercise.feedback.success.as_str()),
                false => Some(exercise.feedback.failure.as_str()),
            },
            Example::Analysis(analysis) => Some(analysis.feedback.as_str()),
            Example::UxVisual(_) => None,
            example => example.choice_feedback(self.choice?),
        }
    }

    /// Move to the next step once the current one has been answered.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if self.is_empty() {
            self.completed = true;
            return Ok(Advance::Completed);
        }
        if !self.feedback_shown {
            return Err(SessionError::FeedbackPending);
        }
        if self.is_last() {
            self.completed = true;
            tracing::info!(lesson_id = %self.lesson.id, "lesson completed");
            return Ok(Advance::Completed);
        }
        self.index += 1;
        self.reset_step();
        Ok(Advance::Next { index: self.index })
    }

    pub fn snapshot(&self) -> SessionView {
        SessionView {
            lesson_id: self.lesson.id.clone(),
            lesson_title: self.lesson.title.clone(),
            category: self.category_key.to_string(),
            index: self.index,
            len: self.len(),
            kind: self.current_example().map(Example::kind),
            choice: self.choice,
            feedback_shown: self.feedback_shown,
            last_correct: self.last_correct,
            feedback: self.feedback().map(str::to_string),
            placement: self.placement.clone(),
            completed: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static Catalog {
        Catalog::builtin()
    }

    #[test]
    fn open_unknown_lesson_is_not_found() {
        let err = LessonSession::open(catalog(), "9-9").expect_err("should not open");
        assert_eq!(err, SessionError::Lesson(LessonError::not_found("9-9")));
    }

    #[test]
    fn scenario_choice_reveals_branch_feedback() {
        let mut session = LessonSession::open(catalog(), "1-1").expect("1-1 should open");
        assert_eq!(session.advance(), Err(SessionError::FeedbackPending));

        let feedback = session
            .choose(Choice::Bad)
            .expect("scenario accepts a choice")
            .expect("bad branch has feedback");
        assert!(feedback.starts_with("Een onoverzichtelijke interface"));
        assert_eq!(session.last_correct(), Some(false));
        assert_eq!(session.feedback(), Some(feedback));

        session.choose(Choice::Good).expect("choice can be changed");
        assert_eq!(session.last_correct(), Some(true));
        assert_eq!(session.advance(), Ok(Advance::Next { index: 1 }));
        assert!(!session.feedback_shown());
        assert_eq!(session.last_correct(), None);
    }

    #[test]
    fn interactive_step_walks_through_incomplete_then_correct() {
        let mut session = LessonSession::open(catalog(), "3-1").expect("3-1 should open");
        session.choose(Choice::Good).expect("scenario accepts a choice");
        session.advance().expect("advance to the exercise");
        assert_eq!(
            session.current_example().map(Example::kind),
            Some(ExampleKind::Interactive)
        );
        assert_eq!(
            session.choose(Choice::Good),
            Err(SessionError::NoChoice(ExampleKind::Interactive))
        );

        session.place("PIN", "Betalen").expect("place PIN");
        session.place("Contant", "Betalen").expect("place Contant");
        assert_eq!(
            session.check(),
            Err(SessionError::Lesson(LessonError::IncompleteAssignment {
                remaining: 1
            }))
        );
        assert!(!session.feedback_shown());
        assert_eq!(session.last_correct(), None);

        session
            .place("Product toevoegen", "Acties")
            .expect("place Product toevoegen");
        assert_eq!(session.check(), Ok(true));
        assert!(session.feedback_shown());
        assert!(
            session
                .feedback()
                .is_some_and(|f| f.starts_with("Goed gedaan"))
        );
    }

    #[test]
    fn editing_after_check_withdraws_the_verdict() {
        let mut session = LessonSession::open(catalog(), "3-1").expect("3-1 should open");
        session.choose(Choice::Good).expect("choose");
        session.advance().expect("advance");
        session.place("PIN", "Betalen").expect("place PIN");
        session.place("Contant", "Betalen").expect("place Contant");
        session
            .place("Product toevoegen", "Acties")
            .expect("place Product toevoegen");
        assert_eq!(session.check(), Ok(true));

        session.unplace("Contant").expect("unplace Contant");
        assert!(!session.feedback_shown());
        assert_eq!(session.last_correct(), None);
        assert_eq!(session.feedback(), None);
        assert_eq!(session.advance(), Err(SessionError::FeedbackPending));

        session.place("Contant", "Acties").expect("place Contant");
        assert_eq!(session.check(), Ok(false));
        session.place("Contant", "Betalen").expect("move Contant back");
        assert_eq!(session.last_correct(), None);
        assert_eq!(session.advance(), Err(SessionError::FeedbackPending));
        assert_eq!(session.check(), Ok(true));
        assert_eq!(session.advance(), Ok(Advance::Next { index: 2 }));
    }

    #[test]
    fn rejected_edit_keeps_the_verdict() {
        let mut session = LessonSession::open(catalog(), "3-1").expect("3-1 should open");
        session.choose(Choice::Good).expect("choose");
        session.advance().expect("advance");
        for item in ["PIN", "Contant", "Product toevoegen"] {
            session.place(item, "Acties").expect("place");
        }
        assert_eq!(session.check(), Ok(false));
        assert!(session.place("Bon", "Acties").is_err());
        assert_eq!(session.last_correct(), Some(false));
        assert!(session.feedback_shown());
    }

    #[test]
    fn wrong_placement_shows_failure_feedback() {
        let mut session = LessonSession::open(catalog(), "3-1").expect("3-1 should open");
        session.choose(Choice::Good).expect("choose");
        session.advance().expect("advance");
        for item in ["PIN", "Contant", "Product toevoegen"] {
            session.place(item, "Acties").expect("place");
        }
        assert_eq!(session.check(), Ok(false));
        assert!(session.feedback().is_some_and(|f| f.starts_with("Niet helemaal")));
    }

    #[test]
    fn visual_steps_are_acknowledged_and_last_step_completes() {
        let mut session = LessonSession::open(catalog(), "4-1").expect("4-1 should open");
        assert_eq!(
            session.acknowledge(),
            Err(SessionError::NotAcknowledgeable(ExampleKind::Interactive))
        );
        for (item, category) in [
            ("Interviews", "Onderzoek"),
            ("Persona's", "Onderzoek"),
            ("Wireframes", "Ontwerp"),
            ("Prototype", "Ontwerp"),
            ("Usabilitytest", "Testen"),
            ("A/B-test", "Testen"),
        ] {
            session.place(item, category).expect("place");
        }
        assert_eq!(session.check(), Ok(true));
        assert_eq!(session.advance(), Ok(Advance::Next { index: 1 }));
        assert!(session.is_last());
        assert!(session.placement().is_none());

        session.acknowledge().expect("ux-visual step can be acknowledged");
        assert_eq!(session.advance(), Ok(Advance::Completed));
        assert!(session.snapshot().completed);
    }

    #[test]
    fn snapshot_serializes_current_step() {
        let session = LessonSession::open(catalog(), "3-1").expect("3-1 should open");
        let view = serde_json::to_value(session.snapshot()).expect("snapshot serializes");
        assert_eq!(view["lessonId"], "3-1");
        assert_eq!(view["category"], "ux-psychology");
        assert_eq!(view["kind"], "scenario");
        assert_eq!(view["feedbackShown"], false);
        assert!(view["placement"].is_null());
    }
}
