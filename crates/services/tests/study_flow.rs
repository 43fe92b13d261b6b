use chrono::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;

use study_core::model::{FeedbackTier, MasteryLevel, OptionLabel};
use study_core::time::fixed_clock;
use study_services::{
    Clock, Difficulty, QuestionBank, QuizState, StudyConfig, StudyService, export_flashcards,
    import_flashcards,
};

const TWO_PAIR_BANK: &str = r#"[
  {
    "lesson_name": "Chola Dynasty",
    "unit": "Unit I: History",
    "pairs": [
      {
        "question": "Who built the Brihadeeswarar temple?",
        "answer": "Rajaraja Chola",
        "options": [{"A": "Rajendra Chola"}, {"B": "Rajaraja Chola"}, {"C": "Karikala"}, {"D": "Vijayalaya"}],
        "correct_option": "B",
        "explanation": "Completed in 1010 CE.",
        "syllabus_area": "History"
      },
      {
        "question": "Capital of the later Cholas?",
        "answer": "Gangaikonda Cholapuram",
        "options": [{"A": "Madurai"}, {"B": "Kanchi"}, {"C": "Gangaikonda Cholapuram"}, {"D": "Uraiyur"}],
        "correct_option": "C"
      }
    ]
  }
]"#;

fn load(input: &str) -> QuestionBank {
    QuestionBank::load(input, &mut StdRng::seed_from_u64(1))
        .expect("bank loads")
        .bank
}

#[test]
fn perfect_two_question_quiz_is_outstanding() {
    let bank = load(TWO_PAIR_BANK);
    let mut service = StudyService::new(
        fixed_clock(),
        StudyConfig::new().with_question_count(Some(2)),
    );

    let mut quiz = service.start_quiz(&bank);
    assert_eq!(quiz.total_questions(), 2);

    let first = quiz.submit_answer(OptionLabel::B).expect("first answer");
    assert!(first.is_correct);
    assert_eq!(first.explanation.as_deref(), Some("Completed in 1010 CE."));
    assert_eq!(first.memory_aid, "Remember these key terms: Rajaraja, Chola");
    service.clock_mut().advance(Duration::seconds(8));
    assert_eq!(service.advance(&mut quiz).unwrap(), QuizState::AwaitingAnswer);

    quiz.submit_answer(OptionLabel::C).expect("second answer");
    service.clock_mut().advance(Duration::seconds(4));
    assert_eq!(service.advance(&mut quiz).unwrap(), QuizState::Completed);

    let summary = service.summarize(&quiz).expect("summary");
    assert_eq!(summary.correct_count(), 2);
    assert_eq!(summary.score_percentage(), 100.0);
    assert_eq!(summary.feedback(), FeedbackTier::Outstanding);
    assert_eq!(summary.feedback().key(), "outstanding");
    assert_eq!(summary.average_time_secs(), 6.0);
}

#[test]
fn oversized_request_clamps_without_duplicates() {
    let bank = load(TWO_PAIR_BANK);
    let service = StudyService::new(
        fixed_clock(),
        StudyConfig::new().with_question_count(Some(25)),
    );
    let quiz = service.start_quiz(&bank);

    assert_eq!(quiz.total_questions(), 2);
    let questions: Vec<_> = quiz.items().iter().map(|p| p.question()).collect();
    assert_ne!(questions[0], questions[1]);
}

#[test]
fn empty_bank_gives_completed_quiz_and_empty_deck() {
    let loaded = QuestionBank::load("[]", &mut StdRng::seed_from_u64(1)).unwrap();
    let service = StudyService::new(Clock::system(), StudyConfig::default());

    let quiz = service.start_quiz(&loaded.bank);
    assert!(quiz.is_complete());
    let summary = service.summarize(&quiz).unwrap();
    assert_eq!(summary.score_percentage(), 0.0);

    let deck = service.start_flashcards(&loaded.bank);
    assert!(deck.is_empty());
}

#[test]
fn quiz_skips_optionless_pairs_but_deck_keeps_them() {
    let input = r#"[{"lesson_name": "L", "unit": "U", "pairs": [
        {"question": "open ended", "answer": "anything"},
        {"question": "choice", "answer": "yes", "options": [{"A": "yes"}, {"B": "no"}], "correct_option": "A"}
    ]}]"#;
    let bank = load(input);
    let service = StudyService::new(fixed_clock(), StudyConfig::new().with_question_count(None));

    let quiz = service.start_quiz(&bank);
    assert_eq!(quiz.total_questions(), 1);
    assert_eq!(quiz.current_question().unwrap().question(), "choice");

    let deck = service.start_flashcards(&bank);
    assert_eq!(deck.len(), 2);
}

#[test]
fn pairs_with_broken_options_still_become_flashcards() {
    let input = r#"[{"lesson_name": "L", "unit": "U", "pairs": [
        {"question": "ok", "answer": "a", "options": [{"A": "a"}, {"B": "b"}], "correct_option": "A"},
        {"question": "bad label", "answer": "a", "options": [{"A": "a"}, {"B": "b"}], "correct_option": "C"},
        {"question": "lowercase label", "answer": "a", "options": [{"A": "a"}], "correct_option": "a"},
        {"question": "numeric option", "answer": "a", "options": [{"A": 1}]}
    ]}]"#;
    let bank = load(input);
    let service = StudyService::new(fixed_clock(), StudyConfig::new().with_question_count(None));

    let deck = service.start_flashcards(&bank);
    assert_eq!(deck.len(), 4);
    assert_eq!(deck.cards()[3].back(), "a");

    let plan = service.plan_quiz(&bank);
    assert_eq!(plan.unanswerable, 3);
    let quiz = service.start_quiz(&bank);
    assert_eq!(quiz.total_questions(), 1);
    assert_eq!(quiz.items()[0].question(), "ok");
}

#[test]
fn difficulty_filter_is_a_view() {
    let input = r#"[{"lesson_name": "L", "unit": "U", "pairs": [
        {"question": "q1", "answer": "a", "options": [{"A": "a"}], "difficulty": "easy"},
        {"question": "q2", "answer": "a", "options": [{"A": "a"}], "difficulty": "hard"},
        {"question": "q3", "answer": "a", "options": [{"A": "a"}]}
    ]}]"#;
    let bank = load(input);
    let service = StudyService::new(
        fixed_clock(),
        StudyConfig::new().with_difficulty(Difficulty::Hard),
    );

    let quiz = service.start_quiz(&bank);
    assert_eq!(quiz.total_questions(), 1);
    assert_eq!(quiz.items()[0].question(), "q2");
    assert_eq!(bank.item_count(), 3);
}

#[test]
fn flashcard_rating_round_trips_through_export() {
    let input = r#"[{"lesson_name": "L", "unit": "U", "pairs": [
        {"question": "one", "answer": "first"},
        {"question": "two", "answer": "second"},
        {"question": "three", "answer": "third"}
    ]}]"#;
    let bank = load(input);
    let service = StudyService::new(fixed_clock(), StudyConfig::default());
    let mut deck = service.start_flashcards(&bank);

    deck.flip();
    service.rate(&mut deck, 4).unwrap();

    let four = MasteryLevel::new(4).unwrap();
    assert_eq!(deck.histogram().count(MasteryLevel::UNKNOWN), 2);
    assert_eq!(deck.histogram().count(four), 1);
    assert_eq!(deck.current_index(), 1);
    assert!(!deck.is_flipped());

    let restored = import_flashcards(&export_flashcards(&deck).unwrap()).unwrap();
    assert_eq!(restored.cards(), deck.cards());
    assert_eq!(restored.histogram(), deck.histogram());
}

#[test]
fn timed_config_reaches_the_session() {
    let bank = load(TWO_PAIR_BANK);
    let config = StudyConfig::new().with_timer(Some(30)).unwrap();
    let mut service = StudyService::new(fixed_clock(), config);
    let quiz = service.start_quiz(&bank);

    service.clock_mut().advance(Duration::seconds(31));
    assert!(quiz.is_over_time(service.clock().now()));
    assert_eq!(quiz.state(), QuizState::AwaitingAnswer);
}
