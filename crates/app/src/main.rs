use std::fmt;
use std::io::{self, BufRead, Write};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use study_core::model::{MasteryLevel, OptionLabel};
use study_services::{
    Clock, Difficulty, FlashcardSession, LoadWarning, QuestionBank, QuizState, StudyConfig,
    StudyService, export_flashcards, import_flashcards,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingBank,
    InvalidCount { raw: String },
    InvalidSeconds { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingBank => write!(f, "a question bank is required (--bank or STUDY_BANK)"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --questions/STUDY_QUESTIONS value: {raw}"),
            ArgsError::InvalidSeconds { raw } => write!(f, "invalid --timed/STUDY_SECONDS value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed/STUDY_SEED value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  study-cli quiz       --bank <file.json> [--questions <n>] [--timed <secs>]");
    eprintln!("                       [--difficulty all|easy|medium|hard] [--area <name>] [--seed <n>]");
    eprintln!("  study-cli flashcards --bank <file.json> [--resume <snapshot.json>] [--seed <n>]");
    eprintln!();
    eprintln!("Flashcard keys: f flip, n next, p previous, 0-5 rate, e <file> export, q quit");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_BANK, STUDY_QUESTIONS, STUDY_SECONDS, STUDY_DIFFICULTY, STUDY_SEED");
    eprintln!("  RUST_LOG (default: study_services=info,study_cli=info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quiz,
    Flashcards,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "flashcards" => Some(Self::Flashcards),
            _ => None,
        }
    }
}

struct Args {
    bank_path: String,
    resume_path: Option<String>,
    config: StudyConfig,
}

fn parse_count(raw: String) -> Result<Option<u32>, ArgsError> {
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| ArgsError::InvalidCount { raw })
}

fn parse_seconds(raw: String) -> Result<Option<u32>, ArgsError> {
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| ArgsError::InvalidSeconds { raw })
}

fn parse_seed(raw: String) -> Result<Option<u64>, ArgsError> {
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

impl Args {
    /// Resolves settings from `env` first, then lets flags override them.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut bank_path = env("STUDY_BANK");
        let mut resume_path = None;
        let mut question_count = match env("STUDY_QUESTIONS") {
            Some(raw) => parse_count(raw)?,
            None => StudyConfig::default().question_count(),
        };
        let mut seconds = env("STUDY_SECONDS").map(parse_seconds).transpose()?.flatten();
        let mut difficulty = match env("STUDY_DIFFICULTY") {
            Some(raw) => raw.parse::<Difficulty>()?,
            None => Difficulty::All,
        };
        let mut area = None;
        let mut seed = env("STUDY_SEED").map(parse_seed).transpose()?.flatten();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => bank_path = Some(require_value(args, "--bank")?),
                "--resume" => resume_path = Some(require_value(args, "--resume")?),
                "--questions" => question_count = parse_count(require_value(args, "--questions")?)?,
                "--timed" => seconds = parse_seconds(require_value(args, "--timed")?)?,
                "--difficulty" => {
                    difficulty = require_value(args, "--difficulty")?.parse::<Difficulty>()?;
                }
                "--area" => area = Some(require_value(args, "--area")?),
                "--seed" => seed = parse_seed(require_value(args, "--seed")?)?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg).into()),
            }
        }

        let config = StudyConfig::new()
            .with_question_count(question_count)
            .with_timer(seconds)?
            .with_difficulty(difficulty)
            .with_syllabus_area(area)
            .with_seed(seed);

        Ok(Self {
            bank_path: bank_path.ok_or(ArgsError::MissingBank)?,
            resume_path,
            config,
        })
    }
}

fn load_bank(args: &Args) -> Result<QuestionBank, Box<dyn std::error::Error>> {
    let input = std::fs::read_to_string(&args.bank_path)?;
    let mut rng = match args.config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let loaded = QuestionBank::load(&input, &mut rng)?;
    for warning in &loaded.warnings {
        match warning {
            LoadWarning::EmptyBank => println!("No questions found in {}.", args.bank_path),
            LoadWarning::MissingPairs { lesson } => {
                tracing::debug!(%lesson, "lesson without pairs");
            }
            LoadWarning::SkippedPair { lesson, index, defect } => {
                println!("Skipped pair {index} in \"{lesson}\": {defect}");
            }
            LoadWarning::FlashcardOnly { lesson, index, defect } => {
                println!("Pair {index} in \"{lesson}\" is flashcard-only: {defect}");
            }
        }
    }
    Ok(loaded.bank)
}

fn prompt(input: &mut impl BufRead, text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn run_quiz(
    service: &StudyService,
    bank: &QuestionBank,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut quiz = service.start_quiz(bank);

    while quiz.state() != QuizState::Completed {
        let Some(item) = quiz.current_question() else {
            break;
        };
        let progress = quiz.progress();
        println!();
        println!("Question {}/{}", progress.position, progress.total);
        println!("{}", item.question());
        for option in item.options() {
            println!("  {}) {}", option.label, option.text);
        }

        let Some(choice) = prompt(input, "Your answer: ")? else {
            return Ok(());
        };
        if quiz.is_over_time(service.clock().now()) {
            println!("(time is up for this question)");
        }
        let label = match choice.to_ascii_uppercase().parse::<OptionLabel>() {
            Ok(label) => label,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let feedback = match quiz.submit_answer(label) {
            Ok(feedback) => feedback,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        if feedback.is_correct {
            println!("Correct! Answer: {}", feedback.answer);
        } else {
            println!("Incorrect. The correct answer is: {}", feedback.answer);
        }
        if let Some(explanation) = &feedback.explanation {
            println!("Explanation: {explanation}");
        }
        println!("Memory Tip: {}", feedback.memory_aid);

        if prompt(input, "Press enter for the next question")?.is_none() {
            return Ok(());
        }
        service.advance(&mut quiz)?;
    }

    let summary = service.summarize(&quiz)?;
    println!();
    println!("Quiz Completed!");
    println!("Total Questions: {}", summary.total_questions());
    println!("Correct Answers: {}", summary.correct_count());
    println!("Score: {:.1}%", summary.score_percentage());
    println!("Average Time per Question: {:.1} seconds", summary.average_time_secs());
    println!("{}", summary.feedback().message());
    for tip in summary.learning_tips() {
        println!("  - {tip}");
    }
    Ok(())
}

fn print_card(deck: &FlashcardSession) {
    let Some(view) = deck.current_view() else {
        println!("No flashcards available.");
        return;
    };
    let progress = deck.progress();
    println!();
    println!("Card {}/{}  (level {})", progress.position, progress.total, view.mastery_level);
    if view.is_flipped {
        println!("{}", view.back);
        if let Some(aid) = view.memory_aid {
            println!("Memory Tip: {aid}");
        }
    } else {
        println!("{}", view.front);
    }
}

fn print_mastery(deck: &FlashcardSession) {
    for (level, count) in deck.histogram().iter() {
        println!("  Level {level} ({}): {count}", level.label());
    }
}

fn run_flashcards(
    service: &StudyService,
    bank: &QuestionBank,
    resume: Option<&str>,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut deck = match resume {
        Some(path) => import_flashcards(&std::fs::read_to_string(path)?)?,
        None => service.start_flashcards(bank),
    };

    loop {
        print_card(&deck);
        let Some(line) = prompt(input, "> ")? else {
            break;
        };
        let mut parts = line.splitn(2, ' ');
        match (parts.next().unwrap_or_default(), parts.next()) {
            ("q", _) => break,
            ("f", _) => {
                deck.flip();
            }
            ("n", _) => deck.next(),
            ("p", _) => deck.previous(),
            ("m", _) => print_mastery(&deck),
            ("e", Some(path)) => {
                std::fs::write(path.trim(), export_flashcards(&deck)?)?;
                println!("Exported {} cards to {}", deck.len(), path.trim());
            }
            (digit, _) if digit.parse::<u8>().is_ok_and(|d| d <= MasteryLevel::MAX) => {
                let level = digit.parse::<u8>()?;
                if let Err(err) = service.rate(&mut deck, level) {
                    println!("{err}");
                }
            }
            _ => println!("keys: f flip, n next, p previous, m mastery, 0-5 rate, e <file> export, q quit"),
        }
    }

    print_mastery(&deck);
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None | Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let mut iter = argv.into_iter().skip(1);
    let args = Args::parse(&mut iter, |key| std::env::var(key).ok()).inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })?;

    let bank = load_bank(&args)?;
    let service = StudyService::new(Clock::system(), args.config.clone());
    let stdin = io::stdin();
    let mut input = stdin.lock();

    match cmd {
        Command::Quiz => run_quiz(&service, &bank, &mut input),
        Command::Flashcards => {
            run_flashcards(&service, &bank, args.resume_path.as_deref(), &mut input)
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_services=info,study_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with(flags: &[&str], vars: &[(&str, &str)]) -> Result<Args, String> {
        let mut iter = flags.iter().map(|s| (*s).to_owned());
        Args::parse(&mut iter, |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        })
        .map_err(|e| e.to_string())
    }

    #[test]
    fn env_values_seed_the_config() {
        let args = parse_with(
            &[],
            &[
                ("STUDY_BANK", "bank.json"),
                ("STUDY_QUESTIONS", "5"),
                ("STUDY_SECONDS", "30"),
                ("STUDY_SEED", "9"),
            ],
        )
        .unwrap();
        assert_eq!(args.bank_path, "bank.json");
        assert_eq!(args.config.question_count(), Some(5));
        assert_eq!(args.config.seconds_per_question(), Some(30));
        assert_eq!(args.config.seed(), Some(9));
    }

    #[test]
    fn flags_override_env() {
        let args = parse_with(
            &["--bank", "other.json", "--seed", "3"],
            &[("STUDY_BANK", "bank.json"), ("STUDY_SEED", "9")],
        )
        .unwrap();
        assert_eq!(args.bank_path, "other.json");
        assert_eq!(args.config.seed(), Some(3));
    }

    #[test]
    fn bad_env_numbers_are_rejected() {
        let err = parse_with(&["--bank", "b.json"], &[("STUDY_SECONDS", "soon")]).err().unwrap();
        assert!(err.contains("STUDY_SECONDS"), "{err}");

        let err = parse_with(&["--bank", "b.json"], &[("STUDY_SEED", "-1")]).err().unwrap();
        assert!(err.contains("STUDY_SEED"), "{err}");

        let err = parse_with(&["--bank", "b.json"], &[("STUDY_QUESTIONS", "ten")]).err().unwrap();
        assert!(err.contains("STUDY_QUESTIONS"), "{err}");
    }

    #[test]
    fn bad_flag_numbers_are_rejected() {
        let err = parse_with(&["--bank", "b.json", "--timed", "x"], &[]).err().unwrap();
        assert!(err.contains("--timed"), "{err}");
    }
}
