use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use erp_scorecard::assessment::{self, AnswerEntry, Assessment, Profile};
use erp_scorecard::config::{self, Settings, SettingsUpdate};
use erp_scorecard::credentials::{self, CredentialVerifier, StaticSecretVerifier};
use erp_scorecard::output;
use erp_scorecard::questions::{self, QuestionBank};
use erp_scorecard::scoring::{self, PillarWeights};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List active questions in display order
    Questions,
    /// Start a new assessment and print its id
    Start {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        erp: String,
        /// Current Epicor version, if any
        #[arg(long)]
        erp_version: Option<String>,
        #[arg(long)]
        timeline: String,
    },
    /// Replace an assessment's answers with a JSON list of {questionId, score}
    Answer {
        id: String,
        answers: PathBuf,
    },
    /// Score an assessment, store the results and print them
    Calculate {
        id: String,
        /// Print the results document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print previously calculated results without recomputing
    Results {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Show pricing for the configured currency
    Pricing,
    /// Admin-only operations
    Admin {
        /// Admin password (falls back to ERP_SCORECARD_ADMIN_PASSWORD, then a prompt)
        #[arg(long, env = "ERP_SCORECARD_ADMIN_PASSWORD", hide_env_values = true)]
        admin_password: Option<String>,

        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand, Debug)]
enum AdminCommands {
    /// Check the admin password
    Verify,
    /// Show assessment statistics
    Stats,
    /// List completed assessments, most recent first
    Assessments {
        #[arg(long)]
        json: bool,
    },
    /// Replace pillar weights from a YAML or JSON map (P1..P10 -> percent)
    SetWeights { file: PathBuf },
    /// Apply a partial settings update (weights, currency, pricing, links) from YAML
    SetSettings { file: PathBuf },
    /// Add a question to the bank from a YAML file
    AddQuestion { file: PathBuf },
    /// Delete questions whose qid starts with TEST from the bank
    RemoveTestQuestions,
}

#[derive(Parser, Debug)]
#[command(name = "erp-scorecard")]
#[command(about = "ERP cloud-readiness scorecard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to settings file (defaults to ~/.config/erp-scorecard/settings.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for stored assessments
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to the question bank (defaults to ~/.config/erp-scorecard/questions.yaml)
    #[arg(long, global = true)]
    bank: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn load_bank_or_exit(path: Option<PathBuf>) -> (PathBuf, QuestionBank) {
    let path = match path {
        Some(p) => p,
        None => match config::get_config_dir() {
            Ok(dir) => dir.join("questions.yaml"),
            Err(e) => fail(EXIT_CONFIG, format!("Config error: {:#}", e)),
        },
    };
    match questions::load_bank(&path) {
        Ok(bank) => (path, bank),
        Err(e) => fail(EXIT_CONFIG, format!("Question bank error: {:#}", e)),
    }
}

fn load_assessment_or_exit(data_dir: &Path, id: &str) -> Assessment {
    match assessment::load_assessment(data_dir, id) {
        Ok(a) => a,
        Err(e) => fail(EXIT_DATA, format!("{:#}", e)),
    }
}

fn save_assessment_or_exit(data_dir: &Path, a: &Assessment) {
    if let Err(e) = assessment::save_assessment(data_dir, a) {
        fail(EXIT_DATA, format!("{:#}", e));
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(EXIT_DATA, format!("Failed to serialize output: {}", e)),
    }
}

fn require_admin(explicit: Option<String>) {
    let verifier = match StaticSecretVerifier::from_env() {
        Ok(v) => v,
        Err(e) => fail(EXIT_AUTH, format!("Auth error: {}", e)),
    };
    let password = match credentials::resolve_password(explicit) {
        Ok(p) => p,
        Err(e) => fail(EXIT_AUTH, format!("Auth error: {:#}", e)),
    };
    if let Err(e) = credentials::authorize(&verifier as &dyn CredentialVerifier, &password) {
        fail(EXIT_AUTH, format!("Auth error: {}", e));
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings_path = match cli.config.clone() {
        Some(p) => p,
        None => match config::get_settings_path() {
            Ok(p) => p,
            Err(e) => fail(EXIT_CONFIG, format!("Config error: {:#}", e)),
        },
    };
    let settings = match config::load_settings(Some(settings_path.clone())) {
        Ok(s) => s,
        Err(e) => fail(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    // Validate settings at startup
    if let Err(errors) = config::validate_settings(&settings) {
        eprintln!("Settings errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let data_dir = match cli.data_dir.clone() {
        Some(d) => d,
        None => match config::get_data_dir() {
            Ok(d) => d,
            Err(e) => fail(EXIT_CONFIG, format!("Config error: {:#}", e)),
        },
    };
    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Questions => {
            let (_, bank) = load_bank_or_exit(cli.bank);
            println!("{}", output::format_question_list(bank.active(), use_colors));
        }
        Commands::Start {
            name,
            email,
            company,
            role,
            erp,
            erp_version,
            timeline,
        } => {
            let profile = Profile {
                name,
                email,
                company_name: company,
                role,
                erp,
                epicor_version: erp_version,
                timeline,
            };
            let a = Assessment::start(profile, chrono::Utc::now());
            save_assessment_or_exit(&data_dir, &a);
            tracing::info!(id = %a.id, "started assessment");
            println!("{}", a.id);
        }
        Commands::Answer { id, answers } => {
            let mut a = load_assessment_or_exit(&data_dir, &id);
            let entries: Vec<AnswerEntry> = match std::fs::read_to_string(&answers)
                .map_err(anyhow::Error::from)
                .and_then(|s| serde_json::from_str(&s).map_err(anyhow::Error::from))
            {
                Ok(e) => e,
                Err(e) => fail(
                    EXIT_DATA,
                    format!("Failed to read answers from {}: {}", answers.display(), e),
                ),
            };
            let submitted = entries.len();
            a.replace_answers(entries, chrono::Utc::now());
            save_assessment_or_exit(&data_dir, &a);
            println!("Saved {} answers ({} submitted)", a.answers.len(), submitted);
        }
        Commands::Calculate { id, json } => {
            let (_, bank) = load_bank_or_exit(cli.bank);
            let mut a = load_assessment_or_exit(&data_dir, &id);
            let results = match scoring::score(&a.answers, &bank, &settings) {
                Ok(r) => r,
                Err(e) => fail(EXIT_DATA, format!("Scoring error: {}", e)),
            };
            a.record_results(results.clone(), chrono::Utc::now());
            save_assessment_or_exit(&data_dir, &a);

            tracing::info!(
                id = %a.id,
                overall = results.overall_score,
                decision = %results.decision,
                "stored results"
            );
            if json {
                print_json(&results);
            } else {
                println!("{}", output::format_results(&results, use_colors));
            }
        }
        Commands::Results { id, json } => {
            let a = load_assessment_or_exit(&data_dir, &id);
            let Some(results) = a.results() else {
                fail(EXIT_DATA, format!("Assessment '{}' has no results yet; run calculate first", id));
            };
            if json {
                print_json(results);
            } else {
                println!("{}", output::format_results(results, use_colors));
            }
        }
        Commands::Pricing => {
            println!("{}", output::format_pricing(&settings));
        }
        Commands::Admin {
            admin_password,
            command,
        } => {
            require_admin(admin_password);
            run_admin(command, &settings, &settings_path, &data_dir, cli.bank);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_admin(
    command: AdminCommands,
    settings: &Settings,
    settings_path: &Path,
    data_dir: &Path,
    bank_path: Option<PathBuf>,
) {
    match command {
        AdminCommands::Verify => println!("Admin password accepted."),
        AdminCommands::Stats => {
            let all = match assessment::list_assessments(data_dir) {
                Ok(a) => a,
                Err(e) => fail(EXIT_DATA, format!("{:#}", e)),
            };
            println!("{}", output::format_stats(&assessment::compute_stats(&all)));
        }
        AdminCommands::Assessments { json } => {
            let all = match assessment::list_assessments(data_dir) {
                Ok(a) => a,
                Err(e) => fail(EXIT_DATA, format!("{:#}", e)),
            };
            let summaries = assessment::completed_summaries(&all);
            if json {
                print_json(&summaries);
            } else if summaries.is_empty() {
                println!("No completed assessments.");
            } else {
                println!("{}", output::format_summaries_tsv(&summaries, chrono::Utc::now()));
            }
        }
        AdminCommands::SetWeights { file } => {
            let weights: PillarWeights = match std::fs::read_to_string(&file)
                .map_err(anyhow::Error::from)
                .and_then(|s| serde_saphyr::from_str(&s).map_err(anyhow::Error::from))
            {
                Ok(w) => w,
                Err(e) => fail(
                    EXIT_CONFIG,
                    format!("Failed to read weights from {}: {}", file.display(), e),
                ),
            };
            if let Err(errors) = scoring::validate_scoring(&weights, &settings.rules) {
                eprintln!("Weight errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }
            let updated = settings.with_weights(weights);
            if let Err(e) = config::save_settings(settings_path, &updated) {
                fail(EXIT_CONFIG, format!("Config error: {:#}", e));
            }
            println!("Weights updated (settings version {}).", updated.version);
        }
        AdminCommands::SetSettings { file } => {
            let update: SettingsUpdate = match std::fs::read_to_string(&file)
                .map_err(anyhow::Error::from)
                .and_then(|s| serde_saphyr::from_str(&s).map_err(anyhow::Error::from))
            {
                Ok(u) => u,
                Err(e) => fail(
                    EXIT_CONFIG,
                    format!("Failed to read settings update from {}: {}", file.display(), e),
                ),
            };
            let updated = match config::update_settings(settings, update) {
                Ok(s) => s,
                Err(errors) => {
                    eprintln!("Settings errors:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if let Err(e) = config::save_settings(settings_path, &updated) {
                fail(EXIT_CONFIG, format!("Config error: {:#}", e));
            }
            println!("Settings updated (settings version {}).", updated.version);
        }
        AdminCommands::AddQuestion { file } => {
            let question = match questions::load_question(&file) {
                Ok(q) => q,
                Err(e) => fail(EXIT_DATA, format!("{:#}", e)),
            };
            let (path, mut bank) = load_bank_or_exit(bank_path);
            let id = question.id.clone();
            if let Err(e) = bank.add(question) {
                fail(EXIT_DATA, format!("Question bank error: {}", e));
            }
            if let Err(e) = questions::save_bank(&path, &bank) {
                fail(EXIT_CONFIG, format!("Question bank error: {:#}", e));
            }
            println!("Added question {} ({} in bank).", id, bank.len());
        }
        AdminCommands::RemoveTestQuestions => {
            let (path, mut bank) = load_bank_or_exit(bank_path);
            let removed = bank.remove_test_fixtures();
            if removed > 0 {
                if let Err(e) = questions::save_bank(&path, &bank) {
                    fail(EXIT_CONFIG, format!("Question bank error: {:#}", e));
                }
            }
            println!("Removed {} test questions.", removed);
        }
    }
}
