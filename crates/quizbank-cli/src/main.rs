//! Quizbank CLI - trivia question bank and quiz drill

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quizbank_core::api::{categories, questions, quiz, search};
use quizbank_core::config::Config;
use quizbank_core::storage::{Database, DatabaseConfig};
use tracing::warn;

#[derive(Parser)]
#[command(name = "quizbank")]
#[command(author, version, about = "Trivia question bank and quiz drill", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file (defaults to the configured path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage questions
    Questions {
        #[command(subcommand)]
        action: QuestionAction,
    },

    /// Play a quiz
    Quiz {
        #[command(subcommand)]
        action: QuizAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List all categories
    List,
}

#[derive(Subcommand)]
enum QuestionAction {
    /// List questions, paged
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Add a new question
    Add {
        /// Question text
        question: String,
        /// Answer text
        answer: String,
        /// Stored category id
        #[arg(short, long)]
        category: i64,
        /// Difficulty rating
        #[arg(short, long, default_value_t = 1)]
        difficulty: i64,
    },
    /// Delete a question by id
    Delete { id: i64 },
    /// Search question text
    Search {
        term: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// List questions for a client-facing category index
    ByCategory {
        /// Category index as shown by web clients (zero-indexed)
        index: i64,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Subcommand)]
enum QuizAction {
    /// Draw the next question
    Next {
        /// Stored category id (omit or 0 for all categories)
        #[arg(short, long)]
        category: Option<i64>,
        /// Question ids already asked this session
        #[arg(short, long, value_delimiter = ',')]
        seen: Vec<i64>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizbank=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let open_db = || async {
        let path = cli.db.clone().or_else(|| config.storage.path.clone());
        let db_config = match path {
            Some(path) => DatabaseConfig::with_path(path),
            None => DatabaseConfig::default(),
        }
        .max_connections(config.storage.max_connections);
        Database::new(db_config).await
    };

    match cli.command {
        Commands::Categories { action } => {
            let db = open_db().await?;
            cmd_categories(&db, action, cli.quiet).await
        }

        Commands::Questions { action } => {
            let db = open_db().await?;
            cmd_questions(&db, &config, action, cli.quiet).await
        }

        Commands::Quiz { action } => {
            let db = open_db().await?;
            cmd_quiz(&db, action, cli.quiet).await
        }

        Commands::Config { action } => cmd_config(action, cli.quiet),

        Commands::Doctor => {
            let db = open_db().await;
            cmd_doctor(db, cli.quiet).await
        }
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_categories(db: &Database, action: CategoryAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        CategoryAction::List => {
            let result = categories::list_categories(db).await?;
            if !quiet {
                println!("Categories:");
            }
            for category in result.categories {
                println!("  {}. {}", category.id, category.label);
            }
        }
    }
    Ok(())
}

fn print_question_lines(views: &[quizbank_core::api::QuestionView]) {
    for q in views {
        println!(
            "  {}. [category {} / difficulty {}] {}",
            q.id, q.category, q.difficulty, q.question
        );
    }
}

async fn cmd_questions(
    db: &Database,
    config: &Config,
    action: QuestionAction,
    quiet: bool,
) -> anyhow::Result<()> {
    let page_size = config.listing.page_size;

    match action {
        QuestionAction::List { page } => {
            let result = questions::list_questions(db, page, page_size).await?;
            if !quiet {
                println!("Questions (page {}):", page);
            }
            print_question_lines(&result.questions);
            if !quiet {
                println!("Total questions: {}", result.total_questions);
            }
        }
        QuestionAction::Add {
            question,
            answer,
            category,
            difficulty,
        } => {
            let result = questions::create_question(
                db,
                questions::CreateQuestionRequest {
                    question: Some(question),
                    answer: Some(answer),
                    category: Some(category),
                    difficulty: Some(difficulty),
                },
                1,
                page_size,
            )
            .await?;
            println!("Question created: {}", result.created);
            if !quiet {
                println!("Total questions: {}", result.total_questions);
            }
        }
        QuestionAction::Delete { id } => {
            let result = questions::delete_question(db, id, 1, page_size).await?;
            println!("Question deleted: {}", result.deleted);
            if !quiet {
                println!("Total questions: {}", result.total_questions);
            }
        }
        QuestionAction::Search { term, page } => {
            let result = search::search_questions(
                db,
                search::SearchRequest {
                    search_term: Some(term.clone()),
                },
                page,
                page_size,
                config.search.empty_result_is_error,
            )
            .await?;
            if !quiet {
                println!("Questions matching '{}':", term);
            }
            print_question_lines(&result.questions);
            if !quiet {
                println!("Total matches: {}", result.total_questions);
            }
        }
        QuestionAction::ByCategory { index, page } => {
            let result = categories::questions_by_category(db, index, page, page_size).await?;
            if !quiet {
                println!("Questions in category {}:", result.current_category);
            }
            print_question_lines(&result.questions);
            if !quiet {
                println!("Total questions: {}", result.total_questions);
            }
        }
    }
    Ok(())
}

async fn cmd_quiz(db: &Database, action: QuizAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        QuizAction::Next { category, seen } => {
            let request = quiz::QuizRequest {
                previous_questions: seen,
                quiz_category: Some(quiz::QuizCategoryPayload {
                    id: Some(serde_json::json!(category.unwrap_or(0))),
                    label: None,
                }),
            };

            let draw = quiz::next_question(db, request).await?;
            match draw.question {
                Some(q) => {
                    if !quiet {
                        println!("Question {} (category {}):", q.id, q.category);
                    }
                    println!("  Q: {}", q.question);
                    println!("  A: {}", q.answer);
                    if !quiet {
                        println!("\nAsk again with: quizbank quiz next --seen <previous>,{}", q.id);
                    }
                }
                None => {
                    println!("No questions left - quiz session complete.");
                }
            }
        }
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn cmd_doctor(db: anyhow::Result<Database>, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("Quizbank Health Check");
        println!("=====================");
        println!();
    }

    let mut all_ok = true;

    // Check configuration
    match Config::load() {
        Ok(_) => {
            if !quiet {
                println!("[OK] Configuration: Valid");
            }
        }
        Err(e) => {
            all_ok = false;
            warn!("Configuration invalid: {}", e);
            println!("[!!] Configuration: Error - {}", e);
        }
    }

    // Check config file location
    if !quiet {
        match Config::config_path() {
            Ok(path) => {
                if path.exists() {
                    println!("[OK] Config file: {}", path.display());
                } else {
                    println!("[--] Config file: {} (using defaults)", path.display());
                }
            }
            Err(e) => {
                println!("[!!] Config file: Error - {}", e);
            }
        }
    }

    // Check database
    match db {
        Ok(db) => match db.health_check().await {
            Ok(()) => {
                println!("[OK] Database: Connected");
                if !quiet {
                    println!("     Path: {}", db.path().display());
                }

                match db.migration_status().await {
                    Ok(status) => {
                        if status.needs_migration {
                            println!(
                                "[!!] Database: Migrations pending (v{} -> v{})",
                                status.current_version, status.target_version
                            );
                        } else {
                            println!("[OK] Database: Schema v{}", status.current_version);
                        }
                    }
                    Err(e) => {
                        println!("[!!] Database: Migration check failed - {}", e);
                    }
                }

                use quizbank_core::bank::{CategoryRepository, QuestionRepository};
                let question_count = QuestionRepository::new(&db).count().await.unwrap_or(0);
                let category_count = CategoryRepository::new(&db).count().await.unwrap_or(0);
                println!("     Questions: {}", question_count);
                println!("     Categories: {}", category_count);
            }
            Err(e) => {
                all_ok = false;
                println!("[!!] Database: Health check failed - {}", e);
            }
        },
        Err(e) => {
            all_ok = false;
            warn!("Database initialization failed: {}", e);
            println!("[!!] Database: Failed to initialize - {}", e);
        }
    }

    // Summary
    if !quiet {
        println!();
        if all_ok {
            println!("All checks passed!");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }

    Ok(())
}
