//! Health Saarthi CLI
//!
//! Command-line interface for Health Saarthi:
//! - Calculate BMI, BMR and TDEE
//! - Generate a personalized wellness plan
//! - Ask a health question, or chat interactively
//! - Render generated text for the terminal

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use health_saarthi::ai::{prompts, AiHandle};
use health_saarthi::chat::{ChatMessage, ChatSession, Sender};
use health_saarthi::config::{generate_default_config, Config, LoggingConfig};
use health_saarthi::render::{
    render_sections,
    text::{sanitize, to_terminal},
    TerminalStyle,
};
use health_saarthi::wellness::{
    compute_metrics, format_metric, sex_note, ActivityLevel, Metrics, PlannerForm,
    PlannerSession, PrimaryGoal, Profile, Sex,
};
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "health-saarthi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI health Q&A and personalized wellness planner")]
#[command(long_about = "Health Saarthi answers general health questions and builds personalized wellness plans.\nIt is not a substitute for professional medical advice.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Show logs at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate BMI, BMR and TDEE
    Metrics {
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Sex: male, female or other
        #[arg(long)]
        sex: Sex,
        /// Height in centimeters
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Activity level: sedentary, lightly_active, moderately_active, very_active
        #[arg(long)]
        activity: Option<ActivityLevel>,
    },

    /// Render generated text for the terminal
    Render {
        /// Input file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Generate a personalized wellness plan
    Plan {
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        sex: Option<Sex>,
        /// Height in centimeters
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Primary goal, e.g. weight_loss, better_sleep
        #[arg(long)]
        goal: Option<PrimaryGoal>,
        #[arg(long)]
        activity: Option<ActivityLevel>,
        /// Dietary preferences or restrictions
        #[arg(long, default_value = "")]
        diet: String,
    },

    /// Ask a single health question
    Ask {
        question: String,
        /// Ground the answer with web search and list sources
        #[arg(long)]
        search: bool,
    },

    /// Interactive health Q&A (type /quit to exit)
    Chat {
        /// Ground answers with web search and list sources
        #[arg(long)]
        search: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Printing a config must work even when the current one is broken
    let config = match &cli.command {
        Commands::Config { .. } => Config::default(),
        _ => Config::resolve(cli.config.as_deref()).context("loading configuration")?,
    };
    let logging = LoggingConfig {
        level: if cli.verbose {
            config.logging.level.clone()
        } else {
            "warn".to_string()
        },
        ..config.logging.clone()
    };
    health_saarthi::logging::init(&logging).context("initializing logging")?;

    let style = if std::io::stdout().is_terminal() {
        TerminalStyle::ansi()
    } else {
        TerminalStyle::plain()
    };

    match cli.command {
        Commands::Metrics {
            age,
            sex,
            height,
            weight,
            activity,
        } => {
            let profile = Profile {
                age,
                sex,
                height_cm: height,
                weight_kg: weight,
                activity,
            };
            let metrics = compute_metrics(&profile);
            let note = sex_note(&profile);

            match cli.format {
                OutputFormat::Json => {
                    let body = serde_json::json!({ "metrics": metrics, "note": note });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                OutputFormat::Text => {
                    print_metrics(&metrics);
                    if let Some(note) = note {
                        println!();
                        println!("Note: {}", note);
                    }
                }
            }
        }

        Commands::Render { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {:?}", path))?,
                None => {
                    let mut text = String::new();
                    std::io::stdin()
                        .read_to_string(&mut text)
                        .context("reading stdin")?;
                    text
                }
            };

            let sections = render_sections(&text);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sections)?),
                OutputFormat::Text => println!("{}", to_terminal(&sections, None, style)),
            }
        }

        Commands::Plan {
            age,
            sex,
            height,
            weight,
            goal,
            activity,
            diet,
        } => {
            let ai = build_ai(&config)?;
            let mut planner = PlannerSession::new(PlannerForm {
                sex,
                age,
                weight_kg: weight,
                height_cm: height,
                primary_goal: goal,
                activity_level: activity,
                dietary_preferences: diet,
            });

            if cli.format == OutputFormat::Text {
                eprintln!("Generating your personalized wellness plan...");
            }
            let report = planner.submit(&ai).await?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => {
                    print_metrics(&report.metrics);
                    if let Some(note) = report.metrics_note {
                        println!("Note: {}", note);
                    }
                    println!();
                    println!("{}", to_terminal(&render_sections(&report.plan), None, style));
                    println!();
                    println!("Disclaimer: {}", report.disclaimer);
                }
            }
        }

        Commands::Ask { question, search } => {
            let ai = build_ai(&config)?;
            let mut session = ChatSession::new(&ai).with_search(search || config.ai.chat_search);
            let reply = session.send(&question, &ai).await?.clone();

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
                OutputFormat::Text => print_message(&reply, style),
            }
            if reply.sender == Sender::System {
                std::process::exit(1);
            }
        }

        Commands::Chat { search } => {
            let ai = build_ai(&config)?;
            let session = ChatSession::new(&ai).with_search(search || config.ai.chat_search);
            run_chat(session, &ai, cli.format, style).await?;
        }

        Commands::Config { output } => write_default_config(output.as_deref())?,
    }

    Ok(())
}

/// The collaborator, or an error explaining how to configure it
fn build_ai(config: &Config) -> anyhow::Result<AiHandle> {
    let ai = AiHandle::from_gemini_config(config.ai.gemini())?;
    if !ai.is_configured() {
        bail!("{}", prompts::UNCONFIGURED_NOTICE);
    }
    Ok(ai)
}

async fn run_chat(
    mut session: ChatSession,
    ai: &AiHandle,
    format: OutputFormat,
    style: TerminalStyle,
) -> anyhow::Result<()> {
    if format == OutputFormat::Text {
        println!("{} (type /quit to exit)", prompts::APP_TITLE);
        println!("{}", prompts::CHAT_FOOTER);
        println!();
        for message in session.messages() {
            print_message(message, style);
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if format == OutputFormat::Text {
            print!("> ");
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input == "/quit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let reply = session.send(input, ai).await?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(reply)?),
            OutputFormat::Text => print_message(reply, style),
        }
    }

    Ok(())
}

fn print_metrics(metrics: &Metrics) {
    println!("BMI:  {}", format_metric(metrics.bmi, None));
    println!("BMR:  {}", format_metric(metrics.bmr, Some("kcal/day")));
    println!("TDEE: {}", format_metric(metrics.tdee, Some("kcal/day")));
}

fn print_message(message: &ChatMessage, style: TerminalStyle) {
    match message.sender {
        Sender::System => eprintln!("{}", sanitize(&message.text)),
        Sender::User => println!("> {}", sanitize(&message.text)),
        Sender::Assistant => {
            let sections = render_sections(&message.text);
            println!("{}", to_terminal(&sections, message.sources.as_deref(), style));
        }
    }
    println!();
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("writing {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}
