use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use sitestyles::config::{self, API_KEY_ENV};
use sitestyles::models::{AnalysisRequest, AnalysisResult, ColorFormat, OutputFormat, DEFAULT_URL};
use sitestyles::session::{Session, SessionState};
use sitestyles::{clipboard, insights, report, tokens, AnalysisClient};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract design tokens from any website and convert them to your preferred format")]
struct Args {
    /// Website to analyze
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,
    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
    /// Color format (defaults to the configured one)
    #[arg(long, value_enum)]
    color_format: Option<ColorFormat>,
    /// Request compact output
    #[arg(long)]
    compact: bool,
    /// Analysis service base URL
    #[arg(long)]
    api_url: Option<String>,
    /// Analysis service API key
    #[arg(long)]
    api_key: Option<String>,
    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Save the complete raw response as JSON (default path: analysis_result.json)
    #[arg(long)]
    json: bool,
    /// Copy the displayed output to the clipboard
    #[arg(long)]
    copy: bool,
    /// Print design insights after the output
    #[arg(long)]
    insights: bool,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a project configuration file
    Init,
    /// Edit the configuration interactively
    Config {
        /// Edit the global configuration
        #[arg(short, long)]
        global: bool,
    },
    /// Generate design insights from a saved JSON result
    Insights {
        /// Raw result saved with --json
        #[arg(short, long)]
        report: PathBuf,
        /// Markdown output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarize the tokens of a saved JSON result
    Tokens {
        /// Raw result saved with --json
        #[arg(short, long)]
        report: PathBuf,
        /// Markdown output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let project_dir = std::env::current_dir().context("cannot determine the working directory")?;

    match &args.command {
        Some(Commands::Init) => {
            config::init_project(&project_dir)?;
        }
        Some(Commands::Config { global }) => {
            config::configure_interactive(&project_dir, *global).await?;
        }
        Some(Commands::Insights { report: saved, output }) => {
            let result = load_result(saved)?;
            let md = report::render_insights_markdown(
                &insights::generate_insights(&result),
                &insights::health_score(&result),
            );
            emit(&md, output.as_deref())?;
        }
        Some(Commands::Tokens { report: saved, output }) => {
            let result = load_result(saved)?;
            let md = report::render_tokens_markdown(
                &tokens::summarize_result(&result),
                tokens::source_label(&result),
            );
            emit(&md, output.as_deref())?;
        }
        None => {
            handle_analyze(&args, &project_dir).await?;
        }
    }

    Ok(())
}

async fn handle_analyze(args: &Args, project_dir: &Path) -> Result<()> {
    // Flags take precedence over the environment and the config file.
    let mut config = config::get_effective_config(project_dir)?;
    if let Some(api_url) = &args.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.api_key = api_key.clone();
    }
    config.validate()?;
    if config.api_key.is_empty() {
        warn!(
            "no API key configured; set {} or run `sitestyles config`",
            API_KEY_ENV
        );
    }

    let request = AnalysisRequest {
        url: args.url.clone(),
        format: args.format.unwrap_or(config.format),
        color_format: args.color_format.unwrap_or(config.color_format),
        compact: args.compact || config.compact,
    };

    let client = AnalysisClient::new(&config);
    let mut session = Session::new();
    let result = match session.run(&client, &request).await {
        SessionState::Ready(result) => result.clone(),
        SessionState::Failed(message) => {
            error!("analysis failed: {}", message);
            return Err(anyhow!("{}", message));
        }
        state => return Err(anyhow!("analysis did not complete: {:?}", state)),
    };

    if let Some(host) = report::source_host(&result) {
        info!("results for {}", host);
    }

    let display = report::format_result_display(&result, request.format)?;

    if args.json {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("analysis_result.json"));
        report::write_report(&path, &serde_json::to_string_pretty(&result)?)?;
    } else if let Some(path) = &args.output {
        report::write_report(path, &display)?;
    } else {
        println!("{}", display);
        let preview = report::palette_preview(&result);
        if !preview.is_empty() {
            println!("\n{}", report::render_palette(&preview));
        }
    }

    if args.copy {
        match clipboard::copy_to_clipboard(&display) {
            Ok(()) => info!("output copied to the clipboard"),
            Err(e) => warn!("could not copy the output: {}", e),
        }
    }

    if args.insights {
        let md = report::render_insights_markdown(
            &insights::generate_insights(&result),
            &insights::health_score(&result),
        );
        println!("\n{}", md);
    }

    Ok(())
}

fn load_result(path: &Path) -> Result<AnalysisResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let result = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a saved analysis result", path.display()))?;
    Ok(result)
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => report::write_report(path, content)?,
        None => println!("{}", content),
    }
    Ok(())
}
