//! CLI binary for travel-itinerary.
//!
//! A thin shim over the library crate: flags become a `TripRequest` and a
//! `PlannerConfig`, the itinerary goes to stdout and both artifacts go to
//! `--output-dir`.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use travel_itinerary::config::KNOWN_GEMINI_MODELS;
use travel_itinerary::output::{PDF_FILE_NAME, TXT_FILE_NAME};
use travel_itinerary::pipeline::input::load_image;
use travel_itinerary::trip::{
    Accommodation, ActivityLevel, Currency, Language, TravelStyle, MAX_DURATION_DAYS,
    MIN_BUDGET, MIN_DURATION_DAYS,
};
use travel_itinerary::{
    plan_trip_to_dir, PlanStats, PlannerConfig, PlanningProgressCallback, Preferences,
    ProgressCallback, TripDetails, TripRequest,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner shown while the model writes and the PDF renders.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    /// Stop the spinner so an error prints on a clean line.
    fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// Pass `result` through, clearing the spinner first if it is an error.
fn clear_on_error<T, E>(result: Result<T, E>, spinner: Option<&CliProgressCallback>) -> Result<T, E> {
    if result.is_err() {
        if let Some(s) = spinner {
            s.clear();
        }
    }
    result
}

impl PlanningProgressCallback for CliProgressCallback {
    fn on_generation_start(&self, model: &str) {
        self.bar.set_prefix("Generating");
        self.bar.set_message(format!("asking {model}…"));
    }

    fn on_generation_complete(&self, chars: usize) {
        self.bar.println(format!(
            "  {} Itinerary received  {}",
            green("✓"),
            dim(&format!("{chars} chars"))
        ));
        self.bar.set_prefix("Rendering");
        self.bar.set_message("laying out PDF…");
    }

    fn on_render_complete(&self, pages: usize, bytes: usize) {
        self.bar.println(format!(
            "  {} PDF rendered        {}",
            green("✓"),
            dim(&format!("{pages} pages, {bytes} bytes"))
        ));
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Default trip (New York → Los Angeles, 7 days, USD 1000)
  tripplan

  # A week in Paris, in French, on a budget
  tripplan --source Mumbai --destination Paris --date 2026-05-01 \
           --duration 7 --budget 1500 --currency EUR --language French \
           --accommodation Hostel --travel-style Adventurous

  # Show the model a photo of a landmark
  tripplan --destination Rome --image colosseum.jpg

  # Use another provider through edgequake-llm
  tripplan --provider openai --model gpt-4.1-mini

  # Machine-readable output
  tripplan --json > plan.json

OUTPUT:
  travel_itinerary.pdf   styled A4 PDF (cover, trip summary, itinerary)
  travel_itinerary.txt   the raw itinerary text
  Both are written to --output-dir (default: current directory).

ENVIRONMENT VARIABLES:
  GOOGLE_API_KEY          Gemini API key (checked first)
  GEMINI_API_KEY          Gemini API key (fallback)
  TRIPPLAN_*              Every flag has an env override, e.g. TRIPPLAN_DESTINATION
  RUST_LOG                Tracing filter, e.g. travel_itinerary=debug

  A .env file in the working directory is loaded before flags are parsed.
"#;

/// Generate a day-by-day travel itinerary with an LLM and render it to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "tripplan",
    version,
    about = "Generate an AI travel itinerary as text and a styled PDF",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// City the trip starts from.
    #[arg(long, env = "TRIPPLAN_SOURCE", default_value = "New York")]
    source: String,

    /// City the trip goes to.
    #[arg(long, env = "TRIPPLAN_DESTINATION", default_value = "Los Angeles")]
    destination: String,

    /// Start date, YYYY-MM-DD. Default: today.
    #[arg(long, env = "TRIPPLAN_DATE", value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Budget amount.
    #[arg(long, env = "TRIPPLAN_BUDGET", default_value_t = 1000,
          value_parser = clap::value_parser!(u64).range(MIN_BUDGET..))]
    budget: u64,

    /// Trip length in days (1–60).
    #[arg(long, env = "TRIPPLAN_DURATION", default_value_t = 7,
          value_parser = clap::value_parser!(u32).range(MIN_DURATION_DAYS as i64..=MAX_DURATION_DAYS as i64))]
    duration: u32,

    #[arg(long, env = "TRIPPLAN_CURRENCY", value_enum, ignore_case = true, default_value_t = Currency::Usd)]
    currency: Currency,

    /// Language the itinerary is written in.
    #[arg(long, env = "TRIPPLAN_LANGUAGE", value_enum, ignore_case = true, default_value_t = Language::English)]
    language: Language,

    #[arg(long, env = "TRIPPLAN_INTERESTS", default_value = "nature, historical sites")]
    interests: String,

    /// Dietary restrictions.
    #[arg(long, env = "TRIPPLAN_DIETARY", default_value = "None")]
    dietary: String,

    #[arg(long, env = "TRIPPLAN_ACTIVITY_LEVEL", value_enum, ignore_case = true, default_value_t = ActivityLevel::Low)]
    activity_level: ActivityLevel,

    #[arg(long, env = "TRIPPLAN_ACCOMMODATION", value_enum, ignore_case = true, default_value_t = Accommodation::Hotel)]
    accommodation: Accommodation,

    #[arg(long, env = "TRIPPLAN_TRAVEL_STYLE", value_enum, ignore_case = true, default_value_t = TravelStyle::Relaxed)]
    travel_style: TravelStyle,

    /// Must-visit landmarks.
    #[arg(long, env = "TRIPPLAN_LANDMARKS", default_value = "Eiffel Tower, Grand Canyon")]
    landmarks: String,

    /// Model ID. Gemini: gemini-2.5-flash, gemini-2.5-pro, gemini-1.5-flash, gemini-1.5-pro.
    #[arg(long, env = "TRIPPLAN_MODEL", default_value = "gemini-2.5-flash")]
    model: String,

    /// Provider: gemini (built-in) or any edgequake-llm provider name.
    #[arg(long, env = "TRIPPLAN_PROVIDER", default_value = "gemini")]
    provider: String,

    /// Gemini API key. Falls back to GOOGLE_API_KEY, then GEMINI_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Optional PNG or JPEG sent to the model with the prompt.
    #[arg(long, env = "TRIPPLAN_IMAGE")]
    image: Option<PathBuf>,

    /// Directory for travel_itinerary.pdf and travel_itinerary.txt.
    #[arg(short, long, env = "TRIPPLAN_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Sampling temperature (0.0–2.0). Default: provider default.
    #[arg(long, env = "TRIPPLAN_TEMPERATURE")]
    temperature: Option<f32>,

    /// Max output tokens. Default: provider default.
    #[arg(long, env = "TRIPPLAN_MAX_TOKENS")]
    max_tokens: Option<usize>,

    /// Model call timeout in seconds. Default: wait indefinitely.
    #[arg(long, env = "TRIPPLAN_API_TIMEOUT")]
    api_timeout: Option<u64>,

    /// Print the plan as JSON instead of the itinerary text.
    #[arg(long, env = "TRIPPLAN_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "TRIPPLAN_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TRIPPLAN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "TRIPPLAN_QUIET")]
    quiet: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Shape of `--json` output.
#[derive(Serialize)]
struct JsonPlan<'a> {
    itinerary: &'a str,
    pdf_path: PathBuf,
    txt_path: PathBuf,
    stats: &'a PlanStats,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal; anything else is worth knowing about.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!("Ignoring unreadable .env file: {e}");
        }
    }

    // ── Build request ────────────────────────────────────────────────────
    let request = build_request(&cli)?;

    // ── Build config ─────────────────────────────────────────────────────
    let spinner = show_progress.then(CliProgressCallback::new);
    let progress_cb: Option<ProgressCallback> = spinner
        .clone()
        .map(|s| s as Arc<dyn PlanningProgressCallback>);
    let config = clear_on_error(build_config(&cli, progress_cb), spinner.as_deref())?;

    if !cli.quiet && !config.is_known_model() && config.provider_name == "gemini" {
        eprintln!(
            "{} '{}' is not one of {}",
            cyan("⚠"),
            cli.model,
            KNOWN_GEMINI_MODELS.join(", ")
        );
    }

    // ── Run ──────────────────────────────────────────────────────────────
    let plan = clear_on_error(
        plan_trip_to_dir(request, &cli.output_dir, &config).await,
        spinner.as_deref(),
    )
    .context("Itinerary generation failed")?;

    let pdf_path = cli.output_dir.join(PDF_FILE_NAME);
    let txt_path = cli.output_dir.join(TXT_FILE_NAME);

    if cli.json {
        let json = serde_json::to_string_pretty(&JsonPlan {
            itinerary: &plan.itinerary,
            pdf_path: pdf_path.clone(),
            txt_path: txt_path.clone(),
            stats: &plan.stats,
        })
        .context("Failed to serialise output")?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(plan.itinerary.as_bytes())
            .context("Failed to write to stdout")?;
        if !plan.itinerary.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if !cli.quiet {
        let stats = &plan.stats;
        eprintln!(
            "{}  {} pages  {}ms  →  {}, {}",
            green("✔"),
            stats.page_count,
            stats.total_ms,
            bold(&pdf_path.display().to_string()),
            bold(&txt_path.display().to_string()),
        );
        eprintln!(
            "   {} tokens in  /  {} tokens out  ·  {}",
            dim(&stats.input_tokens.to_string()),
            dim(&stats.output_tokens.to_string()),
            stats.model,
        );
    }

    Ok(())
}

/// Map CLI args to a `TripRequest`.
fn build_request(cli: &Cli) -> Result<TripRequest> {
    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let details = TripDetails {
        source: cli.source.clone(),
        destination: cli.destination.clone(),
        date: date.format("%Y-%m-%d").to_string(),
        duration: cli.duration,
        budget: cli.budget,
        currency: cli.currency,
        language: cli.language,
        accommodation_preference: cli.accommodation,
        travel_style: cli.travel_style,
    };
    let preferences = Preferences {
        interests: cli.interests.clone(),
        dietary_restrictions: cli.dietary.clone(),
        activity_level: cli.activity_level,
        must_visit_landmarks: cli.landmarks.clone(),
    };

    let mut request = TripRequest::new(details).with_preferences(preferences);
    if let Some(ref path) = cli.image {
        let image = load_image(path)
            .with_context(|| format!("Failed to load image {}", path.display()))?;
        request = request.with_image(image);
    }
    Ok(request)
}

/// Map CLI args to `PlannerConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<PlannerConfig> {
    let mut builder = PlannerConfig::builder()
        .provider_name(cli.provider.clone())
        .model(cli.model.clone());

    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key.clone());
    }
    builder = builder.api_key_from_env();

    if let Some(t) = cli.temperature {
        builder = builder.temperature(t);
    }
    if let Some(n) = cli.max_tokens {
        builder = builder.max_tokens(n);
    }
    if let Some(secs) = cli.api_timeout {
        builder = builder.api_timeout_secs(secs);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
