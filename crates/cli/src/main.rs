use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use proofread_core::{
    BlogcRenderer, CheckOptions, ClientConfig, DEFAULT_API_URL, JsonConfig, JsonFormatter, LanguageToolClient, Observer,
    Renderer, Settings, SettingsSource, TextReport, TracingObserver, html_to_text_observed, merge_lists,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_BLOGC: &str = "blogc";

/// Output format for the findings report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Check grammar of blogc source files using the LanguageTool API
#[derive(Parser, Debug)]
#[command(name = "proofread")]
#[command(author = "Proofread Contributors")]
#[command(version = VERSION)]
#[command(about = "Check grammar of blogc source files using LanguageTool API", long_about = None)]
struct Args {
    /// blogc source file
    #[arg(value_name = "SOURCE", required_unless_present = "completions")]
    source: Option<PathBuf>,

    /// LanguageTool API URL
    #[arg(short, long, value_name = "URL")]
    api_url: Option<String>,

    /// Settings file (default: ~/.proofread.yaml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Comma-separated grammar checking categories to disable, merged with settings
    #[arg(short = 'c', long, value_delimiter = ',', value_name = "IDS")]
    disable_categories: Vec<String>,

    /// Comma-separated grammar checking rules to disable, merged with settings
    #[arg(short = 'r', long, value_delimiter = ',', value_name = "IDS")]
    disable_rules: Vec<String>,

    /// Comma-separated words to ignore when checking grammar, merged with settings
    #[arg(short, long, value_delimiter = ',', value_name = "WORDS")]
    ignore_words: Vec<String>,

    /// Dump HTML generated by blogc and exit without converting to text and checking grammar
    #[arg(short, long)]
    dump_html: bool,

    /// Dump text generated and exit without checking grammar
    #[arg(short = 't', long)]
    dump_text: bool,

    /// Source language (default: en-US)
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Log level (default: warn)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Mother tongue of the author
    #[arg(short, long, value_name = "LANG")]
    mother_tongue: Option<String>,

    /// Path to the blogc binary (default: blogc)
    #[arg(long, value_name = "PATH")]
    blogc: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Report format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: ReportFormat,

    /// Print progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

/// Install the global tracing subscriber. `RUST_LOG` overrides `level`.
fn init_logging(level: &str) -> anyhow::Result<()> {
    let level =
        LevelFilter::from_str(level).map_err(|_| anyhow::anyhow!("Invalid log level: {}", level))?;

    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "proofread", &mut io::stdout());
        return Ok(());
    }

    let Some(source) = args.source.as_deref() else {
        bail!("SOURCE is required");
    };

    let (settings, settings_source) =
        Settings::discover(args.config.as_deref()).context("Failed to load settings")?;

    let log_level = args.log_level.clone().or_else(|| settings.log_level.clone());
    init_logging(log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL))?;

    if let SettingsSource::File(path) = &settings_source {
        tracing::info!(config = %path.display(), "Using config file");
    }

    if args.verbose {
        echo::print_banner();
        if let SettingsSource::File(path) = &settings_source {
            echo::print_info(&format!("Using settings from {}", path.display()));
            eprintln!();
        }
    }

    let observer: Arc<dyn Observer> = Arc::new(TracingObserver);

    let dump_html = args.dump_html || settings.dump_html.unwrap_or(false);
    let dump_text = args.dump_text || settings.dump_text.unwrap_or(false);
    let total = if dump_html { 1 } else if dump_text { 2 } else { 3 };

    if args.verbose {
        echo::print_step(1, total, &format!("Rendering {}", source.display()));
    }

    let started = Instant::now();
    let blogc = args.blogc.clone().or_else(|| settings.blogc.clone()).unwrap_or_else(|| DEFAULT_BLOGC.into());
    let renderer = BlogcRenderer::new(blogc).with_observer(observer.clone());
    if args.verbose {
        echo::print_detail("blogc", &renderer.binary().display().to_string());
    }
    let html = renderer
        .render(source)
        .with_context(|| format!("Failed to render {}", source.display()))?;

    if args.verbose {
        echo::print_detail("HTML", &echo::format_size(html.len()));
        echo::print_timing("Render", started.elapsed());
        eprintln!();
    }

    if dump_html {
        println!("{}", html);
        return Ok(());
    }

    if args.verbose {
        echo::print_step(2, total, "Converting HTML to text");
    }

    let started = Instant::now();
    let text = html_to_text_observed(&html, observer.as_ref()).context("Failed to convert HTML to text")?;

    if args.verbose {
        echo::print_detail("Text", &echo::format_size(text.len()));
        echo::print_timing("Extract", started.elapsed());
        eprintln!();
    }

    if dump_text {
        println!("{}", text);
        return Ok(());
    }

    let api_url = args.api_url.clone().or_else(|| settings.api_url.clone()).unwrap_or_else(|| DEFAULT_API_URL.into());
    let mut options = CheckOptions::builder()
        .language(args.language.clone().or_else(|| settings.language.clone()).unwrap_or_else(|| DEFAULT_LANGUAGE.into()))
        .ignored_words(merge_lists(&settings.ignore_words, &args.ignore_words))
        .disabled_rules(merge_lists(&settings.disable_rules, &args.disable_rules))
        .disabled_categories(merge_lists(&settings.disable_categories, &args.disable_categories));
    if let Some(mother_tongue) = args.mother_tongue.clone().or_else(|| settings.mother_tongue.clone()) {
        options = options.mother_tongue(mother_tongue);
    }
    let options = options.build();

    let client = LanguageToolClient::new(ClientConfig { api_url, timeout: args.timeout, ..Default::default() })
        .with_observer(observer);

    if args.verbose {
        echo::print_step(3, total, &format!("Checking grammar with {}", client.config().api_url));
        echo::print_detail("Language", options.language());
        echo::print_detail("Timeout", &format!("{}s", client.config().timeout));
    }

    let started = Instant::now();
    let findings = client.check(&text, &options).await.context("Failed to check grammar")?;

    if args.verbose {
        echo::print_timing("Check", started.elapsed());
        eprintln!();
        if findings.is_empty() {
            echo::print_success("No issues found");
        } else {
            echo::print_warning(&format!("{} issue(s) found", findings.len()));
        }
    }

    match args.format {
        ReportFormat::Text => print!("{}", TextReport::new().render(&findings)),
        ReportFormat::Json => {
            let source = source.display().to_string();
            let json = JsonFormatter::new(JsonConfig { pretty: true })
                .render(Some(&source), &findings)
                .context("Failed to serialize findings")?;
            println!("{}", json);
        }
    }

    Ok(())
}
