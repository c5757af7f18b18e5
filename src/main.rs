use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trendlens::config::{api_key_from_env, default_config_path, ServiceConfig};
use trendlens::generation::GenerationRequest;
use trendlens::server::{self, AppState};
use trendlens::{format_float, format_number, ContentSample};

#[derive(Parser)]
#[command(name = "trendlens", about = "Content virality scoring and generation")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Score content read from --text or stdin.
    Predict(PredictArgs),
    /// Generate platform content for a topic.
    Generate(GenerateArgs),
    /// Mock keyword trend analysis.
    Trends(TrendsArgs),
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Write the effective config to a TOML file.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct PredictArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long, default_value = "general")]
    platform: String,
    #[arg(long = "hashtag")]
    hashtags: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    #[arg(long)]
    topic: String,
    #[arg(long, default_value = "general")]
    platform: String,
    #[arg(long, default_value = "engaging")]
    tone: String,
    #[arg(long, default_value = "medium")]
    length: String,
}

#[derive(Args, Debug, Clone)]
struct TrendsArgs {
    #[arg(required = true)]
    keywords: Vec<String>,
    #[arg(long, default_value = "general")]
    platform: String,
    #[arg(long, default_value = "24h")]
    timeframe: String,
}

#[derive(Args, Debug, Clone, Default)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    web_root: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    /// Output path; defaults to --config or TRENDLENS_CONFIG_PATH.
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, path) =
        ServiceConfig::load(cli.config.clone()).map_err(|err| err.to_string())?;
    if let Some(path) = path.filter(|path| path.exists()) {
        tracing::info!("loaded config from {}", path.display());
    }

    let command = cli.command.unwrap_or(Command::Serve(ServeArgs::default()));
    match command {
        Command::Serve(args) => run_serve(config, args).await,
        Command::Predict(args) => run_predict(&build_state(&config)?, args),
        Command::Generate(args) => run_generate(&build_state(&config)?, args).await,
        Command::Trends(args) => run_trends(&build_state(&config)?, args).await,
        Command::InitConfig(args) => run_init_config(&config, cli.config, args),
    }
}

fn run_init_config(
    config: &ServiceConfig,
    config_arg: Option<PathBuf>,
    args: InitConfigArgs,
) -> Result<(), String> {
    let path = args
        .out
        .or(config_arg)
        .or_else(default_config_path)
        .ok_or_else(|| "no output path".to_string())?;
    config
        .write(&path, args.force)
        .map_err(|err| err.to_string())?;
    println!("Wrote config to {}", path.display());
    Ok(())
}

fn build_state(config: &ServiceConfig) -> Result<AppState, String> {
    AppState::from_config(config, api_key_from_env()).map_err(|err| err.to_string())
}

async fn run_serve(mut config: ServiceConfig, args: ServeArgs) -> Result<(), String> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.web_root.is_some() {
        config.server.web_root = args.web_root;
    }
    server::serve(config, api_key_from_env()).await
}

fn run_predict(state: &AppState, args: PredictArgs) -> Result<(), String> {
    let text = read_text(args.text)?;
    let sample = ContentSample::new(text, args.platform).with_hashtags(args.hashtags);
    let result = state.scoring.score(&sample);

    println!("Virality score: {}", format_float(result.score, 1));
    println!("Confidence: {}", format_float(result.confidence, 2));
    println!("Factors: {}", result.factors.join(" | "));
    if !result.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in result.recommendations {
            println!("- {}", recommendation);
        }
    }
    Ok(())
}

async fn run_generate(state: &AppState, args: GenerateArgs) -> Result<(), String> {
    let topic = args.topic.trim();
    if topic.is_empty() {
        return Err("topic is required".to_string());
    }
    let mut request = GenerationRequest::new(topic);
    request.platform = args.platform;
    request.tone = args.tone;
    request.length = args.length;

    let result = state.generator.generate(&request).await;
    if result.fallback {
        println!("(provider unavailable, showing fallback content)");
    }
    println!("{}\n", result.content);
    println!("Hashtags: {}", result.hashtags.join(" "));
    println!("Estimated engagement: {}", result.estimated_engagement);
    println!("Best time to post: {}", result.best_time);
    Ok(())
}

async fn run_trends(state: &AppState, args: TrendsArgs) -> Result<(), String> {
    let report = state
        .trends
        .analyze_keywords(&args.keywords, &args.platform, &args.timeframe)
        .await
        .map_err(|err| err.to_string())?;

    for trend in report.trends {
        println!(
            "{}: volume {} ({}) | sentiment {} | viral score {}",
            trend.keyword,
            format_number(trend.volume as u64),
            trend.growth,
            format_float(trend.sentiment, 2),
            trend.viral_score
        );
        println!("  related: {}", trend.related_trends.join(", "));
    }
    println!("Last updated: {}", report.last_updated);
    Ok(())
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing content: pass --text or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trendlens=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
