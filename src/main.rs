use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shoot_brief_visualizer::brief::ShootBrief;
use shoot_brief_visualizer::client::GatewayClient;
use shoot_brief_visualizer::gateway::Gateway;
use shoot_brief_visualizer::models::{Config, GenerationMode, GenerationResult};
use shoot_brief_visualizer::validation::BriefValidator;
use shoot_brief_visualizer::web::{self, AppState};
use std::num::NonZeroU16;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "shoot-brief-visualizer")]
#[command(about = "Turn a shoot brief into an AI-generated frame")]
struct CliArgs {
    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in a shoot brief on the command line and send it to a running server.
    Brief(BriefArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Listen address.
    #[arg(long, default_value = "127.0.0.1", env = "VISUALIZER_LISTEN_ADDRESS")]
    listen_address: String,

    /// Listen port.
    #[arg(long, short, default_value = "3000", env = "VISUALIZER_PORT")]
    port: NonZeroU16,
}

#[derive(Debug, Args)]
struct BriefArgs {
    /// Main subject or action of the shot.
    main_prompt: String,

    /// Base URL of the server exposing /api/generateFrame.
    #[arg(
        long,
        default_value = "http://127.0.0.1:3000",
        env = "VISUALIZER_SERVER_URL"
    )]
    server_url: String,

    /// Generation mode: image or text. Defaults to the server's mode.
    #[arg(long, value_parser = parse_mode_arg)]
    mode: Option<GenerationMode>,

    /// Skip the filming-topic keyword check.
    #[arg(long)]
    no_topic_check: bool,

    #[arg(long)]
    project_type: Option<String>,
    #[arg(long)]
    video_theme: Option<String>,
    #[arg(long)]
    video_tone: Option<String>,
    #[arg(long)]
    color_palette: Option<String>,
    #[arg(long)]
    lighting_style: Option<String>,
    #[arg(long)]
    camera_angles: Option<String>,
    #[arg(long)]
    composition: Option<String>,
    #[arg(long)]
    mood_atmosphere: Option<String>,
    #[arg(long)]
    camera_movement: Option<String>,
    #[arg(long)]
    setting_details: Option<String>,
    #[arg(long)]
    participants: Option<String>,
    #[arg(long)]
    wardrobe: Option<String>,
    #[arg(long)]
    hair_makeup: Option<String>,
    #[arg(long)]
    backgrounds: Option<String>,
}

impl BriefArgs {
    fn to_brief(&self) -> ShootBrief {
        ShootBrief {
            main_prompt: self.main_prompt.clone(),
            project_type: self.project_type.clone(),
            video_theme: self.video_theme.clone(),
            video_tone: self.video_tone.clone(),
            color_palette: self.color_palette.clone(),
            lighting_style: self.lighting_style.clone(),
            camera_angles: self.camera_angles.clone(),
            composition: self.composition.clone(),
            mood_atmosphere: self.mood_atmosphere.clone(),
            camera_movement: self.camera_movement.clone(),
            setting_details: self.setting_details.clone(),
            participants: self.participants.clone(),
            wardrobe: self.wardrobe.clone(),
            hair_makeup: self.hair_makeup.clone(),
            backgrounds: self.backgrounds.clone(),
        }
    }
}

fn parse_mode_arg(input: &str) -> std::result::Result<GenerationMode, String> {
    input.parse().map_err(|_| {
        format!(
            "Invalid mode '{}'. Expected one of: image, text",
            input
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shoot_brief_visualizer=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    match args.command {
        Some(Command::Brief(brief_args)) => run_brief(brief_args).await,
        None => run_server(args.serve).await,
    }
}

async fn run_server(args: ServeArgs) -> Result<()> {
    info!("Starting shoot-brief-visualizer");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        mode = %config.generation_mode,
        topic_check = config.topic_check,
        "Loaded configuration"
    );

    let state = AppState::new(
        Gateway::from_config(&config),
        BriefValidator::new(config.topic_check),
    );

    if let Err(e) = web::setup_server(&args.listen_address, args.port, state).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run_brief(args: BriefArgs) -> Result<()> {
    let validator = BriefValidator::new(!args.no_topic_check);
    let brief = args.to_brief();

    if let Err(e) = validator.validate(&brief.main_prompt) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let prompt = brief.prompt();
    info!("Generated prompt ({} chars)", prompt.len());

    let client = GatewayClient::new(args.server_url.clone());
    match client.generate_frame(&prompt, args.mode).await {
        Ok(GenerationResult::Image { image_url }) => println!("{}", image_url),
        Ok(GenerationResult::Text { result }) => println!("{}", result),
        Err(e) => {
            error!("Generation failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
