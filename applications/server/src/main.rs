/// Melodia - catalog maintenance and play history operator tool
use clap::{Parser, Subcommand};
use melodia_core::{CreateListener, CreateSong, HistoryStore, ListenerId, SongId};
use melodia_server::{config::MelodiaConfig, state::AppState};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "melodia-server")]
#[command(about = "Melodia catalog and play history maintenance", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml if present)
    #[arg(short, long, global = true, env = "MELODIA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Create a listener account
    AddListener {
        #[arg(short, long)]
        username: String,
    },
    /// Add a song to the catalog
    AddSong {
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        /// Duration in seconds
        #[arg(long)]
        duration: i64,
        #[arg(long)]
        year: i32,
        /// Blob path of the audio payload
        #[arg(long)]
        file_path: String,
    },
    /// Record that a listener played a song
    Play {
        #[arg(long)]
        listener: String,
        #[arg(long)]
        song: String,
    },
    /// Show a listener's most recent plays
    History {
        listener: String,
        /// Number of entries (defaults to history.recent_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Remove one song from a listener's history
    Forget {
        #[arg(long)]
        listener: String,
        #[arg(long)]
        song: String,
    },
    /// Empty a listener's history
    ClearHistory { listener: String },
    /// Delete a song and every reference to it
    DeleteSong { song_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "melodia_server=info,melodia_storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = MelodiaConfig::load(cli.config.as_deref())?;
    let state = AppState::connect(config).await?;

    match cli.command {
        Commands::Migrate => {
            tracing::info!("Migrations applied");
        }
        Commands::AddListener { username } => {
            let listener =
                melodia_storage::listeners::create(&state.pool, CreateListener { username })
                    .await?;
            println!("{}\t{}", listener.id, listener.username);
        }
        Commands::AddSong {
            title,
            artist,
            duration,
            year,
            file_path,
        } => {
            let song = melodia_storage::songs::create(
                &state.pool,
                CreateSong {
                    title,
                    artist_name: artist,
                    duration_seconds: duration,
                    release_year: year,
                    file_path,
                },
            )
            .await?;
            println!("{}\t{}", song.id, song.title);
        }
        Commands::Play { listener, song } => {
            state
                .history
                .append(&ListenerId::new(listener), &SongId::new(song))
                .await?;
        }
        Commands::History { listener, limit } => {
            show_history(&state, &ListenerId::new(listener), limit).await?;
        }
        Commands::Forget { listener, song } => {
            let removed = state
                .history
                .remove(&ListenerId::new(listener), &SongId::new(song))
                .await?;
            if !removed {
                println!("Song was not in the history");
            }
        }
        Commands::ClearHistory { listener } => {
            state.history.clear(&ListenerId::new(listener)).await?;
        }
        Commands::DeleteSong { song_id } => {
            let report = state
                .coordinator
                .delete_song_cascade(&SongId::new(song_id))
                .await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

async fn show_history(
    state: &AppState,
    listener: &ListenerId,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let limit = limit.unwrap_or(state.config.history.recent_limit);

    let summary = state.history.summary(listener).await?;
    if !summary.exists {
        println!("{listener} has never played anything");
        return Ok(());
    }

    let recent = state.history.recent(listener, limit).await?;
    println!(
        "{} ({} of {} songs):",
        listener,
        recent.len(),
        summary.played_count
    );

    for (position, song_id) in recent.iter().enumerate() {
        match melodia_storage::songs::get_by_id(&state.pool, song_id).await? {
            Some(song) => println!(
                "  {}. {} - {} [{}]",
                position + 1,
                song.artist_name,
                song.title,
                song.id
            ),
            None => println!("  {}. {}", position + 1, song_id),
        }
    }

    Ok(())
}
