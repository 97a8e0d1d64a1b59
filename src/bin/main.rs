use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{debug, error, info};
use nextcloud_upload::file_config::FileConfig;
use nextcloud_upload::upload::{
    local_file_size,
    progress::{progress_bar, progress_sink},
};
use nextcloud_upload::{Config, UploadOptions};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nextcloud-upload")]
#[command(about = "Upload files to Nextcloud public shares via WebDAV", long_about = None)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Nextcloud public share URL (e.g. https://cloud.example.com/s/TOKEN)
    #[arg(short = 'u', long, env = "NEXTCLOUD_SHARE_URL")]
    share_url: Option<String>,

    /// Path to the file to upload
    #[arg(short, long, required_unless_present = "test_connection")]
    file: Option<PathBuf>,

    /// Password for password-protected shares
    #[arg(short, long, env = "NEXTCLOUD_SHARE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Remote filename (defaults to local filename)
    #[arg(short = 'n', long)]
    remote_name: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Test connection to share without uploading
    #[arg(short, long)]
    test_connection: bool,

    /// JSON config file with `share_url` and `password`
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

async fn run(cli: Cli) -> Result<bool> {
    let file_config = FileConfig::load_with_fallback(cli.config.as_deref())?;
    let merged = FileConfig {
        share_url: cli.share_url,
        password: cli.password,
    }
    .merge_with(&file_config);

    let share_url = merged.share_url.ok_or_else(|| {
        anyhow::anyhow!(
            "No share URL given. Use --share-url, NEXTCLOUD_SHARE_URL or a config file"
        )
    })?;

    debug!("Initializing uploader for share: {share_url}");
    let config = Config::new(share_url, merged.password)?;
    let client = config.client();

    if cli.test_connection {
        info!("Testing connection to share...");
        if client.test_connection().await {
            if cli.quiet {
                eprintln!("✓ Connection successful");
            } else {
                println!("✓ Connection successful");
            }
            return Ok(true);
        }
        eprintln!("✗ Connection failed");
        return Ok(false);
    }

    let file = cli
        .file
        .ok_or_else(|| anyhow::anyhow!("No file specified for upload"))?;
    let name = display_name(&file);
    info!("Starting upload of {}", file.display());

    let mut options = UploadOptions {
        remote_name: cli.remote_name,
        progress: None,
    };

    // Progress only makes sense on an interactive terminal
    let pb = if !cli.quiet && std::io::stdout().is_terminal() {
        let pb = progress_bar(local_file_size(&file).await?, &name);
        options = options.with_progress(progress_sink(&pb));
        Some(pb)
    } else {
        None
    };

    let uploaded = client.upload(&file, options).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if uploaded? {
        if !cli.quiet {
            println!("✓ Successfully uploaded {name}");
        }
        Ok(true)
    } else {
        eprintln!("✗ Failed to upload {name}");
        Ok(false)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if !e.not_found() => debug!("Error loading .env file: {e}"),
        Err(_) => {}
    }

    match run(cli).await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{e:#}");
            eprintln!("✗ Error: {e}");
            std::process::exit(1);
        }
    }
}
