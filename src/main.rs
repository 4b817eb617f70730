// Copyright 2025 Webmobix Solutions AG
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUTHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


mod auth;
mod config;
mod overview;
mod planning;
mod sheets;
mod utils;

use auth::{AuthManager, CredentialSource};
use chrono::Datelike;
use clap::{Parser, ValueEnum};
use config::Config;
use overview::WeekOverviewJob;
use sheets::SheetsManager;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_env_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser)]
#[command(name = "planning-overview")]
#[command(about = "Write this week's planning as a per-person overview worksheet")]
#[command(version)]
struct Cli {
    /// Controls verbosity of log output (overrides RUST_LOG when provided)
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Configuration file (defaults to ~/.config/gspread/config.yml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(level: &LogLevel) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level.as_env_filter()))?;

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize default crypto provider for rustls
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    info!("📁 Configuration file: {}", config_path.display());

    let config = Config::load(&config_path)?;
    info!("⚙️ Config params: {:?}", config);

    let credentials_dir = match Config::default_dir() {
        Ok(dir) => dir,
        Err(_) => config_path.parent().map(PathBuf::from).unwrap_or_default(),
    };
    let source = CredentialSource::resolve(&config.credentials, &credentials_dir);
    let mut sheets_manager = SheetsManager::new(AuthManager::new(source));

    let current_week = chrono::Local::now().iso_week().week();
    WeekOverviewJob::new()
        .execute(&config, &mut sheets_manager, current_week)
        .await?;

    info!("✅ Completed");
    Ok(())
}
