use anyhow::Result;
use clap::{Parser, Subcommand};
use composeman::cli::{self, AppContext, ListOptions};
use composeman::infra::config::DEFAULT_BASE_PATHS;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "composeman",
    about = "Painel de stacks docker-compose descobertas em disco"
)]
struct Cli {
    /// Diretórios base com stacks docker-compose (separados por vírgula)
    #[arg(long, env = "COMPOSEMAN_BASE_PATHS", default_value = DEFAULT_BASE_PATHS)]
    base_paths: String,

    /// Timeout em segundos para comandos docker-compose
    #[arg(long, env = "COMPOSEMAN_COMMAND_TIMEOUT", default_value_t = 300)]
    command_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lista serviços descobertos, com filtros opcionais
    List(ListOptions),
    /// Consulta o status ao vivo de um serviço
    Status { dir: String, service: String },
    /// Sobe um serviço (up -d)
    Start { dir: String, service: String },
    /// Para um serviço
    Stop { dir: String, service: String },
    /// Reinicia um serviço
    Restart { dir: String, service: String },
    /// Atualiza a tag de imagem e redeploya o serviço
    Update {
        dir: String,
        service: String,
        version: String,
    },
    /// Checa dependências e diretórios base
    Doctor,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli.base_paths, Duration::from_secs(cli.command_timeout));

    match cli.command {
        Commands::List(options) => cli::catalog::list(options, &ctx),
        Commands::Status { dir, service } => cli::catalog::status(&dir, &service, &ctx),
        Commands::Start { dir, service } => cli::service::start(&dir, &service, &ctx),
        Commands::Stop { dir, service } => cli::service::stop(&dir, &service, &ctx),
        Commands::Restart { dir, service } => cli::service::restart(&dir, &service, &ctx),
        Commands::Update {
            dir,
            service,
            version,
        } => cli::service::update(&dir, &service, &version, &ctx),
        Commands::Doctor => cli::doctor::run(&ctx),
    }
}
