use crate::cli::AppContext;
use crate::infra::discovery::COMPOSE_FILE_NAME;
use anyhow::Result;

pub fn run(ctx: &AppContext) -> Result<()> {
    println!("🔍 Checando dependências e diretórios base...");

    if ctx.runtime.is_available() {
        println!("✅ docker-compose disponível");
    } else {
        println!("⚠️  docker-compose não encontrado no PATH");
    }

    for base in ctx.discovery.base_paths() {
        if base.is_dir() {
            println!("✅ Diretório base: {:?}", base);
        } else {
            println!("⚠️  Diretório base ausente: {:?}", base);
        }
    }

    let found = ctx.discovery.discover().len();
    println!("📦 {} diretórios com {}", found, COMPOSE_FILE_NAME);

    Ok(())
}
