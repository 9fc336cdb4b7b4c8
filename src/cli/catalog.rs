use crate::cli::AppContext;
use crate::domain::SearchCriteria;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct ListOptions {
    /// Filtra por diretório (substring, case-insensitive)
    #[arg(long)]
    pub dir: Option<String>,
    /// Filtra por nome de serviço
    #[arg(long)]
    pub name: Option<String>,
    /// Filtra por imagem
    #[arg(long)]
    pub image: Option<String>,
    /// Filtra por versão (tag da imagem)
    #[arg(long)]
    pub version: Option<String>,
    /// Filtra por status (resolve o status ao vivo de cada serviço)
    #[arg(long)]
    pub status: Option<String>,
    /// Emite JSON no formato da API ({services, totalServices})
    #[arg(long)]
    pub json: bool,
}

pub fn list(options: ListOptions, ctx: &AppContext) -> Result<()> {
    let criteria = SearchCriteria {
        dir: options.dir,
        name: options.name,
        image: options.image,
        version: options.version,
        status: options.status,
    };

    let catalog = ctx.catalog.list(&criteria);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if catalog.directories.is_empty() {
        println!("⚠️  Nenhum serviço encontrado");
        return Ok(());
    }

    for (key, directory) in &catalog.directories {
        println!("📦 {} ({})", key, directory.path.display());
        for (name, info) in &directory.services {
            let image = if info.image.is_empty() {
                "-"
            } else {
                info.image.as_str()
            };
            println!("- {:<20} | {:<40} | {}", name, image, info.status);
        }
    }

    println!(
        "✅ {} serviços em {} diretórios",
        catalog.total_services,
        catalog.directories.len()
    );

    Ok(())
}

pub fn status(dir: &str, service: &str, ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.catalog.status(dir, service));
    Ok(())
}
