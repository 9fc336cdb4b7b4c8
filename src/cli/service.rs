use crate::cli::AppContext;
use crate::services::UpdateOutcome;
use anyhow::{Result, bail};

pub fn start(dir: &str, service: &str, ctx: &AppContext) -> Result<()> {
    if !ctx.actions.start(dir, service) {
        bail!("Falha ao iniciar {dir}/{service}");
    }
    println!("✅ Serviço {dir}/{service} iniciado");
    Ok(())
}

pub fn stop(dir: &str, service: &str, ctx: &AppContext) -> Result<()> {
    if !ctx.actions.stop(dir, service) {
        bail!("Falha ao parar {dir}/{service}");
    }
    println!("✅ Serviço {dir}/{service} parado");
    Ok(())
}

pub fn restart(dir: &str, service: &str, ctx: &AppContext) -> Result<()> {
    if !ctx.actions.restart(dir, service) {
        bail!("Falha ao reiniciar {dir}/{service}");
    }
    println!("✅ Serviço {dir}/{service} reiniciado");
    Ok(())
}

pub fn update(dir: &str, service: &str, version: &str, ctx: &AppContext) -> Result<()> {
    match ctx.actions.update_version(dir, service, version) {
        UpdateOutcome::Updated => {
            println!("✅ Versão de {dir}/{service} atualizada para {version} e redeploy concluído");
            Ok(())
        }
        UpdateOutcome::RedeployFailed => {
            // The tag is already written; only the redeploy went wrong
            println!("⚠️  Versão atualizada para {version}, mas o redeploy falhou");
            Ok(())
        }
        UpdateOutcome::Failed => bail!("Falha ao atualizar versão de {dir}/{service}"),
    }
}
