//! Pattern generation command

use anyhow::{Context, Result};
use stitch_check::ConsistencyChecker;
use stitch_gen::{create_provider, run_job, GenerateRequest, ProviderStatus};
use stitch_schema::Mode;

use super::validate::load_config;

pub struct GenerateArgs {
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub mode: Mode,
    pub provider: Option<String>,
    pub config: Option<String>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let checker = ConsistencyChecker::new(config.check_config()?);

    let provider_name = args
        .provider
        .as_deref()
        .unwrap_or_else(|| config.default_provider());
    let provider = create_provider(provider_name, &config)?;

    if let ProviderStatus::Unavailable(reason) = provider.health_check()? {
        anyhow::bail!("Provider '{}' is unavailable: {}", provider_name, reason);
    }

    let request = match (&args.image, &args.image_url) {
        (Some(path), _) => {
            let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
            GenerateRequest::from_bytes(&bytes, args.mode)?
        }
        (None, Some(url)) => GenerateRequest::from_url(url, args.mode)?,
        (None, None) => anyhow::bail!("No image provided. Pass --image or --image-url"),
    };

    tracing::info!(provider = provider_name, "starting generation");
    let outcome = run_job(provider.as_ref(), &request, &checker)
        .with_context(|| format!("Generation via '{}' failed", provider_name))?;

    for warning in &outcome.validation.warnings {
        eprintln!("  [WARN ] {}", warning);
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
