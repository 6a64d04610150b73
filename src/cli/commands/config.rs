use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => {
            println!("environment:      {:?}", config.environment);
            println!("listen:           {}", config.bind_addr());
            println!("store:            {:?}", config.database.backend);
            println!("database url set: {}", config.database.url.is_some());
            println!("base path:        {}", config.api.base_path);
            println!("validate updates: {}", config.api.validate_updates);
            println!("cors origins:     {:?}", config.security.cors_origins);
            println!("token lifetime:   {}h", config.security.jwt_expiry_hours);
        }
    }

    if let Err(problem) = config.check() {
        eprintln!("warning: {}", problem);
    }
    Ok(())
}
