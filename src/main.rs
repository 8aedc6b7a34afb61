use anyhow::Result;
use clap::Parser;
use serenity_cards::app::App;
use serenity_cards::models::{Config, Scope};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "serenity-cards")]
#[command(about = "Generate reflective holiday cards from a mood")]
struct CliArgs {
    /// Free-text mood, e.g. "Peaceful evening by the fire".
    #[arg(short, long, conflicts_with = "preset")]
    mood: Option<String>,

    /// Preset mood by number (1-5) or name.
    #[arg(short, long)]
    preset: Option<String>,

    /// What to generate.
    #[arg(short, long, value_enum, default_value_t = Scope::All)]
    scope: Scope,

    /// Copy the quote and caption to the clipboard afterwards.
    #[arg(long)]
    copy: bool,

    /// Start an interactive session (the default when no mood is given).
    #[arg(short, long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "serenity_cards=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting serenity-cards");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(&config);

    if let Some(mood) = &args.mood {
        app.input_mut().type_mood(mood.clone());
    }
    if let Some(preset) = &args.preset {
        if let Err(e) = app.input_mut().select_preset(preset) {
            error!("{}", e);
            std::process::exit(1);
        }
    }

    let mut stdout = tokio::io::stdout();
    let one_shot = (args.mood.is_some() || args.preset.is_some()) && !args.interactive;

    if one_shot {
        app.run_once(args.scope, args.copy, &mut stdout).await?;
    } else {
        let stdin = BufReader::new(tokio::io::stdin());
        app.run_interactive(stdin, &mut stdout).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_all_scope() {
        let args = CliArgs::try_parse_from(["serenity-cards", "--preset", "2"]).unwrap();
        assert_eq!(args.scope, Scope::All);
        assert_eq!(args.preset.as_deref(), Some("2"));
        assert!(!args.copy);
    }

    #[test]
    fn test_cli_parses_scope() {
        let args =
            CliArgs::try_parse_from(["serenity-cards", "-m", "Quiet", "--scope", "image"]).unwrap();
        assert_eq!(args.scope, Scope::Image);
    }

    #[test]
    fn test_cli_rejects_mood_and_preset_together() {
        let err = CliArgs::try_parse_from(["serenity-cards", "-m", "Quiet", "-p", "1"]);
        assert!(err.is_err());
    }
}
