use chrono::Local;
use clap::Parser;
use snuintern_applicant::app::commands::{render_form, show_bookmarks, show_me};
use snuintern_applicant::app::{save_profile, ProfileEdits};
use snuintern_applicant::config::cli::{Cli, Command, ProfileCommand};
use snuintern_applicant::config::toml_config::TomlConfig;
use snuintern_applicant::utils::error::{ApplicantError, ErrorSeverity};
use snuintern_applicant::utils::{logger, validation::Validate};
use snuintern_applicant::{ClientConfig, HttpProfileService, ProfileForm};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Client config: {:?}", config);

    let service = HttpProfileService::new(&config);
    let today = Local::now().date_naive();

    match cli.command {
        Command::Profile(ProfileCommand::Show) => {
            let mut form = ProfileForm::new();
            form.load(&service).await;
            print!("{}", render_form(&form));
        }
        Command::Profile(ProfileCommand::Save(args)) => {
            let edits = ProfileEdits {
                enroll_year: args.enroll_year,
                departments: args.departments,
                cv: args.cv,
                clear_cv: args.clear_cv,
            };
            match save_profile(&service, &edits, today).await {
                Ok(update) => {
                    tracing::info!("✅ Profile stored with CV key {}", update.cv_key);
                    println!("✅ Profile saved successfully!");
                }
                Err(e) => exit_with(e),
            }
        }
        Command::Bookmarks => {
            print!("{}", show_bookmarks(&service, today).await);
        }
        Command::Me => {
            print!("{}", show_me(&service).await);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig, ApplicantError> {
    let base = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            ClientConfig::from(file)
        }
        None => ClientConfig::default(),
    };

    let config = base.with_overrides(cli.base_url.clone(), cli.token.clone(), cli.timeout_seconds);
    config.validate()?;
    Ok(config)
}

fn exit_with(e: ApplicantError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 3,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 4,
    };
    std::process::exit(exit_code);
}
