use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::ui::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Document;
use crate::domain::models::Language;
use crate::domain::services::preview_text;
use crate::domain::services::validate;
use crate::domain::services::ExportOutcome;
use crate::domain::services::SessionStore;
use crate::domain::services::Uploader;
use crate::infrastructure::auth::AuthClient;
use crate::infrastructure::generators::HttpGenerator;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("FLASHDECK_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("flashdeck");
}

fn required_file() -> Result<path::PathBuf> {
    let file = Config::get(ConfigKey::File);
    if file.is_empty() {
        bail!("A document is required. Pass one with --file.");
    }

    return Ok(path::PathBuf::from(file));
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn generate_flashcards() -> Result<()> {
    let file = required_file()?;

    let session = SessionStore::from_config().await?;
    if !session.current_user().is_authenticated() {
        bail!("You must be logged in. Pass --token, or --username and --password.");
    }

    let mut uploader = Uploader::new(Config::language()?, Config::num_flashcards()?);
    uploader.select(Document::from_path(&file).await?)?;

    let generator = HttpGenerator::default();
    let cards = uploader
        .generate(&generator, session.current_user())
        .await?;

    let export_path = path::PathBuf::from(Config::get(ConfigKey::ExportPath));
    match uploader.export(&export_path).await? {
        ExportOutcome::Written(path) => {
            println!(
                "{}",
                Paint::green(format!(
                    "Generated {} flashcards, saved to {}",
                    cards.len(),
                    path.to_string_lossy()
                ))
            );
        }
        ExportOutcome::Empty => {
            println!(
                "{}",
                Paint::yellow("The service returned no flashcards. Nothing was saved.")
            );
        }
    }

    return Ok(());
}

async fn print_preview() -> Result<()> {
    let document = Document::from_path(&required_file()?).await?;
    validate(&document)?;

    let preview = preview_text(&document);
    if preview.is_empty() {
        println!("No preview available for {} documents.", document.mime);
    } else {
        println!("{preview}");
    }

    return Ok(());
}

async fn print_login_token() -> Result<()> {
    let username = Config::get(ConfigKey::Username);
    let password = Config::get(ConfigKey::Password);
    if username.is_empty() || password.is_empty() {
        bail!("Both --username and --password are required to log in.");
    }

    let token = AuthClient::default().login(&username, &password).await?;
    println!("{token}");

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Flashdeck")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Flashdeck with environment variable RUST_LOG=flashdeck")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

pub fn build() -> Command {
    let key_bindings = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.ends_with("SCREEN:") {
                return Paint::new(line.to_string()).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown")
    );

    return Command::new("flashdeck")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(key_bindings)
        .arg_required_else_help(false)
        .subcommand(Command::new("study").about("Log in, upload a document and study the generated flashcards. This is the default command."))
        .subcommand(Command::new("generate").about("Generate flashcards from --file without the terminal UI and save them to --export-path."))
        .subcommand(Command::new("preview").about("Print the text preview of --file."))
        .subcommand(Command::new("login").about("Exchange --username and --password for a bearer token and print it."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("FLASHDECK_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::File.to_string())
                .short('f')
                .long(ConfigKey::File.to_string())
                .num_args(1)
                .help("PDF or plain text document to generate flashcards from.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ServiceURL.to_string())
                .long(ConfigKey::ServiceURL.to_string())
                .env("FLASHDECK_SERVICE_URL")
                .num_args(1)
                .help(format!("Flashcard generation service URL. [default: {}]", Config::default(ConfigKey::ServiceURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Language.to_string())
                .short('l')
                .long(ConfigKey::Language.to_string())
                .env("FLASHDECK_LANGUAGE")
                .num_args(1)
                .help(format!("Language the flashcards are written in. [default: {}]", Config::default(ConfigKey::Language)))
                .value_parser(PossibleValuesParser::new(Language::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::NumFlashcards.to_string())
                .short('n')
                .long(ConfigKey::NumFlashcards.to_string())
                .env("FLASHDECK_NUM_FLASHCARDS")
                .num_args(1)
                .help(format!("Number of flashcards to generate, between 1 and 20. [default: {}]", Config::default(ConfigKey::NumFlashcards)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ExportPath.to_string())
                .short('o')
                .long(ConfigKey::ExportPath.to_string())
                .env("FLASHDECK_EXPORT_PATH")
                .num_args(1)
                .help(format!("Where exported flashcards are written. [default: {}]", Config::default(ConfigKey::ExportPath)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Token.to_string())
                .long(ConfigKey::Token.to_string())
                .env("FLASHDECK_TOKEN")
                .num_args(1)
                .help("Bearer token sent to the generation service. Skips the login screen.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("FLASHDECK_USERNAME")
                .num_args(1)
                .help("Username exchanged with --password for a bearer token at startup.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Password.to_string())
                .long(ConfigKey::Password.to_string())
                .env("FLASHDECK_PASSWORD")
                .num_args(1)
                .help("Password exchanged with --username for a bearer token at startup.")
                .global(true),
        );
}

/// Returns true when the terminal UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("generate", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            generate_flashcards().await?;
            return Ok(false);
        }
        Some(("preview", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_preview().await?;
            return Ok(false);
        }
        Some(("login", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_login_token().await?;
            return Ok(false);
        }
        Some(("study", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
