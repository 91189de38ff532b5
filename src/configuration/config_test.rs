use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;
use crate::domain::models::Language;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # Where exported flashcards are written.
    export-path = "flashcards.json"

    # Language the flashcards are written in. [possible values: english, spanish, french, german, italian]
    language = "english"

    # Number of flashcards to generate, between 1 and 20.
    num-flashcards = 5

    # Password exchanged with --username for a bearer token at startup.
    # password = ""

    # Flashcard generation service URL.
    service-url = "http://127.0.0.1:8000"

    # Bearer token sent to the generation service. Skips the login screen.
    # token = ""

    # Username exchanged with --password for a bearer token at startup.
    # username = ""
    "###);
}

// The config store is process global, so every load runs inside one test.
#[tokio::test]
async fn it_loads_config_in_layers() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["flashdeck", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::ServiceURL), "http://127.0.0.1:8000");
    assert_eq!(Config::num_flashcards()?, 5);
    assert_eq!(Config::language()?, Language::English);

    let matches = cli::build().try_get_matches_from(vec![
        "flashdeck",
        "-c",
        "./config.example.toml",
        "-l",
        "french",
        "-n",
        "12",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::language()?, Language::French);
    assert_eq!(Config::num_flashcards()?, 12);

    Config::set(ConfigKey::NumFlashcards, "lots");
    assert!(Config::num_flashcards().is_err());

    let matches =
        cli::build().try_get_matches_from(vec!["flashdeck", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());

    return Ok(());
}
