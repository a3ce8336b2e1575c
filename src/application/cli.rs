use std::env;
use std::io;

use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use yansi::Paint;

use crate::config::Config;
use crate::config::ConfigKey;
use crate::infrastructure::relay::server;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn hotkeys_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Submit your message.
- Up arrow - Scroll up.
- Down arrow - Scroll down.
- CTRL+U - Page up.
- CTRL+D - Page down.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start a new chat session in the terminal.");
}

fn subcommand_serve() -> Command {
    return Command::new("serve").about("Start the relay server for the chat API.");
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

pub fn build() -> Command {
    let hotkeys = hotkeys_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("aura")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_serve())
        .arg(
            Arg::new(ConfigKey::GeminiAPIKey.to_string())
                .long(ConfigKey::GeminiAPIKey.to_string())
                .env("GEMINI_API_KEY")
                .num_args(1)
                .help("API key used by the relay server to authenticate against the Gemini API.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("AURA_GEMINI_URL")
                .num_args(1)
                .help(format!(
                    "Gemini API URL. Can be swapped to a compatible proxy. [default: {}]",
                    Config::default(ConfigKey::GeminiURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ListenAddress.to_string())
                .long(ConfigKey::ListenAddress.to_string())
                .env("AURA_LISTEN_ADDRESS")
                .num_args(1)
                .help(format!(
                    "Address the relay server binds to. [default: {}]",
                    Config::default(ConfigKey::ListenAddress)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .short('m')
                .long(ConfigKey::Model.to_string())
                .env("AURA_MODEL")
                .num_args(1)
                .help(format!(
                    "The Gemini model used to generate responses. [default: {}]",
                    Config::default(ConfigKey::Model)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RelayURL.to_string())
                .long(ConfigKey::RelayURL.to_string())
                .env("AURA_RELAY_URL")
                .num_args(1)
                .help(format!(
                    "Relay server URL the chat client sends prompts to. [default: {}]",
                    Config::default(ConfigKey::RelayURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("AURA_USERNAME")
                .num_args(1)
                .help(format!(
                    "Username to display on your chat bubbles. [default: {}]",
                    Config::default(ConfigKey::Username)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("serve", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]);

            if !env::var("RUST_LOG")
                .unwrap_or_else(|_| return "".to_string())
                .contains("aura")
            {
                tracing_subscriber::fmt()
                    .with_max_level(tracing::Level::DEBUG)
                    .init();
            }

            server::start().await?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]);
        }
    }

    return Ok(true);
}
