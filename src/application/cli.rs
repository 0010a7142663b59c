#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::AnalysisResult;
use crate::domain::models::ApiBox;
use crate::domain::models::ApiError;
use crate::domain::models::AuthKind;
use crate::domain::models::Author;
use crate::domain::models::ChatMessage;
use crate::domain::models::ConversationSummary;
use crate::domain::models::LoginRequest;
use crate::domain::models::RegisterRequest;
use crate::domain::models::Route;
use crate::domain::models::ScoreBand;
use crate::domain::models::Session;
use crate::domain::services::RouteGuard;
use crate::domain::services::SessionStore;
use crate::domain::services::Themes;
use crate::domain::services::ANALYZER_FALLBACK_ERROR;
use crate::domain::services::ANALYZER_MISSING_INPUT;
use crate::infrastructure::api::ApiManager;

pub const LOGIN_REQUIRED: &str =
    "You must be logged in. Run `career-agent login` or `career-agent guest` first.";

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
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

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Applies the same rule as the route guard to CLI commands that need a
/// session, returning the token to send.
pub fn require_token(session: &Session) -> Result<String> {
    if !RouteGuard::permits(&Route::Dashboard, session) {
        bail!(LOGIN_REQUIRED);
    }

    return session
        .token()
        .map(String::from)
        .ok_or_else(|| return anyhow!(LOGIN_REQUIRED));
}

fn api_failure(err: ApiError, fallback: &str) -> anyhow::Error {
    return anyhow!(err.user_message(fallback));
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        return "yes";
    }

    return "no";
}

pub fn format_status(session: &Session, session_file: &path::Path) -> String {
    return [
        format!("Authenticated: {}", yes_no(session.is_authenticated())),
        format!("Guest: {}", yes_no(session.is_guest())),
        format!("Session file: {}", session_file.to_string_lossy()),
    ]
    .join("\n");
}

pub fn format_conversations(conversations: &[ConversationSummary]) -> String {
    if conversations.is_empty() {
        return "There are no conversations yet. Start one with `career-agent tui`.".to_string();
    }

    return conversations
        .iter()
        .map(|conversation| {
            return format!("- (ID: {}) {}", conversation.id, conversation.title);
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn format_history(history: &[ChatMessage]) -> String {
    return history
        .iter()
        .map(|message| {
            return format!("{}:\n{}", Author::from(message.role), message.text());
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}

pub fn format_analysis(result: &AnalysisResult) -> String {
    let band = match result.band() {
        ScoreBand::Strong => "strong match",
        ScoreBand::Fair => "fair match",
        ScoreBand::Weak => "weak match",
    };

    let mut lines = vec![
        format!("Match Score: {}% ({band})", result.score_percent()),
        "".to_string(),
        "Key Strengths".to_string(),
        result.strengths.to_string(),
        "".to_string(),
        "Areas for Improvement".to_string(),
    ];

    for (idx, improvement) in result.improvements.iter().enumerate() {
        lines.push(format!("{}. {improvement}", idx + 1));
    }

    return lines.join("\n");
}

fn prompt_password(matches: &ArgMatches) -> Result<String> {
    if let Some(password) = matches.get_one::<String>("password") {
        return Ok(password.to_string());
    }

    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    return Ok(password);
}

fn required_arg(matches: &ArgMatches, name: &str) -> Result<String> {
    let value = matches
        .get_one::<String>(name)
        .map(|value| return value.trim().to_string())
        .unwrap_or_default();

    if value.is_empty() {
        bail!("Please fill in all required fields.");
    }

    return Ok(value);
}

async fn store_token(kind: AuthKind, token: String) -> Result<()> {
    let mut store = load_store().await;
    store.set_token(Some(token)).await?;

    if !store.session().is_authenticated() {
        bail!(kind.fallback_message());
    }

    let mut account = "account";
    if store.session().is_guest() {
        account = "guest account";
    }
    println!(
        "{}",
        Paint::green(format!("Logged in with a {account}. Session saved to {}", store.file_path().to_string_lossy()))
    );

    return Ok(());
}

async fn load_store() -> SessionStore {
    return SessionStore::load(path::PathBuf::from(Config::get(ConfigKey::SessionFile))).await;
}

async fn run_command(api: &ApiBox, name: &str, matches: &ArgMatches) -> Result<()> {
    match name {
        "login" => {
            let req = LoginRequest {
                email: required_arg(matches, "email")?,
                password: prompt_password(matches)?,
            };
            let token = api
                .login(&req)
                .await
                .map_err(|err| return api_failure(err, AuthKind::Login.fallback_message()))?;
            store_token(AuthKind::Login, token).await?;
        }
        "register" => {
            let req = RegisterRequest {
                name: required_arg(matches, "name")?,
                email: required_arg(matches, "email")?,
                password: prompt_password(matches)?,
            };
            let token = api
                .register(&req)
                .await
                .map_err(|err| return api_failure(err, AuthKind::Register.fallback_message()))?;
            store_token(AuthKind::Register, token).await?;
        }
        "guest" => {
            let token = api
                .guest_login()
                .await
                .map_err(|err| return api_failure(err, AuthKind::Guest.fallback_message()))?;
            store_token(AuthKind::Guest, token).await?;
        }
        "logout" => {
            load_store().await.logout().await?;
            println!("Logged out.");
        }
        "status" => {
            let store = load_store().await;
            println!("{}", format_status(store.session(), store.file_path()));
        }
        "conversations" => {
            let token = require_token(load_store().await.session())?;
            match matches.subcommand() {
                Some(("list", _)) => {
                    let conversations = api
                        .list_conversations(&token)
                        .await
                        .map_err(|err| return api_failure(err, "Failed to fetch conversations."))?;
                    println!("{}", format_conversations(&conversations));
                }
                Some(("show", show_matches)) => {
                    let id = required_arg(show_matches, "id")?;
                    let history = api
                        .get_conversation(&token, &id)
                        .await
                        .map_err(|err| return api_failure(err, "Failed to load conversation."))?;
                    println!("{}", format_history(&history));
                }
                _ => {
                    subcommand_conversations().print_long_help()?;
                }
            }
        }
        "analyze" => {
            let token = require_token(load_store().await.session())?;
            let resume_path = required_arg(matches, "resume")?;
            let job_path = required_arg(matches, "job")?;

            let req = AnalysisRequest {
                resume_text: fs::read_to_string(&resume_path)
                    .await
                    .with_context(|| return format!("Failed to read {resume_path}"))?,
                job_description_text: fs::read_to_string(&job_path)
                    .await
                    .with_context(|| return format!("Failed to read {job_path}"))?,
            };
            if req.resume_text.trim().is_empty() || req.job_description_text.trim().is_empty() {
                bail!(ANALYZER_MISSING_INPUT);
            }

            let result = api
                .analyze(&token, &req)
                .await
                .map_err(|err| return api_failure(err, ANALYZER_FALLBACK_ERROR))?;
            println!("{}", format_analysis(&result));
        }
        _ => {
            build().print_long_help()?;
        }
    }

    return Ok(());
}

fn arg_password() -> Arg {
    return Arg::new("password")
        .short('p')
        .long("password")
        .env("CAREER_AGENT_PASSWORD")
        .hide_env_values(true)
        .num_args(1)
        .help("Account password. Prompted for when omitted.");
}

fn arg_email() -> Arg {
    return Arg::new("email")
        .short('e')
        .long("email")
        .num_args(1)
        .required(true)
        .help("Account email address.");
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

fn subcommand_conversations() -> Command {
    return Command::new("conversations")
        .about("Browse saved conversations with the career coach.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List all conversations with their ids and titles."))
        .subcommand(
            Command::new("show")
                .about("Print the full history of a conversation.")
                .arg(
                    clap::Arg::new("id")
                        .short('i')
                        .long("id")
                        .help("Conversation ID")
                        .num_args(1)
                        .required(true),
                ),
        );
}

fn subcommand_analyze() -> Command {
    return Command::new("analyze")
        .about("Scores a resume against a job description.")
        .arg(
            Arg::new("resume")
                .short('r')
                .long("resume")
                .num_args(1)
                .required(true)
                .help("Path to a plain text resume."),
        )
        .arg(
            Arg::new("job")
                .short('j')
                .long("job")
                .num_args(1)
                .required(true)
                .help("Path to a plain text job description."),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    let hotkeys = [
        "HOTKEYS:",
        "  F1..F5 - Navigation bar links, in the order shown.",
        "  TAB - Next field. On the chat screen, switches between the input and the chat list.",
        "  ENTER - Submit. Adds a new line in the analyzer.",
        "  CTRL+S - Run the resume analysis.",
        "  CTRL+N - Start a new chat.",
        "  CTRL+R - Show or hide passwords. Reloads the chat list on the chat screen.",
        "  CTRL+G - Continue as guest from the login screen.",
        "  CTRL+U / CTRL+D - Page up and down.",
        "  CTRL+C - Exit.",
    ]
    .join("\n");

    return Command::new("career-agent")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys)
        .arg_required_else_help(false)
        .subcommand(Command::new("tui").about("Start the terminal UI. This is the default."))
        .subcommand(
            Command::new("login")
                .about("Log in with an email and password.")
                .arg(arg_email())
                .arg(arg_password()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and log in.")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .num_args(1)
                        .required(true)
                        .help("Display name."),
                )
                .arg(arg_email())
                .arg(arg_password()),
        )
        .subcommand(Command::new("guest").about("Log in with a temporary guest account."))
        .subcommand(Command::new("logout").about("Clear the stored session."))
        .subcommand(Command::new("status").about("Print the current session state."))
        .subcommand(subcommand_conversations())
        .subcommand(subcommand_analyze())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .short('u')
                .long(ConfigKey::ApiURL.to_string())
                .env("CAREER_AGENT_API_URL")
                .num_args(1)
                .help(format!(
                    "Career Agent API base URL. [default: {}]",
                    Config::default(ConfigKey::ApiURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("CAREER_AGENT_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SessionFile.to_string())
                .long(ConfigKey::SessionFile.to_string())
                .env("CAREER_AGENT_SESSION_FILE")
                .num_args(1)
                .help(format!(
                    "Where the login session is stored. [default: {}]",
                    Config::default(ConfigKey::SessionFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Theme.to_string())
                .short('t')
                .long(ConfigKey::Theme.to_string())
                .env("CAREER_AGENT_THEME")
                .num_args(1)
                .help(format!(
                    "Sets code syntax highlighting theme. [default: {}]",
                    Config::default(ConfigKey::Theme)
                ))
                .value_parser(PossibleValuesParser::new(Themes::list()))
                .global(true),
        );
}

/// Returns true when the terminal UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
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
        Some(("tui", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some((name, subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            run_command(&ApiManager::get(), name, subcmd_matches).await?;
            return Ok(false);
        }
        None => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
