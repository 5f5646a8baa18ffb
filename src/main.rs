use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use code_museum::client::render::{render_account, render_detail, render_list};
use code_museum::client::{
    failure_message, welcome_message, ApiClient, IdentityStore, MuseumApp, SnippetDraft,
    LOGOUT_MESSAGE, SNIPPET_ADDED_MESSAGE,
};
use code_museum::screen::{create_screen, Screen};
use code_museum::snippet::Category;
use code_museum::{Config, Database, MuseumError, WebServer};

#[derive(Parser, Debug)]
#[command(name = "museum", version, about = "Code Museum: legendary code snippets")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, short, default_value = "config.toml", env = "MUSEUM_CONFIG")]
    config: PathBuf,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the API server.
    Serve,
    /// List snippets, filtered locally by category and search term.
    List {
        /// Category to show ("All" for every category).
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive search over title, story and tags.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a snippet with its code and comments.
    Show { id: i64 },
    /// Like a snippet.
    Like { id: i64 },
    /// Comment on a snippet.
    Comment { id: i64, text: String },
    /// Post a new snippet.
    Post {
        #[arg(long)]
        title: String,
        /// Bug Fix, Elegant, Hack or Optimization.
        #[arg(long, default_value_t = Category::BugFix)]
        category: Category,
        #[arg(long, default_value = code_museum::client::DEFAULT_LANGUAGE)]
        language: String,
        #[arg(long)]
        story: String,
        /// Code text (the "after" code when --before is given).
        #[arg(long)]
        code: String,
        /// Code before the fix.
        #[arg(long, default_value = "")]
        before: String,
        /// Comma-separated tags.
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Create an account and log in.
    Signup {
        username: String,
        email: String,
        password: String,
    },
    /// Log in with email and password.
    Login { email: String, password: String },
    /// Forget the logged-in user.
    Logout,
    /// Show your snippets and totals.
    Account,
    /// Check that the server is up.
    Health,
}

/// Load the config file. Environment overrides are applied by the caller
/// once logging is initialized.
fn load_config(path: &Path) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", path.display());
            eprintln!("Using default configuration.");
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config);

    let result = match cli.command {
        Command::Serve => {
            if let Err(e) = code_museum::logging::init(&config.logging) {
                eprintln!("Failed to initialize logging: {e}");
                code_museum::logging::init_console_only(&config.logging.level);
            }
            config.apply_env_overrides();
            serve(&config).await.map_err(|e| e.to_string())
        }
        command => {
            code_museum::logging::init_client(&config.logging.level);
            config.apply_env_overrides();
            let ansi = !cli.no_color && std::io::stdout().is_terminal();
            run_client(&config, command, create_screen(ansi).as_ref()).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: &Config) -> Result<(), MuseumError> {
    config.validate()?;
    info!("Code Museum API v{}", env!("CARGO_PKG_VERSION"));

    let db = Database::connect(&config.database).await.map_err(|e| {
        error!("Database connection error: {}", e);
        e
    })?;
    info!("Connected to database");

    WebServer::new(&config.server, &config.web, db)?.run().await
}

async fn run_client(config: &Config, command: Command, screen: &dyn Screen) -> Result<(), String> {
    let api = ApiClient::new(&config.client.api_url).map_err(|e| e.to_string())?;
    let mut app = MuseumApp::new(api, IdentityStore::new(&config.client.storage_path));
    let tz = config.client.timezone.as_str();

    match command {
        Command::Serve => return Err("serve is not a client command".to_string()),
        Command::List { category, search } => {
            if !app.refresh().await {
                eprintln!("Could not reach the server; showing sample data.");
            }
            let store = app.store_mut();
            store.set_category(category.unwrap_or_default());
            store.set_search(search.unwrap_or_default());
            let store = app.store();
            print!(
                "{}",
                render_list(screen, &store.filtered_snippets(), |id| store.has_liked(id), tz)
            );
        }
        Command::Show { id } => {
            let detail = app
                .open_snippet(id)
                .await
                .map_err(|e| failure_message("open snippet", &e))?;
            let liked = app.store().has_liked(id);
            print!("{}", render_detail(screen, &detail.snippet, &detail.comments, liked, tz));
        }
        Command::Like { id } => {
            let likes = app
                .like(id)
                .await
                .map_err(|e| failure_message("like snippet", &e))?;
            println!("♥ {likes}");
        }
        Command::Comment { id, text } => {
            app.add_comment(id, &text)
                .await
                .map_err(|e| failure_message("add comment", &e))?;
            println!("Comment added.");
        }
        Command::Post {
            title,
            category,
            language,
            story,
            code,
            before,
            tags,
        } => {
            let draft = SnippetDraft {
                title,
                category,
                language,
                story,
                code,
                before,
                tags,
            };
            let snippet = app
                .create_snippet(&draft)
                .await
                .map_err(|e| failure_message("add snippet", &e))?;
            println!("{SNIPPET_ADDED_MESSAGE} (#{})", snippet.id);
        }
        Command::Signup {
            username,
            email,
            password,
        } => {
            let user = app
                .signup(&username, &email, &password)
                .await
                .map_err(|e| failure_message("sign up", &e))?;
            println!("{}", welcome_message(&user));
        }
        Command::Login { email, password } => {
            let user = app
                .login(&email, &password)
                .await
                .map_err(|e| failure_message("log in", &e))?;
            println!("{}", welcome_message(&user));
        }
        Command::Logout => {
            app.logout().map_err(|e| failure_message("log out", &e))?;
            println!("{LOGOUT_MESSAGE}");
        }
        Command::Account => {
            let Some(user) = app.current_user().cloned() else {
                return Err("Please login to view your account!".to_string());
            };
            app.refresh().await;
            if let Some(summary) = app.account_summary() {
                print!("{}", render_account(screen, &user, &summary, tz));
            }
        }
        Command::Health => {
            let health = app
                .api()
                .health()
                .await
                .map_err(|e| failure_message("reach server", &e))?;
            println!("{} ({})", health.status, health.timestamp);
        }
    }
    Ok(())
}
