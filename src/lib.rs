pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod performance;
pub mod scoring;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::info;

use crate::auth::{AuthService, RegisterRequest};
use crate::cli::{Cli, Command, Credentials};
use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::domain::{CurrentUser, HistoryFilter, MatchEntryForm, ResultFilter};
use crate::scoring::SetScore;
use crate::services::console;
use crate::services::matches::MatchService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: Option<u16>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let port = port.unwrap_or(config.server.default_port);
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init(reset: bool) -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let mut conn = database::get_connection(&pool)?;
    if reset {
        database::setup::reset_database(&mut conn)
    } else {
        database::setup::init_database(&mut conn)
    }
}

pub fn handle_register(name: &str, email: &str, password: &str) -> Result<()> {
    let (config, pool) = open_database()?;
    let auth = AuthService::new(pool, config.auth);
    let user = auth.register(&RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })?;
    println!("Registered {} <{}>", user.display_name(), user.email);
    Ok(())
}

pub fn handle_record(
    credentials: &Credentials,
    opponent: &str,
    sets: [(u32, u32); 2],
    third: Option<(u32, u32)>,
) -> Result<()> {
    let (service, user) = login_for_matches(credentials)?;
    let to_set = |(own, opp): (u32, u32)| SetScore::new(own, opp);
    let form = MatchEntryForm {
        opponent_name: opponent.to_string(),
        first_set: to_set(sets[0]),
        second_set: to_set(sets[1]),
        third_set: third.map(to_set),
    };

    let stored = service.record_match(Some(&user), &form)?;
    println!("{}", console::format_match(&stored));
    Ok(())
}

pub fn handle_history(
    credentials: &Credentials,
    result: ResultFilter,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let (service, user) = login_for_matches(credentials)?;
    let filter = HistoryFilter { result, year, month };
    let history = service.history(&user, &filter)?;

    if history.is_empty() {
        println!("No matches found");
    }
    for game in &history {
        println!("{}", console::format_match(game));
    }
    Ok(())
}

pub fn handle_stats(credentials: &Credentials) -> Result<()> {
    let (service, user) = login_for_matches(credentials)?;
    let stats = service.statistics(&user)?;
    println!("{}", console::format_statistics(&stats));
    Ok(())
}

pub fn handle_chart(credentials: &Credentials) -> Result<()> {
    let (service, user) = login_for_matches(credentials)?;
    let series = service.series(&user)?;
    for line in console::format_series(&series) {
        println!("{}", line);
    }
    println!("Current score: {:+}", series.final_score());
    Ok(())
}

pub fn handle_completions(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

pub fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init { reset } => handle_init(*reset),
        Command::Register { name, email, password } => handle_register(name, email, password),
        Command::Record { credentials, opponent, first, second, third } => {
            handle_record(credentials, opponent, [*first, *second], *third)
        }
        Command::History { credentials, result, year, month } => {
            handle_history(credentials, *result, *year, *month)
        }
        Command::Stats { credentials } => handle_stats(credentials),
        Command::Chart { credentials } => handle_chart(credentials),
        Command::Completions { shell } => {
            handle_completions(*shell);
            Ok(())
        }
    }
}

fn open_database() -> Result<(AppConfig, DbPool)> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::init_database(&mut conn)?;
    drop(conn);
    Ok((config, pool))
}

fn login_for_matches(credentials: &Credentials) -> Result<(MatchService, CurrentUser)> {
    let (config, pool) = open_database()?;
    let auth = AuthService::new(pool.clone(), config.auth);
    let user = authenticate(&auth, credentials)?;
    Ok((MatchService::new(pool), user))
}

/// One-shot commands check the password without opening a bearer session
fn authenticate(auth: &AuthService, credentials: &Credentials) -> Result<CurrentUser> {
    let user = auth.verify_credentials(&credentials.email, &credentials.password)?;
    info!("Acting as {}", user.display_name());
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::AuthSettings;
    use crate::database::{create_memory_pool, setup::init_database};
    use crate::errors::{tracker_error, TrackerError};

    fn session_count(pool: &DbPool) -> i64 {
        let conn = database::get_connection(pool).unwrap();
        conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_cli_authentication_creates_no_session() {
        let pool = create_memory_pool().unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        init_database(&mut conn).unwrap();
        drop(conn);

        let auth = AuthService::new(pool.clone(), AuthSettings::default());
        auth.register(&RegisterRequest {
            name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap();

        let credentials = Credentials {
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        };
        for _ in 0..3 {
            let user = authenticate(&auth, &credentials).unwrap();
            assert_eq!(user.email, "ana@example.com");
        }
        assert_eq!(session_count(&pool), 0);

        let wrong = Credentials {
            password: "secret2".to_string(),
            ..credentials
        };
        let err = authenticate(&auth, &wrong).unwrap_err();
        assert_eq!(tracker_error(&err), Some(&TrackerError::InvalidCredentials));
    }
}
