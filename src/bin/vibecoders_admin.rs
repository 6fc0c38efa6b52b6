//! Operator CLI for the VibeCoders database.
//!
//! Usage:
//!   cargo run --bin vibecoders-admin -- migrate
//!   cargo run --bin vibecoders-admin -- promote --username <name>
//!   cargo run --bin vibecoders-admin -- demote --username <name>
//!   cargo run --bin vibecoders-admin -- list
//!   cargo run --bin vibecoders-admin -- check

use std::env;

use vibecoders_lib::config::Config;
use vibecoders_lib::db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    match command {
        "migrate" => migrate(&config).await,
        "promote" => {
            let pool = open(&config).await;
            set_admin(&pool, &parse_username_arg(&args), true).await;
        }
        "demote" => {
            let pool = open(&config).await;
            set_admin(&pool, &parse_username_arg(&args), false).await;
        }
        "list" | "ls" => {
            let pool = open(&config).await;
            list_users(&pool).await;
        }
        "check" => {
            let pool = open(&config).await;
            check(&pool).await;
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

async fn open(config: &Config) -> DbPool {
    match DbPool::new(config).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            eprintln!("Run `vibecoders-admin migrate` to create it.");
            std::process::exit(1);
        }
    }
}

fn parse_username_arg(args: &[String]) -> String {
    let mut i = 2;
    while i < args.len() {
        if (args[i] == "--username" || args[i] == "-u") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
        i += 1;
    }
    eprintln!("Error: --username is required");
    std::process::exit(1);
}

async fn migrate(config: &Config) {
    let pool = match DbPool::connect(&config.database_url(true), 1).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error running migrations: {}", e);
        std::process::exit(1);
    }
    println!("Schema is up to date at {}.", config.database_path.display());
}

/// Exit non-zero unless the database answers and carries the schema.
/// Suitable as a container health command.
async fn check(pool: &DbPool) {
    if let Err(e) = pool.ping().await {
        eprintln!("Database unreachable: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = pool.check_schema().await {
        eprintln!("Schema missing: {}", e);
        eprintln!("Run `vibecoders-admin migrate` to create it.");
        std::process::exit(1);
    }
    println!("OK");
}

async fn set_admin(pool: &DbPool, username: &str, is_admin: bool) {
    let verb = if is_admin { "promoted" } else { "demoted" };
    match pool.set_admin(username, is_admin).await {
        Ok(true) => println!("User {} {}.", username, verb),
        Ok(false) => {
            eprintln!("User {} not found.", username);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error updating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn list_users(pool: &DbPool) {
    let users = match pool.all_users().await {
        Ok(u) => u,
        Err(e) => {
            eprintln!("Error listing users: {}", e);
            std::process::exit(1);
        }
    };

    if users.is_empty() {
        println!("No users found.");
        return;
    }

    println!();
    println!("{:<6} {:<24} {:<26} {:<6}", "ID", "USERNAME", "CREATED", "ADMIN");
    println!("{}", "-".repeat(64));

    for user in users {
        let username = if user.username.chars().count() > 22 {
            format!("{}...", user.username.chars().take(19).collect::<String>())
        } else {
            user.username.clone()
        };
        println!(
            "{:<6} {:<24} {:<26} {:<6}",
            user.id,
            username,
            user.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            if user.is_admin { "yes" } else { "no" }
        );
    }
    println!();
}

fn print_usage() {
    println!("VibeCoders database administration");
    println!();
    println!("Usage: vibecoders-admin <command> [options]");
    println!();
    println!("Commands:");
    println!("  migrate                      Create or upgrade the schema");
    println!("  promote --username <name>    Grant administrator rights");
    println!("  demote --username <name>     Revoke administrator rights");
    println!("  list                         List all users");
    println!("  check                        Verify the database is reachable and migrated");
    println!("  help                         Show this help");
    println!();
    println!("Environment:");
    println!("  VC_DATABASE_PATH             SQLite file (default: ./vibecoders.db)");
}
