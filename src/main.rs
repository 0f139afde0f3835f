use shepherd::auth::Password;
use shepherd::config::Config;
use shepherd::error::AppError;
use shepherd::time::{resolve_with_timeout, stringify};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads one password per line from stdin and prints its bcrypt hash, or
/// the reason it was rejected.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!(
        "hashing with cost {} (timeout {})",
        config.hash_cost,
        stringify(config.hash_timeout)
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read input: {}", e)))?
    {
        let password = Password::new(line);
        if let Err(message) = password.audit() {
            println!("rejected: {}", message);
            continue;
        }

        let hashed = resolve_with_timeout(
            password.must_hash_with_cost(config.hash_cost),
            config.hash_timeout,
            Some("password hashing timed out"),
        )
        .await??;
        println!("{}", hashed);
    }

    Ok(())
}
