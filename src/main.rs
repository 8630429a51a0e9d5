// src/main.rs
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chiv2_browser_client::config::Config;
use chiv2_browser_client::BrowserClient;
use env_logger::Env;
use log::{error, info, warn};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    dotenv::dotenv().ok();
    let config = Config::from_env();
    let client = BrowserClient::new();

    let listing = config.listing();
    info!(
        "Registering \"{}\" (game port {}) with {}",
        listing.name, listing.ports.game, config.address
    );

    let registration = match client.register(&config.address, &listing).await {
        Ok(registration) => registration,
        Err(e) => {
            error!("Failed to register with {}: {}", config.address, e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to register: {}", e),
            ));
        }
    };

    info!(
        "Registered as {} (heartbeat due before {})",
        registration.unique_id, registration.refresh_before
    );

    let mut refresh_before = registration.refresh_before;

    loop {
        let delay = heartbeat_delay(refresh_before, config.heartbeat_margin_secs);

        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                match client
                    .heartbeat(&config.address, &registration.unique_id, &registration.key)
                    .await
                {
                    Ok(next) => {
                        info!("Heartbeat ok, next due before {}", next);
                        refresh_before = next;
                    }
                    Err(e) => {
                        // Deadline unchanged; the delay floor spaces retries.
                        error!("Heartbeat failed: {}", e);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down, removing listing {}", registration.unique_id);
                if let Err(e) = client
                    .delete(&config.address, &registration.unique_id, &registration.key)
                    .await
                {
                    warn!("Failed to remove listing: {}", e);
                }
                break;
            }
        }
    }

    Ok(())
}

/// Sleep until `margin_secs` before the refresh deadline, never less than a
/// few seconds so a stale or past deadline cannot produce a hot loop.
fn heartbeat_delay(refresh_before: f64, margin_secs: u64) -> Duration {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs_f64();

    let secs = refresh_before - now - margin_secs as f64;
    if secs < 5.0 {
        Duration::from_secs(5)
    } else {
        Duration::from_secs_f64(secs)
    }
}
