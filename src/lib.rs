pub mod chat;
pub mod console;
pub mod monitor;
pub mod notifications;
pub mod settings;
pub mod snapshot;
pub mod source;
pub mod utils;
pub mod vitals;

use std::io::BufRead;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use console::Command;
use monitor::{MonitorController, PollTiming};
use notifications::NotificationFeed;
use settings::MonitorSettings;
use snapshot::{JsonSnapshotStore, VitalsSession};
use source::HttpReadingSource;

const SNAPSHOT_FILE: &str = "vitals_snapshot.json";

pub async fn run() -> Result<()> {
    utils::logging::init();

    log::info!("VitalCare starting up...");

    let data_dir = settings::data_dir();
    let settings = MonitorSettings::load(&data_dir).context("invalid settings")?;

    let mut monitor = MonitorController::new(NotificationFeed::new(settings.alert_retention));

    let source = HttpReadingSource::new(&settings.api_base_url, settings.fetch_timeout())?;
    log::info!("Polling {} every {}s", source.endpoint(), settings.poll_interval_secs);

    let session = VitalsSession::open(JsonSnapshotStore::new(data_dir.join(SNAPSHOT_FILE)));
    monitor.start(source, session, PollTiming::from(&settings))?;

    println!("{}", console::HELP);
    let result = tokio::select! {
        result = repl(&monitor, &settings) => result,
        _ = tokio::signal::ctrl_c() => {
            log::info!("Interrupted, shutting down");
            Ok(())
        }
    };

    monitor.stop().await?;
    result
}

/// Reads stdin on a plain thread so a pending read never holds up runtime
/// shutdown.
fn stdin_lines() -> Result<mpsc::UnboundedReceiver<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("vitalcare-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        log::error!("Failed to read stdin: {err}");
                        break;
                    }
                }
            }
        })
        .context("failed to spawn stdin reader")?;
    Ok(rx)
}

async fn repl(monitor: &MonitorController, settings: &MonitorSettings) -> Result<()> {
    let mut lines = stdin_lines()?;

    while let Some(line) = lines.recv().await {
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Chat(question) => {
                tokio::time::sleep(settings.chat_reply_delay()).await;
                println!("{}", chat::respond(&question, &monitor.latest_vitals()));
            }
            Command::Vitals => println!("{}", console::render_vitals(&monitor.latest_vitals())),
            Command::Tips => println!("{}", console::render_tips(&monitor.latest_vitals())),
            Command::Alerts(severity) => {
                let (unread, critical) = monitor.unread_counts();
                println!(
                    "{}",
                    console::render_alerts(&monitor.alerts(severity), unread, critical)
                );
            }
            Command::Read(id) => {
                if !monitor.mark_read(&id) {
                    println!("No alert {id}");
                }
            }
            Command::Delete(id) => {
                if !monitor.delete(&id) {
                    println!("No alert {id}");
                }
            }
            Command::ReadAll => monitor.mark_all_read(),
            Command::Help => println!("{}", console::HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}
