use bank_notifier::application::service::NotificationService;
use bank_notifier::domain::notification::{Notification, NotificationState};
use bank_notifier::domain::registry::StrategyRegistry;
use bank_notifier::error::Result as NotificationResult;
use bank_notifier::infrastructure::in_memory::InMemoryNotificationStore;
use bank_notifier::interfaces::csv::notification_writer::NotificationWriter;
use bank_notifier::interfaces::csv::request_reader::{NotificationRequest, RequestReader};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV file of notification requests
    input: PathBuf,

    /// Only print notifications in this state (pending, sent or failed)
    #[arg(long)]
    state: Option<NotificationState>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

async fn process(
    service: &NotificationService,
    request: NotificationRequest,
) -> NotificationResult<Notification> {
    let created = service
        .create(
            &request.recipient,
            &request.message,
            request.channel,
            request.priority,
        )
        .await?;
    if request.should_send() {
        service.send_by_id(created.id()).await
    } else {
        Ok(created)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let service = NotificationService::new(
        Box::new(InMemoryNotificationStore::new()),
        StrategyRegistry::standard(),
    );

    // Process requests
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    let mut processed = Vec::new();
    for request in reader.requests() {
        match request {
            Ok(request) => match process(&service, request).await {
                Ok(notification) => processed.push(notification),
                Err(e) => {
                    debug!(error = %e, "Rejected notification request");
                    eprintln!("Error processing request: {}", e);
                }
            },
            Err(e) => {
                eprintln!("Error processing request: {}", e);
            }
        }
    }
    let stored = service.count().await.into_diagnostic()?;
    debug!(stored, "Finished processing requests");

    let notifications = match cli.state {
        Some(state) => service.list_by_state(state).await.into_diagnostic()?,
        None => processed,
    };

    // Output notifications, then the running total
    let stdout = io::stdout();
    let mut writer = NotificationWriter::new(stdout.lock());
    writer.write_notifications(&notifications).into_diagnostic()?;

    let total = service.total_cost().await.into_diagnostic()?;
    eprintln!("Total cost: {}", total);

    Ok(())
}
