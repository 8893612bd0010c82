use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rental_admin::card::ActionOutcome;
use rental_admin::config::AdminConfig;
use rental_admin::panel::CarListPanel;
use rental_client::{CarApi, CarService};
use rental_core::form::{CarForm, ImageUpload};
use rental_core::types::{DbId, Timestamp};
use rental_events::EventBus;

#[derive(Debug, Parser)]
#[command(name = "rental-admin", about = "Manage car listings from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every car as a card.
    List,
    /// Create a car.
    Add(NewCarArgs),
    /// Edit a car; omitted fields keep their current value.
    Update {
        id: DbId,
        #[command(flatten)]
        changes: CarChanges,
    },
    /// Delete a car.
    Delete { id: DbId },
}

#[derive(Debug, Args)]
struct NewCarArgs {
    #[arg(long)]
    model: String,
    #[arg(long = "type")]
    car_type: Option<String>,
    #[arg(long)]
    year: String,
    #[arg(long)]
    price: f64,
    /// RFC 3339 timestamp.
    #[arg(long)]
    start_rent: Option<Timestamp>,
    /// RFC 3339 timestamp.
    #[arg(long)]
    finish_rent: Option<Timestamp>,
    /// Picture to upload (JPEG, PNG or WebP).
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CarChanges {
    #[arg(long)]
    model: Option<String>,
    #[arg(long = "type")]
    car_type: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    start_rent: Option<Timestamp>,
    #[arg(long)]
    finish_rent: Option<Timestamp>,
    #[arg(long)]
    image: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_admin=info,rental_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let config = AdminConfig::from_env()?;
    tracing::debug!(api_url = %config.client.api_url, "Loaded admin configuration");

    let service: Arc<dyn CarService> = Arc::new(CarApi::from_config(&config.client)?);
    let events = Arc::new(EventBus::default());
    let mut panel =
        CarListPanel::new(service, events).with_display_offset(config.display_offset);

    match cli.command {
        Command::List => {
            load(&mut panel).await?;
            for card in panel.cards() {
                println!("#{} {}\n", card.car_id(), card.view());
            }
        }
        Command::Add(args) => {
            let form = args.into_form().await?;
            panel.add_car(&form).await;
            report(&mut panel);
        }
        Command::Update { id, changes } => {
            load(&mut panel).await?;
            let card = panel.card_mut(id)?;
            card.open_edit();
            let mut form = card.edit_form();
            changes.apply(&mut form).await?;
            card.handle_update(form).await;
            report(&mut panel);
        }
        Command::Delete { id } => {
            load(&mut panel).await?;
            let card = panel.card_mut(id)?;
            card.open_delete();
            card.handle_delete().await;
            report(&mut panel);
        }
    }

    Ok(())
}

/// Fetch the list, failing the command when nothing could be loaded.
async fn load(panel: &mut CarListPanel) -> anyhow::Result<()> {
    match panel.refresh().await {
        ActionOutcome::Completed => Ok(()),
        ActionOutcome::Rejected => {
            let message = panel
                .take_notification()
                .map(|n| n.message)
                .unwrap_or_default();
            bail!("car list rejected: {message}")
        }
        ActionOutcome::TransportFailed => bail!("car API is unreachable"),
    }
}

/// Print the notification the last action raised, if any.
fn report(panel: &mut CarListPanel) {
    panel.drain_events();
    if let Some(notification) = panel.take_notification() {
        println!("[{}] {}", notification.color.as_str(), notification.message);
    }
}

impl NewCarArgs {
    async fn into_form(self) -> anyhow::Result<CarForm> {
        let mut form = CarForm::new(self.model, self.year, self.price);
        form.car_type = self.car_type;
        form.start_rent = self.start_rent;
        form.finish_rent = self.finish_rent;
        if let Some(path) = self.image {
            form.image = Some(read_image(&path).await?);
        }
        Ok(form)
    }
}

impl CarChanges {
    async fn apply(self, form: &mut CarForm) -> anyhow::Result<()> {
        if let Some(model) = self.model {
            form.model = model;
        }
        if let Some(car_type) = self.car_type {
            form.car_type = Some(car_type);
        }
        if let Some(year) = self.year {
            form.year = year;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(start) = self.start_rent {
            form.start_rent = Some(start);
        }
        if let Some(finish) = self.finish_rent {
            form.finish_rent = Some(finish);
        }
        if let Some(path) = self.image {
            form.image = Some(read_image(&path).await?);
        }
        Ok(())
    }
}

async fn read_image(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;

    let mime_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => bail!("unsupported image type: {}", path.display()),
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(ImageUpload {
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}
