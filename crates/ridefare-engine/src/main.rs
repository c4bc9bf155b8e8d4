//! RideFare command-line calculator

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ridefare_common::{TripInput, VERSION};
use ridefare_engine::{FareService, FareSettings};

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("RideFare v{}", VERSION);

    let settings = FareSettings::load_from(args.config.as_deref())?;

    match args.command {
        Commands::Quote {
            distance,
            duration,
            stops,
            recurring,
            riders,
            gas_price,
        } => {
            let mut trip = TripInput::new(distance, duration)
                .with_stops(stops)
                .with_recurring(recurring)
                .with_riders(riders);
            if let Some(gas_price) = gas_price {
                trip = trip.with_gas_price(gas_price);
            }

            let service = FareService::new(settings)?;
            let quote = service.quote(&trip)?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Commands::Split { total, riders } => {
            let service = FareService::new(settings)?;
            let split = service.split(total, riders)?;
            println!("{}", serde_json::to_string_pretty(&split)?);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
