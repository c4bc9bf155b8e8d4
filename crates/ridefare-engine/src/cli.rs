use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "ridefare", version, about = "Ride fare calculator")]
pub struct Cli {
    /// Configuration file path (defaults to ./ridefare.toml when present)
    #[arg(short, long, global = true, env = "RIDEFARE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price a trip and print the quote as JSON
    Quote {
        /// Route distance in miles
        #[arg(long)]
        distance: Decimal,

        /// Estimated duration in minutes
        #[arg(long)]
        duration: Decimal,

        /// Additional stops beyond origin and destination
        #[arg(long, default_value = "0")]
        stops: u32,

        /// Trip is part of a recurring schedule
        #[arg(long)]
        recurring: bool,

        /// Riders sharing the trip
        #[arg(long, default_value = "1")]
        riders: u32,

        /// Current gas price per gallon
        #[arg(long)]
        gas_price: Option<Decimal>,
    },

    /// Split a total among riders
    Split {
        /// Total price to split
        #[arg(long)]
        total: Decimal,

        /// Riders sharing the total
        #[arg(long)]
        riders: u32,
    },

    /// Print the effective configuration
    Config,
}
