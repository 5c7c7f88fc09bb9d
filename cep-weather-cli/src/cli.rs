use std::time::Duration;

use anyhow::{Context, Result};
use cep_weather_core::{
    CepClient, CepLookup, Config, PostalAddress, RequestContext, Temperature, TemperatureService,
    WeatherClient, WeatherLookup, WeatherObservation, convert_observation, transport,
};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use tokio_util::sync::CancellationToken;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cep-weather", version, about = "CEP and weather lookups")]
pub struct Cli {
    /// Give up on a lookup after this many seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the WeatherAPI key and upstream endpoints.
    Configure,

    /// Look up the address of a CEP.
    Cep {
        /// Postal code, passed to the directory as given.
        cep: String,
    },

    /// Show current weather for a place.
    Weather {
        /// City or any free-text place name.
        place: String,
    },

    /// Show the current temperature at a CEP in Celsius, Fahrenheit and Kelvin.
    Temperature {
        /// Eight-digit postal code.
        cep: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli { timeout, command } = self;

        match command {
            Command::Configure => configure()?,
            Command::Cep { cep } => {
                let config = Config::load()?;
                let client = CepClient::from_config(&config, transport::http_client()?)?;
                let address = client.lookup(&lookup_context(timeout), &cep).await?;
                print_address(&address);
            }
            Command::Weather { place } => {
                let config = Config::load()?;
                let client = WeatherClient::from_config(&config, transport::http_client()?)?;
                let weather = client.lookup(&lookup_context(timeout), &place).await?;
                print_weather(&weather)?;
            }
            Command::Temperature { cep } => {
                let config = Config::load()?;
                let service = TemperatureService::from_config(&config, transport::http_client()?)?;
                let temperature = service.temperature_for_cep(&lookup_context(timeout), &cep).await?;
                print_temperature(&temperature)?;
            }
        }

        Ok(())
    }
}

/// Request context cancelled by Ctrl-C and bounded by `--timeout`.
fn lookup_context(timeout: Option<u64>) -> RequestContext {
    let token = CancellationToken::new();
    let on_signal = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, cancelling lookup");
            on_signal.cancel();
        }
    });

    let ctx = RequestContext::with_cancellation(token);
    match timeout {
        Some(secs) => ctx.with_timeout(Duration::from_secs(secs)),
        None => ctx,
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load_file()?;

    let key = Password::new("WeatherAPI key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !key.is_empty() {
        config.weather_api_key = key;
    }

    let via_cep_url = Text::new("ViaCEP URL template:")
        .with_default(&config.via_cep_url)
        .with_help_message("Must contain {cep}")
        .prompt()
        .context("Failed to read ViaCEP URL")?;
    config.via_cep_url = via_cep_url;

    let weather_base_url = Text::new("WeatherAPI endpoint:")
        .with_default(&config.weather_base_url)
        .prompt()
        .context("Failed to read WeatherAPI endpoint")?;
    config.weather_base_url = weather_base_url;

    // Reject unusable values before they reach disk.
    let http = transport::http_client()?;
    CepClient::from_config(&config, http.clone())?;
    WeatherClient::from_config(&config, http)?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn print_address(address: &PostalAddress) {
    if address.is_not_found() {
        println!("CEP not found");
        return;
    }

    println!("{} {}", address.street, address.complement);
    println!("{} - {}/{}", address.district, address.city, address.state_code);
    println!("CEP {} (IBGE {}, DDD {})", address.cep, address.ibge, address.ddd);
}

fn print_weather(weather: &WeatherObservation) -> Result<()> {
    let location = &weather.location;
    let current = &weather.current;

    println!("{}, {}, {}", location.name, location.region, location.country);
    if let Some(at) = current.last_updated_at() {
        println!("Updated: {at}");
    }
    println!("{}", current.condition.text);
    println!("Temperature: {} °C / {} °F", current.temp_c, current.temp_f);
    println!("Feels like:  {} °C", current.feelslike_c);
    println!("Humidity:    {}%", current.humidity);
    println!("Wind:        {} km/h {}", current.wind_kph, current.wind_dir);
    println!("Pressure:    {} mb", current.pressure_mb);
    println!("UV index:    {}", current.uv);

    let temperature = convert_observation(weather)?;
    println!("Kelvin:      {} K", temperature.kelvin);

    Ok(())
}

fn print_temperature(temperature: &Temperature) -> Result<()> {
    let json = serde_json::to_string_pretty(temperature)?;
    println!("{json}");
    Ok(())
}
