//! Core library for the `cep-weather` CLI.
//!
//! This crate defines:
//! - Configuration of the upstream endpoints and credentials
//! - Lookup clients for the ViaCEP directory and WeatherAPI
//! - Per-service classification of HTTP failures
//! - Celsius → Celsius/Fahrenheit/Kelvin conversion
//!
//! It is used by `cep-weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod model;
pub mod service;
pub mod transport;

#[cfg(any(test, feature = "fake"))]
pub mod fake;

pub use client::{CepClient, CepLookup, WeatherClient, WeatherLookup};
pub use config::Config;
pub use context::RequestContext;
pub use convert::{convert, convert_observation};
pub use error::{
    BuildError, ClassifiedError, Classifier, ConversionError, ErrorKind, LookupError, Namespace,
    classify,
};
pub use model::{PostalAddress, Temperature, WeatherObservation};
pub use service::{ServiceError, TemperatureService};
