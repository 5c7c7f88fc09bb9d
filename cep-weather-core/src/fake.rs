//! In-memory lookups answering from fixed maps.
//!
//! Keys without an entry answer as a classified 404 of the fake's namespace.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    client::{CepLookup, WeatherLookup},
    context::RequestContext,
    error::{Classifier, LookupError},
    model::{Condition, Current, Location, PostalAddress, WeatherObservation},
};

#[derive(Debug, Clone)]
enum Reply<T> {
    Value(T),
    Status(u16),
}

impl<T: Clone> Reply<T> {
    fn resolve(entry: Option<&Self>, classifier: Classifier) -> Result<T, LookupError> {
        match entry {
            Some(Reply::Value(value)) => Ok(value.clone()),
            Some(Reply::Status(status)) => Err(classifier.classify(*status).into()),
            None => Err(classifier.classify(404).into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeCepLookup {
    replies: HashMap<String, Reply<PostalAddress>>,
}

impl FakeCepLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, cep: impl Into<String>, address: PostalAddress) -> Self {
        self.replies.insert(cep.into(), Reply::Value(address));
        self
    }

    /// Answer `cep` as if the directory returned `status`.
    pub fn with_status(mut self, cep: impl Into<String>, status: u16) -> Self {
        self.replies.insert(cep.into(), Reply::Status(status));
        self
    }
}

#[async_trait]
impl CepLookup for FakeCepLookup {
    async fn lookup(&self, ctx: &RequestContext, cep: &str) -> Result<PostalAddress, LookupError> {
        ctx.run(async { Reply::resolve(self.replies.get(cep), Classifier::POSTAL) }).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeWeatherLookup {
    replies: HashMap<String, Reply<WeatherObservation>>,
}

impl FakeWeatherLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observation(
        mut self,
        place: impl Into<String>,
        observation: WeatherObservation,
    ) -> Self {
        self.replies.insert(place.into(), Reply::Value(observation));
        self
    }

    pub fn with_status(mut self, place: impl Into<String>, status: u16) -> Self {
        self.replies.insert(place.into(), Reply::Status(status));
        self
    }
}

#[async_trait]
impl WeatherLookup for FakeWeatherLookup {
    async fn lookup(
        &self,
        ctx: &RequestContext,
        place: &str,
    ) -> Result<WeatherObservation, LookupError> {
        ctx.run(async { Reply::resolve(self.replies.get(place), Classifier::WEATHER) }).await
    }
}

pub fn sample_address(cep: &str, city: &str) -> PostalAddress {
    PostalAddress {
        cep: cep.to_string(),
        street: "Avenida Paulista".to_string(),
        district: "Bela Vista".to_string(),
        city: city.to_string(),
        state_code: "SP".to_string(),
        state: "São Paulo".to_string(),
        region: "Sudeste".to_string(),
        ibge: "3550308".to_string(),
        ddd: "11".to_string(),
        ..Default::default()
    }
}

/// Address as ViaCEP reports an unknown code: only `erro` is set.
pub fn not_found_address() -> PostalAddress {
    PostalAddress { error: Some(serde_json::Value::String("true".into())), ..Default::default() }
}

pub fn sample_observation(place: &str, temp_c: Decimal) -> WeatherObservation {
    WeatherObservation {
        location: Location {
            name: place.to_string(),
            region: "Sao Paulo".to_string(),
            country: "Brazil".to_string(),
            lat: -23.5333,
            lon: -46.6167,
            tz_id: "America/Sao_Paulo".to_string(),
            localtime_epoch: 1_735_689_600,
            localtime: "2025-01-01 00:00".to_string(),
        },
        current: Current {
            last_updated_epoch: 1_735_689_600,
            last_updated: "2025-01-01 00:00".to_string(),
            temp_c,
            temp_f: crate::convert::convert(temp_c).map_or(Decimal::ZERO, |t| t.fahrenheit),
            is_day: 1,
            condition: Condition {
                text: "Partly cloudy".to_string(),
                icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".to_string(),
                code: 1003,
            },
            wind_mph: 6.9,
            wind_kph: 11.2,
            wind_degree: 140,
            wind_dir: "SE".to_string(),
            pressure_mb: 1016.0,
            pressure_in: 30.0,
            precip_mm: 0.0,
            precip_in: 0.0,
            humidity: 65,
            cloud: 50,
            feelslike_c: 25.0,
            feelslike_f: 77.0,
            windchill_c: 24.0,
            windchill_f: 75.2,
            heatindex_c: 25.0,
            heatindex_f: 77.0,
            dewpoint_c: 17.0,
            dewpoint_f: 62.6,
            vis_km: 10.0,
            vis_miles: 6.0,
            uv: 5.0,
            gust_mph: 8.1,
            gust_kph: 13.0,
            short_rad: 0.0,
            diff_rad: 0.0,
            dni: 0.0,
            gti: 0.0,
        },
    }
}
