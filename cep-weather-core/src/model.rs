use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Address record returned by the ViaCEP directory.
///
/// ViaCEP reports unknown codes with HTTP 200 and an `erro` field; such a
/// record decodes successfully and [`PostalAddress::is_not_found`] is true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostalAddress {
    #[serde(rename = "erro", skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "unidade")]
    pub unit: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "localidade")]
    pub city: String,
    #[serde(rename = "uf")]
    pub state_code: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "regiao")]
    pub region: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

impl PostalAddress {
    /// True when the directory flagged the code as unknown inside the body.
    pub fn is_not_found(&self) -> bool {
        self.error.is_some()
    }
}

/// Current-conditions payload of WeatherAPI's `current.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub location: Location,
    pub current: Current,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime_epoch: i64,
    pub localtime: String,
}

impl Location {
    pub fn local_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.localtime_epoch, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub last_updated_epoch: i64,
    pub last_updated: String,
    /// Kept as the exact decimal written in the response.
    #[serde(with = "rust_decimal::serde::float")]
    pub temp_c: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub temp_f: Decimal,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_degree: i32,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    #[serde(default)]
    pub windchill_c: f64,
    #[serde(default)]
    pub windchill_f: f64,
    #[serde(default)]
    pub heatindex_c: f64,
    #[serde(default)]
    pub heatindex_f: f64,
    #[serde(default)]
    pub dewpoint_c: f64,
    #[serde(default)]
    pub dewpoint_f: f64,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub uv: f64,
    pub gust_mph: f64,
    pub gust_kph: f64,
    // Radiation fields are only present on some plans.
    #[serde(default)]
    pub short_rad: f64,
    #[serde(default)]
    pub diff_rad: f64,
    #[serde(default)]
    pub dni: f64,
    #[serde(default)]
    pub gti: f64,
}

impl Current {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_updated_epoch, 0)
    }
}

/// A temperature in three scales, each rounded to two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(rename = "temp_C", with = "rust_decimal::serde::float")]
    pub celsius: Decimal,
    #[serde(rename = "temp_F", with = "rust_decimal::serde::float")]
    pub fahrenheit: Decimal,
    #[serde(rename = "temp_K", with = "rust_decimal::serde::float")]
    pub kelvin: Decimal,
}
