use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    error::ConversionError,
    model::{Temperature, WeatherObservation},
};

const ABSOLUTE_ZERO_OFFSET: Decimal = Decimal::from_parts(27315, 0, 0, false, 2);
const FAHRENHEIT_FACTOR: Decimal = Decimal::from_parts(18, 0, 0, false, 1);
const FAHRENHEIT_OFFSET: Decimal = Decimal::from_parts(32, 0, 0, false, 0);

/// Express a Celsius reading in Celsius, Fahrenheit and Kelvin.
///
/// Each scale is derived from the unrounded input and then rounded half away
/// from zero to two digits. Fails when a scale does not fit in a `Decimal`.
pub fn convert(celsius: Decimal) -> Result<Temperature, ConversionError> {
    let out_of_range = || ConversionError::OutOfRange(celsius);

    let fahrenheit = celsius
        .checked_mul(FAHRENHEIT_FACTOR)
        .and_then(|f| f.checked_add(FAHRENHEIT_OFFSET))
        .ok_or_else(out_of_range)?;
    let kelvin = celsius.checked_add(ABSOLUTE_ZERO_OFFSET).ok_or_else(out_of_range)?;

    Ok(Temperature {
        celsius: round_two(celsius),
        fahrenheit: round_two(fahrenheit),
        kelvin: round_two(kelvin),
    })
}

pub fn convert_observation(weather: &WeatherObservation) -> Result<Temperature, ConversionError> {
    convert(weather.current.temp_c)
}

fn round_two(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}
