//! Weather reading categorization.
//!
//! [`categorize`] buckets a continuous (or boolean) weather reading into a
//! named range. It is a pure function of `(metric, reading)`: every real
//! reading maps to exactly one label for a given metric, with boundary values
//! resolving to the upper bucket. Only a null or untyped reading has no
//! category.

use crate::entities::weather::WeatherMetric;
use crate::types::Value;

const TRACK_TEMP_LABELS: [&str; 3] = [
    "Cold Track (<20°C)",
    "Medium Track (20-30°C)",
    "Hot Track (>30°C)",
];
const AIR_TEMP_LABELS: [&str; 3] = ["Cold (<20°C)", "Medium (20-25°C)", "Hot (>25°C)"];
const HUMIDITY_LABELS: [&str; 3] = [
    "Low Humidity (<40%)",
    "Medium Humidity (40-70%)",
    "High Humidity (>70%)",
];
const PRESSURE_LABELS: [&str; 3] = [
    "Low Pressure (<990 hPa)",
    "Medium Pressure (990-1020 hPa)",
    "High Pressure (>1020 hPa)",
];
const WIND_SPEED_LABELS: [&str; 3] = [
    "Light Wind (<10 km/h)",
    "Medium Wind (10-20 km/h)",
    "Strong Wind (>20 km/h)",
];

/// Bucket one weather reading into its category label.
///
/// Returns `None` when the reading is null or not of the metric's type (such
/// rows carry no usable weather information and are excluded from grouping).
pub fn categorize(metric: WeatherMetric, reading: &Value) -> Option<&'static str> {
    match metric {
        WeatherMetric::Rainfall => reading.as_bool().map(|wet| if wet { "Rainy" } else { "Dry" }),
        WeatherMetric::TrackTemp => reading
            .as_f64()
            .map(|v| bucket(v, 20.0, 30.0, &TRACK_TEMP_LABELS)),
        WeatherMetric::AirTemp => reading
            .as_f64()
            .map(|v| bucket(v, 20.0, 25.0, &AIR_TEMP_LABELS)),
        WeatherMetric::Humidity => reading
            .as_f64()
            .map(|v| bucket(v, 40.0, 70.0, &HUMIDITY_LABELS)),
        WeatherMetric::Pressure => reading
            .as_f64()
            .map(|v| bucket(v, 990.0, 1020.0, &PRESSURE_LABELS)),
        WeatherMetric::WindSpeed => reading
            .as_f64()
            .map(|v| bucket(v, 10.0, 20.0, &WIND_SPEED_LABELS)),
    }
}

/// Lower bound inclusive: a reading exactly on a threshold lands in the upper
/// bucket.
fn bucket(v: f64, low: f64, high: f64, labels: &[&'static str; 3]) -> &'static str {
    if v < low {
        labels[0]
    } else if v < high {
        labels[1]
    } else {
        labels[2]
    }
}
