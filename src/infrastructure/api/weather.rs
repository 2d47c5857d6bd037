//! Weather forecast provider

use serde::Deserialize;

use super::{degrade, ApiClient};
use crate::domain::entities::CapabilityResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WeatherResponse {
    #[serde(default)]
    location: Location,
    #[serde(default)]
    forecasts: Vec<Forecast>,
    #[serde(default)]
    pinpoint_locations: Vec<PinpointLocation>,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    #[serde(default)]
    city: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Forecast {
    #[serde(default)]
    date_label: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    telop: String,
    #[serde(default)]
    temperature: Temperature,
}

#[derive(Debug, Default, Deserialize)]
struct Temperature {
    max: Option<Celsius>,
}

#[derive(Debug, Deserialize)]
struct Celsius {
    celsius: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PinpointLocation {
    name: String,
    link: String,
}

impl ApiClient {
    pub(crate) async fn fetch_weather(&self) -> CapabilityResult {
        let config = self.config();
        let city = config.features.weather_city_id.to_string();

        match self
            .get_json::<WeatherResponse>(&config.endpoints.weather, &[("city", city.as_str())])
            .await
        {
            Ok(response) => format_forecast(&response, &config.features.weather_pinpoint),
            Err(e) => degrade("天気", e),
        }
    }
}

/// One line per forecast day, plus the pinpoint link when present
pub(crate) fn format_forecast(response: &WeatherResponse, pinpoint: &str) -> CapabilityResult {
    if response.forecasts.is_empty() {
        return CapabilityResult::Empty("天気情報が見つからなかったよ……".to_string());
    }

    let mut message = String::new();
    for forecast in &response.forecasts {
        message.push_str(&format!(
            "{}（{}）の{}の天気は「{}」",
            forecast.date_label, forecast.date, response.location.city, forecast.telop
        ));

        let max = forecast
            .temperature
            .max
            .as_ref()
            .and_then(|m| m.celsius.as_deref())
            .filter(|c| !c.is_empty());
        if let Some(celsius) = max {
            message.push_str(&format!("、最高気温は{}℃", celsius));
        }
        message.push('\n');
    }

    if let Some(location) = response.pinpoint_locations.iter().find(|l| l.name == pinpoint) {
        message.push_str(&format!("詳しくはこちら → {}", location.link));
    }

    CapabilityResult::Success(message)
}
