use minimal_weather_core::{ScreenState, WeatherView};

/// Text shown for the current screen state.
pub fn render(state: &ScreenState) -> String {
    let mut out = match &state.view {
        Some(view) => render_view(view),
        None => "Loading weather...".to_string(),
    };

    if let Some(issue) = &state.issue {
        out.push_str(&format!("\n! {issue}"));
    }

    out
}

fn render_view(view: &WeatherView) -> String {
    format!(
        "{city}\n{time}\n\n  {glyph}  {temp}\n\n  Sunrise {sunrise}   Wind {wind}   Temperature {temp}",
        city = view.city,
        time = view.current_time,
        glyph = view.icon.glyph(),
        temp = view.temperature,
        sunrise = view.sunrise,
        wind = view.wind,
    )
}
