use maha_weather_core::{City, ViewState};

pub fn print_cities(cities: &[City]) {
    let width = cities.iter().map(|c| c.id.len()).max().unwrap_or(0);
    for c in cities {
        println!("{:<width$}  {} ({:.4}, {:.4})", c.id, c.name, c.latitude, c.longitude);
    }
}

pub fn print_view(view: &ViewState) {
    match &view.error {
        Some(error) => eprintln!("{error}"),
        None => print!("{}", format_view(view)),
    }
}

/// Plain-text layout of the rendered results; empty when nothing is rendered.
fn format_view(view: &ViewState) -> String {
    let (Some(name), Some(current)) = (&view.city_name, &view.current) else {
        return String::new();
    };

    let mut out = format!(
        "{name}\n  {}  {}\n  Wind {}\n  {}\n\n",
        current.temperature, current.condition, current.wind_speed, current.last_updated,
    );

    for day in &view.forecast {
        out.push_str(&format!(
            "  {:<8} {:<3} {:<6}  {:>5} / {:<5}  {:>8}  {}\n",
            day.badge_text,
            day.weekday,
            day.short_date,
            day.max_temp,
            day.min_temp,
            day.precipitation,
            day.condition,
        ));
    }
    out
}
