//! Plain-text rendering of stations for chat replies.

use crate::directory::{Coordinates, NamedEntry, Schedule, Station};

/// Prefix of the map link; coordinates are appended as `lat,lon`.
const MAP_URL_PREFIX: &str = "https://maps.google.com/?q=";

/// Line labels, in output order.
const CITY_LABEL: &str = "Город";
const MAP_LABEL: &str = "Заправка на карте";
const FUELS_LABEL: &str = "Топливо";
const NAME_LABEL: &str = "Название";
const SCHEDULE_LABEL: &str = "Расписание";
const SERVICES_LABEL: &str = "Услуги";
const WORK_DESCRIPTION_LABEL: &str = "Описание работ";

/// Render a station as one `label: value` line per present field.
///
/// Field order is fixed: city, map link, fuels, name, schedule, services,
/// work description. Absent fields produce nothing, so a station with
/// only an identifier renders as the empty string.
pub fn format_station(station: &Station) -> String {
    let mut out = String::new();

    if let Some(city) = &station.city {
        push_line(&mut out, CITY_LABEL, city);
    }
    if let Some(coordinates) = &station.coordinates {
        push_line(&mut out, MAP_LABEL, &map_link(coordinates));
    }
    if let Some(fuels) = &station.fuels {
        push_line(&mut out, FUELS_LABEL, &join_names(fuels));
    }
    if let Some(name) = &station.name {
        push_line(&mut out, NAME_LABEL, name);
    }
    if let Some(schedule) = &station.schedule {
        push_line(&mut out, SCHEDULE_LABEL, &schedule_text(schedule));
    }
    if let Some(services) = &station.services {
        push_line(&mut out, SERVICES_LABEL, &join_names(services));
    }
    if let Some(description) = &station.work_description {
        push_line(&mut out, WORK_DESCRIPTION_LABEL, description);
    }

    out
}

/// Render the station list as `id - name` lines joined by newlines.
///
/// A station without a name keeps its line, with nothing after the dash.
pub fn format_station_list(stations: &[&Station]) -> String {
    stations
        .iter()
        .map(|s| format!("{} - {}", s.id, s.name.as_deref().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Google Maps link for a coordinate pair.
pub fn map_link(coordinates: &Coordinates) -> String {
    format!(
        "{MAP_URL_PREFIX}{},{}",
        coordinates.latitude, coordinates.longitude
    )
}

fn push_line(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

fn join_names(entries: &[NamedEntry]) -> String {
    entries
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn schedule_text(schedule: &Schedule) -> String {
    match schedule {
        Schedule::Text(text) => text.clone(),
        Schedule::Entries(entries) => join_names(entries),
        Schedule::Other(value) => value.to_string(),
    }
}
