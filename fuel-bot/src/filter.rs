//! Free-text station filtering.

use crate::directory::Station;

/// Whether `query` occurs in the station's name or city.
///
/// Plain case-sensitive substring match. The empty query matches any
/// station, even one with neither field: no field presence is required
/// before a query is given.
pub fn matches(station: &Station, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let contains = |field: &Option<String>| field.as_deref().is_some_and(|s| s.contains(query));
    contains(&station.name) || contains(&station.city)
}

/// Return, in input order, every station whose name or city contains `query`.
///
/// Each station appears at most once regardless of how many fields match.
pub fn filter_stations<'a>(stations: &'a [Station], query: &str) -> Vec<&'a Station> {
    stations.iter().filter(|s| matches(s, query)).collect()
}
