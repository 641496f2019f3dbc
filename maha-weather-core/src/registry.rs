//! Static table of supported Maharashtra locations.

use serde::Serialize;

/// A selectable location with its coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub id: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn city(id: &'static str, name: &'static str, latitude: f64, longitude: f64) -> City {
    City { id, name, latitude, longitude }
}

static CITIES: &[City] = &[
    city("mumbai", "Mumbai", 19.0760, 72.8777),
    city("pune", "Pune", 18.5204, 73.8567),
    city("nagpur", "Nagpur", 21.1458, 79.0882),
    city("thane", "Thane", 19.2183, 72.9781),
    city("nashik", "Nashik", 19.9975, 73.7898),
    city("aurangabad", "Chhatrapati Sambhajinagar", 19.8762, 75.3433),
    city("solapur", "Solapur", 17.6599, 75.9064),
    city("kolhapur", "Kolhapur", 16.7050, 74.2433),
    city("amravati", "Amravati", 20.9374, 77.7796),
    city("nanded", "Nanded", 19.1383, 77.3210),
    city("sangli", "Sangli", 16.8524, 74.5815),
    city("jalgaon", "Jalgaon", 21.0077, 75.5626),
    city("akola", "Akola", 20.7002, 77.0082),
    city("latur", "Latur", 18.4088, 76.5604),
    city("ahmednagar", "Ahilyanagar", 19.0948, 74.7480),
    city("satara", "Satara", 17.6805, 74.0183),
    city("ratnagiri", "Ratnagiri", 16.9902, 73.3120),
    city("chandrapur", "Chandrapur", 19.9615, 79.2961),
    city("dhule", "Dhule", 20.9042, 74.7749),
    city("alibag", "Alibag", 18.6414, 72.8722),
    city("lonavala", "Lonavala", 18.7546, 73.4062),
    city("mahabaleshwar", "Mahabaleshwar", 17.9307, 73.6477),
];

/// All known cities, in display order.
pub fn all() -> &'static [City] {
    CITIES
}

/// Look up a city by its identifier.
///
/// Returns `None` for an empty or unknown id; callers treat that as
/// "no city selected".
pub fn resolve(id: &str) -> Option<&'static City> {
    if id.is_empty() {
        return None;
    }
    CITIES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_city_resolves_to_its_table_entry() {
        for c in all() {
            let found = resolve(c.id).expect("registered id must resolve");
            assert_eq!(found.name, c.name);
            assert_eq!(found.latitude, c.latitude);
            assert_eq!(found.longitude, c.longitude);
        }
    }

    #[test]
    fn known_coordinates_are_exact() {
        let pune = resolve("pune").unwrap();
        assert_eq!(pune.latitude, 18.5204);
        assert_eq!(pune.longitude, 73.8567);

        let nagpur = resolve("nagpur").unwrap();
        assert_eq!(nagpur.latitude, 21.1458);
        assert_eq!(nagpur.longitude, 79.0882);
    }

    #[test]
    fn ids_are_unique_and_non_empty() {
        let mut seen = HashSet::new();
        for c in all() {
            assert!(!c.id.is_empty());
            assert!(seen.insert(c.id), "duplicate id {}", c.id);
        }
    }

    #[test]
    fn coordinates_lie_within_maharashtra() {
        for c in all() {
            assert!((15.5..=22.1).contains(&c.latitude), "{} latitude", c.id);
            assert!((72.5..=80.9).contains(&c.longitude), "{} longitude", c.id);
        }
    }

    #[test]
    fn empty_and_unknown_ids_do_not_resolve() {
        assert!(resolve("").is_none());
        assert!(resolve("berlin").is_none());
        assert!(resolve("Mumbai").is_none());
    }
}
