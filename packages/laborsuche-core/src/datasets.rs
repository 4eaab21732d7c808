//! City selector helpers

use std::collections::HashSet;

use crate::types::DatasetDescriptor;

/// Distinct cities offered by the service, sorted case-insensitively.
///
/// `/api/datasets` lists one entry per city and category, so the same city
/// usually appears more than once.
pub fn city_options(datasets: &[DatasetDescriptor]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut cities = Vec::new();
    for dataset in datasets {
        if seen.insert(dataset.city.as_str()) {
            cities.push(dataset.city.clone());
        }
    }

    cities.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    cities
}

/// City to start with: the preferred one if offered, else the first option
pub fn initial_city(cities: &[String], preferred: &str) -> Option<String> {
    if cities.iter().any(|c| c == preferred) {
        return Some(preferred.to_string());
    }
    cities.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(city: &str, category: &str) -> DatasetDescriptor {
        DatasetDescriptor {
            city: city.to_string(),
            category: Some(category.to_string()),
            extra: Default::default(),
        }
    }

    #[test]
    fn duplicate_cities_are_collapsed_and_sorted() {
        let datasets = vec![
            dataset("Zurich", "blood"),
            dataset("berlin", "dexa"),
            dataset("Wien", "dexa"),
            dataset("Zurich", "dexa"),
            dataset("Wien", "blood"),
        ];

        assert_eq!(city_options(&datasets), vec!["berlin", "Wien", "Zurich"]);
    }

    #[test]
    fn preferred_city_wins_when_offered() {
        let cities = vec!["Berlin".to_string(), "Wien".to_string()];
        assert_eq!(initial_city(&cities, "Wien").as_deref(), Some("Wien"));
    }

    #[test]
    fn first_city_is_used_when_preferred_is_missing() {
        let cities = vec!["Wien".to_string(), "Zurich".to_string()];
        assert_eq!(initial_city(&cities, "Berlin").as_deref(), Some("Wien"));
        assert_eq!(initial_city(&[], "Berlin"), None);
    }
}
