use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Photo;

/// A named place the user keeps coming back to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Visits wanted per week. 0 means no goal was set.
    pub visit_goal: u32,
    /// Visits counted in the week starting at `week_start_date`.
    pub current_visits: u32,
    /// Always a Monday.
    pub week_start_date: NaiveDate,
    /// Insertion order is visit order.
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl Location {
    pub fn has_goal(&self) -> bool {
        self.visit_goal > 0
    }

    pub fn goal_met(&self) -> bool {
        self.has_goal() && self.current_visits >= self.visit_goal
    }

    /// Case-insensitive match against a user-typed place name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Listing order for places: case-folded name, then id.
pub fn sort_by_name(locations: &mut [Location]) {
    locations.sort_by_cached_key(|l| (l.name.to_lowercase(), l.id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(goal: u32, visits: u32) -> Location {
        Location {
            id: "loc-1".to_string(),
            name: "Café de Flore".to_string(),
            latitude: 48.854,
            longitude: 2.333,
            description: None,
            visit_goal: goal,
            current_visits: visits,
            week_start_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            photos: Vec::new(),
        }
    }

    #[test]
    fn test_goal_met() {
        assert!(location(3, 3).goal_met());
        assert!(location(3, 5).goal_met());
        assert!(!location(3, 2).goal_met());
        // no goal is never "met"
        assert!(!location(0, 4).goal_met());
    }

    #[test]
    fn test_sort_by_name_folds_accented_capitals() {
        let mut places = vec![location(0, 0), location(0, 0), location(0, 0)];
        for (place, (id, name)) in places
            .iter_mut()
            .zip([("1", "Éz"), ("2", "éa"), ("3", "Abbesses")])
        {
            place.id = id.to_string();
            place.name = name.to_string();
        }
        sort_by_name(&mut places);
        let names: Vec<&str> = places.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Abbesses", "éa", "Éz"]);
    }

    #[test]
    fn test_matches_name_ignores_case_and_padding() {
        let loc = location(0, 0);
        assert!(loc.matches_name("café de flore"));
        assert!(loc.matches_name("  CAFÉ DE FLORE "));
        assert!(!loc.matches_name("Les Deux Magots"));
    }
}
