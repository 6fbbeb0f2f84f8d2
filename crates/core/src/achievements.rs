//! The achievement catalog and its unlock predicates.
//!
//! The catalog is fixed and ordered; evaluation walks it in definition
//! order and never lets one entry's unlock influence another's predicate
//! within the same pass. Predicates read a [`UserSnapshot`] assembled from
//! live counts so they stay pure and testable.

use std::collections::HashSet;

/// Live per-user counts consumed by unlock predicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserSnapshot {
    pub vehicle_count: i64,
    pub document_count: i64,
    pub parking_booking_count: i64,
    pub current_streak: i32,
    pub family_groups_owned: i64,
    pub total_points: i64,
}

/// Threshold predicate for one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    VehicleCount(i64),
    DocumentCount(i64),
    ParkingBookingCount(i64),
    StreakDays(i32),
    FamilyGroupsOwned(i64),
    TotalPoints(i64),
}

impl Criterion {
    /// Evaluate the predicate against a snapshot.
    pub fn is_met(self, snapshot: &UserSnapshot) -> bool {
        match self {
            Self::VehicleCount(n) => snapshot.vehicle_count >= n,
            Self::DocumentCount(n) => snapshot.document_count >= n,
            Self::ParkingBookingCount(n) => snapshot.parking_booking_count >= n,
            Self::StreakDays(n) => snapshot.current_streak >= n,
            Self::FamilyGroupsOwned(n) => snapshot.family_groups_owned >= n,
            Self::TotalPoints(n) => snapshot.total_points >= n,
        }
    }
}

/// One catalog entry. `name`/`description`/`icon`/`points` are copied onto
/// the unlock record so later catalog edits don't rewrite history.
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub points: i32,
    pub criterion: Criterion,
}

/// The full catalog, in evaluation order.
pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "first_vehicle",
        name: "First Ride",
        description: "Add your first vehicle",
        icon: "🚗",
        points: 50,
        criterion: Criterion::VehicleCount(1),
    },
    AchievementDef {
        id: "document_master",
        name: "Document Master",
        description: "Upload 5 vehicle documents",
        icon: "📄",
        points: 100,
        criterion: Criterion::DocumentCount(5),
    },
    AchievementDef {
        id: "booking_streak",
        name: "Regular Parker",
        description: "Make 10 parking bookings",
        icon: "🅿️",
        points: 150,
        criterion: Criterion::ParkingBookingCount(10),
    },
    AchievementDef {
        id: "streak_master",
        name: "Streak Master",
        description: "Maintain a 7-day usage streak",
        icon: "🔥",
        points: 200,
        criterion: Criterion::StreakDays(7),
    },
    AchievementDef {
        id: "family_sharer",
        name: "Family Coordinator",
        description: "Create a family group and share vehicles",
        icon: "👨‍👩‍👧‍👦",
        points: 250,
        criterion: Criterion::FamilyGroupsOwned(1),
    },
    AchievementDef {
        id: "point_collector",
        name: "Point Collector",
        description: "Earn 1000 total points",
        icon: "⭐",
        points: 300,
        criterion: Criterion::TotalPoints(1000),
    },
];

/// Look up a catalog entry by its id.
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}

/// Catalog entries that are satisfied by `snapshot` and not yet in
/// `unlocked`, in catalog order. The database's unique constraint remains
/// the authoritative gate; this filter just avoids redundant unlock
/// attempts.
pub fn newly_satisfied<'a>(
    snapshot: &UserSnapshot,
    unlocked: &HashSet<String>,
) -> Vec<&'a AchievementDef> {
    CATALOG
        .iter()
        .filter(|def| !unlocked.contains(def.id) && def.criterion.is_met(snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_snapshot_satisfies_nothing() {
        let hits = newly_satisfied(&UserSnapshot::default(), &unlocked(&[]));
        assert!(hits.is_empty());
    }

    #[test]
    fn first_vehicle_unlocks_at_one() {
        let snapshot = UserSnapshot {
            vehicle_count: 1,
            ..Default::default()
        };
        let hits = newly_satisfied(&snapshot, &unlocked(&[]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "first_vehicle");
        assert_eq!(hits[0].points, 50);
    }

    #[test]
    fn already_unlocked_entries_are_skipped() {
        let snapshot = UserSnapshot {
            vehicle_count: 3,
            ..Default::default()
        };
        let hits = newly_satisfied(&snapshot, &unlocked(&["first_vehicle"]));
        assert!(hits.is_empty());
    }

    #[test]
    fn multiple_entries_can_fire_in_catalog_order() {
        let snapshot = UserSnapshot {
            vehicle_count: 2,
            document_count: 6,
            current_streak: 8,
            total_points: 1200,
            ..Default::default()
        };
        let hits = newly_satisfied(&snapshot, &unlocked(&[]));
        let ids: Vec<_> = hits.iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec![
                "first_vehicle",
                "document_master",
                "streak_master",
                "point_collector"
            ]
        );
    }

    #[test]
    fn thresholds_are_inclusive() {
        let snapshot = UserSnapshot {
            document_count: 5,
            parking_booking_count: 10,
            current_streak: 7,
            total_points: 1000,
            ..Default::default()
        };
        let ids: Vec<_> = newly_satisfied(&snapshot, &unlocked(&[]))
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "document_master",
                "booking_streak",
                "streak_master",
                "point_collector"
            ]
        );
    }

    #[test]
    fn below_threshold_does_not_fire() {
        let snapshot = UserSnapshot {
            document_count: 4,
            parking_booking_count: 9,
            current_streak: 6,
            total_points: 999,
            ..Default::default()
        };
        assert!(newly_satisfied(&snapshot, &unlocked(&[])).is_empty());
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut seen = HashSet::new();
        for def in CATALOG {
            assert!(seen.insert(def.id), "duplicate catalog id {}", def.id);
        }
    }

    #[test]
    fn find_resolves_known_ids() {
        assert_eq!(find("streak_master").unwrap().points, 200);
        assert!(find("nonexistent").is_none());
    }
}
