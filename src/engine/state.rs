use chrono::{DateTime, Utc};

use crate::entities::{Poi, PoiCategory, Position, RoutePath};

/// Display-adjacent state: latest fix, the fix active at the last POI fetch,
/// the POI cache and the active route. Owned by the engine behind one mutex.
///
/// Refreshes are generation-checked: `begin_*_refresh` hands out a ticket and
/// `commit_pois` applies a result only while that ticket is still current, so
/// a superseded in-flight fetch cannot overwrite newer state.
#[derive(Debug, Default)]
pub struct FetchState {
    pub current_position: Option<Position>,
    pub last_fetched_position: Option<Position>,
    pub active_category: PoiCategory,
    pub pois: Vec<Poi>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub route: Option<RoutePath>,
    generation: u64,
}

impl FetchState {
    pub fn new(active_category: PoiCategory) -> Self {
        Self {
            active_category,
            ..Self::default()
        }
    }

    // A location trigger records the fetch position and clears the cache
    // before the request goes out; a failed fetch therefore leaves the
    // cache empty.
    pub fn begin_location_refresh(&mut self, position: Position) -> u64 {
        self.last_fetched_position = Some(position);
        self.pois.clear();
        self.fetched_at = None;
        self.generation += 1;
        self.generation
    }

    // A category trigger switches the active category but leaves the
    // last-fetched position and the cache untouched until results land.
    pub fn begin_category_refresh(&mut self, category: PoiCategory) -> u64 {
        self.active_category = category;
        self.generation += 1;
        self.generation
    }

    pub fn commit_pois(&mut self, ticket: u64, pois: Vec<Poi>) -> bool {
        if ticket != self.generation {
            return false;
        }

        self.pois = pois;
        self.fetched_at = Some(Utc::now());
        true
    }
}

#[test]
fn a_stale_ticket_cannot_commit() {
    let mut state = FetchState::default();

    let first = state.begin_location_refresh(Position::new(12.90, 77.50));
    let second = state.begin_location_refresh(Position::new(12.95, 77.50));

    let poi = Poi {
        name: "Truffles".into(),
        place_id: "p1".into(),
        distance_m: 120.0,
        position: Position::new(12.93, 77.6),
    };

    assert!(!state.commit_pois(first, vec![poi.clone()]));
    assert!(state.pois.is_empty());

    assert!(state.commit_pois(second, vec![poi]));
    assert_eq!(state.pois.len(), 1);
    assert!(state.fetched_at.is_some());
}

#[test]
fn a_location_trigger_clears_the_cache() {
    let mut state = FetchState::default();

    let ticket = state.begin_location_refresh(Position::new(12.90, 77.50));
    assert!(state.commit_pois(
        ticket,
        vec![Poi {
            name: "Truffles".into(),
            place_id: "p1".into(),
            distance_m: 120.0,
            position: Position::new(12.93, 77.6),
        }],
    ));

    state.begin_location_refresh(Position::new(12.95, 77.50));

    assert!(state.pois.is_empty());
    assert!(state.fetched_at.is_none());
    assert_eq!(
        state.last_fetched_position,
        Some(Position::new(12.95, 77.50))
    );
}

#[test]
fn a_category_trigger_keeps_the_cache_and_fetch_position() {
    let mut state = FetchState::default();

    let ticket = state.begin_location_refresh(Position::new(12.90, 77.50));
    state.commit_pois(
        ticket,
        vec![Poi {
            name: "Truffles".into(),
            place_id: "p1".into(),
            distance_m: 120.0,
            position: Position::new(12.93, 77.6),
        }],
    );

    state.begin_category_refresh(PoiCategory::Tourism);

    assert_eq!(state.active_category, PoiCategory::Tourism);
    assert_eq!(state.pois.len(), 1);
    assert_eq!(
        state.last_fetched_position,
        Some(Position::new(12.90, 77.50))
    );
}
