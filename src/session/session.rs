use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::carousel::{slides_for_fleet, Carousel, CarouselError};
use crate::fleet::{Fleet, SatelliteId, SatelliteRecord};
use crate::forecast::{generate, ErrorSeries};

/// Selection state of one dashboard view.
///
/// Carousel navigation always selects the satellite of the slide it lands
/// on. Selecting a satellite directly (e.g. from the fleet side panel)
/// regenerates the forecast but leaves the carousel where it is, so the two
/// can disagree until the next navigation; see [`Session::is_synchronized`].
pub struct Session {
    fleet: Arc<Fleet>,
    carousel: Carousel,
    selected: SatelliteId,
    series: ErrorSeries,
    last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(fleet: Arc<Fleet>, now: DateTime<Utc>) -> Self {
        let first = fleet.first();
        let selected = first.id.clone();
        let series = generate(&selected, first.degraded, now);
        let carousel = Carousel::new(slides_for_fleet(&fleet));

        Self {
            fleet,
            carousel,
            selected,
            series,
            last_active: now,
        }
    }

    pub fn selected_satellite_id(&self) -> &SatelliteId {
        &self.selected
    }

    /// Fleet record of the selection, if the id is known to the fleet.
    pub fn selected_satellite(&self) -> Option<&SatelliteRecord> {
        self.fleet.get(&self.selected)
    }

    pub fn series(&self) -> &ErrorSeries {
        &self.series
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn current_slide_index(&self) -> usize {
        self.carousel.current_index()
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = now;
    }

    /// Select a satellite and regenerate its forecast. Unknown ids are
    /// accepted and treated as nominal.
    pub fn select_satellite(&mut self, id: SatelliteId, now: DateTime<Utc>) {
        let degraded = self.fleet.is_degraded(&id);
        if self.fleet.get(&id).is_none() {
            log::debug!("Selecting satellite {} outside the fleet", id);
        }
        self.series = generate(&id, degraded, now);
        self.selected = id;
        self.last_active = now;
    }

    pub fn navigate_previous(&mut self, now: DateTime<Utc>) {
        let landed = self.carousel.previous().cloned();
        self.after_navigation(landed, now);
    }

    pub fn navigate_next(&mut self, now: DateTime<Utc>) {
        let landed = self.carousel.next().cloned();
        self.after_navigation(landed, now);
    }

    pub fn jump_to(&mut self, index: usize, now: DateTime<Utc>) -> Result<(), CarouselError> {
        let landed = self.carousel.jump_to(index)?.cloned();
        self.after_navigation(landed, now);
        Ok(())
    }

    /// True when the current slide shows the selected satellite, or carries
    /// no satellite at all.
    pub fn is_synchronized(&self) -> bool {
        match self.carousel.current_slide() {
            Some(slide) => slide
                .satellite_id
                .as_ref()
                .map_or(true, |id| id == &self.selected),
            None => true,
        }
    }

    fn after_navigation(&mut self, landed: Option<SatelliteId>, now: DateTime<Utc>) {
        match landed {
            Some(id) => self.select_satellite(id, now),
            None => self.touch(now),
        }
    }
}
