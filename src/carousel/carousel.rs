use crate::carousel::error::CarouselError;
use crate::carousel::slide::CarouselSlide;
use crate::fleet::SatelliteId;

/// Ordered slides with a wrapping cursor.
///
/// Every navigation method returns the satellite carried by the slide that
/// became current, so the owner can select it. An empty carousel never
/// moves.
#[derive(Debug, Clone)]
pub struct Carousel {
    slides: Vec<CarouselSlide>,
    current: usize,
}

impl Carousel {
    pub fn new(slides: Vec<CarouselSlide>) -> Self {
        Self { slides, current: 0 }
    }

    pub fn slides(&self) -> &[CarouselSlide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Option<&CarouselSlide> {
        self.slides.get(self.current)
    }

    pub fn previous(&mut self) -> Option<&SatelliteId> {
        let n = self.slides.len();
        if n == 0 {
            return None;
        }
        self.current = (self.current + n - 1) % n;
        self.current_satellite()
    }

    pub fn next(&mut self) -> Option<&SatelliteId> {
        let n = self.slides.len();
        if n == 0 {
            return None;
        }
        self.current = (self.current + 1) % n;
        self.current_satellite()
    }

    /// Jumping to the current slide is a no-op and reports nothing.
    pub fn jump_to(&mut self, index: usize) -> Result<Option<&SatelliteId>, CarouselError> {
        if index >= self.slides.len() {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        if index == self.current {
            return Ok(None);
        }
        self.current = index;
        Ok(self.current_satellite())
    }

    fn current_satellite(&self) -> Option<&SatelliteId> {
        self.current_slide().and_then(|s| s.satellite_id.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::slides_for_fleet;
    use crate::fleet::Fleet;

    fn carousel() -> Carousel {
        Carousel::new(slides_for_fleet(&Fleet::builtin()))
    }

    fn ids(c: Option<&SatelliteId>) -> Option<String> {
        c.map(|id| id.to_string())
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut c = carousel();
        assert_eq!(ids(c.previous()), Some("SAT-004".into()));
        assert_eq!(c.current_index(), 3);
        c.next();
        c.next();
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn next_wraps_to_first() {
        let mut c = carousel();
        for _ in 0..3 {
            c.next();
        }
        assert_eq!(c.current_index(), 3);
        assert_eq!(ids(c.next()), Some("SAT-001".into()));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn next_previous_round_trip() {
        let mut c = carousel();
        for start in 0..c.len() {
            c.jump_to(start).unwrap();
            c.next();
            c.previous();
            assert_eq!(c.current_index(), start);
            c.previous();
            c.next();
            assert_eq!(c.current_index(), start);
        }
    }

    #[test]
    fn jump_to_current_is_noop() {
        let mut c = carousel();
        assert_eq!(c.jump_to(0), Ok(None));
        assert_eq!(ids(c.jump_to(2).unwrap()), Some("SAT-003".into()));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn jump_out_of_range_is_rejected() {
        let mut c = carousel();
        assert_eq!(
            c.jump_to(4),
            Err(CarouselError::OutOfRange { index: 4, len: 4 })
        );
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn empty_carousel_does_not_move() {
        let mut c = Carousel::new(Vec::new());
        assert!(c.is_empty());
        assert_eq!(c.next(), None);
        assert_eq!(c.previous(), None);
        assert_eq!(c.current_index(), 0);
        assert!(c.jump_to(0).is_err());
    }

    #[test]
    fn slides_without_satellite_report_nothing() {
        let mut slides = slides_for_fleet(&Fleet::builtin());
        slides[1].satellite_id = None;
        let mut c = Carousel::new(slides);
        assert_eq!(c.next(), None);
        assert_eq!(c.current_index(), 1);
    }
}
