mod carousel;
mod error;
mod slide;

pub use carousel::Carousel;
pub use error::CarouselError;
pub use slide::{slides_for_fleet, CarouselSlide, DEFAULT_IMAGES};
