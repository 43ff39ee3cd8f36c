use serde::Serialize;
use utoipa::ToSchema;

use crate::fleet::{Fleet, SatelliteId, SatelliteStatus};

pub const DEFAULT_IMAGES: [&str; 4] = [
    "/static/starlink.webp",
    "/static/iss-module.jpg",
    "/static/hubble-main.webp",
    "/static/gps.jpg",
];

const BUTTON_LABEL: &str = "Selected";

/// Display projection of a satellite in the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CarouselSlide {
    pub title: String,
    pub button_label: String,
    pub image_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satellite_id: Option<SatelliteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SatelliteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

/// One slide per satellite, in fleet order. Records without an image cycle
/// through [`DEFAULT_IMAGES`] by position.
pub fn slides_for_fleet(fleet: &Fleet) -> Vec<CarouselSlide> {
    fleet
        .iter()
        .enumerate()
        .map(|(i, sat)| CarouselSlide {
            title: sat.name.clone(),
            button_label: BUTTON_LABEL.to_string(),
            image_ref: sat
                .image
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGES[i % DEFAULT_IMAGES.len()].to_string()),
            satellite_id: Some(sat.id.clone()),
            status: Some(sat.status),
            last_update: Some(sat.last_update.clone()),
        })
        .collect()
}
