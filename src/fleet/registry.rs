use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::fleet::error::FleetError;
use crate::fleet::types::{SatelliteId, SatelliteRecord, SatelliteStatus};

#[derive(Debug, Deserialize)]
struct FleetFile {
    satellites: Vec<SatelliteRecord>,
}

/// Ordered, non-empty set of satellites known to the dashboard.
#[derive(Debug, Clone)]
pub struct Fleet {
    satellites: Vec<SatelliteRecord>,
}

impl Fleet {
    pub fn new(satellites: Vec<SatelliteRecord>) -> Result<Self, FleetError> {
        if satellites.is_empty() {
            return Err(FleetError::Empty);
        }

        let mut seen = HashSet::new();
        for sat in &satellites {
            if !seen.insert(&sat.id) {
                return Err(FleetError::DuplicateId(sat.id.to_string()));
            }
        }

        Ok(Self { satellites })
    }

    /// The four demo satellites shipped with the dashboard.
    pub fn builtin() -> Self {
        let record = |id: &str, name: &str, status, last_update: &str, degraded| SatelliteRecord {
            id: SatelliteId::from(id),
            name: name.to_string(),
            status,
            last_update: last_update.to_string(),
            degraded,
            image: None,
        };

        Self {
            satellites: vec![
                record("SAT-001", "Starlink-15240", SatelliteStatus::Active, "2 min ago", false),
                record("SAT-002", "ISS Module-7", SatelliteStatus::Warning, "5 min ago", false),
                record("SAT-003", "Hubble-Main", SatelliteStatus::Active, "1 min ago", false),
                record("SAT-004", "GPS-IIF-12", SatelliteStatus::Error, "8 min ago", true),
            ],
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, FleetError> {
        let file: FleetFile = serde_yaml::from_str(yaml)?;
        Self::new(file.satellites)
    }

    pub fn from_file(path: &Path) -> Result<Self, FleetError> {
        let content = fs::read_to_string(path)?;
        let fleet = Self::from_yaml(&content)?;
        log::info!(
            "Loaded {} satellites from {}",
            fleet.len(),
            path.display()
        );
        Ok(fleet)
    }

    pub fn get(&self, id: &SatelliteId) -> Option<&SatelliteRecord> {
        self.satellites.iter().find(|s| &s.id == id)
    }

    pub fn first(&self) -> &SatelliteRecord {
        // Non-empty by construction
        &self.satellites[0]
    }

    pub fn is_degraded(&self, id: &SatelliteId) -> bool {
        self.get(id).map(|s| s.degraded).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SatelliteRecord> {
        self.satellites.iter()
    }

    pub fn records(&self) -> &[SatelliteRecord] {
        &self.satellites
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_fleet_flags_gps_as_degraded() {
        let fleet = Fleet::builtin();
        assert_eq!(fleet.len(), 4);
        assert_eq!(fleet.first().id.as_str(), "SAT-001");
        assert!(fleet.is_degraded(&SatelliteId::from("SAT-004")));
        assert!(!fleet.is_degraded(&SatelliteId::from("SAT-002")));
        assert!(!fleet.is_degraded(&SatelliteId::from("SAT-999")));
    }

    #[test]
    fn parses_yaml_with_defaults() {
        let yaml = r#"
satellites:
  - id: GAL-11
    name: Galileo FOC-11
    status: warning
    last_update: 3 min ago
  - id: GAL-12
    name: Galileo FOC-12
    status: error
    last_update: 9 min ago
    degraded: true
    image: /static/galileo.jpg
"#;
        let fleet = Fleet::from_yaml(yaml).unwrap();
        assert_eq!(fleet.len(), 2);
        let first = fleet.first();
        assert_eq!(first.status, SatelliteStatus::Warning);
        assert!(!first.degraded);
        assert_eq!(first.image, None);
        let second = fleet.get(&SatelliteId::from("GAL-12")).unwrap();
        assert!(second.degraded);
        assert_eq!(second.image.as_deref(), Some("/static/galileo.jpg"));
    }

    #[test]
    fn rejects_empty_fleet() {
        assert!(matches!(
            Fleet::from_yaml("satellites: []"),
            Err(FleetError::Empty)
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let yaml = r#"
satellites:
  - { id: A, name: One, status: active, last_update: now }
  - { id: A, name: Two, status: active, last_update: now }
"#;
        match Fleet::from_yaml(yaml) {
            Err(FleetError::DuplicateId(id)) => assert_eq!(id, "A"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let yaml = "satellites:\n  - { id: A, name: One, status: lost, last_update: now }\n";
        assert!(matches!(Fleet::from_yaml(yaml), Err(FleetError::Yaml(_))));
    }
}
