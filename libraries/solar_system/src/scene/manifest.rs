use crate::body::BodyInfo;
use crate::scene::error::ManifestError;
use bevy::math::Vec3;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

const BUILTIN: &str = include_str!("../../../../assets/systems/solar.system.yaml");

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SunConfig {
    pub name: String,
    pub radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    pub rotation_speed: f32,
    #[serde(default)]
    pub info: BodyInfo,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RingConfig {
    pub inner: f32,
    pub outer: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanetConfig {
    pub name: String,
    pub radius: f32,
    /// Orbit radius around the sun.
    pub distance: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    pub orbit_speed: f32,
    pub rotation_speed: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<RingConfig>,
    #[serde(default)]
    pub info: BodyInfo,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CameraConfig {
    pub position: Vec3,
    #[serde(default)]
    pub target: Vec3,
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 60.0, 160.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TourConfig {
    pub dwell_seconds: f32,
    pub flight_seconds: f32,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            dwell_seconds: 4.5,
            flight_seconds: 2.0,
        }
    }
}

impl TourConfig {
    /// Falls back to zero for values a validated manifest cannot hold.
    pub fn dwell(&self) -> Duration {
        Duration::try_from_secs_f32(self.dwell_seconds).unwrap_or_default()
    }

    pub fn flight(&self) -> Duration {
        Duration::try_from_secs_f32(self.flight_seconds).unwrap_or_default()
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn check_seconds(key: &'static str, seconds: f32) -> Result<(), ManifestError> {
    match Duration::try_from_secs_f32(seconds) {
        Ok(_) if is_positive(seconds) => Ok(()),
        _ => Err(ManifestError::InvalidDuration(key)),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StarfieldConfig {
    pub count: usize,
    /// Side length of the cube the stars are scattered in.
    pub extent: f32,
    pub seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 4500,
            extent: 1800.0,
            seed: 0x5747,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SolarSystemManifest {
    pub sun: SunConfig,
    #[serde(default)]
    pub planets: Vec<PlanetConfig>,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub tour: TourConfig,
    #[serde(default)]
    pub starfield: StarfieldConfig,
}

impl SolarSystemManifest {
    /// The sun and eight planets shipped with the application.
    pub fn builtin() -> Result<Self, ManifestError> {
        Self::from_yaml(BUILTIN)
    }

    pub fn from_yaml(input: &str) -> Result<Self, ManifestError> {
        let manifest = serde_yaml::from_str::<Self>(input)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        debug!("Loading solar system manifest from {}", path.display());
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    pub fn body_count(&self) -> usize {
        1 + self.planets.len()
    }

    fn validate(&self) -> Result<(), ManifestError> {
        use ManifestError::*;

        let mut names = HashSet::new();
        let bodies = std::iter::once((&self.sun.name, self.sun.radius))
            .chain(self.planets.iter().map(|p| (&p.name, p.radius)));
        for (name, radius) in bodies {
            if !is_positive(radius) {
                return Err(NonPositiveRadius(name.clone()));
            }
            if !names.insert(name.as_str()) {
                return Err(DuplicateName(name.clone()));
            }
        }
        for planet in &self.planets {
            if let Some(ring) = &planet.ring {
                let ordered = ring.inner < ring.outer;
                if !(is_positive(ring.inner) && is_positive(ring.outer) && ordered) {
                    return Err(InvalidRing(planet.name.clone()));
                }
            }
        }
        check_seconds("dwell-seconds", self.tour.dwell_seconds)?;
        check_seconds("flight-seconds", self.tour.flight_seconds)?;
        if !is_positive(self.starfield.extent) {
            return Err(InvalidStarfieldExtent(self.starfield.extent));
        }
        Ok(())
    }
}

/// The manifest the running scene was built from.
#[derive(Debug, Clone, Resource, Deref)]
pub struct ActiveSystem(pub SolarSystemManifest);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const MINIMAL: &str = r#"
sun:
  name: Sol
  radius: 2
  rotation-speed: 0.01
planets:
  - name: Rock
    radius: 0.5
    distance: 10
    orbit-speed: 0.004
    rotation-speed: 0.01
"#;

    #[test]
    fn builtin_describes_sun_and_eight_planets() {
        let manifest = SolarSystemManifest::builtin().unwrap();
        assert_eq!(manifest.body_count(), 9);
        assert_eq!(manifest.sun.name, "Sun");
        assert_eq!(manifest.sun.radius, 8.0);

        let saturn = manifest.planets.iter().find(|p| p.name == "Saturn").unwrap();
        let ring = saturn.ring.as_ref().unwrap();
        assert_eq!((ring.inner, ring.outer), (5.0, 8.0));
        assert_eq!(saturn.info.moons, "82");

        assert_eq!(manifest.camera.position, Vec3::new(0.0, 60.0, 160.0));
        assert_abs_diff_eq!(manifest.tour.dwell_seconds, 4.5);
        assert_abs_diff_eq!(manifest.tour.flight_seconds, 2.0);
        assert_eq!(manifest.starfield.count, 4500);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let manifest = SolarSystemManifest::from_yaml(MINIMAL).unwrap();
        assert_eq!(manifest.body_count(), 2);
        assert_eq!(manifest.camera.fov_degrees, 45.0);
        assert_eq!(manifest.tour.dwell(), Duration::from_millis(4500));
        assert_eq!(manifest.tour.flight(), Duration::from_secs(2));
        assert!(manifest.planets[0].ring.is_none());
        assert!(manifest.planets[0].texture.is_none());
    }

    #[test]
    fn sun_is_required() {
        let err = SolarSystemManifest::from_yaml("planets: []").unwrap_err();
        assert!(matches!(err, ManifestError::ParseError(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let input = MINIMAL.replace("name: Rock", "name: Sol");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateName(name) if name == "Sol"));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let input = MINIMAL.replace("radius: 0.5", "radius: 0");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::NonPositiveRadius(name) if name == "Rock"));
    }

    #[test]
    fn rejects_inverted_ring() {
        let input = format!("{MINIMAL}    ring: {{ inner: 3, outer: 1 }}\n");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidRing(name) if name == "Rock"));
    }

    #[test]
    fn rejects_zero_dwell() {
        let input = format!("{MINIMAL}tour:\n  dwell-seconds: 0\n  flight-seconds: 2\n");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidDuration("dwell-seconds")));
    }

    #[test]
    fn rejects_empty_starfield_volume() {
        let input = format!("{MINIMAL}starfield:\n  count: 10\n  extent: 0\n  seed: 1\n");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidStarfieldExtent(_)));
    }

    #[test]
    fn rejects_nan_dwell() {
        let input = format!("{MINIMAL}tour:\n  dwell-seconds: .nan\n  flight-seconds: 2\n");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidDuration("dwell-seconds")));
    }

    #[test]
    fn rejects_oversized_flight() {
        let input = format!("{MINIMAL}tour:\n  dwell-seconds: 4\n  flight-seconds: 1e30\n");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidDuration("flight-seconds")));
    }

    #[test]
    fn rejects_infinite_extent() {
        let input = format!("{MINIMAL}starfield:\n  count: 10\n  extent: .inf\n  seed: 1\n");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidStarfieldExtent(_)));
    }

    #[test]
    fn rejects_nan_radius_and_ring() {
        let input = MINIMAL.replace("radius: 0.5", "radius: .nan");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::NonPositiveRadius(name) if name == "Rock"));

        let input = format!("{MINIMAL}    ring: {{ inner: 1, outer: .nan }}\n");
        let err = SolarSystemManifest::from_yaml(&input).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidRing(name) if name == "Rock"));
    }
}
