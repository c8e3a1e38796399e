use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use urania::aspects::{AspectSettings, AspectType};
use urania::ephemeris::{AnalyticEphemeris, Ephemeris};
use urania::geocoding::Gazetteer;
use urania::rendering::{ImageFormat, RenderSettings};
use urania::ChartService;

/// Relative locations tried for `configs/urania.toml`, from the workspace root or a crate dir.
pub const CONFIG_CANDIDATES: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EphemerisBackend {
    #[default]
    Analytic,
    Swisseph,
}

#[derive(Debug, Clone)]
pub struct UraniaSettings {
    pub backend: EphemerisBackend,
    pub ephemeris_path: Option<PathBuf>,
    pub lookup_timeout: Option<Duration>,
    pub cities_path: Option<PathBuf>,
    pub regions_path: Option<PathBuf>,
    pub aspects: AspectSettings,
    pub render: RenderSettings,
    pub output_format: ImageFormat,
    /// File the settings were read from, if any
    pub source: Option<PathBuf>,
}

impl Default for UraniaSettings {
    fn default() -> Self {
        Self {
            backend: EphemerisBackend::Analytic,
            ephemeris_path: None,
            lookup_timeout: None,
            cities_path: None,
            regions_path: None,
            aspects: AspectSettings::default(),
            render: RenderSettings::default(),
            output_format: ImageFormat::Svg,
            source: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EphemerisToml {
    backend: EphemerisBackend,
    path: Option<PathBuf>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct GazetteerToml {
    cities: Option<PathBuf>,
    regions: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AspectsToml {
    orbs: BTreeMap<String, f64>,
    include: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OutputToml {
    format: ImageFormat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RootConfigToml {
    ephemeris: EphemerisToml,
    gazetteer: GazetteerToml,
    aspects: AspectsToml,
    render: RenderSettings,
    output: OutputToml,
}

/// Read the config text from `explicit`, or from the first candidate path that exists.
///
/// An explicit path must exist; with no explicit path and no candidate, `Ok(None)`.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &CONFIG_CANDIDATES {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Parse settings. Relative data paths are resolved against `base_dir`.
pub fn parse_settings(text: &str, base_dir: Option<&Path>) -> anyhow::Result<UraniaSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;

    let mut aspects = AspectSettings::default();
    for (name, orb) in root.aspects.orbs {
        let aspect_type = AspectType::from_str(&name)
            .map_err(|e| anyhow::anyhow!("aspects.orbs: {e}"))?;
        if !(orb.is_finite() && orb >= 0.0) {
            anyhow::bail!("aspects.orbs.{name} must be a non-negative number, got {orb}");
        }
        aspects.orbs.insert(aspect_type, orb);
    }
    aspects.include_objects = root.aspects.include.into_iter().collect();

    let resolve = |p: Option<PathBuf>| p.map(|p| relative_to(base_dir, p));

    Ok(UraniaSettings {
        backend: root.ephemeris.backend,
        ephemeris_path: resolve(root.ephemeris.path),
        lookup_timeout: root.ephemeris.timeout_ms.map(Duration::from_millis),
        cities_path: resolve(root.gazetteer.cities),
        regions_path: resolve(root.gazetteer.regions),
        aspects,
        render: root.render,
        output_format: root.output.format,
        source: None,
    })
}

/// Load settings from `explicit` or the default locations; defaults when nothing is found.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<UraniaSettings> {
    match read_config_text(explicit)? {
        Some((path, text)) => {
            log::info!("Loading settings from {}", path.display());
            let mut settings = parse_settings(&text, path.parent())
                .with_context(|| format!("Invalid config {}", path.display()))?;
            settings.source = Some(path);
            Ok(settings)
        }
        None => {
            log::info!("No urania.toml found in {:?}, using defaults", CONFIG_CANDIDATES);
            Ok(UraniaSettings::default())
        }
    }
}

fn relative_to(base_dir: Option<&Path>, path: PathBuf) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}

impl UraniaSettings {
    pub fn build_ephemeris(&self) -> anyhow::Result<Arc<dyn Ephemeris>> {
        match self.backend {
            EphemerisBackend::Analytic => Ok(Arc::new(AnalyticEphemeris::new())),
            EphemerisBackend::Swisseph => swiss_ephemeris(self.ephemeris_path.clone()),
        }
    }

    pub fn build_gazetteer(&self) -> anyhow::Result<Gazetteer> {
        match &self.cities_path {
            Some(cities) => Gazetteer::from_files(cities, self.regions_path.as_deref())
                .with_context(|| format!("Failed to load gazetteer {}", cities.display())),
            None => {
                if let Some(regions) = &self.regions_path {
                    log::warn!(
                        "gazetteer.regions {} ignored without gazetteer.cities",
                        regions.display()
                    );
                }
                Gazetteer::builtin().context("Failed to load built-in gazetteer")
            }
        }
    }

    /// Wire a chart service from these settings.
    pub fn build_service(&self) -> anyhow::Result<ChartService> {
        let service = ChartService::new(
            self.build_ephemeris()?,
            Arc::new(self.build_gazetteer()?),
            self.aspects.clone(),
            self.render.clone(),
        );
        Ok(match self.lookup_timeout {
            Some(timeout) => service.with_lookup_timeout(timeout),
            None => service,
        })
    }
}

#[cfg(feature = "swisseph")]
fn swiss_ephemeris(path: Option<PathBuf>) -> anyhow::Result<Arc<dyn Ephemeris>> {
    let adapter = urania::ephemeris::SwissEphemerisAdapter::new(path)
        .context("Failed to initialise Swiss Ephemeris")?;
    Ok(Arc::new(adapter))
}

#[cfg(not(feature = "swisseph"))]
fn swiss_ephemeris(_path: Option<PathBuf>) -> anyhow::Result<Arc<dyn Ephemeris>> {
    anyhow::bail!("ephemeris.backend = \"swisseph\" requires building with the `swisseph` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = parse_settings("", None).unwrap();
        assert_eq!(settings.backend, EphemerisBackend::Analytic);
        assert_eq!(settings.aspects, AspectSettings::default());
        assert_eq!(settings.render, RenderSettings::default());
        assert_eq!(settings.output_format, ImageFormat::Svg);
        assert!(settings.lookup_timeout.is_none());
    }

    #[test]
    fn test_overrides_are_applied() {
        let text = r#"
            [ephemeris]
            timeout_ms = 250

            [aspects]
            include = ["Sun", "Moon"]

            [aspects.orbs]
            trine = 5.5

            [render]
            width = 1024
            draw_ticks = false

            [output]
            format = "png"
        "#;
        let settings = parse_settings(text, None).unwrap();
        assert_eq!(settings.lookup_timeout, Some(Duration::from_millis(250)));
        assert_eq!(settings.aspects.orb_for(AspectType::Trine), 5.5);
        assert_eq!(settings.aspects.orb_for(AspectType::Square), 8.0);
        assert!(settings.aspects.includes("Moon"));
        assert!(!settings.aspects.includes("Mars"));
        assert_eq!(settings.render.width, 1024);
        assert_eq!(settings.render.height, 800);
        assert!(!settings.render.draw_ticks);
        assert_eq!(settings.output_format, ImageFormat::Png);
    }

    #[test]
    fn test_unknown_aspect_is_an_error() {
        let err = parse_settings("[aspects.orbs]\nquincunx = 3.0\n", None).unwrap_err();
        assert!(err.to_string().contains("quincunx"));
    }

    #[test]
    fn test_negative_orb_is_an_error() {
        assert!(parse_settings("[aspects.orbs]\nsquare = -1.0\n", None).is_err());
    }

    #[test]
    fn test_relative_paths_follow_config_dir() {
        let text = "[gazetteer]\ncities = \"data/cities.json\"\nregions = \"/abs/regions.toml\"\n";
        let settings = parse_settings(text, Some(Path::new("/etc/urania"))).unwrap();
        assert_eq!(
            settings.cities_path,
            Some(PathBuf::from("/etc/urania/data/cities.json"))
        );
        assert_eq!(settings.regions_path, Some(PathBuf::from("/abs/regions.toml")));
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        assert!(load_settings(Some(Path::new("/no/such/urania.toml"))).is_err());
    }

    #[test]
    fn test_load_from_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urania.toml");
        fs::write(&path, "[render]\nheight = 640\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.render.height, 640);
        assert_eq!(settings.source.as_deref(), Some(path.as_path()));
    }

    #[cfg(not(feature = "swisseph"))]
    #[test]
    fn test_swisseph_backend_needs_feature() {
        let settings = parse_settings("[ephemeris]\nbackend = \"swisseph\"\n", None).unwrap();
        assert!(settings.build_ephemeris().is_err());
    }

    #[tokio::test]
    async fn test_default_service_resolves() {
        let service = UraniaSettings::default().build_service().unwrap();
        let chart = service
            .resolve_positions("1969-07-20", "16:17", "Houston, TX")
            .await
            .unwrap();
        assert_eq!(chart.houses.len(), 12);
    }
}
