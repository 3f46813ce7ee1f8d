use serde::{Deserialize, Serialize};

/// Everything the viewer needs besides the route geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub viewer: ViewerOptions,
    pub terrain: TerrainSource,
    pub imagery: ImageryConfig,
    /// Name of the data source the route is loaded into.
    pub route_name: String,
    pub callouts: Vec<CalloutPoint>,
    pub guides: GuideConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerOptions {
    pub enable_lighting: bool,
    /// RFC 3339 timestamp the scene clock is frozen at.
    pub clock_time: String,
    pub should_animate: bool,
    pub base_layer_picker: bool,
    pub timeline: bool,
    pub animation: bool,
    pub geocoder: bool,
    pub home_button: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            enable_lighting: true,
            clock_time: "2024-06-21T12:00:00Z".to_string(),
            should_animate: false,
            base_layer_picker: false,
            timeline: false,
            animation: false,
            geocoder: false,
            home_button: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainSource {
    /// Hosted quantized-mesh terrain; sampled by the rendering host.
    Ion { asset_id: u64 },
    /// Bare ellipsoid; every sample is missing.
    Ellipsoid,
    /// Fixed height samples, matched to the nearest query within `tolerance_deg`.
    Heights {
        samples: Vec<HeightSample>,
        #[serde(default = "default_tolerance_deg")]
        tolerance_deg: f64,
    },
}

fn default_tolerance_deg() -> f64 {
    0.001
}

impl Default for TerrainSource {
    fn default() -> Self {
        TerrainSource::Ion {
            asset_id: 2_767_062,
        }
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeightSample {
    pub lon: f64,
    pub lat: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImagerySource {
    Ion {
        asset_id: u64,
    },
    UrlTemplate {
        /// `{z}/{x}/{y}` tile URL template.
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        credit: Option<String>,
        #[serde(default)]
        minimum_level: u32,
        #[serde(default = "default_maximum_level")]
        maximum_level: u32,
    },
}

fn default_maximum_level() -> u32 {
    18
}

impl ImagerySource {
    pub fn url_template(url: impl Into<String>, credit: impl Into<String>) -> Self {
        ImagerySource::UrlTemplate {
            url: url.into(),
            credit: Some(credit.into()),
            minimum_level: 2,
            maximum_level: 18,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageryConfig {
    pub satellite: ImagerySource,
    pub standard_map: ImagerySource,
    /// Drawn together as one basemap; the last entry ends up on top.
    pub historical_maps: Vec<ImagerySource>,
    pub alpha: f32,
    pub brightness: f32,
}

impl Default for ImageryConfig {
    fn default() -> Self {
        Self {
            satellite: ImagerySource::Ion {
                asset_id: 3_830_183,
            },
            standard_map: ImagerySource::url_template(
                "https://cyberjapandata.gsi.go.jp/xyz/std/{z}/{x}/{y}.png",
                r#"<a href="https://maps.gsi.go.jp/development/ichiran.html" target="_blank">地理院タイル</a>"#,
            ),
            historical_maps: vec![
                ImagerySource::url_template(
                    "https://mapwarper.h-gis.jp/maps/tile/3547/{z}/{x}/{y}.png",
                    "『京都西北部』五万分一地形圖, 作成: 1948, https://www.gsi.go.jp/",
                ),
                ImagerySource::url_template(
                    "https://mapwarper.h-gis.jp/maps/tile/3546/{z}/{x}/{y}.png",
                    "『京都西南部』五万分一地形圖, 作成: 1946, https://www.gsi.go.jp/",
                ),
            ],
            alpha: 1.0,
            brightness: 0.95,
        }
    }
}

/// A point of interest annotated with a lifted label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalloutPoint {
    pub lon: f64,
    pub lat: f64,
    /// Label height above the sampled ground, in meters.
    pub lift: f64,
    pub text: String,
}

impl CalloutPoint {
    pub fn new(lon: f64, lat: f64, lift: f64, text: impl Into<String>) -> Self {
        Self {
            lon,
            lat,
            lift,
            text: text.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuideConfig {
    /// Toggle button for the route (group A) lines.
    pub route_toggle: bool,
    /// Toggle button for the arrow (group B) lines.
    pub arrows_toggle: bool,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            route_toggle: false,
            arrows_toggle: true,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewer: ViewerOptions::default(),
            terrain: TerrainSource::default(),
            imagery: ImageryConfig::default(),
            route_name: "route".to_string(),
            callouts: Vec::new(),
            guides: GuideConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for SceneConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneConfigError::Parse(msg) => write!(f, "scene config parse error: {msg}"),
            SceneConfigError::Invalid(msg) => write!(f, "invalid scene config: {msg}"),
        }
    }
}

impl std::error::Error for SceneConfigError {}

impl SceneConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, SceneConfigError> {
        let config: SceneConfig =
            serde_json::from_str(payload).map_err(|e| SceneConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SceneConfigError> {
        if self.imagery.historical_maps.is_empty() {
            return Err(SceneConfigError::Invalid(
                "imagery.historical_maps must name at least one source".to_string(),
            ));
        }
        let sources = std::iter::once(&self.imagery.satellite)
            .chain(std::iter::once(&self.imagery.standard_map))
            .chain(self.imagery.historical_maps.iter());
        for source in sources {
            if let ImagerySource::UrlTemplate {
                url,
                minimum_level,
                maximum_level,
                ..
            } = source
                && minimum_level > maximum_level
            {
                return Err(SceneConfigError::Invalid(format!(
                    "{url}: minimum_level {minimum_level} exceeds maximum_level {maximum_level}"
                )));
            }
        }
        for point in &self.callouts {
            if !(point.lon.is_finite() && point.lat.is_finite() && point.lift.is_finite()) {
                return Err(SceneConfigError::Invalid(format!(
                    "callout {:?} has non-finite coordinates",
                    point.text
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GuideConfig, ImagerySource, SceneConfig, SceneConfigError, TerrainSource};
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_config_parses() {
        let payload = include_str!("../../apps/viewer_web/assets/scene.json");
        let config = SceneConfig::from_json_str(payload).expect("parse scene config");

        assert_eq!(config.callouts.len(), 15);
        let first = &config.callouts[0];
        assert_eq!(first.text, "山本浜");
        assert_eq!(first.lift, 250.0);
        assert!((first.lon - 135.6069745327962).abs() < 1e-12);
        assert!((first.lat - 35.014882189208805).abs() < 1e-12);
        assert_eq!(config.callouts[14].text, "渡月橋");
        assert_eq!(config.imagery.historical_maps.len(), 2);
        assert_eq!(config.terrain, TerrainSource::Ion { asset_id: 2767062 });
        assert_eq!(config.guides, GuideConfig::default());
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config = SceneConfig::from_json_str("{}").expect("defaults");
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.imagery.brightness, 0.95);
        assert!(config.viewer.enable_lighting);
        assert_eq!(config.route_name, "route");
    }

    #[test]
    fn terrain_heights_default_tolerance() {
        let config = SceneConfig::from_json_str(
            r#"{"terrain":{"kind":"heights","samples":[{"lon":1.0,"lat":2.0,"height":3.0}]}}"#,
        )
        .expect("parse");
        let TerrainSource::Heights { samples, tolerance_deg } = config.terrain else {
            panic!("expected heights terrain");
        };
        assert_eq!(samples.len(), 1);
        assert_eq!(tolerance_deg, 0.001);
    }

    #[test]
    fn rejects_missing_historical_maps() {
        let err = SceneConfig::from_json_str(r#"{"imagery":{"historical_maps":[]}}"#)
            .expect_err("must fail");
        assert!(matches!(err, SceneConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_levels() {
        let mut config = SceneConfig::default();
        config.imagery.standard_map = ImagerySource::UrlTemplate {
            url: "https://tiles.example/{z}/{x}/{y}.png".to_string(),
            credit: None,
            minimum_level: 10,
            maximum_level: 4,
        };
        assert!(matches!(
            config.validate(),
            Err(SceneConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SceneConfig::from_json_str("{"),
            Err(SceneConfigError::Parse(_))
        ));
    }
}
