use formats::{HeightSample, TerrainSource};

#[derive(Debug, Clone, PartialEq)]
pub enum TerrainError {
    /// The provider could not be constructed or reached.
    Unavailable(String),
    /// A single height query failed.
    Sample {
        lon_deg: f64,
        lat_deg: f64,
        reason: String,
    },
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainError::Unavailable(msg) => write!(f, "terrain unavailable: {msg}"),
            TerrainError::Sample {
                lon_deg,
                lat_deg,
                reason,
            } => write!(f, "terrain sample at ({lon_deg}, {lat_deg}) failed: {reason}"),
        }
    }
}

impl std::error::Error for TerrainError {}

/// Ground height lookup, most detailed level available.
///
/// `Ok(None)` means the provider answered but has no height for the position.
#[allow(async_fn_in_trait)]
pub trait TerrainSampler {
    async fn sample_height(&self, lon_deg: f64, lat_deg: f64) -> Result<Option<f64>, TerrainError>;
}

/// Bare WGS84 ellipsoid: no terrain data anywhere.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct EllipsoidTerrain;

impl TerrainSampler for EllipsoidTerrain {
    async fn sample_height(
        &self,
        _lon_deg: f64,
        _lat_deg: f64,
    ) -> Result<Option<f64>, TerrainError> {
        Ok(None)
    }
}

/// Fixed set of surveyed heights, answered by nearest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightTableTerrain {
    samples: Vec<HeightSample>,
    tolerance_deg: f64,
}

impl HeightTableTerrain {
    pub fn new(samples: Vec<HeightSample>, tolerance_deg: f64) -> Self {
        Self {
            samples,
            tolerance_deg,
        }
    }

    /// Nearest sample within the tolerance (planar distance in degrees).
    pub fn lookup(&self, lon_deg: f64, lat_deg: f64) -> Option<f64> {
        let tol2 = self.tolerance_deg * self.tolerance_deg;
        self.samples
            .iter()
            .map(|s| {
                let dx = s.lon - lon_deg;
                let dy = s.lat - lat_deg;
                (dx * dx + dy * dy, s.height)
            })
            .filter(|(d2, _)| *d2 <= tol2)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, h)| h)
    }
}

impl TerrainSampler for HeightTableTerrain {
    async fn sample_height(&self, lon_deg: f64, lat_deg: f64) -> Result<Option<f64>, TerrainError> {
        Ok(self.lookup(lon_deg, lat_deg))
    }
}

/// Terrain answerable without a rendering host.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalTerrain {
    Ellipsoid(EllipsoidTerrain),
    Heights(HeightTableTerrain),
}

impl LocalTerrain {
    /// Build a local sampler for `source`. Hosted terrain needs the rendering
    /// host and is reported as unavailable.
    pub fn from_source(source: &TerrainSource) -> Result<Self, TerrainError> {
        match source {
            TerrainSource::Ellipsoid => Ok(LocalTerrain::Ellipsoid(EllipsoidTerrain)),
            TerrainSource::Heights {
                samples,
                tolerance_deg,
            } => Ok(LocalTerrain::Heights(HeightTableTerrain::new(
                samples.clone(),
                *tolerance_deg,
            ))),
            TerrainSource::Ion { asset_id } => Err(TerrainError::Unavailable(format!(
                "hosted terrain asset {asset_id} can only be sampled by the rendering host"
            ))),
        }
    }
}

impl TerrainSampler for LocalTerrain {
    async fn sample_height(&self, lon_deg: f64, lat_deg: f64) -> Result<Option<f64>, TerrainError> {
        match self {
            LocalTerrain::Ellipsoid(t) => t.sample_height(lon_deg, lat_deg).await,
            LocalTerrain::Heights(t) => t.sample_height(lon_deg, lat_deg).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EllipsoidTerrain, HeightTableTerrain, LocalTerrain, TerrainError, TerrainSampler};
    use formats::{HeightSample, TerrainSource};

    fn table() -> HeightTableTerrain {
        HeightTableTerrain::new(
            vec![
                HeightSample {
                    lon: 135.60,
                    lat: 35.01,
                    height: 90.0,
                },
                HeightSample {
                    lon: 135.61,
                    lat: 35.01,
                    height: 120.0,
                },
            ],
            0.004,
        )
    }

    #[test]
    fn nearest_sample_within_tolerance() {
        let t = table();
        assert_eq!(t.lookup(135.601, 35.01), Some(90.0));
        assert_eq!(t.lookup(135.608, 35.011), Some(120.0));
        assert_eq!(t.lookup(135.70, 35.01), None);
    }

    #[test]
    fn samplers_answer_asynchronously() {
        let ellipsoid = pollster::block_on(EllipsoidTerrain.sample_height(135.6, 35.0));
        assert_eq!(ellipsoid, Ok(None));
        let heights = pollster::block_on(table().sample_height(135.60, 35.01));
        assert_eq!(heights, Ok(Some(90.0)));
    }

    #[test]
    fn local_terrain_from_config() {
        assert!(matches!(
            LocalTerrain::from_source(&TerrainSource::Ellipsoid),
            Ok(LocalTerrain::Ellipsoid(_))
        ));
        assert!(matches!(
            LocalTerrain::from_source(&TerrainSource::Ion { asset_id: 1 }),
            Err(TerrainError::Unavailable(_))
        ));
    }
}
