//! Headless driver: builds the scene from files and prints its snapshot.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use foundation::Viewport;
use formats::{SceneConfig, TerrainSource, VectorChunk};
use layers::{EllipsoidTerrain, LocalTerrain};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use viewer::{SceneSnapshot, StartupError, build_scene};

#[derive(Debug, Parser)]
#[command(name = "viewer_native", about = "Build the route scene and print it as JSON")]
struct Args {
    /// Scene config (JSON).
    #[arg(
        long,
        env = "SCENE_CONFIG",
        default_value = "crates/apps/viewer_web/assets/scene.json"
    )]
    config: PathBuf,
    /// Route document (GeoJSON FeatureCollection).
    #[arg(
        long,
        env = "SCENE_ROUTE",
        default_value = "crates/apps/viewer_web/assets/route.geojson"
    )]
    route: PathBuf,
    /// Viewport width in CSS pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    #[arg(long, default_value_t = 1.0)]
    device_pixel_ratio: f64,
    /// Pretty-print the snapshot.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug)]
enum DriverError {
    Read { path: PathBuf, source: std::io::Error },
    Startup(StartupError),
    Encode(serde_json::Error),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Read { path, source } => write!(f, "reading {}: {source}", path.display()),
            DriverError::Startup(err) => write!(f, "{err}"),
            DriverError::Encode(err) => write!(f, "encoding snapshot: {err}"),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<StartupError> for DriverError {
    fn from(err: StartupError) -> Self {
        DriverError::Startup(err)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<String, DriverError> {
    let config_text = read(&args.config).await?;
    let route_text = read(&args.route).await?;
    let config = SceneConfig::from_json_str(&config_text).map_err(StartupError::from)?;
    let route = VectorChunk::from_geojson_str(&route_text).map_err(StartupError::from)?;

    let terrain = local_terrain(&config.terrain);
    let viewport = Viewport::new(args.width, args.device_pixel_ratio);
    let ctx = build_scene(&config, &route, &terrain, viewport).await?;
    info!(
        entities = ctx.entities.len(),
        route_entities = ctx.route.entities.len(),
        "scene built"
    );

    let snapshot = SceneSnapshot::capture(&ctx);
    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        snapshot.to_json()
    };
    json.map_err(DriverError::Encode)
}

async fn read(path: &Path) -> Result<String, DriverError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DriverError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Hosted terrain needs the browser; offline the ellipsoid stands in.
fn local_terrain(source: &TerrainSource) -> LocalTerrain {
    match LocalTerrain::from_source(source) {
        Ok(terrain) => terrain,
        Err(err) => {
            warn!("{err}; callouts sit on the ellipsoid");
            LocalTerrain::Ellipsoid(EllipsoidTerrain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Args, local_terrain};
    use clap::Parser;
    use formats::TerrainSource;
    use layers::LocalTerrain;

    #[test]
    fn hosted_terrain_falls_back_to_ellipsoid() {
        let terrain = local_terrain(&TerrainSource::Ion { asset_id: 1 });
        assert!(matches!(terrain, LocalTerrain::Ellipsoid(_)));
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "viewer_native",
            "--config",
            "a.json",
            "--route",
            "b.geojson",
            "--width",
            "375",
        ]);
        assert_eq!(args.config.to_str(), Some("a.json"));
        assert_eq!(args.route.to_str(), Some("b.geojson"));
        assert_eq!(args.width, 375.0);
        assert!(!args.pretty);
    }
}
