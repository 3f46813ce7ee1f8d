use serde_json::{Map, Value};

/// Longitude/latitude in degrees with an optional height in meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub height_m: Option<f64>,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            height_m: None,
        }
    }

    pub fn with_height(lon_deg: f64, lat_deg: f64, height_m: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            height_m: Some(height_m),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VectorGeometry {
    Point(GeoPoint),
    MultiPoint(Vec<GeoPoint>),
    LineString(Vec<GeoPoint>),
    MultiLineString(Vec<Vec<GeoPoint>>),
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}

impl VectorGeometry {
    /// Every position of the geometry, in document order.
    pub fn positions(&self) -> Vec<GeoPoint> {
        match self {
            VectorGeometry::Point(p) => vec![*p],
            VectorGeometry::MultiPoint(ps) | VectorGeometry::LineString(ps) => ps.clone(),
            VectorGeometry::MultiLineString(rings) | VectorGeometry::Polygon(rings) => {
                rings.iter().flatten().copied().collect()
            }
            VectorGeometry::MultiPolygon(polys) => {
                polys.iter().flatten().flatten().copied().collect()
            }
        }
    }

    /// Line strings of a line geometry; empty for points and areas.
    pub fn lines(&self) -> Vec<&[GeoPoint]> {
        match self {
            VectorGeometry::LineString(points) => vec![points.as_slice()],
            VectorGeometry::MultiLineString(lines) => lines.iter().map(|l| l.as_slice()).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    /// `None` for features with a `null` geometry (placeholders).
    pub geometry: Option<VectorGeometry>,
}

impl VectorFeature {
    /// String value of a property; numbers and booleans are stringified.
    pub fn property_str(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Display name: the `title` property, falling back to `name`.
    pub fn name(&self) -> Option<String> {
        self.property_str("title")
            .or_else(|| self.property_str("name"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorChunk {
    pub name: Option<String>,
    pub features: Vec<VectorFeature>,
}

#[derive(Debug)]
pub enum VectorChunkError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for VectorChunkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorChunkError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            VectorChunkError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for VectorChunkError {}

impl VectorChunk {
    /// `[west, south, east, north]` in degrees over all features, or `None`
    /// when no feature has a geometry.
    pub fn bounds_deg(&self) -> Option<[f64; 4]> {
        let mut bounds: Option<[f64; 4]> = None;
        for p in self
            .features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .flat_map(|g| g.positions())
        {
            let b = bounds.get_or_insert([p.lon_deg, p.lat_deg, p.lon_deg, p.lat_deg]);
            b[0] = b[0].min(p.lon_deg);
            b[1] = b[1].min(p.lat_deg);
            b[2] = b[2].max(p.lon_deg);
            b[3] = b[3].max(p.lat_deg);
        }
        bounds
    }

    pub fn from_geojson_str(payload: &str) -> Result<Self, VectorChunkError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| VectorChunkError::InvalidFeature {
                index: 0,
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, VectorChunkError> {
        let obj = value
            .as_object()
            .ok_or(VectorChunkError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(VectorChunkError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(VectorChunkError::NotAFeatureCollection);
        }

        let name = obj.get("name").and_then(|v| v.as_str()).map(str::to_string);
        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(VectorChunkError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            features.push(parse_feature(index, feat_val)?);
        }

        Ok(Self { name, features })
    }
}

fn parse_feature(index: usize, value: &Value) -> Result<VectorFeature, VectorChunkError> {
    let invalid = |reason: String| VectorChunkError::InvalidFeature { index, reason };

    let feat_obj = value
        .as_object()
        .ok_or_else(|| invalid("feature must be an object".to_string()))?;
    let feat_type = feat_obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid("feature missing type".to_string()))?;
    if feat_type != "Feature" {
        return Err(invalid(format!("unexpected feature type: {feat_type}")));
    }

    let id = match feat_obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = feat_obj
        .get("properties")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    // A missing member and an explicit `null` both mean "no geometry".
    let geometry = match feat_obj.get("geometry") {
        None | Some(Value::Null) => None,
        Some(g) => Some(parse_geometry(g).map_err(invalid)?),
    };

    Ok(VectorFeature {
        id,
        properties,
        geometry,
    })
}

fn parse_geometry(value: &Value) -> Result<VectorGeometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Point" => Ok(VectorGeometry::Point(parse_position(coords)?)),
        "MultiPoint" => Ok(VectorGeometry::MultiPoint(parse_positions(coords)?)),
        "LineString" => Ok(VectorGeometry::LineString(parse_positions(coords)?)),
        "MultiLineString" => Ok(VectorGeometry::MultiLineString(parse_nested(coords)?)),
        "Polygon" => Ok(VectorGeometry::Polygon(parse_nested(coords)?)),
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
            let mut out = Vec::with_capacity(polys.len());
            for poly in polys {
                out.push(parse_nested(poly)?);
            }
            Ok(VectorGeometry::MultiPolygon(out))
        }
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

/// `[lon, lat]` or `[lon, lat, height]`.
fn parse_position(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    match arr.get(2) {
        None => Ok(GeoPoint::new(lon, lat)),
        Some(h) => {
            let h = h.as_f64().ok_or("height must be a number".to_string())?;
            Ok(GeoPoint::with_height(lon, lat, h))
        }
    }
}

fn parse_positions(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_nested(coords: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array of arrays".to_string())?;
    arr.iter().map(parse_positions).collect()
}
