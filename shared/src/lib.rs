use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A WGS84 position. Fields are private so a constructed point is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lon)
    }
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// For constants; an out-of-range literal fails const evaluation.
    pub const fn from_const(lat: f64, lon: f64) -> Self {
        assert!(lat >= -90.0 && lat <= 90.0, "latitude out of range");
        assert!(lon >= -180.0 && lon <= 180.0, "longitude out of range");
        Self { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidCoordinate {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
}

/// Rectangular region of interest.
///
/// `east` and `west` are stored exactly as the deployment defines them; no
/// ordering between them is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl BoundingBox {
    /// Checked constructor, `None` unless `north > south`.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Option<Self> {
        (north > south).then_some(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// For constants; `north <= south` fails const evaluation.
    pub const fn from_edges(north: f64, south: f64, east: f64, west: f64) -> Self {
        assert!(north > south, "north must exceed south");
        Self {
            north,
            south,
            east,
            west,
        }
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    /// `west,south,east,north`, the order geocoder viewboxes expect.
    pub fn viewbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

/// One candidate route, serialized as an array of `[lat, lon]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct Path(Vec<GeoPoint>);

impl Path {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<GeoPoint> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<GeoPoint> {
        self.0.last().copied()
    }
}

impl TryFrom<Vec<[f64; 2]>> for Path {
    type Error = InvalidCoordinate;

    fn try_from(pairs: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        pairs
            .into_iter()
            .map(|[lat, lon]| GeoPoint::new(lat, lon))
            .collect::<Result<Vec<_>, _>>()
            .map(Path)
    }
}

impl From<Path> for Vec<[f64; 2]> {
    fn from(path: Path) -> Self {
        path.0.into_iter().map(|p| [p.lat, p.lon]).collect()
    }
}

/// Primary path plus alternates, in the order the routing service returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub primary: Option<Path>,
    pub alternates: Vec<Path>,
}

impl RouteResult {
    /// First path becomes the primary, the rest stay alternates.
    pub fn from_paths(paths: Vec<Path>) -> Self {
        let mut paths = paths.into_iter();
        let primary = paths.next();
        Self {
            primary,
            alternates: paths.collect(),
        }
    }

    /// The service answered but had nothing to offer.
    pub fn is_no_path_found(&self) -> bool {
        self.primary.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// One row of a Nominatim-style search response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeCandidate {
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
    #[serde(default)]
    pub display_name: Option<String>,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
    }

    match Loose::deserialize(deserializer)? {
        Loose::Number(v) => Ok(v),
        Loose::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// `{ lon, lat }` as the routing service expects it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl From<GeoPoint> for LonLat {
    fn from(p: GeoPoint) -> Self {
        Self {
            lon: p.lon(),
            lat: p.lat(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsRequest {
    pub origin: LonLat,
    pub destination: LonLat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsResponse {
    pub paths: Vec<Path>,
}

/// Body of `POST /api/plan`: either two place names or two points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanRequest {
    Points {
        origin: GeoPoint,
        destination: GeoPoint,
    },
    Queries {
        origin: String,
        destination: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    #[serde(flatten)]
    pub route: RouteResult,
    pub no_path_found: bool,
}

impl From<RouteResult> for PlanResponse {
    fn from(route: RouteResult) -> Self {
        let no_path_found = route.is_no_path_found();
        Self {
            route,
            no_path_found,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionResponse {
    pub bounds: BoundingBox,
    pub center: GeoPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn geo_point_deserialization_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"lat": 12.97, "lon": 77.59}"#).unwrap();
        assert_eq!(ok.lat(), 12.97);
        assert!(serde_json::from_str::<GeoPoint>(r#"{"lat": 120.0, "lon": 0.0}"#).is_err());
    }

    #[test]
    fn bounding_box_requires_north_above_south() {
        assert!(BoundingBox::new(10.0, 10.0, 0.0, 1.0).is_none());
        assert!(BoundingBox::new(11.0, 10.0, 0.0, 1.0).is_some());
    }

    #[test]
    #[should_panic(expected = "north must exceed south")]
    fn from_edges_rejects_inverted_latitudes() {
        let _ = BoundingBox::from_edges(1.0, 2.0, 0.0, 1.0);
    }

    #[test]
    fn invalid_coordinate_messages() {
        assert_eq!(
            GeoPoint::new(91.0, 0.0).unwrap_err().to_string(),
            "latitude 91 outside [-90, 90]"
        );
        assert_eq!(
            GeoPoint::new(0.0, 200.5).unwrap_err().to_string(),
            "longitude 200.5 outside [-180, 180]"
        );
    }

    #[test]
    fn viewbox_is_west_south_east_north() {
        let bbox = BoundingBox::from_edges(4.0, 3.0, 2.0, 1.0);
        assert_eq!(bbox.viewbox(), "1,3,2,4");
    }

    #[test]
    fn path_uses_lat_lon_pairs_on_the_wire() {
        let path: Path = serde_json::from_str("[[12.97, 77.59], [12.93, 77.61]]").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.first().map(|p| p.lon()), Some(77.59));
        assert_eq!(
            serde_json::to_value(&path).unwrap(),
            serde_json::json!([[12.97, 77.59], [12.93, 77.61]])
        );
    }

    #[test]
    fn path_with_invalid_point_is_rejected() {
        assert!(serde_json::from_str::<Path>("[[95.0, 77.59]]").is_err());
    }

    #[test]
    fn route_result_splits_primary_from_alternates() {
        let a = Path::new(vec![GeoPoint::new(1.0, 1.0).unwrap()]);
        let b = Path::new(vec![GeoPoint::new(2.0, 2.0).unwrap()]);
        let c = Path::new(vec![GeoPoint::new(3.0, 3.0).unwrap()]);

        let result = RouteResult::from_paths(vec![a.clone(), b.clone(), c.clone()]);
        assert_eq!(result.primary, Some(a));
        assert_eq!(result.alternates, vec![b, c]);
        assert!(!result.is_no_path_found());
    }

    #[test]
    fn empty_route_result_is_no_path_found() {
        let result = RouteResult::from_paths(Vec::new());
        assert!(result.primary.is_none());
        assert!(result.alternates.is_empty());
        assert!(result.is_no_path_found());
    }

    #[test]
    fn geocode_candidate_accepts_strings_and_numbers() {
        let rows: Vec<GeocodeCandidate> = serde_json::from_str(
            r#"[{"lat": "12.97", "lon": "77.59", "display_name": "MG Road"}, {"lat": 12.93, "lon": 77.61}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].lat, 12.97);
        assert_eq!(rows[1].lon, 77.61);
        assert!(rows[1].display_name.is_none());
    }

    #[test]
    fn plan_request_distinguishes_points_from_queries() {
        let points: PlanRequest = serde_json::from_str(
            r#"{"origin": {"lat": 12.97, "lon": 77.59}, "destination": {"lat": 12.93, "lon": 77.61}}"#,
        )
        .unwrap();
        assert!(matches!(points, PlanRequest::Points { .. }));

        let queries: PlanRequest =
            serde_json::from_str(r#"{"origin": "MG Road", "destination": "Jayanagar"}"#).unwrap();
        assert!(matches!(queries, PlanRequest::Queries { .. }));
    }

    #[test]
    fn plan_response_flattens_route() {
        let value = serde_json::to_value(PlanResponse::from(RouteResult::default())).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"primary": null, "alternates": [], "no_path_found": true})
        );
    }
}
