use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scene-space coordinate. Serialized as a `[x, y, z]` array; `y` is the vertical axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance on the (x, z) ground plane.
    pub fn planar_distance(&self, other: &Vec3) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gate,
    Shop,
    Restaurant,
    Service,
    Security,
    Baggage,
    Parking,
    Terminal,
    Exit,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Gate,
        Category::Shop,
        Category::Restaurant,
        Category::Service,
        Category::Security,
        Category::Baggage,
        Category::Parking,
        Category::Terminal,
        Category::Exit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Gate => "gate",
            Category::Shop => "shop",
            Category::Restaurant => "restaurant",
            Category::Service => "service",
            Category::Security => "security",
            Category::Baggage => "baggage",
            Category::Parking => "parking",
            Category::Terminal => "terminal",
            Category::Exit => "exit",
        }
    }

    /// Categories a visitor (non-travelling guest) may browse.
    pub fn visible_to_visitors(self) -> bool {
        matches!(
            self,
            Category::Baggage | Category::Service | Category::Restaurant | Category::Shop | Category::Parking
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(t))
            .ok_or_else(|| format!("unknown category '{}'", t))
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Passenger,
    Visitor,
}

impl UserType {
    pub fn key(self) -> &'static str {
        match self {
            UserType::Passenger => "passenger",
            UserType::Visitor => "visitor",
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passenger" => Ok(UserType::Passenger),
            "visitor" => Ok(UserType::Visitor),
            other => Err(format!("unknown user type '{}'", other)),
        }
    }
}

/// Queue length band for security and other waiting points.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WaitLevel {
    Unknown,
    Short,
    Moderate,
    Long,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLocation {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time_minutes: Option<u32>,
}

impl MapLocation {
    pub fn new(id: &str, name: &str, category: Category, position: [f64; 3]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            position: position.into(),
            terminal: None,
            description: None,
            is_open: None,
            wait_time_minutes: None,
        }
    }

    pub fn with_terminal(mut self, terminal: &str) -> Self {
        self.terminal = Some(terminal.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.is_open = Some(open);
        self
    }

    pub fn with_wait_time(mut self, minutes: u32) -> Self {
        self.wait_time_minutes = Some(minutes);
        self
    }

    pub fn wait_level(&self) -> WaitLevel {
        match self.wait_time_minutes {
            None | Some(0) => WaitLevel::Unknown,
            Some(m) if m < 10 => WaitLevel::Short,
            Some(m) if m < 20 => WaitLevel::Moderate,
            Some(_) => WaitLevel::Long,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPosition {
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    pub last_updated_at: DateTime<Utc>,
}

impl UserPosition {
    pub fn new(position: Vec3, terminal: Option<&str>, at: DateTime<Utc>) -> Self {
        Self { position, terminal: terminal.map(str::to_string), last_updated_at: at }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPath {
    pub start: MapLocation,
    pub end: MapLocation,
    /// First point is `start.position`, last is `end.position`.
    pub waypoints: Vec<Vec3>,
    pub distance_units: f64,
    pub estimated_minutes: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraView {
    fn default() -> Self {
        Self { position: Vec3::new(0.0, 100.0, 100.0), target: Vec3::new(0.0, 0.0, 0.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_ignores_vertical_axis() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 40.0, 4.0);
        assert_eq!(a.planar_distance(&b), 5.0);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Shop".parse::<Category>(), Ok(Category::Shop));
        assert_eq!(" gate ".parse::<Category>(), Ok(Category::Gate));
        assert!("lounge".parse::<Category>().is_err());
    }

    #[test]
    fn visitor_categories_exclude_gates_and_security() {
        assert!(!Category::Gate.visible_to_visitors());
        assert!(!Category::Security.visible_to_visitors());
        assert!(Category::Parking.visible_to_visitors());
    }

    #[test]
    fn wait_level_bands() {
        let loc = MapLocation::new("s", "S", Category::Security, [0.0, 0.0, 0.0]);
        assert_eq!(loc.wait_level(), WaitLevel::Unknown);
        assert_eq!(loc.clone().with_wait_time(0).wait_level(), WaitLevel::Unknown);
        assert_eq!(loc.clone().with_wait_time(8).wait_level(), WaitLevel::Short);
        assert_eq!(loc.clone().with_wait_time(15).wait_level(), WaitLevel::Moderate);
        assert_eq!(loc.with_wait_time(20).wait_level(), WaitLevel::Long);
    }

    #[test]
    fn location_json_uses_camel_case_and_array_positions() {
        let json = r#"{"id":"x","name":"X","category":"security","position":[1,2,3],"waitTimeMinutes":4,"isOpen":true}"#;
        let loc: MapLocation = serde_json::from_str(json).unwrap();
        assert_eq!(loc.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(loc.wait_time_minutes, Some(4));
        assert_eq!(loc.is_open, Some(true));
        let back = serde_json::to_value(&loc).unwrap();
        assert_eq!(back["position"], serde_json::json!([1.0, 2.0, 3.0]));
    }
}
