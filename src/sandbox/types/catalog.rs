//! Spawn catalogs and display mode
//!
//! A catalog is a static list of spawnable objects. Two catalogs exist, one
//! per display mode, and exactly one is active at a time. The catalog tables
//! live in RON documents embedded at compile time; a malformed document falls
//! back to a minimal built-in catalog instead of aborting the scene.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

const WORK_CATALOG_RON: &str = include_str!("../../../assets/catalogs/work.ron");
const PERSONAL_CATALOG_RON: &str = include_str!("../../../assets/catalogs/personal.ron");

/// Which of the two portfolio catalogs is on display.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    #[default]
    Work,
    Personal,
}

impl DisplayMode {
    pub fn parse(s: &str) -> Option<DisplayMode> {
        match s.to_lowercase().as_str() {
            "work" => Some(DisplayMode::Work),
            "personal" => Some(DisplayMode::Personal),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Work => "work",
            DisplayMode::Personal => "personal",
        }
    }

    pub fn toggled(&self) -> DisplayMode {
        match self {
            DisplayMode::Work => DisplayMode::Personal,
            DisplayMode::Personal => DisplayMode::Work,
        }
    }
}

/// The 2D outline an extruded entry is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outline {
    Polygon { sides: u32, circumradius: f32 },
    Ring { inner_radius: f32, outer_radius: f32 },
}

/// Where the geometry of a catalog entry comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DropSource {
    Sphere { radius: f32 },
    Cuboid { half_extents: (f32, f32, f32) },
    Extruded { outline: Outline, depth: f32 },
    Text { text: String },
    /// A mesh file loaded through the asset server. A failed load removes the
    /// single object and nothing else.
    Scene { path: String },
}

/// How an entry is colored when it spawns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ColorPolicy {
    /// Use the material's default color (or the scene's own materials).
    #[default]
    Keep,
    /// A fixed CSS color string, parsed at spawn time.
    Fixed(String),
    /// A fresh random HSL color per spawn.
    Randomized,
}

/// Collision shape used for the entry's rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColliderKind {
    Ball,
    Cuboid,
    #[default]
    Hull,
}

/// One spawnable object. Static, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub source: DropSource,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub color: ColorPolicy,
    #[serde(default)]
    pub collider: ColliderKind,
    /// Short text shown while the object is hovered.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDoc {
    entries: Vec<CatalogEntry>,
}

/// Both catalogs, loaded once at startup.
#[derive(Resource, Debug, Clone)]
pub struct Catalogs {
    pub work: Vec<CatalogEntry>,
    pub personal: Vec<CatalogEntry>,
}

impl Catalogs {
    /// Parse the embedded catalog documents. A document that fails to parse
    /// is replaced by the built-in fallback catalog and logged.
    pub fn load_embedded() -> Self {
        Self {
            work: parse_catalog(WORK_CATALOG_RON).unwrap_or_else(|e| {
                error!("work catalog failed to parse, using fallback: {}", e);
                fallback_entries()
            }),
            personal: parse_catalog(PERSONAL_CATALOG_RON).unwrap_or_else(|e| {
                error!("personal catalog failed to parse, using fallback: {}", e);
                fallback_entries()
            }),
        }
    }

    pub fn active(&self, mode: DisplayMode) -> &[CatalogEntry] {
        match mode {
            DisplayMode::Work => &self.work,
            DisplayMode::Personal => &self.personal,
        }
    }

    /// Look an entry up by id across both catalogs.
    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.work
            .iter()
            .chain(self.personal.iter())
            .find(|e| e.id == id)
    }
}

/// Parse a RON catalog document.
pub fn parse_catalog(source: &str) -> Result<Vec<CatalogEntry>, String> {
    let doc: CatalogDoc =
        ron::from_str(source).map_err(|e| format!("invalid catalog document: {}", e))?;
    if doc.entries.is_empty() {
        return Err("catalog document has no entries".to_string());
    }
    Ok(doc.entries)
}

/// Minimal catalog used when an embedded document is unreadable.
fn fallback_entries() -> Vec<CatalogEntry> {
    vec![CatalogEntry {
        id: "sphere".to_string(),
        source: DropSource::Sphere { radius: 0.3 },
        scale: 1.0,
        color: ColorPolicy::Randomized,
        collider: ColliderKind::Ball,
        label: None,
    }]
}

/// Parse a CSS color string (hex, `hsl(...)`, named colors) into a Bevy color.
pub fn parse_css_color(s: &str) -> Result<Color, String> {
    let c = csscolorparser::parse(s).map_err(|e| format!("invalid color {:?}: {}", s, e))?;
    let [r, g, b, a] = c.to_rgba8();
    Ok(Color::srgba_u8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mode_parse() {
        assert_eq!(DisplayMode::parse("work"), Some(DisplayMode::Work));
        assert_eq!(DisplayMode::parse("Personal"), Some(DisplayMode::Personal));
        assert_eq!(DisplayMode::parse("garbage"), None);
    }

    #[test]
    fn test_display_mode_toggle_roundtrip() {
        assert_eq!(DisplayMode::Work.toggled(), DisplayMode::Personal);
        assert_eq!(DisplayMode::Work.toggled().toggled(), DisplayMode::Work);
    }

    #[test]
    fn test_embedded_catalogs_parse() {
        let catalogs = Catalogs::load_embedded();
        assert!(!catalogs.work.is_empty());
        assert!(!catalogs.personal.is_empty());
    }

    #[test]
    fn test_catalog_ids_unique() {
        let catalogs = Catalogs::load_embedded();
        for entries in [&catalogs.work, &catalogs.personal] {
            let mut ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), entries.len(), "duplicate catalog id");
        }
    }

    #[test]
    fn test_catalog_scales_positive() {
        let catalogs = Catalogs::load_embedded();
        for entry in catalogs.work.iter().chain(catalogs.personal.iter()) {
            assert!(entry.scale > 0.0, "entry {} has bad scale", entry.id);
        }
    }

    #[test]
    fn test_catalog_fixed_colors_parse() {
        let catalogs = Catalogs::load_embedded();
        for entry in catalogs.work.iter().chain(catalogs.personal.iter()) {
            if let ColorPolicy::Fixed(css) = &entry.color {
                parse_css_color(css).unwrap();
            }
        }
    }

    #[test]
    fn test_malformed_catalog_is_err() {
        assert!(parse_catalog("not a catalog").is_err());
        assert!(parse_catalog("(entries: [])").is_err());
    }

    #[test]
    fn test_parse_css_color() {
        assert!(parse_css_color("#b7410e").is_ok());
        assert!(parse_css_color("hsl(210, 50%, 40%)").is_ok());
        assert!(parse_css_color("definitely not a color").is_err());
    }

    #[test]
    fn test_find_searches_both_catalogs() {
        let catalogs = Catalogs::load_embedded();
        let work_id = catalogs.work[0].id.clone();
        let personal_id = catalogs.personal[0].id.clone();
        assert!(catalogs.find(&work_id).is_some());
        assert!(catalogs.find(&personal_id).is_some());
        assert!(catalogs.find("no-such-entry").is_none());
    }
}
