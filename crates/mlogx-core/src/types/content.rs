//! Static game content tables
//!
//! Name lists for buildings, items, fluids, units, teams and senseable
//! properties. The compiler never loads these itself: callers hand in an
//! already-validated `GameContent`, or use the built-in vanilla tables.

use crate::error::{DefinitionError, Result};
use serde::{Deserialize, Serialize};

/// Read-only game content tables consumed by the argument type registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameContent {
    /// Block names, e.g. `memory-cell`
    pub buildings: Vec<String>,
    /// Item names, e.g. `copper`
    pub items: Vec<String>,
    /// Fluid names, e.g. `water`
    pub fluids: Vec<String>,
    /// Unit names, e.g. `flare`
    pub units: Vec<String>,
    /// Team names, e.g. `sharded`
    pub teams: Vec<String>,
    /// Senseable property names, e.g. `totalItems`
    pub senseables: Vec<String>,
}

const BUILDINGS: &[&str] = &[
    "conveyor", "titanium-conveyor", "plastanium-conveyor", "armored-conveyor", "junction",
    "bridge-conveyor", "sorter", "inverted-sorter", "router", "distributor", "overflow-gate",
    "underflow-gate", "unloader", "mass-driver", "duo", "scatter", "scorch", "hail", "wave",
    "lancer", "arc", "parallax", "swarmer", "salvo", "segment", "tsunami", "fuse", "ripple",
    "cyclone", "foreshadow", "spectre", "meltdown", "container", "vault", "core-shard",
    "core-foundation", "core-nucleus", "mechanical-drill", "pneumatic-drill", "laser-drill",
    "blast-drill", "water-extractor", "graphite-press", "silicon-smelter", "kiln",
    "plastanium-compressor", "phase-weaver", "surge-smelter", "pulverizer", "melter",
    "separator", "battery", "battery-large", "power-node", "power-node-large", "solar-panel",
    "combustion-generator", "steam-generator", "thorium-reactor", "mender", "mend-projector",
    "overdrive-projector", "force-projector", "ground-factory", "air-factory", "naval-factory",
    "command-center", "repair-point", "micro-processor", "logic-processor", "hyper-processor",
    "memory-cell", "memory-bank", "logic-display", "large-logic-display", "message", "switch",
    "illuminator", "world-processor", "world-cell", "world-message",
];

const ITEMS: &[&str] = &[
    "copper", "lead", "metaglass", "graphite", "sand", "coal", "titanium", "thorium", "scrap",
    "silicon", "plastanium", "phase-fabric", "surge-alloy", "spore-pod", "blast-compound",
    "pyratite", "beryllium", "tungsten", "oxide", "carbide", "fissile-matter", "dormant-cyst",
];

const FLUIDS: &[&str] = &[
    "water", "slag", "oil", "cryofluid", "neoplasm", "arkycite", "gallium", "ozone", "hydrogen",
    "nitrogen", "cyanogen",
];

const UNITS: &[&str] = &[
    "dagger", "mace", "fortress", "scepter", "reign", "nova", "pulsar", "quasar", "vela",
    "corvus", "crawler", "atrax", "spiroct", "arkyid", "toxopid", "flare", "horizon", "zenith",
    "antumbra", "eclipse", "mono", "poly", "mega", "quad", "oct", "risso", "minke", "bryde",
    "sei", "omura", "retusa", "oxynoe", "cyerce", "aegires", "navanax", "alpha", "beta",
    "gamma", "stell", "locus", "precept", "vanquish", "conquer", "merui", "cleroi", "anthicus",
    "tecta", "collaris", "elude", "avert", "obviate", "quell", "disrupt", "evoke", "incite",
    "emanate",
];

const TEAMS: &[&str] = &["derelict", "sharded", "crux", "malis", "green", "blue"];

const SENSEABLES: &[&str] = &[
    "totalItems", "firstItem", "totalLiquids", "totalPower", "itemCapacity", "liquidCapacity",
    "powerCapacity", "powerNetStored", "powerNetCapacity", "powerNetIn", "powerNetOut", "ammo",
    "ammoCapacity", "totalAmmo", "health", "maxHealth", "heat", "shield", "armor", "efficiency",
    "progress", "timescale", "rotation", "x", "y", "shootX", "shootY", "size", "dead", "range",
    "shooting", "boosting", "mineX", "mineY", "mining", "speed", "team", "type", "flag",
    "controlled", "controller", "name", "payloadCount", "payloadType", "enabled", "config",
    "color",
];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl GameContent {
    /// Parse content tables from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let content: GameContent = serde_yaml::from_str(yaml)?;
        content.validate()?;
        Ok(content)
    }

    /// Parse content tables from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let content: GameContent = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    /// Reject names that could never appear as a single token
    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("buildings", &self.buildings),
            ("items", &self.items),
            ("fluids", &self.fluids),
            ("units", &self.units),
            ("teams", &self.teams),
            ("senseables", &self.senseables),
        ];
        for (table, names) in tables {
            if let Some(bad) = names
                .iter()
                .find(|name| name.is_empty() || name.contains(char::is_whitespace) || name.starts_with('@'))
            {
                return Err(DefinitionError::InvalidContent {
                    table: table.to_string(),
                    name: bad.clone(),
                });
            }
        }
        Ok(())
    }

    /// Check `@name` against one of the name lists
    fn contains_at(names: &[String], token: &str) -> bool {
        token
            .strip_prefix('@')
            .is_some_and(|name| names.iter().any(|candidate| candidate == name))
    }

    pub fn is_item(&self, token: &str) -> bool {
        Self::contains_at(&self.items, token)
    }

    pub fn is_fluid(&self, token: &str) -> bool {
        Self::contains_at(&self.fluids, token)
    }

    pub fn is_unit(&self, token: &str) -> bool {
        Self::contains_at(&self.units, token)
    }

    pub fn is_building_type(&self, token: &str) -> bool {
        Self::contains_at(&self.buildings, token)
    }

    pub fn is_team(&self, token: &str) -> bool {
        Self::contains_at(&self.teams, token)
    }

    pub fn is_senseable(&self, token: &str) -> bool {
        Self::contains_at(&self.senseables, token)
    }

    /// Check whether a token names a linked building, e.g. `cell1` or `display3`
    ///
    /// Processors name their links after the last dash-separated segment of the
    /// block name followed by a positive index.
    pub fn is_linked_building(&self, token: &str) -> bool {
        let split = token.find(|c: char| c.is_ascii_digit()).unwrap_or(token.len());
        let (prefix, index) = token.split_at(split);
        if prefix.is_empty() || index.is_empty() || index.starts_with('0') {
            return false;
        }
        if !index.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        self.buildings
            .iter()
            .any(|building| building.rsplit('-').next() == Some(prefix))
    }
}

impl Default for GameContent {
    fn default() -> Self {
        Self {
            buildings: owned(BUILDINGS),
            items: owned(ITEMS),
            fluids: owned(FLUIDS),
            units: owned(UNITS),
            teams: owned(TEAMS),
            senseables: owned(SENSEABLES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let content = GameContent::default();
        assert!(content.is_item("@copper"));
        assert!(content.is_fluid("@water"));
        assert!(content.is_unit("@flare"));
        assert!(content.is_team("@sharded"));
        assert!(content.is_senseable("@totalItems"));
        assert!(!content.is_item("copper"));
    }

    #[test]
    fn test_linked_building_names() {
        let content = GameContent::default();
        assert!(content.is_linked_building("cell1"));
        assert!(content.is_linked_building("display12"));
        assert!(content.is_linked_building("message3"));
        assert!(!content.is_linked_building("cell"));
        assert!(!content.is_linked_building("cell0"));
        assert!(!content.is_linked_building("x1"));
        assert!(!content.is_linked_building("cell1a"));
    }

    #[test]
    fn test_content_from_yaml() {
        let yaml = r#"
buildings: [memory-cell]
items: [copper]
fluids: []
units: [flare]
teams: [sharded]
senseables: [x, y]
"#;
        let content = GameContent::from_yaml_str(yaml).unwrap();
        assert!(content.is_linked_building("cell4"));
        assert!(!content.is_item("@lead"));
    }

    #[test]
    fn test_content_rejects_bad_names() {
        let json = r#"{"buildings":["bad name"],"items":[],"fluids":[],"units":[],"teams":[],"senseables":[]}"#;
        let result = GameContent::from_json_str(json);
        assert!(matches!(result, Err(DefinitionError::InvalidContent { .. })));
    }
}
