//! Generic argument type registry
//!
//! Every generic argument category has a validator plus two relations:
//! `also_accepts` (tokens valid for these categories are valid here too) and
//! `exclude` (tokens valid for these categories are never valid here).
//!
//! Resolution is deliberately one level deep: `also_accepts` targets are
//! checked against their own validator and exclusions only, and `exclude`
//! targets against their raw validator. Mutually-referencing categories
//! (`number` and `boolean`) therefore cannot recurse.

use crate::command::{Arg, ArgType};
use crate::error::{DefinitionError, Result};
use crate::types::content::GameContent;
use crate::types::operators;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?|0x[0-9a-fA-F]+|0b[01]+|%[0-9a-fA-F]{6}([0-9a-fA-F]{2})?)$")
        .expect("number pattern is valid")
});

static STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"[^"]*"$"#).expect("string pattern is valid"));

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"^(@counter|[^\s"#:@{}][^\s"#:]*)$"##).expect("variable pattern is valid")
});

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r##"^[^\s"#:@{}][^\s"#:]*$"##).expect("label pattern is valid"));

static SENSOR_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"^[^\s"#:@{}.][^\s"#:.]*\.@?[^\s"#:.@]+$"##).expect("sensor path pattern is valid")
});

const NUMERIC_BUILTINS: &[&str] = &[
    "@counter", "@time", "@tick", "@second", "@minute", "@waveNumber", "@waveTime", "@mapw",
    "@maph", "@links", "@ipt", "@thisx", "@thisy", "@server", "@client", "@pi", "@e",
    "@degToRad", "@radToDeg",
];

const TARGET_CLASSES: &[&str] = &[
    "any", "enemy", "ally", "player", "attacker", "flying", "boss", "ground",
];

const SORT_CRITERIA: &[&str] = &["distance", "health", "shield", "armor", "maxHealth"];

const STATUS_EFFECTS: &[&str] = &[
    "none", "burning", "freezing", "unmoving", "slow", "wet", "muddy", "melting", "sapped",
    "tarred", "overdrive", "overclock", "shielded", "shocked", "blasted", "corroded", "boss",
    "sporeSlowed", "disarmed", "electrified", "invincible",
];

const LOOKUP_TYPES: &[&str] = &["block", "unit", "item", "liquid"];

const LOCATE_TYPES: &[&str] = &["ore", "building", "spawn", "damaged"];

const BUILDING_GROUPS: &[&str] = &[
    "core", "storage", "generator", "turret", "factory", "repair", "rally", "battery", "reactor",
];

const GLOBAL_RULES: &[&str] = &[
    "currentWaveTime", "waveTimer", "waves", "wave", "waveSpacing", "waveSending", "attackMode",
    "enemyCoreBuildRadius", "dropZoneRadius", "unitCap", "lighting", "ambientLight",
    "solarMultiplier",
];

const TEAM_RULES: &[&str] = &[
    "buildSpeed", "unitHealth", "unitBuildSpeed", "unitCost", "unitDamage", "blockHealth",
    "blockDamage", "rtsMinWeight", "rtsMinSquad",
];

/// A named generic argument category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericArgType {
    Null,
    Boolean,
    Number,
    NumericBuiltin,
    String,
    Team,
    ItemType,
    FluidType,
    UnitType,
    BuildingType,
    Type,
    Senseable,
    Building,
    Unit,
    OperationBinary,
    OperationUnary,
    OperatorSymbol,
    OperandTest,
    ComparisonSymbol,
    TargetClass,
    UnitSortCriteria,
    StatusEffect,
    LookupType,
    LocateType,
    BuildingGroup,
    RuleName,
    TeamRule,
    JumpAddress,
    TypedVariable,
    SensorPath,
    Variable,
    Any,
    /// Sentinel returned by `guess_type` when nothing accepts a token
    Invalid,
}

impl GenericArgType {
    /// Every category, sentinel included
    pub const ALL: &'static [GenericArgType] = &[
        GenericArgType::Null,
        GenericArgType::Boolean,
        GenericArgType::Number,
        GenericArgType::NumericBuiltin,
        GenericArgType::String,
        GenericArgType::Team,
        GenericArgType::ItemType,
        GenericArgType::FluidType,
        GenericArgType::UnitType,
        GenericArgType::BuildingType,
        GenericArgType::Type,
        GenericArgType::Senseable,
        GenericArgType::Building,
        GenericArgType::Unit,
        GenericArgType::OperationBinary,
        GenericArgType::OperationUnary,
        GenericArgType::OperatorSymbol,
        GenericArgType::OperandTest,
        GenericArgType::ComparisonSymbol,
        GenericArgType::TargetClass,
        GenericArgType::UnitSortCriteria,
        GenericArgType::StatusEffect,
        GenericArgType::LookupType,
        GenericArgType::LocateType,
        GenericArgType::BuildingGroup,
        GenericArgType::RuleName,
        GenericArgType::TeamRule,
        GenericArgType::JumpAddress,
        GenericArgType::TypedVariable,
        GenericArgType::SensorPath,
        GenericArgType::Variable,
        GenericArgType::Any,
        GenericArgType::Invalid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenericArgType::Null => "null",
            GenericArgType::Boolean => "boolean",
            GenericArgType::Number => "number",
            GenericArgType::NumericBuiltin => "numericBuiltin",
            GenericArgType::String => "string",
            GenericArgType::Team => "team",
            GenericArgType::ItemType => "itemType",
            GenericArgType::FluidType => "fluidType",
            GenericArgType::UnitType => "unitType",
            GenericArgType::BuildingType => "buildingType",
            GenericArgType::Type => "type",
            GenericArgType::Senseable => "senseable",
            GenericArgType::Building => "building",
            GenericArgType::Unit => "unit",
            GenericArgType::OperationBinary => "operationBinary",
            GenericArgType::OperationUnary => "operationUnary",
            GenericArgType::OperatorSymbol => "operatorSymbol",
            GenericArgType::OperandTest => "operandTest",
            GenericArgType::ComparisonSymbol => "comparisonSymbol",
            GenericArgType::TargetClass => "targetClass",
            GenericArgType::UnitSortCriteria => "unitSortCriteria",
            GenericArgType::StatusEffect => "statusEffect",
            GenericArgType::LookupType => "lookupType",
            GenericArgType::LocateType => "locateType",
            GenericArgType::BuildingGroup => "buildingGroup",
            GenericArgType::RuleName => "ruleName",
            GenericArgType::TeamRule => "teamRule",
            GenericArgType::JumpAddress => "jumpAddress",
            GenericArgType::TypedVariable => "typedVariable",
            GenericArgType::SensorPath => "sensorPath",
            GenericArgType::Variable => "variable",
            GenericArgType::Any => "any",
            GenericArgType::Invalid => "invalid",
        }
    }
}

impl fmt::Display for GenericArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenericArgType {
    type Err = DefinitionError;

    fn from_str(name: &str) -> Result<Self> {
        GenericArgType::ALL
            .iter()
            .copied()
            .filter(|ty| *ty != GenericArgType::Invalid)
            .find(|ty| ty.as_str() == name)
            .ok_or_else(|| DefinitionError::UnknownType(name.to_string()))
    }
}

/// How a category decides whether a token belongs to it
#[derive(Clone, Copy)]
pub enum Validator {
    /// Exact match against a closed set
    Literals(&'static [&'static str]),
    /// Regular expression over the whole token
    Pattern(&'static LazyLock<Regex>),
    /// Arbitrary predicate, with access to the content tables
    Predicate(fn(&GameContent, &str) -> bool),
}

impl Validator {
    fn accepts(&self, content: &GameContent, token: &str) -> bool {
        match self {
            Validator::Literals(values) => values.contains(&token),
            Validator::Pattern(pattern) => pattern.is_match(token),
            Validator::Predicate(predicate) => predicate(content, token),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Literals(values) => f.debug_tuple("Literals").field(values).finish(),
            Validator::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Validator::Predicate(_) => f.write_str("Predicate"),
        }
    }
}

/// Registry entry for one generic category
#[derive(Debug, Clone, Copy)]
pub struct ArgKey {
    pub validator: Validator,
    pub also_accepts: &'static [GenericArgType],
    pub exclude: &'static [GenericArgType],
    /// Never returned by `guess_type`
    pub do_not_guess: bool,
}

impl ArgKey {
    const fn new(validator: Validator) -> Self {
        Self {
            validator,
            also_accepts: &[],
            exclude: &[],
            do_not_guess: false,
        }
    }

    const fn also_accepts(mut self, types: &'static [GenericArgType]) -> Self {
        self.also_accepts = types;
        self
    }

    const fn exclude(mut self, types: &'static [GenericArgType]) -> Self {
        self.exclude = types;
        self
    }

    const fn do_not_guess(mut self) -> Self {
        self.do_not_guess = true;
        self
    }
}

fn is_number(_: &GameContent, token: &str) -> bool {
    NUMBER_RE.is_match(token)
}

fn is_content_type(content: &GameContent, token: &str) -> bool {
    content.is_item(token)
        || content.is_fluid(token)
        || content.is_unit(token)
        || content.is_building_type(token)
}

fn is_jump_address(content: &GameContent, token: &str) -> bool {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return !token.is_empty();
    }
    LABEL_RE.is_match(token) && !is_number(content, token)
}

fn is_typed_variable(_: &GameContent, token: &str) -> bool {
    match token.split_once(':') {
        Some((name, ty)) => {
            VARIABLE_RE.is_match(name)
                && !name.starts_with('@')
                && ty.parse::<GenericArgType>().is_ok()
        }
        None => false,
    }
}

use GenericArgType as G;

const VARIABLE_ONLY: &[GenericArgType] = &[G::Variable];

fn builtin_keys() -> Vec<(GenericArgType, ArgKey)> {
    vec![
        (G::Null, ArgKey::new(Validator::Literals(&["null"]))),
        (
            G::Boolean,
            ArgKey::new(Validator::Literals(&["true", "false"]))
                .also_accepts(&[G::Number, G::Variable]),
        ),
        (
            G::Number,
            ArgKey::new(Validator::Pattern(&NUMBER_RE))
                .also_accepts(&[G::Variable, G::Boolean, G::NumericBuiltin]),
        ),
        (G::NumericBuiltin, ArgKey::new(Validator::Literals(NUMERIC_BUILTINS))),
        (
            G::String,
            ArgKey::new(Validator::Pattern(&STRING_RE)).also_accepts(VARIABLE_ONLY),
        ),
        (
            G::Team,
            ArgKey::new(Validator::Predicate(|c, t| c.is_team(t))).also_accepts(VARIABLE_ONLY),
        ),
        (
            G::ItemType,
            ArgKey::new(Validator::Predicate(|c, t| c.is_item(t))).also_accepts(VARIABLE_ONLY),
        ),
        (
            G::FluidType,
            ArgKey::new(Validator::Predicate(|c, t| c.is_fluid(t))).also_accepts(VARIABLE_ONLY),
        ),
        (
            G::UnitType,
            ArgKey::new(Validator::Predicate(|c, t| c.is_unit(t))).also_accepts(VARIABLE_ONLY),
        ),
        (
            G::BuildingType,
            ArgKey::new(Validator::Predicate(|c, t| c.is_building_type(t)))
                .also_accepts(VARIABLE_ONLY),
        ),
        (
            G::Type,
            ArgKey::new(Validator::Predicate(is_content_type)).also_accepts(&[
                G::ItemType,
                G::FluidType,
                G::UnitType,
                G::BuildingType,
                G::Variable,
            ]),
        ),
        (
            G::Senseable,
            ArgKey::new(Validator::Predicate(|c, t| c.is_senseable(t)))
                .also_accepts(&[G::Type, G::Variable]),
        ),
        (
            G::Building,
            ArgKey::new(Validator::Predicate(|c, t| t == "@this" || c.is_linked_building(t)))
                .also_accepts(VARIABLE_ONLY),
        ),
        (
            G::Unit,
            ArgKey::new(Validator::Literals(&["@unit"])).also_accepts(VARIABLE_ONLY),
        ),
        (
            G::OperationBinary,
            ArgKey::new(Validator::Predicate(|_, t| operators::is_binary_operation(t)))
                .do_not_guess(),
        ),
        (
            G::OperationUnary,
            ArgKey::new(Validator::Predicate(|_, t| operators::is_unary_operation(t)))
                .do_not_guess(),
        ),
        (
            G::OperatorSymbol,
            ArgKey::new(Validator::Predicate(|_, t| {
                operators::operation_for_symbol(t).is_some()
            }))
            .do_not_guess(),
        ),
        (
            G::OperandTest,
            ArgKey::new(Validator::Predicate(|_, t| {
                t == "always" || operators::symbol_for_condition(t).is_some()
            }))
            .do_not_guess(),
        ),
        (
            G::ComparisonSymbol,
            ArgKey::new(Validator::Predicate(|_, t| {
                operators::condition_for_symbol(t).is_some()
            }))
            .do_not_guess(),
        ),
        (G::TargetClass, ArgKey::new(Validator::Literals(TARGET_CLASSES)).do_not_guess()),
        (G::UnitSortCriteria, ArgKey::new(Validator::Literals(SORT_CRITERIA)).do_not_guess()),
        (G::StatusEffect, ArgKey::new(Validator::Literals(STATUS_EFFECTS)).do_not_guess()),
        (G::LookupType, ArgKey::new(Validator::Literals(LOOKUP_TYPES)).do_not_guess()),
        (G::LocateType, ArgKey::new(Validator::Literals(LOCATE_TYPES)).do_not_guess()),
        (G::BuildingGroup, ArgKey::new(Validator::Literals(BUILDING_GROUPS)).do_not_guess()),
        (G::RuleName, ArgKey::new(Validator::Literals(GLOBAL_RULES)).do_not_guess()),
        (G::TeamRule, ArgKey::new(Validator::Literals(TEAM_RULES)).do_not_guess()),
        (
            G::JumpAddress,
            ArgKey::new(Validator::Predicate(is_jump_address))
                .exclude(&[G::Null, G::Boolean, G::String])
                .do_not_guess(),
        ),
        (
            G::TypedVariable,
            ArgKey::new(Validator::Predicate(is_typed_variable)).do_not_guess(),
        ),
        (
            G::SensorPath,
            ArgKey::new(Validator::Pattern(&SENSOR_PATH_RE))
                .exclude(&[G::Number])
                .do_not_guess(),
        ),
        (
            G::Variable,
            ArgKey::new(Validator::Pattern(&VARIABLE_RE))
                .exclude(&[G::Null, G::Boolean, G::Number, G::String]),
        ),
        (
            G::Any,
            ArgKey::new(Validator::Predicate(|_, t| !t.is_empty())).do_not_guess(),
        ),
    ]
}

static STANDARD: LazyLock<ArgTypeRegistry> =
    LazyLock::new(|| ArgTypeRegistry::new(GameContent::default()));

/// Ordered table of generic argument categories
///
/// Registration order is guessing priority: `guess_type` returns the first
/// guessable category whose validator accepts a token.
#[derive(Debug, Clone)]
pub struct ArgTypeRegistry {
    content: GameContent,
    keys: Vec<(GenericArgType, ArgKey)>,
}

impl ArgTypeRegistry {
    /// Build the registry over the given content tables
    pub fn new(content: GameContent) -> Self {
        Self {
            content,
            keys: builtin_keys(),
        }
    }

    /// Shared registry over the vanilla content tables
    pub fn standard() -> &'static ArgTypeRegistry {
        &STANDARD
    }

    pub fn content(&self) -> &GameContent {
        &self.content
    }

    /// Registry membership test by name
    pub fn is_generic_arg(&self, name: &str) -> bool {
        name.parse::<GenericArgType>()
            .map(|ty| self.key(ty).is_some())
            .unwrap_or(false)
    }

    pub fn key(&self, ty: GenericArgType) -> Option<&ArgKey> {
        self.keys
            .iter()
            .find(|(registered, _)| *registered == ty)
            .map(|(_, key)| key)
    }

    /// Categories in registration order
    pub fn categories(&self) -> impl Iterator<Item = GenericArgType> + '_ {
        self.keys.iter().map(|(ty, _)| *ty)
    }

    /// First guessable category whose own validator accepts the token, or `Invalid`
    pub fn guess_type(&self, token: &str) -> GenericArgType {
        self.keys
            .iter()
            .filter(|(_, key)| !key.do_not_guess)
            .find(|(ty, _)| self.is_valid_for_category(token, *ty, false))
            .map(|(ty, _)| *ty)
            .unwrap_or(GenericArgType::Invalid)
    }

    /// Check a token against a category, honouring `exclude` and `also_accepts`
    pub fn is_valid_for_category(
        &self,
        token: &str,
        ty: GenericArgType,
        check_also_accepts: bool,
    ) -> bool {
        let Some(key) = self.key(ty) else {
            return false;
        };

        // Exclusions see only the excluded category's raw validator
        let excluded = key.exclude.iter().any(|excluded| {
            self.key(*excluded)
                .is_some_and(|excluded_key| excluded_key.validator.accepts(&self.content, token))
        });
        if excluded {
            return false;
        }

        if check_also_accepts
            && key
                .also_accepts
                .iter()
                .any(|other| self.is_valid_for_category(token, *other, false))
        {
            return true;
        }

        key.validator.accepts(&self.content, token)
    }

    /// Check a token against one argument slot
    pub fn is_valid_for_arg(&self, token: &str, arg: &Arg) -> bool {
        if arg.is_variable {
            return self.is_valid_for_category(token, GenericArgType::Variable, true);
        }
        match &arg.arg_type {
            ArgType::Literal(literal) => token == literal,
            ArgType::Generic(ty) => self.is_valid_for_category(token, *ty, true),
        }
    }

    /// Whether a slot of this category may be filled by a variable reference
    pub fn accepts_variables(&self, ty: GenericArgType) -> bool {
        matches!(ty, GenericArgType::Variable | GenericArgType::Any)
            || self
                .key(ty)
                .is_some_and(|key| key.also_accepts.contains(&GenericArgType::Variable))
    }

    /// Whether a value known to be of type `actual` can fill a `required` slot
    ///
    /// Follows `also_accepts` transitively with a visited set, so cycles in the
    /// relation terminate.
    pub fn accepts_type(&self, required: GenericArgType, actual: GenericArgType) -> bool {
        if matches!(required, GenericArgType::Any)
            || matches!(actual, GenericArgType::Any | GenericArgType::Invalid)
        {
            return true;
        }
        let mut visited = HashSet::new();
        let mut pending = vec![required];
        while let Some(ty) = pending.pop() {
            if ty == actual {
                return true;
            }
            if !visited.insert(ty) {
                continue;
            }
            if let Some(key) = self.key(ty) {
                pending.extend(key.also_accepts.iter().copied());
            }
        }
        false
    }

    /// Verify the category graph: every reference is registered and no category
    /// lists itself in `also_accepts` or `exclude`
    pub fn audit(&self) -> Result<()> {
        for (ty, key) in &self.keys {
            for other in key.also_accepts.iter().chain(key.exclude) {
                if other == ty {
                    return Err(DefinitionError::InconsistentRegistry(format!(
                        "\"{}\" references itself",
                        ty
                    )));
                }
                if self.key(*other).is_none() {
                    return Err(DefinitionError::InconsistentRegistry(format!(
                        "\"{}\" references unregistered \"{}\"",
                        ty, other
                    )));
                }
            }
            if let Some(conflict) = key.exclude.iter().find(|ex| key.also_accepts.contains(ex)) {
                return Err(DefinitionError::InconsistentRegistry(format!(
                    "\"{}\" both accepts and excludes \"{}\"",
                    ty, conflict
                )));
            }
        }
        Ok(())
    }
}
