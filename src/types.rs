use crate::error::{BreedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of inheritable stat slots on every individual
pub const STAT_COUNT: usize = 6;

const NATURE_TAG: &str = "[Nat]";

/// Fixed stat slots, in encoding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Inheritance state of a single stat slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Trait {
    #[default]
    Absent,
    Perfect,
    /// Perfect and guaranteed to pass to offspring ("braced")
    PerfectForced,
}

impl Trait {
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            '-' => Ok(Self::Absent),
            '+' => Ok(Self::Perfect),
            '*' => Ok(Self::PerfectForced),
            other => Err(BreedError::Format(format!(
                "Unrecognized trait symbol '{}' (expected one of '+', '-', '*')",
                other
            ))),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Absent => '-',
            Self::Perfect => '+',
            Self::PerfectForced => '*',
        }
    }

    /// True for `Perfect` and `PerfectForced`
    pub fn is_perfect(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, Self::PerfectForced)
    }

    /// Drops the forced marker, keeping the maxed state
    pub fn normalized(&self) -> Self {
        match self {
            Self::PerfectForced => Self::Perfect,
            other => *other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    /// Maps the letter inside a `(x)` marker; anything unrecognized is `Unknown`
    pub fn from_code(code: char) -> Self {
        match code.to_ascii_lowercase() {
            'm' => Self::Male,
            'f' => Self::Female,
            _ => Self::Unknown,
        }
    }

    /// Parses a full marker such as `"(m)"`, tolerating surrounding whitespace
    pub fn from_marker(marker: &str) -> Self {
        let inner: String = marker
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
            .collect();
        let mut chars = inner.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c),
            _ => Self::Unknown,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Self::Male => 'm',
            Self::Female => 'f',
            Self::Unknown => '?',
        }
    }

    pub fn marker(&self) -> String {
        format!("({})", self.code())
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
            Self::Unknown => Self::Unknown,
        }
    }
}

/// Decoded form of `"<s1> .. <s6> (<g>) [Nat]"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    pub traits: [Trait; STAT_COUNT],
    pub sex: Sex,
    pub has_nature: bool,
}

impl Encoding {
    pub fn parse(code: &str) -> Result<Self> {
        let compact: Vec<char> = code.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.len() < STAT_COUNT {
            return Err(BreedError::Format(format!(
                "Expected {} trait symbols, found {} characters in '{}'",
                STAT_COUNT,
                compact.len(),
                code
            )));
        }

        let mut traits = [Trait::Absent; STAT_COUNT];
        for (slot, symbol) in traits.iter_mut().zip(&compact[..STAT_COUNT]) {
            *slot = Trait::from_symbol(*symbol)?;
        }

        let rest = &compact[STAT_COUNT..];
        if let Some(extra) = rest.first().copied().filter(|c| matches!(*c, '+' | '-' | '*')) {
            return Err(BreedError::Format(format!(
                "Unexpected trait symbol '{}' after {} slots in '{}'",
                extra, STAT_COUNT, code
            )));
        }
        let sex = rest
            .windows(3)
            .find(|w| w[0] == '(' && w[2] == ')')
            .map(|w| Sex::from_code(w[1]))
            .unwrap_or(Sex::Unknown);
        let has_nature = rest.iter().collect::<String>().contains(NATURE_TAG);

        Ok(Self {
            traits,
            sex,
            has_nature,
        })
    }

    pub fn stats_string(&self) -> String {
        render_traits(&self.traits)
    }

    pub fn render(&self) -> String {
        let mut out = format!("{} {}", self.stats_string(), self.sex.marker());
        if self.has_nature {
            out.push(' ');
            out.push_str(NATURE_TAG);
        }
        out
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub fn render_traits(traits: &[Trait; STAT_COUNT]) -> String {
    traits
        .iter()
        .map(|t| t.symbol().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short opaque identity: first 7 hex digits of a v4 uuid
pub fn fresh_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(7);
    id
}

/// A creature: identity, six stat traits, sex and an optional nature marker.
///
/// Trait and sex data are fixed at construction. Only the identity may change,
/// when the bank matcher reconciles a generated node with an owned creature.
/// Parent and child links live in [`crate::tree::BreedingTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    id: String,
    traits: [Trait; STAT_COUNT],
    sex: Sex,
    has_nature: bool,
}

impl Individual {
    pub fn new(traits: [Trait; STAT_COUNT], sex: Sex) -> Self {
        Self {
            id: fresh_id(),
            traits,
            sex,
            has_nature: false,
        }
    }

    pub fn from_encoding(code: &str) -> Result<Self> {
        Ok(Self::from(Encoding::parse(code)?))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_nature(mut self, has_nature: bool) -> Self {
        self.has_nature = has_nature;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn assume_identity(&mut self, id: &str) {
        self.id = id.to_string();
    }

    pub fn traits(&self) -> &[Trait; STAT_COUNT] {
        &self.traits
    }

    pub fn trait_of(&self, stat: Stat) -> Trait {
        self.traits[stat.index()]
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn has_nature(&self) -> bool {
        self.has_nature
    }

    pub fn perfect_count(&self) -> usize {
        self.traits.iter().filter(|t| t.is_perfect()).count()
    }

    /// Slot indices holding a Perfect-or-better trait
    pub fn inheritable_slots(&self) -> Vec<usize> {
        self.traits
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_perfect())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn encoding(&self) -> Encoding {
        Encoding {
            traits: self.traits,
            sex: self.sex,
            has_nature: self.has_nature,
        }
    }

    pub fn stats_string(&self) -> String {
        render_traits(&self.traits)
    }

    /// Stats with braced slots rendered as plain perfect
    pub fn normalized_stats(&self) -> String {
        render_traits(&self.traits.map(|t| t.normalized()))
    }

    /// Same normalized stats and same sex; nature and identity are ignored
    pub fn matches(&self, other: &Individual) -> bool {
        self.sex == other.sex
            && self
                .traits
                .iter()
                .zip(other.traits.iter())
                .all(|(a, b)| a.normalized() == b.normalized())
    }

    /// Display label used by tree renderers
    pub fn label(&self) -> String {
        format!(
            "{} Stats: {} Sex: {}",
            self.id,
            self.stats_string(),
            self.sex.marker()
        )
    }

    pub fn to_record(&self) -> PokeRecord {
        PokeRecord {
            id: self.id.clone(),
            stats: self.stats_string(),
            gender: self.sex.marker(),
            nature: self.has_nature,
        }
    }

    pub fn from_record(record: &PokeRecord) -> Result<Self> {
        let encoding = Encoding::parse(&record.stats)?;
        Ok(Self {
            id: record.id.clone(),
            traits: encoding.traits,
            sex: Sex::from_marker(&record.gender),
            has_nature: record.nature || encoding.has_nature,
        })
    }
}

impl Default for Individual {
    fn default() -> Self {
        Self::new([Trait::Absent; STAT_COUNT], Sex::Unknown)
    }
}

impl From<Encoding> for Individual {
    fn from(encoding: Encoding) -> Self {
        Self::new(encoding.traits, encoding.sex).with_nature(encoding.has_nature)
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.encoding())
    }
}

/// Persisted bank entry exchanged with the storage collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeRecord {
    pub id: String,
    pub stats: String,
    pub gender: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nature: bool,
}
