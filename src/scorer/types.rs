use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub const TRAIT_COUNT: usize = 9;

/// One axis of the profile. The string form is the short code used in
/// question banks and taxonomy files (`apt`, `O`, `C`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
)]
pub enum TraitKey {
    #[strum(to_string = "apt")]
    Aptitude,
    #[strum(to_string = "O")]
    Openness,
    #[strum(to_string = "C")]
    Conscientiousness,
    #[strum(to_string = "E")]
    Extraversion,
    #[strum(to_string = "A")]
    Agreeableness,
    #[strum(to_string = "stab")]
    Stability,
    #[strum(to_string = "R")]
    Realistic,
    #[strum(to_string = "I")]
    Investigative,
    #[strum(to_string = "Art")]
    Artistic,
}

impl TraitKey {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Aptitude => "Aptitude",
            Self::Openness => "Openness",
            Self::Conscientiousness => "Conscientiousness",
            Self::Extraversion => "Extraversion",
            Self::Agreeableness => "Agreeableness",
            Self::Stability => "Emotional Stability",
            Self::Realistic => "Realistic",
            Self::Investigative => "Investigative",
            Self::Artistic => "Artistic",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::from_str(code).ok()
    }
}

/// Display bucket for a normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TraitTier {
    Low,
    Mid,
    High,
}

impl TraitTier {
    pub fn of(value: f64) -> Self {
        if value < 0.35 {
            Self::Low
        } else if value < 0.65 {
            Self::Mid
        } else {
            Self::High
        }
    }
}

/// A dense value per trait. Used both for the raw accumulator and for the
/// normalized snapshot; which one it is depends on where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitVector {
    values: [f64; TRAIT_COUNT],
}

impl Default for TraitVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl TraitVector {
    pub fn zeroed() -> Self {
        Self::filled(0.0)
    }

    pub fn filled(value: f64) -> Self {
        Self {
            values: [value; TRAIT_COUNT],
        }
    }

    #[inline(always)]
    pub fn get(&self, key: TraitKey) -> f64 {
        self.values[key.index()]
    }

    /// Looks a trait up by its code. Unknown codes yield `None`.
    pub fn lookup(&self, code: &str) -> Option<f64> {
        TraitKey::parse(code).map(|k| self.get(k))
    }

    pub fn with(mut self, key: TraitKey, value: f64) -> Self {
        self.values[key.index()] = value;
        self
    }

    pub(crate) fn set(&mut self, key: TraitKey, value: f64) {
        self.values[key.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitKey, f64)> + '_ {
        TraitKey::iter().map(move |k| (k, self.values[k.index()]))
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut out = *self;
        for v in out.values.iter_mut() {
            *v = f(*v);
        }
        out
    }
}

impl Serialize for TraitVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRAIT_COUNT))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k.code(), &v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TraitVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = TraitWeights::deserialize(deserializer)?;
        let mut out = TraitVector::zeroed();
        for (k, v) in entries.known() {
            out.set(k, v);
        }
        Ok(out)
    }
}

/// Sparse trait → weight table in declaration order.
///
/// Keys are kept as written so that banks may reference traits this build
/// does not know about; such keys are ignored by accumulation but still
/// count as "no signal" (0.5) wherever a trait value is looked up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitWeights(Vec<(String, f64)>);

impl TraitWeights {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or replaces a weight, keeping the original position on replace.
    pub fn with(mut self, code: impl Into<String>, weight: f64) -> Self {
        self.insert(code.into(), weight);
        self
    }

    fn insert(&mut self, code: String, weight: f64) {
        match self.0.iter_mut().find(|(k, _)| *k == code) {
            Some(slot) => slot.1 = weight,
            None => self.0.push((code, weight)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn known(&self) -> impl Iterator<Item = (TraitKey, f64)> + '_ {
        self.0
            .iter()
            .filter_map(|(k, w)| TraitKey::parse(k).map(|key| (key, *w)))
    }

    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0
            .iter()
            .filter(|(k, _)| TraitKey::parse(k).is_none())
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for TraitWeights {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (k, w) in iter {
            out.insert(k.into(), w);
        }
        out
    }
}

impl Serialize for TraitWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, w) in &self.0 {
            map.serialize_entry(k, w)?;
        }
        map.end()
    }
}

struct TraitWeightsVisitor;

impl<'de> Visitor<'de> for TraitWeightsVisitor {
    type Value = TraitWeights;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of trait code to numeric weight")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut out = TraitWeights::new();
        while let Some((k, w)) = access.next_entry::<String, f64>()? {
            out.insert(k, w);
        }
        Ok(out)
    }
}

impl<'de> Deserialize<'de> for TraitWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TraitWeightsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_codes_round_trip() {
        for key in TraitKey::iter() {
            assert_eq!(TraitKey::parse(key.code()), Some(key));
        }
        assert_eq!(TraitKey::parse("stab"), Some(TraitKey::Stability));
        assert_eq!(TraitKey::parse("N"), None);
    }

    #[test]
    fn test_weights_keep_declaration_order() {
        let w: TraitWeights = serde_json::from_str(r#"{"I": 0.3, "apt": 0.5, "zz": 1.0}"#).unwrap();
        let keys: Vec<&str> = w.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["I", "apt", "zz"]);
        assert_eq!(w.unknown_keys().collect::<Vec<_>>(), vec!["zz"]);
        assert_eq!(w.known().count(), 2);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(TraitTier::of(0.1), TraitTier::Low);
        assert_eq!(TraitTier::of(0.35), TraitTier::Mid);
        assert_eq!(TraitTier::of(0.65), TraitTier::High);
    }
}
