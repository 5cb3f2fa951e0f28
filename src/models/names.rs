use crate::config::NamesConfig;
use crate::error::{AdherenceError, AdherenceResult};
use crate::simulation::RandomSource;

const MEDICATION_NAMES: &[&str] = &[
    "Zentravil", "Corvexa", "Lumidrone", "Hepatrix", "Novacort", "Pyrelax",
    "Ostrafen", "Calmitra", "Duvoxin", "Ferrolyn", "Gliptavor", "Neurazol",
    "Velocain", "Tramexil", "Quenadol", "Soriflex", "Brevamid", "Xylotrin",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Clara", "Dmitri", "Elena", "Farid", "Greta", "Hiro",
    "Ines", "Jonas", "Kemal", "Lucia", "Mateo", "Nadia", "Oskar", "Priya",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Baptiste", "Castillo", "Dubois", "Eriksen", "Fischer",
    "Gallagher", "Haddad", "Ivanova", "Jansen", "Kowalski", "Lindqvist",
    "Moreau", "Nakamura", "Okafor", "Petrov",
];

/// Pools of plausible names the generators draw from.
#[derive(Debug, Clone)]
pub struct NamePool {
    medications: Vec<String>,
    first_names: Vec<String>,
    last_names: Vec<String>,
}

impl NamePool {
    pub fn builtin() -> Self {
        Self {
            medications: owned(MEDICATION_NAMES),
            first_names: owned(FIRST_NAMES),
            last_names: owned(LAST_NAMES),
        }
    }

    /// Custom pools when configured, built-in ones otherwise.
    pub fn from_config(config: Option<&NamesConfig>) -> Self {
        match config {
            Some(names) => Self {
                medications: names.medications.clone(),
                first_names: names.first_names.clone(),
                last_names: names.last_names.clone(),
            },
            None => Self::builtin(),
        }
    }

    pub fn medication<R: RandomSource>(&self, rng: &mut R) -> AdherenceResult<String> {
        draw(&self.medications, "medication", rng)
    }

    pub fn first_name<R: RandomSource>(&self, rng: &mut R) -> AdherenceResult<String> {
        draw(&self.first_names, "first name", rng)
    }

    pub fn last_name<R: RandomSource>(&self, rng: &mut R) -> AdherenceResult<String> {
        draw(&self.last_names, "last name", rng)
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn draw<R: RandomSource>(pool: &[String], kind: &str, rng: &mut R) -> AdherenceResult<String> {
    rng.choose(pool)
        .cloned()
        .ok_or_else(|| AdherenceError::EmptyPool(kind.to_string()))
}
