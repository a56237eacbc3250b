use crate::error::Result;
use crate::types::{Individual, PokeRecord};

/// The bank: creatures already owned by the caller.
///
/// The search engines only ever read a pool. Matching consumes entries from a
/// private working list of borrowed references, so the caller's pool is never
/// modified.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    entries: Vec<Individual>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry unless one with the same id is already present
    pub fn add(&mut self, individual: Individual) -> bool {
        if self.contains_id(individual.id()) {
            log::debug!("Ignoring duplicate bank entry {}", individual.id());
            return false;
        }
        self.entries.push(individual);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Individual> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    /// True if some entry has the same normalized stats and sex
    pub fn has_match(&self, individual: &Individual) -> bool {
        self.entries.iter().any(|e| e.matches(individual))
    }

    pub fn get(&self, id: &str) -> Option<&Individual> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.entries
    }

    /// Borrowed working copy for a single matching pass
    pub fn snapshot(&self) -> Vec<&Individual> {
        self.entries.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_records(records: &[PokeRecord]) -> Result<Self> {
        let mut pool = Self::new();
        for record in records {
            pool.add(Individual::from_record(record)?);
        }
        Ok(pool)
    }

    pub fn to_records(&self) -> Vec<PokeRecord> {
        self.entries.iter().map(Individual::to_record).collect()
    }
}

impl FromIterator<Individual> for Pool {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        let mut pool = Self::new();
        for individual in iter {
            pool.add(individual);
        }
        pool
    }
}
