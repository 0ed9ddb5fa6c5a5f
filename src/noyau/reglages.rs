//! Réglages du noyau (capacité du cache, séparateur de milliers).
//!
//! Sérialisables : l’UI les range avec ses préférences.

use serde::{Deserialize, Serialize};

use super::cache::CAPACITE_DEFAUT;
use super::eval::Evaluateur;
use super::format::{formater_avec, SEPARATEUR_DEFAUT};

/// Garde-fou : borne haute de la capacité du cache.
pub const CAPACITE_MAX: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub capacite_cache: usize,
    pub separateur_milliers: char,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            capacite_cache: CAPACITE_DEFAUT,
            separateur_milliers: SEPARATEUR_DEFAUT,
        }
    }
}

impl Reglages {
    /// Évaluateur neuf, cache dimensionné selon les réglages (borné).
    pub fn evaluateur(&self) -> Evaluateur {
        Evaluateur::avec_capacite(self.capacite_cache.min(CAPACITE_MAX))
    }

    pub fn formater(&self, n: f64) -> String {
        formater_avec(n, self.separateur_milliers)
    }
}
