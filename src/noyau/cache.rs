//! Cache des résultats : clé = expression brute, valeur = résultat fini.
//!
//! Éviction FIFO (ordre d’insertion) : une lecture ne rafraîchit pas la place
//! d’une entrée. Le cache ne dépasse jamais sa capacité.

use indexmap::IndexMap;

/// Capacité par défaut (entrées).
pub const CAPACITE_DEFAUT: usize = 100;

#[derive(Clone, Debug)]
pub struct CacheResultats {
    capacite: usize,
    entrees: IndexMap<String, f64>,
}

impl Default for CacheResultats {
    fn default() -> Self {
        Self::new(CAPACITE_DEFAUT)
    }
}

impl CacheResultats {
    pub fn new(capacite: usize) -> Self {
        Self {
            capacite,
            entrees: IndexMap::with_capacity(capacite),
        }
    }

    pub fn capacite(&self) -> usize {
        self.capacite
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn contient(&self, cle: &str) -> bool {
        self.entrees.contains_key(cle)
    }

    pub fn get(&self, cle: &str) -> Option<f64> {
        self.entrees.get(cle).copied()
    }

    /// Insère `cle -> valeur`.
    ///
    /// Une clé déjà présente garde sa place (valeur remplacée). Sinon, si le
    /// cache est plein, la plus ancienne entrée part d’abord.
    pub fn put(&mut self, cle: String, valeur: f64) {
        if self.capacite == 0 {
            return;
        }
        if let Some(v) = self.entrees.get_mut(&cle) {
            *v = valeur;
            return;
        }
        while self.entrees.len() >= self.capacite {
            self.evincer_plus_ancienne();
        }
        self.entrees.insert(cle, valeur);
    }

    /// Ramène le cache sous sa capacité (utile si elle a été réduite).
    pub fn elaguer(&mut self) {
        while self.entrees.len() > self.capacite {
            self.evincer_plus_ancienne();
        }
    }

    /// Change la capacité ; les entrées en trop partent tout de suite.
    pub fn set_capacite(&mut self, capacite: usize) {
        self.capacite = capacite;
        self.elaguer();
    }

    fn evincer_plus_ancienne(&mut self) {
        if let Some((cle, _)) = self.entrees.shift_remove_index(0) {
            tracing::debug!(cle = %cle, "cache: éviction");
        }
    }
}
