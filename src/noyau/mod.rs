//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - erreur.rs   : six catégories d’échec + échec détaillé
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard + résolution des noms
//! - expr.rs     : forme postfixe résolue + évaluation bac à sable (itérative)
//! - contexte.rs : registre fermé (constantes, fonctions, gardes de domaine)
//! - trig.rs     : degrés + angles notables + indéfini
//! - cache.rs    : cache FIFO borné
//! - eval.rs     : pipeline complet
//! - format.rs   : affichage borné du résultat
//! - reglages.rs : capacité du cache, séparateur

pub mod cache;
pub mod contexte;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod reglages;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use cache::CacheResultats;
pub use erreur::TypeErreur;
pub use eval::{evaluer, Evaluateur};
pub use format::{formater, formater_avec};
pub use reglages::Reglages;
