//! Calculatrice web — noyau (évaluation + affichage) et UI eframe.
//!
//! Le noyau expose deux fonctions pures pour l’UI :
//! - `noyau::evaluer(&str) -> Result<f64, TypeErreur>`
//! - `noyau::formater(f64) -> String`

pub mod app;
pub mod noyau;
