//! src/app/etat.rs
//!
//! État UI (sans rendu).
//!
//! Rôle : contenir l’état de la calculatrice (expression en cours, affichage,
//! erreur, préférences) et offrir les actions des touches (C/AC/DEL/=).
//!
//! Contrats :
//! - Aucun rendu ici (egui vit dans vue.rs).
//! - Évaluation déléguée au noyau ; l’UI ne fait que choisir quand l’appeler.
//! - Sur échec : libellé de la catégorie à l’écran + expression remise à zéro.

use serde::{Deserialize, Serialize};

use crate::noyau::reglages::CAPACITE_MAX;
use crate::noyau::{Evaluateur, Reglages};

/// Motifs retirés d’un coup par DEL (les plus longs d’abord).
const MOTIFS_DEL: [&str; 11] = [
    "asin(", "acos(", "atan(", "sqrt(", "sin(", "cos(", "tan(", "log(", "pow(", "ln(", "pi",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Sombre,
    Clair,
}

/// Préférences persistées (stockage eframe).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub reglages: Reglages,
}

/// Genre de touche (règles d’insertion).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre,
    Operateur,
    Fonction,
    Constante,
    Parenthese,
    Virgule,
}

#[derive(Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub affichage: String,
    pub erreur: String,

    // --- paramètres ---
    pub preferences: Preferences,

    // --- UX ---
    // Après "=", un chiffre repart de zéro ; un opérateur continue le résultat.
    pub vient_d_evaluer: bool,
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,

    evaluateur: Evaluateur,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_preferences(Preferences::default())
    }
}

impl AppCalc {
    pub fn avec_preferences(preferences: Preferences) -> Self {
        Self {
            entree: String::new(),
            affichage: "0".to_string(),
            erreur: String::new(),
            evaluateur: preferences.reglages.evaluateur(),
            preferences,
            vient_d_evaluer: false,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// AC : remise à zéro totale (entrée + affichage + erreur). Le cache survit.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.affichage = "0".to_string();
        self.erreur.clear();
        self.vient_d_evaluer = false;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher à l’affichage).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.vient_d_evaluer = false;
        self.focus_entree = true;
    }

    /// DEL “intelligent” : retire d’un coup les motifs utiles ("sin(", "pi", etc.).
    pub fn backspace_entree(&mut self) {
        self.vient_d_evaluer = false;
        self.focus_entree = true;

        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);

        if let Some(pat) = MOTIFS_DEL.iter().find(|p| self.entree.ends_with(*p)) {
            let garde = self.entree.len() - pat.len();
            self.entree.truncate(garde);
        } else {
            self.entree.pop();
        }

        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);
    }

    /// Insère le texte d’une touche.
    ///
    /// Juste après un résultat : chiffre/fonction/constante/'(' repartent d’une
    /// expression vide, un opérateur continue à partir du résultat.
    pub fn inserer(&mut self, texte: &str, touche: Touche) {
        if self.vient_d_evaluer && touche != Touche::Operateur {
            self.entree.clear();
        }
        self.vient_d_evaluer = false;
        self.erreur.clear();
        self.entree.push_str(texte);
        self.focus_entree = true;
    }

    /// "=" : évalue l’entrée via le noyau et dépose le résultat (ou l’erreur).
    pub fn evaluer_entree(&mut self) {
        self.focus_entree = true;

        if self.entree.trim().is_empty() {
            return;
        }

        match self.evaluateur.evaluer(&self.entree) {
            Ok(v) => {
                self.affichage = self.preferences.reglages.formater(v);
                self.erreur.clear();
                // l’expression devient le résultat (texte relisible par le noyau)
                self.entree = format!("{v}");
                self.vient_d_evaluer = true;
            }
            Err(t) => {
                tracing::info!(entree = %self.entree, erreur = %t, "évaluation refusée");
                self.erreur = t.to_string();
                self.affichage = t.to_string();
                self.entree.clear();
                self.vient_d_evaluer = false;
            }
        }
    }

    pub fn basculer_theme(&mut self) {
        self.preferences.theme = match self.preferences.theme {
            Theme::Sombre => Theme::Clair,
            Theme::Clair => Theme::Sombre,
        };
    }

    /// Change le séparateur de milliers (l’affichage courant n’est pas recalculé).
    pub fn set_separateur(&mut self, separateur: char) {
        self.preferences.reglages.separateur_milliers = separateur;
    }

    /// Redimensionne le cache de session ; les entrées les plus anciennes
    /// en trop partent tout de suite.
    pub fn set_capacite_cache(&mut self, capacite: usize) {
        let capacite = capacite.min(CAPACITE_MAX);
        self.preferences.reglages.capacite_cache = capacite;
        self.evaluateur.cache_mut().set_capacite(capacite);
        tracing::info!(capacite, "capacité du cache changée");
    }

    pub fn evaluateur(&self) -> &Evaluateur {
        &self.evaluateur
    }
}
