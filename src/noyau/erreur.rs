// src/noyau/erreur.rs
//
// Erreurs du noyau
// ----------------
// - TypeErreur : les six catégories visibles par l’UI (exclusives, Copy)
// - Echec      : échec détaillé, levé là où le garde-fou se déclenche
//
// Le classement se fait par variante (jamais par lecture de texte).

use thiserror::Error;

/// Les six catégories d’échec d’une évaluation.
///
/// `Display` donne le libellé affiché par l’UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum TypeErreur {
    /// Argument hors du domaine mathématique (asin/acos, log/ln, sqrt).
    #[error("Erreur de domaine")]
    Domaine,

    /// tan sur une asymptote (90°, 270°).
    #[error("Indéfini")]
    Indefini,

    /// Parenthèses non équilibrées.
    #[error("Erreur de syntaxe")]
    Syntaxe,

    /// pow non fini.
    #[error("Dépassement")]
    Depassement,

    /// Caractère interdit, nom inconnu, ou résultat non fini.
    #[error("Entrée invalide")]
    Invalide,

    #[error("Erreur")]
    Inconnu,
}

/// Échec détaillé (journalisé), ramené à une seule `TypeErreur`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Echec {
    #[error("caractère interdit: '{0}'")]
    Caractere(char),

    #[error("parenthèses non équilibrées ({ouvrantes} ouvrantes, {fermantes} fermantes)")]
    Parentheses { ouvrantes: usize, fermantes: usize },

    #[error("{fonction}({argument}) : hors domaine")]
    Domaine {
        fonction: &'static str,
        argument: f64,
    },

    #[error("tan({angle}°) : asymptote")]
    Asymptote { angle: f64 },

    #[error("pow({base}, {exposant}) : résultat non fini")]
    Depassement { base: f64, exposant: f64 },

    #[error("résultat non fini: {0}")]
    NonFini(f64),

    #[error("entrée vide")]
    Vide,

    #[error("nom inconnu: {0}")]
    NomInconnu(String),

    #[error("{0} : fonction sans appel")]
    FonctionSansAppel(String),

    #[error("{0} : constante appelée comme une fonction")]
    ConstanteAppelee(String),

    #[error("{fonction} : {recu} argument(s) pour {attendu}")]
    Arite {
        fonction: String,
        attendu: &'static str,
        recu: usize,
    },

    #[error("nombre mal formé: {0}")]
    NombreInvalide(String),

    #[error("{0}")]
    Grammaire(&'static str),
}

impl Echec {
    /// Catégorie unique de l’échec.
    pub fn type_erreur(&self) -> TypeErreur {
        match self {
            Echec::Domaine { .. } => TypeErreur::Domaine,
            Echec::Asymptote { .. } => TypeErreur::Indefini,
            Echec::Parentheses { .. } => TypeErreur::Syntaxe,
            Echec::Depassement { .. } => TypeErreur::Depassement,

            Echec::Caractere(_)
            | Echec::NonFini(_)
            | Echec::Vide
            | Echec::NomInconnu(_)
            | Echec::FonctionSansAppel(_)
            | Echec::Arite { .. } => TypeErreur::Invalide,

            Echec::ConstanteAppelee(_)
            | Echec::NombreInvalide(_)
            | Echec::Grammaire(_) => TypeErreur::Inconnu,
        }
    }
}

impl From<Echec> for TypeErreur {
    fn from(e: Echec) -> Self {
        e.type_erreur()
    }
}
