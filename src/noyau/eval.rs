//! Noyau — évaluation (pipeline réel)
//!
//! cache -> normalisation (espaces) -> caractères autorisés -> parenthèses
//!       -> jetons -> RPN -> Expr -> évaluation -> résultat fini -> cache
//!
//! Tout échec est ramené à une seule `TypeErreur` ; rien ne panique.

use std::sync::{Mutex, OnceLock, PoisonError};

use super::cache::CacheResultats;
use super::erreur::{Echec, TypeErreur};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};

/// Évaluateur avec son cache (capacité injectée).
#[derive(Clone, Debug, Default)]
pub struct Evaluateur {
    cache: CacheResultats,
}

impl Evaluateur {
    pub fn avec_capacite(capacite: usize) -> Self {
        Self {
            cache: CacheResultats::new(capacite),
        }
    }

    pub fn cache(&self) -> &CacheResultats {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut CacheResultats {
        &mut self.cache
    }

    /// Évalue `expression` (clé de cache = texte brut, espaces compris).
    pub fn evaluer(&mut self, expression: &str) -> Result<f64, TypeErreur> {
        // 1) Cache (un hit court-circuite toute validation)
        self.cache.elaguer();
        if let Some(v) = self.cache.get(expression) {
            tracing::debug!(expression, valeur = v, "cache: hit");
            return Ok(v);
        }

        // 2..6) Calcul
        match calculer(expression) {
            Ok(v) => {
                // 7) Stockage
                self.cache.put(expression.to_string(), v);
                tracing::debug!(expression, valeur = v, "cache: stocké");
                Ok(v)
            }
            Err(e) => {
                let t = e.type_erreur();
                tracing::debug!(expression, echec = %e, type_erreur = ?t, "échec classé");
                Err(t)
            }
        }
    }
}

/// Pipeline sans cache : normalisation, validation, calcul, résultat fini.
pub fn calculer(expression: &str) -> Result<f64, Echec> {
    // 2) Normalisation
    let s: String = expression.chars().filter(|c| !c.is_whitespace()).collect();

    // 3) Caractères autorisés
    valider_caracteres(&s)?;

    // 4) Parenthèses équilibrées (comptage)
    verifier_parentheses(&s)?;

    // 5) Jetons -> RPN -> Expr -> valeur
    let jetons = tokenize(&s)?;
    let rpn = to_rpn(&jetons)?;
    tracing::trace!(
        jetons = %format_tokens(&jetons),
        rpn = rpn.len(),
        "expression analysée"
    );
    let v = from_rpn(&rpn)?.evaluer()?;

    // 6) Résultat fini
    if !v.is_finite() {
        return Err(Echec::NonFini(v));
    }
    Ok(v)
}

/// Chiffres, lettres ASCII, `+ - * / ( ) . , [ ]`.
fn valider_caracteres(s: &str) -> Result<(), Echec> {
    match s
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || "+-*/().,[]".contains(*c)))
    {
        Some(c) => Err(Echec::Caractere(c)),
        None => Ok(()),
    }
}

fn verifier_parentheses(s: &str) -> Result<(), Echec> {
    let ouvrantes = s.chars().filter(|&c| c == '(').count();
    let fermantes = s.chars().filter(|&c| c == ')').count();
    if ouvrantes != fermantes {
        return Err(Echec::Parentheses {
            ouvrantes,
            fermantes,
        });
    }
    Ok(())
}

static EVALUATEUR: OnceLock<Mutex<Evaluateur>> = OnceLock::new();

/// API publique : évaluation avec le cache partagé du processus.
pub fn evaluer(expression: &str) -> Result<f64, TypeErreur> {
    let m = EVALUATEUR.get_or_init(|| Mutex::new(Evaluateur::default()));
    let mut guard = m.lock().unwrap_or_else(PoisonError::into_inner);
    guard.evaluer(expression)
}
