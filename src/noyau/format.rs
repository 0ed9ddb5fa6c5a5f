// src/noyau/format.rs
//
// Affichage d’un résultat fini, borné en longueur:
// 1) 0 < |n| < 1e-10  -> exponentiel, 4 décimales (1.0000e-11)
// 2) |n| > 1e9        -> exponentiel, 4 décimales (1.2346e+10)
// 3) entier           -> groupes de milliers (1,000,000)
// 4) sinon            -> 12 chiffres significatifs, zéros de queue retirés

use num_traits::ToPrimitive;

/// Séparateur de milliers par défaut.
pub const SEPARATEUR_DEFAUT: char = ',';

const SEUIL_PETIT: f64 = 1e-10;
const SEUIL_GRAND: f64 = 1e9;
const DECIMALES_EXPONENTIEL: usize = 4;
const CHIFFRES_SIGNIFICATIFS: usize = 12;

/// API publique : formate avec le séparateur par défaut.
pub fn formater(n: f64) -> String {
    formater_avec(n, SEPARATEUR_DEFAUT)
}

/// Formate `n` (supposé fini ; total quand même : `inf`, `NaN` passent en texte brut).
pub fn formater_avec(n: f64, separateur: char) -> String {
    let a = n.abs();

    if (a > 0.0 && a < SEUIL_PETIT) || a > SEUIL_GRAND {
        return format_exponentiel(n, DECIMALES_EXPONENTIEL);
    }

    if n.fract() == 0.0 {
        return format_entier_groupe(n, separateur);
    }

    format_significatif(n, CHIFFRES_SIGNIFICATIFS)
}

/// Mantisse à `decimales` chiffres, exposant toujours signé.
fn format_exponentiel(n: f64, decimales: usize) -> String {
    let s = format!("{n:.decimales$e}");
    match s.split_once('e') {
        Some((mantisse, exposant)) if !exposant.starts_with('-') => {
            format!("{mantisse}e+{exposant}")
        }
        _ => s,
    }
}

fn format_entier_groupe(n: f64, separateur: char) -> String {
    match n.to_i64() {
        Some(i) => grouper_milliers(i, separateur),
        None => format!("{n:.0}"),
    }
}

/// Entier avec séparateur tous les 3 chiffres (signe conservé).
fn grouper_milliers(valeur: i64, separateur: char) -> String {
    let chiffres = valeur.unsigned_abs().to_string();

    let mut out = String::with_capacity(chiffres.len() + chiffres.len() / 3 + 1);
    if valeur < 0 {
        out.push('-');
    }
    for (i, c) in chiffres.chars().enumerate() {
        if i > 0 && (chiffres.len() - i) % 3 == 0 {
            out.push(separateur);
        }
        out.push(c);
    }
    out
}

/// Arrondi à `chiffres` significatifs, puis forme décimale la plus courte.
fn format_significatif(n: f64, chiffres: usize) -> String {
    let precision = chiffres.saturating_sub(1);
    let arrondi: f64 = format!("{n:.precision$e}").parse().unwrap_or(n);
    retirer_zeros_de_queue(format!("{arrondi}"))
}

fn retirer_zeros_de_queue(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
