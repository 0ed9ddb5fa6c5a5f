// src/noyau/jetons.rs

use super::erreur::Echec;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constantes + fonctions (le registre tranche ensuite)
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,
    Virgule,

    // Acceptés par la validation, refusés par la grammaire
    LCroch,
    RCroch,
}

/// Tokenize une chaîne (déjà normalisée) en jetons.
/// Supporte:
/// - nombres : 12, 1.5, .5, 1., 1e5, 2.5e-3
/// - opérateurs + - * /
/// - parenthèses ( ), virgule, crochets [ ]
/// - identifiants [a-zA-Z][a-zA-Z0-9]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, Echec> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '[' => Some(Tok::LCroch),
            ']' => Some(Tok::RCroch),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII
        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre : chiffres, partie décimale, exposant
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }

            // exposant seulement si suivi d’un chiffre (sinon "e" reste un identifiant)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let lexeme: String = chars[start..i].iter().collect();

            // "1.2.3" : un second point collé au nombre
            if i < chars.len() && chars[i] == '.' {
                let mut fin = i;
                while fin < chars.len() && (chars[fin].is_ascii_digit() || chars[fin] == '.') {
                    fin += 1;
                }
                let tout: String = chars[start..fin].iter().collect();
                return Err(Echec::NombreInvalide(tout));
            }

            let n = lexeme
                .parse::<f64>()
                .map_err(|_| Echec::NombreInvalide(lexeme.clone()))?;
            out.push(Tok::Num(n));
            continue;
        }

        return Err(Echec::Caractere(c));
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),
            Tok::LCroch => "[".to_string(),
            Tok::RCroch => "]".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
