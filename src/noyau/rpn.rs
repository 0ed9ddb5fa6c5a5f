// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> Expr
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), appels de fonction compris
// - Puis résoudre les noms du registre en Expr (postfixe, pile équilibrée)
//
// Règles:
// - Ident(name) suivi de '(' => appel ; l’arité est comptée aux virgules
// - Ident(name) seul        => constante (le registre tranche dans from_rpn)
// - Moins unaire : si '-' arrive quand on n’attend PAS de valeur => Neg (préfixe)
// - Plus unaire  : ignoré
// - Pas de multiplication implicite : "2pi", "2(3)" sont refusés
//
// NOTE:
// - Les fonctions restent sous leur '(' sur la pile d’opérateurs
//   et sortent à la parenthèse fermante.

use super::contexte::{chercher, Nom};
use super::erreur::Echec;
use super::expr::{Expr, Instr};
use super::jetons::Tok;

#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Nom(String),
    Appel(String, usize),
    Neg,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Debug)]
enum Pile {
    Op(Rpn),
    LPar,
    Fonction(String),
}

/// Un niveau de parenthèses ouvert.
struct Niveau {
    appel: bool,
    virgules: usize,
}

fn precedence(op: &Rpn) -> i32 {
    match op {
        Rpn::Add | Rpn::Sub => 1,
        Rpn::Mul | Rpn::Div => 2,
        Rpn::Neg => 3,
        _ => 0,
    }
}

/// Dépile les opérateurs de précédence >= `p` (associativité gauche).
fn depile_operateurs(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>, p: i32) {
    while let Some(Pile::Op(top)) = ops.last() {
        if precedence(top) < p {
            break;
        }
        if let Some(Pile::Op(op)) = ops.pop() {
            out.push(op);
        }
    }
}

/// Dépile jusqu’à la '(' ouvrante (consommée). Erreur si absente.
fn depile_jusqu_a_parenthese(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) -> Result<(), Echec> {
    loop {
        match ops.pop() {
            Some(Pile::Op(op)) => out.push(op),
            Some(Pile::LPar) => return Ok(()),
            Some(Pile::Fonction(_)) | None => {
                return Err(Echec::Grammaire("parenthèse fermante inattendue"))
            }
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("pow"), LPar, Num(2), Virgule, Num(3), RPar, Star, Num(4)]
///   rpn:    [Num(2), Num(3), Appel("pow", 2), Num(4), Mul]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, Echec> {
    if tokens.is_empty() {
        return Err(Echec::Vide);
    }

    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();
    let mut niveaux: Vec<Niveau> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    let mut prev_was_value = false;

    let mut i = 0usize;
    while i < tokens.len() {
        let tok = &tokens[i];
        i += 1;

        match tok {
            Tok::Num(n) => {
                if prev_was_value {
                    return Err(Echec::Grammaire("valeur inattendue"));
                }
                out.push(Rpn::Num(*n));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(Echec::Grammaire("valeur inattendue"));
                }
                if matches!(tokens.get(i), Some(Tok::LPar)) {
                    // appel : la fonction attend sous sa parenthèse
                    i += 1;
                    ops.push(Pile::Fonction(name.clone()));
                    ops.push(Pile::LPar);
                    niveaux.push(Niveau {
                        appel: true,
                        virgules: 0,
                    });
                    prev_was_value = false;
                } else {
                    out.push(Rpn::Nom(name.clone()));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(Echec::Grammaire("parenthèse après une valeur"));
                }
                ops.push(Pile::LPar);
                niveaux.push(Niveau {
                    appel: false,
                    virgules: 0,
                });
                prev_was_value = false;
            }

            Tok::Virgule => {
                let dans_appel = matches!(niveaux.last(), Some(n) if n.appel);
                if !dans_appel || !prev_was_value {
                    return Err(Echec::Grammaire("virgule inattendue"));
                }
                // vide jusqu’à la '(' de l’appel, sans la retirer
                while let Some(Pile::Op(_)) = ops.last() {
                    if let Some(Pile::Op(op)) = ops.pop() {
                        out.push(op);
                    }
                }
                if let Some(n) = niveaux.last_mut() {
                    n.virgules += 1;
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                let niveau = niveaux
                    .pop()
                    .ok_or(Echec::Grammaire("parenthèse fermante inattendue"))?;
                depile_jusqu_a_parenthese(&mut ops, &mut out)?;

                if niveau.appel {
                    let nargs = match (prev_was_value, niveau.virgules) {
                        (true, v) => v + 1,
                        (false, 0) => 0,
                        (false, _) => return Err(Echec::Grammaire("argument manquant")),
                    };
                    match ops.pop() {
                        Some(Pile::Fonction(name)) => out.push(Rpn::Appel(name, nargs)),
                        _ => return Err(Echec::Grammaire("appel mal formé")),
                    }
                } else if !prev_was_value {
                    return Err(Echec::Grammaire("parenthèses vides"));
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                if !prev_was_value {
                    // unaire
                    match tok {
                        Tok::Plus => continue,
                        Tok::Minus => {
                            ops.push(Pile::Op(Rpn::Neg));
                            continue;
                        }
                        _ => return Err(Echec::Grammaire("opérateur sans opérande")),
                    }
                }

                let op = match tok {
                    Tok::Plus => Rpn::Add,
                    Tok::Minus => Rpn::Sub,
                    Tok::Star => Rpn::Mul,
                    _ => Rpn::Div,
                };
                depile_operateurs(&mut ops, &mut out, precedence(&op));
                ops.push(Pile::Op(op));
                prev_was_value = false;
            }

            Tok::LCroch | Tok::RCroch => return Err(Echec::Grammaire("crochet inattendu")),
        }
    }

    if !prev_was_value {
        return Err(Echec::Grammaire("expression incomplète"));
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::Op(op) => out.push(op),
            Pile::LPar | Pile::Fonction(_) => {
                return Err(Echec::Grammaire("parenthèses non fermées"))
            }
        }
    }

    Ok(out)
}

/// Résout une RPN en Expr évaluable.
///
/// - Nom(name)      : constante du registre (fonction sans appel / inconnu => erreur)
/// - Appel(name, n) : fonction du registre, arité vérifiée
///
/// Aucune récursion : la longueur et l’imbrication ne sont pas bornées.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, Echec> {
    let mut instrs: Vec<Instr> = Vec::with_capacity(rpn.len());

    for tok in rpn.iter() {
        let ins = match tok {
            Rpn::Num(n) => Instr::Nombre(*n),

            Rpn::Nom(name) => match chercher(name) {
                Some(Nom::Constante(c)) => Instr::Const(c),
                Some(Nom::Fonction(_)) => return Err(Echec::FonctionSansAppel(name.clone())),
                None => return Err(Echec::NomInconnu(name.clone())),
            },

            Rpn::Appel(name, nargs) => {
                let f = match chercher(name) {
                    Some(Nom::Fonction(f)) => f,
                    Some(Nom::Constante(_)) => {
                        return Err(Echec::ConstanteAppelee(name.clone()))
                    }
                    None => return Err(Echec::NomInconnu(name.clone())),
                };
                if !f.arite().accepte(*nargs) {
                    return Err(Echec::Arite {
                        fonction: name.clone(),
                        attendu: f.arite().description(),
                        recu: *nargs,
                    });
                }
                Instr::Appel(f, *nargs)
            }

            Rpn::Neg => Instr::Neg,
            Rpn::Add => Instr::Add,
            Rpn::Sub => Instr::Sub,
            Rpn::Mul => Instr::Mul,
            Rpn::Div => Instr::Div,
        };
        instrs.push(ins);
    }

    Expr::nouvelle(instrs)
}
