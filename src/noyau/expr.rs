// src/noyau/expr.rs
//
// Expression résolue + évaluation bac à sable
// -------------------------------------------
// Grammaire fermée : nombres, + - * /, moins unaire, constantes et appels du
// registre (contexte.rs). Aucun autre pouvoir n’est atteignable.
//
// Forme postfixe : les noms sont déjà résolus et les arités vérifiées
// (rpn.rs::from_rpn). L’évaluation est une boucle sur une pile de valeurs,
// sans récursion : ni la longueur ni l’imbrication ne menacent la pile d’appels.
//
// Division par zéro : IEEE-754 (±∞ ou NaN) ; c’est la validation finale
// (eval.rs) qui refuse le non-fini.

use super::contexte::{Constante, Fonction};
use super::erreur::Echec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instr {
    Nombre(f64),
    Const(Constante),

    Neg,

    Add,
    Sub,
    Mul,
    Div,

    /// Fonction appliquée aux `n` dernières valeurs.
    Appel(Fonction, usize),
}

impl Instr {
    /// Variation de hauteur de la pile de valeurs.
    fn effet(self) -> (usize, usize) {
        match self {
            Instr::Nombre(_) | Instr::Const(_) => (0, 1),
            Instr::Neg => (1, 1),
            Instr::Add | Instr::Sub | Instr::Mul | Instr::Div => (2, 1),
            Instr::Appel(_, n) => (n, 1),
        }
    }
}

/// Suite d’instructions postfixe dont la pile est équilibrée.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    instrs: Vec<Instr>,
    hauteur_max: usize,
}

impl Expr {
    /// Vérifie l’équilibre de la pile : chaque instruction trouve ses
    /// opérandes et il reste exactement une valeur à la fin.
    pub fn nouvelle(instrs: Vec<Instr>) -> Result<Self, Echec> {
        let mut hauteur = 0usize;
        let mut hauteur_max = 0usize;
        for ins in &instrs {
            let (consomme, produit) = ins.effet();
            hauteur = hauteur
                .checked_sub(consomme)
                .ok_or(Echec::Grammaire("expression invalide"))?
                + produit;
            hauteur_max = hauteur_max.max(hauteur);
        }
        if hauteur != 1 {
            return Err(Echec::Grammaire("expression invalide"));
        }
        Ok(Self {
            instrs,
            hauteur_max,
        })
    }

    pub fn instructions(&self) -> &[Instr] {
        &self.instrs
    }

    /// Évalue la suite. Le premier garde-fou déclenché gagne (gauche -> droite).
    pub fn evaluer(&self) -> Result<f64, Echec> {
        let mut pile: Vec<f64> = Vec::with_capacity(self.hauteur_max);

        for ins in &self.instrs {
            let v = match *ins {
                Instr::Nombre(n) => n,
                Instr::Const(c) => c.valeur(),

                Instr::Neg => -depiler(&mut pile)?,

                Instr::Add | Instr::Sub | Instr::Mul | Instr::Div => {
                    let b = depiler(&mut pile)?;
                    let a = depiler(&mut pile)?;
                    match ins {
                        Instr::Add => a + b,
                        Instr::Sub => a - b,
                        Instr::Mul => a * b,
                        _ => a / b,
                    }
                }

                Instr::Appel(f, n) => {
                    let debut = pile
                        .len()
                        .checked_sub(n)
                        .ok_or(Echec::Grammaire("expression invalide"))?;
                    let args = pile.split_off(debut);
                    f.appliquer(&args)?
                }
            };
            pile.push(v);
        }

        match (pile.pop(), pile.is_empty()) {
            (Some(v), true) => Ok(v),
            _ => Err(Echec::Grammaire("expression invalide")),
        }
    }
}

fn depiler(pile: &mut Vec<f64>) -> Result<f64, Echec> {
    pile.pop().ok_or(Echec::Grammaire("expression invalide"))
}
