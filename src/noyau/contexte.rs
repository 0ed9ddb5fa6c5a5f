//! Contexte mathématique : registre fermé des constantes et fonctions.
//!
//! Rien d’autre n’est atteignable depuis une expression. Les fonctions
//! "gardées" (trig en degrés, log/ln, sqrt, asin/acos, pow) vérifient leur
//! domaine avant de calculer.

use super::erreur::Echec;
use super::trig::{trig_degres, TrigFn, TrigOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Sqrt,
    Pow,

    // primitives sans garde
    Abs,
    Floor,
    Ceil,
    Round,
    Trunc,
    Exp,
    Cbrt,
    Sign,
    Min,
    Max,
}

/// Nombre d’arguments accepté par une fonction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Exacte(usize),
    AuMoins(usize),
}

impl Arite {
    pub fn accepte(self, n: usize) -> bool {
        match self {
            Arite::Exacte(k) => n == k,
            Arite::AuMoins(k) => n >= k,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Arite::Exacte(1) => "1",
            Arite::Exacte(2) => "2",
            Arite::AuMoins(1) => "au moins 1",
            _ => "?",
        }
    }
}

/// Entrée du registre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nom {
    Constante(Constante),
    Fonction(Fonction),
}

/// Cherche un nom (déjà en minuscules) dans le registre.
pub fn chercher(nom: &str) -> Option<Nom> {
    use Fonction::*;

    let f = match nom {
        "pi" => return Some(Nom::Constante(Constante::Pi)),
        "e" => return Some(Nom::Constante(Constante::E)),

        "sin" => Sin,
        "cos" => Cos,
        "tan" => Tan,
        "asin" => Asin,
        "acos" => Acos,
        "atan" => Atan,
        "log" => Log,
        "ln" => Ln,
        "sqrt" => Sqrt,
        "pow" => Pow,

        "abs" => Abs,
        "floor" => Floor,
        "ceil" => Ceil,
        "round" => Round,
        "trunc" => Trunc,
        "exp" => Exp,
        "cbrt" => Cbrt,
        "sign" => Sign,
        "min" => Min,
        "max" => Max,

        _ => return None,
    };
    Some(Nom::Fonction(f))
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Log => "log",
            Ln => "ln",
            Sqrt => "sqrt",
            Pow => "pow",
            Abs => "abs",
            Floor => "floor",
            Ceil => "ceil",
            Round => "round",
            Trunc => "trunc",
            Exp => "exp",
            Cbrt => "cbrt",
            Sign => "sign",
            Min => "min",
            Max => "max",
        }
    }

    pub fn arite(self) -> Arite {
        match self {
            Fonction::Pow => Arite::Exacte(2),
            Fonction::Min | Fonction::Max => Arite::AuMoins(1),
            _ => Arite::Exacte(1),
        }
    }

    /// Applique la fonction. L’arité a déjà été vérifiée à la construction de l’arbre.
    pub fn appliquer(self, args: &[f64]) -> Result<f64, Echec> {
        use Fonction::*;

        // Un NaN n’est jamais une erreur de domaine : il traverse les gardes
        // et la validation finale le refuse.
        let x = args.first().copied().unwrap_or(f64::NAN);

        match self {
            Sin => trig(x, TrigFn::Sin),
            Cos => trig(x, TrigFn::Cos),
            Tan => trig(x, TrigFn::Tan),

            Asin | Acos => {
                if x < -1.0 || x > 1.0 {
                    return Err(Echec::Domaine {
                        fonction: self.nom(),
                        argument: x,
                    });
                }
                let r = if self == Asin { x.asin() } else { x.acos() };
                Ok(r.to_degrees())
            }
            Atan => Ok(x.atan().to_degrees()),

            Log | Ln => {
                if x <= 0.0 {
                    return Err(Echec::Domaine {
                        fonction: self.nom(),
                        argument: x,
                    });
                }
                Ok(if self == Log { x.log10() } else { x.ln() })
            }

            Sqrt => {
                if x < 0.0 {
                    return Err(Echec::Domaine {
                        fonction: "sqrt",
                        argument: x,
                    });
                }
                Ok(x.sqrt())
            }

            Pow => {
                let exposant = args.get(1).copied().unwrap_or(f64::NAN);
                let r = x.powf(exposant);
                if !r.is_finite() {
                    return Err(Echec::Depassement { base: x, exposant });
                }
                Ok(r)
            }

            Abs => Ok(x.abs()),
            Floor => Ok(x.floor()),
            Ceil => Ok(x.ceil()),
            Round => Ok(arrondi_demi_haut(x)),
            Trunc => Ok(x.trunc()),
            Exp => Ok(x.exp()),
            Cbrt => Ok(x.cbrt()),
            Sign => Ok(signe(x)),
            Min | Max if args.iter().any(|a| a.is_nan()) => Ok(f64::NAN),
            Min => Ok(args.iter().copied().fold(f64::INFINITY, f64::min)),
            Max => Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        }
    }
}

fn trig(x: f64, f: TrigFn) -> Result<f64, Echec> {
    match trig_degres(x, f) {
        TrigOutcome::Valeur(v) => Ok(v),
        TrigOutcome::Indefini => Err(Echec::Asymptote { angle: x }),
    }
}

/// Arrondi à l’entier, demi vers +∞ (2.5 -> 3, -2.5 -> -2).
fn arrondi_demi_haut(x: f64) -> f64 {
    let f = x.floor();
    if x - f >= 0.5 {
        f + 1.0
    } else {
        f
    }
}

/// -1, 0 ou 1 ; 0 garde son signe, NaN reste NaN.
fn signe(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}
