// src/noyau/trig.rs
//
// Trig en degrés + angles notables
// --------------------------------
// - Normalisation dans [0,360) : ((x mod 360) + 360) mod 360
// - Table des angles notables (famille 30°/45°/60°/90°) : valeurs exactes,
//   sans le bruit flottant de sin/cos/tan en radians
// - tan(90°) / tan(270°) : indéfini

/// Tolérance de reconnaissance d’un angle notable (asymptotes comprises).
pub const TOLERANCE_ANGLE: f64 = 1e-10;

const RACINE2_SUR_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
const RACINE3_SUR_2: f64 = 0.866_025_403_784_438_6;
const RACINE3_SUR_3: f64 = 0.577_350_269_189_625_8;
const RACINE3: f64 = 1.732_050_807_568_877_2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrigOutcome {
    Valeur(f64),
    Indefini,
}

/// (angle, sin, cos, tan) ; tan = None sur les asymptotes.
static TABLE: [(f64, f64, f64, Option<f64>); 16] = [
    (0.0, 0.0, 1.0, Some(0.0)),
    (30.0, 0.5, RACINE3_SUR_2, Some(RACINE3_SUR_3)),
    (45.0, RACINE2_SUR_2, RACINE2_SUR_2, Some(1.0)),
    (60.0, RACINE3_SUR_2, 0.5, Some(RACINE3)),
    (90.0, 1.0, 0.0, None),
    (120.0, RACINE3_SUR_2, -0.5, Some(-RACINE3)),
    (135.0, RACINE2_SUR_2, -RACINE2_SUR_2, Some(-1.0)),
    (150.0, 0.5, -RACINE3_SUR_2, Some(-RACINE3_SUR_3)),
    (180.0, 0.0, -1.0, Some(0.0)),
    (210.0, -0.5, -RACINE3_SUR_2, Some(RACINE3_SUR_3)),
    (225.0, -RACINE2_SUR_2, -RACINE2_SUR_2, Some(1.0)),
    (240.0, -RACINE3_SUR_2, -0.5, Some(RACINE3)),
    (270.0, -1.0, 0.0, None),
    (300.0, -RACINE3_SUR_2, 0.5, Some(-RACINE3)),
    (315.0, -RACINE2_SUR_2, RACINE2_SUR_2, Some(-1.0)),
    (330.0, -0.5, RACINE3_SUR_2, Some(-RACINE3_SUR_3)),
];

/// Ramène un angle en degrés dans [0,360).
///
/// Un résultat à moins de `TOLERANCE_ANGLE` de 360 est ramené à 0.
pub fn normaliser_degres(x: f64) -> f64 {
    let a = ((x % 360.0) + 360.0) % 360.0;
    if (360.0 - a).abs() < TOLERANCE_ANGLE {
        0.0
    } else {
        a
    }
}

/// Reconnaît un angle notable (déjà normalisé).
///
/// Retour:
/// - Some(Valeur(v)) si reconnu
/// - Some(Indefini) pour tan(90°), tan(270°)
/// - None si l’angle n’est pas dans la table
fn trig_special(angle: f64, f: TrigFn) -> Option<TrigOutcome> {
    let (_, s, c, t) = TABLE
        .iter()
        .find(|(a, _, _, _)| (angle - a).abs() < TOLERANCE_ANGLE)?;

    let out = match f {
        TrigFn::Sin => TrigOutcome::Valeur(*s),
        TrigFn::Cos => TrigOutcome::Valeur(*c),
        TrigFn::Tan => match t {
            Some(v) => TrigOutcome::Valeur(*v),
            None => TrigOutcome::Indefini,
        },
    };
    Some(out)
}

/// sin/cos/tan en degrés : table d’abord, calcul radians sinon.
pub fn trig_degres(x: f64, f: TrigFn) -> TrigOutcome {
    let a = normaliser_degres(x);
    if let Some(o) = trig_special(a, f) {
        return o;
    }

    let r = a.to_radians();
    let v = match f {
        TrigFn::Sin => r.sin(),
        TrigFn::Cos => r.cos(),
        TrigFn::Tan => r.tan(),
    };
    TrigOutcome::Valeur(v)
}
