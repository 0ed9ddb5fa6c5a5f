//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : toute entrée donne un nombre fini OU une catégorie (jamais de panique)
//! - invariant cache : hit == miss

use std::time::{Duration, Instant};

use super::{formater, Evaluateur, TypeErreur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choix<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.pick(options.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}", rng.pick(1000)),
        3 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        4 => format!("{}", [30, 45, 60, 90, 180, 270, 360][rng.pick(7) as usize]),
        _ => format!("{}e{}", 1 + rng.pick(9), rng.pick(5)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        _ => gen_nombre(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let d = depth - 1;
    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, d), gen_expr(rng, d)),
        2 => format!("({}-{})", gen_expr(rng, d), gen_expr(rng, d)),
        3 => format!("({}*{})", gen_expr(rng, d), gen_expr(rng, d)),
        4 => format!("({}/{})", gen_expr(rng, d), gen_expr(rng, d)),
        5 => format!("-{}", gen_expr(rng, d)),
        6 => format!("pow({},{})", gen_expr(rng, d), gen_expr(rng, d)),
        7 => {
            let f = rng.choix(&["sin", "cos", "tan", "asin", "acos", "atan"]);
            format!("{f}({})", gen_expr(rng, d))
        }
        8 => {
            let f = rng.choix(&["log", "ln", "sqrt", "abs", "floor", "round"]);
            format!("{f}({})", gen_expr(rng, d))
        }
        _ => {
            let f = rng.choix(&["min", "max"]);
            format!("{f}({},{})", gen_expr(rng, d), gen_expr(rng, d))
        }
    }
}

/// Bruit : insère / retire des caractères au hasard (y compris interdits).
fn bruiter(rng: &mut Rng, s: &str) -> String {
    let alphabet = ['(', ')', ',', '.', '*', '-', ';', '[', ' ', 'x', '9', '^'];
    let mut chars: Vec<char> = s.chars().collect();
    for _ in 0..(1 + rng.pick(3)) {
        if chars.is_empty() || rng.coin() {
            let pos = rng.pick(chars.len() as u32 + 1) as usize;
            let c = alphabet[rng.pick(alphabet.len() as u32) as usize];
            chars.insert(pos, c);
        } else {
            let pos = rng.pick(chars.len() as u32) as usize;
            chars.remove(pos);
        }
    }
    chars.into_iter().collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_resultats_finis() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut ev = Evaluateur::default();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match ev.evaluer(&expr) {
            Ok(v) => {
                assert!(v.is_finite(), "expr={expr:?} -> {v}");
                assert!(!formater(v).is_empty());
                seen_ok += 1;
            }
            Err(t) => {
                // expressions bien formées : jamais de syntaxe / invalide-caractère / inconnu
                assert!(
                    matches!(
                        t,
                        TypeErreur::Domaine
                            | TypeErreur::Indefini
                            | TypeErreur::Depassement
                            | TypeErreur::Invalide
                    ),
                    "catégorie inattendue: expr={expr:?} t={t:?}"
                );
                seen_err += 1;
            }
        }

        // hit == miss
        assert_eq!(
            ev.evaluer(&expr),
            Evaluateur::default().evaluer(&expr),
            "expr={expr:?}"
        );
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
    assert!(ev.cache().len() <= 100);
}

#[test]
fn fuzz_safe_entrees_bruitees_toujours_classees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 3);
        let expr = bruiter(&mut rng, &base);

        // jamais de panique ; Ok => fini
        if let Ok(v) = Evaluateur::default().evaluer(&expr) {
            assert!(v.is_finite(), "expr={expr:?} -> {v}");
        }
    }
}

#[test]
fn fuzz_safe_trig_degres_periodique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0x5EED_u64);
    let mut ev = Evaluateur::default();

    for _ in 0..150 {
        budget(t0, max);

        let angle = rng.pick(720) as i64 - 360;
        let tours = rng.pick(5) as i64 - 2;
        let f = rng.choix(&["sin", "cos", "tan"]);

        let a = ev.evaluer(&format!("{f}({angle})"));
        let b = ev.evaluer(&format!("{f}({})", angle + 360 * tours));

        match (a, b) {
            (Ok(x), Ok(y)) => assert!(
                (x - y).abs() < 1e-9 * x.abs().max(1.0),
                "{f}({angle}) = {x} mais +{tours} tours = {y}"
            ),
            (Err(TypeErreur::Indefini), Err(TypeErreur::Indefini)) => {
                assert_eq!(f, "tan");
                assert_eq!(angle.rem_euclid(180), 90);
            }
            autre => panic!("{f}({angle}) incohérent: {autre:?}"),
        }
    }
}
