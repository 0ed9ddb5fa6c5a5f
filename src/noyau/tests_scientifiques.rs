//! Tests scientifiques (campagne) : valeurs attendues + invariants + limites.
//!
//! - Valeurs : tolérance relative 1e-9
//! - Catégories d’échec : une seule, toujours la même pour une entrée donnée
//! - Cache : hit == miss, borne 100, éviction FIFO
//! - Affichage : les trois formes (entier groupé, exponentiel, 12 chiffres)

use std::time::{Duration, Instant};

use super::{evaluer, formater, Evaluateur, TypeErreur};

fn eval_ok(expr: &str) -> f64 {
    Evaluateur::default()
        .evaluer(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    let tol = 1e-9 * attendu.abs().max(1.0);
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} : {v} au lieu de {attendu}"
    );
}

fn assert_echec(expr: &str, attendu: TypeErreur) {
    let r = Evaluateur::default().evaluer(expr);
    assert_eq!(r, Err(attendu), "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sci_arithmetique_precedence() {
    assert_proche("2+2", 4.0);
    assert_proche("1+2*3-4/2", 5.0);
    assert_proche("(1+2)*(3-4)/2", -1.5);
    assert_proche("-(2+3)*-2", 10.0);
    assert_proche("1.5e3/3", 500.0);
    assert_proche(".5+.25", 0.75);
    assert_proche("((((7))))", 7.0);
}

#[test]
fn sci_constantes() {
    assert_proche("pi", std::f64::consts::PI);
    assert_proche("2*e", 2.0 * std::f64::consts::E);
    assert_proche("PI/2", std::f64::consts::FRAC_PI_2);
}

/* ------------------------ Trig en degrés ------------------------ */

#[test]
fn sci_trig_angles_notables_exacts() {
    assert_eq!(eval_ok("cos(90)"), 0.0);
    assert_eq!(eval_ok("cos(270)"), 0.0);
    assert_eq!(eval_ok("cos(60)"), 0.5);
    assert_eq!(eval_ok("cos(120)"), -0.5);
    assert_eq!(eval_ok("cos(360)"), 1.0);
    assert_eq!(eval_ok("sin(180)"), 0.0);
    assert_eq!(eval_ok("tan(45)"), 1.0);
    assert_eq!(eval_ok("tan(135)"), -1.0);
    assert_eq!(eval_ok("tan(180)"), 0.0);
}

#[test]
fn sci_trig_periodicite_et_negatifs() {
    assert_eq!(eval_ok("cos(-60)"), eval_ok("cos(300)"));
    assert_eq!(eval_ok("sin(390)"), eval_ok("sin(30)"));
    assert_proche("sin(-30)", -0.5);
    assert_proche("tan(-60)", -3f64.sqrt());
    assert_proche("sin(10)", 10f64.to_radians().sin());
    assert_proche("cos(1000)", 280f64.to_radians().cos());
}

#[test]
fn sci_trig_indefinis() {
    assert_echec("tan(90)", TypeErreur::Indefini);
    assert_echec("tan(270)", TypeErreur::Indefini);
    assert_echec("tan(-90)", TypeErreur::Indefini);
    assert_echec("tan(450)", TypeErreur::Indefini);
    assert_echec("1+tan(90)", TypeErreur::Indefini);
}

#[test]
fn sci_trig_inverses_en_degres() {
    assert_proche("asin(1)", 90.0);
    assert_proche("acos(-1)", 180.0);
    assert_proche("atan(1)", 45.0);
    assert_proche("asin(sin(30))", 30.0);
    assert_echec("asin(2)", TypeErreur::Domaine);
    assert_echec("acos(-1.5)", TypeErreur::Domaine);
}

/* ------------------------ Logarithmes, racine, puissance ------------------------ */

#[test]
fn sci_log_ln_sqrt_pow() {
    assert_proche("log(1000)", 3.0);
    assert_proche("ln(e)", 1.0);
    assert_proche("sqrt(2)*sqrt(2)", 2.0);
    assert_proche("pow(2,10)", 1024.0);
    assert_proche("pow(4,0.5)", 2.0);
    assert_proche("pow(2,-1)", 0.5);

    assert_echec("log(0)", TypeErreur::Domaine);
    assert_echec("ln(-1)", TypeErreur::Domaine);
    assert_echec("sqrt(-1)", TypeErreur::Domaine);
    assert_echec("pow(10,400)", TypeErreur::Depassement);
    assert_echec("pow(0,-1)", TypeErreur::Depassement);
}

#[test]
fn sci_primitives_non_gardees() {
    assert_proche("abs(-3)+floor(2.7)+ceil(0.2)", 6.0);
    assert_proche("round(2.5)+trunc(-1.9)", 2.0);
    assert_proche("max(1,5,3)-min(4,2)", 3.0);
    assert_proche("cbrt(27)", 3.0);
    assert_proche("exp(0)", 1.0);
}

/* ------------------------ Catégories d’échec ------------------------ */

#[test]
fn sci_parentheses_toujours_syntaxe() {
    for s in ["(1+2", "1+2)", "((1)", "sin(30", "(((", ")"] {
        assert_echec(s, TypeErreur::Syntaxe);
    }
}

#[test]
fn sci_caracteres_interdits_toujours_invalide() {
    for s in ["1;2", "2^3", "a=1", "1%2", "π", "1+2;", "\"1\"", "{1}", "x"] {
        assert_echec(s, TypeErreur::Invalide);
    }
}

#[test]
fn sci_noms_hors_registre_invalide() {
    for s in ["alert(1)", "foo", "x+1", "sin", "pow(2)", "constructor"] {
        assert_echec(s, TypeErreur::Invalide);
    }
}

#[test]
fn sci_non_fini_invalide() {
    assert_echec("10/0", TypeErreur::Invalide);
    assert_echec("0/0", TypeErreur::Invalide);
    assert_echec("exp(1000)", TypeErreur::Invalide);
    assert_echec("1e308*10", TypeErreur::Invalide);
}

#[test]
fn sci_nan_intermediaire_invalide() {
    // un NaN traverse min/max et les gardes de domaine jusqu’à la validation finale
    assert_echec("max(0/0,1)", TypeErreur::Invalide);
    assert_echec("min(1,0/0)", TypeErreur::Invalide);
    assert_echec("sqrt(0/0)", TypeErreur::Invalide);
    assert_echec("log(0/0)", TypeErreur::Invalide);
    assert_echec("ln(0/0)", TypeErreur::Invalide);
    assert_echec("asin(0/0)", TypeErreur::Invalide);
    assert_proche("max(2,1)", 2.0);
}

#[test]
fn sci_grammaire_inconnu() {
    for s in ["2*", "*2", "1.2.3", "2pi", "[1]", ")(", "()"] {
        assert_echec(s, TypeErreur::Inconnu);
    }
}

#[test]
fn sci_infini_intermediaire_absorbe() {
    // 1/(1/0) = 1/∞ = 0 : seul le résultat final compte
    assert_proche("1/(1/0)", 0.0);
}

/* ------------------------ Cache ------------------------ */

#[test]
fn sci_idempotence_hit_egal_miss() {
    let exprs = ["2+2", "sin(30)*3", "log(2)", "sqrt(2)/3", "tan(90)", "1;"];
    let mut ev = Evaluateur::default();
    for s in exprs {
        let premier = ev.evaluer(s);
        let second = ev.evaluer(s);
        let neuf = Evaluateur::default().evaluer(s);
        assert_eq!(premier, second, "expr={s:?}");
        assert_eq!(premier, neuf, "expr={s:?}");
    }
}

#[test]
fn sci_cache_borne_101_expressions() {
    let mut ev = Evaluateur::default();
    for i in 1..=101 {
        let s = format!("{i}*2");
        assert_eq!(ev.evaluer(&s), Ok(2.0 * i as f64));
    }
    assert_eq!(ev.cache().len(), 100);
    assert!(!ev.cache().contient("1*2"));
    assert!(ev.cache().contient("2*2"));
    assert!(ev.cache().contient("101*2"));
}

#[test]
fn sci_api_partagee_deterministe() {
    assert_eq!(evaluer("3*(4+5)"), Ok(27.0));
    assert_eq!(evaluer("3*(4+5)"), Ok(27.0));
    assert_eq!(evaluer("sqrt(-4)"), Err(TypeErreur::Domaine));
}

/* ------------------------ Affichage ------------------------ */

#[test]
fn sci_affichage_trois_formes() {
    assert_eq!(formater(1_000_000.0), "1,000,000");
    assert_eq!(formater(0.000_000_000_01), "1.0000e-11");
    assert_eq!(formater(123.456_789_012_345), "123.456789012");
}

#[test]
fn sci_chaine_complete() {
    let v = eval_ok("1/3");
    assert_eq!(formater(v), "0.333333333333");

    let v = eval_ok("pow(10,12)");
    assert_eq!(formater(v), "1.0000e+12");

    let v = eval_ok("1000*1000");
    assert_eq!(formater(v), "1,000,000");

    let v = eval_ok("0.1+0.2");
    assert_eq!(formater(v), "0.3");
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["1"; 5000].join("+");
    assert_proche(&expr, 5000.0);

    let expr = vec!["2*3"; 3000].join("-");
    assert_proche(&expr, 6.0 - 6.0 * 2999.0);
    budget(t0, max);
}

#[test]
fn sci_stress_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // pas de débordement de pile, quelle que soit l’imbrication
    let expr = format!("{}1{}", "abs(".repeat(5000), ")".repeat(5000));
    assert_proche(&expr, 1.0);

    let expr = format!("{}-7{}", "(".repeat(5000), ")".repeat(5000));
    assert_proche(&expr, -7.0);

    budget(t0, max);
}
