// =========================================================
// Récupération de clé privée RSA à partir de (e, n)
// φ(n) par balayage → p, q par formule quadratique → d par Euclide étendu
// =========================================================

// ── Pipeline ──────────────────────────────────────────────
use rsa_recovery::{recover_with_report, RecoveryConfig, RecoveryReport, SqrtStrategy};

// ── Entrées et stockage ───────────────────────────────────
use rsa_recovery::key_management::{
    ensure_keys_directory, key_file_exists, save_report_json,
    FixedKey, KeySource, SampleKeys,
};

// ── Types et erreurs ──────────────────────────────────────
use rsa_recovery::{parse_positive, KeyRecoveryError, PublicKey};
use rsa_recovery::math::gcd;

// ── Stdlib & crates externes ──────────────────────────────
use rand::Rng;
use rand_core::OsRng;
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ── Chemins et variables d'environnement ──────────────────
const KEYS_DIR:           &str = "keys";
const REPORT_JSON_PATH:   &str = "keys/recovered_key.json";
const ENV_SQRT_STRATEGY:  &str = "RSA_RECOVERY_SQRT";
const ENV_PARALLEL:       &str = "RSA_RECOVERY_PARALLEL";

// ─────────────────────────────────────────────────────────
// Erreur applicative centrale
//
// Unifie KeyRecoveryError et io::Error pour propager via ?
// ─────────────────────────────────────────────────────────

#[derive(Debug)]
enum AppError {
    Recovery(KeyRecoveryError),
    Io(std::io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Recovery(e) => write!(f, "{}", e),
            AppError::Io(e)       => write!(f, "Erreur I/O : {}", e),
        }
    }
}

impl From<KeyRecoveryError> for AppError {
    fn from(e: KeyRecoveryError) -> Self { AppError::Recovery(e) }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self { AppError::Io(e) }
}

// ─────────────────────────────────────────────────────────
// Point d'entrée
// ─────────────────────────────────────────────────────────

fn main() {
    // Journal sur stderr pour ne pas mêler les traces au rapport (RUST_LOG)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("\n[ERREUR] {}\n", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = lire_configuration()?;
    tracing::debug!(?config, "configuration chargée");

    let key = lire_cle_publique()?;
    println!("\nClé publique de chiffrement : ({}, {})\n", key.e, key.n);
    println!("Calcul de ϕn à partir de n, p et q, puis de d...");

    let report = recover_with_report(key, &config)?;
    afficher_rapport(&report);
    verifier_aller_retour(&report)?;

    ensure_keys_directory(KEYS_DIR)?;
    if key_file_exists(REPORT_JSON_PATH) {
        println!("\n  Rapport existant détecté — remplacement...");
    }
    save_report_json(&report, REPORT_JSON_PATH)?;
    println!("\n  Rapport sauvegardé dans {}", REPORT_JSON_PATH);

    afficher_resume(&report);
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Configuration : variables d'environnement → RecoveryConfig
// ─────────────────────────────────────────────────────────

fn lire_configuration() -> Result<RecoveryConfig, AppError> {
    let sqrt = match std::env::var(ENV_SQRT_STRATEGY) {
        Ok(v)  => v.parse::<SqrtStrategy>()?,
        Err(_) => SqrtStrategy::default(),
    };
    let parallel = std::env::var(ENV_PARALLEL)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);
    Ok(RecoveryConfig { sqrt, parallel })
}

// ─────────────────────────────────────────────────────────
// Saisie : n puis e, Entrée vide → clé d'exemple
// ─────────────────────────────────────────────────────────

fn lire_ligne() -> Result<String, AppError> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn cle_exemple() -> Result<PublicKey, AppError> {
    let mut source = SampleKeys::new(OsRng);
    Ok(source.public_key()?)
}

fn lire_cle_publique() -> Result<PublicKey, AppError> {
    println!("Entrez un module (n). Il doit être semi-premier !");
    println!("Un semi-premier est le produit de deux nombres premiers : ses seuls diviseurs sont 1, lui-même et deux premiers.");
    print!("[Entrée pour des valeurs d'exemple] : ");
    io::stdout().flush()?;

    let saisie_n = lire_ligne()?;
    if saisie_n.is_empty() {
        return cle_exemple();
    }
    let n = parse_positive(&saisie_n, "n")?;

    println!("\nEntrez l'exposant de chiffrement (e).");
    println!("Choisir un nombre premier pour e garantit presque toujours un inverse multiplicatif (d).");
    print!("[Entrée pour des valeurs d'exemple] : ");
    io::stdout().flush()?;

    let saisie_e = lire_ligne()?;
    if saisie_e.is_empty() {
        return cle_exemple();
    }
    let e = parse_positive(&saisie_e, "e")?;

    Ok(FixedKey { e, n }.public_key()?)
}

// ─────────────────────────────────────────────────────────
// Affichage
// ─────────────────────────────────────────────────────────

fn afficher_duree(d: Duration) {
    println!("  Temps écoulé = {} nanosecondes ({} secondes)", d.as_nanos(), d.as_secs_f64());
}

fn afficher_rapport(r: &RecoveryReport) {
    let e   = r.public_key.e;
    let n   = r.public_key.n;
    let phi = r.phi;

    println!("\n--- ϕn À PARTIR DE n ---");
    afficher_duree(r.timings.totient);
    println!("  n  = {}", n);
    println!("  ϕn = {}", phi);

    println!("\n--- p ET q PAR FORMULE QUADRATIQUE ---");
    afficher_duree(r.timings.factors);
    println!("  p = {}", r.factors.p);
    println!("  q = {}", r.factors.q);

    println!("\n--- PGCD PAR ALGORITHME D'EUCLIDE ÉTENDU ({}, {}) ---", phi, e);
    afficher_duree(r.timings.inverse);
    println!("  GCD({}, {}) = {}", e, phi, r.bezout.gcd);
    println!("  {}({}) + {}({}) = {}", r.bezout.a, e, r.bezout.b, phi, r.bezout.gcd);

    println!("\n--- CLÉS ---");
    println!("  e = {}", e);
    println!("  d = {} % {} = {}", r.bezout.a, phi, r.private_key.d);
    println!("  Clé publique de chiffrement   : ({}, {})", e, n);
    println!("  Clé privée de déchiffrement   : ({}, {})", r.private_key.d, n);
}

// Chiffre puis déchiffre un message aléatoire premier avec n
fn verifier_aller_retour(r: &RecoveryReport) -> Result<(), AppError> {
    let n = r.public_key.n;
    let mut rng = OsRng;
    let m = loop {
        let candidate = rng.gen_range(2..n);
        if gcd(candidate, n) == 1 {
            break candidate;
        }
    };

    // Un échec interrompt le programme avant toute sauvegarde
    r.check_round_trip(m)?;
    println!("\n  Aller-retour vérifié : (m^e)^d mod n = m pour m = {}", m);
    Ok(())
}

fn afficher_resume(r: &RecoveryReport) {
    println!("\n==============================================");
    println!("    RÉSUMÉ DES TEMPS");
    println!("==============================================");
    println!("  Indicatrice ϕn        : {:.3?}", r.timings.totient);
    println!("  Facteurs p, q         : {:.3?}", r.timings.factors);
    println!("  Inverse modulaire d   : {:.3?}", r.timings.inverse);
    println!("  Total                 : {:.3?}", r.timings.total());
    println!("==============================================");
}
