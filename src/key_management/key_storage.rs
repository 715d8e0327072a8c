use std::fs;
use std::path::Path;
use std::io;
use crate::rsa_recovery::r_pipeline::RecoveryReport;
use crate::rsa_recovery::r_totient::totient_from_factors;

// ============================================================================
// Protection DoS parsing — limite de taille des entrées
//
// Un rapport de récupération fait quelques centaines d'octets ; tout fichier
// au-delà de cette limite est refusé avant lecture en mémoire.
// ============================================================================

/// Taille maximale d'un fichier de rapport JSON en octets (32 Ko)
const MAX_REPORT_FILE_BYTES: u64 = 32_768;

// ============================================================================
// Vérification de cohérence d'un rapport chargé
//
// Un fichier corrompu ou falsifié ne doit pas produire une clé fausse :
//   p·q == n, (p-1)(q-1) == φ, e·d ≡ 1 (mod φ), n identique des deux côtés.
// ============================================================================
fn check_report_coherence(report: &RecoveryReport) -> Result<(), String> {
    let n = report.public_key.n;
    if report.factors.product() != Some(n) {
        return Err(format!("p·q != n ({n})"));
    }
    if report.private_key.n != n {
        return Err("module de la clé privée différent de celui de la clé publique".to_string());
    }
    if report.phi == 0 || totient_from_factors(&report.factors) != report.phi {
        return Err("φ(n) incohérent avec p et q".to_string());
    }
    let phi = u128::from(report.phi);
    if u128::from(report.public_key.e) * u128::from(report.private_key.d) % phi != 1 % phi {
        return Err("e·d != 1 mod φ(n)".to_string());
    }
    Ok(())
}

// ============================================================================
// Vérification de taille de fichier (DoS protection)
//
// Appelée avant fs::read_to_string. La métadonnée est lue sans ouvrir le
// contenu.
// ============================================================================

fn check_file_size(filepath: &str) -> io::Result<()> {
    let meta = fs::metadata(filepath)?;
    if meta.len() > MAX_REPORT_FILE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Fichier de rapport trop grand : {} octets (maximum autorisé : {} octets).",
                meta.len(),
                MAX_REPORT_FILE_BYTES
            ),
        ));
    }
    Ok(())
}

// ============================================================================
// Sauvegarde / chargement JSON
// ============================================================================

pub fn save_report_json(report: &RecoveryReport, filepath: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(filepath, json)?;
    Ok(())
}

pub fn load_report_json(filepath: &str) -> io::Result<RecoveryReport> {
    check_file_size(filepath)?;
    let raw = fs::read_to_string(filepath)?;
    let report: RecoveryReport = serde_json::from_str(&raw)?;
    check_report_coherence(&report)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(report)
}

// ============================================================================
// Utilitaires
// ============================================================================

pub fn key_file_exists(filepath: &str) -> bool {
    Path::new(filepath).exists()
}

pub fn ensure_keys_directory(dir_path: &str) -> io::Result<()> {
    if !Path::new(dir_path).exists() {
        fs::create_dir_all(dir_path)?;
    }
    Ok(())
}
