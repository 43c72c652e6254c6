//! Human-shareable reference IDs: `APP-` followed by nine uppercase
//! alphanumerics, e.g. `APP-K7Q2M9XZ4`.

use rand::Rng;

pub const PREFIX: &str = "APP-";
pub const SUFFIX_LEN: usize = 9;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a fresh reference ID.
///
/// 36^9 possible suffixes; collisions are negligible at admission-cycle volumes,
/// and [`crate::submission`] re-draws on the rare clash with a stored record.
pub fn generate() -> String {
    generate_with(&mut rand::thread_rng())
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(PREFIX.len() + SUFFIX_LEN);
    id.push_str(PREFIX);
    for _ in 0..SUFFIX_LEN {
        let idx = rng.gen_range(0..ALPHABET.len());
        id.push(ALPHABET[idx] as char);
    }
    id
}

/// Whether `s` has the shape of a generated reference ID (case-insensitive).
pub fn is_reference_id(s: &str) -> bool {
    let upper = s.trim().to_ascii_uppercase();
    match upper.strip_prefix(PREFIX) {
        Some(suffix) => {
            !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        None => false,
    }
}
