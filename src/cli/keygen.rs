use crate::key::{format_iv, generate_iv, Iv, Key};
use rand::RngCore;

/// Draw a fresh key and IV from the supplied RNG
pub fn generate_material<R: RngCore + ?Sized>(rng: &mut R) -> (Key, Iv) {
    let key = Key::generate(rng);
    let iv = generate_iv(rng);
    (key, iv)
}

/// Render key material the way `obf keygen` prints it
pub fn format_material(key: &Key, iv: Iv) -> String {
    format!("Key = {}\nIV  = {}\n", key, format_iv(iv))
}
