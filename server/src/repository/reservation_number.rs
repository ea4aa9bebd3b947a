// server/src/repository/reservation_number.rs

use chrono::Utc;
use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `RES-{base36 millis}-{4 random [A-Z0-9]}`, e.g. `RES-LZ3K9QX1-7QX2`.
///
/// Not unique on its own: callers insert it under a unique constraint and
/// draw again on conflict.
pub fn generate_reservation_number() -> String {
  let millis = Utc::now().timestamp_millis().max(0) as u64;
  let mut rng = rand::thread_rng();
  let suffix: String = (0..4).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char).collect();
  format!("RES-{}-{}", to_base36(millis), suffix)
}

fn to_base36(mut value: u64) -> String {
  if value == 0 {
    return "0".to_string();
  }
  let mut digits = Vec::new();
  while value > 0 {
    digits.push(ALPHABET[(value % 36) as usize]);
    value /= 36;
  }
  digits.reverse();
  String::from_utf8_lossy(&digits).into_owned()
}
