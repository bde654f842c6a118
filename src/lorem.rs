use sha2::{Digest, Sha256};

const SENTENCES: [&str; 6] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed non risus. Suspendisse lectus tortor, dignissim sit amet, adipiscing nec, ultricies sed, dolor.",
    "Cras elementum ultrices diam. Maecenas ligula massa, varius a, semper congue, euismod non, mi. Proin porttitor, orci nec nonummy molestie, enim est eleifend mi, non fermentum diam nisl sit amet erat.",
    "Duis semper. Duis arcu massa, scelerisque vitae, consequat in, pretium a, enim. Pellentesque congue.",
    "Ut in risus volutpat libero pharetra tempor. Cras vestibulum bibendum augue. Praesent egestas leo in pede. Praesent blandit odio eu enim.",
    "Pellentesque sed dui ut augue blandit sodales. Vestibulum ante ipsum primis in faucibus orci luctus et ultrices posuere cubilia Curae; Aliquam nibh.",
    "Mauris ac mauris sed pede pellentesque fermentum. Maecenas adipiscing ante non diam sodales hendrerit.",
];

const MIN_CHARS: usize = 140;
const MAX_CHARS: usize = 1400;

/// Digest read as a big-endian integer, reduced modulo `m`.
fn digest_mod(text: &str, m: usize) -> usize {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().fold(0usize, |acc, b| (acc * 256 + *b as usize) % m)
}

pub fn desired_len(text: &str) -> usize {
    (text.chars().count() * 2).max(220).clamp(MIN_CHARS, MAX_CHARS)
}

/// Deterministic placeholder "translation" whose length follows the input's.
pub fn from_text(text: &str) -> String {
    let start = digest_mod(text, SENTENCES.len());
    let desired = desired_len(text);

    let mut out = String::new();
    let mut i = 0;
    while out.len() < desired {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(SENTENCES[(start + i) % SENTENCES.len()]);
        i += 1;
    }
    // sentences are ASCII, byte and char lengths agree
    out.truncate(desired);
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(from_text("Hello"), from_text("Hello"));
    }

    #[test]
    fn test_short_input_gets_floor_length() {
        let out = from_text("Hi");
        assert!(out.len() <= 220);
        assert!(out.len() >= 215);
    }

    #[test]
    fn test_length_tracks_input_and_caps() {
        let mid = "x".repeat(300);
        assert_eq!(desired_len(&mid), 600);
        assert!(from_text(&mid).len() <= 600);

        let long = "y".repeat(5000);
        assert_eq!(desired_len(&long), MAX_CHARS);
        assert!(from_text(&long).len() <= MAX_CHARS);
    }

    #[test]
    fn test_starts_on_a_known_sentence() {
        let out = from_text("Bonjour tout le monde");
        assert!(SENTENCES.iter().any(|s| out.starts_with(&s[..40])));
    }

    #[test]
    fn test_digest_mod_in_range() {
        for word in ["a", "b", "c", "d", "e", "f", "g", "h"] {
            assert!(digest_mod(word, 6) < 6);
        }
    }
}
