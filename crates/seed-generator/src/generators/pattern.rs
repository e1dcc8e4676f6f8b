//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` - record index within the model
//! - `{uuid}` - random UUID
//! - `{rand:N}` - random N-digit number

use rand::Rng;

use super::uuid::generate_uuid_v4;

/// Expand a pattern with placeholders.
pub fn generate_pattern<R: Rng>(pattern: &str, rng: &mut R, index: u64) -> String {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &generate_uuid_v4(rng).to_string(), 1);
    }

    // Expand {rand:N}; scanning resumes after each expansion so a malformed
    // placeholder is left in place
    let mut from = 0;
    while let Some(offset) = result[from..].find("{rand:") {
        let start = from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let end = start + len;

        match result[start + 6..end].parse::<usize>() {
            Ok(digits) => {
                let random_num = generate_random_digits(rng, digits);
                from = start + random_num.len();
                result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
            }
            Err(_) => from = end + 1,
        }
    }

    result
}

/// Random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // No leading zero
    result.push(char::from(b'0' + rng.random_range(1..10u8)));

    for _ in 1..digits {
        result.push(char::from(b'0' + rng.random_range(0..10u8)));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_pattern_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("user_{index}@example.com", &mut rng, 123);
        assert_eq!(value, "user_123@example.com");
    }

    #[test]
    fn test_generate_pattern_uuid() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("id-{uuid}", &mut rng, 0);
        assert!(value.starts_with("id-"));
        assert_eq!(value.len(), 3 + 36);
    }

    #[test]
    fn test_generate_pattern_random_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("code-{rand:6}", &mut rng, 0);
        assert_eq!(value.len(), 5 + 6);
        assert!(value[5..].chars().all(|c| c.is_ascii_digit()));
        assert_ne!(&value[5..6], "0");
    }

    #[test]
    fn test_generate_pattern_multiple_placeholders() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("u{index}-{rand:2}-{rand:3}", &mut rng, 7);
        assert!(value.starts_with("u7-"));
        assert_eq!(value.len(), 3 + 2 + 1 + 3);
    }

    #[test]
    fn test_malformed_placeholder_is_kept() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("{rand:x}-{rand:2}", &mut rng, 0);
        assert!(value.starts_with("{rand:x}-"));
        assert_eq!(value.len(), "{rand:x}-".len() + 2);
    }
}
