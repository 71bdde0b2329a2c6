use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const ENQUIRY_PREFIX: &str = "ENQ";
pub const QUOTATION_PREFIX: &str = "QT";

/// Upper bound on insert attempts when a generated ticket collides with an
/// existing row. The suffix space is small enough that collisions are
/// possible, so the recorder regenerates instead of surfacing the conflict.
pub const TICKET_INSERT_ATTEMPTS: usize = 3;

const SUFFIX_LEN: usize = 5;
const DATE_LEN: usize = 8;

/// Builds a ticket number of the form `<PREFIX>-<YYYYMMDD>-<XXXXX>` where the
/// suffix is the first five hex characters of a v4 UUID, uppercased.
pub fn generate(prefix: &str, now: DateTime<Utc>) -> String {
    let date = now.format("%Y%m%d");
    let hex = Uuid::new_v4().simple().to_string();
    let suffix = hex[..SUFFIX_LEN].to_uppercase();
    format!("{prefix}-{date}-{suffix}")
}

/// Checks whether a candidate string is shaped like a ticket number. Used by
/// the admin search endpoint to reject junk before hitting the database.
pub fn is_well_formed(candidate: &str) -> bool {
    let mut parts = candidate.splitn(3, '-');
    let (Some(prefix), Some(date), Some(suffix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    if prefix != ENQUIRY_PREFIX && prefix != QUOTATION_PREFIX {
        return false;
    }
    if date.len() != DATE_LEN || !date.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn generate_uses_prefix_and_date() {
        let ticket = generate(QUOTATION_PREFIX, fixed_now());
        assert!(ticket.starts_with("QT-20250314-"));
        assert_eq!(ticket.len(), "QT-20250314-".len() + SUFFIX_LEN);
    }

    #[test]
    fn generate_suffix_is_uppercase_hex() {
        let ticket = generate(ENQUIRY_PREFIX, fixed_now());
        let suffix = ticket.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
        );
    }

    #[test]
    fn generated_tickets_vary() {
        let a = generate(QUOTATION_PREFIX, fixed_now());
        let b = generate(QUOTATION_PREFIX, fixed_now());
        assert_ne!(a, b);
    }

    #[test]
    fn well_formed_accepts_generated_tickets() {
        assert!(is_well_formed(&generate(ENQUIRY_PREFIX, fixed_now())));
        assert!(is_well_formed(&generate(QUOTATION_PREFIX, fixed_now())));
        assert!(is_well_formed("QT-20250314-0A9FF"));
    }

    #[test]
    fn well_formed_rejects_bad_shapes() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("QT-20250314"));
        assert!(!is_well_formed("FOO-20250314-0A9FF"));
        assert!(!is_well_formed("QT-2025031X-0A9FF"));
        assert!(!is_well_formed("QT-20250314-0a9ff"));
        assert!(!is_well_formed("QT-20250314-0A9FFF"));
        assert!(!is_well_formed("QT-20250314-ZZZZZ"));
    }
}
