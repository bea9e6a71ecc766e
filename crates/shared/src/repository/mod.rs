mod medicine;
mod memory;
mod order;
mod prescription;
mod user;

pub use self::medicine::MedicineRepository;
pub use self::memory::MemoryStore;
pub use self::order::OrderRepository;
pub use self::prescription::PrescriptionRepository;
pub use self::user::UserRepository;

/// Escapes `LIKE` wildcards so user input is matched literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("aspirin"), "aspirin");
        assert_eq!(escape_like("100%_pure\\"), "100\\%\\_pure\\\\");
    }
}
