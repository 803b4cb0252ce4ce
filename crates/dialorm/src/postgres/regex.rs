use super::PostgresRegexMatching;
use crate::criterion::Criterion;
use crate::term::Term;
use crate::value::Value;

// The pattern goes through the field's own constant wrapping (the default
// literal renderer), unlike the MySQL regex builder.
fn wrap_constant(field: &Term, value: &Value) -> Term {
    match field {
        Term::Field(f) => f.wrap_constant(value.clone()),
        _ => Term::Value(value.clone()),
    }
}

/// `field ~ 'pattern'`
pub fn postgres_posix_regex(field: Term, value: &Value) -> Criterion {
    let term = wrap_constant(&field, value);
    Criterion::basic(PostgresRegexMatching::PosixRegex, field, term)
}

/// `field ~* 'pattern'`
pub fn postgres_insensitive_posix_regex(field: Term, value: &Value) -> Criterion {
    let term = wrap_constant(&field, value);
    Criterion::basic(PostgresRegexMatching::InsensitivePosixRegex, field, term)
}
