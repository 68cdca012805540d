use super::{Formatter, Params, ToSql};

/// A single-quoted string literal. Embedded quotes are doubled.
///
/// Only used where PostgreSQL does not accept a bind parameter, such as the
/// value of `SET`.
pub(super) struct Literal<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Literal<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let value = self.0.as_ref();

        f.dst.push('\'');
        for c in value.chars() {
            if c == '\'' {
                f.dst.push('\'');
            }
            f.dst.push(c);
        }
        f.dst.push('\'');
    }
}
