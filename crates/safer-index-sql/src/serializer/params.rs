use super::{Formatter, ToSql};

pub trait Params {
    fn push(&mut self, param: &str) -> Placeholder;
}

/// A positional bind parameter, `$1`-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<String> {
    fn push(&mut self, value: &str) -> Placeholder {
        self.push(value.to_string());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        // Writing to a `String` cannot fail
        let _ = write!(f.dst, "${}", self.0);
    }
}
