use super::{Comma, Literal, Params, ToSql};

use crate::stmt::{self, Direction, IndexColumn, SettingValue};

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Statement::CreateIndex(stmt) => stmt.to_sql(f),
            stmt::Statement::DropIndex(stmt) => stmt.to_sql(f),
            stmt::Statement::FindInvalidIndex(stmt) => stmt.to_sql(f),
            stmt::Statement::SetSetting(stmt) => stmt.to_sql(f),
            stmt::Statement::ShowSetting(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let unique = if self.unique { "UNIQUE " } else { "" };
        let concurrently = if self.concurrently { "CONCURRENTLY " } else { "" };
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let name = &self.name;
        let table = &self.on;
        let columns = Comma(&self.columns);

        fmt!(
            f, "CREATE " unique "INDEX " concurrently if_not_exists name " ON " table " (" columns ")"
        );

        if !self.include.is_empty() {
            let include = Comma(&self.include);
            fmt!(f, " INCLUDE (" include ")");
        }

        if let Some(predicate) = &self.predicate {
            fmt!(f, " WHERE " predicate);
        }
    }
}

impl ToSql for &IndexColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            IndexColumn::Column { name, direction } => {
                let direction = direction.map(|direction| match direction {
                    Direction::Asc => " ASC",
                    Direction::Desc => " DESC",
                });
                fmt!(f, name direction);
            }
            IndexColumn::Expr(expr) => fmt!(f, "(" expr ")"),
        }
    }
}

impl ToSql for &stmt::DropIndex {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let concurrently = if self.concurrently { "CONCURRENTLY " } else { "" };
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let name = &self.name;
        fmt!(f, "DROP INDEX " concurrently if_exists name);
    }
}

impl ToSql for &stmt::FindInvalidIndex {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = f.params.push(&self.name);
        fmt!(
            f, "SELECT relname FROM pg_class, pg_index WHERE ("
            "pg_index.indisvalid = false AND pg_index.indexrelid = pg_class.oid AND relname = " name ")"
        );
    }
}

impl ToSql for &stmt::ShowSetting {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = &self.name;
        fmt!(f, "SHOW " name);
    }
}

impl ToSql for &stmt::SetSetting {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = &self.name;
        fmt!(f, "SET " name " = ");
        match &self.value {
            SettingValue::Integer(value) => {
                let value = value.to_string();
                value.as_str().to_sql(f);
            }
            SettingValue::Literal(value) => fmt!(f, Literal(value)),
        }
    }
}
