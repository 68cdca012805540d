//! The statement sequence shared by both directives.
//!
//! Building and dropping differ only in the DDL issued between disabling and
//! restoring `lock_timeout`:
//!
//! ```text
//! SHOW lock_timeout;
//! SET lock_timeout = 0;
//! -- build: look for an invalid leftover, drop it, then create
//! -- drop:  drop
//! SET lock_timeout = '<original>';
//! ```

use crate::{editor::SchemaEditor, router::Hints, LockTimeoutSnapshot, Result};

use safer_index_core::{
    driver::{Connection, Response},
    schema::{Index, ModelState},
    stmt::{CreateIndex, IndexColumn, Name, Statement},
    Error,
};
use safer_index_sql::Serializer;

/// What a directive asks of the table.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Change<'a> {
    /// Create the index, first dropping an invalid leftover of the same name
    Build(&'a Index),

    /// Drop the index if it exists, valid or not
    Drop(&'a str),
}

impl Change<'_> {
    fn index_name(&self) -> &str {
        match self {
            Change::Build(index) => index.name(),
            Change::Drop(name) => *name,
        }
    }
}

/// The DDL planned for a [`Change`] once the model's columns are known.
#[derive(Debug)]
enum Ddl {
    Build(CreateIndex),
    Drop(Name),
}

impl Ddl {
    fn plan(model: &ModelState, change: Change<'_>) -> Result<Self> {
        Ok(match change {
            Change::Build(index) => Ddl::Build(create_index(model, index)?),
            Change::Drop(name) => Ddl::Drop(name.into()),
        })
    }
}

/// Plans the build of `index` on the table of `model`, mapping fields to
/// their columns.
pub(crate) fn create_index(model: &ModelState, index: &Index) -> Result<CreateIndex> {
    let mut stmt = CreateIndex::concurrently(index.name(), model.table_name());
    stmt.unique = index.is_unique();

    for field in index.field_orders() {
        stmt.columns.push(IndexColumn::Column {
            name: column(model, field.name)?.into(),
            direction: field.direction,
        });
    }

    stmt.columns.extend(
        index
            .expressions()
            .iter()
            .map(|expr| IndexColumn::Expr(expr.clone())),
    );

    for field in index.include() {
        stmt.include.push(column(model, field)?.into());
    }

    stmt.predicate = index.condition().map(str::to_string);

    Ok(stmt)
}

fn column<'a>(model: &'a ModelState, field: &str) -> Result<&'a str> {
    model.column(field).ok_or_else(|| {
        Error::state_conflict(format!(
            "field `{field}` does not exist on model `{}.{}`",
            model.app_label,
            model.name_lower()
        ))
    })
}

/// Runs `change` against the table of `model`.
///
/// Returns without issuing any SQL when the routers deny the database or the
/// model is not managed. Fields are resolved to columns only after both
/// checks pass.
pub(crate) async fn run(
    editor: &mut SchemaEditor<'_>,
    directive: &'static str,
    app_label: &str,
    model: &ModelState,
    change: Change<'_>,
) -> Result<()> {
    let table = model.table_name();
    let index = change.index_name();

    let hints = Hints {
        model_name: &model.name,
        table: &table,
        index,
        directive,
    };

    if !editor.allow_migrate(app_label, &hints) {
        tracing::info!(
            directive,
            index,
            table = %table,
            db = %editor.database(),
            "router denied migration; skipping"
        );
        return Ok(());
    }

    if !model.managed {
        tracing::info!(
            directive,
            index,
            table = %table,
            "model is not managed; skipping"
        );
        return Ok(());
    }

    let ddl = Ddl::plan(model, change)?;

    tracing::info!(
        directive,
        index,
        table = %table,
        db = %editor.database(),
        "running concurrently"
    );

    let conn = editor.connection();
    let snapshot = LockTimeoutSnapshot::capture(conn).await?;
    let outcome = apply(conn, &snapshot, &ddl).await;
    snapshot.restore_after(conn, outcome).await?;

    tracing::info!(directive, index, table = %table, "finished");
    Ok(())
}

async fn apply(
    conn: &mut dyn Connection,
    snapshot: &LockTimeoutSnapshot,
    ddl: &Ddl,
) -> Result<()> {
    snapshot.disable(conn).await?;

    match ddl {
        Ddl::Build(stmt) => {
            let name = stmt.name.as_str();
            let leftovers = execute(conn, Statement::find_invalid_index(name))
                .await?
                .rows
                .into_values()?;

            // The lookup matches on name alone, as does the unqualified DROP
            // below; several rows still mean one DROP on the search path.
            if !leftovers.is_empty() {
                tracing::warn!(
                    index = name,
                    "found an invalid index left by an earlier build; dropping it"
                );
                execute(conn, Statement::drop_index_concurrently(name)).await?;
            }

            execute(conn, Statement::create_index(stmt.clone())).await?;
        }
        Ddl::Drop(name) => {
            execute(conn, Statement::drop_index_concurrently(name.clone())).await?;
        }
    }

    Ok(())
}

/// Executes one statement, logging its SQL text.
pub(crate) async fn execute(conn: &mut dyn Connection, stmt: Statement) -> Result<Response> {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut params = Vec::<String>::new();
        let sql = Serializer::postgresql().serialize(&stmt, &mut params);
        tracing::debug!(db = %conn.database(), sql = %sql, params = ?params, "exec");
    }

    conn.exec(stmt.into()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use safer_index_core::stmt::Direction;

    fn model() -> ModelState {
        ModelState::new("shop", "Order")
            .field("customer")
            .field_with_column("placed_at", "placed_at_ts")
            .field("total")
    }

    #[test]
    fn build_maps_fields_to_columns() {
        let index = Index::builder("order_recent_idx")
            .fields(["customer", "-placed_at"])
            .include(["total"])
            .condition(r#""total" > 0"#)
            .unique()
            .build()
            .unwrap();

        let stmt = create_index(&model(), &index).unwrap();

        assert_eq!(stmt.on, Name::from("shop_order"));
        assert!(stmt.unique);
        assert_eq!(
            stmt.columns,
            [
                IndexColumn::column("customer"),
                IndexColumn::Column {
                    name: Name::from("placed_at_ts"),
                    direction: Some(Direction::Desc),
                },
            ]
        );
        assert_eq!(stmt.include, [Name::from("total")]);
        assert_eq!(stmt.predicate.as_deref(), Some(r#""total" > 0"#));
    }

    #[test]
    fn build_rejects_unknown_field() {
        let index = Index::builder("order_missing_idx")
            .fields(["missing"])
            .build()
            .unwrap();

        let err = create_index(&model(), &index).unwrap_err();
        assert!(err.is_state_conflict());
        assert_eq!(
            err.to_string(),
            "logical state conflict: field `missing` does not exist on model `shop.order`"
        );
    }

    #[test]
    fn expressions_are_kept_verbatim() {
        let index = Index::builder("order_lower_idx")
            .expressions([r#"lower("customer")"#])
            .build()
            .unwrap();

        let stmt = create_index(&model(), &index).unwrap();

        assert_eq!(
            stmt.columns,
            [IndexColumn::Expr(r#"lower("customer")"#.to_string())]
        );
    }
}
