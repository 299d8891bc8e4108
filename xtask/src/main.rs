// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Developer and CI entry points for the `BetBuddies` workspace.
//!
//! - `cargo xtask ci` runs clippy, the test suite and the schema check.
//! - `cargo xtask verify-schema` migrates a fresh in-memory `SQLite`
//!   database and checks that the card and pick constraints the submission
//!   transaction relies on are present.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::{io, process::Output};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.log_level_filter().as_trace())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Copy, Debug, Subcommand)]
enum Command {
    /// Run clippy, the tests and the schema check
    CI,

    /// Run clippy with warnings denied
    #[command(visible_alias = "cl")]
    Clippy,

    /// Run every test target in the workspace
    #[command(visible_alias = "t")]
    Test,

    /// Check the migrated schema for the card and pick constraints
    #[command(visible_alias = "vs")]
    VerifySchema,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => {
                Self::Clippy.run()?;
                Self::Test.run()?;
                Self::VerifySchema.run()
            }
            Self::Clippy => cargo(&[
                "clippy",
                "--workspace",
                "--all-targets",
                "--",
                "-D",
                "warnings",
            ]),
            Self::Test => cargo(&["test", "--workspace", "--all-targets"]),
            Self::VerifySchema => verify_schema(),
        }
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args.iter().copied()).run_traced()?;
    Ok(())
}

/// A storage constraint card submission depends on.
enum Constraint {
    /// A unique index over `columns`.
    Unique {
        table: &'static str,
        columns: &'static [&'static str],
        guards: &'static str,
    },
    /// `table.column` references `target`.
    References {
        table: &'static str,
        column: &'static str,
        target: &'static str,
    },
}

impl Constraint {
    fn holds(&self, schema: &MigratedSchema) -> bool {
        match self {
            Self::Unique { table, columns, .. } => schema.has_unique(table, columns),
            Self::References {
                table,
                column,
                target,
            } => schema.has_reference(table, column, target),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Unique {
                table,
                columns,
                guards,
            } => format!("{table} unique on ({}): {guards}", columns.join(", ")),
            Self::References {
                table,
                column,
                target,
            } => format!("{table}.{column} references {target}"),
        }
    }
}

const REQUIRED: &[Constraint] = &[
    Constraint::Unique {
        table: "cards",
        columns: &["member_id", "league_id", "week_number", "season_year"],
        guards: "concurrent first submissions resolve to one card",
    },
    Constraint::Unique {
        table: "picks",
        columns: &["card_id", "event_id", "bet_type"],
        guards: "one pick per event and bet type on a card",
    },
    Constraint::References {
        table: "cards",
        column: "league_id",
        target: "leagues",
    },
    Constraint::References {
        table: "picks",
        column: "card_id",
        target: "cards",
    },
    Constraint::References {
        table: "picks",
        column: "event_id",
        target: "events",
    },
    Constraint::References {
        table: "audit_events",
        column: "league_id",
        target: "leagues",
    },
];

fn verify_schema() -> Result<()> {
    let mut conn =
        SqliteConnection::establish(":memory:").wrap_err("Failed to open in-memory SQLite")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!(applied = applied.len(), "Migrated in-memory database");

    let schema: MigratedSchema = MigratedSchema::load(&mut conn)?;

    let missing: Vec<String> = REQUIRED
        .iter()
        .filter_map(|constraint| {
            if constraint.holds(&schema) {
                tracing::info!("✓ {}", constraint.describe());
                None
            } else {
                Some(constraint.describe())
            }
        })
        .collect();

    if missing.is_empty() {
        tracing::info!("✓ Schema verification passed");
        return Ok(());
    }
    for constraint in &missing {
        tracing::error!("missing: {constraint}");
    }
    Err(eyre!(
        "Schema is missing {} required constraint(s)",
        missing.len()
    ))
}

/// Unique indexes and foreign keys of the migrated database, by table.
#[derive(Debug, Default)]
struct MigratedSchema {
    unique: BTreeMap<String, BTreeSet<Vec<String>>>,
    references: BTreeMap<String, BTreeSet<(String, String)>>,
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct ForeignKeyRow {
    #[diesel(sql_type = Text)]
    table: String,
    #[diesel(sql_type = Text)]
    from: String,
}

#[derive(QueryableByName)]
struct IndexRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Integer)]
    unique: i32,
}

impl MigratedSchema {
    fn load(conn: &mut SqliteConnection) -> Result<Self> {
        let tables: Vec<NameRow> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations'",
        )
        .load(conn)
        .wrap_err("Failed to list tables")?;

        let mut schema: Self = Self::default();
        for NameRow { name: table } in tables {
            let keys: Vec<ForeignKeyRow> =
                diesel::sql_query(format!("PRAGMA foreign_key_list({table})"))
                    .load(conn)
                    .wrap_err_with(|| format!("Failed to read foreign keys of {table}"))?;
            schema.references.insert(
                table.clone(),
                keys.into_iter().map(|fk| (fk.from, fk.table)).collect(),
            );

            let indexes: Vec<IndexRow> = diesel::sql_query(format!("PRAGMA index_list({table})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read indexes of {table}"))?;
            // UNIQUE table constraints show up here as autoindexes.
            let mut unique: BTreeSet<Vec<String>> = BTreeSet::new();
            for index in indexes.into_iter().filter(|index| index.unique != 0) {
                let columns: Vec<NameRow> =
                    diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                        .load(conn)
                        .wrap_err_with(|| format!("Failed to read columns of {}", index.name))?;
                unique.insert(columns.into_iter().map(|column| column.name).collect());
            }
            schema.unique.insert(table, unique);
        }
        Ok(schema)
    }

    fn has_unique(&self, table: &str, columns: &[&str]) -> bool {
        self.unique.get(table).is_some_and(|indexes| {
            indexes
                .iter()
                .any(|index| index.iter().map(String::as_str).eq(columns.iter().copied()))
        })
    }

    fn has_reference(&self, table: &str, column: &str, target: &str) -> bool {
        self.references.get(table).is_some_and(|keys| {
            keys.iter()
                .any(|(from, to)| from == column && to == target)
        })
    }
}

/// Logs a `duct` command before running it.
trait TracedRun {
    fn run_traced(&self) -> io::Result<Output>;
}

impl TracedRun for duct::Expression {
    fn run_traced(&self) -> io::Result<Output> {
        tracing::info!("running: {self:?}");
        self.run()
            .inspect_err(|_| tracing::error!("command failed: {self:?}"))
    }
}
