//! Table and column definitions
//!
//! Every statement here is written in the dialect subset both engines
//! accept: `BIGINT`, `DOUBLE PRECISION` and `TEXT` column types, inline
//! foreign keys and `IF NOT EXISTS` guards. Timestamps are stored as
//! epoch milliseconds in `BIGINT` columns and booleans as `0`/`1`.

/// Table name of the guild aggregate root, the migration target.
pub const GUILDS_TABLE: &str = "guilds";

/// Idempotent table creation statements, in dependency order.
pub const CREATE_TABLES: &[(&str, &str)] = &[
    (
        "guilds",
        "CREATE TABLE IF NOT EXISTS guilds (
            id BIGINT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            tag TEXT UNIQUE,
            description TEXT,
            leader_id BIGINT NOT NULL,
            home_world TEXT,
            home_x DOUBLE PRECISION,
            home_y DOUBLE PRECISION,
            home_z DOUBLE PRECISION,
            home_yaw DOUBLE PRECISION,
            home_pitch DOUBLE PRECISION,
            balance DOUBLE PRECISION NOT NULL DEFAULT 0,
            level BIGINT NOT NULL DEFAULT 1,
            experience BIGINT NOT NULL DEFAULT 0,
            max_experience BIGINT NOT NULL DEFAULT 1000,
            max_members BIGINT NOT NULL DEFAULT 20,
            frozen BIGINT NOT NULL DEFAULT 0,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
    ),
    (
        "guild_members",
        "CREATE TABLE IF NOT EXISTS guild_members (
            guild_id BIGINT NOT NULL REFERENCES guilds(id) ON DELETE CASCADE,
            player_id BIGINT NOT NULL,
            display_name TEXT NOT NULL,
            role TEXT NOT NULL,
            joined_at BIGINT NOT NULL,
            PRIMARY KEY (guild_id, player_id)
        )",
    ),
    (
        "guild_relations",
        "CREATE TABLE IF NOT EXISTS guild_relations (
            id BIGINT PRIMARY KEY,
            guild_id BIGINT NOT NULL REFERENCES guilds(id) ON DELETE CASCADE,
            other_guild_id BIGINT NOT NULL REFERENCES guilds(id) ON DELETE CASCADE,
            kind TEXT NOT NULL,
            status TEXT NOT NULL,
            initiated_by BIGINT NOT NULL,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            expires_at BIGINT,
            UNIQUE (guild_id, other_guild_id)
        )",
    ),
    (
        "guild_applications",
        "CREATE TABLE IF NOT EXISTS guild_applications (
            id BIGINT PRIMARY KEY,
            guild_id BIGINT NOT NULL REFERENCES guilds(id) ON DELETE CASCADE,
            applicant_id BIGINT NOT NULL,
            message TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at BIGINT NOT NULL
        )",
    ),
    (
        "guild_invites",
        "CREATE TABLE IF NOT EXISTS guild_invites (
            id BIGINT PRIMARY KEY,
            guild_id BIGINT NOT NULL REFERENCES guilds(id) ON DELETE CASCADE,
            invitee_id BIGINT NOT NULL,
            inviter_id BIGINT NOT NULL,
            status TEXT NOT NULL,
            expires_at BIGINT,
            created_at BIGINT NOT NULL
        )",
    ),
    (
        "guild_contributions",
        "CREATE TABLE IF NOT EXISTS guild_contributions (
            id BIGINT PRIMARY KEY,
            guild_id BIGINT NOT NULL REFERENCES guilds(id) ON DELETE CASCADE,
            player_id BIGINT NOT NULL,
            amount DOUBLE PRECISION NOT NULL,
            kind TEXT NOT NULL,
            description TEXT,
            created_at BIGINT NOT NULL
        )",
    ),
    // No foreign key: the deletion audit entry outlives the guild row,
    // and guild_name is denormalized for exactly that case.
    (
        "guild_logs",
        "CREATE TABLE IF NOT EXISTS guild_logs (
            id BIGINT PRIMARY KEY,
            guild_id BIGINT NOT NULL,
            guild_name TEXT NOT NULL,
            actor_id BIGINT NOT NULL,
            log_type TEXT NOT NULL,
            description TEXT NOT NULL,
            details TEXT,
            created_at BIGINT NOT NULL
        )",
    ),
];

/// Secondary indexes for the hot lookup paths.
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_guild_members_player ON guild_members (player_id)",
    "CREATE INDEX IF NOT EXISTS idx_guild_relations_other ON guild_relations (other_guild_id)",
    "CREATE INDEX IF NOT EXISTS idx_guild_applications_guild ON guild_applications (guild_id, status)",
    "CREATE INDEX IF NOT EXISTS idx_guild_applications_applicant ON guild_applications (applicant_id)",
    "CREATE INDEX IF NOT EXISTS idx_guild_invites_invitee ON guild_invites (invitee_id, status)",
    "CREATE INDEX IF NOT EXISTS idx_guild_contributions_guild ON guild_contributions (guild_id, created_at)",
    "CREATE INDEX IF NOT EXISTS idx_guild_logs_guild ON guild_logs (guild_id, created_at)",
];

/// A column that later releases added to the guilds table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    /// Definition as it appears after `ADD COLUMN`. Nullable, or
    /// carrying a constant default, so it can be added to a live table.
    pub definition: &'static str,
}

/// Columns shipped together; each group migrates in one transaction.
#[derive(Debug, Clone, Copy)]
pub struct ColumnGroup {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

/// Guild column groups in release order. The schema manager adds any
/// of these missing from an existing deployment.
pub const COLUMN_GROUPS: &[ColumnGroup] = &[
    ColumnGroup {
        name: "home",
        columns: &[
            ColumnSpec { name: "home_world", definition: "TEXT" },
            ColumnSpec { name: "home_x", definition: "DOUBLE PRECISION" },
            ColumnSpec { name: "home_y", definition: "DOUBLE PRECISION" },
            ColumnSpec { name: "home_z", definition: "DOUBLE PRECISION" },
            ColumnSpec { name: "home_yaw", definition: "DOUBLE PRECISION" },
            ColumnSpec { name: "home_pitch", definition: "DOUBLE PRECISION" },
        ],
    },
    ColumnGroup {
        name: "economy",
        columns: &[
            ColumnSpec {
                name: "balance",
                definition: "DOUBLE PRECISION NOT NULL DEFAULT 0",
            },
            ColumnSpec { name: "level", definition: "BIGINT NOT NULL DEFAULT 1" },
            ColumnSpec {
                name: "experience",
                definition: "BIGINT NOT NULL DEFAULT 0",
            },
            ColumnSpec {
                name: "max_experience",
                definition: "BIGINT NOT NULL DEFAULT 1000",
            },
            ColumnSpec {
                name: "max_members",
                definition: "BIGINT NOT NULL DEFAULT 20",
            },
            ColumnSpec { name: "frozen", definition: "BIGINT NOT NULL DEFAULT 0" },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_tables_in_dependency_order() {
        assert_eq!(CREATE_TABLES.len(), 7);
        assert_eq!(CREATE_TABLES[0].0, "guilds");
        for (name, ddl) in CREATE_TABLES {
            assert!(ddl.contains("IF NOT EXISTS"), "{name} must be idempotent");
            assert!(ddl.contains(name));
        }
    }

    #[test]
    fn test_dependents_cascade_on_guild_delete() {
        for (name, ddl) in &CREATE_TABLES[1..] {
            if *name == "guild_logs" {
                // Audit rows outlive the guild
                assert!(!ddl.contains("REFERENCES"), "guild_logs must not cascade");
                continue;
            }
            assert!(
                ddl.contains("REFERENCES guilds(id) ON DELETE CASCADE"),
                "{name} must be removed with its guild"
            );
        }
    }

    #[test]
    fn test_migrated_columns_exist_in_base_ddl() {
        let guilds_ddl = CREATE_TABLES[0].1;
        for group in COLUMN_GROUPS {
            for column in group.columns {
                assert!(
                    guilds_ddl.contains(column.name),
                    "column {} missing from base table",
                    column.name
                );
            }
        }
    }
}
