//! End-to-end tests over the SQLite backend

use std::time::Duration;

use chrono::Utc;

use guild_core::entities::{
    ApplicationStatus, Application, Contribution, GuildMember, Invite, InviteStatus, LogEntry,
    Relation, RelationKind, RelationStatus,
};
use guild_core::error::DomainError;
use guild_core::traits::{
    ApplicationRepository, EconomyRepository, GuildRepository, InviteRepository, LogRepository,
    MemberRepository, RelationRepository,
};
use guild_core::value_objects::{GuildHome, GuildRole, Snowflake, SnowflakeGenerator};

use guild_db::{
    AnyApplicationRepository, AnyEconomyRepository, AnyGuildRepository, AnyInviteRepository,
    AnyLogRepository, AnyMemberRepository, AnyRelationRepository,
};

use integration_tests::{count_rows, sqlite_harness};

fn ids() -> SnowflakeGenerator {
    SnowflakeGenerator::new(7)
}

#[tokio::test]
async fn test_guild_lifecycle_round_trip() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();
    let leader = ids.generate();

    let guild = harness
        .store
        .create_guild("Alpha".to_string(), leader, "Kael".to_string())
        .await
        .unwrap();

    // Registry hit and storage fallback agree
    let by_name = harness.store.guild_by_name("alpha").await.unwrap().unwrap();
    assert_eq!(by_name.id, guild.id);

    let repo = AnyGuildRepository::new(harness.gateway.clone());
    let mut stored = repo.find_by_id(guild.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Alpha");
    assert_eq!(stored.leader_id, leader);
    assert_eq!(stored.max_members, 20);
    assert!(!stored.frozen);

    // A second guild with the same name is a conflict
    let err = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Rook".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NameTaken(_)));

    // Rename, freeze, set a home, read everything back
    stored.set_name("Omega".to_string());
    stored.set_tag(Some("OMG".to_string()));
    stored.set_frozen(true);
    repo.update(&stored).await.unwrap();
    repo.update_home(
        stored.id,
        Some(&GuildHome::new("overworld", 12.0, 64.0, -30.5).with_orientation(180.0, 0.0)),
    )
    .await
    .unwrap();

    let reloaded = repo.find_by_tag("OMG").await.unwrap().unwrap();
    assert_eq!(reloaded.name, "Omega");
    assert!(reloaded.frozen);
    let home = reloaded.home.unwrap();
    assert_eq!(home.world, "overworld");
    assert_eq!(home.yaw, 180.0);

    // Clearing the home nulls the column group
    repo.update_home(stored.id, None).await.unwrap();
    assert!(repo.find_by_id(stored.id).await.unwrap().unwrap().home.is_none());
}

#[tokio::test]
async fn test_membership_flow() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();
    let leader = ids.generate();

    let guild = harness
        .store
        .create_guild("Alpha".to_string(), leader, "Kael".to_string())
        .await
        .unwrap();

    let members = AnyMemberRepository::new(harness.gateway.clone());
    assert_eq!(members.count_by_guild(guild.id).await.unwrap(), 1);
    assert_eq!(
        members.find_leader(guild.id).await.unwrap().unwrap().player_id,
        leader
    );

    let rook = ids.generate();
    members
        .create(&GuildMember::new(
            guild.id,
            rook,
            "Rook".to_string(),
            GuildRole::Member,
        ))
        .await
        .unwrap();

    // Joining twice is a conflict
    let err = members
        .create(&GuildMember::new(
            guild.id,
            rook,
            "Rook".to_string(),
            GuildRole::Member,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AlreadyMember));

    members
        .update_role(guild.id, rook, GuildRole::Officer)
        .await
        .unwrap();
    let promoted = members.find(guild.id, rook).await.unwrap().unwrap();
    assert_eq!(promoted.role, GuildRole::Officer);

    assert!(members.delete(guild.id, rook).await.unwrap());
    assert!(!members.delete(guild.id, rook).await.unwrap(), "already gone");
    assert_eq!(members.count_by_guild(guild.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_relation_is_rejected_and_visible_from_both_sides() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();

    let alpha = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Kael".to_string())
        .await
        .unwrap();
    let beta = harness
        .store
        .create_guild("Beta".to_string(), ids.generate(), "Mira".to_string())
        .await
        .unwrap();

    let relations = AnyRelationRepository::new(harness.gateway.clone());
    let relation = Relation::new(
        ids.generate(),
        alpha.id,
        beta.id,
        RelationKind::Alliance,
        alpha.leader_id,
    );
    relations.create(&relation).await.unwrap();

    let err = relations
        .create(&Relation::new(
            ids.generate(),
            alpha.id,
            beta.id,
            RelationKind::War,
            beta.leader_id,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RelationExists));

    // Lookup works from both sides
    let found = relations
        .find_between(beta.id, alpha.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, relation.id);
    assert_eq!(found.kind, RelationKind::Alliance);
    assert_eq!(found.status, RelationStatus::Pending);

    // The inverse column order is the same pair
    let err = relations
        .create(&Relation::new(
            ids.generate(),
            beta.id,
            alpha.id,
            RelationKind::War,
            beta.leader_id,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RelationExists));
    assert_eq!(
        count_rows(&harness.gateway, "guild_relations", alpha.id.into_inner())
            .await
            .unwrap(),
        1
    );

    relations
        .update_status(relation.id, RelationStatus::Active)
        .await
        .unwrap();
    let active = relations.find_by_guild(beta.id).await.unwrap();
    assert_eq!(active.len(), 1);
    assert!(active[0].is_active(Utc::now()));
}

#[tokio::test]
async fn test_failed_leader_insert_rolls_the_guild_back() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();

    // Without the membership table the leader row cannot land
    harness
        .gateway
        .execute(sqlx::query("DROP TABLE guild_members"))
        .await
        .unwrap();

    let err = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Kael".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StorageFailure(_)));

    // No leaderless guild survives, in storage or in the registry
    let guilds = AnyGuildRepository::new(harness.gateway.clone());
    assert!(guilds.find_by_name("Alpha").await.unwrap().is_none());
    assert!(harness.store.registry().is_empty());
}

#[tokio::test]
async fn test_store_facade_members_relations_and_treasury() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();

    let alpha = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Kael".to_string())
        .await
        .unwrap();
    let beta = harness
        .store
        .create_guild("Beta".to_string(), ids.generate(), "Mira".to_string())
        .await
        .unwrap();

    // Membership through the facade
    let rook = ids.generate();
    let member = harness
        .store
        .add_member(alpha.id, rook, "Rook".to_string(), GuildRole::Member)
        .await
        .unwrap();
    assert_eq!(member.role, GuildRole::Member);
    let err = harness
        .store
        .add_member(alpha.id, rook, "Rook".to_string(), GuildRole::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AlreadyMember));
    let err = harness
        .store
        .add_member(Snowflake::new(999), rook, "Rook".to_string(), GuildRole::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::GuildNotFound(_)));

    // Capacity is enforced against the stored guild
    let economy = AnyEconomyRepository::new(harness.gateway.clone());
    economy.set_max_members(alpha.id, 2).await.unwrap();
    harness.store.registry().remove(alpha.id);
    let err = harness
        .store
        .add_member(alpha.id, ids.generate(), "Pip".to_string(), GuildRole::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::GuildFull(2)));

    // One relation row per unordered pair
    harness
        .store
        .add_relation(alpha.id, beta.id, RelationKind::Alliance, alpha.leader_id)
        .await
        .unwrap();
    let err = harness
        .store
        .add_relation(beta.id, alpha.id, RelationKind::War, beta.leader_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RelationExists));

    // Treasury: deposits accumulate, withdrawals never overdraw
    assert_eq!(
        harness.store.deposit(alpha.id, rook, 500.0, "DEPOSIT").await.unwrap(),
        500.0
    );
    assert_eq!(
        harness.store.deposit(alpha.id, rook, -200.0, "WITHDRAW").await.unwrap(),
        300.0
    );
    let err = harness
        .store
        .deposit(alpha.id, rook, -400.0, "WITHDRAW")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InsufficientFunds));

    let guilds = AnyGuildRepository::new(harness.gateway.clone());
    let stored = guilds.find_by_id(alpha.id).await.unwrap().unwrap();
    assert_eq!(stored.balance, 300.0);
    let ledger = economy.contributions_of(alpha.id, 10).await.unwrap();
    assert_eq!(ledger.len(), 2);

    // A frozen guild rejects treasury changes
    let mut frozen = stored;
    frozen.set_frozen(true);
    guilds.update(&frozen).await.unwrap();
    harness.store.registry().remove(alpha.id);
    let err = harness
        .store
        .deposit(alpha.id, rook, 10.0, "DEPOSIT")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::GuildFrozen));

    // Ad-hoc audit entries land in the background
    harness
        .store
        .record_log(alpha.id, rook, "CUSTOM", "manual note", None);
    tokio::time::sleep(Duration::from_millis(200)).await;
    let logs = AnyLogRepository::new(harness.gateway.clone());
    let trail = logs.find_by_guild(alpha.id, 20).await.unwrap();
    assert!(trail.iter().any(|entry| entry.log_type == "CUSTOM"));
    assert!(trail.iter().any(|entry| entry.log_type == "MEMBER_JOIN"));
}

#[tokio::test]
async fn test_economy_updates_persist() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();

    let guild = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Kael".to_string())
        .await
        .unwrap();

    let economy = AnyEconomyRepository::new(harness.gateway.clone());
    let guilds = AnyGuildRepository::new(harness.gateway.clone());

    economy.update_balance(guild.id, 750.5).await.unwrap();
    economy.add_experience(guild.id, 400).await.unwrap();
    economy.add_experience(guild.id, 700).await.unwrap();
    economy.set_level(guild.id, 2, 2_500).await.unwrap();
    economy.set_max_members(guild.id, 30).await.unwrap();

    let player = ids.generate();
    economy
        .record_contribution(
            &Contribution::new(ids.generate(), guild.id, player, 500.0, "DEPOSIT")
                .with_description("war chest"),
        )
        .await
        .unwrap();
    economy
        .record_contribution(&Contribution::new(
            ids.generate(),
            guild.id,
            player,
            250.5,
            "DEPOSIT",
        ))
        .await
        .unwrap();

    let stored = guilds.find_by_id(guild.id).await.unwrap().unwrap();
    assert_eq!(stored.balance, 750.5);
    assert_eq!(stored.experience, 1_100);
    assert_eq!(stored.level, 2);
    assert_eq!(stored.max_experience, 2_500);
    assert_eq!(stored.max_members, 30);

    let ledger = economy.contributions_of(guild.id, 10).await.unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger[0].amount, 250.5, "newest first");
    assert_eq!(ledger[1].description.as_deref(), Some("war chest"));

    // Unknown guild is an error, not a silent no-op
    let err = economy
        .update_balance(Snowflake::new(999), 1.0)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::GuildNotFound(_)));
}

#[tokio::test]
async fn test_applications_and_invites() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();

    let guild = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Kael".to_string())
        .await
        .unwrap();

    let applications = AnyApplicationRepository::new(harness.gateway.clone());
    let applicant = ids.generate();
    let application = Application::new(
        ids.generate(),
        guild.id,
        applicant,
        "let me in".to_string(),
    );
    applications.create(&application).await.unwrap();

    applications
        .update_status(application.id, ApplicationStatus::Accepted)
        .await
        .unwrap();
    let filed = applications.find_by_applicant(applicant).await.unwrap();
    assert_eq!(filed.len(), 1);
    assert_eq!(filed[0].status, ApplicationStatus::Accepted);

    let invites = AnyInviteRepository::new(harness.gateway.clone());
    let invitee = ids.generate();
    let invite = Invite::new(
        ids.generate(),
        guild.id,
        invitee,
        guild.leader_id,
        Some(Utc::now() + chrono::Duration::hours(1)),
    );
    invites.create(&invite).await.unwrap();

    let pending = invites.find_by_invitee(invitee).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(pending[0].is_usable(Utc::now()));

    invites
        .update_status(invite.id, InviteStatus::Declined)
        .await
        .unwrap();
    let declined = invites.find_by_guild(guild.id).await.unwrap();
    assert!(!declined[0].is_usable(Utc::now()));

    assert!(invites.delete(invite.id).await.unwrap());
    let err = invites
        .update_status(invite.id, InviteStatus::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InviteNotFound(_)));
}

#[tokio::test]
async fn test_audit_log_append_and_query() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();

    let guild = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Kael".to_string())
        .await
        .unwrap();

    let logs = AnyLogRepository::new(harness.gateway.clone());
    let since = Utc::now() - chrono::Duration::seconds(1);

    logs.append_sync(&LogEntry::new(
        ids.generate(),
        guild.id,
        guild.name.clone(),
        guild.leader_id,
        "MEMBER_JOIN",
        "Rook joined",
    ))
    .await
    .unwrap();
    logs.append_sync(
        &LogEntry::new(
            ids.generate(),
            guild.id,
            guild.name.clone(),
            guild.leader_id,
            "DEPOSIT",
            "Rook deposited 500",
        )
        .with_details(&serde_json::json!({ "amount": 500.0 })),
    )
    .await
    .unwrap();

    // Fire-and-forget append; give the detached task a moment
    logs.append(LogEntry::new(
        ids.generate(),
        guild.id,
        guild.name.clone(),
        guild.leader_id,
        "MEMBER_LEAVE",
        "Rook left",
    ));
    tokio::time::sleep(Duration::from_millis(200)).await;

    let newest = logs.find_by_guild(guild.id, 2).await.unwrap();
    assert_eq!(newest.len(), 2);

    let all = logs.find_since(guild.id, since).await.unwrap();
    // GUILD_CREATE from the store may also have landed
    assert!(all.len() >= 3);
    assert!(all.iter().any(|entry| entry.log_type == "MEMBER_LEAVE"));
    assert!(all
        .iter()
        .any(|entry| entry.details.as_deref() == Some(r#"{"amount":500.0}"#)));
}

#[tokio::test]
async fn test_deletion_cascades_dependents_and_spares_neighbors() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();

    let alpha = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Kael".to_string())
        .await
        .unwrap();
    let beta = harness
        .store
        .create_guild("Beta".to_string(), ids.generate(), "Mira".to_string())
        .await
        .unwrap();

    let members = AnyMemberRepository::new(harness.gateway.clone());
    members
        .create(&GuildMember::new(
            alpha.id,
            ids.generate(),
            "Rook".to_string(),
            GuildRole::Member,
        ))
        .await
        .unwrap();

    let relations = AnyRelationRepository::new(harness.gateway.clone());
    relations
        .create(&Relation::new(
            ids.generate(),
            alpha.id,
            beta.id,
            RelationKind::Alliance,
            alpha.leader_id,
        ))
        .await
        .unwrap();

    let economy = AnyEconomyRepository::new(harness.gateway.clone());
    economy
        .record_contribution(&Contribution::new(
            ids.generate(),
            alpha.id,
            alpha.leader_id,
            100.0,
            "DEPOSIT",
        ))
        .await
        .unwrap();

    let report = harness.store.delete_guild(alpha.id, alpha.leader_id).await;
    assert!(report.success);
    assert!(!report.degraded, "clean path, no fallback needed");
    assert!(report.first_error.is_none());

    // Alpha and everything hanging off it is gone
    let alpha_id = alpha.id.into_inner();
    assert!(harness.store.guild(alpha.id).await.unwrap().is_none());
    assert_eq!(count_rows(&harness.gateway, "guild_members", alpha_id).await.unwrap(), 0);
    assert_eq!(count_rows(&harness.gateway, "guild_relations", alpha_id).await.unwrap(), 0);
    assert_eq!(
        count_rows(&harness.gateway, "guild_contributions", alpha_id).await.unwrap(),
        0
    );

    // Beta is untouched
    let beta_reloaded = harness.store.guild(beta.id).await.unwrap().unwrap();
    assert_eq!(beta_reloaded.name, "Beta");
    assert_eq!(
        count_rows(&harness.gateway, "guild_members", beta.id.into_inner())
            .await
            .unwrap(),
        1
    );

    // The deletion audit entry outlives the guild row
    let logs = AnyLogRepository::new(harness.gateway.clone());
    tokio::time::sleep(Duration::from_millis(200)).await;
    let trail = logs.find_by_guild(alpha.id, 10).await.unwrap();
    assert!(trail.iter().any(|entry| entry.log_type == "GUILD_DELETE"));

    // Deleting again finds nothing to remove
    let repeat = harness.store.delete_guild(alpha.id, alpha.leader_id).await;
    assert!(!repeat.success);
    assert!(repeat
        .reason_trail()
        .contains("standard deletion removed no row"));
}

#[tokio::test]
async fn test_concurrent_deletions_do_not_interfere() {
    let harness = sqlite_harness().await.unwrap();
    let ids = ids();

    let alpha = harness
        .store
        .create_guild("Alpha".to_string(), ids.generate(), "Kael".to_string())
        .await
        .unwrap();
    let beta = harness
        .store
        .create_guild("Beta".to_string(), ids.generate(), "Mira".to_string())
        .await
        .unwrap();

    let (left, right) = tokio::join!(
        harness.store.delete_guild(alpha.id, alpha.leader_id),
        harness.store.delete_guild(beta.id, beta.leader_id),
    );

    assert!(left.success);
    assert!(right.success);
    assert!(harness.store.guild(alpha.id).await.unwrap().is_none());
    assert!(harness.store.guild(beta.id).await.unwrap().is_none());
    assert!(harness.store.registry().is_empty());
}

#[tokio::test]
async fn test_background_migration_backfills_legacy_guilds_table() {
    let harness = sqlite_harness().await.unwrap();

    // Strip a column the way a pre-economy deployment would look
    harness
        .gateway
        .execute(sqlx::query("ALTER TABLE guilds DROP COLUMN max_members"))
        .await
        .unwrap();
    harness
        .gateway
        .execute(sqlx::query("ALTER TABLE guilds DROP COLUMN frozen"))
        .await
        .unwrap();

    let schema = harness.schema.clone().with_settle_delay(Duration::from_millis(10));
    schema.spawn_migration().await.unwrap();

    // The store works again with defaulted columns
    let guild = harness
        .store
        .create_guild(
            "Alpha".to_string(),
            SnowflakeGenerator::new(2).generate(),
            "Kael".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(guild.max_members, 20);
}
