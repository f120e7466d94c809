//! Team role lifecycle against the live API
//!
//! **IMPORTANT**: these tests create and delete roles on the configured team.

use predicates::prelude::*;

use super::{AcceptanceContext, ManagedRole, test_role_name};

#[test]
#[cfg_attr(not(feature = "acceptance-tests"), ignore)]
fn test_apply_creates_role() {
    let role = ManagedRole::apply(&[("manage-members", true), ("access-reports", false)]);

    let id = role.ctx.tracked_id().expect("role not tracked after apply");
    role.ctx
        .run(&["role", "get", &role.ctx.team_id, &id])
        .success()
        .stdout(predicate::str::contains(&role.name))
        .stdout(predicate::str::contains("manage-members"));
}

#[test]
#[cfg_attr(not(feature = "acceptance-tests"), ignore)]
fn test_reapply_is_a_no_op() {
    let role = ManagedRole::apply(&[("edit-schedules", true)]);
    let id = role.ctx.tracked_id();

    let manifest = role.ctx.manifest_path();
    role.ctx
        .run(&["plan", "-f", &manifest.to_string_lossy(), "--refresh"])
        .success()
        .stdout(predicate::str::contains("No changes"));

    assert_eq!(role.ctx.tracked_id(), id);
}

#[test]
#[cfg_attr(not(feature = "acceptance-tests"), ignore)]
fn test_rights_change_updates_in_place() {
    let role = ManagedRole::apply(&[("edit-schedules", true)]);
    let id = role.ctx.tracked_id();

    role.ctx
        .write_manifest(&role.name, &[("edit-schedules", false), ("access-reports", true)]);
    let manifest = role.ctx.manifest_path();
    role.ctx
        .run(&["plan", "-f", &manifest.to_string_lossy()])
        .success()
        .stdout(predicate::str::contains("1 to update"));
    role.ctx.apply();

    assert_eq!(role.ctx.tracked_id(), id);
    let rights = &role.ctx.state()["resources"]["role"]["rights"];
    assert!(rights.to_string().contains("access-reports"));
}

#[test]
#[cfg_attr(not(feature = "acceptance-tests"), ignore)]
fn test_rename_replaces_role() {
    let mut role = ManagedRole::apply(&[("manage-members", true)]);
    let old_id = role.ctx.tracked_id();

    let renamed = test_role_name();
    role.ctx.write_manifest(&renamed, &[("manage-members", true)]);
    role.ctx.apply();
    role.name = renamed;

    assert!(role.ctx.tracked_id().is_some());
    assert_ne!(role.ctx.tracked_id(), old_id);
}

#[test]
#[cfg_attr(not(feature = "acceptance-tests"), ignore)]
fn test_refresh_drops_externally_deleted_role() {
    let role = ManagedRole::apply(&[("manage-members", true)]);
    let id = role.ctx.tracked_id().expect("role not tracked after apply");

    role.ctx
        .run(&["role", "delete", &role.ctx.team_id, &id, "--yes"])
        .success();
    role.ctx
        .run(&["refresh"])
        .success()
        .stderr(predicate::str::contains("no longer exists"));

    assert!(role.ctx.tracked_id().is_none());
}

#[test]
#[cfg_attr(not(feature = "acceptance-tests"), ignore)]
fn test_import_unknown_role_fails() {
    let ctx = AcceptanceContext::new();
    ctx.run(&["import", "role", &ctx.team_id, "00000000-0000-0000-0000-000000000000"])
        .failure()
        .stderr(predicate::str::contains("Cannot import"));
}

#[test]
#[cfg_attr(not(feature = "acceptance-tests"), ignore)]
fn test_unknown_team_is_an_error() {
    let ctx = AcceptanceContext::new();
    ctx.run(&["role", "list", "00000000-0000-0000-0000-000000000000"])
        .failure();
}
