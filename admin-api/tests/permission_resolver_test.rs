mod common;

use common::{seed_role, seed_user, test_state};
use uuid::Uuid;

#[tokio::test]
async fn user_with_no_roles_has_empty_permission_set() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "noroles@example.com");

    let perms = state
        .permissions
        .effective_permissions(user.user_id)
        .await
        .unwrap();
    assert!(perms.is_empty());

    let allowed = state
        .permissions
        .has_permission(user.user_id, "users.read")
        .await
        .unwrap();
    assert!(!allowed);
}

#[tokio::test]
async fn nonexistent_user_resolves_to_empty_not_error() {
    let (state, _store) = test_state(5);
    let missing = Uuid::new_v4();

    let perms = state
        .permissions
        .effective_permissions(missing)
        .await
        .unwrap();
    assert!(perms.is_empty());

    let allowed = state
        .permissions
        .has_permission(missing, "users.read")
        .await
        .unwrap();
    assert!(!allowed);
}

#[tokio::test]
async fn superadmin_holds_arbitrary_permissions() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "root@example.com");
    seed_role(&store, user.user_id, "SUPER_ADMIN", true, &[]);

    for key in ["users.read", "does-not.exist", "anything.at-all"] {
        let allowed = state
            .permissions
            .has_permission(user.user_id, key)
            .await
            .unwrap();
        assert!(allowed, "superadmin should hold {}", key);
    }
}

#[tokio::test]
async fn effective_set_is_union_with_duplicates_collapsed() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "editor@example.com");

    // Both roles grant users.read; the union must contain it once.
    seed_role(
        &store,
        user.user_id,
        "editor",
        false,
        &[("users", "read"), ("users", "write")],
    );
    seed_role(
        &store,
        user.user_id,
        "viewer",
        false,
        &[("users", "read"), ("reports", "read")],
    );

    let perms = state
        .permissions
        .effective_permissions(user.user_id)
        .await
        .unwrap();

    let expected: Vec<&str> = vec!["reports.read", "users.read", "users.write"];
    assert_eq!(perms.len(), 3);
    for key in expected {
        assert!(perms.contains(key), "missing {}", key);
    }

    assert!(state
        .permissions
        .has_permission(user.user_id, "reports.read")
        .await
        .unwrap());
    assert!(!state
        .permissions
        .has_permission(user.user_id, "reports.write")
        .await
        .unwrap());
}

#[tokio::test]
async fn non_superadmin_does_not_bypass() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "limited@example.com");
    seed_role(&store, user.user_id, "viewer", false, &[("users", "read")]);

    assert!(!state
        .permissions
        .has_permission(user.user_id, "does-not.exist")
        .await
        .unwrap());
}

#[tokio::test]
async fn list_all_is_sorted_by_resource_then_action() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "any@example.com");
    seed_role(
        &store,
        user.user_id,
        "mixed",
        false,
        &[
            ("users", "write"),
            ("reports", "read"),
            ("users", "read"),
            ("audit", "read"),
        ],
    );

    let all = state.permissions.list_all().await.unwrap();
    let keys: Vec<String> = all.iter().map(|p| p.key()).collect();
    assert_eq!(
        keys,
        vec!["audit.read", "reports.read", "users.read", "users.write"]
    );
}

#[tokio::test]
async fn list_grouped_preserves_sorted_order_within_groups() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "any@example.com");
    seed_role(
        &store,
        user.user_id,
        "mixed",
        false,
        &[
            ("users", "write"),
            ("users", "delete"),
            ("users", "read"),
            ("reports", "read"),
        ],
    );

    let grouped = state.permissions.list_grouped().await.unwrap();
    assert_eq!(grouped.len(), 2);

    let users = grouped.get("users").unwrap();
    let actions: Vec<&str> = users.iter().map(|p| p.action.as_str()).collect();
    assert_eq!(actions, vec!["delete", "read", "write"]);

    let reports = grouped.get("reports").unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].key(), "reports.read");
}
