use super::*;

// --- roles ---

#[test]
fn role_default_is_member() {
    assert_eq!(TeamRole::default(), TeamRole::Member);
}

#[test]
fn role_parse_inverts_as_str() {
    for role in [TeamRole::Owner, TeamRole::Admin, TeamRole::Member, TeamRole::Viewer] {
        assert_eq!(TeamRole::parse(role.as_str()), Some(role));
    }
}

#[test]
fn role_parse_rejects_unknown() {
    assert_eq!(TeamRole::parse("superuser"), None);
}

#[test]
fn role_serde_uses_snake_case() {
    let json = serde_json::to_string(&TeamRole::Viewer).unwrap();
    assert_eq!(json, "\"viewer\"");
}

// --- records ---

#[test]
fn team_serde_roundtrip() {
    let team = Team {
        id: 1,
        name: "Product".to_string(),
        description: None,
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_000_000,
    };
    let json = serde_json::to_string(&team).unwrap();
    let back: Team = serde_json::from_str(&json).unwrap();
    assert_eq!(back, team);
}

#[test]
fn project_serde_roundtrip() {
    let project = Project {
        id: 4,
        team_id: 1,
        name: "Launch".to_string(),
        description: Some("Q3 launch planning".to_string()),
        brief: None,
        created_at: 0,
        updated_at: 0,
    };
    let json = serde_json::to_string(&project).unwrap();
    let back: Project = serde_json::from_str(&json).unwrap();
    assert_eq!(back, project);
}
