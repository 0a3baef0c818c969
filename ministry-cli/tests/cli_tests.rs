use clap::Parser;
use ministry_cli::{run, Cli, Command, SermonCommand};
use ministry_storage::SermonStore;
use ministry_types::UserId;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Env {
    _dir: TempDir,
    db: PathBuf,
    user: UserId,
}

fn env() -> Env {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ministry.db");
    Env {
        _dir: dir,
        db,
        user: UserId::new(),
    }
}

async fn exec(env: &Env, args: &[&str]) -> anyhow::Result<String> {
    let db = env.db.display().to_string();
    let user = env.user.to_string();
    let mut argv = vec!["ministry", "--db", db.as_str(), "--user", user.as_str()];
    argv.extend_from_slice(args);

    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    run(cli, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

fn first_token(output: &str) -> String {
    output.split_whitespace().next().unwrap().to_string()
}

fn open(path: &Path) -> SermonStore {
    SermonStore::open(path).unwrap()
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parses_sermon_edit_flags() {
    let id = ministry_types::SermonId::new().to_string();
    let cli = Cli::try_parse_from([
        "ministry", "-v", "sermon", "edit", id.as_str(), "--title", "New", "--no-series",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Command::Sermon(SermonCommand::Edit {
            title, no_series, series, ..
        }) => {
            assert_eq!(title.as_deref(), Some("New"));
            assert!(no_series);
            assert_eq!(series, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn series_and_no_series_conflict() {
    let sermon = ministry_types::SermonId::new().to_string();
    let series = ministry_types::SeriesId::new().to_string();
    let result = Cli::try_parse_from([
        "ministry", "sermon", "edit", sermon.as_str(), "--series", series.as_str(), "--no-series",
    ]);
    assert!(result.is_err());
}

#[test]
fn rejects_malformed_ids() {
    let result = Cli::try_parse_from(["ministry", "sermon", "show", "not-a-uuid"]);
    assert!(result.is_err());
}

// ── Commands ─────────────────────────────────────────────────────

#[tokio::test]
async fn new_user_needs_no_database() {
    let cli =
        Cli::try_parse_from(["ministry", "--db", "/nonexistent/dir/x.db", "new-user"]).unwrap();
    let mut out = Vec::new();
    run(cli, &mut out).await.unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(UserId::parse(printed.trim()).is_ok());
}

#[tokio::test]
async fn commands_without_user_fail() {
    let env = env();
    let db = env.db.display().to_string();
    let cli = Cli::try_parse_from(["ministry", "--db", db.as_str(), "sermon", "list"]).unwrap();
    if cli.user.is_some() {
        // MINISTRY_USER is set in this environment.
        return;
    }
    let err = run(cli, &mut Vec::new()).await.unwrap_err();
    assert!(err.to_string().contains("no user given"));
}

#[tokio::test]
async fn series_lifecycle() {
    let env = env();
    let created = exec(&env, &["series", "create", "Advent", "--color", "purple"])
        .await
        .unwrap();
    assert!(created.contains("Advent  (purple, active)"));
    let id = first_token(&created);

    let archived = exec(&env, &["series", "archive", &id]).await.unwrap();
    assert!(archived.contains("archived"));

    assert_eq!(exec(&env, &["series", "list", "--active"]).await.unwrap(), "");
    let listed = exec(&env, &["series", "list", "--archived"]).await.unwrap();
    assert!(listed.contains("Advent"));

    exec(&env, &["series", "unarchive", &id]).await.unwrap();
    let active = open(&env.db)
        .list_series(env.user, ministry_storage::SeriesFilter::Active)
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn sermon_create_show_and_list() {
    let env = env();
    let series = exec(&env, &["series", "create", "Romans"]).await.unwrap();
    let series_id = first_token(&series);

    let created = exec(
        &env,
        &["sermon", "create", "Justified", "--series", &series_id, "--scripture", "Rom 5:1"],
    )
    .await
    .unwrap();
    let sermon_id = first_token(&created);

    let shown = exec(&env, &["sermon", "show", &sermon_id]).await.unwrap();
    assert!(shown.contains("Justified"));
    assert!(shown.contains("series:    Romans"));
    assert!(shown.contains("scripture: Rom 5:1"));

    let listed = exec(&env, &["sermon", "list"]).await.unwrap();
    assert!(listed.contains("Justified  [Romans]"));
}

#[tokio::test]
async fn sermon_edit_goes_through_the_editor() {
    let env = env();
    let created = exec(&env, &["sermon", "create", "Draft"]).await.unwrap();
    let id = first_token(&created);

    let edited = exec(&env, &["sermon", "edit", &id, "--title", "Final", "--notes", "hymn"])
        .await
        .unwrap();
    assert!(edited.contains("Final"));

    let stored = open(&env.db).get_sermon(env.user, id.parse().unwrap()).unwrap();
    assert_eq!(stored.title, "Final");
    assert_eq!(stored.body.notes.as_deref(), Some("hymn"));
}

#[tokio::test]
async fn sermon_edit_without_changes_saves_nothing() {
    let env = env();
    let id = first_token(&exec(&env, &["sermon", "create", "Same"]).await.unwrap());

    let out = exec(&env, &["sermon", "edit", &id, "--title", "Same"]).await.unwrap();
    assert_eq!(out.trim(), "nothing saved: no unsaved changes");
}

#[tokio::test]
async fn sermon_edit_moves_between_series() {
    let env = env();
    let series_id = first_token(&exec(&env, &["series", "create", "Psalms"]).await.unwrap());
    let id = first_token(&exec(&env, &["sermon", "create", "Shepherd"]).await.unwrap());

    exec(&env, &["sermon", "edit", &id, "--series", &series_id]).await.unwrap();
    let stored = open(&env.db).get_sermon(env.user, id.parse().unwrap()).unwrap();
    assert_eq!(stored.series.map(|s| s.name), Some("Psalms".to_string()));

    exec(&env, &["sermon", "edit", &id, "--no-series"]).await.unwrap();
    let stored = open(&env.db).get_sermon(env.user, id.parse().unwrap()).unwrap();
    assert_eq!(stored.series, None);
}

#[tokio::test]
async fn json_output_is_camel_case() {
    let env = env();
    let out = exec(&env, &["--json", "sermon", "create", "Json"]).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["title"], "Json");
    assert!(value.get("createdAt").is_some());
    assert!(value.get("userId").is_some());
}

#[tokio::test]
async fn delete_then_show_fails() {
    let env = env();
    let id = first_token(&exec(&env, &["sermon", "create", "Gone"]).await.unwrap());

    let out = exec(&env, &["sermon", "delete", &id]).await.unwrap();
    assert_eq!(out.trim(), format!("deleted {id}"));

    let err = exec(&env, &["sermon", "show", &id]).await.unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn other_users_cannot_see_sermons() {
    let env = env();
    let id = first_token(&exec(&env, &["sermon", "create", "Private"]).await.unwrap());

    let stranger = Env {
        _dir: tempfile::tempdir().unwrap(),
        db: env.db.clone(),
        user: UserId::new(),
    };
    assert_eq!(exec(&stranger, &["sermon", "list"]).await.unwrap(), "");
    assert!(exec(&stranger, &["sermon", "show", &id]).await.is_err());
}
