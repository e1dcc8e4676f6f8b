use std::io::Write;

use clap::Parser;
use schema_seed::inspect::{format_models, inspect_schema};
use schema_seed::seed::{all_succeeded, format_summary, run_seed};
use schema_seed::SeedArgs;
use seed_runner::CancellationToken;
use tempfile::{NamedTempFile, TempDir};

use crate::fixture;

#[test]
fn test_inspect_fixture() {
    let summaries = inspect_schema(fixture("blog.prisma")).unwrap();
    let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["User", "Post", "Comment", "Profile"]);

    let comment = &summaries[2];
    assert_eq!(comment.fields, 4);
    assert_eq!(comment.relations, 2);
    assert_eq!(
        comment.foreign_keys,
        vec!["postId -> Post.id", "authorId -> User.id"]
    );

    let table = format_models(&summaries);
    assert!(table.contains("Profile"));
    assert!(!table.contains("cyclic"));
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out");
    let schema = fixture("blog.prisma");

    let args = SeedArgs::parse_from([
        "schema-seed",
        "--schema",
        schema.to_str().unwrap(),
        "--output-dir",
        output.to_str().unwrap(),
        "--count",
        "2",
        "--dry-run",
    ]);
    let results = run_seed(&args, &CancellationToken::new()).await.unwrap();

    assert_eq!(results.len(), 4);
    assert!(all_succeeded(&results));
    assert!(!output.exists());
    assert!(format_summary(&results).contains("8 records across 4 models (0 failed)"));
}

#[tokio::test]
async fn test_missing_schema_is_fatal() {
    let args = SeedArgs::parse_from(["schema-seed", "--schema", "/nonexistent/schema.prisma"]);
    let err = run_seed(&args, &CancellationToken::new()).await.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load schema"));
}

#[tokio::test]
async fn test_schema_without_models_seeds_nothing() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "// nothing here yet").unwrap();

    let args = SeedArgs::parse_from([
        "schema-seed",
        "--schema",
        file.path().to_str().unwrap(),
        "--dry-run",
    ]);
    let results = run_seed(&args, &CancellationToken::new()).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_unknown_model_fails_alone() {
    let schema = fixture("blog.prisma");
    let args = SeedArgs::parse_from([
        "schema-seed",
        "--schema",
        schema.to_str().unwrap(),
        "--models",
        "User,Invoice",
        "--count",
        "3",
        "--dry-run",
    ]);
    let results = run_seed(&args, &CancellationToken::new()).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].model, "Invoice");
    assert!(!results[0].success);
    assert_eq!(results[1].count, 3);
    assert!(!all_succeeded(&results));
}

#[tokio::test]
async fn test_config_file_overrides() {
    let mut config = NamedTempFile::with_suffix(".yaml").unwrap();
    write!(
        config,
        r#"
models:
  User:
    count: 2
    fields:
      email:
        generator: internet.email
      age:
        min: 30
        max: 40
      bio:
        ignore: true
  Post:
    count: 3
    fields:
      title:
        pattern: "Post #{{index}}"
"#
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let schema = fixture("blog.prisma");
    let args = SeedArgs::parse_from([
        "schema-seed",
        "--schema",
        schema.to_str().unwrap(),
        "--config",
        config.path().to_str().unwrap(),
        "--models",
        "User,Post",
        "--output-dir",
        dir.path().to_str().unwrap(),
    ]);
    let results = run_seed(&args, &CancellationToken::new()).await.unwrap();
    assert_eq!(results[0].count, 2);
    assert_eq!(results[1].count, 3);

    let users = std::fs::read_to_string(dir.path().join("User.jsonl")).unwrap();
    for line in users.lines() {
        let user: serde_json::Value = serde_json::from_str(line).unwrap();
        let age = user["age"].as_i64().unwrap();
        assert!((30..=40).contains(&age));
        assert!(user.get("bio").is_none());
    }

    let posts = std::fs::read_to_string(dir.path().join("Post.jsonl")).unwrap();
    let titles: Vec<String> = posts
        .lines()
        .map(|line| {
            let post: serde_json::Value = serde_json::from_str(line).unwrap();
            post["title"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(titles, vec!["Post #0", "Post #1", "Post #2"]);
}
