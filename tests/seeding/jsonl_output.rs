use std::collections::HashSet;
use std::path::Path;

use clap::Parser;
use schema_seed::seed::run_seed;
use schema_seed::SeedArgs;
use seed_runner::CancellationToken;
use tempfile::TempDir;

use crate::fixture;

fn args(output: &Path, extra: &[&str]) -> SeedArgs {
    let schema = fixture("blog.prisma");
    let mut argv = vec![
        "schema-seed",
        "--schema",
        schema.to_str().unwrap(),
        "--output-dir",
        output.to_str().unwrap(),
        "--count",
        "4",
    ];
    argv.extend_from_slice(extra);
    SeedArgs::parse_from(argv)
}

fn lines(output: &Path, model: &str) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(output.join(format!("{model}.jsonl"))).unwrap();
    content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_writes_one_file_per_model() {
    let dir = TempDir::new().unwrap();
    let results = run_seed(&args(dir.path(), &[]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.success && r.count == 4));

    let users = lines(dir.path(), "User");
    assert_eq!(users.len(), 4);
    let user_ids: HashSet<i64> = users.iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert_eq!(user_ids, HashSet::from([1, 2, 3, 4]));

    for post in lines(dir.path(), "Post") {
        assert!(user_ids.contains(&post["authorId"].as_i64().unwrap()));
        assert!(post["title"].as_str().is_some_and(|t| !t.is_empty()));
    }
}

#[tokio::test]
async fn test_incremental_appends_and_reuses_parents() {
    let dir = TempDir::new().unwrap();
    run_seed(&args(dir.path(), &[]), &CancellationToken::new())
        .await
        .unwrap();

    let results = run_seed(
        &args(dir.path(), &["--incremental", "--models", "Post", "--seed", "7"]),
        &CancellationToken::new(),
    )
    .await
    .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].count, 4);

    assert_eq!(lines(dir.path(), "User").len(), 4);
    let posts = lines(dir.path(), "Post");
    assert_eq!(posts.len(), 8);

    let post_ids: HashSet<i64> = posts.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(post_ids.len(), 8);
    for post in &posts {
        assert!((1..=4).contains(&post["authorId"].as_i64().unwrap()));
    }
}

#[tokio::test]
async fn test_reset_replaces_existing_output() {
    let dir = TempDir::new().unwrap();
    run_seed(&args(dir.path(), &[]), &CancellationToken::new())
        .await
        .unwrap();
    run_seed(&args(dir.path(), &["--reset"]), &CancellationToken::new())
        .await
        .unwrap();

    for model in ["User", "Post", "Comment", "Profile"] {
        assert_eq!(lines(dir.path(), model).len(), 4, "{model}");
    }
}

#[tokio::test]
async fn test_same_seed_same_output() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    for dir in [&first, &second] {
        run_seed(&args(dir.path(), &["--models", "User"]), &CancellationToken::new())
            .await
            .unwrap();
    }

    let strip = |dir: &Path| -> Vec<String> {
        lines(dir, "User")
            .into_iter()
            .map(|u| format!("{} {} {}", u["email"], u["firstName"], u["role"]))
            .collect()
    };
    assert_eq!(strip(first.path()), strip(second.path()));
}
