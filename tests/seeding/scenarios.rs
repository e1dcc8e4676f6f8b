use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use seed_core::{SeedRecord, SeedValue, SeederConfig};
use seed_runner::{resolve_order, CancellationToken, Seeder};
use seed_sink::{MemorySink, RecordSink};

use crate::fixture_text;

const USER_POST: &str = r#"
model User { id String @id, email String @unique, age Int }
model Post { id String @id, title String, authorId String @relation(fields: [authorId], references: [id]) }
"#;

fn ids(records: &[SeedRecord], field: &str) -> HashSet<String> {
    records
        .iter()
        .filter_map(|r| r.get_field(field))
        .map(|v| v.to_string())
        .collect()
}

/// Rejects every third create call and counts the accepted ones.
#[derive(Default)]
struct EveryThirdFails {
    inner: MemorySink,
    calls: AtomicU64,
    accepted: AtomicU64,
}

#[async_trait::async_trait]
impl RecordSink for EveryThirdFails {
    async fn create(&self, record: &SeedRecord) -> anyhow::Result<SeedValue> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call % 3 == 0 {
            anyhow::bail!("unique constraint failed (call {call})");
        }
        let id = self.inner.create(record).await?;
        self.accepted.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn delete_all(&self, model: &str) -> anyhow::Result<u64> {
        self.inner.delete_all(model).await
    }
}

#[tokio::test]
async fn test_user_post_scenario() {
    let models = schema_parser::parse_schema(USER_POST);
    assert_eq!(models.len(), 2);
    assert_eq!(resolve_order(&models).order, vec!["User", "Post"]);

    let author = models[1].get_field("authorId").unwrap();
    assert!(author.is_foreign_key);
    assert_eq!(author.relation_model.as_deref(), Some("User"));

    let mut seeder = Seeder::new(models, SeederConfig::default(), MemorySink::new());
    assert_eq!(seeder.seed("User", 3).await.count, 3);
    assert_eq!(seeder.seed("Post", 5).await.count, 5);

    let user_ids = ids(&seeder.sink().records("User").await, "id");
    assert_eq!(user_ids.len(), 3);

    let posts = seeder.sink().records("Post").await;
    assert_eq!(posts.len(), 5);
    for post in &posts {
        let author = post.get_field("authorId").unwrap().to_string();
        assert!(user_ids.contains(&author), "dangling authorId {author}");
    }
}

#[tokio::test]
async fn test_partial_failure_accounting() {
    let models = schema_parser::parse_schema(USER_POST);
    let mut seeder = Seeder::new(models, SeederConfig::default(), EveryThirdFails::default());

    let result = seeder.seed("User", 12).await;
    let accepted = seeder.sink().accepted.load(Ordering::SeqCst);

    assert_eq!(accepted, 8);
    assert_eq!(result.count, accepted);
    assert!(result.success);
    assert!(result.error.unwrap().contains("unique constraint failed (call 12)"));
}

#[tokio::test]
async fn test_parents_persist_across_seed_calls() {
    let models = schema_parser::parse_schema(USER_POST);
    let mut seeder = Seeder::new(models, SeederConfig::default(), MemorySink::new());

    seeder.seed("User", 5).await;
    let posts = seeder.seed("Post", 10).await;
    assert_eq!(posts.count, 10);
    assert!(posts.error.is_none());

    let user_ids = ids(&seeder.sink().records("User").await, "id");
    let author_ids = ids(&seeder.sink().records("Post").await, "authorId");
    assert!(author_ids.is_subset(&user_ids));
}

#[tokio::test]
async fn test_children_first_fails_referential_integrity() {
    let models = schema_parser::parse_schema(USER_POST);
    let mut seeder = Seeder::new(models, SeederConfig::default(), MemorySink::new());

    let result = seeder.seed("Post", 3).await;
    assert!(!result.success);
    assert_eq!(result.count, 0);
    assert!(result.error.unwrap().contains("no User records exist"));
}

#[tokio::test]
async fn test_blog_fixture_seeds_every_model() {
    let models = schema_parser::parse_schema(&fixture_text("blog.prisma"));
    let mut seeder =
        Seeder::new(models, SeederConfig::default(), MemorySink::new()).with_default_count(6);

    let results = seeder.seed_all(&CancellationToken::new()).await;
    let names: Vec<&str> = results.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(names, vec!["User", "Post", "Comment", "Profile"]);
    for result in &results {
        assert!(result.success, "{} failed: {:?}", result.model, result.error);
        assert_eq!(result.count, 6);
    }

    let sink = seeder.sink();
    let users = sink.records("User").await;
    let posts = sink.records("Post").await;
    let user_ids = ids(&users, "id");
    let post_ids = ids(&posts, "id");

    for user in &users {
        let role = user.get_field("role").and_then(|v| v.as_str()).unwrap();
        assert!(["ADMIN", "EDITOR", "READER"].contains(&role));
        assert!(user.get_field("email").unwrap().to_string().contains('@'));
    }

    for post in &posts {
        let tags = post.get_field("tags").and_then(|v| v.as_array()).unwrap();
        assert!((1..=3).contains(&tags.len()));
        assert!(post.get_field("createdAt").unwrap().as_datetime().is_some());
    }
    assert_eq!(ids(&posts, "slug").len(), posts.len());

    for comment in sink.records("Comment").await {
        assert!(post_ids.contains(&comment.get_field("postId").unwrap().to_string()));
        assert!(user_ids.contains(&comment.get_field("authorId").unwrap().to_string()));
    }

    let profile_users = ids(&sink.records("Profile").await, "userId");
    assert_eq!(profile_users.len(), 6);
    assert!(profile_users.is_subset(&user_ids));
}
