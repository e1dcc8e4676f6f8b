//! Seeding orchestrator.
//!
//! A [`Seeder`] owns the parsed catalog, the configuration, the record sink
//! and the random source for one run. It walks models in dependency order
//! and assembles each record field by field:
//!
//! ```text
//!  SchemaModel ──► plan ──► for index in 0..count
//!                             ├─ scalar field  ──► seed-generator
//!                             ├─ foreign key   ──► ParentPool (earlier records)
//!                             └─ record ───────► RecordSink::create
//!                                                   └─ returned id ──► ParentPool
//! ```
//!
//! A failed record never stops the model and a failed model never stops the
//! run; failures are folded into each model's [`SeedResult`].

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seed_core::{
    FieldConfig, RelationConfig, SchemaCatalog, SchemaField, SchemaModel, SeedRecord, SeedResult, SeedValue,
    SeederConfig,
};
use seed_generator::{effective_field_config, generate_field, EffectiveField};
use seed_sink::RecordSink;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::RecordError;
use crate::pool::{ParentPool, UniqueValues};
use crate::resolver::{DependencyGraph, SeedOrder};

/// Records per model when neither the configuration nor the caller says.
pub const DEFAULT_COUNT: u64 = 10;

/// Regeneration attempts for a unique field. Strings then get an index
/// suffix; other values fail the record.
pub const MAX_UNIQUE_ATTEMPTS: usize = 8;

// ============================================================================
// Field plan
// ============================================================================

/// How one field of a model is filled, decided once per `seed` call.
#[derive(Debug, Clone)]
enum FieldPlan {
    Generate { field: EffectiveField, unique: bool },
    ForeignKey(ForeignKeyPlan),
}

#[derive(Debug, Clone)]
struct ForeignKeyPlan {
    field: String,
    parent: String,
    /// Field of the parent whose values are drawn
    key: String,
    required: bool,
    unique: bool,
    self_ref: bool,
    /// Children allowed per parent record
    max: Option<u64>,
}

/// Parent keys drawn for a record, as (foreign key field, parent key).
type Picks = Vec<(String, String)>;

// ============================================================================
// Seeder
// ============================================================================

/// Orchestrates one seeding run against a [`RecordSink`].
pub struct Seeder<S: RecordSink> {
    catalog: SchemaCatalog,
    config: SeederConfig,
    sink: S,
    rng: StdRng,
    parents: ParentPool,
    unique: UniqueValues,
    default_count: u64,
}

impl<S: RecordSink> Seeder<S> {
    /// Create a seeder.
    ///
    /// The random source is seeded from `global.seed` unless
    /// `global.randomize` is set.
    pub fn new(models: Vec<SchemaModel>, config: SeederConfig, sink: S) -> Self {
        let rng = if config.global.randomize() {
            StdRng::from_os_rng()
        } else {
            StdRng::seed_from_u64(config.global.seed())
        };

        Self {
            catalog: SchemaCatalog::new(models),
            config,
            sink,
            rng,
            parents: ParentPool::default(),
            unique: UniqueValues::default(),
            default_count: DEFAULT_COUNT,
        }
    }

    /// Count used for models without a configured `count`.
    pub fn with_default_count(mut self, count: u64) -> Self {
        self.default_count = count;
        self
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Dependency order of every model, including parents set by
    /// `RelationConfig.model`.
    pub fn seed_order(&self) -> SeedOrder {
        let mut graph = DependencyGraph::from_models(self.catalog.models());
        for (model, model_config) in &self.config.models {
            for relation in model_config.relations.values() {
                if let Some(parent) = &relation.model {
                    graph.add_dependency(model, parent);
                }
            }
        }
        graph.resolve()
    }

    /// Seed every model in dependency order.
    pub async fn seed_all(&mut self, cancel: &CancellationToken) -> Vec<SeedResult> {
        self.seed_models(None, cancel).await
    }

    /// Seed only the named models, still in dependency order.
    ///
    /// Unknown names yield a failed result each.
    pub async fn seed_selected(
        &mut self,
        only: &[String],
        cancel: &CancellationToken,
    ) -> Vec<SeedResult> {
        self.seed_models(Some(only), cancel).await
    }

    async fn seed_models(
        &mut self,
        only: Option<&[String]>,
        cancel: &CancellationToken,
    ) -> Vec<SeedResult> {
        let order = self.seed_order();
        let mut results = Vec::new();

        if let Some(only) = only {
            for name in only.iter().filter(|name| !self.catalog.contains(name)) {
                warn!("Model not found: {}", name);
                results.push(SeedResult::failed(name, format!("Model not found: {name}")));
            }
        }

        let selected: Vec<String> = order
            .order
            .iter()
            .filter(|model| only.map_or(true, |only| only.contains(model)))
            .cloned()
            .collect();

        if self.config.global.incremental() {
            self.load_existing(&order.order).await;
        } else if self.config.global.reset() {
            self.reset(&selected).await;
        }

        for model in &selected {
            if cancel.is_cancelled() {
                info!("Seeding cancelled before {}", model);
                break;
            }
            let count = self.config.model_count(model, self.default_count);
            results.push(self.seed(model, count).await);
        }

        if let Err(e) = self.sink.flush().await {
            warn!("Failed to flush record sink: {:#}", e);
        }

        results
    }

    /// Delete existing records, children before parents.
    async fn reset(&mut self, models: &[String]) {
        for model in models.iter().rev() {
            match self.sink.delete_all(model).await {
                Ok(removed) => info!("Reset {}: removed {} records", model, removed),
                Err(e) => warn!("Failed to reset {}: {:#}", model, e),
            }
            self.parents.forget_model(model);
            self.unique.forget_model(model);
        }
    }

    /// Make records already in the sink available as parents.
    async fn load_existing(&mut self, models: &[String]) {
        for name in models {
            let Some(model) = self.catalog.get_model(name) else {
                continue;
            };
            let records = match self.sink.existing_records(name).await {
                Ok(records) => records,
                Err(e) => {
                    warn!("Failed to load existing {} records: {:#}", name, e);
                    continue;
                }
            };

            for record in &records {
                for field in model.key_fields() {
                    if let Some(value) = record.get_field(&field.name).filter(|v| !v.is_null()) {
                        self.parents.remember(name, &field.name, value.clone());
                        self.unique.insert(name, &field.name, value);
                    }
                }
            }
            debug!("Loaded {} existing {} records", records.len(), name);
        }
    }

    /// Seed `count` records of one model.
    ///
    /// Parent keys created by earlier calls on this seeder stay available,
    /// so parents may be seeded in one call and children in the next.
    pub async fn seed(&mut self, model_name: &str, count: u64) -> SeedResult {
        let Some(model) = self.catalog.get_model(model_name).cloned() else {
            warn!("Model not found: {}", model_name);
            return SeedResult::failed(model_name, format!("Model not found: {model_name}"));
        };

        let plan = self.plan(&model);
        let id_field = model.primary_key().map(|f| f.name.clone());
        let mut usage: HashMap<String, HashMap<String, u64>> = HashMap::new();
        let mut created = 0;
        let mut last_error = None;

        debug!(
            "Seeding {} records of {} ({} planned fields)",
            count,
            model.name,
            plan.len()
        );

        for index in 0..count {
            let outcome = match self.build_record(&model.name, id_field.as_deref(), &plan, index, &usage)
            {
                Ok((record, picks)) => self.create(&model, &plan, record).await.map(|_| picks),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(picks) => {
                    created += 1;
                    for (field, key) in picks {
                        *usage.entry(field).or_default().entry(key).or_default() += 1;
                    }
                }
                Err(e) => {
                    debug!("{}", e);
                    last_error = Some(e.to_string());
                }
            }
        }

        match &last_error {
            None => info!("Seeded {} {} records", created, model.name),
            Some(e) => warn!(
                "Seeded {}/{} {} records; last error: {}",
                created, count, model.name, e
            ),
        }

        SeedResult::from_counts(model.name, count, created, last_error)
    }

    // ========================================================================
    // Planning
    // ========================================================================

    fn plan(&self, model: &SchemaModel) -> Vec<FieldPlan> {
        let model_config = self.config.model_config(&model.name);
        let mut plan = Vec::with_capacity(model.fields.len());

        for field in &model.fields {
            let overrides = model_config.and_then(|c| c.field(&field.name));
            if overrides.is_some_and(|o| o.ignore) {
                debug!("Ignoring {}.{}", model.name, field.name);
                continue;
            }

            let relation = model_config.and_then(|c| c.relation(&field.name));
            if overrides.is_some_and(FieldConfig::supplies_values) {
                if field.is_foreign_key {
                    debug!(
                        "{}.{} values come from its field config, not from parent records",
                        model.name, field.name
                    );
                }
            } else if let Some(foreign_key) = self.foreign_key_plan(model, field, relation) {
                plan.push(FieldPlan::ForeignKey(foreign_key));
                continue;
            }

            match effective_field_config(field, overrides) {
                Ok(Some(effective)) => plan.push(FieldPlan::Generate {
                    field: effective,
                    unique: field.is_unique || field.is_primary_key,
                }),
                Ok(None) => debug!("{}.{} is left to the store", model.name, field.name),
                Err(e) => warn!("Skipping {}.{}: {}", model.name, field.name, e),
            }
        }

        plan
    }

    /// Plan for a foreign key, or `None` to generate the field as a scalar.
    fn foreign_key_plan(
        &self,
        model: &SchemaModel,
        field: &SchemaField,
        relation: Option<&RelationConfig>,
    ) -> Option<ForeignKeyPlan> {
        if !field.is_foreign_key {
            return None;
        }

        let Some(parent) = relation
            .and_then(|r| r.model.clone())
            .or_else(|| field.relation_model.clone())
        else {
            debug!(
                "{}.{} has no resolved target; generating a value",
                model.name, field.name
            );
            return None;
        };

        let Some(parent_model) = self.catalog.get_model(&parent) else {
            warn!(
                "{}.{} references unknown model {}; generating a value",
                model.name, field.name, parent
            );
            return None;
        };

        let key = field
            .relation_field
            .clone()
            .or_else(|| parent_model.primary_key().map(|f| f.name.clone()))
            .unwrap_or_else(|| "id".to_string());

        Some(ForeignKeyPlan {
            field: field.name.clone(),
            self_ref: parent == model.name,
            parent,
            key,
            required: field.is_required,
            unique: field.is_unique,
            max: relation.and_then(|r| r.max),
        })
    }

    // ========================================================================
    // Records
    // ========================================================================

    fn build_record(
        &mut self,
        model: &str,
        id_field: Option<&str>,
        plan: &[FieldPlan],
        index: u64,
        usage: &HashMap<String, HashMap<String, u64>>,
    ) -> Result<(SeedRecord, Picks), RecordError> {
        let mut record = SeedRecord::new(model, index);
        record.id_field = id_field.map(str::to_string);
        let mut picks = Vec::new();

        for step in plan {
            match step {
                FieldPlan::Generate { field, unique } => {
                    if let Some(value) = self.generate_value(model, field, *unique, index)? {
                        record.insert(field.name.clone(), value);
                    }
                }
                FieldPlan::ForeignKey(fk) => {
                    if let Some(value) = self.pick_parent(model, fk, usage.get(&fk.field))? {
                        picks.push((fk.field.clone(), value.to_string()));
                        record.insert(fk.field.clone(), value);
                    }
                }
            }
        }

        Ok((record, picks))
    }

    fn generate_value(
        &mut self,
        model: &str,
        field: &EffectiveField,
        unique: bool,
        index: u64,
    ) -> Result<Option<SeedValue>, RecordError> {
        let mut attempts = 0;
        loop {
            let value = match generate_field(field, &mut self.rng, index) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Leaving {}.{} out of record {}: {}", model, field.name, index, e);
                    return Ok(None);
                }
            };

            if value.is_null() {
                return Ok(None);
            }
            if !unique || !self.unique.contains(model, &field.name, &value) {
                return Ok(Some(value));
            }

            attempts += 1;
            if attempts >= MAX_UNIQUE_ATTEMPTS {
                let exhausted = || RecordError::UniqueExhausted {
                    model: model.to_string(),
                    field: field.name.clone(),
                    attempts,
                };
                let SeedValue::String(s) = value else {
                    return Err(exhausted());
                };
                let suffixed = SeedValue::String(format!("{s}-{index}"));
                if self.unique.contains(model, &field.name, &suffixed) {
                    return Err(exhausted());
                }
                return Ok(Some(suffixed));
            }
        }
    }

    /// Draw a parent key for `fk`. `Ok(None)` leaves the field out.
    fn pick_parent(
        &mut self,
        model: &str,
        fk: &ForeignKeyPlan,
        used: Option<&HashMap<String, u64>>,
    ) -> Result<Option<SeedValue>, RecordError> {
        let candidates = self.parents.candidates(&fk.parent, &fk.key);
        let must_fill = fk.required && !fk.self_ref;

        if candidates.is_empty() {
            if must_fill {
                return Err(RecordError::ReferentialIntegrity {
                    model: model.to_string(),
                    field: fk.field.clone(),
                    parent: fk.parent.clone(),
                });
            }
            return Ok(None);
        }

        let available: Vec<&SeedValue> = candidates
            .iter()
            .filter(|value| {
                let children = used
                    .and_then(|u| u.get(&value.to_string()))
                    .copied()
                    .unwrap_or(0);
                fk.max.map_or(true, |max| children < max)
                    && !(fk.unique && self.unique.contains(model, &fk.field, value))
            })
            .collect();

        if available.is_empty() {
            if must_fill {
                return Err(RecordError::ParentsExhausted {
                    model: model.to_string(),
                    field: fk.field.clone(),
                    parent: fk.parent.clone(),
                });
            }
            return Ok(None);
        }

        let choice = available[self.rng.random_range(0..available.len())];
        Ok(Some(choice.clone()))
    }

    async fn create(
        &mut self,
        model: &SchemaModel,
        plan: &[FieldPlan],
        record: SeedRecord,
    ) -> Result<(), RecordError> {
        let id = self
            .sink
            .create(&record)
            .await
            .map_err(|e| RecordError::Sink {
                model: model.name.clone(),
                index: record.index,
                message: format!("{e:#}"),
            })?;

        if let Some(id_field) = &record.id_field {
            self.parents.remember(&model.name, id_field, id.clone());
            self.unique.insert(&model.name, id_field, &id);
        }

        for field in model.key_fields() {
            if record.id_field.as_deref() == Some(field.name.as_str()) {
                continue;
            }
            if let Some(value) = record.get_field(&field.name).filter(|v| !v.is_null()) {
                self.parents.remember(&model.name, &field.name, value.clone());
            }
        }

        for step in plan {
            let (name, unique) = match step {
                FieldPlan::Generate { field, unique } => (&field.name, *unique),
                FieldPlan::ForeignKey(fk) => (&fk.field, fk.unique),
            };
            if unique {
                if let Some(value) = record.get_field(name) {
                    self.unique.insert(&model.name, name, value);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use seed_core::{DefaultValue, FieldType, GlobalConfig, ModelConfig};
    use seed_sink::MemorySink;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn user() -> SchemaModel {
        SchemaModel::new(
            "User",
            vec![
                SchemaField::declared("id", "String").primary_key(),
                SchemaField::declared("email", "String").unique(),
                SchemaField::declared("age", "Int"),
            ],
            vec![],
        )
    }

    fn post() -> SchemaModel {
        SchemaModel::new(
            "Post",
            vec![
                SchemaField::declared("id", "String").primary_key(),
                SchemaField::declared("title", "String"),
                SchemaField::declared("authorId", "String").references("User", "id"),
            ],
            vec![],
        )
    }

    fn seeder(models: Vec<SchemaModel>) -> Seeder<Arc<MemorySink>> {
        Seeder::new(models, SeederConfig::default(), Arc::new(MemorySink::new()))
    }

    /// Rejects every third create call.
    #[derive(Default)]
    struct FlakySink {
        inner: MemorySink,
        calls: AtomicU64,
    }

    #[async_trait::async_trait]
    impl RecordSink for FlakySink {
        async fn create(&self, record: &SeedRecord) -> anyhow::Result<SeedValue> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call % 3 == 0 {
                return Err(anyhow!("constraint violation on call {call}"));
            }
            self.inner.create(record).await
        }

        async fn delete_all(&self, model: &str) -> anyhow::Result<u64> {
            self.inner.delete_all(model).await
        }
    }

    #[tokio::test]
    async fn test_children_draw_parent_ids() {
        let mut seeder = seeder(vec![post(), user()]);

        let users = seeder.seed("User", 3).await;
        assert_eq!(users.count, 3);
        assert!(users.success);

        let posts = seeder.seed("Post", 5).await;
        assert_eq!(posts.count, 5);
        assert_eq!(posts.error, None);

        let sink = seeder.sink();
        let user_ids: HashSet<String> = sink
            .records("User")
            .await
            .iter()
            .map(|r| r.id().unwrap().to_string())
            .collect();
        assert_eq!(user_ids.len(), 3);

        for post in sink.records("Post").await {
            let author = post.get_field("authorId").unwrap().to_string();
            assert!(user_ids.contains(&author));
        }
    }

    #[tokio::test]
    async fn test_required_relation_without_parents_fails() {
        let mut seeder = seeder(vec![user(), post()]);

        let result = seeder.seed("Post", 4).await;
        assert_eq!(result.count, 0);
        assert!(!result.success);
        assert!(result.error.unwrap().contains("no User records exist"));
        assert_eq!(seeder.sink().count("Post").await, 0);
    }

    #[tokio::test]
    async fn test_sink_failures_are_counted() {
        let mut seeder = Seeder::new(vec![user()], SeederConfig::default(), FlakySink::default());

        let result = seeder.seed("User", 9).await;
        assert_eq!(result.count, 6);
        assert!(result.success);
        assert!(result.error.unwrap().contains("constraint violation on call 9"));
        assert_eq!(seeder.sink().inner.count("User").await, 6);
    }

    #[tokio::test]
    async fn test_zero_records_and_unknown_model() {
        let mut seeder = seeder(vec![user()]);

        let empty = seeder.seed("User", 0).await;
        assert!(empty.success);
        assert_eq!(empty.count, 0);

        let missing = seeder.seed("Ghost", 3).await;
        assert!(!missing.success);
        assert_eq!(missing.error.as_deref(), Some("Model not found: Ghost"));
    }

    #[tokio::test]
    async fn test_seed_all_follows_dependency_order() {
        let mut config = SeederConfig::default();
        config.models.insert(
            "Post".to_string(),
            ModelConfig {
                count: Some(4),
                ..Default::default()
            },
        );
        let mut seeder = Seeder::new(vec![post(), user()], config, Arc::new(MemorySink::new()))
            .with_default_count(2);

        let results = seeder.seed_all(&CancellationToken::new()).await;
        let names: Vec<&str> = results.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(names, vec!["User", "Post"]);
        assert_eq!(results[0].count, 2);
        assert_eq!(results[1].count, 4);
        assert!(results.iter().all(|r| r.success));
    }

    #[tokio::test]
    async fn test_cancelled_run_seeds_nothing() {
        let mut seeder = seeder(vec![user(), post()]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(seeder.seed_all(&cancel).await.is_empty());
        assert_eq!(seeder.sink().count("User").await, 0);
    }

    #[tokio::test]
    async fn test_seed_selected_reports_unknown_models() {
        let mut seeder = seeder(vec![user(), post()]).with_default_count(1);
        let only = vec!["Nope".to_string(), "User".to_string()];

        let results = seeder.seed_selected(&only, &CancellationToken::new()).await;
        assert_eq!(results.len(), 2);
        assert!(!results[0].success);
        assert_eq!(results[1].model, "User");
        assert_eq!(seeder.sink().count("Post").await, 0);
    }

    #[tokio::test]
    async fn test_invalid_field_config_skips_only_that_field() {
        let mut config = SeederConfig::default();
        let mut user_config = ModelConfig::default();
        user_config
            .fields
            .insert("age".to_string(), FieldConfig::with_range(10.0, 1.0));
        config.models.insert("User".to_string(), user_config);

        let mut seeder = Seeder::new(vec![user()], config, Arc::new(MemorySink::new()));
        let result = seeder.seed("User", 3).await;
        assert_eq!(result.count, 3);

        for record in seeder.sink().records("User").await {
            assert!(record.get_field("age").is_none());
            assert!(record.get_field("email").is_some());
        }
    }

    #[tokio::test]
    async fn test_unique_fields_do_not_repeat() {
        let mut config = SeederConfig::default();
        let mut user_config = ModelConfig::default();
        user_config
            .fields
            .insert("email".to_string(), FieldConfig::with_values(["a@x.io", "b@x.io"]));
        config.models.insert("User".to_string(), user_config);

        let mut seeder = Seeder::new(vec![user()], config, Arc::new(MemorySink::new()));
        assert_eq!(seeder.seed("User", 6).await.count, 6);

        let emails: HashSet<String> = seeder
            .sink()
            .records("User")
            .await
            .iter()
            .map(|r| r.get_field("email").unwrap().to_string())
            .collect();
        assert_eq!(emails.len(), 6);
    }

    #[tokio::test]
    async fn test_unique_number_range_runs_out() {
        let seat = SchemaModel::new(
            "Seat",
            vec![
                SchemaField::declared("id", "String").primary_key(),
                SchemaField::declared("number", "Int").unique(),
                SchemaField::declared("aisle", "Boolean").unique(),
            ],
            vec![],
        );
        let mut config = SeederConfig::default();
        let mut seat_config = ModelConfig::default();
        seat_config
            .fields
            .insert("number".to_string(), FieldConfig::with_range(1.0, 3.0));
        config.models.insert("Seat".to_string(), seat_config);

        let mut seeder = Seeder::new(vec![seat], config, Arc::new(MemorySink::new()));
        let result = seeder.seed("Seat", 5).await;

        // `aisle` has only two values to give
        assert!(result.count <= 2);
        assert!(result.success);
        assert!(result.error.unwrap().contains("Cannot generate a unique Seat."));

        let records = seeder.sink().records("Seat").await;
        assert_eq!(records.len() as u64, result.count);
        let numbers: HashSet<i64> = records
            .iter()
            .map(|r| r.get_field("number").unwrap().as_i64().unwrap())
            .collect();
        let aisles: HashSet<bool> = records
            .iter()
            .map(|r| r.get_field("aisle").unwrap().as_bool().unwrap())
            .collect();
        assert_eq!(numbers.len(), records.len());
        assert_eq!(aisles.len(), records.len());
    }

    #[tokio::test]
    async fn test_field_config_on_foreign_key_wins() {
        let mut config = SeederConfig::default();
        let mut post_config = ModelConfig::default();
        post_config
            .fields
            .insert("authorId".to_string(), FieldConfig::with_values(["guest"]));
        config.models.insert("Post".to_string(), post_config);

        let mut seeder = Seeder::new(vec![user(), post()], config, Arc::new(MemorySink::new()));
        let result = seeder.seed("Post", 3).await;
        assert_eq!(result.count, 3);
        assert_eq!(result.error, None);

        for post in seeder.sink().records("Post").await {
            assert_eq!(post.get_field("authorId").unwrap().as_str(), Some("guest"));
        }
    }

    #[tokio::test]
    async fn test_optional_and_self_references() {
        let category = SchemaModel::new(
            "Category",
            vec![
                SchemaField::new("id", FieldType::Number)
                    .primary_key()
                    .with_default(DefaultValue::Raw("autoincrement()".into())),
                SchemaField::declared("name", "String"),
                SchemaField::declared("parentId", "Int")
                    .optional()
                    .references("Category", "id"),
            ],
            vec![],
        );
        let mut seeder = seeder(vec![category]);

        let result = seeder.seed("Category", 4).await;
        assert_eq!(result.count, 4);

        let records = seeder.sink().records("Category").await;
        assert!(records[0].get_field("parentId").is_none());
        for record in &records[1..] {
            let parent = record.get_field("parentId").unwrap().as_i64().unwrap();
            assert!(parent < record.get_field("id").unwrap().as_i64().unwrap());
        }
    }

    #[tokio::test]
    async fn test_unique_foreign_key_exhausts_parents() {
        let profile = SchemaModel::new(
            "Profile",
            vec![
                SchemaField::new("id", FieldType::Number).primary_key(),
                SchemaField::declared("userId", "String")
                    .unique()
                    .references("User", "id"),
            ],
            vec![],
        );
        let mut seeder = seeder(vec![user(), profile]);
        seeder.seed("User", 2).await;

        let result = seeder.seed("Profile", 3).await;
        assert_eq!(result.count, 2);
        assert!(result.error.unwrap().contains("no User record is still available"));
    }

    #[tokio::test]
    async fn test_relation_max_caps_children() {
        let mut config = SeederConfig::default();
        let mut post_config = ModelConfig::default();
        post_config.relations.insert(
            "authorId".to_string(),
            RelationConfig {
                max: Some(2),
                ..Default::default()
            },
        );
        config.models.insert("Post".to_string(), post_config);

        let mut seeder = Seeder::new(vec![user(), post()], config, Arc::new(MemorySink::new()));
        seeder.seed("User", 2).await;
        assert_eq!(seeder.seed("Post", 5).await.count, 4);
    }

    #[tokio::test]
    async fn test_relation_model_override() {
        let author = SchemaModel::new(
            "Author",
            vec![SchemaField::new("id", FieldType::Number).primary_key()],
            vec![],
        );
        let book = SchemaModel::new(
            "Book",
            vec![
                SchemaField::new("id", FieldType::Number).primary_key(),
                SchemaField::declared("writerId", "Int").references("Writer", "id"),
            ],
            vec![],
        );

        let mut config = SeederConfig::default();
        let mut book_config = ModelConfig::default();
        book_config.relations.insert(
            "writerId".to_string(),
            RelationConfig {
                model: Some("Author".to_string()),
                ..Default::default()
            },
        );
        config.models.insert("Book".to_string(), book_config);

        let mut seeder = Seeder::new(vec![book, author], config, Arc::new(MemorySink::new()))
            .with_default_count(3);
        assert_eq!(seeder.seed_order().order, vec!["Author", "Book"]);

        let results = seeder.seed_all(&CancellationToken::new()).await;
        assert!(results.iter().all(|r| r.count == 3));
    }

    #[tokio::test]
    async fn test_reset_and_incremental() {
        let sink = Arc::new(MemorySink::new());
        let mut first = Seeder::new(vec![user()], SeederConfig::default(), sink.clone())
            .with_default_count(3);
        first.seed_all(&CancellationToken::new()).await;
        assert_eq!(sink.count("User").await, 3);

        let incremental = SeederConfig {
            global: GlobalConfig {
                incremental: Some(true),
                reset: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut second = Seeder::new(vec![user(), post()], incremental, sink.clone())
            .with_default_count(2);
        let results = second
            .seed_selected(&["Post".to_string()], &CancellationToken::new())
            .await;
        assert_eq!(results[0].count, 2);
        assert_eq!(sink.count("User").await, 3);

        let reset = SeederConfig {
            global: GlobalConfig {
                reset: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut third = Seeder::new(vec![user(), post()], reset, sink.clone()).with_default_count(1);
        third.seed_all(&CancellationToken::new()).await;
        assert_eq!(sink.count("User").await, 1);
        assert_eq!(sink.count("Post").await, 1);
    }

    #[tokio::test]
    async fn test_same_seed_same_records() {
        let mut a = seeder(vec![user()]);
        let mut b = seeder(vec![user()]);
        a.seed("User", 5).await;
        b.seed("User", 5).await;

        assert_eq!(
            a.sink().records("User").await,
            b.sink().records("User").await
        );
    }
}
