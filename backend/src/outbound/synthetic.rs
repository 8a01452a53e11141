//! Offline record source backed by the `example-data` generator.
//!
//! Output is reproducible for a given seed and identifiers never repeat
//! across batches from the same source.

use std::sync::Mutex;

use async_trait::async_trait;
use example_data::{ExampleBankSeed, ExampleDataGenerator, ExampleUserSeed};
use tracing::debug;

use crate::domain::ports::{BatchSize, RecordSource, RecordSourceError};
use crate::domain::{BankRecord, EntityKind, RecordBatch, UserRecord};

/// Record source generating fake users and banks in-process.
///
/// # Examples
/// ```
/// use userbank::domain::EntityKind;
/// use userbank::domain::ports::{BatchSize, RecordSource};
/// use userbank::outbound::synthetic::SyntheticRecordSource;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let source = SyntheticRecordSource::new(7);
/// let batch = source
///     .fetch_batch(EntityKind::Banks, BatchSize::new(3).expect("valid size"))
///     .await
///     .expect("generated");
/// assert_eq!(batch.len(), 3);
/// # });
/// ```
#[derive(Debug)]
pub struct SyntheticRecordSource {
    generator: Mutex<ExampleDataGenerator>,
}

impl SyntheticRecordSource {
    /// Create a source whose output is determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            generator: Mutex::new(ExampleDataGenerator::new(seed)),
        }
    }

    fn generate(&self, kind: EntityKind, count: usize) -> Result<RecordBatch, RecordSourceError> {
        let mut generator = self.generator.lock().map_err(|_| {
            RecordSourceError::generation("generator lock poisoned by an earlier panic")
        })?;
        match kind {
            EntityKind::Users => generator
                .users(count)
                .map(|seeds| RecordBatch::Users(seeds.into_iter().map(user_from_seed).collect()))
                .map_err(|error| RecordSourceError::generation(error.to_string())),
            EntityKind::Banks => Ok(RecordBatch::Banks(
                generator
                    .banks(count)
                    .into_iter()
                    .map(bank_from_seed)
                    .collect(),
            )),
        }
    }
}

#[async_trait]
impl RecordSource for SyntheticRecordSource {
    async fn fetch_batch(
        &self,
        kind: EntityKind,
        size: BatchSize,
    ) -> Result<RecordBatch, RecordSourceError> {
        debug!(%kind, %size, "generating synthetic batch");
        self.generate(kind, size.get())
    }
}

fn user_from_seed(seed: ExampleUserSeed) -> UserRecord {
    UserRecord {
        id: seed.id.into(),
        first_name: seed.first_name,
        last_name: seed.last_name,
        username: seed.username,
        email: seed.email,
        bank_id: None,
    }
}

fn bank_from_seed(seed: ExampleBankSeed) -> BankRecord {
    BankRecord {
        id: seed.id.into(),
        bank_name: seed.bank_name,
        routing_number: seed.routing_number,
        swift_bic: seed.swift_bic,
    }
}
