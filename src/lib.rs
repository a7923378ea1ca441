//! mongocompare library
//!
//! Command-line options and connection glue around `mongocompare_engine`.
//! The engine decides whether two collections are equivalent; this crate
//! turns flags and environment variables into a [`ValidationConfig`] and two
//! [`CollectionTarget`]s, and connects to them.
//!
//! # CLI Usage
//!
//! ```bash
//! mongocompare \
//!   --source-uri mongodb://localhost:27017 --source-database shop --source-coll-name orders \
//!   --target-uri mongodb://replica:27017 --target-database shop --target-coll-name orders \
//!   --random-sample-size 500
//! echo $?   # 0 when equivalent, otherwise the sum of the failed check bits
//! ```

use clap::{Parser, ValueEnum};
use mongocompare_engine::config::{
    DEFAULT_FIRST_IDS_COUNT, DEFAULT_LAST_IDS_COUNT, DEFAULT_SAMPLE_SIZE,
};
use mongocompare_engine::{DocumentComparator, FieldOrder, MissingDocumentPolicy, ValidationConfig};

pub mod connect;

pub use connect::connect_collection;

#[derive(Parser, Clone, Debug)]
#[command(name = "mongocompare")]
#[command(
    about = "Check that a target MongoDB collection is an equivalent copy of a source collection"
)]
#[command(long_about = "Runs five read-only checks (counts, indexes, sampled content, \
                        first ids, last ids) and exits with the sum of the bits of the \
                        failed checks: 1, 2, 4, 8 and 16. Exit code 32 means the \
                        comparison could not be made.")]
pub struct CompareOpts {
    /// Source collection connection options
    #[command(flatten)]
    pub source: SourceOpts,

    /// Target collection connection options
    #[command(flatten)]
    pub target: TargetOpts,

    /// Number of source documents to sample and compare (0 disables the check)
    #[arg(
        long,
        alias = "randomSampleSize",
        env = "RANDOM_SAMPLE_SIZE",
        default_value_t = DEFAULT_SAMPLE_SIZE,
        allow_negative_numbers = true
    )]
    pub random_sample_size: i64,

    /// Number of lowest _id values to compare (0 disables the check)
    #[arg(
        long,
        alias = "firstIdsCount",
        env = "FIRST_IDS_COUNT",
        default_value_t = DEFAULT_FIRST_IDS_COUNT,
        allow_negative_numbers = true
    )]
    pub first_ids_count: i64,

    /// Number of highest _id values to compare (0 disables the check)
    #[arg(
        long,
        alias = "lastIdsCount",
        env = "LAST_IDS_COUNT",
        default_value_t = DEFAULT_LAST_IDS_COUNT,
        allow_negative_numbers = true
    )]
    pub last_ids_count: i64,

    /// Index option to leave out of the index comparison, in addition to `background`
    #[arg(long = "ignore-index-option", value_name = "OPTION")]
    pub ignore_index_options: Vec<String>,

    /// Top-level document field to leave out of the content comparison
    #[arg(long = "ignore-field", value_name = "FIELD")]
    pub ignore_fields: Vec<String>,

    /// Treat documents whose fields appear in a different order as different
    #[arg(long)]
    pub strict_field_order: bool,

    /// Abort the run when a sampled document is missing from the target
    #[arg(long)]
    pub fail_on_missing_sample: bool,

    /// Output format for the validation report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Parser, Clone, Debug)]
pub struct SourceOpts {
    /// Source MongoDB connection string
    #[arg(long, alias = "sourceURI", env = "SOURCE_URI")]
    pub source_uri: String,

    /// Source username, overriding any in the connection string
    #[arg(long, alias = "sourceUsername", env = "SOURCE_USERNAME")]
    pub source_username: Option<String>,

    /// Source password, overriding any in the connection string
    #[arg(long, alias = "sourcePassword", env = "SOURCE_PASSWORD")]
    pub source_password: Option<String>,

    /// Source database name
    #[arg(long, alias = "sourceDatabase", env = "SOURCE_DATABASE")]
    pub source_database: String,

    /// Source collection name
    #[arg(long, alias = "sourceCollName", env = "SOURCE_COLLECTION")]
    pub source_coll_name: String,
}

#[derive(Parser, Clone, Debug)]
pub struct TargetOpts {
    /// Target MongoDB connection string
    #[arg(long, alias = "targetURI", env = "TARGET_URI")]
    pub target_uri: String,

    /// Target username, overriding any in the connection string
    #[arg(long, alias = "targetUsername", env = "TARGET_USERNAME")]
    pub target_username: Option<String>,

    /// Target password, overriding any in the connection string
    #[arg(long, alias = "targetPassword", env = "TARGET_PASSWORD")]
    pub target_password: Option<String>,

    /// Target database name
    #[arg(long, alias = "targetDatabase", env = "TARGET_DATABASE")]
    pub target_database: String,

    /// Target collection name
    #[arg(long, alias = "targetCollName", env = "TARGET_COLLECTION")]
    pub target_coll_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Diagnostics and a summary line
    Text,
    /// The full report as JSON
    Json,
}

/// Where one side of the comparison lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionTarget {
    pub uri: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: String,
    pub collection: String,
}

impl CollectionTarget {
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}

impl From<&SourceOpts> for CollectionTarget {
    fn from(opts: &SourceOpts) -> Self {
        Self {
            uri: opts.source_uri.clone(),
            username: opts.source_username.clone(),
            password: opts.source_password.clone(),
            database: opts.source_database.clone(),
            collection: opts.source_coll_name.clone(),
        }
    }
}

impl From<&TargetOpts> for CollectionTarget {
    fn from(opts: &TargetOpts) -> Self {
        Self {
            uri: opts.target_uri.clone(),
            username: opts.target_username.clone(),
            password: opts.target_password.clone(),
            database: opts.target_database.clone(),
            collection: opts.target_coll_name.clone(),
        }
    }
}

impl CompareOpts {
    /// Builds the engine configuration. Ignored index options extend the
    /// defaults rather than replacing them.
    pub fn validation_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig {
            sample_size: self.random_sample_size,
            first_ids_count: self.first_ids_count,
            last_ids_count: self.last_ids_count,
            ..Default::default()
        };
        config
            .ignored_index_options
            .extend(self.ignore_index_options.iter().cloned());

        let field_order = if self.strict_field_order {
            FieldOrder::Preserve
        } else {
            FieldOrder::Ignore
        };
        let mut comparator = DocumentComparator::new().with_field_order(field_order);
        for field in &self.ignore_fields {
            comparator = comparator.ignore_field(field.clone());
        }
        config.comparator = comparator;

        if self.fail_on_missing_sample {
            config.missing_document_policy = MissingDocumentPolicy::Fatal;
        }
        config
    }
}
