use crate::CollectionTarget;
use anyhow::Context;
use mongocompare_engine::MongoCollection;
use mongodb::{
    options::{ClientOptions, Credential},
    Client as MongoClient,
};
use std::time::Duration;

const APP_NAME: &str = "mongocompare";

// Connect to one side of the comparison
pub async fn connect_collection(target: &CollectionTarget) -> anyhow::Result<MongoCollection> {
    tracing::debug!("Parsing MongoDB connection options for {}", target.namespace());
    let mut mongo_options = ClientOptions::parse(&target.uri)
        .await
        .with_context(|| format!("Failed to parse connection string for {}", target.namespace()))?;
    mongo_options.app_name = Some(APP_NAME.to_string());
    // Add connection timeout to prevent hanging
    mongo_options.connect_timeout = Some(Duration::from_secs(10));
    mongo_options.server_selection_timeout = Some(Duration::from_secs(10));
    apply_credentials(&mut mongo_options, target);

    let mongo_client = MongoClient::with_options(mongo_options)
        .with_context(|| format!("Failed to create MongoDB client for {}", target.namespace()))?;
    tracing::debug!("MongoDB client created for {}", target.namespace());

    let database = mongo_client.database(&target.database);
    Ok(MongoCollection::new(database, &target.collection))
}

/// Explicit username and password replace whatever the connection string
/// carried; the auth source and mechanism are left alone.
fn apply_credentials(options: &mut ClientOptions, target: &CollectionTarget) {
    if target.username.is_none() && target.password.is_none() {
        return;
    }
    let credential = options.credential.get_or_insert_with(Credential::default);
    if let Some(username) = &target.username {
        credential.username = Some(username.clone());
    }
    if let Some(password) = &target.password {
        credential.password = Some(password.clone());
    }
}
