use crate::models::{Event, GalleryItem, Partner, Post, Project, TeamMember};
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for content-service");

        // Public event listings query by published flag and start date.
        let event_index = IndexModel::builder()
            .keys(doc! { "published": 1, "starts_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("published_starts_at".to_string())
                    .build(),
            )
            .build();
        self.events()
            .create_index(event_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create index on events collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on events.(published, starts_at)");

        // Public newsletter queries by status and publication date.
        let post_index = IndexModel::builder()
            .keys(doc! { "status": 1, "published_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("status_published_at".to_string())
                    .build(),
            )
            .build();
        self.posts()
            .create_index(post_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create index on posts collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on posts.(status, published_at)");

        // Gallery pages query by published flag and capture date.
        let gallery_index = IndexModel::builder()
            .keys(doc! { "published": 1, "taken_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("published_taken_at".to_string())
                    .build(),
            )
            .build();
        self.gallery_items()
            .create_index(gallery_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create index on gallery collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on gallery_items.(published, taken_at)");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn events(&self) -> Collection<Event> {
        self.db.collection("events")
    }

    pub fn posts(&self) -> Collection<Post> {
        self.db.collection("posts")
    }

    pub fn projects(&self) -> Collection<Project> {
        self.db.collection("projects")
    }

    pub fn partners(&self) -> Collection<Partner> {
        self.db.collection("partners")
    }

    pub fn team_members(&self) -> Collection<TeamMember> {
        self.db.collection("team_members")
    }

    pub fn gallery_items(&self) -> Collection<GalleryItem> {
        self.db.collection("gallery_items")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires running MongoDB
    async fn test_connect_and_ping() {
        let db = MongoDb::connect("mongodb://localhost:27017", "association_cms_test")
            .await
            .unwrap();
        db.health_check().await.unwrap();
    }
}
