//! Messages store
//!
//! Holds the Postgres client used for contact-form submissions. The
//! connection is established once at startup; a failure there is
//! logged and leaves the handle absent, so inserts fail per-request
//! instead of aborting the process.

use crate::config::DatabaseConfig;
use crate::logger;
use std::fmt;
use tokio_postgres::NoTls;

/// A contact-form submission headed for the `messages` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub user: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug)]
pub enum StoreError {
    /// The startup connection never came up
    Unavailable,
    Query(tokio_postgres::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "no database connection"),
            Self::Query(e) => write!(f, "query failed: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

pub struct MessageStore {
    client: Option<tokio_postgres::Client>,
}

impl MessageStore {
    /// Connect to the configured database.
    ///
    /// Connection errors are logged, never fatal; the returned store
    /// then rejects every insert with `StoreError::Unavailable`.
    pub async fn connect(cfg: &DatabaseConfig) -> Self {
        let conn_str = format!(
            "host={} port={} user={} password={} dbname={}",
            cfg.host, cfg.port, cfg.user, cfg.password, cfg.dbname
        );

        match tokio_postgres::connect(&conn_str, NoTls).await {
            Ok((client, connection)) => {
                // The connection object drives the socket; run it
                // until the client is dropped or the link breaks.
                tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        logger::log_error(&format!("Database connection closed: {e}"));
                    }
                });
                Self {
                    client: Some(client),
                }
            }
            Err(e) => {
                logger::log_error(&format!(
                    "Database connect failed ({}:{}/{}): {e}",
                    cfg.host, cfg.port, cfg.dbname
                ));
                Self { client: None }
            }
        }
    }

    /// Store without a backing connection
    #[cfg(test)]
    fn disconnected() -> Self {
        Self { client: None }
    }

    /// Insert one row into the messages table
    pub async fn insert_message(&self, msg: &ContactMessage) -> Result<(), StoreError> {
        let Some(client) = &self.client else {
            return Err(StoreError::Unavailable);
        };

        client
            .execute(
                r#"INSERT INTO messages ("user", name, company, email, phone, message)
                   VALUES ($1, $2, $3, $4, $5, $6)"#,
                &[
                    &msg.user,
                    &msg.name,
                    &msg.company,
                    &msg.email,
                    &msg.phone,
                    &msg.message,
                ],
            )
            .await
            .map_err(StoreError::Query)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disconnected_store_rejects_inserts() {
        let store = MessageStore::disconnected();
        let msg = ContactMessage {
            user: "WWW".to_string(),
            name: "Jane".to_string(),
            company: String::new(),
            email: "j@x.com".to_string(),
            phone: String::new(),
            message: "Hello".to_string(),
        };

        let err = store.insert_message(&msg).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable));
    }
}
