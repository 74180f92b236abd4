//! Client business logic - creating, listing, editing, and removing clients.
//!
//! Clients are referenced weakly: deleting one leaves every booking that
//! mentions it in place, still showing the client name captured at save time.

use crate::{
    entities::{Client, client},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields supplied when creating a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub company: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Retrieves all clients ordered alphabetically by name.
pub async fn get_all_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>> {
    Client::find()
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a client by id.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    client_id: &str,
) -> Result<Option<client::Model>> {
    Client::find_by_id(client_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a client after checking that the name is not blank.
pub async fn create_client(db: &DatabaseConnection, new_client: NewClient) -> Result<client::Model> {
    if new_client.name.trim().is_empty() {
        return Err(Error::invalid_field("name", "Client name cannot be empty"));
    }

    let client = client::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(new_client.name.trim().to_string()),
        company: Set(non_blank(new_client.company)),
        contact_email: Set(non_blank(new_client.contact_email)),
        contact_phone: Set(non_blank(new_client.contact_phone)),
        notes: Set(non_blank(new_client.notes)),
        created_at: Set(chrono::Utc::now()),
    };

    let created = client.insert(db).await?;
    info!("Created client {} ({})", created.name, created.id);
    Ok(created)
}

/// Changes to an existing client. `None` keeps the stored value; a blank
/// string clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
}

/// Applies `changes` to a client.
///
/// Bookings keep the client name they captured when they were saved.
pub async fn update_client(
    db: &DatabaseConnection,
    client_id: &str,
    changes: ClientUpdate,
) -> Result<client::Model> {
    let existing = Client::find_by_id(client_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::ClientNotFound {
            id: client_id.to_string(),
        })?;
    if changes == ClientUpdate::default() {
        return Ok(existing);
    }
    let mut client: client::ActiveModel = existing.into();

    if let Some(name) = changes.name {
        if name.trim().is_empty() {
            return Err(Error::invalid_field("name", "Client name cannot be empty"));
        }
        client.name = Set(name.trim().to_string());
    }
    if let Some(company) = changes.company {
        client.company = Set(non_blank(Some(company)));
    }
    if let Some(email) = changes.contact_email {
        client.contact_email = Set(non_blank(Some(email)));
    }
    if let Some(phone) = changes.contact_phone {
        client.contact_phone = Set(non_blank(Some(phone)));
    }
    if let Some(notes) = changes.notes {
        client.notes = Set(non_blank(Some(notes)));
    }

    let updated = client.update(db).await?;
    info!("Updated client {} ({})", updated.name, updated.id);
    Ok(updated)
}

/// Deletes a client. Bookings that reference it are left untouched.
pub async fn delete_client(db: &DatabaseConnection, client_id: &str) -> Result<()> {
    let result = Client::delete_by_id(client_id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ClientNotFound {
            id: client_id.to_string(),
        });
    }
    info!("Deleted client {client_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_client_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_client(
            &db,
            NewClient {
                name: "   ".to_string(),
                ..Default::default()
            },
        )
        .await;
        let Err(Error::Validation { errors }) = result else {
            panic!("expected a validation error, got {result:?}");
        };
        assert_eq!(errors[0].field, "name");
    }

    #[tokio::test]
    async fn test_clients_are_listed_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_client(&db, "Citra").await?;
        create_test_client(&db, "Ana").await?;
        create_test_client(&db, "Budi").await?;

        let names: Vec<String> = get_all_clients(&db)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Budi", "Citra"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_optional_fields_are_dropped() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_client(
            &db,
            NewClient {
                name: " Ana ".to_string(),
                company: Some("  ".to_string()),
                contact_phone: Some("0812 3456 7890".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(client.name, "Ana");
        assert_eq!(client.company, None);
        assert_eq!(client.contact_phone.as_deref(), Some("0812 3456 7890"));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_client_changes_only_given_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Ana").await?;

        let updated = update_client(
            &db,
            &client.id,
            ClientUpdate {
                contact_phone: Some("0811 2222 3333".to_string()),
                company: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.id, client.id);
        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.contact_phone.as_deref(), Some("0811 2222 3333"));
        assert_eq!(updated.company, None);
        assert_eq!(updated.contact_email, client.contact_email);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_client_rejects_blank_name_and_missing_id() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Ana").await?;

        let blank = update_client(
            &db,
            &client.id,
            ClientUpdate {
                name: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(blank, Err(Error::Validation { .. })));
        assert_eq!(get_client_by_id(&db, &client.id).await?.map(|c| c.name), Some("Ana".to_string()));

        let missing = update_client(&db, "nobody", ClientUpdate::default()).await;
        assert!(matches!(missing, Err(Error::ClientNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_client() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Ana").await?;
        delete_client(&db, &client.id).await?;
        assert!(get_client_by_id(&db, &client.id).await?.is_none());
        assert!(matches!(
            delete_client(&db, &client.id).await,
            Err(Error::ClientNotFound { .. })
        ));
        Ok(())
    }
}
