//! Crew business logic - crew members and their availability.

use crate::{
    entities::{CrewMember, crew_member},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Availability of a crew member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrewStatus {
    #[default]
    Available,
    OnDuty,
    OnLeave,
}

impl CrewStatus {
    /// Stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OnDuty => "OnDuty",
            Self::OnLeave => "OnLeave",
        }
    }

    /// Parses a stored label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Available" => Some(Self::Available),
            "OnDuty" => Some(Self::OnDuty),
            "OnLeave" => Some(Self::OnLeave),
            _ => None,
        }
    }
}

impl fmt::Display for CrewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Available => "Available",
            Self::OnDuty => "On Duty",
            Self::OnLeave => "On Leave",
        })
    }
}

/// Retrieves all crew members ordered alphabetically by name.
pub async fn get_all_crew(db: &DatabaseConnection) -> Result<Vec<crew_member::Model>> {
    CrewMember::find()
        .order_by_asc(crew_member::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a crew member by id.
pub async fn get_crew_member_by_id(
    db: &DatabaseConnection,
    crew_id: &str,
) -> Result<Option<crew_member::Model>> {
    CrewMember::find_by_id(crew_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a crew member; new members start out available unless told otherwise.
pub async fn create_crew_member(
    db: &DatabaseConnection,
    name: String,
    role: String,
    status: CrewStatus,
) -> Result<crew_member::Model> {
    if name.trim().is_empty() {
        return Err(Error::invalid_field("name", "Crew member name cannot be empty"));
    }

    let member = crew_member::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.trim().to_string()),
        role: Set(role.trim().to_string()),
        status: Set(status.as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    let created = member.insert(db).await?;
    info!("Created crew member {} ({})", created.name, created.id);
    Ok(created)
}

/// Changes to an existing crew member. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrewUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub status: Option<CrewStatus>,
}

/// Applies `changes` to a crew member.
pub async fn update_crew_member(
    db: &DatabaseConnection,
    crew_id: &str,
    changes: CrewUpdate,
) -> Result<crew_member::Model> {
    let existing = CrewMember::find_by_id(crew_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::CrewMemberNotFound {
            id: crew_id.to_string(),
        })?;
    if changes == CrewUpdate::default() {
        return Ok(existing);
    }

    let mut member: crew_member::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        if name.trim().is_empty() {
            return Err(Error::invalid_field("name", "Crew member name cannot be empty"));
        }
        member.name = Set(name.trim().to_string());
    }
    if let Some(role) = changes.role {
        member.role = Set(role.trim().to_string());
    }
    if let Some(status) = changes.status {
        member.status = Set(status.as_str().to_string());
    }

    let updated = member.update(db).await?;
    info!("Updated crew member {} ({})", updated.name, updated.id);
    Ok(updated)
}

/// Deletes a crew member. Bookings keep the stale id in their crew set.
pub async fn delete_crew_member(db: &DatabaseConnection, crew_id: &str) -> Result<()> {
    let result = CrewMember::delete_by_id(crew_id.to_string())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::CrewMemberNotFound {
            id: crew_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_crew_defaults_and_status_change() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_crew(&db, "Dewi").await?;
        assert_eq!(CrewStatus::parse(&member.status), Some(CrewStatus::Available));

        let updated = update_crew_member(
            &db,
            &member.id,
            CrewUpdate {
                status: Some(CrewStatus::OnLeave),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.status, "OnLeave");
        assert_eq!(updated.name, "Dewi");
        assert_eq!(updated.role, "Technician");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_crew_name_and_role() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_crew(&db, "Dewi").await?;

        let updated = update_crew_member(
            &db,
            &member.id,
            CrewUpdate {
                name: Some(" Dewi Lestari ".to_string()),
                role: Some("Lighting".to_string()),
                status: None,
            },
        )
        .await?;
        assert_eq!(updated.name, "Dewi Lestari");
        assert_eq!(updated.role, "Lighting");
        assert_eq!(updated.status, member.status);

        let blank = update_crew_member(
            &db,
            &member.id,
            CrewUpdate {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(blank, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_crew_member() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_crew_member(
            &db,
            "nobody",
            CrewUpdate {
                status: Some(CrewStatus::OnDuty),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::CrewMemberNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_crew_listed_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_crew(&db, "Joko").await?;
        create_test_crew(&db, "Eka").await?;
        let crew = get_all_crew(&db).await?;
        assert_eq!(crew[0].name, "Eka");
        assert_eq!(crew[1].name, "Joko");

        delete_crew_member(&db, &crew[0].id).await?;
        assert!(get_crew_member_by_id(&db, &crew[0].id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_crew_name_is_a_validation_error() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_crew_member(&db, " ".into(), "Rigger".into(), CrewStatus::Available).await;
        assert_eq!(result.map_err(|e| e.kind()).err(), Some(crate::errors::ErrorKind::Validation));
        Ok(())
    }

    #[test]
    fn test_crew_status_display() {
        assert_eq!(CrewStatus::OnDuty.to_string(), "On Duty");
        assert_eq!(CrewStatus::parse("Retired"), None);
    }
}
