//! Directory service implementation
//!
//! CRUD over the membership directory: established members and first-time
//! guests. Neither is tracked through a follow-up pipeline.

use tracing::info;

use crate::database::{GuestRepository, MemberRepository};
use crate::models::guest::{CreateGuestRequest, Guest, UpdateGuestRequest};
use crate::models::member::{CreateMemberRequest, Member, UpdateMemberRequest};
use crate::utils::errors::{FlockKeeperError, Result};
use crate::utils::helpers::{clamp_pagination, normalize_phone, require_field, validate_email};

#[derive(Clone)]
pub struct DirectoryService {
    member_repository: MemberRepository,
    guest_repository: GuestRepository,
}

impl DirectoryService {
    pub fn new(member_repository: MemberRepository, guest_repository: GuestRepository) -> Self {
        Self {
            member_repository,
            guest_repository,
        }
    }

    // Members

    pub async fn create_member(
        &self,
        church_id: i64,
        mut request: CreateMemberRequest,
    ) -> Result<Member> {
        require_field("first_name", &request.first_name)?;
        require_field("last_name", &request.last_name)?;
        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        if let Some(phone) = &request.phone {
            request.phone = Some(normalize_phone("phone", phone)?);
        }

        let member = self.member_repository.create(church_id, request).await?;
        info!(church_id = church_id, member_id = member.id, "Member created");
        Ok(member)
    }

    pub async fn get_member(&self, church_id: i64, id: i64) -> Result<Member> {
        self.member_repository
            .find_by_id(church_id, id)
            .await?
            .ok_or(FlockKeeperError::RecordNotFound { entity: "Member", id })
    }

    pub async fn update_member(
        &self,
        church_id: i64,
        id: i64,
        mut request: UpdateMemberRequest,
    ) -> Result<Member> {
        self.get_member(church_id, id).await?;
        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        if let Some(phone) = &request.phone {
            request.phone = Some(normalize_phone("phone", phone)?);
        }

        let member = self.member_repository.update(church_id, id, request).await?;
        info!(church_id = church_id, member_id = id, "Member updated");
        Ok(member)
    }

    pub async fn delete_member(&self, church_id: i64, id: i64) -> Result<()> {
        if !self.member_repository.delete(church_id, id).await? {
            return Err(FlockKeeperError::RecordNotFound { entity: "Member", id });
        }
        info!(church_id = church_id, member_id = id, "Member deleted");
        Ok(())
    }

    pub async fn list_members(
        &self,
        church_id: i64,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Member>> {
        let (limit, offset) = clamp_pagination(limit, offset);
        self.member_repository.list(church_id, search, limit, offset).await
    }

    pub async fn list_all_members(&self, church_id: i64) -> Result<Vec<Member>> {
        self.member_repository.list_all(church_id).await
    }

    // Guests

    pub async fn create_guest(
        &self,
        church_id: i64,
        mut request: CreateGuestRequest,
    ) -> Result<Guest> {
        require_field("first_name", &request.first_name)?;
        require_field("last_name", &request.last_name)?;
        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        if let Some(phone) = &request.phone {
            request.phone = Some(normalize_phone("phone", phone)?);
        }

        let guest = self.guest_repository.create(church_id, request).await?;
        info!(church_id = church_id, guest_id = guest.id, "Guest created");
        Ok(guest)
    }

    pub async fn get_guest(&self, church_id: i64, id: i64) -> Result<Guest> {
        self.guest_repository
            .find_by_id(church_id, id)
            .await?
            .ok_or(FlockKeeperError::RecordNotFound { entity: "Guest", id })
    }

    pub async fn update_guest(
        &self,
        church_id: i64,
        id: i64,
        mut request: UpdateGuestRequest,
    ) -> Result<Guest> {
        self.get_guest(church_id, id).await?;
        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        if let Some(phone) = &request.phone {
            request.phone = Some(normalize_phone("phone", phone)?);
        }

        let guest = self.guest_repository.update(church_id, id, request).await?;
        info!(church_id = church_id, guest_id = id, "Guest updated");
        Ok(guest)
    }

    pub async fn delete_guest(&self, church_id: i64, id: i64) -> Result<()> {
        if !self.guest_repository.delete(church_id, id).await? {
            return Err(FlockKeeperError::RecordNotFound { entity: "Guest", id });
        }
        info!(church_id = church_id, guest_id = id, "Guest deleted");
        Ok(())
    }

    pub async fn list_guests(
        &self,
        church_id: i64,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Guest>> {
        let (limit, offset) = clamp_pagination(limit, offset);
        self.guest_repository.list(church_id, search, limit, offset).await
    }

    pub async fn list_all_guests(&self, church_id: i64) -> Result<Vec<Guest>> {
        self.guest_repository.list_all(church_id).await
    }
}
