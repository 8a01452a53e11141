//! DTOs for decoding random-data API responses.
//!
//! The API returns a bare object when one record is requested and an array
//! otherwise. Unknown fields are ignored.

use serde::Deserialize;

use crate::domain::{BankRecord, RecordId, UserRecord};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub(super) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: RecordId,
    pub(super) first_name: String,
    pub(super) last_name: String,
    pub(super) username: String,
    pub(super) email: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct BankDto {
    pub(super) id: RecordId,
    pub(super) bank_name: String,
    pub(super) routing_number: String,
    pub(super) swift_bic: String,
}

impl From<UserDto> for UserRecord {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            username: dto.username,
            email: dto.email,
            bank_id: None,
        }
    }
}

impl From<BankDto> for BankRecord {
    fn from(dto: BankDto) -> Self {
        Self {
            id: dto.id,
            bank_name: dto.bank_name,
            routing_number: dto.routing_number,
            swift_bic: dto.swift_bic,
        }
    }
}
