use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store::{Record, Repository};

pub type UserRepo = Arc<dyn Repository<User>>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Worker,
    Employer,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Worker => f.write_str("worker"),
            UserType::Employer => f.write_str("employer"),
        }
    }
}

/// Identity record. Workers fill the skill/rate fields, employers the company ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub user_type: UserType,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>, // skill ids from the catalog
    pub hourly_rate: Option<String>,
    pub availability: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub company_description: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
}

impl User {
    pub fn new(
        id: String,
        name: String,
        email: String,
        password_hash: String,
        user_type: UserType,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            user_type,
            created_at: OffsetDateTime::now_utc(),
            location: None,
            bio: None,
            skills: Vec::new(),
            hourly_rate: None,
            availability: None,
            company_name: None,
            company_website: None,
            company_description: None,
            company_size: None,
            industry: None,
        }
    }

    pub fn is_worker(&self) -> bool {
        self.user_type == UserType::Worker
    }

    pub fn is_employer(&self) -> bool {
        self.user_type == UserType::Employer
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Profile fields a user may change. Absent fields are left untouched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub hourly_rate: Option<String>,
    pub availability: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub company_description: Option<String>,
}

impl UserUpdate {
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = self.location {
            user.location = Some(location);
        }
        if let Some(skills) = self.skills {
            let mut unique: Vec<String> = Vec::with_capacity(skills.len());
            for skill in skills {
                if !unique.contains(&skill) {
                    unique.push(skill);
                }
            }
            user.skills = unique;
        }
        if let Some(rate) = self.hourly_rate {
            user.hourly_rate = Some(rate);
        }
        if let Some(availability) = self.availability {
            user.availability = Some(availability);
        }
        if let Some(v) = self.company_name {
            user.company_name = Some(v);
        }
        if let Some(v) = self.company_website {
            user.company_website = Some(v);
        }
        if let Some(v) = self.company_description {
            user.company_description = Some(v);
        }
    }
}
