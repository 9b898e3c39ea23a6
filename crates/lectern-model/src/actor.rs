use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Something a user may do. Granted through the user's [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    Enroll,
    CompleteLessons,
    SubmitQuiz,
    Review,
    AuthorCourses,
    ViewCourseStatistics,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    Student,
    Instructor,
}

impl Role {
    #[must_use]
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Student => &[
                Capability::Enroll,
                Capability::CompleteLessons,
                Capability::SubmitQuiz,
                Capability::Review,
            ],
            Self::Instructor => &[Capability::AuthorCourses, Capability::ViewCourseStatistics],
        }
    }

    #[must_use]
    pub fn has(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// The user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

/// Returned by [`Actor::require`] when the role does not grant the capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingCapability {
    pub role: Role,
    pub capability: Capability,
}

impl Actor {
    #[must_use]
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.role.has(capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), MissingCapability> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(MissingCapability {
                role: self.role,
                capability,
            })
        }
    }
}
