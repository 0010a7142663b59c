use std::fmt;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    User,
    Model,
}

impl Author {
    pub fn role(&self) -> Role {
        match self {
            Author::User => return Role::User,
            Author::Model => return Role::Model,
        }
    }
}

impl From<Role> for Author {
    fn from(role: Role) -> Author {
        match role {
            Role::User => return Author::User,
            Role::Model => return Author::Model,
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::User => return write!(f, "You"),
            Author::Model => return write!(f, "Career Coach"),
        }
    }
}
