use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Developer,
    Designer,
    Tester,
}

impl Role {
    pub const ALL: [&'static str; 5] = ["Admin", "Manager", "Developer", "Designer", "Tester"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Developer => "Developer",
            Self::Designer => "Designer",
            Self::Tester => "Tester",
        }
    }

    /// Accepts the canonical spelling and any case variant of it.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "developer" => Some(Self::Developer),
            "designer" => Some(Self::Designer),
            "tester" => Some(Self::Tester),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Role::from_str(&s).ok_or_else(|| serde::de::Error::unknown_variant(&s, &Self::ALL))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Job title.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub role: Option<Role>,
}
