use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishType {
    Product,
    Activity,
}

impl WishType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishType::Product => "product",
            WishType::Activity => "activity",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "product" => Ok(WishType::Product),
            "activity" => Ok(WishType::Activity),
            _ => Err(format!("Invalid wish type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WishStatus {
    Pending,
    Approved,
    Rejected,
}

impl WishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishStatus::Pending => "PENDING",
            WishStatus::Approved => "APPROVED",
            WishStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(WishStatus::Pending),
            "APPROVED" => Ok(WishStatus::Approved),
            "REJECTED" => Ok(WishStatus::Rejected),
            _ => Err(format!("Invalid wish status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WishTransitionError {
    #[error("Only pending wishes can be approved or rejected (wish is {})", .current.as_str())]
    NotPending { current: WishStatus },
}

/// A reward a child asks for, gated by level
#[derive(Debug, Clone, PartialEq)]
pub struct Wish {
    pub id: String,
    pub title: String,
    pub description: String,
    pub wish_type: WishType,
    pub required_level: u8,
    /// Child username
    pub requested_by: String,
    pub status: WishStatus,
    /// Parent username, set on approval
    pub approved_by: Option<String>,
}

impl Wish {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        wish_type: WishType,
        required_level: u8,
        requested_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Self::generate_id(),
            title: title.into(),
            description: description.into(),
            wish_type,
            required_level,
            requested_by: requested_by.into(),
            status: WishStatus::Pending,
            approved_by: None,
        }
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn approve(&mut self, approved_by: impl Into<String>) -> Result<(), WishTransitionError> {
        if self.status != WishStatus::Pending {
            return Err(WishTransitionError::NotPending { current: self.status });
        }
        self.status = WishStatus::Approved;
        self.approved_by = Some(approved_by.into());
        Ok(())
    }

    pub fn reject(&mut self) -> Result<(), WishTransitionError> {
        if self.status != WishStatus::Pending {
            return Err(WishTransitionError::NotPending { current: self.status });
        }
        self.status = WishStatus::Rejected;
        Ok(())
    }

    pub fn is_available_for_level(&self, child_level: u8) -> bool {
        child_level >= self.required_level
    }
}
