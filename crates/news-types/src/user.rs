//! User account types.

use serde::{Deserialize, Serialize};

/// User account snapshot as returned by the backend.
///
/// Replaced wholesale on every successful login/register/update/rehydrate;
/// callers never patch individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Numeric user ID
    pub id: i64,
    /// Account email
    pub email: String,
    /// Login name; also keys the preference set
    pub username: String,
    /// Optional display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Whether the account is active
    pub is_active: bool,
    /// Whether the account has admin rights
    pub is_admin: bool,
    /// Creation timestamp (ISO string, server-issued)
    pub created_at: String,
    /// Last update timestamp (ISO string, server-issued)
    pub updated_at: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: bearer token plus the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserRecord,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// Partial user update; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Password change request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_deserializes_backend_shape() {
        let json = r#"{
            "id": 7,
            "email": "ada@example.com",
            "username": "ada",
            "full_name": "Ada Lovelace",
            "is_active": true,
            "is_admin": false,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-02T00:00:00Z"
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "ada");
        assert_eq!(user.full_name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn user_record_tolerates_missing_full_name() {
        let json = r#"{
            "id": 1,
            "email": "x@example.com",
            "username": "x",
            "is_active": true,
            "is_admin": true,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert!(user.full_name.is_none());
        assert!(user.is_admin);
    }

    #[test]
    fn user_update_skips_absent_fields() {
        let update = UserUpdate {
            full_name: Some("New Name".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"full_name":"New Name"}"#);
    }

    #[test]
    fn login_response_roundtrip() {
        let json = r#"{
            "access_token": "tok-123",
            "token_type": "bearer",
            "user": {
                "id": 2,
                "email": "b@example.com",
                "username": "b",
                "is_active": true,
                "is_admin": false,
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z"
            }
        }"#;

        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "tok-123");
        assert_eq!(resp.user.username, "b");
    }
}
