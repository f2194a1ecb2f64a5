use kernel::model::{
    id::UserId,
    role::Role,
    session::Session,
    user::{
        event::{ActivateAccount, ChangePassword, RegisterUser, ResetPassword, UpdateProfile},
        User, UserStatus,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UserRow {
    pub uuid: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub status: Option<UserStatus>,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        let UserRow {
            uuid,
            name,
            email,
            phone,
            role,
            status,
        } = value;
        User {
            id: uuid,
            name,
            email,
            phone,
            role: role.unwrap_or_default(),
            status: status.unwrap_or_default(),
        }
    }
}

/// `GET /api/user` answers with the bare user or with an envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UserPayload {
    Wrapped { data: UserRow },
    Bare(UserRow),
}

impl From<UserPayload> for User {
    fn from(value: UserPayload) -> Self {
        match value {
            UserPayload::Wrapped { data } | UserPayload::Bare(data) => data.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserRow>,
}

/// Login responses put the token either at the top level or under `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginPayload {
    Flat(TokenData),
    Wrapped { data: TokenData },
}

impl From<LoginPayload> for Session {
    fn from(value: LoginPayload) -> Self {
        let (LoginPayload::Flat(data) | LoginPayload::Wrapped { data }) = value;
        Session {
            token: data.access_token,
            user: data.user.map(User::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub phone: String,
}

impl From<RegisterUser> for RegisterBody {
    fn from(value: RegisterUser) -> Self {
        let RegisterUser {
            name,
            email,
            phone,
            password,
        } = value;
        Self {
            name,
            email,
            password_confirmation: password.clone(),
            password,
            phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordBody {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

impl From<ChangePassword> for ChangePasswordBody {
    fn from(value: ChangePassword) -> Self {
        let ChangePassword {
            current_password,
            new_password,
        } = value;
        Self {
            current_password,
            new_password_confirmation: new_password.clone(),
            new_password,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmailBody<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordBody {
    pub token: String,
    pub password: String,
}

impl From<ResetPassword> for ResetPasswordBody {
    fn from(value: ResetPassword) -> Self {
        let ResetPassword { token, password } = value;
        Self { token, password }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivateBody {
    pub token: String,
    pub activation_code: String,
}

impl From<ActivateAccount> for ActivateBody {
    fn from(value: ActivateAccount) -> Self {
        let ActivateAccount {
            token,
            activation_code,
        } = value;
        Self {
            token,
            activation_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<UpdateProfile> for ProfileBody {
    fn from(value: UpdateProfile) -> Self {
        let UpdateProfile { name, email, phone } = value;
        Self { name, email, phone }
    }
}

/// `POST /api/auth/check-email` answers `{ "available": bool }`, sometimes
/// inside a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EmailAvailability {
    Flat { available: bool },
    Wrapped { data: AvailableFlag },
}

#[derive(Debug, Deserialize)]
pub struct AvailableFlag {
    pub available: bool,
}

impl EmailAvailability {
    pub fn is_available(&self) -> bool {
        match self {
            EmailAvailability::Flat { available }
            | EmailAvailability::Wrapped {
                data: AvailableFlag { available },
            } => *available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({
            "uuid": "7f1c2a44-2d7b-4a51-9a59-6f1f8f3b2c10",
            "name": "Ana",
            "email": "ana@example.com",
            "phone": "555-0101",
            "role": "admin",
            "status": "active",
            "created_at": "2025-01-01T00:00:00Z"
        })
    }

    #[test]
    fn token_at_top_level_or_under_data() {
        let flat: LoginPayload = serde_json::from_value(json!({
            "access_token": "abc", "token_type": "bearer", "expires_in": 3600
        }))
        .unwrap();
        let wrapped: LoginPayload = serde_json::from_value(json!({
            "status": "success",
            "data": { "access_token": "abc", "user": user_json() }
        }))
        .unwrap();

        let flat = Session::from(flat);
        assert_eq!(flat.token, "abc");
        assert!(flat.user.is_none());

        let wrapped = Session::from(wrapped);
        assert_eq!(wrapped.token, "abc");
        assert!(wrapped.user.unwrap().is_admin());
    }

    #[test]
    fn current_user_with_or_without_envelope() {
        let bare: UserPayload = serde_json::from_value(user_json()).unwrap();
        let wrapped: UserPayload = serde_json::from_value(json!({ "data": user_json() })).unwrap();
        assert_eq!(User::from(bare), User::from(wrapped));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut raw = user_json();
        raw["role"] = json!("superuser");
        assert!(serde_json::from_value::<UserRow>(raw).is_err());
    }

    #[test]
    fn profile_update_sends_only_changed_fields() {
        let body = ProfileBody::from(UpdateProfile {
            phone: Some("555-0199".into()),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "phone": "555-0199" })
        );
    }

    #[test]
    fn password_change_repeats_the_confirmation() {
        let body = ChangePasswordBody::from(ChangePassword::new("old".into(), "N3w-pass!word".into()));
        let raw = serde_json::to_value(body).unwrap();
        assert_eq!(raw["new_password_confirmation"], raw["new_password"]);
        assert_eq!(raw["current_password"], "old");
    }

    #[test]
    fn email_availability_with_or_without_envelope() {
        let flat: EmailAvailability =
            serde_json::from_value(json!({ "available": false })).unwrap();
        let wrapped: EmailAvailability =
            serde_json::from_value(json!({ "data": { "available": true } })).unwrap();
        assert!(!flat.is_available());
        assert!(wrapped.is_available());
        assert!(serde_json::from_value::<EmailAvailability>(json!({})).is_err());
    }
}
