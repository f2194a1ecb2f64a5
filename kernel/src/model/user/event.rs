use derive_new::new;

#[derive(Debug, new)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, new)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, new)]
pub struct ResetPassword {
    pub token: String,
    pub password: String,
}

#[derive(Debug, new)]
pub struct ActivateAccount {
    pub token: String,
    pub activation_code: String,
}

/// Only the fields that are `Some` are sent.
#[derive(Debug, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}
