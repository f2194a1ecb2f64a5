use garde::Validate;
use kernel::model::user::event::{
    ActivateAccount, ChangePassword, Credentials, RegisterUser, ResetPassword, UpdateProfile,
};

#[derive(Debug, Validate)]
pub struct LoginForm {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

impl From<LoginForm> for Credentials {
    fn from(value: LoginForm) -> Self {
        let LoginForm { email, password } = value;
        Credentials::new(email, password)
    }
}

#[derive(Debug, Validate)]
pub struct RegisterForm {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 32))]
    pub phone: String,
    #[garde(length(min = 8))]
    pub password: String,
    #[garde(skip)]
    pub password_confirmation: String,
}

impl RegisterForm {
    pub fn passwords_match(&self) -> bool {
        self.password == self.password_confirmation
    }
}

impl From<RegisterForm> for RegisterUser {
    fn from(value: RegisterForm) -> Self {
        let RegisterForm {
            name,
            email,
            phone,
            password,
            password_confirmation: _,
        } = value;
        RegisterUser {
            name,
            email,
            phone,
            password,
        }
    }
}

/// At least one lower-case letter, upper-case letter, digit and symbol.
fn strong_password(value: &str, _: &()) -> garde::Result {
    let has = |pred: fn(&char) -> bool| value.chars().any(|c| pred(&c));
    if has(char::is_ascii_lowercase)
        && has(char::is_ascii_uppercase)
        && has(char::is_ascii_digit)
        && has(|c| !c.is_alphanumeric())
    {
        Ok(())
    } else {
        Err(garde::Error::new(
            "needs lower and upper case letters, a digit and a symbol",
        ))
    }
}

#[derive(Debug, Validate)]
pub struct ChangePasswordForm {
    #[garde(length(min = 1))]
    pub current_password: String,
    #[garde(length(min = 12), custom(strong_password))]
    pub new_password: String,
    #[garde(matches(new_password))]
    pub new_password_confirmation: String,
}

impl From<ChangePasswordForm> for ChangePassword {
    fn from(value: ChangePasswordForm) -> Self {
        ChangePassword::new(value.current_password, value.new_password)
    }
}

#[derive(Debug, Validate)]
pub struct ResetPasswordForm {
    #[garde(length(min = 1))]
    pub token: String,
    #[garde(length(min = 12), custom(strong_password))]
    pub password: String,
    #[garde(matches(password))]
    pub password_confirmation: String,
}

impl From<ResetPasswordForm> for ResetPassword {
    fn from(value: ResetPasswordForm) -> Self {
        ResetPassword::new(value.token, value.password)
    }
}

/// Forgotten passwords and the availability check only need an address.
#[derive(Debug, Validate)]
pub struct EmailForm {
    #[garde(email)]
    pub email: String,
}

#[derive(Debug, Validate)]
pub struct ActivateAccountForm {
    #[garde(length(min = 1))]
    pub token: String,
    #[garde(length(min = 1))]
    pub activation_code: String,
}

impl From<ActivateAccountForm> for ActivateAccount {
    fn from(value: ActivateAccountForm) -> Self {
        ActivateAccount::new(value.token, value.activation_code)
    }
}

#[derive(Debug, Default, Validate)]
pub struct ProfileForm {
    #[garde(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[garde(email)]
    pub email: Option<String>,
    #[garde(length(min = 1, max = 32))]
    pub phone: Option<String>,
}

impl From<ProfileForm> for UpdateProfile {
    fn from(value: ProfileForm) -> Self {
        let ProfileForm { name, email, phone } = value;
        UpdateProfile { name, email, phone }
    }
}
