use serde::{Deserialize, Serialize};

use crate::options::{DEFAULT_CITY, DEFAULT_DISTRICT, OCCUPATIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Other]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// One input of the login/register form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthField {
    Username,
    Password,
    Email,
    FullName,
    Gender,
    GenderOther,
    City,
    District,
    Birthdate,
    Occupation,
}

impl AuthField {
    /// Fields rendered in both modes.
    pub const CORE: &'static [AuthField] = &[AuthField::Username, AuthField::Password];

    /// Extra fields rendered only when registering, in form order.
    pub const REGISTER_ONLY: &'static [AuthField] = &[
        AuthField::Email,
        AuthField::FullName,
        AuthField::Gender,
        AuthField::GenderOther,
        AuthField::Birthdate,
        AuthField::City,
        AuthField::District,
        AuthField::Occupation,
    ];

    /// Wire name, as the backend expects it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Email => "email",
            Self::FullName => "fullName",
            Self::Gender => "gender",
            Self::GenderOther => "genderOther",
            Self::City => "city",
            Self::District => "district",
            Self::Birthdate => "birthdate",
            Self::Occupation => "occupation",
        }
    }
}

/// Shared field record behind the login and register views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFields {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    pub gender: Gender,
    pub gender_other: String,
    pub city: String,
    pub district: String,
    pub birthdate: String,
    pub occupation: String,
}

impl Default for AuthFields {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            email: String::new(),
            full_name: String::new(),
            gender: Gender::default(),
            gender_other: String::new(),
            city: DEFAULT_CITY.to_string(),
            district: DEFAULT_DISTRICT.to_string(),
            birthdate: String::new(),
            occupation: OCCUPATIONS[0].to_string(),
        }
    }
}

impl AuthFields {
    /// Plain merge of a single field. An unrecognised gender is ignored and
    /// reported with `false`.
    pub fn set(
        &mut self,
        field: AuthField,
        value: &str,
    ) -> bool {
        let slot = match field {
            AuthField::Gender => {
                return match Gender::parse(value) {
                    Some(gender) => {
                        self.gender = gender;
                        true
                    }
                    None => false,
                };
            }
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
            AuthField::Email => &mut self.email,
            AuthField::FullName => &mut self.full_name,
            AuthField::GenderOther => &mut self.gender_other,
            AuthField::City => &mut self.city,
            AuthField::District => &mut self.district,
            AuthField::Birthdate => &mut self.birthdate,
            AuthField::Occupation => &mut self.occupation,
        };
        *slot = value.to_string();
        true
    }

    pub fn get(
        &self,
        field: AuthField,
    ) -> &str {
        match field {
            AuthField::Username => &self.username,
            AuthField::Password => &self.password,
            AuthField::Email => &self.email,
            AuthField::FullName => &self.full_name,
            AuthField::Gender => self.gender.as_str(),
            AuthField::GenderOther => &self.gender_other,
            AuthField::City => &self.city,
            AuthField::District => &self.district,
            AuthField::Birthdate => &self.birthdate,
            AuthField::Occupation => &self.occupation,
        }
    }
}
