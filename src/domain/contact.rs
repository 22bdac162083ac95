use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::errors::ValidationError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // local@domain.tld, no whitespace and a single '@'
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // digits, whitespace, '+', '-', '(' and ')'
    Regex::new(r"^[0-9\s+()\-]+$").expect("phone pattern compiles")
});

const MIN_PHONE_DIGITS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub image_url: String,

    #[serde(default)] // Blobs written before blocking existed have no flag.
    pub blocked: bool,
}

/// Raw values for the editable fields of a contact, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub image_url: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            image_url: image_url.into(),
        }
    }

    /// Trims every field and checks it, returning the trimmed copy.
    ///
    /// Order is fixed: all fields present, then email, phone and image URL.
    /// The first failing check wins.
    pub fn validated(&self) -> Result<ContactFields, ValidationError> {
        let fields = self.trimmed();

        if fields.has_empty_field() {
            return Err(ValidationError::EmptyField);
        }
        if !validate_email(&fields.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !validate_phone(&fields.phone) {
            return Err(ValidationError::InvalidPhone);
        }
        if !validate_image_url(&fields.image_url) {
            return Err(ValidationError::InvalidImageUrl);
        }

        Ok(fields)
    }

    fn trimmed(&self) -> ContactFields {
        ContactFields {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
        }
    }

    fn has_empty_field(&self) -> bool {
        [
            &self.name,
            &self.phone,
            &self.email,
            &self.address,
            &self.image_url,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

impl Contact {
    /// Builds an unblocked contact from already validated fields.
    pub fn new(id: String, fields: ContactFields) -> Self {
        Contact {
            id,
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            address: fields.address,
            image_url: fields.image_url,
            blocked: false,
        }
    }

    /// Replaces the editable fields. `id` and `blocked` are left alone.
    pub fn apply(&mut self, fields: ContactFields) {
        self.name = fields.name;
        self.phone = fields.phone;
        self.email = fields.email;
        self.address = fields.address;
        self.image_url = fields.image_url;
    }

    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// True when all five text fields are non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.fields().has_empty_field()
    }

    pub fn status(&self) -> &'static str {
        if self.blocked { "blocked" } else { "active" }
    }
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    // Must only hold phone characters
    // At least 7 of them must be digits
    PHONE_RE.is_match(phone)
        && phone.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
}

pub fn validate_image_url(image_url: &str) -> bool {
    // Url::parse only accepts absolute URLs
    Url::parse(image_url).is_ok()
}

// TEST
#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> ContactFields {
        ContactFields::new(
            "Ann",
            "123-4567890",
            "a@b.com",
            "1 Rd",
            "https://x.com/i.png",
        )
    }

    #[test]
    fn valid_fields_are_trimmed() {
        let mut fields = ann();
        fields.name = "  Ann  ".to_string();
        fields.address = "\t1 Rd\n".to_string();

        let validated = fields.validated().unwrap();
        assert_eq!(validated.name, "Ann");
        assert_eq!(validated.address, "1 Rd");
    }

    #[test]
    fn empty_field_is_checked_first() {
        let mut fields = ann();
        fields.address = "   ".to_string();
        fields.email = "not-an-email".to_string();

        assert_eq!(fields.validated(), Err(ValidationError::EmptyField));
    }

    #[test]
    fn email_is_checked_before_phone() {
        let mut fields = ann();
        fields.email = "foo@bar".to_string();
        fields.phone = "abc".to_string();

        assert_eq!(fields.validated(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn phone_is_checked_before_image_url() {
        let mut fields = ann();
        fields.phone = "12-34".to_string();
        fields.image_url = "not a url".to_string();

        assert_eq!(fields.validated(), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("first.last@mail.example.org"));
        assert!(!validate_email("foo@bar"));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("a@@b.com"));
        assert!(!validate_email("@b.com"));
    }

    #[test]
    fn phone_validation() {
        assert!(validate_phone("123-4567890"));
        assert!(validate_phone("+44 (20) 7946 0958"));
        assert!(validate_phone("1234567"));
        assert!(!validate_phone("123456")); // Only six digits
        assert!(!validate_phone("+1 (555) 12"));
        assert!(!validate_phone("555-CALL-NOW"));
        assert!(!validate_phone("１２３４５６７")); // Full-width digits are not phone characters
    }

    #[test]
    fn image_url_validation() {
        assert!(validate_image_url("https://x.com/i.png"));
        assert!(validate_image_url("data:image/png;base64,AAAA"));
        assert!(!validate_image_url("/relative/path.png"));
        assert!(!validate_image_url("x.com/i.png"));
    }

    #[test]
    fn apply_keeps_identity_and_block_state() {
        let mut contact = Contact::new("id-1".to_string(), ann());
        contact.blocked = true;

        let mut fields = ann();
        fields.name = "Annie".to_string();
        contact.apply(fields);

        assert_eq!(contact.id, "id-1");
        assert!(contact.blocked);
        assert_eq!(contact.name, "Annie");
    }

    #[test]
    fn serialized_layout_uses_camel_case() {
        let contact = Contact::new("id-1".to_string(), ann());
        let json = serde_json::to_value(&contact).unwrap();

        assert_eq!(json["imageUrl"], "https://x.com/i.png");
        assert_eq!(json["blocked"], false);
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn missing_blocked_flag_reads_as_false() {
        let json = r#"{"id":"k1","name":"Bob","phone":"1234567","email":"b@c.de",
            "address":"Road","imageUrl":"https://x.com/b.png"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();

        assert!(!contact.blocked);
        assert!(contact.is_complete());
    }
}
