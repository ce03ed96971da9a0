// Client-side form validation
//
// Field-scoped checks that run before any request is sent. A draft that
// fails produces `ValidationErrors`, which the CRUD page keeps on its state
// for inline display rather than toasting.

use std::fmt;

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field failures for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First message recorded for `field`.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ── Checks ───────────────────────────────────────────────────────────

/// Accumulates checks for one form.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.add(field, format!("{} is required", label(field)));
        }
        self
    }

    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !value.trim().is_empty() && !is_email(value.trim()) {
            self.errors.add(field, "Invalid email address");
        }
        self
    }

    pub fn min_len(&mut self, field: &'static str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.errors.add(
                field,
                format!("{} must be at least {min} characters", label(field)),
            );
        }
        self
    }

    pub fn slug(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !value.is_empty() && !is_slug(value) {
            self.errors.add(
                field,
                "Slug may only contain lowercase letters, digits and hyphens",
            );
        }
        self
    }

    /// Optional absolute `http(s)` URL.
    pub fn url(&mut self, field: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            let ok = url::Url::parse(value.trim())
                .is_ok_and(|u| matches!(u.scheme(), "http" | "https"));
            if !ok {
                self.errors.add(field, "Invalid URL");
            }
        }
        self
    }

    /// Number between 0 and 5, e.g. `4.5`.
    pub fn rating(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !value.is_empty() {
            let ok = value
                .trim()
                .parse::<f64>()
                .is_ok_and(|r| (0.0..=5.0).contains(&r));
            if !ok {
                self.errors.add(field, "Rating must be a number between 0 and 5");
            }
        }
        self
    }

    /// Four-digit year.
    pub fn year(&mut self, field: &'static str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() && (value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit())) {
            self.errors.add(field, "Year must be four digits");
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        std::mem::take(&mut self.errors).into_result()
    }
}

fn label(field: &str) -> String {
    let mut chars = field.replace('_', " ").chars().collect::<Vec<_>>();
    if let Some(first) = chars.first_mut() {
        first.make_ascii_uppercase();
    }
    chars.into_iter().collect()
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_slug(value: &str) -> bool {
    !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn collects_every_failure() {
        let err = Validator::new()
            .required("name", "  ")
            .email("email", "not-an-email")
            .min_len("password", "12345", 6)
            .finish()
            .unwrap_err();

        assert_eq!(err.for_field("name"), Some("Name is required"));
        assert_eq!(err.for_field("email"), Some("Invalid email address"));
        assert_eq!(
            err.for_field("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn accepts_valid_input() {
        Validator::new()
            .required("name", "Ana")
            .email("email", "ana@example.com")
            .slug("page_slug", "about-us")
            .rating("rating", "4.5")
            .year("year", "2024")
            .url("live_url", Some("https://example.com"))
            .url("github_url", None)
            .finish()
            .unwrap();
    }

    #[test]
    fn rejects_bad_shapes() {
        let err = Validator::new()
            .slug("page_slug", "About Us")
            .rating("rating", "7")
            .year("year", "24")
            .url("live_url", Some("ftp://x"))
            .finish()
            .unwrap_err();
        assert_eq!(err.iter().count(), 4);
    }
}
