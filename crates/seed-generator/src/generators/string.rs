//! String generator and its named sub-generators.

use rand::Rng;
use seed_core::{FieldConfig, SeedValue};

use super::vocabulary::{self, alphanumeric, capitalize, pick};
use super::{pattern, pick_value, uuid, Hint, ValueGenerator};
use crate::error::ConfigError;

/// A domain-specific text generator, selectable by name with
/// `generator: "internet.email"` or inferred from the field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedGenerator {
    Email,
    Url,
    UserName,
    ImageUrl,
    FirstName,
    LastName,
    FullName,
    StreetAddress,
    City,
    Country,
    ZipCode,
    PhoneNumber,
    CompanyName,
    Word,
    Slug,
    Sentence,
    Paragraph,
    Uuid,
    Alphanumeric,
    HexColor,
    CurrencyCode,
}

const NAMES: &[(&str, NamedGenerator)] = &[
    ("internet.email", NamedGenerator::Email),
    ("internet.url", NamedGenerator::Url),
    ("internet.userName", NamedGenerator::UserName),
    ("image.url", NamedGenerator::ImageUrl),
    ("person.firstName", NamedGenerator::FirstName),
    ("person.lastName", NamedGenerator::LastName),
    ("person.fullName", NamedGenerator::FullName),
    ("location.streetAddress", NamedGenerator::StreetAddress),
    ("location.city", NamedGenerator::City),
    ("location.country", NamedGenerator::Country),
    ("location.zipCode", NamedGenerator::ZipCode),
    ("phone.number", NamedGenerator::PhoneNumber),
    ("company.name", NamedGenerator::CompanyName),
    ("lorem.word", NamedGenerator::Word),
    ("lorem.slug", NamedGenerator::Slug),
    ("lorem.sentence", NamedGenerator::Sentence),
    ("lorem.paragraph", NamedGenerator::Paragraph),
    ("string.uuid", NamedGenerator::Uuid),
    ("string.alphanumeric", NamedGenerator::Alphanumeric),
    ("color.hex", NamedGenerator::HexColor),
    ("finance.currencyCode", NamedGenerator::CurrencyCode),
];

impl NamedGenerator {
    /// Look up a generator by its dotted name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, g)| *g)
    }

    /// All dotted names accepted by [`NamedGenerator::from_name`].
    pub fn names() -> impl Iterator<Item = &'static str> {
        NAMES.iter().map(|(n, _)| *n)
    }

    /// Classify a field by its name. Falls back to [`NamedGenerator::Word`].
    pub fn classify(hint: &Hint<'_>) -> Self {
        let name = hint.compact();
        let has = |keys: &[&str]| keys.iter().any(|k| name.contains(k));

        if has(&["email"]) {
            Self::Email
        } else if has(&["username", "login", "handle", "nickname"]) {
            Self::UserName
        } else if has(&["firstname", "givenname", "forename"]) {
            Self::FirstName
        } else if has(&["lastname", "surname", "familyname"]) {
            Self::LastName
        } else if has(&["company", "organization", "organisation", "employer"]) {
            Self::CompanyName
        } else if has(&["avatar", "image", "photo", "picture", "thumbnail"]) {
            Self::ImageUrl
        } else if has(&["url", "website", "homepage", "link"]) {
            Self::Url
        } else if has(&["name", "author"]) {
            Self::FullName
        } else if has(&["address", "street"]) {
            Self::StreetAddress
        } else if has(&["city", "town"]) {
            Self::City
        } else if has(&["country"]) {
            Self::Country
        } else if has(&["zip", "postal", "postcode"]) {
            Self::ZipCode
        } else if has(&["phone", "mobile", "fax"]) {
            Self::PhoneNumber
        } else if has(&["currency"]) {
            Self::CurrencyCode
        } else if has(&["color", "colour"]) {
            Self::HexColor
        } else if has(&["slug"]) {
            Self::Slug
        } else if has(&["title", "subject", "headline", "caption"]) {
            Self::Sentence
        } else if has(&[
            "description",
            "bio",
            "content",
            "body",
            "text",
            "summary",
            "comment",
            "message",
            "note",
        ]) {
            Self::Paragraph
        } else if has(&["uuid", "guid", "token"]) || hint.has_word(&["id"]) {
            Self::Uuid
        } else if has(&["code", "sku", "password", "secret", "hash", "key"]) {
            Self::Alphanumeric
        } else {
            Self::Word
        }
    }

    pub fn generate<R: Rng>(self, rng: &mut R) -> String {
        match self {
            Self::Email => format!(
                "{}.{}{}@{}",
                pick(rng, vocabulary::FIRST_NAMES).to_lowercase(),
                pick(rng, vocabulary::LAST_NAMES).to_lowercase(),
                rng.random_range(1..1000),
                pick(rng, vocabulary::EMAIL_DOMAINS)
            ),
            Self::Url => format!(
                "https://www.{}.{}",
                pick(rng, vocabulary::LAST_NAMES).to_lowercase(),
                pick(rng, vocabulary::TLDS)
            ),
            Self::UserName => format!(
                "{}{}{}",
                pick(rng, vocabulary::FIRST_NAMES).to_lowercase(),
                pick(rng, &["", ".", "_"]),
                rng.random_range(1..10000)
            ),
            Self::ImageUrl => format!(
                "https://picsum.photos/seed/{}/640/480",
                alphanumeric(rng, 8)
            ),
            Self::FirstName => pick(rng, vocabulary::FIRST_NAMES).to_string(),
            Self::LastName => pick(rng, vocabulary::LAST_NAMES).to_string(),
            Self::FullName => format!(
                "{} {}",
                pick(rng, vocabulary::FIRST_NAMES),
                pick(rng, vocabulary::LAST_NAMES)
            ),
            Self::StreetAddress => format!(
                "{} {} {}",
                rng.random_range(1..10000),
                pick(rng, vocabulary::STREET_NAMES),
                pick(rng, vocabulary::STREET_SUFFIXES)
            ),
            Self::City => pick(rng, vocabulary::CITIES).to_string(),
            Self::Country => pick(rng, vocabulary::COUNTRIES).to_string(),
            Self::ZipCode => format!("{:05}", rng.random_range(0..100_000)),
            Self::PhoneNumber => format!(
                "+1-{}-{}-{:04}",
                rng.random_range(200..1000),
                rng.random_range(200..1000),
                rng.random_range(0..10_000)
            ),
            Self::CompanyName => format!(
                "{} {}",
                pick(rng, vocabulary::LAST_NAMES),
                pick(rng, vocabulary::COMPANY_SUFFIXES)
            ),
            Self::Word => pick(rng, vocabulary::LOREM_WORDS).to_string(),
            Self::Slug => {
                let count = rng.random_range(2..=4);
                let words: Vec<&str> = (0..count)
                    .map(|_| pick(rng, vocabulary::LOREM_WORDS))
                    .collect();
                words.join("-")
            }
            Self::Sentence => sentence(rng),
            Self::Paragraph => {
                let count = rng.random_range(3..=5);
                let sentences: Vec<String> = (0..count).map(|_| sentence(rng)).collect();
                sentences.join(" ")
            }
            Self::Uuid => uuid::generate_uuid_v4(rng).to_string(),
            Self::Alphanumeric => alphanumeric(rng, 10),
            Self::HexColor => format!("#{:06x}", rng.random_range(0..0x0100_0000u32)),
            Self::CurrencyCode => pick(rng, vocabulary::CURRENCY_CODES).to_string(),
        }
    }
}

fn sentence<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(4..=10);
    let words: Vec<&str> = (0..count)
        .map(|_| pick(rng, vocabulary::LOREM_WORDS))
        .collect();
    format!("{}.", capitalize(&words.join(" ")))
}

/// Text generator.
///
/// Resolution order: `pattern`, then explicit `values`, then the named
/// `generator`, then classification of the field name. Never returns an
/// empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringGenerator;

impl ValueGenerator for StringGenerator {
    fn generate<R: Rng>(
        &self,
        rng: &mut R,
        hint: &Hint<'_>,
        config: &FieldConfig,
    ) -> Result<SeedValue, ConfigError> {
        if let Some(p) = &config.pattern {
            let value = pattern::generate_pattern(p, rng, hint.index);
            if !value.is_empty() {
                return Ok(SeedValue::String(value));
            }
        }

        if let Some(value) = pick_value(rng, config) {
            return Ok(value);
        }

        let named = match &config.generator {
            Some(name) => {
                NamedGenerator::from_name(name).ok_or_else(|| ConfigError::UnknownGenerator {
                    field: hint.field.to_string(),
                    generator: name.clone(),
                })?
            }
            None => NamedGenerator::classify(hint),
        };

        Ok(SeedValue::String(named.generate(rng)))
    }
}
