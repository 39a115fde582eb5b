//! Tests for the Gravatar source.

use std::collections::HashMap;

use super::*;
use crate::person::PersonRecord;

const FOO_DIGEST: &str = "f3ada405ce890b6f8204094deb12d8a8";

fn foo() -> PersonRecord {
    PersonRecord::new("Foo@Bar.com")
}

fn url_for(source: &GravatarSource, person: &dyn Person, options: AvatarOptions) -> String {
    source
        .avatar_url_for(Some(person), &options)
        .unwrap()
        .expect("expected an avatar url")
}

/// Answers with a per-person default derived from the name field.
#[derive(Debug)]
struct NamedDefault;

impl AvatarSource for NamedDefault {
    fn avatar_url_for(
        &self,
        person: Option<&dyn Person>,
        _options: &AvatarOptions,
    ) -> Result<Option<String>> {
        Ok(person
            .and_then(|p| p.field("name"))
            .map(|name| format!("https://example.com/{name}.png")))
    }
}

#[derive(Debug)]
struct FailingDefault;

impl AvatarSource for FailingDefault {
    fn avatar_url_for(
        &self,
        _person: Option<&dyn Person>,
        _options: &AvatarOptions,
    ) -> Result<Option<String>> {
        Err(AvatarError::config("default source unavailable"))
    }
}

mod url_tests {
    use super::*;

    #[test]
    fn no_options_yields_bare_url() {
        let source = GravatarSource::default();
        let url = url_for(&source, &foo(), AvatarOptions::new());
        assert_eq!(url, format!("http://www.gravatar.com/avatar/{FOO_DIGEST}"));
    }

    #[test]
    fn email_case_does_not_matter() {
        let source = GravatarSource::default();
        let upper = url_for(&source, &PersonRecord::new("FOO@BAR.COM"), AvatarOptions::new());
        let lower = url_for(&source, &PersonRecord::new("foo@bar.com"), AvatarOptions::new());
        assert_eq!(upper, lower);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let source = GravatarSource::default();
        let url = url_for(&source, &PersonRecord::new("  foo@bar.com\n"), AvatarOptions::new());
        assert!(url.ends_with(FOO_DIGEST));
    }

    #[test]
    fn all_params_in_order() {
        let source = GravatarSource::default();
        let options = AvatarOptions::new()
            .with_default("identicon")
            .with_rating("PG")
            .with_size(80);

        let url = url_for(&source, &foo(), options);
        assert_eq!(
            url,
            format!(
                "http://www.gravatar.com/avatar/{FOO_DIGEST}?size=80&rating=PG&default=identicon"
            )
        );
    }

    #[test]
    fn default_url_is_last_and_verbatim() {
        let source = GravatarSource::new("http://example.com/d.png?x=1", DEFAULT_FIELD);
        let options = AvatarOptions::new().with_size(40);

        let url = url_for(&source, &foo(), options);
        assert!(url.ends_with("?size=40&default=http://example.com/d.png?x=1"));
    }

    #[test]
    fn rating_alone_uses_question_mark() {
        let source = GravatarSource::default();
        let options = AvatarOptions {
            r: Some("X".into()),
            ..Default::default()
        };
        let url = url_for(&source, &foo(), options);
        assert!(url.ends_with(&format!("{FOO_DIGEST}?rating=X")));
    }

    #[test]
    fn custom_field() {
        let source = GravatarSource::default();
        let person = PersonRecord::new("foo@bar.com").with_name("ada");
        let url = url_for(&source, &person, AvatarOptions::new().with_field("name"));
        assert!(url.ends_with("8c8d357b5e872bbacd45197626bd5759"));
    }

    #[test]
    fn constructor_field_is_used() {
        let source = GravatarSource::new(None::<String>, "login");
        let mut person = HashMap::new();
        person.insert("login".to_string(), "ADA".to_string());

        let url = url_for(&source, &person, AvatarOptions::new());
        assert!(url.ends_with("8c8d357b5e872bbacd45197626bd5759"));
    }

    #[test]
    fn works_as_avatar_source() {
        let source: &dyn AvatarSource = &GravatarSource::default();
        let person = foo();
        let url = source
            .avatar_url_for(Some(&person), &AvatarOptions::new())
            .unwrap();
        assert!(url.unwrap().starts_with(GravatarSource::BASE_URL));
    }
}

mod no_avatar_tests {
    use super::*;

    #[test]
    fn absent_person_is_none() {
        let source = GravatarSource::default();
        let options = AvatarOptions::new().with_size(80).with_default("bogus value");
        assert_eq!(source.avatar_url_for(None, &options).unwrap(), None);
    }

    #[test]
    fn absent_person_skips_default_source() {
        let source = GravatarSource::default().with_default_source(DefaultSource::custom(FailingDefault));
        assert_eq!(source.avatar_url_for(None, &AvatarOptions::new()).unwrap(), None);
    }

    #[test]
    fn missing_email_is_none() {
        let source = GravatarSource::default();
        let person = PersonRecord::anonymous();
        assert_eq!(
            source
                .avatar_url_for(Some(&person), &AvatarOptions::new())
                .unwrap(),
            None
        );
    }

    #[test]
    fn blank_email_is_none() {
        let source = GravatarSource::default();
        let person = PersonRecord::new("   ");
        assert_eq!(
            source
                .avatar_url_for(Some(&person), &AvatarOptions::new())
                .unwrap(),
            None
        );
    }

    #[test]
    fn unknown_field_is_none() {
        let source = GravatarSource::default();
        let options = AvatarOptions::new().with_field("nickname");
        assert_eq!(source.avatar_url_for(Some(&foo()), &options).unwrap(), None);
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn missing_field_is_an_error() {
        let mut source = GravatarSource::default();
        source.set_default_field(None);

        let err = source
            .avatar_url_for(Some(&foo()), &AvatarOptions::new())
            .unwrap_err();
        assert_eq!(err, AvatarError::MissingField);
    }

    #[test]
    fn request_field_satisfies_missing_default() {
        let mut source = GravatarSource::default();
        source.set_default_field(None);

        let url = url_for(&source, &foo(), AvatarOptions::new().with_field("email"));
        assert!(url.ends_with(FOO_DIGEST));
    }

    #[test]
    fn invalid_default_keyword_is_fatal() {
        let source = GravatarSource::default();
        let err = source
            .avatar_url_for(Some(&foo()), &AvatarOptions::new().with_default("blank"))
            .unwrap_err();
        assert_eq!(
            err,
            AvatarError::InvalidDefaultValue {
                value: "blank".to_string()
            }
        );
    }

    #[test]
    fn invalid_default_from_source_is_fatal() {
        let source = GravatarSource::new("ftp://example.com/d.png", DEFAULT_FIELD);
        let err = source
            .avatar_url_for(Some(&foo()), &AvatarOptions::new())
            .unwrap_err();
        assert!(matches!(err, AvatarError::InvalidDefaultValue { .. }));
        assert!(err.to_string().contains("ftp://example.com/d.png"));
    }

    #[test]
    fn default_source_errors_propagate() {
        let source = GravatarSource::default().with_default_source(DefaultSource::custom(FailingDefault));
        let err = source
            .avatar_url_for(Some(&foo()), &AvatarOptions::new())
            .unwrap_err();
        assert!(matches!(err, AvatarError::Config { .. }));
    }

    #[test]
    fn explicit_default_url_bypasses_failing_source() {
        let source = GravatarSource::default().with_default_source(DefaultSource::custom(FailingDefault));
        let options = AvatarOptions::new().with_default_url("https://example.com/x.png");
        let url = url_for(&source, &foo(), options);
        assert!(url.ends_with("?default=https://example.com/x.png"));
    }
}

mod resolve_options_tests {
    use super::*;

    fn resolve(source: &GravatarSource, options: AvatarOptions) -> ResolvedOptions {
        source.resolve_options(Some(&foo()), &options).unwrap()
    }

    #[test]
    fn field_precedence() {
        let source = GravatarSource::default();
        assert_eq!(
            resolve(&source, AvatarOptions::new()).field.as_deref(),
            Some("email")
        );
        assert_eq!(
            resolve(&source, AvatarOptions::new().with_field("name"))
                .field
                .as_deref(),
            Some("name")
        );
    }

    #[test]
    fn field_is_not_checked_against_person() {
        let source = GravatarSource::default();
        let resolved = resolve(&source, AvatarOptions::new().with_field("shoe_size"));
        assert_eq!(resolved.field.as_deref(), Some("shoe_size"));
    }

    #[test]
    fn default_precedence() {
        let source = GravatarSource::new("http://site.example/default.png", DEFAULT_FIELD);
        let options = AvatarOptions {
            d: Some("mm".to_string()),
            default: Some("retro".to_string()),
            ..Default::default()
        };

        // default source beats d and default
        assert_eq!(
            resolve(&source, options.clone()).default.as_deref(),
            Some("http://site.example/default.png")
        );

        // explicit default URL beats everything
        let explicit = options.clone().with_default_url("https://other.example/x.png");
        assert_eq!(
            resolve(&source, explicit).default.as_deref(),
            Some("https://other.example/x.png")
        );

        // without a default source, d beats default
        let plain = GravatarSource::default();
        assert_eq!(resolve(&plain, options).default.as_deref(), Some("mm"));
    }

    #[test]
    fn default_falls_back_to_default_key() {
        let source = GravatarSource::default();
        let resolved = resolve(&source, AvatarOptions::new().with_default("wavatar"));
        assert_eq!(resolved.default.as_deref(), Some("wavatar"));
    }

    #[test]
    fn no_default_anywhere() {
        let source = GravatarSource::default();
        assert_eq!(resolve(&source, AvatarOptions::new()).default, None);
    }

    #[test]
    fn per_person_default_source() {
        let source = GravatarSource::default().with_default_source(DefaultSource::custom(NamedDefault));
        let person = PersonRecord::new("a@b.com").with_name("ada");
        let resolved = source
            .resolve_options(Some(&person), &AvatarOptions::new())
            .unwrap();
        assert_eq!(resolved.default.as_deref(), Some("https://example.com/ada.png"));
    }

    #[test]
    fn string_default_matches_static_source() {
        let from_string = GravatarSource::new("http://site.example/d.png", DEFAULT_FIELD);
        let from_source = GravatarSource::default().with_default_source(DefaultSource::custom(
            crate::source::StaticUrlSource::new("http://site.example/d.png"),
        ));
        let options = AvatarOptions::new().with_size(20);

        assert_eq!(
            from_string.avatar_url_for(Some(&foo()), &options).unwrap(),
            from_source.avatar_url_for(Some(&foo()), &options).unwrap()
        );
    }

    #[test]
    fn absent_default_matches_null_source() {
        let absent = GravatarSource::new(None::<String>, DEFAULT_FIELD);
        let null = GravatarSource::default()
            .with_default_source(DefaultSource::custom(crate::source::NullSource));
        let options = AvatarOptions::new().with_default("mm");

        assert_eq!(
            absent.avatar_url_for(Some(&foo()), &options).unwrap(),
            null.avatar_url_for(Some(&foo()), &options).unwrap()
        );
    }

    #[test]
    fn size_precedence_and_coercion() {
        let source = GravatarSource::default();
        let options = AvatarOptions {
            gravatar_size: Some("120".into()),
            size: Some(80.into()),
            s: Some(40.into()),
            ..Default::default()
        };
        assert_eq!(resolve(&source, options).size, Some(120));

        let options = AvatarOptions {
            s: Some("64px".into()),
            ..Default::default()
        };
        assert_eq!(resolve(&source, options).size, Some(64));
    }

    #[test]
    fn non_positive_or_non_numeric_size_is_omitted() {
        let source = GravatarSource::default();
        for size in [OptionValue::from(0), (-10).into(), "huge".into(), "".into()] {
            let resolved = resolve(&source, AvatarOptions::new().with_size(size.clone()));
            assert_eq!(resolved.size, None, "size {size:?} should be omitted");
        }

        let url = url_for(&source, &foo(), AvatarOptions::new().with_size(0));
        assert!(!url.contains("size="));
    }

    #[test]
    fn first_present_size_wins_even_when_invalid() {
        let source = GravatarSource::default();
        let options = AvatarOptions {
            gravatar_size: Some("none".into()),
            size: Some(80.into()),
            ..Default::default()
        };
        assert_eq!(resolve(&source, options).size, None);
    }

    #[test]
    fn rating_precedence_and_validation() {
        let source = GravatarSource::default();
        let options = AvatarOptions {
            gravatar_rating: Some("R".into()),
            rating: Some("G".into()),
            r: Some("X".into()),
            ..Default::default()
        };
        assert_eq!(resolve(&source, options).rating, Some(Rating::R));

        assert_eq!(
            resolve(&source, AvatarOptions::new().with_rating("any")).rating,
            Some(Rating::Any)
        );
        assert_eq!(
            resolve(&source, AvatarOptions::new().with_rating("pg")).rating,
            None
        );
        assert_eq!(
            resolve(&source, AvatarOptions::new().with_rating("NC-17")).rating,
            None
        );
    }
}

mod validation_tests {
    use super::*;

    #[test]
    fn default_urls() {
        assert!(is_valid_default_url("http://example.com/a.png"));
        assert!(is_valid_default_url("https://example.com:8443/a.png"));
        assert!(!is_valid_default_url("ftp://example.com/a.png"));
        assert!(!is_valid_default_url("/relative/a.png"));
        assert!(!is_valid_default_url("example.com/a.png"));
    }

    #[test]
    fn default_keywords() {
        for keyword in GravatarSource::DEFAULT_KEYWORDS {
            assert!(is_valid_default_keyword(keyword));
        }
        assert!(!is_valid_default_keyword("Identicon"));
        assert!(!is_valid_default_keyword("blank"));
    }

    #[test]
    fn resolved_options_serialize_with_wire_names() {
        let source = GravatarSource::default();
        let options = AvatarOptions::new()
            .with_size(48)
            .with_rating("any")
            .with_default("mm");
        let resolved = source.resolve_options(Some(&foo()), &options).unwrap();

        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "field": "email",
                "default": "mm",
                "size": 48,
                "rating": "any"
            })
        );
    }

    #[test]
    fn rating_constants_match_enum() {
        let names: Vec<&str> = Rating::ALL.iter().map(Rating::as_str).collect();
        assert_eq!(names, GravatarSource::ALLOWED_RATINGS);
    }

    #[test]
    fn keyword_constants_match_enum() {
        let names: Vec<&str> = DefaultAvatar::ALL.iter().map(DefaultAvatar::as_str).collect();
        assert_eq!(names, GravatarSource::DEFAULT_KEYWORDS);
    }

    #[test]
    fn hash_value_digest() {
        assert_eq!(hash_value("Foo@Bar.com").as_deref(), Some(FOO_DIGEST));
        assert_eq!(hash_value(""), None);
    }
}
